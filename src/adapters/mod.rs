// Adapters layer: concrete implementations of the domain ports (record store, file storage, dataset sources).

pub mod dataset;
pub mod file_store;
pub mod memory_store;
pub mod storage;
