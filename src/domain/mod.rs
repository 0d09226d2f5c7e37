// Domain layer: university record, query/aggregate shapes and ports (store, storage, dataset, pipeline).

pub mod model;
pub mod ports;
