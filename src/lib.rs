pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod server;
pub mod utils;

pub use adapters::{file_store::FileStore, memory_store::MemoryStore, storage::LocalStorage};
pub use config::{AppConfig, CliArgs};
pub use crate::core::{
    analytics::AnalyticsService,
    etl::{SeedEngine, SeedOutcome},
    pipeline::DatasetPipeline,
    query::QueryService,
};
pub use domain::model::University;
pub use server::{create_router, AppState};
pub use utils::error::{DirectoryError, Result};
