use clap::Parser;
use std::sync::Arc;
use uni_directory::adapters::dataset;
use uni_directory::config::LogFormat;
use uni_directory::domain::ports::UniversityStore;
use uni_directory::utils::{logger, validation::Validate};
use uni_directory::{
    server, AppState, CliArgs, DatasetPipeline, FileStore, LocalStorage, SeedEngine, SeedOutcome,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = CliArgs::parse();

    let config = match args.resolve() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("❌ {}", e);
            std::process::exit(1);
        }
    };

    // 初始化日誌
    match config.logging.format {
        LogFormat::Compact => logger::init_cli_logger(config.logging.verbose),
        LogFormat::Json => logger::init_json_logger(config.logging.verbose),
    }

    tracing::info!("Starting uni-directory");
    tracing::debug!("Resolved config: {:?}", config);

    // 驗證配置
    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        eprintln!("❌ {}", e);
        std::process::exit(1);
    }

    // 開啟 store；無法開啟就直接結束，不提供降級服務
    let storage = LocalStorage::new(&config.store.data_dir);
    let store: Arc<dyn UniversityStore> =
        match FileStore::open(storage, config.store.snapshot_file.clone()).await {
            Ok(store) => Arc::new(store),
            Err(e) => {
                tracing::error!("✗ Error opening record store: {}", e);
                std::process::exit(1);
            }
        };
    if let Err(e) = store.ping().await {
        tracing::error!("✗ Record store unreachable: {}", e);
        std::process::exit(1);
    }
    tracing::info!("✓ Record store ready ({})", config.store.data_dir);

    let source = dataset::from_source(
        &config.dataset.source,
        &config.store.data_dir,
        config.dataset_timeout(),
    );
    let seeder = SeedEngine::new(DatasetPipeline::new(source, store.clone()), store.clone());

    match seeder.ensure_seeded().await {
        Ok(SeedOutcome::AlreadySeeded { .. }) => {}
        Ok(SeedOutcome::Imported { inserted, rejected }) => {
            tracing::info!("✅ Seeded {} universities ({} rejected)", inserted, rejected);
        }
        Err(e) if e.is_fatal_at_startup() => {
            tracing::error!("✗ Seeding failed: {}", e);
            std::process::exit(1);
        }
        Err(e) => {
            tracing::warn!("⚠️ Dataset import skipped: {}", e);
        }
    }

    let state = AppState::new(store, config.limits);
    server::serve(state, &config).await
}
