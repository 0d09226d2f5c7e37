use crate::config::toml_config::{AppConfig, LogFormat};
use crate::utils::error::Result;
use clap::Parser;
use std::path::PathBuf;

#[derive(Debug, Clone, Default, Parser)]
#[command(name = "uni-directory")]
#[command(about = "World universities directory and analytics API")]
pub struct CliArgs {
    /// Path to TOML configuration file
    #[arg(short, long, env = "UNI_DIRECTORY_CONFIG")]
    pub config: Option<PathBuf>,

    #[arg(long, env = "HOST")]
    pub host: Option<String>,

    #[arg(long, env = "PORT")]
    pub port: Option<u16>,

    /// Directory holding the store snapshot and local dataset file
    #[arg(long)]
    pub data_dir: Option<String>,

    /// Dataset file (relative to the data dir) or http(s) URL
    #[arg(long)]
    pub dataset: Option<String>,

    #[arg(long, help = "Emit logs as JSON")]
    pub json_logs: bool,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,
}

impl CliArgs {
    /// 載入設定檔（若有），再套用命令列覆蓋
    pub fn resolve(&self) -> Result<AppConfig> {
        let mut config = match &self.config {
            Some(path) => AppConfig::from_file(path)?,
            None => AppConfig::default(),
        };
        self.apply_overrides(&mut config);
        Ok(config)
    }

    pub fn apply_overrides(&self, config: &mut AppConfig) {
        if let Some(host) = &self.host {
            config.server.host = host.clone();
        }
        if let Some(port) = self.port {
            config.server.port = port;
        }
        if let Some(data_dir) = &self.data_dir {
            config.store.data_dir = data_dir.clone();
        }
        if let Some(dataset) = &self.dataset {
            config.dataset.source = dataset.clone();
        }
        if self.json_logs {
            config.logging.format = LogFormat::Json;
        }
        if self.verbose {
            config.logging.verbose = true;
        }
    }
}
