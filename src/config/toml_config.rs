use crate::adapters::dataset::is_remote;
use crate::domain::model::QueryLimits;
use crate::utils::error::{DirectoryError, Result};
use crate::utils::validation::{self, Validate};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Service configuration. Every section and field has a default, so an
/// empty file (or no file at all) yields a runnable setup.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub store: StoreConfig,
    pub dataset: DatasetConfig,
    pub limits: QueryLimits,
    pub cors: CorsConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 5001,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    pub data_dir: String,
    pub snapshot_file: String,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            data_dir: "./data".to_string(),
            snapshot_file: "store.json".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DatasetConfig {
    /// File under `store.data_dir`, or an http(s) URL.
    pub source: String,
    pub timeout_seconds: u64,
}

impl Default for DatasetConfig {
    fn default() -> Self {
        Self {
            source: "data.json".to_string(),
            timeout_seconds: 30,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CorsConfig {
    pub allowed_origins: Vec<String>,
    pub max_age: u64,
}

impl Default for CorsConfig {
    fn default() -> Self {
        Self {
            allowed_origins: vec!["*".to_string()],
            max_age: 3600,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Compact,
    Json,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub format: LogFormat,
    pub verbose: bool,
}

impl AppConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(|e| {
            DirectoryError::config(format!(
                "cannot read config file '{}': {}",
                path.as_ref().display(),
                e
            ))
        })?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        // 處理環境變數替換
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content)
            .map_err(|e| DirectoryError::config(format!("TOML parsing error: {}", e)))
    }

    /// 替換環境變數 (例如 ${PORT})，未設定的變數保持原樣
    fn substitute_env_vars(content: &str) -> Result<String> {
        use regex::Regex;
        let re = Regex::new(r"\$\{([^}]+)\}")
            .map_err(|e| DirectoryError::config(format!("env pattern: {}", e)))?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }

    pub fn dataset_timeout(&self) -> std::time::Duration {
        std::time::Duration::from_secs(self.dataset.timeout_seconds)
    }
}

impl Validate for AppConfig {
    fn validate(&self) -> Result<()> {
        validation::validate_non_empty_string("server.host", &self.server.host)?;
        validation::validate_range("server.port", self.server.port, 1, u16::MAX)?;

        validation::validate_path("store.data_dir", &self.store.data_dir)?;
        validation::validate_path("store.snapshot_file", &self.store.snapshot_file)?;
        validation::validate_file_extension(
            "store.snapshot_file",
            &self.store.snapshot_file,
            &["json"],
        )?;

        if is_remote(&self.dataset.source) {
            validation::validate_url("dataset.source", &self.dataset.source)?;
        } else {
            validation::validate_path("dataset.source", &self.dataset.source)?;
            validation::validate_file_extension(
                "dataset.source",
                &self.dataset.source,
                &["json"],
            )?;
        }
        validation::validate_positive_number(
            "dataset.timeout_seconds",
            self.dataset.timeout_seconds as usize,
            1,
        )?;

        validation::validate_positive_number("limits.list_limit", self.limits.list_limit, 1)?;
        validation::validate_positive_number("limits.search_limit", self.limits.search_limit, 1)?;
        validation::validate_positive_number(
            "limits.top_countries_default",
            self.limits.top_countries_default,
            1,
        )?;
        validation::validate_positive_number(
            "limits.by_country_default",
            self.limits.by_country_default,
            1,
        )?;

        if self.cors.allowed_origins.is_empty() {
            return Err(DirectoryError::InvalidConfigValueError {
                field: "cors.allowed_origins".to_string(),
                value: "[]".to_string(),
                reason: "at least one origin (or \"*\") is required".to_string(),
            });
        }

        Ok(())
    }
}
