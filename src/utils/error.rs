use thiserror::Error;

#[derive(Error, Debug)]
pub enum DirectoryError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Dataset request failed: {0}")]
    ApiError(#[from] reqwest::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value for {field}: '{value}' ({reason})")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Dataset error: {message}")]
    DatasetError { message: String },

    #[error("Store error: {message}")]
    StoreError { message: String },

    #[error("Validation error: {message}")]
    ValidationError { message: String },

    #[error("Not found: {message}")]
    NotFoundError { message: String },
}

/// 錯誤分類，決定 HTTP 狀態碼以及啟動時是否中止
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Validation,
    NotFound,
    Store,
    Dataset,
    Configuration,
}

impl DirectoryError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::ValidationError {
            message: message.into(),
        }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFoundError {
            message: message.into(),
        }
    }

    pub fn store(message: impl Into<String>) -> Self {
        Self::StoreError {
            message: message.into(),
        }
    }

    pub fn dataset(message: impl Into<String>) -> Self {
        Self::DatasetError {
            message: message.into(),
        }
    }

    pub fn config(message: impl Into<String>) -> Self {
        Self::ConfigError {
            message: message.into(),
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::ValidationError { .. } => ErrorCategory::Validation,
            Self::NotFoundError { .. } => ErrorCategory::NotFound,
            Self::StoreError { .. } => ErrorCategory::Store,
            Self::ConfigError { .. } | Self::InvalidConfigValueError { .. } => {
                ErrorCategory::Configuration
            }
            // IO / HTTP 錯誤只會在讀取資料集時直接冒出，store 會自行包成 StoreError
            Self::IoError(_) | Self::ApiError(_) | Self::DatasetError { .. } => {
                ErrorCategory::Dataset
            }
        }
    }

    /// Startup must halt on these rather than serve degraded traffic.
    pub fn is_fatal_at_startup(&self) -> bool {
        matches!(
            self.category(),
            ErrorCategory::Store | ErrorCategory::Configuration
        )
    }

    /// Message safe to show a client. Only validation and not-found errors
    /// carry their own text; everything else is replaced by the caller.
    pub fn user_friendly_message(&self) -> String {
        match self {
            Self::ValidationError { message } | Self::NotFoundError { message } => message.clone(),
            other => other.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, DirectoryError>;
