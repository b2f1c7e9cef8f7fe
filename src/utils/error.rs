use thiserror::Error;

#[derive(Error, Debug)]
pub enum GroupError {
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("Invalid URL: {0}")]
    UrlError(#[from] url::ParseError),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Lookup task failed: {0}")]
    TaskError(#[from] tokio::task::JoinError),

    #[error("Configuration error in '{field}': {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for '{field}': {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },
}

impl GroupError {
    /// 用於診斷訊息中的簡短原因
    pub fn reason(&self) -> String {
        match self {
            GroupError::HttpError(e) if e.is_timeout() => "request timed out".to_string(),
            GroupError::HttpError(e) if e.is_connect() => "connection failed".to_string(),
            GroupError::HttpError(e) => format!("network error: {}", e),
            GroupError::UrlError(e) => format!("invalid URL: {}", e),
            GroupError::SerializationError(e) => format!("invalid JSON: {}", e),
            other => other.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, GroupError>;
