//! Error types for the LIEN console

use reqwest::StatusCode;
use thiserror::Error;
use validator::ValidationErrors;

/// Failure of a single remote call
#[derive(Error, Debug)]
pub enum RemoteError {
    #[error("transport failure: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("remote service answered {status}")]
    Status {
        status: StatusCode,
        /// `error_message` from the response body, when the service sent one
        message: Option<String>,
    },

    #[error("unexpected response body: {0}")]
    Decode(#[source] serde_json::Error),
}

impl RemoteError {
    /// Message supplied by the remote service, if any
    pub fn server_message(&self) -> Option<&str> {
        match self {
            RemoteError::Status { message, .. } => message.as_deref(),
            _ => None,
        }
    }
}

/// Main application error type
#[derive(Error, Debug)]
pub enum AppError {
    #[error("{0}")]
    Validation(String),

    #[error("Remote error: {0}")]
    Remote(#[from] RemoteError),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Unsupported operation: {0}")]
    Unsupported(String),

    #[error("Storage error: {0}")]
    Storage(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    pub fn is_validation(&self) -> bool {
        matches!(self, AppError::Validation(_))
    }
}

impl From<ValidationErrors> for AppError {
    fn from(errors: ValidationErrors) -> Self {
        // Forms show one inline message at a time; report the first one.
        let message = errors
            .field_errors()
            .into_iter()
            .flat_map(|(_, errs)| errs.iter())
            .find_map(|e| e.message.as_ref().map(|m| m.to_string()))
            .unwrap_or_else(|| "Invalid input".to_string());
        AppError::Validation(message)
    }
}

/// Result type alias for application operations
pub type AppResult<T> = Result<T, AppError>;
