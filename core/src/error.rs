use thiserror::Error;

#[derive(Error, Debug)]
pub enum PortalError {
    #[error("Validation failed for '{field}': {message}")]
    Validation { field: &'static str, message: String },

    #[error("{operation} request failed: {message}")]
    Transport {
        operation: &'static str,
        message: String,
    },

    #[error("{0}")]
    LimitExceeded(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl PortalError {
    /// True for errors the user can recover from by re-issuing the
    /// same action. Validation and limit errors are recoverable by
    /// fixing the input instead.
    pub fn is_retryable(&self) -> bool {
        matches!(self, PortalError::Transport { .. })
    }
}

pub type PortalResult<T> = Result<T, PortalError>;
