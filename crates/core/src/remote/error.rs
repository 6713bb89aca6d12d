use thiserror::Error;

/// Errors that can occur when talking to the remote API.
///
/// The data layer treats every variant identically for rollback purposes;
/// the distinctions matter for what happens after: transport errors are
/// retryable by user action, validation errors are surfaced verbatim, and
/// not-found errors force the vanished item out of the cache.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ApiError {
    #[error("Transport error: {0}")]
    Transport(String),
    #[error("Validation failed ({status}): {message}")]
    Validation { status: u16, message: String },
    #[error("{resource} not found")]
    NotFound { resource: String },
    #[error("Unexpected response ({status}): {message}")]
    Unexpected { status: u16, message: String },
}

/// Result type for remote API operations.
pub type Result<T> = std::result::Result<T, ApiError>;

impl ApiError {
    /// Maps an HTTP error status to the matching error variant.
    pub fn from_status(status: u16, message: String, resource: &str) -> Self {
        match status {
            404 => ApiError::NotFound {
                resource: resource.to_string(),
            },
            400..=499 => ApiError::Validation { status, message },
            500..=599 => ApiError::Transport(format!("server returned {status}: {message}")),
            _ => ApiError::Unexpected { status, message },
        }
    }

    /// Returns true if the target of the operation vanished server-side.
    pub fn is_not_found(&self) -> bool {
        matches!(self, ApiError::NotFound { .. })
    }

    /// Returns true if retrying the same request could succeed.
    pub fn is_retryable(&self) -> bool {
        matches!(self, ApiError::Transport(_))
    }
}
