use thiserror::Error;

use daybook_core::item::{EntryError, TaskError};
use daybook_core::remote::ApiError;

/// Errors surfaced by the data layer.
///
/// Input validation failures never reach the cache or the network; remote
/// failures always pass through a rollback first and are then returned
/// unchanged for the caller to present.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DataError {
    #[error(transparent)]
    Api(#[from] ApiError),
    #[error(transparent)]
    InvalidEntry(#[from] EntryError),
    #[error(transparent)]
    InvalidTask(#[from] TaskError),
}

/// Result type for data-layer operations.
pub type Result<T> = std::result::Result<T, DataError>;

impl DataError {
    /// Returns true if the mutated item vanished server-side.
    pub fn is_not_found(&self) -> bool {
        matches!(self, DataError::Api(err) if err.is_not_found())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_errors_pass_through_display() {
        let error: DataError = ApiError::Transport("connection refused".to_string()).into();
        assert_eq!(error.to_string(), "Transport error: connection refused");
    }

    #[test]
    fn test_is_not_found() {
        let not_found: DataError = ApiError::NotFound {
            resource: "Entry".to_string(),
        }
        .into();
        assert!(not_found.is_not_found());

        let invalid: DataError = EntryError::EmptyTitle.into();
        assert!(!invalid.is_not_found());
    }
}
