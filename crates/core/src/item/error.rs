use thiserror::Error;

/// Errors from entry input validation.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum EntryError {
    #[error("Entry title cannot be empty")]
    EmptyTitle,
    #[error("Entry title exceeds {0} characters")]
    TitleTooLong(usize),
    #[error("Invalid color: {0}")]
    InvalidColor(String),
    #[error("Priority {0} is out of range (0..=3)")]
    InvalidPriority(u8),
    #[error("End timestamp precedes start timestamp")]
    InvalidTimeRange,
}

/// Errors from task input validation.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TaskError {
    #[error("Task title cannot be empty")]
    EmptyTitle,
    #[error("Task title exceeds {0} characters")]
    TitleTooLong(usize),
    #[error("Invalid color: {0}")]
    InvalidColor(String),
}
