//! Task CLI commands.

use chrono::NaiveDate;
use clap::{Parser, Subcommand, ValueEnum};
use uuid::Uuid;

pub use daybook_core::item::TaskStatus as CoreTaskStatus;

/// Task management commands.
#[derive(Debug, Parser)]
pub struct TasksCommand {
    #[command(subcommand)]
    pub action: TasksAction,
}

/// CLI task status (with clap ValueEnum).
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum TaskStatus {
    Active,
    Completed,
    Archived,
    Cancelled,
}

impl From<TaskStatus> for CoreTaskStatus {
    fn from(s: TaskStatus) -> Self {
        match s {
            TaskStatus::Active => CoreTaskStatus::Active,
            TaskStatus::Completed => CoreTaskStatus::Completed,
            TaskStatus::Archived => CoreTaskStatus::Archived,
            TaskStatus::Cancelled => CoreTaskStatus::Cancelled,
        }
    }
}

/// Available task actions.
#[derive(Debug, Subcommand)]
pub enum TasksAction {
    /// List tasks with filters.
    List {
        /// Calendar ID.
        #[arg(long)]
        calendar_id: Uuid,
        /// Filter by status.
        #[arg(long, value_enum)]
        status: Option<TaskStatus>,
    },
    /// Get task by ID.
    Get {
        /// Task ID.
        id: Uuid,
    },
    /// Create a new task.
    Create {
        /// Calendar ID.
        #[arg(long)]
        calendar_id: Uuid,
        /// Task title.
        #[arg(long)]
        title: String,
        /// Optional description.
        #[arg(long)]
        description: Option<String>,
        /// Due date (YYYY-MM-DD).
        #[arg(long)]
        due_date: Option<NaiveDate>,
        /// Optional accent color (#RRGGBB).
        #[arg(long)]
        color: Option<String>,
    },
    /// Update a task.
    Update {
        /// Task ID.
        id: Uuid,
        /// New title.
        #[arg(long)]
        title: Option<String>,
        /// New description.
        #[arg(long)]
        description: Option<String>,
        /// New due date (YYYY-MM-DD).
        #[arg(long)]
        due_date: Option<NaiveDate>,
    },
    /// Delete task by ID.
    Delete {
        /// Task ID.
        id: Uuid,
    },
    /// Mark a task completed.
    Complete {
        /// Task ID.
        id: Uuid,
    },
    /// Reopen a completed or archived task.
    Reopen {
        /// Task ID.
        id: Uuid,
    },
    /// Archive a task.
    Archive {
        /// Task ID.
        id: Uuid,
    },
}
