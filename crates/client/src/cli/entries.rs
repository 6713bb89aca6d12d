//! Entry CLI commands.

use chrono::{DateTime, Utc};
use clap::{Parser, Subcommand, ValueEnum};
use uuid::Uuid;

// Re-export core EntryType for API usage
pub use daybook_core::item::EntryType as CoreEntryType;

/// Entry management commands.
#[derive(Debug, Parser)]
pub struct EntriesCommand {
    #[command(subcommand)]
    pub action: EntriesAction,
}

/// CLI entry type (with clap ValueEnum).
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum EntryType {
    Note,
    Task,
    Event,
}

impl From<EntryType> for CoreEntryType {
    fn from(t: EntryType) -> Self {
        match t {
            EntryType::Note => CoreEntryType::Note,
            EntryType::Task => CoreEntryType::Task,
            EntryType::Event => CoreEntryType::Event,
        }
    }
}

/// Available entry actions.
#[derive(Debug, Subcommand)]
pub enum EntriesAction {
    /// List entries with filters.
    List {
        /// Calendar ID.
        #[arg(long)]
        calendar_id: Uuid,
        /// Filter by task attachment.
        #[arg(long)]
        task_id: Option<Uuid>,
        /// Filter by entry type.
        #[arg(long, value_enum)]
        entry_type: Option<EntryType>,
        /// Filter by completion state.
        #[arg(long)]
        completed: Option<bool>,
        /// Only unscheduled entries.
        #[arg(long)]
        unscheduled: bool,
    },
    /// Get entry by ID.
    Get {
        /// Entry ID.
        id: Uuid,
    },
    /// Create a new entry.
    Create {
        /// Calendar ID.
        #[arg(long)]
        calendar_id: Uuid,
        /// Entry title.
        #[arg(long)]
        title: String,
        /// Entry type.
        #[arg(long, value_enum, default_value = "note")]
        entry_type: EntryType,
        /// Optional content body.
        #[arg(long)]
        content: Option<String>,
        /// Scheduled start (RFC 3339).
        #[arg(long)]
        timestamp: Option<DateTime<Utc>>,
        /// Priority (0..=3).
        #[arg(long, default_value = "0")]
        priority: u8,
        /// Tags (repeatable).
        #[arg(long)]
        tag: Vec<String>,
        /// Optional accent color (#RRGGBB).
        #[arg(long)]
        color: Option<String>,
        /// Attach to a task.
        #[arg(long)]
        task_id: Option<Uuid>,
    },
    /// Update an entry.
    Update {
        /// Entry ID.
        id: Uuid,
        /// New title.
        #[arg(long)]
        title: Option<String>,
        /// New content body.
        #[arg(long)]
        content: Option<String>,
        /// New scheduled start (RFC 3339).
        #[arg(long)]
        timestamp: Option<DateTime<Utc>>,
        /// New priority (0..=3).
        #[arg(long)]
        priority: Option<u8>,
        /// New accent color (#RRGGBB).
        #[arg(long)]
        color: Option<String>,
    },
    /// Delete entry by ID.
    Delete {
        /// Entry ID.
        id: Uuid,
    },
    /// Mark an entry complete (or incomplete with --undo).
    Complete {
        /// Entry ID.
        id: Uuid,
        /// Mark incomplete instead.
        #[arg(long)]
        undo: bool,
    },
}
