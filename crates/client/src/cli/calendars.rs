//! Calendar CLI commands.

use clap::{Parser, Subcommand};
use uuid::Uuid;

/// Calendar management commands.
#[derive(Debug, Parser)]
pub struct CalendarsCommand {
    #[command(subcommand)]
    pub action: CalendarsAction,
}

/// Available calendar actions.
#[derive(Debug, Subcommand)]
pub enum CalendarsAction {
    /// List calendars.
    List,
    /// Get calendar by ID.
    Get {
        /// Calendar ID.
        id: Uuid,
    },
    /// Create a new calendar.
    Create {
        /// Calendar name.
        #[arg(long)]
        name: String,
        /// Default color (#RRGGBB).
        #[arg(long)]
        color: Option<String>,
        /// Optional description.
        #[arg(long)]
        description: Option<String>,
    },
    /// Update a calendar.
    Update {
        /// Calendar ID.
        id: Uuid,
        /// New name.
        #[arg(long)]
        name: Option<String>,
        /// New color (#RRGGBB).
        #[arg(long)]
        color: Option<String>,
        /// New description.
        #[arg(long)]
        description: Option<String>,
    },
    /// Delete calendar by ID.
    Delete {
        /// Calendar ID.
        id: Uuid,
    },
}
