//! Health CLI commands.

use clap::{Parser, Subcommand};

/// Server health commands.
#[derive(Debug, Parser)]
pub struct HealthCommand {
    #[command(subcommand)]
    pub action: HealthAction,
}

/// Available health actions.
#[derive(Debug, Subcommand)]
pub enum HealthAction {
    /// Check API health.
    Check,
}
