//! CLI command definitions.

pub mod calendars;
pub mod entries;
pub mod health;
pub mod tasks;

use clap::{Parser, Subcommand, ValueEnum};

/// CLI client for the daybook API.
#[derive(Debug, Parser)]
#[command(name = "daybook-client")]
#[command(about = "CLI client for the daybook API", long_about = None)]
pub struct Cli {
    /// Server base URL.
    #[arg(long, env = "DAYBOOK_API_URL", default_value = "http://localhost:8000")]
    pub base_url: String,

    /// Output format.
    #[arg(long, default_value = "pretty")]
    pub format: OutputFormat,

    /// Suppress non-essential output.
    #[arg(long)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Output format options.
#[derive(Debug, Clone, Copy, Default, ValueEnum)]
pub enum OutputFormat {
    /// Raw JSON output.
    Json,
    /// Human-readable output.
    #[default]
    Pretty,
}

/// Available commands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Entry management.
    Entries(entries::EntriesCommand),
    /// Task management.
    Tasks(tasks::TasksCommand),
    /// Calendar management.
    Calendars(calendars::CalendarsCommand),
    /// Server health checks.
    Health(health::HealthCommand),
}
