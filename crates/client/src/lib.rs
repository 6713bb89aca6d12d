//! daybook_client - HTTP client and CLI for the daybook API.

pub mod cli;
pub mod client;
pub mod output;

pub use client::DaybookClient;
