//! HTTP client for the daybook API.

pub mod calendars;
pub mod entries;
pub mod health;
pub mod tasks;

use daybook_core::remote::{ApiError, Result};

/// HTTP client for the daybook API.
///
/// Implements the `EntryApi`, `TaskApi`, and `CalendarApi` traits so it can
/// be injected into the data layer as the remote adapter.
#[derive(Debug, Clone)]
pub struct DaybookClient {
    client: reqwest::Client,
    base_url: String,
}

impl DaybookClient {
    /// Create a new client with the given base URL.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into(),
        }
    }

    /// Create from environment (DAYBOOK_API_URL or default).
    pub fn from_env() -> Self {
        let base_url = std::env::var("DAYBOOK_API_URL")
            .unwrap_or_else(|_| "http://localhost:8000".to_string());
        Self::new(base_url)
    }

    /// Get the base URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Build a URL for an endpoint.
    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Map a network-level failure to the error taxonomy.
    fn transport(err: reqwest::Error) -> ApiError {
        ApiError::Transport(err.to_string())
    }

    /// Handle responses carrying a JSON body.
    async fn handle_response<T: serde::de::DeserializeOwned>(
        &self,
        response: reqwest::Response,
        resource: &'static str,
    ) -> Result<T> {
        let status = response.status();
        if status.is_success() {
            return response.json().await.map_err(Self::transport);
        }
        let message = response
            .text()
            .await
            .unwrap_or_else(|_| "unknown error".to_string());
        Err(ApiError::from_status(status.as_u16(), message, resource))
    }

    /// Handle responses with no body expected (deletes).
    async fn handle_empty_response(
        &self,
        response: reqwest::Response,
        resource: &'static str,
    ) -> Result<()> {
        let status = response.status();
        if status.is_success() {
            return Ok(());
        }
        let message = response
            .text()
            .await
            .unwrap_or_else(|_| "unknown error".to_string());
        Err(ApiError::from_status(status.as_u16(), message, resource))
    }
}
