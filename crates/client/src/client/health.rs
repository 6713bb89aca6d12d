//! Health check operations.

use daybook_core::remote::Result;

use super::DaybookClient;

/// Health check response.
#[derive(Debug, serde::Serialize, serde::Deserialize)]
pub struct Health {
    pub status: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
}

impl DaybookClient {
    /// Check API health.
    pub async fn health(&self) -> Result<Health> {
        let response = self
            .client
            .get(self.url("/health"))
            .send()
            .await
            .map_err(Self::transport)?;
        self.handle_response(response, "Health").await
    }
}
