//! Entry API operations.

use async_trait::async_trait;
use uuid::Uuid;

use daybook_core::item::{Entry, EntryListFilter, EntryPatch, NewEntry};
use daybook_core::remote::{EntryApi, Result};

use super::DaybookClient;

/// Request body for the completion endpoint.
#[derive(Debug, serde::Serialize)]
struct EntryCompletion {
    is_completed: bool,
}

#[async_trait]
impl EntryApi for DaybookClient {
    async fn list_entries(&self, filter: &EntryListFilter) -> Result<Vec<Entry>> {
        let response = self
            .client
            .get(self.url("/api/v1/entries"))
            .query(filter)
            .send()
            .await
            .map_err(Self::transport)?;
        self.handle_response(response, "Entry").await
    }

    async fn get_entry(&self, id: Uuid) -> Result<Entry> {
        let response = self
            .client
            .get(self.url(&format!("/api/v1/entries/{}", id)))
            .send()
            .await
            .map_err(Self::transport)?;
        self.handle_response(response, "Entry").await
    }

    async fn create_entry(&self, input: &NewEntry) -> Result<Entry> {
        let response = self
            .client
            .post(self.url("/api/v1/entries"))
            .json(input)
            .send()
            .await
            .map_err(Self::transport)?;
        self.handle_response(response, "Entry").await
    }

    async fn update_entry(&self, id: Uuid, patch: &EntryPatch) -> Result<Entry> {
        let response = self
            .client
            .patch(self.url(&format!("/api/v1/entries/{}", id)))
            .json(patch)
            .send()
            .await
            .map_err(Self::transport)?;
        self.handle_response(response, "Entry").await
    }

    async fn delete_entry(&self, id: Uuid) -> Result<()> {
        let response = self
            .client
            .delete(self.url(&format!("/api/v1/entries/{}", id)))
            .send()
            .await
            .map_err(Self::transport)?;
        self.handle_empty_response(response, "Entry").await
    }

    async fn set_entry_completion(&self, id: Uuid, is_completed: bool) -> Result<Entry> {
        let response = self
            .client
            .post(self.url(&format!("/api/v1/entries/{}/complete", id)))
            .json(&EntryCompletion { is_completed })
            .send()
            .await
            .map_err(Self::transport)?;
        self.handle_response(response, "Entry").await
    }
}
