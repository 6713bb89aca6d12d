//! Calendar API operations.

use async_trait::async_trait;
use uuid::Uuid;

use daybook_core::item::{Calendar, CalendarPatch, NewCalendar};
use daybook_core::remote::{CalendarApi, Result};

use super::DaybookClient;

#[async_trait]
impl CalendarApi for DaybookClient {
    async fn list_calendars(&self) -> Result<Vec<Calendar>> {
        let response = self
            .client
            .get(self.url("/api/v1/calendars"))
            .send()
            .await
            .map_err(Self::transport)?;
        self.handle_response(response, "Calendar").await
    }

    async fn get_calendar(&self, id: Uuid) -> Result<Calendar> {
        let response = self
            .client
            .get(self.url(&format!("/api/v1/calendars/{}", id)))
            .send()
            .await
            .map_err(Self::transport)?;
        self.handle_response(response, "Calendar").await
    }

    async fn create_calendar(&self, input: &NewCalendar) -> Result<Calendar> {
        let response = self
            .client
            .post(self.url("/api/v1/calendars"))
            .json(input)
            .send()
            .await
            .map_err(Self::transport)?;
        self.handle_response(response, "Calendar").await
    }

    async fn update_calendar(&self, id: Uuid, patch: &CalendarPatch) -> Result<Calendar> {
        let response = self
            .client
            .patch(self.url(&format!("/api/v1/calendars/{}", id)))
            .json(patch)
            .send()
            .await
            .map_err(Self::transport)?;
        self.handle_response(response, "Calendar").await
    }

    async fn delete_calendar(&self, id: Uuid) -> Result<()> {
        let response = self
            .client
            .delete(self.url(&format!("/api/v1/calendars/{}", id)))
            .send()
            .await
            .map_err(Self::transport)?;
        self.handle_empty_response(response, "Calendar").await
    }
}
