//! Task API operations.

use async_trait::async_trait;
use uuid::Uuid;

use daybook_core::item::{NewTask, Task, TaskListFilter, TaskPatch, TaskStatus};
use daybook_core::remote::{Result, TaskApi};

use super::DaybookClient;

#[async_trait]
impl TaskApi for DaybookClient {
    async fn list_tasks(&self, filter: &TaskListFilter) -> Result<Vec<Task>> {
        let response = self
            .client
            .get(self.url("/api/v1/tasks"))
            .query(filter)
            .send()
            .await
            .map_err(Self::transport)?;
        self.handle_response(response, "Task").await
    }

    async fn get_task(&self, id: Uuid) -> Result<Task> {
        let response = self
            .client
            .get(self.url(&format!("/api/v1/tasks/{}", id)))
            .send()
            .await
            .map_err(Self::transport)?;
        self.handle_response(response, "Task").await
    }

    async fn create_task(&self, input: &NewTask) -> Result<Task> {
        let response = self
            .client
            .post(self.url("/api/v1/tasks"))
            .json(input)
            .send()
            .await
            .map_err(Self::transport)?;
        self.handle_response(response, "Task").await
    }

    async fn update_task(&self, id: Uuid, patch: &TaskPatch) -> Result<Task> {
        let response = self
            .client
            .patch(self.url(&format!("/api/v1/tasks/{}", id)))
            .json(patch)
            .send()
            .await
            .map_err(Self::transport)?;
        self.handle_response(response, "Task").await
    }

    async fn delete_task(&self, id: Uuid) -> Result<()> {
        let response = self
            .client
            .delete(self.url(&format!("/api/v1/tasks/{}", id)))
            .send()
            .await
            .map_err(Self::transport)?;
        self.handle_empty_response(response, "Task").await
    }

    async fn set_task_status(&self, id: Uuid, status: TaskStatus) -> Result<Task> {
        // Complete, reopen, and archive have dedicated endpoints; cancelling
        // goes through a plain status patch.
        let response = match status {
            TaskStatus::Completed => self
                .client
                .post(self.url(&format!("/api/v1/tasks/{}/complete", id)))
                .send()
                .await
                .map_err(Self::transport)?,
            TaskStatus::Active => self
                .client
                .post(self.url(&format!("/api/v1/tasks/{}/reopen", id)))
                .send()
                .await
                .map_err(Self::transport)?,
            TaskStatus::Archived => self
                .client
                .post(self.url(&format!("/api/v1/tasks/{}/archive", id)))
                .send()
                .await
                .map_err(Self::transport)?,
            TaskStatus::Cancelled => self
                .client
                .patch(self.url(&format!("/api/v1/tasks/{}", id)))
                .json(&TaskPatch::new().with_status(TaskStatus::Cancelled))
                .send()
                .await
                .map_err(Self::transport)?,
        };
        self.handle_response(response, "Task").await
    }
}
