use async_trait::async_trait;
use uuid::Uuid;

use crate::item::{
    Calendar, CalendarPatch, Entry, EntryListFilter, EntryPatch, NewCalendar, NewEntry, NewTask,
    Task, TaskListFilter, TaskPatch, TaskStatus,
};

use super::Result;

/// Remote API operations for entries.
///
/// Implementations perform the actual network calls; the data layer only
/// sees this contract, so tests can substitute a mock.
#[async_trait]
pub trait EntryApi: Send + Sync {
    /// Lists entries matching a filter.
    async fn list_entries(&self, filter: &EntryListFilter) -> Result<Vec<Entry>>;

    /// Gets an entry by its ID.
    async fn get_entry(&self, id: Uuid) -> Result<Entry>;

    /// Creates a new entry, returning the authoritative server copy.
    async fn create_entry(&self, input: &NewEntry) -> Result<Entry>;

    /// Updates an entry, returning the authoritative server copy.
    async fn update_entry(&self, id: Uuid, patch: &EntryPatch) -> Result<Entry>;

    /// Deletes an entry by its ID.
    async fn delete_entry(&self, id: Uuid) -> Result<()>;

    /// Marks an entry complete or incomplete, returning the server copy.
    async fn set_entry_completion(&self, id: Uuid, is_completed: bool) -> Result<Entry>;
}

/// Remote API operations for tasks.
#[async_trait]
pub trait TaskApi: Send + Sync {
    /// Lists tasks matching a filter.
    async fn list_tasks(&self, filter: &TaskListFilter) -> Result<Vec<Task>>;

    /// Gets a task by its ID.
    async fn get_task(&self, id: Uuid) -> Result<Task>;

    /// Creates a new task, returning the authoritative server copy.
    async fn create_task(&self, input: &NewTask) -> Result<Task>;

    /// Updates a task, returning the authoritative server copy.
    async fn update_task(&self, id: Uuid, patch: &TaskPatch) -> Result<Task>;

    /// Deletes a task by its ID.
    async fn delete_task(&self, id: Uuid) -> Result<()>;

    /// Moves a task to the given status, returning the server copy.
    async fn set_task_status(&self, id: Uuid, status: TaskStatus) -> Result<Task>;
}

/// Remote API operations for calendars.
#[async_trait]
pub trait CalendarApi: Send + Sync {
    /// Lists the calendars visible to the current user.
    async fn list_calendars(&self) -> Result<Vec<Calendar>>;

    /// Gets a calendar by its ID.
    async fn get_calendar(&self, id: Uuid) -> Result<Calendar>;

    /// Creates a new calendar.
    async fn create_calendar(&self, input: &NewCalendar) -> Result<Calendar>;

    /// Updates a calendar.
    async fn update_calendar(&self, id: Uuid, patch: &CalendarPatch) -> Result<Calendar>;

    /// Deletes a calendar by its ID.
    async fn delete_calendar(&self, id: Uuid) -> Result<()>;
}
