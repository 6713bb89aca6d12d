//! List-view filter parameters.
//!
//! Filters serve double duty: they are the query parameters sent to the list
//! endpoints, and they are pure predicates over items so the data layer can
//! decide which cached list views a locally created item belongs in.

use serde::Serialize;
use uuid::Uuid;

use super::types::{Entry, EntryType, Task, TaskStatus};

/// Filter parameters for entry list views.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct EntryListFilter {
    pub calendar_id: Uuid,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub task_id: Option<Uuid>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub entry_type: Option<EntryType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_completed: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub has_timestamp: Option<bool>,
}

impl EntryListFilter {
    /// Creates a filter matching every entry in a calendar.
    pub fn for_calendar(calendar_id: Uuid) -> Self {
        Self {
            calendar_id,
            task_id: None,
            entry_type: None,
            is_completed: None,
            has_timestamp: None,
        }
    }

    /// Restricts to entries attached to the given task.
    pub fn with_task(mut self, task_id: Uuid) -> Self {
        self.task_id = Some(task_id);
        self
    }

    /// Restricts to entries of the given type.
    pub fn with_entry_type(mut self, entry_type: EntryType) -> Self {
        self.entry_type = Some(entry_type);
        self
    }

    /// Restricts to completed or uncompleted entries.
    pub fn with_completed(mut self, is_completed: bool) -> Self {
        self.is_completed = Some(is_completed);
        self
    }

    /// Restricts to scheduled (`true`) or unscheduled (`false`) entries.
    pub fn with_scheduled(mut self, has_timestamp: bool) -> Self {
        self.has_timestamp = Some(has_timestamp);
        self
    }

    /// Returns true if the entry belongs in a list view with this filter.
    pub fn matches(&self, entry: &Entry) -> bool {
        entry.calendar_id == self.calendar_id
            && self.task_id.is_none_or(|id| entry.task_id == Some(id))
            && self.entry_type.is_none_or(|t| entry.entry_type == t)
            && self.is_completed.is_none_or(|c| entry.is_completed == c)
            && self
                .has_timestamp
                .is_none_or(|h| entry.timestamp.is_some() == h)
    }
}

/// Filter parameters for task list views.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct TaskListFilter {
    pub calendar_id: Uuid,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<TaskStatus>,
}

impl TaskListFilter {
    /// Creates a filter matching every task in a calendar.
    pub fn for_calendar(calendar_id: Uuid) -> Self {
        Self {
            calendar_id,
            status: None,
        }
    }

    /// Restricts to tasks with the given status.
    pub fn with_status(mut self, status: TaskStatus) -> Self {
        self.status = Some(status);
        self
    }

    /// Returns true if the task belongs in a list view with this filter.
    pub fn matches(&self, task: &Task) -> bool {
        task.calendar_id == self.calendar_id && self.status.is_none_or(|s| task.status == s)
    }
}
