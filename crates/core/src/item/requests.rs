//! API request types for item mutations.
//!
//! These types are shared between the data layer and the HTTP client for
//! type-safe API communication. Each mutation kind has its own input struct
//! with explicit optional fields; patches never travel as untyped maps.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::id::ItemId;
use super::types::{Calendar, Entry, EntryType, Task, TaskStatus};

/// Request payload for creating a new entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewEntry {
    pub calendar_id: Uuid,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(default)]
    pub entry_type: EntryType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_timestamp: Option<DateTime<Utc>>,
    #[serde(default)]
    pub is_all_day: bool,
    #[serde(default)]
    pub priority: u8,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reminder_time: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recurrence_rule: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub task_id: Option<Uuid>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position_in_task: Option<i32>,
}

impl NewEntry {
    /// Creates a new note entry request with just a title.
    pub fn new(calendar_id: Uuid, title: impl Into<String>) -> Self {
        Self {
            calendar_id,
            title: title.into(),
            content: None,
            entry_type: EntryType::Note,
            timestamp: None,
            end_timestamp: None,
            is_all_day: false,
            priority: 0,
            tags: Vec::new(),
            color: None,
            reminder_time: None,
            recurrence_rule: None,
            task_id: None,
            position_in_task: None,
        }
    }

    /// Sets the entry type.
    pub fn with_entry_type(mut self, entry_type: EntryType) -> Self {
        self.entry_type = entry_type;
        self
    }

    /// Sets the content body.
    pub fn with_content(mut self, content: impl Into<String>) -> Self {
        self.content = Some(content.into());
        self
    }

    /// Schedules the entry at the given time.
    pub fn with_timestamp(mut self, timestamp: DateTime<Utc>) -> Self {
        self.timestamp = Some(timestamp);
        self
    }

    /// Sets the priority (0..=3).
    pub fn with_priority(mut self, priority: u8) -> Self {
        self.priority = priority;
        self
    }

    /// Sets the tag list.
    pub fn with_tags(mut self, tags: Vec<String>) -> Self {
        self.tags = tags;
        self
    }

    /// Sets the accent color.
    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = Some(color.into());
        self
    }

    /// Attaches the new entry to a task.
    pub fn with_task_id(mut self, task_id: Uuid) -> Self {
        self.task_id = Some(task_id);
        self
    }

    /// Builds the provisional entry shown in list views while the create is
    /// in flight. The id is locally synthesized; `actor` and `at` become the
    /// creator and creation time until the server responds.
    pub fn into_provisional(self, actor: Uuid, at: DateTime<Utc>) -> Entry {
        Entry {
            id: ItemId::provisional(),
            calendar_id: self.calendar_id,
            title: self.title,
            content: self.content,
            entry_type: self.entry_type,
            timestamp: self.timestamp,
            end_timestamp: self.end_timestamp,
            is_all_day: self.is_all_day,
            is_completed: false,
            completed_at: None,
            completed_by: None,
            priority: self.priority,
            tags: self.tags,
            color: self.color,
            reminder_time: self.reminder_time,
            recurrence_rule: self.recurrence_rule,
            task_id: self.task_id,
            position_in_task: self.position_in_task,
            created_by: actor,
            created_at: at,
            updated_at: at,
            last_modified_by: None,
        }
    }
}

/// Request payload for updating an entry. All fields optional; absent fields
/// are left unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntryPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub entry_type: Option<EntryType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_timestamp: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_all_day: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reminder_time: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recurrence_rule: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position_in_task: Option<i32>,
}

impl EntryPatch {
    /// Creates an empty patch.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the title.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Sets the content body.
    pub fn with_content(mut self, content: impl Into<String>) -> Self {
        self.content = Some(content.into());
        self
    }

    /// Sets the scheduled time.
    pub fn with_timestamp(mut self, timestamp: DateTime<Utc>) -> Self {
        self.timestamp = Some(timestamp);
        self
    }

    /// Sets the priority (0..=3).
    pub fn with_priority(mut self, priority: u8) -> Self {
        self.priority = Some(priority);
        self
    }

    /// Sets the tag list.
    pub fn with_tags(mut self, tags: Vec<String>) -> Self {
        self.tags = Some(tags);
        self
    }

    /// Sets the accent color.
    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = Some(color.into());
        self
    }

    /// Returns true if no field is set.
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Merges the declared fields into an existing entry.
    pub fn apply_to(&self, entry: &mut Entry) {
        if let Some(title) = &self.title {
            entry.title = title.clone();
        }
        if let Some(content) = &self.content {
            entry.content = Some(content.clone());
        }
        if let Some(entry_type) = self.entry_type {
            entry.entry_type = entry_type;
        }
        if let Some(timestamp) = self.timestamp {
            entry.timestamp = Some(timestamp);
        }
        if let Some(end_timestamp) = self.end_timestamp {
            entry.end_timestamp = Some(end_timestamp);
        }
        if let Some(is_all_day) = self.is_all_day {
            entry.is_all_day = is_all_day;
        }
        if let Some(priority) = self.priority {
            entry.priority = priority;
        }
        if let Some(tags) = &self.tags {
            entry.tags = tags.clone();
        }
        if let Some(color) = &self.color {
            entry.color = Some(color.clone());
        }
        if let Some(reminder_time) = self.reminder_time {
            entry.reminder_time = Some(reminder_time);
        }
        if let Some(recurrence_rule) = &self.recurrence_rule {
            entry.recurrence_rule = Some(recurrence_rule.clone());
        }
        if let Some(position) = self.position_in_task {
            entry.position_in_task = Some(position);
        }
    }
}

/// Request payload for creating a new task.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewTask {
    pub calendar_id: Uuid,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due_date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    #[serde(default)]
    pub position: u32,
}

impl NewTask {
    /// Creates a new task request with just a title.
    pub fn new(calendar_id: Uuid, title: impl Into<String>) -> Self {
        Self {
            calendar_id,
            title: title.into(),
            description: None,
            due_date: None,
            color: None,
            icon: None,
            position: 0,
        }
    }

    /// Sets the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Sets the due date.
    pub fn with_due_date(mut self, due_date: NaiveDate) -> Self {
        self.due_date = Some(due_date);
        self
    }

    /// Sets the accent color.
    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = Some(color.into());
        self
    }

    /// Builds the provisional task shown in list views while the create is
    /// in flight.
    pub fn into_provisional(self, actor: Uuid, at: DateTime<Utc>) -> Task {
        Task {
            id: ItemId::provisional(),
            calendar_id: self.calendar_id,
            title: self.title,
            description: self.description,
            due_date: self.due_date,
            status: TaskStatus::Active,
            color: self.color,
            icon: self.icon,
            position: self.position,
            completed_at: None,
            total_entries: 0,
            completed_entries: 0,
            completion_percentage: 0,
            created_by: actor,
            created_at: at,
            updated_at: at,
        }
    }
}

/// Request payload for updating a task. All fields optional.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due_date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<TaskStatus>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<u32>,
}

impl TaskPatch {
    /// Creates an empty patch.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the title.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Sets the due date.
    pub fn with_due_date(mut self, due_date: NaiveDate) -> Self {
        self.due_date = Some(due_date);
        self
    }

    /// Sets the status.
    pub fn with_status(mut self, status: TaskStatus) -> Self {
        self.status = Some(status);
        self
    }

    /// Merges the declared fields into an existing task.
    pub fn apply_to(&self, task: &mut Task) {
        if let Some(title) = &self.title {
            task.title = title.clone();
        }
        if let Some(description) = &self.description {
            task.description = Some(description.clone());
        }
        if let Some(due_date) = self.due_date {
            task.due_date = Some(due_date);
        }
        if let Some(status) = self.status {
            task.status = status;
        }
        if let Some(color) = &self.color {
            task.color = Some(color.clone());
        }
        if let Some(icon) = &self.icon {
            task.icon = Some(icon.clone());
        }
        if let Some(position) = self.position {
            task.position = position;
        }
    }
}

/// Request payload for creating a new calendar.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewCalendar {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

impl NewCalendar {
    /// Creates a new calendar request with just a name.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
            color: None,
        }
    }
}

/// Request payload for updating a calendar. All fields optional.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalendarPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

impl CalendarPatch {
    /// Applies the declared fields to an existing calendar.
    pub fn apply_to(&self, calendar: &mut Calendar) {
        if let Some(name) = &self.name {
            calendar.name = name.clone();
        }
        if let Some(description) = &self.description {
            calendar.description = Some(description.clone());
        }
        if let Some(color) = &self.color {
            calendar.color = color.clone();
        }
    }
}
