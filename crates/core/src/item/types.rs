use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::id::ItemId;

/// A named calendar that contains entries and tasks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Calendar {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    /// Default color for items in this calendar (`#RRGGBB`).
    pub color: String,
    pub created_by: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Calendar {
    /// Creates a new calendar with the given name and color.
    pub fn new(name: impl Into<String>, color: impl Into<String>, created_by: Uuid) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            description: None,
            color: color.into(),
            created_by,
            created_at: now,
            updated_at: now,
        }
    }

    /// Sets the description for this calendar.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Sets a specific ID for this calendar (useful for testing).
    pub fn with_id(mut self, id: Uuid) -> Self {
        self.id = id;
        self
    }
}

/// The kind of entry, determining how it is rendered and scheduled.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntryType {
    /// A free-form note, possibly unscheduled.
    #[default]
    Note,
    /// A checkable to-do item.
    Task,
    /// A scheduled event with a time slot.
    Event,
}

impl EntryType {
    /// Returns the wire name for this entry type.
    pub fn as_str(&self) -> &'static str {
        match self {
            EntryType::Note => "note",
            EntryType::Task => "task",
            EntryType::Event => "event",
        }
    }
}

impl std::fmt::Display for EntryType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A calendar entry: a note, to-do, or event belonging to one calendar.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entry {
    pub id: ItemId,
    pub calendar_id: Uuid,
    pub title: String,
    pub content: Option<String>,
    pub entry_type: EntryType,
    /// Scheduled start. `None` means the entry is unscheduled.
    pub timestamp: Option<DateTime<Utc>>,
    pub end_timestamp: Option<DateTime<Utc>>,
    pub is_all_day: bool,
    pub is_completed: bool,
    pub completed_at: Option<DateTime<Utc>>,
    pub completed_by: Option<Uuid>,
    /// Priority from 0 (none) to 3 (high).
    pub priority: u8,
    #[serde(default)]
    pub tags: Vec<String>,
    /// Optional accent color (`#RRGGBB`), overriding the calendar default.
    pub color: Option<String>,
    pub reminder_time: Option<DateTime<Utc>>,
    pub recurrence_rule: Option<String>,
    /// Task this entry is attached to, if any.
    pub task_id: Option<Uuid>,
    pub position_in_task: Option<i32>,
    pub created_by: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub last_modified_by: Option<Uuid>,
}

impl Entry {
    /// Creates a new unscheduled note entry.
    pub fn new(calendar_id: Uuid, title: impl Into<String>, created_by: Uuid) -> Self {
        let now = Utc::now();
        Self {
            id: ItemId::Assigned(Uuid::new_v4()),
            calendar_id,
            title: title.into(),
            content: None,
            entry_type: EntryType::Note,
            timestamp: None,
            end_timestamp: None,
            is_all_day: false,
            is_completed: false,
            completed_at: None,
            completed_by: None,
            priority: 0,
            tags: Vec::new(),
            color: None,
            reminder_time: None,
            recurrence_rule: None,
            task_id: None,
            position_in_task: None,
            created_by,
            created_at: now,
            updated_at: now,
            last_modified_by: None,
        }
    }

    /// Sets a specific ID for this entry (useful for testing).
    pub fn with_id(mut self, id: ItemId) -> Self {
        self.id = id;
        self
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

    /// Attaches the entry to a task.
    pub fn with_task_id(mut self, task_id: Uuid) -> Self {
        self.task_id = Some(task_id);
        self
    }

    /// Sets the creation timestamp (useful for testing).
    pub fn with_created_at(mut self, at: DateTime<Utc>) -> Self {
        self.created_at = at;
        self
    }

    /// Sets the update timestamp (useful for testing).
    pub fn with_updated_at(mut self, at: DateTime<Utc>) -> Self {
        self.updated_at = at;
        self
    }

    /// Returns true if the entry has a scheduled time.
    pub fn is_scheduled(&self) -> bool {
        self.timestamp.is_some()
    }

    /// Returns true if the entry is scheduled in the past and not completed.
    pub fn is_overdue(&self, now: DateTime<Utc>) -> bool {
        !self.is_completed && self.timestamp.is_some_and(|t| t < now)
    }
}

/// Lifecycle state of a task.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    #[default]
    Active,
    Completed,
    Archived,
    Cancelled,
}

impl TaskStatus {
    /// Returns the wire name for this status.
    pub fn as_str(&self) -> &'static str {
        match self {
            TaskStatus::Active => "active",
            TaskStatus::Completed => "completed",
            TaskStatus::Archived => "archived",
            TaskStatus::Cancelled => "cancelled",
        }
    }
}

impl std::fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A task grouping entries, with server-computed completion counters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub id: ItemId,
    pub calendar_id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub due_date: Option<NaiveDate>,
    pub status: TaskStatus,
    pub color: Option<String>,
    pub icon: Option<String>,
    pub position: u32,
    pub completed_at: Option<DateTime<Utc>>,
    pub total_entries: u32,
    pub completed_entries: u32,
    pub completion_percentage: u8,
    pub created_by: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Task {
    /// Creates a new active task with no entries.
    pub fn new(calendar_id: Uuid, title: impl Into<String>, created_by: Uuid) -> Self {
        let now = Utc::now();
        Self {
            id: ItemId::Assigned(Uuid::new_v4()),
            calendar_id,
            title: title.into(),
            description: None,
            due_date: None,
            status: TaskStatus::Active,
            color: None,
            icon: None,
            position: 0,
            completed_at: None,
            total_entries: 0,
            completed_entries: 0,
            completion_percentage: 0,
            created_by,
            created_at: now,
            updated_at: now,
        }
    }

    /// Sets a specific ID for this task (useful for testing).
    pub fn with_id(mut self, id: ItemId) -> Self {
        self.id = id;
        self
    }

    /// Sets the due date.
    pub fn with_due_date(mut self, due_date: NaiveDate) -> Self {
        self.due_date = Some(due_date);
        self
    }

    /// Sets the status.
    pub fn with_status(mut self, status: TaskStatus) -> Self {
        self.status = status;
        self
    }

    /// Sets the sort position.
    pub fn with_position(mut self, position: u32) -> Self {
        self.position = position;
        self
    }

    /// Sets the update timestamp (useful for testing).
    pub fn with_updated_at(mut self, at: DateTime<Utc>) -> Self {
        self.updated_at = at;
        self
    }

    /// Returns true if the task is active and past its due date.
    pub fn is_overdue(&self, today: NaiveDate) -> bool {
        self.status == TaskStatus::Active && self.due_date.is_some_and(|due| due < today)
    }
}
