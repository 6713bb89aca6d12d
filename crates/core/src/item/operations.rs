use chrono::{DateTime, Utc};
use uuid::Uuid;

use super::error::{EntryError, TaskError};
use super::requests::{EntryPatch, NewEntry, NewTask, TaskPatch};
use super::types::{Entry, Task, TaskStatus};

/// Maximum entry title length accepted by the API.
pub const MAX_ENTRY_TITLE_LEN: usize = 500;
/// Maximum task title length accepted by the API.
pub const MAX_TASK_TITLE_LEN: usize = 300;
/// Highest allowed priority value.
pub const MAX_PRIORITY: u8 = 3;

/// Validates an entry creation request before it is sent.
pub fn validate_new_entry(input: &NewEntry) -> Result<(), EntryError> {
    validate_entry_title(&input.title)?;
    if input.priority > MAX_PRIORITY {
        return Err(EntryError::InvalidPriority(input.priority));
    }
    if let Some(color) = &input.color {
        if !is_valid_color(color) {
            return Err(EntryError::InvalidColor(color.clone()));
        }
    }
    if let (Some(start), Some(end)) = (input.timestamp, input.end_timestamp) {
        if end < start {
            return Err(EntryError::InvalidTimeRange);
        }
    }
    Ok(())
}

/// Validates an entry update request before it is sent.
pub fn validate_entry_patch(patch: &EntryPatch) -> Result<(), EntryError> {
    if let Some(title) = &patch.title {
        validate_entry_title(title)?;
    }
    if let Some(priority) = patch.priority {
        if priority > MAX_PRIORITY {
            return Err(EntryError::InvalidPriority(priority));
        }
    }
    if let Some(color) = &patch.color {
        if !is_valid_color(color) {
            return Err(EntryError::InvalidColor(color.clone()));
        }
    }
    if let (Some(start), Some(end)) = (patch.timestamp, patch.end_timestamp) {
        if end < start {
            return Err(EntryError::InvalidTimeRange);
        }
    }
    Ok(())
}

/// Validates a task creation request before it is sent.
pub fn validate_new_task(input: &NewTask) -> Result<(), TaskError> {
    validate_task_title(&input.title)?;
    if let Some(color) = &input.color {
        if !is_valid_color(color) {
            return Err(TaskError::InvalidColor(color.clone()));
        }
    }
    Ok(())
}

/// Validates a task update request before it is sent.
pub fn validate_task_patch(patch: &TaskPatch) -> Result<(), TaskError> {
    if let Some(title) = &patch.title {
        validate_task_title(title)?;
    }
    if let Some(color) = &patch.color {
        if !is_valid_color(color) {
            return Err(TaskError::InvalidColor(color.clone()));
        }
    }
    Ok(())
}

fn validate_entry_title(title: &str) -> Result<(), EntryError> {
    if title.trim().is_empty() {
        return Err(EntryError::EmptyTitle);
    }
    if title.chars().count() > MAX_ENTRY_TITLE_LEN {
        return Err(EntryError::TitleTooLong(MAX_ENTRY_TITLE_LEN));
    }
    Ok(())
}

fn validate_task_title(title: &str) -> Result<(), TaskError> {
    if title.trim().is_empty() {
        return Err(TaskError::EmptyTitle);
    }
    if title.chars().count() > MAX_TASK_TITLE_LEN {
        return Err(TaskError::TitleTooLong(MAX_TASK_TITLE_LEN));
    }
    Ok(())
}

/// Checks if a color string is a `#RRGGBB` hex color.
fn is_valid_color(color: &str) -> bool {
    let Some(hex) = color.strip_prefix('#') else {
        return false;
    };
    hex.len() == 6 && hex.chars().all(|c| c.is_ascii_hexdigit())
}

/// Applies a completion state change to an entry.
///
/// Completing records who completed it and when; un-completing clears both.
/// The modification metadata is bumped either way.
pub fn apply_completion(entry: &mut Entry, is_completed: bool, actor: Uuid, at: DateTime<Utc>) {
    entry.is_completed = is_completed;
    if is_completed {
        entry.completed_at = Some(at);
        entry.completed_by = Some(actor);
    } else {
        entry.completed_at = None;
        entry.completed_by = None;
    }
    entry.updated_at = at;
    entry.last_modified_by = Some(actor);
}

/// Applies a status change to a task.
///
/// Moving into `Completed` records the completion time; any other status
/// clears it.
pub fn apply_task_status(task: &mut Task, status: TaskStatus, at: DateTime<Utc>) {
    task.status = status;
    task.completed_at = if status == TaskStatus::Completed {
        Some(at)
    } else {
        None
    };
    task.updated_at = at;
}
