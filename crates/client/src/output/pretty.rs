//! Pretty output formatting.

use daybook_core::item::{Calendar, Entry, Task};

/// Format a calendar for display.
pub fn format_calendar(calendar: &Calendar) -> String {
    let mut output = format!(
        "{} ({})\n  ID: {}",
        calendar.name, calendar.color, calendar.id
    );
    if let Some(desc) = &calendar.description {
        output.push_str(&format!("\n  Description: {}", desc));
    }
    output
}

/// Format calendars for display.
pub fn format_calendars(calendars: &[Calendar]) -> String {
    if calendars.is_empty() {
        return "No calendars found.".to_string();
    }
    let mut output = format!("CALENDARS ({})\n", calendars.len());
    output.push_str(&"-".repeat(40));
    for calendar in calendars {
        output.push_str(&format!("\n{}", format_calendar(calendar)));
        output.push('\n');
    }
    output
}

/// Format an entry for display.
pub fn format_entry(entry: &Entry) -> String {
    let check = if entry.is_completed { "x" } else { " " };
    let mut output = format!(
        "[{}] {} [{}]\n  ID: {}\n  Calendar: {}",
        check, entry.title, entry.entry_type, entry.id, entry.calendar_id
    );
    if let Some(timestamp) = entry.timestamp {
        output.push_str(&format!("\n  Scheduled: {}", timestamp.to_rfc3339()));
    }
    if let Some(content) = &entry.content {
        output.push_str(&format!("\n  Content: {}", content));
    }
    if entry.priority > 0 {
        output.push_str(&format!("\n  Priority: {}", entry.priority));
    }
    if !entry.tags.is_empty() {
        output.push_str(&format!("\n  Tags: {}", entry.tags.join(", ")));
    }
    if let Some(color) = &entry.color {
        output.push_str(&format!("\n  Color: {}", color));
    }
    output
}

/// Format entries for display.
pub fn format_entries(entries: &[Entry]) -> String {
    if entries.is_empty() {
        return "No entries found.".to_string();
    }
    let mut output = format!("ENTRIES ({})\n", entries.len());
    output.push_str(&"-".repeat(40));
    for entry in entries {
        output.push_str(&format!("\n{}", format_entry(entry)));
        output.push('\n');
    }
    output
}

/// Format a task for display.
pub fn format_task(task: &Task) -> String {
    let mut output = format!(
        "{} [{}] {}%\n  ID: {}\n  Calendar: {}\n  Entries: {}/{}",
        task.title,
        task.status,
        task.completion_percentage,
        task.id,
        task.calendar_id,
        task.completed_entries,
        task.total_entries
    );
    if let Some(due) = task.due_date {
        output.push_str(&format!("\n  Due: {}", due));
    }
    if let Some(desc) = &task.description {
        output.push_str(&format!("\n  Description: {}", desc));
    }
    output
}

/// Format tasks for display.
pub fn format_tasks(tasks: &[Task]) -> String {
    if tasks.is_empty() {
        return "No tasks found.".to_string();
    }
    let mut output = format!("TASKS ({})\n", tasks.len());
    output.push_str(&"-".repeat(40));
    for task in tasks {
        output.push_str(&format!("\n{}", format_task(task)));
        output.push('\n');
    }
    output
}
