mod error;
mod filters;
mod id;
mod operations;
mod requests;
mod types;

pub use error::{EntryError, TaskError};
pub use filters::{EntryListFilter, TaskListFilter};
pub use id::ItemId;
pub use operations::{
    apply_completion, apply_task_status, validate_entry_patch, validate_new_entry,
    validate_new_task, validate_task_patch, MAX_ENTRY_TITLE_LEN, MAX_PRIORITY, MAX_TASK_TITLE_LEN,
};
pub use requests::{CalendarPatch, EntryPatch, NewCalendar, NewEntry, NewTask, TaskPatch};
pub use types::{Calendar, Entry, EntryType, Task, TaskStatus};
