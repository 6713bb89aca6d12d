//! Typed values held by the cache.
//!
//! A cached view holds either a single item or an ordered list of items. The
//! transformation helpers return `None` when a value is unaffected, so bulk
//! edits can leave untouched views alone in a single pass.

use crate::item::{Calendar, Entry, ItemId, Task};

/// The value held by one cached view.
#[derive(Debug, Clone, PartialEq)]
pub enum QueryValue {
    Entry(Entry),
    Entries(Vec<Entry>),
    Task(Task),
    Tasks(Vec<Task>),
    Calendar(Calendar),
    Calendars(Vec<Calendar>),
}

impl QueryValue {
    /// Returns the held entries, if this is an entry list value.
    pub fn as_entries(&self) -> Option<&[Entry]> {
        match self {
            Self::Entries(entries) => Some(entries),
            _ => None,
        }
    }

    /// Consumes the value into entries, if this is an entry list value.
    pub fn into_entries(self) -> Option<Vec<Entry>> {
        match self {
            Self::Entries(entries) => Some(entries),
            _ => None,
        }
    }

    /// Returns the held entry, if this is an entry detail value.
    pub fn as_entry(&self) -> Option<&Entry> {
        match self {
            Self::Entry(entry) => Some(entry),
            _ => None,
        }
    }

    /// Consumes the value into an entry, if this is an entry detail value.
    pub fn into_entry(self) -> Option<Entry> {
        match self {
            Self::Entry(entry) => Some(entry),
            _ => None,
        }
    }

    /// Returns the held tasks, if this is a task list value.
    pub fn as_tasks(&self) -> Option<&[Task]> {
        match self {
            Self::Tasks(tasks) => Some(tasks),
            _ => None,
        }
    }

    /// Consumes the value into tasks, if this is a task list value.
    pub fn into_tasks(self) -> Option<Vec<Task>> {
        match self {
            Self::Tasks(tasks) => Some(tasks),
            _ => None,
        }
    }

    /// Consumes the value into a task, if this is a task detail value.
    pub fn into_task(self) -> Option<Task> {
        match self {
            Self::Task(task) => Some(task),
            _ => None,
        }
    }

    /// Consumes the value into calendars, if this is the calendar list value.
    pub fn into_calendars(self) -> Option<Vec<Calendar>> {
        match self {
            Self::Calendars(calendars) => Some(calendars),
            _ => None,
        }
    }

    /// Consumes the value into a calendar, if this is a calendar detail value.
    pub fn into_calendar(self) -> Option<Calendar> {
        match self {
            Self::Calendar(calendar) => Some(calendar),
            _ => None,
        }
    }

    /// Prepends an entry to an entry list value. Returns `None` for any other
    /// value kind.
    pub fn prepend_entry(&self, entry: &Entry) -> Option<QueryValue> {
        match self {
            Self::Entries(entries) => {
                let mut next = Vec::with_capacity(entries.len() + 1);
                next.push(entry.clone());
                next.extend(entries.iter().cloned());
                Some(Self::Entries(next))
            }
            _ => None,
        }
    }

    /// Prepends a task to a task list value. Returns `None` for any other
    /// value kind.
    pub fn prepend_task(&self, task: &Task) -> Option<QueryValue> {
        match self {
            Self::Tasks(tasks) => {
                let mut next = Vec::with_capacity(tasks.len() + 1);
                next.push(task.clone());
                next.extend(tasks.iter().cloned());
                Some(Self::Tasks(next))
            }
            _ => None,
        }
    }

    /// Rewrites the entry with the given id, in a detail or list value.
    /// Returns `None` when no held entry has the id or the rewrite is a
    /// no-op.
    pub fn update_entry_items(
        &self,
        id: &ItemId,
        f: impl Fn(&Entry) -> Entry,
    ) -> Option<QueryValue> {
        match self {
            Self::Entry(entry) if entry.id == *id => {
                let next = f(entry);
                (next != *entry).then(|| Self::Entry(next))
            }
            Self::Entries(entries) if entries.iter().any(|e| e.id == *id) => {
                let mut changed = false;
                let next: Vec<Entry> = entries
                    .iter()
                    .map(|e| {
                        if e.id == *id {
                            let updated = f(e);
                            if updated != *e {
                                changed = true;
                            }
                            updated
                        } else {
                            e.clone()
                        }
                    })
                    .collect();
                changed.then_some(Self::Entries(next))
            }
            _ => None,
        }
    }

    /// Rewrites the task with the given id, in a detail or list value.
    pub fn update_task_items(&self, id: &ItemId, f: impl Fn(&Task) -> Task) -> Option<QueryValue> {
        match self {
            Self::Task(task) if task.id == *id => {
                let next = f(task);
                (next != *task).then(|| Self::Task(next))
            }
            Self::Tasks(tasks) if tasks.iter().any(|t| t.id == *id) => {
                let mut changed = false;
                let next: Vec<Task> = tasks
                    .iter()
                    .map(|t| {
                        if t.id == *id {
                            let updated = f(t);
                            if updated != *t {
                                changed = true;
                            }
                            updated
                        } else {
                            t.clone()
                        }
                    })
                    .collect();
                changed.then_some(Self::Tasks(next))
            }
            _ => None,
        }
    }

    /// Removes the item with the given id from a list value. Returns `None`
    /// when the id is not present or the value is not a list.
    pub fn remove_item(&self, id: &ItemId) -> Option<QueryValue> {
        match self {
            Self::Entries(entries) if entries.iter().any(|e| e.id == *id) => Some(Self::Entries(
                entries.iter().filter(|e| e.id != *id).cloned().collect(),
            )),
            Self::Tasks(tasks) if tasks.iter().any(|t| t.id == *id) => Some(Self::Tasks(
                tasks.iter().filter(|t| t.id != *id).cloned().collect(),
            )),
            _ => None,
        }
    }

    /// Returns true if any held item carries a provisional id.
    pub fn has_provisional_ids(&self) -> bool {
        match self {
            Self::Entry(entry) => entry.id.is_provisional(),
            Self::Entries(entries) => entries.iter().any(|e| e.id.is_provisional()),
            Self::Task(task) => task.id.is_provisional(),
            Self::Tasks(tasks) => tasks.iter().any(|t| t.id.is_provisional()),
            Self::Calendar(_) | Self::Calendars(_) => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    fn test_user() -> Uuid {
        Uuid::parse_str("00000000-0000-0000-0000-0000000000aa").unwrap()
    }

    fn entry(title: &str) -> Entry {
        Entry::new(Uuid::new_v4(), title, test_user())
    }

    #[test]
    fn test_prepend_entry() {
        let existing = entry("old");
        let value = QueryValue::Entries(vec![existing.clone()]);

        let new = entry("new");
        let next = value.prepend_entry(&new).unwrap();
        let entries = next.into_entries().unwrap();

        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].title, "new");
        assert_eq!(entries[1].title, "old");
    }

    #[test]
    fn test_prepend_entry_rejects_detail_values() {
        let value = QueryValue::Entry(entry("detail"));
        assert!(value.prepend_entry(&entry("new")).is_none());
    }

    #[test]
    fn test_update_entry_items_in_list() {
        let target = entry("target");
        let other = entry("other");
        let value = QueryValue::Entries(vec![target.clone(), other.clone()]);

        let next = value
            .update_entry_items(&target.id, |e| {
                let mut e = e.clone();
                e.title = "renamed".to_string();
                e
            })
            .unwrap();

        let entries = next.into_entries().unwrap();
        assert_eq!(entries[0].title, "renamed");
        assert_eq!(entries[1].title, "other");
    }

    #[test]
    fn test_update_entry_items_noop_returns_none() {
        let target = entry("target");
        let value = QueryValue::Entries(vec![target.clone()]);

        assert!(value.update_entry_items(&target.id, Clone::clone).is_none());

        let absent = ItemId::provisional();
        assert!(value
            .update_entry_items(&absent, |e| {
                let mut e = e.clone();
                e.title = "never applied".to_string();
                e
            })
            .is_none());
    }

    #[test]
    fn test_update_entry_items_in_detail() {
        let target = entry("target");
        let value = QueryValue::Entry(target.clone());

        let next = value
            .update_entry_items(&target.id, |e| {
                let mut e = e.clone();
                e.is_completed = true;
                e
            })
            .unwrap();

        assert!(next.into_entry().unwrap().is_completed);
    }

    #[test]
    fn test_remove_item() {
        let target = entry("target");
        let other = entry("other");
        let value = QueryValue::Entries(vec![target.clone(), other.clone()]);

        let next = value.remove_item(&target.id).unwrap();
        let entries = next.into_entries().unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].id, other.id);

        assert!(value.remove_item(&ItemId::provisional()).is_none());
    }

    #[test]
    fn test_has_provisional_ids() {
        let assigned = entry("assigned");
        let provisional = entry("provisional").with_id(ItemId::provisional());

        assert!(!QueryValue::Entries(vec![assigned.clone()]).has_provisional_ids());
        assert!(QueryValue::Entries(vec![assigned, provisional.clone()]).has_provisional_ids());
        assert!(QueryValue::Entry(provisional).has_provisional_ids());
    }
}
