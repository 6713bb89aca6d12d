use uuid::Uuid;

use crate::item::{EntryListFilter, TaskListFilter};

/// A structured cache key addressing one cached view.
///
/// List views are keyed by their full filter parameters, detail views by the
/// server-issued id. Keys are plain data so matching stays a pure function
/// rather than a property of some serialization scheme.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum QueryKey {
    /// An entry list view with the given filter.
    EntryList(EntryListFilter),
    /// A single-entry detail view.
    Entry(Uuid),
    /// A task list view with the given filter.
    TaskList(TaskListFilter),
    /// A single-task detail view.
    Task(Uuid),
    /// The calendar list view.
    CalendarList,
    /// A single-calendar detail view.
    Calendar(Uuid),
}

impl QueryKey {
    /// Returns the key for an entry list view.
    pub fn entry_list(filter: EntryListFilter) -> Self {
        Self::EntryList(filter)
    }

    /// Returns the key for an entry detail view.
    pub fn entry(id: Uuid) -> Self {
        Self::Entry(id)
    }

    /// Returns the key for a task list view.
    pub fn task_list(filter: TaskListFilter) -> Self {
        Self::TaskList(filter)
    }

    /// Returns the key for a task detail view.
    pub fn task(id: Uuid) -> Self {
        Self::Task(id)
    }

    /// Returns true if this key addresses a list view.
    pub fn is_list_view(&self) -> bool {
        matches!(
            self,
            Self::EntryList(_) | Self::TaskList(_) | Self::CalendarList
        )
    }

    /// Returns the detail id for detail keys, `None` for list keys.
    pub fn detail_id(&self) -> Option<Uuid> {
        match self {
            Self::Entry(id) | Self::Task(id) | Self::Calendar(id) => Some(*id),
            _ => None,
        }
    }

    /// Returns the calendar this key is scoped to, if any.
    pub fn calendar_scope(&self) -> Option<Uuid> {
        match self {
            Self::EntryList(filter) => Some(filter.calendar_id),
            Self::TaskList(filter) => Some(filter.calendar_id),
            Self::Calendar(id) => Some(*id),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::item::TaskStatus;
    use std::collections::HashMap;

    fn test_calendar_id() -> Uuid {
        Uuid::parse_str("00000000-0000-0000-0000-000000000001").unwrap()
    }

    #[test]
    fn test_list_keys_with_different_filters_are_distinct() {
        let all = QueryKey::entry_list(EntryListFilter::for_calendar(test_calendar_id()));
        let open = QueryKey::entry_list(
            EntryListFilter::for_calendar(test_calendar_id()).with_completed(false),
        );

        assert_ne!(all, open);
        assert!(all.is_list_view());
    }

    #[test]
    fn test_detail_keys() {
        let id = Uuid::new_v4();
        let key = QueryKey::entry(id);

        assert!(!key.is_list_view());
        assert_eq!(key.detail_id(), Some(id));
        assert_eq!(key.calendar_scope(), None);
    }

    #[test]
    fn test_calendar_scope() {
        let entry_list = QueryKey::entry_list(EntryListFilter::for_calendar(test_calendar_id()));
        let task_list = QueryKey::task_list(
            TaskListFilter::for_calendar(test_calendar_id()).with_status(TaskStatus::Active),
        );

        assert_eq!(entry_list.calendar_scope(), Some(test_calendar_id()));
        assert_eq!(task_list.calendar_scope(), Some(test_calendar_id()));
        assert_eq!(QueryKey::CalendarList.calendar_scope(), None);
    }

    #[test]
    fn test_keys_are_usable_as_map_keys() {
        let mut map = HashMap::new();
        let key = QueryKey::entry_list(EntryListFilter::for_calendar(test_calendar_id()));
        map.insert(key.clone(), 1);

        assert_eq!(
            map.get(&QueryKey::entry_list(EntryListFilter::for_calendar(
                test_calendar_id()
            ))),
            Some(&1)
        );
    }
}
