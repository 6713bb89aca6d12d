//! Pure predicate matching over structured cache keys.
//!
//! Predicates select groups of cached views ("every entry list view", "the
//! detail view for this id") for bulk operations: synchronized speculative
//! edits, staleness marking, and snapshot capture.

use uuid::Uuid;

use super::keys::QueryKey;

/// A structural predicate over [`QueryKey`]s.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyPredicate {
    /// Every entry list view, regardless of filter.
    EntryLists,
    /// Entry list views scoped to one calendar.
    EntryListsFor(Uuid),
    /// The detail view for one entry.
    EntryDetail(Uuid),
    /// Every task list view, regardless of filter.
    TaskLists,
    /// Task list views scoped to one calendar.
    TaskListsFor(Uuid),
    /// The detail view for one task.
    TaskDetail(Uuid),
    /// The calendar list view.
    CalendarList,
    /// The detail view for one calendar.
    CalendarDetail(Uuid),
}

impl KeyPredicate {
    /// Checks if a cache key matches this predicate.
    pub fn matches(&self, key: &QueryKey) -> bool {
        match (self, key) {
            (KeyPredicate::EntryLists, QueryKey::EntryList(_)) => true,
            (KeyPredicate::EntryListsFor(calendar_id), QueryKey::EntryList(filter)) => {
                filter.calendar_id == *calendar_id
            }
            (KeyPredicate::EntryDetail(id), QueryKey::Entry(key_id)) => id == key_id,
            (KeyPredicate::TaskLists, QueryKey::TaskList(_)) => true,
            (KeyPredicate::TaskListsFor(calendar_id), QueryKey::TaskList(filter)) => {
                filter.calendar_id == *calendar_id
            }
            (KeyPredicate::TaskDetail(id), QueryKey::Task(key_id)) => id == key_id,
            (KeyPredicate::CalendarList, QueryKey::CalendarList) => true,
            (KeyPredicate::CalendarDetail(id), QueryKey::Calendar(key_id)) => id == key_id,
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::item::{EntryListFilter, TaskListFilter, TaskStatus};

    fn test_calendar_id() -> Uuid {
        Uuid::parse_str("00000000-0000-0000-0000-000000000001").unwrap()
    }

    fn other_calendar_id() -> Uuid {
        Uuid::parse_str("00000000-0000-0000-0000-000000000002").unwrap()
    }

    fn entry_list_key(calendar_id: Uuid) -> QueryKey {
        QueryKey::entry_list(EntryListFilter::for_calendar(calendar_id))
    }

    #[test]
    fn test_entry_lists_matches_every_filter_variant() {
        let all = entry_list_key(test_calendar_id());
        let open = QueryKey::entry_list(
            EntryListFilter::for_calendar(test_calendar_id()).with_completed(false),
        );
        let other = entry_list_key(other_calendar_id());

        assert!(KeyPredicate::EntryLists.matches(&all));
        assert!(KeyPredicate::EntryLists.matches(&open));
        assert!(KeyPredicate::EntryLists.matches(&other));
    }

    #[test]
    fn test_entry_lists_does_not_match_other_kinds() {
        let id = Uuid::new_v4();

        assert!(!KeyPredicate::EntryLists.matches(&QueryKey::entry(id)));
        assert!(!KeyPredicate::EntryLists.matches(&QueryKey::task_list(
            TaskListFilter::for_calendar(test_calendar_id())
        )));
        assert!(!KeyPredicate::EntryLists.matches(&QueryKey::CalendarList));
    }

    #[test]
    fn test_entry_lists_for_is_calendar_scoped() {
        let mine = entry_list_key(test_calendar_id());
        let theirs = entry_list_key(other_calendar_id());

        let predicate = KeyPredicate::EntryListsFor(test_calendar_id());
        assert!(predicate.matches(&mine));
        assert!(!predicate.matches(&theirs));
    }

    #[test]
    fn test_entry_detail_matches_only_its_id() {
        let id = Uuid::new_v4();
        let other = Uuid::new_v4();

        let predicate = KeyPredicate::EntryDetail(id);
        assert!(predicate.matches(&QueryKey::entry(id)));
        assert!(!predicate.matches(&QueryKey::entry(other)));
        assert!(!predicate.matches(&QueryKey::task(id)));
    }

    #[test]
    fn test_task_predicates() {
        let active = QueryKey::task_list(
            TaskListFilter::for_calendar(test_calendar_id()).with_status(TaskStatus::Active),
        );
        let id = Uuid::new_v4();

        assert!(KeyPredicate::TaskLists.matches(&active));
        assert!(KeyPredicate::TaskListsFor(test_calendar_id()).matches(&active));
        assert!(!KeyPredicate::TaskListsFor(other_calendar_id()).matches(&active));
        assert!(KeyPredicate::TaskDetail(id).matches(&QueryKey::task(id)));
        assert!(!KeyPredicate::TaskDetail(id).matches(&QueryKey::entry(id)));
    }

    #[test]
    fn test_calendar_predicates() {
        let id = Uuid::new_v4();

        assert!(KeyPredicate::CalendarList.matches(&QueryKey::CalendarList));
        assert!(!KeyPredicate::CalendarList.matches(&QueryKey::Calendar(id)));
        assert!(KeyPredicate::CalendarDetail(id).matches(&QueryKey::Calendar(id)));
        assert!(!KeyPredicate::CalendarDetail(id).matches(&QueryKey::CalendarList));
    }
}
