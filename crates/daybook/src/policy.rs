//! Invalidation policy: which cached views go stale after a mutation
//! settles.
//!
//! The policy is a table, not a set of conditionals. Adding a mutation kind
//! means adding a row; the coordinators never hard-code invalidation
//! targets.

use uuid::Uuid;

use daybook_core::cache::{KeyPredicate, QueryKey};

use crate::store::SettleWrite;

/// The mutation kinds the data layer performs optimistically.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MutationKind {
    CreateEntry,
    UpdateEntry,
    DeleteEntry,
    SetEntryCompletion,
    CreateTask,
    UpdateTask,
    DeleteTask,
    SetTaskStatus,
}

impl MutationKind {
    fn is_task(&self) -> bool {
        matches!(
            self,
            MutationKind::CreateTask
                | MutationKind::UpdateTask
                | MutationKind::DeleteTask
                | MutationKind::SetTaskStatus
        )
    }
}

/// What happens to cached views once a mutation of a given kind settles.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Consequence {
    /// Every list view for the entity kind is flagged for refetch.
    StaleLists,
    /// The detail view for the mutated id is flagged for refetch.
    StaleDetail,
    /// The detail view for the mutated id is dropped outright.
    RemoveDetail,
}

const RULES: &[(MutationKind, &[Consequence])] = &[
    (MutationKind::CreateEntry, &[Consequence::StaleLists]),
    (
        MutationKind::UpdateEntry,
        &[Consequence::StaleLists, Consequence::StaleDetail],
    ),
    (
        MutationKind::DeleteEntry,
        &[Consequence::StaleLists, Consequence::RemoveDetail],
    ),
    (
        MutationKind::SetEntryCompletion,
        &[Consequence::StaleLists, Consequence::StaleDetail],
    ),
    (MutationKind::CreateTask, &[Consequence::StaleLists]),
    (
        MutationKind::UpdateTask,
        &[Consequence::StaleLists, Consequence::StaleDetail],
    ),
    (
        MutationKind::DeleteTask,
        &[Consequence::StaleLists, Consequence::RemoveDetail],
    ),
    (
        MutationKind::SetTaskStatus,
        &[Consequence::StaleLists, Consequence::StaleDetail],
    ),
];

/// The consequences for a mutation kind.
pub fn consequences(kind: MutationKind) -> &'static [Consequence] {
    RULES
        .iter()
        .find(|(k, _)| *k == kind)
        .map(|(_, c)| *c)
        .unwrap_or(&[])
}

fn lists_predicate(kind: MutationKind) -> KeyPredicate {
    if kind.is_task() {
        KeyPredicate::TaskLists
    } else {
        KeyPredicate::EntryLists
    }
}

fn detail_predicate(kind: MutationKind, id: Uuid) -> KeyPredicate {
    if kind.is_task() {
        KeyPredicate::TaskDetail(id)
    } else {
        KeyPredicate::EntryDetail(id)
    }
}

fn detail_key(kind: MutationKind, id: Uuid) -> QueryKey {
    if kind.is_task() {
        QueryKey::task(id)
    } else {
        QueryKey::entry(id)
    }
}

/// Resolves the policy table into concrete settlement writes. `id` is the
/// mutated item's server id; creates pass `None` and id-scoped consequences
/// resolve to nothing.
pub fn settle_writes(kind: MutationKind, id: Option<Uuid>) -> Vec<SettleWrite> {
    consequences(kind)
        .iter()
        .filter_map(|consequence| match consequence {
            Consequence::StaleLists => Some(SettleWrite::MarkStale {
                predicate: lists_predicate(kind),
            }),
            Consequence::StaleDetail => id.map(|id| SettleWrite::MarkStale {
                predicate: detail_predicate(kind, id),
            }),
            Consequence::RemoveDetail => id.map(|id| SettleWrite::Remove {
                key: detail_key(kind, id),
            }),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_only_invalidates_lists() {
        assert_eq!(
            consequences(MutationKind::CreateEntry),
            &[Consequence::StaleLists]
        );
        assert_eq!(
            consequences(MutationKind::CreateTask),
            &[Consequence::StaleLists]
        );
    }

    #[test]
    fn test_update_invalidates_lists_and_detail() {
        for kind in [
            MutationKind::UpdateEntry,
            MutationKind::SetEntryCompletion,
            MutationKind::UpdateTask,
            MutationKind::SetTaskStatus,
        ] {
            assert_eq!(
                consequences(kind),
                &[Consequence::StaleLists, Consequence::StaleDetail],
                "{:?}",
                kind
            );
        }
    }

    #[test]
    fn test_delete_removes_detail_instead_of_marking_stale() {
        assert_eq!(
            consequences(MutationKind::DeleteEntry),
            &[Consequence::StaleLists, Consequence::RemoveDetail]
        );
        assert_eq!(
            consequences(MutationKind::DeleteTask),
            &[Consequence::StaleLists, Consequence::RemoveDetail]
        );
    }

    #[test]
    fn test_settle_writes_for_entry_update() {
        let id = Uuid::new_v4();
        let writes = settle_writes(MutationKind::UpdateEntry, Some(id));

        assert_eq!(writes.len(), 2);
        assert!(matches!(
            &writes[0],
            SettleWrite::MarkStale {
                predicate: KeyPredicate::EntryLists
            }
        ));
        assert!(matches!(
            &writes[1],
            SettleWrite::MarkStale {
                predicate: KeyPredicate::EntryDetail(detail_id)
            } if *detail_id == id
        ));
    }

    #[test]
    fn test_settle_writes_for_task_delete() {
        let id = Uuid::new_v4();
        let writes = settle_writes(MutationKind::DeleteTask, Some(id));

        assert_eq!(writes.len(), 2);
        assert!(matches!(
            &writes[0],
            SettleWrite::MarkStale {
                predicate: KeyPredicate::TaskLists
            }
        ));
        assert!(
            matches!(&writes[1], SettleWrite::Remove { key } if *key == QueryKey::task(id))
        );
    }

    #[test]
    fn test_settle_writes_without_id_drop_detail_targets() {
        let writes = settle_writes(MutationKind::CreateEntry, None);
        assert_eq!(writes.len(), 1);
        assert!(matches!(
            &writes[0],
            SettleWrite::MarkStale {
                predicate: KeyPredicate::EntryLists
            }
        ));
    }
}
