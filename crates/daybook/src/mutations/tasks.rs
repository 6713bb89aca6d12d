//! Optimistic task mutations.

use std::sync::Arc;

use chrono::Utc;
use uuid::Uuid;

use daybook_core::cache::{KeyPredicate, QueryKey, QueryValue};
use daybook_core::item::{
    apply_task_status, validate_new_task, validate_task_patch, ItemId, NewTask, Task, TaskPatch,
    TaskStatus,
};
use daybook_core::remote::TaskApi;

use crate::error::Result;
use crate::policy::{self, MutationKind};
use crate::store::{Edit, MutationPlan, QueryStore, SettleWrite};

/// Coordinator for task mutations.
pub struct TaskMutations<A: ?Sized> {
    store: Arc<QueryStore>,
    api: Arc<A>,
}

impl<A: TaskApi + ?Sized> TaskMutations<A> {
    /// Creates a coordinator over the shared store and remote adapter.
    pub fn new(store: Arc<QueryStore>, api: Arc<A>) -> Self {
        Self { store, api }
    }

    /// Creates a task, showing a provisional copy in matching list views
    /// until the server responds.
    pub async fn create(&self, input: NewTask, actor: Uuid) -> Result<Task> {
        validate_new_task(&input)?;
        let provisional = input.clone().into_provisional(actor, Utc::now());
        let provisional_id = provisional.id;

        let plan = MutationPlan {
            capture_keys: Vec::new(),
            capture_matching: vec![KeyPredicate::TaskLists],
            edits: vec![Edit {
                predicate: KeyPredicate::TaskLists,
                apply: Box::new(move |key, value| match key {
                    QueryKey::TaskList(filter) if filter.matches(&provisional) => {
                        value.prepend_task(&provisional)
                    }
                    _ => None,
                }),
            }],
        };
        let snapshot = self.store.speculate(plan);

        match self.api.create_task(&input).await {
            Ok(task) => {
                let authoritative = task.clone();
                let mut writes = vec![SettleWrite::Rewrite {
                    predicate: KeyPredicate::TaskLists,
                    apply: Box::new(move |_, value| {
                        value.update_task_items(&provisional_id, |_| authoritative.clone())
                    }),
                }];
                writes.extend(policy::settle_writes(MutationKind::CreateTask, None));
                self.store.settle_success(snapshot, writes);
                tracing::debug!(task_id = %task.id, calendar_id = %task.calendar_id, "Task create settled");
                Ok(task)
            }
            Err(err) => {
                self.store.settle_failure(snapshot);
                tracing::debug!(error = %err, "Task create rolled back");
                Err(err.into())
            }
        }
    }

    /// Updates a task, merging the patch into every cached view
    /// immediately.
    pub async fn update(&self, id: Uuid, patch: TaskPatch) -> Result<Task> {
        validate_task_patch(&patch)?;
        let item_id = ItemId::Assigned(id);
        let detail_key = QueryKey::task(id);

        let list_patch = patch.clone();
        let detail_patch = patch.clone();
        let plan = MutationPlan {
            capture_keys: vec![detail_key.clone()],
            capture_matching: vec![KeyPredicate::TaskLists],
            edits: vec![
                Edit {
                    predicate: KeyPredicate::TaskLists,
                    apply: Box::new(move |_, value| {
                        value.update_task_items(&item_id, |t| {
                            let mut t = t.clone();
                            list_patch.apply_to(&mut t);
                            t
                        })
                    }),
                },
                Edit {
                    predicate: KeyPredicate::TaskDetail(id),
                    apply: Box::new(move |_, value| {
                        value.update_task_items(&item_id, |t| {
                            let mut t = t.clone();
                            detail_patch.apply_to(&mut t);
                            t
                        })
                    }),
                },
            ],
        };
        let snapshot = self.store.speculate(plan);

        match self.api.update_task(id, &patch).await {
            Ok(task) => {
                let mut writes = vec![SettleWrite::Put {
                    key: detail_key,
                    value: QueryValue::Task(task.clone()),
                }];
                writes.extend(policy::settle_writes(MutationKind::UpdateTask, Some(id)));
                self.store.settle_success(snapshot, writes);
                tracing::debug!(task_id = %id, "Task update settled");
                Ok(task)
            }
            Err(err) if err.is_not_found() => {
                self.store
                    .settle_not_found(snapshot, detail_key, item_id, KeyPredicate::TaskLists);
                tracing::debug!(task_id = %id, "Task vanished server-side, evicted from cache");
                Err(err.into())
            }
            Err(err) => {
                self.store.settle_failure(snapshot);
                tracing::debug!(task_id = %id, error = %err, "Task update rolled back");
                Err(err.into())
            }
        }
    }

    /// Deletes a task, removing it from every cached list view immediately.
    pub async fn delete(&self, id: Uuid) -> Result<()> {
        let item_id = ItemId::Assigned(id);
        let detail_key = QueryKey::task(id);

        let plan = MutationPlan {
            capture_keys: vec![detail_key.clone()],
            capture_matching: vec![KeyPredicate::TaskLists],
            edits: vec![Edit {
                predicate: KeyPredicate::TaskLists,
                apply: Box::new(move |_, value| value.remove_item(&item_id)),
            }],
        };
        let snapshot = self.store.speculate(plan);

        match self.api.delete_task(id).await {
            Ok(()) => {
                let writes = policy::settle_writes(MutationKind::DeleteTask, Some(id));
                self.store.settle_success(snapshot, writes);
                tracing::debug!(task_id = %id, "Task delete settled");
                Ok(())
            }
            Err(err) if err.is_not_found() => {
                self.store
                    .settle_not_found(snapshot, detail_key, item_id, KeyPredicate::TaskLists);
                tracing::debug!(task_id = %id, "Task already gone server-side");
                Err(err.into())
            }
            Err(err) => {
                self.store.settle_failure(snapshot);
                tracing::debug!(task_id = %id, error = %err, "Task delete rolled back");
                Err(err.into())
            }
        }
    }

    /// Moves a task to a new status (complete, reopen, archive, cancel).
    /// Completion metadata is recomputed speculatively and replaced by the
    /// server's copy on success.
    pub async fn set_status(&self, id: Uuid, status: TaskStatus) -> Result<Task> {
        let item_id = ItemId::Assigned(id);
        let detail_key = QueryKey::task(id);
        let at = Utc::now();

        let transition = move |value: &QueryValue| {
            value.update_task_items(&item_id, |t| {
                let mut t = t.clone();
                apply_task_status(&mut t, status, at);
                t
            })
        };
        let plan = MutationPlan {
            capture_keys: vec![detail_key.clone()],
            capture_matching: vec![KeyPredicate::TaskLists],
            edits: vec![
                Edit {
                    predicate: KeyPredicate::TaskLists,
                    apply: Box::new(move |_, value| transition(value)),
                },
                Edit {
                    predicate: KeyPredicate::TaskDetail(id),
                    apply: Box::new(move |_, value| transition(value)),
                },
            ],
        };
        let snapshot = self.store.speculate(plan);

        match self.api.set_task_status(id, status).await {
            Ok(task) => {
                let mut writes = vec![SettleWrite::Put {
                    key: detail_key,
                    value: QueryValue::Task(task.clone()),
                }];
                writes.extend(policy::settle_writes(MutationKind::SetTaskStatus, Some(id)));
                self.store.settle_success(snapshot, writes);
                tracing::debug!(task_id = %id, %status, "Task status settled");
                Ok(task)
            }
            Err(err) if err.is_not_found() => {
                self.store
                    .settle_not_found(snapshot, detail_key, item_id, KeyPredicate::TaskLists);
                tracing::debug!(task_id = %id, "Task vanished server-side, evicted from cache");
                Err(err.into())
            }
            Err(err) => {
                self.store.settle_failure(snapshot);
                tracing::debug!(task_id = %id, error = %err, "Task status rolled back");
                Err(err.into())
            }
        }
    }
}
