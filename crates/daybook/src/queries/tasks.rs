//! Task queries.

use std::sync::Arc;

use uuid::Uuid;

use daybook_core::cache::{QueryKey, QueryValue};
use daybook_core::item::{Task, TaskListFilter};
use daybook_core::remote::TaskApi;

use crate::error::Result;
use crate::store::{Lookup, QueryStore};

use super::QueryState;

/// Read-only task queries over the shared store.
pub struct TaskQueries<A: ?Sized> {
    store: Arc<QueryStore>,
    api: Arc<A>,
}

impl<A: TaskApi + ?Sized> TaskQueries<A> {
    /// Creates a query surface over the shared store and remote adapter.
    pub fn new(store: Arc<QueryStore>, api: Arc<A>) -> Self {
        Self { store, api }
    }

    /// Lists tasks for a filter. Passing `None` disables the query.
    pub async fn list(&self, filter: Option<TaskListFilter>) -> Result<QueryState<Vec<Task>>> {
        let Some(filter) = filter else {
            return Ok(QueryState::Disabled);
        };
        let key = QueryKey::task_list(filter.clone());

        match self.store.lookup(&key) {
            Lookup::Ready { value, stale: false } => match value.into_tasks() {
                Some(tasks) => {
                    tracing::trace!(calendar_id = %filter.calendar_id, "Cache hit for task list");
                    Ok(QueryState::Ready(tasks))
                }
                None => self.fetch_list(key, &filter).await.map(QueryState::Ready),
            },
            Lookup::Ready { value, stale: true } => match self.api.list_tasks(&filter).await {
                Ok(tasks) => {
                    self.store.set(key, QueryValue::Tasks(tasks.clone()));
                    Ok(QueryState::Ready(tasks))
                }
                Err(err) => {
                    tracing::warn!(
                        calendar_id = %filter.calendar_id,
                        error = %err,
                        "Task list refetch failed, serving stale value"
                    );
                    Ok(QueryState::Ready(value.into_tasks().unwrap_or_default()))
                }
            },
            Lookup::Pending | Lookup::Absent => {
                tracing::trace!(calendar_id = %filter.calendar_id, "Cache miss for task list");
                self.store.mark_pending(key.clone());
                self.fetch_list(key, &filter).await.map(QueryState::Ready)
            }
        }
    }

    /// Fetches a single task by id.
    pub async fn detail(&self, id: Uuid) -> Result<Task> {
        let key = QueryKey::task(id);

        match self.store.lookup(&key) {
            Lookup::Ready { value, stale: false } => match value.into_task() {
                Some(task) => {
                    tracing::trace!(task_id = %id, "Cache hit for task");
                    Ok(task)
                }
                None => self.fetch_detail(key, id).await,
            },
            Lookup::Ready { value, stale: true } => match self.api.get_task(id).await {
                Ok(task) => {
                    self.store.set(key, QueryValue::Task(task.clone()));
                    Ok(task)
                }
                Err(err) => match value.into_task() {
                    Some(task) => {
                        tracing::warn!(task_id = %id, error = %err, "Task refetch failed, serving stale value");
                        Ok(task)
                    }
                    None => Err(err.into()),
                },
            },
            Lookup::Pending | Lookup::Absent => {
                tracing::trace!(task_id = %id, "Cache miss for task");
                self.store.mark_pending(key.clone());
                self.fetch_detail(key, id).await
            }
        }
    }

    async fn fetch_list(&self, key: QueryKey, filter: &TaskListFilter) -> Result<Vec<Task>> {
        match self.api.list_tasks(filter).await {
            Ok(tasks) => {
                self.store.set(key, QueryValue::Tasks(tasks.clone()));
                Ok(tasks)
            }
            Err(err) => {
                self.store.clear_pending(&key);
                Err(err.into())
            }
        }
    }

    async fn fetch_detail(&self, key: QueryKey, id: Uuid) -> Result<Task> {
        match self.api.get_task(id).await {
            Ok(task) => {
                self.store.set(key, QueryValue::Task(task.clone()));
                Ok(task)
            }
            Err(err) => {
                self.store.clear_pending(&key);
                Err(err.into())
            }
        }
    }
}
