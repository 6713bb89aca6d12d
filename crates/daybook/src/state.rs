//! Data-layer wiring.
//!
//! One shared query store plus the mutation and query surfaces, all bound
//! to a remote API adapter. Constructed explicitly at application start and
//! handed to the UI; nothing here reaches for ambient global state, and
//! tests build one per fixture.

use std::sync::Arc;

use tokio::sync::broadcast;

use daybook_core::remote::{CalendarApi, EntryApi, TaskApi};

use crate::config::Config;
use crate::mutations::{EntryMutations, TaskMutations};
use crate::queries::{CalendarQueries, EntryQueries, TaskQueries};
use crate::store::{QueryStore, StoreUpdate};

/// The client data layer.
pub struct DataLayer {
    store: Arc<QueryStore>,
    /// Optimistic entry mutations.
    pub entries: EntryMutations<dyn EntryApi>,
    /// Optimistic task mutations.
    pub tasks: TaskMutations<dyn TaskApi>,
    /// Entry queries.
    pub entry_queries: EntryQueries<dyn EntryApi>,
    /// Task queries.
    pub task_queries: TaskQueries<dyn TaskApi>,
    /// Calendar queries.
    pub calendar_queries: CalendarQueries<dyn CalendarApi>,
}

impl DataLayer {
    /// Wires a data layer over the given remote adapter.
    pub fn new<A>(config: &Config, api: Arc<A>) -> Self
    where
        A: EntryApi + TaskApi + CalendarApi + 'static,
    {
        let store = Arc::new(QueryStore::new(config.cache_max_entries));
        let entry_api: Arc<dyn EntryApi> = api.clone();
        let task_api: Arc<dyn TaskApi> = api.clone();
        let calendar_api: Arc<dyn CalendarApi> = api;

        Self {
            entries: EntryMutations::new(store.clone(), entry_api.clone()),
            entry_queries: EntryQueries::new(store.clone(), entry_api),
            tasks: TaskMutations::new(store.clone(), task_api.clone()),
            task_queries: TaskQueries::new(store.clone(), task_api),
            calendar_queries: CalendarQueries::new(store.clone(), calendar_api),
            store,
        }
    }

    /// Wires a data layer talking to the API URL from the environment.
    pub fn from_env() -> Self {
        let config = Config::from_env();
        let api = Arc::new(daybook_client::DaybookClient::new(&config.api_url));
        Self::new(&config, api)
    }

    /// The shared query store.
    pub fn store(&self) -> &Arc<QueryStore> {
        &self.store
    }

    /// Subscribe to cache change notifications; the UI re-runs its queries
    /// when one arrives.
    pub fn subscribe(&self) -> broadcast::Receiver<StoreUpdate> {
        self.store.subscribe()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use async_trait::async_trait;
    use uuid::Uuid;

    use daybook_core::item::{
        Calendar, CalendarPatch, Entry, EntryListFilter, EntryPatch, NewCalendar, NewEntry,
        NewTask, Task, TaskListFilter, TaskPatch, TaskStatus,
    };
    use daybook_core::remote::{ApiError, Result as ApiResult};

    /// An adapter whose server holds nothing.
    struct EmptyApi;

    fn missing(resource: &str) -> ApiError {
        ApiError::NotFound {
            resource: resource.to_string(),
        }
    }

    #[async_trait]
    impl EntryApi for EmptyApi {
        async fn list_entries(&self, _filter: &EntryListFilter) -> ApiResult<Vec<Entry>> {
            Ok(Vec::new())
        }
        async fn get_entry(&self, _id: Uuid) -> ApiResult<Entry> {
            Err(missing("Entry"))
        }
        async fn create_entry(&self, _input: &NewEntry) -> ApiResult<Entry> {
            Err(missing("Entry"))
        }
        async fn update_entry(&self, _id: Uuid, _patch: &EntryPatch) -> ApiResult<Entry> {
            Err(missing("Entry"))
        }
        async fn delete_entry(&self, _id: Uuid) -> ApiResult<()> {
            Err(missing("Entry"))
        }
        async fn set_entry_completion(&self, _id: Uuid, _is_completed: bool) -> ApiResult<Entry> {
            Err(missing("Entry"))
        }
    }

    #[async_trait]
    impl TaskApi for EmptyApi {
        async fn list_tasks(&self, _filter: &TaskListFilter) -> ApiResult<Vec<Task>> {
            Ok(Vec::new())
        }
        async fn get_task(&self, _id: Uuid) -> ApiResult<Task> {
            Err(missing("Task"))
        }
        async fn create_task(&self, _input: &NewTask) -> ApiResult<Task> {
            Err(missing("Task"))
        }
        async fn update_task(&self, _id: Uuid, _patch: &TaskPatch) -> ApiResult<Task> {
            Err(missing("Task"))
        }
        async fn delete_task(&self, _id: Uuid) -> ApiResult<()> {
            Err(missing("Task"))
        }
        async fn set_task_status(&self, _id: Uuid, _status: TaskStatus) -> ApiResult<Task> {
            Err(missing("Task"))
        }
    }

    #[async_trait]
    impl CalendarApi for EmptyApi {
        async fn list_calendars(&self) -> ApiResult<Vec<Calendar>> {
            Ok(Vec::new())
        }
        async fn get_calendar(&self, _id: Uuid) -> ApiResult<Calendar> {
            Err(missing("Calendar"))
        }
        async fn create_calendar(&self, _input: &NewCalendar) -> ApiResult<Calendar> {
            Err(missing("Calendar"))
        }
        async fn update_calendar(&self, _id: Uuid, _patch: &CalendarPatch) -> ApiResult<Calendar> {
            Err(missing("Calendar"))
        }
        async fn delete_calendar(&self, _id: Uuid) -> ApiResult<()> {
            Err(missing("Calendar"))
        }
    }

    fn test_config() -> Config {
        Config {
            api_url: "http://localhost:8000".to_string(),
            cache_max_entries: 100,
        }
    }

    #[tokio::test]
    async fn test_surfaces_share_one_store() {
        let layer = DataLayer::new(&test_config(), Arc::new(EmptyApi));
        let calendar_id = Uuid::new_v4();

        // a query populates the store the mutations operate on
        let state = layer
            .entry_queries
            .list(Some(EntryListFilter::for_calendar(calendar_id)))
            .await
            .unwrap();
        assert_eq!(state.ready().unwrap().len(), 0);
        assert_eq!(layer.store().len(), 1);
    }

    #[tokio::test]
    async fn test_subscribers_see_query_writes() {
        let layer = DataLayer::new(&test_config(), Arc::new(EmptyApi));
        let mut updates = layer.subscribe();

        layer.calendar_queries.list().await.unwrap();

        let update = updates.try_recv().unwrap();
        assert!(!update.keys.is_empty());
    }
}
