//! Optimistic entry mutations.

use std::sync::Arc;

use chrono::Utc;
use uuid::Uuid;

use daybook_core::cache::{KeyPredicate, QueryKey, QueryValue};
use daybook_core::item::{
    apply_completion, validate_entry_patch, validate_new_entry, Entry, EntryPatch, ItemId,
    NewEntry,
};
use daybook_core::remote::EntryApi;

use crate::error::Result;
use crate::policy::{self, MutationKind};
use crate::store::{Edit, MutationPlan, QueryStore, SettleWrite};

/// Coordinator for entry mutations.
pub struct EntryMutations<A: ?Sized> {
    store: Arc<QueryStore>,
    api: Arc<A>,
}

impl<A: EntryApi + ?Sized> EntryMutations<A> {
    /// Creates a coordinator over the shared store and remote adapter.
    pub fn new(store: Arc<QueryStore>, api: Arc<A>) -> Self {
        Self { store, api }
    }

    /// Creates an entry.
    ///
    /// A provisional copy appears immediately in every cached list view
    /// whose filter it matches. On success the provisional copy is swapped
    /// for the server's and the list views are flagged for refetch, since
    /// ordering and filtering can depend on server-computed fields.
    pub async fn create(&self, input: NewEntry, actor: Uuid) -> Result<Entry> {
        validate_new_entry(&input)?;
        let provisional = input.clone().into_provisional(actor, Utc::now());
        let provisional_id = provisional.id;

        let plan = MutationPlan {
            capture_keys: Vec::new(),
            capture_matching: vec![KeyPredicate::EntryLists],
            edits: vec![Edit {
                predicate: KeyPredicate::EntryLists,
                apply: Box::new(move |key, value| match key {
                    QueryKey::EntryList(filter) if filter.matches(&provisional) => {
                        value.prepend_entry(&provisional)
                    }
                    _ => None,
                }),
            }],
        };
        let snapshot = self.store.speculate(plan);

        match self.api.create_entry(&input).await {
            Ok(entry) => {
                let authoritative = entry.clone();
                let mut writes = vec![SettleWrite::Rewrite {
                    predicate: KeyPredicate::EntryLists,
                    apply: Box::new(move |_, value| {
                        value.update_entry_items(&provisional_id, |_| authoritative.clone())
                    }),
                }];
                writes.extend(policy::settle_writes(MutationKind::CreateEntry, None));
                self.store.settle_success(snapshot, writes);
                tracing::debug!(entry_id = %entry.id, calendar_id = %entry.calendar_id, "Entry create settled");
                Ok(entry)
            }
            Err(err) => {
                self.store.settle_failure(snapshot);
                tracing::debug!(error = %err, "Entry create rolled back");
                Err(err.into())
            }
        }
    }

    /// Updates an entry, merging the patch into every cached view
    /// immediately and reconciling with the server copy on success.
    pub async fn update(&self, id: Uuid, patch: EntryPatch) -> Result<Entry> {
        validate_entry_patch(&patch)?;
        let item_id = ItemId::Assigned(id);
        let detail_key = QueryKey::entry(id);

        let list_patch = patch.clone();
        let detail_patch = patch.clone();
        let plan = MutationPlan {
            capture_keys: vec![detail_key.clone()],
            capture_matching: vec![KeyPredicate::EntryLists],
            edits: vec![
                Edit {
                    predicate: KeyPredicate::EntryLists,
                    apply: Box::new(move |_, value| {
                        value.update_entry_items(&item_id, |e| {
                            let mut e = e.clone();
                            list_patch.apply_to(&mut e);
                            e
                        })
                    }),
                },
                Edit {
                    predicate: KeyPredicate::EntryDetail(id),
                    apply: Box::new(move |_, value| {
                        value.update_entry_items(&item_id, |e| {
                            let mut e = e.clone();
                            detail_patch.apply_to(&mut e);
                            e
                        })
                    }),
                },
            ],
        };
        let snapshot = self.store.speculate(plan);

        match self.api.update_entry(id, &patch).await {
            Ok(entry) => {
                let mut writes = vec![SettleWrite::Put {
                    key: detail_key,
                    value: QueryValue::Entry(entry.clone()),
                }];
                writes.extend(policy::settle_writes(MutationKind::UpdateEntry, Some(id)));
                self.store.settle_success(snapshot, writes);
                tracing::debug!(entry_id = %id, "Entry update settled");
                Ok(entry)
            }
            Err(err) if err.is_not_found() => {
                self.store
                    .settle_not_found(snapshot, detail_key, item_id, KeyPredicate::EntryLists);
                tracing::debug!(entry_id = %id, "Entry vanished server-side, evicted from cache");
                Err(err.into())
            }
            Err(err) => {
                self.store.settle_failure(snapshot);
                tracing::debug!(entry_id = %id, error = %err, "Entry update rolled back");
                Err(err.into())
            }
        }
    }

    /// Deletes an entry, removing it from every cached list view
    /// immediately.
    pub async fn delete(&self, id: Uuid) -> Result<()> {
        let item_id = ItemId::Assigned(id);
        let detail_key = QueryKey::entry(id);

        let plan = MutationPlan {
            capture_keys: vec![detail_key.clone()],
            capture_matching: vec![KeyPredicate::EntryLists],
            edits: vec![Edit {
                predicate: KeyPredicate::EntryLists,
                apply: Box::new(move |_, value| value.remove_item(&item_id)),
            }],
        };
        let snapshot = self.store.speculate(plan);

        match self.api.delete_entry(id).await {
            Ok(()) => {
                let writes = policy::settle_writes(MutationKind::DeleteEntry, Some(id));
                self.store.settle_success(snapshot, writes);
                tracing::debug!(entry_id = %id, "Entry delete settled");
                Ok(())
            }
            Err(err) if err.is_not_found() => {
                self.store
                    .settle_not_found(snapshot, detail_key, item_id, KeyPredicate::EntryLists);
                tracing::debug!(entry_id = %id, "Entry already gone server-side");
                Err(err.into())
            }
            Err(err) => {
                self.store.settle_failure(snapshot);
                tracing::debug!(entry_id = %id, error = %err, "Entry delete rolled back");
                Err(err.into())
            }
        }
    }

    /// Marks an entry complete or incomplete. Completion metadata is
    /// recomputed speculatively and replaced by the server's copy on
    /// success.
    pub async fn set_completed(&self, id: Uuid, is_completed: bool, actor: Uuid) -> Result<Entry> {
        let item_id = ItemId::Assigned(id);
        let detail_key = QueryKey::entry(id);
        let at = Utc::now();

        let toggle = move |value: &QueryValue| {
            value.update_entry_items(&item_id, |e| {
                let mut e = e.clone();
                apply_completion(&mut e, is_completed, actor, at);
                e
            })
        };
        let plan = MutationPlan {
            capture_keys: vec![detail_key.clone()],
            capture_matching: vec![KeyPredicate::EntryLists],
            edits: vec![
                Edit {
                    predicate: KeyPredicate::EntryLists,
                    apply: Box::new(move |_, value| toggle(value)),
                },
                Edit {
                    predicate: KeyPredicate::EntryDetail(id),
                    apply: Box::new(move |_, value| toggle(value)),
                },
            ],
        };
        let snapshot = self.store.speculate(plan);

        match self.api.set_entry_completion(id, is_completed).await {
            Ok(entry) => {
                let mut writes = vec![SettleWrite::Put {
                    key: detail_key,
                    value: QueryValue::Entry(entry.clone()),
                }];
                writes.extend(policy::settle_writes(
                    MutationKind::SetEntryCompletion,
                    Some(id),
                ));
                self.store.settle_success(snapshot, writes);
                tracing::debug!(entry_id = %id, is_completed, "Entry completion settled");
                Ok(entry)
            }
            Err(err) if err.is_not_found() => {
                self.store
                    .settle_not_found(snapshot, detail_key, item_id, KeyPredicate::EntryLists);
                tracing::debug!(entry_id = %id, "Entry vanished server-side, evicted from cache");
                Err(err.into())
            }
            Err(err) => {
                self.store.settle_failure(snapshot);
                tracing::debug!(entry_id = %id, error = %err, "Entry completion rolled back");
                Err(err.into())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::sync::Mutex;

    use async_trait::async_trait;
    use chrono::{DateTime, TimeZone};
    use tokio::sync::oneshot;

    use daybook_core::item::EntryListFilter;
    use daybook_core::remote::{ApiError, Result as ApiResult};

    use crate::error::DataError;
    use crate::store::Lookup;

    fn test_user() -> Uuid {
        Uuid::parse_str("00000000-0000-0000-0000-0000000000aa").unwrap()
    }

    fn test_calendar_id() -> Uuid {
        Uuid::parse_str("00000000-0000-0000-0000-000000000001").unwrap()
    }

    fn fixed_time() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 6, 15, 10, 0, 0).unwrap()
    }

    fn all_entries_key() -> QueryKey {
        QueryKey::entry_list(EntryListFilter::for_calendar(test_calendar_id()))
    }

    fn open_entries_key() -> QueryKey {
        QueryKey::entry_list(
            EntryListFilter::for_calendar(test_calendar_id()).with_completed(false),
        )
    }

    fn done_entries_key() -> QueryKey {
        QueryKey::entry_list(
            EntryListFilter::for_calendar(test_calendar_id()).with_completed(true),
        )
    }

    fn server_entry(title: &str) -> Entry {
        Entry::new(test_calendar_id(), title, test_user())
            .with_created_at(fixed_time())
            .with_updated_at(fixed_time())
    }

    /// In-memory stand-in for the remote API.
    ///
    /// Applies patches with a fixed clock so settled values are
    /// deterministic. A one-shot gate can park the next call until the test
    /// releases it with an outcome, which makes overlapping-mutation
    /// orderings reproducible.
    struct MockEntryApi {
        entries: Mutex<HashMap<Uuid, Entry>>,
        fail_next: Mutex<Option<ApiError>>,
        gate: Mutex<Option<oneshot::Receiver<Option<ApiError>>>>,
        started: Mutex<Option<oneshot::Sender<()>>>,
    }

    impl MockEntryApi {
        fn new() -> Self {
            Self {
                entries: Mutex::new(HashMap::new()),
                fail_next: Mutex::new(None),
                gate: Mutex::new(None),
                started: Mutex::new(None),
            }
        }

        fn insert(&self, entry: Entry) {
            self.entries
                .lock()
                .unwrap()
                .insert(entry.id.as_uuid(), entry);
        }

        fn fail_next(&self, err: ApiError) {
            *self.fail_next.lock().unwrap() = Some(err);
        }

        /// Parks the next call until the returned sender fires. Sending
        /// `Some(err)` makes the call fail with that error.
        fn arm_gate(&self) -> (oneshot::Receiver<()>, oneshot::Sender<Option<ApiError>>) {
            let (started_tx, started_rx) = oneshot::channel();
            let (release_tx, release_rx) = oneshot::channel();
            *self.started.lock().unwrap() = Some(started_tx);
            *self.gate.lock().unwrap() = Some(release_rx);
            (started_rx, release_tx)
        }

        async fn checkpoint(&self) -> ApiResult<()> {
            if let Some(tx) = self.started.lock().unwrap().take() {
                let _ = tx.send(());
            }
            let gate = self.gate.lock().unwrap().take();
            if let Some(rx) = gate {
                if let Ok(Some(err)) = rx.await {
                    return Err(err);
                }
            }
            if let Some(err) = self.fail_next.lock().unwrap().take() {
                return Err(err);
            }
            Ok(())
        }

        fn lookup(&self, id: Uuid) -> ApiResult<Entry> {
            self.entries
                .lock()
                .unwrap()
                .get(&id)
                .cloned()
                .ok_or_else(|| ApiError::NotFound {
                    resource: "Entry".to_string(),
                })
        }
    }

    #[async_trait]
    impl EntryApi for MockEntryApi {
        async fn list_entries(&self, filter: &EntryListFilter) -> ApiResult<Vec<Entry>> {
            self.checkpoint().await?;
            Ok(self
                .entries
                .lock()
                .unwrap()
                .values()
                .filter(|e| filter.matches(e))
                .cloned()
                .collect())
        }

        async fn get_entry(&self, id: Uuid) -> ApiResult<Entry> {
            self.checkpoint().await?;
            self.lookup(id)
        }

        async fn create_entry(&self, input: &NewEntry) -> ApiResult<Entry> {
            self.checkpoint().await?;
            let entry = input
                .clone()
                .into_provisional(test_user(), fixed_time())
                .with_id(ItemId::Assigned(Uuid::new_v4()));
            self.insert(entry.clone());
            Ok(entry)
        }

        async fn update_entry(&self, id: Uuid, patch: &EntryPatch) -> ApiResult<Entry> {
            self.checkpoint().await?;
            let mut entry = self.lookup(id)?;
            patch.apply_to(&mut entry);
            entry.updated_at = fixed_time();
            entry.last_modified_by = Some(test_user());
            self.insert(entry.clone());
            Ok(entry)
        }

        async fn delete_entry(&self, id: Uuid) -> ApiResult<()> {
            self.checkpoint().await?;
            self.entries
                .lock()
                .unwrap()
                .remove(&id)
                .map(|_| ())
                .ok_or_else(|| ApiError::NotFound {
                    resource: "Entry".to_string(),
                })
        }

        async fn set_entry_completion(&self, id: Uuid, is_completed: bool) -> ApiResult<Entry> {
            self.checkpoint().await?;
            let mut entry = self.lookup(id)?;
            apply_completion(&mut entry, is_completed, test_user(), fixed_time());
            self.insert(entry.clone());
            Ok(entry)
        }
    }

    fn setup() -> (Arc<QueryStore>, Arc<MockEntryApi>, EntryMutations<MockEntryApi>) {
        let store = Arc::new(QueryStore::new(100));
        let api = Arc::new(MockEntryApi::new());
        let mutations = EntryMutations::new(store.clone(), api.clone());
        (store, api, mutations)
    }

    #[tokio::test]
    async fn test_create_shows_provisional_entry_while_in_flight() {
        let (store, api, _) = setup();
        store.set(all_entries_key(), QueryValue::Entries(vec![]));

        let (started, release) = api.arm_gate();
        let task = {
            let mutations = EntryMutations::new(store.clone(), api.clone());
            tokio::spawn(async move {
                mutations
                    .create(NewEntry::new(test_calendar_id(), "Standup"), test_user())
                    .await
            })
        };
        started.await.unwrap();

        // speculative state: one provisional entry with the input title
        let entries = store
            .get(&all_entries_key())
            .unwrap()
            .into_entries()
            .unwrap();
        assert_eq!(entries.len(), 1);
        assert!(entries[0].id.is_provisional());
        assert_eq!(entries[0].title, "Standup");

        release.send(None).unwrap();
        let created = task.await.unwrap().unwrap();
        assert!(!created.id.is_provisional());

        // settled: provisional id swapped for the server id, view flagged
        // for refetch
        match store.lookup(&all_entries_key()) {
            Lookup::Ready { value, stale } => {
                assert!(stale);
                assert!(!value.has_provisional_ids());
                let entries = value.into_entries().unwrap();
                assert_eq!(entries.len(), 1);
                assert_eq!(entries[0].id, created.id);
                assert_eq!(entries[0].title, "Standup");
            }
            other => panic!("unexpected lookup: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_create_only_lands_in_matching_views() {
        let (store, _, mutations) = setup();
        store.set(all_entries_key(), QueryValue::Entries(vec![]));
        store.set(done_entries_key(), QueryValue::Entries(vec![]));

        mutations
            .create(NewEntry::new(test_calendar_id(), "Fresh"), test_user())
            .await
            .unwrap();

        // a new entry is incomplete, so it never belonged in the
        // completed-only view
        assert_eq!(
            store
                .get(&all_entries_key())
                .unwrap()
                .into_entries()
                .unwrap()
                .len(),
            1
        );
        assert!(store
            .get(&done_entries_key())
            .unwrap()
            .into_entries()
            .unwrap()
            .is_empty());
    }

    #[tokio::test]
    async fn test_create_failure_restores_prior_state() {
        let (store, api, mutations) = setup();
        let existing = server_entry("existing");
        let before = QueryValue::Entries(vec![existing.clone()]);
        store.set(all_entries_key(), before.clone());

        api.fail_next(ApiError::Transport("connection reset".to_string()));
        let err = mutations
            .create(NewEntry::new(test_calendar_id(), "Doomed"), test_user())
            .await
            .unwrap_err();
        assert!(matches!(err, DataError::Api(ApiError::Transport(_))));

        assert_eq!(
            store.lookup(&all_entries_key()),
            Lookup::Ready {
                value: before,
                stale: false
            }
        );
    }

    #[tokio::test]
    async fn test_no_provisional_ids_survive_settlement_either_way() {
        let (store, api, mutations) = setup();
        store.set(all_entries_key(), QueryValue::Entries(vec![]));

        mutations
            .create(NewEntry::new(test_calendar_id(), "Kept"), test_user())
            .await
            .unwrap();
        assert!(!store
            .get(&all_entries_key())
            .unwrap()
            .has_provisional_ids());

        api.fail_next(ApiError::Validation {
            status: 422,
            message: "bad".to_string(),
        });
        let _ = mutations
            .create(NewEntry::new(test_calendar_id(), "Dropped"), test_user())
            .await
            .unwrap_err();
        assert!(!store
            .get(&all_entries_key())
            .unwrap()
            .has_provisional_ids());
    }

    #[tokio::test]
    async fn test_create_rejects_invalid_input_without_touching_cache() {
        let (store, _, mutations) = setup();
        store.set(all_entries_key(), QueryValue::Entries(vec![]));

        let err = mutations
            .create(NewEntry::new(test_calendar_id(), ""), test_user())
            .await
            .unwrap_err();
        assert!(matches!(err, DataError::InvalidEntry(_)));

        assert_eq!(
            store.lookup(&all_entries_key()),
            Lookup::Ready {
                value: QueryValue::Entries(vec![]),
                stale: false
            }
        );
    }

    #[tokio::test]
    async fn test_update_converges_lists_and_detail() {
        let (store, api, mutations) = setup();
        let entry = server_entry("before");
        let id = entry.id.as_uuid();
        api.insert(entry.clone());
        store.set(all_entries_key(), QueryValue::Entries(vec![entry.clone()]));
        store.set(QueryKey::entry(id), QueryValue::Entry(entry.clone()));

        let settled = mutations
            .update(id, EntryPatch::new().with_title("after").with_priority(2))
            .await
            .unwrap();
        assert_eq!(settled.title, "after");

        // detail holds the authoritative copy, flagged for refetch
        match store.lookup(&QueryKey::entry(id)) {
            Lookup::Ready { value, stale } => {
                assert!(stale);
                assert_eq!(value.into_entry().unwrap(), settled);
            }
            other => panic!("unexpected lookup: {:?}", other),
        }

        // the list view agrees on every mutated field
        match store.lookup(&all_entries_key()) {
            Lookup::Ready { value, stale } => {
                assert!(stale);
                let entries = value.into_entries().unwrap();
                assert_eq!(entries[0].title, settled.title);
                assert_eq!(entries[0].priority, settled.priority);
            }
            other => panic!("unexpected lookup: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_update_failure_restores_every_view_exactly() {
        let (store, api, mutations) = setup();
        let entry = server_entry("original");
        let id = entry.id.as_uuid();
        api.insert(entry.clone());

        let list_before = QueryValue::Entries(vec![entry.clone()]);
        let detail_before = QueryValue::Entry(entry.clone());
        store.set(all_entries_key(), list_before.clone());
        store.set(open_entries_key(), list_before.clone());
        store.set(QueryKey::entry(id), detail_before.clone());

        api.fail_next(ApiError::Transport("timeout".to_string()));
        let err = mutations
            .update(id, EntryPatch::new().with_title("never lands"))
            .await
            .unwrap_err();
        assert!(matches!(err, DataError::Api(ApiError::Transport(_))));

        for (key, before) in [
            (all_entries_key(), list_before.clone()),
            (open_entries_key(), list_before),
            (QueryKey::entry(id), detail_before),
        ] {
            assert_eq!(
                store.lookup(&key),
                Lookup::Ready {
                    value: before,
                    stale: false
                },
                "state diverged for {:?}",
                key
            );
        }
    }

    #[tokio::test]
    async fn test_toggle_failure_restores_completion_fields() {
        let (store, api, mutations) = setup();
        let entry = server_entry("e1");
        let id = entry.id.as_uuid();
        api.insert(entry.clone());
        store.set(all_entries_key(), QueryValue::Entries(vec![entry.clone()]));
        store.set(QueryKey::entry(id), QueryValue::Entry(entry.clone()));

        api.fail_next(ApiError::Transport("connection reset".to_string()));
        let _ = mutations
            .set_completed(id, true, test_user())
            .await
            .unwrap_err();

        for value in [
            store.get(&all_entries_key()).unwrap(),
            store.get(&QueryKey::entry(id)).unwrap(),
        ] {
            let held = match value {
                QueryValue::Entries(entries) => entries[0].clone(),
                QueryValue::Entry(entry) => entry,
                other => panic!("unexpected value: {:?}", other),
            };
            assert!(!held.is_completed);
            assert_eq!(held.completed_at, None);
            assert_eq!(held.completed_by, None);
        }
    }

    #[tokio::test]
    async fn test_toggle_twice_returns_to_initial_state() {
        let (store, api, mutations) = setup();
        let mut entry = server_entry("routine");
        apply_completion(&mut entry, true, test_user(), fixed_time());
        let id = entry.id.as_uuid();
        api.insert(entry.clone());
        store.set(QueryKey::entry(id), QueryValue::Entry(entry.clone()));

        mutations
            .set_completed(id, false, test_user())
            .await
            .unwrap();
        let settled = mutations
            .set_completed(id, true, test_user())
            .await
            .unwrap();

        assert_eq!(settled, entry);
        assert_eq!(
            store.get(&QueryKey::entry(id)).unwrap().into_entry().unwrap(),
            entry
        );
    }

    #[tokio::test]
    async fn test_delete_removes_item_from_all_views() {
        let (store, api, mutations) = setup();
        let target = server_entry("target");
        let other = server_entry("other");
        let id = target.id.as_uuid();
        api.insert(target.clone());
        store.set(
            all_entries_key(),
            QueryValue::Entries(vec![target.clone(), other.clone()]),
        );
        store.set(QueryKey::entry(id), QueryValue::Entry(target.clone()));

        mutations.delete(id).await.unwrap();

        assert_eq!(store.lookup(&QueryKey::entry(id)), Lookup::Absent);
        match store.lookup(&all_entries_key()) {
            Lookup::Ready { value, stale } => {
                assert!(stale);
                let entries = value.into_entries().unwrap();
                assert_eq!(entries.len(), 1);
                assert_eq!(entries[0].id, other.id);
            }
            other => panic!("unexpected lookup: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_delete_failure_restores_item() {
        let (store, api, mutations) = setup();
        let target = server_entry("target");
        let id = target.id.as_uuid();
        api.insert(target.clone());
        let before = QueryValue::Entries(vec![target.clone()]);
        store.set(all_entries_key(), before.clone());

        api.fail_next(ApiError::Transport("timeout".to_string()));
        let _ = mutations.delete(id).await.unwrap_err();

        assert_eq!(
            store.lookup(&all_entries_key()),
            Lookup::Ready {
                value: before,
                stale: false
            }
        );
    }

    #[tokio::test]
    async fn test_not_found_forces_eviction() {
        let (store, _, mutations) = setup();
        // the server never had this entry, only the cache did
        let ghost = server_entry("ghost");
        let other = server_entry("other");
        let id = ghost.id.as_uuid();
        store.set(
            all_entries_key(),
            QueryValue::Entries(vec![ghost.clone(), other.clone()]),
        );
        store.set(QueryKey::entry(id), QueryValue::Entry(ghost.clone()));

        let err = mutations
            .update(id, EntryPatch::new().with_title("too late"))
            .await
            .unwrap_err();
        assert!(err.is_not_found());

        assert_eq!(store.lookup(&QueryKey::entry(id)), Lookup::Absent);
        match store.lookup(&all_entries_key()) {
            Lookup::Ready { value, stale } => {
                assert!(stale);
                let entries = value.into_entries().unwrap();
                assert_eq!(entries.len(), 1);
                assert_eq!(entries[0].id, other.id);
            }
            other => panic!("unexpected lookup: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_later_settlement_survives_earlier_rollback() {
        let (store, api, _) = setup();
        let entry = server_entry("original");
        let id = entry.id.as_uuid();
        api.insert(entry.clone());
        store.set(all_entries_key(), QueryValue::Entries(vec![entry.clone()]));
        store.set(QueryKey::entry(id), QueryValue::Entry(entry.clone()));

        // first mutation begins and parks at the network boundary
        let (started, release) = api.arm_gate();
        let first = {
            let mutations = EntryMutations::new(store.clone(), api.clone());
            tokio::spawn(async move {
                mutations
                    .update(id, EntryPatch::new().with_title("from first"))
                    .await
            })
        };
        started.await.unwrap();

        // second mutation begins later and settles first
        let mutations = EntryMutations::new(store.clone(), api.clone());
        let settled = mutations
            .update(id, EntryPatch::new().with_title("from second"))
            .await
            .unwrap();
        assert_eq!(settled.title, "from second");

        // first mutation fails; its rollback must not undo the second
        // settlement
        release
            .send(Some(ApiError::Transport("dropped".to_string())))
            .unwrap();
        let err = first.await.unwrap().unwrap_err();
        assert!(matches!(err, DataError::Api(ApiError::Transport(_))));

        let held = store
            .get(&QueryKey::entry(id))
            .unwrap()
            .into_entry()
            .unwrap();
        assert_eq!(held.title, "from second");

        // the list view keeps the refetch marker from the second settlement
        match store.lookup(&all_entries_key()) {
            Lookup::Ready { stale, .. } => assert!(stale),
            other => panic!("unexpected lookup: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_validation_error_is_surfaced_verbatim() {
        let (store, api, mutations) = setup();
        let entry = server_entry("entry");
        let id = entry.id.as_uuid();
        api.insert(entry.clone());
        store.set(all_entries_key(), QueryValue::Entries(vec![entry]));

        api.fail_next(ApiError::Validation {
            status: 422,
            message: "title too long".to_string(),
        });
        let err = mutations
            .update(id, EntryPatch::new().with_title("x"))
            .await
            .unwrap_err();

        assert_eq!(
            err,
            DataError::Api(ApiError::Validation {
                status: 422,
                message: "title too long".to_string()
            })
        );
    }
}
