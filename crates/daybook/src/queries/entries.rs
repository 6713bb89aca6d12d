//! Entry queries.

use std::sync::Arc;

use uuid::Uuid;

use daybook_core::cache::{QueryKey, QueryValue};
use daybook_core::item::{Entry, EntryListFilter};
use daybook_core::remote::EntryApi;

use crate::error::Result;
use crate::store::{Lookup, QueryStore};

use super::QueryState;

/// Read-only entry queries over the shared store.
pub struct EntryQueries<A: ?Sized> {
    store: Arc<QueryStore>,
    api: Arc<A>,
}

impl<A: EntryApi + ?Sized> EntryQueries<A> {
    /// Creates a query surface over the shared store and remote adapter.
    pub fn new(store: Arc<QueryStore>, api: Arc<A>) -> Self {
        Self { store, api }
    }

    /// Lists entries for a filter. Passing `None` disables the query:
    /// nothing is fetched and no cache entry is created.
    pub async fn list(&self, filter: Option<EntryListFilter>) -> Result<QueryState<Vec<Entry>>> {
        let Some(filter) = filter else {
            return Ok(QueryState::Disabled);
        };
        let key = QueryKey::entry_list(filter.clone());

        match self.store.lookup(&key) {
            Lookup::Ready { value, stale: false } => match value.into_entries() {
                Some(entries) => {
                    tracing::trace!(calendar_id = %filter.calendar_id, "Cache hit for entry list");
                    Ok(QueryState::Ready(entries))
                }
                None => self.fetch_list(key, &filter).await.map(QueryState::Ready),
            },
            Lookup::Ready { value, stale: true } => match self.api.list_entries(&filter).await {
                Ok(entries) => {
                    self.store.set(key, QueryValue::Entries(entries.clone()));
                    Ok(QueryState::Ready(entries))
                }
                Err(err) => {
                    tracing::warn!(
                        calendar_id = %filter.calendar_id,
                        error = %err,
                        "Entry list refetch failed, serving stale value"
                    );
                    Ok(QueryState::Ready(value.into_entries().unwrap_or_default()))
                }
            },
            Lookup::Pending | Lookup::Absent => {
                tracing::trace!(calendar_id = %filter.calendar_id, "Cache miss for entry list");
                self.store.mark_pending(key.clone());
                self.fetch_list(key, &filter).await.map(QueryState::Ready)
            }
        }
    }

    /// Fetches a single entry by id.
    pub async fn detail(&self, id: Uuid) -> Result<Entry> {
        let key = QueryKey::entry(id);

        match self.store.lookup(&key) {
            Lookup::Ready { value, stale: false } => match value.into_entry() {
                Some(entry) => {
                    tracing::trace!(entry_id = %id, "Cache hit for entry");
                    Ok(entry)
                }
                None => self.fetch_detail(key, id).await,
            },
            Lookup::Ready { value, stale: true } => match self.api.get_entry(id).await {
                Ok(entry) => {
                    self.store.set(key, QueryValue::Entry(entry.clone()));
                    Ok(entry)
                }
                Err(err) => match value.into_entry() {
                    Some(entry) => {
                        tracing::warn!(entry_id = %id, error = %err, "Entry refetch failed, serving stale value");
                        Ok(entry)
                    }
                    None => Err(err.into()),
                },
            },
            Lookup::Pending | Lookup::Absent => {
                tracing::trace!(entry_id = %id, "Cache miss for entry");
                self.store.mark_pending(key.clone());
                self.fetch_detail(key, id).await
            }
        }
    }

    async fn fetch_list(&self, key: QueryKey, filter: &EntryListFilter) -> Result<Vec<Entry>> {
        match self.api.list_entries(filter).await {
            Ok(entries) => {
                self.store.set(key, QueryValue::Entries(entries.clone()));
                Ok(entries)
            }
            Err(err) => {
                self.store.clear_pending(&key);
                Err(err.into())
            }
        }
    }

    async fn fetch_detail(&self, key: QueryKey, id: Uuid) -> Result<Entry> {
        match self.api.get_entry(id).await {
            Ok(entry) => {
                self.store.set(key, QueryValue::Entry(entry.clone()));
                Ok(entry)
            }
            Err(err) => {
                self.store.clear_pending(&key);
                Err(err.into())
            }
        }
    }
}
