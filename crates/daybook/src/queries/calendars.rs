//! Calendar queries.
//!
//! Calendars change rarely and are not mutated optimistically; reads still
//! go through the shared store so the whole data layer has one source of
//! truth.

use std::sync::Arc;

use uuid::Uuid;

use daybook_core::cache::{QueryKey, QueryValue};
use daybook_core::item::Calendar;
use daybook_core::remote::CalendarApi;

use crate::error::Result;
use crate::store::{Lookup, QueryStore};

/// Read-only calendar queries over the shared store.
pub struct CalendarQueries<A: ?Sized> {
    store: Arc<QueryStore>,
    api: Arc<A>,
}

impl<A: CalendarApi + ?Sized> CalendarQueries<A> {
    /// Creates a query surface over the shared store and remote adapter.
    pub fn new(store: Arc<QueryStore>, api: Arc<A>) -> Self {
        Self { store, api }
    }

    /// Lists the calendars visible to the current user.
    pub async fn list(&self) -> Result<Vec<Calendar>> {
        let key = QueryKey::CalendarList;

        match self.store.lookup(&key) {
            Lookup::Ready { value, stale: false } => match value.into_calendars() {
                Some(calendars) => Ok(calendars),
                None => self.fetch_list(key).await,
            },
            Lookup::Ready { value, stale: true } => match self.api.list_calendars().await {
                Ok(calendars) => {
                    self.store
                        .set(key, QueryValue::Calendars(calendars.clone()));
                    Ok(calendars)
                }
                Err(err) => {
                    tracing::warn!(error = %err, "Calendar list refetch failed, serving stale value");
                    Ok(value.into_calendars().unwrap_or_default())
                }
            },
            Lookup::Pending | Lookup::Absent => {
                self.store.mark_pending(key.clone());
                self.fetch_list(key).await
            }
        }
    }

    /// Fetches a single calendar by id.
    pub async fn detail(&self, id: Uuid) -> Result<Calendar> {
        let key = QueryKey::Calendar(id);

        match self.store.lookup(&key) {
            Lookup::Ready { value, stale: false } => match value.into_calendar() {
                Some(calendar) => Ok(calendar),
                None => self.fetch_detail(key, id).await,
            },
            Lookup::Ready { value, stale: true } => match self.api.get_calendar(id).await {
                Ok(calendar) => {
                    self.store.set(key, QueryValue::Calendar(calendar.clone()));
                    Ok(calendar)
                }
                Err(err) => match value.into_calendar() {
                    Some(calendar) => {
                        tracing::warn!(calendar_id = %id, error = %err, "Calendar refetch failed, serving stale value");
                        Ok(calendar)
                    }
                    None => Err(err.into()),
                },
            },
            Lookup::Pending | Lookup::Absent => {
                self.store.mark_pending(key.clone());
                self.fetch_detail(key, id).await
            }
        }
    }

    async fn fetch_list(&self, key: QueryKey) -> Result<Vec<Calendar>> {
        match self.api.list_calendars().await {
            Ok(calendars) => {
                self.store
                    .set(key, QueryValue::Calendars(calendars.clone()));
                Ok(calendars)
            }
            Err(err) => {
                self.store.clear_pending(&key);
                Err(err.into())
            }
        }
    }

    async fn fetch_detail(&self, key: QueryKey, id: Uuid) -> Result<Calendar> {
        match self.api.get_calendar(id).await {
            Ok(calendar) => {
                self.store.set(key, QueryValue::Calendar(calendar.clone()));
                Ok(calendar)
            }
            Err(err) => {
                self.store.clear_pending(&key);
                Err(err.into())
            }
        }
    }
}
