//! Read-only query surface.
//!
//! Cache-aside reads over the shared store: a fresh hit is served directly,
//! a stale hit triggers a refetch but falls back to the held value if the
//! refetch fails (stale data stays visible, never flashing to empty), and a
//! miss fetches and populates. Presentational code re-runs queries when the
//! store broadcasts a change; it never sees cache internals.

mod calendars;
mod entries;
mod tasks;

pub use calendars::CalendarQueries;
pub use entries::EntryQueries;
pub use tasks::TaskQueries;

/// Result of a parameterized query.
#[derive(Debug, Clone, PartialEq)]
pub enum QueryState<T> {
    /// A required parameter is missing; nothing was fetched.
    Disabled,
    /// The current value.
    Ready(T),
}

impl<T> QueryState<T> {
    /// The value, if the query ran.
    pub fn ready(self) -> Option<T> {
        match self {
            QueryState::Ready(value) => Some(value),
            QueryState::Disabled => None,
        }
    }

    /// Returns true if the query did not run.
    pub fn is_disabled(&self) -> bool {
        matches!(self, QueryState::Disabled)
    }
}
