//! Optimistic mutation coordinators.
//!
//! Every mutation runs the same three-phase protocol against the shared
//! query store:
//!
//! 1. **Begin**: capture a snapshot of every affected view and apply the
//!    speculative edit, in one atomic step.
//! 2. **Settle on success**: write the authoritative server result and flag
//!    dependent views for refetch per the invalidation policy.
//! 3. **Settle on failure**: restore the snapshot (unless a later
//!    settlement already overwrote a view) and return the error unchanged.
//!
//! The returned futures are the UI action surface: pending while the remote
//! call is in flight, resolving to the settled item or the error. Dropping
//! a caller does not cancel the settlement.

mod entries;
mod tasks;

pub use entries::EntryMutations;
pub use tasks::TaskMutations;
