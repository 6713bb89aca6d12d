use daybook_core::cache::QueryKey;

use super::slot::Slot;

/// The rollback state captured when a mutation begins.
///
/// Holds the pre-edit slot for every view the speculative edit touched
/// (`None` records that the view was absent). A snapshot is consumed by
/// value when the mutation settles, so exactly one exists per in-flight
/// mutation and none can be replayed.
#[derive(Debug)]
pub struct Snapshot {
    pub(crate) seq: u64,
    pub(crate) captured: Vec<(QueryKey, Option<Slot>)>,
}

impl Snapshot {
    /// The sequence number drawn when the mutation began.
    pub fn seq(&self) -> u64 {
        self.seq
    }

    /// The keys captured for rollback.
    pub fn captured_keys(&self) -> impl Iterator<Item = &QueryKey> {
        self.captured.iter().map(|(key, _)| key)
    }
}
