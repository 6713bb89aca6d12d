use daybook_core::cache::{QueryKey, QueryValue};

/// What a cached view currently holds.
#[derive(Debug, Clone, PartialEq)]
pub enum SlotState {
    /// A fetch is in flight and no data has arrived yet.
    Pending,
    /// A held value.
    Ready(QueryValue),
}

/// One cached view: its state, staleness flag, and write generation.
///
/// The generation is the sequence number of the settlement or fetch that
/// last committed this slot. Rollbacks compare it against their own begin
/// sequence so a late rollback never clobbers a later write.
#[derive(Debug, Clone, PartialEq)]
pub struct Slot {
    pub state: SlotState,
    pub stale: bool,
    pub generation: u64,
}

impl Slot {
    /// A freshly fetched or settled value.
    pub fn ready(value: QueryValue, generation: u64) -> Self {
        Self {
            state: SlotState::Ready(value),
            stale: false,
            generation,
        }
    }

    /// An in-flight fetch with no data yet.
    pub fn pending(generation: u64) -> Self {
        Self {
            state: SlotState::Pending,
            stale: false,
            generation,
        }
    }

    /// The held value, if any.
    pub fn value(&self) -> Option<&QueryValue> {
        match &self.state {
            SlotState::Ready(value) => Some(value),
            SlotState::Pending => None,
        }
    }
}

/// Result of a point lookup, as seen by the query surface.
#[derive(Debug, Clone, PartialEq)]
pub enum Lookup {
    /// No slot for this key.
    Absent,
    /// A fetch is in flight and no data has arrived yet.
    Pending,
    /// A held value, possibly flagged for refetch.
    Ready { value: QueryValue, stale: bool },
}

/// Change notification emitted after every state-changing store operation.
#[derive(Debug, Clone)]
pub struct StoreUpdate {
    /// The keys whose slots changed.
    pub keys: Vec<QueryKey>,
}
