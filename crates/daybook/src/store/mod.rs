//! Shared query cache with generation-ordered writes.
//!
//! The store maps structured keys to cached views and is the single source
//! the query and mutation surfaces read and write. All operations are
//! synchronous and take the lock exactly once, so no reader ever observes a
//! half-applied edit. Writes that commit data (fetches and settlements) draw
//! a monotonically increasing sequence number; rollbacks skip any slot whose
//! generation postdates their own begin sequence, which keeps the most
//! recently settled mutation's result in place under overlapping mutations.

mod slot;
mod snapshot;

use std::collections::HashSet;
use std::num::NonZeroUsize;
use std::sync::{Mutex, MutexGuard};

use lru::LruCache;
use tokio::sync::broadcast;

use daybook_core::cache::{KeyPredicate, QueryKey, QueryValue};
use daybook_core::item::ItemId;

pub use slot::{Lookup, Slot, SlotState, StoreUpdate};
pub use snapshot::Snapshot;

/// Transformation applied to held values during a bulk edit. Returning
/// `None` leaves the view untouched.
pub type EditFn = Box<dyn Fn(&QueryKey, &QueryValue) -> Option<QueryValue> + Send + Sync>;

/// One speculative edit over all views matching a predicate.
pub struct Edit {
    pub predicate: KeyPredicate,
    pub apply: EditFn,
}

/// Everything a mutation wants captured and edited when it begins.
pub struct MutationPlan {
    /// Concrete keys to capture even when absent (detail views).
    pub capture_keys: Vec<QueryKey>,
    /// Predicates whose held views are captured (list views).
    pub capture_matching: Vec<KeyPredicate>,
    /// Speculative edits to apply.
    pub edits: Vec<Edit>,
}

/// One write applied when a mutation settles successfully.
pub enum SettleWrite {
    /// Overwrite a view with the authoritative value.
    Put { key: QueryKey, value: QueryValue },
    /// Drop a view entirely.
    Remove { key: QueryKey },
    /// Rewrite held values in place (provisional id reconciliation).
    Rewrite {
        predicate: KeyPredicate,
        apply: EditFn,
    },
    /// Flag views for refetch without dropping their values.
    MarkStale { predicate: KeyPredicate },
}

struct Inner {
    slots: LruCache<QueryKey, Slot>,
    seq: u64,
}

impl Inner {
    fn next_seq(&mut self) -> u64 {
        self.seq += 1;
        self.seq
    }

    fn held_keys(&self) -> Vec<QueryKey> {
        self.slots.iter().map(|(key, _)| key.clone()).collect()
    }

    fn matching_keys(&self, predicate: &KeyPredicate) -> Vec<QueryKey> {
        self.slots
            .iter()
            .filter(|(key, _)| predicate.matches(key))
            .map(|(key, _)| key.clone())
            .collect()
    }

    /// Applies a transform to every held ready view matching the predicate,
    /// stamping `generation` on the changed ones. Returns the changed keys.
    fn rewrite(
        &mut self,
        predicate: &KeyPredicate,
        apply: &dyn Fn(&QueryKey, &QueryValue) -> Option<QueryValue>,
        generation: u64,
    ) -> Vec<QueryKey> {
        let mut changed = Vec::new();
        for key in self.matching_keys(predicate) {
            let Some(slot) = self.slots.peek(&key) else {
                continue;
            };
            let Some(value) = slot.value() else {
                continue;
            };
            let Some(next) = apply(&key, value) else {
                continue;
            };
            if let Some(slot) = self.slots.peek_mut(&key) {
                slot.state = SlotState::Ready(next);
                slot.generation = generation;
                changed.push(key);
            }
        }
        changed
    }

    fn mark_stale_matching(&mut self, predicate: &KeyPredicate, generation: u64) -> Vec<QueryKey> {
        let mut changed = Vec::new();
        for key in self.matching_keys(predicate) {
            if let Some(slot) = self.slots.peek_mut(&key) {
                if !slot.stale {
                    changed.push(key);
                }
                slot.stale = true;
                slot.generation = generation;
            }
        }
        changed
    }

    /// Restores captured slots, skipping any the world has moved past.
    fn rollback(&mut self, seq: u64, captured: Vec<(QueryKey, Option<Slot>)>) -> Vec<QueryKey> {
        let mut changed = Vec::new();
        for (key, captured_slot) in captured {
            let current = self.slots.peek(&key).cloned();
            if let Some(current) = &current {
                if current.generation > seq {
                    tracing::trace!(
                        ?key,
                        snapshot_seq = seq,
                        generation = current.generation,
                        "Skipping rollback of slot settled by a later mutation"
                    );
                    continue;
                }
            }
            match captured_slot {
                Some(mut slot) => {
                    // A concurrent settlement may have flagged this view for
                    // refetch; restoring must not lose that.
                    if let Some(current) = &current {
                        slot.stale = slot.stale || current.stale;
                    }
                    if current.as_ref() != Some(&slot) {
                        changed.push(key.clone());
                    }
                    self.slots.put(key, slot);
                }
                None => {
                    if self.slots.pop(&key).is_some() {
                        changed.push(key);
                    }
                }
            }
        }
        changed
    }
}

/// Key-addressed store of cached query results.
///
/// Shared process-wide: all mutation coordinators and query surfaces hold
/// the same store.
pub struct QueryStore {
    inner: Mutex<Inner>,
    updates: broadcast::Sender<StoreUpdate>,
}

impl QueryStore {
    /// Creates a store bounded to `max_entries` cached views.
    ///
    /// # Panics
    ///
    /// Panics if `max_entries` is 0.
    pub fn new(max_entries: usize) -> Self {
        let capacity = NonZeroUsize::new(max_entries).expect("max_entries must be > 0");
        let (updates, _) = broadcast::channel(64);
        Self {
            inner: Mutex::new(Inner {
                slots: LruCache::new(capacity),
                seq: 0,
            }),
            updates,
        }
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().expect("query store lock poisoned")
    }

    fn notify(&self, keys: Vec<QueryKey>) {
        if !keys.is_empty() {
            let _ = self.updates.send(StoreUpdate { keys });
        }
    }

    /// Subscribe to change notifications.
    pub fn subscribe(&self) -> broadcast::Receiver<StoreUpdate> {
        self.updates.subscribe()
    }

    /// Point lookup of a held value. Stale values are still returned;
    /// pending and absent slots are not.
    pub fn get(&self, key: &QueryKey) -> Option<QueryValue> {
        let mut inner = self.lock();
        inner.slots.get(key).and_then(|slot| slot.value().cloned())
    }

    /// Point lookup reporting the full slot condition.
    pub fn lookup(&self, key: &QueryKey) -> Lookup {
        let mut inner = self.lock();
        match inner.slots.get(key) {
            None => Lookup::Absent,
            Some(slot) => match slot.value() {
                Some(value) => Lookup::Ready {
                    value: value.clone(),
                    stale: slot.stale,
                },
                None => Lookup::Pending,
            },
        }
    }

    /// Returns every held value whose key matches the predicate.
    pub fn get_many(&self, predicate: &KeyPredicate) -> Vec<(QueryKey, QueryValue)> {
        let inner = self.lock();
        inner
            .slots
            .iter()
            .filter(|(key, _)| predicate.matches(key))
            .filter_map(|(key, slot)| slot.value().map(|value| (key.clone(), value.clone())))
            .collect()
    }

    /// Stores a freshly fetched value, clearing staleness.
    pub fn set(&self, key: QueryKey, value: QueryValue) {
        let mut inner = self.lock();
        let generation = inner.next_seq();
        inner.slots.put(key.clone(), Slot::ready(value, generation));
        drop(inner);
        self.notify(vec![key]);
    }

    /// Applies a transform to every held view matching the predicate in a
    /// single pass. Views for which the transform returns `None` are left
    /// untouched.
    pub fn set_many(
        &self,
        predicate: &KeyPredicate,
        apply: impl Fn(&QueryKey, &QueryValue) -> Option<QueryValue>,
    ) {
        let mut inner = self.lock();
        let generation = inner.next_seq();
        let changed = inner.rewrite(predicate, &apply, generation);
        drop(inner);
        self.notify(changed);
    }

    /// Drops a view entirely.
    pub fn remove(&self, key: &QueryKey) {
        let mut inner = self.lock();
        let removed = inner.slots.pop(key).is_some();
        drop(inner);
        if removed {
            self.notify(vec![key.clone()]);
        }
    }

    /// Flags matching views for refetch. Their values stay visible until a
    /// fresh fetch overwrites them.
    pub fn mark_stale(&self, predicate: &KeyPredicate) {
        let mut inner = self.lock();
        let generation = inner.next_seq();
        let changed = inner.mark_stale_matching(predicate, generation);
        drop(inner);
        self.notify(changed);
    }

    /// Records an in-flight fetch for a view with no data yet. A view that
    /// already holds data is left alone.
    pub fn mark_pending(&self, key: QueryKey) {
        let mut inner = self.lock();
        if inner.slots.peek(&key).is_none() {
            let generation = inner.next_seq();
            inner.slots.put(key, Slot::pending(generation));
        }
    }

    /// Clears a pending marker after a failed fetch. Slots holding data are
    /// left alone.
    pub fn clear_pending(&self, key: &QueryKey) {
        let mut inner = self.lock();
        if inner
            .slots
            .peek(key)
            .is_some_and(|slot| slot.state == SlotState::Pending)
        {
            inner.slots.pop(key);
        }
    }

    /// Begins a mutation: captures every view the plan names or its edits
    /// touch, then applies the speculative edits, all in one atomic step.
    /// Speculative edits do not advance slot generations; only settlement
    /// does.
    pub fn speculate(&self, plan: MutationPlan) -> Snapshot {
        let mut inner = self.lock();
        let seq = inner.next_seq();

        let mut captured: Vec<(QueryKey, Option<Slot>)> = Vec::new();
        let mut seen: HashSet<QueryKey> = HashSet::new();

        for key in &plan.capture_keys {
            if seen.insert(key.clone()) {
                captured.push((key.clone(), inner.slots.peek(key).cloned()));
            }
        }
        let held = inner.held_keys();
        for predicate in &plan.capture_matching {
            for key in held.iter().filter(|key| predicate.matches(key)) {
                if seen.insert(key.clone()) {
                    captured.push((key.clone(), inner.slots.peek(key).cloned()));
                }
            }
        }

        let mut changed = Vec::new();
        for edit in &plan.edits {
            for key in held.iter().filter(|key| edit.predicate.matches(key)) {
                let Some(slot) = inner.slots.peek(key).cloned() else {
                    continue;
                };
                let Some(value) = slot.value() else {
                    continue;
                };
                let Some(next) = (edit.apply)(key, value) else {
                    continue;
                };
                if seen.insert(key.clone()) {
                    captured.push((key.clone(), Some(slot.clone())));
                }
                if let Some(slot) = inner.slots.peek_mut(key) {
                    slot.state = SlotState::Ready(next);
                    changed.push(key.clone());
                }
            }
        }

        drop(inner);
        self.notify(changed);
        Snapshot { seq, captured }
    }

    /// Settles a mutation that succeeded: applies the authoritative writes,
    /// stamping all touched slots with one fresh generation, and discards
    /// the snapshot.
    pub fn settle_success(&self, snapshot: Snapshot, writes: Vec<SettleWrite>) {
        let mut inner = self.lock();
        let generation = inner.next_seq();
        tracing::trace!(
            begin_seq = snapshot.seq,
            settle_seq = generation,
            "Settling mutation"
        );

        let mut changed = Vec::new();
        for write in writes {
            match write {
                SettleWrite::Put { key, value } => {
                    inner.slots.put(key.clone(), Slot::ready(value, generation));
                    changed.push(key);
                }
                SettleWrite::Remove { key } => {
                    if inner.slots.pop(&key).is_some() {
                        changed.push(key);
                    }
                }
                SettleWrite::Rewrite { predicate, apply } => {
                    changed.extend(inner.rewrite(&predicate, &apply, generation));
                }
                SettleWrite::MarkStale { predicate } => {
                    changed.extend(inner.mark_stale_matching(&predicate, generation));
                }
            }
        }

        drop(inner);
        self.notify(changed);
    }

    /// Settles a mutation that failed: restores the captured slots exactly,
    /// except where a later settlement or fetch already overwrote them, and
    /// discards the snapshot.
    pub fn settle_failure(&self, snapshot: Snapshot) {
        let Snapshot { seq, captured } = snapshot;
        let mut inner = self.lock();
        let changed = inner.rollback(seq, captured);
        drop(inner);
        self.notify(changed);
    }

    /// Settles a mutation whose target vanished server-side: rolls back the
    /// speculative edit, then forces the item out of the cache and flags its
    /// list views for refetch.
    pub fn settle_not_found(
        &self,
        snapshot: Snapshot,
        detail_key: QueryKey,
        item_id: ItemId,
        lists: KeyPredicate,
    ) {
        let Snapshot { seq, captured } = snapshot;
        let mut inner = self.lock();
        let mut changed = inner.rollback(seq, captured);

        let generation = inner.next_seq();
        if inner.slots.pop(&detail_key).is_some() {
            changed.push(detail_key);
        }
        changed.extend(inner.rewrite(
            &lists,
            &|_, value: &QueryValue| value.remove_item(&item_id),
            generation,
        ));
        changed.extend(inner.mark_stale_matching(&lists, generation));

        drop(inner);
        self.notify(changed);
    }

    /// Number of cached views currently held.
    pub fn len(&self) -> usize {
        self.lock().slots.len()
    }

    /// Returns true if nothing is cached.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
