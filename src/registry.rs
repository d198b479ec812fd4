//! Generic entity registry: a stable-order, key-indexed table of
//! double-buffered entities that survives across ticks, generalized into
//! a named type since every entity kind (CPU, disk, interface, task,
//! ...) needs the same presence/absence/reap lifecycle.

use std::collections::HashMap;
use std::hash::Hash;

/// One slot in the registry: the entity's key-stable index, its raw
/// buffer pair, and whether it was observed in the most recent reader
/// pass.
struct Slot<K, V> {
    key: K,
    prev: Option<V>,
    curr: Option<V>,
    /// Populated on the first successful sample and left untouched after
    /// that; read by the Average Accumulator.
    baseline: Option<V>,
    present: bool,
    /// Insertion order, used to keep iteration stable even as entities
    /// are reaped and new ones inserted.
    order: usize,
}

/// Dynamic key-indexed table of entities with double-buffered raw
/// records. `K` is the stable identity (e.g. `CpuKey`, device name,
/// `TaskKey`); `V` is the raw record type for that entity kind.
pub struct EntityRegistry<K, V> {
    slots: Vec<Slot<K, V>>,
    index: HashMap<K, usize>,
    next_order: usize,
}

impl<K, V> Default for EntityRegistry<K, V>
where
    K: Eq + Hash + Clone,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V> EntityRegistry<K, V>
where
    K: Eq + Hash + Clone,
{
    pub fn new() -> Self {
        Self { slots: Vec::new(), index: HashMap::new(), next_order: 0 }
    }

    /// Returns the slot index for `key`, inserting a new absent slot if
    /// this is the first time the key has been seen.
    fn lookup_or_insert_index(&mut self, key: &K) -> usize {
        if let Some(&idx) = self.index.get(key) {
            return idx;
        }
        let idx = self.slots.len();
        self.slots.push(Slot {
            key: key.clone(),
            prev: None,
            curr: None,
            baseline: None,
            present: false,
            order: self.next_order,
        });
        self.next_order += 1;
        self.index.insert(key.clone(), idx);
        idx
    }

    /// Records a fresh sample for `key`: rotates `curr` into `prev`,
    /// stores the new value as `curr`, marks the entity present, and
    /// (the first time only) seeds `baseline`. Returns the previous
    /// `curr`, if any, so callers needing it inline don't pay a second
    /// lookup.
    pub fn lookup_or_insert(&mut self, key: K, value: V) -> Option<&V>
    where
        V: Clone,
    {
        let idx = self.lookup_or_insert_index(&key);
        let slot = &mut self.slots[idx];
        slot.prev = slot.curr.take();
        if slot.baseline.is_none() {
            slot.baseline = Some(value.clone());
        }
        slot.curr = Some(value);
        slot.present = true;
        slot.prev.as_ref()
    }

    /// Clears the presence flag on every entity. Call once at the start
    /// of a reader pass, before each observed entity calls
    /// `lookup_or_insert` again.
    pub fn mark_all_absent(&mut self) {
        for slot in &mut self.slots {
            slot.present = false;
        }
    }

    /// Drops every entity that was not re-observed since the last
    /// `mark_all_absent` call. An absent entity's `prev` is retained for
    /// exactly one extra tick, in case it reappears, then reaped on the
    /// tick after that.
    pub fn reap_absent(&mut self) {
        self.slots.retain(|slot| slot.present || slot.prev.is_some());
        self.rebuild_index();
        // An entity that was absent this tick but whose prev snapshot we
        // retained should not carry a stale curr forward.
        for slot in &mut self.slots {
            if !slot.present {
                slot.curr = None;
            }
        }
    }

    fn rebuild_index(&mut self) {
        self.index.clear();
        for (i, slot) in self.slots.iter().enumerate() {
            self.index.insert(slot.key.clone(), i);
        }
    }

    /// Returns `(prev, curr)` for `key`, if both are populated.
    pub fn pair(&self, key: &K) -> Option<(&V, &V)> {
        let idx = *self.index.get(key)?;
        let slot = &self.slots[idx];
        Some((slot.prev.as_ref()?, slot.curr.as_ref()?))
    }

    /// Returns `(baseline, curr)` for `key`, for average-record
    /// derivation.
    pub fn baseline_pair(&self, key: &K) -> Option<(&V, &V)> {
        let idx = *self.index.get(key)?;
        let slot = &self.slots[idx];
        Some((slot.baseline.as_ref()?, slot.curr.as_ref()?))
    }

    pub fn curr(&self, key: &K) -> Option<&V> {
        let idx = *self.index.get(key)?;
        self.slots[idx].curr.as_ref()
    }

    pub fn is_present(&self, key: &K) -> bool {
        self.index.get(key).map(|&idx| self.slots[idx].present).unwrap_or(false)
    }

    /// Iterates entities in stable insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &K> {
        self.slots.iter().map(|s| &s.key)
    }

    /// Iterates entities that have both `prev` and `curr` populated, in
    /// stable order — the set a derivation pass operates over.
    pub fn iter_derivable(&self) -> impl Iterator<Item = (&K, &V, &V)> {
        self.slots
            .iter()
            .filter_map(|s| Some((&s.key, s.prev.as_ref()?, s.curr.as_ref()?)))
    }

    /// Iterates entities with a populated baseline and curr, for the
    /// final average-record pass.
    pub fn iter_baseline(&self) -> impl Iterator<Item = (&K, &V, &V)> {
        self.slots
            .iter()
            .filter_map(|s| Some((&s.key, s.baseline.as_ref()?, s.curr.as_ref()?)))
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
}

/// Maps a thread's `TaskKey` to its owning process's `TaskKey` without
/// the registry owning the relationship — a plain side table, so threads
/// can be found from a process without the process entity holding a
/// collection of children.
#[derive(Debug, Default)]
pub struct ThreadLinks<K> {
    thread_to_process: HashMap<K, K>,
}

impl<K> ThreadLinks<K>
where
    K: Eq + Hash + Clone,
{
    pub fn new() -> Self {
        Self { thread_to_process: HashMap::new() }
    }

    pub fn link_thread_to_process(&mut self, thread: K, process: K) {
        self.thread_to_process.insert(thread, process);
    }

    pub fn process_of(&self, thread: &K) -> Option<&K> {
        self.thread_to_process.get(thread)
    }

    pub fn unlink(&mut self, thread: &K) {
        self.thread_to_process.remove(thread);
    }
}
