//! Content-addressed, header-equivalence-keyed cache used during one
//! decode call to break cycles in the BFS closure (C3).
//!
//! The source's hash table uses open addressing with linear probing,
//! function-pointer-parameterized hash/equality/copy, and grows whenever
//! `size + 1 > capacity / 2`, checked *before* the insert scan runs. This
//! is the same policy, specialized to header-keyed packets: no vtables
//! are needed since the key projection (`Packet::header`) and the
//! equivalence/hash (`Header::equivalent`/`Header::hash_value`) are fixed.

use netcoding_proto::Packet;
use tracing::trace;

use crate::config::SEEN_SET_INITIAL_CAPACITY_FACTOR;

/// Result of [`SeenSet::try_insert`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TryInsertOutcome {
    /// `p` was not present under header equivalence and is now stored.
    Inserted,
    /// A header-equivalent packet was already present; `p` was discarded.
    AlreadyPresent,
    /// No open slot was found even after growth. Unreachable in practice
    /// while load stays under the grow threshold, but kept as a real
    /// outcome so callers never need to unwrap.
    CapacityExhausted,
}

/// A slot is empty iff its stored hash is zero, mirroring the source's use
/// of `0` as "no key here" (a header's hash is zero only for
/// [`netcoding_proto::Header::EMPTY`], which is never itself inserted).
#[derive(Debug, Clone)]
struct Slot {
    hash: u64,
    packet: Option<Packet>,
}

impl Slot {
    const fn empty() -> Self {
        Self { hash: 0, packet: None }
    }
}

/// Open-addressing set of packets, keyed by header equivalence.
///
/// Grows (doubling capacity) whenever the next insert would push
/// occupancy past half capacity, checked before the probe sequence runs
/// so that probing never sees a table more than half full.
#[derive(Debug)]
pub struct SeenSet {
    slots: Vec<Slot>,
    size: usize,
}

impl SeenSet {
    /// An empty set with capacity `3 * w` (the spec's required initial
    /// capacity for a decode call over a window of size `w`).
    #[must_use]
    pub fn with_window(w: usize) -> Self {
        let capacity = (SEEN_SET_INITIAL_CAPACITY_FACTOR * w).max(1);
        Self { slots: (0..capacity).map(|_| Slot::empty()).collect(), size: 0 }
    }

    /// Number of packets currently stored.
    #[must_use]
    pub fn len(&self) -> usize {
        self.size
    }

    /// `true` iff no packets are stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    /// Try to insert `p`, keyed by `p.header()`'s equivalence class.
    pub fn try_insert(&mut self, p: Packet) -> TryInsertOutcome {
        if self.size + 1 > self.slots.len() / 2 {
            trace!(size = self.size, capacity = self.slots.len(), "seen-set growing before insert");
            self.grow();
        }
        let outcome = self.insert_without_resize(p);
        trace!(?outcome, size = self.size, "seen-set insert");
        outcome
    }

    /// Read-only traversal; yields each stored packet exactly once, in
    /// slot order (an implementation detail, not insertion order).
    pub fn iter(&self) -> impl Iterator<Item = &Packet> {
        self.slots.iter().filter_map(|slot| slot.packet.as_ref())
    }

    fn insert_without_resize(&mut self, p: Packet) -> TryInsertOutcome {
        let hash = p.header().hash_value();
        let capacity = self.slots.len();
        if capacity == 0 {
            return TryInsertOutcome::CapacityExhausted;
        }
        let start = (hash % capacity as u64) as usize;

        for probe in 0..capacity {
            let index = (start + probe) % capacity;
            match &self.slots[index] {
                Slot { hash: 0, .. } => {
                    self.slots[index] = Slot { hash, packet: Some(p) };
                    self.size += 1;
                    return TryInsertOutcome::Inserted;
                }
                slot if slot.hash == hash => {
                    if let Some(existing) = &slot.packet {
                        if existing.header().equivalent(p.header()) {
                            return TryInsertOutcome::AlreadyPresent;
                        }
                    }
                }
                _ => {}
            }
        }

        TryInsertOutcome::CapacityExhausted
    }

    fn grow(&mut self) {
        let new_capacity = (self.slots.len() * 2).max(1);
        let old_slots = std::mem::replace(
            &mut self.slots,
            (0..new_capacity).map(|_| Slot::empty()).collect(),
        );
        self.size = 0;
        for slot in old_slots.into_iter().filter(|s| s.hash != 0) {
            if let Some(p) = slot.packet {
                self.insert_without_resize(p);
            }
        }
    }
}
