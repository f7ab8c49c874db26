//! Header algebra: fit, equivalence, and XOR-merge over small id multisets.
//!
//! A [`Header`] is a fixed `K`-slot tuple of packet ids. Slot order is not
//! semantically meaningful for equivalence, but `merge` packs non-`EMPTY`
//! ids into the low slots in a fixed order so that the same two inputs
//! always produce byte-identical output.

use std::fmt;

use crate::config::{EMPTY, K};

/// An unordered multiset of at most [`K`] packet ids.
///
/// This is the *logical* header used throughout the coding engine's
/// algebra. The on-wire byte layout lives on [`crate::Packet`], which
/// encodes/decodes a `Header` into its `K * 4`-byte wire representation;
/// `Header` itself keeps ordinary alignment so its fields can be read and
/// iterated without the unaligned-reference pitfalls of a packed struct.
#[derive(Clone, Copy)]
pub struct Header {
    slots: [u32; K],
}

impl Header {
    /// The all-`EMPTY` header (arity 0).
    pub const EMPTY: Self = Self { slots: [EMPTY; K] };

    /// Build a header holding a single id.
    #[must_use]
    pub fn single(id: u32) -> Self {
        let mut slots = [EMPTY; K];
        slots[0] = id;
        Self { slots }
    }

    /// Raw slot values, including `EMPTY` placeholders.
    #[must_use]
    pub fn slots(&self) -> [u32; K] {
        self.slots
    }

    /// Number of non-`EMPTY` slots.
    #[must_use]
    pub fn arity(&self) -> usize {
        self.slots.iter().filter(|&&id| id != EMPTY).count()
    }

    /// Iterator over the non-`EMPTY` ids, in slot order.
    pub fn ids(&self) -> impl Iterator<Item = u32> + '_ {
        self.slots.iter().copied().filter(|&id| id != EMPTY)
    }

    /// `true` iff this header holds `id` in some slot.
    #[must_use]
    pub fn contains(&self, id: u32) -> bool {
        self.ids().any(|h| h == id)
    }

    /// Arity-1 predicate: this header denotes an original (uncombined)
    /// packet.
    #[must_use]
    pub fn is_raw(&self) -> bool {
        self.arity() == 1
    }

    /// Two headers *fit* iff their combined arity does not exceed `K` and
    /// their id sets are disjoint.
    #[must_use]
    pub fn fits(&self, other: &Self) -> bool {
        if self.arity() + other.arity() > K {
            return false;
        }
        self.ids().all(|id| !other.contains(id))
    }

    /// Two headers are *equivalent* iff they denote the same multiset of
    /// ids, ignoring slot order.
    #[must_use]
    pub fn equivalent(&self, other: &Self) -> bool {
        if self.arity() != other.arity() {
            return false;
        }
        self.ids().all(|id| other.contains(id))
    }

    /// XOR-merge of two *fitting* headers: the union of their id sets,
    /// packed as `self`'s ids (in slot order) followed by `other`'s.
    ///
    /// Callers must have verified [`Self::fits`] first; this is a pure
    /// packing operation and does not check arity.
    #[must_use]
    pub fn merge(&self, other: &Self) -> Self {
        let mut slots = [EMPTY; K];
        let mut i = 0;
        for id in self.ids().chain(other.ids()) {
            slots[i] = id;
            i += 1;
        }
        Self { slots }
    }

    /// Commutative hash over the id multiset. Insensitive to slot order;
    /// zero iff `self` is [`Header::EMPTY`].
    #[must_use]
    pub fn hash_value(&self) -> u64 {
        self.ids().map(mix_id).fold(0, |acc, h| acc ^ h)
    }

    /// Build a header from an explicit id list (no duplicates assumed).
    ///
    /// Returns `None` if `ids` is empty or longer than `K` slots — neither
    /// is representable as a `Header`. Order is preserved into slots.
    #[must_use]
    pub fn from_ids(ids: &[u32]) -> Option<Self> {
        if ids.is_empty() || ids.len() > K {
            return None;
        }
        let mut slots = [EMPTY; K];
        slots[..ids.len()].copy_from_slice(ids);
        Some(Self { slots })
    }

    /// The XOR symmetric difference of two headers' id sets: ids present in
    /// exactly one of `self`, `other`; ids present in both cancel.
    ///
    /// Unlike [`Self::merge`], this does not assume [`Self::fits`] and may
    /// return a list whose length is 0 or exceeds `K` — a `Header` cannot
    /// represent either case. Used only by the decoding BFS closure, which
    /// discards results outside `1..=K`.
    #[must_use]
    pub fn xor_cancel(&self, other: &Self) -> Vec<u32> {
        let mut ids: Vec<u32> = self.ids().filter(|id| !other.contains(*id)).collect();
        ids.extend(other.ids().filter(|id| !self.contains(*id)));
        ids
    }
}

impl Default for Header {
    fn default() -> Self {
        Self::EMPTY
    }
}

impl PartialEq for Header {
    /// Slot-position equality (not [`Header::equivalent`]). Used for exact
    /// round-trip comparisons; the coding engine itself always reasons
    /// about equivalence.
    fn eq(&self, other: &Self) -> bool {
        let a = self.slots;
        let b = other.slots;
        a == b
    }
}
impl Eq for Header {}

impl fmt::Debug for Header {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Header").field(&format!("{self}")).finish()
    }
}

impl fmt::Display for Header {
    /// Renders like the original source's `print_header`: ids in slot
    /// order, empty slots as `-1`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let slots = self.slots;
        for (i, id) in slots.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            if *id == EMPTY {
                write!(f, "-1")?;
            } else {
                write!(f, "{id}")?;
            }
        }
        Ok(())
    }
}

/// splitmix64-style finalizer, applied per id before XOR-folding so that
/// the combined hash avalanches instead of just summing small integers.
fn mix_id(id: u32) -> u64 {
    let mut x = (id as u64).wrapping_add(0x9E37_79B9_7F4A_7C15);
    x = (x ^ (x >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    x = (x ^ (x >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    x ^ (x >> 31)
}
