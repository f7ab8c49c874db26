//! Bounded, insertion-ordered packet store (C2).
//!
//! The source holds this as a singly-linked list of heap packets; here it
//! is an ordered sequence value type that owns its elements. `pop_fitting`
//! removes and returns an owned element; `push` takes ownership. No cyclic
//! links exist, so a `Vec` is a direct, simpler stand-in for the list.

use netcoding_proto::config::W;
use netcoding_proto::{Header, Packet};
use tracing::trace;

/// Result of [`PacketBuffer::push`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PushOutcome {
    /// The packet was appended to the tail.
    Inserted,
    /// The buffer already holds `W` packets.
    Full,
    /// A packet with an equivalent header is already present.
    Duplicate,
}

/// An ordered, size-capped store of packets (`|buf| <= W` always).
///
/// Iteration and `pop_fitting` both scan in insertion order; first-fit
/// selection has no tie-break beyond "first", matching the spec contract.
#[derive(Debug, Default)]
pub struct PacketBuffer {
    packets: Vec<Packet>,
}

impl PacketBuffer {
    /// An empty buffer.
    #[must_use]
    pub fn new() -> Self {
        Self { packets: Vec::with_capacity(W) }
    }

    /// Number of packets currently held.
    #[must_use]
    pub fn len(&self) -> usize {
        self.packets.len()
    }

    /// `true` iff the buffer holds no packets.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.packets.is_empty()
    }

    /// Insert `p` at the tail.
    ///
    /// Rejects (leaving the buffer unchanged) when the buffer is already
    /// at capacity `W`, or when a packet with an equivalent header is
    /// already present.
    pub fn push(&mut self, p: Packet) -> PushOutcome {
        if self.packets.len() >= W {
            trace!(len = self.packets.len(), "buffer push rejected: full");
            return PushOutcome::Full;
        }
        if self.packets.iter().any(|q| q.header().equivalent(p.header())) {
            trace!("buffer push rejected: equivalent header already present");
            return PushOutcome::Duplicate;
        }
        self.packets.push(p);
        trace!(len = self.packets.len(), "buffer push inserted");
        PushOutcome::Inserted
    }

    /// Scan in insertion order for the first packet whose header
    /// [`Header::fits`] `target`, remove it, and return it.
    pub fn pop_fitting(&mut self, target: &Header) -> Option<Packet> {
        let index = self.packets.iter().position(|q| target.fits(q.header()))?;
        trace!(len = self.packets.len() - 1, "buffer pop_fitting found a candidate");
        Some(self.packets.remove(index))
    }

    /// Read-only, insertion-order traversal.
    pub fn iter(&self) -> impl Iterator<Item = &Packet> {
        self.packets.iter()
    }
}

#[cfg(test)]
#[allow(clippy::expect_used)]
mod tests {
    use super::*;

    fn packet(id: u32) -> Packet {
        Packet::new(id, b"payload")
    }

    #[test]
    fn push_succeeds_until_full() {
        let mut buf = PacketBuffer::new();
        for id in 0..W as u32 {
            assert_eq!(buf.push(packet(id)), PushOutcome::Inserted);
        }
        assert_eq!(buf.len(), W);
        assert_eq!(buf.push(packet(999)), PushOutcome::Full);
    }

    #[test]
    fn push_rejects_equivalent_header_duplicate() {
        let mut buf = PacketBuffer::new();
        assert_eq!(buf.push(packet(7)), PushOutcome::Inserted);
        assert_eq!(buf.push(packet(7)), PushOutcome::Duplicate);
        assert_eq!(buf.len(), 1);
    }

    #[test]
    fn pop_fitting_scans_in_insertion_order() {
        let mut buf = PacketBuffer::new();
        buf.push(packet(7));
        buf.push(packet(9));
        buf.push(packet(11));

        // 9 and 11 both fit {id != 7,9,11}; first inserted (9) wins.
        let target = Header::single(1);
        let popped = buf.pop_fitting(&target).expect("one should fit");
        assert_eq!(popped.header().slots()[0], 7);
        assert_eq!(buf.len(), 2);
    }

    #[test]
    fn pop_fitting_returns_none_when_nothing_fits() {
        let mut buf = PacketBuffer::new();
        buf.push(packet(7));
        let target = Header::single(7);
        assert!(buf.pop_fitting(&target).is_none());
        assert_eq!(buf.len(), 1);
    }

    #[test]
    fn iterate_is_read_only_and_insertion_ordered() {
        let mut buf = PacketBuffer::new();
        buf.push(packet(7));
        buf.push(packet(9));
        let ids: Vec<u32> = buf.iter().map(|p| p.header().slots()[0]).collect();
        assert_eq!(ids, vec![7, 9]);
        assert_eq!(buf.len(), 2);
    }
}
