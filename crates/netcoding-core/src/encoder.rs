//! Encode-on-forward: decide whether to combine an inbound packet with a
//! previously buffered one (C5).

use netcoding_proto::{combine, Header, Packet};
use rand::Rng;
use tracing::trace;

use crate::config::K;
use crate::node::Node;

/// Outcome of [`encode`].
#[derive(Debug)]
pub enum EncodeAction {
    /// Send the packet on the wire, unchanged or combined with a buffered
    /// packet.
    Forward(Packet),
    /// `p` was stored (or silently dropped, if its destination buffer was
    /// full); nothing is sent.
    Swallow,
}

/// Given inbound packet `p`, decide whether to forward it as-is, forward
/// it combined with a buffered packet, or store it and send nothing.
///
/// `rng` is the source of randomness for the combination roll; injecting
/// it (rather than reaching for a hidden global PRNG) is what makes this
/// function deterministic under a seeded RNG in tests.
pub fn encode(node: &mut Node, p: Packet, rng: &mut impl Rng) -> EncodeAction {
    if !roll_combine(node.prob_to_combine(), rng) {
        trace!(node = node.id(), "combination roll missed, forwarding unchanged");
        return EncodeAction::Forward(p);
    }

    match select_candidate(node, p.header()) {
        Some(q) => {
            trace!(node = node.id(), "combining inbound packet with buffered candidate");
            EncodeAction::Forward(combine(&p, &q))
        }
        None => {
            trace!(node = node.id(), "no fitting candidate, storing inbound packet");
            store(node, p);
            EncodeAction::Swallow
        }
    }
}

fn roll_combine(prob_to_combine: u8, rng: &mut impl Rng) -> bool {
    rng.gen_range(0..100) < prob_to_combine
}

/// Search order: if `header` is already combined up to one-less-than-`K`,
/// search only the raw buffer (the only candidates that can still fit).
/// Otherwise search the combined buffer first — preferring
/// already-combined packets maximizes originals carried per
/// transmission — falling back to the raw buffer only if nothing fits.
fn select_candidate(node: &mut Node, header: &Header) -> Option<Packet> {
    if header.arity() == K - 1 {
        return node.raw_mut().pop_fitting(header);
    }
    node.combined_mut().pop_fitting(header).or_else(|| node.raw_mut().pop_fitting(header))
}

fn store(node: &mut Node, p: Packet) {
    if p.is_raw() {
        node.raw_mut().push(p);
    } else {
        node.combined_mut().push(p);
    }
}
