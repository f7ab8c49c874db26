//! Decode-on-arrival: a bounded breadth-first closure over XOR-combinations
//! between the just-arrived packet and everything the node has seen (C6).

use netcoding_proto::{Header, Packet};
use tracing::trace;

use crate::config::K;
use crate::node::Node;
use crate::seen_set::{SeenSet, TryInsertOutcome};

/// Decode `p`, the just-arrived packet, against node `n`'s buffered state.
///
/// Returns the originally-transmitted packets (arity-1) newly recovered by
/// this arrival, including the seed packet `p` itself when it is already
/// arity-1 — matching the source's observable asymmetry where the seed is
/// unconditionally included in the output regardless of arity. Combined
/// intermediates discovered along the way drive further expansion but are
/// not themselves part of the returned list.
pub fn decode(n: &mut Node, p: Packet) -> Vec<Packet> {
    store_seed(n, p.clone());

    let mut seen = SeenSet::with_window(crate::config::W);
    for q in n.raw().iter().chain(n.combined().iter()) {
        seen.try_insert(q.clone());
    }

    let mut output = vec![p.clone()];
    let mut frontier = vec![p];

    while !frontier.is_empty() {
        trace!(node = n.id(), frontier_len = frontier.len(), "decode BFS round starting");
        let mut next = Vec::new();
        for f in &frontier {
            let snapshot: Vec<Packet> = seen.iter().cloned().collect();
            for m in &snapshot {
                if let Some(r) = combine_or_null(f, m) {
                    match seen.try_insert(r.clone()) {
                        TryInsertOutcome::Inserted => {
                            if r.header().arity() == 1 {
                                output.push(r.clone());
                            }
                            next.push(r);
                        }
                        TryInsertOutcome::AlreadyPresent | TryInsertOutcome::CapacityExhausted => {
                            trace!(node = n.id(), "discarding derived packet during decode BFS");
                        }
                    }
                }
            }
        }
        frontier = next;
    }

    output
}

/// Store `p` into the node's raw/combined buffer, the same routing used by
/// the encoder.
fn store_seed(n: &mut Node, p: Packet) {
    if p.is_raw() {
        n.raw_mut().push(p);
    } else {
        n.combined_mut().push(p);
    }
}

/// XOR-merge `f` and `m` unconditionally (no `fit` precondition), then
/// reject the result if it cancels to nothing (arity 0) or would need more
/// than `K` slots to represent (arity > K). Both are the resolution to the
/// only way a [`Header`] — a fixed `K`-slot tuple — can fail to represent
/// an XOR symmetric difference.
fn combine_or_null(f: &Packet, m: &Packet) -> Option<Packet> {
    let ids = f.header().xor_cancel(m.header());
    let header = Header::from_ids(&ids)?;
    debug_assert!((1..=K).contains(&header.arity()));
    let payload = netcoding_proto::xor_payload(f.payload(), m.payload());
    Some(Packet::from_parts(header, payload))
}
