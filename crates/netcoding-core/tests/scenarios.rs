//! End-to-end encode/decode scenarios exercising the coding engine the way
//! a router or receiver node would: one inbound packet at a time, against
//! the node's accumulated buffer state. Buffer state is always reached
//! through the public `encode`/`decode` API, never through crate-internal
//! accessors, so these tests exercise exactly what a collaborator sees.
#![allow(clippy::panic)]

use netcoding_core::{decode, encode, EncodeAction, Node};
use netcoding_proto::{combine, config::W, Packet};
use rand::rngs::StdRng;
use rand::SeedableRng;

fn packet(id: u32) -> Packet {
    Packet::new(id, format!("payload-{id}").as_bytes())
}

fn header_ids(p: &Packet) -> Vec<u32> {
    let mut ids: Vec<u32> = p.header().ids().collect();
    ids.sort_unstable();
    ids
}

/// S1 — Pass-through: a node with `prob_to_combine = 0` always forwards
/// the inbound packet unchanged and never touches its buffers.
#[test]
fn s1_pass_through_node_never_combines() {
    let mut n = Node::normal(1);
    let mut rng = StdRng::seed_from_u64(0);
    let a = packet(7);

    match encode(&mut n, a, &mut rng) {
        EncodeAction::Forward(p) => assert_eq!(header_ids(&p), vec![7]),
        EncodeAction::Swallow => panic!("prob=0 must always forward"),
    }
    assert!(n.raw().is_empty());
    assert!(n.combined().is_empty());
}

/// S2 — Store then combine: the first packet through an empty,
/// always-combining node is swallowed into `raw`; a second, disjoint
/// packet combines with it and is forwarded.
#[test]
fn s2_store_then_combine() {
    let mut n = Node::combinatory(1, 100);
    let mut rng = StdRng::seed_from_u64(0);

    match encode(&mut n, packet(7), &mut rng) {
        EncodeAction::Swallow => {}
        EncodeAction::Forward(_) => panic!("empty buffers: nothing to combine with"),
    }
    assert_eq!(n.raw().len(), 1);

    match encode(&mut n, packet(9), &mut rng) {
        EncodeAction::Forward(c) => {
            assert_eq!(header_ids(&c), vec![7, 9]);
            let recovered = netcoding_proto::xor_payload(c.payload(), packet(7).payload());
            assert_eq!(&recovered, packet(9).payload());
        }
        EncodeAction::Swallow => panic!("should combine with buffered packet 7"),
    }
    assert!(n.raw().is_empty());
}

/// S3 — No-fit storage: a replay of an already-buffered id does not fit
/// (shared id) and is swallowed as a duplicate-header push, leaving the
/// buffer unchanged in size.
#[test]
fn s3_no_fit_storage_is_a_duplicate_reject() {
    let mut n = Node::combinatory(1, 100);
    let mut rng = StdRng::seed_from_u64(0);

    encode(&mut n, packet(7), &mut rng);
    assert_eq!(n.raw().len(), 1);

    match encode(&mut n, packet(7), &mut rng) {
        EncodeAction::Swallow => {}
        EncodeAction::Forward(_) => panic!("a packet cannot fit a copy of itself"),
    }
    assert_eq!(n.raw().len(), 1, "duplicate push must not grow the buffer");
}

/// S4 — Decode cancels a buffered combined packet: a receiver already
/// holding `C = combine(A, B)` that receives raw `B` recovers `A`.
#[test]
fn s4_decode_cancels_combined_packet() {
    let mut n = Node::combinatory(1, 100);
    let mut rng = StdRng::seed_from_u64(0);
    let c = combine(&packet(7), &packet(9));
    match encode(&mut n, c, &mut rng) {
        EncodeAction::Swallow => {}
        EncodeAction::Forward(_) => panic!("empty buffers: nothing for the combined packet to fit"),
    }
    assert_eq!(n.combined().len(), 1);

    let out = decode(&mut n, packet(9));
    let recovered: Vec<Vec<u32>> = out.iter().map(header_ids).collect();
    assert!(recovered.contains(&vec![9]), "seed must appear in output");
    assert!(recovered.contains(&vec![7]), "cancellation must recover the original");
}

/// S5 — BFS closure of length two: a chain of overlapping combined
/// packets unwinds one hop at a time as the frontier expands.
#[test]
fn s5_bfs_closure_unwinds_two_hops() {
    let mut n = Node::combinatory(1, 100);
    let mut rng = StdRng::seed_from_u64(0);

    for c in [combine(&packet(7), &packet(9)), combine(&packet(9), &packet(11))] {
        match encode(&mut n, c, &mut rng) {
            EncodeAction::Swallow => {}
            EncodeAction::Forward(_) => panic!("arity-K packets can never fit one another"),
        }
    }
    assert_eq!(n.combined().len(), 2);

    let out = decode(&mut n, packet(7));
    let mut recovered: Vec<Vec<u32>> = out.iter().map(header_ids).collect();
    recovered.sort();

    assert!(recovered.contains(&vec![7]), "seed must appear in output");
    assert!(recovered.contains(&vec![9]), "round 1: {{7}} cancels C1 -> {{9}}");
    assert!(recovered.contains(&vec![11]), "round 2: {{9}} cancels C2 -> {{11}}");
}

/// S6 — Buffer-full drop: an arity-`K` packet can never `fit` another
/// arity-`K` packet (their arities alone sum past `K`), so once
/// `combined` holds `W` of them a further arrival always falls through to
/// storage and is silently dropped once that buffer is full.
#[test]
fn s6_buffer_full_drops_silently() {
    let mut n = Node::combinatory(1, 100);
    let mut rng = StdRng::seed_from_u64(0);

    for pair in 0..W as u32 {
        let c = combine(&packet(pair * 2), &packet(pair * 2 + 1));
        match encode(&mut n, c, &mut rng) {
            EncodeAction::Swallow => {}
            EncodeAction::Forward(_) => panic!("arity-K packets can never fit one another"),
        }
    }
    assert_eq!(n.combined().len(), W);

    let extra = combine(&packet(900), &packet(901));
    match encode(&mut n, extra, &mut rng) {
        EncodeAction::Swallow => {}
        EncodeAction::Forward(_) => panic!("an arity-K packet cannot fit anything"),
    }
    assert_eq!(n.combined().len(), W, "combined buffer must stay at the window cap");
}
