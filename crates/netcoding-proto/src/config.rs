//! Compile-time constants shared by every node running the coding engine.
//!
//! These mirror the original source's `#define`s 1:1 — peers must agree on
//! all of them out of band; there is no negotiation.

/// Maximum number of original packets combinable into one on-wire packet.
pub const K: usize = 2;

/// Size in bytes of a packet payload.
pub const P: usize = 30;

/// Hard cap on the number of packets held in either of a node's buffers.
pub const W: usize = 8;

/// Sentinel id meaning "this header slot is unused".
pub const EMPTY: u32 = u32::MAX;

/// Default probability (0-100) that a combinatory router combines a packet.
pub const DEFAULT_PROB: u8 = 30;

/// ASCII marker prefixing every coded packet on the wire.
pub const PREAMBLE: &[u8; 9] = b"preambulo";

/// Length in bytes of [`PREAMBLE`].
pub const PREAMBLE_LEN: usize = PREAMBLE.len();

/// Marker body written into a packet whose input message exceeded [`P`]
/// bytes. NUL-padded to fill the payload like the rest of a packet body.
pub const INVALID_BODY_MARKER: &[u8] = b"INVALID";
