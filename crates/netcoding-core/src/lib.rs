//! The 2-XOR network-coding engine: bounded buffers, a cycle-breaking
//! seen-set, and the encode/decode algorithms that sit on top of
//! `netcoding_proto`'s packet and header algebra.
//!
//! This crate is single-threaded and reentrant per node: each [`Node`]'s
//! buffers are touched by exactly one logical execution context, and
//! neither [`encode`] nor [`decode`] suspends or performs I/O. Callers
//! own the surrounding transport, scheduling, and retry policy.

#![deny(missing_docs)]

pub mod buffer;
pub mod config;
pub mod decoder;
pub mod encoder;
pub mod node;
pub mod seen_set;

pub use buffer::{PacketBuffer, PushOutcome};
pub use decoder::decode;
pub use encoder::{encode, EncodeAction};
pub use node::Node;
pub use seen_set::{SeenSet, TryInsertOutcome};
