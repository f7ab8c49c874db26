//! Wire format and header algebra for the 2-XOR network-coding engine.
//!
//! This crate is intentionally free of any routing policy: it only knows
//! how to parse, serialize, and algebraically combine packets. The engine
//! that decides *which* packets to combine and *when* lives in
//! `netcoding-core`.

#![deny(missing_docs)]

pub mod config;
pub mod error;
pub mod header;
pub mod packet;

pub use error::ProtoError;
pub use header::Header;
pub use packet::{combine, xor_payload, Packet};
