//! Errors raised while parsing packets off the wire.
//!
//! Everything past this boundary (header algebra, buffers, the coding
//! engine) is infallible — see `netcoding-core`'s module docs.

use thiserror::Error;

/// Failure parsing a byte buffer into a [`crate::Packet`].
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ProtoError {
    /// Buffer shorter than a full packet.
    #[error("packet too short: expected {expected} bytes, got {actual}")]
    TooShort {
        /// Required byte length ([`crate::Packet::SIZE`]).
        expected: usize,
        /// Bytes actually available.
        actual: usize,
    },

    /// Buffer does not start with the coding-packet preamble.
    #[error("missing network-coding preamble")]
    BadPreamble,

    /// Header held the same id in more than one slot.
    #[error("duplicate id {0} within a single header")]
    DuplicateId(u32),
}
