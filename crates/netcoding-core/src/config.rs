//! Compile-time constants governing the coding engine's policy, as opposed
//! to the wire-format constants in `netcoding_proto::config`.

pub use netcoding_proto::config::{DEFAULT_PROB, K, P, W};

/// A decode call's seen-set starts at `SEEN_SET_INITIAL_CAPACITY_FACTOR * W`
/// slots, matching the source's `3 * NETCODING_WINDOW_SIZE` sizing.
pub const SEEN_SET_INITIAL_CAPACITY_FACTOR: usize = 3;
