//! The on-wire packet: preamble + header + payload, byte-exact with peers.

use std::fmt;

use zerocopy::{FromBytes, Immutable, IntoBytes, KnownLayout};

use crate::config::{EMPTY, INVALID_BODY_MARKER, K, P, PREAMBLE, PREAMBLE_LEN};
use crate::error::ProtoError;
use crate::header::Header;

/// Byte-exact wire layout. Every field is a raw byte array (alignment 1),
/// so this can be `repr(C, packed)` without ever producing an unaligned
/// reference to a multi-byte field — the lesson learned the hard way on
/// framing code that stores `u32`s directly in a packed struct.
#[repr(C, packed)]
#[derive(Clone, Copy, FromBytes, IntoBytes, KnownLayout, Immutable)]
struct RawLayout {
    preamble: [u8; PREAMBLE_LEN],
    header: [u8; K * 4],
    payload: [u8; P],
}

/// A network-coding packet: preamble, header, and a fixed-size payload.
///
/// Raw packets (arity 1) carry one original message; combined packets
/// (arity `K`) carry the XOR of `K` originals plus the union of their
/// headers.
#[derive(Clone, Copy)]
pub struct Packet {
    header: Header,
    payload: [u8; P],
}

impl Packet {
    /// Serialized size in bytes: `PREAMBLE_LEN + K * 4 + P`.
    pub const SIZE: usize = PREAMBLE_LEN + K * 4 + P;

    /// Build a new raw packet with the given id and message.
    ///
    /// If `message` is longer than [`P`] bytes it is replaced with the
    /// `"INVALID"` marker body (NUL-padded), matching the original
    /// source's behavior at this boundary. The header is always valid.
    #[must_use]
    pub fn new(id: u32, message: &[u8]) -> Self {
        let mut payload = [0u8; P];
        if message.len() > P {
            payload[..INVALID_BODY_MARKER.len()].copy_from_slice(INVALID_BODY_MARKER);
        } else {
            payload[..message.len()].copy_from_slice(message);
        }
        Self { header: Header::single(id), payload }
    }

    /// Build a packet from an explicit header and payload (used by
    /// [`crate::combine`] and tests that need a non-raw starting point).
    #[must_use]
    pub fn from_parts(header: Header, payload: [u8; P]) -> Self {
        Self { header, payload }
    }

    /// This packet's header.
    #[must_use]
    pub fn header(&self) -> &Header {
        &self.header
    }

    /// This packet's payload.
    #[must_use]
    pub fn payload(&self) -> &[u8; P] {
        &self.payload
    }

    /// Arity-1 predicate: `true` iff this is an original (uncombined)
    /// packet.
    #[must_use]
    pub fn is_raw(&self) -> bool {
        self.header.is_raw()
    }

    /// Parse a packet from wire bytes, checking the preamble and length.
    ///
    /// # Errors
    ///
    /// Returns [`ProtoError::TooShort`] if `bytes` is shorter than
    /// [`Self::SIZE`], or [`ProtoError::BadPreamble`] if it does not start
    /// with the coding-packet preamble.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, ProtoError> {
        if bytes.len() < Self::SIZE {
            return Err(ProtoError::TooShort { expected: Self::SIZE, actual: bytes.len() });
        }
        if &bytes[..PREAMBLE_LEN] != PREAMBLE.as_slice() {
            return Err(ProtoError::BadPreamble);
        }

        let raw = RawLayout::ref_from_prefix(bytes)
            .map_err(|_| ProtoError::TooShort { expected: Self::SIZE, actual: bytes.len() })?
            .0;

        let mut slots = [EMPTY; K];
        for (i, slot) in slots.iter_mut().enumerate() {
            let start = i * 4;
            *slot = u32::from_ne_bytes(raw.header[start..start + 4].try_into().unwrap_or_default());
        }
        for (i, &id) in slots.iter().enumerate() {
            if id != EMPTY && slots[..i].contains(&id) {
                return Err(ProtoError::DuplicateId(id));
            }
        }
        let header = slots_to_header(slots);
        Ok(Self { header, payload: raw.payload })
    }

    /// Serialize this packet to its byte-exact wire layout.
    #[must_use]
    pub fn to_bytes(&self) -> [u8; Self::SIZE] {
        let mut header_bytes = [0u8; K * 4];
        for (i, id) in self.header.slots().iter().enumerate() {
            header_bytes[i * 4..i * 4 + 4].copy_from_slice(&id.to_ne_bytes());
        }
        let raw = RawLayout { preamble: *PREAMBLE, header: header_bytes, payload: self.payload };
        let mut out = [0u8; Self::SIZE];
        out.copy_from_slice(raw.as_bytes());
        out
    }
}

/// Build a [`Header`] from raw wire slots, dropping `EMPTY` placeholders.
/// A wire packet with no non-`EMPTY` slot decodes to [`Header::EMPTY`].
fn slots_to_header(slots: [u32; K]) -> Header {
    let ids: Vec<u32> = slots.into_iter().filter(|&id| id != EMPTY).collect();
    Header::from_ids(&ids).unwrap_or(Header::EMPTY)
}

/// Element-wise XOR of two payloads.
#[must_use]
pub fn xor_payload(a: &[u8; P], b: &[u8; P]) -> [u8; P] {
    let mut out = [0u8; P];
    for i in 0..P {
        out[i] = a[i] ^ b[i];
    }
    out
}

/// Combine two packets whose headers [`Header::fits`] into one.
///
/// The caller must have checked `fit` first; this function does not
/// re-verify it.
#[must_use]
pub fn combine(p: &Packet, q: &Packet) -> Packet {
    Packet::from_parts(p.header.merge(&q.header), xor_payload(&p.payload, &q.payload))
}

impl fmt::Debug for Packet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Packet").field("header", &self.header).finish_non_exhaustive()
    }
}

impl fmt::Display for Packet {
    /// Renders like the original source's `print_packet`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Header: [{}], Body: {:?}", self.header, self.payload)
    }
}
