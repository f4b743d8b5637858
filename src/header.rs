//! The shared MessageHeader grammar.
//!
//! Every CommonMessages body opens with the same six-step sequence
//! (V2G_CI_CommonMessages MessageHeaderType, grammar states 277-279):
//!
//! ```text
//! 1 bit = 0   START SessionID
//! 1 bit = 0   hexBinary value-type marker
//! varint      SessionID byte length
//! n octets    SessionID
//! 1 bit = 0   END SessionID
//! 1 bit = 0   START TimeStamp
//! 1 bit = 0   unsigned-integer value-type marker
//! varint      TimeStamp
//! 1 bit = 0   END TimeStamp
//! 2 bits = 1  END header (no Signature)
//! ```
//!
//! The 2-bit epilogue selector reserves value 0 for an XMLDSig
//! Signature, which this catalog never carries.

use crate::bitstream::{BitReader, BitWriter};
use crate::limits::DecodeLimits;
use crate::{binary, Result};

/// Session identity and wall-clock stamp carried by every message.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct MessageHeader {
    /// Up to 8 octets identifying the charging session.
    pub session_id: Vec<u8>,
    /// Unix epoch seconds by domain convention.
    pub timestamp: u64,
}

impl MessageHeader {
    pub fn new(session_id: Vec<u8>, timestamp: u64) -> Self {
        Self {
            session_id,
            timestamp,
        }
    }
}

pub fn encode(w: &mut BitWriter<'_>, h: &MessageHeader) -> Result<()> {
    // START SessionID + hexBinary marker
    w.write_bits(1, 0)?;
    w.write_bits(1, 0)?;
    w.write_unsigned_var(h.session_id.len() as u64)?;
    binary::encode_raw(w, &h.session_id)?;
    // END SessionID
    w.write_bits(1, 0)?;

    // START TimeStamp + unsigned-integer marker
    w.write_bits(1, 0)?;
    w.write_bits(1, 0)?;
    w.write_unsigned_var(h.timestamp)?;
    // END TimeStamp
    w.write_bits(1, 0)?;

    // END header, no Signature
    w.write_bits(2, 1)
}

/// Markers are read without being asserted (tolerant decoding).
pub fn decode(r: &mut BitReader<'_>, limits: &DecodeLimits) -> Result<MessageHeader> {
    r.read_bits(1)?;
    r.read_bits(1)?;
    let session_id = binary::decode(r, limits.max_field_len)?;
    r.read_bits(1)?;

    r.read_bits(1)?;
    r.read_bits(1)?;
    let timestamp = r.read_unsigned_var()?;
    r.read_bits(1)?;

    r.read_bits(2)?;

    Ok(MessageHeader {
        session_id,
        timestamp,
    })
}
