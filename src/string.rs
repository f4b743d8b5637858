//! String value encoding.
//!
//! Two wire forms exist, fixed per grammar site (never a runtime flag):
//!
//! * **plain** — unsigned varint byte length, then the UTF-8 bytes.
//! * **schema-typed** — byte length **plus 2**, then the UTF-8 bytes.
//!   The +2 is the EXI string-table reservation (indices 0 and 1 are
//!   reserved for table hits); no table is maintained here, but the
//!   offset is kept for bit compatibility with the C reference
//!   encoders.

use crate::bitstream::{BitReader, BitWriter};
use crate::{binary, Error, Result};

/// Writes a plain string: varint byte length + UTF-8 bytes.
pub fn encode(w: &mut BitWriter<'_>, value: &str) -> Result<()> {
    binary::encode(w, value.as_bytes())
}

/// Reads a plain string, bounding the allocation by `max_len`.
///
/// Non-UTF-8 payload bytes fail with [`Error::InvalidInput`].
pub fn decode(r: &mut BitReader<'_>, max_len: usize) -> Result<String> {
    let bytes = binary::decode(r, max_len)?;
    utf8(bytes)
}

/// Writes a schema-typed string value: varint (byte length + 2) + raw
/// bytes. Payload arrives as bytes because several schema-typed fields
/// (EVCCID, EVSEID) are identifier octets rather than text.
pub fn encode_schema(w: &mut BitWriter<'_>, value: &[u8]) -> Result<()> {
    w.write_unsigned_var(value.len() as u64 + 2)?;
    binary::encode_raw(w, value)
}

/// Reads a schema-typed string value, undoing the +2 reservation.
///
/// A prefix below 2 would index the (absent) string table and fails
/// with [`Error::InvalidInput`].
pub fn decode_schema(r: &mut BitReader<'_>, max_len: usize) -> Result<Vec<u8>> {
    let prefix = r.read_unsigned_var()?;
    let len = prefix
        .checked_sub(2)
        .ok_or_else(|| Error::invalid_input("schema string length prefix below 2"))?;
    let len = usize::try_from(len).map_err(|_| Error::Overflow)?;
    if len > max_len {
        return Err(Error::Overflow);
    }
    binary::decode_raw(r, len)
}

/// Reads a schema-typed string value as UTF-8 text.
pub fn decode_schema_text(r: &mut BitReader<'_>, max_len: usize) -> Result<String> {
    utf8(decode_schema(r, max_len)?)
}

fn utf8(bytes: Vec<u8>) -> Result<String> {
    String::from_utf8(bytes)
        .map_err(|_| Error::invalid_input("string value is not valid UTF-8"))
}
