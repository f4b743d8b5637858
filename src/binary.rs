//! Binary value encoding: length-prefixed and raw octet runs.
//!
//! A length-prefixed binary value is an unsigned varint byte count
//! followed by that many octets. Raw runs carry no prefix and are used
//! where an outer field already fixes the count (SessionID, hexBinary
//! fields, schema-typed string payloads).

use crate::bitstream::{BitReader, BitWriter};
use crate::{Error, Result};

/// Writes a length-prefixed sequence of octets.
pub fn encode(w: &mut BitWriter<'_>, data: &[u8]) -> Result<()> {
    w.write_unsigned_var(data.len() as u64)?;
    encode_raw(w, data)
}

/// Reads a length-prefixed sequence of octets.
///
/// A prefix larger than `max_len` fails with [`Error::Overflow`] before
/// anything is allocated.
pub fn decode(r: &mut BitReader<'_>, max_len: usize) -> Result<Vec<u8>> {
    let len = r.read_unsigned_var()?;
    let len = usize::try_from(len).map_err(|_| Error::Overflow)?;
    if len > max_len {
        return Err(Error::Overflow);
    }
    decode_raw(r, len)
}

/// Writes octets with no length prefix.
pub fn encode_raw(w: &mut BitWriter<'_>, data: &[u8]) -> Result<()> {
    for &byte in data {
        w.write_octet(byte)?;
    }
    Ok(())
}

/// Reads exactly `len` octets. Callers bound `len` beforehand.
pub fn decode_raw(r: &mut BitReader<'_>, len: usize) -> Result<Vec<u8>> {
    let mut out = Vec::with_capacity(len);
    for _ in 0..len {
        out.push(r.read_octet()?);
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn round_trip(value: &[u8]) -> Vec<u8> {
        let mut buf = [0u8; 64];
        let mut w = BitWriter::new(&mut buf, 0);
        encode(&mut w, value).unwrap();
        let len = w.len();
        let mut r = BitReader::new(&buf[..len], 0);
        decode(&mut r, 1024).unwrap()
    }

    #[test]
    fn empty_binary() {
        assert_eq!(round_trip(&[]), Vec::<u8>::new());
        let mut buf = [0u8; 4];
        let mut w = BitWriter::new(&mut buf, 0);
        encode(&mut w, &[]).unwrap();
        assert_eq!(w.len(), 1);
        assert_eq!(buf[0], 0x00); // length = 0
    }

    #[test]
    fn multiple_octets() {
        let input = vec![0xDE, 0xAD, 0xBE, 0xEF];
        assert_eq!(round_trip(&input), input);
    }

    #[test]
    fn unaligned_round_trip() {
        let mut buf = [0u8; 16];
        let mut w = BitWriter::new(&mut buf, 0);
        w.write_bits(3, 0b010).unwrap();
        encode(&mut w, &[0x01, 0x02, 0x03]).unwrap();
        let len = w.len();
        let mut r = BitReader::new(&buf[..len], 0);
        assert_eq!(r.read_bits(3).unwrap(), 0b010);
        assert_eq!(decode(&mut r, 1024).unwrap(), vec![0x01, 0x02, 0x03]);
    }

    #[test]
    fn decode_eof_on_length() {
        let mut r = BitReader::new(&[], 0);
        assert_eq!(decode(&mut r, 1024).unwrap_err(), Error::Overflow);
    }

    #[test]
    fn decode_eof_on_data() {
        let mut buf = [0u8; 4];
        let mut w = BitWriter::new(&mut buf, 0);
        w.write_unsigned_var(5).unwrap(); // claims 5 octets
        w.write_octet(0xAA).unwrap(); // provides 1
        let len = w.len();
        let mut r = BitReader::new(&buf[..len], 0);
        assert_eq!(decode(&mut r, 1024).unwrap_err(), Error::Overflow);
    }

    #[test]
    fn decode_rejects_oversized_prefix_before_alloc() {
        let mut buf = [0u8; 8];
        let mut w = BitWriter::new(&mut buf, 0);
        // Prefix claims 1 MiB; limit is 16 bytes.
        w.write_unsigned_var(1024 * 1024).unwrap();
        let len = w.len();
        let mut r = BitReader::new(&buf[..len], 0);
        assert_eq!(decode(&mut r, 16).unwrap_err(), Error::Overflow);
    }

    #[test]
    fn raw_round_trip() {
        let mut buf = [0u8; 8];
        let mut w = BitWriter::new(&mut buf, 0);
        encode_raw(&mut w, &[0x0A, 0x1B, 0x2C, 0x3D]).unwrap();
        assert_eq!(w.len(), 4);
        let mut r = BitReader::new(&buf[..4], 0);
        assert_eq!(
            decode_raw(&mut r, 4).unwrap(),
            vec![0x0A, 0x1B, 0x2C, 0x3D]
        );
    }

    #[test]
    fn sequential_binaries() {
        let mut buf = [0u8; 16];
        let mut w = BitWriter::new(&mut buf, 0);
        encode(&mut w, &[0x01, 0x02]).unwrap();
        encode(&mut w, &[]).unwrap();
        encode(&mut w, &[0xFF]).unwrap();
        let len = w.len();
        let mut r = BitReader::new(&buf[..len], 0);
        assert_eq!(decode(&mut r, 16).unwrap(), vec![0x01, 0x02]);
        assert_eq!(decode(&mut r, 16).unwrap(), Vec::<u8>::new());
        assert_eq!(decode(&mut r, 16).unwrap(), vec![0xFF]);
    }
}
