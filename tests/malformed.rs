//! Hostile-input behavior: malformed, truncated and random streams
//! must fail with a codec error, never panic or over-allocate.

use v2gexi::{decode, decode_with_limits, DecodeLimits, Error};

/// xorshift64* — deterministic byte generator for the garbage sweep.
struct Rng(u64);

impl Rng {
    fn next(&mut self) -> u64 {
        let mut x = self.0;
        x ^= x >> 12;
        x ^= x << 25;
        x ^= x >> 27;
        self.0 = x;
        x.wrapping_mul(0x2545_F491_4F6C_DD1D)
    }

    fn fill(&mut self, buf: &mut [u8]) {
        for chunk in buf.chunks_mut(8) {
            let bytes = self.next().to_le_bytes();
            chunk.copy_from_slice(&bytes[..chunk.len()]);
        }
    }
}

#[test]
fn random_streams_never_panic() {
    let mut rng = Rng(0x1511_8020);
    for len in 0..64usize {
        for _ in 0..64 {
            let mut buf = vec![0u8; len];
            rng.fill(&mut buf);
            // Most attempts fail with Overflow/UnsupportedMessage/
            // InvalidInput; successful decodes are legitimate.
            let _ = decode(&buf);
        }
    }
}

#[test]
fn random_streams_with_valid_prefix_never_panic() {
    let mut rng = Rng(0xBEEF);
    for len in 2..64usize {
        for _ in 0..64 {
            let mut buf = vec![0u8; len];
            rng.fill(&mut buf);
            buf[0] = 0x80;
            let _ = decode(&buf);
        }
    }
}

#[test]
fn every_failure_is_a_known_kind() {
    let mut rng = Rng(7);
    for _ in 0..256 {
        let mut buf = [0u8; 24];
        rng.fill(&mut buf);
        buf[0] = 0x80;
        match decode(&buf) {
            Ok(_) => {}
            Err(
                Error::Overflow
                | Error::UnsupportedMessage(_)
                | Error::InvalidInput(_)
                | Error::DecodeFailure { .. },
            ) => {}
            Err(other) => panic!("unexpected error kind: {other:?}"),
        }
    }
}

#[test]
fn hostile_length_prefix_is_bounded() {
    // SessionSetupReq (event 35) whose SessionID length varint claims
    // ~256 MiB. Must fail before allocating anything near that.
    let bytes = [
        0x80, // simple header
        // event 35 (100011) + START header (0) + START SessionID (0)
        0b1000_1100,
        // hexBinary marker (0) + varint 0xFF 0xFF 0xFF 0x7F shifted in
        0b0111_1111,
        0b1111_1111,
        0b1111_1111,
        0b1011_1111,
        0b1000_0000,
    ];
    let err = decode(&bytes).unwrap_err();
    assert!(err.to_string().contains("SessionSetupReq"), "{err}");
}

#[test]
fn zero_length_and_one_byte_streams() {
    assert_eq!(decode(&[]).unwrap_err(), Error::Overflow);
    assert_eq!(decode(&[0x80]).unwrap_err(), Error::Overflow);
    assert!(matches!(
        decode(&[0x42, 0x00]).unwrap_err(),
        Error::InvalidInput(_)
    ));
}

#[test]
fn tight_limits_reject_untrusted_peers() {
    let limits = DecodeLimits {
        max_field_len: 16,
        max_array_len: 4,
    };
    let mut rng = Rng(99);
    for _ in 0..256 {
        let mut buf = [0u8; 48];
        rng.fill(&mut buf);
        buf[0] = 0x80;
        let _ = decode_with_limits(&buf, &limits);
    }
}
