#![no_main]
use libfuzzer_sys::fuzz_target;
use v2gexi::{BitReader, BitWriter};

fuzz_target!(|data: &[u8]| {
    if data.is_empty() {
        return;
    }
    // First byte picks the field width, the rest is payload.
    let n = u32::from(data[0] % 32) + 1;
    let mut r = BitReader::new(&data[1..], 0);
    let Ok(value) = r.read_bits(n) else { return };

    let mut buf = [0u8; 8];
    let mut w = BitWriter::new(&mut buf, 0);
    w.write_bits(n, value).unwrap();
    let len = w.len();

    let mut back = BitReader::new(&buf[..len], 0);
    assert_eq!(back.read_bits(n).unwrap(), value);
});
