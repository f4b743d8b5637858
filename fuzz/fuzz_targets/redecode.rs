#![no_main]
use libfuzzer_sys::fuzz_target;
use v2gexi::Error;

// Any stream the decoder accepts must re-encode and decode to the same
// value (idempotent normalisation). Decode limits are wider than the
// fixed encode buffer, so a re-encode may legitimately overflow; every
// other failure is a bug.
fuzz_target!(|data: &[u8]| {
    if let Ok(msg) = v2gexi::decode(data) {
        match v2gexi::encode(&msg) {
            Ok(bytes) => {
                let again = v2gexi::decode(&bytes).expect("decode of re-encoded message");
                assert_eq!(again, msg);
            }
            Err(Error::EncodeFailure { source, .. }) if *source == Error::Overflow => {}
            Err(err) => panic!("re-encode of decoded message failed: {err}"),
        }
    }
});
