//! Decode-side allocation bounds.
//!
//! Length prefixes read from the wire drive allocations; a hostile
//! stream may claim arbitrarily large fields. Every prefix is checked
//! against these limits before any allocation happens, failing with
//! [`crate::Error::Overflow`]. The domain envelope of CommonMessages is
//! small, so the defaults leave generous headroom.

/// Caps applied while decoding a stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecodeLimits {
    /// Maximum byte length accepted for any single string or binary
    /// field (length prefix value, after the string-table offset where
    /// one applies).
    pub max_field_len: usize,
    /// Maximum element count accepted for any decoded sequence.
    pub max_array_len: usize,
}

impl Default for DecodeLimits {
    fn default() -> Self {
        Self {
            max_field_len: 64 * 1024,
            max_array_len: 4096,
        }
    }
}
