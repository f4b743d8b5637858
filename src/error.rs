//! Central error types for the ISO 15118-20 CommonMessages codec.
//!
//! Every failure surfaces to the caller; the codec never recovers
//! internally. The dispatcher wraps per-message failures in
//! [`Error::EncodeFailure`]/[`Error::DecodeFailure`] so the diagnostic
//! names both the stage and the message variant.

use core::fmt;
use std::borrow::Cow;

/// All error conditions the codec can report.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum Error {
    /// The caller supplied a value the wire format cannot represent
    /// (e.g. a grammar branch that is deliberately unimplemented).
    InvalidArgument(Cow<'static, str>),
    /// A read or write would pass the end of the backing buffer, a
    /// length prefix claims more than the configured maximum, or a
    /// varint accumulated more than 64 bits.
    Overflow,
    /// A single bit-field access asked for fewer than 1 or more than
    /// 32 bits.
    BitCountOutOfRange(u32),
    /// The 6-bit top-level event code is not in the CommonMessages
    /// catalog (reserved or unknown).
    UnsupportedMessage(u32),
    /// The stream is structurally invalid: wrong EXI simple-header
    /// byte, malformed UTF-8 in a string value, or an impossible
    /// length prefix.
    InvalidInput(Cow<'static, str>),
    /// A per-message encoder failed; `message` names the variant.
    EncodeFailure {
        message: &'static str,
        source: Box<Error>,
    },
    /// A per-message decoder failed; `message` names the variant.
    DecodeFailure {
        message: &'static str,
        source: Box<Error>,
    },
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidArgument(msg) => write!(f, "invalid argument: {msg}"),
            Self::Overflow => write!(f, "bitstream overflow"),
            Self::BitCountOutOfRange(n) => {
                write!(f, "bit count {n} out of range (must be 1..=32)")
            }
            Self::UnsupportedMessage(code) => {
                write!(f, "unsupported top-level event code {code}")
            }
            Self::InvalidInput(msg) => write!(f, "invalid input: {msg}"),
            Self::EncodeFailure { message, source } => {
                write!(f, "encode {message}: {source}")
            }
            Self::DecodeFailure { message, source } => {
                write!(f, "decode {message}: {source}")
            }
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::EncodeFailure { source, .. } | Self::DecodeFailure { source, .. } => {
                Some(&**source)
            }
            _ => None,
        }
    }
}

impl Error {
    /// Erstellt einen `InvalidArgument` Fehler mit Kontext.
    pub fn invalid_argument(msg: impl Into<Cow<'static, str>>) -> Self {
        Self::InvalidArgument(msg.into())
    }

    /// Erstellt einen `InvalidInput` Fehler mit Kontext.
    pub fn invalid_input(msg: impl Into<Cow<'static, str>>) -> Self {
        Self::InvalidInput(msg.into())
    }
}

/// A convenience `Result` type alias using [`Error`].
pub type Result<T> = core::result::Result<T, Error>;
