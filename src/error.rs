//! Error types for encoding and decoding operations.
//!
//! This module contains the [`Error`] type which represents every failure the
//! codecs and the conversion layer can report.
//!
//! # Example
//!
//! ```
//! use polyser::{Error, Result, from_binary_array};
//!
//! fn try_unpack(data: &[u8]) -> Result<u64> {
//!     match from_binary_array::<u64>(data) {
//!         Ok(value) => Ok(value),
//!         Err(Error::EndOfFile) => {
//!             println!("Data was truncated");
//!             Err(Error::EndOfFile)
//!         }
//!         Err(Error::TrailingData(remaining)) => {
//!             println!("{remaining} bytes left over");
//!             Err(Error::TrailingData(remaining))
//!         }
//!         Err(e) => Err(e),
//!     }
//! }
//! ```

use std::fmt::{self, Display};

/// Alias for a `Result` with the error type [`Error`].
pub type Result<T> = std::result::Result<T, Error>;

/// This type represents all possible errors that can occur when encoding or
/// decoding a value.
///
/// # Variants
///
/// - [`EndOfFile`](Error::EndOfFile) - The input ended unexpectedly
/// - [`TrailingData`](Error::TrailingData) - Extra bytes remain after decoding
/// - [`TypeMismatch`](Error::TypeMismatch) - A value of the wrong kind was found
/// - [`Json`](Error::Json) - The JSON text could not be parsed
#[derive(Debug)]
pub enum Error {
    Message(String),

    /// The input ended unexpectedly.
    ///
    /// This error occurs when the data is truncated, for example when a
    /// string declares more bytes than the input still holds.
    EndOfFile,

    /// Extra bytes remain after decoding.
    ///
    /// Binary documents must be consumed completely. A flat binary array that
    /// still has unread bytes after the traversal finished was produced for a
    /// different type, so this is reported with the count of remaining bytes.
    TrailingData(usize),

    /// The key-value binary header is missing or has an unknown version.
    InvalidSignature,

    /// An unknown key-value binary tag was encountered.
    InvalidTagType(u8),

    /// Elements of one key-value binary list carry different tags.
    TagMismatch(u8, u8),

    /// A value of one kind was found where another kind was expected, such
    /// as a string where an unsigned integer should be.
    TypeMismatch {
        expected: &'static str,
        actual: &'static str,
    },

    /// An integer does not fit the width requested by the traversal routine.
    OutOfRange { value: String, target: &'static str },

    /// A flat binary boolean byte other than `0` or `1`.
    InvalidBool(u8),

    VarintOverflow,

    InvalidUtf8,

    /// A fixed-size array was decoded from a sequence of a different length.
    LengthMismatch { expected: usize, actual: usize },

    /// A JSON string that should hold hex-encoded bytes does not.
    InvalidHex,

    /// JSON has no representation for infinities and NaN.
    NonFiniteFloat(f64),

    /// A length does not fit the format's length field or exceeds
    /// [`Limits::max_sequence_len`](crate::Limits::max_sequence_len).
    LengthTooLong(usize),

    DepthLimitExceeded(usize),

    /// A scope operation that does not match the currently open scope.
    ///
    /// Only produced by traversal routines that call `end_object` without
    /// `begin_object`, or similar misuse.
    ScopeMismatch(&'static str),

    /// The JSON text could not be parsed.
    Json(serde_json::Error),
}

impl Error {
    pub(crate) fn out_of_range(value: impl Display, target: &'static str) -> Self {
        Error::OutOfRange {
            value: value.to_string(),
            target,
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(error: serde_json::Error) -> Self {
        Error::Json(error)
    }
}

impl Display for Error {
    fn fmt(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::Message(message) => formatter.write_str(message),
            Error::EndOfFile => formatter.write_str("unexpected end of input"),
            Error::TrailingData(remaining_bytes) => write!(
                formatter,
                "failed to unpack type: {remaining_bytes} bytes remaining"
            ),
            Error::InvalidSignature => formatter.write_str("invalid key-value binary signature"),
            Error::InvalidTagType(tag) => write!(formatter, "invalid tag type: {tag:#04x}"),
            Error::TagMismatch(expected, actual) => write!(
                formatter,
                "tag in list mismatch: expected {expected:#04x}, got {actual:#04x}"
            ),
            Error::TypeMismatch { expected, actual } => {
                write!(formatter, "type mismatch: expected {expected}, got {actual}")
            }
            Error::OutOfRange { value, target } => {
                write!(formatter, "value {value} out of range for {target}")
            }
            Error::InvalidBool(byte) => write!(formatter, "invalid boolean byte: {byte:#04x}"),
            Error::VarintOverflow => formatter.write_str("varint overflows 64 bits"),
            Error::InvalidUtf8 => formatter.write_str("string is not valid UTF-8"),
            Error::LengthMismatch { expected, actual } => write!(
                formatter,
                "length mismatch: expected {expected} elements, got {actual}"
            ),
            Error::InvalidHex => formatter.write_str("invalid hex string"),
            Error::NonFiniteFloat(value) => {
                write!(formatter, "non-finite float {value} cannot be stored as json")
            }
            Error::LengthTooLong(len) => write!(formatter, "length too long: {len}"),
            Error::DepthLimitExceeded(depth) => {
                write!(formatter, "nesting depth limit exceeded: {depth}")
            }
            Error::ScopeMismatch(operation) => {
                write!(formatter, "{operation} does not match the open scope")
            }
            Error::Json(error) => write!(formatter, "json error: {error}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Json(error) => Some(error),
            _ => None,
        }
    }
}
