//! Runtime limits for the byte-oriented readers.

/// Bounds applied while decoding untrusted input.
///
/// A declared element count or nesting depth beyond these bounds is rejected
/// before any allocation happens.
///
/// # Example
///
/// ```
/// use polyser::{Limits, from_binary_array_with_limits};
///
/// let limits = Limits {
///     max_sequence_len: 16,
///     ..Limits::default()
/// };
/// // varint count 17, no elements
/// assert!(from_binary_array_with_limits::<Vec<u8>>(&[17], limits).is_err());
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Limits {
    /// Maximum number of nested objects and arrays.
    pub max_depth: usize,
    /// Maximum element count of a single array, string or byte blob.
    pub max_sequence_len: usize,
}

impl Limits {
    pub const DEFAULT_MAX_DEPTH: usize = 128;
    pub const DEFAULT_MAX_SEQUENCE_LEN: usize = 1 << 24;
}

impl Default for Limits {
    fn default() -> Self {
        Self {
            max_depth: Self::DEFAULT_MAX_DEPTH,
            max_sequence_len: Self::DEFAULT_MAX_SEQUENCE_LEN,
        }
    }
}
