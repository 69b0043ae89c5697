//! The compact flat binary codec.
//!
//! Values are written back to back with no tags and no names, so only a
//! reader driven by the same traversal routine can decode them. Objects
//! contribute no bytes of their own.
//!
//! | Value | Encoding |
//! |-------|----------|
//! | `bool` | one byte, `0` or `1` |
//! | `u8`..`u64` | unsigned LEB128 varint |
//! | `i8`..`i64` | zigzag, then varint |
//! | `f64` | 8 bytes little-endian |
//! | `String` | varint length, UTF-8 bytes |
//! | bytes | varint length, raw bytes |
//! | array | varint count, then the elements |

mod input;
mod output;
mod varint;

pub use input::*;
pub use output::*;
pub use varint::*;
