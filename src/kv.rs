//! The self-describing tagged binary codec.
//!
//! A document is a signature, a version byte and the entries of the root
//! object. Every entry carries a tag, its name and its payload, so a reader
//! can decode a document without knowing the type that produced it and can
//! look fields up by name.
//!
//! ```text
//! document := "PSKV" version:u8 entries
//! entries  := { tag:u8 name_len:u16 name payload } End
//! List     := elem_tag:u8 len:u32 { payload }
//! Compound := entries
//! String   := len:u32 MUTF-8 bytes
//! Bytes    := len:u32 raw bytes
//! ```
//!
//! Fixed-width numbers are written in the byte order `O` of the codec;
//! [`LittleEndian`](zerocopy::LittleEndian) unless chosen otherwise.

mod input;
mod output;
mod tag;

pub use input::*;
pub use output::*;
pub use tag::*;

/// First four bytes of every key-value binary document.
pub const SIGNATURE: [u8; 4] = *b"PSKV";

/// Format version written after the signature.
pub const VERSION: u8 = 1;
