//! The tree-structured text codec.
//!
//! Writing builds a [`JsonValue`] tree through [`JsonOutputSerializer`];
//! reading walks an existing tree through [`JsonInputSerializer`]. Text
//! rendering and parsing of the tree go through `serde_json`.
//!
//! The root of every tree produced by a traversal routine is an object.
//! Raw byte blobs are stored as lowercase hex strings.

mod input;
mod output;
mod value;

pub use input::*;
pub use output::*;
pub use value::*;

use crate::{Error, Result, cold_path};

#[inline]
pub(crate) fn to_hex(bytes: &[u8]) -> String {
    hex::encode(bytes)
}

pub(crate) fn from_hex(text: &str) -> Result<Vec<u8>> {
    hex::decode(text).map_err(|_| {
        cold_path();
        Error::InvalidHex
    })
}
