//! One traversal routine per type, three wire formats.
//!
//! A domain type implements [`Serialize`] once, listing its fields in a
//! fixed order. The functions in this crate bind that routine to one of the
//! codecs and convert the value to or from:
//!
//! - JSON ([`store_to_json`], [`load_from_json`]),
//! - a self-describing tagged binary document ([`store_to_binary_key_value`],
//!   [`load_from_binary_key_value`]),
//! - a compact flat binary array ([`to_binary_array`], [`from_binary_array`]).

pub use zerocopy::BigEndian;
pub use zerocopy::LittleEndian;
pub use zerocopy::NativeEndian;

pub mod binary;
mod coerce;
mod config;
mod convert;
mod error;
pub mod json;
pub mod kv;
mod serializer;
mod stream;
mod util;

pub use coerce::*;
pub use config::*;
pub use convert::*;
pub use error::*;
pub use json::{JsonObject, JsonValue};
pub use serializer::*;
pub use stream::*;
pub use util::*;
