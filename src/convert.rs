//! Entry points converting domain types to and from every wire format.
//!
//! Each function binds one codec, runs the type's traversal routine through
//! it and returns the result. The API comes in two tiers:
//!
//! - `Result`-returning functions propagate the first failure.
//! - `bool`-returning `load_*` and `try_*` functions trap every failure,
//!   log it at `debug` level and report `false`.
//!
//! Store functions drive the writer over a clone of the value, since the
//! traversal routine takes `&mut self` in both directions.

use std::any::type_name;

use tracing::{debug, trace};
use zerocopy::LittleEndian;

use crate::{
    ByteOrder, Error, InputStream, JsonPrimitive, JsonValue, Limits, MemoryInputStream, Result,
    Serialize,
    binary::{BinaryInputSerializer, BinaryOutputSerializer},
    cold_path,
    json::{JsonInputSerializer, JsonOutputSerializer},
    kv::{KvInputSerializer, KvOutputSerializer},
};

/// Encodes `value` into a JSON tree.
///
/// Struct-like types produce an object holding their fields. A bare
/// primitive or sequence ends up under the empty key `""` of the root
/// object; use [`store_primitive_to_json_value`] or
/// [`store_sequence_to_json_value`] to get the bare node instead.
pub fn store_to_json_value<T: Serialize + Clone>(value: &T) -> Result<JsonValue> {
    let mut value = value.clone();
    let mut serializer = JsonOutputSerializer::new();
    value.serialize(&mut serializer)?;
    serializer.into_value()
}

/// Encodes a sequence of primitives into a JSON array, element by element.
///
/// Unlike [`store_to_json_value`] this cannot fail, so a non-finite `f64`
/// element is kept as a float node and renders as `null`.
///
/// ```
/// use polyser::{JsonValue, store_sequence_to_json_value};
///
/// let ids = vec!["a1".to_owned(), "b2".to_owned()];
/// let value = store_sequence_to_json_value(&ids);
/// assert_eq!(value.to_string(), r#"["a1","b2"]"#);
/// ```
pub fn store_sequence_to_json_value<'a, P, I>(values: I) -> JsonValue
where
    P: JsonPrimitive + 'a,
    I: IntoIterator<Item = &'a P>,
{
    JsonValue::Array(values.into_iter().map(P::to_json_value).collect())
}

/// Encodes a single primitive as a bare JSON node.
#[inline]
pub fn store_primitive_to_json_value<P: JsonPrimitive>(value: &P) -> JsonValue {
    value.to_json_value()
}

/// Decodes `json` into `value` in place.
///
/// Fields missing from `json` leave the corresponding part of `value`
/// untouched, unless the traversal routine treats them as required.
pub fn load_from_json_value<T: Serialize>(value: &mut T, json: &JsonValue) -> Result<()> {
    let mut serializer = JsonInputSerializer::new(json)?;
    value.serialize(&mut serializer)
}

/// Appends the elements of the JSON array `json` to `out`, in order.
///
/// A node that is not an array, or an element of the wrong kind, is an
/// error. Nothing is appended unless every element converts.
///
/// `C` is any owned collection of `P`; the `IntoIterator` bound only pins the
/// element type, since `Vec<u64>` also extends from `&u64`.
pub fn load_sequence_from_json_value<P, C>(out: &mut C, json: &JsonValue) -> Result<()>
where
    P: JsonPrimitive,
    C: Extend<P> + IntoIterator<Item = P>,
{
    let Some(values) = json.as_array() else {
        cold_path();
        return Err(Error::TypeMismatch {
            expected: "array",
            actual: json.kind(),
        });
    };
    let decoded = values
        .iter()
        .map(P::from_json_value)
        .collect::<Result<Vec<P>>>()?;
    out.extend(decoded);
    Ok(())
}

/// Encodes `value` as compact JSON text.
pub fn store_to_json<T: Serialize + Clone>(value: &T) -> Result<String> {
    Ok(store_to_json_value(value)?.to_string())
}

/// Encodes `value` as indented JSON text.
pub fn store_to_json_pretty<T: Serialize + Clone>(value: &T) -> Result<String> {
    Ok(store_to_json_value(value)?.to_string_pretty())
}

pub fn store_sequence_to_json<'a, P, I>(values: I) -> String
where
    P: JsonPrimitive + 'a,
    I: IntoIterator<Item = &'a P>,
{
    store_sequence_to_json_value(values).to_string()
}

/// Decodes JSON text into `value`, reporting success.
///
/// Empty text means "no data": `value` is left untouched and `true` is
/// returned. On failure `value` may be partially updated.
///
/// The text must hold an object. A bare top-level array such as `[1,2]`
/// makes this return `false`; load those with [`load_sequence_from_json`].
///
/// ```
/// use polyser::load_from_json;
///
/// let mut height = 7u64;
/// assert!(load_from_json(&mut height, ""));
/// assert_eq!(height, 7);
/// assert!(load_from_json(&mut height, r#"{"": 42}"#));
/// assert_eq!(height, 42);
/// assert!(!load_from_json(&mut height, "{"));
/// ```
pub fn load_from_json<T: Serialize>(value: &mut T, text: &str) -> bool {
    if text.is_empty() {
        return true;
    }
    let result = text
        .parse::<JsonValue>()
        .and_then(|json| load_from_json_value(value, &json));
    trap::<T>(result, "json")
}

/// Appends the elements of the JSON array in `text` to `out`.
///
/// Empty text appends nothing and returns `true`.
pub fn load_sequence_from_json<P, C>(out: &mut C, text: &str) -> bool
where
    P: JsonPrimitive,
    C: Extend<P> + IntoIterator<Item = P>,
{
    if text.is_empty() {
        return true;
    }
    let result = text
        .parse::<JsonValue>()
        .and_then(|json| load_sequence_from_json_value(out, &json));
    trap::<C>(result, "json sequence")
}

/// Encodes `value` as a little-endian key-value binary document.
pub fn store_to_binary_key_value<T: Serialize + Clone>(value: &T) -> Result<Vec<u8>> {
    store_to_binary_key_value_with::<LittleEndian, T>(value)
}

/// Encodes `value` as a key-value binary document in byte order `O`.
pub fn store_to_binary_key_value_with<O: ByteOrder, T: Serialize + Clone>(value: &T) -> Result<Vec<u8>> {
    let mut value = value.clone();
    let mut serializer = KvOutputSerializer::<O>::new();
    value.serialize(&mut serializer)?;
    let mut out = Vec::new();
    serializer.dump(&mut out)?;
    trace!(len = out.len(), type_name = type_name::<T>(), "stored key-value binary");
    Ok(out)
}

/// Decodes a little-endian key-value binary document into `value`,
/// reporting success. On failure `value` may be partially updated.
pub fn load_from_binary_key_value<T: Serialize>(value: &mut T, bytes: &[u8]) -> bool {
    load_from_binary_key_value_with::<LittleEndian, T>(value, bytes, Limits::default())
}

pub fn load_from_binary_key_value_with_limits<T: Serialize>(
    value: &mut T,
    bytes: &[u8],
    limits: Limits,
) -> bool {
    load_from_binary_key_value_with::<LittleEndian, T>(value, bytes, limits)
}

/// Decodes a key-value binary document in byte order `O` into `value`.
pub fn load_from_binary_key_value_with<O: ByteOrder, T: Serialize>(
    value: &mut T,
    bytes: &[u8],
    limits: Limits,
) -> bool {
    let mut stream = MemoryInputStream::new(bytes);
    let result = KvInputSerializer::from_stream::<O, _>(&mut stream, limits)
        .and_then(|mut serializer| value.serialize(&mut serializer));
    trap::<T>(result, "key-value binary")
}

/// Encodes `value` as a flat binary array.
///
/// ```
/// let bytes = polyser::to_binary_array(&vec![1u64, 300]).unwrap();
/// assert_eq!(bytes, [2, 1, 0xac, 0x02]);
/// ```
pub fn to_binary_array<T: Serialize + Clone>(value: &T) -> Result<Vec<u8>> {
    let mut value = value.clone();
    let mut out = Vec::new();
    value.serialize(&mut BinaryOutputSerializer::new(&mut out))?;
    trace!(len = out.len(), type_name = type_name::<T>(), "stored binary array");
    Ok(out)
}

/// Encodes `value` into `out`, reporting success.
///
/// `out` is replaced only on success; on failure it keeps its previous
/// contents.
pub fn try_to_binary_array<T: Serialize + Clone>(value: &T, out: &mut Vec<u8>) -> bool {
    match to_binary_array(value) {
        Ok(bytes) => {
            *out = bytes;
            true
        }
        Err(error) => trap::<T>(Err(error), "binary array"),
    }
}

/// Decodes a flat binary array that must be consumed completely.
///
/// ```
/// use polyser::{Error, from_binary_array};
///
/// assert_eq!(from_binary_array::<u32>(&[0xac, 0x02]).unwrap(), 300);
/// assert!(matches!(
///     from_binary_array::<u32>(&[0xac, 0x02, 0x00]),
///     Err(Error::TrailingData(1))
/// ));
/// ```
pub fn from_binary_array<T: Serialize + Default>(bytes: &[u8]) -> Result<T> {
    from_binary_array_with_limits(bytes, Limits::default())
}

pub fn from_binary_array_with_limits<T: Serialize + Default>(bytes: &[u8], limits: Limits) -> Result<T> {
    let mut stream = MemoryInputStream::new(bytes);
    let mut value = T::default();
    value.serialize(&mut BinaryInputSerializer::with_limits(&mut stream, limits))?;
    if !stream.end_of_stream() {
        cold_path();
        return Err(Error::TrailingData(stream.bytes_left()));
    }
    Ok(value)
}

/// Decodes a flat binary array into `out`, reporting success.
///
/// `out` is replaced only on success.
pub fn try_from_binary_array<T: Serialize + Default>(out: &mut T, bytes: &[u8]) -> bool {
    match from_binary_array(bytes) {
        Ok(value) => {
            *out = value;
            true
        }
        Err(error) => trap::<T>(Err(error), "binary array"),
    }
}

/// Raw bytes are already in flat binary form and are copied as is.
///
/// This is a separate function rather than an overload: passing a
/// `Vec<u8>` to [`to_binary_array`] or [`try_to_binary_array`] takes the
/// generic path and writes a varint count followed by one varint per byte.
///
/// ```
/// let raw = vec![0x80u8, 1];
/// assert_eq!(polyser::bytes_to_binary_array(&raw), [0x80, 1]);
/// assert_eq!(polyser::to_binary_array(&raw).unwrap(), [2, 0x80, 0x01, 1]);
/// ```
#[inline]
pub fn bytes_to_binary_array(bytes: &[u8]) -> Vec<u8> {
    bytes.to_vec()
}

#[inline]
pub fn bytes_from_binary_array(bytes: &[u8]) -> Vec<u8> {
    bytes.to_vec()
}

#[inline]
pub fn try_bytes_to_binary_array(bytes: &[u8], out: &mut Vec<u8>) -> bool {
    out.clear();
    out.extend_from_slice(bytes);
    true
}

fn trap<T: ?Sized>(result: Result<()>, format: &'static str) -> bool {
    match result {
        Ok(()) => true,
        Err(error) => {
            cold_path();
            debug!(%error, format, type_name = type_name::<T>(), "conversion failed");
            false
        }
    }
}
