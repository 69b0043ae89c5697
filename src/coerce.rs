use crate::{Error, JsonValue, Result, cold_path, util::narrow};

/// A primitive that maps onto a single [`JsonValue`] node.
///
/// Used by the sequence fast path of the conversion layer and by the JSON
/// reader. Coercion is strict: a node of the wrong kind is an error, never a
/// default value.
///
/// | Rust type | Node |
/// |-----------|------|
/// | `bool` | `Bool` |
/// | `i8`..`i64`, `u8`..`u32` | `Integer`, range-checked |
/// | `u64` | `Integer`, bit-reinterpreted |
/// | `f64` | `Float` (also accepts `Integer`) |
/// | `String` | `String` |
pub trait JsonPrimitive: Sized {
    fn to_json_value(&self) -> JsonValue;

    fn from_json_value(value: &JsonValue) -> Result<Self>;
}

#[inline]
fn mismatch<T>(expected: &'static str, value: &JsonValue) -> Result<T> {
    cold_path();
    Err(Error::TypeMismatch {
        expected,
        actual: value.kind(),
    })
}

impl JsonPrimitive for bool {
    #[inline]
    fn to_json_value(&self) -> JsonValue {
        JsonValue::Bool(*self)
    }

    #[inline]
    fn from_json_value(value: &JsonValue) -> Result<Self> {
        match value {
            JsonValue::Bool(value) => Ok(*value),
            other => mismatch("bool", other),
        }
    }
}

macro_rules! impl_json_integer {
    ($($ty:ident),* $(,)?) => {
        $(
            impl JsonPrimitive for $ty {
                #[inline]
                fn to_json_value(&self) -> JsonValue {
                    JsonValue::Integer(i64::from(*self))
                }

                #[inline]
                fn from_json_value(value: &JsonValue) -> Result<Self> {
                    match value {
                        JsonValue::Integer(value) => narrow(*value, stringify!($ty)),
                        other => mismatch("integer", other),
                    }
                }
            }
        )*
    };
}

impl_json_integer!(i8, i16, i32, i64, u8, u16, u32);

impl JsonPrimitive for u64 {
    #[inline]
    fn to_json_value(&self) -> JsonValue {
        JsonValue::Integer(*self as i64)
    }

    #[inline]
    fn from_json_value(value: &JsonValue) -> Result<Self> {
        match value {
            JsonValue::Integer(value) => Ok(*value as u64),
            other => mismatch("integer", other),
        }
    }
}

impl JsonPrimitive for f64 {
    #[inline]
    fn to_json_value(&self) -> JsonValue {
        JsonValue::Float(*self)
    }

    #[inline]
    fn from_json_value(value: &JsonValue) -> Result<Self> {
        match value.as_float() {
            Some(value) => Ok(value),
            None => mismatch("float", value),
        }
    }
}

impl JsonPrimitive for String {
    #[inline]
    fn to_json_value(&self) -> JsonValue {
        JsonValue::String(self.clone())
    }

    #[inline]
    fn from_json_value(value: &JsonValue) -> Result<Self> {
        match value {
            JsonValue::String(value) => Ok(value.clone()),
            other => mismatch("string", other),
        }
    }
}
