use crate::{
    Error, JsonObject, JsonPrimitive, JsonValue, Mode, Result, Serializer, cold_path,
    json::to_hex,
};

enum Frame {
    Object { name: String, object: JsonObject },
    Array { name: String, values: Vec<JsonValue> },
}

/// Write-mode JSON codec.
///
/// Accumulates the fields a traversal routine visits into a [`JsonValue`]
/// tree rooted at an object.
///
/// # Example
///
/// ```
/// use polyser::{JsonValue, Serialize, json::JsonOutputSerializer};
///
/// let mut serializer = JsonOutputSerializer::new();
/// 7u64.serialize_field("height", &mut serializer).unwrap();
/// let value = serializer.into_value().unwrap();
/// assert_eq!(value.to_string(), r#"{"height":7}"#);
/// ```
pub struct JsonOutputSerializer {
    root: JsonObject,
    stack: Vec<Frame>,
}

impl JsonOutputSerializer {
    pub fn new() -> Self {
        Self {
            root: JsonObject::new(),
            stack: Vec::new(),
        }
    }

    /// Returns the accumulated tree.
    ///
    /// Fails with [`Error::ScopeMismatch`] if a scope opened by the traversal
    /// routine was never closed.
    pub fn into_value(self) -> Result<JsonValue> {
        if !self.stack.is_empty() {
            cold_path();
            return Err(Error::ScopeMismatch("unclosed scope"));
        }
        Ok(JsonValue::Object(self.root))
    }

    fn insert(&mut self, name: &str, value: JsonValue) {
        match self.stack.last_mut() {
            None => {
                self.root.insert(name, value);
            }
            Some(Frame::Object { object, .. }) => {
                object.insert(name, value);
            }
            Some(Frame::Array { values, .. }) => values.push(value),
        }
    }

    #[inline]
    fn primitive<P: JsonPrimitive>(&mut self, value: &P, name: &str) -> Result<bool> {
        self.insert(name, value.to_json_value());
        Ok(true)
    }
}

impl Default for JsonOutputSerializer {
    fn default() -> Self {
        Self::new()
    }
}

impl Serializer for JsonOutputSerializer {
    #[inline]
    fn mode(&self) -> Mode {
        Mode::Write
    }

    fn begin_object(&mut self, name: &str) -> Result<bool> {
        self.stack.push(Frame::Object {
            name: name.to_owned(),
            object: JsonObject::new(),
        });
        Ok(true)
    }

    fn end_object(&mut self) -> Result<()> {
        match self.stack.pop() {
            Some(Frame::Object { name, object }) => {
                self.insert(&name, JsonValue::Object(object));
                Ok(())
            }
            _ => {
                cold_path();
                Err(Error::ScopeMismatch("end_object"))
            }
        }
    }

    fn begin_array(&mut self, size: &mut usize, name: &str) -> Result<bool> {
        self.stack.push(Frame::Array {
            name: name.to_owned(),
            values: Vec::with_capacity(*size),
        });
        Ok(true)
    }

    fn end_array(&mut self) -> Result<()> {
        match self.stack.pop() {
            Some(Frame::Array { name, values }) => {
                self.insert(&name, JsonValue::Array(values));
                Ok(())
            }
            _ => {
                cold_path();
                Err(Error::ScopeMismatch("end_array"))
            }
        }
    }

    fn bool(&mut self, value: &mut bool, name: &str) -> Result<bool> {
        self.primitive(&*value, name)
    }

    fn i8(&mut self, value: &mut i8, name: &str) -> Result<bool> {
        self.primitive(&*value, name)
    }

    fn i16(&mut self, value: &mut i16, name: &str) -> Result<bool> {
        self.primitive(&*value, name)
    }

    fn i32(&mut self, value: &mut i32, name: &str) -> Result<bool> {
        self.primitive(&*value, name)
    }

    fn i64(&mut self, value: &mut i64, name: &str) -> Result<bool> {
        self.primitive(&*value, name)
    }

    fn u8(&mut self, value: &mut u8, name: &str) -> Result<bool> {
        self.primitive(&*value, name)
    }

    fn u16(&mut self, value: &mut u16, name: &str) -> Result<bool> {
        self.primitive(&*value, name)
    }

    fn u32(&mut self, value: &mut u32, name: &str) -> Result<bool> {
        self.primitive(&*value, name)
    }

    fn u64(&mut self, value: &mut u64, name: &str) -> Result<bool> {
        self.primitive(&*value, name)
    }

    fn f64(&mut self, value: &mut f64, name: &str) -> Result<bool> {
        if !value.is_finite() {
            cold_path();
            return Err(Error::NonFiniteFloat(*value));
        }
        self.primitive(&*value, name)
    }

    fn string(&mut self, value: &mut String, name: &str) -> Result<bool> {
        self.primitive(&*value, name)
    }

    fn bytes(&mut self, value: &mut Vec<u8>, name: &str) -> Result<bool> {
        self.insert(name, JsonValue::String(to_hex(value)));
        Ok(true)
    }
}
