use crate::{
    Error, JsonObject, JsonPrimitive, JsonValue, Mode, Result, Serializer, cold_path,
    json::from_hex,
};

enum Frame<'a> {
    Object(&'a JsonObject),
    Array { values: &'a [JsonValue], next: usize },
}

/// Read-mode JSON codec over a borrowed [`JsonValue`] tree.
///
/// Fields are looked up by name inside objects, so their order in the tree
/// does not matter. A missing field reports `Ok(false)` and leaves the
/// target untouched. Array elements are consumed in order.
pub struct JsonInputSerializer<'a> {
    stack: Vec<Frame<'a>>,
}

impl<'a> JsonInputSerializer<'a> {
    /// Wraps `value`, which must be an object.
    pub fn new(value: &'a JsonValue) -> Result<Self> {
        match value {
            JsonValue::Object(object) => Ok(Self {
                stack: vec![Frame::Object(object)],
            }),
            other => {
                cold_path();
                Err(Error::TypeMismatch {
                    expected: "object",
                    actual: other.kind(),
                })
            }
        }
    }

    fn lookup(&mut self, name: &str) -> Result<Option<&'a JsonValue>> {
        match self.stack.last_mut() {
            Some(Frame::Object(object)) => {
                let object: &'a JsonObject = *object;
                Ok(object.get(name))
            }
            Some(Frame::Array { values, next }) => {
                let values: &'a [JsonValue] = *values;
                match values.get(*next) {
                    Some(value) => {
                        *next += 1;
                        Ok(Some(value))
                    }
                    None => {
                        cold_path();
                        Err(Error::EndOfFile)
                    }
                }
            }
            None => {
                cold_path();
                Err(Error::ScopeMismatch("read outside of the root object"))
            }
        }
    }

    #[inline]
    fn primitive<P: JsonPrimitive>(&mut self, value: &mut P, name: &str) -> Result<bool> {
        match self.lookup(name)? {
            Some(node) => {
                *value = P::from_json_value(node)?;
                Ok(true)
            }
            None => Ok(false),
        }
    }
}

impl Serializer for JsonInputSerializer<'_> {
    #[inline]
    fn mode(&self) -> Mode {
        Mode::Read
    }

    fn begin_object(&mut self, name: &str) -> Result<bool> {
        match self.lookup(name)? {
            Some(JsonValue::Object(object)) => {
                self.stack.push(Frame::Object(object));
                Ok(true)
            }
            Some(other) => {
                cold_path();
                Err(Error::TypeMismatch {
                    expected: "object",
                    actual: other.kind(),
                })
            }
            None => Ok(false),
        }
    }

    fn end_object(&mut self) -> Result<()> {
        match self.stack.last() {
            Some(Frame::Object(_)) if self.stack.len() > 1 => {
                self.stack.pop();
                Ok(())
            }
            _ => {
                cold_path();
                Err(Error::ScopeMismatch("end_object"))
            }
        }
    }

    fn begin_array(&mut self, size: &mut usize, name: &str) -> Result<bool> {
        match self.lookup(name)? {
            Some(JsonValue::Array(values)) => {
                *size = values.len();
                self.stack.push(Frame::Array { values, next: 0 });
                Ok(true)
            }
            Some(other) => {
                cold_path();
                Err(Error::TypeMismatch {
                    expected: "array",
                    actual: other.kind(),
                })
            }
            None => Ok(false),
        }
    }

    fn end_array(&mut self) -> Result<()> {
        match self.stack.last() {
            Some(Frame::Array { .. }) => {
                self.stack.pop();
                Ok(())
            }
            _ => {
                cold_path();
                Err(Error::ScopeMismatch("end_array"))
            }
        }
    }

    fn bool(&mut self, value: &mut bool, name: &str) -> Result<bool> {
        self.primitive(value, name)
    }

    fn i8(&mut self, value: &mut i8, name: &str) -> Result<bool> {
        self.primitive(value, name)
    }

    fn i16(&mut self, value: &mut i16, name: &str) -> Result<bool> {
        self.primitive(value, name)
    }

    fn i32(&mut self, value: &mut i32, name: &str) -> Result<bool> {
        self.primitive(value, name)
    }

    fn i64(&mut self, value: &mut i64, name: &str) -> Result<bool> {
        self.primitive(value, name)
    }

    fn u8(&mut self, value: &mut u8, name: &str) -> Result<bool> {
        self.primitive(value, name)
    }

    fn u16(&mut self, value: &mut u16, name: &str) -> Result<bool> {
        self.primitive(value, name)
    }

    fn u32(&mut self, value: &mut u32, name: &str) -> Result<bool> {
        self.primitive(value, name)
    }

    fn u64(&mut self, value: &mut u64, name: &str) -> Result<bool> {
        self.primitive(value, name)
    }

    fn f64(&mut self, value: &mut f64, name: &str) -> Result<bool> {
        self.primitive(value, name)
    }

    fn string(&mut self, value: &mut String, name: &str) -> Result<bool> {
        self.primitive(value, name)
    }

    fn bytes(&mut self, value: &mut Vec<u8>, name: &str) -> Result<bool> {
        match self.lookup(name)? {
            Some(JsonValue::String(text)) => {
                *value = from_hex(text)?;
                Ok(true)
            }
            Some(other) => {
                cold_path();
                Err(Error::TypeMismatch {
                    expected: "string",
                    actual: other.kind(),
                })
            }
            None => Ok(false),
        }
    }
}
