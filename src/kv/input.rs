use std::marker::PhantomData;

use zerocopy::byteorder;

use crate::{
    ByteOrder, Error, InputStream, Limits, Mode, Result, Serializer, cold_path,
    kv::{SIGNATURE, TagID, VERSION},
    util::narrow,
};

/// A decoded key-value binary entry.
///
/// Integers are widened on decode and narrowed again when the traversal
/// routine asks for a specific width, so a field written as `u16` can be
/// read back as `u64`.
#[derive(Clone, Debug, PartialEq)]
pub enum KvNode {
    Bool(bool),
    Signed(i64),
    Unsigned(u64),
    Double(f64),
    String(String),
    Bytes(Vec<u8>),
    List(Vec<KvNode>),
    Compound(Vec<(String, KvNode)>),
}

impl KvNode {
    pub const fn kind(&self) -> &'static str {
        match self {
            KvNode::Bool(_) => "bool",
            KvNode::Signed(_) | KvNode::Unsigned(_) => "integer",
            KvNode::Double(_) => "double",
            KvNode::String(_) => "string",
            KvNode::Bytes(_) => "bytes",
            KvNode::List(_) => "list",
            KvNode::Compound(_) => "compound",
        }
    }
}

struct Parser<'s, R, O> {
    stream: &'s mut R,
    limits: Limits,
    depth: usize,
    marker: PhantomData<O>,
}

impl<R: InputStream, O: ByteOrder> Parser<'_, R, O> {
    fn parse_u16(&mut self) -> Result<u16> {
        Ok(byteorder::U16::<O>::from_bytes(self.stream.read_array()?).get())
    }

    fn parse_len(&mut self) -> Result<usize> {
        let len = byteorder::U32::<O>::from_bytes(self.stream.read_array()?).get() as usize;
        if len > self.limits.max_sequence_len {
            cold_path();
            return Err(Error::LengthTooLong(len));
        }
        Ok(len)
    }

    fn parse_string(&mut self) -> Result<String> {
        let len = self.parse_len()?;
        let raw = self.stream.read_vec(len)?;
        Ok(simd_cesu8::mutf8::decode_lossy(&raw).into_owned())
    }

    fn parse_entries(&mut self) -> Result<Vec<(String, KvNode)>> {
        let mut entries = Vec::new();
        loop {
            let tag = TagID::from_u8(self.stream.read_byte()?)?;
            if tag == TagID::End {
                return Ok(entries);
            }
            let name_len = self.parse_u16()? as usize;
            let name = simd_cesu8::mutf8::decode_lossy(&self.stream.read_vec(name_len)?).into_owned();
            let node = self.parse_payload(tag)?;
            entries.push((name, node));
        }
    }

    fn parse_payload(&mut self, tag: TagID) -> Result<KvNode> {
        if tag.is_composite() {
            self.depth += 1;
            if self.depth > self.limits.max_depth {
                cold_path();
                return Err(Error::DepthLimitExceeded(self.depth));
            }
        }
        let node = match tag {
            TagID::End => {
                cold_path();
                return Err(Error::InvalidTagType(TagID::End as u8));
            }
            TagID::Bool => match self.stream.read_byte()? {
                0 => KvNode::Bool(false),
                1 => KvNode::Bool(true),
                byte => {
                    cold_path();
                    return Err(Error::InvalidBool(byte));
                }
            },
            TagID::I8 => KvNode::Signed(self.stream.read_byte()? as i8 as i64),
            TagID::I16 => {
                KvNode::Signed(byteorder::I16::<O>::from_bytes(self.stream.read_array()?).get() as i64)
            }
            TagID::I32 => {
                KvNode::Signed(byteorder::I32::<O>::from_bytes(self.stream.read_array()?).get() as i64)
            }
            TagID::I64 => KvNode::Signed(byteorder::I64::<O>::from_bytes(self.stream.read_array()?).get()),
            TagID::U8 => KvNode::Unsigned(self.stream.read_byte()? as u64),
            TagID::U16 => KvNode::Unsigned(self.parse_u16()? as u64),
            TagID::U32 => {
                KvNode::Unsigned(byteorder::U32::<O>::from_bytes(self.stream.read_array()?).get() as u64)
            }
            TagID::U64 => {
                KvNode::Unsigned(byteorder::U64::<O>::from_bytes(self.stream.read_array()?).get())
            }
            TagID::Double => KvNode::Double(byteorder::F64::<O>::from_bytes(self.stream.read_array()?).get()),
            TagID::String => KvNode::String(self.parse_string()?),
            TagID::Bytes => {
                let len = self.parse_len()?;
                KvNode::Bytes(self.stream.read_vec(len)?)
            }
            TagID::List => {
                let element = TagID::from_u8(self.stream.read_byte()?)?;
                let len = self.parse_len()?;
                if element == TagID::End && len > 0 {
                    cold_path();
                    return Err(Error::InvalidTagType(TagID::End as u8));
                }
                // every payload takes at least one byte
                let mut values = Vec::with_capacity(len.min(self.stream.bytes_left()));
                for _ in 0..len {
                    values.push(self.parse_payload(element)?);
                }
                KvNode::List(values)
            }
            TagID::Compound => KvNode::Compound(self.parse_entries()?),
        };
        if tag.is_composite() {
            self.depth -= 1;
        }
        Ok(node)
    }
}

enum Frame {
    Object(Vec<(String, KvNode)>),
    Array(std::vec::IntoIter<KvNode>),
}

/// Read-mode key-value binary codec.
///
/// The whole document is parsed up front into [`KvNode`]s, then fields are
/// handed out by name, so their order in the document does not matter. A
/// missing field reports `Ok(false)` and leaves the target untouched.
///
/// # Example
///
/// ```
/// use polyser::{Limits, MemoryInputStream, Serialize, kv::KvInputSerializer};
///
/// let data = b"PSKV\x01\x06\x01\x00v\x07\x00";
/// let mut stream = MemoryInputStream::new(data);
/// let mut serializer =
///     KvInputSerializer::from_stream::<polyser::LittleEndian, _>(&mut stream, Limits::default())
///         .unwrap();
///
/// let mut value = 0u32;
/// assert!(value.serialize_field("v", &mut serializer).unwrap());
/// assert_eq!(value, 7);
/// assert!(!value.serialize_field("missing", &mut serializer).unwrap());
/// ```
pub struct KvInputSerializer {
    stack: Vec<Frame>,
}

impl KvInputSerializer {
    /// Parses a complete document from `stream`.
    ///
    /// Fails with [`Error::TrailingData`] if bytes remain after the root
    /// object's terminator.
    pub fn from_stream<O: ByteOrder, R: InputStream>(stream: &mut R, limits: Limits) -> Result<Self> {
        let signature: [u8; 4] = stream.read_array()?;
        if signature != SIGNATURE || stream.read_byte()? != VERSION {
            cold_path();
            return Err(Error::InvalidSignature);
        }
        let root = Parser::<R, O> {
            stream: &mut *stream,
            limits,
            depth: 0,
            marker: PhantomData,
        }
        .parse_entries()?;
        if !stream.end_of_stream() {
            cold_path();
            return Err(Error::TrailingData(stream.bytes_left()));
        }
        Ok(Self {
            stack: vec![Frame::Object(root)],
        })
    }

    fn take(&mut self, name: &str) -> Result<Option<KvNode>> {
        match self.stack.last_mut() {
            Some(Frame::Object(entries)) => Ok(entries
                .iter()
                .position(|(key, _)| key == name)
                .map(|index| entries.swap_remove(index).1)),
            Some(Frame::Array(values)) => match values.next() {
                Some(value) => Ok(Some(value)),
                None => {
                    cold_path();
                    Err(Error::EndOfFile)
                }
            },
            None => {
                cold_path();
                Err(Error::ScopeMismatch("read outside of the root object"))
            }
        }
    }

    fn integer<T>(&mut self, value: &mut T, name: &str, target: &'static str) -> Result<bool>
    where
        T: TryFrom<i64> + TryFrom<u64>,
    {
        match self.take(name)? {
            Some(KvNode::Signed(raw)) => *value = narrow(raw, target)?,
            Some(KvNode::Unsigned(raw)) => *value = narrow(raw, target)?,
            Some(other) => return mismatch("integer", &other),
            None => return Ok(false),
        }
        Ok(true)
    }
}

#[inline]
fn mismatch<T>(expected: &'static str, node: &KvNode) -> Result<T> {
    cold_path();
    Err(Error::TypeMismatch {
        expected,
        actual: node.kind(),
    })
}

macro_rules! read_integer {
    ($($ty:ident),* $(,)?) => {
        $(
            fn $ty(&mut self, value: &mut $ty, name: &str) -> Result<bool> {
                self.integer(value, name, stringify!($ty))
            }
        )*
    };
}

impl Serializer for KvInputSerializer {
    #[inline]
    fn mode(&self) -> Mode {
        Mode::Read
    }

    fn begin_object(&mut self, name: &str) -> Result<bool> {
        match self.take(name)? {
            Some(KvNode::Compound(entries)) => {
                self.stack.push(Frame::Object(entries));
                Ok(true)
            }
            Some(other) => mismatch("compound", &other),
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
        match self.take(name)? {
            Some(KvNode::List(values)) => {
                *size = values.len();
                self.stack.push(Frame::Array(values.into_iter()));
                Ok(true)
            }
            Some(other) => mismatch("list", &other),
            None => Ok(false),
        }
    }

    fn end_array(&mut self) -> Result<()> {
        match self.stack.last() {
            Some(Frame::Array(_)) => {
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
        match self.take(name)? {
            Some(KvNode::Bool(raw)) => *value = raw,
            Some(other) => return mismatch("bool", &other),
            None => return Ok(false),
        }
        Ok(true)
    }

    read_integer!(i8, i16, i32, i64, u8, u16, u32, u64);

    fn f64(&mut self, value: &mut f64, name: &str) -> Result<bool> {
        match self.take(name)? {
            Some(KvNode::Double(raw)) => *value = raw,
            Some(KvNode::Signed(raw)) => *value = raw as f64,
            Some(KvNode::Unsigned(raw)) => *value = raw as f64,
            Some(other) => return mismatch("double", &other),
            None => return Ok(false),
        }
        Ok(true)
    }

    fn string(&mut self, value: &mut String, name: &str) -> Result<bool> {
        match self.take(name)? {
            Some(KvNode::String(raw)) => *value = raw,
            Some(other) => return mismatch("string", &other),
            None => return Ok(false),
        }
        Ok(true)
    }

    fn bytes(&mut self, value: &mut Vec<u8>, name: &str) -> Result<bool> {
        match self.take(name)? {
            Some(KvNode::Bytes(raw)) => *value = raw,
            Some(other) => return mismatch("bytes", &other),
            None => return Ok(false),
        }
        Ok(true)
    }
}
