use std::marker::PhantomData;

use zerocopy::{LittleEndian, byteorder};

use crate::{
    ByteOrder, Error, Mode, OutputStream, Result, Serializer, cold_path,
    kv::{SIGNATURE, TagID, VERSION},
};

enum Scope {
    Object,
    // `tag_pos` points at the element tag placeholder, followed by the
    // length placeholder; both are patched as elements arrive.
    Array { tag_pos: usize, len: usize },
}

/// Write-mode key-value binary codec.
///
/// Entries are accumulated in memory and written out by
/// [`dump`](Self::dump). List element tags and list lengths are written as
/// placeholders and filled in once the elements are known.
///
/// # Example
///
/// ```
/// use polyser::{Serialize, kv::KvOutputSerializer};
///
/// let mut serializer = KvOutputSerializer::<polyser::LittleEndian>::new();
/// 7u8.serialize_field("v", &mut serializer).unwrap();
///
/// let mut out = Vec::new();
/// serializer.dump(&mut out).unwrap();
/// assert_eq!(&out[..5], b"PSKV\x01");
/// assert_eq!(&out[5..], [6, 1, 0, b'v', 7, 0]);
/// ```
pub struct KvOutputSerializer<O: ByteOrder = LittleEndian> {
    vec: Vec<u8>,
    scopes: Vec<Scope>,
    marker: PhantomData<O>,
}

impl<O: ByteOrder> KvOutputSerializer<O> {
    pub fn new() -> Self {
        Self {
            vec: Vec::with_capacity(64),
            scopes: Vec::new(),
            marker: PhantomData,
        }
    }

    /// Writes the complete document to `stream`.
    ///
    /// Fails with [`Error::ScopeMismatch`] if a scope opened by the traversal
    /// routine was never closed.
    pub fn dump<S: OutputStream + ?Sized>(&self, stream: &mut S) -> Result<()> {
        if !self.scopes.is_empty() {
            cold_path();
            return Err(Error::ScopeMismatch("unclosed scope"));
        }
        stream.write_bytes(&SIGNATURE);
        stream.write_byte(VERSION);
        stream.write_bytes(&self.vec);
        stream.write_byte(TagID::End as u8);
        Ok(())
    }

    // Inside an object this writes tag and name. Inside a list it only
    // checks (or fixes) the element tag, since list elements are unnamed.
    fn write_head(&mut self, tag: TagID, name: &str) -> Result<()> {
        match self.scopes.last_mut() {
            None | Some(Scope::Object) => {
                let encoded = simd_cesu8::mutf8::encode(name);
                let name_len = encoded.len();
                if name_len > u16::MAX as usize {
                    cold_path();
                    return Err(Error::LengthTooLong(name_len));
                }
                self.vec.reserve(1 + 2 + name_len);
                self.vec.push(tag as u8);
                self.vec
                    .extend_from_slice(&byteorder::U16::<O>::new(name_len as u16).to_bytes());
                self.vec.extend_from_slice(&encoded);
            }
            Some(Scope::Array { tag_pos, len }) => {
                let current = self.vec[*tag_pos];
                if current == TagID::End as u8 {
                    self.vec[*tag_pos] = tag as u8;
                } else if current != tag as u8 {
                    cold_path();
                    return Err(Error::TagMismatch(current, tag as u8));
                }
                *len += 1;
            }
        }
        Ok(())
    }

    fn write_len(&mut self, len: usize) -> Result<()> {
        if len > u32::MAX as usize {
            cold_path();
            return Err(Error::LengthTooLong(len));
        }
        self.vec
            .extend_from_slice(&byteorder::U32::<O>::new(len as u32).to_bytes());
        Ok(())
    }
}

impl<O: ByteOrder> Default for KvOutputSerializer<O> {
    fn default() -> Self {
        Self::new()
    }
}

macro_rules! write_fixed {
    ($($method:ident: $ty:ident => $tag:ident as $wire:ident),* $(,)?) => {
        $(
            fn $method(&mut self, value: &mut $ty, name: &str) -> Result<bool> {
                self.write_head(TagID::$tag, name)?;
                self.vec
                    .extend_from_slice(&byteorder::$wire::<O>::new(*value).to_bytes());
                Ok(true)
            }
        )*
    };
}

impl<O: ByteOrder> Serializer for KvOutputSerializer<O> {
    #[inline]
    fn mode(&self) -> Mode {
        Mode::Write
    }

    fn begin_object(&mut self, name: &str) -> Result<bool> {
        self.write_head(TagID::Compound, name)?;
        self.scopes.push(Scope::Object);
        Ok(true)
    }

    fn end_object(&mut self) -> Result<()> {
        match self.scopes.pop() {
            Some(Scope::Object) => {
                self.vec.push(TagID::End as u8);
                Ok(())
            }
            _ => {
                cold_path();
                Err(Error::ScopeMismatch("end_object"))
            }
        }
    }

    fn begin_array(&mut self, _size: &mut usize, name: &str) -> Result<bool> {
        self.write_head(TagID::List, name)?;
        let tag_pos = self.vec.len();
        self.vec.push(TagID::End as u8);
        self.vec.extend_from_slice(&[0u8; 4]);
        self.scopes.push(Scope::Array { tag_pos, len: 0 });
        Ok(true)
    }

    fn end_array(&mut self) -> Result<()> {
        match self.scopes.pop() {
            Some(Scope::Array { tag_pos, len }) => {
                if len > u32::MAX as usize {
                    cold_path();
                    return Err(Error::LengthTooLong(len));
                }
                self.vec[tag_pos + 1..tag_pos + 5]
                    .copy_from_slice(&byteorder::U32::<O>::new(len as u32).to_bytes());
                Ok(())
            }
            _ => {
                cold_path();
                Err(Error::ScopeMismatch("end_array"))
            }
        }
    }

    fn bool(&mut self, value: &mut bool, name: &str) -> Result<bool> {
        self.write_head(TagID::Bool, name)?;
        self.vec.push(*value as u8);
        Ok(true)
    }

    fn i8(&mut self, value: &mut i8, name: &str) -> Result<bool> {
        self.write_head(TagID::I8, name)?;
        self.vec.push(*value as u8);
        Ok(true)
    }

    fn u8(&mut self, value: &mut u8, name: &str) -> Result<bool> {
        self.write_head(TagID::U8, name)?;
        self.vec.push(*value);
        Ok(true)
    }

    write_fixed!(
        i16: i16 => I16 as I16,
        i32: i32 => I32 as I32,
        i64: i64 => I64 as I64,
        u16: u16 => U16 as U16,
        u32: u32 => U32 as U32,
        u64: u64 => U64 as U64,
        f64: f64 => Double as F64,
    );

    fn string(&mut self, value: &mut String, name: &str) -> Result<bool> {
        self.write_head(TagID::String, name)?;
        let encoded = simd_cesu8::mutf8::encode(value);
        self.write_len(encoded.len())?;
        self.vec.extend_from_slice(&encoded);
        Ok(true)
    }

    fn bytes(&mut self, value: &mut Vec<u8>, name: &str) -> Result<bool> {
        self.write_head(TagID::Bytes, name)?;
        self.write_len(value.len())?;
        self.vec.extend_from_slice(value);
        Ok(true)
    }
}
