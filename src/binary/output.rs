use crate::{
    Mode, OutputStream, Result, Serializer,
    binary::{write_varint, zigzag_encode},
};

/// Write-mode flat binary codec bound to an [`OutputStream`].
///
/// # Example
///
/// ```
/// use polyser::{Serialize, binary::BinaryOutputSerializer};
///
/// let mut out = Vec::new();
/// let mut serializer = BinaryOutputSerializer::new(&mut out);
/// let mut values = vec![1u16, 300];
/// values.serialize(&mut serializer).unwrap();
/// assert_eq!(out, [2, 1, 0xac, 0x02]);
/// ```
pub struct BinaryOutputSerializer<'s, W: OutputStream + ?Sized> {
    stream: &'s mut W,
}

impl<'s, W: OutputStream + ?Sized> BinaryOutputSerializer<'s, W> {
    #[inline]
    pub fn new(stream: &'s mut W) -> Self {
        Self { stream }
    }

    #[inline]
    fn unsigned(&mut self, value: u64) -> Result<bool> {
        write_varint(&mut *self.stream, value);
        Ok(true)
    }

    #[inline]
    fn signed(&mut self, value: i64) -> Result<bool> {
        write_varint(&mut *self.stream, zigzag_encode(value));
        Ok(true)
    }
}

impl<W: OutputStream + ?Sized> Serializer for BinaryOutputSerializer<'_, W> {
    #[inline]
    fn mode(&self) -> Mode {
        Mode::Write
    }

    #[inline]
    fn begin_object(&mut self, _name: &str) -> Result<bool> {
        Ok(true)
    }

    #[inline]
    fn end_object(&mut self) -> Result<()> {
        Ok(())
    }

    fn begin_array(&mut self, size: &mut usize, _name: &str) -> Result<bool> {
        write_varint(&mut *self.stream, *size as u64);
        Ok(true)
    }

    #[inline]
    fn end_array(&mut self) -> Result<()> {
        Ok(())
    }

    fn bool(&mut self, value: &mut bool, _name: &str) -> Result<bool> {
        self.stream.write_byte(*value as u8);
        Ok(true)
    }

    fn i8(&mut self, value: &mut i8, _name: &str) -> Result<bool> {
        self.signed(i64::from(*value))
    }

    fn i16(&mut self, value: &mut i16, _name: &str) -> Result<bool> {
        self.signed(i64::from(*value))
    }

    fn i32(&mut self, value: &mut i32, _name: &str) -> Result<bool> {
        self.signed(i64::from(*value))
    }

    fn i64(&mut self, value: &mut i64, _name: &str) -> Result<bool> {
        self.signed(*value)
    }

    fn u8(&mut self, value: &mut u8, _name: &str) -> Result<bool> {
        self.unsigned(u64::from(*value))
    }

    fn u16(&mut self, value: &mut u16, _name: &str) -> Result<bool> {
        self.unsigned(u64::from(*value))
    }

    fn u32(&mut self, value: &mut u32, _name: &str) -> Result<bool> {
        self.unsigned(u64::from(*value))
    }

    fn u64(&mut self, value: &mut u64, _name: &str) -> Result<bool> {
        self.unsigned(*value)
    }

    fn f64(&mut self, value: &mut f64, _name: &str) -> Result<bool> {
        self.stream.write_bytes(&value.to_le_bytes());
        Ok(true)
    }

    fn string(&mut self, value: &mut String, _name: &str) -> Result<bool> {
        write_varint(&mut *self.stream, value.len() as u64);
        self.stream.write_bytes(value.as_bytes());
        Ok(true)
    }

    fn bytes(&mut self, value: &mut Vec<u8>, _name: &str) -> Result<bool> {
        write_varint(&mut *self.stream, value.len() as u64);
        self.stream.write_bytes(value);
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn signed_values_are_zigzagged() {
        let mut out = Vec::new();
        let mut serializer = BinaryOutputSerializer::new(&mut out);
        serializer.i32(&mut -1, "").unwrap();
        serializer.i64(&mut 64, "").unwrap();
        assert_eq!(out, [1, 0x80, 0x01]);
    }

    #[test]
    fn objects_write_nothing() {
        let mut out = Vec::new();
        let mut serializer = BinaryOutputSerializer::new(&mut out);
        serializer.begin_object("outer").unwrap();
        serializer.bool(&mut true, "flag").unwrap();
        serializer.end_object().unwrap();
        assert_eq!(out, [1]);
    }

    #[test]
    fn strings_are_length_prefixed() {
        let mut out = Vec::new();
        BinaryOutputSerializer::new(&mut out)
            .string(&mut "ccx".to_owned(), "")
            .unwrap();
        assert_eq!(out, [3, b'c', b'c', b'x']);
    }
}
