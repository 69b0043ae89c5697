use crate::{
    Error, InputStream, Limits, Mode, Result, Serializer, cold_path,
    binary::{read_varint, zigzag_decode},
    util::narrow,
};

/// Read-mode flat binary codec bound to an [`InputStream`].
///
/// Every field is always present, so no operation ever returns `Ok(false)`.
/// The serializer does not check that the stream is exhausted afterwards;
/// the conversion layer does.
///
/// # Example
///
/// ```
/// use polyser::{MemoryInputStream, Serialize, binary::BinaryInputSerializer};
///
/// let mut stream = MemoryInputStream::new(&[2, 1, 0xac, 0x02]);
/// let mut serializer = BinaryInputSerializer::new(&mut stream);
/// let mut values: Vec<u16> = Vec::new();
/// values.serialize(&mut serializer).unwrap();
/// assert_eq!(values, [1, 300]);
/// ```
pub struct BinaryInputSerializer<'s, R: InputStream + ?Sized> {
    stream: &'s mut R,
    limits: Limits,
    depth: usize,
}

impl<'s, R: InputStream + ?Sized> BinaryInputSerializer<'s, R> {
    #[inline]
    pub fn new(stream: &'s mut R) -> Self {
        Self::with_limits(stream, Limits::default())
    }

    pub fn with_limits(stream: &'s mut R, limits: Limits) -> Self {
        Self {
            stream,
            limits,
            depth: 0,
        }
    }

    fn enter(&mut self) -> Result<()> {
        self.depth += 1;
        if self.depth > self.limits.max_depth {
            cold_path();
            return Err(Error::DepthLimitExceeded(self.depth));
        }
        Ok(())
    }

    fn leave(&mut self, operation: &'static str) -> Result<()> {
        if self.depth == 0 {
            cold_path();
            return Err(Error::ScopeMismatch(operation));
        }
        self.depth -= 1;
        Ok(())
    }

    fn len(&mut self) -> Result<usize> {
        let len = read_varint(&mut *self.stream)?;
        if len > self.limits.max_sequence_len as u64 {
            cold_path();
            return Err(Error::LengthTooLong(usize::try_from(len).unwrap_or(usize::MAX)));
        }
        Ok(len as usize)
    }

    #[inline]
    fn unsigned<T: TryFrom<u64>>(&mut self, value: &mut T, target: &'static str) -> Result<bool> {
        *value = narrow(read_varint(&mut *self.stream)?, target)?;
        Ok(true)
    }

    #[inline]
    fn signed<T: TryFrom<i64>>(&mut self, value: &mut T, target: &'static str) -> Result<bool> {
        *value = narrow(zigzag_decode(read_varint(&mut *self.stream)?), target)?;
        Ok(true)
    }
}

impl<R: InputStream + ?Sized> Serializer for BinaryInputSerializer<'_, R> {
    #[inline]
    fn mode(&self) -> Mode {
        Mode::Read
    }

    fn begin_object(&mut self, _name: &str) -> Result<bool> {
        self.enter()?;
        Ok(true)
    }

    fn end_object(&mut self) -> Result<()> {
        self.leave("end_object")
    }

    fn begin_array(&mut self, size: &mut usize, _name: &str) -> Result<bool> {
        self.enter()?;
        *size = self.len()?;
        Ok(true)
    }

    fn end_array(&mut self) -> Result<()> {
        self.leave("end_array")
    }

    fn bool(&mut self, value: &mut bool, _name: &str) -> Result<bool> {
        *value = match self.stream.read_byte()? {
            0 => false,
            1 => true,
            byte => {
                cold_path();
                return Err(Error::InvalidBool(byte));
            }
        };
        Ok(true)
    }

    fn i8(&mut self, value: &mut i8, _name: &str) -> Result<bool> {
        self.signed(value, "i8")
    }

    fn i16(&mut self, value: &mut i16, _name: &str) -> Result<bool> {
        self.signed(value, "i16")
    }

    fn i32(&mut self, value: &mut i32, _name: &str) -> Result<bool> {
        self.signed(value, "i32")
    }

    fn i64(&mut self, value: &mut i64, _name: &str) -> Result<bool> {
        self.signed(value, "i64")
    }

    fn u8(&mut self, value: &mut u8, _name: &str) -> Result<bool> {
        self.unsigned(value, "u8")
    }

    fn u16(&mut self, value: &mut u16, _name: &str) -> Result<bool> {
        self.unsigned(value, "u16")
    }

    fn u32(&mut self, value: &mut u32, _name: &str) -> Result<bool> {
        self.unsigned(value, "u32")
    }

    fn u64(&mut self, value: &mut u64, _name: &str) -> Result<bool> {
        self.unsigned(value, "u64")
    }

    fn f64(&mut self, value: &mut f64, _name: &str) -> Result<bool> {
        let mut raw = [0u8; 8];
        self.stream.read_bytes(&mut raw)?;
        *value = f64::from_le_bytes(raw);
        Ok(true)
    }

    fn string(&mut self, value: &mut String, _name: &str) -> Result<bool> {
        let len = self.len()?;
        let raw = self.stream.read_vec(len)?;
        *value = String::from_utf8(raw).map_err(|_| {
            cold_path();
            Error::InvalidUtf8
        })?;
        Ok(true)
    }

    fn bytes(&mut self, value: &mut Vec<u8>, _name: &str) -> Result<bool> {
        let len = self.len()?;
        *value = self.stream.read_vec(len)?;
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::MemoryInputStream;

    #[test]
    fn invalid_bool_byte() {
        let mut stream = MemoryInputStream::new(&[2]);
        let mut value = false;
        assert!(matches!(
            BinaryInputSerializer::new(&mut stream).bool(&mut value, ""),
            Err(Error::InvalidBool(2))
        ));
    }

    #[test]
    fn narrow_width_is_range_checked() {
        // 300 does not fit a u8
        let mut stream = MemoryInputStream::new(&[0xac, 0x02]);
        let mut value = 0u8;
        assert!(matches!(
            BinaryInputSerializer::new(&mut stream).u8(&mut value, ""),
            Err(Error::OutOfRange { target: "u8", .. })
        ));
    }

    #[test]
    fn invalid_utf8() {
        let mut stream = MemoryInputStream::new(&[2, 0xc3, 0x28]);
        let mut value = String::new();
        assert!(matches!(
            BinaryInputSerializer::new(&mut stream).string(&mut value, ""),
            Err(Error::InvalidUtf8)
        ));
    }

    #[test]
    fn depth_limit() {
        let limits = Limits {
            max_depth: 1,
            ..Limits::default()
        };
        let mut stream = MemoryInputStream::new(&[]);
        let mut serializer = BinaryInputSerializer::with_limits(&mut stream, limits);
        serializer.begin_object("a").unwrap();
        assert!(matches!(
            serializer.begin_object("b"),
            Err(Error::DepthLimitExceeded(2))
        ));
    }

    #[test]
    fn unbalanced_end() {
        let mut stream = MemoryInputStream::new(&[]);
        assert!(matches!(
            BinaryInputSerializer::new(&mut stream).end_array(),
            Err(Error::ScopeMismatch("end_array"))
        ));
    }
}
