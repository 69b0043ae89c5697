//! Byte stream abstractions the binary codecs read from and write to.
//!
//! [`OutputStream`] is an append-only cursor and is implemented for every
//! [`bytes::BufMut`], so `Vec<u8>` and `BytesMut` are sinks out of the box.
//! [`InputStream`] is a bounds-checked cursor implemented for every
//! [`bytes::Buf`]; running past the end is reported as
//! [`Error::EndOfFile`] instead of panicking.

use bytes::{Buf, BufMut};

use crate::{Error, Result, cold_path};

/// An append-only byte sink.
///
/// Writes to growable sinks never fail. Fixed-capacity sinks such as
/// `&mut [u8]` panic when they run out of space, as [`BufMut::put_slice`] does.
pub trait OutputStream {
    fn write_bytes(&mut self, data: &[u8]);

    #[inline]
    fn write_byte(&mut self, byte: u8) {
        self.write_bytes(&[byte]);
    }
}

impl<B: BufMut + ?Sized> OutputStream for B {
    #[inline]
    fn write_bytes(&mut self, data: &[u8]) {
        self.put_slice(data);
    }

    #[inline]
    fn write_byte(&mut self, byte: u8) {
        self.put_u8(byte);
    }
}

/// A bounds-checked byte source.
pub trait InputStream {
    /// Number of bytes not yet consumed.
    fn bytes_left(&self) -> usize;

    /// Fills `dst` completely or fails with [`Error::EndOfFile`] without
    /// consuming anything.
    fn read_bytes(&mut self, dst: &mut [u8]) -> Result<()>;

    #[inline]
    fn read_byte(&mut self) -> Result<u8> {
        let mut byte = [0u8; 1];
        self.read_bytes(&mut byte)?;
        Ok(byte[0])
    }

    #[inline]
    fn read_array<const N: usize>(&mut self) -> Result<[u8; N]>
    where
        Self: Sized,
    {
        let mut buf = [0u8; N];
        self.read_bytes(&mut buf)?;
        Ok(buf)
    }

    /// Reads `len` bytes into a fresh vector.
    ///
    /// The length is checked against [`bytes_left`](Self::bytes_left) before
    /// allocating, so a forged length cannot trigger a large allocation.
    fn read_vec(&mut self, len: usize) -> Result<Vec<u8>> {
        if len > self.bytes_left() {
            cold_path();
            return Err(Error::EndOfFile);
        }
        let mut buf = vec![0u8; len];
        self.read_bytes(&mut buf)?;
        Ok(buf)
    }

    #[inline]
    fn end_of_stream(&self) -> bool {
        self.bytes_left() == 0
    }
}

impl<B: Buf> InputStream for B {
    #[inline]
    fn bytes_left(&self) -> usize {
        self.remaining()
    }

    #[inline]
    fn read_bytes(&mut self, dst: &mut [u8]) -> Result<()> {
        if dst.len() > self.remaining() {
            cold_path();
            return Err(Error::EndOfFile);
        }
        self.copy_to_slice(dst);
        Ok(())
    }
}

/// An input cursor over a borrowed byte slice.
///
/// # Example
///
/// ```
/// use polyser::{InputStream, MemoryInputStream};
///
/// let mut stream = MemoryInputStream::new(&[1, 2, 3]);
/// assert_eq!(stream.read_byte().unwrap(), 1);
/// assert_eq!(stream.position(), 1);
/// assert!(!stream.end_of_stream());
/// ```
#[derive(Clone, Debug)]
pub struct MemoryInputStream<'a> {
    data: &'a [u8],
    position: usize,
}

impl<'a> MemoryInputStream<'a> {
    #[inline]
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, position: 0 }
    }

    /// Number of bytes consumed so far.
    #[inline]
    pub fn position(&self) -> usize {
        self.position
    }
}

impl Buf for MemoryInputStream<'_> {
    #[inline]
    fn remaining(&self) -> usize {
        self.data.len() - self.position
    }

    #[inline]
    fn chunk(&self) -> &[u8] {
        &self.data[self.position..]
    }

    #[inline]
    fn advance(&mut self, cnt: usize) {
        assert!(cnt <= self.remaining(), "advance past end of stream");
        self.position += cnt;
    }
}
