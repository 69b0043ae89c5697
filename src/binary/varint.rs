use crate::{Error, InputStream, OutputStream, Result, cold_path};

/// Longest encoding of a `u64`.
pub const MAX_VARINT_LEN: usize = 10;

/// Writes `value` as an unsigned LEB128 varint.
pub fn write_varint<S: OutputStream + ?Sized>(stream: &mut S, mut value: u64) {
    let mut buf = [0u8; MAX_VARINT_LEN];
    let mut len = 0;
    while value >= 0x80 {
        buf[len] = (value as u8 & 0x7f) | 0x80;
        value >>= 7;
        len += 1;
    }
    buf[len] = value as u8;
    stream.write_bytes(&buf[..=len]);
}

/// Reads an unsigned LEB128 varint.
///
/// Fails with [`Error::VarintOverflow`] if the encoding is longer than
/// [`MAX_VARINT_LEN`] bytes or the value does not fit 64 bits.
pub fn read_varint<S: InputStream + ?Sized>(stream: &mut S) -> Result<u64> {
    let mut value = 0u64;
    for index in 0..MAX_VARINT_LEN {
        let byte = stream.read_byte()?;
        let shift = index * 7;
        // the tenth byte may only carry the top bit of a u64
        if index == MAX_VARINT_LEN - 1 && byte > 1 {
            cold_path();
            return Err(Error::VarintOverflow);
        }
        value |= u64::from(byte & 0x7f) << shift;
        if byte & 0x80 == 0 {
            return Ok(value);
        }
    }
    cold_path();
    Err(Error::VarintOverflow)
}

#[inline]
pub const fn zigzag_encode(value: i64) -> u64 {
    ((value << 1) ^ (value >> 63)) as u64
}

#[inline]
pub const fn zigzag_decode(value: u64) -> i64 {
    ((value >> 1) as i64) ^ -((value & 1) as i64)
}
