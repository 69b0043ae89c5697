use crate::{Error, Result, cold_path};

#[repr(u8)]
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub enum TagID {
    End = 0,
    Bool = 1,
    I8 = 2,
    I16 = 3,
    I32 = 4,
    I64 = 5,
    U8 = 6,
    U16 = 7,
    U32 = 8,
    U64 = 9,
    Double = 10,
    String = 11,
    Bytes = 12,
    List = 13,
    Compound = 14,
}

impl TagID {
    /// Validates a raw tag byte.
    pub fn from_u8(value: u8) -> Result<Self> {
        Ok(match value {
            0 => Self::End,
            1 => Self::Bool,
            2 => Self::I8,
            3 => Self::I16,
            4 => Self::I32,
            5 => Self::I64,
            6 => Self::U8,
            7 => Self::U16,
            8 => Self::U32,
            9 => Self::U64,
            10 => Self::Double,
            11 => Self::String,
            12 => Self::Bytes,
            13 => Self::List,
            14 => Self::Compound,
            _ => {
                cold_path();
                return Err(Error::InvalidTagType(value));
            }
        })
    }

    /// Returns `true` for tags whose payload contains other values.
    pub const fn is_composite(self) -> bool {
        matches!(self, Self::List | Self::Compound)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_tag_byte_round_trips() {
        for byte in 0..=14u8 {
            assert_eq!(TagID::from_u8(byte).unwrap() as u8, byte);
        }
        assert!(matches!(TagID::from_u8(15), Err(Error::InvalidTagType(15))));
    }

    #[test]
    fn composite_tags() {
        assert!(TagID::Compound.is_composite());
        assert!(TagID::List.is_composite());
        assert!(!TagID::Bytes.is_composite());
    }
}
