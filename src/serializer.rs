//! The capability interface every codec implements and the traversal trait
//! every domain type implements.
//!
//! A domain type lists its fields once, in a fixed order, inside
//! [`Serialize::serialize`]. The same routine encodes when it is driven by a
//! writer and decodes when it is driven by a reader; the routine itself never
//! branches on direction.
//!
//! # Example
//!
//! ```
//! use polyser::{Result, Serialize, Serializer};
//!
//! #[derive(Clone, Default, Debug, PartialEq)]
//! struct Transfer {
//!     address: String,
//!     amount: u64,
//!     payment_ids: Vec<String>,
//! }
//!
//! impl Serialize for Transfer {
//!     fn serialize<S: Serializer + ?Sized>(&mut self, s: &mut S) -> Result<()> {
//!         self.address.serialize_field("address", s)?;
//!         self.amount.serialize_field("amount", s)?;
//!         self.payment_ids.serialize_field("paymentIds", s)?;
//!         Ok(())
//!     }
//! }
//!
//! let transfer = Transfer {
//!     address: "ccx7".into(),
//!     amount: 1000,
//!     payment_ids: vec!["a1".into()],
//! };
//! let bytes = polyser::to_binary_array(&transfer).unwrap();
//! let decoded: Transfer = polyser::from_binary_array(&bytes).unwrap();
//! assert_eq!(decoded, transfer);
//! ```

use std::collections::{LinkedList, VecDeque};

use crate::{Error, Result};

/// Direction a [`Serializer`] moves data in.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum Mode {
    /// Values are decoded from the source into the domain type.
    Read,
    /// Values are read from the domain type and encoded into the sink.
    Write,
}

/// Typed read/write operations shared by every codec.
///
/// Writers only read through the `&mut` arguments; readers overwrite them.
///
/// Every operation that addresses a field returns whether the field was
/// present. Writers always return `Ok(true)`. Self-describing readers return
/// `Ok(false)` when the current object has no field called `name` and leave
/// the value untouched, which lets a traversal routine treat the field as
/// optional or report it as missing. When [`begin_object`](Self::begin_object)
/// or [`begin_array`](Self::begin_array) return `false` the matching `end_*`
/// must not be called.
///
/// Inside an array scope `name` is ignored and elements are visited in order.
pub trait Serializer {
    fn mode(&self) -> Mode;

    fn begin_object(&mut self, name: &str) -> Result<bool>;
    fn end_object(&mut self) -> Result<()>;

    /// Opens an array scope. Writers take the element count from `size`,
    /// readers store the decoded element count into it.
    fn begin_array(&mut self, size: &mut usize, name: &str) -> Result<bool>;
    fn end_array(&mut self) -> Result<()>;

    fn bool(&mut self, value: &mut bool, name: &str) -> Result<bool>;
    fn i8(&mut self, value: &mut i8, name: &str) -> Result<bool>;
    fn i16(&mut self, value: &mut i16, name: &str) -> Result<bool>;
    fn i32(&mut self, value: &mut i32, name: &str) -> Result<bool>;
    fn i64(&mut self, value: &mut i64, name: &str) -> Result<bool>;
    fn u8(&mut self, value: &mut u8, name: &str) -> Result<bool>;
    fn u16(&mut self, value: &mut u16, name: &str) -> Result<bool>;
    fn u32(&mut self, value: &mut u32, name: &str) -> Result<bool>;
    fn u64(&mut self, value: &mut u64, name: &str) -> Result<bool>;
    fn f64(&mut self, value: &mut f64, name: &str) -> Result<bool>;
    fn string(&mut self, value: &mut String, name: &str) -> Result<bool>;

    /// A raw byte blob, as opposed to an array of `u8` elements.
    fn bytes(&mut self, value: &mut Vec<u8>, name: &str) -> Result<bool>;
}

/// The traversal routine of a domain type.
pub trait Serialize {
    /// Visits every field of `self` in a fixed order.
    fn serialize<S: Serializer + ?Sized>(&mut self, s: &mut S) -> Result<()>;

    /// Visits `self` as the field `name` of the enclosing object, or as the
    /// next element of the enclosing array.
    ///
    /// Struct-like types are wrapped in an object scope. Primitives and
    /// containers override this to map onto a single [`Serializer`] call.
    fn serialize_field<S: Serializer + ?Sized>(&mut self, name: &str, s: &mut S) -> Result<bool> {
        if !s.begin_object(name)? {
            return Ok(false);
        }
        self.serialize(s)?;
        s.end_object()?;
        Ok(true)
    }
}

macro_rules! impl_primitive {
    ($($ty:ident),* $(,)?) => {
        $(
            impl Serialize for $ty {
                #[inline]
                fn serialize<S: Serializer + ?Sized>(&mut self, s: &mut S) -> Result<()> {
                    s.$ty(self, "")?;
                    Ok(())
                }

                #[inline]
                fn serialize_field<S: Serializer + ?Sized>(
                    &mut self,
                    name: &str,
                    s: &mut S,
                ) -> Result<bool> {
                    s.$ty(self, name)
                }
            }
        )*
    };
}

impl_primitive!(bool, i8, i16, i32, i64, u8, u16, u32, u64, f64);

impl Serialize for String {
    #[inline]
    fn serialize<S: Serializer + ?Sized>(&mut self, s: &mut S) -> Result<()> {
        s.string(self, "")?;
        Ok(())
    }

    #[inline]
    fn serialize_field<S: Serializer + ?Sized>(&mut self, name: &str, s: &mut S) -> Result<bool> {
        s.string(self, name)
    }
}

impl<T: Serialize + ?Sized> Serialize for Box<T> {
    #[inline]
    fn serialize<S: Serializer + ?Sized>(&mut self, s: &mut S) -> Result<()> {
        (**self).serialize(s)
    }

    #[inline]
    fn serialize_field<S: Serializer + ?Sized>(&mut self, name: &str, s: &mut S) -> Result<bool> {
        (**self).serialize_field(name, s)
    }
}

// Readers clear the container and append elements one at a time, so a
// forged count fails at the end of input instead of allocating up front.
macro_rules! impl_sequence {
    ($($container:ident),* $(,)?) => {
        $(
            impl<T: Serialize + Default> Serialize for $container<T> {
                #[inline]
                fn serialize<S: Serializer + ?Sized>(&mut self, s: &mut S) -> Result<()> {
                    self.serialize_field("", s)?;
                    Ok(())
                }

                fn serialize_field<S: Serializer + ?Sized>(
                    &mut self,
                    name: &str,
                    s: &mut S,
                ) -> Result<bool> {
                    let mut size = self.len();
                    if !s.begin_array(&mut size, name)? {
                        return Ok(false);
                    }
                    if s.mode() == Mode::Read {
                        self.clear();
                        for _ in 0..size {
                            let mut item = T::default();
                            item.serialize_field("", s)?;
                            self.extend(std::iter::once(item));
                        }
                    } else {
                        for item in self.iter_mut() {
                            item.serialize_field("", s)?;
                        }
                    }
                    s.end_array()?;
                    Ok(true)
                }
            }
        )*
    };
}

impl_sequence!(Vec, VecDeque, LinkedList);

impl<T: Serialize, const N: usize> Serialize for [T; N] {
    #[inline]
    fn serialize<S: Serializer + ?Sized>(&mut self, s: &mut S) -> Result<()> {
        self.serialize_field("", s)?;
        Ok(())
    }

    fn serialize_field<S: Serializer + ?Sized>(&mut self, name: &str, s: &mut S) -> Result<bool> {
        let mut size = N;
        if !s.begin_array(&mut size, name)? {
            return Ok(false);
        }
        if size != N {
            return Err(Error::LengthMismatch {
                expected: N,
                actual: size,
            });
        }
        for item in self.iter_mut() {
            item.serialize_field("", s)?;
        }
        s.end_array()?;
        Ok(true)
    }
}
