#![allow(dead_code)]

use polyser::{Error, Mode, Result, Serialize, Serializer};

#[derive(Clone, Default, Debug, PartialEq)]
pub struct Transfer {
    pub address: String,
    pub amount: u64,
    pub payment_ids: Vec<String>,
}

impl Serialize for Transfer {
    fn serialize<S: Serializer + ?Sized>(&mut self, s: &mut S) -> Result<()> {
        self.address.serialize_field("address", s)?;
        self.amount.serialize_field("amount", s)?;
        self.payment_ids.serialize_field("paymentIds", s)?;
        Ok(())
    }
}

/// Same fields as [`Transfer`], visited in a different order.
#[derive(Clone, Default, Debug, PartialEq)]
pub struct ReorderedTransfer {
    pub address: String,
    pub amount: u64,
    pub payment_ids: Vec<String>,
}

impl Serialize for ReorderedTransfer {
    fn serialize<S: Serializer + ?Sized>(&mut self, s: &mut S) -> Result<()> {
        self.payment_ids.serialize_field("paymentIds", s)?;
        self.amount.serialize_field("amount", s)?;
        self.address.serialize_field("address", s)?;
        Ok(())
    }
}

/// Only the address of a [`Transfer`].
#[derive(Clone, Default, Debug, PartialEq)]
pub struct AddressOnly {
    pub address: String,
}

impl Serialize for AddressOnly {
    fn serialize<S: Serializer + ?Sized>(&mut self, s: &mut S) -> Result<()> {
        self.address.serialize_field("address", s)?;
        Ok(())
    }
}

#[derive(Clone, Default, Debug, PartialEq)]
pub struct Wallet {
    pub name: String,
    pub height: u32,
    pub balance: i64,
    pub locked: bool,
    pub fee_rate: f64,
    pub spend_key: Vec<u8>,
    pub checkpoints: [u16; 3],
    pub transfers: Vec<Transfer>,
    pub last: Transfer,
}

impl Serialize for Wallet {
    fn serialize<S: Serializer + ?Sized>(&mut self, s: &mut S) -> Result<()> {
        self.name.serialize_field("name", s)?;
        self.height.serialize_field("height", s)?;
        self.balance.serialize_field("balance", s)?;
        self.locked.serialize_field("locked", s)?;
        self.fee_rate.serialize_field("feeRate", s)?;
        s.bytes(&mut self.spend_key, "spendKey")?;
        self.checkpoints.serialize_field("checkpoints", s)?;
        self.transfers.serialize_field("transfers", s)?;
        self.last.serialize_field("last", s)?;
        Ok(())
    }
}

/// Every fixed-width integer at its extremes.
#[derive(Clone, Default, Debug, PartialEq)]
pub struct Extremes {
    pub values: (i8, i16, i32, i64, u8, u16, u32, u64),
}

impl Serialize for Extremes {
    fn serialize<S: Serializer + ?Sized>(&mut self, s: &mut S) -> Result<()> {
        let (a, b, c, d, e, f, g, h) = &mut self.values;
        s.i8(a, "i8")?;
        s.i16(b, "i16")?;
        s.i32(c, "i32")?;
        s.i64(d, "i64")?;
        s.u8(e, "u8")?;
        s.u16(f, "u16")?;
        s.u32(g, "u32")?;
        s.u64(h, "u64")?;
        Ok(())
    }
}

impl Extremes {
    pub fn max() -> Self {
        Self {
            values: (i8::MAX, i16::MAX, i32::MAX, i64::MAX, u8::MAX, u16::MAX, u32::MAX, u64::MAX),
        }
    }

    pub fn min() -> Self {
        Self {
            values: (i8::MIN, i16::MIN, i32::MIN, i64::MIN, 0, 0, 0, 0),
        }
    }
}

/// A routine that refuses to encode.
#[derive(Clone, Default, Debug, PartialEq)]
pub struct Unwritable;

impl Serialize for Unwritable {
    fn serialize<S: Serializer + ?Sized>(&mut self, s: &mut S) -> Result<()> {
        if s.mode() == Mode::Write {
            return Err(Error::Message("refused".to_owned()));
        }
        Ok(())
    }
}

/// A routine that treats its only field as required.
#[derive(Clone, Default, Debug, PartialEq)]
pub struct RequiredHeight {
    pub height: u64,
}

impl Serialize for RequiredHeight {
    fn serialize<S: Serializer + ?Sized>(&mut self, s: &mut S) -> Result<()> {
        if !self.height.serialize_field("height", s)? {
            return Err(Error::Message("missing field height".to_owned()));
        }
        Ok(())
    }
}

pub fn transfer() -> Transfer {
    Transfer {
        address: "ccx7WVMV8EpXdG5CTq4zBhMF3vqV5vcKj5qVMPqyc".to_owned(),
        amount: 1_000_000,
        payment_ids: vec!["a1b2".to_owned(), "c3d4".to_owned()],
    }
}

pub fn wallet() -> Wallet {
    Wallet {
        name: "savings \u{1F4B0}\0end".to_owned(),
        height: 812_345,
        balance: -42,
        locked: true,
        fee_rate: 0.125,
        spend_key: vec![0xde, 0xad, 0xbe, 0xef, 0x00],
        checkpoints: [1, 300, u16::MAX],
        transfers: vec![
            transfer(),
            Transfer {
                address: String::new(),
                amount: u64::MAX,
                payment_ids: Vec::new(),
            },
        ],
        last: transfer(),
    }
}
