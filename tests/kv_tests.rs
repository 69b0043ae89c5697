//! Key-value binary conversion tests

mod common;

use common::{AddressOnly, Extremes, RequiredHeight, ReorderedTransfer, Transfer, Wallet, transfer, wallet};
use polyser::{
    BigEndian, Error, Limits, LittleEndian, Result, Serialize, Serializer,
    load_from_binary_key_value, load_from_binary_key_value_with,
    load_from_binary_key_value_with_limits, store_to_binary_key_value,
    store_to_binary_key_value_with,
};

#[derive(Clone, Default, Debug, PartialEq)]
struct Height16 {
    height: u16,
}

impl Serialize for Height16 {
    fn serialize<S: Serializer + ?Sized>(&mut self, s: &mut S) -> Result<()> {
        self.height.serialize_field("height", s)?;
        Ok(())
    }
}

#[derive(Clone, Default, Debug)]
struct MixedList;

impl Serialize for MixedList {
    fn serialize<S: Serializer + ?Sized>(&mut self, s: &mut S) -> Result<()> {
        let mut size = 2;
        s.begin_array(&mut size, "mixed")?;
        s.u8(&mut 1, "")?;
        s.string(&mut "two".to_owned(), "")?;
        s.end_array()
    }
}

#[test]
fn test_wallet_round_trip() {
    let original = wallet();
    let bytes = store_to_binary_key_value(&original).unwrap();

    let mut decoded = Wallet::default();
    assert!(load_from_binary_key_value(&mut decoded, &bytes));
    assert_eq!(decoded, original);
}

#[test]
fn test_wallet_round_trip_big_endian() {
    let original = wallet();
    let bytes = store_to_binary_key_value_with::<BigEndian, _>(&original).unwrap();
    assert_ne!(bytes, store_to_binary_key_value(&original).unwrap());

    let mut decoded = Wallet::default();
    assert!(load_from_binary_key_value_with::<BigEndian, _>(
        &mut decoded,
        &bytes,
        Limits::default()
    ));
    assert_eq!(decoded, original);
}

#[test]
fn test_integer_extremes() {
    for original in [Extremes::max(), Extremes::min()] {
        let bytes = store_to_binary_key_value(&original).unwrap();
        let mut decoded = Extremes::default();
        assert!(load_from_binary_key_value(&mut decoded, &bytes));
        assert_eq!(decoded, original);
    }
}

#[test]
fn test_document_layout() {
    let bytes = store_to_binary_key_value(&AddressOnly {
        address: "ab".to_owned(),
    })
    .unwrap();

    let mut expected = b"PSKV\x01".to_vec();
    expected.push(11);
    expected.extend_from_slice(&[7, 0]);
    expected.extend_from_slice(b"address");
    expected.extend_from_slice(&[2, 0, 0, 0, b'a', b'b']);
    expected.push(0);
    assert_eq!(bytes, expected);
}

#[test]
fn test_empty_list_layout() {
    let mut original = transfer();
    original.payment_ids.clear();
    let bytes = store_to_binary_key_value(&original).unwrap();
    // List tag, "paymentIds", End element tag, zero length, then root End
    assert!(bytes.ends_with(b"\x0d\x0a\x00paymentIds\x00\x00\x00\x00\x00\x00"));

    let mut decoded = transfer();
    assert!(load_from_binary_key_value(&mut decoded, &bytes));
    assert!(decoded.payment_ids.is_empty());
}

#[test]
fn test_field_order_does_not_matter() {
    let reordered = ReorderedTransfer {
        address: "ccx2".to_owned(),
        amount: 17,
        payment_ids: vec!["x".to_owned()],
    };
    let bytes = store_to_binary_key_value(&reordered).unwrap();

    let mut decoded = Transfer::default();
    assert!(load_from_binary_key_value(&mut decoded, &bytes));
    assert_eq!(
        decoded,
        Transfer {
            address: "ccx2".to_owned(),
            amount: 17,
            payment_ids: vec!["x".to_owned()],
        }
    );
}

#[test]
fn test_missing_fields_are_left_untouched() {
    let bytes = store_to_binary_key_value(&AddressOnly {
        address: "ccx3".to_owned(),
    })
    .unwrap();

    let mut value = transfer();
    assert!(load_from_binary_key_value(&mut value, &bytes));
    assert_eq!(value.address, "ccx3");
    assert_eq!(value.amount, transfer().amount);

    let mut required = RequiredHeight::default();
    assert!(!load_from_binary_key_value(&mut required, &bytes));
}

#[test]
fn test_integers_widen_and_narrow() {
    let bytes = store_to_binary_key_value(&Height16 { height: 300 }).unwrap();
    let mut wide = RequiredHeight::default();
    assert!(load_from_binary_key_value(&mut wide, &bytes));
    assert_eq!(wide.height, 300);

    let bytes = store_to_binary_key_value(&RequiredHeight { height: 70_000 }).unwrap();
    let mut narrow = Height16::default();
    assert!(!load_from_binary_key_value(&mut narrow, &bytes));
    assert_eq!(narrow.height, 0);
}

#[test]
fn test_wrong_kind_fails() {
    // "amount" holds a string
    let bytes = store_to_binary_key_value(&AddressOnly {
        address: "ccx".to_owned(),
    })
    .unwrap();
    let renamed: Vec<u8> = bytes
        .windows(7)
        .position(|window| window == b"address")
        .map(|at| {
            let mut doc = bytes[..at - 2].to_vec();
            doc.extend_from_slice(&[6, 0]);
            doc.extend_from_slice(b"amount");
            doc.extend_from_slice(&bytes[at + 7..]);
            doc
        })
        .unwrap();

    let mut value = Transfer::default();
    assert!(!load_from_binary_key_value(&mut value, &renamed));
}

#[test]
fn test_heterogeneous_list_is_a_write_error() {
    assert!(matches!(
        store_to_binary_key_value(&MixedList),
        Err(Error::TagMismatch(6, 11))
    ));
}

#[test]
fn test_bad_header_fails() {
    let mut bytes = store_to_binary_key_value(&transfer()).unwrap();
    let mut value = Transfer::default();

    bytes[0] = b'X';
    assert!(!load_from_binary_key_value(&mut value, &bytes));
    bytes[0] = b'P';
    bytes[4] = 2;
    assert!(!load_from_binary_key_value(&mut value, &bytes));
    assert!(!load_from_binary_key_value(&mut value, &[]));
}

#[test]
fn test_every_truncation_fails() {
    let bytes = store_to_binary_key_value(&wallet()).unwrap();
    for len in 0..bytes.len() {
        let mut value = Wallet::default();
        assert!(
            !load_from_binary_key_value(&mut value, &bytes[..len]),
            "prefix of {len} bytes decoded"
        );
    }
}

#[test]
fn test_trailing_bytes_fail() {
    let mut bytes = store_to_binary_key_value(&transfer()).unwrap();
    bytes.push(0);
    let mut value = Transfer::default();
    assert!(!load_from_binary_key_value(&mut value, &bytes));
}

#[test]
fn test_unknown_tag_fails() {
    let mut bytes = b"PSKV\x01".to_vec();
    bytes.extend_from_slice(&[0x2a, 1, 0, b'x', 0]);
    let mut value = Transfer::default();
    assert!(!load_from_binary_key_value(&mut value, &bytes));
}

#[test]
fn test_depth_limit() {
    let bytes = store_to_binary_key_value(&wallet()).unwrap();
    let shallow = Limits {
        max_depth: 1,
        ..Limits::default()
    };
    let mut value = Wallet::default();
    assert!(!load_from_binary_key_value_with_limits(&mut value, &bytes, shallow));
    assert!(load_from_binary_key_value_with_limits(&mut value, &bytes, Limits::default()));
}

#[test]
fn test_sequence_limit() {
    let bytes = store_to_binary_key_value(&transfer()).unwrap();
    let short = Limits {
        max_sequence_len: 4,
        ..Limits::default()
    };
    let mut value = Transfer::default();
    // the address is longer than four bytes
    assert!(!load_from_binary_key_value_with_limits(&mut value, &bytes, short));
}

#[test]
fn test_byte_order_must_match() {
    let bytes = store_to_binary_key_value_with::<BigEndian, _>(&transfer()).unwrap();
    let mut value = Transfer::default();
    assert!(!load_from_binary_key_value_with::<LittleEndian, _>(
        &mut value,
        &bytes,
        Limits::default()
    ));
}
