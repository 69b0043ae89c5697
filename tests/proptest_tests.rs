//! Property-based round-trip tests for every format.

#![allow(clippy::float_cmp)]

mod common;

use common::{Transfer, Wallet};
use polyser::{
    from_binary_array, load_from_binary_key_value, load_from_json, store_to_binary_key_value,
    store_to_json, to_binary_array,
};
use proptest::prelude::*;

fn arb_transfer() -> impl Strategy<Value = Transfer> {
    (".*", any::<u64>(), prop::collection::vec(".*", 0..5)).prop_map(
        |(address, amount, payment_ids)| Transfer {
            address,
            amount,
            payment_ids,
        },
    )
}

/// Floats are drawn from values with an exact short decimal form, since JSON
/// text is part of one of the round trips.
fn arb_wallet() -> impl Strategy<Value = Wallet> {
    (
        (".*", any::<u32>(), any::<i64>(), any::<bool>(), -1_000_000i32..1_000_000),
        (
            prop::collection::vec(any::<u8>(), 0..64),
            any::<[u16; 3]>(),
            prop::collection::vec(arb_transfer(), 0..4),
            arb_transfer(),
        ),
    )
        .prop_map(
            |((name, height, balance, locked, fee), (spend_key, checkpoints, transfers, last))| {
                Wallet {
                    name,
                    height,
                    balance,
                    locked,
                    fee_rate: f64::from(fee) / 8.0,
                    spend_key,
                    checkpoints,
                    transfers,
                    last,
                }
            },
        )
}

proptest! {
    #[test]
    fn json_roundtrip(wallet in arb_wallet()) {
        let text = store_to_json(&wallet).expect("encoding should succeed");
        let mut decoded = Wallet::default();
        prop_assert!(load_from_json(&mut decoded, &text));
        prop_assert_eq!(decoded, wallet);
    }

    #[test]
    fn key_value_roundtrip(wallet in arb_wallet()) {
        let bytes = store_to_binary_key_value(&wallet).expect("encoding should succeed");
        let mut decoded = Wallet::default();
        prop_assert!(load_from_binary_key_value(&mut decoded, &bytes));
        prop_assert_eq!(decoded, wallet);
    }

    #[test]
    fn binary_array_roundtrip(wallet in arb_wallet()) {
        let bytes = to_binary_array(&wallet).expect("encoding should succeed");
        let decoded: Wallet = from_binary_array(&bytes).expect("decoding should succeed");
        prop_assert_eq!(decoded, wallet);
    }

    #[test]
    fn binary_array_float_bits_survive(value in any::<f64>().prop_filter("not NaN", |f| !f.is_nan())) {
        let bytes = to_binary_array(&value).expect("encoding should succeed");
        let decoded: f64 = from_binary_array(&bytes).expect("decoding should succeed");
        prop_assert_eq!(decoded.to_bits(), value.to_bits());
    }

    #[test]
    fn loaders_never_panic(data in prop::collection::vec(any::<u8>(), 0..256)) {
        let mut wallet = Wallet::default();
        let _ = load_from_binary_key_value(&mut wallet, &data);
        let _ = from_binary_array::<Wallet>(&data);
        if let Ok(text) = std::str::from_utf8(&data) {
            let _ = load_from_json(&mut wallet, text);
        }
    }
}
