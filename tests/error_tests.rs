//! Tests for the Error type

use polyser::Error;

#[test]
fn test_error_display_end_of_file() {
    assert_eq!(Error::EndOfFile.to_string(), "unexpected end of input");
}

#[test]
fn test_error_display_trailing_data() {
    assert_eq!(
        Error::TrailingData(42).to_string(),
        "failed to unpack type: 42 bytes remaining"
    );
}

#[test]
fn test_error_display_invalid_tag_type() {
    assert_eq!(Error::InvalidTagType(0xFF).to_string(), "invalid tag type: 0xff");
}

#[test]
fn test_error_display_tag_mismatch() {
    assert_eq!(
        Error::TagMismatch(6, 11).to_string(),
        "tag in list mismatch: expected 0x06, got 0x0b"
    );
}

#[test]
fn test_error_display_type_mismatch() {
    let error = Error::TypeMismatch {
        expected: "integer",
        actual: "string",
    };
    assert_eq!(error.to_string(), "type mismatch: expected integer, got string");
}

#[test]
fn test_error_display_out_of_range() {
    let error = Error::OutOfRange {
        value: "256".to_owned(),
        target: "u8",
    };
    assert_eq!(error.to_string(), "value 256 out of range for u8");
}

#[test]
fn test_error_from_json() {
    let json_error = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
    let error = Error::from(json_error);
    assert!(error.to_string().starts_with("json error: "));
    assert!(std::error::Error::source(&error).is_some());
    assert!(std::error::Error::source(&Error::EndOfFile).is_none());
}

#[test]
fn test_error_debug() {
    assert!(format!("{:?}", Error::VarintOverflow).contains("VarintOverflow"));
}

#[test]
fn test_error_is_std_error() {
    fn assert_error<E: std::error::Error + Send + Sync + 'static>() {}
    assert_error::<Error>();
}

#[test]
fn test_result_type() {
    let ok_result: polyser::Result<i32> = Ok(42);
    assert_eq!(ok_result.unwrap(), 42);

    let err_result: polyser::Result<i32> = Err(Error::EndOfFile);
    assert!(err_result.is_err());
}

#[test]
fn test_error_display_non_finite_float() {
    assert_eq!(
        Error::NonFiniteFloat(f64::INFINITY).to_string(),
        "non-finite float inf cannot be stored as json"
    );
}
