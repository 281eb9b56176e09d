use rstest::rstest;
use turbojson::{decode, encode, DecodeErrorKind, Options, Value};

#[rstest]
#[case::null(b"null" as &[u8], Value::Null)]
#[case::bool_true(b"true", Value::Bool(true))]
#[case::negative_int(b"-17", Value::Int(-17))]
#[case::float(b"3.5", Value::Float(3.5))]
#[case::empty_array(b"[]", Value::Array(vec![]))]
#[case::string(br#""hello world""#, Value::Str("hello world".into()))]
fn decodes_expected_value(#[case] input: &[u8], #[case] expected: Value) {
    assert_eq!(decode(input).unwrap(), expected);
}

#[rstest]
#[case::unterminated_string(br#""abc"# as &[u8], DecodeErrorKind::UnexpectedEof)]
#[case::bad_literal(b"nul", DecodeErrorKind::UnexpectedToken)]
#[case::control_char_in_string(b"\"\x01\"", DecodeErrorKind::ControlCharacterInString)]
#[case::non_string_key(b"{1:2}", DecodeErrorKind::ExpectedStringKey)]
#[case::trailing_comma_array(b"[1,]", DecodeErrorKind::UnexpectedToken)]
#[case::leading_zero(b"01", DecodeErrorKind::TrailingGarbage)]
fn rejects_malformed_input(#[case] input: &[u8], #[case] expected_kind: DecodeErrorKind) {
    let err = decode(input).unwrap_err();
    assert_eq!(err.kind, expected_kind);
}

#[test]
fn duplicate_object_keys_keep_first_position_last_value() {
    let value = decode(br#"{"a":1,"b":2,"a":3}"#).unwrap();
    let bytes = encode(&value, None, Options::default()).unwrap();
    assert_eq!(bytes, br#"{"a":3,"b":2}"#);
}

#[test]
fn sort_keys_and_indent_compose() {
    let value = decode(br#"{"b":1,"a":2}"#).unwrap();
    let bytes = encode(&value, None, Options::SORT_KEYS | Options::INDENT_2).unwrap();
    assert_eq!(String::from_utf8(bytes).unwrap(), "{\n  \"a\": 2,\n  \"b\": 1\n}");
}

#[test]
fn round_trips_unicode_and_control_escapes() {
    let text = "line1\nline2\ttab\"quote\\back\u{e9}\u{2028}";
    let value = Value::Str(text.into());
    let bytes = encode(&value, None, Options::default()).unwrap();
    let decoded = decode(&bytes).unwrap();
    assert_eq!(decoded, value);
}

#[test]
fn large_integer_promotes_to_uint_and_round_trips() {
    let value = decode(b"18446744073709551615").unwrap();
    assert_eq!(value, Value::UInt(u64::MAX));
    let bytes = encode(&value, None, Options::default()).unwrap();
    assert_eq!(bytes, b"18446744073709551615");
}

#[test]
fn strict_integer_option_rejects_large_magnitude_on_encode() {
    let value = Value::Int(1i64 << 60);
    assert!(encode(&value, None, Options::STRICT_INTEGER).is_err());
    assert!(encode(&value, None, Options::default()).is_ok());
}

#[test]
fn append_newline_option_adds_trailing_byte_only() {
    let value = decode(b"[1,2,3]").unwrap();
    let bytes = encode(&value, None, Options::APPEND_NEWLINE).unwrap();
    assert!(bytes.ends_with(b"\n"));
    assert_eq!(bytes.iter().filter(|&&b| b == b'\n').count(), 1);
}

#[test]
fn whole_document_decode_then_encode_preserves_structure() {
    let doc = br#"{
        "name": "turbojson",
        "tags": ["fast", "safe"],
        "meta": {"version": 1, "stable": true},
        "score": 3.4028235e38
    }"#;
    let value = decode(doc).unwrap();
    let bytes = encode(&value, None, Options::default()).unwrap();
    let value2 = decode(&bytes).unwrap();
    assert_eq!(value, value2);
}
