//! JSON string parsing and emission.

use crate::error::DecodeErrorKind;
use crate::utf8;

/// A decode failure local to the string scanner, paired with the byte
/// offset (relative to the start of `bytes` passed to [`parse`]) where it
/// was found. The parser adds this to the string's absolute start position.
pub(crate) struct StringError {
    pub(crate) kind: DecodeErrorKind,
    pub(crate) offset: usize,
}

fn err(kind: DecodeErrorKind, offset: usize) -> StringError {
    StringError { kind, offset }
}

/// Parses a JSON string payload: `bytes[0]` is the first byte *after* the
/// opening `"`. Returns the decoded text and the offset of the byte just
/// past the closing `"`.
pub(crate) fn parse(bytes: &[u8]) -> Result<(Box<str>, usize), StringError> {
    let mut out: Vec<u8> = Vec::with_capacity(bytes.len());
    let mut i = 0;

    loop {
        let Some(&b) = bytes.get(i) else {
            return Err(err(DecodeErrorKind::UnexpectedEof, i));
        };

        match b {
            b'"' => {
                // SAFETY: every byte pushed to `out` is either plain ASCII,
                // a UTF-8 sequence validated byte-for-byte via
                // `utf8::decode_one`, or the UTF-8 encoding of a `char`
                // produced by `char::encode_utf8`.
                let s = String::from_utf8(out).expect("string scanner only emits valid UTF-8");
                return Ok((s.into_boxed_str(), i + 1));
            }
            b'\\' => {
                i += parse_escape(&bytes[i..], &mut out, i)?;
            }
            0x00..=0x1F => return Err(err(DecodeErrorKind::ControlCharacterInString, i)),
            0x00..=0x7F => {
                out.push(b);
                i += 1;
            }
            _ => match utf8::decode_one(&bytes[i..]) {
                Ok((_, len)) => {
                    out.extend_from_slice(&bytes[i..i + len]);
                    i += len;
                }
                Err(()) => return Err(err(DecodeErrorKind::InvalidUtf8, i)),
            },
        }
    }
}

/// Parses one escape sequence starting at `run[0] == b'\\'`. Returns the
/// number of bytes of `run` consumed. `base` is only used to produce
/// correctly-offset errors.
fn parse_escape(run: &[u8], out: &mut Vec<u8>, base: usize) -> Result<usize, StringError> {
    let Some(&kind) = run.get(1) else {
        return Err(err(DecodeErrorKind::TruncatedEscape, base));
    };

    match kind {
        b'"' => {
            out.push(b'"');
            Ok(2)
        }
        b'\\' => {
            out.push(b'\\');
            Ok(2)
        }
        b'/' => {
            out.push(b'/');
            Ok(2)
        }
        b'b' => {
            out.push(0x08);
            Ok(2)
        }
        b'f' => {
            out.push(0x0C);
            Ok(2)
        }
        b'n' => {
            out.push(b'\n');
            Ok(2)
        }
        b'r' => {
            out.push(b'\r');
            Ok(2)
        }
        b't' => {
            out.push(b'\t');
            Ok(2)
        }
        b'u' => parse_unicode_escape(run, out, base),
        _ => Err(err(DecodeErrorKind::InvalidEscape, base)),
    }
}

fn read_hex4(run: &[u8], offset: usize) -> Result<u16, StringError> {
    let digits = run
        .get(offset..offset + 4)
        .ok_or_else(|| err(DecodeErrorKind::TruncatedEscape, offset))?;
    let text = core::str::from_utf8(digits).map_err(|_| err(DecodeErrorKind::InvalidEscape, offset))?;
    u16::from_str_radix(text, 16).map_err(|_| err(DecodeErrorKind::InvalidEscape, offset))
}

/// Parses `\uXXXX`, and, when it decodes to a high surrogate, the mandatory
/// following `\uXXXX` low surrogate, combining the pair into one
/// supplementary-plane scalar.
fn parse_unicode_escape(run: &[u8], out: &mut Vec<u8>, base: usize) -> Result<usize, StringError> {
    let unit = read_hex4(run, 2)?;

    if (0xD800..=0xDBFF).contains(&unit) {
        // High surrogate: the next two bytes must be `\u` followed by a
        // low surrogate.
        if run.get(6) != Some(&b'\\') || run.get(7) != Some(&b'u') {
            return Err(err(DecodeErrorKind::LoneSurrogate, base));
        }
        let low = read_hex4(run, 8)?;
        if !(0xDC00..=0xDFFF).contains(&low) {
            return Err(err(DecodeErrorKind::LoneSurrogate, base));
        }
        let cp = 0x10000u32
            + (u32::from(unit) - 0xD800) * 0x400
            + (u32::from(low) - 0xDC00);
        let c = char::from_u32(cp).expect("surrogate pair decodes to a valid scalar value");
        let mut buf = [0u8; 4];
        out.extend_from_slice(c.encode_utf8(&mut buf).as_bytes());
        Ok(12)
    } else if (0xDC00..=0xDFFF).contains(&unit) {
        // A low surrogate with no preceding high surrogate.
        Err(err(DecodeErrorKind::LoneSurrogate, base))
    } else {
        let c = char::from_u32(u32::from(unit)).expect("non-surrogate BMP code unit is a scalar value");
        let mut buf = [0u8; 4];
        out.extend_from_slice(c.encode_utf8(&mut buf).as_bytes());
        Ok(6)
    }
}

/// Returns `true` if `b` needs no escaping when emitted (the fast-path
/// predicate): not a control character, not `"`, not `\`.
#[inline]
fn needs_escape(b: u8) -> bool {
    b < 0x20 || b == b'"' || b == b'\\'
}

/// Writes `s` as a JSON string literal, including the surrounding quotes.
///
/// A byte run containing no byte satisfying [`needs_escape`] is copied
/// verbatim (the fast path below); this includes the raw 3-byte UTF-8
/// encodings of U+2028/U+2029, which this codec deliberately does **not**
/// escape.
pub(crate) fn write_escaped(out: &mut Vec<u8>, s: &str) {
    out.push(b'"');
    let bytes = s.as_bytes();
    let mut run_start = 0;
    let mut i = 0;
    while i < bytes.len() {
        let b = bytes[i];
        if needs_escape(b) {
            out.extend_from_slice(&bytes[run_start..i]);
            match b {
                b'"' => out.extend_from_slice(b"\\\""),
                b'\\' => out.extend_from_slice(b"\\\\"),
                0x08 => out.extend_from_slice(b"\\b"),
                0x0C => out.extend_from_slice(b"\\f"),
                b'\n' => out.extend_from_slice(b"\\n"),
                b'\r' => out.extend_from_slice(b"\\r"),
                b'\t' => out.extend_from_slice(b"\\t"),
                c => {
                    out.extend_from_slice(format!("\\u{c:04x}").as_bytes());
                }
            }
            i += 1;
            run_start = i;
        } else {
            i += 1;
        }
    }
    out.extend_from_slice(&bytes[run_start..]);
    out.push(b'"');
}

#[cfg(test)]
mod tests {
    use super::{parse, write_escaped};

    fn decode(s: &str) -> String {
        let (out, end) = parse(s.as_bytes()).unwrap();
        assert_eq!(end, s.len());
        out.into()
    }

    fn encode(s: &str) -> String {
        let mut out = Vec::new();
        write_escaped(&mut out, s);
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn parses_plain_ascii() {
        assert_eq!(decode(r#"hello""#), "hello");
    }

    #[test]
    fn parses_basic_escapes() {
        assert_eq!(decode(r#"a\"b\\c\/d\be\ff\ng\rh\ti""#), "a\"b\\c/d\u{8}e\u{c}f\ng\rh\ti");
    }

    #[test]
    fn parses_unicode_escape() {
        assert_eq!(decode(r"Aé\""), "A\u{e9}");
    }

    #[test]
    fn parses_surrogate_pair() {
        // U+1F600 = D83D DE00
        assert_eq!(decode(r#"😀""#), "\u{1F600}");
    }

    #[test]
    fn rejects_lone_high_surrogate() {
        assert!(parse(r#"\ud83d""#.as_bytes()).is_err());
    }

    #[test]
    fn rejects_lone_low_surrogate() {
        assert!(parse(r#"\ude00""#.as_bytes()).is_err());
    }

    #[test]
    fn rejects_raw_control_character() {
        let bytes = [0x01, b'"'];
        assert!(parse(&bytes).is_err());
    }

    #[test]
    fn passes_through_embedded_utf8() {
        assert_eq!(decode("caf\u{e9}\""), "caf\u{e9}");
    }

    #[test]
    fn encode_escapes_control_and_quote_and_backslash() {
        assert_eq!(encode("\x01\x1f"), "\"\\u0001\\u001f\"");
        assert_eq!(encode("a\"b\\c"), r#""a\"b\\c""#);
    }

    #[test]
    fn encode_passes_through_line_separators() {
        let encoded = encode("\u{2028} \u{2029}");
        assert_eq!(encoded.as_bytes(), b"\"\xe2\x80\xa8 \xe2\x80\xa9\"");
    }

    #[test]
    fn encode_uses_short_escapes() {
        assert_eq!(encode("\u{8}\u{c}\n\r\t"), r#""\b\f\n\r\t""#);
    }
}
