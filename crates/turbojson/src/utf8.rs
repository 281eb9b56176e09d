//! UTF-8 validation and scalar decoding.
//!
//! This module is the lowest layer of the codec: it never sees JSON syntax,
//! only bytes. It exists because the parser validates UTF-8 incrementally
//! as it scans string payloads (rather than as a separate whole-input
//! pre-pass — most documents are ASCII-dominated, and a pre-pass would
//! re-walk bytes the string scanner is about to walk again anyway), and
//! because a standalone `[u8]` is not guaranteed UTF-8 the way a Rust `&str`
//! is.
//!
//! Rejects: 5/6-byte lead bytes, overlong two/three/four-byte
//! encodings, code points above `U+10FFFF`, and unpaired surrogates
//! (`U+D800`..=`U+DFFF`). A leading byte-order mark is treated as ordinary
//! data, never stripped or special-cased here.

/// Decodes the scalar value starting at `bytes[0]`.
///
/// Returns the scalar and the number of bytes it occupies (1-4). Returns
/// `Err(())` if `bytes[0]` does not begin a valid, non-overlong,
/// non-surrogate UTF-8 sequence that fits within the remaining bytes.
#[inline]
pub(crate) fn decode_one(bytes: &[u8]) -> Result<(char, usize), ()> {
    let b0 = *bytes.first().ok_or(())?;

    if b0 < 0x80 {
        // SAFETY: any byte < 0x80 is a valid Unicode scalar value.
        return Ok((b0 as char, 1));
    }

    let (len, b1_range): (usize, core::ops::RangeInclusive<u8>) = match b0 {
        0xC2..=0xDF => (2, 0x80..=0xBF),
        0xE0 => (3, 0xA0..=0xBF),
        0xE1..=0xEC | 0xEE..=0xEF => (3, 0x80..=0xBF),
        // 0xED leads a surrogate range (U+D800..=U+DFFF) unless the second
        // byte is restricted to 0x80..=0x9F, which caps the code point at
        // U+DFFF's low boundary minus the surrogate block itself.
        0xED => (3, 0x80..=0x9F),
        0xF0 => (4, 0x90..=0xBF),
        0xF1..=0xF3 => (4, 0x80..=0xBF),
        0xF4 => (4, 0x80..=0x8F),
        // 0x80..=0xC1: stray continuation byte or overlong two-byte lead.
        // 0xF5..=0xFF: would require a 5/6-byte sequence or code point
        // beyond U+10FFFF.
        _ => return Err(()),
    };

    if bytes.len() < len {
        return Err(());
    }
    let b1 = bytes[1];
    if !b1_range.contains(&b1) {
        return Err(());
    }
    for &b in &bytes[2..len] {
        if !(0x80..=0xBF).contains(&b) {
            return Err(());
        }
    }

    let cp: u32 = match len {
        2 => (u32::from(b0 & 0x1F) << 6) | u32::from(b1 & 0x3F),
        3 => {
            (u32::from(b0 & 0x0F) << 12) | (u32::from(b1 & 0x3F) << 6) | u32::from(bytes[2] & 0x3F)
        }
        4 => {
            (u32::from(b0 & 0x07) << 18)
                | (u32::from(b1 & 0x3F) << 12)
                | (u32::from(bytes[2] & 0x3F) << 6)
                | u32::from(bytes[3] & 0x3F)
        }
        _ => unreachable!("len is always 2, 3, or 4"),
    };

    char::from_u32(cp).map(|c| (c, len)).ok_or(())
}

/// Validates that `bytes` is entirely well-formed UTF-8 by this module's
/// (strict) rules. Returns the byte offset of the first violation on
/// failure.
pub(crate) fn validate(bytes: &[u8]) -> Result<(), usize> {
    let mut i = 0;
    while i < bytes.len() {
        match decode_one(&bytes[i..]) {
            Ok((_, len)) => i += len,
            Err(()) => return Err(i),
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{decode_one, validate};

    #[test]
    fn ascii_round_trips() {
        assert_eq!(decode_one(b"A"), Ok(('A', 1)));
    }

    #[test]
    fn two_byte_sequence() {
        // U+00E9 (é) = 0xC3 0xA9
        assert_eq!(decode_one(&[0xC3, 0xA9]), Ok(('\u{E9}', 2)));
    }

    #[test]
    fn three_byte_sequence() {
        // U+2028 (LINE SEPARATOR) = 0xE2 0x80 0xA8
        assert_eq!(decode_one(&[0xE2, 0x80, 0xA8]), Ok(('\u{2028}', 3)));
    }

    #[test]
    fn four_byte_sequence() {
        // U+1F600 (grinning face) = 0xF0 0x9F 0x98 0x80
        assert_eq!(decode_one(&[0xF0, 0x9F, 0x98, 0x80]), Ok(('\u{1F600}', 4)));
    }

    #[test]
    fn rejects_overlong_two_byte() {
        // 0xC0 0x80 would overlong-encode U+0000.
        assert_eq!(decode_one(&[0xC0, 0x80]), Err(()));
        assert_eq!(decode_one(&[0xC1, 0xBF]), Err(()));
    }

    #[test]
    fn rejects_overlong_three_byte() {
        assert_eq!(decode_one(&[0xE0, 0x80, 0x80]), Err(()));
    }

    #[test]
    fn rejects_overlong_four_byte() {
        assert_eq!(decode_one(&[0xF0, 0x80, 0x80, 0x80]), Err(()));
    }

    #[test]
    fn rejects_surrogates() {
        // U+D800 would be encoded 0xED 0xA0 0x80.
        assert_eq!(decode_one(&[0xED, 0xA0, 0x80]), Err(()));
        // U+DFFF would be encoded 0xED 0xBF 0xBF.
        assert_eq!(decode_one(&[0xED, 0xBF, 0xBF]), Err(()));
    }

    #[test]
    fn rejects_beyond_max_scalar() {
        // 0xF4 0x90 0x80 0x80 would decode to U+110000, past U+10FFFF.
        assert_eq!(decode_one(&[0xF4, 0x90, 0x80, 0x80]), Err(()));
    }

    #[test]
    fn rejects_five_and_six_byte_leads() {
        assert_eq!(decode_one(&[0xF8, 0x80, 0x80, 0x80, 0x80]), Err(()));
        assert_eq!(decode_one(&[0xFC, 0x80, 0x80, 0x80, 0x80, 0x80]), Err(()));
    }

    #[test]
    fn rejects_stray_continuation() {
        assert_eq!(decode_one(&[0x80]), Err(()));
    }

    #[test]
    fn validate_reports_offset() {
        let mut bytes = b"hello ".to_vec();
        bytes.push(0xFF);
        assert_eq!(validate(&bytes), Err(6));
    }

    #[test]
    fn validate_accepts_bom_as_data() {
        // U+FEFF BOM, encoded as data, is ordinary valid UTF-8 here.
        assert_eq!(validate(&[0xEF, 0xBB, 0xBF, b'x']), Ok(()));
    }
}
