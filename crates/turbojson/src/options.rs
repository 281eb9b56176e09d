use crate::error::{EncodeError, EncodeErrorKind};

/// Encoder option flags.
///
/// These are a `Copy` bit field, not a struct of `bool`s: the underlying
/// representation is a single integer so options can travel across an FFI
/// boundary as one word. [`Options::from_bits`] builds a validated
/// [`Options`] from that raw integer for callers who only have the word;
/// [`crate::encode`] itself takes the validated type directly.
///
/// # Examples
///
/// ```rust
/// use turbojson::Options;
///
/// let opts = Options::SORT_KEYS | Options::INDENT_2;
/// assert!(opts.contains(Options::SORT_KEYS));
/// assert!(!opts.contains(Options::APPEND_NEWLINE));
/// ```
///
/// # Default
///
/// All bits clear (compact output, no adapters).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Options(u16);

impl Options {
    /// Assume naive datetimes are UTC.
    pub const NAIVE_UTC: Options = Options(1 << 0);
    /// Truncate sub-second digits.
    pub const OMIT_MICROSECONDS: Options = Options(1 << 1);
    /// Enable the numeric-array adapter.
    pub const SERIALIZE_NUMPY: Options = Options(1 << 2);
    /// Reject integers outside +/-(2^53-1) for values (not keys).
    pub const STRICT_INTEGER: Options = Options(1 << 3);
    /// Refuse to auto-serialize subclass-like values; route to fallback.
    ///
    /// This crate has no subclassing concept, so the bit is accepted for
    /// layout compatibility but has no observable effect.
    pub const PASSTHROUGH_SUBCLASS: Options = Options(1 << 4);
    /// Route calendar values to the fallback hook (but keys are still
    /// ISO-formatted).
    pub const PASSTHROUGH_DATETIME: Options = Options(1 << 5);
    /// Lexicographic object key order on emit.
    pub const SORT_KEYS: Options = Options(1 << 6);
    /// Two-space indented output.
    pub const INDENT_2: Options = Options(1 << 7);
    /// Permit non-string object keys, stringified on encode.
    pub const NON_STR_KEYS: Options = Options(1 << 8);
    /// Emit a UTC offset as `Z` rather than `+00:00`.
    pub const UTC_Z: Options = Options(1 << 9);
    /// Append `\n` after the final byte.
    pub const APPEND_NEWLINE: Options = Options(1 << 10);

    /// Highest bit position that is part of the option word; bit 11 and
    /// above are rejected.
    const MAX_BITS: u16 = (1 << 11) - 1;

    /// Validates a raw bit field: any bit at position 11 or above set is
    /// [`EncodeErrorKind::BadOption`].
    pub fn from_bits(bits: u32) -> Result<Self, EncodeError> {
        if bits > u32::from(Self::MAX_BITS) {
            return Err(EncodeError::new(EncodeErrorKind::BadOption(bits)));
        }
        #[expect(
            clippy::cast_possible_truncation,
            reason = "bits was just checked to fit in 11 bits"
        )]
        Ok(Options(bits as u16))
    }

    /// Returns the raw bit field.
    #[must_use]
    pub fn bits(self) -> u16 {
        self.0
    }

    /// Returns `true` if every bit set in `flag` is also set in `self`.
    #[must_use]
    pub fn contains(self, flag: Options) -> bool {
        self.0 & flag.0 == flag.0
    }
}

impl core::ops::BitOr for Options {
    type Output = Options;

    fn bitor(self, rhs: Options) -> Options {
        Options(self.0 | rhs.0)
    }
}

impl core::ops::BitOrAssign for Options {
    fn bitor_assign(&mut self, rhs: Options) {
        self.0 |= rhs.0;
    }
}

#[cfg(test)]
mod tests {
    use super::Options;
    use crate::error::EncodeErrorKind;

    #[test]
    fn default_is_empty() {
        assert_eq!(Options::default().bits(), 0);
    }

    #[test]
    fn contains_checks_all_bits() {
        let opts = Options::SORT_KEYS | Options::INDENT_2;
        assert!(opts.contains(Options::SORT_KEYS));
        assert!(opts.contains(Options::INDENT_2));
        assert!(!opts.contains(Options::UTC_Z));
        assert!(opts.contains(Options::SORT_KEYS | Options::INDENT_2));
    }

    #[test]
    fn from_bits_accepts_full_range() {
        assert_eq!(Options::from_bits(0).unwrap().bits(), 0);
        assert_eq!(Options::from_bits(0b111_1111_1111).unwrap().bits(), 0x7FF);
    }

    #[test]
    fn from_bits_rejects_bit_11_and_above() {
        let err = Options::from_bits(1 << 11).unwrap_err();
        assert_eq!(err.kind, EncodeErrorKind::BadOption(1 << 11));
    }
}
