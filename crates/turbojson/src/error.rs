use thiserror::Error;

/// An error raised by [`crate::decode`].
///
/// Carries a human-readable reason plus the byte offset where the problem
/// was found, together with a derived 1-based line/column for diagnostics.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("{kind} at byte {offset} (line {line}, column {column})")]
pub struct DecodeError {
    pub kind: DecodeErrorKind,
    pub offset: usize,
    pub line: usize,
    pub column: usize,
}

impl DecodeError {
    pub(crate) fn new(kind: DecodeErrorKind, offset: usize, line: usize, column: usize) -> Self {
        Self {
            kind,
            offset,
            line,
            column,
        }
    }
}

/// The distinct kinds of decode failure.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeErrorKind {
    #[error("unexpected token")]
    UnexpectedToken,
    #[error("truncated escape sequence")]
    TruncatedEscape,
    #[error("invalid escape sequence")]
    InvalidEscape,
    #[error("control character in string")]
    ControlCharacterInString,
    #[error("lone surrogate in \\u escape")]
    LoneSurrogate,
    #[error("invalid UTF-8 byte sequence")]
    InvalidUtf8,
    #[error("number out of range")]
    NumberOutOfRange,
    #[error("maximum nesting depth ({} levels) exceeded", crate::MAX_DEPTH)]
    RecursionLimit,
    #[error("unexpected end of input")]
    UnexpectedEof,
    #[error("trailing garbage after top-level value")]
    TrailingGarbage,
    #[error("object keys must be strings")]
    ExpectedStringKey,
    /// Unreachable through the safe API: `decode` only accepts byte-like
    /// input at compile time. Kept for parity with bindings that accept a
    /// dynamically typed input.
    #[error("input is not a byte-like value")]
    WrongInputType,
}

/// An error raised by [`crate::encode`].
#[derive(Debug, Clone, PartialEq, Error)]
#[error("{kind}")]
pub struct EncodeError {
    pub kind: EncodeErrorKind,
}

impl EncodeError {
    pub(crate) fn new(kind: EncodeErrorKind) -> Self {
        Self { kind }
    }
}

/// The distinct kinds of encode failure.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EncodeErrorKind {
    #[error("unsupported type: {0}")]
    UnsupportedType(String),
    #[error("circular reference detected")]
    CircularReference,
    #[error("string is not valid UTF-8")]
    InvalidUtf8String,
    #[error("invalid object key")]
    InvalidKey,
    #[error("integer {0} exceeds the strict-integer range of +/-(2^53-1)")]
    StrictIntegerViolation(i128),
    #[error("fallback function returned an unsupported type")]
    FallbackUnknownType,
    #[error("option flags out of range: {0}")]
    BadOption(u32),
}
