//! JSON value types.
//!
//! This module defines the [`Value`] enum, which represents any value this
//! crate can decode or encode, and the [`Key`] enum used for object keys
//! under `NON_STR_KEYS`.
use indexmap::IndexMap;

/// An ordered JSON object: insertion order is preserved, and re-inserting an
/// existing key replaces its value **in place** without moving it to the
/// end (see [`indexmap::IndexMap::insert`], which already has exactly this
/// behavior — this is what gives decode its duplicate-key
/// replace-in-place rule for free).
pub type Map = IndexMap<Key, Value>;

/// A JSON array.
pub type Array = Vec<Value>;

/// An object key.
///
/// `decode` only ever produces [`Key::Str`]. The other variants exist so
/// that a caller can build a `Value::Object` with non-string keys in Rust
/// and have [`crate::encode`] stringify them when `NON_STR_KEYS` is set;
/// without that option, any non-`Str` key is an
/// [`crate::EncodeErrorKind::InvalidKey`] error.
#[derive(Debug, Clone)]
pub enum Key {
    Str(Box<str>),
    Int(i64),
    UInt(u64),
    /// Must be finite to be meaningful as a map key; a non-finite float
    /// *value* stringifies to `"null"` regardless.
    Float(f64),
    Bool(bool),
    #[cfg(feature = "adapters")]
    DateTime(crate::adapters::Calendar),
    #[cfg(feature = "adapters")]
    Uuid(uuid::Uuid),
}

impl From<&str> for Key {
    fn from(s: &str) -> Self {
        Key::Str(s.into())
    }
}

impl From<String> for Key {
    fn from(s: String) -> Self {
        Key::Str(s.into_boxed_str())
    }
}

impl PartialEq for Key {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Key::Str(a), Key::Str(b)) => a == b,
            (Key::Int(a), Key::Int(b)) => a == b,
            (Key::UInt(a), Key::UInt(b)) => a == b,
            (Key::Float(a), Key::Float(b)) => a.to_bits() == b.to_bits(),
            (Key::Bool(a), Key::Bool(b)) => a == b,
            #[cfg(feature = "adapters")]
            (Key::DateTime(a), Key::DateTime(b)) => a == b,
            #[cfg(feature = "adapters")]
            (Key::Uuid(a), Key::Uuid(b)) => a == b,
            _ => false,
        }
    }
}

impl Eq for Key {}

impl core::hash::Hash for Key {
    fn hash<H: core::hash::Hasher>(&self, state: &mut H) {
        core::mem::discriminant(self).hash(state);
        match self {
            Key::Str(s) => s.hash(state),
            Key::Int(i) => i.hash(state),
            Key::UInt(u) => u.hash(state),
            Key::Float(f) => f.to_bits().hash(state),
            Key::Bool(b) => b.hash(state),
            #[cfg(feature = "adapters")]
            Key::DateTime(d) => d.hash(state),
            #[cfg(feature = "adapters")]
            Key::Uuid(u) => u.hash(state),
        }
    }
}

/// A JSON value, extended with the option-gated adapter kinds and a single
/// escape-hatch variant that drives the fallback hook.
///
/// The first eight variants are the only ones `decode` ever produces;
/// `Array`/`Object` are recursive so a decoded tree is built bottom-up and
/// owned outright by the caller.
#[derive(Debug, Clone)]
pub enum Value {
    Null,
    Bool(bool),
    /// An integer in `[-2^63, 2^63)`.
    Int(i64),
    /// An integer in `[2^63, 2^64)`; never produced for values that also
    /// fit in `Int`.
    UInt(u64),
    /// A finite or non-finite IEEE-754 binary64. Non-finite values are
    /// legal to *construct* (e.g. as the result of arithmetic before
    /// encoding) but are folded to the JSON literal `null` on encode and
    /// are never produced by decode.
    Float(f64),
    Str(Box<str>),
    Array(Array),
    Object(Map),

    /// A calendar value (datetime/date/time), encode-only.
    #[cfg(feature = "adapters")]
    DateTime(crate::adapters::Calendar),
    /// A UUID, formatted as canonical lowercase hyphenated hex.
    #[cfg(feature = "adapters")]
    Uuid(uuid::Uuid),
    /// A contiguous, row-major numeric array, encode-only.
    #[cfg(feature = "adapters")]
    NdArray(crate::adapters::NumericArray),
    /// Pre-validated JSON bytes copied verbatim. The author of a
    /// `Fragment` is responsible for its validity; this crate does not
    /// re-validate it.
    #[cfg(feature = "adapters")]
    Fragment(crate::adapters::Fragment),

    /// A value of a kind this crate has no native representation for.
    ///
    /// Exists purely to exercise the fallback hook in this FFI-free
    /// crate: there is no foreign object model to translate, so
    /// `Opaque` stands in for "a host value of unknown type" by carrying an
    /// arbitrary `Any` payload a [`crate::Fallback`] can downcast and
    /// replace with a representable `Value`.
    Opaque(Opaque),
}

/// An opaque, type-erased payload. See [`Value::Opaque`].
pub struct Opaque(pub Box<dyn std::any::Any>);

impl std::fmt::Debug for Opaque {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("Opaque(..)")
    }
}

impl Clone for Opaque {
    fn clone(&self) -> Self {
        // `Any` payloads are not generally cloneable; an `Opaque` that flows
        // back through `encode` a second time (e.g. via a misbehaving
        // fallback) is re-wrapped as an empty stand-in, which again routes
        // to the fallback hook (or errors) rather than panicking.
        Opaque(Box::new(()))
    }
}

impl Default for Value {
    fn default() -> Self {
        Self::Null
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Self::Int(v)
    }
}

impl From<u64> for Value {
    fn from(v: u64) -> Self {
        Self::UInt(v)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Self::Float(v)
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Self::Str(v.into_boxed_str())
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Self::Str(v.into())
    }
}

impl From<Vec<Value>> for Value {
    fn from(v: Vec<Value>) -> Self {
        Self::Array(v)
    }
}

impl From<Map> for Value {
    fn from(v: Map) -> Self {
        Self::Object(v)
    }
}

impl Value {
    /// Returns `true` if the value is [`Value::Null`].
    #[must_use]
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Returns `true` if the value is [`Value::Bool`].
    #[must_use]
    pub fn is_bool(&self) -> bool {
        matches!(self, Self::Bool(..))
    }

    /// Returns `true` if the value is a number ([`Value::Int`],
    /// [`Value::UInt`], or [`Value::Float`]).
    #[must_use]
    pub fn is_number(&self) -> bool {
        matches!(self, Self::Int(..) | Self::UInt(..) | Self::Float(..))
    }

    /// Returns `true` if the value is [`Value::Str`].
    #[must_use]
    pub fn is_string(&self) -> bool {
        matches!(self, Self::Str(..))
    }

    /// Returns `true` if the value is [`Value::Array`].
    #[must_use]
    pub fn is_array(&self) -> bool {
        matches!(self, Self::Array(..))
    }

    /// Returns `true` if the value is [`Value::Object`].
    #[must_use]
    pub fn is_object(&self) -> bool {
        matches!(self, Self::Object(..))
    }

    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Str(s) => Some(s),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_array(&self) -> Option<&Array> {
        match self {
            Self::Array(a) => Some(a),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_object(&self) -> Option<&Map> {
        match self {
            Self::Object(m) => Some(m),
            _ => None,
        }
    }
}

/// Structural equality over values.
///
/// `Float` compares by IEEE bit pattern via `to_bits`, consistent with
/// [`Key`]'s comparison, so `NaN`-carrying values compare equal to
/// themselves rather than never-equal as `==` on raw `f64` would give.
/// Decoded values never carry non-finite floats, so this only matters for
/// trees built directly through the API.
impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Null, Value::Null) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Int(a), Value::Int(b)) => a == b,
            (Value::UInt(a), Value::UInt(b)) => a == b,
            (Value::Float(a), Value::Float(b)) => a.to_bits() == b.to_bits(),
            (Value::Str(a), Value::Str(b)) => a == b,
            (Value::Array(a), Value::Array(b)) => a == b,
            (Value::Object(a), Value::Object(b)) => a == b,
            #[cfg(feature = "adapters")]
            (Value::DateTime(a), Value::DateTime(b)) => a == b,
            #[cfg(feature = "adapters")]
            (Value::Uuid(a), Value::Uuid(b)) => a == b,
            #[cfg(feature = "adapters")]
            (Value::Fragment(a), Value::Fragment(b)) => a == b,
            _ => false,
        }
    }
}
