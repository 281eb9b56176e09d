//! A high-performance JSON decode/encode engine.
//!
//! `turbojson` turns a JSON text into an in-memory [`Value`] tree
//! ([`decode`]) and turns a `Value` tree back into compact or indented JSON
//! bytes ([`encode`]). Unlike a streaming parser, both operations work over
//! a complete document in a single call: there is no incremental/partial
//! mode, no schema validation, and no comment or trailing-comma support.
//!
//! # Example
//!
//! ```
//! use turbojson::{decode, encode, Options};
//!
//! let value = decode(br#"{"b":1,"a":2}"#).unwrap();
//! let bytes = encode(&value, None, Options::SORT_KEYS).unwrap();
//! assert_eq!(bytes, br#"{"a":2,"b":1}"#);
//! ```

mod error;
mod number;
mod options;
mod parser;
mod serializer;
mod string;
mod utf8;
mod value;

#[cfg(feature = "adapters")]
pub mod adapters;

pub use error::{DecodeError, DecodeErrorKind, EncodeError, EncodeErrorKind};
pub use options::Options;
pub use parser::decode;
pub use serializer::{encode, Fallback};
pub use value::{Array, Key, Map, Value};

/// Maximum nesting depth accepted by both [`decode`] and [`encode`].
///
/// Exceeding this depth during decode is [`DecodeErrorKind::RecursionLimit`];
/// exceeding it during encode (which can only happen through a pathological
/// fallback hook, since ordinary `Value` trees are finite and built
/// top-down) is [`EncodeErrorKind::CircularReference`].
pub const MAX_DEPTH: usize = 1024;
