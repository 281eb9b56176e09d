//! Typed-visitor serializer.

use crate::error::{EncodeError, EncodeErrorKind};
use crate::number;
use crate::options::Options;
use crate::string;
use crate::value::{Key, Value};
use crate::MAX_DEPTH;

/// A caller-supplied hook invoked when the serializer meets a value it has
/// no native representation for (in this crate, [`Value::Opaque`]). The
/// returned value is serialized once; if it is itself unrepresentable, the
/// call fails with [`EncodeErrorKind::FallbackUnknownType`].
pub type Fallback<'a> = dyn FnMut(&Value) -> Result<Value, EncodeError> + 'a;

/// Encodes `value` as JSON bytes under `options`.
///
/// `fallback`, when present, is invoked for any value this crate cannot
/// natively represent.
pub fn encode<'a>(
    value: &Value,
    fallback: Option<&'a mut Fallback<'a>>,
    options: Options,
) -> Result<Vec<u8>, EncodeError> {
    let mut ser = Serializer {
        out: Vec::with_capacity(128),
        options,
        fallback,
        ancestors: Vec::new(),
        depth: 0,
        indent_level: 0,
    };
    ser.write_value(value, false)?;
    if options.contains(Options::APPEND_NEWLINE) {
        ser.out.push(b'\n');
    }
    Ok(ser.out)
}

struct Serializer<'a> {
    out: Vec<u8>,
    options: Options,
    fallback: Option<&'a mut Fallback<'a>>,
    /// Pointer identity of the non-empty containers (`Array`/`Object` heap
    /// allocations) currently being emitted, for cycle detection. A `Value`
    /// tree owns its children outright, so a genuine cycle can't arise from
    /// ordinary decode/construct; this only guards a fallback hook that
    /// hands back a value aliasing one of its own ancestors.
    ancestors: Vec<usize>,
    /// Nesting depth of the container currently being emitted, counted
    /// whether or not it is empty. Caps recursion the same way `enter()`
    /// does on the decode side, so a pathologically deep all-empty-
    /// container tree built directly through the API can't blow the stack.
    depth: usize,
    indent_level: usize,
}

/// Returns a stable identity for a container's backing allocation, or
/// `None` for an empty container (nothing to alias against).
fn container_ptr<T>(items: &[T]) -> Option<usize> {
    if items.is_empty() {
        None
    } else {
        Some(items.as_ptr() as usize)
    }
}

impl<'a> Serializer<'a> {
    fn write_indent(&mut self) {
        if self.options.contains(Options::INDENT_2) {
            self.out.push(b'\n');
            for _ in 0..self.indent_level {
                self.out.extend_from_slice(b"  ");
            }
        }
    }

    fn write_value(&mut self, value: &Value, fallback_reentry: bool) -> Result<(), EncodeError> {
        match value {
            Value::Null => self.out.extend_from_slice(b"null"),
            Value::Bool(true) => self.out.extend_from_slice(b"true"),
            Value::Bool(false) => self.out.extend_from_slice(b"false"),
            Value::Int(v) => {
                if self.options.contains(Options::STRICT_INTEGER)
                    && !number::fits_strict_integer(i128::from(*v))
                {
                    return Err(EncodeError::new(EncodeErrorKind::StrictIntegerViolation(
                        i128::from(*v),
                    )));
                }
                number::write_int(&mut self.out, *v);
            }
            Value::UInt(v) => {
                if self.options.contains(Options::STRICT_INTEGER)
                    && !number::fits_strict_integer(i128::from(*v))
                {
                    return Err(EncodeError::new(EncodeErrorKind::StrictIntegerViolation(
                        i128::from(*v),
                    )));
                }
                number::write_uint(&mut self.out, *v);
            }
            Value::Float(v) => number::write_float(&mut self.out, *v),
            Value::Str(s) => string::write_escaped(&mut self.out, s),
            Value::Array(items) => self.write_array(items)?,
            Value::Object(map) => self.write_object(map)?,
            #[cfg(feature = "adapters")]
            Value::DateTime(cal) => {
                let text = crate::adapters::calendar::format(cal, self.options)?;
                string::write_escaped(&mut self.out, &text);
            }
            #[cfg(feature = "adapters")]
            Value::Uuid(u) => {
                let mut buf = uuid::Uuid::encode_buffer();
                let text = u.hyphenated().encode_lower(&mut buf);
                string::write_escaped(&mut self.out, text);
            }
            #[cfg(feature = "adapters")]
            Value::NdArray(arr) => crate::adapters::ndarray::write(&mut self.out, arr, self.options)?,
            #[cfg(feature = "adapters")]
            Value::Fragment(frag) => self.out.extend_from_slice(frag.as_bytes()),
            Value::Opaque(_) => {
                if fallback_reentry {
                    return Err(EncodeError::new(EncodeErrorKind::FallbackUnknownType));
                }
                let replacement = match self.fallback.as_deref_mut() {
                    Some(f) => f(value)?,
                    None => {
                        return Err(EncodeError::new(EncodeErrorKind::UnsupportedType(
                            "Opaque".to_string(),
                        )))
                    }
                };
                self.write_value(&replacement, true)?;
            }
        }
        Ok(())
    }

    fn enter(&mut self, ptr: Option<usize>) -> Result<(), EncodeError> {
        self.depth += 1;
        if self.depth > MAX_DEPTH {
            return Err(EncodeError::new(EncodeErrorKind::CircularReference));
        }
        if let Some(p) = ptr {
            if self.ancestors.contains(&p) {
                return Err(EncodeError::new(EncodeErrorKind::CircularReference));
            }
            self.ancestors.push(p);
        }
        Ok(())
    }

    fn exit(&mut self, ptr: Option<usize>) {
        self.depth -= 1;
        if ptr.is_some() {
            self.ancestors.pop();
        }
    }

    fn write_array(&mut self, items: &[Value]) -> Result<(), EncodeError> {
        let ptr = container_ptr(items);
        self.enter(ptr)?;

        if items.is_empty() {
            self.out.extend_from_slice(b"[]");
            self.exit(ptr);
            return Ok(());
        }

        self.out.push(b'[');
        self.indent_level += 1;
        for (i, item) in items.iter().enumerate() {
            if i > 0 {
                self.out.push(b',');
            }
            self.write_indent();
            self.write_value(item, false)?;
        }
        self.indent_level -= 1;
        self.write_indent();
        self.out.push(b']');

        self.exit(ptr);
        Ok(())
    }

    fn write_object(&mut self, map: &crate::value::Map) -> Result<(), EncodeError> {
        // `IndexMap`'s heap allocation is reused across clones-of-reference,
        // so its key-array pointer is a stable enough identity for the
        // lifetime of this call.
        let ptr = if map.is_empty() {
            None
        } else {
            Some(map.as_slice().as_ptr() as usize)
        };
        self.enter(ptr)?;

        if map.is_empty() {
            self.out.extend_from_slice(b"{}");
            self.exit(ptr);
            return Ok(());
        }

        let mut entries: Vec<(String, &Value)> = Vec::with_capacity(map.len());
        for (k, v) in map {
            entries.push((self.stringify_key(k)?, v));
        }

        if self.options.contains(Options::SORT_KEYS) {
            entries.sort_by(|a, b| a.0.as_bytes().cmp(b.0.as_bytes()));
        }

        self.out.push(b'{');
        self.indent_level += 1;
        for (i, (key, value)) in entries.iter().enumerate() {
            if i > 0 {
                self.out.push(b',');
            }
            self.write_indent();
            string::write_escaped(&mut self.out, key);
            if self.options.contains(Options::INDENT_2) {
                self.out.extend_from_slice(b": ");
            } else {
                self.out.push(b':');
            }
            self.write_value(value, false)?;
        }
        self.indent_level -= 1;
        self.write_indent();
        self.out.push(b'}');

        self.exit(ptr);
        Ok(())
    }

    fn stringify_key(&self, key: &Key) -> Result<String, EncodeError> {
        match key {
            Key::Str(s) => Ok(s.to_string()),
            Key::Int(v) => {
                if !self.options.contains(Options::NON_STR_KEYS) {
                    return Err(EncodeError::new(EncodeErrorKind::InvalidKey));
                }
                let mut buf = Vec::new();
                number::write_int(&mut buf, *v);
                Ok(String::from_utf8(buf).expect("itoa output is ASCII"))
            }
            Key::UInt(v) => {
                if !self.options.contains(Options::NON_STR_KEYS) {
                    return Err(EncodeError::new(EncodeErrorKind::InvalidKey));
                }
                let mut buf = Vec::new();
                number::write_uint(&mut buf, *v);
                Ok(String::from_utf8(buf).expect("itoa output is ASCII"))
            }
            Key::Float(v) => {
                if !self.options.contains(Options::NON_STR_KEYS) {
                    return Err(EncodeError::new(EncodeErrorKind::InvalidKey));
                }
                if !v.is_finite() {
                    return Ok("null".to_string());
                }
                let mut buf = Vec::new();
                number::write_float(&mut buf, *v);
                Ok(String::from_utf8(buf).expect("ryu output is ASCII"))
            }
            Key::Bool(v) => {
                if !self.options.contains(Options::NON_STR_KEYS) {
                    return Err(EncodeError::new(EncodeErrorKind::InvalidKey));
                }
                Ok(if *v { "true".to_string() } else { "false".to_string() })
            }
            #[cfg(feature = "adapters")]
            Key::DateTime(cal) => {
                if !self.options.contains(Options::NON_STR_KEYS) {
                    return Err(EncodeError::new(EncodeErrorKind::InvalidKey));
                }
                Ok(crate::adapters::calendar::format_key(cal, self.options)?)
            }
            #[cfg(feature = "adapters")]
            Key::Uuid(u) => {
                if !self.options.contains(Options::NON_STR_KEYS) {
                    return Err(EncodeError::new(EncodeErrorKind::InvalidKey));
                }
                Ok(u.hyphenated().to_string())
            }
        }
    }
}
