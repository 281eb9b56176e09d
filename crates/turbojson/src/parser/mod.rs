//! Recursive-descent parser.

use indexmap::IndexMap;

use crate::error::{DecodeError, DecodeErrorKind};
use crate::number::{self, Number};
use crate::string;
use crate::value::{Key, Map, Value};
use crate::MAX_DEPTH;

/// Decodes a complete JSON document.
///
/// Trailing whitespace after the top-level value is permitted; any other
/// trailing byte is [`DecodeErrorKind::TrailingGarbage`].
pub fn decode(bytes: &[u8]) -> Result<Value, DecodeError> {
    let mut p = Parser { bytes, pos: 0, depth: 0 };
    p.skip_whitespace();
    let value = p.parse_value()?;
    p.skip_whitespace();
    if p.pos != bytes.len() {
        return Err(p.error_at(DecodeErrorKind::TrailingGarbage, p.pos));
    }
    Ok(value)
}

struct Parser<'a> {
    bytes: &'a [u8],
    pos: usize,
    depth: usize,
}

impl<'a> Parser<'a> {
    fn peek(&self) -> Option<u8> {
        self.bytes.get(self.pos).copied()
    }

    fn skip_whitespace(&mut self) {
        while matches!(self.peek(), Some(b' ' | b'\t' | b'\n' | b'\r')) {
            self.pos += 1;
        }
    }

    /// Computes the 1-based line/column of `offset` by scanning from the
    /// start of the document. Only called on the (rare) error path, so a
    /// linear scan here costs nothing on the success path.
    fn line_col(&self, offset: usize) -> (usize, usize) {
        let mut line = 1;
        let mut col = 1;
        for &b in &self.bytes[..offset.min(self.bytes.len())] {
            if b == b'\n' {
                line += 1;
                col = 1;
            } else {
                col += 1;
            }
        }
        (line, col)
    }

    fn error_at(&self, kind: DecodeErrorKind, offset: usize) -> DecodeError {
        let (line, column) = self.line_col(offset);
        DecodeError::new(kind, offset, line, column)
    }

    fn parse_value(&mut self) -> Result<Value, DecodeError> {
        match self.peek() {
            Some(b'"') => {
                self.pos += 1;
                self.parse_string().map(Value::Str)
            }
            Some(b'{') => self.parse_object(),
            Some(b'[') => self.parse_array(),
            Some(b't') => self.parse_literal(b"true", Value::Bool(true)),
            Some(b'f') => self.parse_literal(b"false", Value::Bool(false)),
            Some(b'n') => self.parse_literal(b"null", Value::Null),
            Some(b'-' | b'0'..=b'9') => self.parse_number(),
            _ => Err(self.error_at(DecodeErrorKind::UnexpectedToken, self.pos)),
        }
    }

    fn parse_literal(&mut self, text: &'static [u8], value: Value) -> Result<Value, DecodeError> {
        if self.bytes[self.pos..].starts_with(text) {
            self.pos += text.len();
            Ok(value)
        } else {
            Err(self.error_at(DecodeErrorKind::UnexpectedToken, self.pos))
        }
    }

    fn parse_string(&mut self) -> Result<Box<str>, DecodeError> {
        match string::parse(&self.bytes[self.pos..]) {
            Ok((s, consumed)) => {
                self.pos += consumed;
                Ok(s)
            }
            Err(e) => Err(self.error_at(e.kind, self.pos + e.offset)),
        }
    }

    fn parse_array(&mut self) -> Result<Value, DecodeError> {
        self.pos += 1; // consume '['
        self.enter()?;
        let mut items = Vec::new();

        self.skip_whitespace();
        if self.peek() == Some(b']') {
            self.pos += 1;
            self.depth -= 1;
            return Ok(Value::Array(items));
        }

        loop {
            self.skip_whitespace();
            items.push(self.parse_value()?);
            self.skip_whitespace();
            match self.peek() {
                Some(b',') => {
                    self.pos += 1;
                }
                Some(b']') => {
                    self.pos += 1;
                    self.depth -= 1;
                    return Ok(Value::Array(items));
                }
                _ => return Err(self.error_at(DecodeErrorKind::UnexpectedToken, self.pos)),
            }
        }
    }

    fn parse_object(&mut self) -> Result<Value, DecodeError> {
        self.pos += 1; // consume '{'
        self.enter()?;
        let mut map: Map = IndexMap::new();

        self.skip_whitespace();
        if self.peek() == Some(b'}') {
            self.pos += 1;
            self.depth -= 1;
            return Ok(Value::Object(map));
        }

        loop {
            self.skip_whitespace();
            if self.peek() != Some(b'"') {
                return Err(self.error_at(DecodeErrorKind::ExpectedStringKey, self.pos));
            }
            self.pos += 1;
            let key = self.parse_string()?;

            self.skip_whitespace();
            if self.peek() != Some(b':') {
                return Err(self.error_at(DecodeErrorKind::UnexpectedToken, self.pos));
            }
            self.pos += 1;
            self.skip_whitespace();

            let value = self.parse_value()?;
            // `IndexMap::insert` replaces an existing key's value in place
            // without moving it, matching the duplicate-key replace rule.
            map.insert(Key::Str(key), value);

            self.skip_whitespace();
            match self.peek() {
                Some(b',') => {
                    self.pos += 1;
                }
                Some(b'}') => {
                    self.pos += 1;
                    self.depth -= 1;
                    return Ok(Value::Object(map));
                }
                _ => return Err(self.error_at(DecodeErrorKind::UnexpectedToken, self.pos)),
            }
        }
    }

    fn enter(&mut self) -> Result<(), DecodeError> {
        self.depth += 1;
        if self.depth > MAX_DEPTH {
            return Err(self.error_at(DecodeErrorKind::RecursionLimit, self.pos));
        }
        Ok(())
    }

    fn parse_number(&mut self) -> Result<Value, DecodeError> {
        let start = self.pos;
        let mut i = self.pos;
        let bytes = self.bytes;

        if bytes.get(i) == Some(&b'-') {
            i += 1;
        }

        let int_start = i;
        match bytes.get(i) {
            Some(b'0') => i += 1,
            Some(b'1'..=b'9') => {
                i += 1;
                while matches!(bytes.get(i), Some(b'0'..=b'9')) {
                    i += 1;
                }
            }
            _ => return Err(self.error_at(DecodeErrorKind::UnexpectedToken, i)),
        }
        if i == int_start {
            return Err(self.error_at(DecodeErrorKind::UnexpectedToken, i));
        }

        let mut is_float = false;

        if bytes.get(i) == Some(&b'.') {
            is_float = true;
            i += 1;
            let frac_start = i;
            while matches!(bytes.get(i), Some(b'0'..=b'9')) {
                i += 1;
            }
            if i == frac_start {
                return Err(self.error_at(DecodeErrorKind::UnexpectedToken, i));
            }
        }

        if matches!(bytes.get(i), Some(b'e' | b'E')) {
            is_float = true;
            i += 1;
            if matches!(bytes.get(i), Some(b'+' | b'-')) {
                i += 1;
            }
            let exp_start = i;
            while matches!(bytes.get(i), Some(b'0'..=b'9')) {
                i += 1;
            }
            if i == exp_start {
                return Err(self.error_at(DecodeErrorKind::UnexpectedToken, i));
            }
        }

        let literal = &bytes[start..i];
        self.pos = i;

        let number = if is_float {
            number::parse_float(literal)
        } else {
            number::parse_integer(literal)
        };

        match number.ok_or_else(|| self.error_at(DecodeErrorKind::NumberOutOfRange, start))? {
            Number::Int(v) => Ok(Value::Int(v)),
            Number::UInt(v) => Ok(Value::UInt(v)),
            Number::Float(v) => Ok(Value::Float(v)),
        }
    }
}
