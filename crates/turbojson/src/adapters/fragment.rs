//! Pre-validated JSON fragments copied into output verbatim.

/// A wrapper around pre-validated JSON bytes. The serializer writes its
/// contents unchanged; this crate performs no validation of its own. A
/// `Fragment` constructed from invalid JSON text produces invalid output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fragment(Box<str>);

impl Fragment {
    /// Wraps `text` as a fragment to be emitted verbatim.
    ///
    /// The caller is responsible for `text` being valid JSON; this
    /// constructor does not check.
    #[must_use]
    pub fn new(text: impl Into<Box<str>>) -> Self {
        Self(text.into())
    }

    #[must_use]
    pub(crate) fn as_bytes(&self) -> &[u8] {
        self.0.as_bytes()
    }
}

#[cfg(test)]
mod tests {
    use super::Fragment;

    #[test]
    fn stores_text_verbatim() {
        let frag = Fragment::new(r#"{"a":1}"#);
        assert_eq!(frag.as_bytes(), br#"{"a":1}"#);
    }
}
