// feedguard-core/src/untrusted.rs
//! Input adaptor for the primitive sanitizers.
//!
//! Feed parsers hand over loosely typed values: a field that should be a
//! string may be missing, `null`, a number or a nested object. `Untrusted`
//! collapses all of those into "either a non-empty string or nothing", which
//! is the only distinction the primitives care about.

use serde_json::Value;

/// A possibly-absent, possibly-mistyped input value.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Untrusted<'a>(Option<&'a str>);

impl<'a> Untrusted<'a> {
    /// An input that carries nothing.
    pub const fn none() -> Self {
        Self(None)
    }

    /// The input text, if it is a non-empty string.
    pub fn as_str(&self) -> Option<&'a str> {
        self.0.filter(|s| !s.is_empty())
    }
}

impl<'a> From<&'a str> for Untrusted<'a> {
    fn from(value: &'a str) -> Self {
        Self(Some(value))
    }
}

impl<'a> From<&'a String> for Untrusted<'a> {
    fn from(value: &'a String) -> Self {
        Self(Some(value.as_str()))
    }
}

impl<'a> From<Option<&'a str>> for Untrusted<'a> {
    fn from(value: Option<&'a str>) -> Self {
        Self(value)
    }
}

impl<'a> From<&'a Value> for Untrusted<'a> {
    fn from(value: &'a Value) -> Self {
        Self(value.as_str())
    }
}

impl<'a> From<Option<&'a Value>> for Untrusted<'a> {
    fn from(value: Option<&'a Value>) -> Self {
        Self(value.and_then(Value::as_str))
    }
}
