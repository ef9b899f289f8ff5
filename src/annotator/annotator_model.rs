use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque, stable identity of a text fragment. Identity is by reference in
/// the host environment, never by content; the supplier assigns it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FragmentId(pub u64);

impl From<u64> for FragmentId {
    fn from(value: u64) -> Self {
        FragmentId(value)
    }
}

impl fmt::Display for FragmentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "fragment#{}", self.0)
    }
}

/// Result of annotating one fragment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Annotation {
    pub text: String,
    pub changed: bool,
}

impl Annotation {
    pub fn unchanged(text: &str) -> Self {
        Annotation {
            text: text.to_string(),
            changed: false,
        }
    }
}

/// One rewrite decided for a span, positioned against the original text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReplacementSpan {
    pub start: usize,
    pub end: usize,
    pub original: String,
    pub replacement: String,
}
