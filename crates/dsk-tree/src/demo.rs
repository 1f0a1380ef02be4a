//! Demo variant selection.
//!
//! A request may address a single demo of a component with a suffix:
//! `<nodePath>:<selector>`, e.g. `Forms/Button:1` or `Forms/Button:big%20red`.
//! The selector is URL-decoded and then interpreted as an index when it is
//! made of digits only, or as a name otherwise.

use std::borrow::Cow;

use percent_encoding::percent_decode_str;

use crate::error::{Result, TreeError};
use crate::meta::PropSet;

/// How a demo variant is addressed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DemoSelector {
    /// Position in the node's `demo` list.
    Index(usize),
    /// Value of the `name` field of a demo entry.
    Name(String),
}

impl DemoSelector {
    /// Parse a raw selector taken from a request path.
    ///
    /// Percent-escapes are decoded first; invalid UTF-8 after decoding is
    /// replaced lossily.
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        let decoded: Cow<'_, str> = percent_decode_str(raw).decode_utf8_lossy();

        if !decoded.is_empty() && decoded.bytes().all(|b| b.is_ascii_digit()) {
            // Digits that overflow usize can never be a valid index; keep them as a name.
            if let Ok(index) = decoded.parse() {
                return Self::Index(index);
            }
        }
        Self::Name(decoded.into_owned())
    }

    /// Pick the addressed variant out of `demos`.
    ///
    /// # Errors
    ///
    /// Returns [`TreeError::VariantIndex`] for an index past the end and
    /// [`TreeError::VariantName`] when no object entry has a matching `name`.
    pub fn resolve(&self, demos: &[PropSet]) -> Result<PropSet> {
        match self {
            Self::Index(index) => demos
                .get(*index)
                .cloned()
                .ok_or(TreeError::VariantIndex {
                    index: *index,
                    len: demos.len(),
                }),
            Self::Name(name) => demos
                .iter()
                .find(|demo| demo.name() == Some(name.as_str()))
                .cloned()
                .ok_or_else(|| TreeError::VariantName(name.clone())),
        }
    }
}

impl From<usize> for DemoSelector {
    fn from(index: usize) -> Self {
        Self::Index(index)
    }
}

impl From<&str> for DemoSelector {
    fn from(name: &str) -> Self {
        Self::Name(name.to_owned())
    }
}

/// Split a `<nodePath>:<selector>` request path.
///
/// Splits at the last `:`; both halves must be non-empty, otherwise the whole
/// input is returned as the node path.
#[must_use]
pub fn split_variant(path: &str) -> (&str, Option<DemoSelector>) {
    match path.rsplit_once(':') {
        Some((node, selector)) if !node.is_empty() && !selector.is_empty() => {
            (node, Some(DemoSelector::parse(selector)))
        }
        _ => (path, None),
    }
}
