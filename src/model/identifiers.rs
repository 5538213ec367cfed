//! Source identifiers.
//!
//! A source partitions the log space (typically a document path). Any string
//! is a valid source, including the empty string. The "no source" sentinel is
//! expressed as `None` in a [`SourceKey`], never as a magic string.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier of one log source, e.g. `notebooks/analysis.ipynb`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SourceId(String);

impl SourceId {
    /// Wrap a raw source string.
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    /// Borrow the raw source string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SourceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for SourceId {
    fn from(raw: &str) -> Self {
        Self::new(raw)
    }
}

impl From<String> for SourceId {
    fn from(raw: String) -> Self {
        Self(raw)
    }
}

/// Registry key: a source, or `None` for entries with no associated source.
pub type SourceKey = Option<SourceId>;

/// Human readable label for a registry key.
pub fn key_label(key: &SourceKey) -> &str {
    match key {
        Some(source) => source.as_str(),
        None => "(no source)",
    }
}

/// Identifier of a widget hosted by the workbench shell.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct WidgetId(String);

impl WidgetId {
    /// Wrap a raw widget identifier.
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    /// Borrow the raw widget identifier.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for WidgetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
