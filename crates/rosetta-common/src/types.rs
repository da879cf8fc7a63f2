//! Common type definitions shared across the workspace.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A language tag as it appears in a catalog (`"en"`, `"es-MX"`, ...).
///
/// Tags are compared verbatim; no case folding or canonicalisation is applied,
/// since catalog keys are whatever the catalog author wrote.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LanguageTag(String);

impl LanguageTag {
    /// Separator between the base language and its region/script subtags.
    pub const SEPARATOR: char = '-';

    /// Wraps a tag string.
    pub fn new(tag: impl Into<String>) -> Self {
        Self(tag.into())
    }

    /// The tag as written.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The part before the first separator, or `None` when the tag has no
    /// region component.
    #[must_use]
    pub fn base(&self) -> Option<&str> {
        self.0
            .split_once(Self::SEPARATOR)
            .map(|(base, _)| base)
    }
}

impl fmt::Display for LanguageTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for LanguageTag {
    fn from(tag: &str) -> Self {
        Self::new(tag)
    }
}

impl From<String> for LanguageTag {
    fn from(tag: String) -> Self {
        Self(tag)
    }
}

impl AsRef<str> for LanguageTag {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Common result type for the application.
pub type Result<T> = std::result::Result<T, RosettaError>;

/// Application-wide error type.
#[derive(thiserror::Error, Debug)]
pub enum RosettaError {
    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Catalog document error.
    #[error("Catalog error: {0}")]
    Catalog(String),

    /// Unsupported catalog or configuration file format.
    #[error("Unsupported file format: {0}")]
    UnsupportedFormat(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error.
    #[error("Serialization error: {0}")]
    Serialization(String),
}
