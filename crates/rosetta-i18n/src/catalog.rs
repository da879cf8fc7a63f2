//! Translation catalog model
//!
//! A catalog document maps language tags to message tables and may carry a
//! reserved `options` entry with catalog-wide settings:
//!
//! ```json
//! {
//!   "en": { "greet": "Hi {user}", "inbox": ["One message", "{count} messages"] },
//!   "es": { "greet": "Hola {user}" },
//!   "options": { "plural_rule": "n != 1" }
//! }
//! ```

use crate::error::I18nResult;
use crate::options::CatalogOptions;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A single catalog entry: a template or an ordered list of variant templates
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Message {
    /// A plain template string
    Template(String),
    /// Index-addressed plural variants
    Variants(Vec<String>),
}

impl Message {
    /// The template at `variant`. Plain templates ignore the index.
    #[must_use]
    pub fn template(&self, variant: usize) -> Option<&str> {
        match self {
            Self::Template(template) => Some(template),
            Self::Variants(variants) => variants.get(variant).map(String::as_str),
        }
    }
}

impl From<&str> for Message {
    fn from(template: &str) -> Self {
        Self::Template(template.to_string())
    }
}

impl From<String> for Message {
    fn from(template: String) -> Self {
        Self::Template(template)
    }
}

impl From<Vec<String>> for Message {
    fn from(variants: Vec<String>) -> Self {
        Self::Variants(variants)
    }
}

impl From<Vec<&str>> for Message {
    fn from(variants: Vec<&str>) -> Self {
        Self::Variants(variants.into_iter().map(str::to_string).collect())
    }
}

/// Messages for a single language, keyed by message id
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MessageTable {
    messages: HashMap<String, Message>,
}

impl MessageTable {
    /// Create an empty table
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace a message
    pub fn insert(&mut self, key: impl Into<String>, message: impl Into<Message>) {
        self.messages.insert(key.into(), message.into());
    }

    /// Look up a message by key
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Message> {
        self.messages.get(key)
    }

    /// Number of messages
    #[must_use]
    pub fn len(&self) -> usize {
        self.messages.len()
    }

    /// Whether the table has no messages
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}

impl<K, V> FromIterator<(K, V)> for MessageTable
where
    K: Into<String>,
    V: Into<Message>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            messages: iter
                .into_iter()
                .map(|(key, message)| (key.into(), message.into()))
                .collect(),
        }
    }
}

/// All message tables plus the shared catalog options
///
/// The catalog is read-only to the resolver; translators borrow tables from
/// it for their whole lifetime.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Catalog {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    options: Option<CatalogOptions>,
    #[serde(flatten)]
    tables: HashMap<String, MessageTable>,
}

impl Catalog {
    /// Create an empty catalog with no options
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Decode a catalog from a JSON document
    pub fn from_json(document: &str) -> I18nResult<Self> {
        Ok(serde_json::from_str(document)?)
    }

    /// Add a language table, builder style
    #[must_use]
    pub fn with_table(mut self, language: impl Into<String>, table: MessageTable) -> Self {
        self.insert_table(language, table);
        self
    }

    /// Attach catalog options, builder style
    #[must_use]
    pub fn with_options(mut self, options: CatalogOptions) -> Self {
        self.options = Some(options);
        self
    }

    /// Add or replace a language table
    pub fn insert_table(&mut self, language: impl Into<String>, table: MessageTable) {
        self.tables.insert(language.into(), table);
    }

    /// The table registered under exactly `language`
    #[must_use]
    pub fn table(&self, language: &str) -> Option<&MessageTable> {
        self.tables.get(language)
    }

    /// Catalog options, if the document configured any
    #[must_use]
    pub fn options(&self) -> Option<&CatalogOptions> {
        self.options.as_ref()
    }

    /// Language tags with a table, sorted
    #[must_use]
    pub fn languages(&self) -> Vec<&str> {
        let mut languages: Vec<&str> = self.tables.keys().map(String::as_str).collect();
        languages.sort_unstable();
        languages
    }
}
