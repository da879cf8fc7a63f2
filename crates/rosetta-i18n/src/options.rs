//! Catalog-wide options and their extraction

use rosetta_common::{is_truthy, parse_int_prefix};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::warn;

/// Option naming the plural rule expression
pub const PLURAL_RULE: &str = "plural_rule";
/// Option naming the position of the count parameter in a pluralizable key
pub const PLURAL_NUMBER: &str = "plural_number";
/// Option silencing missing-translation warnings
pub const SUPPRESS_WARNINGS: &str = "suppress_warnings";

/// Rule used when the catalog does not configure one
pub const DEFAULT_PLURAL_RULE: &str = "n != 1";
/// Count parameter position used when the catalog does not configure one
pub const DEFAULT_PLURAL_NUMBER: usize = 2;

/// Raw `options` entry of a catalog document
///
/// Values are kept untyped so that "not configured" stays distinguishable
/// from "configured as null".
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CatalogOptions {
    values: Map<String, Value>,
}

impl CatalogOptions {
    /// Create an empty option set
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set an option, builder style
    #[must_use]
    pub fn with(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.values.insert(name.into(), value.into());
        self
    }

    /// The raw configured value
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.values.get(name)
    }
}

/// Reads option `name`, falling back to `default`.
///
/// Returns `None` only when the option is not configured and no default was
/// given. A value configured as JSON `null` is returned as is.
pub fn option_value(
    options: Option<&CatalogOptions>,
    name: &str,
    default: Option<Value>,
) -> Option<Value> {
    options
        .and_then(|options| options.get(name))
        .cloned()
        .or(default)
}

/// Options as the translator consumes them
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedOptions {
    /// Source text of the plural rule
    pub plural_rule: String,
    /// Position of the count parameter name inside a pluralizable key.
    /// `None` when the configured value is not a usable index.
    pub plural_arg_index: Option<usize>,
    /// Whether missing-translation warnings are silenced
    pub suppress_warnings: bool,
}

impl Default for ResolvedOptions {
    fn default() -> Self {
        Self {
            plural_rule: DEFAULT_PLURAL_RULE.to_string(),
            plural_arg_index: Some(DEFAULT_PLURAL_NUMBER),
            suppress_warnings: false,
        }
    }
}

impl ResolvedOptions {
    /// Extract typed options from a catalog's raw option set
    pub fn extract(options: Option<&CatalogOptions>) -> Self {
        let plural_rule = match option_value(options, PLURAL_RULE, Some(DEFAULT_PLURAL_RULE.into())) {
            Some(Value::String(rule)) => rule,
            other => {
                warn!(option = PLURAL_RULE, value = ?other, "Ignoring non-text plural rule");
                DEFAULT_PLURAL_RULE.to_string()
            }
        };

        let plural_arg_index = option_value(options, PLURAL_NUMBER, Some(DEFAULT_PLURAL_NUMBER.into()))
            .as_ref()
            .and_then(index_from_value);

        let suppress_warnings = option_value(options, SUPPRESS_WARNINGS, None)
            .as_ref()
            .is_some_and(is_truthy);

        Self {
            plural_rule,
            plural_arg_index,
            suppress_warnings,
        }
    }
}

/// Integer-prefix reading of an index option, accepting numbers and numeric text
fn index_from_value(value: &Value) -> Option<usize> {
    let parsed = match value {
        Value::Number(number) => number
            .as_f64()
            .filter(|n| n.is_finite())
            .map(|n| n.trunc() as i64),
        Value::String(text) => parse_int_prefix(text),
        _ => None,
    };

    let index = parsed.and_then(|n| usize::try_from(n).ok());
    if index.is_none() {
        warn!(option = PLURAL_NUMBER, value = %value, "Plural argument index is not a usable position");
    }
    index
}
