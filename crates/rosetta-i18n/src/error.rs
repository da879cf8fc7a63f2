//! Error types for internationalization operations

use thiserror::Error;

/// Errors raised while compiling a plural rule expression
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RuleError {
    /// The rule contains no expression
    #[error("plural rule is empty")]
    Empty,

    /// A character that starts no token
    #[error("unexpected character '{ch}' at offset {offset}")]
    UnexpectedChar {
        /// The offending character
        ch: char,
        /// Byte offset into the rule
        offset: usize,
    },

    /// An identifier other than the count variable
    #[error("unknown identifier '{name}' at offset {offset}, only `n` is allowed")]
    UnknownIdentifier {
        /// The identifier as written
        name: String,
        /// Byte offset into the rule
        offset: usize,
    },

    /// A numeric literal that does not parse
    #[error("invalid number '{text}' at offset {offset}")]
    InvalidNumber {
        /// The literal as written
        text: String,
        /// Byte offset into the rule
        offset: usize,
    },

    /// A token in a position the grammar does not allow
    #[error("unexpected '{found}' at offset {offset}")]
    UnexpectedToken {
        /// The token that was found
        found: String,
        /// Byte offset into the rule
        offset: usize,
    },

    /// The rule stopped in the middle of an expression
    #[error("unexpected end of plural rule")]
    UnexpectedEnd,

    /// Sub-expressions or operator chains nested past the limit
    #[error("plural rule nests deeper than {limit} levels")]
    TooDeep {
        /// The nesting limit
        limit: usize,
    },
}

/// Errors that can occur during internationalization operations
#[derive(Error, Debug)]
pub enum I18nError {
    /// The catalog's plural rule failed to compile
    #[error("Invalid plural rule '{rule}': {source}")]
    InvalidPluralRule {
        /// The rule as configured
        rule: String,
        /// Why it failed to compile
        #[source]
        source: RuleError,
    },

    /// A catalog document could not be decoded
    #[error("Failed to decode catalog: {0}")]
    CatalogDecode(#[from] serde_json::Error),
}

/// Result type for i18n operations
pub type I18nResult<T> = Result<T, I18nError>;
