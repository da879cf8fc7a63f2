//! Per-call interpolation parameters
//!
//! A parameter is either text-like (strings and numbers, rendered as text) or
//! an opaque content value supplied by the caller's rendering layer. The
//! resolver never inspects content values; it only positions them in the
//! output.

use rosetta_common::{number_to_text, parse_number};
use std::collections::HashMap;

/// Content type for callers that never pass opaque values
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NoContent {}

/// A single parameter value
#[derive(Debug, Clone, PartialEq)]
pub enum ParamValue<C> {
    /// Plain text
    Text(String),
    /// A number, rendered the way JavaScript prints numbers
    Number(f64),
    /// An opaque renderable unit
    Content(C),
}

impl<C> ParamValue<C> {
    /// Numeric reading used by plural rules; content has no numeric value
    pub fn as_number(&self) -> f64 {
        match self {
            Self::Text(text) => parse_number(text),
            Self::Number(n) => *n,
            Self::Content(_) => f64::NAN,
        }
    }

    /// Text form of a text-like value
    pub fn to_text(&self) -> Option<String> {
        match self {
            Self::Text(text) => Some(text.clone()),
            Self::Number(n) => Some(number_to_text(*n)),
            Self::Content(_) => None,
        }
    }
}

impl<C> From<&str> for ParamValue<C> {
    fn from(text: &str) -> Self {
        Self::Text(text.to_string())
    }
}

impl<C> From<String> for ParamValue<C> {
    fn from(text: String) -> Self {
        Self::Text(text)
    }
}

impl<C> From<&String> for ParamValue<C> {
    fn from(text: &String) -> Self {
        Self::Text(text.clone())
    }
}

macro_rules! impl_from_number {
    ($($ty:ty),+) => {
        $(
            impl<C> From<$ty> for ParamValue<C> {
                fn from(n: $ty) -> Self {
                    Self::Number(f64::from(n))
                }
            }
        )+
    };
}

impl_from_number!(f64, f32, i32, u32, i16, u16, i8, u8);

impl<C> From<i64> for ParamValue<C> {
    #[allow(clippy::cast_precision_loss)]
    fn from(n: i64) -> Self {
        Self::Number(n as f64)
    }
}

impl<C> From<u64> for ParamValue<C> {
    #[allow(clippy::cast_precision_loss)]
    fn from(n: u64) -> Self {
        Self::Number(n as f64)
    }
}

impl<C> From<usize> for ParamValue<C> {
    #[allow(clippy::cast_precision_loss)]
    fn from(n: usize) -> Self {
        Self::Number(n as f64)
    }
}

/// Named parameters for one translate call
#[derive(Debug, Clone, PartialEq)]
pub struct Params<C = NoContent> {
    values: HashMap<String, ParamValue<C>>,
}

impl<C> Default for Params<C> {
    fn default() -> Self {
        Self {
            values: HashMap::new(),
        }
    }
}

impl<C> Params<C> {
    /// Create an empty parameter set
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a parameter, builder style
    #[must_use]
    pub fn with<K, V>(mut self, name: K, value: V) -> Self
    where
        K: Into<String>,
        V: Into<ParamValue<C>>,
    {
        self.insert(name, value);
        self
    }

    /// Add an opaque content parameter, builder style
    #[must_use]
    pub fn with_content(mut self, name: impl Into<String>, content: C) -> Self {
        self.values.insert(name.into(), ParamValue::Content(content));
        self
    }

    /// Add or replace a parameter
    pub fn insert<K, V>(&mut self, name: K, value: V)
    where
        K: Into<String>,
        V: Into<ParamValue<C>>,
    {
        self.values.insert(name.into(), value.into());
    }

    /// Look up a parameter
    pub fn get(&self, name: &str) -> Option<&ParamValue<C>> {
        self.values.get(name)
    }

    /// Number of parameters
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether no parameters were supplied
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl<C, K, V> FromIterator<(K, V)> for Params<C>
where
    K: Into<String>,
    V: Into<ParamValue<C>>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut params = Self::new();
        for (name, value) in iter {
            params.insert(name, value);
        }
        params
    }
}

/// Build a text-only [`Params`] set
///
/// ```
/// use rosetta_i18n::params;
///
/// let params = params!["user" => "Ana", "count" => 3];
/// assert_eq!(params.len(), 2);
/// ```
#[macro_export]
macro_rules! params {
    () => {
        $crate::Params::<$crate::NoContent>::new()
    };
    ($($key:expr => $value:expr),+ $(,)?) => {{
        let mut params = $crate::Params::<$crate::NoContent>::new();
        $(
            params.insert($key, $value);
        )+
        params
    }};
}
