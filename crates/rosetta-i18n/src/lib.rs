//! # Rosetta I18n
//!
//! Message resolution for localized user interfaces.
//!
//! Given a catalog of per-language message tables, a [`Translator`] turns a
//! message key and call parameters into display content. It provides:
//!
//! - Regional to base language fallback (`es-MX` uses `es`)
//! - A secondary fallback language for missing translations
//! - Pluralizable keys driven by a sandboxed rule expression
//! - `{name}` interpolation of text, numbers and opaque content values
//! - Raw-key passthrough when nothing else matches
//!
//! # Example
//!
//! ```rust
//! use rosetta_i18n::{params, Catalog, Translator};
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let catalog = Catalog::from_json(r#"{"en": {"greet": "Hi {user}"}, "es": {}}"#)?;
//! let translator = Translator::new(&catalog, "es", Some("en"));
//!
//! let message = translator.translate("greet", Some(&params!["user" => "Ana"]), None);
//! assert_eq!(message.into_string(), "Hi Ana");
//! # Ok(())
//! # }
//! # example().unwrap();
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod catalog;
pub mod error;
pub mod interpolate;
pub mod locale;
pub mod options;
pub mod params;
pub mod pluralization;
pub mod translator;

pub use catalog::{Catalog, Message, MessageTable};
pub use error::{I18nError, I18nResult, RuleError};
pub use interpolate::{Interpolator, MissingParamPolicy, ResolvedMessage, Segment};
pub use locale::resolve_table;
pub use options::{option_value, CatalogOptions, ResolvedOptions};
pub use params::{NoContent, ParamValue, Params};
pub use pluralization::{LookupKey, PluralRule, PluralSelection, RuleValue};
pub use translator::{translate_fn, Resolution, Source, Translator};
