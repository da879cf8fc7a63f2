//! Locale fallback between regional and base language tags

use crate::catalog::{Catalog, MessageTable};
use rosetta_common::LanguageTag;

/// Find the message table for `language`.
///
/// An exact match wins. Otherwise a regional tag such as `es-MX` falls back
/// to its base language `es`. Only that single step is attempted: `zh-Hant-TW`
/// tries `zh`, never `zh-Hant`.
pub fn resolve_table<'c>(catalog: &'c Catalog, language: &str) -> Option<&'c MessageTable> {
    catalog.table(language).or_else(|| {
        LanguageTag::new(language)
            .base()
            .and_then(|base| catalog.table(base))
    })
}

/// The tags `resolve_table` consults for `language`, in order
pub fn fallback_chain(language: &str) -> Vec<String> {
    let tag = LanguageTag::new(language);
    let mut chain = vec![language.to_string()];
    if let Some(base) = tag.base() {
        chain.push(base.to_string());
    }
    chain
}
