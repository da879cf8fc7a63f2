//! Translation resolver
//!
//! A [`Translator`] is created once per catalog and language pair and then
//! answers any number of lookups. Each lookup:
//!
//! 1. picks the concrete key when given a pluralizable key,
//! 2. looks the key up in the primary table, then the fallback table,
//! 3. falls back to using the key itself as the template,
//! 4. interpolates the parameters.
//!
//! Missing data never fails a lookup. A missing or empty translation in the
//! primary table logs a warning unless the catalog suppresses warnings.

use crate::catalog::{Catalog, MessageTable};
use crate::error::{I18nError, I18nResult, RuleError};
use crate::interpolate::{Interpolator, MissingParamPolicy, ResolvedMessage};
use crate::locale::{fallback_chain, resolve_table};
use crate::options::ResolvedOptions;
use crate::params::{NoContent, Params};
use crate::pluralization::{select_candidate, LookupKey, PluralRule};
use once_cell::sync::{Lazy, OnceCell};
use tracing::{debug, error, warn};

/// Where a resolved message came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Source {
    /// The requested language's table
    Primary,
    /// The fallback language's table
    Fallback,
    /// No table had a translation; the key itself was used as the template
    Passthrough,
}

/// A resolved message together with how it was found
#[derive(Debug, Clone, PartialEq)]
pub struct Resolution<C> {
    /// The rendered message
    pub message: ResolvedMessage<C>,
    /// The concrete key that was looked up
    pub key: String,
    /// Which table supplied the template
    pub source: Source,
    /// Whether the primary table lacked a usable translation
    pub missing_in_primary: bool,
}

/// Resolves message keys against one catalog for one language pair
#[derive(Debug, Clone)]
pub struct Translator<'c> {
    language: String,
    fallback_language: Option<String>,
    primary: Option<&'c MessageTable>,
    fallback: Option<&'c MessageTable>,
    options: ResolvedOptions,
    rule: Result<PluralRule, RuleError>,
    rule_reported: OnceCell<()>,
    interpolator: Interpolator,
}

impl<'c> Translator<'c> {
    /// Create a translator for `language`, optionally backed by
    /// `fallback_language`.
    ///
    /// Never fails. A plural rule that does not compile is reported once, at
    /// the first pluralized lookup, and the default rule is used instead.
    pub fn new(catalog: &'c Catalog, language: &str, fallback_language: Option<&str>) -> Self {
        let fallback_language = fallback_language.filter(|tag| !tag.is_empty());
        let primary = resolve_table(catalog, language);
        let fallback = fallback_language.and_then(|tag| resolve_table(catalog, tag));

        debug!(
            language,
            chain = ?fallback_chain(language),
            found = primary.is_some(),
            "Resolved primary message table"
        );
        if let Some(tag) = fallback_language {
            debug!(language = tag, found = fallback.is_some(), "Resolved fallback message table");
        }

        let options = ResolvedOptions::extract(catalog.options());
        let rule = PluralRule::parse(&options.plural_rule);

        Self {
            language: language.to_string(),
            fallback_language: fallback_language.map(str::to_string),
            primary,
            fallback,
            options,
            rule,
            rule_reported: OnceCell::new(),
            interpolator: Interpolator::default(),
        }
    }

    /// Like [`Translator::new`], but rejects a catalog whose plural rule does
    /// not compile.
    pub fn try_new(
        catalog: &'c Catalog,
        language: &str,
        fallback_language: Option<&str>,
    ) -> I18nResult<Self> {
        let translator = Self::new(catalog, language, fallback_language);
        if let Err(source) = &translator.rule {
            return Err(I18nError::InvalidPluralRule {
                rule: translator.options.plural_rule.clone(),
                source: source.clone(),
            });
        }
        Ok(translator)
    }

    /// Set what placeholders without a parameter turn into
    #[must_use]
    pub fn with_missing_params(mut self, policy: MissingParamPolicy) -> Self {
        self.interpolator = Interpolator::new(policy);
        self
    }

    /// The requested language
    pub fn language(&self) -> &str {
        &self.language
    }

    /// The fallback language, if one was given
    pub fn fallback_language(&self) -> Option<&str> {
        self.fallback_language.as_deref()
    }

    /// Options extracted from the catalog
    pub fn options(&self) -> &ResolvedOptions {
        &self.options
    }

    /// Whether a table was found for the requested language
    pub fn has_primary_table(&self) -> bool {
        self.primary.is_some()
    }

    /// Whether a table was found for the fallback language
    pub fn has_fallback_table(&self) -> bool {
        self.fallback.is_some()
    }

    /// Resolve `key` into a message.
    ///
    /// `comment` is context for translators; it only appears in the
    /// missing-translation warning.
    pub fn translate<'k, C: Clone>(
        &self,
        key: impl Into<LookupKey<'k>>,
        params: Option<&Params<C>>,
        comment: Option<&str>,
    ) -> ResolvedMessage<C> {
        self.resolve(key, params, comment).message
    }

    /// Resolve a key that takes no parameters into text
    pub fn text<'k>(&self, key: impl Into<LookupKey<'k>>) -> String {
        self.translate::<NoContent>(key, None, None).into_string()
    }

    /// Resolve `key`, also reporting which table supplied the template
    pub fn resolve<'k, C: Clone>(
        &self,
        key: impl Into<LookupKey<'k>>,
        params: Option<&Params<C>>,
        comment: Option<&str>,
    ) -> Resolution<C> {
        let (key, variant) = match key.into() {
            LookupKey::Single(key) => (key, 0),
            LookupKey::Plural(candidates) => {
                let selection = select_candidate(
                    self.plural_rule(),
                    &candidates,
                    self.options.plural_arg_index,
                    params,
                );
                (selection.key, selection.index)
            }
        };

        if self.primary.is_none() && self.fallback.is_none() {
            return self.finish(key, key, Source::Passthrough, false, params);
        }

        if let Some(template) = self.primary.and_then(|table| lookup(table, key, variant)) {
            return self.finish(key, template, Source::Primary, false, params);
        }

        if !self.options.suppress_warnings {
            match comment {
                Some(comment) => warn!(
                    key,
                    language = %self.language,
                    comment,
                    "Missing translation for id {} in language {}",
                    key,
                    self.language
                ),
                None => warn!(
                    key,
                    language = %self.language,
                    "Missing translation for id {} in language {}",
                    key,
                    self.language
                ),
            }
        }

        if let Some(template) = self.fallback.and_then(|table| lookup(table, key, variant)) {
            return self.finish(key, template, Source::Fallback, true, params);
        }

        self.finish(key, key, Source::Passthrough, true, params)
    }

    fn plural_rule(&self) -> &PluralRule {
        static DEFAULT_RULE: Lazy<PluralRule> = Lazy::new(PluralRule::default);

        match &self.rule {
            Ok(rule) => rule,
            Err(err) => {
                self.rule_reported.get_or_init(|| {
                    error!(
                        rule = %self.options.plural_rule,
                        error = %err,
                        "Plural rule does not compile, using the default rule"
                    );
                });
                &*DEFAULT_RULE
            }
        }
    }

    fn finish<C: Clone>(
        &self,
        key: &str,
        template: &str,
        source: Source,
        missing_in_primary: bool,
        params: Option<&Params<C>>,
    ) -> Resolution<C> {
        Resolution {
            message: self.interpolator.interpolate(template, params),
            key: key.to_string(),
            source,
            missing_in_primary,
        }
    }
}

/// A non-empty template for `key`; empty text counts as untranslated.
fn lookup<'t>(table: &'t MessageTable, key: &str, variant: usize) -> Option<&'t str> {
    table
        .get(key)
        .and_then(|message| message.template(variant))
        .filter(|template| !template.is_empty())
}

/// Build a lookup function for `language`, optionally backed by
/// `fallback_language`.
///
/// The closure takes the same arguments as [`Translator::translate`].
pub fn translate_fn<'c, C: Clone + 'c>(
    catalog: &'c Catalog,
    language: &str,
    fallback_language: Option<&str>,
) -> impl Fn(LookupKey<'_>, Option<&Params<C>>, Option<&str>) -> ResolvedMessage<C> + 'c {
    let translator = Translator::new(catalog, language, fallback_language);
    move |key: LookupKey<'_>, params: Option<&Params<C>>, comment: Option<&str>| {
        translator.translate(key, params, comment)
    }
}
