//! Runtime validation of configuration and catalogs.

use crate::schema::Config;
use rosetta_common::{Result, RosettaError};
use rosetta_i18n::options::{option_value, PLURAL_NUMBER, PLURAL_RULE};
use rosetta_i18n::{Catalog, PluralRule};
use serde_json::Value;
use tracing::warn;
use unic_langid::LanguageIdentifier;

/// Log levels accepted by the logging configuration.
pub const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// Configuration validator.
pub struct ConfigValidator;

impl ConfigValidator {
    /// Validates a configuration.
    ///
    /// Language tags that are not well-formed BCP 47 only produce a warning,
    /// since catalogs may use any key for a language.
    pub fn validate(config: &Config) -> Result<()> {
        config.validate()?;

        let level = config.logging.level.to_ascii_lowercase();
        if !LOG_LEVELS.contains(&level.as_str()) {
            return Err(RosettaError::Config(format!(
                "Unknown log level '{}', expected one of {}",
                config.logging.level,
                LOG_LEVELS.join(", ")
            )));
        }

        let tags = std::iter::once(config.resolver.language.as_str())
            .chain(config.resolver.fallback_language.as_deref());
        for tag in tags {
            if tag.parse::<LanguageIdentifier>().is_err() {
                warn!(tag, "Language tag is not a well-formed BCP 47 identifier");
            }
        }

        Ok(())
    }

    /// Validates the options carried by a catalog.
    pub fn validate_catalog(catalog: &Catalog) -> Result<()> {
        match option_value(catalog.options(), PLURAL_RULE, None) {
            None => {}
            Some(Value::String(rule)) => {
                PluralRule::parse(&rule).map_err(|e| {
                    RosettaError::Catalog(format!("Invalid plural rule '{rule}': {e}"))
                })?;
            }
            Some(other) => {
                return Err(RosettaError::Catalog(format!(
                    "Plural rule must be text, found {other}"
                )));
            }
        }

        match option_value(catalog.options(), PLURAL_NUMBER, None) {
            None => {}
            Some(Value::Number(n)) if n.as_u64().is_some() => {}
            Some(Value::String(text))
                if rosetta_common::parse_int_prefix(&text).is_some_and(|n| n >= 0) => {}
            Some(other) => {
                return Err(RosettaError::Catalog(format!(
                    "Plural number must be a non-negative integer, found {other}"
                )));
            }
        }

        if catalog.languages().is_empty() {
            warn!("Catalog has no language tables, every lookup will pass the key through");
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rosetta_i18n::CatalogOptions;

    #[test]
    fn test_default_config_is_valid() {
        assert!(ConfigValidator::validate(&Config::default()).is_ok());
    }

    #[test]
    fn test_rejects_empty_language() {
        let mut config = Config::default();
        config.resolver.language = "  ".to_string();
        assert!(matches!(
            ConfigValidator::validate(&config),
            Err(RosettaError::Config(_))
        ));
    }

    #[test]
    fn test_rejects_empty_fallback() {
        let mut config = Config::default();
        config.resolver.fallback_language = Some(String::new());
        assert!(ConfigValidator::validate(&config).is_err());
    }

    #[test]
    fn test_rejects_unknown_log_level() {
        let mut config = Config::default();
        config.logging.level = "verbose".to_string();
        assert!(ConfigValidator::validate(&config).is_err());

        config.logging.level = "WARN".to_string();
        assert!(ConfigValidator::validate(&config).is_ok());
    }

    #[test]
    fn test_odd_language_tag_is_only_a_warning() {
        let mut config = Config::default();
        config.resolver.language = "not a tag!".to_string();
        assert!(ConfigValidator::validate(&config).is_ok());
    }

    #[test]
    fn test_catalog_rule_validation() {
        let catalog = Catalog::new()
            .with_options(CatalogOptions::new().with(PLURAL_RULE, "n % 10 == 1 ? 0 : 1"));
        assert!(ConfigValidator::validate_catalog(&catalog).is_ok());

        let catalog =
            Catalog::new().with_options(CatalogOptions::new().with(PLURAL_RULE, "return n != 1"));
        assert!(matches!(
            ConfigValidator::validate_catalog(&catalog),
            Err(RosettaError::Catalog(_))
        ));

        let catalog = Catalog::new().with_options(CatalogOptions::new().with(PLURAL_RULE, 1));
        assert!(ConfigValidator::validate_catalog(&catalog).is_err());
    }

    #[test]
    fn test_catalog_rejects_runaway_rule() {
        let rule = format!("n{}", " * 1".repeat(100_000));
        let catalog = Catalog::new().with_options(CatalogOptions::new().with(PLURAL_RULE, rule));
        assert!(matches!(
            ConfigValidator::validate_catalog(&catalog),
            Err(RosettaError::Catalog(message)) if message.contains("nests deeper")
        ));
    }

    #[test]
    fn test_catalog_plural_number_validation() {
        let ok = |value: Value| {
            let catalog = Catalog::new().with_options(CatalogOptions::new().with(PLURAL_NUMBER, value));
            ConfigValidator::validate_catalog(&catalog).is_ok()
        };
        assert!(ok(Value::from(2)));
        assert!(ok(Value::from("3")));
        assert!(!ok(Value::from(-1)));
        assert!(!ok(Value::from("x")));
        assert!(!ok(Value::Null));
    }

    #[test]
    fn test_catalog_without_options_is_valid() {
        assert!(ConfigValidator::validate_catalog(&Catalog::new()).is_ok());
    }
}
