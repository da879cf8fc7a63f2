//! Default configuration values.

use crate::schema::*;
use rosetta_i18n::MissingParamPolicy;
use std::path::PathBuf;

/// Catalog location used when none is configured.
pub const DEFAULT_CATALOG_PATH: &str = "locales/catalog.json";

/// Configuration file read when none is given on the command line.
pub const DEFAULT_CONFIG_PATH: &str = "rosetta.toml";

impl Default for Config {
    fn default() -> Self {
        Self {
            resolver: ResolverConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            language: "en".to_string(),
            fallback_language: None,
            catalog: PathBuf::from(DEFAULT_CATALOG_PATH),
            missing_params: MissingParamPolicy::Undefined,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json: false,
        }
    }
}
