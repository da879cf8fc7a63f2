//! Configuration schema definitions using serde.

use rosetta_common::RosettaError;
use rosetta_i18n::MissingParamPolicy;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Main configuration structure for Rosetta.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Message resolution configuration.
    pub resolver: ResolverConfig,
    /// Logging configuration.
    pub logging: LoggingConfig,
}

/// Message resolution configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResolverConfig {
    /// Requested language tag.
    pub language: String,
    /// Language consulted when the requested one lacks a translation.
    pub fallback_language: Option<String>,
    /// Path of the catalog document.
    pub catalog: PathBuf,
    /// What placeholders without a parameter turn into.
    pub missing_params: MissingParamPolicy,
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Default log level when `RUST_LOG` is not set.
    pub level: String,
    /// Emit JSON lines instead of human-readable output.
    pub json: bool,
}

impl Config {
    /// Validates the configuration.
    pub fn validate(&self) -> Result<(), RosettaError> {
        if self.resolver.language.trim().is_empty() {
            return Err(RosettaError::Config(
                "Resolver language cannot be empty".to_string(),
            ));
        }

        if self
            .resolver
            .fallback_language
            .as_deref()
            .is_some_and(|tag| tag.trim().is_empty())
        {
            return Err(RosettaError::Config(
                "Fallback language cannot be empty when set".to_string(),
            ));
        }

        if self.resolver.catalog.as_os_str().is_empty() {
            return Err(RosettaError::Config(
                "Catalog path cannot be empty".to_string(),
            ));
        }

        Ok(())
    }
}
