//! Configuration and catalog loading.

use crate::schema::Config;
use rosetta_common::{Result, RosettaError};
use rosetta_i18n::Catalog;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Environment variable overriding the requested language.
pub const ENV_LANGUAGE: &str = "ROSETTA_LANGUAGE";
/// Environment variable overriding the fallback language.
pub const ENV_FALLBACK_LANGUAGE: &str = "ROSETTA_FALLBACK_LANGUAGE";
/// Environment variable overriding the catalog path.
pub const ENV_CATALOG: &str = "ROSETTA_CATALOG";

/// Configuration loader for TOML files.
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    path: PathBuf,
}

impl ConfigLoader {
    /// Creates a new configuration loader.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// The file this loader reads.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Loads configuration from file, applies environment overrides and
    /// validates the result.
    pub async fn load(&self) -> Result<Config> {
        let content = tokio::fs::read_to_string(&self.path).await?;
        let mut config = Self::parse(&content)?;
        config.apply_env_overrides();
        config.validate()?;

        info!("Loaded configuration from {}", self.path.display());
        Ok(config)
    }

    /// Like [`ConfigLoader::load`], but starts from defaults when the file
    /// does not exist.
    pub async fn load_or_default(&self) -> Result<Config> {
        if tokio::fs::try_exists(&self.path).await? {
            return self.load().await;
        }

        debug!(
            "Configuration file {} not found, using defaults",
            self.path.display()
        );
        let mut config = Config::default();
        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    /// Parses configuration from TOML text.
    pub fn parse(content: &str) -> Result<Config> {
        toml::from_str(content).map_err(|e| RosettaError::Serialization(e.to_string()))
    }
}

impl Config {
    /// Applies `ROSETTA_*` environment variables on top of the loaded values.
    pub fn apply_env_overrides(&mut self) {
        self.apply_overrides_from(|name| std::env::var(name).ok());
    }

    /// Applies overrides read through `lookup`, keyed by environment variable name.
    pub fn apply_overrides_from(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(language) = lookup(ENV_LANGUAGE) {
            self.resolver.language = language;
        }
        if let Some(fallback) = lookup(ENV_FALLBACK_LANGUAGE) {
            self.resolver.fallback_language = Some(fallback).filter(|tag| !tag.is_empty());
        }
        if let Some(catalog) = lookup(ENV_CATALOG) {
            self.resolver.catalog = PathBuf::from(catalog);
        }
    }
}

/// Supported catalog document formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CatalogFormat {
    /// JSON document.
    Json,
    /// YAML document.
    Yaml,
    /// TOML document.
    Toml,
}

impl CatalogFormat {
    /// Picks the format from a file extension.
    pub fn from_path(path: &Path) -> Result<Self> {
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase);

        match extension.as_deref() {
            Some("json") => Ok(Self::Json),
            Some("yaml" | "yml") => Ok(Self::Yaml),
            Some("toml") => Ok(Self::Toml),
            _ => Err(RosettaError::UnsupportedFormat(path.display().to_string())),
        }
    }
}

/// Catalog document loader.
#[derive(Debug)]
pub struct CatalogLoader;

impl CatalogLoader {
    /// Loads a catalog, choosing the format from the file extension.
    pub async fn load(path: impl AsRef<Path>) -> Result<Catalog> {
        let path = path.as_ref();
        let format = CatalogFormat::from_path(path)?;
        let content = tokio::fs::read_to_string(path).await?;

        let catalog = Self::parse(&content, format)
            .map_err(|e| RosettaError::Catalog(format!("{}: {e}", path.display())))?;

        info!(
            languages = ?catalog.languages(),
            "Loaded catalog from {}",
            path.display()
        );
        Ok(catalog)
    }

    /// Parses a catalog document.
    pub fn parse(content: &str, format: CatalogFormat) -> Result<Catalog> {
        let parsed = match format {
            CatalogFormat::Json => serde_json::from_str(content).map_err(|e| e.to_string()),
            CatalogFormat::Yaml => serde_yaml::from_str(content).map_err(|e| e.to_string()),
            CatalogFormat::Toml => toml::from_str(content).map_err(|e| e.to_string()),
        };
        parsed.map_err(RosettaError::Serialization)
    }
}
