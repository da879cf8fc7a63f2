//! Config loading, logging setup and the resolve pipeline.

use crate::args::Args;
use anyhow::{Context, Result};
use rosetta_config::{
    CatalogLoader, Config, ConfigLoader, ConfigValidator, LoggingConfig, DEFAULT_CONFIG_PATH,
};
use rosetta_i18n::{LookupKey, NoContent, ParamValue, Params, Translator};
use std::path::PathBuf;
use tracing::{debug, Subscriber};
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Level used before the configuration has been read.
pub const BOOTSTRAP_LOG_LEVEL: &str = "info";

/// Loads configuration and applies command line overrides.
///
/// An explicit `--config` file must exist. The default file is optional.
pub async fn load_config(args: &Args) -> Result<Config> {
    let (path, explicit) = match &args.config {
        Some(path) => (path.clone(), true),
        None => (PathBuf::from(DEFAULT_CONFIG_PATH), false),
    };
    let loader = ConfigLoader::new(&path);

    let mut config = if explicit {
        loader.load().await
    } else {
        loader.load_or_default().await
    }
    .with_context(|| format!("Failed to load configuration from {}", path.display()))?;

    if let Some(catalog) = &args.catalog {
        config.resolver.catalog.clone_from(catalog);
    }
    if let Some(language) = &args.language {
        config.resolver.language.clone_from(language);
    }
    if let Some(fallback) = &args.fallback {
        config.resolver.fallback_language = Some(fallback.clone());
    }
    if let Some(level) = &args.log_level {
        config.logging.level.clone_from(level);
    }

    ConfigValidator::validate(&config).context("Invalid configuration")?;
    Ok(config)
}

/// Subscriber for the events emitted while the configuration is loaded.
///
/// The configured level is not known yet, so `RUST_LOG`, then `--log-level`,
/// then [`BOOTSTRAP_LOG_LEVEL`] decide what is shown.
pub fn bootstrap_subscriber<W>(args: &Args, writer: W) -> impl Subscriber + Send + Sync + 'static
where
    W: for<'w> MakeWriter<'w> + Send + Sync + 'static,
{
    let level = args
        .log_level
        .as_deref()
        .unwrap_or(BOOTSTRAP_LOG_LEVEL)
        .to_ascii_lowercase();
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(writer)
        .finish()
}

/// Installs the global tracing subscriber, writing to stderr.
///
/// `RUST_LOG` wins over the configured level when set.
pub fn init_logging(logging: &LoggingConfig) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(logging.level.to_ascii_lowercase()));
    let registry = tracing_subscriber::registry().with(filter);

    if logging.json {
        registry
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .try_init()?;
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .try_init()?;
    }
    Ok(())
}

/// Turns `name=value` pairs into parameters.
///
/// Values that read as finite numbers are passed as numbers so that plural
/// rules can compare them. Everything else stays text.
pub fn build_params(pairs: &[(String, String)]) -> Params<NoContent> {
    pairs
        .iter()
        .map(|(name, value)| {
            let value = match value.trim().parse::<f64>() {
                Ok(n) if n.is_finite() => ParamValue::Number(n),
                _ => ParamValue::Text(value.clone()),
            };
            (name.clone(), value)
        })
        .collect()
}

/// Loads the configured catalog and resolves the key named in `args`.
pub async fn resolve(args: &Args, config: &Config) -> Result<String> {
    let path = &config.resolver.catalog;
    let catalog = CatalogLoader::load(path)
        .await
        .with_context(|| format!("Failed to load catalog {}", path.display()))?;
    ConfigValidator::validate_catalog(&catalog)
        .with_context(|| format!("Invalid catalog {}", path.display()))?;

    let translator = Translator::new(
        &catalog,
        &config.resolver.language,
        config.resolver.fallback_language.as_deref(),
    )
    .with_missing_params(config.resolver.missing_params);
    debug!(
        language = translator.language(),
        primary = translator.has_primary_table(),
        fallback = translator.has_fallback_table(),
        "Translator ready"
    );

    let parts = args.key_parts();
    let key = if args.plural {
        LookupKey::from(&parts)
    } else {
        LookupKey::Single(&args.key)
    };

    let params = build_params(&args.params);
    let resolution = translator.resolve(
        key,
        (!params.is_empty()).then_some(&params),
        args.comment.as_deref(),
    );
    debug!(key = %resolution.key, source = ?resolution.source, "Resolved message");

    Ok(resolution.message.into_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use rosetta_common::test_utils::catalog_fixtures::{write_fixture, SAMPLE_CATALOG_JSON};
    use rosetta_common::test_utils::{create_temp_dir, LogBuffer};
    use tracing::instrument::WithSubscriber;
    use rosetta_i18n::MissingParamPolicy;

    fn args(extra: &[&str]) -> Args {
        Args::try_parse_from(std::iter::once("rosetta").chain(extra.iter().copied())).unwrap()
    }

    #[tokio::test]
    async fn test_config_loading_is_logged_through_bootstrap_subscriber() {
        let dir = create_temp_dir();
        let path = write_fixture(dir.path(), "rosetta.toml", "[resolver]\nlanguage = \"en\"\n");
        let config_arg = path.to_string_lossy().to_string();
        let args = args(&["--config", &config_arg, "--log-level", "info", "greet"]);

        let buffer = LogBuffer::default();
        let subscriber = bootstrap_subscriber(&args, buffer.clone());
        load_config(&args).with_subscriber(subscriber).await.unwrap();

        assert!(
            buffer.contents().contains("Loaded configuration"),
            "expected the load event, got {:?}",
            buffer.lines()
        );
    }

    #[test]
    fn test_build_params() {
        let params = build_params(&[
            ("count".to_string(), "3".to_string()),
            ("user".to_string(), "Ana".to_string()),
            ("big".to_string(), "inf".to_string()),
        ]);

        assert_eq!(params.get("count"), Some(&ParamValue::Number(3.0)));
        assert_eq!(params.get("user"), Some(&ParamValue::Text("Ana".to_string())));
        assert_eq!(params.get("big"), Some(&ParamValue::Text("inf".to_string())));
    }

    #[tokio::test]
    async fn test_load_config_with_overrides() {
        let dir = create_temp_dir();
        let path = write_fixture(
            dir.path(),
            "rosetta.toml",
            "[resolver]\nlanguage = \"en\"\nmissing_params = \"empty\"\n",
        );
        let config_arg = path.to_string_lossy().to_string();

        let config = load_config(&args(&[
            "--config",
            &config_arg,
            "--lang",
            "es-MX",
            "--fallback",
            "en",
            "--log-level",
            "debug",
            "greet",
        ]))
        .await
        .unwrap();

        assert_eq!(config.resolver.language, "es-MX");
        assert_eq!(config.resolver.fallback_language.as_deref(), Some("en"));
        assert_eq!(config.resolver.missing_params, MissingParamPolicy::Empty);
        assert_eq!(config.logging.level, "debug");
    }

    #[tokio::test]
    async fn test_explicit_config_must_exist() {
        let dir = create_temp_dir();
        let missing = dir.path().join("missing.toml").to_string_lossy().to_string();
        assert!(load_config(&args(&["--config", &missing, "greet"])).await.is_err());
    }

    #[tokio::test]
    async fn test_resolve_end_to_end() {
        let dir = create_temp_dir();
        let catalog = write_fixture(dir.path(), "catalog.json", SAMPLE_CATALOG_JSON);

        let mut config = Config::default();
        config.resolver.catalog = catalog;
        config.resolver.language = "es-MX".to_string();
        config.resolver.fallback_language = Some("en".to_string());

        let greeting = resolve(&args(&["-p", "user=Ana", "greet"]), &config).await.unwrap();
        assert_eq!(greeting, "Hi Ana");

        let items = resolve(
            &args(&["-p", "count=1", "--plural", "itemSingular,itemPlural,count"]),
            &config,
        )
        .await
        .unwrap();
        assert_eq!(items, "1 elemento");

        let raw = resolve(&args(&["greet"]), &config).await.unwrap();
        assert_eq!(raw, "Hi {user}");

        let absent = resolve(&args(&["no.such.key"]), &config).await.unwrap();
        assert_eq!(absent, "no.such.key");
    }

    #[tokio::test]
    async fn test_resolve_reports_missing_catalog() {
        let dir = create_temp_dir();
        let mut config = Config::default();
        config.resolver.catalog = dir.path().join("absent.json");

        let err = resolve(&args(&["greet"]), &config).await.unwrap_err();
        assert!(err.to_string().contains("absent.json"));
    }
}
