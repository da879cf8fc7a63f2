//! Integration tests for rosetta-config crate.

use rosetta_common::test_utils::catalog_fixtures::{
    write_fixture, SAMPLE_CATALOG_JSON, SAMPLE_CATALOG_TOML, SAMPLE_CATALOG_YAML,
};
use rosetta_common::test_utils::create_temp_dir;
use rosetta_common::RosettaError;
use rosetta_config::{CatalogCache, CatalogLoader, Config, ConfigLoader, ConfigValidator};
use rosetta_i18n::{params, MissingParamPolicy, Translator};
use std::sync::Arc;

#[tokio::test]
async fn test_load_config_file() {
    let dir = create_temp_dir();
    let path = write_fixture(
        dir.path(),
        "rosetta.toml",
        r#"
[resolver]
language = "es-MX"
fallback_language = "en"
catalog = "locales/app.yaml"
missing_params = "keep_placeholder"

[logging]
level = "debug"
"#,
    );

    let config = ConfigLoader::new(&path).load().await.unwrap();
    assert_eq!(config.resolver.fallback_language.as_deref(), Some("en"));
    assert_eq!(config.resolver.catalog.to_str(), Some("locales/app.yaml"));
    assert_eq!(config.resolver.missing_params, MissingParamPolicy::KeepPlaceholder);
    assert_eq!(config.logging.level, "debug");
    assert!(!config.logging.json);
    assert!(ConfigValidator::validate(&config).is_ok());
}

#[tokio::test]
async fn test_missing_config_file_uses_defaults() {
    let dir = create_temp_dir();
    let loader = ConfigLoader::new(dir.path().join("absent.toml"));

    assert!(matches!(loader.load().await, Err(RosettaError::Io(_))));

    let config = loader.load_or_default().await.unwrap();
    assert_eq!(config.resolver.catalog, Config::default().resolver.catalog);
}

#[tokio::test]
async fn test_invalid_config_file_is_rejected() {
    let dir = create_temp_dir();
    let path = write_fixture(dir.path(), "rosetta.toml", "[resolver]\nlanguage = \"\"\n");
    assert!(matches!(
        ConfigLoader::new(&path).load().await,
        Err(RosettaError::Config(_))
    ));

    let path = write_fixture(dir.path(), "broken.toml", "[resolver\n");
    assert!(matches!(
        ConfigLoader::new(&path).load().await,
        Err(RosettaError::Serialization(_))
    ));
}

#[tokio::test]
async fn test_catalog_formats_load_identically() {
    let dir = create_temp_dir();
    let json = CatalogLoader::load(write_fixture(dir.path(), "c.json", SAMPLE_CATALOG_JSON))
        .await
        .unwrap();
    let yaml = CatalogLoader::load(write_fixture(dir.path(), "c.yml", SAMPLE_CATALOG_YAML))
        .await
        .unwrap();
    let toml = CatalogLoader::load(write_fixture(dir.path(), "c.toml", SAMPLE_CATALOG_TOML))
        .await
        .unwrap();

    for catalog in [&json, &yaml, &toml] {
        assert_eq!(catalog.languages(), vec!["en", "es"]);
        assert_eq!(catalog.table("en"), json.table("en"));
        assert_eq!(catalog.table("es"), json.table("es"));
        assert!(ConfigValidator::validate_catalog(catalog).is_ok());
    }
}

#[tokio::test]
async fn test_catalog_errors_name_the_file() {
    let dir = create_temp_dir();
    let path = write_fixture(dir.path(), "broken.json", "{ \"en\": ");

    match CatalogLoader::load(&path).await {
        Err(RosettaError::Catalog(message)) => assert!(message.contains("broken.json")),
        other => panic!("expected catalog error, got {other:?}"),
    }

    let path = write_fixture(dir.path(), "catalog.ini", "");
    assert!(CatalogLoader::load(&path).await.is_err());
}

#[tokio::test]
async fn test_loaded_catalog_drives_translator() {
    let dir = create_temp_dir();
    let path = write_fixture(dir.path(), "catalog.json", SAMPLE_CATALOG_JSON);
    let catalog = CatalogLoader::load(&path).await.unwrap();

    let translator = Translator::new(&catalog, "es-MX", Some("en"));
    assert_eq!(translator.text("farewell"), "Adiós");

    let params = params! { "user" => "Ana" };
    let greeting = translator.translate("greet", Some(&params), None);
    assert_eq!(greeting.into_string(), "Hi Ana");

    let params = params! { "count" => 3 };
    let items = translator.translate(
        ["itemSingular", "itemPlural", "count"],
        Some(&params),
        None,
    );
    assert_eq!(items.into_string(), "3 elementos");
}

#[tokio::test]
async fn test_cache_reload_swaps_catalog() {
    let dir = create_temp_dir();
    let cache = CatalogCache::default();
    assert!(cache.get().languages().is_empty());

    let path = write_fixture(dir.path(), "catalog.json", SAMPLE_CATALOG_JSON);
    cache.reload(&path).await.unwrap();

    let snapshot = cache.get();
    assert_eq!(snapshot.languages(), vec!["en", "es"]);

    let broken = write_fixture(
        dir.path(),
        "broken.json",
        r#"{ "options": { "plural_rule": "n +" } }"#,
    );
    assert!(cache.reload(&broken).await.is_err());
    assert_eq!(cache.get().languages(), vec!["en", "es"]);

    let replacement = write_fixture(dir.path(), "fr.json", r#"{ "fr": { "farewell": "Au revoir" } }"#);
    cache.reload(&replacement).await.unwrap();
    assert_eq!(cache.get().languages(), vec!["fr"]);

    // Snapshots taken before the swap keep the old tables.
    assert_eq!(snapshot.languages(), vec!["en", "es"]);
}

#[test]
fn test_cache_concurrent_reads() {
    let catalog = tokio_test::block_on(async {
        let dir = create_temp_dir();
        let path = write_fixture(dir.path(), "catalog.yaml", SAMPLE_CATALOG_YAML);
        CatalogLoader::load(&path).await.unwrap()
    });
    let cache = Arc::new(CatalogCache::new(catalog));

    let handles: Vec<_> = (0..8)
        .map(|_| {
            let cache = Arc::clone(&cache);
            std::thread::spawn(move || {
                let catalog = cache.get();
                let translator = Translator::new(&catalog, "en", None);
                translator.text("farewell")
            })
        })
        .collect();

    for handle in handles {
        assert_eq!(handle.join().unwrap(), "Goodbye");
    }
}
