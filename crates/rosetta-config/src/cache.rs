//! Thread-safe catalog caching with arc-swap for lock-free reads.

use crate::loader::CatalogLoader;
use crate::validator::ConfigValidator;
use arc_swap::ArcSwap;
use rosetta_common::Result;
use rosetta_i18n::Catalog;
use std::path::Path;
use std::sync::Arc;
use tracing::info;

/// Shared catalog that can be replaced while readers hold snapshots.
///
/// Translators borrow from the `Arc<Catalog>` returned by [`CatalogCache::get`],
/// so a swap never changes what an existing translator sees.
#[derive(Debug)]
pub struct CatalogCache {
    catalog: ArcSwap<Catalog>,
}

impl CatalogCache {
    /// Creates a new catalog cache with the given initial catalog.
    pub fn new(catalog: Catalog) -> Self {
        Self {
            catalog: ArcSwap::from_pointee(catalog),
        }
    }

    /// Gets the current catalog.
    pub fn get(&self) -> Arc<Catalog> {
        self.catalog.load_full()
    }

    /// Replaces the catalog atomically.
    pub fn update(&self, catalog: Catalog) {
        self.catalog.store(Arc::new(catalog));
    }

    /// Loads and validates a catalog file, then swaps it in.
    ///
    /// On failure the current catalog stays in place.
    pub async fn reload(&self, path: impl AsRef<Path>) -> Result<()> {
        let catalog = CatalogLoader::load(path.as_ref()).await?;
        ConfigValidator::validate_catalog(&catalog)?;
        self.update(catalog);
        info!("Swapped in catalog from {}", path.as_ref().display());
        Ok(())
    }
}

impl Default for CatalogCache {
    fn default() -> Self {
        Self::new(Catalog::default())
    }
}
