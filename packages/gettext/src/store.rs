//! Swappable current catalog
//!
//! Holds the catalog the application is currently translating with. Readers
//! take a [`Gettext`] snapshot and keep using it even if another thread
//! installs a new catalog in the meantime.
//!
//! - `snapshot()`: wait-free, one `Arc` clone.
//! - `replace()`: allocates one `Arc`, atomically swaps.

use arc_swap::ArcSwap;
use std::sync::Arc;

use crate::catalog::{Catalog, PoJson};
use crate::config::GettextConfig;
use crate::error::Result;
use crate::gettext::Gettext;

pub struct CatalogStore {
    inner: ArcSwap<Catalog>,
    config: GettextConfig,
}

impl CatalogStore {
    pub fn new(catalog: Catalog) -> Self {
        Self::with_config(catalog, GettextConfig::default())
    }

    /// `config` is applied to every catalog later installed through
    /// [`load_po`](Self::load_po) or [`load_json`](Self::load_json).
    pub fn with_config(catalog: Catalog, config: GettextConfig) -> Self {
        Self {
            inner: ArcSwap::from_pointee(catalog),
            config,
        }
    }

    /// Engine over the catalog current at the time of the call.
    pub fn snapshot(&self) -> Gettext {
        Gettext::from_shared(self.inner.load_full())
    }

    /// Read without cloning. Prefer this for a single short lookup.
    pub fn load_ref(&self) -> arc_swap::Guard<Arc<Catalog>> {
        self.inner.load()
    }

    /// Install `catalog`, returning the one it replaced.
    pub fn replace(&self, catalog: Catalog) -> Arc<Catalog> {
        let next = Arc::new(catalog);
        let previous = self.inner.swap(Arc::clone(&next));
        tracing::debug!(from = %previous.lang(), to = %next.lang(), "replaced catalog");
        previous
    }

    /// Compile `po` and install it. On error the current catalog stays.
    pub fn load_po(&self, po: PoJson) -> Result<()> {
        let catalog = Catalog::compile_with(po, &self.config)?;
        self.replace(catalog);
        Ok(())
    }

    pub fn load_json(&self, json: &str) -> Result<()> {
        let catalog = Catalog::from_json_with(json, &self.config)?;
        self.replace(catalog);
        Ok(())
    }

    pub fn config(&self) -> &GettextConfig {
        &self.config
    }
}

impl Default for CatalogStore {
    fn default() -> Self {
        Self::new(Catalog::default())
    }
}

impl std::fmt::Debug for CatalogStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CatalogStore")
            .field("lang", &self.inner.load().lang())
            .field("config", &self.config)
            .finish()
    }
}
