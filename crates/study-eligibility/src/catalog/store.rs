use super::Catalog;
use std::sync::{Arc, PoisonError, RwLock};

/// Holds the current catalog snapshot.
///
/// Readers clone the `Arc` and keep evaluating against it even if a reload
/// swaps in a newer catalog halfway through.
#[derive(Debug, Default)]
pub struct CatalogStore {
    current: RwLock<Option<Arc<Catalog>>>,
}

impl CatalogStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current snapshot, or an empty catalog before the first load.
    pub fn snapshot(&self) -> Arc<Catalog> {
        self.current
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
            .unwrap_or_else(|| Arc::new(Catalog::empty()))
    }

    pub fn replace(&self, catalog: Catalog) -> Arc<Catalog> {
        let catalog = Arc::new(catalog);
        *self.current.write().unwrap_or_else(PoisonError::into_inner) = Some(catalog.clone());
        catalog
    }

    pub fn is_loaded(&self) -> bool {
        self.current
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .is_some()
    }
}
