use std::path::PathBuf;
use std::sync::Arc;

use tracing::{info, warn};

use super::domain::{RecommendRequest, RecommendationPage};
use super::engine;
use super::RecommendError;
use crate::catalog::{CatalogError, CatalogLoader, CatalogStatus, CatalogStore};

pub const DEFAULT_PAGE_SIZE: usize = 10;

/// Service composing the snapshot store with the stateless ranking engine.
pub struct RecommendationService {
    store: Arc<CatalogStore>,
    page_size: usize,
    catalog_path: Option<PathBuf>,
}

impl RecommendationService {
    pub fn new(store: Arc<CatalogStore>, page_size: usize) -> Self {
        Self {
            store,
            page_size,
            catalog_path: None,
        }
    }

    pub fn with_catalog_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.catalog_path = Some(path.into());
        self
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    pub fn store(&self) -> &Arc<CatalogStore> {
        &self.store
    }

    /// Rank the current snapshot. A request pinned to an older snapshot is rejected so a paging
    /// session never mixes catalogs.
    pub fn recommend(
        &self,
        request: &RecommendRequest,
    ) -> Result<RecommendationPage, RecommendError> {
        let snapshot = self
            .store
            .current()
            .ok_or(RecommendError::CatalogUnavailable)?;

        if let Some(requested) = request.snapshot_version {
            if requested != snapshot.version() {
                return Err(RecommendError::SnapshotMismatch {
                    requested,
                    current: snapshot.version(),
                });
            }
        }

        engine::recommend(&snapshot, request, self.page_size)
    }

    pub fn catalog_status(&self) -> Option<CatalogStatus> {
        self.store.current().map(|snapshot| snapshot.status())
    }

    /// Re-read the configured export and install it as the new snapshot.
    /// The previous snapshot stays in place when loading fails.
    pub fn reload(&self) -> Result<CatalogStatus, CatalogError> {
        let path = self.catalog_path.as_ref().ok_or(CatalogError::NoSource)?;
        match CatalogLoader::from_path(path) {
            Ok(snapshot) => {
                let installed = self.store.install(snapshot);
                info!(path = %path.display(), version = %installed.version(), "catalog reloaded");
                Ok(installed.status())
            }
            Err(err) => {
                warn!(path = %path.display(), error = %err, "catalog reload failed");
                Err(err)
            }
        }
    }
}
