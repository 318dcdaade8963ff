use super::unit::Unit;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, PoisonError, RwLock};
use tracing::info;

static LAST_ISSUED: AtomicU64 = AtomicU64::new(0);

/// Token identifying one immutable catalog snapshot. Paging sessions echo it back.
///
/// Tokens are load times in microseconds since the epoch, so a restarted process or another
/// replica never reissues a token a client may still hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SnapshotVersion(pub u64);

impl SnapshotVersion {
    /// Issues the token for a snapshot loaded at `at`, bumped past the last token `last` saw.
    fn issue(last: &AtomicU64, at: DateTime<Utc>) -> Self {
        let stamp = u64::try_from(at.timestamp_micros()).unwrap_or_default();
        let bump = |previous: u64| Some(stamp.max(previous + 1));
        match last.fetch_update(Ordering::Relaxed, Ordering::Relaxed, bump) {
            Ok(previous) | Err(previous) => Self(stamp.max(previous + 1)),
        }
    }
}

impl fmt::Display for SnapshotVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "v{}", self.0)
    }
}

/// Point-in-time view of the unit catalog. Never mutated after construction.
#[derive(Debug)]
pub struct CatalogSnapshot {
    version: SnapshotVersion,
    loaded_at: DateTime<Utc>,
    source: String,
    units: Vec<Unit>,
    skipped_rows: usize,
}

impl CatalogSnapshot {
    pub fn new(source: impl Into<String>, units: Vec<Unit>, skipped_rows: usize) -> Self {
        let loaded_at = Utc::now();
        Self {
            version: SnapshotVersion::issue(&LAST_ISSUED, loaded_at),
            loaded_at,
            source: source.into(),
            units,
            skipped_rows,
        }
    }

    pub fn version(&self) -> SnapshotVersion {
        self.version
    }

    pub fn units(&self) -> &[Unit] {
        &self.units
    }

    pub fn status(&self) -> CatalogStatus {
        CatalogStatus {
            snapshot_version: self.version,
            units: self.units.len(),
            skipped_rows: self.skipped_rows,
            source: self.source.clone(),
            loaded_at: self.loaded_at,
        }
    }
}

/// Public metadata describing the installed snapshot.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CatalogStatus {
    pub snapshot_version: SnapshotVersion,
    pub units: usize,
    pub skipped_rows: usize,
    pub source: String,
    pub loaded_at: DateTime<Utc>,
}

/// Holder for the current snapshot. Installing swaps one `Arc`, so readers see either the old
/// or the new catalog in full.
#[derive(Debug, Default)]
pub struct CatalogStore {
    current: RwLock<Option<Arc<CatalogSnapshot>>>,
}

impl CatalogStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_snapshot(snapshot: CatalogSnapshot) -> Self {
        let store = Self::new();
        store.install(snapshot);
        store
    }

    pub fn install(&self, snapshot: CatalogSnapshot) -> Arc<CatalogSnapshot> {
        let snapshot = Arc::new(snapshot);
        let previous = {
            let mut guard = self.current.write().unwrap_or_else(PoisonError::into_inner);
            guard.replace(snapshot.clone())
        };

        info!(
            version = %snapshot.version(),
            units = snapshot.units().len(),
            replaced = ?previous.map(|old| old.version()),
            "catalog snapshot installed"
        );
        snapshot
    }

    pub fn current(&self) -> Option<Arc<CatalogSnapshot>> {
        self.current
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn is_loaded(&self) -> bool {
        self.current().is_some()
    }
}
