//! Resale unit catalog: the processed CSV loader and the snapshot store that serves requests.

mod normalizer;
mod parser;
mod snapshot;
pub mod unit;

pub(crate) use normalizer::{normalize_flat_type, normalize_label};
pub use snapshot::{CatalogSnapshot, CatalogStatus, CatalogStore, SnapshotVersion};
pub use unit::{Unit, UnitId, UnitRejection, MAX_LEASE_YEARS};

use std::io::Read;
use std::path::Path;
use tracing::info;

/// Failures while reading a catalog export.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("failed to read catalog export: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid catalog CSV data: {0}")]
    Csv(#[from] csv::Error),
    #[error("catalog export '{source_label}' contained no usable units ({skipped_rows} rows skipped)")]
    NoUnits {
        source_label: String,
        skipped_rows: usize,
    },
    #[error("no catalog source configured")]
    NoSource,
}

pub struct CatalogLoader;

impl CatalogLoader {
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<CatalogSnapshot, CatalogError> {
        let path = path.as_ref();
        let file = std::fs::File::open(path)?;
        Self::from_reader(file, path.display().to_string())
    }

    pub fn from_reader<R: Read>(
        reader: R,
        source_label: impl Into<String>,
    ) -> Result<CatalogSnapshot, CatalogError> {
        let source_label = source_label.into();
        let parsed = parser::parse_units(reader)?;

        if parsed.units.is_empty() {
            return Err(CatalogError::NoUnits {
                source_label,
                skipped_rows: parsed.skipped_rows,
            });
        }

        info!(
            source = %source_label,
            units = parsed.units.len(),
            skipped = parsed.skipped_rows,
            "catalog export parsed"
        );

        Ok(CatalogSnapshot::new(
            source_label,
            parsed.units,
            parsed.skipped_rows,
        ))
    }
}
