//! Catalog ingestion: load each platform's snapshot, normalize it, and write
//! the combined batch to the store.

pub mod source;

use serde::Serialize;
use tracing::{info, instrument};

use crate::database_ops::games::{GameStore, StoreError};
use crate::models::{CatalogEntry, Platform};
use crate::normalization::{normalize_with_report, NormalizeReport};
pub use source::{CatalogSource, JsonDirSource, SourceError, StaticSource};

#[derive(Debug, thiserror::Error)]
pub enum IngestError {
    #[error(transparent)]
    Source(#[from] SourceError),
    #[error(transparent)]
    Store(#[from] StoreError),
}

#[derive(Debug, Clone, Serialize)]
pub struct PlatformReport {
    pub platform: Platform,
    #[serde(flatten)]
    pub report: NormalizeReport,
}

#[derive(Debug, Clone, Serialize)]
pub struct PopulateSummary {
    pub inserted: u64,
    pub platforms: Vec<PlatformReport>,
}

/// Normalized batch ready for insertion: ios entries first, then android.
#[derive(Debug, Clone)]
pub struct PreparedBatch {
    pub entries: Vec<CatalogEntry>,
    pub platforms: Vec<PlatformReport>,
}

/// Load and normalize every platform without touching the store.
pub fn prepare(source: &dyn CatalogSource) -> Result<PreparedBatch, SourceError> {
    let mut entries = Vec::new();
    let mut platforms = Vec::with_capacity(Platform::ALL.len());
    for platform in Platform::ALL {
        let batches = source.load(platform)?;
        let (normalized, report) = normalize_with_report(&batches, platform);
        info!(
            platform = %platform,
            seen = report.records_seen,
            duplicates = report.duplicates_dropped,
            kept = report.kept,
            "normalized platform catalog"
        );
        entries.extend(normalized);
        platforms.push(PlatformReport { platform, report });
    }
    Ok(PreparedBatch { entries, platforms })
}

/// Ingest both platform catalogs into `store` in a single bulk insert.
///
/// Uniqueness is only guaranteed within this run; re-running inserts the
/// catalogs again.
#[instrument(skip_all)]
pub async fn populate(
    source: &dyn CatalogSource,
    store: &dyn GameStore,
) -> Result<PopulateSummary, IngestError> {
    let PreparedBatch { entries, platforms } = prepare(source)?;
    let inserted = store.bulk_insert(&entries).await?;
    info!("Added {} games in db", inserted);
    Ok(PopulateSummary {
        inserted,
        platforms,
    })
}
