//! Catalog normalization: turns a platform's raw nested top-chart snapshot into
//! a deduplicated, ranked, storage-ready batch.
//!
//! Pipeline, in order: flatten, dedup by `app_id` (first occurrence wins),
//! stable sort by rating (highest first, unrated last), truncate to
//! [`CATALOG_TOP_N`], shape into [`CatalogEntry`]. Pure; no I/O.

pub mod rating;
pub mod record;

use itertools::Itertools;
use serde::Serialize;
use tracing::warn;

use crate::models::{CatalogEntry, Platform};
pub use record::{CatalogNode, RawGameRecord};

/// Maximum entries kept per platform per ingestion run.
pub const CATALOG_TOP_N: usize = 100;

/// Counters describing what normalization dropped and why.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct NormalizeReport {
    pub records_seen: usize,
    pub malformed_skipped: usize,
    pub missing_app_id: usize,
    pub duplicates_dropped: usize,
    pub truncated: usize,
    pub kept: usize,
}

/// Normalize one platform's snapshot. See [`normalize_with_report`].
pub fn normalize(batches: &[CatalogNode], platform: Platform) -> Vec<CatalogEntry> {
    normalize_with_report(batches, platform).0
}

pub fn normalize_with_report(
    batches: &[CatalogNode],
    platform: Platform,
) -> (Vec<CatalogEntry>, NormalizeReport) {
    let mut report = NormalizeReport::default();

    let mut flat: Vec<&RawGameRecord> = Vec::new();
    flatten_into(batches, &mut flat, &mut report);
    report.records_seen = flat.len();

    let keyed: Vec<&RawGameRecord> = flat
        .into_iter()
        .filter(|r| {
            if r.app_id.is_none() {
                report.missing_app_id += 1;
                return false;
            }
            true
        })
        .collect();
    let keyed_len = keyed.len();

    let mut ranked: Vec<&RawGameRecord> = keyed
        .into_iter()
        .unique_by(|r| r.app_id.clone())
        .collect();
    report.duplicates_dropped = keyed_len - ranked.len();

    // stable: equal ratings keep source order
    ranked.sort_by(|a, b| rating::rank_order(a.rating, b.rating));

    report.truncated = ranked.len().saturating_sub(CATALOG_TOP_N);
    ranked.truncate(CATALOG_TOP_N);

    let entries: Vec<CatalogEntry> = ranked
        .into_iter()
        .map(|r| shape(r, platform))
        .collect();
    report.kept = entries.len();

    if report.malformed_skipped > 0 || report.missing_app_id > 0 {
        warn!(
            platform = %platform,
            malformed = report.malformed_skipped,
            missing_app_id = report.missing_app_id,
            "skipped unusable catalog records"
        );
    }

    (entries, report)
}

fn flatten_into<'a>(
    nodes: &'a [CatalogNode],
    out: &mut Vec<&'a RawGameRecord>,
    report: &mut NormalizeReport,
) {
    for node in nodes {
        match node {
            CatalogNode::Batch(inner) => flatten_into(inner, out, report),
            CatalogNode::Record(record) => out.push(record),
            CatalogNode::Malformed(_) => report.malformed_skipped += 1,
        }
    }
}

fn shape(record: &RawGameRecord, platform: Platform) -> CatalogEntry {
    CatalogEntry {
        publisher_id: record.publisher_id.clone(),
        name: record.name.clone(),
        platform,
        store_id: record.store_app_id.clone(),
        bundle_id: record.bundle_id.clone(),
        app_version: record.version.clone(),
        is_published: true,
    }
}
