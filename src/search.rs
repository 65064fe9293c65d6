//! Per-request search pipeline: scan, join, truncate.

use std::path::Path;
use std::sync::Arc;
use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};
use tracing::{info, instrument, warn};

use crate::corpus::{scan, ScanOptions};
use crate::error::{LemmataError, Result};
use crate::metadata::MetadataCatalog;
use crate::types::SentenceRecord;

const BYTES_PER_MB: f64 = 1024.0 * 1024.0;

/// A validated search request.
#[derive(Debug, Clone)]
pub struct SearchRequest {
    pub terms: Vec<String>,
    pub subcorpus_only: bool,
}

/// Body of a successful search response.
#[derive(Debug, Serialize, Deserialize)]
pub struct SearchResponse {
    /// Total matches before truncation.
    pub count: usize,
    /// Elapsed wall-clock seconds, two decimals.
    pub time: f64,
    pub results: Vec<SentenceRecord>,
    /// Serialized size of `results` in MiB, formatted with two decimals.
    #[serde(rename = "responseSizeMB")]
    pub response_size_mb: String,
}

/// Settings the pipeline needs from config, detached so the scan can move to
/// a blocking thread.
#[derive(Debug, Clone)]
pub struct SearchSettings {
    pub prefix_len: usize,
    pub max_results: usize,
    pub max_response_mb: f64,
}

/// Run a full scan and collect every match.
///
/// All matches are held in memory; truncation happens in [`assemble_response`].
#[instrument(skip(catalog, request), fields(terms = request.terms.len(), subcorpus = request.subcorpus_only))]
pub fn collect_matches(
    corpus_dir: &Path,
    catalog: Arc<MetadataCatalog>,
    request: &SearchRequest,
    prefix_len: usize,
) -> Result<Vec<SentenceRecord>> {
    if request.terms.is_empty() {
        return Err(LemmataError::MissingQuery);
    }

    let options = ScanOptions {
        subcorpus_only: request.subcorpus_only,
        prefix_len,
    };
    let mut matches = scan(corpus_dir, catalog, request.terms.as_slice(), options)?;
    let results: Vec<SentenceRecord> = matches.by_ref().collect();

    let stats = matches.stats();
    info!(
        matches = results.len(),
        files_scanned = stats.files_scanned,
        files_skipped = stats.files_skipped,
        records_skipped = stats.records_skipped,
        "scan complete"
    );
    Ok(results)
}

/// Truncate the match list and compute the response summary.
///
/// An empty match list is `NoResults`.
pub fn assemble_response(
    mut matches: Vec<SentenceRecord>,
    settings: &SearchSettings,
    elapsed: Duration,
) -> Result<SearchResponse> {
    if matches.is_empty() {
        return Err(LemmataError::NoResults);
    }

    let count = matches.len();
    matches.truncate(settings.max_results);

    let size_mb = serde_json::to_vec(&matches)?.len() as f64 / BYTES_PER_MB;
    if size_mb > settings.max_response_mb {
        warn!(
            size_mb,
            limit_mb = settings.max_response_mb,
            "response payload exceeds configured limit"
        );
    }

    Ok(SearchResponse {
        count,
        time: round2(elapsed.as_secs_f64()),
        results: matches,
        response_size_mb: format!("{size_mb:.2}"),
    })
}

/// Scan, join and assemble in one call. Blocking; callers on the async
/// runtime should wrap it in `spawn_blocking`.
pub fn execute_search(
    corpus_dir: &Path,
    catalog: Arc<MetadataCatalog>,
    request: &SearchRequest,
    settings: &SearchSettings,
) -> Result<SearchResponse> {
    let start = Instant::now();
    let matches = collect_matches(corpus_dir, catalog, request, settings.prefix_len)?;
    assemble_response(matches, settings, start.elapsed())
}

fn round2(v: f64) -> f64 {
    (v * 100.0).round() / 100.0
}
