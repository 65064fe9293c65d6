//! Linear scan of the sentence corpus.
//!
//! [`scan`] lists the corpus directory eagerly and returns a
//! [`SentenceMatches`] iterator that reads one file at a time and yields each
//! matching sentence with its metadata already attached.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde_json::Value;
use tracing::{debug, warn};

use crate::corpus::file_name::parse_file_name;
use crate::corpus::normalize::{normalize, normalize_terms};
use crate::error::Result;
use crate::metadata::MetadataCatalog;
use crate::types::{SentenceRecord, WorkId};

#[derive(Debug, Clone, Copy)]
pub struct ScanOptions {
    /// Restrict the scan to works in the alternate sub-corpus.
    pub subcorpus_only: bool,
    /// Collection prefix width on each file name segment.
    pub prefix_len: usize,
}

/// Counters collected while a scan runs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScanStats {
    pub files_scanned: usize,
    pub files_skipped: usize,
    pub records_skipped: usize,
}

/// True when any normalized term occurs in the folded tokens or lemmas.
///
/// `terms` must already be normalized. Stops at the first hit.
pub fn record_matches(tokens: &str, lemmas: &str, terms: &[String]) -> bool {
    let tokens = normalize(tokens);
    let lemmas = normalize(lemmas);
    terms
        .iter()
        .any(|t| tokens.contains(t.as_str()) || lemmas.contains(t.as_str()))
}

/// List the corpus directory and prepare a lazy scan over it.
///
/// Fails only if the directory itself cannot be read; unreadable or
/// malformed files are skipped during iteration.
pub fn scan<S: AsRef<str>>(
    dir: &Path,
    catalog: Arc<MetadataCatalog>,
    terms: &[S],
    options: ScanOptions,
) -> Result<SentenceMatches> {
    let files = list_corpus_files(dir, &catalog, options)?;
    debug!(files = files.len(), dir = %dir.display(), "corpus listed");

    Ok(SentenceMatches {
        catalog,
        terms: normalize_terms(terms),
        files: files.into_iter(),
        current: None,
        stats: ScanStats::default(),
    })
}

fn list_corpus_files(
    dir: &Path,
    catalog: &MetadataCatalog,
    options: ScanOptions,
) -> Result<Vec<(PathBuf, WorkId)>> {
    let mut files = Vec::new();
    for entry in std::fs::read_dir(dir)? {
        let path = entry?.path();
        if !path.is_file() {
            continue;
        }
        let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
            continue;
        };
        if !name.ends_with(".json") {
            continue;
        }
        let id = match parse_file_name(name, options.prefix_len) {
            Ok(id) => id,
            Err(e) => {
                warn!(error = %e, "skipping corpus file");
                continue;
            }
        };
        if options.subcorpus_only && !catalog.in_subcorpus(&id) {
            continue;
        }
        files.push((path, id));
    }
    // Listing order is platform dependent; sorting keeps truncation stable.
    files.sort_by(|a, b| a.0.cmp(&b.0));
    Ok(files)
}

/// Decode a corpus file as a JSON array. Elements are validated one by one
/// during iteration, so a stray non-object entry does not cost the file.
fn read_records(path: &Path) -> Result<Vec<Value>> {
    let content = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&content)?)
}

/// Iterator over matching sentences, one corpus file in memory at a time.
pub struct SentenceMatches {
    catalog: Arc<MetadataCatalog>,
    terms: Vec<String>,
    files: std::vec::IntoIter<(PathBuf, WorkId)>,
    current: Option<(WorkId, std::vec::IntoIter<Value>)>,
    stats: ScanStats,
}

impl SentenceMatches {
    pub fn stats(&self) -> ScanStats {
        self.stats
    }
}

impl Iterator for SentenceMatches {
    type Item = SentenceRecord;

    fn next(&mut self) -> Option<SentenceRecord> {
        loop {
            if let Some((id, records)) = &mut self.current {
                for value in records.by_ref() {
                    let Value::Object(map) = value else {
                        debug!(work = %id, "non-object record");
                        self.stats.records_skipped += 1;
                        continue;
                    };
                    let record = SentenceRecord(map);
                    if record.is_empty() {
                        continue;
                    }
                    let (Some(tokens), Some(lemmas)) = (record.tokens(), record.lemmas()) else {
                        debug!(work = %id, "missing tokens or lemmas");
                        self.stats.records_skipped += 1;
                        continue;
                    };
                    if record_matches(tokens, lemmas, &self.terms) {
                        crate::metrics::RECORDS_MATCHED_TOTAL.inc();
                        let metadata = self.catalog.join(id);
                        return Some(record.with_metadata(metadata));
                    }
                }
                self.current = None;
            }

            let (path, id) = self.files.next()?;
            self.stats.files_scanned += 1;
            crate::metrics::FILES_SCANNED_TOTAL.inc();
            match read_records(&path) {
                Ok(records) => self.current = Some((id, records.into_iter())),
                Err(e) => {
                    self.stats.files_skipped += 1;
                    crate::metrics::FILE_PARSE_FAILURES_TOTAL.inc();
                    warn!(error = %e, file = %path.display(), "error parsing corpus file");
                }
            }
        }
    }
}
