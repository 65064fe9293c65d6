//! Author and work metadata, loaded once at startup.
//!
//! ## Tables
//! - **primary**: work metadata keyed by `{authorId}_{workId}`
//! - **fallback**: metadata for works outside the author registry, keyed by
//!   its own `workId` field (already composite, e.g. `0546_001`)
//! - **authors**: the author registry keyed by `id`
//! - **subcorpus**: `{authorId}_{workId}` keys of the alternate sub-corpus
//!
//! All tables are immutable after [`MetadataCatalog::load`]; the catalog is
//! shared across requests behind an `Arc`.

use std::collections::{HashMap, HashSet};
use std::path::Path;

use serde_json::{Map, Value};
use tracing::info;

use crate::config::CorpusConfig;
use crate::error::{LemmataError, Result};
use crate::types::WorkId;

type Record = Map<String, Value>;

const NO_DATA: &str = "no data";

#[derive(Debug, Default)]
pub struct MetadataCatalog {
    primary: HashMap<String, Record>,
    fallback: HashMap<String, Record>,
    authors: HashMap<String, Record>,
    subcorpus: HashSet<String>,
    /// The fallback table spread as an object keyed by array index.
    /// Only populated in legacy merge mode.
    legacy_spread: Option<Record>,
}

impl MetadataCatalog {
    /// Read all four tables from the configured locations.
    pub fn load(corpus: &CorpusConfig, legacy_fallback_merge: bool) -> Result<Self> {
        let primary = read_table(&corpus.metadata_path())?;
        let fallback = read_table(&corpus.fallback_metadata_path())?;
        let authors = read_table(&corpus.authors_path())?;
        let subcorpus = read_table(&corpus.subcorpus_path())?;

        let catalog = Self::from_tables(primary, fallback, authors, subcorpus, legacy_fallback_merge)?;
        info!(
            primary = catalog.primary.len(),
            fallback = catalog.fallback.len(),
            authors = catalog.authors.len(),
            subcorpus = catalog.subcorpus.len(),
            legacy_fallback_merge,
            "metadata loaded"
        );
        Ok(catalog)
    }

    /// Build the lookup tables from already-parsed records.
    pub fn from_tables(
        primary: Vec<Record>,
        fallback: Vec<Record>,
        authors: Vec<Record>,
        subcorpus: Vec<Record>,
        legacy_fallback_merge: bool,
    ) -> Result<Self> {
        let legacy_spread = legacy_fallback_merge.then(|| {
            fallback
                .iter()
                .enumerate()
                .map(|(i, r)| (i.to_string(), Value::Object(r.clone())))
                .collect::<Record>()
        });

        let mut primary_map = HashMap::with_capacity(primary.len());
        for r in primary {
            let key = work_id_of(&r, "metadata")?.key();
            primary_map.insert(key, r);
        }

        let mut fallback_map = HashMap::with_capacity(fallback.len());
        for r in fallback {
            let key = string_field(&r, "workId", "fallback metadata")?;
            fallback_map.insert(key, r);
        }

        let mut author_map = HashMap::with_capacity(authors.len());
        for r in authors {
            let key = string_field(&r, "id", "author registry")?;
            author_map.insert(key, r);
        }

        let subcorpus = subcorpus
            .iter()
            .map(|r| work_id_of(r, "subcorpus").map(|id| id.key()))
            .collect::<Result<HashSet<_>>>()?;

        Ok(Self {
            primary: primary_map,
            fallback: fallback_map,
            authors: author_map,
            subcorpus,
            legacy_spread,
        })
    }

    pub fn in_subcorpus(&self, id: &WorkId) -> bool {
        self.subcorpus.contains(&id.key())
    }

    /// Build the `metadata` object attached to every match from `id`.
    ///
    /// Merge order: primary fields, then fallback (the matched entry, or the
    /// whole spread table in legacy mode), then `author`.
    pub fn join(&self, id: &WorkId) -> Record {
        let key = id.key();
        let author = self.authors.get(&id.author_id);
        let fallback = match author {
            Some(_) => None,
            None => self.fallback.get(&key),
        };

        let mut merged = self.primary.get(&key).cloned().unwrap_or_default();

        match &self.legacy_spread {
            Some(spread) => merged.extend(spread.clone()),
            None => {
                if let Some(entry) = fallback {
                    merged.extend(entry.clone());
                }
            }
        }

        let author_value = match (author, fallback) {
            (Some(entry), _) => Value::Object(entry.clone()),
            (None, Some(entry)) => entry.get("name").cloned().unwrap_or(Value::Null),
            (None, None) => Value::String(NO_DATA.to_string()),
        };
        merged.insert("author".to_string(), author_value);
        merged
    }
}

fn read_table(path: &Path) -> Result<Vec<Record>> {
    let content = std::fs::read_to_string(path).map_err(|e| {
        LemmataError::Metadata(format!("failed to read {}: {e}", path.display()))
    })?;
    serde_json::from_str(&content).map_err(|e| {
        LemmataError::Metadata(format!("failed to parse {}: {e}", path.display()))
    })
}

fn work_id_of(r: &Record, table: &str) -> Result<WorkId> {
    Ok(WorkId::new(
        string_field(r, "authorId", table)?,
        string_field(r, "workId", table)?,
    ))
}

/// Identifier fields may be stored as strings or bare numbers.
fn string_field(r: &Record, field: &str, table: &str) -> Result<String> {
    match r.get(field) {
        Some(Value::String(s)) => Ok(s.clone()),
        Some(Value::Number(n)) => Ok(n.to_string()),
        _ => Err(LemmataError::Metadata(format!(
            "{table} record without usable `{field}`: {}",
            Value::Object(r.clone())
        ))),
    }
}
