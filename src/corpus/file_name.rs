//! Work identifiers encoded in corpus file names.
//!
//! Files are named `<prefix><authorId>.<prefix><workId>.json`, where each
//! prefix is a fixed-width collection tag, e.g. `tlg0086.tlg001.json`.

use crate::error::{LemmataError, Result};
use crate::types::WorkId;

const EXTENSION: &str = ".json";

/// Parse a corpus file name into its work identifier.
///
/// Fails with `InvalidFileName` when the name does not end in `.json`, has
/// fewer than three dot-separated segments, or when either of the first two
/// segments is empty once `prefix_len` characters are removed.
pub fn parse_file_name(name: &str, prefix_len: usize) -> Result<WorkId> {
    let invalid = || LemmataError::InvalidFileName {
        name: name.to_string(),
    };

    if !name.ends_with(EXTENSION) {
        return Err(invalid());
    }

    let mut segments = name.split('.');
    let (Some(author), Some(work), Some(_)) = (segments.next(), segments.next(), segments.next())
    else {
        return Err(invalid());
    };

    let author_id = strip_prefix(author, prefix_len).ok_or_else(invalid)?;
    let work_id = strip_prefix(work, prefix_len).ok_or_else(invalid)?;
    Ok(WorkId::new(author_id, work_id))
}

fn strip_prefix(segment: &str, prefix_len: usize) -> Option<&str> {
    let (idx, _) = segment.char_indices().nth(prefix_len)?;
    Some(&segment[idx..])
}
