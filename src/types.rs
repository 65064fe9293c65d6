use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Identifies one (author, work) pair, and therefore one corpus file.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct WorkId {
    #[serde(rename = "authorId")]
    pub author_id: String,
    #[serde(rename = "workId")]
    pub work_id: String,
}

impl WorkId {
    pub fn new(author_id: impl Into<String>, work_id: impl Into<String>) -> Self {
        Self {
            author_id: author_id.into(),
            work_id: work_id.into(),
        }
    }

    /// Composite `{authorId}_{workId}` key used by the metadata tables.
    pub fn key(&self) -> String {
        format!("{}_{}", self.author_id, self.work_id)
    }
}

impl std::fmt::Display for WorkId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}_{}", self.author_id, self.work_id)
    }
}

/// A sentence as stored in a corpus file. Unknown fields are carried through
/// to the response untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SentenceRecord(pub Map<String, Value>);

impl SentenceRecord {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Surface text, if present as a non-empty string.
    pub fn tokens(&self) -> Option<&str> {
        self.text_field("tokens")
    }

    /// Dictionary-form text, if present as a non-empty string.
    pub fn lemmas(&self) -> Option<&str> {
        self.text_field("lemmas")
    }

    fn text_field(&self, key: &str) -> Option<&str> {
        self.0
            .get(key)
            .and_then(Value::as_str)
            .filter(|s| !s.is_empty())
    }

    /// Attach joined metadata under the `metadata` key.
    pub fn with_metadata(mut self, metadata: Map<String, Value>) -> Self {
        self.0.insert("metadata".to_string(), Value::Object(metadata));
        self
    }
}
