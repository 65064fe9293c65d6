use std::path::{Path, PathBuf};

use serde_json::{json, Value};
use tempfile::TempDir;

use lemmata::config::Config;

/// A throwaway data directory laid out like production:
/// four metadata tables plus a `json_sentence_pairs/` corpus.
pub struct TestCorpus {
    dir: TempDir,
    pub primary: Vec<Value>,
    pub fallback: Vec<Value>,
    pub authors: Vec<Value>,
    pub subcorpus: Vec<Value>,
}

impl TestCorpus {
    /// Empty tables and an empty sentence directory.
    pub fn new() -> Self {
        let dir = tempfile::tempdir().expect("failed to create temp dir");
        std::fs::create_dir(dir.path().join("json_sentence_pairs"))
            .expect("failed to create sentence dir");
        Self {
            dir,
            primary: Vec::new(),
            fallback: Vec::new(),
            authors: Vec::new(),
            subcorpus: Vec::new(),
        }
    }

    /// A small corpus with one registered author, one fallback-only author
    /// and one author known to neither table.
    pub fn hellenistic() -> Self {
        let mut corpus = Self::new();
        corpus.primary = vec![
            json!({"authorId": "0086", "workId": "001", "title": "Politica", "date": "4 B.C."}),
            json!({"authorId": "0546", "workId": "001", "title": "Tactica", "date": "A.D. 1-2"}),
        ];
        corpus.fallback = vec![json!({
            "author": "AELIANUS Tact. ",
            "authorId": "0546",
            "date": "A.D. 1-2",
            "name": "AELIANUS Tact.",
            "title": "Tactica",
            "workId": "0546_001",
            "wordCount": "9,893"
        })];
        corpus.authors = vec![json!({"id": "0086", "name": "Aristoteles"})];
        corpus.subcorpus = vec![json!({"authorId": "0086", "workId": "001"})];

        corpus.add_work(
            "tlg0086.tlg001.json",
            json!([
                {"tokens": "ἄνθρωπος φύσει πολιτικὸν ζῷον", "lemmas": "ἄνθρωπος φύσις πολιτικός ζῷον", "ref": "1253a"},
                {"tokens": "ὁ λόγος", "lemmas": "ὁ λόγος", "ref": "1253a9"}
            ]),
        );
        corpus.add_work(
            "tlg0546.tlg001.json",
            json!([
                {"tokens": "τὴν τακτικὴν θεωρίαν", "lemmas": "ὁ τακτικός θεωρία"},
                {"tokens": "ἄνθρωπος", "lemmas": "ἄνθρωπος"}
            ]),
        );
        corpus.add_work(
            "tlg9999.tlg002.json",
            json!([{"tokens": "τῷ λόγῳ", "lemmas": "ὁ λόγος"}]),
        );
        corpus
    }

    pub fn data_dir(&self) -> &Path {
        self.dir.path()
    }

    pub fn sentence_dir(&self) -> PathBuf {
        self.dir.path().join("json_sentence_pairs")
    }

    /// Write a corpus file verbatim.
    pub fn add_work(&self, file_name: &str, records: Value) {
        std::fs::write(self.sentence_dir().join(file_name), records.to_string())
            .expect("failed to write corpus file");
    }

    pub fn add_raw(&self, file_name: &str, content: &str) {
        std::fs::write(self.sentence_dir().join(file_name), content)
            .expect("failed to write corpus file");
    }

    /// Flush the tables to disk and return a config pointing at them.
    pub fn config(&self) -> Config {
        let write = |name: &str, rows: &[Value]| {
            std::fs::write(self.dir.path().join(name), Value::from(rows.to_vec()).to_string())
                .expect("failed to write table");
        };
        write("hellenistic_author_metadata.json", &self.primary);
        write("1bc-1ad-meta.json", &self.fallback);
        write("hellenistic_authors.json", &self.authors);
        write("odonnell_corpus.json", &self.subcorpus);

        let mut config = Config::default();
        config.corpus.data_dir = self.dir.path().to_path_buf();
        config.search.max_results = 25;
        config
    }
}
