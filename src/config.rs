use crate::error::{LemmataError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub corpus: CorpusConfig,
    #[serde(default)]
    pub search: SearchConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    /// Soft ceiling on the serialized result payload. Exceeding it only logs.
    #[serde(default = "default_max_response_mb")]
    pub max_response_mb: f64,
}

/// Locations of the sentence corpus and the static metadata tables.
///
/// Relative file names are resolved against `data_dir`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CorpusConfig {
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,
    #[serde(default = "default_sentence_dir")]
    pub sentence_dir: PathBuf,
    #[serde(default = "default_metadata_file")]
    pub metadata_file: PathBuf,
    #[serde(default = "default_fallback_metadata_file")]
    pub fallback_metadata_file: PathBuf,
    #[serde(default = "default_authors_file")]
    pub authors_file: PathBuf,
    #[serde(default = "default_subcorpus_file")]
    pub subcorpus_file: PathBuf,
    /// Length of the collection prefix on each file name segment (`tlg`).
    #[serde(default = "default_file_prefix_len")]
    pub file_prefix_len: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchConfig {
    #[serde(default = "default_max_results")]
    pub max_results: usize,
    /// Spread the whole fallback table into every result's metadata instead
    /// of the single matched entry. Only for clients that depend on it.
    #[serde(default)]
    pub legacy_fallback_merge: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default = "default_log_format")]
    pub format: String,
}

// Default value functions
fn default_host() -> String {
    std::env::var("LEMMATA_HOST").unwrap_or_else(|_| "0.0.0.0".to_string())
}
fn default_port() -> u16 {
    std::env::var("LEMMATA_PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or(8080)
}
fn default_max_response_mb() -> f64 {
    8.0
}
fn default_data_dir() -> PathBuf {
    std::env::var("LEMMATA_DATA_DIR")
        .ok()
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("public/data"))
}
fn default_sentence_dir() -> PathBuf {
    PathBuf::from("json_sentence_pairs")
}
fn default_metadata_file() -> PathBuf {
    PathBuf::from("hellenistic_author_metadata.json")
}
fn default_fallback_metadata_file() -> PathBuf {
    PathBuf::from("1bc-1ad-meta.json")
}
fn default_authors_file() -> PathBuf {
    PathBuf::from("hellenistic_authors.json")
}
fn default_subcorpus_file() -> PathBuf {
    PathBuf::from("odonnell_corpus.json")
}
fn default_file_prefix_len() -> usize {
    3
}
fn default_max_results() -> usize {
    std::env::var("LEMMATA_MAX_RESULTS")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(25)
}
fn default_log_level() -> String {
    "info".to_string()
}
fn default_log_format() -> String {
    std::env::var("LEMMATA_LOG_FORMAT").unwrap_or_else(|_| "json".to_string())
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            max_response_mb: default_max_response_mb(),
        }
    }
}

impl Default for CorpusConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            sentence_dir: default_sentence_dir(),
            metadata_file: default_metadata_file(),
            fallback_metadata_file: default_fallback_metadata_file(),
            authors_file: default_authors_file(),
            subcorpus_file: default_subcorpus_file(),
            file_prefix_len: default_file_prefix_len(),
        }
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            max_results: default_max_results(),
            legacy_fallback_merge: false,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

impl CorpusConfig {
    fn resolve(&self, p: &Path) -> PathBuf {
        if p.is_absolute() {
            p.to_path_buf()
        } else {
            self.data_dir.join(p)
        }
    }

    pub fn sentence_path(&self) -> PathBuf {
        self.resolve(&self.sentence_dir)
    }

    pub fn metadata_path(&self) -> PathBuf {
        self.resolve(&self.metadata_file)
    }

    pub fn fallback_metadata_path(&self) -> PathBuf {
        self.resolve(&self.fallback_metadata_file)
    }

    pub fn authors_path(&self) -> PathBuf {
        self.resolve(&self.authors_file)
    }

    pub fn subcorpus_path(&self) -> PathBuf {
        self.resolve(&self.subcorpus_file)
    }
}

impl Config {
    /// Load config from a TOML file, falling back to defaults.
    /// After loading, env var overrides are applied so that:
    /// env var > TOML file > defaults.
    pub fn load(path: Option<&str>) -> Result<Self> {
        let mut config = match path {
            Some(p) => {
                let content = std::fs::read_to_string(p).map_err(|e| {
                    LemmataError::Config(format!("failed to read config file {p}: {e}"))
                })?;
                toml::from_str(&content)
                    .map_err(|e| LemmataError::Config(format!("failed to parse config: {e}")))?
            }
            None => Config::default(),
        };
        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        if self.search.max_results == 0 {
            return Err(LemmataError::Config(
                "search.max_results must be > 0".into(),
            ));
        }
        Ok(())
    }

    /// Apply environment variable overrides on top of file/default values.
    fn apply_env_overrides(&mut self) {
        // Server
        if let Ok(v) = std::env::var("LEMMATA_HOST") {
            self.server.host = v;
        }
        if let Some(v) = std::env::var("LEMMATA_PORT")
            .ok()
            .and_then(|v| v.parse().ok())
        {
            self.server.port = v;
        }

        // Corpus
        if let Some(v) = std::env::var("LEMMATA_DATA_DIR")
            .ok()
            .filter(|s| !s.is_empty())
        {
            self.corpus.data_dir = PathBuf::from(v);
        }

        // Search
        if let Some(v) = std::env::var("LEMMATA_MAX_RESULTS")
            .ok()
            .and_then(|v| v.parse().ok())
        {
            self.search.max_results = v;
        }
        if let Ok(v) = std::env::var("LEMMATA_LEGACY_FALLBACK_MERGE") {
            self.search.legacy_fallback_merge = v == "true";
        }

        // Logging
        if let Ok(v) = std::env::var("LEMMATA_LOG_FORMAT") {
            self.logging.format = v;
        }
    }
}
