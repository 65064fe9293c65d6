//! Application startup and bootstrap logic.
//!
//! Kept out of `main.rs` so the bootstrap path runs under `cargo test --lib`
//! against a temporary data directory.

use std::sync::Arc;

use axum::Router;
use tracing_subscriber::EnvFilter;

use crate::config::Config;
use crate::error::Result;
use crate::metadata::MetadataCatalog;
use crate::server::routes::build_router;
use crate::server::AppState;

/// Resolve the configuration file path.
///
/// Priority:
/// 1. `LEMMATA_CONFIG` environment variable
/// 2. `./lemmata.toml` if it exists
/// 3. None (use defaults)
pub fn resolve_config_path() -> Option<String> {
    std::env::var("LEMMATA_CONFIG").ok().or_else(|| {
        let default = "lemmata.toml";
        std::path::Path::new(default)
            .exists()
            .then(|| default.to_string())
    })
}

/// Initialize tracing subscriber from logging config.
///
/// Supports JSON and plain text formats. Uses `RUST_LOG` env var if set,
/// otherwise falls back to `config.logging.level`.
pub fn init_logging(config: &Config) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.logging.level));

    match config.logging.format.as_str() {
        "json" => {
            tracing_subscriber::fmt()
                .json()
                .with_env_filter(filter)
                .init();
        }
        _ => {
            tracing_subscriber::fmt().with_env_filter(filter).init();
        }
    }
}

/// Load the metadata catalog and build the router.
///
/// A malformed or missing metadata table is fatal here; the corpus directory
/// itself is not touched until the first request.
pub fn build_app(config: Config) -> Result<Router> {
    tracing::info!("lemmata starting");

    tracing::info!(
        host = %config.server.host,
        port = config.server.port,
        data_dir = %config.corpus.data_dir.display(),
        sentence_dir = %config.corpus.sentence_path().display(),
        max_results = config.search.max_results,
        legacy_fallback_merge = config.search.legacy_fallback_merge,
        "configuration loaded"
    );

    crate::metrics::init();

    let catalog = MetadataCatalog::load(&config.corpus, config.search.legacy_fallback_merge)?;

    let state = AppState {
        config: Arc::new(config),
        catalog: Arc::new(catalog),
    };

    Ok(build_router(state))
}
