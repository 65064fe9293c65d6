pub mod handlers;
pub mod middleware;
pub mod routes;

use std::sync::Arc;

use crate::config::Config;
use crate::metadata::MetadataCatalog;

/// Shared application state injected into all handlers via axum's State extractor.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    /// Built once at startup, read-only afterwards.
    pub catalog: Arc<MetadataCatalog>,
}
