use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde_json::{json, Value};

use crate::server::AppState;

/// Liveness probe: returns 200 OK if the server process is running.
pub async fn health_check() -> Json<Value> {
    Json(json!({"status": "ok"}))
}

/// Readiness probe: returns 200 OK when the sentence directory can be listed.
pub async fn readiness_check(
    State(state): State<AppState>,
) -> Result<Json<Value>, (StatusCode, Json<Value>)> {
    let dir = state.config.corpus.sentence_path();
    match tokio::fs::read_dir(&dir).await {
        Ok(_) => Ok(Json(json!({"status": "ready", "corpus_readable": true}))),
        Err(e) => Err((
            StatusCode::SERVICE_UNAVAILABLE,
            Json(json!({
                "status": "not_ready",
                "corpus_readable": false,
                "error": e.to_string(),
            })),
        )),
    }
}
