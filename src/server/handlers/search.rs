use axum::extract::{Query, State};
use axum::Json;
use tracing::{info, instrument};

use crate::corpus::normalize::normalize;
use crate::error::LemmataError;
use crate::metrics::{GaugeGuard, ACTIVE_SEARCHES, SEARCHES_TOTAL, SEARCH_DURATION};
use crate::search::{execute_search, SearchRequest, SearchResponse, SearchSettings};
use crate::server::AppState;

use super::ApiError;

const QUERY_PARAM: &str = "query";
const SUBCORPUS_PARAM: &str = "useOdonnellCorpus";

/// Build a search request from raw query pairs.
///
/// `query` may repeat; values that fold to nothing (empty, or only combining
/// marks) are dropped and at least one term must remain. `useOdonnellCorpus` is on for `true` or `1`.
pub fn parse_search_params(pairs: &[(String, String)]) -> Result<SearchRequest, LemmataError> {
    let terms: Vec<String> = pairs
        .iter()
        .filter(|(k, v)| k == QUERY_PARAM && !normalize(v).is_empty())
        .map(|(_, v)| v.clone())
        .collect();
    if terms.is_empty() {
        return Err(LemmataError::MissingQuery);
    }

    let subcorpus_only = pairs
        .iter()
        .rev()
        .find(|(k, _)| k == SUBCORPUS_PARAM)
        .is_some_and(|(_, v)| v.eq_ignore_ascii_case("true") || v == "1");

    Ok(SearchRequest {
        terms,
        subcorpus_only,
    })
}

/// Run a blocking job on the blocking pool. A panicked or cancelled task
/// comes back as `Internal`.
async fn run_blocking<T, F>(job: F) -> Result<T, LemmataError>
where
    F: FnOnce() -> Result<T, LemmataError> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(job)
        .await
        .unwrap_or_else(|e| Err(LemmataError::Internal(format!("search task failed: {e}"))))
}

fn outcome_label<T>(result: &Result<T, LemmataError>) -> &'static str {
    match result {
        Ok(_) => "ok",
        Err(LemmataError::NoResults) => "no_results",
        Err(_) => "error",
    }
}

/// `GET /search?query=<term>[&query=<term>...]&useOdonnellCorpus=<bool>`
#[instrument(skip(state, params))]
pub async fn search(
    State(state): State<AppState>,
    Query(params): Query<Vec<(String, String)>>,
) -> Result<Json<SearchResponse>, ApiError> {
    let request = match parse_search_params(&params) {
        Ok(r) => r,
        Err(e) => {
            SEARCHES_TOTAL.with_label_values(&["invalid"]).inc();
            return Err(e.into());
        }
    };
    info!(terms = ?request.terms, subcorpus = request.subcorpus_only, "search");

    ACTIVE_SEARCHES.inc();
    let _guard = GaugeGuard(&ACTIVE_SEARCHES);
    let timer = SEARCH_DURATION.start_timer();

    let dir = state.config.corpus.sentence_path();
    let catalog = state.catalog.clone();
    let settings = SearchSettings {
        prefix_len: state.config.corpus.file_prefix_len,
        max_results: state.config.search.max_results,
        max_response_mb: state.config.server.max_response_mb,
    };
    let result = run_blocking(move || execute_search(&dir, catalog, &request, &settings)).await;
    timer.observe_duration();
    SEARCHES_TOTAL.with_label_values(&[outcome_label(&result)]).inc();

    let response = result?;
    info!(
        count = response.count,
        returned = response.results.len(),
        time = response.time,
        size_mb = %response.response_size_mb,
        "search complete"
    );
    Ok(Json(response))
}
