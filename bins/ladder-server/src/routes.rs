//! Axum router and HTTP handlers.
//!
//! Plain-text endpoints emit one `Rank: r | name | Rating: s` line per
//! standing; the `/api` endpoints serve the same data as JSON.

use axum::extract::{Query, State};
use axum::http::{header, Method, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use serde::Deserialize;
use serde_json::{json, Value};
use tower_http::cors::{Any, CorsLayer};
use tracing::debug;

use ladder_core::{LadderError, Standing};

use crate::AppState;

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

struct ApiError(LadderError);

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match self.0 {
            LadderError::NotInitialized => StatusCode::SERVICE_UNAVAILABLE,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };
        (status, Json(json!({ "error": self.0.to_string() }))).into_response()
    }
}

impl From<LadderError> for ApiError {
    fn from(e: LadderError) -> Self {
        ApiError(e)
    }
}

type ApiResult<T> = Result<T, ApiError>;

// ---------------------------------------------------------------------------
// Router
// ---------------------------------------------------------------------------

pub fn router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE]);

    Router::new()
        .route("/leaderboard", get(leaderboard))
        .route("/search", get(search))
        .route("/api/leaderboard", get(api_leaderboard))
        .route("/api/search", get(api_search))
        .route("/health", get(health))
        .with_state(state)
        .layer(cors)
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

#[derive(Deserialize)]
struct SearchQuery {
    #[serde(default)]
    query: String,
}

#[derive(Deserialize)]
struct TopQuery {
    limit: Option<usize>,
}

/// `GET /leaderboard` — the configured top-N as text lines.
async fn leaderboard(State(state): State<AppState>) -> ApiResult<String> {
    let top = state.engine.top(state.config.top_n)?;
    Ok(render_lines(&top))
}

/// `GET /search?query=...` — every matching entity as text lines.
async fn search(
    State(state): State<AppState>,
    Query(q): Query<SearchQuery>,
) -> ApiResult<String> {
    let hits = state.engine.search(&q.query)?;
    debug!(query = %q.query, hits = hits.len(), "search");
    Ok(render_lines(&hits))
}

/// `GET /api/leaderboard?limit=N` — top-N as JSON, `limit` defaults to the
/// configured top-N and is clamped to the population.
async fn api_leaderboard(
    State(state): State<AppState>,
    Query(q): Query<TopQuery>,
) -> ApiResult<Json<Value>> {
    let snap = state
        .engine
        .top_with_generation(q.limit.unwrap_or(state.config.top_n))?;
    Ok(Json(json!({
        "generation": snap.generation,
        "standings":  snap.standings,
    })))
}

/// `GET /api/search?query=...` — matches as JSON.
async fn api_search(
    State(state): State<AppState>,
    Query(q): Query<SearchQuery>,
) -> ApiResult<Json<Value>> {
    let snap = state.engine.search_with_generation(&q.query)?;
    Ok(Json(json!({
        "generation": snap.generation,
        "standings":  snap.standings,
    })))
}

/// `GET /health` — liveness plus population and current generation.
async fn health(State(state): State<AppState>) -> ApiResult<Json<Value>> {
    let population = state.engine.size()?;
    let generation = state.engine.generation()?;
    Ok(Json(json!({
        "status":     "ok",
        "population": population,
        "generation": generation,
    })))
}

fn render_lines(standings: &[Standing]) -> String {
    standings.iter().map(|s| format!("{s}\n")).collect()
}
