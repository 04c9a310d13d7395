//! HTTP endpoints for the species directory.
//!
//! Thin axum layer over the core matcher/ranker. Store failures are logged
//! with full detail here and surfaced to clients as a generic payload; no
//! internal error text crosses the boundary.

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
    routing::get,
    Router,
};
use serde::{Deserialize, Serialize};
use tower::ServiceBuilder;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing::error;

use crate::config::SearchConfig;
use crate::core::matcher::suggest;
use crate::core::ranker::search;
use crate::core::species::{Species, SpeciesHit, TieredHits};
use crate::core::store::SpeciesStore;
use crate::error::BestiaryError;

/// Server clamps the per-tier suggestion cap to this range.
const LIMIT_RANGE: std::ops::RangeInclusive<usize> = 1..=25;

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn SpeciesStore>,
    pub search: SearchConfig,
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/api/health", get(health))
        .route("/api/autocomplete", get(autocomplete))
        .route("/api/search", get(search_page))
        .route("/api/species/:id", get(species_detail))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CorsLayer::new().allow_origin(Any)),
        )
        .with_state(state)
}

#[derive(Debug, Deserialize)]
pub struct AutocompleteParams {
    pub query: Option<String>,
    pub limit: Option<usize>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct AutocompleteResponse {
    pub query: String,
    #[serde(flatten)]
    pub hits: TieredHits,
    /// Number of rows returned (both tiers), not the number of records
    /// matching overall.
    pub total: usize,
}

#[derive(Debug, Deserialize)]
pub struct SearchParams {
    pub search: Option<String>,
    pub page: Option<usize>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SearchResponse {
    pub query: String,
    pub page: usize,
    pub page_size: usize,
    /// Count of all matching records.
    pub total: usize,
    pub total_pages: usize,
    pub items: Vec<SpeciesHit>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}

/// Error already translated for the wire: a status plus a generic message.
pub struct ApiError {
    status: StatusCode,
    message: String,
}

impl ApiError {
    fn not_found(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::NOT_FOUND,
            message: message.into(),
        }
    }
}

impl From<BestiaryError> for ApiError {
    fn from(err: BestiaryError) -> Self {
        // Detail stays in the server log; clients get a generic failure.
        error!(%err, "request failed");
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: "search is temporarily unavailable".to_string(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (
            self.status,
            Json(ErrorBody {
                error: self.message,
            }),
        )
            .into_response()
    }
}

async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "ok" }))
}

/// `GET /api/autocomplete?query=..&limit=..`
///
/// Empty, missing, or too-short queries yield empty tiers with HTTP 200;
/// "no input" is never an error status.
async fn autocomplete(
    State(state): State<AppState>,
    Query(params): Query<AutocompleteParams>,
) -> Result<Json<AutocompleteResponse>, ApiError> {
    let query = params.query.unwrap_or_default().trim().to_string();
    let limit = params
        .limit
        .unwrap_or(state.search.suggest_limit)
        .clamp(*LIMIT_RANGE.start(), *LIMIT_RANGE.end());

    let hits = if query.chars().count() < state.search.min_chars {
        TieredHits::default()
    } else {
        let suggestions = suggest(state.store.as_ref(), &query, limit)?;
        TieredHits {
            prefix: suggestions.prefix.into_iter().map(SpeciesHit::from).collect(),
            contains: suggestions.contains.into_iter().map(SpeciesHit::from).collect(),
        }
    };

    let total = hits.total();
    Ok(Json(AutocompleteResponse { query, hits, total }))
}

/// `GET /api/search?search=..&page=..`
///
/// A too-short query is the empty/invalid-query state, not an error; a page
/// past the end returns empty items with the correct total.
async fn search_page(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> Result<Json<SearchResponse>, ApiError> {
    let query = params.search.unwrap_or_default().trim().to_string();
    let page = params.page.unwrap_or(1).max(1);
    let page_size = state.search.page_size;

    let result = if query.chars().count() < state.search.min_chars {
        crate::core::ranker::SearchPage::default()
    } else {
        search(state.store.as_ref(), &query, page, page_size)?
    };

    Ok(Json(SearchResponse {
        query,
        page,
        page_size,
        total: result.total,
        total_pages: result.total_pages(page_size),
        items: result.items.into_iter().map(SpeciesHit::from).collect(),
    }))
}

/// `GET /api/species/{id}`
async fn species_detail(
    State(state): State<AppState>,
    Path(id): Path<u64>,
) -> Result<Json<Species>, ApiError> {
    match state.store.by_id(id)? {
        Some(species) => Ok(Json(species)),
        None => Err(ApiError::not_found("species not found")),
    }
}
