//! Route handlers.
//!
//! | Route | Purpose |
//! |---|---|
//! | `GET /health` | liveness with service version |
//! | `GET /ping` | `pong` |
//! | `GET /api/search?query=..&page=..` | paged free-text search |
//! | `GET /api/papers?ids=a,b` | lookup by arXiv id |

use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Query, State, rejection::QueryRejection},
    response::IntoResponse,
    routing::get,
};
use serde::Serialize;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::client::ArxivClient;
use crate::error::{ServerError, ServerResult};
use crate::models::{IdsRequest, Paper, SearchParams, SearchRequest, SortBy, SortOrder};

/// Shared state for HTTP handlers.
#[derive(Debug)]
pub struct AppState {
    pub client: ArxivClient,
}

/// Body of `GET /api/search`.
#[derive(Debug, Serialize)]
pub struct SearchResponse {
    pub query: String,
    pub page: u32,
    pub results_per_page: u32,
    pub total_results: u64,
    pub total_pages: u64,
    pub papers: Vec<Paper>,
}

/// Body of `GET /api/papers`.
#[derive(Debug, Serialize)]
pub struct PapersResponse {
    pub ids: Vec<String>,
    pub total_results: u64,
    pub papers: Vec<Paper>,
}

/// Create the HTTP router.
pub fn create_router(client: ArxivClient) -> Router {
    let state = Arc::new(AppState { client });

    Router::new()
        .route("/health", get(health_check))
        .route("/ping", get(ping))
        .route("/api/search", get(search))
        .route("/api/papers", get(papers))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn health_check() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "ok",
        "service": "arxiv-search",
        "version": env!("CARGO_PKG_VERSION")
    }))
}

async fn ping() -> impl IntoResponse {
    Json(serde_json::json!({ "message": "pong" }))
}

async fn search(
    State(state): State<Arc<AppState>>,
    query: Result<Query<SearchRequest>, QueryRejection>,
) -> ServerResult<Json<SearchResponse>> {
    let Query(req) = query.map_err(|e| ServerError::invalid_input("query", e.body_text()))?;

    let text = req.query.as_deref().map(str::trim).unwrap_or_default();
    if text.is_empty() {
        return Err(ServerError::invalid_input("query", "Search query cannot be empty."));
    }

    let sort_by = req.sort_by.as_deref().map(str::parse::<SortBy>).transpose()?.unwrap_or_default();
    let sort_order =
        req.sort_order.as_deref().map(str::parse::<SortOrder>).transpose()?.unwrap_or_default();

    let page = req.page();
    let per_page = state.client.results_per_page();
    let start = (page - 1).saturating_mul(per_page);

    tracing::info!(query = text, page, start, "Handling search request");

    let params = SearchParams::query(text)
        .with_start(start)
        .with_count(per_page)
        .with_sort(sort_by, sort_order);
    let result = state.client.search(&params).await?;

    Ok(Json(SearchResponse {
        query: text.to_string(),
        page,
        results_per_page: per_page,
        total_results: result.total_results,
        total_pages: result.total_pages(per_page),
        papers: result.papers,
    }))
}

async fn papers(
    State(state): State<Arc<AppState>>,
    query: Result<Query<IdsRequest>, QueryRejection>,
) -> ServerResult<Json<PapersResponse>> {
    let Query(req) = query.map_err(|e| ServerError::invalid_input("ids", e.body_text()))?;

    let ids = req.id_list();
    if ids.is_empty() {
        return Err(ServerError::invalid_input("ids", "At least one arXiv id is required."));
    }

    tracing::info!(count = ids.len(), "Handling paper lookup");

    let result = state.client.get_by_ids(&ids).await?;
    Ok(Json(PapersResponse { ids, total_results: result.total_results, papers: result.papers }))
}
