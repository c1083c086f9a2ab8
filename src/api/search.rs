//! Search endpoint

use axum::{
    extract::{Query, State},
    Json,
};
use serde::Deserialize;
use utoipa::IntoParams;

use crate::{error::AppResult, models::SearchResults};

#[derive(Deserialize, IntoParams, Debug)]
pub struct SearchQuery {
    /// Free-text query forwarded to the remote search API
    pub query: String,
}

/// Search the remote catalog
#[utoipa::path(
    get,
    path = "/search",
    tag = "search",
    params(SearchQuery),
    responses(
        (status = 200, description = "Search results", body = SearchResults),
        (status = 400, description = "Missing or empty query"),
        (status = 502, description = "Remote search API error")
    )
)]
pub async fn search(
    State(state): State<crate::AppState>,
    Query(query): Query<SearchQuery>,
) -> AppResult<Json<SearchResults>> {
    let results = state.services.search.search(&query.query).await?;
    Ok(Json(results))
}
