//! Book endpoints

use axum::{
    extract::{Path, State},
    Json,
};

use crate::{error::AppResult, models::BookDetails};

use super::CurrentUser;

/// Get book details by ID
#[utoipa::path(
    get,
    path = "/books/{book_id}",
    tag = "books",
    security((), ("bearer_auth" = [])),
    params(
        ("book_id" = String, Path, description = "Work ID, e.g. OL45883W")
    ),
    responses(
        (status = 200, description = "Book details", body = BookDetails),
        (status = 404, description = "Book not found")
    )
)]
pub async fn get_book(
    State(state): State<crate::AppState>,
    CurrentUser(principal): CurrentUser,
    Path(book_id): Path<String>,
) -> AppResult<Json<BookDetails>> {
    let details = state
        .services
        .books
        .get_book_details(&book_id, principal.login())
        .await?;
    Ok(Json(details))
}
