//! Reading status endpoints

use axum::{extract::State, response::Redirect, Form};
use axum_extra::extract::WithRejection;

use crate::{
    error::{AppError, AppResult},
    models::AddUserBookForm,
};

use super::CurrentUser;

type UserBookForm = WithRejection<Form<AddUserBookForm>, AppError>;

/// Record the caller's reading status for a book, then go back to the book
#[utoipa::path(
    post,
    path = "/addUserBook",
    tag = "books",
    security(("bearer_auth" = [])),
    responses(
        (status = 303, description = "Saved, redirects to /books/{bookId}"),
        (status = 400, description = "Invalid form", body = crate::error::ErrorResponse),
        (status = 401, description = "Not authenticated")
    )
)]
pub async fn add_user_book(
    State(state): State<crate::AppState>,
    CurrentUser(principal): CurrentUser,
    WithRejection(Form(form), _): UserBookForm,
) -> AppResult<Redirect> {
    let login = principal.require_login()?;
    let saved = state.services.user_books.save(login, form).await?;
    Ok(Redirect::to(&format!("/books/{}", saved.book_id)))
}
