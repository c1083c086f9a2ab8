//! HTTP handlers for the Betterreads endpoints

pub mod books;
pub mod health;
pub mod home;
pub mod openapi;
pub mod search;
pub mod user_books;

use axum::{
    async_trait,
    extract::FromRequestParts,
    http::request::Parts,
    routing::{get, post},
    Router,
};
use axum_extra::{
    headers::{authorization::Bearer, Authorization},
    TypedHeader,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::{
    error::AppError,
    models::{Principal, PrincipalClaims},
    AppState,
};

/// Extractor for the caller identity.
///
/// No `Authorization` header means an anonymous caller; a header that is
/// not a valid bearer token is rejected.
pub struct CurrentUser(pub Principal);

#[async_trait]
impl FromRequestParts<AppState> for CurrentUser {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let bearer =
            match TypedHeader::<Authorization<Bearer>>::from_request_parts(parts, state).await {
                Ok(TypedHeader(Authorization(bearer))) => bearer,
                Err(rejection) if rejection.is_missing() => {
                    return Ok(CurrentUser(Principal::anonymous()))
                }
                Err(_) => {
                    return Err(AppError::Authentication(
                        "Invalid authorization header format".to_string(),
                    ))
                }
            };

        let claims = PrincipalClaims::from_token(bearer.token(), &state.config.auth.jwt_secret)?;
        Ok(CurrentUser(claims.into()))
    }
}

/// Create the application router with all routes
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let routes = Router::new()
        .route("/", get(home::home))
        .route("/health", get(health::health_check))
        .route("/ready", get(health::readiness_check))
        .route("/books/:book_id", get(books::get_book))
        .route("/search", get(search::search))
        .route("/addUserBook", post(user_books::add_user_book))
        .with_state(state);

    Router::new()
        .merge(routes)
        .merge(openapi::create_openapi_router())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}
