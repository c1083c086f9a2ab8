//! OpenAPI documentation

use axum::Router;
use utoipa::{
    openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme},
    Modify, OpenApi,
};
use utoipa_swagger_ui::SwaggerUi;

use crate::api::{books, health, home, search, user_books};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Betterreads API",
        version = "1.0.0",
        description = "Book catalog backed by Open Library data dumps, with per-user reading status"
    ),
    paths(
        home::home,
        health::health_check,
        health::readiness_check,
        books::get_book,
        user_books::add_user_book,
        search::search,
    ),
    components(
        schemas(
            home::HomeResponse,
            health::HealthResponse,
            crate::models::Author,
            crate::models::Book,
            crate::models::BookDetails,
            crate::models::UserBook,
            crate::models::SearchResultBook,
            crate::models::SearchResults,
            crate::error::ErrorResponse,
        )
    ),
    modifiers(&BearerAuth),
    tags(
        (name = "home", description = "Caller identity"),
        (name = "health", description = "Health check endpoints"),
        (name = "books", description = "Catalog and reading status"),
        (name = "search", description = "Remote catalog search")
    )
)]
pub struct ApiDoc;

struct BearerAuth;

impl Modify for BearerAuth {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}

/// Create the OpenAPI documentation router
pub fn create_openapi_router() -> Router {
    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
}
