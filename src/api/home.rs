//! Home endpoint

use axum::Json;
use serde::Serialize;
use utoipa::ToSchema;

use super::CurrentUser;

#[derive(Serialize, ToSchema)]
pub struct HomeResponse {
    pub authenticated: bool,
    pub login: Option<String>,
}

/// Who is calling
#[utoipa::path(
    get,
    path = "/",
    tag = "home",
    security((), ("bearer_auth" = [])),
    responses(
        (status = 200, description = "Caller identity", body = HomeResponse),
        (status = 401, description = "Invalid token")
    )
)]
pub async fn home(CurrentUser(principal): CurrentUser) -> Json<HomeResponse> {
    Json(HomeResponse {
        authenticated: principal.is_authenticated(),
        login: principal.login().map(str::to_string),
    })
}
