//! Router-level tests using `tower::ServiceExt::oneshot`

use axum::{
    body::{to_bytes, Body},
    http::{header, Request, StatusCode},
    Router,
};
use serde_json::Value;
use tower::ServiceExt;

use betterreads_server::{api::create_router, models::PrincipalClaims};

use crate::support::{search_config, spawn_search_stub, test_state, JWT_SECRET};

fn app() -> Router {
    create_router(test_state(search_config(
        "http://127.0.0.1:1/search.json".to_string(),
    )))
}

async fn json_body(response: axum::response::Response) -> Value {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

fn token(login: &str) -> String {
    PrincipalClaims::new(login, chrono::Duration::hours(1))
        .to_token(JWT_SECRET)
        .unwrap()
}

#[tokio::test]
async fn test_home_anonymous() {
    let response = app()
        .oneshot(Request::get("/").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["authenticated"], false);
    assert!(body["login"].is_null());
}

#[tokio::test]
async fn test_home_with_token() {
    let response = app()
        .oneshot(
            Request::get("/")
                .header(header::AUTHORIZATION, format!("Bearer {}", token("alice")))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["authenticated"], true);
    assert_eq!(body["login"], "alice");
}

#[tokio::test]
async fn test_invalid_token_is_rejected() {
    let response = app()
        .oneshot(
            Request::get("/")
                .header(header::AUTHORIZATION, "Bearer not-a-jwt")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let body = json_body(response).await;
    assert_eq!(body["error"], "NotAuthorized");
}

#[tokio::test]
async fn test_health() {
    let response = app()
        .oneshot(Request::get("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(json_body(response).await["status"], "healthy");
}

#[tokio::test]
async fn test_ready_without_database() {
    let response = app()
        .oneshot(Request::get("/ready").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
}

#[tokio::test]
async fn test_add_user_book_requires_login() {
    let response = app()
        .oneshot(
            Request::post("/addUserBook")
                .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
                .body(Body::from("bookId=OL45883W&status=reading&rating=4"))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_add_user_book_rejects_bad_rating() {
    let response = app()
        .oneshot(
            Request::post("/addUserBook")
                .header(header::AUTHORIZATION, format!("Bearer {}", token("alice")))
                .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
                .body(Body::from("bookId=OL45883W&rating=9"))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

async fn post_form_as_alice(body: &'static str) -> axum::response::Response {
    app()
        .oneshot(
            Request::post("/addUserBook")
                .header(header::AUTHORIZATION, format!("Bearer {}", token("alice")))
                .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
                .body(Body::from(body))
                .unwrap(),
        )
        .await
        .unwrap()
}

#[tokio::test]
async fn test_add_user_book_rejects_impossible_date() {
    let response = post_form_as_alice("bookId=OL1W&startDate=2024-13-45&rating=3").await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = json_body(response).await;
    assert_eq!(body["error"], "BadValue");
}

#[tokio::test]
async fn test_add_user_book_rejects_non_numeric_rating() {
    let response = post_form_as_alice("bookId=OL1W&rating=abc").await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = json_body(response).await;
    assert_eq!(body["error"], "BadValue");
}

#[tokio::test]
async fn test_add_user_book_rejects_book_id_with_newline() {
    let response = post_form_as_alice("bookId=a%0Ab&rating=1").await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = json_body(response).await;
    assert_eq!(body["error"], "BadValue");
}

#[tokio::test]
async fn test_search_through_router() {
    let addr = spawn_search_stub().await;
    let mut search = search_config(format!("http://{}/search.json", addr));
    search.max_body_bytes = 16 * 1024 * 1024;
    let app = create_router(test_state(search));

    let response = app
        .oneshot(
            Request::get("/search?query=dune")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["query"], "dune");
    assert_eq!(body["books"].as_array().map(Vec::len), Some(100));
    assert_eq!(body["books"][0]["key"], "OL0W");
}

#[tokio::test]
async fn test_search_upstream_failure_is_bad_gateway() {
    let addr = spawn_search_stub().await;
    let app = create_router(test_state(search_config(format!(
        "http://{}/broken.json",
        addr
    ))));

    let response = app
        .oneshot(Request::get("/search?query=dune").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
}

#[tokio::test]
async fn test_search_empty_query() {
    let response = app()
        .oneshot(Request::get("/search?query=").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}
