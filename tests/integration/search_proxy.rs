//! Search proxy against a stub remote API

use betterreads_server::{
    config::CoversConfig,
    error::AppError,
    services::{books::CoverUrls, search::SearchService},
};

use crate::support::{search_config, spawn_search_stub};

fn service(base_url: String) -> SearchService {
    SearchService::new(&search_config(base_url), CoverUrls::new(&CoversConfig::default()))
        .expect("search service")
}

#[tokio::test]
async fn test_search_keeps_first_hundred_and_rewrites() {
    let addr = spawn_search_stub().await;
    let mut config = search_config(format!("http://{}/search.json", addr));
    config.max_body_bytes = 16 * 1024 * 1024;
    let service = SearchService::new(&config, CoverUrls::new(&CoversConfig::default()))
        .expect("search service");

    let results = service.search("lord of the rings").await.expect("search");

    assert_eq!(results.query, "lord of the rings");
    assert_eq!(results.total, 1234);
    assert_eq!(results.books.len(), 100);

    let first = &results.books[0];
    assert_eq!(first.key, "OL0W");
    assert_eq!(first.title, "Book 0");
    assert_eq!(first.cover_url, "https://covers.openlibrary.org/b/id/1000-M.jpg");

    let second = &results.books[1];
    assert_eq!(second.key, "OL1W");
    assert_eq!(second.cover_url, "/images/no-image.png");

    assert_eq!(results.books[99].key, "OL99W");
}

#[tokio::test]
async fn test_search_rejects_oversized_body() {
    let addr = spawn_search_stub().await;
    let err = service(format!("http://{}/huge.json", addr))
        .search("anything")
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Upstream(ref msg) if msg.contains("exceeds")), "{err:?}");
}

#[tokio::test]
async fn test_search_maps_remote_error_status() {
    let addr = spawn_search_stub().await;
    let err = service(format!("http://{}/broken.json", addr))
        .search("anything")
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Upstream(_)), "{err:?}");
}

#[tokio::test]
async fn test_search_maps_unparseable_body() {
    let addr = spawn_search_stub().await;
    let err = service(format!("http://{}/garbage.json", addr))
        .search("anything")
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Upstream(_)), "{err:?}");
}

#[tokio::test]
async fn test_search_unreachable_remote() {
    let err = service("http://127.0.0.1:1/search.json".to_string())
        .search("anything")
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Upstream(_)), "{err:?}");
}

#[tokio::test]
async fn test_search_empty_query_is_bad_request() {
    let err = service("http://127.0.0.1:1/search.json".to_string())
        .search("   ")
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::BadRequest(_)), "{err:?}");
}
