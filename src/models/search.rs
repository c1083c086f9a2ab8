//! External search API payloads

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Raw search response from the remote search API
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SearchResponse {
    #[serde(default, rename = "numFound")]
    pub num_found: u64,
    #[serde(default)]
    pub docs: Vec<SearchDoc>,
}

/// One document of the remote search response
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SearchDoc {
    #[serde(default)]
    pub key: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub author_name: Vec<String>,
    pub first_publish_year: Option<i32>,
    pub cover_i: Option<i64>,
}

/// Search result rewritten for display
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct SearchResultBook {
    /// Work id, usable with `GET /books/{bookId}`
    pub key: String,
    pub title: String,
    pub author_name: Vec<String>,
    pub first_publish_year: Option<i32>,
    /// Medium cover image URL, or the placeholder image
    pub cover_url: String,
}

/// Search endpoint response
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct SearchResults {
    pub query: String,
    /// Total matches reported by the remote API
    pub total: u64,
    pub books: Vec<SearchResultBook>,
}
