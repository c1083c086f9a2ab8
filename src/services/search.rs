//! External book search proxy
//!
//! Forwards a free-text query to the remote search API (Open Library's
//! `search.json` by default) and rewrites the results for display. One
//! outbound request per call, no retry.

use std::time::Duration;

use reqwest::Client;

use crate::{
    config::SearchConfig,
    error::{AppError, AppResult},
    import::record::strip_prefix,
    models::{
        book::WORK_KEY_PREFIX,
        search::{SearchDoc, SearchResponse},
        SearchResultBook, SearchResults,
    },
};

use super::books::{CoverSize, CoverUrls};

const USER_AGENT: &str = concat!("betterreads-server/", env!("CARGO_PKG_VERSION"));

#[derive(Clone)]
pub struct SearchService {
    client: Client,
    base_url: String,
    max_body_bytes: usize,
    result_limit: usize,
    covers: CoverUrls,
}

impl SearchService {
    /// Build the service and its HTTP client (shared by all requests)
    pub fn new(config: &SearchConfig, covers: CoverUrls) -> AppResult<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| AppError::Internal(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: config.base_url.clone(),
            max_body_bytes: config.max_body_bytes,
            result_limit: config.result_limit,
            covers,
        })
    }

    /// Run `query` against the remote search API
    pub async fn search(&self, query: &str) -> AppResult<SearchResults> {
        let query = query.trim();
        if query.is_empty() {
            return Err(AppError::BadRequest("Search query cannot be empty".to_string()));
        }

        tracing::debug!("Search query: {}", query);
        let body = self.fetch(query).await?;
        let response: SearchResponse = serde_json::from_slice(&body)
            .map_err(|e| AppError::Upstream(format!("Invalid search response: {}", e)))?;

        let results = self.to_results(query, response);
        tracing::info!("Search '{}': {} of {} results", query, results.books.len(), results.total);
        Ok(results)
    }

    /// Fetch the raw response body, refusing bodies over `max_body_bytes`
    async fn fetch(&self, query: &str) -> AppResult<Vec<u8>> {
        let mut response = self
            .client
            .get(&self.base_url)
            .query(&[("q", query)])
            .send()
            .await
            .and_then(reqwest::Response::error_for_status)
            .map_err(|e| AppError::Upstream(format!("Search request failed: {}", e)))?;

        if let Some(length) = response.content_length() {
            if length > self.max_body_bytes as u64 {
                return Err(self.too_large());
            }
        }

        let mut body = Vec::new();
        while let Some(chunk) = response
            .chunk()
            .await
            .map_err(|e| AppError::Upstream(format!("Search response read failed: {}", e)))?
        {
            if body.len() + chunk.len() > self.max_body_bytes {
                return Err(self.too_large());
            }
            body.extend_from_slice(&chunk);
        }
        Ok(body)
    }

    fn too_large(&self) -> AppError {
        AppError::Upstream(format!(
            "Search response exceeds {} bytes",
            self.max_body_bytes
        ))
    }

    /// Keep the first `result_limit` docs and rewrite keys and covers
    pub fn to_results(&self, query: &str, response: SearchResponse) -> SearchResults {
        let books = response
            .docs
            .into_iter()
            .take(self.result_limit)
            .map(|doc| self.to_book(doc))
            .collect();

        SearchResults {
            query: query.to_string(),
            total: response.num_found,
            books,
        }
    }

    fn to_book(&self, doc: SearchDoc) -> SearchResultBook {
        let cover_id = doc.cover_i.map(|id| id.to_string());
        SearchResultBook {
            key: strip_prefix(&doc.key, WORK_KEY_PREFIX),
            title: doc.title,
            author_name: doc.author_name,
            first_publish_year: doc.first_publish_year,
            cover_url: self.covers.url(cover_id.as_deref(), CoverSize::Medium),
        }
    }
}
