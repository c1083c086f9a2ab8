//! Business logic services

pub mod books;
pub mod search;
pub mod user_books;

use std::sync::Arc;

use crate::{config::AppConfig, error::AppResult, repository::Repository};

/// Container for all services
#[derive(Clone)]
pub struct Services {
    pub books: books::BooksService,
    pub user_books: user_books::UserBooksService,
    pub search: search::SearchService,
    pub repository: Repository,
}

impl Services {
    /// Create all services with the given repository
    pub fn new(repository: Repository, config: &AppConfig) -> AppResult<Self> {
        let covers = books::CoverUrls::new(&config.covers);
        Ok(Self {
            books: books::BooksService::new(
                Arc::new(repository.books.clone()),
                Arc::new(repository.user_books.clone()),
                covers.clone(),
            ),
            user_books: user_books::UserBooksService::new(Arc::new(repository.user_books.clone())),
            search: search::SearchService::new(&config.search, covers)?,
            repository,
        })
    }
}
