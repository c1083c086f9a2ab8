//! Book lookup service

use std::sync::Arc;

use crate::{
    config::CoversConfig,
    error::{AppError, AppResult},
    models::{Book, BookDetails, UserBook},
    repository::{BookStore, UserBookStore},
};

/// Cover image sizes served by the cover host
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CoverSize {
    Medium,
    Large,
}

impl CoverSize {
    fn suffix(self) -> &'static str {
        match self {
            CoverSize::Medium => "M",
            CoverSize::Large => "L",
        }
    }
}

/// Builds cover image URLs, falling back to a placeholder image
#[derive(Debug, Clone)]
pub struct CoverUrls {
    image_root: String,
    placeholder: String,
}

impl CoverUrls {
    pub fn new(config: &CoversConfig) -> Self {
        Self {
            image_root: config.image_root.clone(),
            placeholder: config.placeholder.clone(),
        }
    }

    pub fn url(&self, cover_id: Option<&str>, size: CoverSize) -> String {
        match cover_id.map(str::trim).filter(|id| !id.is_empty()) {
            Some(id) => format!("{}{}-{}.jpg", self.image_root, id, size.suffix()),
            None => self.placeholder.clone(),
        }
    }
}

#[derive(Clone)]
pub struct BooksService {
    books: Arc<dyn BookStore>,
    user_books: Arc<dyn UserBookStore>,
    covers: CoverUrls,
}

impl BooksService {
    pub fn new(
        books: Arc<dyn BookStore>,
        user_books: Arc<dyn UserBookStore>,
        covers: CoverUrls,
    ) -> Self {
        Self {
            books,
            user_books,
            covers,
        }
    }

    /// Get a book by ID
    pub async fn get_book(&self, id: &str) -> AppResult<Book> {
        self.books
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Book {} not found", id)))
    }

    /// Book with its cover URL and, for a signed-in user, their reading status
    pub async fn get_book_details(&self, id: &str, login: Option<&str>) -> AppResult<BookDetails> {
        let book = self.get_book(id).await?;
        let cover_image = self.covers.url(book.first_cover_id(), CoverSize::Large);

        let user_book = match login {
            Some(user_id) => Some(
                self.user_books
                    .find_by_id(user_id, id)
                    .await?
                    .unwrap_or_else(|| UserBook::empty(user_id, id)),
            ),
            None => None,
        };

        Ok(BookDetails {
            book,
            cover_image,
            login: login.map(str::to_string),
            user_book,
        })
    }
}
