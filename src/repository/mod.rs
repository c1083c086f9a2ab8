//! Repository layer for database operations

pub mod authors;
pub mod books;
pub mod user_books;

use async_trait::async_trait;
use sqlx::{Pool, Postgres};

use crate::{
    error::AppResult,
    models::{Author, Book, UserBook},
};

/// Author storage used by the importers
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AuthorStore: Send + Sync {
    /// Insert or overwrite the author with the same id
    async fn upsert(&self, author: &Author) -> AppResult<()>;
    async fn find_by_id(&self, id: &str) -> AppResult<Option<Author>>;
}

/// Book storage used by the importers and the book pages
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BookStore: Send + Sync {
    /// Insert or overwrite the book with the same id
    async fn upsert(&self, book: &Book) -> AppResult<()>;
    async fn find_by_id(&self, id: &str) -> AppResult<Option<Book>>;
}

/// Per-user reading status storage
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserBookStore: Send + Sync {
    async fn find_by_id(&self, user_id: &str, book_id: &str) -> AppResult<Option<UserBook>>;
    /// Insert or overwrite the entry for the (user, book) pair
    async fn upsert(&self, user_book: &UserBook) -> AppResult<UserBook>;
}

/// Main repository struct holding database connection pool
#[derive(Clone)]
pub struct Repository {
    pub pool: Pool<Postgres>,
    pub authors: authors::AuthorsRepository,
    pub books: books::BooksRepository,
    pub user_books: user_books::UserBooksRepository,
}

impl Repository {
    /// Create a new repository with the given database pool
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self {
            authors: authors::AuthorsRepository::new(pool.clone()),
            books: books::BooksRepository::new(pool.clone()),
            user_books: user_books::UserBooksRepository::new(pool.clone()),
            pool,
        }
    }

    /// Round-trip to the database, used by the readiness probe
    pub async fn ping(&self) -> AppResult<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}
