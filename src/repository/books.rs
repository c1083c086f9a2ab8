//! Books repository

use async_trait::async_trait;
use sqlx::{Pool, Postgres};

use super::BookStore;
use crate::{error::AppResult, models::Book};

#[derive(Clone)]
pub struct BooksRepository {
    pool: Pool<Postgres>,
}

impl BooksRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl BookStore for BooksRepository {
    async fn upsert(&self, book: &Book) -> AppResult<()> {
        sqlx::query(
            r#"
            INSERT INTO book_by_id
                (id, name, description, published_date, cover_ids, author_ids, author_names)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            ON CONFLICT (id) DO UPDATE
            SET name = EXCLUDED.name,
                description = EXCLUDED.description,
                published_date = EXCLUDED.published_date,
                cover_ids = EXCLUDED.cover_ids,
                author_ids = EXCLUDED.author_ids,
                author_names = EXCLUDED.author_names
            "#,
        )
        .bind(&book.id)
        .bind(&book.name)
        .bind(&book.description)
        .bind(book.published_date)
        .bind(&book.cover_ids)
        .bind(&book.author_ids)
        .bind(&book.author_names)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn find_by_id(&self, id: &str) -> AppResult<Option<Book>> {
        let book = sqlx::query_as::<_, Book>(
            r#"
            SELECT id, name, description, published_date, cover_ids, author_ids, author_names
            FROM book_by_id
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(book)
    }
}
