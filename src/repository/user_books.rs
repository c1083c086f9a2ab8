//! User books repository (reading status per user and book)

use async_trait::async_trait;
use sqlx::{Pool, Postgres};

use super::UserBookStore;
use crate::{error::AppResult, models::UserBook};

#[derive(Clone)]
pub struct UserBooksRepository {
    pool: Pool<Postgres>,
}

impl UserBooksRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserBookStore for UserBooksRepository {
    async fn find_by_id(&self, user_id: &str, book_id: &str) -> AppResult<Option<UserBook>> {
        let row = sqlx::query_as::<_, UserBook>(
            r#"
            SELECT user_id, book_id, started_date, completed_date, reading_status, rating
            FROM book_by_user_and_bookid
            WHERE user_id = $1 AND book_id = $2
            "#,
        )
        .bind(user_id)
        .bind(book_id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row)
    }

    async fn upsert(&self, user_book: &UserBook) -> AppResult<UserBook> {
        let row = sqlx::query_as::<_, UserBook>(
            r#"
            INSERT INTO book_by_user_and_bookid
                (user_id, book_id, started_date, completed_date, reading_status, rating)
            VALUES ($1, $2, $3, $4, $5, $6)
            ON CONFLICT (user_id, book_id) DO UPDATE
            SET started_date = EXCLUDED.started_date,
                completed_date = EXCLUDED.completed_date,
                reading_status = EXCLUDED.reading_status,
                rating = EXCLUDED.rating
            RETURNING user_id, book_id, started_date, completed_date, reading_status, rating
            "#,
        )
        .bind(&user_book.user_id)
        .bind(&user_book.book_id)
        .bind(user_book.started_date)
        .bind(user_book.completed_date)
        .bind(&user_book.reading_status)
        .bind(user_book.rating)
        .fetch_one(&self.pool)
        .await?;
        Ok(row)
    }
}
