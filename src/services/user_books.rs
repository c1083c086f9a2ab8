//! Reading status service

use std::sync::Arc;

use validator::Validate;

use crate::{
    error::{AppError, AppResult},
    models::{AddUserBookForm, UserBook},
    repository::UserBookStore,
};

#[derive(Clone)]
pub struct UserBooksService {
    store: Arc<dyn UserBookStore>,
}

impl UserBooksService {
    pub fn new(store: Arc<dyn UserBookStore>) -> Self {
        Self { store }
    }

    /// Validate the form and store it as the user's entry for the book
    pub async fn save(&self, user_id: &str, form: AddUserBookForm) -> AppResult<UserBook> {
        form.validate()
            .map_err(|e| AppError::Validation(e.to_string()))?;

        let user_book = form.into_user_book(user_id);
        tracing::info!(
            "Saving reading status for user {} on book {}",
            user_book.user_id,
            user_book.book_id
        );
        self.store.upsert(&user_book).await
    }
}
