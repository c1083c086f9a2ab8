//! Per-user reading status for a book

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_with::{serde_as, NoneAsEmptyString};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::{Validate, ValidationError};

/// Reading status row, keyed by (user_id, book_id)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct UserBook {
    pub user_id: String,
    pub book_id: String,
    pub started_date: Option<NaiveDate>,
    pub completed_date: Option<NaiveDate>,
    pub reading_status: Option<String>,
    /// 0 means not rated
    pub rating: i32,
}

impl UserBook {
    /// Entry shown when the user has not recorded anything for the book yet
    pub fn empty(user_id: &str, book_id: &str) -> Self {
        Self {
            user_id: user_id.to_string(),
            book_id: book_id.to_string(),
            ..Self::default()
        }
    }
}

/// `POST /addUserBook` form body.
///
/// Empty date fields are accepted and stored as unset.
#[serde_as]
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct AddUserBookForm {
    #[validate(
        length(min = 1, message = "bookId is required"),
        custom(function = "validate_book_id")
    )]
    pub book_id: String,
    #[serde_as(as = "NoneAsEmptyString")]
    #[serde(default)]
    pub start_date: Option<NaiveDate>,
    #[serde_as(as = "NoneAsEmptyString")]
    #[serde(default)]
    pub completed_date: Option<NaiveDate>,
    #[validate(range(min = 0, max = 5, message = "rating must be between 0 and 5"))]
    pub rating: i32,
    #[serde(default)]
    pub status: Option<String>,
}

/// Work ids are used as a path segment in the redirect after saving
fn validate_book_id(book_id: &str) -> Result<(), ValidationError> {
    let valid = book_id
        .chars()
        .all(|c| c.is_ascii_graphic() && !matches!(c, '/' | '?' | '#' | '%'));
    if valid {
        Ok(())
    } else {
        let mut error = ValidationError::new("book_id");
        error.message = Some("bookId must be printable ASCII without path separators".into());
        Err(error)
    }
}

impl AddUserBookForm {
    pub fn into_user_book(self, user_id: &str) -> UserBook {
        UserBook {
            user_id: user_id.to_string(),
            book_id: self.book_id,
            started_date: self.start_date,
            completed_date: self.completed_date,
            reading_status: self.status.filter(|s| !s.is_empty()),
            rating: self.rating,
        }
    }
}
