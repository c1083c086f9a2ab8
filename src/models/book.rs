//! Book model and the detail view built around it

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

use super::user_book::UserBook;

/// Key prefix carried by work records in the dumps
pub const WORK_KEY_PREFIX: &str = "/works/";

/// Name stored when an author reference cannot be resolved at import time
pub const UNKNOWN_AUTHOR: &str = "Unknown Author";

/// Book row imported from the works dump.
///
/// `author_names` is filled at import time from the author table and is
/// never refreshed afterwards. It always has the same length and order as
/// `author_ids`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Book {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    pub published_date: Option<NaiveDate>,
    pub cover_ids: Option<Vec<String>>,
    pub author_ids: Option<Vec<String>>,
    pub author_names: Option<Vec<String>>,
}

impl Book {
    /// First cover id, if the work has any
    pub fn first_cover_id(&self) -> Option<&str> {
        self.cover_ids
            .as_deref()
            .and_then(|ids| ids.first())
            .map(String::as_str)
    }
}

/// Book detail response
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct BookDetails {
    pub book: Book,
    /// Large cover image URL, or the placeholder image
    pub cover_image: String,
    /// Login of the caller, when authenticated
    #[serde(skip_serializing_if = "Option::is_none")]
    pub login: Option<String>,
    /// Reading status of the caller for this book, when authenticated
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_book: Option<UserBook>,
}
