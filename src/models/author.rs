//! Author model

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

/// Key prefix carried by author references in the dumps
pub const AUTHOR_KEY_PREFIX: &str = "/authors/";

/// Author row, keyed by the dump key without its `/authors/` prefix
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Author {
    pub id: String,
    pub name: String,
    pub personal_name: String,
}
