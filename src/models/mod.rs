//! Data models for Betterreads

pub mod author;
pub mod book;
pub mod principal;
pub mod search;
pub mod user_book;

// Re-export commonly used types
pub use author::Author;
pub use book::{Book, BookDetails};
pub use principal::{Principal, PrincipalClaims};
pub use search::{SearchResultBook, SearchResults};
pub use user_book::{AddUserBookForm, UserBook};
