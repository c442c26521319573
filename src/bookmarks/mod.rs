//! Bookmarks Module
//!
//! CRUD over the single `bookmarks` table. Mutating requests are validated and
//! their text fields escaped before they reach the store; reads are escaped again
//! on the way out, so rows written by other tools are served safely too.
//!
//! # Usage
//!
//! ```rust,ignore
//! use bookmarks::bookmarks;
//!
//! let app = Router::new()
//!     .merge(bookmarks::routes())
//!     .with_state(app_state);
//!
//! let store = bookmarks::BookmarkStore::new(db.connection());
//! let all = store.list_all().await?;
//! ```

mod handler;
mod routes;
mod sanitize;
mod store;
mod validate;

pub use routes::routes;
pub use sanitize::sanitize;
pub use store::BookmarkStore;
pub use validate::{validate_create, validate_update};

/// Returns the migrations for the bookmarks table, in application order.
pub fn migrations() -> &'static [(&'static str, &'static str)] {
    &[("bookmarks_001_schema.sql", include_str!("migrations/001_schema.sql"))]
}
