use serde::{Deserialize, Serialize};

use crate::bookmarks::sanitize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bookmark {
    pub id: i64,
    pub title: String,
    pub url: String,
    pub rating: i64,
    pub description: String,
}

impl Bookmark {
    /// Copy with every textual field escaped, for serving rows that may predate validation.
    pub fn sanitized(self) -> Self {
        Bookmark {
            id: self.id,
            title: sanitize(&self.title),
            url: sanitize(&self.url),
            rating: self.rating,
            description: sanitize(&self.description),
        }
    }
}

/// Fields supplied on a partial update. `None` leaves the column untouched.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct BookmarkPatch {
    pub title: Option<String>,
    pub url: Option<String>,
    pub rating: Option<i64>,
    pub description: Option<String>,
}

impl BookmarkPatch {
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.url.is_none() && self.rating.is_none() && self.description.is_none()
    }
}
