use anyhow::Result;
use libsql::Connection;

use crate::model::{Bookmark, BookmarkPatch};

const COLUMNS: &str = "id, title, url, rating, description";

/// Statement-per-call façade over the `bookmarks` table. Holds only a borrowed
/// connection, so build one per request.
pub struct BookmarkStore<'a> {
    conn: &'a Connection,
}

impl<'a> BookmarkStore<'a> {
    pub fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }

    pub async fn list_all(&self) -> Result<Vec<Bookmark>> {
        let query = format!("SELECT {COLUMNS} FROM bookmarks ORDER BY id");

        let mut rows = self.conn.query(&query, ()).await?;
        let mut bookmarks = Vec::new();

        while let Some(row) = rows.next().await? {
            bookmarks.push(self.row_to_bookmark(&row)?);
        }

        Ok(bookmarks)
    }

    pub async fn get_by_id(&self, id: i64) -> Result<Option<Bookmark>> {
        let query = format!("SELECT {COLUMNS} FROM bookmarks WHERE id = ?");

        let mut rows = self.conn.query(&query, libsql::params![id]).await?;

        if let Some(row) = rows.next().await? {
            Ok(Some(self.row_to_bookmark(&row)?))
        } else {
            Ok(None)
        }
    }

    /// Fails on a primary key collision; ids are chosen by the client.
    pub async fn insert(&self, bookmark: &Bookmark) -> Result<Bookmark> {
        let query = format!(
            "INSERT INTO bookmarks ({COLUMNS}) VALUES (?, ?, ?, ?, ?) RETURNING {COLUMNS}"
        );

        let mut rows = self
            .conn
            .query(
                &query,
                libsql::params![
                    bookmark.id,
                    bookmark.title.as_str(),
                    bookmark.url.as_str(),
                    bookmark.rating,
                    bookmark.description.as_str()
                ],
            )
            .await?;

        if let Some(row) = rows.next().await? {
            Ok(self.row_to_bookmark(&row)?)
        } else {
            anyhow::bail!("Failed to create bookmark {}", bookmark.id)
        }
    }

    /// Returns the number of rows changed; 0 means no bookmark has this id.
    pub async fn update(&self, id: i64, patch: &BookmarkPatch) -> Result<u64> {
        let mut updates = Vec::new();
        let mut params: Vec<libsql::Value> = Vec::new();

        if let Some(title) = &patch.title {
            updates.push("title = ?");
            params.push(title.clone().into());
        }
        if let Some(url) = &patch.url {
            updates.push("url = ?");
            params.push(url.clone().into());
        }
        if let Some(rating) = patch.rating {
            updates.push("rating = ?");
            params.push(rating.into());
        }
        if let Some(description) = &patch.description {
            updates.push("description = ?");
            params.push(description.clone().into());
        }

        if updates.is_empty() {
            return Ok(0);
        }

        params.push(id.into());
        let query = format!("UPDATE bookmarks SET {} WHERE id = ?", updates.join(", "));

        Ok(self.conn.execute(&query, params).await?)
    }

    /// Deleting an id that does not exist is not an error.
    pub async fn delete(&self, id: i64) -> Result<u64> {
        let affected = self
            .conn
            .execute("DELETE FROM bookmarks WHERE id = ?", libsql::params![id])
            .await?;
        Ok(affected)
    }

    fn row_to_bookmark(&self, row: &libsql::Row) -> Result<Bookmark> {
        Ok(Bookmark {
            id: row.get(0)?,
            title: row.get(1)?,
            url: row.get(2)?,
            rating: row.get(3)?,
            description: row.get::<Option<String>>(4)?.unwrap_or_default(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::Database;

    fn bookmark(id: i64, title: &str, rating: i64) -> Bookmark {
        Bookmark {
            id,
            title: title.to_string(),
            url: format!("https://example.com/{}", id),
            rating,
            description: String::new(),
        }
    }

    #[tokio::test]
    async fn test_insert_and_get() {
        let db = Database::in_memory().await.unwrap();
        let store = BookmarkStore::new(db.connection());

        let created = store.insert(&bookmark(3, "three", 4)).await.unwrap();
        assert_eq!(created, bookmark(3, "three", 4));

        assert_eq!(store.get_by_id(3).await.unwrap(), Some(bookmark(3, "three", 4)));
        assert_eq!(store.get_by_id(4).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_list_all_in_id_order() {
        let db = Database::in_memory().await.unwrap();
        let store = BookmarkStore::new(db.connection());
        assert!(store.list_all().await.unwrap().is_empty());

        for id in [2, 1, 3] {
            store.insert(&bookmark(id, "b", 1)).await.unwrap();
        }

        let ids: Vec<i64> = store.list_all().await.unwrap().iter().map(|b| b.id).collect();
        assert_eq!(ids, vec![1, 2, 3]);
    }

    #[tokio::test]
    async fn test_insert_duplicate_id_fails() {
        let db = Database::in_memory().await.unwrap();
        let store = BookmarkStore::new(db.connection());

        store.insert(&bookmark(1, "first", 1)).await.unwrap();
        assert!(store.insert(&bookmark(1, "second", 2)).await.is_err());
        assert_eq!(store.get_by_id(1).await.unwrap().unwrap().title, "first");
    }

    #[tokio::test]
    async fn test_update_only_supplied_fields() {
        let db = Database::in_memory().await.unwrap();
        let store = BookmarkStore::new(db.connection());
        store.insert(&bookmark(1, "old", 1)).await.unwrap();

        let patch = BookmarkPatch {
            title: Some("new".to_string()),
            rating: Some(5),
            ..Default::default()
        };
        assert_eq!(store.update(1, &patch).await.unwrap(), 1);

        let updated = store.get_by_id(1).await.unwrap().unwrap();
        assert_eq!(updated.title, "new");
        assert_eq!(updated.rating, 5);
        assert_eq!(updated.url, "https://example.com/1");

        assert_eq!(store.update(42, &patch).await.unwrap(), 0);
        assert_eq!(store.update(1, &BookmarkPatch::default()).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_delete_is_idempotent() {
        let db = Database::in_memory().await.unwrap();
        let store = BookmarkStore::new(db.connection());
        store.insert(&bookmark(1, "gone", 1)).await.unwrap();

        assert_eq!(store.delete(1).await.unwrap(), 1);
        assert_eq!(store.delete(1).await.unwrap(), 0);
        assert_eq!(store.get_by_id(1).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_null_description_reads_as_empty() {
        let db = Database::in_memory().await.unwrap();
        db.connection()
            .execute(
                "INSERT INTO bookmarks (id, title, url, rating, description) VALUES (9, 't', 'u', 2, NULL)",
                (),
            )
            .await
            .unwrap();

        let store = BookmarkStore::new(db.connection());
        assert_eq!(store.get_by_id(9).await.unwrap().unwrap().description, "");
    }
}
