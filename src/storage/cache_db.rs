use rusqlite::{OptionalExtension, Result as SqlResult, params};
use std::path::Path;

use crate::common::GuestbookMessage;
use crate::error::GuestbookError;

use super::database::Database;

/// Key the last fetched message collection is stored under.
pub const MESSAGES_KEY: &str = "chat_messages";

/// Local key/value cache for the last known message collection
pub struct MessageCache {
    db: Database,
}

impl MessageCache {
    /// Open (or create) the cache at a file path
    pub fn with_path<P: AsRef<Path>>(path: P) -> SqlResult<Self> {
        Self::from_database(Database::new(path)?)
    }

    pub fn in_memory() -> SqlResult<Self> {
        Self::from_database(Database::in_memory()?)
    }

    fn from_database(db: Database) -> SqlResult<Self> {
        let cache = Self { db };
        cache.init_schema()?;
        Ok(cache)
    }

    fn init_schema(&self) -> SqlResult<()> {
        self.db.connection().execute(
            "CREATE TABLE IF NOT EXISTS kv_cache (
                key TEXT PRIMARY KEY,
                value TEXT NOT NULL,
                updated_at INTEGER NOT NULL DEFAULT (strftime('%s', 'now'))
            )",
            [],
        )?;
        Ok(())
    }

    pub fn load_raw(&self, key: &str) -> SqlResult<Option<String>> {
        self.db
            .connection()
            .query_row(
                "SELECT value FROM kv_cache WHERE key = ?1",
                params![key],
                |row| row.get(0),
            )
            .optional()
    }

    /// Overwrite the value stored under `key`
    pub fn store_raw(&self, key: &str, value: &str) -> SqlResult<()> {
        self.db.connection().execute(
            "INSERT OR REPLACE INTO kv_cache (key, value, updated_at)
             VALUES (?1, ?2, strftime('%s', 'now'))",
            params![key, value],
        )?;
        Ok(())
    }

    /// Cached collection, `Ok(None)` when nothing is cached yet.
    /// Corrupt content is a [`GuestbookError::Decode`].
    pub fn load_messages(&self) -> Result<Option<Vec<GuestbookMessage>>, GuestbookError> {
        let Some(raw) = self.load_raw(MESSAGES_KEY)? else {
            return Ok(None);
        };
        let messages = serde_json::from_str(&raw)?;
        Ok(Some(messages))
    }

    /// Store a collection in received order
    pub fn store_messages(&self, messages: &[GuestbookMessage]) -> Result<(), GuestbookError> {
        let raw = serde_json::to_string(messages)?;
        self.store_raw(MESSAGES_KEY, &raw)?;
        Ok(())
    }

    pub fn clear(&self) -> SqlResult<()> {
        self.db.connection().execute(
            "DELETE FROM kv_cache WHERE key = ?1",
            params![MESSAGES_KEY],
        )?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn message(name: &str, text: &str) -> GuestbookMessage {
        GuestbookMessage {
            name: Some(name.into()),
            message: Some(text.into()),
            timestamp: None,
        }
    }

    #[test]
    fn empty_cache_loads_nothing() {
        let cache = MessageCache::in_memory().unwrap();
        assert_eq!(cache.load_messages().unwrap(), None);
    }

    #[test]
    fn store_overwrites_previous_collection() {
        let cache = MessageCache::in_memory().unwrap();
        cache.store_messages(&[message("A", "hi")]).unwrap();
        cache
            .store_messages(&[message("A", "hi"), message("B", "yo")])
            .unwrap();

        let loaded = cache.load_messages().unwrap().unwrap();
        assert_eq!(loaded, vec![message("A", "hi"), message("B", "yo")]);
    }

    #[test]
    fn corrupt_value_is_a_decode_error() {
        let cache = MessageCache::in_memory().unwrap();
        cache.store_raw(MESSAGES_KEY, "{not json").unwrap();
        assert!(matches!(
            cache.load_messages(),
            Err(GuestbookError::Decode(_))
        ));
    }

    #[test]
    fn stores_normalized_records() {
        let cache = MessageCache::in_memory().unwrap();
        let fetched: Vec<GuestbookMessage> =
            serde_json::from_str(r#"[{"name": 42, "message": "hi", "extra": true}]"#).unwrap();
        cache.store_messages(&fetched).unwrap();

        assert_eq!(
            cache.load_raw(MESSAGES_KEY).unwrap().as_deref(),
            Some(r#"[{"name":"42","message":"hi"}]"#)
        );
    }

    #[test]
    fn clear_removes_the_collection() {
        let cache = MessageCache::in_memory().unwrap();
        cache.store_messages(&[message("A", "hi")]).unwrap();
        cache.clear().unwrap();
        assert_eq!(cache.load_raw(MESSAGES_KEY).unwrap(), None);
    }
}
