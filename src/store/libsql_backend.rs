//! libSQL backend — async `SessionStore` implementation.
//!
//! Supports local file and in-memory databases. One `session_state` table,
//! upserted per (user, key) slot.

use std::path::Path;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use libsql::{Connection, Database as LibSqlDatabase, params};
use tracing::info;

use crate::error::StorageError;
use crate::store::traits::{SessionStore, StateKey};

/// libSQL session state store.
///
/// Stores a single connection that is reused for all operations.
/// `libsql::Connection` is `Send + Sync` and safe for concurrent async use.
pub struct LibSqlStore {
    #[allow(dead_code)]
    db: Arc<LibSqlDatabase>,
    conn: Connection,
}

impl LibSqlStore {
    /// Open (or create) a local database file and initialize the schema.
    pub async fn new_local(path: &Path) -> Result<Self, StorageError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                StorageError::Open(format!("Failed to create store directory: {e}"))
            })?;
        }

        let db = libsql::Builder::new_local(path)
            .build()
            .await
            .map_err(|e| StorageError::Open(format!("Failed to open libSQL database: {e}")))?;

        let conn = db
            .connect()
            .map_err(|e| StorageError::Open(format!("Failed to create connection: {e}")))?;

        let store = Self {
            db: Arc::new(db),
            conn,
        };
        store.init_schema().await?;
        info!(path = %path.display(), "Session store opened");
        Ok(store)
    }

    /// Create an in-memory store (for tests).
    pub async fn new_memory() -> Result<Self, StorageError> {
        let db = libsql::Builder::new_local(":memory:")
            .build()
            .await
            .map_err(|e| StorageError::Open(format!("Failed to create in-memory store: {e}")))?;

        let conn = db
            .connect()
            .map_err(|e| StorageError::Open(format!("Failed to create connection: {e}")))?;

        let store = Self {
            db: Arc::new(db),
            conn,
        };
        store.init_schema().await?;
        Ok(store)
    }

    async fn init_schema(&self) -> Result<(), StorageError> {
        self.conn
            .execute(
                "CREATE TABLE IF NOT EXISTS session_state (
                    user_id    TEXT NOT NULL,
                    key        TEXT NOT NULL,
                    value      TEXT NOT NULL,
                    updated_at TEXT NOT NULL,
                    PRIMARY KEY (user_id, key)
                )",
                (),
            )
            .await
            .map_err(|e| StorageError::Query(e.to_string()))?;
        Ok(())
    }
}

#[async_trait]
impl SessionStore for LibSqlStore {
    async fn load(
        &self,
        user_id: &str,
        key: StateKey,
    ) -> Result<Option<serde_json::Value>, StorageError> {
        let mut rows = self
            .conn
            .query(
                "SELECT value FROM session_state WHERE user_id = ?1 AND key = ?2",
                params![user_id, key.as_str()],
            )
            .await
            .map_err(|e| StorageError::Query(e.to_string()))?;

        match rows
            .next()
            .await
            .map_err(|e| StorageError::Query(e.to_string()))?
        {
            Some(row) => {
                let raw: String = row
                    .get(0)
                    .map_err(|e| StorageError::Query(e.to_string()))?;
                Ok(Some(serde_json::from_str(&raw)?))
            }
            None => Ok(None),
        }
    }

    async fn save(
        &self,
        user_id: &str,
        key: StateKey,
        value: &serde_json::Value,
    ) -> Result<(), StorageError> {
        let raw = serde_json::to_string(value)?;
        self.conn
            .execute(
                "INSERT INTO session_state (user_id, key, value, updated_at)
                 VALUES (?1, ?2, ?3, ?4)
                 ON CONFLICT(user_id, key) DO UPDATE SET
                     value = excluded.value,
                     updated_at = excluded.updated_at",
                params![user_id, key.as_str(), raw, Utc::now().to_rfc3339()],
            )
            .await
            .map_err(|e| StorageError::Query(e.to_string()))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn load_missing_slot_returns_none() {
        let store = LibSqlStore::new_memory().await.unwrap();
        let value = store.load("u1", StateKey::Profile).await.unwrap();
        assert!(value.is_none());
    }

    #[tokio::test]
    async fn save_then_load_roundtrips() {
        let store = LibSqlStore::new_memory().await.unwrap();
        let doc = json!({"name": "User", "usageStats": {"commandsIssued": 3}});
        store.save("u1", StateKey::Profile, &doc).await.unwrap();
        let loaded = store.load("u1", StateKey::Profile).await.unwrap();
        assert_eq!(loaded, Some(doc));
    }

    #[tokio::test]
    async fn save_replaces_previous_value() {
        let store = LibSqlStore::new_memory().await.unwrap();
        store
            .save("u1", StateKey::Learning, &json!({"order": {"successCount": 1}}))
            .await
            .unwrap();
        store
            .save("u1", StateKey::Learning, &json!({"order": {"successCount": 2}}))
            .await
            .unwrap();
        let loaded = store.load("u1", StateKey::Learning).await.unwrap().unwrap();
        assert_eq!(loaded["order"]["successCount"], 2);
    }

    #[tokio::test]
    async fn slots_are_isolated_per_user() {
        let store = LibSqlStore::new_memory().await.unwrap();
        store
            .save("alice", StateKey::Addresses, &json!({"home": "1 Elm St"}))
            .await
            .unwrap();
        assert!(store
            .load("bob", StateKey::Addresses)
            .await
            .unwrap()
            .is_none());
    }

    #[tokio::test]
    async fn local_store_survives_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("state.db");

        {
            let store = LibSqlStore::new_local(&path).await.unwrap();
            store
                .save("u1", StateKey::Conversation, &json!([{"role": "user"}]))
                .await
                .unwrap();
        }

        let reopened = LibSqlStore::new_local(&path).await.unwrap();
        let loaded = reopened
            .load("u1", StateKey::Conversation)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(loaded.as_array().unwrap().len(), 1);
    }
}
