use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;

use crate::configs::Storage;
use crate::errors::BackendError;
use crate::models::Item;

/// Point lookups and point writes by key; no transactions across keys.
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    async fn get_item(&self, table: &str, key: &str) -> Result<Option<Value>, BackendError>;

    /// Inserts the item or replaces the one already stored under `key`.
    async fn put_item(&self, table: &str, key: &str, item: &Value) -> Result<(), BackendError>;

    /// Removing a missing key is not an error.
    async fn delete_item(&self, table: &str, key: &str) -> Result<(), BackendError>;
}

#[derive(Clone)]
pub struct SqliteStore {
    storage: Arc<Storage>,
}

impl SqliteStore {
    pub fn new(storage: Arc<Storage>) -> Self {
        Self { storage }
    }
}

#[async_trait]
impl KeyValueStore for SqliteStore {
    async fn get_item(&self, table: &str, key: &str) -> Result<Option<Value>, BackendError> {
        let item: Option<Item> =
            sqlx::query_as("SELECT * FROM items WHERE table_name = $1 AND key = $2")
                .bind(table)
                .bind(key)
                .fetch_optional(self.storage.get_pool())
                .await?;

        match item {
            Some(item) => Ok(Some(serde_json::from_str(&item.item)?)),
            None => Ok(None),
        }
    }

    async fn put_item(&self, table: &str, key: &str, item: &Value) -> Result<(), BackendError> {
        sqlx::query(
            r#"
            INSERT INTO items (table_name, key, item)
            VALUES ($1, $2, $3)
            ON CONFLICT (table_name, key) DO UPDATE SET item = excluded.item
            "#,
        )
        .bind(table)
        .bind(key)
        .bind(item.to_string())
        .execute(self.storage.get_pool())
        .await?;

        Ok(())
    }

    async fn delete_item(&self, table: &str, key: &str) -> Result<(), BackendError> {
        sqlx::query("DELETE FROM items WHERE table_name = $1 AND key = $2")
            .bind(table)
            .bind(key)
            .execute(self.storage.get_pool())
            .await?;

        Ok(())
    }
}
