use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use serde::de::DeserializeOwned;
use serde::Serialize;
use tokio_util::sync::CancellationToken;

use crate::errors::{BackendError, Operation, StorageError};
use crate::repositories::KeyValueStore;

/// Typed access to a [`KeyValueStore`]. Every call is bounded by `timeout`
/// and abandoned as soon as the caller's cancellation token fires.
#[derive(Clone)]
pub struct ItemRepository {
    store: Arc<dyn KeyValueStore>,
    timeout: Duration,
}

impl ItemRepository {
    pub fn new(store: Arc<dyn KeyValueStore>, timeout: Duration) -> Self {
        Self { store, timeout }
    }

    pub async fn get<T: DeserializeOwned>(
        &self,
        table: &str,
        key: &str,
        cancel: &CancellationToken,
    ) -> Result<Option<T>, StorageError> {
        let operation = Operation::GetItem;
        let item = self
            .guard(operation, table, key, cancel, self.store.get_item(table, key))
            .await?;

        item.map(serde_json::from_value)
            .transpose()
            .map_err(|e| failure(operation, table, key, e.into()))
    }

    pub async fn put<T: Serialize>(
        &self,
        table: &str,
        key: &str,
        item: &T,
        cancel: &CancellationToken,
    ) -> Result<(), StorageError> {
        let operation = Operation::PutItem;
        let item = serde_json::to_value(item).map_err(|e| failure(operation, table, key, e.into()))?;

        self.guard(operation, table, key, cancel, self.store.put_item(table, key, &item))
            .await
    }

    pub async fn delete(
        &self,
        table: &str,
        key: &str,
        cancel: &CancellationToken,
    ) -> Result<(), StorageError> {
        self.guard(
            Operation::DeleteItem,
            table,
            key,
            cancel,
            self.store.delete_item(table, key),
        )
        .await
    }

    async fn guard<T>(
        &self,
        operation: Operation,
        table: &str,
        key: &str,
        cancel: &CancellationToken,
        call: impl Future<Output = Result<T, BackendError>>,
    ) -> Result<T, StorageError> {
        tokio::select! {
            biased;
            _ = cancel.cancelled() => {
                tracing::debug!(%operation, table, key, "store call cancelled");
                Err(StorageError::Cancelled {
                    operation,
                    table: table.to_string(),
                    key: key.to_string(),
                })
            }
            result = tokio::time::timeout(self.timeout, call) => match result {
                Ok(result) => result.map_err(|e| failure(operation, table, key, e)),
                Err(_) => Err(StorageError::TimedOut {
                    operation,
                    table: table.to_string(),
                    key: key.to_string(),
                    timeout: self.timeout,
                }),
            },
        }
    }
}

fn failure(operation: Operation, table: &str, key: &str, source: BackendError) -> StorageError {
    StorageError::Failure {
        operation,
        table: table.to_string(),
        key: key.to_string(),
        source,
    }
}
