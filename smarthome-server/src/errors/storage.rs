use std::fmt;
use std::time::Duration;

use axum::http::StatusCode;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    GetItem,
    PutItem,
    DeleteItem,
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Operation::GetItem => write!(f, "get_item"),
            Operation::PutItem => write!(f, "put_item"),
            Operation::DeleteItem => write!(f, "delete_item"),
        }
    }
}

/// Error raised by a storage engine implementation.
#[derive(Debug, thiserror::Error)]
pub enum BackendError {
    #[error(transparent)]
    Database(#[from] sqlx::Error),

    #[error("malformed item: {0}")]
    Encoding(#[from] serde_json::Error),

    #[error("store unavailable: {0}")]
    Unavailable(String),
}

#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("{operation} on {table}/{key} failed: {source}")]
    Failure {
        operation: Operation,
        table: String,
        key: String,
        #[source]
        source: BackendError,
    },

    #[error("{operation} on {table}/{key} was cancelled")]
    Cancelled {
        operation: Operation,
        table: String,
        key: String,
    },

    #[error("{operation} on {table}/{key} timed out after {timeout:?}")]
    TimedOut {
        operation: Operation,
        table: String,
        key: String,
        timeout: Duration,
    },
}

impl StorageError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            StorageError::Failure { .. } => StatusCode::INTERNAL_SERVER_ERROR,
            StorageError::Cancelled { .. } => StatusCode::SERVICE_UNAVAILABLE,
            StorageError::TimedOut { .. } => StatusCode::GATEWAY_TIMEOUT,
        }
    }
}
