use axum::http::StatusCode;

use super::{AuthError, RoomError, StorageError};

/// Error returned by the room, credential and token operations.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error(transparent)]
    Room(#[from] RoomError),

    #[error(transparent)]
    Auth(#[from] AuthError),

    #[error(transparent)]
    Storage(#[from] StorageError),
}

impl CoreError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            CoreError::Room(e) => e.status_code(),
            CoreError::Auth(e) => e.status_code(),
            CoreError::Storage(e) => e.status_code(),
        }
    }
}
