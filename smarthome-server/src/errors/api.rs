use axum::extract::rejection::JsonRejection;

use super::{AuthError, CoreError, RoomError, StorageError};

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error(transparent)]
    CoreError(#[from] CoreError),

    #[error("Invalid request body: {0}")]
    BodyError(#[from] JsonRejection),

    #[error("Internal error: {0}")]
    InternalError(#[from] anyhow::Error),
}

impl From<AuthError> for ApiError {
    fn from(e: AuthError) -> Self {
        ApiError::CoreError(e.into())
    }
}

impl From<RoomError> for ApiError {
    fn from(e: RoomError) -> Self {
        ApiError::CoreError(e.into())
    }
}

impl From<StorageError> for ApiError {
    fn from(e: StorageError) -> Self {
        ApiError::CoreError(e.into())
    }
}
