use axum::http::StatusCode;

#[derive(Debug, thiserror::Error)]
pub enum RoomError {
    #[error("Invalid room name provided: {0}")]
    InvalidRoom(String),

    #[error("threshold_on ({threshold_on}) should be lower or equal to threshold_off ({threshold_off})")]
    InvalidThresholds { threshold_on: f32, threshold_off: f32 },

    #[error("No options found for room {0}")]
    NotFound(String),
}

impl RoomError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            RoomError::InvalidRoom(_) => StatusCode::BAD_REQUEST,
            RoomError::InvalidThresholds { .. } => StatusCode::BAD_REQUEST,
            RoomError::NotFound(_) => StatusCode::NOT_FOUND,
        }
    }
}
