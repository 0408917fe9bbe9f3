use axum::http::StatusCode;

#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    /// Unknown user and wrong password are reported identically.
    #[error("Invalid username or password")]
    AuthenticationFailure,

    #[error("Invalid token")]
    InvalidToken,

    #[error("Missing bearer token")]
    MissingToken,

    #[error("Failed to hash password: {0}")]
    HashingFailure(String),

    #[error("Failed to sign token: {0}")]
    SigningFailure(String),
}

impl AuthError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AuthError::AuthenticationFailure => StatusCode::UNAUTHORIZED,
            AuthError::InvalidToken => StatusCode::UNAUTHORIZED,
            AuthError::MissingToken => StatusCode::UNAUTHORIZED,
            AuthError::HashingFailure(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AuthError::SigningFailure(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}
