pub mod api;
pub mod auth;
pub mod domain;
pub mod room;
pub mod storage;

pub use api::ApiError;
pub use auth::AuthError;
pub use domain::CoreError;
pub use room::RoomError;
pub use storage::{BackendError, Operation, StorageError};

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use uuid::Uuid;

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self {
            ApiError::CoreError(e) => e.status_code(),
            ApiError::BodyError(_) => StatusCode::BAD_REQUEST,
            ApiError::InternalError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        // Server side failures are logged with an id and never echoed back
        let (error_message, error_id) = if status.is_server_error() {
            let error_id = Uuid::new_v4();
            tracing::error!(error_id = ?error_id, "{}", self);
            let message = match status {
                StatusCode::SERVICE_UNAVAILABLE => "Service unavailable",
                StatusCode::GATEWAY_TIMEOUT => "Storage timed out",
                _ => "Internal server error",
            };
            (message.to_string(), Some(error_id.to_string()))
        } else {
            let message = match self {
                ApiError::CoreError(e) => e.to_string(),
                other => other.to_string(),
            };
            (message, None)
        };

        let mut error_obj = json!({
            "code": status.as_u16(),
            "message": error_message
        });

        if let Some(error_id) = error_id {
            error_obj["error_id"] = json!(error_id);
        }

        let body = Json(json!({
            "error": error_obj
        }));

        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn render(error: ApiError) -> (StatusCode, serde_json::Value) {
        let response = error.into_response();
        let status = response.status();
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();

        (status, serde_json::from_slice(&body).unwrap())
    }

    #[tokio::test]
    async fn test_client_errors_echo_message() {
        let (status, body) = render(RoomError::InvalidRoom("garage".to_string()).into()).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], 400);
        assert_eq!(body["error"]["message"], "Invalid room name provided: garage");
        assert!(body["error"].get("error_id").is_none());
    }

    #[tokio::test]
    async fn test_storage_failure_is_hidden() {
        let error = StorageError::Failure {
            operation: Operation::PutItem,
            table: "ControlPlane".to_string(),
            key: "bedroom".to_string(),
            source: BackendError::Unavailable("connection reset".to_string()),
        };

        let (status, body) = render(error.into()).await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["error"]["message"], "Internal server error");
        assert!(body["error"]["error_id"].is_string());
    }

    #[tokio::test]
    async fn test_cancelled_maps_to_unavailable() {
        let error = StorageError::Cancelled {
            operation: Operation::GetItem,
            table: "ControlPlane".to_string(),
            key: "bedroom".to_string(),
        };

        let (status, _) = render(error.into()).await;

        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    }

    #[tokio::test]
    async fn test_timed_out_maps_to_gateway_timeout() {
        let error = StorageError::TimedOut {
            operation: Operation::PutItem,
            table: "ControlPlane".to_string(),
            key: "livingroom".to_string(),
            timeout: std::time::Duration::from_secs(5),
        };

        let (status, body) = render(error.into()).await;

        assert_eq!(status, StatusCode::GATEWAY_TIMEOUT);
        assert_eq!(body["error"]["code"], 504);
        assert_eq!(body["error"]["message"], "Storage timed out");
        assert!(body["error"]["error_id"].is_string());
    }

    #[tokio::test]
    async fn test_authentication_failure_is_generic() {
        let (status, body) = render(AuthError::AuthenticationFailure.into()).await;

        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["error"]["message"], "Invalid username or password");
    }
}
