use std::sync::Arc;

use axum::extract::{Path, State};
use axum::routing::{delete, get, post};
use axum::{middleware, Extension, Json, Router};
use axum_extra::extract::WithRejection;
use smarthome_api::models::*;
use tokio_util::sync::CancellationToken;

use crate::errors::ApiError;
use crate::middlewares::{auth, TokenState};
use crate::services::{CredentialService, TokenClaims, TokenService};

#[derive(Clone)]
pub struct AuthState {
    pub credential_service: Arc<CredentialService>,
    pub token_service: Arc<TokenService>,
    pub shutdown: CancellationToken,
}

pub fn auth_router(auth_state: AuthState, token_state: TokenState) -> Router {
    let protected = Router::new()
        .route("/api/auth/refresh", post(refresh_token))
        .route("/api/auth/me", get(get_current_user))
        .route("/api/auth/users", post(create_user))
        .route("/api/auth/users/:username", delete(delete_user))
        .route_layer(middleware::from_fn_with_state(token_state, auth));

    Router::new()
        .route("/api/auth/login", post(login))
        .merge(protected)
        .with_state(auth_state)
}

#[utoipa::path(
    post,
    path = "/api/auth/login",
    tag = "auth",
    request_body = CredentialsRequest,
    responses(
        (status = 200, description = "Login successful, return bearer token", body = TokenResponse),
        (status = 400, description = "No valid username or password provided"),
        (status = 401, description = "Wrong username or password"),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn login(
    State(state): State<AuthState>,
    WithRejection(Json(body), _): WithRejection<Json<CredentialsRequest>, ApiError>,
) -> Result<Json<TokenResponse>, ApiError> {
    let cancel = state.shutdown.child_token();

    state
        .credential_service
        .authenticate(&body.username, &body.password, &cancel)
        .await?;

    let token = state.token_service.issue_default(&body.username)?;

    tracing::info!(user = %body.username, "user logged in");

    Ok(Json(token.into()))
}

#[utoipa::path(
    post,
    path = "/api/auth/refresh",
    tag = "auth",
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Refresh token successful", body = TokenResponse),
        (status = 401, description = "Unauthorized")
    )
)]
pub async fn refresh_token(
    Extension(claims): Extension<TokenClaims>,
    State(state): State<AuthState>,
) -> Result<Json<TokenResponse>, ApiError> {
    let token = state.token_service.refresh(&claims)?;

    Ok(Json(token.into()))
}

#[utoipa::path(
    get,
    path = "/api/auth/me",
    tag = "auth",
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Claims of the presented token", body = ClaimsResponse),
        (status = 401, description = "Unauthorized")
    )
)]
pub async fn get_current_user(
    Extension(claims): Extension<TokenClaims>,
) -> Json<ClaimsResponse> {
    Json(claims.into())
}

#[utoipa::path(
    post,
    path = "/api/auth/users",
    tag = "auth",
    request_body = CredentialsRequest,
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Credentials stored", body = MessageResponse),
        (status = 400, description = "No valid username or password provided"),
        (status = 401, description = "Unauthorized"),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn create_user(
    Extension(claims): Extension<TokenClaims>,
    State(state): State<AuthState>,
    WithRejection(Json(body), _): WithRejection<Json<CredentialsRequest>, ApiError>,
) -> Result<Json<MessageResponse>, ApiError> {
    let cancel = state.shutdown.child_token();

    state
        .credential_service
        .set_credentials(&body.username, &body.password, &cancel)
        .await?;

    tracing::info!(user = %body.username, by = %claims.sub, "credentials stored");

    Ok(Json(MessageResponse::new("Successfully signed up")))
}

#[utoipa::path(
    delete,
    path = "/api/auth/users/{username}",
    tag = "auth",
    params(
        ("username" = String, Path, description = "User to remove")
    ),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "User removed, or was never present", body = UserResponse),
        (status = 401, description = "Unauthorized"),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn delete_user(
    Extension(claims): Extension<TokenClaims>,
    State(state): State<AuthState>,
    Path(username): Path<String>,
) -> Result<Json<UserResponse>, ApiError> {
    let cancel = state.shutdown.child_token();

    state
        .credential_service
        .delete_user(&username, &cancel)
        .await?;

    tracing::info!(user = %username, by = %claims.sub, "user deleted");

    Ok(Json(UserResponse {
        message: String::from("Successfully deleted user"),
        user: username,
    }))
}
