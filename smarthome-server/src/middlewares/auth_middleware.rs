use std::sync::Arc;

use axum::body::Body;
use axum::extract::{Query, State};
use axum::http::{header, Request};
use axum::middleware::Next;
use axum::response::Response;
use axum_extra::headers::authorization::Bearer;
use axum_extra::headers::{Authorization, Header};
use serde::Deserialize;

use crate::errors::{ApiError, AuthError};
use crate::services::TokenService;

#[derive(Clone)]
pub struct TokenState {
    pub token_service: Arc<TokenService>,
}

#[derive(Deserialize)]
struct TokenQuery {
    token: Option<String>,
}

/// Validates the bearer token from the `Authorization` header, or from the
/// `token` query parameter when the header is absent, and attaches its
/// claims to the request.
pub async fn auth(
    State(state): State<TokenState>,
    mut req: Request<Body>,
    next: Next,
) -> Result<Response, ApiError> {
    let token = match req.headers().get(header::AUTHORIZATION) {
        Some(_) => {
            let mut headers = req.headers().get_all(header::AUTHORIZATION).iter();
            let header: Authorization<Bearer> =
                Authorization::decode(&mut headers).map_err(|_| AuthError::InvalidToken)?;

            header.token().to_string()
        }
        None => Query::<TokenQuery>::try_from_uri(req.uri())
            .ok()
            .and_then(|Query(query)| query.token)
            .ok_or(AuthError::MissingToken)?,
    };

    let claims = state.token_service.validate(&token)?;

    req.extensions_mut().insert(claims);

    Ok(next.run(req).await)
}
