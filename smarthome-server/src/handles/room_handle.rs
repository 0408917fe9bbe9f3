use std::sync::Arc;

use axum::extract::{Path, State};
use axum::routing::get;
use axum::{middleware, Json, Router};
use axum_extra::extract::WithRejection;
use smarthome_api::models::*;
use tokio_util::sync::CancellationToken;

use crate::errors::ApiError;
use crate::middlewares::{auth, TokenState};
use crate::services::RoomService;

#[derive(Clone)]
pub struct RoomState {
    pub room_service: Arc<RoomService>,
    pub shutdown: CancellationToken,
}

pub fn room_router(room_state: RoomState, token_state: TokenState) -> Router {
    Router::new()
        .route(
            "/api/rooms/:room",
            get(get_room_options)
                .post(set_room_options)
                .put(set_room_options)
                .delete(delete_room_options),
        )
        .route_layer(middleware::from_fn_with_state(token_state, auth))
        .with_state(room_state)
}

#[utoipa::path(
    get,
    path = "/api/rooms/{room}",
    tag = "rooms",
    params(
        ("room" = String, Path, description = "Room name, or `all` for every room")
    ),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Options of the room, or of every configured room for `all`", body = RoomOptionsLookup),
        (status = 400, description = "Invalid room name"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "No options stored"),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn get_room_options(
    State(state): State<RoomState>,
    Path(room): Path<String>,
) -> Result<Json<RoomOptionsLookup>, ApiError> {
    let cancel = state.shutdown.child_token();

    let lookup = state
        .room_service
        .get_room_options(&room, &cancel)
        .await?
        .into_lookup(&room)?;

    Ok(Json(lookup))
}

#[utoipa::path(
    post,
    path = "/api/rooms/{room}",
    tag = "rooms",
    params(
        ("room" = String, Path, description = "Room name, or `all` for every room")
    ),
    request_body = RoomOptionsRequest,
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Options stored", body = RoomOptionsLookup),
        (status = 400, description = "Invalid room name or thresholds"),
        (status = 401, description = "Unauthorized"),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn set_room_options(
    State(state): State<RoomState>,
    Path(room): Path<String>,
    WithRejection(Json(body), _): WithRejection<Json<RoomOptionsRequest>, ApiError>,
) -> Result<Json<RoomOptionsLookup>, ApiError> {
    let cancel = state.shutdown.child_token();

    let lookup = state
        .room_service
        .set_room_options(&room, body, &cancel)
        .await?
        .into_lookup(&room)?;

    Ok(Json(lookup))
}

#[utoipa::path(
    delete,
    path = "/api/rooms/{room}",
    tag = "rooms",
    params(
        ("room" = String, Path, description = "Room name, or `all` for every room")
    ),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Options removed, or were never present", body = MessageResponse),
        (status = 400, description = "Invalid room name"),
        (status = 401, description = "Unauthorized"),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn delete_room_options(
    State(state): State<RoomState>,
    Path(room): Path<String>,
) -> Result<Json<MessageResponse>, ApiError> {
    let cancel = state.shutdown.child_token();

    state
        .room_service
        .delete_room_options(&room, &cancel)
        .await?;

    Ok(Json(MessageResponse::new("successfully deleted room options")))
}
