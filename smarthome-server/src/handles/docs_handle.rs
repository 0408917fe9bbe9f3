use axum::routing::get;
use axum::{Json, Router};
use smarthome_api::models::*;
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use super::*;

#[derive(OpenApi)]
#[openapi(
    paths(
        login,
        refresh_token,
        get_current_user,
        create_user,
        delete_user,
        get_room_options,
        set_room_options,
        delete_room_options,
    ),
    components(schemas(
        CredentialsRequest,
        TokenResponse,
        ClaimsResponse,
        UserResponse,
        MessageResponse,
        RoomOptionsRequest,
        RoomOptionsResponse,
        RoomOptionsLookup,
    )),
    modifiers(&SecurityAddon),
    tags(
        (name = "auth", description = "Administrator credentials and bearer tokens"),
        (name = "rooms", description = "Per-room temperature regulation options")
    )
)]
pub struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}

pub fn docs_router() -> Router {
    Router::new().route("/api/docs/openapi.json", get(openapi))
}

pub async fn openapi() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}
