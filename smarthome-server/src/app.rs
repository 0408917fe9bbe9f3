use std::sync::Arc;

use anyhow::Context;
use axum::http::HeaderValue;
use axum::Router;
use tokio_util::sync::CancellationToken;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::configs::{Cors, SchemaManager, Settings, Storage};
use crate::handles::*;
use crate::middlewares::TokenState;
use crate::repositories::{ItemRepository, KeyValueStore, SqliteStore};
use crate::services::{CredentialService, RoomService, TokenService};

pub async fn create_app(
    settings: &Arc<Settings>,
    shutdown: CancellationToken,
) -> anyhow::Result<Router> {
    let storage = Arc::new(
        Storage::new(settings.database.clone(), SchemaManager::default())
            .await
            .context("failed to open storage")?,
    );
    let store: Arc<dyn KeyValueStore> = Arc::new(SqliteStore::new(storage));

    build_router(settings, store, shutdown).await
}

/// Wires the services around an already opened store.
pub async fn build_router(
    settings: &Arc<Settings>,
    store: Arc<dyn KeyValueStore>,
    shutdown: CancellationToken,
) -> anyhow::Result<Router> {
    let items = Arc::new(ItemRepository::new(store, settings.store.timeout()));

    let credential_service = Arc::new(CredentialService::new(
        items.clone(),
        settings.store.auth_table.clone(),
    ));
    let room_service = Arc::new(RoomService::new(
        items.clone(),
        settings.store.control_plane_table.clone(),
    ));
    let token_service = Arc::new(TokenService::new(&settings.auth));

    if let Some(admin) = &settings.auth.admin {
        credential_service
            .set_credentials(&admin.username, &admin.password, &shutdown)
            .await
            .context("failed to store administrator credentials")?;

        tracing::info!(user = %admin.username, "administrator credentials stored");
    }

    let token_state = TokenState {
        token_service: token_service.clone(),
    };

    let auth = auth_router(
        AuthState {
            credential_service,
            token_service,
            shutdown: shutdown.clone(),
        },
        token_state.clone(),
    );

    let rooms = room_router(
        RoomState {
            room_service,
            shutdown,
        },
        token_state,
    );

    Ok(Router::new()
        .merge(auth)
        .merge(rooms)
        .merge(docs_router())
        .layer(cors_layer(&settings.cors)?)
        .layer(TraceLayer::new_for_http()))
}

fn cors_layer(cors: &Cors) -> anyhow::Result<CorsLayer> {
    if cors.is_permissive() {
        return Ok(CorsLayer::permissive());
    }

    let origins = cors
        .origins
        .iter()
        .map(|origin| {
            origin
                .parse::<HeaderValue>()
                .with_context(|| format!("invalid cors origin '{origin}'"))
        })
        .collect::<anyhow::Result<Vec<_>>>()?;

    Ok(CorsLayer::new()
        .allow_origin(origins)
        .allow_methods(Any)
        .allow_headers(Any))
}
