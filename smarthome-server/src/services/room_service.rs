use std::sync::Arc;

use futures::future::try_join_all;
use smarthome_api::models::{RoomOptionsLookup, RoomOptionsRequest};
use tokio_util::sync::CancellationToken;

use crate::errors::{CoreError, RoomError};
use crate::models::{Room, RoomOptions, RoomTarget};
use crate::repositories::ItemRepository;

#[derive(Debug, Clone, PartialEq)]
pub enum RoomLookup {
    Single(RoomOptions),
    Many(Vec<RoomOptions>),
    NotFound,
}

impl RoomLookup {
    /// Converts to the wire shape, treating an empty result as [`RoomError::NotFound`].
    pub fn into_lookup(self, target: &str) -> Result<RoomOptionsLookup, RoomError> {
        match self {
            RoomLookup::Single(options) => Ok(RoomOptionsLookup::Single(options.into())),
            RoomLookup::Many(options) => Ok(RoomOptionsLookup::Many(
                options.into_iter().map(Into::into).collect(),
            )),
            RoomLookup::NotFound => Err(RoomError::NotFound(target.to_string())),
        }
    }
}

/// Per-room regulation options kept in the control plane key space.
#[derive(Clone)]
pub struct RoomService {
    items: Arc<ItemRepository>,
    table: String,
}

impl RoomService {
    pub fn new(items: Arc<ItemRepository>, table: impl Into<String>) -> Self {
        Self {
            items,
            table: table.into(),
        }
    }

    pub async fn set(
        &self,
        room: Room,
        enabled: bool,
        threshold_on: f32,
        threshold_off: f32,
        cancel: &CancellationToken,
    ) -> Result<RoomOptions, CoreError> {
        let options = RoomOptions {
            room,
            enabled,
            threshold_on,
            threshold_off,
        };
        options.validate()?;

        tracing::debug!(%room, ?options, "saving room options");

        self.items
            .put(&self.table, room.as_str(), &options, cancel)
            .await?;

        tracing::debug!(%room, "successfully saved room options");

        Ok(options)
    }

    /// `None` when nothing was ever stored for the room.
    pub async fn get(
        &self,
        room: Room,
        cancel: &CancellationToken,
    ) -> Result<Option<RoomOptions>, CoreError> {
        tracing::debug!(%room, "getting room options");

        let options = self.items.get(&self.table, room.as_str(), cancel).await?;

        tracing::debug!(%room, found = options.is_some(), "retrieved room options");

        Ok(options)
    }

    pub async fn delete(&self, room: Room, cancel: &CancellationToken) -> Result<(), CoreError> {
        tracing::debug!(%room, "deleting room options");

        self.items.delete(&self.table, room.as_str(), cancel).await?;

        Ok(())
    }

    /// Applies the options to one room or, for the wildcard, to every room.
    /// The first failure aborts the remaining writes; writes that already
    /// landed are kept.
    pub async fn set_room_options(
        &self,
        target: &str,
        request: RoomOptionsRequest,
        cancel: &CancellationToken,
    ) -> Result<RoomLookup, CoreError> {
        let target: RoomTarget = target.parse()?;

        // Reject bad thresholds before any room is touched
        RoomOptions {
            room: Room::Bedroom,
            enabled: request.enabled,
            threshold_on: request.threshold_on,
            threshold_off: request.threshold_off,
        }
        .validate()?;

        let mut written = try_join_all(target.expand().into_iter().map(|room| {
            self.set(
                room,
                request.enabled,
                request.threshold_on,
                request.threshold_off,
                cancel,
            )
        }))
        .await?;

        let lookup = match target {
            RoomTarget::Single(_) if written.len() == 1 => RoomLookup::Single(written.remove(0)),
            _ => RoomLookup::Many(written),
        };

        Ok(lookup)
    }

    /// Reads one room or, for the wildcard, every room that has options.
    pub async fn get_room_options(
        &self,
        target: &str,
        cancel: &CancellationToken,
    ) -> Result<RoomLookup, CoreError> {
        let lookup = match target.parse::<RoomTarget>()? {
            RoomTarget::Single(room) => match self.get(room, cancel).await? {
                Some(options) => RoomLookup::Single(options),
                None => RoomLookup::NotFound,
            },
            RoomTarget::All => {
                let options: Vec<RoomOptions> =
                    try_join_all(Room::ALL.into_iter().map(|room| self.get(room, cancel)))
                        .await?
                        .into_iter()
                        .flatten()
                        .collect();

                if options.is_empty() {
                    RoomLookup::NotFound
                } else {
                    RoomLookup::Many(options)
                }
            }
        };

        Ok(lookup)
    }

    pub async fn delete_room_options(
        &self,
        target: &str,
        cancel: &CancellationToken,
    ) -> Result<(), CoreError> {
        let target: RoomTarget = target.parse()?;

        try_join_all(target.expand().into_iter().map(|room| self.delete(room, cancel))).await?;

        Ok(())
    }
}
