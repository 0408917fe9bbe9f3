use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use smarthome_api::models::RoomOptionsResponse;

use crate::errors::RoomError;

/// Pseudo room expanding to every concrete room.
pub const WILDCARD: &str = "all";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Room {
    Bedroom,
    LivingRoom,
}

impl Room {
    pub const ALL: [Room; 2] = [Room::Bedroom, Room::LivingRoom];

    pub fn as_str(&self) -> &'static str {
        match self {
            Room::Bedroom => "bedroom",
            Room::LivingRoom => "livingroom",
        }
    }

    /// True for the wildcard and for every concrete room name.
    pub fn is_valid_room(name: &str) -> bool {
        name == WILDCARD || name.parse::<Room>().is_ok()
    }

    pub fn expand(name: &str) -> Result<Vec<Room>, RoomError> {
        Ok(name.parse::<RoomTarget>()?.expand())
    }
}

impl FromStr for Room {
    type Err = RoomError;

    fn from_str(input: &str) -> Result<Room, Self::Err> {
        Room::ALL
            .into_iter()
            .find(|room| room.as_str() == input)
            .ok_or_else(|| RoomError::InvalidRoom(input.to_string()))
    }
}

impl fmt::Display for Room {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoomTarget {
    All,
    Single(Room),
}

impl RoomTarget {
    pub fn expand(&self) -> Vec<Room> {
        match self {
            RoomTarget::All => Room::ALL.to_vec(),
            RoomTarget::Single(room) => vec![*room],
        }
    }
}

impl FromStr for RoomTarget {
    type Err = RoomError;

    fn from_str(input: &str) -> Result<RoomTarget, Self::Err> {
        if input == WILDCARD {
            Ok(RoomTarget::All)
        } else {
            input.parse().map(RoomTarget::Single)
        }
    }
}

impl fmt::Display for RoomTarget {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            RoomTarget::All => f.write_str(WILDCARD),
            RoomTarget::Single(room) => fmt::Display::fmt(room, f),
        }
    }
}

/// Regulation options persisted for one concrete room.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RoomOptions {
    pub room: Room,
    pub enabled: bool,
    pub threshold_on: f32,
    pub threshold_off: f32,
}

impl RoomOptions {
    /// Equal thresholds are accepted; only `threshold_on > threshold_off` is rejected.
    pub fn validate(&self) -> Result<(), RoomError> {
        let finite = self.threshold_on.is_finite() && self.threshold_off.is_finite();

        if !finite || self.threshold_on > self.threshold_off {
            return Err(RoomError::InvalidThresholds {
                threshold_on: self.threshold_on,
                threshold_off: self.threshold_off,
            });
        }

        Ok(())
    }
}

impl From<RoomOptions> for RoomOptionsResponse {
    fn from(options: RoomOptions) -> Self {
        Self {
            room: options.room.to_string(),
            enabled: options.enabled,
            threshold_on: options.threshold_on,
            threshold_off: options.threshold_off,
        }
    }
}
