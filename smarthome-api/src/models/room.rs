use serde::{Deserialize, Serialize};

/// Regulation options submitted for a room or for the whole home
#[cfg_attr(feature = "docs", derive(utoipa::ToSchema))]
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RoomOptionsRequest {
    /// Whether automatic regulation is active
    pub enabled: bool,
    /// Temperature at or below which regulation switches on (Celsius)
    pub threshold_on: f32,
    /// Temperature at or above which regulation switches off (Celsius)
    pub threshold_off: f32,
}

#[cfg_attr(feature = "docs", derive(utoipa::ToSchema))]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoomOptionsResponse {
    /// Concrete room name
    pub room: String,
    pub enabled: bool,
    pub threshold_on: f32,
    pub threshold_off: f32,
}

/// Result of a read: one room, or every configured room for the wildcard
#[cfg_attr(feature = "docs", derive(utoipa::ToSchema))]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RoomOptionsLookup {
    Single(RoomOptionsResponse),
    Many(Vec<RoomOptionsResponse>),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_serializes_without_tag() {
        let single = RoomOptionsLookup::Single(RoomOptionsResponse {
            room: "bedroom".to_string(),
            enabled: true,
            threshold_on: 19.3,
            threshold_off: 19.5,
        });
        let many = RoomOptionsLookup::Many(vec![]);

        let single = serde_json::to_value(&single).unwrap();
        let many = serde_json::to_value(&many).unwrap();

        assert_eq!(single["room"], "bedroom");
        assert_eq!(single["enabled"], true);
        assert!(many.is_array());
    }
}
