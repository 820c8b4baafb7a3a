//! Emergency zone model matching the viewer client contract.

use serde::{Deserialize, Serialize};

/// Safety status of a mapped zone.
///
/// `Clear` is a terminal display state: the record stays in the collection
/// until an administrator deletes it.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ZoneStatus {
    Active,
    Caution,
    Clear,
}

impl ZoneStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ZoneStatus::Active => "active",
            ZoneStatus::Caution => "caution",
            ZoneStatus::Clear => "clear",
        }
    }
}

/// Normalized zone position, both axes in the 0..=1 range.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct ZoneCoordinates {
    pub x: f64,
    pub y: f64,
}

impl ZoneCoordinates {
    /// Whether both axes lie within the normalized range.
    pub fn is_normalized(&self) -> bool {
        (0.0..=1.0).contains(&self.x) && (0.0..=1.0).contains(&self.y)
    }
}

/// A mapped area with a safety status shown to end users.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmergencyZone {
    pub id: String,
    pub name: String,
    pub status: ZoneStatus,
    pub coordinates: ZoneCoordinates,
    pub radius: f64,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub instructions: Option<String>,
    pub updated_at: String,
}

/// Request body for creating a new zone.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateZoneRequest {
    pub name: String,
    #[serde(default = "default_zone_status")]
    pub status: ZoneStatus,
    pub coordinates: ZoneCoordinates,
    pub radius: f64,
    pub description: String,
    #[serde(default)]
    pub instructions: Option<String>,
}

fn default_zone_status() -> ZoneStatus {
    ZoneStatus::Active
}

/// Request body for a full-record zone replace.
///
/// The identifier comes from the URL path; `updated_at` is always stamped
/// by the store.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateZoneRequest {
    pub name: String,
    pub status: ZoneStatus,
    pub coordinates: ZoneCoordinates,
    pub radius: f64,
    pub description: String,
    #[serde(default)]
    pub instructions: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_wire_names_are_lowercase() {
        assert_eq!(
            serde_json::to_string(&ZoneStatus::Caution).unwrap(),
            "\"caution\""
        );
        let parsed: ZoneStatus = serde_json::from_str("\"clear\"").unwrap();
        assert_eq!(parsed, ZoneStatus::Clear);
    }

    #[test]
    fn test_coordinates_normalized_bounds() {
        assert!(ZoneCoordinates { x: 0.0, y: 1.0 }.is_normalized());
        assert!(ZoneCoordinates { x: 0.5, y: 0.5 }.is_normalized());
        assert!(!ZoneCoordinates { x: 1.2, y: 0.5 }.is_normalized());
        assert!(!ZoneCoordinates { x: 0.5, y: -0.1 }.is_normalized());
    }

    #[test]
    fn test_zone_serializes_camel_case() {
        let zone = EmergencyZone {
            id: "1722000000000".to_string(),
            name: "North Ridge".to_string(),
            status: ZoneStatus::Active,
            coordinates: ZoneCoordinates { x: 0.3, y: 0.4 },
            radius: 50.0,
            description: "Flash flood area".to_string(),
            instructions: None,
            updated_at: "2024-07-26T12:00:00+00:00".to_string(),
        };

        let json = serde_json::to_value(&zone).unwrap();
        assert_eq!(json["updatedAt"], "2024-07-26T12:00:00+00:00");
        assert!(json.get("instructions").is_none());
    }
}
