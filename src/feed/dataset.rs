//! Built-in reference dataset.
//!
//! Stands in for the real emergency data backend. Coordinates are
//! normalized screen positions; the map layer projects them into the
//! operating region.

use crate::models::{
    AlertSeverity, EmergencyAlert, EmergencyZone, ZoneCoordinates, ZoneStatus,
};

/// Reference zones for the Montana operating area.
pub fn reference_zones() -> Vec<EmergencyZone> {
    vec![
        EmergencyZone {
            id: "zone-1".to_string(),
            name: "North Ridge Trail".to_string(),
            status: ZoneStatus::Active,
            coordinates: ZoneCoordinates { x: 0.3, y: 0.25 },
            radius: 60.0,
            description: "Flash flooding reported along the creek crossing.".to_string(),
            instructions: Some(
                "Avoid the lower trail. Evacuate to the ranger station at Miller Gap.".to_string(),
            ),
            updated_at: "2024-07-26T08:15:00+00:00".to_string(),
        },
        EmergencyZone {
            id: "zone-2".to_string(),
            name: "Flathead River Crossing".to_string(),
            status: ZoneStatus::Caution,
            coordinates: ZoneCoordinates { x: 0.55, y: 0.5 },
            radius: 45.0,
            description: "High water levels after sustained rainfall.".to_string(),
            instructions: Some("Use the upstream bridge until further notice.".to_string()),
            updated_at: "2024-07-26T07:40:00+00:00".to_string(),
        },
        EmergencyZone {
            id: "zone-3".to_string(),
            name: "Granite Basin".to_string(),
            status: ZoneStatus::Caution,
            coordinates: ZoneCoordinates { x: 0.72, y: 0.3 },
            radius: 80.0,
            description: "Rockfall activity near the east face.".to_string(),
            instructions: None,
            updated_at: "2024-07-25T19:05:00+00:00".to_string(),
        },
        EmergencyZone {
            id: "zone-4".to_string(),
            name: "Basecamp Meadow".to_string(),
            status: ZoneStatus::Clear,
            coordinates: ZoneCoordinates { x: 0.45, y: 0.75 },
            radius: 50.0,
            description: "Staging area, previously closed for a wildfire spot.".to_string(),
            instructions: None,
            updated_at: "2024-07-24T16:30:00+00:00".to_string(),
        },
    ]
}

/// Reference alerts paired with the zones above.
pub fn reference_alerts() -> Vec<EmergencyAlert> {
    vec![
        EmergencyAlert {
            id: "alert-1".to_string(),
            title: "Flash Flood Warning".to_string(),
            message: "Heavy rainfall upstream of North Ridge Trail. Water levels rising quickly."
                .to_string(),
            severity: AlertSeverity::Critical,
            timestamp: "2024-07-26T08:10:00+00:00".to_string(),
            is_active: true,
            location: Some("North Ridge Trail".to_string()),
            affected_areas: Some(vec![
                "North Ridge Trail".to_string(),
                "Flathead River Crossing".to_string(),
            ]),
            instructions: Some("Move to higher ground immediately.".to_string()),
        },
        EmergencyAlert {
            id: "alert-2".to_string(),
            title: "Rockfall Advisory".to_string(),
            message: "Intermittent rockfall observed in Granite Basin east face.".to_string(),
            severity: AlertSeverity::High,
            timestamp: "2024-07-25T19:00:00+00:00".to_string(),
            is_active: true,
            location: Some("Granite Basin".to_string()),
            affected_areas: Some(vec!["Granite Basin".to_string()]),
            instructions: Some("Helmets required. Keep clear of the talus slope.".to_string()),
        },
        EmergencyAlert {
            id: "alert-3".to_string(),
            title: "Wildfire Spot Contained".to_string(),
            message: "The spot fire near Basecamp Meadow has been fully contained.".to_string(),
            severity: AlertSeverity::Low,
            timestamp: "2024-07-24T16:25:00+00:00".to_string(),
            is_active: false,
            location: Some("Basecamp Meadow".to_string()),
            affected_areas: None,
            instructions: None,
        },
    ]
}
