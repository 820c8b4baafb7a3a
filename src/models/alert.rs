//! Emergency alert model matching the viewer client contract.

use serde::{Deserialize, Serialize};

/// Severity classification for an alert.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord)]
#[serde(rename_all = "lowercase")]
pub enum AlertSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl AlertSeverity {
    pub fn as_str(&self) -> &'static str {
        match self {
            AlertSeverity::Low => "low",
            AlertSeverity::Medium => "medium",
            AlertSeverity::High => "high",
            AlertSeverity::Critical => "critical",
        }
    }
}

/// A time-stamped notification describing an emergency condition.
///
/// Clearing an alert flips `is_active` to false; no exposed operation
/// reactivates it.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmergencyAlert {
    pub id: String,
    pub title: String,
    pub message: String,
    pub severity: AlertSeverity,
    pub timestamp: String,
    pub is_active: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub affected_areas: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub instructions: Option<String>,
}

/// Request body for creating a new alert.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateAlertRequest {
    pub title: String,
    pub message: String,
    pub severity: AlertSeverity,
    #[serde(default = "default_is_active")]
    pub is_active: bool,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub affected_areas: Option<Vec<String>>,
    #[serde(default)]
    pub instructions: Option<String>,
}

fn default_is_active() -> bool {
    true
}

/// Request body for a full-record alert replace.
///
/// The identifier comes from the URL path; the creation timestamp of the
/// existing record is preserved.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateAlertRequest {
    pub title: String,
    pub message: String,
    pub severity: AlertSeverity,
    pub is_active: bool,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub affected_areas: Option<Vec<String>>,
    #[serde(default)]
    pub instructions: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_severity_ordering() {
        assert!(AlertSeverity::Critical > AlertSeverity::High);
        assert!(AlertSeverity::Medium > AlertSeverity::Low);
    }

    #[test]
    fn test_alert_round_trips_camel_case() {
        let json = serde_json::json!({
            "id": "1722000000001",
            "title": "Flash Flood Warning",
            "message": "Heavy rainfall upstream",
            "severity": "critical",
            "timestamp": "2024-07-26T12:00:00+00:00",
            "isActive": true,
            "affectedAreas": ["North Ridge", "River Crossing"]
        });

        let alert: EmergencyAlert = serde_json::from_value(json).unwrap();
        assert_eq!(alert.severity, AlertSeverity::Critical);
        assert!(alert.is_active);
        assert_eq!(alert.affected_areas.as_ref().unwrap().len(), 2);
        assert!(alert.location.is_none());
    }
}
