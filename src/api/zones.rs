//! Zone API endpoints.

use axum::{
    extract::{Path, State},
    Json,
};

use super::{error, success, ApiResult};
use crate::errors::AppError;
use crate::models::{CreateZoneRequest, EmergencyZone, UpdateZoneRequest, ZoneCoordinates};
use crate::AppState;

/// GET /api/zones - List all zones.
pub async fn list_zones(State(state): State<AppState>) -> ApiResult<Vec<EmergencyZone>> {
    let synced_at = state.store.last_sync().await;
    success(state.store.zones().await, synced_at)
}

/// GET /api/zones/:id - Get a single zone.
pub async fn get_zone(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<EmergencyZone> {
    let synced_at = state.store.last_sync().await;

    match state.store.zone(&id).await {
        Some(zone) => success(zone, synced_at),
        None => error(AppError::NotFound(format!("Zone {} not found", id))),
    }
}

/// POST /api/zones - Create a new zone.
pub async fn create_zone(
    State(state): State<AppState>,
    Json(request): Json<CreateZoneRequest>,
) -> ApiResult<EmergencyZone> {
    validate_zone_fields(&request.name, &request.description, &request.coordinates, request.radius)?;

    let zone = state.store.add_zone(request).await;
    let synced_at = state.store.last_sync().await;
    success(zone, synced_at)
}

/// PUT /api/zones/:id - Replace a zone record.
pub async fn update_zone(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(request): Json<UpdateZoneRequest>,
) -> ApiResult<EmergencyZone> {
    validate_zone_fields(&request.name, &request.description, &request.coordinates, request.radius)?;

    match state.store.update_zone(&id, request).await {
        Some(zone) => {
            let synced_at = state.store.last_sync().await;
            success(zone, synced_at)
        }
        None => error(AppError::NotFound(format!("Zone {} not found", id))),
    }
}

/// POST /api/zones/:id/clear - Set a zone's status to clear.
///
/// Responds with whether a zone was found; an unknown id is a no-op.
pub async fn clear_zone(State(state): State<AppState>, Path(id): Path<String>) -> ApiResult<bool> {
    let cleared = state.store.clear_zone(&id).await;
    let synced_at = state.store.last_sync().await;
    success(cleared, synced_at)
}

/// DELETE /api/zones/:id - Remove a zone permanently.
///
/// Responds with whether a zone was found; an unknown id is a no-op.
pub async fn delete_zone(State(state): State<AppState>, Path(id): Path<String>) -> ApiResult<bool> {
    let deleted = state.store.delete_zone(&id).await;
    let synced_at = state.store.last_sync().await;
    success(deleted, synced_at)
}

fn validate_zone_fields(
    name: &str,
    description: &str,
    coordinates: &ZoneCoordinates,
    radius: f64,
) -> Result<(), AppError> {
    if name.trim().is_empty() {
        return Err(AppError::Validation("Name is required".to_string()));
    }
    if description.trim().is_empty() {
        return Err(AppError::Validation("Description is required".to_string()));
    }
    if !coordinates.is_normalized() {
        return Err(AppError::Validation(
            "Coordinates must be within the 0-1 range".to_string(),
        ));
    }
    if !(radius > 0.0) {
        return Err(AppError::Validation(
            "Radius must be greater than zero".to_string(),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_zone_fields() {
        let coords = ZoneCoordinates { x: 0.5, y: 0.5 };

        assert!(validate_zone_fields("Ridge", "desc", &coords, 50.0).is_ok());
        assert!(validate_zone_fields("  ", "desc", &coords, 50.0).is_err());
        assert!(validate_zone_fields("Ridge", "", &coords, 50.0).is_err());
        assert!(validate_zone_fields("Ridge", "desc", &coords, 0.0).is_err());
        assert!(validate_zone_fields(
            "Ridge",
            "desc",
            &ZoneCoordinates { x: 1.5, y: 0.5 },
            50.0
        )
        .is_err());
    }
}
