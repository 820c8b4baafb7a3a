//! Alert API endpoints.

use axum::{
    extract::{Path, State},
    Json,
};

use super::{error, success, ApiResult};
use crate::errors::AppError;
use crate::models::{CreateAlertRequest, EmergencyAlert, UpdateAlertRequest};
use crate::AppState;

/// GET /api/alerts - List all alerts, cleared ones included.
pub async fn list_alerts(State(state): State<AppState>) -> ApiResult<Vec<EmergencyAlert>> {
    let synced_at = state.store.last_sync().await;
    success(state.store.alerts().await, synced_at)
}

/// GET /api/alerts/active - List alerts not yet cleared.
pub async fn list_active_alerts(State(state): State<AppState>) -> ApiResult<Vec<EmergencyAlert>> {
    let synced_at = state.store.last_sync().await;
    success(state.store.active_alerts().await, synced_at)
}

/// GET /api/alerts/:id - Get a single alert.
pub async fn get_alert(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<EmergencyAlert> {
    let synced_at = state.store.last_sync().await;

    match state.store.alert(&id).await {
        Some(alert) => success(alert, synced_at),
        None => error(AppError::NotFound(format!("Alert {} not found", id))),
    }
}

/// POST /api/alerts - Create a new alert.
pub async fn create_alert(
    State(state): State<AppState>,
    Json(request): Json<CreateAlertRequest>,
) -> ApiResult<EmergencyAlert> {
    validate_alert_fields(&request.title, &request.message)?;

    let alert = state.store.add_alert(request).await;
    let synced_at = state.store.last_sync().await;
    success(alert, synced_at)
}

/// PUT /api/alerts/:id - Replace an alert record.
pub async fn update_alert(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(request): Json<UpdateAlertRequest>,
) -> ApiResult<EmergencyAlert> {
    validate_alert_fields(&request.title, &request.message)?;

    match state.store.update_alert(&id, request).await {
        Some(alert) => {
            let synced_at = state.store.last_sync().await;
            success(alert, synced_at)
        }
        None => error(AppError::NotFound(format!("Alert {} not found", id))),
    }
}

/// POST /api/alerts/:id/clear - Deactivate an alert.
///
/// Responds with whether an alert was found; an unknown id is a no-op and
/// clearing twice is harmless.
pub async fn clear_alert(State(state): State<AppState>, Path(id): Path<String>) -> ApiResult<bool> {
    let cleared = state.store.clear_alert(&id).await;
    let synced_at = state.store.last_sync().await;
    success(cleared, synced_at)
}

fn validate_alert_fields(title: &str, message: &str) -> Result<(), AppError> {
    if title.trim().is_empty() {
        return Err(AppError::Validation("Title is required".to_string()));
    }
    if message.trim().is_empty() {
        return Err(AppError::Validation("Message is required".to_string()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_alert_fields() {
        assert!(validate_alert_fields("Flood", "Rising water").is_ok());
        assert!(validate_alert_fields("", "Rising water").is_err());
        assert!(validate_alert_fields("Flood", "   ").is_err());
    }
}
