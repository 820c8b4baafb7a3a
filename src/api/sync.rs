//! Data refresh API endpoint.

use axum::extract::State;

use super::{success, ApiResult};
use crate::AppState;

/// POST /api/sync - Pull a fresh snapshot from the reference feed.
///
/// Responds with whether the feed succeeded; on failure the store has
/// already fallen back to the persisted cache.
pub async fn sync_data(State(state): State<AppState>) -> ApiResult<bool> {
    let refreshed = state.store.refresh().await;
    let synced_at = state.store.last_sync().await;
    success(refreshed, synced_at)
}
