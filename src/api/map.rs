//! Map scene API endpoint.
//!
//! Serves precomputed marker geometry so clients without native map
//! rendering can draw the schematic fallback directly.

use axum::extract::{Query, State};
use serde::{Deserialize, Serialize};

use super::{error, success, ApiResult};
use crate::errors::AppError;
use crate::map::{MapScene, RenderedZone, RendererKind, Viewport};
use crate::AppState;

/// Query parameters for the scene endpoint.
#[derive(Debug, Deserialize)]
pub struct SceneQuery {
    pub renderer: Option<String>,
    pub width: Option<f64>,
    pub height: Option<f64>,
    pub selected: Option<String>,
}

/// Rendered scene payload.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SceneResponse {
    pub renderer: &'static str,
    pub zones: Vec<RenderedZone>,
}

/// GET /api/map/scene - Render the current zones with the requested renderer.
pub async fn get_map_scene(
    State(state): State<AppState>,
    Query(query): Query<SceneQuery>,
) -> ApiResult<SceneResponse> {
    let kind = match query.renderer.as_deref() {
        None => RendererKind::Geographic,
        Some(name) => match RendererKind::from_str(name) {
            Some(kind) => kind,
            None => {
                return error(AppError::BadRequest(format!(
                    "Unknown renderer: {}",
                    name
                )))
            }
        },
    };

    let viewport = Viewport {
        width: query.width.unwrap_or(1.0),
        height: query.height.unwrap_or(1.0),
    };
    if !(viewport.width > 0.0) || !(viewport.height > 0.0) {
        return error(AppError::BadRequest(
            "Viewport dimensions must be positive".to_string(),
        ));
    }

    let mut scene = MapScene::new();
    if let Some(id) = query.selected.as_deref() {
        scene.select(id);
    }

    let zones = state.store.zones().await;
    let rendered = kind.build().render(&zones, &viewport, scene.selected());

    let synced_at = state.store.last_sync().await;
    success(
        SceneResponse {
            renderer: kind.as_str(),
            zones: rendered,
        },
        synced_at,
    )
}
