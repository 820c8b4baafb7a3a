//! REST API module.
//!
//! Contains all API routes and handlers following the viewer client contract.

mod alerts;
mod auth;
mod map;
mod sync;
mod zones;

pub use alerts::*;
pub use auth::*;
pub use map::*;
pub use sync::*;
pub use zones::*;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

/// Success response envelope. `synced_at` reports data freshness where a
/// handler touches the emergency collections.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiResponse<T: Serialize> {
    pub success: bool,
    pub data: T,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub synced_at: Option<String>,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn new(data: T, synced_at: Option<String>) -> Self {
        Self {
            success: true,
            data,
            synced_at,
        }
    }
}

impl<T: Serialize> IntoResponse for ApiResponse<T> {
    fn into_response(self) -> Response {
        (StatusCode::OK, Json(self)).into_response()
    }
}

/// Response type that can be either success or error.
pub type ApiResult<T> = Result<ApiResponse<T>, crate::errors::AppError>;

/// Create a successful API response.
pub fn success<T: Serialize>(data: T, synced_at: Option<String>) -> ApiResult<T> {
    Ok(ApiResponse::new(data, synced_at))
}

/// Create an error API response.
pub fn error<T: Serialize>(err: crate::errors::AppError) -> ApiResult<T> {
    Err(err)
}
