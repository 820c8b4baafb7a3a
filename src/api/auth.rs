//! Authentication API endpoints.

use axum::{extract::State, Json};

use super::{error, success, ApiResult};
use crate::errors::AppError;
use crate::models::{LoginRequest, SessionInfo, UpdateCredentialsRequest, User};
use crate::AppState;

/// POST /api/auth/login - Authenticate the admin credential pair.
pub async fn login(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> ApiResult<SessionInfo> {
    match state.auth.login(&request.username, &request.password).await {
        Some(session) => success(session, None),
        None => error(AppError::InvalidCredentials),
    }
}

/// GET /api/auth/session - The current session user, or null when logged out.
pub async fn get_session(State(state): State<AppState>) -> ApiResult<Option<User>> {
    success(state.auth.current_user().await, None)
}

/// POST /api/auth/logout - Destroy the current session.
pub async fn logout(State(state): State<AppState>) -> ApiResult<()> {
    state.auth.logout().await;
    success((), None)
}

/// PUT /api/auth/credentials - Replace the admin credential pair.
pub async fn update_credentials(
    State(state): State<AppState>,
    Json(request): Json<UpdateCredentialsRequest>,
) -> ApiResult<()> {
    if request.username.trim().is_empty() {
        return error(AppError::Validation("Username is required".to_string()));
    }
    if request.password.trim().is_empty() {
        return error(AppError::Validation("Password is required".to_string()));
    }
    if request.password.chars().count() < 6 {
        return error(AppError::Validation(
            "Password must be at least 6 characters long".to_string(),
        ));
    }

    state
        .auth
        .update_credentials(request.username.trim(), &request.password)
        .await?;

    success((), None)
}
