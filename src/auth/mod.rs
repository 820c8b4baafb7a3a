//! Session-based authentication service.
//!
//! Holds the admin credential pair (built-in default unless overridden) and
//! the current session. Implements constant-time comparison to mitigate
//! timing attacks.

use axum::{
    extract::Request,
    http::{header, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use subtle::ConstantTimeEq;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::errors::{AppError, ErrorResponse};
use crate::models::{AdminCredentials, SessionInfo, User, UserRole};
use crate::storage::{keys, Storage};

/// Header name for the session token.
pub const SESSION_TOKEN_HEADER: &str = "x-session-token";

#[derive(Debug, Default)]
struct AuthState {
    credentials: AdminCredentials,
    user: Option<User>,
    token: Option<String>,
}

/// Injectable authentication service. Constructed once at startup and shared
/// through the application state.
pub struct AuthService {
    storage: Storage,
    state: RwLock<AuthState>,
}

impl AuthService {
    /// Build the service, loading any persisted credential override and
    /// session before the first request is served. Storage read failures are
    /// logged and the defaults used.
    pub async fn load(storage: Storage, defaults: AdminCredentials) -> Self {
        let mut state = AuthState {
            credentials: defaults,
            user: None,
            token: None,
        };

        match storage.get(keys::ADMIN_CREDENTIALS).await {
            Ok(Some(raw)) => match serde_json::from_str(&raw) {
                Ok(creds) => state.credentials = creds,
                Err(e) => tracing::warn!("Ignoring malformed credential override: {}", e),
            },
            Ok(None) => {}
            Err(e) => tracing::error!("Error loading stored credentials: {}", e),
        }

        let stored_user = storage.get(keys::AUTH_USER).await.unwrap_or_else(|e| {
            tracing::error!("Error loading stored session user: {}", e);
            None
        });
        let stored_token = storage.get(keys::AUTH_TOKEN).await.unwrap_or_else(|e| {
            tracing::error!("Error loading stored session token: {}", e);
            None
        });

        // A session is only restored when both halves are present.
        if let (Some(raw_user), Some(token)) = (stored_user, stored_token) {
            match serde_json::from_str::<User>(&raw_user) {
                Ok(user) => {
                    state.user = Some(user);
                    state.token = Some(token);
                }
                Err(e) => tracing::warn!("Ignoring malformed stored session: {}", e),
            }
        }

        Self {
            storage,
            state: RwLock::new(state),
        }
    }

    /// Attempt a login. A credential mismatch is a normal negative result,
    /// not an error.
    pub async fn login(&self, username: &str, password: &str) -> Option<SessionInfo> {
        let mut state = self.state.write().await;

        let username_ok = constant_time_compare(username, &state.credentials.username);
        let password_ok = constant_time_compare(password, &state.credentials.password);
        if !(username_ok && password_ok) {
            return None;
        }

        let user = User {
            id: "1".to_string(),
            username: state.credentials.username.clone(),
            role: UserRole::Admin,
            name: "SAR Administrator".to_string(),
        };
        let token = format!("sar_{}", Uuid::new_v4().simple());

        // In-memory state is authoritative; a failed cache write only costs
        // session restore on the next cold start.
        match serde_json::to_string(&user) {
            Ok(user_json) => {
                if let Err(e) = self
                    .storage
                    .put_many(&[(keys::AUTH_USER, user_json), (keys::AUTH_TOKEN, token.clone())])
                    .await
                {
                    tracing::warn!("Error persisting session: {}", e);
                }
            }
            Err(e) => tracing::warn!("Error serializing session user: {}", e),
        }

        state.user = Some(user.clone());
        state.token = Some(token.clone());

        Some(SessionInfo { user, token })
    }

    /// Clear the persisted session and reset to logged out.
    pub async fn logout(&self) {
        let mut state = self.state.write().await;

        if let Err(e) = self
            .storage
            .remove_many(&[keys::AUTH_USER, keys::AUTH_TOKEN])
            .await
        {
            tracing::warn!("Error clearing persisted session: {}", e);
        }

        state.user = None;
        state.token = None;
    }

    /// Replace the admin credential pair. Renames the live session's
    /// username when logged in. Reports failure only when the storage write
    /// fails.
    pub async fn update_credentials(
        &self,
        new_username: &str,
        new_password: &str,
    ) -> Result<(), AppError> {
        let mut state = self.state.write().await;

        let credentials = AdminCredentials::new(new_username, new_password);
        state.credentials = credentials.clone();

        let renamed_user = state.user.as_ref().map(|user| User {
            username: new_username.to_string(),
            ..user.clone()
        });
        if let Some(user) = renamed_user {
            state.user = Some(user);
        }

        let mut entries = vec![(
            keys::ADMIN_CREDENTIALS,
            serde_json::to_string(&credentials).map_err(|e| AppError::Internal(e.to_string()))?,
        )];
        if let Some(user) = state.user.as_ref() {
            entries.push((
                keys::AUTH_USER,
                serde_json::to_string(user).map_err(|e| AppError::Internal(e.to_string()))?,
            ));
        }

        self.storage.put_many(&entries).await?;
        Ok(())
    }

    /// The current session user, if logged in.
    pub async fn current_user(&self) -> Option<User> {
        self.state.read().await.user.clone()
    }

    /// Whether a provided token matches the live session token.
    pub async fn verify_token(&self, provided: &str) -> bool {
        let state = self.state.read().await;
        match state.token.as_deref() {
            Some(expected) => constant_time_compare(provided, expected),
            None => false,
        }
    }
}

/// Session authentication layer for admin routes.
pub async fn session_auth_layer(
    auth: std::sync::Arc<AuthService>,
    request: Request,
    next: Next,
) -> Response {
    // Get the session token from the request header
    let provided = request
        .headers()
        .get(SESSION_TOKEN_HEADER)
        .and_then(|v| v.to_str().ok())
        .map(|s| s.to_string())
        .or_else(|| {
            // Also check Authorization header as bearer token
            request
                .headers()
                .get(header::AUTHORIZATION)
                .and_then(|v| v.to_str().ok())
                .and_then(|s| s.strip_prefix("Bearer "))
                .map(|s| s.to_string())
        });

    match provided {
        Some(token) if auth.verify_token(&token).await => next.run(request).await,
        Some(_) => unauthorized_response("Invalid session token"),
        None => unauthorized_response("Missing session token"),
    }
}

/// Perform constant-time string comparison.
fn constant_time_compare(a: &str, b: &str) -> bool {
    let a_bytes = a.as_bytes();
    let b_bytes = b.as_bytes();

    // Constant-time comparison
    a_bytes.ct_eq(b_bytes).into()
}

/// Create an unauthorized response.
fn unauthorized_response(message: &str) -> Response {
    let body = ErrorResponse::new(&AppError::Unauthorized(message.to_string()));
    (StatusCode::UNAUTHORIZED, Json(body)).into_response()
}
