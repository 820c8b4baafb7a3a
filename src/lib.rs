//! SAR Emergency Notification Backend
//!
//! A REST backend serving emergency zones and alerts to viewer clients, with
//! an admin session for mutations and a SQLite-backed warm-start cache. The
//! map modules compute marker geometry for clients without native map
//! rendering.

pub mod api;
pub mod auth;
pub mod config;
pub mod errors;
pub mod feed;
pub mod geo;
pub mod map;
pub mod models;
pub mod storage;
pub mod store;

use std::sync::Arc;

use axum::{
    middleware,
    routing::{delete, get, post, put},
    Router,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use auth::AuthService;
use config::Config;
use store::EmergencyStore;

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    pub auth: Arc<AuthService>,
    pub store: Arc<EmergencyStore>,
    pub config: Arc<Config>,
}

/// Create the application router with all routes.
pub fn create_router(state: AppState) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // Clone the auth service for the session layer
    let session_auth = Arc::clone(&state.auth);

    // Read-only viewer routes plus login
    let public_routes = Router::new()
        // Zones
        .route("/zones", get(api::list_zones))
        .route("/zones/{id}", get(api::get_zone))
        // Alerts
        .route("/alerts", get(api::list_alerts))
        .route("/alerts/active", get(api::list_active_alerts))
        .route("/alerts/{id}", get(api::get_alert))
        // Map
        .route("/map/scene", get(api::get_map_scene))
        // Auth
        .route("/auth/login", post(api::login))
        .route("/auth/session", get(api::get_session));

    // Admin mutations behind the session token
    let admin_routes = Router::new()
        // Auth
        .route("/auth/logout", post(api::logout))
        .route("/auth/credentials", put(api::update_credentials))
        // Zones
        .route("/zones", post(api::create_zone))
        .route("/zones/{id}", put(api::update_zone))
        .route("/zones/{id}/clear", post(api::clear_zone))
        .route("/zones/{id}", delete(api::delete_zone))
        // Alerts
        .route("/alerts", post(api::create_alert))
        .route("/alerts/{id}", put(api::update_alert))
        .route("/alerts/{id}/clear", post(api::clear_alert))
        // Refresh
        .route("/sync", post(api::sync_data))
        // Apply session auth middleware
        .layer(middleware::from_fn(move |req, next| {
            auth::session_auth_layer(Arc::clone(&session_auth), req, next)
        }));

    // Health check (no auth required)
    let health_routes = Router::new().route("/health", get(health_check));

    Router::new()
        .nest("/api", public_routes.merge(admin_routes))
        .merge(health_routes)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Health check endpoint.
async fn health_check() -> &'static str {
    "OK"
}
