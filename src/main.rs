//! Server entry point: load config, build the services, serve the router.

use std::sync::Arc;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use sar_backend::auth::AuthService;
use sar_backend::config::Config;
use sar_backend::feed::StaticFeed;
use sar_backend::storage::{self, Storage};
use sar_backend::store::EmergencyStore;
use sar_backend::{create_router, AppState};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load configuration
    let config = Config::from_env();

    // Initialize logging
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_level));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting SAR Emergency Notification Backend");
    tracing::info!("Cache path: {:?}", config.db_path);
    tracing::info!("Bind address: {}", config.bind_addr);

    // Initialize the key-value cache
    let pool = storage::init_storage(&config.db_path).await?;
    let storage = Storage::new(pool);

    // Build the services; the auth service restores any persisted session
    // and credential override before the first request
    let auth =
        Arc::new(AuthService::load(storage.clone(), config.default_credentials.clone()).await);

    let feed = Arc::new(StaticFeed::new(config.feed_delay));
    let store = Arc::new(EmergencyStore::new(storage, feed));

    // Serve cached collections immediately; the initial refresh replaces
    // them once the feed delay elapses
    store.load_cache().await;
    let initial = Arc::clone(&store);
    tokio::spawn(async move {
        initial.refresh().await;
        tracing::info!("Initial data refresh complete");
    });

    // Create application state
    let state = AppState {
        auth,
        store,
        config: Arc::new(config.clone()),
    };

    // Build router
    let app = create_router(state);

    // Start server
    let listener = tokio::net::TcpListener::bind(&config.bind_addr).await?;
    tracing::info!("Server listening on {}", config.bind_addr);

    axum::serve(listener, app).await?;

    Ok(())
}
