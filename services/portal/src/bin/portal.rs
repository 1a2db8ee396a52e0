//! services/portal/src/bin/portal.rs

use clap::Parser;
use portal_lib::{
    adapters::JsonFileDataset,
    config::{CliOverrides, Config},
    error::ApiError,
    web::{build_router, AppState},
};
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), ApiError> {
    // --- 1. Load Configuration & Set Up Logging ---
    let config = Config::from_env()?.with_overrides(CliOverrides::parse());
    let config = Arc::new(config);
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(config.log_level.to_string()))
        .with(tracing_subscriber::fmt::layer())
        .init();
    info!("Configuration loaded. Starting mock portal...");

    if !config.static_root.is_dir() {
        return Err(ApiError::MissingStatic(config.static_root.clone()));
    }

    // --- 2. Load the Dataset ---
    let dataset = Arc::new(JsonFileDataset::new(config.data_path.clone()));
    info!("Loading dataset from {}", dataset.path().display());
    let app_state = Arc::new(AppState::load(config.clone(), dataset).await?);
    info!(
        "Loaded {} day(s)",
        app_state.store.list_by_day().await.len()
    );

    // --- 3. Create the Web Router ---
    let app = build_router(app_state);

    // --- 4. Start the Server ---
    info!("Starting server on {}", config.bind_address);
    info!(
        "Portal available at http://{}/student/Units.aspx",
        config.bind_address
    );
    let listener = tokio::net::TcpListener::bind(&config.bind_address).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
