//! Application setup and initialization
//!
//! Initialization logic extracted from main.rs: telemetry, database,
//! storage, services, and routes.

pub mod database;
pub mod routes;
pub mod server;
pub mod services;
pub mod storage;
pub mod telemetry;

use crate::state::AppState;
use anyhow::Result;
use casfos_core::Config;
use std::sync::Arc;

/// Initialize the entire application
pub async fn initialize_app(config: Config) -> Result<(Arc<AppState>, axum::Router)> {
    telemetry::init_telemetry();

    tracing::info!("Configuration loaded");

    // Setup database
    let pool = database::setup_database(&config).await?;

    // Setup upload storage
    let storage = storage::setup_storage(&config).await?;

    // Initialize repositories and workflow services
    let state = services::initialize_services(&config, pool, storage);

    // Setup routes
    let router = routes::setup_routes(&config, state.clone())?;

    Ok((state, router))
}
