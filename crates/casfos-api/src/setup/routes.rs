//! Route configuration and setup

use crate::api_doc::ApiDoc;
use crate::handlers;
use crate::state::AppState;
use anyhow::Result;
use axum::{
    extract::DefaultBodyLimit,
    http::{HeaderValue, Method},
    routing::{get, post},
    Json, Router,
};
use casfos_core::Config;
use std::sync::Arc;
use tower::limit::ConcurrencyLimitLayer;
use tower_http::cors::{Any, CorsLayer};
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;

/// Setup all application routes
pub fn setup_routes(config: &Config, state: Arc<AppState>) -> Result<Router<()>> {
    let cors = setup_cors(config)?;

    // Multipart uploads need headroom above the file size limit
    let body_limit = config.max_upload_size_bytes + 1024 * 1024;

    let api_routes = Router::new()
        .route("/api/health", get(handlers::health::health_check))
        // Purchase approval
        .route(
            "/api/assets",
            post(handlers::assets::submit_asset).get(handlers::assets::list_active_assets),
        )
        .route("/api/assets/pending", get(handlers::assets::list_pending_assets))
        .route("/api/assets/rejected", get(handlers::assets::list_rejected_assets))
        .route("/api/assets/approve/{id}", post(handlers::assets::approve_asset))
        .route("/api/assets/reject/{id}", post(handlers::assets::reject_asset))
        // Update-after-edit
        .route("/api/assets/updates", post(handlers::updates::propose_update))
        .route(
            "/api/assets/updates/pending",
            get(handlers::updates::list_pending_updates),
        )
        .route(
            "/api/assets/updates/approve/{id}",
            post(handlers::updates::approve_update),
        )
        .route(
            "/api/assets/updates/reject/{id}",
            post(handlers::updates::reject_update),
        )
        .route(
            "/api/assets/updates/rejected/{id}",
            get(handlers::updates::rejected_update_lookup),
        )
        .route("/api/assets/{id}", get(handlers::assets::get_asset))
        // Returns and condition changes
        .route(
            "/api/returns",
            post(handlers::returns::submit_return).get(handlers::returns::list_returns),
        )
        .route(
            "/api/returns/condition/{id}",
            post(handlers::returns::change_condition),
        )
        .route("/api/returns/approve/{id}", post(handlers::returns::approve_return))
        .route("/api/returns/reject/{id}", post(handlers::returns::reject_return))
        // Service queue
        .route("/api/staging/service", get(handlers::staging::list_service_staging))
        .route(
            "/api/staging/service/details/{id}",
            post(handlers::staging::record_service_details),
        )
        .route(
            "/api/staging/service/approve/{id}",
            post(handlers::staging::approve_service),
        )
        .route(
            "/api/staging/service/reject/{id}",
            post(handlers::staging::reject_service),
        )
        // Disposal queue
        .route("/api/staging/disposal", get(handlers::staging::list_disposal_staging))
        .route(
            "/api/staging/disposal/details/{id}",
            post(handlers::staging::record_disposal_details),
        )
        .route(
            "/api/staging/disposal/approve/{id}",
            post(handlers::staging::approve_disposal),
        )
        .route(
            "/api/staging/disposal/reject/{id}",
            post(handlers::staging::reject_disposal),
        )
        .route(
            "/api/staging/disposal/cancel/{id}",
            post(handlers::staging::cancel_disposal),
        )
        // Exchange queue
        .route("/api/staging/exchange", get(handlers::staging::list_exchange_staging))
        .route(
            "/api/staging/exchange/approve/{id}",
            post(handlers::staging::approve_exchange),
        )
        .route(
            "/api/staging/exchange/reject/{id}",
            post(handlers::staging::reject_exchange),
        )
        // Building pipelines
        .route(
            "/api/buildings/upgrades",
            post(handlers::buildings::submit_upgrade)
                .get(handlers::buildings::list_upgrade_staging),
        )
        .route(
            "/api/buildings/upgrades/approve/{id}",
            post(handlers::buildings::approve_upgrade),
        )
        .route(
            "/api/buildings/upgrades/reject/{id}",
            post(handlers::buildings::reject_upgrade),
        )
        .route(
            "/api/buildings/maintenance",
            post(handlers::buildings::submit_maintenance)
                .get(handlers::buildings::list_maintenance_staging),
        )
        .route(
            "/api/buildings/maintenance/approve/{id}",
            post(handlers::buildings::approve_maintenance),
        )
        .route(
            "/api/buildings/maintenance/reject/{id}",
            post(handlers::buildings::reject_maintenance),
        )
        // Faculty lifecycle
        .route(
            "/api/faculty",
            post(handlers::faculty::submit_faculty).get(handlers::faculty::list_active_faculty),
        )
        .route("/api/faculty/pending", get(handlers::faculty::list_pending_faculty))
        .route("/api/faculty/rejected", get(handlers::faculty::list_rejected_faculty))
        .route("/api/faculty/approve/{id}", post(handlers::faculty::approve_faculty))
        .route("/api/faculty/reject/{id}", post(handlers::faculty::reject_faculty))
        .route(
            "/api/faculty/updates",
            post(handlers::faculty::propose_faculty_update),
        )
        .route(
            "/api/faculty/updates/pending",
            get(handlers::faculty::list_pending_faculty_updates),
        )
        .route(
            "/api/faculty/updates/approve/{id}",
            post(handlers::faculty::approve_faculty_update),
        )
        .route(
            "/api/faculty/updates/reject/{id}",
            post(handlers::faculty::reject_faculty_update),
        )
        .route(
            "/api/faculty/updates/rejected/{id}",
            get(handlers::faculty::rejected_faculty_update_lookup),
        )
        // Uploads
        .route("/api/uploads", post(handlers::upload::upload_file))
        .route("/files/{*key}", get(handlers::files::serve_file))
        .route(
            "/api/openapi.json",
            get(|| async { Json(ApiDoc::openapi()) }),
        )
        .with_state(state);

    // Server-level concurrency limit to protect against resource exhaustion
    let http_concurrency_limit = std::env::var("HTTP_CONCURRENCY_LIMIT")
        .ok()
        .and_then(|s| s.parse::<usize>().ok())
        .unwrap_or(10_000)
        .max(1);

    let app = api_routes
        .merge(utoipa_rapidoc::RapiDoc::new("/api/openapi.json").path("/docs"))
        .layer(ConcurrencyLimitLayer::new(http_concurrency_limit))
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(RequestBodyLimitLayer::new(body_limit))
        .layer(cors)
        .layer(TraceLayer::new_for_http());

    Ok(app)
}

fn setup_cors(config: &Config) -> Result<CorsLayer> {
    let cors = if config.cors_origins.iter().any(|origin| origin == "*") {
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods([Method::GET, Method::POST])
            .allow_headers(Any)
    } else {
        let origins = config
            .cors_origins
            .iter()
            .map(|origin| origin.parse::<HeaderValue>())
            .collect::<Result<Vec<_>, _>>()?;
        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods([Method::GET, Method::POST])
            .allow_headers(Any)
    };
    Ok(cors)
}
