//! Application state and sub-state extractors.
//!
//! AppState is split into domain sub-states so handlers can extract only
//! what they need via Axum's `FromRef`.

use casfos_core::Config;
use casfos_services::{
    BuildingService, FacultyService, PurchaseService, ReturnService, StagingService, UpdateService,
};
use casfos_storage::Storage;
use sqlx::PgPool;
use std::sync::Arc;

/// Asset workflow services
#[derive(Clone)]
pub struct WorkflowState {
    pub purchases: PurchaseService,
    pub updates: UpdateService,
    pub returns: ReturnService,
    pub staging: StagingService,
}

/// Building pipelines
#[derive(Clone)]
pub struct EstateState {
    pub buildings: BuildingService,
}

/// Faculty lifecycle
#[derive(Clone)]
pub struct FacultyState {
    pub faculty: FacultyService,
}

/// Upload adapter and its validation limits
#[derive(Clone)]
pub struct UploadState {
    pub storage: Arc<dyn Storage>,
    pub max_file_size: usize,
    pub allowed_extensions: Vec<String>,
    pub allowed_content_types: Vec<String>,
}

/// Main application state: aggregates sub-states for dependency injection.
#[derive(Clone)]
pub struct AppState {
    pub pool: PgPool,
    pub workflow: WorkflowState,
    pub estate: EstateState,
    pub faculty: FacultyState,
    pub uploads: UploadState,
    pub config: Config,
    pub is_production: bool,
}

// ----- FromRef for sub-state extraction -----

impl axum::extract::FromRef<Arc<AppState>> for WorkflowState {
    fn from_ref(state: &Arc<AppState>) -> Self {
        state.workflow.clone()
    }
}

impl axum::extract::FromRef<Arc<AppState>> for EstateState {
    fn from_ref(state: &Arc<AppState>) -> Self {
        state.estate.clone()
    }
}

impl axum::extract::FromRef<Arc<AppState>> for FacultyState {
    fn from_ref(state: &Arc<AppState>) -> Self {
        state.faculty.clone()
    }
}

impl axum::extract::FromRef<Arc<AppState>> for UploadState {
    fn from_ref(state: &Arc<AppState>) -> Self {
        state.uploads.clone()
    }
}

fn _assert_app_state_send_sync() {
    fn assert_send<T: Send>() {}
    fn assert_sync<T: Sync>() {}
    assert_send::<AppState>();
    assert_sync::<AppState>();
}
