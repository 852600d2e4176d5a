//! Repository and service initialization

use casfos_core::Config;
use casfos_db::{
    AssetRepository, BuildingRepository, FacultyRepository, ReturnRepository, StagingRepository,
    StockRepository, UpdateRepository,
};
use casfos_services::{
    BuildingService, FacultyService, PurchaseService, ReturnService, StagingService, UpdateService,
};
use casfos_storage::Storage;
use sqlx::PgPool;
use std::sync::Arc;

use crate::state::{AppState, EstateState, FacultyState, UploadState, WorkflowState};

/// Wire repositories into workflow services and assemble the AppState.
pub fn initialize_services(
    config: &Config,
    pool: PgPool,
    storage: Arc<dyn Storage>,
) -> Arc<AppState> {
    let assets = AssetRepository::new(pool.clone());
    let updates = UpdateRepository::new(pool.clone());
    let returns = ReturnRepository::new(pool.clone());
    let staging = StagingRepository::new(pool.clone());
    let stock = StockRepository::new(pool.clone());
    let buildings = BuildingRepository::new(pool.clone());
    let faculty = FacultyRepository::new(pool.clone());

    let workflow = WorkflowState {
        purchases: PurchaseService::new(pool.clone(), assets.clone()),
        updates: UpdateService::new(pool.clone(), updates, assets),
        returns: ReturnService::new(
            pool.clone(),
            returns.clone(),
            stock.clone(),
            staging.clone(),
        ),
        staging: StagingService::new(pool.clone(), staging, stock, returns),
    };

    let estate = EstateState {
        buildings: BuildingService::new(pool.clone(), buildings),
    };

    let faculty_state = FacultyState {
        faculty: FacultyService::new(pool.clone(), faculty),
    };

    let uploads = UploadState {
        storage,
        max_file_size: config.max_upload_size_bytes,
        allowed_extensions: config.upload_allowed_extensions.clone(),
        allowed_content_types: config.upload_allowed_content_types.clone(),
    };

    Arc::new(AppState {
        pool,
        workflow,
        estate,
        faculty: faculty_state,
        uploads,
        is_production: config.is_production(),
        config: config.clone(),
    })
}
