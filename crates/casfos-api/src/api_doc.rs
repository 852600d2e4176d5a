//! OpenAPI documentation

use utoipa::OpenApi;

use crate::error;
use crate::handlers;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "CASFOS Asset Workflow API",
        version = "0.1.0",
        description = "Approval workflows for assets, returns, staging queues, buildings, and faculty"
    ),
    paths(
        handlers::health::health_check,
        handlers::assets::submit_asset,
        handlers::assets::approve_asset,
        handlers::assets::reject_asset,
        handlers::assets::list_pending_assets,
        handlers::assets::list_rejected_assets,
        handlers::assets::list_active_assets,
        handlers::assets::get_asset,
        handlers::updates::propose_update,
        handlers::updates::approve_update,
        handlers::updates::reject_update,
        handlers::updates::list_pending_updates,
        handlers::updates::rejected_update_lookup,
        handlers::returns::submit_return,
        handlers::returns::change_condition,
        handlers::returns::approve_return,
        handlers::returns::reject_return,
        handlers::returns::list_returns,
        handlers::staging::list_service_staging,
        handlers::staging::record_service_details,
        handlers::staging::approve_service,
        handlers::staging::reject_service,
        handlers::staging::list_disposal_staging,
        handlers::staging::record_disposal_details,
        handlers::staging::approve_disposal,
        handlers::staging::reject_disposal,
        handlers::staging::cancel_disposal,
        handlers::staging::list_exchange_staging,
        handlers::staging::approve_exchange,
        handlers::staging::reject_exchange,
        handlers::buildings::submit_upgrade,
        handlers::buildings::list_upgrade_staging,
        handlers::buildings::approve_upgrade,
        handlers::buildings::reject_upgrade,
        handlers::buildings::submit_maintenance,
        handlers::buildings::list_maintenance_staging,
        handlers::buildings::approve_maintenance,
        handlers::buildings::reject_maintenance,
        handlers::faculty::submit_faculty,
        handlers::faculty::approve_faculty,
        handlers::faculty::reject_faculty,
        handlers::faculty::list_pending_faculty,
        handlers::faculty::list_rejected_faculty,
        handlers::faculty::list_active_faculty,
        handlers::faculty::propose_faculty_update,
        handlers::faculty::approve_faculty_update,
        handlers::faculty::reject_faculty_update,
        handlers::faculty::list_pending_faculty_updates,
        handlers::faculty::rejected_faculty_update_lookup,
        handlers::upload::upload_file,
        handlers::files::serve_file,
    ),
    components(schemas(
        error::ErrorResponse,
        handlers::assets::RejectRequest,
        handlers::assets::AssetResponse,
        handlers::assets::RejectedAssetResponse,
        handlers::assets::AssetActionResponse,
        handlers::assets::AssetListResponse,
        handlers::assets::RejectedAssetListResponse,
        handlers::updates::ProposeUpdateRequest,
        handlers::updates::UpdateResponse,
        handlers::updates::UpdateActionResponse,
        handlers::updates::UpdateApprovalResponse,
        handlers::updates::UpdateListResponse,
        handlers::updates::RejectedLookupResponse,
        handlers::returns::SubmitReturnRequest,
        handlers::returns::ConditionChangeRequest,
        handlers::returns::ReturnedAssetResponse,
        handlers::returns::ReturnActionResponse,
        handlers::returns::ReturnListResponse,
        handlers::returns::ReturnApprovalResponse,
        handlers::staging::ServiceDetailsRequest,
        handlers::staging::DisposalDetailsRequest,
        handlers::staging::ServiceStagingResponse,
        handlers::staging::DisposalStagingResponse,
        handlers::staging::ExchangeStagingResponse,
        handlers::staging::StagingActionResponse,
        handlers::staging::StagingRevertResponse,
        handlers::staging::ServiceListResponse,
        handlers::staging::DisposalListResponse,
        handlers::staging::ExchangeListResponse,
        handlers::staging::ServiceDetailsResponse,
        handlers::staging::DisposalDetailsResponse,
        handlers::buildings::SubmitUpgradeRequest,
        handlers::buildings::SubmitMaintenanceRequest,
        handlers::buildings::UpgradeStagingResponse,
        handlers::buildings::MaintenanceStagingResponse,
        handlers::buildings::BuildingResponse,
        handlers::buildings::UpgradeActionResponse,
        handlers::buildings::MaintenanceActionResponse,
        handlers::buildings::BuildingMergeResponse,
        handlers::buildings::BuildingRejectResponse,
        handlers::buildings::UpgradeListResponse,
        handlers::buildings::MaintenanceListResponse,
        handlers::faculty::ProposeFacultyUpdateRequest,
        handlers::faculty::FacultyResponse,
        handlers::faculty::RejectedFacultyResponse,
        handlers::faculty::FacultyUpdateResponse,
        handlers::faculty::FacultyActionResponse,
        handlers::faculty::FacultyListResponse,
        handlers::faculty::RejectedFacultyListResponse,
        handlers::faculty::FacultyUpdateActionResponse,
        handlers::faculty::FacultyUpdateApprovalResponse,
        handlers::faculty::FacultyUpdateListResponse,
        handlers::faculty::FacultyRejectedLookupResponse,
        handlers::upload::UploadResponse,
        handlers::health::HealthResponse,
    ))
)]
pub struct ApiDoc;
