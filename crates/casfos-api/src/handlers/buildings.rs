//! Building upgrade and maintenance handlers

use axum::{
    extract::{Path, State},
    response::IntoResponse,
    Json,
};
use rust_decimal::Decimal;
use serde::Deserialize;
use uuid::Uuid;

use casfos_core::models::{
    Building, BuildingMaintenance, BuildingMaintenanceStaging, BuildingUpgrade,
    BuildingUpgradeStaging,
};

use super::assets::RejectRequest;
use crate::error::{HttpAppError, ValidatedJson};
use crate::state::EstateState;

#[derive(Debug, Deserialize, utoipa::ToSchema)]
pub struct SubmitUpgradeRequest {
    pub sub_category: String,
    pub upgrades: Vec<BuildingUpgrade>,
}

#[derive(Debug, Deserialize, utoipa::ToSchema)]
pub struct SubmitMaintenanceRequest {
    pub building_no: String,
    pub sub_category: String,
    pub year_of_maintenance: chrono::NaiveDate,
    #[schema(value_type = f64)]
    pub cost: Decimal,
    pub description: String,
    pub custody: Option<String>,
    pub agency: Option<String>,
}

#[derive(Debug, serde::Serialize, utoipa::ToSchema)]
pub struct UpgradeStagingResponse {
    pub id: Uuid,
    pub sub_category: String,
    pub upgrades: Vec<BuildingUpgrade>,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

impl From<BuildingUpgradeStaging> for UpgradeStagingResponse {
    fn from(staging: BuildingUpgradeStaging) -> Self {
        UpgradeStagingResponse {
            id: staging.id,
            sub_category: staging.sub_category,
            upgrades: staging.upgrades.0,
            created_at: staging.created_at,
        }
    }
}

#[derive(Debug, serde::Serialize, utoipa::ToSchema)]
pub struct MaintenanceStagingResponse {
    pub id: Uuid,
    pub building_no: String,
    pub sub_category: String,
    pub year_of_maintenance: chrono::NaiveDate,
    #[schema(value_type = f64)]
    pub cost: Decimal,
    pub description: String,
    pub custody: Option<String>,
    pub agency: Option<String>,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

impl From<BuildingMaintenanceStaging> for MaintenanceStagingResponse {
    fn from(staging: BuildingMaintenanceStaging) -> Self {
        MaintenanceStagingResponse {
            id: staging.id,
            building_no: staging.building_no,
            sub_category: staging.sub_category,
            year_of_maintenance: staging.year_of_maintenance,
            cost: staging.cost,
            description: staging.description,
            custody: staging.custody,
            agency: staging.agency,
            created_at: staging.created_at,
        }
    }
}

#[derive(Debug, serde::Serialize, utoipa::ToSchema)]
pub struct BuildingResponse {
    pub id: Uuid,
    pub building_no: String,
    pub sub_category: String,
    pub upgrades: Vec<BuildingUpgrade>,
    pub maintenance: Vec<BuildingMaintenance>,
}

impl From<Building> for BuildingResponse {
    fn from(building: Building) -> Self {
        BuildingResponse {
            id: building.id,
            building_no: building.building_no,
            sub_category: building.sub_category,
            upgrades: building.upgrades.0,
            maintenance: building.maintenance.0,
        }
    }
}

#[derive(Debug, serde::Serialize, utoipa::ToSchema)]
pub struct UpgradeActionResponse {
    pub success: bool,
    pub submission: UpgradeStagingResponse,
}

#[derive(Debug, serde::Serialize, utoipa::ToSchema)]
pub struct MaintenanceActionResponse {
    pub success: bool,
    pub submission: MaintenanceStagingResponse,
}

#[derive(Debug, serde::Serialize, utoipa::ToSchema)]
pub struct BuildingMergeResponse {
    pub success: bool,
    pub building: BuildingResponse,
}

#[derive(Debug, serde::Serialize, utoipa::ToSchema)]
pub struct BuildingRejectResponse {
    pub success: bool,
}

#[derive(Debug, serde::Serialize, utoipa::ToSchema)]
pub struct UpgradeListResponse {
    pub success: bool,
    pub submissions: Vec<UpgradeStagingResponse>,
}

#[derive(Debug, serde::Serialize, utoipa::ToSchema)]
pub struct MaintenanceListResponse {
    pub success: bool,
    pub submissions: Vec<MaintenanceStagingResponse>,
}

// ----- Upgrade pipeline -----

#[utoipa::path(
    post,
    path = "/api/buildings/upgrades",
    tag = "buildings",
    request_body = SubmitUpgradeRequest,
    responses(
        (status = 200, description = "Upgrade submitted for approval", body = UpgradeActionResponse),
        (status = 404, description = "No building for sub-category", body = crate::error::ErrorResponse),
    )
)]
pub async fn submit_upgrade(
    State(state): State<EstateState>,
    ValidatedJson(req): ValidatedJson<SubmitUpgradeRequest>,
) -> Result<impl IntoResponse, HttpAppError> {
    let staging = state
        .buildings
        .submit_upgrade(&req.sub_category, req.upgrades)
        .await?;
    Ok(Json(UpgradeActionResponse {
        success: true,
        submission: staging.into(),
    }))
}

#[utoipa::path(
    get,
    path = "/api/buildings/upgrades",
    tag = "buildings",
    responses((status = 200, description = "Upgrade submissions awaiting approval", body = UpgradeListResponse))
)]
pub async fn list_upgrade_staging(
    State(state): State<EstateState>,
) -> Result<impl IntoResponse, HttpAppError> {
    let submissions = state.buildings.list_upgrade_staging().await?;
    Ok(Json(UpgradeListResponse {
        success: true,
        submissions: submissions.into_iter().map(Into::into).collect(),
    }))
}

#[utoipa::path(
    post,
    path = "/api/buildings/upgrades/approve/{id}",
    tag = "buildings",
    params(("id" = Uuid, Path, description = "Upgrade submission ID")),
    responses(
        (status = 200, description = "Upgrades merged into the building record", body = BuildingMergeResponse),
        (status = 404, description = "Submission or building not found", body = crate::error::ErrorResponse),
    )
)]
pub async fn approve_upgrade(
    State(state): State<EstateState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, HttpAppError> {
    let building = state.buildings.approve_upgrade(id).await?;
    Ok(Json(BuildingMergeResponse {
        success: true,
        building: building.into(),
    }))
}

#[utoipa::path(
    post,
    path = "/api/buildings/upgrades/reject/{id}",
    tag = "buildings",
    params(("id" = Uuid, Path, description = "Upgrade submission ID")),
    request_body = RejectRequest,
    responses(
        (status = 200, description = "Upgrade rejected", body = BuildingRejectResponse),
        (status = 404, description = "Submission not found", body = crate::error::ErrorResponse),
    )
)]
pub async fn reject_upgrade(
    State(state): State<EstateState>,
    Path(id): Path<Uuid>,
    ValidatedJson(req): ValidatedJson<RejectRequest>,
) -> Result<impl IntoResponse, HttpAppError> {
    state
        .buildings
        .reject_upgrade(id, &req.rejection_remarks)
        .await?;
    Ok(Json(BuildingRejectResponse { success: true }))
}

// ----- Maintenance pipeline -----

#[utoipa::path(
    post,
    path = "/api/buildings/maintenance",
    tag = "buildings",
    request_body = SubmitMaintenanceRequest,
    responses(
        (status = 200, description = "Maintenance submitted for approval", body = MaintenanceActionResponse),
        (status = 404, description = "Building not found", body = crate::error::ErrorResponse),
    )
)]
pub async fn submit_maintenance(
    State(state): State<EstateState>,
    ValidatedJson(req): ValidatedJson<SubmitMaintenanceRequest>,
) -> Result<impl IntoResponse, HttpAppError> {
    let entry = BuildingMaintenance {
        year_of_maintenance: req.year_of_maintenance,
        cost: req.cost,
        description: req.description,
        custody: req.custody,
        agency: req.agency,
    };
    let staging = state
        .buildings
        .submit_maintenance(&req.building_no, &req.sub_category, entry)
        .await?;
    Ok(Json(MaintenanceActionResponse {
        success: true,
        submission: staging.into(),
    }))
}

#[utoipa::path(
    get,
    path = "/api/buildings/maintenance",
    tag = "buildings",
    responses((status = 200, description = "Maintenance submissions awaiting approval", body = MaintenanceListResponse))
)]
pub async fn list_maintenance_staging(
    State(state): State<EstateState>,
) -> Result<impl IntoResponse, HttpAppError> {
    let submissions = state.buildings.list_maintenance_staging().await?;
    Ok(Json(MaintenanceListResponse {
        success: true,
        submissions: submissions.into_iter().map(Into::into).collect(),
    }))
}

#[utoipa::path(
    post,
    path = "/api/buildings/maintenance/approve/{id}",
    tag = "buildings",
    params(("id" = Uuid, Path, description = "Maintenance submission ID")),
    responses(
        (status = 200, description = "Maintenance merged into the building record", body = BuildingMergeResponse),
        (status = 404, description = "Submission or building not found", body = crate::error::ErrorResponse),
    )
)]
pub async fn approve_maintenance(
    State(state): State<EstateState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, HttpAppError> {
    let building = state.buildings.approve_maintenance(id).await?;
    Ok(Json(BuildingMergeResponse {
        success: true,
        building: building.into(),
    }))
}

#[utoipa::path(
    post,
    path = "/api/buildings/maintenance/reject/{id}",
    tag = "buildings",
    params(("id" = Uuid, Path, description = "Maintenance submission ID")),
    request_body = RejectRequest,
    responses(
        (status = 200, description = "Maintenance rejected", body = BuildingRejectResponse),
        (status = 404, description = "Submission not found", body = crate::error::ErrorResponse),
    )
)]
pub async fn reject_maintenance(
    State(state): State<EstateState>,
    Path(id): Path<Uuid>,
    ValidatedJson(req): ValidatedJson<RejectRequest>,
) -> Result<impl IntoResponse, HttpAppError> {
    state
        .buildings
        .reject_maintenance(id, &req.rejection_remarks)
        .await?;
    Ok(Json(BuildingRejectResponse { success: true }))
}
