//! Terminal-action handlers for the service, disposal, and exchange queues

use axum::{
    extract::{Path, State},
    response::IntoResponse,
    Json,
};
use rust_decimal::Decimal;
use serde::Deserialize;
use uuid::Uuid;

use casfos_core::models::{
    AssetCategory, AssetType, DisposalStaging, ExchangeStaging, ServiceStaging,
};

use super::assets::RejectRequest;
use super::returns::ReturnedAssetResponse;
use crate::error::{HttpAppError, ValidatedJson};
use crate::state::WorkflowState;

#[derive(Debug, Deserialize, utoipa::ToSchema)]
pub struct ServiceDetailsRequest {
    pub service_no: String,
    pub service_date: chrono::NaiveDate,
    #[schema(value_type = f64)]
    pub service_amount: Decimal,
}

#[derive(Debug, Deserialize, utoipa::ToSchema)]
pub struct DisposalDetailsRequest {
    #[schema(value_type = Option<f64>)]
    pub purchase_value: Option<Decimal>,
    #[schema(value_type = Option<f64>)]
    pub book_value: Option<Decimal>,
    pub inspection_date: Option<chrono::NaiveDate>,
    pub condemnation_date: Option<chrono::NaiveDate>,
    #[schema(value_type = Option<f64>)]
    pub disposal_value: Option<Decimal>,
}

#[derive(Debug, serde::Serialize, utoipa::ToSchema)]
pub struct ServiceStagingResponse {
    pub id: Uuid,
    pub asset_id: Uuid,
    pub asset_type: AssetType,
    pub asset_category: AssetCategory,
    pub item_name: String,
    pub location: String,
    pub item_ids: Option<Vec<String>>,
    pub service_no: Option<String>,
    pub service_date: Option<chrono::NaiveDate>,
    #[schema(value_type = Option<f64>)]
    pub service_amount: Option<Decimal>,
    pub remark: Option<String>,
}

impl From<ServiceStaging> for ServiceStagingResponse {
    fn from(staging: ServiceStaging) -> Self {
        ServiceStagingResponse {
            id: staging.id,
            asset_id: staging.asset_id,
            asset_type: staging.asset_type,
            asset_category: staging.asset_category,
            item_name: staging.item_name,
            location: staging.location,
            item_ids: staging.item_ids,
            service_no: staging.service_no,
            service_date: staging.service_date,
            service_amount: staging.service_amount,
            remark: staging.remark,
        }
    }
}

#[derive(Debug, serde::Serialize, utoipa::ToSchema)]
pub struct DisposalStagingResponse {
    pub id: Uuid,
    pub asset_id: Uuid,
    pub asset_type: AssetType,
    pub asset_category: AssetCategory,
    pub item_name: String,
    pub location: String,
    pub item_ids: Option<Vec<String>>,
    pub quantity: Option<i32>,
    #[schema(value_type = Option<f64>)]
    pub purchase_value: Option<Decimal>,
    #[schema(value_type = Option<f64>)]
    pub book_value: Option<Decimal>,
    pub inspection_date: Option<chrono::NaiveDate>,
    pub condemnation_date: Option<chrono::NaiveDate>,
    #[schema(value_type = Option<f64>)]
    pub disposal_value: Option<Decimal>,
    pub remark: Option<String>,
}

impl From<DisposalStaging> for DisposalStagingResponse {
    fn from(staging: DisposalStaging) -> Self {
        DisposalStagingResponse {
            id: staging.id,
            asset_id: staging.asset_id,
            asset_type: staging.asset_type,
            asset_category: staging.asset_category,
            item_name: staging.item_name,
            location: staging.location,
            item_ids: staging.item_ids,
            quantity: staging.quantity,
            purchase_value: staging.purchase_value,
            book_value: staging.book_value,
            inspection_date: staging.inspection_date,
            condemnation_date: staging.condemnation_date,
            disposal_value: staging.disposal_value,
            remark: staging.remark,
        }
    }
}

#[derive(Debug, serde::Serialize, utoipa::ToSchema)]
pub struct ExchangeStagingResponse {
    pub id: Uuid,
    pub asset_id: Uuid,
    pub asset_category: AssetCategory,
    pub item_name: String,
    pub location: String,
    pub exchange_quantity: i32,
    pub remark: Option<String>,
}

impl From<ExchangeStaging> for ExchangeStagingResponse {
    fn from(staging: ExchangeStaging) -> Self {
        ExchangeStagingResponse {
            id: staging.id,
            asset_id: staging.asset_id,
            asset_category: staging.asset_category,
            item_name: staging.item_name,
            location: staging.location,
            exchange_quantity: staging.exchange_quantity,
            remark: staging.remark,
        }
    }
}

#[derive(Debug, serde::Serialize, utoipa::ToSchema)]
pub struct StagingActionResponse {
    pub success: bool,
    /// Where the entry ended up: "history" | "returns" | "disposal" | "stock"
    pub resolved_to: String,
}

#[derive(Debug, serde::Serialize, utoipa::ToSchema)]
pub struct ServiceListResponse {
    pub success: bool,
    pub entries: Vec<ServiceStagingResponse>,
}

#[derive(Debug, serde::Serialize, utoipa::ToSchema)]
pub struct DisposalListResponse {
    pub success: bool,
    pub entries: Vec<DisposalStagingResponse>,
}

#[derive(Debug, serde::Serialize, utoipa::ToSchema)]
pub struct ExchangeListResponse {
    pub success: bool,
    pub entries: Vec<ExchangeStagingResponse>,
}

#[derive(Debug, serde::Serialize, utoipa::ToSchema)]
pub struct ServiceDetailsResponse {
    pub success: bool,
    pub entry: ServiceStagingResponse,
}

#[derive(Debug, serde::Serialize, utoipa::ToSchema)]
pub struct DisposalDetailsResponse {
    pub success: bool,
    pub entry: DisposalStagingResponse,
}

#[derive(Debug, serde::Serialize, utoipa::ToSchema)]
pub struct StagingRevertResponse {
    pub success: bool,
    pub returned: ReturnedAssetResponse,
}

// ----- Service queue -----

#[utoipa::path(
    get,
    path = "/api/staging/service",
    tag = "staging",
    responses((status = 200, description = "Service queue", body = ServiceListResponse))
)]
pub async fn list_service_staging(
    State(state): State<WorkflowState>,
) -> Result<impl IntoResponse, HttpAppError> {
    let entries = state.staging.list_service().await?;
    Ok(Json(ServiceListResponse {
        success: true,
        entries: entries.into_iter().map(Into::into).collect(),
    }))
}

#[utoipa::path(
    post,
    path = "/api/staging/service/details/{id}",
    tag = "staging",
    params(("id" = Uuid, Path, description = "Service staging ID")),
    request_body = ServiceDetailsRequest,
    responses(
        (status = 200, description = "Service details recorded", body = ServiceDetailsResponse),
        (status = 404, description = "Entry not found", body = crate::error::ErrorResponse),
    )
)]
pub async fn record_service_details(
    State(state): State<WorkflowState>,
    Path(id): Path<Uuid>,
    ValidatedJson(req): ValidatedJson<ServiceDetailsRequest>,
) -> Result<impl IntoResponse, HttpAppError> {
    let entry = state
        .staging
        .record_service_details(id, &req.service_no, req.service_date, req.service_amount)
        .await?;
    Ok(Json(ServiceDetailsResponse {
        success: true,
        entry: entry.into(),
    }))
}

#[utoipa::path(
    post,
    path = "/api/staging/service/approve/{id}",
    tag = "staging",
    params(("id" = Uuid, Path, description = "Service staging ID")),
    responses(
        (status = 200, description = "Service finalized into history", body = StagingActionResponse),
        (status = 400, description = "Service details missing", body = crate::error::ErrorResponse),
        (status = 404, description = "Entry not found", body = crate::error::ErrorResponse),
    )
)]
pub async fn approve_service(
    State(state): State<WorkflowState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, HttpAppError> {
    state.staging.approve_service(id).await?;
    Ok(Json(StagingActionResponse {
        success: true,
        resolved_to: "history".to_string(),
    }))
}

#[utoipa::path(
    post,
    path = "/api/staging/service/reject/{id}",
    tag = "staging",
    params(("id" = Uuid, Path, description = "Service staging ID")),
    request_body = RejectRequest,
    responses(
        (status = 200, description = "Service rejected, unit back in returns", body = StagingRevertResponse),
        (status = 404, description = "Entry not found", body = crate::error::ErrorResponse),
    )
)]
pub async fn reject_service(
    State(state): State<WorkflowState>,
    Path(id): Path<Uuid>,
    ValidatedJson(req): ValidatedJson<RejectRequest>,
) -> Result<impl IntoResponse, HttpAppError> {
    let returned = state.staging.reject_service(id, &req.rejection_remarks).await?;
    Ok(Json(StagingRevertResponse {
        success: true,
        returned: returned.into(),
    }))
}

// ----- Disposal queue -----

#[utoipa::path(
    get,
    path = "/api/staging/disposal",
    tag = "staging",
    responses((status = 200, description = "Disposal queue", body = DisposalListResponse))
)]
pub async fn list_disposal_staging(
    State(state): State<WorkflowState>,
) -> Result<impl IntoResponse, HttpAppError> {
    let entries = state.staging.list_disposal().await?;
    Ok(Json(DisposalListResponse {
        success: true,
        entries: entries.into_iter().map(Into::into).collect(),
    }))
}

#[utoipa::path(
    post,
    path = "/api/staging/disposal/details/{id}",
    tag = "staging",
    params(("id" = Uuid, Path, description = "Disposal staging ID")),
    request_body = DisposalDetailsRequest,
    responses(
        (status = 200, description = "Disposal details recorded", body = DisposalDetailsResponse),
        (status = 404, description = "Entry not found", body = crate::error::ErrorResponse),
    )
)]
pub async fn record_disposal_details(
    State(state): State<WorkflowState>,
    Path(id): Path<Uuid>,
    ValidatedJson(req): ValidatedJson<DisposalDetailsRequest>,
) -> Result<impl IntoResponse, HttpAppError> {
    let entry = state
        .staging
        .record_disposal_details(
            id,
            req.purchase_value,
            req.book_value,
            req.inspection_date,
            req.condemnation_date,
            req.disposal_value,
        )
        .await?;
    Ok(Json(DisposalDetailsResponse {
        success: true,
        entry: entry.into(),
    }))
}

#[utoipa::path(
    post,
    path = "/api/staging/disposal/approve/{id}",
    tag = "staging",
    params(("id" = Uuid, Path, description = "Disposal staging ID")),
    responses(
        (status = 200, description = "Disposal finalized into history", body = StagingActionResponse),
        (status = 404, description = "Entry not found", body = crate::error::ErrorResponse),
    )
)]
pub async fn approve_disposal(
    State(state): State<WorkflowState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, HttpAppError> {
    state.staging.approve_disposal(id).await?;
    Ok(Json(StagingActionResponse {
        success: true,
        resolved_to: "history".to_string(),
    }))
}

#[utoipa::path(
    post,
    path = "/api/staging/disposal/reject/{id}",
    tag = "staging",
    params(("id" = Uuid, Path, description = "Disposal staging ID")),
    request_body = RejectRequest,
    responses(
        (status = 200, description = "Disposal rejected, unit back in returns", body = StagingRevertResponse),
        (status = 404, description = "Entry not found", body = crate::error::ErrorResponse),
    )
)]
pub async fn reject_disposal(
    State(state): State<WorkflowState>,
    Path(id): Path<Uuid>,
    ValidatedJson(req): ValidatedJson<RejectRequest>,
) -> Result<impl IntoResponse, HttpAppError> {
    let returned = state
        .staging
        .reject_disposal(id, &req.rejection_remarks)
        .await?;
    Ok(Json(StagingRevertResponse {
        success: true,
        returned: returned.into(),
    }))
}

#[utoipa::path(
    post,
    path = "/api/staging/disposal/cancel/{id}",
    tag = "staging",
    params(("id" = Uuid, Path, description = "Disposal staging ID")),
    responses(
        (status = 200, description = "Disposal cancelled pre-approval", body = StagingRevertResponse),
        (status = 404, description = "Entry not found", body = crate::error::ErrorResponse),
    )
)]
pub async fn cancel_disposal(
    State(state): State<WorkflowState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, HttpAppError> {
    let returned = state.staging.cancel_disposal(id).await?;
    Ok(Json(StagingRevertResponse {
        success: true,
        returned: returned.into(),
    }))
}

// ----- Exchange queue -----

#[utoipa::path(
    get,
    path = "/api/staging/exchange",
    tag = "staging",
    responses((status = 200, description = "Exchange queue", body = ExchangeListResponse))
)]
pub async fn list_exchange_staging(
    State(state): State<WorkflowState>,
) -> Result<impl IntoResponse, HttpAppError> {
    let entries = state.staging.list_exchange().await?;
    Ok(Json(ExchangeListResponse {
        success: true,
        entries: entries.into_iter().map(Into::into).collect(),
    }))
}

#[utoipa::path(
    post,
    path = "/api/staging/exchange/approve/{id}",
    tag = "staging",
    params(("id" = Uuid, Path, description = "Exchange staging ID")),
    responses(
        (status = 200, description = "Exchange approved, quantity back in stock", body = StagingActionResponse),
        (status = 404, description = "Entry not found", body = crate::error::ErrorResponse),
    )
)]
pub async fn approve_exchange(
    State(state): State<WorkflowState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, HttpAppError> {
    state.staging.approve_exchange(id).await?;
    Ok(Json(StagingActionResponse {
        success: true,
        resolved_to: "stock".to_string(),
    }))
}

#[utoipa::path(
    post,
    path = "/api/staging/exchange/reject/{id}",
    tag = "staging",
    params(("id" = Uuid, Path, description = "Exchange staging ID")),
    request_body = RejectRequest,
    responses(
        (status = 200, description = "Exchange rejected, moved to disposal queue", body = StagingActionResponse),
        (status = 404, description = "Entry not found", body = crate::error::ErrorResponse),
    )
)]
pub async fn reject_exchange(
    State(state): State<WorkflowState>,
    Path(id): Path<Uuid>,
    ValidatedJson(req): ValidatedJson<RejectRequest>,
) -> Result<impl IntoResponse, HttpAppError> {
    state
        .staging
        .reject_exchange(id, &req.rejection_remarks)
        .await?;
    Ok(Json(StagingActionResponse {
        success: true,
        resolved_to: "disposal".to_string(),
    }))
}
