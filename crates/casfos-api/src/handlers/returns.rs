//! Return and condition-change handlers

use axum::{
    extract::{Path, State},
    response::IntoResponse,
    Json,
};
use serde::Deserialize;
use uuid::Uuid;

use casfos_core::models::{AssetCategory, AssetType, ReturnCondition, ReturnedAsset};
use casfos_core::AppError;
use casfos_services::{ReturnOutcome, SubmitReturn};

use super::assets::RejectRequest;
use crate::error::{HttpAppError, ValidatedJson};
use crate::state::WorkflowState;

#[derive(Debug, Deserialize, utoipa::ToSchema)]
pub struct SubmitReturnRequest {
    pub asset_id: Uuid,
    pub asset_type: AssetType,
    pub asset_category: AssetCategory,
    pub item_name: String,
    pub location: String,
    pub item_ids: Option<Vec<String>>,
    pub return_quantity: Option<i32>,
    /// Canonical condition code or its display label
    pub condition: String,
    pub remark: Option<String>,
    pub receipt_photo_url: Option<String>,
}

#[derive(Debug, Deserialize, utoipa::ToSchema)]
pub struct ConditionChangeRequest {
    /// Canonical condition code or its display label
    pub condition: String,
    /// Optional discriminant check against the stored record
    pub asset_type: Option<AssetType>,
}

#[derive(Debug, serde::Serialize, utoipa::ToSchema)]
pub struct ReturnedAssetResponse {
    pub id: Uuid,
    pub asset_id: Uuid,
    pub asset_type: AssetType,
    pub asset_category: AssetCategory,
    pub item_name: String,
    pub location: String,
    pub item_ids: Option<Vec<String>>,
    pub return_quantity: Option<i32>,
    pub condition: ReturnCondition,
    /// Human-readable label for the condition; never persisted
    pub condition_label: String,
    pub remark: Option<String>,
    pub receipt_photo_url: Option<String>,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

impl From<ReturnedAsset> for ReturnedAssetResponse {
    fn from(returned: ReturnedAsset) -> Self {
        ReturnedAssetResponse {
            id: returned.id,
            asset_id: returned.asset_id,
            asset_type: returned.asset_type,
            asset_category: returned.asset_category,
            item_name: returned.item_name,
            location: returned.location,
            item_ids: returned.item_ids,
            return_quantity: returned.return_quantity,
            condition: returned.condition,
            condition_label: returned.condition.display_label().to_string(),
            remark: returned.remark,
            receipt_photo_url: returned.receipt_photo_url,
            created_at: returned.created_at,
            updated_at: returned.updated_at,
        }
    }
}

#[derive(Debug, serde::Serialize, utoipa::ToSchema)]
pub struct ReturnActionResponse {
    pub success: bool,
    pub returned: ReturnedAssetResponse,
}

#[derive(Debug, serde::Serialize, utoipa::ToSchema)]
pub struct ReturnListResponse {
    pub success: bool,
    pub returns: Vec<ReturnedAssetResponse>,
}

#[derive(Debug, serde::Serialize, utoipa::ToSchema)]
pub struct ReturnApprovalResponse {
    pub success: bool,
    /// Terminal action taken: "stock" | "service" | "disposal" | "exchange"
    pub routed_to: String,
    /// Staging entry created for service/disposal/exchange routing
    pub staging_id: Option<Uuid>,
}

#[utoipa::path(
    post,
    path = "/api/returns",
    tag = "returns",
    request_body = SubmitReturnRequest,
    responses(
        (status = 200, description = "Return submitted", body = ReturnActionResponse),
        (status = 400, description = "Invalid return", body = crate::error::ErrorResponse),
    )
)]
pub async fn submit_return(
    State(state): State<WorkflowState>,
    ValidatedJson(req): ValidatedJson<SubmitReturnRequest>,
) -> Result<impl IntoResponse, HttpAppError> {
    let condition = ReturnCondition::parse(&req.condition)
        .ok_or_else(|| AppError::InvalidInput(format!("Unknown condition: {}", req.condition)))?;
    let returned = state
        .returns
        .submit(SubmitReturn {
            asset_id: req.asset_id,
            asset_type: req.asset_type,
            asset_category: req.asset_category,
            item_name: req.item_name,
            location: req.location,
            item_ids: req.item_ids,
            return_quantity: req.return_quantity,
            condition,
            remark: req.remark,
            receipt_photo_url: req.receipt_photo_url,
        })
        .await?;
    Ok(Json(ReturnActionResponse {
        success: true,
        returned: returned.into(),
    }))
}

#[utoipa::path(
    post,
    path = "/api/returns/condition/{id}",
    tag = "returns",
    params(("id" = Uuid, Path, description = "Returned asset ID")),
    request_body = ConditionChangeRequest,
    responses(
        (status = 200, description = "Condition changed", body = ReturnActionResponse),
        (status = 400, description = "Invalid condition", body = crate::error::ErrorResponse),
        (status = 404, description = "Returned asset not found", body = crate::error::ErrorResponse),
    )
)]
pub async fn change_condition(
    State(state): State<WorkflowState>,
    Path(id): Path<Uuid>,
    ValidatedJson(req): ValidatedJson<ConditionChangeRequest>,
) -> Result<impl IntoResponse, HttpAppError> {
    let returned = state
        .returns
        .update_condition(id, &req.condition, req.asset_type)
        .await?;
    Ok(Json(ReturnActionResponse {
        success: true,
        returned: returned.into(),
    }))
}

#[utoipa::path(
    post,
    path = "/api/returns/approve/{id}",
    tag = "returns",
    params(("id" = Uuid, Path, description = "Returned asset ID")),
    responses(
        (status = 200, description = "Return approved and routed", body = ReturnApprovalResponse),
        (status = 404, description = "Returned asset not found", body = crate::error::ErrorResponse),
    )
)]
pub async fn approve_return(
    State(state): State<WorkflowState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, HttpAppError> {
    let outcome = state.returns.approve(id).await?;
    let staging_id = match &outcome {
        ReturnOutcome::ReturnedToStock => None,
        ReturnOutcome::Service(staging) => Some(staging.id),
        ReturnOutcome::Disposal(staging) => Some(staging.id),
        ReturnOutcome::Exchange(staging) => Some(staging.id),
    };
    Ok(Json(ReturnApprovalResponse {
        success: true,
        routed_to: outcome.routed_to().to_string(),
        staging_id,
    }))
}

#[utoipa::path(
    post,
    path = "/api/returns/reject/{id}",
    tag = "returns",
    params(("id" = Uuid, Path, description = "Returned asset ID")),
    request_body = RejectRequest,
    responses(
        (status = 200, description = "Return rejected, unit restored to its location", body = ReturnActionResponse),
        (status = 404, description = "Returned asset not found", body = crate::error::ErrorResponse),
    )
)]
pub async fn reject_return(
    State(state): State<WorkflowState>,
    Path(id): Path<Uuid>,
    ValidatedJson(req): ValidatedJson<RejectRequest>,
) -> Result<impl IntoResponse, HttpAppError> {
    let returned = state.returns.reject(id, &req.rejection_remarks).await?;
    Ok(Json(ReturnActionResponse {
        success: true,
        returned: returned.into(),
    }))
}

#[utoipa::path(
    get,
    path = "/api/returns",
    tag = "returns",
    responses((status = 200, description = "Returned assets awaiting approval", body = ReturnListResponse))
)]
pub async fn list_returns(
    State(state): State<WorkflowState>,
) -> Result<impl IntoResponse, HttpAppError> {
    let returns = state.returns.list().await?;
    Ok(Json(ReturnListResponse {
        success: true,
        returns: returns.into_iter().map(ReturnedAssetResponse::from).collect(),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_submit_request_accepts_display_label() {
        let body = serde_json::json!({
            "asset_id": "7f8a6e1e-9f6e-4f0e-b9c8-2f8d4a1b3c5d",
            "asset_type": "consumable",
            "asset_category": "instruments",
            "item_name": "Pen",
            "location": "Library",
            "return_quantity": 5,
            "condition": "To Be Disposed"
        });
        let req: SubmitReturnRequest = serde_json::from_value(body).unwrap();
        assert_eq!(
            ReturnCondition::parse(&req.condition),
            Some(ReturnCondition::Dispose)
        );
    }

    #[test]
    fn test_condition_label_in_response_mapping() {
        assert_eq!(ReturnCondition::Service.display_label(), "To Be Serviced");
        assert_eq!(ReturnCondition::Good.display_label(), "Good");
    }
}
