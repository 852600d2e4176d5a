//! Update-after-edit handlers

use axum::{
    extract::{Path, Query, State},
    response::IntoResponse,
    Json,
};
use serde::Deserialize;
use uuid::Uuid;

use casfos_core::models::{ApprovalStatus, AssetType, PendingUpdate};

use super::assets::{AssetResponse, RejectRequest};
use crate::error::{HttpAppError, ValidatedJson};
use crate::state::WorkflowState;

#[derive(Debug, Deserialize, utoipa::ToSchema)]
pub struct ProposeUpdateRequest {
    pub asset_id: Uuid,
    pub asset_type: AssetType,
    pub original_data: serde_json::Value,
    pub updated_data: serde_json::Value,
}

#[derive(Debug, Deserialize, utoipa::ToSchema, utoipa::IntoParams)]
pub struct RejectedLookupQuery {
    pub asset_type: AssetType,
}

#[derive(Debug, serde::Serialize, utoipa::ToSchema)]
pub struct UpdateResponse {
    pub id: Uuid,
    pub asset_id: Uuid,
    pub asset_type: AssetType,
    pub status: ApprovalStatus,
    pub original_data: serde_json::Value,
    pub updated_data: serde_json::Value,
    pub rejection_remarks: Option<String>,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

impl From<PendingUpdate> for UpdateResponse {
    fn from(update: PendingUpdate) -> Self {
        UpdateResponse {
            id: update.id,
            asset_id: update.asset_id,
            asset_type: update.asset_type,
            status: update.status,
            original_data: update.original_data,
            updated_data: update.updated_data,
            rejection_remarks: update.rejection_remarks,
            created_at: update.created_at,
            updated_at: update.updated_at,
        }
    }
}

#[derive(Debug, serde::Serialize, utoipa::ToSchema)]
pub struct UpdateActionResponse {
    pub success: bool,
    pub update: UpdateResponse,
}

#[derive(Debug, serde::Serialize, utoipa::ToSchema)]
pub struct UpdateApprovalResponse {
    pub success: bool,
    pub asset: AssetResponse,
    /// Field-by-field diff between the original snapshot and the applied body
    pub changes: serde_json::Value,
}

#[derive(Debug, serde::Serialize, utoipa::ToSchema)]
pub struct UpdateListResponse {
    pub success: bool,
    pub updates: Vec<UpdateResponse>,
}

#[derive(Debug, serde::Serialize, utoipa::ToSchema)]
pub struct RejectedLookupResponse {
    pub success: bool,
    pub update: UpdateResponse,
    /// The active record the resubmission will target
    pub asset: AssetResponse,
}

#[utoipa::path(
    post,
    path = "/api/assets/updates",
    tag = "updates",
    request_body = ProposeUpdateRequest,
    responses(
        (status = 200, description = "Update proposed", body = UpdateActionResponse),
        (status = 404, description = "Asset not found", body = crate::error::ErrorResponse),
        (status = 409, description = "A pending update already exists", body = crate::error::ErrorResponse),
    )
)]
pub async fn propose_update(
    State(state): State<WorkflowState>,
    ValidatedJson(req): ValidatedJson<ProposeUpdateRequest>,
) -> Result<impl IntoResponse, HttpAppError> {
    let update = state
        .updates
        .propose(req.asset_id, req.asset_type, req.original_data, req.updated_data)
        .await?;
    Ok(Json(UpdateActionResponse {
        success: true,
        update: update.into(),
    }))
}

#[utoipa::path(
    post,
    path = "/api/assets/updates/approve/{id}",
    tag = "updates",
    params(("id" = Uuid, Path, description = "Pending update ID")),
    responses(
        (status = 200, description = "Update applied to the active record", body = UpdateApprovalResponse),
        (status = 404, description = "Pending update not found", body = crate::error::ErrorResponse),
    )
)]
pub async fn approve_update(
    State(state): State<WorkflowState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, HttpAppError> {
    let approval = state.updates.approve(id).await?;
    Ok(Json(UpdateApprovalResponse {
        success: true,
        asset: approval.asset.into(),
        changes: serde_json::Value::Object(approval.changes),
    }))
}

#[utoipa::path(
    post,
    path = "/api/assets/updates/reject/{id}",
    tag = "updates",
    params(("id" = Uuid, Path, description = "Pending update ID")),
    request_body = RejectRequest,
    responses(
        (status = 200, description = "Update rejected and retained", body = UpdateActionResponse),
        (status = 404, description = "Pending update not found", body = crate::error::ErrorResponse),
    )
)]
pub async fn reject_update(
    State(state): State<WorkflowState>,
    Path(id): Path<Uuid>,
    ValidatedJson(req): ValidatedJson<RejectRequest>,
) -> Result<impl IntoResponse, HttpAppError> {
    let update = state.updates.reject(id, &req.rejection_remarks).await?;
    Ok(Json(UpdateActionResponse {
        success: true,
        update: update.into(),
    }))
}

#[utoipa::path(
    get,
    path = "/api/assets/updates/pending",
    tag = "updates",
    responses((status = 200, description = "Pending updates", body = UpdateListResponse))
)]
pub async fn list_pending_updates(
    State(state): State<WorkflowState>,
) -> Result<impl IntoResponse, HttpAppError> {
    let updates = state.updates.list_pending().await?;
    Ok(Json(UpdateListResponse {
        success: true,
        updates: updates.into_iter().map(UpdateResponse::from).collect(),
    }))
}

#[utoipa::path(
    get,
    path = "/api/assets/updates/rejected/{id}",
    tag = "updates",
    params(
        ("id" = Uuid, Path, description = "Rejected update ID"),
        RejectedLookupQuery,
    ),
    responses(
        (status = 200, description = "Rejected update and its active record", body = RejectedLookupResponse),
        (status = 404, description = "Rejected update or asset not found", body = crate::error::ErrorResponse),
    )
)]
pub async fn rejected_update_lookup(
    State(state): State<WorkflowState>,
    Path(id): Path<Uuid>,
    Query(q): Query<RejectedLookupQuery>,
) -> Result<impl IntoResponse, HttpAppError> {
    let lookup = state
        .updates
        .rejected_for_resubmission(id, q.asset_type)
        .await?;
    Ok(Json(RejectedLookupResponse {
        success: true,
        update: lookup.update.into(),
        asset: lookup.asset.into(),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_propose_request_deserializes() {
        let body = serde_json::json!({
            "asset_id": "7f8a6e1e-9f6e-4f0e-b9c8-2f8d4a1b3c5d",
            "asset_type": "permanent",
            "original_data": {"supplier_name": "A"},
            "updated_data": {"supplier_name": "B"}
        });
        let req: ProposeUpdateRequest = serde_json::from_value(body).unwrap();
        assert_eq!(req.asset_type, AssetType::Permanent);
        assert_eq!(req.updated_data["supplier_name"], "B");
    }
}
