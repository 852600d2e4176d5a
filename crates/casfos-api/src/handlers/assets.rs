//! Purchase approval handlers

use axum::{
    extract::{Path, Query, State},
    response::IntoResponse,
    Json,
};
use serde::Deserialize;
use uuid::Uuid;

use casfos_core::models::{AssetCategory, AssetDraft, AssetItem, AssetRecord, AssetType, RejectedAsset};

use crate::error::{HttpAppError, ValidatedJson};
use crate::state::WorkflowState;

#[derive(Debug, Deserialize, utoipa::ToSchema)]
pub struct RejectRequest {
    pub rejection_remarks: String,
}

#[derive(Debug, Deserialize, utoipa::ToSchema, utoipa::IntoParams)]
pub struct ListAssetsQuery {
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

#[derive(Debug, serde::Serialize, utoipa::ToSchema)]
pub struct AssetResponse {
    pub id: Uuid,
    pub asset_type: AssetType,
    pub asset_category: AssetCategory,
    pub entry_date: chrono::NaiveDate,
    pub purchase_date: chrono::NaiveDate,
    pub supplier_name: String,
    pub supplier_address: Option<String>,
    pub source: Option<String>,
    pub mode_of_purchase: Option<String>,
    pub bill_no: Option<String>,
    pub bill_photo_url: Option<String>,
    pub received_by: Option<String>,
    pub items: Vec<AssetItem>,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

impl From<AssetRecord> for AssetResponse {
    fn from(record: AssetRecord) -> Self {
        AssetResponse {
            id: record.id,
            asset_type: record.asset_type,
            asset_category: record.asset_category,
            entry_date: record.entry_date,
            purchase_date: record.purchase_date,
            supplier_name: record.supplier_name,
            supplier_address: record.supplier_address,
            source: record.source,
            mode_of_purchase: record.mode_of_purchase,
            bill_no: record.bill_no,
            bill_photo_url: record.bill_photo_url,
            received_by: record.received_by,
            items: record.items.0,
            created_at: record.created_at,
            updated_at: record.updated_at,
        }
    }
}

#[derive(Debug, serde::Serialize, utoipa::ToSchema)]
pub struct RejectedAssetResponse {
    pub id: Uuid,
    pub asset_type: AssetType,
    pub asset_category: AssetCategory,
    pub supplier_name: String,
    pub bill_no: Option<String>,
    pub items: Vec<AssetItem>,
    pub rejection_remarks: String,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

impl From<RejectedAsset> for RejectedAssetResponse {
    fn from(record: RejectedAsset) -> Self {
        RejectedAssetResponse {
            id: record.id,
            asset_type: record.asset_type,
            asset_category: record.asset_category,
            supplier_name: record.supplier_name,
            bill_no: record.bill_no,
            items: record.items.0,
            rejection_remarks: record.rejection_remarks,
            created_at: record.created_at,
        }
    }
}

#[derive(Debug, serde::Serialize, utoipa::ToSchema)]
pub struct AssetActionResponse {
    pub success: bool,
    pub asset: AssetResponse,
}

#[derive(Debug, serde::Serialize, utoipa::ToSchema)]
pub struct AssetListResponse {
    pub success: bool,
    pub assets: Vec<AssetResponse>,
}

#[derive(Debug, serde::Serialize, utoipa::ToSchema)]
pub struct RejectedAssetListResponse {
    pub success: bool,
    pub assets: Vec<RejectedAssetResponse>,
}

#[utoipa::path(
    post,
    path = "/api/assets",
    tag = "assets",
    request_body = AssetDraft,
    responses(
        (status = 200, description = "Purchase submitted for approval", body = AssetActionResponse),
        (status = 400, description = "Invalid request", body = crate::error::ErrorResponse),
    )
)]
pub async fn submit_asset(
    State(state): State<WorkflowState>,
    ValidatedJson(draft): ValidatedJson<AssetDraft>,
) -> Result<impl IntoResponse, HttpAppError> {
    let record = state.purchases.submit(draft).await?;
    Ok(Json(AssetActionResponse {
        success: true,
        asset: record.into(),
    }))
}

#[utoipa::path(
    post,
    path = "/api/assets/approve/{id}",
    tag = "assets",
    params(("id" = Uuid, Path, description = "Pending asset ID")),
    responses(
        (status = 200, description = "Purchase approved", body = AssetActionResponse),
        (status = 404, description = "Pending asset not found", body = crate::error::ErrorResponse),
    )
)]
pub async fn approve_asset(
    State(state): State<WorkflowState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, HttpAppError> {
    let record = state.purchases.approve(id).await?;
    Ok(Json(AssetActionResponse {
        success: true,
        asset: record.into(),
    }))
}

#[utoipa::path(
    post,
    path = "/api/assets/reject/{id}",
    tag = "assets",
    params(("id" = Uuid, Path, description = "Pending asset ID")),
    request_body = RejectRequest,
    responses(
        (status = 200, description = "Purchase rejected", body = AssetActionResponse),
        (status = 400, description = "Missing rejection remark", body = crate::error::ErrorResponse),
        (status = 404, description = "Pending asset not found", body = crate::error::ErrorResponse),
    )
)]
pub async fn reject_asset(
    State(state): State<WorkflowState>,
    Path(id): Path<Uuid>,
    ValidatedJson(req): ValidatedJson<RejectRequest>,
) -> Result<impl IntoResponse, HttpAppError> {
    let record = state.purchases.reject(id, &req.rejection_remarks).await?;
    Ok(Json(AssetActionResponse {
        success: true,
        asset: record.into(),
    }))
}

#[utoipa::path(
    get,
    path = "/api/assets/pending",
    tag = "assets",
    responses((status = 200, description = "Pending purchases", body = AssetListResponse))
)]
pub async fn list_pending_assets(
    State(state): State<WorkflowState>,
) -> Result<impl IntoResponse, HttpAppError> {
    let assets = state.purchases.list_pending().await?;
    Ok(Json(AssetListResponse {
        success: true,
        assets: assets.into_iter().map(AssetResponse::from).collect(),
    }))
}

#[utoipa::path(
    get,
    path = "/api/assets/rejected",
    tag = "assets",
    responses((status = 200, description = "Rejected purchases", body = RejectedAssetListResponse))
)]
pub async fn list_rejected_assets(
    State(state): State<WorkflowState>,
) -> Result<impl IntoResponse, HttpAppError> {
    let assets = state.purchases.list_rejected().await?;
    Ok(Json(RejectedAssetListResponse {
        success: true,
        assets: assets.into_iter().map(RejectedAssetResponse::from).collect(),
    }))
}

#[utoipa::path(
    get,
    path = "/api/assets",
    tag = "assets",
    params(ListAssetsQuery),
    responses((status = 200, description = "Active assets", body = AssetListResponse))
)]
pub async fn list_active_assets(
    State(state): State<WorkflowState>,
    Query(q): Query<ListAssetsQuery>,
) -> Result<impl IntoResponse, HttpAppError> {
    let limit = q.limit.unwrap_or(50).min(500);
    let offset = q.offset.unwrap_or(0);
    let assets = state.purchases.list_active(limit, offset).await?;
    Ok(Json(AssetListResponse {
        success: true,
        assets: assets.into_iter().map(AssetResponse::from).collect(),
    }))
}

#[utoipa::path(
    get,
    path = "/api/assets/{id}",
    tag = "assets",
    params(("id" = Uuid, Path, description = "Active asset ID")),
    responses(
        (status = 200, description = "Active asset", body = AssetActionResponse),
        (status = 404, description = "Asset not found", body = crate::error::ErrorResponse),
    )
)]
pub async fn get_asset(
    State(state): State<WorkflowState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, HttpAppError> {
    let record = state.purchases.get_active(id).await?;
    Ok(Json(AssetActionResponse {
        success: true,
        asset: record.into(),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reject_request_deserializes() {
        let req: RejectRequest =
            serde_json::from_str(r#"{"rejection_remarks": "bad address"}"#).unwrap();
        assert_eq!(req.rejection_remarks, "bad address");
    }

    #[test]
    fn test_submit_payload_deserializes_into_draft() {
        let body = serde_json::json!({
            "asset_type": "consumable",
            "asset_category": "instruments",
            "entry_date": "2024-01-15",
            "purchase_date": "2024-01-10",
            "supplier_name": "Forest Supplies Ltd",
            "items": [{
                "item_name": "Pen",
                "quantity_received": 10,
                "unit_price": 5.0,
                "total_price": 50.0
            }]
        });
        let draft: AssetDraft = serde_json::from_value(body).unwrap();
        assert_eq!(draft.asset_type, AssetType::Consumable);
        assert_eq!(draft.items[0].quantity_received, 10);
    }
}
