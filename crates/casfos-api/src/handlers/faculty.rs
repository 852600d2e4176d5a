//! Faculty lifecycle handlers

use axum::{
    extract::{Path, Query, State},
    response::IntoResponse,
    Json,
};
use serde::Deserialize;
use uuid::Uuid;

use casfos_core::models::{
    ApprovalStatus, FacultyDraft, FacultyRecord, FacultyType, PendingFacultyUpdate, RejectedFaculty,
};

use super::assets::RejectRequest;
use crate::error::{HttpAppError, ValidatedJson};
use crate::state::FacultyState;

#[derive(Debug, Deserialize, utoipa::ToSchema)]
pub struct ProposeFacultyUpdateRequest {
    pub faculty_id: Uuid,
    pub original_data: serde_json::Value,
    pub updated_data: serde_json::Value,
}

#[derive(Debug, Deserialize, utoipa::ToSchema, utoipa::IntoParams)]
pub struct ListFacultyQuery {
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

#[derive(Debug, serde::Serialize, utoipa::ToSchema)]
pub struct FacultyResponse {
    pub id: Uuid,
    pub faculty_type: FacultyType,
    pub name: String,
    pub cadre: Option<String>,
    pub year_of_allotment: Option<String>,
    pub status_of_working: Option<String>,
    pub mobile_number: Option<String>,
    pub email: Option<String>,
    pub photograph_url: Option<String>,
    pub modules_handled: Option<Vec<String>>,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

impl From<FacultyRecord> for FacultyResponse {
    fn from(record: FacultyRecord) -> Self {
        FacultyResponse {
            id: record.id,
            faculty_type: record.faculty_type,
            name: record.name,
            cadre: record.cadre,
            year_of_allotment: record.year_of_allotment,
            status_of_working: record.status_of_working,
            mobile_number: record.mobile_number,
            email: record.email,
            photograph_url: record.photograph_url,
            modules_handled: record.modules_handled,
            created_at: record.created_at,
        }
    }
}

#[derive(Debug, serde::Serialize, utoipa::ToSchema)]
pub struct RejectedFacultyResponse {
    pub id: Uuid,
    pub faculty_type: FacultyType,
    pub name: String,
    pub rejection_remarks: String,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

impl From<RejectedFaculty> for RejectedFacultyResponse {
    fn from(record: RejectedFaculty) -> Self {
        RejectedFacultyResponse {
            id: record.id,
            faculty_type: record.faculty_type,
            name: record.name,
            rejection_remarks: record.rejection_remarks,
            created_at: record.created_at,
        }
    }
}

#[derive(Debug, serde::Serialize, utoipa::ToSchema)]
pub struct FacultyUpdateResponse {
    pub id: Uuid,
    pub faculty_id: Uuid,
    pub status: ApprovalStatus,
    pub original_data: serde_json::Value,
    pub updated_data: serde_json::Value,
    pub rejection_remarks: Option<String>,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

impl From<PendingFacultyUpdate> for FacultyUpdateResponse {
    fn from(update: PendingFacultyUpdate) -> Self {
        FacultyUpdateResponse {
            id: update.id,
            faculty_id: update.faculty_id,
            status: update.status,
            original_data: update.original_data,
            updated_data: update.updated_data,
            rejection_remarks: update.rejection_remarks,
            created_at: update.created_at,
        }
    }
}

#[derive(Debug, serde::Serialize, utoipa::ToSchema)]
pub struct FacultyActionResponse {
    pub success: bool,
    pub faculty: FacultyResponse,
}

#[derive(Debug, serde::Serialize, utoipa::ToSchema)]
pub struct FacultyListResponse {
    pub success: bool,
    pub faculties: Vec<FacultyResponse>,
}

#[derive(Debug, serde::Serialize, utoipa::ToSchema)]
pub struct RejectedFacultyListResponse {
    pub success: bool,
    pub faculties: Vec<RejectedFacultyResponse>,
}

#[derive(Debug, serde::Serialize, utoipa::ToSchema)]
pub struct FacultyUpdateActionResponse {
    pub success: bool,
    pub update: FacultyUpdateResponse,
}

#[derive(Debug, serde::Serialize, utoipa::ToSchema)]
pub struct FacultyUpdateApprovalResponse {
    pub success: bool,
    pub faculty: FacultyResponse,
    pub changes: serde_json::Value,
}

#[derive(Debug, serde::Serialize, utoipa::ToSchema)]
pub struct FacultyUpdateListResponse {
    pub success: bool,
    pub updates: Vec<FacultyUpdateResponse>,
}

#[derive(Debug, serde::Serialize, utoipa::ToSchema)]
pub struct FacultyRejectedLookupResponse {
    pub success: bool,
    pub update: FacultyUpdateResponse,
    pub faculty: FacultyResponse,
}

#[utoipa::path(
    post,
    path = "/api/faculty",
    tag = "faculty",
    request_body = FacultyDraft,
    responses(
        (status = 200, description = "Faculty submitted for approval", body = FacultyActionResponse),
        (status = 400, description = "Invalid request", body = crate::error::ErrorResponse),
    )
)]
pub async fn submit_faculty(
    State(state): State<FacultyState>,
    ValidatedJson(draft): ValidatedJson<FacultyDraft>,
) -> Result<impl IntoResponse, HttpAppError> {
    let record = state.faculty.submit(draft).await?;
    Ok(Json(FacultyActionResponse {
        success: true,
        faculty: record.into(),
    }))
}

#[utoipa::path(
    post,
    path = "/api/faculty/approve/{id}",
    tag = "faculty",
    params(("id" = Uuid, Path, description = "Pending faculty ID")),
    responses(
        (status = 200, description = "Faculty approved", body = FacultyActionResponse),
        (status = 404, description = "Pending faculty not found", body = crate::error::ErrorResponse),
    )
)]
pub async fn approve_faculty(
    State(state): State<FacultyState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, HttpAppError> {
    let record = state.faculty.approve(id).await?;
    Ok(Json(FacultyActionResponse {
        success: true,
        faculty: record.into(),
    }))
}

#[utoipa::path(
    post,
    path = "/api/faculty/reject/{id}",
    tag = "faculty",
    params(("id" = Uuid, Path, description = "Pending faculty ID")),
    request_body = RejectRequest,
    responses(
        (status = 200, description = "Faculty rejected", body = FacultyActionResponse),
        (status = 404, description = "Pending faculty not found", body = crate::error::ErrorResponse),
    )
)]
pub async fn reject_faculty(
    State(state): State<FacultyState>,
    Path(id): Path<Uuid>,
    ValidatedJson(req): ValidatedJson<RejectRequest>,
) -> Result<impl IntoResponse, HttpAppError> {
    let record = state.faculty.reject(id, &req.rejection_remarks).await?;
    Ok(Json(FacultyActionResponse {
        success: true,
        faculty: record.into(),
    }))
}

#[utoipa::path(
    get,
    path = "/api/faculty/pending",
    tag = "faculty",
    responses((status = 200, description = "Pending faculty", body = FacultyListResponse))
)]
pub async fn list_pending_faculty(
    State(state): State<FacultyState>,
) -> Result<impl IntoResponse, HttpAppError> {
    let faculties = state.faculty.list_pending().await?;
    Ok(Json(FacultyListResponse {
        success: true,
        faculties: faculties.into_iter().map(Into::into).collect(),
    }))
}

#[utoipa::path(
    get,
    path = "/api/faculty/rejected",
    tag = "faculty",
    responses((status = 200, description = "Rejected faculty", body = RejectedFacultyListResponse))
)]
pub async fn list_rejected_faculty(
    State(state): State<FacultyState>,
) -> Result<impl IntoResponse, HttpAppError> {
    let faculties = state.faculty.list_rejected().await?;
    Ok(Json(RejectedFacultyListResponse {
        success: true,
        faculties: faculties.into_iter().map(Into::into).collect(),
    }))
}

#[utoipa::path(
    get,
    path = "/api/faculty",
    tag = "faculty",
    params(ListFacultyQuery),
    responses((status = 200, description = "Active faculty", body = FacultyListResponse))
)]
pub async fn list_active_faculty(
    State(state): State<FacultyState>,
    Query(q): Query<ListFacultyQuery>,
) -> Result<impl IntoResponse, HttpAppError> {
    let limit = q.limit.unwrap_or(50).min(500);
    let offset = q.offset.unwrap_or(0);
    let faculties = state.faculty.list_active(limit, offset).await?;
    Ok(Json(FacultyListResponse {
        success: true,
        faculties: faculties.into_iter().map(Into::into).collect(),
    }))
}

// ----- Update cycle -----

#[utoipa::path(
    post,
    path = "/api/faculty/updates",
    tag = "faculty",
    request_body = ProposeFacultyUpdateRequest,
    responses(
        (status = 200, description = "Faculty update proposed", body = FacultyUpdateActionResponse),
        (status = 404, description = "Faculty not found", body = crate::error::ErrorResponse),
        (status = 409, description = "A pending update already exists", body = crate::error::ErrorResponse),
    )
)]
pub async fn propose_faculty_update(
    State(state): State<FacultyState>,
    ValidatedJson(req): ValidatedJson<ProposeFacultyUpdateRequest>,
) -> Result<impl IntoResponse, HttpAppError> {
    let update = state
        .faculty
        .propose_update(req.faculty_id, req.original_data, req.updated_data)
        .await?;
    Ok(Json(FacultyUpdateActionResponse {
        success: true,
        update: update.into(),
    }))
}

#[utoipa::path(
    post,
    path = "/api/faculty/updates/approve/{id}",
    tag = "faculty",
    params(("id" = Uuid, Path, description = "Pending faculty update ID")),
    responses(
        (status = 200, description = "Update applied to the active record", body = FacultyUpdateApprovalResponse),
        (status = 404, description = "Pending update not found", body = crate::error::ErrorResponse),
    )
)]
pub async fn approve_faculty_update(
    State(state): State<FacultyState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, HttpAppError> {
    let approval = state.faculty.approve_update(id).await?;
    Ok(Json(FacultyUpdateApprovalResponse {
        success: true,
        faculty: approval.faculty.into(),
        changes: serde_json::Value::Object(approval.changes),
    }))
}

#[utoipa::path(
    post,
    path = "/api/faculty/updates/reject/{id}",
    tag = "faculty",
    params(("id" = Uuid, Path, description = "Pending faculty update ID")),
    request_body = RejectRequest,
    responses(
        (status = 200, description = "Update rejected and retained", body = FacultyUpdateActionResponse),
        (status = 404, description = "Pending update not found", body = crate::error::ErrorResponse),
    )
)]
pub async fn reject_faculty_update(
    State(state): State<FacultyState>,
    Path(id): Path<Uuid>,
    ValidatedJson(req): ValidatedJson<RejectRequest>,
) -> Result<impl IntoResponse, HttpAppError> {
    let update = state
        .faculty
        .reject_update(id, &req.rejection_remarks)
        .await?;
    Ok(Json(FacultyUpdateActionResponse {
        success: true,
        update: update.into(),
    }))
}

#[utoipa::path(
    get,
    path = "/api/faculty/updates/pending",
    tag = "faculty",
    responses((status = 200, description = "Pending faculty updates", body = FacultyUpdateListResponse))
)]
pub async fn list_pending_faculty_updates(
    State(state): State<FacultyState>,
) -> Result<impl IntoResponse, HttpAppError> {
    let updates = state.faculty.list_pending_updates().await?;
    Ok(Json(FacultyUpdateListResponse {
        success: true,
        updates: updates.into_iter().map(Into::into).collect(),
    }))
}

#[utoipa::path(
    get,
    path = "/api/faculty/updates/rejected/{id}",
    tag = "faculty",
    params(("id" = Uuid, Path, description = "Rejected faculty update ID")),
    responses(
        (status = 200, description = "Rejected update and its active record", body = FacultyRejectedLookupResponse),
        (status = 404, description = "Rejected update or faculty not found", body = crate::error::ErrorResponse),
    )
)]
pub async fn rejected_faculty_update_lookup(
    State(state): State<FacultyState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, HttpAppError> {
    let (update, faculty) = state.faculty.rejected_update_for_resubmission(id).await?;
    Ok(Json(FacultyRejectedLookupResponse {
        success: true,
        update: update.into(),
        faculty: faculty.into(),
    }))
}
