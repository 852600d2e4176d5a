//! Faculty models
//!
//! Faculty records follow the same pending/active/rejected shape as assets,
//! including the edit-then-approve cycle through `pending_faculty_updates`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

use super::update::ApprovalStatus;

/// Faculty type discriminant (matches database enum)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, sqlx::Type, Serialize, Deserialize, ToSchema)]
#[sqlx(type_name = "faculty_type", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum FacultyType {
    Internal,
    External,
    Contract,
}

/// Faculty record (database row; same shape for pending and active)
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct FacultyRecord {
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
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Rejected faculty submission with the approver's remark
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct RejectedFaculty {
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
    pub rejection_remarks: String,
    pub created_at: DateTime<Utc>,
}

/// Submission payload for a new faculty record, and the body applied to an
/// active record when an approved edit replaces it.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct FacultyDraft {
    pub faculty_type: FacultyType,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cadre: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub year_of_allotment: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status_of_working: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mobile_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub photograph_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub modules_handled: Option<Vec<String>>,
}

/// Proposed edit against an active faculty record (database row)
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct PendingFacultyUpdate {
    pub id: Uuid,
    pub faculty_id: Uuid,
    pub original_data: serde_json::Value,
    pub updated_data: serde_json::Value,
    pub status: ApprovalStatus,
    pub rejection_remarks: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
