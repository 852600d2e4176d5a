//! Pending update models
//!
//! A pending update is a proposed edit to an already-active asset record.
//! The active record is untouched until approval; on rejection the row is
//! retained so the submitter can re-populate the edit form and resubmit.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

use super::asset::AssetType;

/// Approval status of a proposed update (matches database enum)
#[derive(Debug, Clone, Copy, PartialEq, Eq, sqlx::Type, Serialize, Deserialize, ToSchema)]
#[sqlx(type_name = "approval_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum ApprovalStatus {
    Pending,
    Approved,
    Rejected,
}

/// Proposed edit against an active asset record (database row).
/// `original_data` is the snapshot at submission time; `updated_data` is the
/// full proposed body, applied verbatim on approval.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct PendingUpdate {
    pub id: Uuid,
    pub asset_id: Uuid,
    pub asset_type: AssetType,
    pub original_data: serde_json::Value,
    pub updated_data: serde_json::Value,
    pub status: ApprovalStatus,
    pub rejection_remarks: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_approval_status_wire_format() {
        assert_eq!(
            serde_json::to_string(&ApprovalStatus::Pending).unwrap(),
            "\"pending\""
        );
        let parsed: ApprovalStatus = serde_json::from_str("\"rejected\"").unwrap();
        assert_eq!(parsed, ApprovalStatus::Rejected);
    }
}
