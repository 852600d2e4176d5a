//! Returned asset models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use super::asset::{AssetCategory, AssetType};
use super::condition::ReturnCondition;

/// A unit returned from a location toward the store, awaiting the admin's
/// terminal decision. `condition` holds the canonical disposition code and
/// may be overwritten freely until approval.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ReturnedAsset {
    pub id: Uuid,
    pub asset_id: Uuid,
    pub asset_type: AssetType,
    pub asset_category: AssetCategory,
    pub item_name: String,
    pub location: String,
    /// Permanent assets: the individual item identifiers being returned
    pub item_ids: Option<Vec<String>>,
    /// Consumable assets: the quantity being returned
    pub return_quantity: Option<i32>,
    pub condition: ReturnCondition,
    pub remark: Option<String>,
    pub receipt_photo_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Audit row written when an admin rejects a return; the unit itself goes
/// back to its source location holding.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ReturnRejection {
    pub id: Uuid,
    pub asset_id: Uuid,
    pub asset_type: AssetType,
    pub item_name: String,
    pub location: String,
    pub rejection_remarks: String,
    pub created_at: DateTime<Utc>,
}
