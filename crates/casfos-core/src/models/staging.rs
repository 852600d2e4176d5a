//! Staging queue models for terminal actions
//!
//! Each staging table holds units awaiting admin approval of a terminal
//! action. Approval moves the row into the matching historical table;
//! rejection reverts the unit (service/disposal back to returned, exchange
//! falling through to disposal) with the remark attached.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use super::asset::{AssetCategory, AssetType};

/// Unit staged for servicing. Service details are recorded by the
/// storekeeper after the return is approved and before admin sign-off.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ServiceStaging {
    pub id: Uuid,
    pub asset_id: Uuid,
    pub asset_type: AssetType,
    pub asset_category: AssetCategory,
    pub item_name: String,
    pub location: String,
    pub item_ids: Option<Vec<String>>,
    pub service_no: Option<String>,
    pub service_date: Option<NaiveDate>,
    pub service_amount: Option<Decimal>,
    pub remark: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Completed service, the permanent historical record
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ServicedAsset {
    pub id: Uuid,
    pub asset_id: Uuid,
    pub asset_type: AssetType,
    pub asset_category: AssetCategory,
    pub item_name: String,
    pub item_ids: Option<Vec<String>>,
    pub service_no: String,
    pub service_date: NaiveDate,
    pub service_amount: Decimal,
    pub approved_at: DateTime<Utc>,
}

/// Unit staged for disposal
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DisposalStaging {
    pub id: Uuid,
    pub asset_id: Uuid,
    pub asset_type: AssetType,
    pub asset_category: AssetCategory,
    pub item_name: String,
    pub location: String,
    pub item_ids: Option<Vec<String>>,
    pub quantity: Option<i32>,
    pub purchase_value: Option<Decimal>,
    pub book_value: Option<Decimal>,
    pub inspection_date: Option<NaiveDate>,
    pub condemnation_date: Option<NaiveDate>,
    pub disposal_value: Option<Decimal>,
    pub remark: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Finalized disposal, the permanent historical record
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DisposedAsset {
    pub id: Uuid,
    pub asset_id: Uuid,
    pub asset_type: AssetType,
    pub asset_category: AssetCategory,
    pub item_name: String,
    pub item_ids: Option<Vec<String>>,
    pub quantity: Option<i32>,
    pub disposal_value: Option<Decimal>,
    pub approved_at: DateTime<Utc>,
}

/// Consumable quantity staged for exchange
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ExchangeStaging {
    pub id: Uuid,
    pub asset_id: Uuid,
    pub asset_category: AssetCategory,
    pub item_name: String,
    pub location: String,
    pub exchange_quantity: i32,
    pub remark: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Completed exchange, the permanent historical record
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ExchangedAsset {
    pub id: Uuid,
    pub asset_id: Uuid,
    pub asset_category: AssetCategory,
    pub item_name: String,
    pub exchange_quantity: i32,
    pub approved_date: NaiveDate,
    pub approved_at: DateTime<Utc>,
}
