//! Store stock and per-location holding ledgers
//!
//! Consumable stock is a quantity counter per (category, item); permanent
//! stock tracks individual item ids with an in-stock flag. Location holdings
//! record what each location currently holds, so a rejected return can be
//! restored to its source.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use super::asset::{AssetCategory, AssetType};

/// Store stock counter for a consumable item
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ConsumableStock {
    pub id: Uuid,
    pub asset_category: AssetCategory,
    pub item_name: String,
    pub quantity: i32,
    pub updated_at: DateTime<Utc>,
}

/// One permanent item id, in or out of store stock
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct PermanentStockItem {
    pub id: Uuid,
    pub asset_category: AssetCategory,
    pub item_name: String,
    pub item_id: String,
    pub in_stock: bool,
    pub updated_at: DateTime<Utc>,
}

/// What a location currently holds of one item
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct LocationHolding {
    pub id: Uuid,
    pub asset_category: AssetCategory,
    pub asset_type: AssetType,
    pub item_name: String,
    pub location: String,
    pub quantity: i32,
    pub item_ids: Option<Vec<String>>,
    pub updated_at: DateTime<Utc>,
}
