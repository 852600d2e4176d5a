//! Asset purchase models
//!
//! An asset record moves through three collections: `pending_assets` on
//! submission, `assets` once approved, `rejected_assets` on rejection.
//! All three share the same column layout; the rejected table additionally
//! carries the rejection remark.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

/// Asset type discriminant (matches database enum)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, sqlx::Type, Serialize, Deserialize, ToSchema)]
#[sqlx(type_name = "asset_type", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum AssetType {
    Permanent,
    Consumable,
}

impl AssetType {
    pub fn as_str(&self) -> &'static str {
        match self {
            AssetType::Permanent => "permanent",
            AssetType::Consumable => "consumable",
        }
    }
}

impl std::fmt::Display for AssetType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Asset category (matches database enum)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, sqlx::Type, Serialize, Deserialize, ToSchema)]
#[sqlx(type_name = "asset_category", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum AssetCategory {
    Building,
    Land,
    Vehicle,
    Furniture,
    Instruments,
    Fabrics,
    Electronics,
}

/// One line item within a purchase (stored as JSONB on the record)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct AssetItem {
    pub item_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sub_category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub item_description: Option<String>,
    pub quantity_received: i32,
    #[schema(value_type = f64)]
    pub unit_price: Decimal,
    #[schema(value_type = f64)]
    pub total_price: Decimal,
    /// Individual item identifiers; Permanent assets only
    #[serde(skip_serializing_if = "Option::is_none")]
    pub item_ids: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amc_from: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amc_to: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub warranty_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub warranty_valid_upto: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub item_photo_url: Option<String>,
}

/// Asset record (database row; same shape for pending and active collections)
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct AssetRecord {
    pub id: Uuid,
    pub asset_type: AssetType,
    pub asset_category: AssetCategory,
    pub entry_date: NaiveDate,
    pub purchase_date: NaiveDate,
    pub supplier_name: String,
    pub supplier_address: Option<String>,
    pub source: Option<String>,
    pub mode_of_purchase: Option<String>,
    pub bill_no: Option<String>,
    pub bill_photo_url: Option<String>,
    pub received_by: Option<String>,
    pub items: Json<Vec<AssetItem>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Rejected asset record; the purchase payload plus the approver's remark
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct RejectedAsset {
    pub id: Uuid,
    pub asset_type: AssetType,
    pub asset_category: AssetCategory,
    pub entry_date: NaiveDate,
    pub purchase_date: NaiveDate,
    pub supplier_name: String,
    pub supplier_address: Option<String>,
    pub source: Option<String>,
    pub mode_of_purchase: Option<String>,
    pub bill_no: Option<String>,
    pub bill_photo_url: Option<String>,
    pub received_by: Option<String>,
    pub items: Json<Vec<AssetItem>>,
    pub rejection_remarks: String,
    pub created_at: DateTime<Utc>,
}

/// Submission payload for a new purchase, and the body applied to an active
/// record when an approved edit replaces it.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct AssetDraft {
    pub asset_type: AssetType,
    pub asset_category: AssetCategory,
    pub entry_date: NaiveDate,
    pub purchase_date: NaiveDate,
    pub supplier_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub supplier_address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mode_of_purchase: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bill_no: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bill_photo_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub received_by: Option<String>,
    pub items: Vec<AssetItem>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_asset_type_wire_format() {
        assert_eq!(
            serde_json::to_string(&AssetType::Permanent).unwrap(),
            "\"permanent\""
        );
        let parsed: AssetType = serde_json::from_str("\"consumable\"").unwrap();
        assert_eq!(parsed, AssetType::Consumable);
    }

    #[test]
    fn test_asset_draft_round_trip() {
        let draft = AssetDraft {
            asset_type: AssetType::Consumable,
            asset_category: AssetCategory::Instruments,
            entry_date: NaiveDate::from_ymd_opt(2024, 1, 15).unwrap(),
            purchase_date: NaiveDate::from_ymd_opt(2024, 1, 10).unwrap(),
            supplier_name: "Forest Supplies Ltd".to_string(),
            supplier_address: None,
            source: Some("GEM".to_string()),
            mode_of_purchase: None,
            bill_no: Some("B-1031".to_string()),
            bill_photo_url: None,
            received_by: Some("storekeeper".to_string()),
            items: vec![AssetItem {
                item_name: "Pen".to_string(),
                sub_category: None,
                item_description: None,
                quantity_received: 10,
                unit_price: Decimal::new(500, 2),
                total_price: Decimal::new(5000, 2),
                item_ids: None,
                amc_from: None,
                amc_to: None,
                warranty_number: None,
                warranty_valid_upto: None,
                item_photo_url: None,
            }],
        };

        let json = serde_json::to_value(&draft).unwrap();
        let back: AssetDraft = serde_json::from_value(json).unwrap();
        assert_eq!(back.supplier_name, "Forest Supplies Ltd");
        assert_eq!(back.items.len(), 1);
        assert_eq!(back.items[0].quantity_received, 10);
    }
}
