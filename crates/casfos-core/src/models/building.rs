//! Building models and their two staging pipelines
//!
//! Buildings carry embedded upgrade and maintenance histories. Upgrades are
//! keyed by sub-category, maintenance by building number; the two pipelines
//! are independent and never touch the asset workflow.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

/// One completed or proposed upgrade (stored as JSONB)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct BuildingUpgrade {
    pub year: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Option<f64>)]
    pub estimate: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Option<f64>)]
    pub approved_estimate: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_of_completion: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub defect_liability_period: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub execution_agency: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_of_handover: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub document_url: Option<String>,
}

/// One maintenance entry (stored as JSONB)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct BuildingMaintenance {
    pub year_of_maintenance: NaiveDate,
    #[schema(value_type = f64)]
    pub cost: Decimal,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custody: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub agency: Option<String>,
}

/// Building record (database row)
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Building {
    pub id: Uuid,
    pub building_no: String,
    pub sub_category: String,
    pub building_type: Option<String>,
    pub plinth_area: Option<String>,
    pub date_of_construction: Option<NaiveDate>,
    pub cost_of_construction: Option<Decimal>,
    pub remarks: Option<String>,
    pub upgrades: Json<Vec<BuildingUpgrade>>,
    pub maintenance: Json<Vec<BuildingMaintenance>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Upgrade proposal awaiting admin approval, keyed by sub-category
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct BuildingUpgradeStaging {
    pub id: Uuid,
    pub sub_category: String,
    pub upgrades: Json<Vec<BuildingUpgrade>>,
    pub created_at: DateTime<Utc>,
}

/// Maintenance proposal awaiting admin approval, keyed by building number
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct BuildingMaintenanceStaging {
    pub id: Uuid,
    pub building_no: String,
    pub sub_category: String,
    pub year_of_maintenance: NaiveDate,
    pub cost: Decimal,
    pub description: String,
    pub custody: Option<String>,
    pub agency: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Audit row for a rejected building submission (upgrade or maintenance)
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct RejectedBuildingSubmission {
    pub id: Uuid,
    pub kind: String,
    pub payload: serde_json::Value,
    pub rejection_remarks: String,
    pub created_at: DateTime<Utc>,
}
