//! Building repository and its two staging pipelines
//!
//! Upgrade proposals key off sub-category, maintenance proposals off
//! building number. Approval appends to the building's embedded history
//! lists via JSONB concatenation.

use anyhow::{Context, Result};
use sqlx::types::Json;
use sqlx::{PgPool, Postgres, Transaction};
use uuid::Uuid;

use casfos_core::models::{
    Building, BuildingMaintenance, BuildingMaintenanceStaging, BuildingUpgrade,
    BuildingUpgradeStaging,
};

const BUILDING_COLUMNS: &str = "id, building_no, sub_category, building_type, plinth_area, \
     date_of_construction, cost_of_construction, remarks, upgrades, maintenance, created_at, \
     updated_at";

const UPGRADE_STAGING_COLUMNS: &str = "id, sub_category, upgrades, created_at";

const MAINTENANCE_STAGING_COLUMNS: &str = "id, building_no, sub_category, year_of_maintenance, \
     cost, description, custody, agency, created_at";

#[derive(Clone)]
pub struct BuildingRepository {
    pool: PgPool,
}

impl BuildingRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn get_by_building_no(&self, building_no: &str) -> Result<Option<Building>> {
        let row = sqlx::query_as::<Postgres, Building>(&format!(
            "SELECT {BUILDING_COLUMNS} FROM buildings WHERE building_no = $1",
        ))
        .bind(building_no)
        .fetch_optional(&self.pool)
        .await
        .context("Failed to get building")?;
        Ok(row)
    }

    pub async fn get_by_sub_category(&self, sub_category: &str) -> Result<Option<Building>> {
        let row = sqlx::query_as::<Postgres, Building>(&format!(
            "SELECT {BUILDING_COLUMNS} FROM buildings WHERE sub_category = $1 \
             ORDER BY created_at ASC LIMIT 1",
        ))
        .bind(sub_category)
        .fetch_optional(&self.pool)
        .await
        .context("Failed to get building by sub-category")?;
        Ok(row)
    }

    // ----- Upgrade pipeline -----

    pub async fn create_upgrade_staging(
        &self,
        sub_category: &str,
        upgrades: &[BuildingUpgrade],
    ) -> Result<BuildingUpgradeStaging> {
        let row = sqlx::query_as::<Postgres, BuildingUpgradeStaging>(&format!(
            r#"
            INSERT INTO building_upgrade_staging (sub_category, upgrades)
            VALUES ($1, $2)
            RETURNING {UPGRADE_STAGING_COLUMNS}
            "#,
        ))
        .bind(sub_category)
        .bind(Json(upgrades))
        .fetch_one(&self.pool)
        .await
        .context("Failed to create upgrade staging")?;
        Ok(row)
    }

    pub async fn list_upgrade_staging(&self) -> Result<Vec<BuildingUpgradeStaging>> {
        let rows = sqlx::query_as::<Postgres, BuildingUpgradeStaging>(&format!(
            "SELECT {UPGRADE_STAGING_COLUMNS} FROM building_upgrade_staging ORDER BY created_at ASC",
        ))
        .fetch_all(&self.pool)
        .await
        .context("Failed to list upgrade staging")?;
        Ok(rows)
    }

    pub async fn take_upgrade_staging_tx(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        id: Uuid,
    ) -> Result<Option<BuildingUpgradeStaging>> {
        let row = sqlx::query_as::<Postgres, BuildingUpgradeStaging>(&format!(
            "DELETE FROM building_upgrade_staging WHERE id = $1 RETURNING {UPGRADE_STAGING_COLUMNS}",
        ))
        .bind(id)
        .fetch_optional(&mut **tx)
        .await
        .context("Failed to take upgrade staging")?;
        Ok(row)
    }

    /// Append approved upgrades to the building's embedded history.
    pub async fn append_upgrades_tx(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        sub_category: &str,
        upgrades: &[BuildingUpgrade],
    ) -> Result<bool> {
        let result = sqlx::query(
            "UPDATE buildings SET upgrades = upgrades || $2, updated_at = now() \
             WHERE sub_category = $1",
        )
        .bind(sub_category)
        .bind(Json(upgrades))
        .execute(&mut **tx)
        .await
        .context("Failed to append building upgrades")?;
        Ok(result.rows_affected() > 0)
    }

    // ----- Maintenance pipeline -----

    pub async fn create_maintenance_staging(
        &self,
        building_no: &str,
        sub_category: &str,
        entry: &BuildingMaintenance,
    ) -> Result<BuildingMaintenanceStaging> {
        let row = sqlx::query_as::<Postgres, BuildingMaintenanceStaging>(&format!(
            r#"
            INSERT INTO building_maintenance_staging (
                building_no, sub_category, year_of_maintenance, cost, description, custody, agency
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING {MAINTENANCE_STAGING_COLUMNS}
            "#,
        ))
        .bind(building_no)
        .bind(sub_category)
        .bind(entry.year_of_maintenance)
        .bind(entry.cost)
        .bind(&entry.description)
        .bind(entry.custody.as_deref())
        .bind(entry.agency.as_deref())
        .fetch_one(&self.pool)
        .await
        .context("Failed to create maintenance staging")?;
        Ok(row)
    }

    pub async fn list_maintenance_staging(&self) -> Result<Vec<BuildingMaintenanceStaging>> {
        let rows = sqlx::query_as::<Postgres, BuildingMaintenanceStaging>(&format!(
            "SELECT {MAINTENANCE_STAGING_COLUMNS} FROM building_maintenance_staging \
             ORDER BY created_at ASC",
        ))
        .fetch_all(&self.pool)
        .await
        .context("Failed to list maintenance staging")?;
        Ok(rows)
    }

    pub async fn take_maintenance_staging_tx(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        id: Uuid,
    ) -> Result<Option<BuildingMaintenanceStaging>> {
        let row = sqlx::query_as::<Postgres, BuildingMaintenanceStaging>(&format!(
            "DELETE FROM building_maintenance_staging WHERE id = $1 \
             RETURNING {MAINTENANCE_STAGING_COLUMNS}",
        ))
        .bind(id)
        .fetch_optional(&mut **tx)
        .await
        .context("Failed to take maintenance staging")?;
        Ok(row)
    }

    /// Append one approved maintenance entry to the building's history.
    pub async fn append_maintenance_tx(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        building_no: &str,
        entry: &BuildingMaintenance,
    ) -> Result<bool> {
        let result = sqlx::query(
            "UPDATE buildings SET maintenance = maintenance || $2, updated_at = now() \
             WHERE building_no = $1",
        )
        .bind(building_no)
        .bind(Json(vec![entry.clone()]))
        .execute(&mut **tx)
        .await
        .context("Failed to append building maintenance")?;
        Ok(result.rows_affected() > 0)
    }

    /// Audit row for a rejected upgrade or maintenance submission.
    pub async fn insert_rejection_tx(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        kind: &str,
        payload: &serde_json::Value,
        remark: &str,
    ) -> Result<()> {
        sqlx::query(
            "INSERT INTO rejected_building_submissions (kind, payload, rejection_remarks) \
             VALUES ($1, $2, $3)",
        )
        .bind(kind)
        .bind(payload)
        .bind(remark)
        .execute(&mut **tx)
        .await
        .context("Failed to record building rejection")?;
        Ok(())
    }
}
