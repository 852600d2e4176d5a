//! Building upgrade and maintenance pipelines
//!
//! Two independent, structurally identical lifecycles: submit ->
//! approve (merge into the building's embedded history) | reject (delete
//! with remark). Upgrades key off sub-category, maintenance off building
//! number; neither touches the asset workflow.

use sqlx::PgPool;
use uuid::Uuid;

use casfos_core::models::{
    Building, BuildingMaintenance, BuildingMaintenanceStaging, BuildingUpgrade,
    BuildingUpgradeStaging,
};
use casfos_core::validation::validate_remark;
use casfos_core::AppError;
use casfos_db::{BuildingRepository, TransactionGuard};

#[derive(Clone)]
pub struct BuildingService {
    pool: PgPool,
    buildings: BuildingRepository,
}

impl BuildingService {
    pub fn new(pool: PgPool, buildings: BuildingRepository) -> Self {
        Self { pool, buildings }
    }

    // ----- Upgrade pipeline -----

    pub async fn submit_upgrade(
        &self,
        sub_category: &str,
        upgrades: Vec<BuildingUpgrade>,
    ) -> Result<BuildingUpgradeStaging, AppError> {
        if sub_category.trim().is_empty() {
            return Err(AppError::InvalidInput(
                "Sub-category must not be empty".to_string(),
            ));
        }
        if upgrades.is_empty() {
            return Err(AppError::InvalidInput(
                "An upgrade submission must contain at least one entry".to_string(),
            ));
        }
        self.buildings
            .get_by_sub_category(sub_category)
            .await?
            .ok_or_else(|| {
                AppError::NotFound(format!("No building found for sub-category '{}'", sub_category))
            })?;

        let staging = self
            .buildings
            .create_upgrade_staging(sub_category, &upgrades)
            .await?;
        tracing::info!(staging_id = %staging.id, sub_category = %sub_category, "Building upgrade submitted");
        Ok(staging)
    }

    /// Merge the staged upgrades into the building's history.
    pub async fn approve_upgrade(&self, id: Uuid) -> Result<Building, AppError> {
        let mut tx = TransactionGuard::begin(&self.pool).await?;

        let staging = self
            .buildings
            .take_upgrade_staging_tx(&mut tx, id)
            .await?
            .ok_or_else(|| AppError::NotFound("Upgrade submission not found".to_string()))?;

        let merged = self
            .buildings
            .append_upgrades_tx(&mut tx, &staging.sub_category, &staging.upgrades.0)
            .await?;
        if !merged {
            return Err(AppError::NotFound(format!(
                "No building found for sub-category '{}'",
                staging.sub_category
            )));
        }

        tx.commit().await?;
        tracing::info!(sub_category = %staging.sub_category, "Building upgrade approved");

        self.buildings
            .get_by_sub_category(&staging.sub_category)
            .await?
            .ok_or_else(|| AppError::NotFound("Building not found".to_string()))
    }

    pub async fn reject_upgrade(&self, id: Uuid, remark: &str) -> Result<(), AppError> {
        validate_remark(remark)?;

        let mut tx = TransactionGuard::begin(&self.pool).await?;

        let staging = self
            .buildings
            .take_upgrade_staging_tx(&mut tx, id)
            .await?
            .ok_or_else(|| AppError::NotFound("Upgrade submission not found".to_string()))?;

        let payload = serde_json::to_value(&staging)
            .map_err(|e| AppError::Internal(format!("Failed to serialize staging row: {}", e)))?;
        self.buildings
            .insert_rejection_tx(&mut tx, "upgrade", &payload, remark)
            .await?;

        tx.commit().await?;
        tracing::info!(sub_category = %staging.sub_category, "Building upgrade rejected");
        Ok(())
    }

    pub async fn list_upgrade_staging(&self) -> Result<Vec<BuildingUpgradeStaging>, AppError> {
        Ok(self.buildings.list_upgrade_staging().await?)
    }

    // ----- Maintenance pipeline -----

    pub async fn submit_maintenance(
        &self,
        building_no: &str,
        sub_category: &str,
        entry: BuildingMaintenance,
    ) -> Result<BuildingMaintenanceStaging, AppError> {
        if building_no.trim().is_empty() {
            return Err(AppError::InvalidInput(
                "Building number must not be empty".to_string(),
            ));
        }
        if entry.description.trim().is_empty() {
            return Err(AppError::InvalidInput(
                "Maintenance description must not be empty".to_string(),
            ));
        }
        self.buildings
            .get_by_building_no(building_no)
            .await?
            .ok_or_else(|| {
                AppError::NotFound(format!("Building '{}' not found", building_no))
            })?;

        let staging = self
            .buildings
            .create_maintenance_staging(building_no, sub_category, &entry)
            .await?;
        tracing::info!(staging_id = %staging.id, building_no = %building_no, "Building maintenance submitted");
        Ok(staging)
    }

    /// Merge the staged maintenance entry into the building's history.
    pub async fn approve_maintenance(&self, id: Uuid) -> Result<Building, AppError> {
        let mut tx = TransactionGuard::begin(&self.pool).await?;

        let staging = self
            .buildings
            .take_maintenance_staging_tx(&mut tx, id)
            .await?
            .ok_or_else(|| AppError::NotFound("Maintenance submission not found".to_string()))?;

        let entry = BuildingMaintenance {
            year_of_maintenance: staging.year_of_maintenance,
            cost: staging.cost,
            description: staging.description.clone(),
            custody: staging.custody.clone(),
            agency: staging.agency.clone(),
        };
        let merged = self
            .buildings
            .append_maintenance_tx(&mut tx, &staging.building_no, &entry)
            .await?;
        if !merged {
            return Err(AppError::NotFound(format!(
                "Building '{}' not found",
                staging.building_no
            )));
        }

        tx.commit().await?;
        tracing::info!(building_no = %staging.building_no, "Building maintenance approved");

        self.buildings
            .get_by_building_no(&staging.building_no)
            .await?
            .ok_or_else(|| AppError::NotFound("Building not found".to_string()))
    }

    pub async fn reject_maintenance(&self, id: Uuid, remark: &str) -> Result<(), AppError> {
        validate_remark(remark)?;

        let mut tx = TransactionGuard::begin(&self.pool).await?;

        let staging = self
            .buildings
            .take_maintenance_staging_tx(&mut tx, id)
            .await?
            .ok_or_else(|| AppError::NotFound("Maintenance submission not found".to_string()))?;

        let payload = serde_json::to_value(&staging)
            .map_err(|e| AppError::Internal(format!("Failed to serialize staging row: {}", e)))?;
        self.buildings
            .insert_rejection_tx(&mut tx, "maintenance", &payload, remark)
            .await?;

        tx.commit().await?;
        tracing::info!(building_no = %staging.building_no, "Building maintenance rejected");
        Ok(())
    }

    pub async fn list_maintenance_staging(
        &self,
    ) -> Result<Vec<BuildingMaintenanceStaging>, AppError> {
        Ok(self.buildings.list_maintenance_staging().await?)
    }
}
