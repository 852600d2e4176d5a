//! Update-after-edit lifecycle for active asset records
//!
//! A proposed edit never touches the active record until approval. At most
//! one pending update may exist per asset: the pre-check here gives a clean
//! conflict error, and the partial unique index on pending_updates makes the
//! guard hold under concurrent submissions.

use sqlx::PgPool;
use uuid::Uuid;

use casfos_core::diff::{diff_records, RecordDiff};
use casfos_core::models::{ApprovalStatus, AssetDraft, AssetRecord, AssetType, PendingUpdate};
use casfos_core::validation::validate_remark;
use casfos_core::AppError;
use casfos_db::{AssetRepository, TransactionGuard, UpdateRepository};

/// Result of approving an update: the applied record plus the field diff
/// shown to the approver for audit.
#[derive(Debug)]
pub struct UpdateApproval {
    pub update_id: Uuid,
    pub asset: AssetRecord,
    pub changes: RecordDiff,
}

/// Result of the rejected-update lookup used to re-populate the edit form.
#[derive(Debug)]
pub struct RejectedUpdateLookup {
    pub update: PendingUpdate,
    pub asset: AssetRecord,
}

#[derive(Clone)]
pub struct UpdateService {
    pool: PgPool,
    updates: UpdateRepository,
    assets: AssetRepository,
}

impl UpdateService {
    pub fn new(pool: PgPool, updates: UpdateRepository, assets: AssetRepository) -> Self {
        Self {
            pool,
            updates,
            assets,
        }
    }

    /// Propose an edit to an active record.
    pub async fn propose(
        &self,
        asset_id: Uuid,
        asset_type: AssetType,
        original_data: serde_json::Value,
        updated_data: serde_json::Value,
    ) -> Result<PendingUpdate, AppError> {
        let asset = self
            .assets
            .get_active(asset_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Asset not found".to_string()))?;
        if asset.asset_type != asset_type {
            return Err(AppError::BadRequest(format!(
                "Asset {} is {}, not {}",
                asset_id, asset.asset_type, asset_type
            )));
        }

        if self.updates.pending_exists_for_asset(asset_id).await? {
            return Err(AppError::Conflict(
                "A pending update already exists for this asset".to_string(),
            ));
        }

        // The updated body must be applicable on approval; reject malformed
        // payloads at submission time rather than in the approver's face.
        let _draft: AssetDraft = serde_json::from_value(updated_data.clone()).map_err(|e| {
            AppError::InvalidInput(format!("Updated data is not a valid asset body: {}", e))
        })?;

        let update = self
            .updates
            .create(asset_id, asset_type, &original_data, &updated_data)
            .await?;
        tracing::info!(update_id = %update.id, asset_id = %asset_id, "Update proposed");
        Ok(update)
    }

    /// Apply the proposed body onto the active record (full replace, not a
    /// merge) and mark the update approved, in one transaction.
    pub async fn approve(&self, id: Uuid) -> Result<UpdateApproval, AppError> {
        let update = self
            .updates
            .get(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Pending update not found".to_string()))?;
        if update.status != ApprovalStatus::Pending {
            return Err(AppError::BadRequest(
                "Update has already been resolved".to_string(),
            ));
        }

        let changes = diff_records(&update.original_data, &update.updated_data);
        let draft: AssetDraft = serde_json::from_value(update.updated_data.clone()).map_err(|e| {
            AppError::Internal(format!("Stored update payload is not applicable: {}", e))
        })?;

        let mut tx = TransactionGuard::begin(&self.pool).await?;

        let replaced = self
            .assets
            .replace_active_tx(&mut tx, update.asset_id, &draft)
            .await?;
        if !replaced {
            return Err(AppError::NotFound("Asset not found".to_string()));
        }
        let marked = self.updates.mark_approved_tx(&mut tx, id).await?;
        if !marked {
            return Err(AppError::Conflict(
                "Update was resolved concurrently".to_string(),
            ));
        }

        tx.commit().await?;

        let asset = self
            .assets
            .get_active(update.asset_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Asset not found".to_string()))?;

        tracing::info!(update_id = %id, asset_id = %update.asset_id, "Update approved");
        Ok(UpdateApproval {
            update_id: id,
            asset,
            changes,
        })
    }

    /// Mark the update rejected with the approver's remark. The row is
    /// retained so the submitter can look it up and resubmit.
    pub async fn reject(&self, id: Uuid, remark: &str) -> Result<PendingUpdate, AppError> {
        validate_remark(remark)?;
        let update = self
            .updates
            .mark_rejected(id, remark)
            .await?
            .ok_or_else(|| AppError::NotFound("Pending update not found".to_string()))?;
        tracing::info!(update_id = %id, asset_id = %update.asset_id, "Update rejected");
        Ok(update)
    }

    /// Look up a rejected update together with the active record it targets,
    /// so the submitter can re-populate the edit form. The active record is
    /// located by `asset_id`, never by the rejected document's own id; if it
    /// is gone, the resubmission fails here.
    pub async fn rejected_for_resubmission(
        &self,
        rejected_id: Uuid,
        asset_type: AssetType,
    ) -> Result<RejectedUpdateLookup, AppError> {
        let update = self
            .updates
            .get_rejected(rejected_id, asset_type)
            .await?
            .ok_or_else(|| AppError::NotFound("Rejected update not found".to_string()))?;

        let asset = self
            .assets
            .get_active(update.asset_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Asset not found".to_string()))?;

        Ok(RejectedUpdateLookup { update, asset })
    }

    pub async fn list_pending(&self) -> Result<Vec<PendingUpdate>, AppError> {
        Ok(self.updates.list_by_status(ApprovalStatus::Pending).await?)
    }
}
