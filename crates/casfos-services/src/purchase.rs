//! Purchase approval lifecycle: submit -> approve | reject
//!
//! Approval copies the pending document into the active collection verbatim
//! and deletes the pending document in the same transaction; an approve that
//! cannot delete (because a concurrent approval won) fails with NotFound
//! instead of double-applying.

use sqlx::PgPool;
use uuid::Uuid;

use casfos_core::models::{AssetDraft, AssetRecord, RejectedAsset};
use casfos_core::validation::{validate_asset_draft, validate_remark};
use casfos_core::AppError;
use casfos_db::{AssetRepository, TransactionGuard};

#[derive(Clone)]
pub struct PurchaseService {
    pool: PgPool,
    assets: AssetRepository,
}

impl PurchaseService {
    pub fn new(pool: PgPool, assets: AssetRepository) -> Self {
        Self { pool, assets }
    }

    /// Submit a new purchase for approval. No side effects on active data.
    pub async fn submit(&self, draft: AssetDraft) -> Result<AssetRecord, AppError> {
        validate_asset_draft(&draft)?;
        let record = self.assets.create_pending(&draft).await?;
        tracing::info!(
            asset_id = %record.id,
            asset_type = %record.asset_type,
            "Purchase submitted for approval"
        );
        Ok(record)
    }

    /// Move the pending document into the active collection verbatim.
    pub async fn approve(&self, id: Uuid) -> Result<AssetRecord, AppError> {
        let mut tx = TransactionGuard::begin(&self.pool).await?;

        let record = self
            .assets
            .take_pending_tx(&mut tx, id)
            .await?
            .ok_or_else(|| AppError::NotFound("Pending asset not found".to_string()))?;
        self.assets.insert_active_tx(&mut tx, &record).await?;

        tx.commit().await?;
        tracing::info!(asset_id = %record.id, "Purchase approved");
        Ok(record)
    }

    /// Move the pending document into the rejected collection with the
    /// approver's remark. The remark must be non-empty.
    pub async fn reject(&self, id: Uuid, remark: &str) -> Result<AssetRecord, AppError> {
        validate_remark(remark)?;

        let mut tx = TransactionGuard::begin(&self.pool).await?;

        let record = self
            .assets
            .take_pending_tx(&mut tx, id)
            .await?
            .ok_or_else(|| AppError::NotFound("Pending asset not found".to_string()))?;
        self.assets.insert_rejected_tx(&mut tx, &record, remark).await?;

        tx.commit().await?;
        tracing::info!(asset_id = %record.id, "Purchase rejected");
        Ok(record)
    }

    pub async fn list_pending(&self) -> Result<Vec<AssetRecord>, AppError> {
        Ok(self.assets.list_pending().await?)
    }

    pub async fn list_rejected(&self) -> Result<Vec<RejectedAsset>, AppError> {
        Ok(self.assets.list_rejected().await?)
    }

    pub async fn get_active(&self, id: Uuid) -> Result<AssetRecord, AppError> {
        self.assets
            .get_active(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Asset not found".to_string()))
    }

    pub async fn list_active(&self, limit: i64, offset: i64) -> Result<Vec<AssetRecord>, AppError> {
        Ok(self.assets.list_active(limit, offset).await?)
    }
}
