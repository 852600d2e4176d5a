//! Pending update repository
//!
//! One row per proposed edit. A partial unique index on
//! (asset_id) WHERE status = 'pending' backs the single-outstanding-update
//! guard; the services layer pre-checks for a clean error message.

use anyhow::{Context, Result};
use sqlx::{PgPool, Postgres, Transaction};
use uuid::Uuid;

use casfos_core::models::{ApprovalStatus, AssetType, PendingUpdate};

const UPDATE_COLUMNS: &str = "id, asset_id, asset_type, original_data, updated_data, status, \
     rejection_remarks, created_at, updated_at";

#[derive(Clone)]
pub struct UpdateRepository {
    pool: PgPool,
}

impl UpdateRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create(
        &self,
        asset_id: Uuid,
        asset_type: AssetType,
        original_data: &serde_json::Value,
        updated_data: &serde_json::Value,
    ) -> Result<PendingUpdate> {
        let row = sqlx::query_as::<Postgres, PendingUpdate>(&format!(
            r#"
            INSERT INTO pending_updates (asset_id, asset_type, original_data, updated_data, status)
            VALUES ($1, $2, $3, $4, 'pending')
            RETURNING {UPDATE_COLUMNS}
            "#,
        ))
        .bind(asset_id)
        .bind(asset_type)
        .bind(original_data)
        .bind(updated_data)
        .fetch_one(&self.pool)
        .await
        .context("Failed to create pending update")?;
        Ok(row)
    }

    pub async fn pending_exists_for_asset(&self, asset_id: Uuid) -> Result<bool> {
        let exists: (bool,) = sqlx::query_as(
            "SELECT EXISTS(SELECT 1 FROM pending_updates WHERE asset_id = $1 AND status = 'pending')",
        )
        .bind(asset_id)
        .fetch_one(&self.pool)
        .await
        .context("Failed to check for outstanding pending update")?;
        Ok(exists.0)
    }

    pub async fn get(&self, id: Uuid) -> Result<Option<PendingUpdate>> {
        let row = sqlx::query_as::<Postgres, PendingUpdate>(&format!(
            "SELECT {UPDATE_COLUMNS} FROM pending_updates WHERE id = $1",
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .context("Failed to get pending update")?;
        Ok(row)
    }

    pub async fn list_by_status(&self, status: ApprovalStatus) -> Result<Vec<PendingUpdate>> {
        let rows = sqlx::query_as::<Postgres, PendingUpdate>(&format!(
            "SELECT {UPDATE_COLUMNS} FROM pending_updates WHERE status = $1 ORDER BY created_at ASC",
        ))
        .bind(status)
        .fetch_all(&self.pool)
        .await
        .context("Failed to list pending updates")?;
        Ok(rows)
    }

    /// Mark a pending row approved, within the caller's transaction.
    /// Returns false if the row was not in pending state.
    pub async fn mark_approved_tx(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        id: Uuid,
    ) -> Result<bool> {
        let result = sqlx::query(
            "UPDATE pending_updates SET status = 'approved', updated_at = now() \
             WHERE id = $1 AND status = 'pending'",
        )
        .bind(id)
        .execute(&mut **tx)
        .await
        .context("Failed to mark pending update approved")?;
        Ok(result.rows_affected() > 0)
    }

    /// Mark a pending row rejected with the approver's remark. The row is
    /// retained so the submitter can look it up and resubmit.
    pub async fn mark_rejected(&self, id: Uuid, remark: &str) -> Result<Option<PendingUpdate>> {
        let row = sqlx::query_as::<Postgres, PendingUpdate>(&format!(
            r#"
            UPDATE pending_updates
            SET status = 'rejected', rejection_remarks = $2, updated_at = now()
            WHERE id = $1 AND status = 'pending'
            RETURNING {UPDATE_COLUMNS}
            "#,
        ))
        .bind(id)
        .bind(remark)
        .fetch_optional(&self.pool)
        .await
        .context("Failed to mark pending update rejected")?;
        Ok(row)
    }

    /// Fetch a rejected update for the resubmission flow.
    pub async fn get_rejected(
        &self,
        id: Uuid,
        asset_type: AssetType,
    ) -> Result<Option<PendingUpdate>> {
        let row = sqlx::query_as::<Postgres, PendingUpdate>(&format!(
            "SELECT {UPDATE_COLUMNS} FROM pending_updates \
             WHERE id = $1 AND asset_type = $2 AND status = 'rejected'",
        ))
        .bind(id)
        .bind(asset_type)
        .fetch_optional(&self.pool)
        .await
        .context("Failed to get rejected update")?;
        Ok(row)
    }
}
