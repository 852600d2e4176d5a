//! Purchase collections: pending, active, and rejected assets
//!
//! All three tables share the same column layout. The move operations use
//! DELETE .. RETURNING so a concurrent approval of the same id resolves to
//! first-wins: the losing transaction sees no row and fails cleanly.

use anyhow::{Context, Result};
use sqlx::types::Json;
use sqlx::{PgPool, Postgres, Transaction};
use uuid::Uuid;

use casfos_core::models::{AssetDraft, AssetRecord, RejectedAsset};

const ASSET_COLUMNS: &str = "id, asset_type, asset_category, entry_date, purchase_date, \
     supplier_name, supplier_address, source, mode_of_purchase, bill_no, bill_photo_url, \
     received_by, items, created_at, updated_at";

#[derive(Clone)]
pub struct AssetRepository {
    pool: PgPool,
}

impl AssetRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create_pending(&self, draft: &AssetDraft) -> Result<AssetRecord> {
        let record = sqlx::query_as::<Postgres, AssetRecord>(&format!(
            r#"
            INSERT INTO pending_assets (
                asset_type, asset_category, entry_date, purchase_date,
                supplier_name, supplier_address, source, mode_of_purchase,
                bill_no, bill_photo_url, received_by, items
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
            RETURNING {ASSET_COLUMNS}
            "#,
        ))
        .bind(draft.asset_type)
        .bind(draft.asset_category)
        .bind(draft.entry_date)
        .bind(draft.purchase_date)
        .bind(&draft.supplier_name)
        .bind(draft.supplier_address.as_deref())
        .bind(draft.source.as_deref())
        .bind(draft.mode_of_purchase.as_deref())
        .bind(draft.bill_no.as_deref())
        .bind(draft.bill_photo_url.as_deref())
        .bind(draft.received_by.as_deref())
        .bind(Json(&draft.items))
        .fetch_one(&self.pool)
        .await
        .context("Failed to create pending asset")?;
        Ok(record)
    }

    pub async fn get_pending(&self, id: Uuid) -> Result<Option<AssetRecord>> {
        let record = sqlx::query_as::<Postgres, AssetRecord>(&format!(
            "SELECT {ASSET_COLUMNS} FROM pending_assets WHERE id = $1",
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .context("Failed to get pending asset")?;
        Ok(record)
    }

    pub async fn list_pending(&self) -> Result<Vec<AssetRecord>> {
        let rows = sqlx::query_as::<Postgres, AssetRecord>(&format!(
            "SELECT {ASSET_COLUMNS} FROM pending_assets ORDER BY created_at ASC",
        ))
        .fetch_all(&self.pool)
        .await
        .context("Failed to list pending assets")?;
        Ok(rows)
    }

    /// Delete the pending row and return it, within the caller's transaction.
    pub async fn take_pending_tx(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        id: Uuid,
    ) -> Result<Option<AssetRecord>> {
        let record = sqlx::query_as::<Postgres, AssetRecord>(&format!(
            "DELETE FROM pending_assets WHERE id = $1 RETURNING {ASSET_COLUMNS}",
        ))
        .bind(id)
        .fetch_optional(&mut **tx)
        .await
        .context("Failed to take pending asset")?;
        Ok(record)
    }

    /// Insert a record into the active collection verbatim (id preserved).
    pub async fn insert_active_tx(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        record: &AssetRecord,
    ) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO assets (
                id, asset_type, asset_category, entry_date, purchase_date,
                supplier_name, supplier_address, source, mode_of_purchase,
                bill_no, bill_photo_url, received_by, items, created_at, updated_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, now())
            "#,
        )
        .bind(record.id)
        .bind(record.asset_type)
        .bind(record.asset_category)
        .bind(record.entry_date)
        .bind(record.purchase_date)
        .bind(&record.supplier_name)
        .bind(record.supplier_address.as_deref())
        .bind(record.source.as_deref())
        .bind(record.mode_of_purchase.as_deref())
        .bind(record.bill_no.as_deref())
        .bind(record.bill_photo_url.as_deref())
        .bind(record.received_by.as_deref())
        .bind(&record.items)
        .bind(record.created_at)
        .execute(&mut **tx)
        .await
        .context("Failed to insert active asset")?;
        Ok(())
    }

    pub async fn insert_rejected_tx(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        record: &AssetRecord,
        remark: &str,
    ) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO rejected_assets (
                id, asset_type, asset_category, entry_date, purchase_date,
                supplier_name, supplier_address, source, mode_of_purchase,
                bill_no, bill_photo_url, received_by, items, rejection_remarks
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14)
            "#,
        )
        .bind(record.id)
        .bind(record.asset_type)
        .bind(record.asset_category)
        .bind(record.entry_date)
        .bind(record.purchase_date)
        .bind(&record.supplier_name)
        .bind(record.supplier_address.as_deref())
        .bind(record.source.as_deref())
        .bind(record.mode_of_purchase.as_deref())
        .bind(record.bill_no.as_deref())
        .bind(record.bill_photo_url.as_deref())
        .bind(record.received_by.as_deref())
        .bind(&record.items)
        .bind(remark)
        .execute(&mut **tx)
        .await
        .context("Failed to insert rejected asset")?;
        Ok(())
    }

    pub async fn get_active(&self, id: Uuid) -> Result<Option<AssetRecord>> {
        let record = sqlx::query_as::<Postgres, AssetRecord>(&format!(
            "SELECT {ASSET_COLUMNS} FROM assets WHERE id = $1",
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .context("Failed to get active asset")?;
        Ok(record)
    }

    pub async fn list_active(&self, limit: i64, offset: i64) -> Result<Vec<AssetRecord>> {
        let rows = sqlx::query_as::<Postgres, AssetRecord>(&format!(
            "SELECT {ASSET_COLUMNS} FROM assets ORDER BY created_at DESC LIMIT $1 OFFSET $2",
        ))
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await
        .context("Failed to list active assets")?;
        Ok(rows)
    }

    /// Replace the body of an active record with an approved update draft.
    pub async fn replace_active_tx(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        id: Uuid,
        draft: &AssetDraft,
    ) -> Result<bool> {
        let result = sqlx::query(
            r#"
            UPDATE assets
            SET asset_type = $2, asset_category = $3, entry_date = $4, purchase_date = $5,
                supplier_name = $6, supplier_address = $7, source = $8, mode_of_purchase = $9,
                bill_no = $10, bill_photo_url = $11, received_by = $12, items = $13,
                updated_at = now()
            WHERE id = $1
            "#,
        )
        .bind(id)
        .bind(draft.asset_type)
        .bind(draft.asset_category)
        .bind(draft.entry_date)
        .bind(draft.purchase_date)
        .bind(&draft.supplier_name)
        .bind(draft.supplier_address.as_deref())
        .bind(draft.source.as_deref())
        .bind(draft.mode_of_purchase.as_deref())
        .bind(draft.bill_no.as_deref())
        .bind(draft.bill_photo_url.as_deref())
        .bind(draft.received_by.as_deref())
        .bind(Json(&draft.items))
        .execute(&mut **tx)
        .await
        .context("Failed to replace active asset")?;
        Ok(result.rows_affected() > 0)
    }

    pub async fn get_rejected(&self, id: Uuid) -> Result<Option<RejectedAsset>> {
        let record = sqlx::query_as::<Postgres, RejectedAsset>(
            r#"
            SELECT id, asset_type, asset_category, entry_date, purchase_date,
                supplier_name, supplier_address, source, mode_of_purchase, bill_no,
                bill_photo_url, received_by, items, rejection_remarks, created_at
            FROM rejected_assets
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .context("Failed to get rejected asset")?;
        Ok(record)
    }

    pub async fn list_rejected(&self) -> Result<Vec<RejectedAsset>> {
        let rows = sqlx::query_as::<Postgres, RejectedAsset>(
            r#"
            SELECT id, asset_type, asset_category, entry_date, purchase_date,
                supplier_name, supplier_address, source, mode_of_purchase, bill_no,
                bill_photo_url, received_by, items, rejection_remarks, created_at
            FROM rejected_assets
            ORDER BY created_at DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .context("Failed to list rejected assets")?;
        Ok(rows)
    }
}
