//! Returned asset repository

use anyhow::{Context, Result};
use sqlx::{PgPool, Postgres, Transaction};
use uuid::Uuid;

use casfos_core::models::{AssetCategory, AssetType, ReturnCondition, ReturnedAsset};

const RETURN_COLUMNS: &str = "id, asset_id, asset_type, asset_category, item_name, location, \
     item_ids, return_quantity, condition, remark, receipt_photo_url, created_at, updated_at";

#[derive(Clone)]
pub struct ReturnRepository {
    pool: PgPool,
}

impl ReturnRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    #[allow(clippy::too_many_arguments)]
    pub async fn create_tx(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        asset_id: Uuid,
        asset_type: AssetType,
        asset_category: AssetCategory,
        item_name: &str,
        location: &str,
        item_ids: Option<&[String]>,
        return_quantity: Option<i32>,
        condition: ReturnCondition,
        remark: Option<&str>,
        receipt_photo_url: Option<&str>,
    ) -> Result<ReturnedAsset> {
        let row = sqlx::query_as::<Postgres, ReturnedAsset>(&format!(
            r#"
            INSERT INTO returned_assets (
                asset_id, asset_type, asset_category, item_name, location,
                item_ids, return_quantity, condition, remark, receipt_photo_url
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            RETURNING {RETURN_COLUMNS}
            "#,
        ))
        .bind(asset_id)
        .bind(asset_type)
        .bind(asset_category)
        .bind(item_name)
        .bind(location)
        .bind(item_ids)
        .bind(return_quantity)
        .bind(condition)
        .bind(remark)
        .bind(receipt_photo_url)
        .fetch_one(&mut **tx)
        .await
        .context("Failed to create returned asset")?;
        Ok(row)
    }

    pub async fn get(&self, id: Uuid) -> Result<Option<ReturnedAsset>> {
        let row = sqlx::query_as::<Postgres, ReturnedAsset>(&format!(
            "SELECT {RETURN_COLUMNS} FROM returned_assets WHERE id = $1",
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .context("Failed to get returned asset")?;
        Ok(row)
    }

    pub async fn list(&self) -> Result<Vec<ReturnedAsset>> {
        let rows = sqlx::query_as::<Postgres, ReturnedAsset>(&format!(
            "SELECT {RETURN_COLUMNS} FROM returned_assets ORDER BY created_at ASC",
        ))
        .fetch_all(&self.pool)
        .await
        .context("Failed to list returned assets")?;
        Ok(rows)
    }

    /// Overwrite the condition of a pending return. Visible immediately to
    /// the approver queue.
    pub async fn set_condition(
        &self,
        id: Uuid,
        condition: ReturnCondition,
    ) -> Result<Option<ReturnedAsset>> {
        let row = sqlx::query_as::<Postgres, ReturnedAsset>(&format!(
            r#"
            UPDATE returned_assets
            SET condition = $2, updated_at = now()
            WHERE id = $1
            RETURNING {RETURN_COLUMNS}
            "#,
        ))
        .bind(id)
        .bind(condition)
        .fetch_optional(&self.pool)
        .await
        .context("Failed to update return condition")?;
        Ok(row)
    }

    /// Delete the returned row and return it, within the caller's transaction.
    pub async fn take_tx(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        id: Uuid,
    ) -> Result<Option<ReturnedAsset>> {
        let row = sqlx::query_as::<Postgres, ReturnedAsset>(&format!(
            "DELETE FROM returned_assets WHERE id = $1 RETURNING {RETURN_COLUMNS}",
        ))
        .bind(id)
        .fetch_optional(&mut **tx)
        .await
        .context("Failed to take returned asset")?;
        Ok(row)
    }

    /// Audit row for a rejected return.
    pub async fn insert_rejection_tx(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        returned: &ReturnedAsset,
        remark: &str,
    ) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO return_rejections (asset_id, asset_type, item_name, location, rejection_remarks)
            VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(returned.asset_id)
        .bind(returned.asset_type)
        .bind(&returned.item_name)
        .bind(&returned.location)
        .bind(remark)
        .execute(&mut **tx)
        .await
        .context("Failed to record return rejection")?;
        Ok(())
    }
}
