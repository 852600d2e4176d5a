//! Staging queue repository for service, disposal, and exchange
//!
//! Rows enter these tables when a return is approved with the matching
//! condition, get their detail fields filled by the storekeeper, and leave
//! on the admin's terminal decision.

use anyhow::{Context, Result};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use sqlx::{PgPool, Postgres, Transaction};
use uuid::Uuid;

use casfos_core::models::{
    DisposalStaging, DisposedAsset, ExchangeStaging, ExchangedAsset, ReturnedAsset,
    ServiceStaging, ServicedAsset,
};

const SERVICE_COLUMNS: &str = "id, asset_id, asset_type, asset_category, item_name, location, \
     item_ids, service_no, service_date, service_amount, remark, created_at, updated_at";

const DISPOSAL_COLUMNS: &str = "id, asset_id, asset_type, asset_category, item_name, location, \
     item_ids, quantity, purchase_value, book_value, inspection_date, condemnation_date, \
     disposal_value, remark, created_at, updated_at";

const EXCHANGE_COLUMNS: &str = "id, asset_id, asset_category, item_name, location, \
     exchange_quantity, remark, created_at, updated_at";

#[derive(Clone)]
pub struct StagingRepository {
    pool: PgPool,
}

impl StagingRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    // ----- Service -----

    pub async fn insert_service_tx(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        returned: &ReturnedAsset,
    ) -> Result<ServiceStaging> {
        let row = sqlx::query_as::<Postgres, ServiceStaging>(&format!(
            r#"
            INSERT INTO service_staging (asset_id, asset_type, asset_category, item_name, location, item_ids, remark)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING {SERVICE_COLUMNS}
            "#,
        ))
        .bind(returned.asset_id)
        .bind(returned.asset_type)
        .bind(returned.asset_category)
        .bind(&returned.item_name)
        .bind(&returned.location)
        .bind(returned.item_ids.as_deref())
        .bind(returned.remark.as_deref())
        .fetch_one(&mut **tx)
        .await
        .context("Failed to insert service staging")?;
        Ok(row)
    }

    pub async fn get_service(&self, id: Uuid) -> Result<Option<ServiceStaging>> {
        let row = sqlx::query_as::<Postgres, ServiceStaging>(&format!(
            "SELECT {SERVICE_COLUMNS} FROM service_staging WHERE id = $1",
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .context("Failed to get service staging")?;
        Ok(row)
    }

    pub async fn list_service(&self) -> Result<Vec<ServiceStaging>> {
        let rows = sqlx::query_as::<Postgres, ServiceStaging>(&format!(
            "SELECT {SERVICE_COLUMNS} FROM service_staging ORDER BY created_at ASC",
        ))
        .fetch_all(&self.pool)
        .await
        .context("Failed to list service staging")?;
        Ok(rows)
    }

    pub async fn record_service_details(
        &self,
        id: Uuid,
        service_no: &str,
        service_date: NaiveDate,
        service_amount: Decimal,
    ) -> Result<Option<ServiceStaging>> {
        let row = sqlx::query_as::<Postgres, ServiceStaging>(&format!(
            r#"
            UPDATE service_staging
            SET service_no = $2, service_date = $3, service_amount = $4, updated_at = now()
            WHERE id = $1
            RETURNING {SERVICE_COLUMNS}
            "#,
        ))
        .bind(id)
        .bind(service_no)
        .bind(service_date)
        .bind(service_amount)
        .fetch_optional(&self.pool)
        .await
        .context("Failed to record service details")?;
        Ok(row)
    }

    pub async fn take_service_tx(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        id: Uuid,
    ) -> Result<Option<ServiceStaging>> {
        let row = sqlx::query_as::<Postgres, ServiceStaging>(&format!(
            "DELETE FROM service_staging WHERE id = $1 RETURNING {SERVICE_COLUMNS}",
        ))
        .bind(id)
        .fetch_optional(&mut **tx)
        .await
        .context("Failed to take service staging")?;
        Ok(row)
    }

    pub async fn insert_serviced_tx(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        staging: &ServiceStaging,
        service_no: &str,
        service_date: NaiveDate,
        service_amount: Decimal,
    ) -> Result<ServicedAsset> {
        let row = sqlx::query_as::<Postgres, ServicedAsset>(
            r#"
            INSERT INTO serviced_assets (
                asset_id, asset_type, asset_category, item_name, item_ids,
                service_no, service_date, service_amount
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING id, asset_id, asset_type, asset_category, item_name, item_ids,
                service_no, service_date, service_amount, approved_at
            "#,
        )
        .bind(staging.asset_id)
        .bind(staging.asset_type)
        .bind(staging.asset_category)
        .bind(&staging.item_name)
        .bind(staging.item_ids.as_deref())
        .bind(service_no)
        .bind(service_date)
        .bind(service_amount)
        .fetch_one(&mut **tx)
        .await
        .context("Failed to insert serviced asset")?;
        Ok(row)
    }

    // ----- Disposal -----

    pub async fn insert_disposal_tx(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        returned: &ReturnedAsset,
    ) -> Result<DisposalStaging> {
        let row = sqlx::query_as::<Postgres, DisposalStaging>(&format!(
            r#"
            INSERT INTO disposal_staging (
                asset_id, asset_type, asset_category, item_name, location, item_ids, quantity, remark
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING {DISPOSAL_COLUMNS}
            "#,
        ))
        .bind(returned.asset_id)
        .bind(returned.asset_type)
        .bind(returned.asset_category)
        .bind(&returned.item_name)
        .bind(&returned.location)
        .bind(returned.item_ids.as_deref())
        .bind(returned.return_quantity)
        .bind(returned.remark.as_deref())
        .fetch_one(&mut **tx)
        .await
        .context("Failed to insert disposal staging")?;
        Ok(row)
    }

    /// A rejected exchange falls through to the disposal queue.
    pub async fn insert_disposal_from_exchange_tx(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        exchange: &ExchangeStaging,
        remark: &str,
    ) -> Result<DisposalStaging> {
        let row = sqlx::query_as::<Postgres, DisposalStaging>(&format!(
            r#"
            INSERT INTO disposal_staging (
                asset_id, asset_type, asset_category, item_name, location, quantity, remark
            )
            VALUES ($1, 'consumable', $2, $3, $4, $5, $6)
            RETURNING {DISPOSAL_COLUMNS}
            "#,
        ))
        .bind(exchange.asset_id)
        .bind(exchange.asset_category)
        .bind(&exchange.item_name)
        .bind(&exchange.location)
        .bind(exchange.exchange_quantity)
        .bind(remark)
        .fetch_one(&mut **tx)
        .await
        .context("Failed to move exchange staging to disposal")?;
        Ok(row)
    }

    pub async fn get_disposal(&self, id: Uuid) -> Result<Option<DisposalStaging>> {
        let row = sqlx::query_as::<Postgres, DisposalStaging>(&format!(
            "SELECT {DISPOSAL_COLUMNS} FROM disposal_staging WHERE id = $1",
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .context("Failed to get disposal staging")?;
        Ok(row)
    }

    pub async fn list_disposal(&self) -> Result<Vec<DisposalStaging>> {
        let rows = sqlx::query_as::<Postgres, DisposalStaging>(&format!(
            "SELECT {DISPOSAL_COLUMNS} FROM disposal_staging ORDER BY created_at ASC",
        ))
        .fetch_all(&self.pool)
        .await
        .context("Failed to list disposal staging")?;
        Ok(rows)
    }

    #[allow(clippy::too_many_arguments)]
    pub async fn record_disposal_details(
        &self,
        id: Uuid,
        purchase_value: Option<Decimal>,
        book_value: Option<Decimal>,
        inspection_date: Option<NaiveDate>,
        condemnation_date: Option<NaiveDate>,
        disposal_value: Option<Decimal>,
    ) -> Result<Option<DisposalStaging>> {
        let row = sqlx::query_as::<Postgres, DisposalStaging>(&format!(
            r#"
            UPDATE disposal_staging
            SET purchase_value = COALESCE($2, purchase_value),
                book_value = COALESCE($3, book_value),
                inspection_date = COALESCE($4, inspection_date),
                condemnation_date = COALESCE($5, condemnation_date),
                disposal_value = COALESCE($6, disposal_value),
                updated_at = now()
            WHERE id = $1
            RETURNING {DISPOSAL_COLUMNS}
            "#,
        ))
        .bind(id)
        .bind(purchase_value)
        .bind(book_value)
        .bind(inspection_date)
        .bind(condemnation_date)
        .bind(disposal_value)
        .fetch_optional(&self.pool)
        .await
        .context("Failed to record disposal details")?;
        Ok(row)
    }

    pub async fn take_disposal_tx(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        id: Uuid,
    ) -> Result<Option<DisposalStaging>> {
        let row = sqlx::query_as::<Postgres, DisposalStaging>(&format!(
            "DELETE FROM disposal_staging WHERE id = $1 RETURNING {DISPOSAL_COLUMNS}",
        ))
        .bind(id)
        .fetch_optional(&mut **tx)
        .await
        .context("Failed to take disposal staging")?;
        Ok(row)
    }

    pub async fn insert_disposed_tx(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        staging: &DisposalStaging,
    ) -> Result<DisposedAsset> {
        let row = sqlx::query_as::<Postgres, DisposedAsset>(
            r#"
            INSERT INTO disposed_assets (
                asset_id, asset_type, asset_category, item_name, item_ids, quantity, disposal_value
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING id, asset_id, asset_type, asset_category, item_name, item_ids,
                quantity, disposal_value, approved_at
            "#,
        )
        .bind(staging.asset_id)
        .bind(staging.asset_type)
        .bind(staging.asset_category)
        .bind(&staging.item_name)
        .bind(staging.item_ids.as_deref())
        .bind(staging.quantity)
        .bind(staging.disposal_value)
        .fetch_one(&mut **tx)
        .await
        .context("Failed to insert disposed asset")?;
        Ok(row)
    }

    // ----- Exchange -----

    pub async fn insert_exchange_tx(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        returned: &ReturnedAsset,
        exchange_quantity: i32,
    ) -> Result<ExchangeStaging> {
        let row = sqlx::query_as::<Postgres, ExchangeStaging>(&format!(
            r#"
            INSERT INTO exchange_staging (asset_id, asset_category, item_name, location, exchange_quantity, remark)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING {EXCHANGE_COLUMNS}
            "#,
        ))
        .bind(returned.asset_id)
        .bind(returned.asset_category)
        .bind(&returned.item_name)
        .bind(&returned.location)
        .bind(exchange_quantity)
        .bind(returned.remark.as_deref())
        .fetch_one(&mut **tx)
        .await
        .context("Failed to insert exchange staging")?;
        Ok(row)
    }

    pub async fn get_exchange(&self, id: Uuid) -> Result<Option<ExchangeStaging>> {
        let row = sqlx::query_as::<Postgres, ExchangeStaging>(&format!(
            "SELECT {EXCHANGE_COLUMNS} FROM exchange_staging WHERE id = $1",
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .context("Failed to get exchange staging")?;
        Ok(row)
    }

    pub async fn list_exchange(&self) -> Result<Vec<ExchangeStaging>> {
        let rows = sqlx::query_as::<Postgres, ExchangeStaging>(&format!(
            "SELECT {EXCHANGE_COLUMNS} FROM exchange_staging ORDER BY created_at ASC",
        ))
        .fetch_all(&self.pool)
        .await
        .context("Failed to list exchange staging")?;
        Ok(rows)
    }

    pub async fn take_exchange_tx(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        id: Uuid,
    ) -> Result<Option<ExchangeStaging>> {
        let row = sqlx::query_as::<Postgres, ExchangeStaging>(&format!(
            "DELETE FROM exchange_staging WHERE id = $1 RETURNING {EXCHANGE_COLUMNS}",
        ))
        .bind(id)
        .fetch_optional(&mut **tx)
        .await
        .context("Failed to take exchange staging")?;
        Ok(row)
    }

    pub async fn insert_exchanged_tx(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        staging: &ExchangeStaging,
        approved_date: NaiveDate,
    ) -> Result<ExchangedAsset> {
        let row = sqlx::query_as::<Postgres, ExchangedAsset>(
            r#"
            INSERT INTO exchanged_assets (asset_id, asset_category, item_name, exchange_quantity, approved_date)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, asset_id, asset_category, item_name, exchange_quantity, approved_date, approved_at
            "#,
        )
        .bind(staging.asset_id)
        .bind(staging.asset_category)
        .bind(&staging.item_name)
        .bind(staging.exchange_quantity)
        .bind(approved_date)
        .fetch_one(&mut **tx)
        .await
        .context("Failed to insert exchanged asset")?;
        Ok(row)
    }
}
