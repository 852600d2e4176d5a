//! Store stock and location holding repository
//!
//! Quantity math for withdrawals is computed by the services layer; this
//! repository only reads rows (FOR UPDATE inside a transaction) and writes
//! the adjusted values back.

use anyhow::{Context, Result};
use sqlx::{PgPool, Postgres, Transaction};

use casfos_core::models::{AssetCategory, AssetType, ConsumableStock, LocationHolding};

const HOLDING_COLUMNS: &str = "id, asset_category, asset_type, item_name, location, quantity, \
     item_ids, updated_at";

#[derive(Clone)]
pub struct StockRepository {
    pool: PgPool,
}

impl StockRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Add quantity to the store stock counter for a consumable item.
    pub async fn add_consumable_tx(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        asset_category: AssetCategory,
        item_name: &str,
        quantity: i32,
    ) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO consumable_stock (asset_category, item_name, quantity)
            VALUES ($1, $2, $3)
            ON CONFLICT (asset_category, item_name)
            DO UPDATE SET quantity = consumable_stock.quantity + EXCLUDED.quantity,
                          updated_at = now()
            "#,
        )
        .bind(asset_category)
        .bind(item_name)
        .bind(quantity)
        .execute(&mut **tx)
        .await
        .context("Failed to add consumable stock")?;
        Ok(())
    }

    pub async fn get_consumable(
        &self,
        asset_category: AssetCategory,
        item_name: &str,
    ) -> Result<Option<ConsumableStock>> {
        let row = sqlx::query_as::<Postgres, ConsumableStock>(
            "SELECT id, asset_category, item_name, quantity, updated_at \
             FROM consumable_stock WHERE asset_category = $1 AND item_name = $2",
        )
        .bind(asset_category)
        .bind(item_name)
        .fetch_optional(&self.pool)
        .await
        .context("Failed to get consumable stock")?;
        Ok(row)
    }

    /// Re-enter permanent item ids into the in-stock set.
    pub async fn restock_permanent_tx(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        asset_category: AssetCategory,
        item_name: &str,
        item_ids: &[String],
    ) -> Result<()> {
        for item_id in item_ids {
            sqlx::query(
                r#"
                INSERT INTO permanent_stock_items (asset_category, item_name, item_id, in_stock)
                VALUES ($1, $2, $3, true)
                ON CONFLICT (item_id)
                DO UPDATE SET in_stock = true, updated_at = now()
                "#,
            )
            .bind(asset_category)
            .bind(item_name)
            .bind(item_id)
            .execute(&mut **tx)
            .await
            .context("Failed to restock permanent item")?;
        }
        Ok(())
    }

    pub async fn count_permanent_in_stock(
        &self,
        asset_category: AssetCategory,
        item_name: &str,
    ) -> Result<i64> {
        let count: (i64,) = sqlx::query_as(
            "SELECT COUNT(*) FROM permanent_stock_items \
             WHERE asset_category = $1 AND item_name = $2 AND in_stock",
        )
        .bind(asset_category)
        .bind(item_name)
        .fetch_one(&self.pool)
        .await
        .context("Failed to count permanent stock")?;
        Ok(count.0)
    }

    /// Fetch a location holding row, locked for the current transaction.
    pub async fn get_holding_for_update_tx(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        asset_category: AssetCategory,
        item_name: &str,
        location: &str,
    ) -> Result<Option<LocationHolding>> {
        let row = sqlx::query_as::<Postgres, LocationHolding>(&format!(
            "SELECT {HOLDING_COLUMNS} FROM location_holdings \
             WHERE asset_category = $1 AND item_name = $2 AND location = $3 FOR UPDATE",
        ))
        .bind(asset_category)
        .bind(item_name)
        .bind(location)
        .fetch_optional(&mut **tx)
        .await
        .context("Failed to get location holding")?;
        Ok(row)
    }

    pub async fn get_holding(
        &self,
        asset_category: AssetCategory,
        item_name: &str,
        location: &str,
    ) -> Result<Option<LocationHolding>> {
        let row = sqlx::query_as::<Postgres, LocationHolding>(&format!(
            "SELECT {HOLDING_COLUMNS} FROM location_holdings \
             WHERE asset_category = $1 AND item_name = $2 AND location = $3",
        ))
        .bind(asset_category)
        .bind(item_name)
        .bind(location)
        .fetch_optional(&self.pool)
        .await
        .context("Failed to get location holding")?;
        Ok(row)
    }

    /// Write back an adjusted holding (quantity and, for permanent items,
    /// the remaining item ids).
    pub async fn update_holding_tx(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        id: uuid::Uuid,
        quantity: i32,
        item_ids: Option<&[String]>,
    ) -> Result<()> {
        sqlx::query(
            "UPDATE location_holdings SET quantity = $2, item_ids = $3, updated_at = now() \
             WHERE id = $1",
        )
        .bind(id)
        .bind(quantity)
        .bind(item_ids)
        .execute(&mut **tx)
        .await
        .context("Failed to update location holding")?;
        Ok(())
    }

    /// Add quantity (and item ids) to a location holding, creating the row
    /// if the location does not hold this item yet.
    #[allow(clippy::too_many_arguments)]
    pub async fn add_holding_tx(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        asset_category: AssetCategory,
        asset_type: AssetType,
        item_name: &str,
        location: &str,
        quantity: i32,
        item_ids: Option<&[String]>,
    ) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO location_holdings (asset_category, asset_type, item_name, location, quantity, item_ids)
            VALUES ($1, $2, $3, $4, $5, $6)
            ON CONFLICT (asset_category, item_name, location)
            DO UPDATE SET quantity = location_holdings.quantity + EXCLUDED.quantity,
                          item_ids = COALESCE(location_holdings.item_ids, ARRAY[]::TEXT[])
                                     || COALESCE(EXCLUDED.item_ids, ARRAY[]::TEXT[]),
                          updated_at = now()
            "#,
        )
        .bind(asset_category)
        .bind(asset_type)
        .bind(item_name)
        .bind(location)
        .bind(quantity)
        .bind(item_ids)
        .execute(&mut **tx)
        .await
        .context("Failed to add location holding")?;
        Ok(())
    }
}
