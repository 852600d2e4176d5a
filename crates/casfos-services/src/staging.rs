//! Terminal-action approvals for the service, disposal, and exchange queues
//!
//! Approval finalizes the staging row into its historical table. Rejection
//! reverts service and disposal units to the returned queue with the remark;
//! a rejected exchange falls through to the disposal queue and never cycles
//! back. A disposal may also be cancelled by its submitter before approval,
//! which reverts without a remark.

use chrono::Utc;
use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;

use casfos_core::models::{
    DisposalStaging, DisposedAsset, ExchangeStaging, ExchangedAsset, ReturnCondition,
    ReturnedAsset, ServiceStaging, ServicedAsset,
};
use casfos_core::validation::validate_remark;
use casfos_core::AppError;
use casfos_db::{ReturnRepository, StagingRepository, StockRepository, TransactionGuard};

#[derive(Clone)]
pub struct StagingService {
    pool: PgPool,
    staging: StagingRepository,
    stock: StockRepository,
    returns: ReturnRepository,
}

impl StagingService {
    pub fn new(
        pool: PgPool,
        staging: StagingRepository,
        stock: StockRepository,
        returns: ReturnRepository,
    ) -> Self {
        Self {
            pool,
            staging,
            stock,
            returns,
        }
    }

    // ----- Service queue -----

    /// Storekeeper records the service details before admin sign-off.
    pub async fn record_service_details(
        &self,
        id: Uuid,
        service_no: &str,
        service_date: chrono::NaiveDate,
        service_amount: Decimal,
    ) -> Result<ServiceStaging, AppError> {
        if service_no.trim().is_empty() {
            return Err(AppError::InvalidInput(
                "Service number must not be empty".to_string(),
            ));
        }
        if service_amount < Decimal::ZERO {
            return Err(AppError::InvalidInput(
                "Service amount must not be negative".to_string(),
            ));
        }
        self.staging
            .record_service_details(id, service_no, service_date, service_amount)
            .await?
            .ok_or_else(|| AppError::NotFound("Service staging entry not found".to_string()))
    }

    /// Finalize a service into the historical record.
    pub async fn approve_service(&self, id: Uuid) -> Result<ServicedAsset, AppError> {
        let mut tx = TransactionGuard::begin(&self.pool).await?;

        let staging = self
            .staging
            .take_service_tx(&mut tx, id)
            .await?
            .ok_or_else(|| AppError::NotFound("Service staging entry not found".to_string()))?;

        let (service_no, service_date, service_amount) = match (
            staging.service_no.clone(),
            staging.service_date,
            staging.service_amount,
        ) {
            (Some(no), Some(date), Some(amount)) => (no, date, amount),
            _ => {
                return Err(AppError::BadRequest(
                    "Service details have not been recorded yet".to_string(),
                ));
            }
        };

        let serviced = self
            .staging
            .insert_serviced_tx(&mut tx, &staging, &service_no, service_date, service_amount)
            .await?;

        tx.commit().await?;
        tracing::info!(asset_id = %serviced.asset_id, "Service approved");
        Ok(serviced)
    }

    /// Reject a service: the unit goes back to the returned queue with the
    /// remark, still marked for service.
    pub async fn reject_service(&self, id: Uuid, remark: &str) -> Result<ReturnedAsset, AppError> {
        validate_remark(remark)?;

        let mut tx = TransactionGuard::begin(&self.pool).await?;

        let staging = self
            .staging
            .take_service_tx(&mut tx, id)
            .await?
            .ok_or_else(|| AppError::NotFound("Service staging entry not found".to_string()))?;

        let returned = self
            .returns
            .create_tx(
                &mut tx,
                staging.asset_id,
                staging.asset_type,
                staging.asset_category,
                &staging.item_name,
                &staging.location,
                staging.item_ids.as_deref(),
                None,
                ReturnCondition::Service,
                Some(remark),
                None,
            )
            .await?;

        tx.commit().await?;
        tracing::info!(asset_id = %staging.asset_id, "Service rejected, unit reverted to returns");
        Ok(returned)
    }

    pub async fn list_service(&self) -> Result<Vec<ServiceStaging>, AppError> {
        Ok(self.staging.list_service().await?)
    }

    // ----- Disposal queue -----

    #[allow(clippy::too_many_arguments)]
    pub async fn record_disposal_details(
        &self,
        id: Uuid,
        purchase_value: Option<Decimal>,
        book_value: Option<Decimal>,
        inspection_date: Option<chrono::NaiveDate>,
        condemnation_date: Option<chrono::NaiveDate>,
        disposal_value: Option<Decimal>,
    ) -> Result<DisposalStaging, AppError> {
        for (label, value) in [
            ("Purchase value", purchase_value),
            ("Book value", book_value),
            ("Disposal value", disposal_value),
        ] {
            if value.is_some_and(|v| v < Decimal::ZERO) {
                return Err(AppError::InvalidInput(format!(
                    "{} must not be negative",
                    label
                )));
            }
        }
        self.staging
            .record_disposal_details(
                id,
                purchase_value,
                book_value,
                inspection_date,
                condemnation_date,
                disposal_value,
            )
            .await?
            .ok_or_else(|| AppError::NotFound("Disposal staging entry not found".to_string()))
    }

    /// Finalize a disposal into the historical record.
    pub async fn approve_disposal(&self, id: Uuid) -> Result<DisposedAsset, AppError> {
        let mut tx = TransactionGuard::begin(&self.pool).await?;

        let staging = self
            .staging
            .take_disposal_tx(&mut tx, id)
            .await?
            .ok_or_else(|| AppError::NotFound("Disposal staging entry not found".to_string()))?;

        let disposed = self.staging.insert_disposed_tx(&mut tx, &staging).await?;

        tx.commit().await?;
        tracing::info!(asset_id = %disposed.asset_id, "Disposal approved");
        Ok(disposed)
    }

    /// Reject a disposal: the unit goes back to the returned queue with the
    /// remark, still marked for disposal.
    pub async fn reject_disposal(&self, id: Uuid, remark: &str) -> Result<ReturnedAsset, AppError> {
        validate_remark(remark)?;
        self.revert_disposal(id, Some(remark)).await
    }

    /// Pre-approval cancel by the submitter; reverts without a remark.
    pub async fn cancel_disposal(&self, id: Uuid) -> Result<ReturnedAsset, AppError> {
        self.revert_disposal(id, None).await
    }

    async fn revert_disposal(
        &self,
        id: Uuid,
        remark: Option<&str>,
    ) -> Result<ReturnedAsset, AppError> {
        let mut tx = TransactionGuard::begin(&self.pool).await?;

        let staging = self
            .staging
            .take_disposal_tx(&mut tx, id)
            .await?
            .ok_or_else(|| AppError::NotFound("Disposal staging entry not found".to_string()))?;

        let returned = self
            .returns
            .create_tx(
                &mut tx,
                staging.asset_id,
                staging.asset_type,
                staging.asset_category,
                &staging.item_name,
                &staging.location,
                staging.item_ids.as_deref(),
                staging.quantity,
                ReturnCondition::Dispose,
                remark,
                None,
            )
            .await?;

        tx.commit().await?;
        tracing::info!(asset_id = %staging.asset_id, "Disposal reverted to returns");
        Ok(returned)
    }

    pub async fn list_disposal(&self) -> Result<Vec<DisposalStaging>, AppError> {
        Ok(self.staging.list_disposal().await?)
    }

    // ----- Exchange queue -----

    /// Approve an exchange: the exchanged quantity re-enters store stock and
    /// the historical record is written.
    pub async fn approve_exchange(&self, id: Uuid) -> Result<ExchangedAsset, AppError> {
        let mut tx = TransactionGuard::begin(&self.pool).await?;

        let staging = self
            .staging
            .take_exchange_tx(&mut tx, id)
            .await?
            .ok_or_else(|| AppError::NotFound("Exchange staging entry not found".to_string()))?;

        self.stock
            .add_consumable_tx(
                &mut tx,
                staging.asset_category,
                &staging.item_name,
                staging.exchange_quantity,
            )
            .await?;
        let exchanged = self
            .staging
            .insert_exchanged_tx(&mut tx, &staging, Utc::now().date_naive())
            .await?;

        tx.commit().await?;
        tracing::info!(asset_id = %exchanged.asset_id, "Exchange approved");
        Ok(exchanged)
    }

    /// Reject an exchange: one-way fallback into the disposal queue, never
    /// back to the returned queue.
    pub async fn reject_exchange(&self, id: Uuid, remark: &str) -> Result<DisposalStaging, AppError> {
        validate_remark(remark)?;

        let mut tx = TransactionGuard::begin(&self.pool).await?;

        let staging = self
            .staging
            .take_exchange_tx(&mut tx, id)
            .await?
            .ok_or_else(|| AppError::NotFound("Exchange staging entry not found".to_string()))?;

        let disposal = self
            .staging
            .insert_disposal_from_exchange_tx(&mut tx, &staging, remark)
            .await?;

        tx.commit().await?;
        tracing::info!(asset_id = %staging.asset_id, "Exchange rejected, moved to disposal queue");
        Ok(disposal)
    }

    pub async fn list_exchange(&self) -> Result<Vec<ExchangeStaging>, AppError> {
        Ok(self.staging.list_exchange().await?)
    }
}
