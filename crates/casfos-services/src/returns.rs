//! Return / condition-change / approval pipeline
//!
//! A returned unit carries one of four canonical conditions. The condition
//! may be overwritten freely until the admin approves; approval routes the
//! unit by its CURRENT condition into stock or one of the staging queues.
//! Rejection restores the unit to its source location holding.

use sqlx::PgPool;
use uuid::Uuid;

use casfos_core::models::{
    AssetCategory, AssetType, DisposalStaging, ExchangeStaging, ReturnCondition, ReturnedAsset,
    ServiceStaging,
};
use casfos_core::validation::validate_remark;
use casfos_core::AppError;
use casfos_db::{ReturnRepository, StagingRepository, StockRepository, TransactionGuard};

/// Return submission payload
#[derive(Debug, Clone)]
pub struct SubmitReturn {
    pub asset_id: Uuid,
    pub asset_type: AssetType,
    pub asset_category: AssetCategory,
    pub item_name: String,
    pub location: String,
    pub item_ids: Option<Vec<String>>,
    pub return_quantity: Option<i32>,
    pub condition: ReturnCondition,
    pub remark: Option<String>,
    pub receipt_photo_url: Option<String>,
}

/// Where an approved return ended up
#[derive(Debug)]
pub enum ReturnOutcome {
    ReturnedToStock,
    Service(ServiceStaging),
    Disposal(DisposalStaging),
    Exchange(ExchangeStaging),
}

impl ReturnOutcome {
    pub fn routed_to(&self) -> &'static str {
        match self {
            ReturnOutcome::ReturnedToStock => "stock",
            ReturnOutcome::Service(_) => "service",
            ReturnOutcome::Disposal(_) => "disposal",
            ReturnOutcome::Exchange(_) => "exchange",
        }
    }
}

#[derive(Clone)]
pub struct ReturnService {
    pool: PgPool,
    returns: ReturnRepository,
    stock: StockRepository,
    staging: StagingRepository,
}

impl ReturnService {
    pub fn new(
        pool: PgPool,
        returns: ReturnRepository,
        stock: StockRepository,
        staging: StagingRepository,
    ) -> Self {
        Self {
            pool,
            returns,
            stock,
            staging,
        }
    }

    fn validate_submission(submission: &SubmitReturn) -> Result<(), AppError> {
        match submission.asset_type {
            AssetType::Permanent => {
                if submission.condition == ReturnCondition::Exchange {
                    return Err(AppError::InvalidInput(
                        "Permanent assets cannot be returned for exchange".to_string(),
                    ));
                }
                let ids = submission
                    .item_ids
                    .as_ref()
                    .filter(|ids| !ids.is_empty())
                    .ok_or_else(|| {
                        AppError::InvalidInput(
                            "Permanent returns must list the item ids being returned".to_string(),
                        )
                    })?;
                let mut seen = std::collections::HashSet::new();
                for id in ids {
                    if !seen.insert(id) {
                        return Err(AppError::InvalidInput(format!(
                            "Duplicate item id in return: {}",
                            id
                        )));
                    }
                }
            }
            AssetType::Consumable => {
                let quantity = submission.return_quantity.ok_or_else(|| {
                    AppError::InvalidInput(
                        "Consumable returns must carry a return quantity".to_string(),
                    )
                })?;
                if quantity <= 0 {
                    return Err(AppError::InvalidInput(
                        "Return quantity must be positive".to_string(),
                    ));
                }
            }
        }
        Ok(())
    }

    /// Record a return: the unit leaves its source location holding and a
    /// returned_assets row is created with the reporter-observed condition.
    pub async fn submit(&self, submission: SubmitReturn) -> Result<ReturnedAsset, AppError> {
        Self::validate_submission(&submission)?;

        let mut tx = TransactionGuard::begin(&self.pool).await?;

        let holding = self
            .stock
            .get_holding_for_update_tx(
                &mut tx,
                submission.asset_category,
                &submission.item_name,
                &submission.location,
            )
            .await?
            .ok_or_else(|| {
                AppError::BadRequest(format!(
                    "Location '{}' does not hold '{}'",
                    submission.location, submission.item_name
                ))
            })?;

        match submission.asset_type {
            AssetType::Consumable => {
                let quantity = submission.return_quantity.unwrap_or(0);
                if holding.quantity < quantity {
                    return Err(AppError::BadRequest(format!(
                        "Location '{}' holds {} of '{}', cannot return {}",
                        submission.location, holding.quantity, submission.item_name, quantity
                    )));
                }
                self.stock
                    .update_holding_tx(
                        &mut tx,
                        holding.id,
                        holding.quantity - quantity,
                        holding.item_ids.as_deref(),
                    )
                    .await?;
            }
            AssetType::Permanent => {
                let returned_ids = submission.item_ids.as_deref().unwrap_or(&[]);
                let held_ids = holding.item_ids.clone().unwrap_or_default();
                for id in returned_ids {
                    if !held_ids.contains(id) {
                        return Err(AppError::BadRequest(format!(
                            "Item id '{}' is not held at location '{}'",
                            id, submission.location
                        )));
                    }
                }
                let remaining: Vec<String> = held_ids
                    .into_iter()
                    .filter(|id| !returned_ids.contains(id))
                    .collect();
                self.stock
                    .update_holding_tx(&mut tx, holding.id, remaining.len() as i32, Some(&remaining))
                    .await?;
            }
        }

        let returned = self
            .returns
            .create_tx(
                &mut tx,
                submission.asset_id,
                submission.asset_type,
                submission.asset_category,
                &submission.item_name,
                &submission.location,
                submission.item_ids.as_deref(),
                submission.return_quantity,
                submission.condition,
                submission.remark.as_deref(),
                submission.receipt_photo_url.as_deref(),
            )
            .await?;

        tx.commit().await?;
        tracing::info!(
            return_id = %returned.id,
            condition = %returned.condition,
            "Return submitted"
        );
        Ok(returned)
    }

    /// Overwrite the condition of a pending return. Accepts the canonical
    /// code or the display label; repeatable until approval.
    pub async fn update_condition(
        &self,
        id: Uuid,
        condition_input: &str,
        expected_type: Option<AssetType>,
    ) -> Result<ReturnedAsset, AppError> {
        let condition = ReturnCondition::parse(condition_input).ok_or_else(|| {
            AppError::InvalidInput(format!("Unknown condition: {}", condition_input))
        })?;

        let current = self
            .returns
            .get(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Returned asset not found".to_string()))?;

        if let Some(expected) = expected_type {
            if expected != current.asset_type {
                return Err(AppError::BadRequest(format!(
                    "Returned asset {} is {}, not {}",
                    id, current.asset_type, expected
                )));
            }
        }

        if current.asset_type == AssetType::Permanent && condition == ReturnCondition::Exchange {
            return Err(AppError::InvalidInput(
                "Permanent assets cannot be marked for exchange".to_string(),
            ));
        }
        if !current.condition.can_change_to(condition) {
            return Err(AppError::BadRequest(format!(
                "Condition cannot change from {} to {}",
                current.condition, condition
            )));
        }

        let updated = self
            .returns
            .set_condition(id, condition)
            .await?
            .ok_or_else(|| AppError::NotFound("Returned asset not found".to_string()))?;
        tracing::info!(return_id = %id, condition = %condition, "Return condition changed");
        Ok(updated)
    }

    /// Admin approval: route by the CURRENT stored condition and delete the
    /// returned row, all in one transaction.
    pub async fn approve(&self, id: Uuid) -> Result<ReturnOutcome, AppError> {
        let mut tx = TransactionGuard::begin(&self.pool).await?;

        let returned = self
            .returns
            .take_tx(&mut tx, id)
            .await?
            .ok_or_else(|| AppError::NotFound("Returned asset not found".to_string()))?;

        let outcome = match returned.condition {
            ReturnCondition::Good => {
                match returned.asset_type {
                    AssetType::Consumable => {
                        let quantity = returned.return_quantity.ok_or_else(|| {
                            AppError::Internal(
                                "Consumable return is missing its quantity".to_string(),
                            )
                        })?;
                        self.stock
                            .add_consumable_tx(
                                &mut tx,
                                returned.asset_category,
                                &returned.item_name,
                                quantity,
                            )
                            .await?;
                    }
                    AssetType::Permanent => {
                        let item_ids = returned.item_ids.clone().unwrap_or_default();
                        self.stock
                            .restock_permanent_tx(
                                &mut tx,
                                returned.asset_category,
                                &returned.item_name,
                                &item_ids,
                            )
                            .await?;
                    }
                }
                ReturnOutcome::ReturnedToStock
            }
            ReturnCondition::Service => {
                let staging = self.staging.insert_service_tx(&mut tx, &returned).await?;
                ReturnOutcome::Service(staging)
            }
            ReturnCondition::Dispose => {
                let staging = self.staging.insert_disposal_tx(&mut tx, &returned).await?;
                ReturnOutcome::Disposal(staging)
            }
            ReturnCondition::Exchange => {
                let quantity = returned.return_quantity.ok_or_else(|| {
                    AppError::Internal("Exchange return is missing its quantity".to_string())
                })?;
                let staging = self
                    .staging
                    .insert_exchange_tx(&mut tx, &returned, quantity)
                    .await?;
                ReturnOutcome::Exchange(staging)
            }
        };

        tx.commit().await?;
        tracing::info!(
            return_id = %id,
            routed_to = outcome.routed_to(),
            "Return approved"
        );
        Ok(outcome)
    }

    /// Admin rejection: restore the unit to its source location holding and
    /// record the remark.
    pub async fn reject(&self, id: Uuid, remark: &str) -> Result<ReturnedAsset, AppError> {
        validate_remark(remark)?;

        let mut tx = TransactionGuard::begin(&self.pool).await?;

        let returned = self
            .returns
            .take_tx(&mut tx, id)
            .await?
            .ok_or_else(|| AppError::NotFound("Returned asset not found".to_string()))?;

        let quantity = match returned.asset_type {
            AssetType::Consumable => returned.return_quantity.unwrap_or(0),
            AssetType::Permanent => {
                returned.item_ids.as_ref().map(|ids| ids.len()).unwrap_or(0) as i32
            }
        };
        self.stock
            .add_holding_tx(
                &mut tx,
                returned.asset_category,
                returned.asset_type,
                &returned.item_name,
                &returned.location,
                quantity,
                returned.item_ids.as_deref(),
            )
            .await?;
        self.returns
            .insert_rejection_tx(&mut tx, &returned, remark)
            .await?;

        tx.commit().await?;
        tracing::info!(return_id = %id, "Return rejected, unit restored to location");
        Ok(returned)
    }

    pub async fn list(&self) -> Result<Vec<ReturnedAsset>, AppError> {
        Ok(self.returns.list().await?)
    }

    pub async fn get(&self, id: Uuid) -> Result<ReturnedAsset, AppError> {
        self.returns
            .get(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Returned asset not found".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn submission(asset_type: AssetType, condition: ReturnCondition) -> SubmitReturn {
        SubmitReturn {
            asset_id: Uuid::new_v4(),
            asset_type,
            asset_category: AssetCategory::Instruments,
            item_name: "Projector".to_string(),
            location: "Lecture Hall".to_string(),
            item_ids: match asset_type {
                AssetType::Permanent => Some(vec!["P-1".to_string()]),
                AssetType::Consumable => None,
            },
            return_quantity: match asset_type {
                AssetType::Permanent => None,
                AssetType::Consumable => Some(5),
            },
            condition,
            remark: None,
            receipt_photo_url: None,
        }
    }

    #[test]
    fn test_permanent_exchange_rejected() {
        let s = submission(AssetType::Permanent, ReturnCondition::Exchange);
        assert!(matches!(
            ReturnService::validate_submission(&s),
            Err(AppError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_permanent_requires_item_ids() {
        let mut s = submission(AssetType::Permanent, ReturnCondition::Good);
        s.item_ids = None;
        assert!(ReturnService::validate_submission(&s).is_err());

        s.item_ids = Some(vec![]);
        assert!(ReturnService::validate_submission(&s).is_err());
    }

    #[test]
    fn test_permanent_duplicate_item_ids_rejected() {
        let mut s = submission(AssetType::Permanent, ReturnCondition::Good);
        s.item_ids = Some(vec!["P-1".to_string(), "P-1".to_string()]);
        assert!(ReturnService::validate_submission(&s).is_err());
    }

    #[test]
    fn test_consumable_requires_positive_quantity() {
        let mut s = submission(AssetType::Consumable, ReturnCondition::Good);
        s.return_quantity = Some(0);
        assert!(ReturnService::validate_submission(&s).is_err());

        s.return_quantity = None;
        assert!(ReturnService::validate_submission(&s).is_err());
    }

    #[test]
    fn test_consumable_exchange_allowed() {
        let s = submission(AssetType::Consumable, ReturnCondition::Exchange);
        assert!(ReturnService::validate_submission(&s).is_ok());
    }
}
