//! Validation for uploaded files and submission payloads

use std::path::Path;

use rust_decimal::Decimal;

use crate::error::AppError;
use crate::models::{AssetDraft, AssetType};

/// Validation errors for uploaded files
#[derive(Debug, thiserror::Error)]
pub enum ValidationError {
    #[error("File too large: {size} bytes (max: {max} bytes)")]
    FileTooLarge { size: usize, max: usize },

    #[error("Invalid file extension: {extension} (allowed: {allowed:?})")]
    InvalidExtension {
        extension: String,
        allowed: Vec<String>,
    },

    #[error("Invalid content type: {content_type} (allowed: {allowed:?})")]
    InvalidContentType {
        content_type: String,
        allowed: Vec<String>,
    },

    #[error("Invalid filename: {0}")]
    InvalidFilename(String),

    #[error("Empty file")]
    EmptyFile,
}

/// Upload file validator
///
/// Checks size, extension, and content type, plus a cross-check that the
/// declared content type matches the file extension.
pub struct UploadValidator {
    max_file_size: usize,
    allowed_extensions: Vec<String>,
    allowed_content_types: Vec<String>,
}

impl UploadValidator {
    pub fn new(
        max_file_size: usize,
        allowed_extensions: Vec<String>,
        allowed_content_types: Vec<String>,
    ) -> Self {
        Self {
            max_file_size,
            allowed_extensions,
            allowed_content_types,
        }
    }

    pub fn validate_file_size(&self, size: usize) -> Result<(), ValidationError> {
        if size == 0 {
            return Err(ValidationError::EmptyFile);
        }

        if size > self.max_file_size {
            return Err(ValidationError::FileTooLarge {
                size,
                max: self.max_file_size,
            });
        }

        Ok(())
    }

    pub fn validate_extension(&self, filename: &str) -> Result<(), ValidationError> {
        let extension = Path::new(filename)
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_lowercase())
            .ok_or_else(|| ValidationError::InvalidFilename(filename.to_string()))?;

        if !self.allowed_extensions.contains(&extension) {
            return Err(ValidationError::InvalidExtension {
                extension,
                allowed: self.allowed_extensions.clone(),
            });
        }

        Ok(())
    }

    pub fn validate_content_type(&self, content_type: &str) -> Result<(), ValidationError> {
        let normalized = content_type.to_lowercase();

        if !self
            .allowed_content_types
            .iter()
            .any(|ct| ct == &normalized)
        {
            return Err(ValidationError::InvalidContentType {
                content_type: content_type.to_string(),
                allowed: self.allowed_content_types.clone(),
            });
        }

        Ok(())
    }

    /// Cross-check that the declared Content-Type matches the file extension,
    /// preventing content-type spoofing.
    pub fn validate_extension_content_type_match(
        &self,
        filename: &str,
        content_type: &str,
    ) -> Result<(), ValidationError> {
        let extension = Path::new(filename)
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_lowercase())
            .ok_or_else(|| ValidationError::InvalidFilename(filename.to_string()))?;

        let normalized_content_type = content_type.to_lowercase();

        let expected_content_types: Vec<&str> = match extension.as_str() {
            "jpg" | "jpeg" => vec!["image/jpeg"],
            "png" => vec!["image/png"],
            "pdf" => vec!["application/pdf"],
            _ => {
                tracing::debug!(
                    extension = %extension,
                    content_type = %content_type,
                    "Unknown extension, skipping Content-Type/extension cross-validation"
                );
                return Ok(());
            }
        };

        if !expected_content_types
            .iter()
            .any(|ct| ct == &normalized_content_type)
        {
            return Err(ValidationError::InvalidContentType {
                content_type: format!(
                    "{} (does not match extension '{}'. Expected one of: {})",
                    content_type,
                    extension,
                    expected_content_types.join(", ")
                ),
                allowed: self.allowed_content_types.clone(),
            });
        }

        Ok(())
    }

    /// Validate all aspects of a file
    pub fn validate_all(
        &self,
        filename: &str,
        content_type: &str,
        file_size: usize,
    ) -> Result<(), ValidationError> {
        self.validate_file_size(file_size)?;
        self.validate_extension(filename)?;
        self.validate_content_type(content_type)?;
        self.validate_extension_content_type_match(filename, content_type)?;
        Ok(())
    }
}

/// Require a non-empty, non-whitespace rejection remark.
/// Every reject transition in the engine goes through this check.
pub fn validate_remark(remark: &str) -> Result<(), AppError> {
    if remark.trim().is_empty() {
        return Err(AppError::InvalidInput(
            "Rejection remarks must not be empty".to_string(),
        ));
    }
    Ok(())
}

/// Field-level checks on a purchase submission.
///
/// The client validates forms; the engine re-validates the pieces the
/// workflow depends on: at least one item, positive quantities, price
/// arithmetic, and item-id counts consistent with the asset type.
pub fn validate_asset_draft(draft: &AssetDraft) -> Result<(), AppError> {
    if draft.supplier_name.trim().is_empty() {
        return Err(AppError::InvalidInput(
            "Supplier name must not be empty".to_string(),
        ));
    }
    if draft.items.is_empty() {
        return Err(AppError::InvalidInput(
            "A purchase must contain at least one item".to_string(),
        ));
    }

    for (index, item) in draft.items.iter().enumerate() {
        if item.item_name.trim().is_empty() {
            return Err(AppError::InvalidInput(format!(
                "Item {}: item name must not be empty",
                index
            )));
        }
        if item.quantity_received <= 0 {
            return Err(AppError::InvalidInput(format!(
                "Item '{}': quantity received must be positive",
                item.item_name
            )));
        }
        if item.unit_price < Decimal::ZERO {
            return Err(AppError::InvalidInput(format!(
                "Item '{}': unit price must not be negative",
                item.item_name
            )));
        }
        let expected_total = item.unit_price * Decimal::from(item.quantity_received);
        if item.total_price != expected_total {
            return Err(AppError::InvalidInput(format!(
                "Item '{}': total price {} does not match quantity x unit price {}",
                item.item_name, item.total_price, expected_total
            )));
        }
        match draft.asset_type {
            AssetType::Permanent => {
                if let Some(ref ids) = item.item_ids {
                    if ids.len() != item.quantity_received as usize {
                        return Err(AppError::InvalidInput(format!(
                            "Item '{}': {} item ids provided for quantity {}",
                            item.item_name,
                            ids.len(),
                            item.quantity_received
                        )));
                    }
                }
            }
            AssetType::Consumable => {
                if item.item_ids.as_ref().is_some_and(|ids| !ids.is_empty()) {
                    return Err(AppError::InvalidInput(format!(
                        "Item '{}': consumable items do not carry item ids",
                        item.item_name
                    )));
                }
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{AssetCategory, AssetItem};
    use chrono::NaiveDate;

    fn test_validator() -> UploadValidator {
        UploadValidator::new(
            5 * 1024 * 1024,
            vec![
                "pdf".to_string(),
                "jpg".to_string(),
                "jpeg".to_string(),
                "png".to_string(),
            ],
            vec![
                "application/pdf".to_string(),
                "image/jpeg".to_string(),
                "image/png".to_string(),
            ],
        )
    }

    fn test_draft() -> AssetDraft {
        AssetDraft {
            asset_type: AssetType::Consumable,
            asset_category: AssetCategory::Instruments,
            entry_date: NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
            purchase_date: NaiveDate::from_ymd_opt(2024, 2, 20).unwrap(),
            supplier_name: "Forest Supplies Ltd".to_string(),
            supplier_address: None,
            source: None,
            mode_of_purchase: None,
            bill_no: None,
            bill_photo_url: None,
            received_by: None,
            items: vec![AssetItem {
                item_name: "Pen".to_string(),
                sub_category: None,
                item_description: None,
                quantity_received: 10,
                unit_price: Decimal::new(500, 2),
                total_price: Decimal::new(5000, 2),
                item_ids: None,
                amc_from: None,
                amc_to: None,
                warranty_number: None,
                warranty_valid_upto: None,
                item_photo_url: None,
            }],
        }
    }

    #[test]
    fn test_validate_all_accepts_pdf() {
        let validator = test_validator();
        assert!(validator
            .validate_all("bill.pdf", "application/pdf", 1024)
            .is_ok());
    }

    #[test]
    fn test_validate_all_accepts_jpeg_and_png() {
        let validator = test_validator();
        assert!(validator
            .validate_all("photo.jpg", "image/jpeg", 2048)
            .is_ok());
        assert!(validator
            .validate_all("photo.jpeg", "image/jpeg", 2048)
            .is_ok());
        assert!(validator
            .validate_all("photo.PNG", "image/png", 2048)
            .is_ok());
    }

    #[test]
    fn test_validate_rejects_oversized_file() {
        let validator = test_validator();
        assert!(matches!(
            validator.validate_file_size(6 * 1024 * 1024),
            Err(ValidationError::FileTooLarge { .. })
        ));
    }

    #[test]
    fn test_validate_rejects_empty_file() {
        let validator = test_validator();
        assert!(matches!(
            validator.validate_file_size(0),
            Err(ValidationError::EmptyFile)
        ));
    }

    #[test]
    fn test_validate_rejects_unexpected_mime() {
        let validator = test_validator();
        assert!(validator.validate_content_type("image/gif").is_err());
        assert!(validator
            .validate_all("doc.docx", "application/msword", 1024)
            .is_err());
    }

    #[test]
    fn test_validate_rejects_spoofed_content_type() {
        let validator = test_validator();
        // Declared PDF, but the extension says JPEG
        assert!(validator
            .validate_extension_content_type_match("photo.jpg", "application/pdf")
            .is_err());
    }

    #[test]
    fn test_validate_remark() {
        assert!(validate_remark("bad address").is_ok());
        assert!(validate_remark("").is_err());
        assert!(validate_remark("   ").is_err());
    }

    #[test]
    fn test_validate_asset_draft_ok() {
        assert!(validate_asset_draft(&test_draft()).is_ok());
    }

    #[test]
    fn test_validate_asset_draft_rejects_empty_items() {
        let mut draft = test_draft();
        draft.items.clear();
        assert!(validate_asset_draft(&draft).is_err());
    }

    #[test]
    fn test_validate_asset_draft_rejects_price_mismatch() {
        let mut draft = test_draft();
        draft.items[0].total_price = Decimal::new(4200, 2);
        assert!(validate_asset_draft(&draft).is_err());
    }

    #[test]
    fn test_validate_asset_draft_rejects_item_id_count_mismatch() {
        let mut draft = test_draft();
        draft.asset_type = AssetType::Permanent;
        draft.items[0].item_ids = Some(vec!["P-1".to_string()]);
        assert!(validate_asset_draft(&draft).is_err());
    }

    #[test]
    fn test_validate_asset_draft_rejects_consumable_with_item_ids() {
        let mut draft = test_draft();
        draft.items[0].item_ids = Some(vec!["C-1".to_string()]);
        assert!(validate_asset_draft(&draft).is_err());
    }
}
