//! Faculty lifecycle: the asset pattern applied to faculty records
//!
//! Pending -> active/rejected on first approval, plus the edit-then-approve
//! cycle with the same single-outstanding-update guard and rejected-lookup
//! resubmission path.

use sqlx::PgPool;
use uuid::Uuid;

use casfos_core::diff::{diff_records, RecordDiff};
use casfos_core::models::{
    ApprovalStatus, FacultyDraft, FacultyRecord, PendingFacultyUpdate, RejectedFaculty,
};
use casfos_core::validation::validate_remark;
use casfos_core::AppError;
use casfos_db::{FacultyRepository, TransactionGuard};

/// Result of approving a faculty update
#[derive(Debug)]
pub struct FacultyUpdateApproval {
    pub update_id: Uuid,
    pub faculty: FacultyRecord,
    pub changes: RecordDiff,
}

#[derive(Clone)]
pub struct FacultyService {
    pool: PgPool,
    faculty: FacultyRepository,
}

impl FacultyService {
    pub fn new(pool: PgPool, faculty: FacultyRepository) -> Self {
        Self { pool, faculty }
    }

    fn validate_draft(draft: &FacultyDraft) -> Result<(), AppError> {
        if draft.name.trim().is_empty() {
            return Err(AppError::InvalidInput(
                "Faculty name must not be empty".to_string(),
            ));
        }
        if let Some(ref mobile) = draft.mobile_number {
            if !mobile.chars().all(|c| c.is_ascii_digit()) || mobile.len() != 10 {
                return Err(AppError::InvalidInput(
                    "Mobile number must be 10 digits".to_string(),
                ));
            }
        }
        Ok(())
    }

    pub async fn submit(&self, draft: FacultyDraft) -> Result<FacultyRecord, AppError> {
        Self::validate_draft(&draft)?;
        let record = self.faculty.create_pending(&draft).await?;
        tracing::info!(faculty_id = %record.id, "Faculty submitted for approval");
        Ok(record)
    }

    pub async fn approve(&self, id: Uuid) -> Result<FacultyRecord, AppError> {
        let mut tx = TransactionGuard::begin(&self.pool).await?;

        let record = self
            .faculty
            .take_pending_tx(&mut tx, id)
            .await?
            .ok_or_else(|| AppError::NotFound("Pending faculty not found".to_string()))?;
        self.faculty.insert_active_tx(&mut tx, &record).await?;

        tx.commit().await?;
        tracing::info!(faculty_id = %record.id, "Faculty approved");
        Ok(record)
    }

    pub async fn reject(&self, id: Uuid, remark: &str) -> Result<FacultyRecord, AppError> {
        validate_remark(remark)?;

        let mut tx = TransactionGuard::begin(&self.pool).await?;

        let record = self
            .faculty
            .take_pending_tx(&mut tx, id)
            .await?
            .ok_or_else(|| AppError::NotFound("Pending faculty not found".to_string()))?;
        self.faculty
            .insert_rejected_tx(&mut tx, &record, remark)
            .await?;

        tx.commit().await?;
        tracing::info!(faculty_id = %record.id, "Faculty rejected");
        Ok(record)
    }

    // ----- Update cycle -----

    pub async fn propose_update(
        &self,
        faculty_id: Uuid,
        original_data: serde_json::Value,
        updated_data: serde_json::Value,
    ) -> Result<PendingFacultyUpdate, AppError> {
        self.faculty
            .get_active(faculty_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Faculty not found".to_string()))?;

        if self.faculty.pending_update_exists(faculty_id).await? {
            return Err(AppError::Conflict(
                "A pending update already exists for this faculty record".to_string(),
            ));
        }

        let draft: FacultyDraft = serde_json::from_value(updated_data.clone()).map_err(|e| {
            AppError::InvalidInput(format!("Updated data is not a valid faculty body: {}", e))
        })?;
        Self::validate_draft(&draft)?;

        let update = self
            .faculty
            .create_update(faculty_id, &original_data, &updated_data)
            .await?;
        tracing::info!(update_id = %update.id, faculty_id = %faculty_id, "Faculty update proposed");
        Ok(update)
    }

    pub async fn approve_update(&self, id: Uuid) -> Result<FacultyUpdateApproval, AppError> {
        let update = self
            .faculty
            .get_update(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Pending faculty update not found".to_string()))?;
        if update.status != ApprovalStatus::Pending {
            return Err(AppError::BadRequest(
                "Update has already been resolved".to_string(),
            ));
        }

        let changes = diff_records(&update.original_data, &update.updated_data);
        let draft: FacultyDraft = serde_json::from_value(update.updated_data.clone())
            .map_err(|e| AppError::Internal(format!("Stored update payload is not applicable: {}", e)))?;

        let mut tx = TransactionGuard::begin(&self.pool).await?;

        let replaced = self
            .faculty
            .replace_active_tx(&mut tx, update.faculty_id, &draft)
            .await?;
        if !replaced {
            return Err(AppError::NotFound("Faculty not found".to_string()));
        }
        let marked = self.faculty.mark_update_approved_tx(&mut tx, id).await?;
        if !marked {
            return Err(AppError::Conflict(
                "Update was resolved concurrently".to_string(),
            ));
        }

        tx.commit().await?;

        let faculty = self
            .faculty
            .get_active(update.faculty_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Faculty not found".to_string()))?;

        tracing::info!(update_id = %id, faculty_id = %update.faculty_id, "Faculty update approved");
        Ok(FacultyUpdateApproval {
            update_id: id,
            faculty,
            changes,
        })
    }

    pub async fn reject_update(
        &self,
        id: Uuid,
        remark: &str,
    ) -> Result<PendingFacultyUpdate, AppError> {
        validate_remark(remark)?;
        let update = self
            .faculty
            .mark_update_rejected(id, remark)
            .await?
            .ok_or_else(|| AppError::NotFound("Pending faculty update not found".to_string()))?;
        tracing::info!(update_id = %id, "Faculty update rejected");
        Ok(update)
    }

    /// Rejected-update lookup for resubmission; the active record is located
    /// by `faculty_id`, and its absence is fatal to the resubmission.
    pub async fn rejected_update_for_resubmission(
        &self,
        rejected_id: Uuid,
    ) -> Result<(PendingFacultyUpdate, FacultyRecord), AppError> {
        let update = self
            .faculty
            .get_rejected_update(rejected_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Rejected update not found".to_string()))?;

        let faculty = self
            .faculty
            .get_active(update.faculty_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Faculty not found".to_string()))?;

        Ok((update, faculty))
    }

    // ----- Reads -----

    pub async fn list_pending(&self) -> Result<Vec<FacultyRecord>, AppError> {
        Ok(self.faculty.list_pending().await?)
    }

    pub async fn list_active(&self, limit: i64, offset: i64) -> Result<Vec<FacultyRecord>, AppError> {
        Ok(self.faculty.list_active(limit, offset).await?)
    }

    pub async fn list_rejected(&self) -> Result<Vec<RejectedFaculty>, AppError> {
        Ok(self.faculty.list_rejected().await?)
    }

    pub async fn list_pending_updates(&self) -> Result<Vec<PendingFacultyUpdate>, AppError> {
        Ok(self.faculty.list_pending_updates().await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use casfos_core::models::FacultyType;

    fn draft() -> FacultyDraft {
        FacultyDraft {
            faculty_type: FacultyType::Internal,
            name: "R. Kumar".to_string(),
            cadre: Some("IFS".to_string()),
            year_of_allotment: Some("2010".to_string()),
            status_of_working: None,
            mobile_number: Some("9876543210".to_string()),
            email: None,
            photograph_url: None,
            modules_handled: None,
        }
    }

    #[test]
    fn test_validate_draft_ok() {
        assert!(FacultyService::validate_draft(&draft()).is_ok());
    }

    #[test]
    fn test_validate_draft_rejects_empty_name() {
        let mut d = draft();
        d.name = "  ".to_string();
        assert!(FacultyService::validate_draft(&d).is_err());
    }

    #[test]
    fn test_validate_draft_rejects_bad_mobile() {
        let mut d = draft();
        d.mobile_number = Some("12345".to_string());
        assert!(FacultyService::validate_draft(&d).is_err());

        d.mobile_number = Some("98765abc10".to_string());
        assert!(FacultyService::validate_draft(&d).is_err());
    }
}
