//! Faculty repository
//!
//! Mirrors the asset purchase and update collections for faculty records:
//! pending_faculty -> faculties / rejected_faculties, plus
//! pending_faculty_updates for the edit-then-approve cycle.

use anyhow::{Context, Result};
use sqlx::{PgPool, Postgres, Transaction};
use uuid::Uuid;

use casfos_core::models::{FacultyDraft, FacultyRecord, PendingFacultyUpdate, RejectedFaculty};

const FACULTY_COLUMNS: &str = "id, faculty_type, name, cadre, year_of_allotment, \
     status_of_working, mobile_number, email, photograph_url, modules_handled, created_at, \
     updated_at";

const FACULTY_UPDATE_COLUMNS: &str = "id, faculty_id, original_data, updated_data, status, \
     rejection_remarks, created_at, updated_at";

#[derive(Clone)]
pub struct FacultyRepository {
    pool: PgPool,
}

impl FacultyRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create_pending(&self, draft: &FacultyDraft) -> Result<FacultyRecord> {
        let row = sqlx::query_as::<Postgres, FacultyRecord>(&format!(
            r#"
            INSERT INTO pending_faculty (
                faculty_type, name, cadre, year_of_allotment, status_of_working,
                mobile_number, email, photograph_url, modules_handled
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            RETURNING {FACULTY_COLUMNS}
            "#,
        ))
        .bind(draft.faculty_type)
        .bind(&draft.name)
        .bind(draft.cadre.as_deref())
        .bind(draft.year_of_allotment.as_deref())
        .bind(draft.status_of_working.as_deref())
        .bind(draft.mobile_number.as_deref())
        .bind(draft.email.as_deref())
        .bind(draft.photograph_url.as_deref())
        .bind(draft.modules_handled.as_deref())
        .fetch_one(&self.pool)
        .await
        .context("Failed to create pending faculty")?;
        Ok(row)
    }

    pub async fn list_pending(&self) -> Result<Vec<FacultyRecord>> {
        let rows = sqlx::query_as::<Postgres, FacultyRecord>(&format!(
            "SELECT {FACULTY_COLUMNS} FROM pending_faculty ORDER BY created_at ASC",
        ))
        .fetch_all(&self.pool)
        .await
        .context("Failed to list pending faculty")?;
        Ok(rows)
    }

    pub async fn take_pending_tx(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        id: Uuid,
    ) -> Result<Option<FacultyRecord>> {
        let row = sqlx::query_as::<Postgres, FacultyRecord>(&format!(
            "DELETE FROM pending_faculty WHERE id = $1 RETURNING {FACULTY_COLUMNS}",
        ))
        .bind(id)
        .fetch_optional(&mut **tx)
        .await
        .context("Failed to take pending faculty")?;
        Ok(row)
    }

    pub async fn insert_active_tx(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        record: &FacultyRecord,
    ) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO faculties (
                id, faculty_type, name, cadre, year_of_allotment, status_of_working,
                mobile_number, email, photograph_url, modules_handled, created_at, updated_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, now())
            "#,
        )
        .bind(record.id)
        .bind(record.faculty_type)
        .bind(&record.name)
        .bind(record.cadre.as_deref())
        .bind(record.year_of_allotment.as_deref())
        .bind(record.status_of_working.as_deref())
        .bind(record.mobile_number.as_deref())
        .bind(record.email.as_deref())
        .bind(record.photograph_url.as_deref())
        .bind(record.modules_handled.as_deref())
        .bind(record.created_at)
        .execute(&mut **tx)
        .await
        .context("Failed to insert active faculty")?;
        Ok(())
    }

    pub async fn insert_rejected_tx(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        record: &FacultyRecord,
        remark: &str,
    ) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO rejected_faculties (
                id, faculty_type, name, cadre, year_of_allotment, status_of_working,
                mobile_number, email, photograph_url, modules_handled, rejection_remarks
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            "#,
        )
        .bind(record.id)
        .bind(record.faculty_type)
        .bind(&record.name)
        .bind(record.cadre.as_deref())
        .bind(record.year_of_allotment.as_deref())
        .bind(record.status_of_working.as_deref())
        .bind(record.mobile_number.as_deref())
        .bind(record.email.as_deref())
        .bind(record.photograph_url.as_deref())
        .bind(record.modules_handled.as_deref())
        .bind(remark)
        .execute(&mut **tx)
        .await
        .context("Failed to insert rejected faculty")?;
        Ok(())
    }

    pub async fn get_active(&self, id: Uuid) -> Result<Option<FacultyRecord>> {
        let row = sqlx::query_as::<Postgres, FacultyRecord>(&format!(
            "SELECT {FACULTY_COLUMNS} FROM faculties WHERE id = $1",
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .context("Failed to get active faculty")?;
        Ok(row)
    }

    pub async fn list_active(&self, limit: i64, offset: i64) -> Result<Vec<FacultyRecord>> {
        let rows = sqlx::query_as::<Postgres, FacultyRecord>(&format!(
            "SELECT {FACULTY_COLUMNS} FROM faculties ORDER BY name ASC LIMIT $1 OFFSET $2",
        ))
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await
        .context("Failed to list active faculty")?;
        Ok(rows)
    }

    pub async fn list_rejected(&self) -> Result<Vec<RejectedFaculty>> {
        let rows = sqlx::query_as::<Postgres, RejectedFaculty>(
            r#"
            SELECT id, faculty_type, name, cadre, year_of_allotment, status_of_working,
                mobile_number, email, photograph_url, modules_handled, rejection_remarks, created_at
            FROM rejected_faculties
            ORDER BY created_at DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .context("Failed to list rejected faculty")?;
        Ok(rows)
    }

    /// Replace the body of an active faculty record with an approved draft.
    pub async fn replace_active_tx(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        id: Uuid,
        draft: &FacultyDraft,
    ) -> Result<bool> {
        let result = sqlx::query(
            r#"
            UPDATE faculties
            SET faculty_type = $2, name = $3, cadre = $4, year_of_allotment = $5,
                status_of_working = $6, mobile_number = $7, email = $8,
                photograph_url = $9, modules_handled = $10, updated_at = now()
            WHERE id = $1
            "#,
        )
        .bind(id)
        .bind(draft.faculty_type)
        .bind(&draft.name)
        .bind(draft.cadre.as_deref())
        .bind(draft.year_of_allotment.as_deref())
        .bind(draft.status_of_working.as_deref())
        .bind(draft.mobile_number.as_deref())
        .bind(draft.email.as_deref())
        .bind(draft.photograph_url.as_deref())
        .bind(draft.modules_handled.as_deref())
        .execute(&mut **tx)
        .await
        .context("Failed to replace active faculty")?;
        Ok(result.rows_affected() > 0)
    }

    // ----- Update cycle -----

    pub async fn create_update(
        &self,
        faculty_id: Uuid,
        original_data: &serde_json::Value,
        updated_data: &serde_json::Value,
    ) -> Result<PendingFacultyUpdate> {
        let row = sqlx::query_as::<Postgres, PendingFacultyUpdate>(&format!(
            r#"
            INSERT INTO pending_faculty_updates (faculty_id, original_data, updated_data, status)
            VALUES ($1, $2, $3, 'pending')
            RETURNING {FACULTY_UPDATE_COLUMNS}
            "#,
        ))
        .bind(faculty_id)
        .bind(original_data)
        .bind(updated_data)
        .fetch_one(&self.pool)
        .await
        .context("Failed to create pending faculty update")?;
        Ok(row)
    }

    pub async fn pending_update_exists(&self, faculty_id: Uuid) -> Result<bool> {
        let exists: (bool,) = sqlx::query_as(
            "SELECT EXISTS(SELECT 1 FROM pending_faculty_updates \
             WHERE faculty_id = $1 AND status = 'pending')",
        )
        .bind(faculty_id)
        .fetch_one(&self.pool)
        .await
        .context("Failed to check for outstanding faculty update")?;
        Ok(exists.0)
    }

    pub async fn get_update(&self, id: Uuid) -> Result<Option<PendingFacultyUpdate>> {
        let row = sqlx::query_as::<Postgres, PendingFacultyUpdate>(&format!(
            "SELECT {FACULTY_UPDATE_COLUMNS} FROM pending_faculty_updates WHERE id = $1",
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .context("Failed to get pending faculty update")?;
        Ok(row)
    }

    pub async fn list_pending_updates(&self) -> Result<Vec<PendingFacultyUpdate>> {
        let rows = sqlx::query_as::<Postgres, PendingFacultyUpdate>(&format!(
            "SELECT {FACULTY_UPDATE_COLUMNS} FROM pending_faculty_updates \
             WHERE status = 'pending' ORDER BY created_at ASC",
        ))
        .fetch_all(&self.pool)
        .await
        .context("Failed to list pending faculty updates")?;
        Ok(rows)
    }

    pub async fn mark_update_approved_tx(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        id: Uuid,
    ) -> Result<bool> {
        let result = sqlx::query(
            "UPDATE pending_faculty_updates SET status = 'approved', updated_at = now() \
             WHERE id = $1 AND status = 'pending'",
        )
        .bind(id)
        .execute(&mut **tx)
        .await
        .context("Failed to mark faculty update approved")?;
        Ok(result.rows_affected() > 0)
    }

    pub async fn mark_update_rejected(
        &self,
        id: Uuid,
        remark: &str,
    ) -> Result<Option<PendingFacultyUpdate>> {
        let row = sqlx::query_as::<Postgres, PendingFacultyUpdate>(&format!(
            r#"
            UPDATE pending_faculty_updates
            SET status = 'rejected', rejection_remarks = $2, updated_at = now()
            WHERE id = $1 AND status = 'pending'
            RETURNING {FACULTY_UPDATE_COLUMNS}
            "#,
        ))
        .bind(id)
        .bind(remark)
        .fetch_optional(&self.pool)
        .await
        .context("Failed to mark faculty update rejected")?;
        Ok(row)
    }

    pub async fn get_rejected_update(&self, id: Uuid) -> Result<Option<PendingFacultyUpdate>> {
        let row = sqlx::query_as::<Postgres, PendingFacultyUpdate>(&format!(
            "SELECT {FACULTY_UPDATE_COLUMNS} FROM pending_faculty_updates \
             WHERE id = $1 AND status = 'rejected'",
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .context("Failed to get rejected faculty update")?;
        Ok(row)
    }
}
