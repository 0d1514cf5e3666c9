use sqlx::PgPool;
use uuid::Uuid;

use crate::db::models::{EmployeeProgress, ProgressStatus, ProgressUpdate};
use crate::db::DatabaseError;

pub struct ProgressRepository;

impl ProgressRepository {
    /// Create-or-update keyed on the (user_id, module_id) uniqueness
    /// constraint. A concurrent insert race degrades into an update; absent
    /// fields keep the existing row's values.
    pub async fn upsert(
        pool: &PgPool,
        user_id: Uuid,
        module_id: Uuid,
        update: &ProgressUpdate,
    ) -> Result<EmployeeProgress, DatabaseError> {
        if update.completed_at.is_some() && update.status != Some(ProgressStatus::Completed) {
            return Err(DatabaseError::InvalidInput(
                "completed_at requires status = completed".to_string(),
            ));
        }

        let progress = sqlx::query_as::<_, EmployeeProgress>(
            r#"
            INSERT INTO employee_progress (user_id, module_id, status, last_viewed_page_id, completed_at)
            VALUES ($1, $2, COALESCE($3, 'not_started'::progress_status), $4, $5)
            ON CONFLICT (user_id, module_id) DO UPDATE SET
                status = COALESCE($3, employee_progress.status),
                last_viewed_page_id = COALESCE($4, employee_progress.last_viewed_page_id),
                completed_at = COALESCE($5, employee_progress.completed_at),
                updated_at = now()
            RETURNING id, user_id, module_id, status, last_viewed_page_id, completed_at,
                      created_at, updated_at
            "#,
        )
        .bind(user_id)
        .bind(module_id)
        .bind(update.status)
        .bind(update.last_viewed_page_id)
        .bind(update.completed_at)
        .fetch_one(pool)
        .await?;

        Ok(progress)
    }

    /// Idempotent completion stamp; creates the row when the learner never
    /// touched the module before completing it.
    pub async fn mark_completed(
        pool: &PgPool,
        user_id: Uuid,
        module_id: Uuid,
    ) -> Result<EmployeeProgress, DatabaseError> {
        let progress = sqlx::query_as::<_, EmployeeProgress>(
            r#"
            INSERT INTO employee_progress (user_id, module_id, status, completed_at)
            VALUES ($1, $2, 'completed', now())
            ON CONFLICT (user_id, module_id) DO UPDATE SET
                status = 'completed',
                completed_at = now(),
                updated_at = now()
            RETURNING id, user_id, module_id, status, last_viewed_page_id, completed_at,
                      created_at, updated_at
            "#,
        )
        .bind(user_id)
        .bind(module_id)
        .fetch_one(pool)
        .await?;

        Ok(progress)
    }

    pub async fn get(
        pool: &PgPool,
        user_id: Uuid,
        module_id: Uuid,
    ) -> Result<Option<EmployeeProgress>, DatabaseError> {
        let progress = sqlx::query_as::<_, EmployeeProgress>(
            r#"
            SELECT id, user_id, module_id, status, last_viewed_page_id, completed_at,
                   created_at, updated_at
            FROM employee_progress
            WHERE user_id = $1 AND module_id = $2
            "#,
        )
        .bind(user_id)
        .bind(module_id)
        .fetch_optional(pool)
        .await?;

        Ok(progress)
    }

    pub async fn list_for_user(
        pool: &PgPool,
        user_id: Uuid,
    ) -> Result<Vec<EmployeeProgress>, DatabaseError> {
        let rows = sqlx::query_as::<_, EmployeeProgress>(
            r#"
            SELECT id, user_id, module_id, status, last_viewed_page_id, completed_at,
                   created_at, updated_at
            FROM employee_progress
            WHERE user_id = $1
            ORDER BY updated_at DESC
            "#,
        )
        .bind(user_id)
        .fetch_all(pool)
        .await?;

        Ok(rows)
    }

    pub async fn list_all(pool: &PgPool) -> Result<Vec<EmployeeProgress>, DatabaseError> {
        let rows = sqlx::query_as::<_, EmployeeProgress>(
            r#"
            SELECT id, user_id, module_id, status, last_viewed_page_id, completed_at,
                   created_at, updated_at
            FROM employee_progress
            ORDER BY updated_at DESC
            "#,
        )
        .fetch_all(pool)
        .await?;

        Ok(rows)
    }

    /// (module_id, status) pairs feeding the summary computation.
    pub async fn status_by_module(
        pool: &PgPool,
        user_id: Uuid,
    ) -> Result<Vec<(Uuid, ProgressStatus)>, DatabaseError> {
        let rows: Vec<(Uuid, ProgressStatus)> = sqlx::query_as(
            r#"
            SELECT module_id, status
            FROM employee_progress
            WHERE user_id = $1
            "#,
        )
        .bind(user_id)
        .fetch_all(pool)
        .await?;

        Ok(rows)
    }

    /// Admin bulk reset: the only sanctioned delete path for progress rows.
    pub async fn delete_for_user(pool: &PgPool, user_id: Uuid) -> Result<u64, DatabaseError> {
        let result = sqlx::query("DELETE FROM employee_progress WHERE user_id = $1")
            .bind(user_id)
            .execute(pool)
            .await?;

        Ok(result.rows_affected())
    }
}
