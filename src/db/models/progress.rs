use serde::{Deserialize, Serialize};
use sqlx::types::Uuid;
use time::OffsetDateTime;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, sqlx::Type, Serialize, Deserialize)]
#[sqlx(type_name = "progress_status", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum ProgressStatus {
    NotStarted,
    InProgress,
    Completed,
}

#[derive(Debug, Clone, sqlx::FromRow, Serialize, Deserialize)]
pub struct EmployeeProgress {
    pub id: Uuid,
    pub user_id: Uuid,
    pub module_id: Uuid,
    pub status: ProgressStatus,
    pub last_viewed_page_id: Option<Uuid>,
    pub completed_at: Option<OffsetDateTime>,
    pub created_at: OffsetDateTime,
    pub updated_at: OffsetDateTime,
}

/// Partial fields applied by the progress upsert; absent fields keep the
/// existing row's values.
#[derive(Debug, Default, Deserialize)]
pub struct ProgressUpdate {
    pub status: Option<ProgressStatus>,
    pub last_viewed_page_id: Option<Uuid>,
    pub completed_at: Option<OffsetDateTime>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProgressSummary {
    pub total_modules: usize,
    pub completed_modules: usize,
    pub in_progress_modules: usize,
    pub not_started_modules: usize,
    pub overall_completion_rate: i32,
}
