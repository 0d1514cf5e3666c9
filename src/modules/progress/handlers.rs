use axum::{
    extract::{Path, State},
    Json,
};
use serde::Deserialize;
use tower_sessions::Session;
use uuid::Uuid;

use super::summary::summarize;
use crate::app_state::AppState;
use crate::db::models::{EmployeeProgress, ProgressSummary, ProgressUpdate};
use crate::db::repositories::{ProgressRepository, TrainingRepository};
use crate::error::{AppError, AppResult};
use crate::modules::auth::require_auth;

#[derive(Debug, Deserialize)]
pub struct UpsertProgressRequest {
    pub module_id: Uuid,
    #[serde(flatten)]
    pub fields: ProgressUpdate,
}

pub async fn list_progress(
    State(state): State<AppState>,
    session: Session,
) -> AppResult<Json<Vec<EmployeeProgress>>> {
    let user = require_auth(&session).await?;
    Ok(Json(
        ProgressRepository::list_for_user(&state.db, user.id).await?,
    ))
}

pub async fn upsert_progress(
    State(state): State<AppState>,
    session: Session,
    Json(payload): Json<UpsertProgressRequest>,
) -> AppResult<Json<EmployeeProgress>> {
    let user = require_auth(&session).await?;
    let progress =
        ProgressRepository::upsert(&state.db, user.id, payload.module_id, &payload.fields).await?;
    Ok(Json(progress))
}

pub async fn get_module_progress(
    State(state): State<AppState>,
    session: Session,
    Path(module_id): Path<Uuid>,
) -> AppResult<Json<EmployeeProgress>> {
    let user = require_auth(&session).await?;
    let progress = ProgressRepository::get(&state.db, user.id, module_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Progress for module {}", module_id)))?;
    Ok(Json(progress))
}

pub async fn mark_module_completed(
    State(state): State<AppState>,
    session: Session,
    Path(module_id): Path<Uuid>,
) -> AppResult<Json<EmployeeProgress>> {
    let user = require_auth(&session).await?;
    let progress = ProgressRepository::mark_completed(&state.db, user.id, module_id).await?;
    tracing::info!(user_id = %user.id, module_id = %module_id, "Module completed");
    Ok(Json(progress))
}

pub async fn progress_summary(
    State(state): State<AppState>,
    session: Session,
) -> AppResult<Json<ProgressSummary>> {
    let user = require_auth(&session).await?;
    let module_ids = TrainingRepository::module_ids(&state.db).await?;
    let rows = ProgressRepository::status_by_module(&state.db, user.id).await?;
    Ok(Json(summarize(&module_ids, &rows)))
}
