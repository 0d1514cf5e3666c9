use axum::{
    extract::{Path, State},
    Json,
};
use serde_json::json;
use tower_sessions::Session;
use tracing::info;
use uuid::Uuid;

use crate::app_state::AppState;
use crate::db::models::{AssessmentResult, EmployeeProgress, UpdateUserRole, User};
use crate::db::repositories::{AssessmentRepository, ProgressRepository, UserRepository};
use crate::error::AppResult;
use crate::modules::auth::require_admin;

pub async fn list_users(
    State(state): State<AppState>,
    session: Session,
) -> AppResult<Json<Vec<User>>> {
    require_admin(&session).await?;
    Ok(Json(UserRepository::list_all(&state.db).await?))
}

pub async fn update_user_role(
    State(state): State<AppState>,
    session: Session,
    Path(user_id): Path<Uuid>,
    Json(payload): Json<UpdateUserRole>,
) -> AppResult<Json<User>> {
    let admin = require_admin(&session).await?;
    let user = UserRepository::update_role(&state.db, user_id, payload.role).await?;
    info!(admin_id = %admin.id, user_id = %user.id, role = ?user.role, "User role changed");
    Ok(Json(user))
}

pub async fn all_progress(
    State(state): State<AppState>,
    session: Session,
) -> AppResult<Json<Vec<EmployeeProgress>>> {
    require_admin(&session).await?;
    Ok(Json(ProgressRepository::list_all(&state.db).await?))
}

pub async fn all_results(
    State(state): State<AppState>,
    session: Session,
) -> AppResult<Json<Vec<AssessmentResult>>> {
    require_admin(&session).await?;
    Ok(Json(AssessmentRepository::list_all(&state.db).await?))
}

/// Bulk reset of one learner's progress rows.
pub async fn reset_user_progress(
    State(state): State<AppState>,
    session: Session,
    Path(user_id): Path<Uuid>,
) -> AppResult<Json<serde_json::Value>> {
    let admin = require_admin(&session).await?;
    let deleted = ProgressRepository::delete_for_user(&state.db, user_id).await?;
    info!(admin_id = %admin.id, user_id = %user_id, deleted, "Progress reset");
    Ok(Json(json!({ "success": true, "deleted": deleted })))
}

pub async fn delete_user_results(
    State(state): State<AppState>,
    session: Session,
    Path(user_id): Path<Uuid>,
) -> AppResult<Json<serde_json::Value>> {
    let admin = require_admin(&session).await?;
    let deleted = AssessmentRepository::delete_results_for_user(&state.db, user_id).await?;
    info!(admin_id = %admin.id, user_id = %user_id, deleted, "Assessment history deleted");
    Ok(Json(json!({ "success": true, "deleted": deleted })))
}

pub async fn mark_certificate(
    State(state): State<AppState>,
    session: Session,
    Path(result_id): Path<Uuid>,
) -> AppResult<Json<AssessmentResult>> {
    require_admin(&session).await?;
    Ok(Json(
        AssessmentRepository::mark_certificate_generated(&state.db, result_id).await?,
    ))
}
