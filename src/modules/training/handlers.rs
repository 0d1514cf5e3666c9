use axum::{
    extract::{Path, State},
    Json,
};
use serde_json::json;
use tower_sessions::Session;
use uuid::Uuid;
use validator::Validate;

use crate::app_state::AppState;
use crate::db::models::{
    ModulePage, NewModule, NewPage, NewSection, TrainingModule, TrainingSection, UpdateModule,
    UpdatePage, UpdateSection,
};
use crate::db::repositories::TrainingRepository;
use crate::error::{AppError, AppResult};
use crate::modules::auth::{require_admin, require_auth};

// Sections

pub async fn list_sections(
    State(state): State<AppState>,
    session: Session,
) -> AppResult<Json<Vec<TrainingSection>>> {
    require_auth(&session).await?;
    Ok(Json(TrainingRepository::list_sections(&state.db).await?))
}

pub async fn get_section(
    State(state): State<AppState>,
    session: Session,
    Path(section_id): Path<Uuid>,
) -> AppResult<Json<TrainingSection>> {
    require_auth(&session).await?;
    let section = TrainingRepository::get_section(&state.db, section_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Section {}", section_id)))?;
    Ok(Json(section))
}

pub async fn create_section(
    State(state): State<AppState>,
    session: Session,
    Json(payload): Json<NewSection>,
) -> AppResult<Json<TrainingSection>> {
    require_admin(&session).await?;
    payload.validate()?;
    Ok(Json(
        TrainingRepository::create_section(&state.db, &payload).await?,
    ))
}

pub async fn update_section(
    State(state): State<AppState>,
    session: Session,
    Path(section_id): Path<Uuid>,
    Json(payload): Json<UpdateSection>,
) -> AppResult<Json<TrainingSection>> {
    require_admin(&session).await?;
    payload.validate()?;
    Ok(Json(
        TrainingRepository::update_section(&state.db, section_id, &payload).await?,
    ))
}

pub async fn delete_section(
    State(state): State<AppState>,
    session: Session,
    Path(section_id): Path<Uuid>,
) -> AppResult<Json<serde_json::Value>> {
    require_admin(&session).await?;
    TrainingRepository::delete_section(&state.db, section_id).await?;
    Ok(Json(json!({ "success": true })))
}

// Modules

pub async fn list_modules(
    State(state): State<AppState>,
    session: Session,
) -> AppResult<Json<Vec<TrainingModule>>> {
    require_auth(&session).await?;
    Ok(Json(TrainingRepository::list_modules(&state.db).await?))
}

pub async fn list_section_modules(
    State(state): State<AppState>,
    session: Session,
    Path(section_id): Path<Uuid>,
) -> AppResult<Json<Vec<TrainingModule>>> {
    require_auth(&session).await?;
    Ok(Json(
        TrainingRepository::modules_by_section(&state.db, section_id).await?,
    ))
}

/// A module together with its pages in reading order.
pub async fn get_module(
    State(state): State<AppState>,
    session: Session,
    Path(module_id): Path<Uuid>,
) -> AppResult<Json<serde_json::Value>> {
    require_auth(&session).await?;
    let module = TrainingRepository::get_module(&state.db, module_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Module {}", module_id)))?;
    let pages = TrainingRepository::pages_by_module(&state.db, module_id).await?;

    Ok(Json(json!({ "module": module, "pages": pages })))
}

pub async fn create_module(
    State(state): State<AppState>,
    session: Session,
    Json(payload): Json<NewModule>,
) -> AppResult<Json<TrainingModule>> {
    require_admin(&session).await?;
    payload.validate()?;
    Ok(Json(
        TrainingRepository::create_module(&state.db, &payload).await?,
    ))
}

pub async fn update_module(
    State(state): State<AppState>,
    session: Session,
    Path(module_id): Path<Uuid>,
    Json(payload): Json<UpdateModule>,
) -> AppResult<Json<TrainingModule>> {
    require_admin(&session).await?;
    payload.validate()?;
    Ok(Json(
        TrainingRepository::update_module(&state.db, module_id, &payload).await?,
    ))
}

pub async fn delete_module(
    State(state): State<AppState>,
    session: Session,
    Path(module_id): Path<Uuid>,
) -> AppResult<Json<serde_json::Value>> {
    require_admin(&session).await?;
    TrainingRepository::delete_module(&state.db, module_id).await?;
    Ok(Json(json!({ "success": true })))
}

// Pages

pub async fn list_module_pages(
    State(state): State<AppState>,
    session: Session,
    Path(module_id): Path<Uuid>,
) -> AppResult<Json<Vec<ModulePage>>> {
    require_auth(&session).await?;
    Ok(Json(
        TrainingRepository::pages_by_module(&state.db, module_id).await?,
    ))
}

pub async fn get_page(
    State(state): State<AppState>,
    session: Session,
    Path(page_id): Path<Uuid>,
) -> AppResult<Json<ModulePage>> {
    require_auth(&session).await?;
    let page = TrainingRepository::get_page(&state.db, page_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Page {}", page_id)))?;
    Ok(Json(page))
}

pub async fn create_page(
    State(state): State<AppState>,
    session: Session,
    Path(module_id): Path<Uuid>,
    Json(payload): Json<NewPage>,
) -> AppResult<Json<ModulePage>> {
    require_admin(&session).await?;
    payload.validate()?;
    Ok(Json(
        TrainingRepository::create_page(&state.db, module_id, &payload).await?,
    ))
}

pub async fn update_page(
    State(state): State<AppState>,
    session: Session,
    Path(page_id): Path<Uuid>,
    Json(payload): Json<UpdatePage>,
) -> AppResult<Json<ModulePage>> {
    require_admin(&session).await?;
    payload.validate()?;
    Ok(Json(
        TrainingRepository::update_page(&state.db, page_id, &payload).await?,
    ))
}

pub async fn delete_page(
    State(state): State<AppState>,
    session: Session,
    Path(page_id): Path<Uuid>,
) -> AppResult<Json<serde_json::Value>> {
    require_admin(&session).await?;
    TrainingRepository::delete_page(&state.db, page_id).await?;
    Ok(Json(json!({ "success": true })))
}
