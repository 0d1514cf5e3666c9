use axum::{
    extract::{Path, State},
    Json,
};
use serde_json::json;
use tower_sessions::Session;
use uuid::Uuid;
use validator::Validate;

use super::scoring::{self, AssessmentScope};
use crate::app_state::AppState;
use crate::db::models::{
    AssessmentQuestion, AssessmentResult, NewQuestion, QuestionView, SubmittedAnswers,
    UpdateQuestion, UserRole,
};
use crate::db::repositories::AssessmentRepository;
use crate::error::{AppError, AppResult};
use crate::modules::auth::{require_admin, require_auth};

// Questions

async fn list_questions(
    state: &AppState,
    session: &Session,
    scope: AssessmentScope,
) -> AppResult<Json<Vec<QuestionView>>> {
    require_auth(session).await?;
    let questions = AssessmentRepository::questions_for_scope(&state.db, scope).await?;
    Ok(Json(questions.into_iter().map(QuestionView::from).collect()))
}

pub async fn list_module_questions(
    State(state): State<AppState>,
    session: Session,
    Path(module_id): Path<Uuid>,
) -> AppResult<Json<Vec<QuestionView>>> {
    list_questions(&state, &session, AssessmentScope::Module(module_id)).await
}

pub async fn list_section_questions(
    State(state): State<AppState>,
    session: Session,
    Path(section_id): Path<Uuid>,
) -> AppResult<Json<Vec<QuestionView>>> {
    list_questions(&state, &session, AssessmentScope::Section(section_id)).await
}

async fn create_question(
    state: &AppState,
    session: &Session,
    scope: AssessmentScope,
    payload: NewQuestion,
) -> AppResult<Json<AssessmentQuestion>> {
    require_admin(session).await?;
    payload.validate()?;
    scoring::validate_answer_key(&payload.correct_answer, &payload.options)
        .map_err(AppError::Validation)?;

    Ok(Json(
        AssessmentRepository::create_question(&state.db, scope, &payload).await?,
    ))
}

pub async fn create_module_question(
    State(state): State<AppState>,
    session: Session,
    Path(module_id): Path<Uuid>,
    Json(payload): Json<NewQuestion>,
) -> AppResult<Json<AssessmentQuestion>> {
    create_question(&state, &session, AssessmentScope::Module(module_id), payload).await
}

pub async fn create_section_question(
    State(state): State<AppState>,
    session: Session,
    Path(section_id): Path<Uuid>,
    Json(payload): Json<NewQuestion>,
) -> AppResult<Json<AssessmentQuestion>> {
    create_question(
        &state,
        &session,
        AssessmentScope::Section(section_id),
        payload,
    )
    .await
}

/// Full question row, answer key included; admin only.
pub async fn get_question(
    State(state): State<AppState>,
    session: Session,
    Path(question_id): Path<Uuid>,
) -> AppResult<Json<AssessmentQuestion>> {
    require_admin(&session).await?;
    let question = AssessmentRepository::get_question(&state.db, question_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Question {}", question_id)))?;
    Ok(Json(question))
}

pub async fn update_question(
    State(state): State<AppState>,
    session: Session,
    Path(question_id): Path<Uuid>,
    Json(payload): Json<UpdateQuestion>,
) -> AppResult<Json<AssessmentQuestion>> {
    require_admin(&session).await?;
    payload.validate()?;

    // Validate the answer key against the merged row, since either side of
    // the (key, options) pair may be changing.
    let existing = AssessmentRepository::get_question(&state.db, question_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Question {}", question_id)))?;
    let merged_key = payload
        .correct_answer
        .as_deref()
        .unwrap_or(&existing.correct_answer);
    let merged_options = payload.options.as_deref().unwrap_or(&existing.options.0);
    scoring::validate_answer_key(merged_key, merged_options).map_err(AppError::Validation)?;

    Ok(Json(
        AssessmentRepository::update_question(&state.db, question_id, &payload).await?,
    ))
}

pub async fn delete_question(
    State(state): State<AppState>,
    session: Session,
    Path(question_id): Path<Uuid>,
) -> AppResult<Json<serde_json::Value>> {
    require_admin(&session).await?;
    AssessmentRepository::delete_question(&state.db, question_id).await?;
    Ok(Json(json!({ "success": true })))
}

// Submissions and results

pub async fn submit_module_assessment(
    State(state): State<AppState>,
    session: Session,
    Path(module_id): Path<Uuid>,
    Json(payload): Json<SubmittedAnswers>,
) -> AppResult<Json<AssessmentResult>> {
    let user = require_auth(&session).await?;
    let result = scoring::score_submission(
        &state.db,
        user.id,
        AssessmentScope::Module(module_id),
        payload.answers,
    )
    .await?;
    Ok(Json(result))
}

pub async fn submit_section_assessment(
    State(state): State<AppState>,
    session: Session,
    Path(section_id): Path<Uuid>,
    Json(payload): Json<SubmittedAnswers>,
) -> AppResult<Json<AssessmentResult>> {
    let user = require_auth(&session).await?;
    let result = scoring::score_submission(
        &state.db,
        user.id,
        AssessmentScope::Section(section_id),
        payload.answers,
    )
    .await?;
    Ok(Json(result))
}

pub async fn list_my_results(
    State(state): State<AppState>,
    session: Session,
) -> AppResult<Json<Vec<AssessmentResult>>> {
    let user = require_auth(&session).await?;
    Ok(Json(
        AssessmentRepository::results_for_user(&state.db, user.id).await?,
    ))
}

pub async fn get_result(
    State(state): State<AppState>,
    session: Session,
    Path(result_id): Path<Uuid>,
) -> AppResult<Json<AssessmentResult>> {
    let user = require_auth(&session).await?;
    let result = AssessmentRepository::get_result(&state.db, result_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Result {}", result_id)))?;

    // Learners see their own history only.
    if result.user_id != user.id && user.role != UserRole::Admin {
        return Err(AppError::Authorization(
            "Result belongs to another user".to_string(),
        ));
    }
    Ok(Json(result))
}

/// Most recent attempt for the signed-in user on one section.
pub async fn latest_section_result(
    State(state): State<AppState>,
    session: Session,
    Path(section_id): Path<Uuid>,
) -> AppResult<Json<AssessmentResult>> {
    let user = require_auth(&session).await?;
    let result = AssessmentRepository::latest_for_user_section(&state.db, user.id, section_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("No attempts for section {}", section_id)))?;
    Ok(Json(result))
}
