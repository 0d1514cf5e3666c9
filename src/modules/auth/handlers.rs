use axum::{extract::State, Json};
use serde_json::json;
use time::format_description::well_known::Rfc3339;
use time::OffsetDateTime;
use tower_sessions::Session;
use tracing::{info, warn};
use validator::Validate;

use super::policy::{self, SessionUser, SESSION_USER_KEY};
use crate::app_state::AppState;
use crate::db::models::{IdentityAssertion, UserRole};
use crate::db::repositories::UserRepository;
use crate::error::{AppError, AppResult};

/// Accept a verified identity assertion from the external provider. The
/// domain policy runs before any user row or session is created.
pub async fn sign_in(
    State(state): State<AppState>,
    session: Session,
    Json(assertion): Json<IdentityAssertion>,
) -> AppResult<Json<serde_json::Value>> {
    assertion.validate()?;

    if !policy::email_in_domain(&assertion.email, &state.env.auth.allowed_email_domain) {
        warn!(email = %assertion.email, "Sign-in rejected by domain policy");
        return Err(AppError::Authentication(
            "Email domain not allowed".to_string(),
        ));
    }

    let user = UserRepository::upsert_identity(&state.db, &assertion).await?;
    session
        .insert(SESSION_USER_KEY, SessionUser::from(&user))
        .await?;

    info!(user_id = %user.id, email = %user.email, "User signed in");

    Ok(Json(json!({ "success": true, "user": user })))
}

pub async fn sign_out(session: Session) -> AppResult<Json<serde_json::Value>> {
    session.flush().await?;
    Ok(Json(json!({ "success": true })))
}

/// Session introspection. The role is re-read from the users table so a role
/// change by an admin shows up without a fresh sign-in.
pub async fn session_info(
    State(state): State<AppState>,
    session: Session,
) -> AppResult<Json<serde_json::Value>> {
    let current = policy::current_user(&session).await?;

    let user = match &current {
        Some(session_user) => UserRepository::get_by_id(&state.db, session_user.id).await?,
        None => None,
    };
    let is_admin = user
        .as_ref()
        .map(|u| u.role == UserRole::Admin)
        .unwrap_or(false);

    Ok(Json(json!({
        "success": true,
        "session": current.is_some(),
        "user": user,
        "isAdmin": is_admin,
        "timestamp": OffsetDateTime::now_utc().format(&Rfc3339).unwrap_or_default(),
    })))
}
