use axum::{
    routing::{delete, get, post, put},
    Router,
};

use super::handlers::{
    all_progress, all_results, delete_user_results, list_users, mark_certificate,
    reset_user_progress, update_user_role,
};
use crate::app_state::AppState;

pub fn admin_routes() -> Router<AppState> {
    Router::new()
        .route("/users", get(list_users))
        .route("/users/:id/role", put(update_user_role))
        .route("/users/:id/progress", delete(reset_user_progress))
        .route("/users/:id/results", delete(delete_user_results))
        .route("/progress", get(all_progress))
        .route("/results", get(all_results))
        .route("/results/:id/certificate", post(mark_certificate))
}
