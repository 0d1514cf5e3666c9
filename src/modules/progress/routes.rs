use axum::{
    routing::{get, post},
    Router,
};

use super::handlers::{
    get_module_progress, list_progress, mark_module_completed, progress_summary, upsert_progress,
};
use crate::app_state::AppState;

pub fn progress_routes() -> Router<AppState> {
    Router::new()
        .route("/progress", get(list_progress).post(upsert_progress))
        .route("/progress/summary", get(progress_summary))
        .route("/modules/:id/progress", get(get_module_progress))
        .route("/modules/:id/complete", post(mark_module_completed))
}
