use axum::{
    routing::{get, post},
    Router,
};

use super::handlers::{
    create_module_question, create_section_question, delete_question, get_question, get_result,
    latest_section_result, list_module_questions, list_my_results, list_section_questions,
    submit_module_assessment, submit_section_assessment, update_question,
};
use crate::app_state::AppState;

pub fn assessment_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/modules/:id/questions",
            get(list_module_questions).post(create_module_question),
        )
        .route(
            "/sections/:id/questions",
            get(list_section_questions).post(create_section_question),
        )
        .route(
            "/questions/:id",
            get(get_question)
                .put(update_question)
                .delete(delete_question),
        )
        .route("/modules/:id/assessment", post(submit_module_assessment))
        .route("/sections/:id/assessment", post(submit_section_assessment))
        .route("/sections/:id/results/latest", get(latest_section_result))
        .route("/results", get(list_my_results))
        .route("/results/:id", get(get_result))
}
