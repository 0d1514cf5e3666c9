use axum::{
    extract::State,
    http::StatusCode,
    middleware,
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use serde_json::json;
use time::format_description::well_known::Rfc3339;
use time::OffsetDateTime;
use tower_http::cors::CorsLayer;
use tower_sessions::{SessionManagerLayer, SessionStore};

use crate::{
    app_state::AppState,
    middleware::tracing::observability_middleware,
    modules::{
        admin::routes::admin_routes, assessments::routes::assessment_routes,
        auth::routes::auth_routes, progress::routes::progress_routes,
        training::routes::training_routes,
    },
};

const TABLES: [&str; 7] = [
    "users",
    "training_sections",
    "training_modules",
    "module_pages",
    "employee_progress",
    "assessment_questions",
    "assessment_results",
];

pub fn create_router<S: SessionStore + Clone>(
    state: AppState,
    session_layer: SessionManagerLayer<S>,
) -> Router {
    Router::new()
        .route("/", get(hello))
        .route("/health", get(health_check))
        .nest("/auth", auth_routes())
        .merge(training_routes())
        .merge(progress_routes())
        .merge(assessment_routes())
        .nest("/admin", admin_routes())
        .layer(session_layer)
        .layer(middleware::from_fn(observability_middleware))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

async fn hello() -> &'static str {
    "Security training portal backend says hello!\n"
}

/// Database connectivity probe.
async fn health_check(State(state): State<AppState>) -> impl IntoResponse {
    let timestamp = OffsetDateTime::now_utc()
        .format(&Rfc3339)
        .unwrap_or_default();

    match sqlx::query("SELECT 1").execute(&state.db).await {
        Ok(_) => (
            StatusCode::OK,
            Json(json!({
                "success": true,
                "message": "Database connection successful!",
                "timestamp": timestamp,
                "database": "PostgreSQL",
                "tables": TABLES,
            })),
        ),
        Err(e) => {
            tracing::warn!("Database health check failed: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({
                    "success": false,
                    "message": "Database connection failed",
                    "error": e.to_string(),
                })),
            )
        }
    }
}
