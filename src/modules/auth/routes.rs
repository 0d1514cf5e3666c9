use axum::{
    routing::{get, post},
    Router,
};

use super::handlers::{session_info, sign_in, sign_out};
use crate::app_state::AppState;

pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/signin", post(sign_in))
        .route("/signout", post(sign_out))
        .route("/session", get(session_info))
}
