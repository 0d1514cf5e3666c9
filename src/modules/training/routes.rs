use axum::{routing::get, Router};

use super::handlers::{
    create_module, create_page, create_section, delete_module, delete_page, delete_section,
    get_module, get_page, get_section, list_module_pages, list_modules, list_section_modules,
    list_sections, update_module, update_page, update_section,
};
use crate::app_state::AppState;

pub fn training_routes() -> Router<AppState> {
    Router::new()
        .route("/sections", get(list_sections).post(create_section))
        .route(
            "/sections/:id",
            get(get_section).put(update_section).delete(delete_section),
        )
        .route("/sections/:id/modules", get(list_section_modules))
        .route("/modules", get(list_modules).post(create_module))
        .route(
            "/modules/:id",
            get(get_module).put(update_module).delete(delete_module),
        )
        .route(
            "/modules/:id/pages",
            get(list_module_pages).post(create_page),
        )
        .route(
            "/pages/:id",
            get(get_page).put(update_page).delete(delete_page),
        )
}
