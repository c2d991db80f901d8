pub mod health;

use axum::{
    routing::{delete, get, post},
    Router,
};

use crate::credentials::handlers as credentials;
use crate::generation::handlers as generation;
use crate::state::AppState;
use crate::templates::handlers as templates;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Template registry
        .route("/api/v1/templates", get(templates::handle_list_templates))
        .route(
            "/api/v1/templates/:id/preview",
            get(templates::handle_preview),
        )
        // Generation and session
        .route("/api/v1/generate", post(generation::handle_generate))
        .route(
            "/api/v1/session",
            get(generation::handle_get_session)
                .patch(generation::handle_select)
                .delete(generation::handle_clear),
        )
        .route(
            "/api/v1/form",
            get(generation::handle_get_form).put(generation::handle_put_form),
        )
        .route("/api/v1/form/:section", post(generation::handle_add_row))
        .route(
            "/api/v1/form/:section/:id",
            delete(generation::handle_remove_row),
        )
        .route(
            "/api/v1/session/text",
            get(generation::handle_session_text),
        )
        .route("/api/v1/render", post(generation::handle_render))
        .route("/api/v1/export", post(generation::handle_export))
        // Local credential
        .route(
            "/api/v1/credential",
            get(credentials::handle_credential_status)
                .put(credentials::handle_save_credential)
                .delete(credentials::handle_clear_credential),
        )
        .with_state(state)
}
