pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::assistant::handlers as assistant;
use crate::export::handlers as export;
use crate::resumes::handlers as resumes;
use crate::state::AppState;
use crate::upload::handlers as upload;

/// Room for multipart boundaries and headers on top of the file itself.
const MULTIPART_OVERHEAD_BYTES: usize = 64 * 1024;

pub fn build_router(state: AppState) -> Router {
    let upload_limit = state.config.max_upload_bytes + MULTIPART_OVERHEAD_BYTES;

    Router::new()
        .route("/health", get(health::health_handler))
        // Resume Store Gateway
        .route(
            "/api/v1/resumes",
            get(resumes::handle_list).post(resumes::handle_save),
        )
        .route(
            "/api/v1/resumes/upload",
            post(upload::handle_upload).layer(DefaultBodyLimit::max(upload_limit)),
        )
        .route(
            "/api/v1/resumes/:id",
            get(resumes::handle_get)
                .put(resumes::handle_update)
                .delete(resumes::handle_delete),
        )
        // Export
        .route(
            "/api/v1/resumes/:id/export",
            get(export::handle_export_saved),
        )
        .route("/api/v1/export", post(export::handle_export_unsaved))
        // AI Gateway
        .route("/api/v1/ai", post(assistant::handle_ai))
        .with_state(state)
}
