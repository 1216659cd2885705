//! Axum route handlers for the Resume Store Gateway.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use uuid::Uuid;

use crate::auth::AuthUser;
use crate::errors::AppError;
use crate::models::{Resume, ResumeRecord};
use crate::state::AppState;

/// GET /api/v1/resumes
///
/// The caller's resumes, most recently updated first.
pub async fn handle_list(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
) -> Result<Json<Vec<ResumeRecord>>, AppError> {
    Ok(Json(state.store.list(user_id).await?))
}

/// POST /api/v1/resumes
///
/// Creates the resume when the body has no `id` (201), updates it otherwise (200).
pub async fn handle_save(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Json(resume): Json<Resume>,
) -> Result<(StatusCode, Json<ResumeRecord>), AppError> {
    let status = if resume.id.is_some() {
        StatusCode::OK
    } else {
        StatusCode::CREATED
    };
    let record = state.store.save(user_id, resume).await?;
    Ok((status, Json(record)))
}

/// GET /api/v1/resumes/:id
pub async fn handle_get(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<ResumeRecord>, AppError> {
    state
        .store
        .get(user_id, id)
        .await?
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("Resume {id} not found")))
}

/// PUT /api/v1/resumes/:id
///
/// The path id wins over any id in the body.
pub async fn handle_update(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Path(id): Path<Uuid>,
    Json(mut resume): Json<Resume>,
) -> Result<Json<ResumeRecord>, AppError> {
    resume.id = Some(id);
    Ok(Json(state.store.save(user_id, resume).await?))
}

/// DELETE /api/v1/resumes/:id
pub async fn handle_delete(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    if state.store.delete(user_id, id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::NotFound(format!("Resume {id} not found")))
    }
}
