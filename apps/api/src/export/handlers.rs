//! Download endpoints. The attachment response is the export's only side effect.

use axum::{
    extract::{Path, Query, State},
    http::{header, HeaderName, HeaderValue},
    response::{IntoResponse, Response},
    Json,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::auth::AuthUser;
use crate::errors::AppError;
use crate::export::{export_resume, ExportArtifact, ExportFormat};
use crate::models::Resume;
use crate::state::AppState;

pub const REQUESTED_FORMAT_HEADER: &str = "x-export-requested-format";
pub const PRODUCED_FORMAT_HEADER: &str = "x-export-format";

#[derive(Debug, Deserialize)]
pub struct ExportQuery {
    pub format: Option<String>,
}

impl ExportQuery {
    /// Defaults to PDF; unknown tags are an explicit error.
    fn format(&self) -> Result<ExportFormat, AppError> {
        match self.format.as_deref() {
            None => Ok(ExportFormat::Pdf),
            Some(tag) => Ok(tag.parse()?),
        }
    }
}

/// GET /api/v1/resumes/:id/export?format=pdf|txt|docx
pub async fn handle_export_saved(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Path(id): Path<Uuid>,
    Query(query): Query<ExportQuery>,
) -> Result<Response, AppError> {
    let format = query.format()?;
    let record = state
        .store
        .get(user_id, id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Resume {id} not found")))?;

    let artifact = export_resume(&record.resume, format)?;
    download_response(artifact)
}

/// POST /api/v1/export?format=pdf|txt|docx
///
/// Exports the resume in the body without persisting it.
pub async fn handle_export_unsaved(
    AuthUser(_user_id): AuthUser,
    Query(query): Query<ExportQuery>,
    Json(resume): Json<Resume>,
) -> Result<Response, AppError> {
    let format = query.format()?;
    let artifact = export_resume(&resume, format)?;
    download_response(artifact)
}

fn download_response(artifact: ExportArtifact) -> Result<Response, AppError> {
    let disposition = HeaderValue::from_str(&format!(
        "attachment; filename=\"{}\"",
        artifact.file_name
    ))
    .map_err(|e| AppError::Internal(anyhow::anyhow!("invalid file name header: {e}")))?;

    if artifact.downgraded() {
        tracing::warn!(
            requested = %artifact.requested,
            produced = %artifact.produced,
            "Export served in a different format than requested"
        );
    }

    let headers = [
        (header::CONTENT_TYPE, HeaderValue::from_static(artifact.content_type())),
        (header::CONTENT_DISPOSITION, disposition),
        (
            HeaderName::from_static(REQUESTED_FORMAT_HEADER),
            HeaderValue::from_static(artifact.requested.as_str()),
        ),
        (
            HeaderName::from_static(PRODUCED_FORMAT_HEADER),
            HeaderValue::from_static(artifact.produced.as_str()),
        ),
    ];

    Ok((headers, artifact.bytes).into_response())
}
