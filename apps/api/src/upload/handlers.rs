use axum::{
    extract::{Multipart, State},
    http::StatusCode,
    Json,
};

use crate::auth::AuthUser;
use crate::errors::AppError;
use crate::models::ResumeRecord;
use crate::state::AppState;
use crate::upload::{store_upload, IncomingFile};

/// POST /api/v1/resumes/upload
///
/// Multipart body with a single `file` field. Returns the stub record.
pub async fn handle_upload(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    mut multipart: Multipart,
) -> Result<(StatusCode, Json<ResumeRecord>), AppError> {
    let mut incoming: Option<IncomingFile> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("invalid multipart body: {e}")))?
    {
        if field.name() != Some("file") {
            continue;
        }
        let file_name = field.file_name().unwrap_or_default().to_string();
        let content_type = field.content_type().map(str::to_string);
        let bytes = field
            .bytes()
            .await
            .map_err(|e| AppError::Validation(format!("failed to read upload: {e}")))?;
        incoming = Some(IncomingFile {
            file_name,
            content_type,
            bytes,
        });
        break;
    }

    let file =
        incoming.ok_or_else(|| AppError::Validation("missing multipart field 'file'".to_string()))?;

    let record = store_upload(
        state.store.as_ref(),
        state.files.as_ref(),
        user_id,
        file,
        state.config.max_upload_bytes,
    )
    .await?;

    Ok((StatusCode::CREATED, Json(record)))
}
