//! Axum route handler for the AI Gateway.

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};

use crate::assistant::{AiAction, AiRequest, AiResult};
use crate::auth::AuthUser;
use crate::errors::AppError;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct AiRequestBody {
    pub prompt: String,
    pub action: String,
}

/// Wire envelope: `{success: true, result}` or `{success: false, error}`.
#[derive(Debug, Serialize)]
pub struct AiEnvelope {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<AiResult>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// POST /api/v1/ai
///
/// Every failure, including a missing user or an unreadable body, is reported
/// in the envelope with `success: false` and a non-2xx status.
pub async fn handle_ai(
    State(state): State<AppState>,
    user: Result<AuthUser, AppError>,
    body: Result<Json<AiRequestBody>, JsonRejection>,
) -> (StatusCode, Json<AiEnvelope>) {
    let AuthUser(user_id) = match user {
        Ok(user) => user,
        Err(e) => return failure(e),
    };
    let Json(body) = match body {
        Ok(body) => body,
        Err(rejection) => {
            return failure(AppError::Validation(format!(
                "invalid request body: {}",
                rejection.body_text()
            )))
        }
    };
    let action: AiAction = match body.action.parse() {
        Ok(action) => action,
        Err(e) => return failure(e),
    };
    tracing::info!(action = %action, user = %user_id, "AI request");

    let outcome = state
        .assistant
        .run(AiRequest {
            prompt: body.prompt,
            action,
        })
        .await;

    match outcome {
        Ok(result) => (
            StatusCode::OK,
            Json(AiEnvelope {
                success: true,
                result: Some(result),
                error: None,
            }),
        ),
        Err(e) => failure(e),
    }
}

fn failure(error: AppError) -> (StatusCode, Json<AiEnvelope>) {
    let (status, _, message) = error.parts();
    (
        status,
        Json(AiEnvelope {
            success: false,
            result: None,
            error: Some(message),
        }),
    )
}
