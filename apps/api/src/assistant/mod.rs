//! AI Gateway: turns `{prompt, action}` into a generated resume or a free-text answer.
//!
//! Structured replies are validated against the resume shape before they are
//! accepted; a reply that does not match is rejected with
//! `AppError::AiValidation` instead of being passed on. Nothing is retried.

pub mod handlers;
pub mod prompts;

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::info;

use crate::errors::AppError;
use crate::llm_client::{strip_json_fences, CompletionClient};
use crate::models::{Education, Experience, PersonalInfo};

// ────────────────────────────────────────────────────────────────────────────
// Request / result types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AiAction {
    GenerateResume,
    ImproveResume,
    AnswerQuery,
}

impl AiAction {
    pub fn as_str(self) -> &'static str {
        match self {
            AiAction::GenerateResume => "generate_resume",
            AiAction::ImproveResume => "improve_resume",
            AiAction::AnswerQuery => "answer_query",
        }
    }
}

impl fmt::Display for AiAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AiAction {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "generate_resume" => Ok(AiAction::GenerateResume),
            "improve_resume" => Ok(AiAction::ImproveResume),
            "answer_query" => Ok(AiAction::AnswerQuery),
            other => Err(AppError::Validation(format!(
                "unknown action '{other}' (expected generate_resume, improve_resume or answer_query)"
            ))),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AiRequest {
    pub prompt: String,
    pub action: AiAction,
}

/// The resume-shaped part of a structured reply. No id or title is implied.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratedResume {
    pub personal_info: PersonalInfo,
    pub education: Vec<Education>,
    pub experience: Vec<Experience>,
    pub skills: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum AiResult {
    Resume(GeneratedResume),
    Answer(String),
}

// ────────────────────────────────────────────────────────────────────────────
// Gateway
// ────────────────────────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct AssistantGateway {
    client: Arc<dyn CompletionClient>,
}

impl AssistantGateway {
    pub fn new(client: Arc<dyn CompletionClient>) -> Self {
        Self { client }
    }

    pub async fn run(&self, request: AiRequest) -> Result<AiResult, AppError> {
        if request.prompt.trim().is_empty() {
            return Err(AppError::Validation("prompt cannot be empty".to_string()));
        }

        let action = request.action;
        let system = prompts::system_prompt(action);
        let reply = self
            .client
            .complete(&request.prompt, &system)
            .await
            .map_err(|e| AppError::Ai(format!("{action} failed: {e}")))?;

        let result = match action {
            AiAction::AnswerQuery => AiResult::Answer(reply),
            AiAction::GenerateResume | AiAction::ImproveResume => {
                let value: Value = serde_json::from_str(strip_json_fences(&reply))
                    .map_err(|e| AppError::AiValidation(format!("reply is not valid JSON: {e}")))?;
                AiResult::Resume(validate_resume_value(&value).map_err(AppError::AiValidation)?)
            }
        };

        info!(action = %action, "AI request completed");
        Ok(result)
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Shape validation
// ────────────────────────────────────────────────────────────────────────────

const RESUME_KEYS: [&str; 4] = ["personal_info", "education", "experience", "skills"];
const PERSONAL_INFO_KEYS: [&str; 5] = ["name", "email", "phone", "location", "summary"];
const EDUCATION_KEYS: [&str; 3] = ["school", "degree", "year"];
const EXPERIENCE_KEYS: [&str; 4] = ["company", "position", "duration", "description"];

/// Checks a structured reply against the resume shape and converts it.
///
/// Known fields must have the right JSON type; unknown keys are ignored.
/// At least one of the four top-level sections must be present.
pub fn validate_resume_value(value: &Value) -> Result<GeneratedResume, String> {
    let obj = value
        .as_object()
        .ok_or_else(|| format!("expected a JSON object, got {}", json_kind(value)))?;

    if !RESUME_KEYS.iter().any(|k| obj.contains_key(*k)) {
        return Err(format!(
            "object has none of the expected keys ({})",
            RESUME_KEYS.join(", ")
        ));
    }

    if let Some(pi) = obj.get("personal_info") {
        let pi = pi
            .as_object()
            .ok_or_else(|| format!("personal_info must be an object, got {}", json_kind(pi)))?;
        check_string_fields(pi, &PERSONAL_INFO_KEYS, "personal_info")?;
    }

    check_entries(obj, "education", &EDUCATION_KEYS)?;
    check_entries(obj, "experience", &EXPERIENCE_KEYS)?;

    if let Some(skills) = obj.get("skills") {
        let skills = skills
            .as_array()
            .ok_or_else(|| format!("skills must be an array, got {}", json_kind(skills)))?;
        if let Some((i, bad)) = skills.iter().enumerate().find(|(_, s)| !s.is_string()) {
            return Err(format!("skills[{i}] must be a string, got {}", json_kind(bad)));
        }
    }

    serde_json::from_value(value.clone()).map_err(|e| e.to_string())
}

fn check_entries(obj: &Map<String, Value>, section: &str, keys: &[&str]) -> Result<(), String> {
    let Some(entries) = obj.get(section) else {
        return Ok(());
    };
    let entries = entries
        .as_array()
        .ok_or_else(|| format!("{section} must be an array, got {}", json_kind(entries)))?;
    for (i, entry) in entries.iter().enumerate() {
        let entry = entry.as_object().ok_or_else(|| {
            format!("{section}[{i}] must be an object, got {}", json_kind(entry))
        })?;
        check_string_fields(entry, keys, &format!("{section}[{i}]"))?;
    }
    Ok(())
}

fn check_string_fields(obj: &Map<String, Value>, keys: &[&str], path: &str) -> Result<(), String> {
    for key in keys {
        if let Some(v) = obj.get(*key) {
            if !v.is_string() {
                return Err(format!("{path}.{key} must be a string, got {}", json_kind(v)));
            }
        }
    }
    Ok(())
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
