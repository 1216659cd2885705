//! In-memory stand-ins for the external collaborators, used by unit and router tests.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use bytes::Bytes;
use chrono::Utc;
use uuid::Uuid;

use crate::assistant::AssistantGateway;
use crate::config::{Config, DEFAULT_MAX_UPLOAD_BYTES};
use crate::errors::AppError;
use crate::llm_client::{CompletionClient, LlmError};
use crate::models::resume::DEFAULT_TEMPLATE;
use crate::models::{Resume, ResumeRecord};
use crate::resumes::{ResumeStore, UploadRecord};
use crate::state::AppState;
use crate::upload::FileStorage;

// ────────────────────────────────────────────────────────────────────────────
// Resume store
// ────────────────────────────────────────────────────────────────────────────

#[derive(Default)]
pub struct InMemoryResumeStore {
    rows: Mutex<Vec<ResumeRecord>>,
    fail_uploads: bool,
}

impl InMemoryResumeStore {
    /// A store whose `create_upload_record` always fails.
    pub fn failing_uploads() -> Self {
        Self {
            fail_uploads: true,
            ..Self::default()
        }
    }
}

#[async_trait]
impl ResumeStore for InMemoryResumeStore {
    async fn list(&self, user_id: Uuid) -> Result<Vec<ResumeRecord>, AppError> {
        let mut rows: Vec<ResumeRecord> = self
            .rows
            .lock()
            .unwrap()
            .iter()
            .filter(|r| r.user_id == user_id)
            .cloned()
            .collect();
        rows.sort_by(|a, b| b.updated_at.cmp(&a.updated_at));
        Ok(rows)
    }

    async fn get(&self, user_id: Uuid, id: Uuid) -> Result<Option<ResumeRecord>, AppError> {
        Ok(self
            .rows
            .lock()
            .unwrap()
            .iter()
            .find(|r| r.user_id == user_id && r.resume.id == Some(id))
            .cloned())
    }

    async fn save(&self, user_id: Uuid, mut resume: Resume) -> Result<ResumeRecord, AppError> {
        let mut rows = self.rows.lock().unwrap();
        let now = Utc::now();
        resume.template_type = Some(resume.template_type_or_default().to_string());

        match resume.id {
            None => {
                resume.id = Some(Uuid::new_v4());
                let record = ResumeRecord {
                    resume,
                    user_id,
                    is_public: false,
                    file_path: None,
                    file_name: None,
                    file_size: None,
                    mime_type: None,
                    created_at: now,
                    updated_at: now,
                };
                rows.push(record.clone());
                Ok(record)
            }
            Some(id) => {
                let existing = rows
                    .iter_mut()
                    .find(|r| r.user_id == user_id && r.resume.id == Some(id))
                    .ok_or_else(|| AppError::NotFound(format!("Resume {id} not found")))?;
                existing.resume = resume;
                existing.updated_at = now;
                Ok(existing.clone())
            }
        }
    }

    async fn delete(&self, user_id: Uuid, id: Uuid) -> Result<bool, AppError> {
        let mut rows = self.rows.lock().unwrap();
        let before = rows.len();
        rows.retain(|r| !(r.user_id == user_id && r.resume.id == Some(id)));
        Ok(rows.len() < before)
    }

    async fn create_upload_record(
        &self,
        user_id: Uuid,
        upload: UploadRecord,
    ) -> Result<ResumeRecord, AppError> {
        if self.fail_uploads {
            return Err(AppError::Internal(anyhow::anyhow!("insert failed")));
        }
        let now = Utc::now();
        let record = ResumeRecord {
            resume: Resume {
                id: Some(Uuid::new_v4()),
                title: upload.title,
                template_type: Some(DEFAULT_TEMPLATE.to_string()),
                ..Resume::default()
            },
            user_id,
            is_public: false,
            file_path: Some(upload.file_path),
            file_name: Some(upload.file_name),
            file_size: Some(upload.file_size),
            mime_type: Some(upload.mime_type),
            created_at: now,
            updated_at: now,
        };
        self.rows.lock().unwrap().push(record.clone());
        Ok(record)
    }
}

// ────────────────────────────────────────────────────────────────────────────
// File storage
// ────────────────────────────────────────────────────────────────────────────

#[derive(Default)]
pub struct MemoryFileStorage {
    objects: Mutex<HashMap<String, Bytes>>,
}

impl MemoryFileStorage {
    pub fn get(&self, key: &str) -> Option<Bytes> {
        self.objects.lock().unwrap().get(key).cloned()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.lock().unwrap().is_empty()
    }
}

#[async_trait]
impl FileStorage for MemoryFileStorage {
    async fn put(&self, key: &str, bytes: Bytes, _content_type: &str) -> Result<(), AppError> {
        self.objects.lock().unwrap().insert(key.to_string(), bytes);
        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<(), AppError> {
        self.objects.lock().unwrap().remove(key);
        Ok(())
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Completion backend
// ────────────────────────────────────────────────────────────────────────────

/// Replies with a fixed text (or a fixed failure) and records every call as
/// `(prompt, system)`.
pub struct CannedCompletion {
    reply: Result<String, ()>,
    calls: Mutex<Vec<(String, String)>>,
}

impl CannedCompletion {
    pub fn new(reply: Result<&str, ()>) -> Self {
        Self {
            reply: reply.map(str::to_string),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> Vec<(String, String)> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl CompletionClient for CannedCompletion {
    async fn complete(&self, prompt: &str, system: &str) -> Result<String, LlmError> {
        self.calls
            .lock()
            .unwrap()
            .push((prompt.to_string(), system.to_string()));
        self.reply.clone().map_err(|_| LlmError::Api {
            status: 500,
            message: "backend unavailable".to_string(),
        })
    }
}

// ────────────────────────────────────────────────────────────────────────────
// App state
// ────────────────────────────────────────────────────────────────────────────

pub fn test_config() -> Config {
    Config {
        database_url: "postgres://unused".to_string(),
        s3_bucket: "resumes".to_string(),
        s3_endpoint: "http://localhost:9000".to_string(),
        aws_region: "us-east-1".to_string(),
        aws_access_key_id: "test".to_string(),
        aws_secret_access_key: "test".to_string(),
        anthropic_api_key: "test".to_string(),
        port: 0,
        rust_log: "debug".to_string(),
        max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
    }
}

pub struct TestHarness {
    pub state: AppState,
    pub store: Arc<InMemoryResumeStore>,
    pub files: Arc<MemoryFileStorage>,
    pub completion: Arc<CannedCompletion>,
}

pub fn harness(ai_reply: Result<&str, ()>) -> TestHarness {
    let store = Arc::new(InMemoryResumeStore::default());
    let files = Arc::new(MemoryFileStorage::default());
    let completion = Arc::new(CannedCompletion::new(ai_reply));
    let state = AppState {
        store: store.clone(),
        files: files.clone(),
        assistant: AssistantGateway::new(completion.clone()),
        config: test_config(),
    };
    TestHarness {
        state,
        store,
        files,
        completion,
    }
}
