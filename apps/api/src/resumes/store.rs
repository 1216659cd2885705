//! Persistence for resumes behind the `ResumeStore` trait.
//!
//! `AppState` holds an `Arc<dyn ResumeStore>`; production uses `PgResumeStore`.
//! Every operation is scoped by the owning user's id.

use async_trait::async_trait;
use sqlx::types::Json;
use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::{Resume, ResumeRecord, ResumeRow};

/// File metadata for a resume created from an upload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadRecord {
    pub title: String,
    pub file_path: String,
    pub file_name: String,
    pub file_size: i64,
    pub mime_type: String,
}

#[async_trait]
pub trait ResumeStore: Send + Sync {
    /// All resumes owned by `user_id`, most recently updated first.
    async fn list(&self, user_id: Uuid) -> Result<Vec<ResumeRecord>, AppError>;

    async fn get(&self, user_id: Uuid, id: Uuid) -> Result<Option<ResumeRecord>, AppError>;

    /// Inserts when `resume.id` is `None`, otherwise updates the user's row.
    /// Updating a row the user does not own (or that does not exist) is `NotFound`.
    async fn save(&self, user_id: Uuid, resume: Resume) -> Result<ResumeRecord, AppError>;

    /// Returns whether a row was removed.
    async fn delete(&self, user_id: Uuid, id: Uuid) -> Result<bool, AppError>;

    /// Inserts a stub resume carrying only file metadata.
    async fn create_upload_record(
        &self,
        user_id: Uuid,
        upload: UploadRecord,
    ) -> Result<ResumeRecord, AppError>;
}

// ────────────────────────────────────────────────────────────────────────────
// Postgres
// ────────────────────────────────────────────────────────────────────────────

pub struct PgResumeStore {
    pool: PgPool,
}

impl PgResumeStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ResumeStore for PgResumeStore {
    async fn list(&self, user_id: Uuid) -> Result<Vec<ResumeRecord>, AppError> {
        let rows = sqlx::query_as::<_, ResumeRow>(
            "SELECT * FROM resumes WHERE user_id = $1 ORDER BY updated_at DESC",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(ResumeRow::into_record).collect())
    }

    async fn get(&self, user_id: Uuid, id: Uuid) -> Result<Option<ResumeRecord>, AppError> {
        let row = sqlx::query_as::<_, ResumeRow>(
            "SELECT * FROM resumes WHERE id = $1 AND user_id = $2",
        )
        .bind(id)
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(ResumeRow::into_record))
    }

    async fn save(&self, user_id: Uuid, resume: Resume) -> Result<ResumeRecord, AppError> {
        let template_type = resume.template_type_or_default().to_string();

        let row = match resume.id {
            None => {
                sqlx::query_as::<_, ResumeRow>(
                    r#"
                    INSERT INTO resumes
                        (user_id, title, personal_info, education, experience, skills, template_type)
                    VALUES ($1, $2, $3, $4, $5, $6, $7)
                    RETURNING *
                    "#,
                )
                .bind(user_id)
                .bind(&resume.title)
                .bind(Json(resume.personal_info.clone()))
                .bind(Json(resume.education.clone()))
                .bind(Json(resume.experience.clone()))
                .bind(Json(resume.skills.clone()))
                .bind(&template_type)
                .fetch_one(&self.pool)
                .await?
            }
            Some(id) => sqlx::query_as::<_, ResumeRow>(
                r#"
                UPDATE resumes
                SET title = $1, personal_info = $2, education = $3, experience = $4,
                    skills = $5, template_type = $6, updated_at = now()
                WHERE id = $7 AND user_id = $8
                RETURNING *
                "#,
            )
            .bind(&resume.title)
            .bind(Json(resume.personal_info.clone()))
            .bind(Json(resume.education.clone()))
            .bind(Json(resume.experience.clone()))
            .bind(Json(resume.skills.clone()))
            .bind(&template_type)
            .bind(id)
            .bind(user_id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Resume {id} not found")))?,
        };

        info!("Saved resume {} for user {user_id}", row.id);
        Ok(row.into_record())
    }

    async fn delete(&self, user_id: Uuid, id: Uuid) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM resumes WHERE id = $1 AND user_id = $2")
            .bind(id)
            .bind(user_id)
            .execute(&self.pool)
            .await?;

        let deleted = result.rows_affected() > 0;
        if deleted {
            info!("Deleted resume {id} for user {user_id}");
        }
        Ok(deleted)
    }

    async fn create_upload_record(
        &self,
        user_id: Uuid,
        upload: UploadRecord,
    ) -> Result<ResumeRecord, AppError> {
        let row = sqlx::query_as::<_, ResumeRow>(
            r#"
            INSERT INTO resumes
                (user_id, title, template_type, file_path, file_name, file_size, mime_type)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING *
            "#,
        )
        .bind(user_id)
        .bind(&upload.title)
        .bind(crate::models::resume::DEFAULT_TEMPLATE)
        .bind(&upload.file_path)
        .bind(&upload.file_name)
        .bind(upload.file_size)
        .bind(&upload.mime_type)
        .fetch_one(&self.pool)
        .await?;

        info!(
            "Created upload record {} for user {user_id} ({})",
            row.id, upload.file_path
        );
        Ok(row.into_record())
    }
}
