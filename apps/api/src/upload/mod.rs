//! File upload collaborator: stores the raw file in object storage and creates
//! a stub resume record that carries only the file metadata.
//!
//! No text extraction happens here; the structured fields of the new record
//! stay empty until the user fills them in.

pub mod handlers;
pub mod storage;

use bytes::Bytes;
use tracing::{error, info};
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::ResumeRecord;
use crate::resumes::{ResumeStore, UploadRecord};

pub use storage::{FileStorage, S3FileStorage};

pub const ALLOWED_EXTENSIONS: [&str; 4] = ["pdf", "doc", "docx", "txt"];

/// A file received from the client, before validation.
#[derive(Debug, Clone)]
pub struct IncomingFile {
    pub file_name: String,
    pub content_type: Option<String>,
    pub bytes: Bytes,
}

/// Checks size and type; returns the lowercased extension.
pub fn validate_upload(file: &IncomingFile, max_bytes: usize) -> Result<String, AppError> {
    if file.bytes.is_empty() {
        return Err(AppError::Validation("uploaded file is empty".to_string()));
    }
    if file.bytes.len() > max_bytes {
        return Err(AppError::Validation(format!(
            "uploaded file is {} bytes; the limit is {max_bytes} bytes",
            file.bytes.len()
        )));
    }

    let ext = file
        .file_name
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_ascii_lowercase())
        .unwrap_or_default();
    if !ALLOWED_EXTENSIONS.contains(&ext.as_str()) {
        return Err(AppError::Validation(format!(
            "unsupported file type '{}' (allowed: {})",
            file.file_name,
            ALLOWED_EXTENSIONS.join(", ")
        )));
    }
    Ok(ext)
}

/// `<user_id>/<unix-millis>.<ext>`
pub fn storage_key(user_id: Uuid, uploaded_at_millis: i64, ext: &str) -> String {
    format!("{user_id}/{uploaded_at_millis}.{ext}")
}

fn mime_for_extension(ext: &str) -> &'static str {
    match ext {
        "pdf" => "application/pdf",
        "doc" => "application/msword",
        "docx" => "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
        _ => "text/plain",
    }
}

/// Validates, stores, and records an uploaded resume file.
pub async fn store_upload(
    store: &dyn ResumeStore,
    files: &dyn FileStorage,
    user_id: Uuid,
    file: IncomingFile,
    max_bytes: usize,
) -> Result<ResumeRecord, AppError> {
    let ext = validate_upload(&file, max_bytes)?;
    let key = storage_key(user_id, chrono::Utc::now().timestamp_millis(), &ext);
    let mime_type = file
        .content_type
        .clone()
        .filter(|ct| !ct.is_empty() && ct != "application/octet-stream")
        .unwrap_or_else(|| mime_for_extension(&ext).to_string());
    let file_size = file.bytes.len() as i64;

    files.put(&key, file.bytes, &mime_type).await?;
    info!("Stored upload {key} ({file_size} bytes) for user {user_id}");

    let created = store
        .create_upload_record(
            user_id,
            UploadRecord {
                title: format!("Uploaded Resume - {}", file.file_name),
                file_path: key.clone(),
                file_name: file.file_name,
                file_size,
                mime_type,
            },
        )
        .await;

    // Without a record nothing points at the object, so remove it again.
    if let Err(e) = &created {
        error!("Upload record for {key} failed: {e}; removing stored object");
        if let Err(cleanup) = files.delete(&key).await {
            error!("Orphaned upload object {key}: {cleanup}");
        }
    }
    created
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{InMemoryResumeStore, MemoryFileStorage};

    fn file(name: &str, len: usize) -> IncomingFile {
        IncomingFile {
            file_name: name.to_string(),
            content_type: None,
            bytes: Bytes::from(vec![b'a'; len]),
        }
    }

    #[test]
    fn test_validate_accepts_known_types() {
        assert_eq!(validate_upload(&file("cv.PDF", 10), 100).unwrap(), "pdf");
        assert_eq!(validate_upload(&file("cv.final.docx", 10), 100).unwrap(), "docx");
        assert_eq!(validate_upload(&file("cv.txt", 100), 100).unwrap(), "txt");
    }

    #[test]
    fn test_validate_rejects_bad_uploads() {
        assert!(validate_upload(&file("cv.pdf", 0), 100).is_err());
        assert!(validate_upload(&file("cv.pdf", 101), 100).is_err());
        assert!(validate_upload(&file("cv.exe", 10), 100).is_err());
        assert!(validate_upload(&file("no-extension", 10), 100).is_err());
    }

    #[test]
    fn test_storage_key_layout() {
        let user = Uuid::nil();
        assert_eq!(
            storage_key(user, 1_700_000_000_000, "pdf"),
            "00000000-0000-0000-0000-000000000000/1700000000000.pdf"
        );
    }

    #[tokio::test]
    async fn test_store_upload_creates_stub_record() {
        let store = InMemoryResumeStore::default();
        let files = MemoryFileStorage::default();
        let user = Uuid::new_v4();

        let record = store_upload(&store, &files, user, file("Jane CV.pdf", 42), 1024)
            .await
            .unwrap();

        assert_eq!(record.resume.title, "Uploaded Resume - Jane CV.pdf");
        assert!(record.resume.experience.is_empty());
        assert!(record.resume.skills.is_empty());
        assert_eq!(record.resume.personal_info, Default::default());
        assert_eq!(record.file_name.as_deref(), Some("Jane CV.pdf"));
        assert_eq!(record.file_size, Some(42));
        assert_eq!(record.mime_type.as_deref(), Some("application/pdf"));

        let path = record.file_path.unwrap();
        assert!(path.starts_with(&format!("{user}/")));
        assert!(path.ends_with(".pdf"));
        assert_eq!(files.get(&path).unwrap().len(), 42);
    }

    #[tokio::test]
    async fn test_rejected_upload_stores_nothing() {
        let store = InMemoryResumeStore::default();
        let files = MemoryFileStorage::default();
        let user = Uuid::new_v4();

        let err = store_upload(&store, &files, user, file("cv.exe", 10), 1024).await;
        assert!(matches!(err, Err(AppError::Validation(_))));
        assert!(files.is_empty());
        assert!(store.list(user).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_failed_record_removes_stored_object() {
        let store = InMemoryResumeStore::failing_uploads();
        let files = MemoryFileStorage::default();
        let user = Uuid::new_v4();

        let err = store_upload(&store, &files, user, file("cv.pdf", 10), 1024).await;
        assert!(matches!(err, Err(AppError::Internal(_))));
        assert!(files.is_empty());
        assert!(store.list(user).await.unwrap().is_empty());
    }
}
