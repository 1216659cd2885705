//! Resume Store Gateway: per-user CRUD over the `resumes` table.

pub mod handlers;
pub mod store;

pub use store::{PgResumeStore, ResumeStore, UploadRecord};
