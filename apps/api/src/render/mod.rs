//! Document rendering: pure functions from a `Resume` to text or PDF bytes.
//!
//! Rendering never mutates its input and does no I/O beyond writing into an
//! in-memory buffer, so it runs inline on the calling task.

pub mod metrics;
pub mod pdf;
pub mod text;

use thiserror::Error;

pub use pdf::render_pdf;
pub use text::render_plain_text;

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("PDF encoding failed: {0}")]
    Pdf(#[from] lopdf::Error),

    #[error("I/O error while writing document: {0}")]
    Io(#[from] std::io::Error),
}
