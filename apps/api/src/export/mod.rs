//! Export orchestration: picks a renderer for the requested format, derives
//! the download file name, and reports which format was actually produced.

pub mod handlers;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::info;
use unicode_normalization::UnicodeNormalization;

use crate::models::Resume;
use crate::render::{render_pdf, render_plain_text, RenderError};

/// File name base used when the title sanitizes to nothing.
pub const DEFAULT_FILE_STEM: &str = "my-resume";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    Pdf,
    Txt,
    /// Accepted for compatibility; produced as plain text.
    Docx,
}

impl ExportFormat {
    pub fn as_str(self) -> &'static str {
        match self {
            ExportFormat::Pdf => "pdf",
            ExportFormat::Txt => "txt",
            ExportFormat::Docx => "docx",
        }
    }

    /// The format a request for `self` actually yields.
    pub fn produced(self) -> ExportFormat {
        match self {
            ExportFormat::Pdf => ExportFormat::Pdf,
            ExportFormat::Txt | ExportFormat::Docx => ExportFormat::Txt,
        }
    }

    pub fn content_type(self) -> &'static str {
        match self {
            ExportFormat::Pdf => "application/pdf",
            ExportFormat::Txt => "text/plain; charset=utf-8",
            ExportFormat::Docx => {
                "application/vnd.openxmlformats-officedocument.wordprocessingml.document"
            }
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnsupportedFormat(pub String);

impl fmt::Display for UnsupportedFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unsupported export format '{}' (expected pdf, txt or docx)", self.0)
    }
}

impl std::error::Error for UnsupportedFormat {}

impl FromStr for ExportFormat {
    type Err = UnsupportedFormat;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pdf" => Ok(ExportFormat::Pdf),
            "txt" => Ok(ExportFormat::Txt),
            "docx" => Ok(ExportFormat::Docx),
            _ => Err(UnsupportedFormat(s.to_string())),
        }
    }
}

/// A rendered, ready-to-download document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportArtifact {
    pub requested: ExportFormat,
    pub produced: ExportFormat,
    pub file_name: String,
    pub bytes: Vec<u8>,
}

impl ExportArtifact {
    pub fn content_type(&self) -> &'static str {
        self.produced.content_type()
    }

    /// True when the produced format differs from the one requested.
    pub fn downgraded(&self) -> bool {
        self.requested != self.produced
    }
}

/// Renders `resume` in the requested format.
///
/// `Docx` is served by the text renderer and reports `produced = Txt`.
/// Renderer failures propagate; nothing is retried.
pub fn export_resume(resume: &Resume, format: ExportFormat) -> Result<ExportArtifact, RenderError> {
    let produced = format.produced();
    let bytes = match produced {
        ExportFormat::Pdf => render_pdf(resume)?,
        _ => render_plain_text(resume).into_bytes(),
    };
    let file_name = format!("{}.{}", file_stem(resume), produced.as_str());

    info!(
        requested = %format,
        produced = %produced,
        size = bytes.len(),
        file_name = %file_name,
        "Resume exported"
    );

    Ok(ExportArtifact {
        requested: format,
        produced,
        file_name,
        bytes,
    })
}

fn file_stem(resume: &Resume) -> String {
    let base = if resume.title.is_empty() {
        DEFAULT_FILE_STEM
    } else {
        resume.title.as_str()
    };
    let stem = sanitize_file_name(base);
    if stem.is_empty() {
        DEFAULT_FILE_STEM.to_string()
    } else {
        stem
    }
}

/// Makes a title safe for use as a download file name.
///
/// Accented letters are decomposed (NFKD) so their base letter survives; then
/// everything outside `[A-Za-z0-9_-]` and whitespace is stripped, the result
/// is trimmed, whitespace runs become single hyphens, and it is lowercased.
pub fn sanitize_file_name(name: &str) -> String {
    let kept: String = name
        .nfkd()
        .filter(|c| c.is_ascii_alphanumeric() || *c == '-' || *c == '_' || c.is_whitespace())
        .collect();

    kept.split_whitespace()
        .collect::<Vec<_>>()
        .join("-")
        .to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Experience;

    fn resume_titled(title: &str) -> Resume {
        Resume {
            title: title.to_string(),
            skills: vec!["Rust".to_string()],
            experience: vec![Experience {
                company: "Acme".to_string(),
                position: "Engineer".to_string(),
                ..Experience::default()
            }],
            ..Resume::default()
        }
    }

    #[test]
    fn test_sanitize_strips_accents_and_punctuation() {
        assert_eq!(sanitize_file_name("My Résumé #1!"), "my-resume-1");
    }

    #[test]
    fn test_sanitize_collapses_whitespace_and_trims() {
        assert_eq!(sanitize_file_name("  Senior   Dev\tCV  "), "senior-dev-cv");
        assert_eq!(sanitize_file_name("snake_case-and-dash"), "snake_case-and-dash");
    }

    #[test]
    fn test_sanitize_can_yield_empty() {
        assert_eq!(sanitize_file_name("!!! ###"), "");
        assert_eq!(sanitize_file_name("\u{4e2d}\u{6587}"), "");
    }

    #[test]
    fn test_empty_title_uses_default_stem() {
        let artifact = export_resume(&resume_titled(""), ExportFormat::Txt).unwrap();
        assert_eq!(artifact.file_name, "my-resume.txt");
        let artifact = export_resume(&resume_titled("???"), ExportFormat::Txt).unwrap();
        assert_eq!(artifact.file_name, "my-resume.txt");
    }

    #[test]
    fn test_docx_downgrades_to_identical_text() {
        let resume = resume_titled("Jane Doe CV");
        let docx = export_resume(&resume, ExportFormat::Docx).unwrap();
        let txt = export_resume(&resume, ExportFormat::Txt).unwrap();

        assert_eq!(docx.requested, ExportFormat::Docx);
        assert_eq!(docx.produced, ExportFormat::Txt);
        assert!(docx.downgraded());
        assert!(!txt.downgraded());
        assert_eq!(docx.bytes, txt.bytes);
        assert_eq!(docx.file_name, "jane-doe-cv.txt");
        assert_eq!(docx.content_type(), "text/plain; charset=utf-8");
    }

    #[test]
    fn test_pdf_export() {
        let artifact = export_resume(&resume_titled("Jane"), ExportFormat::Pdf).unwrap();
        assert_eq!(artifact.produced, ExportFormat::Pdf);
        assert_eq!(artifact.file_name, "jane.pdf");
        assert_eq!(artifact.content_type(), "application/pdf");
        assert!(artifact.bytes.starts_with(b"%PDF"));
    }

    #[test]
    fn test_export_is_idempotent() {
        let resume = resume_titled("Jane");
        for format in [ExportFormat::Pdf, ExportFormat::Txt, ExportFormat::Docx] {
            assert_eq!(
                export_resume(&resume, format).unwrap(),
                export_resume(&resume, format).unwrap()
            );
        }
    }

    #[test]
    fn test_format_parsing() {
        assert_eq!("pdf".parse::<ExportFormat>(), Ok(ExportFormat::Pdf));
        assert_eq!("TXT".parse::<ExportFormat>(), Ok(ExportFormat::Txt));
        assert_eq!(" docx ".parse::<ExportFormat>(), Ok(ExportFormat::Docx));
        assert_eq!(
            "odt".parse::<ExportFormat>(),
            Err(UnsupportedFormat("odt".to_string()))
        );
    }
}
