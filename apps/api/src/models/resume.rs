use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use sqlx::FromRow;
use uuid::Uuid;

/// Title used wherever a resume has no (or a blank) title.
pub const DEFAULT_TITLE: &str = "My Resume";
/// Cosmetic template tag applied when none is set. Has no effect on rendering.
pub const DEFAULT_TEMPLATE: &str = "modern";

// ────────────────────────────────────────────────────────────────────────────
// Domain value
// ────────────────────────────────────────────────────────────────────────────

/// The canonical in-memory resume.
///
/// Every field is optional at render time: absent JSON fields deserialize as
/// empty values and the renderers omit whatever is empty. Sequence order is
/// insertion order and is never re-sorted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Resume {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<Uuid>,
    pub title: String,
    pub personal_info: PersonalInfo,
    pub education: Vec<Education>,
    pub experience: Vec<Experience>,
    pub skills: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub template_type: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PersonalInfo {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub location: String,
    pub summary: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Education {
    pub school: String,
    pub degree: String,
    pub year: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Experience {
    pub company: String,
    pub position: String,
    pub duration: String,
    pub description: String,
}

impl Resume {
    /// The title shown in rendered documents, falling back to a placeholder.
    pub fn display_title(&self) -> &str {
        if self.title.trim().is_empty() {
            DEFAULT_TITLE
        } else {
            &self.title
        }
    }

    pub fn template_type_or_default(&self) -> &str {
        self.template_type
            .as_deref()
            .filter(|t| !t.trim().is_empty())
            .unwrap_or(DEFAULT_TEMPLATE)
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Persistence
// ────────────────────────────────────────────────────────────────────────────

/// One row of the `resumes` table.
#[derive(Debug, Clone, FromRow)]
pub struct ResumeRow {
    pub id: Uuid,
    pub user_id: Uuid,
    pub title: String,
    pub personal_info: Json<PersonalInfo>,
    pub education: Json<Vec<Education>>,
    pub experience: Json<Vec<Experience>>,
    pub skills: Json<Vec<String>>,
    pub template_type: String,
    pub is_public: bool,
    pub file_path: Option<String>,
    pub file_name: Option<String>,
    pub file_size: Option<i64>,
    pub mime_type: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A stored resume as returned by the API: the domain value plus row metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResumeRecord {
    #[serde(flatten)]
    pub resume: Resume,
    pub user_id: Uuid,
    pub is_public: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file_path: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file_size: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mime_type: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl ResumeRow {
    pub fn into_record(self) -> ResumeRecord {
        ResumeRecord {
            resume: Resume {
                id: Some(self.id),
                title: self.title,
                personal_info: self.personal_info.0,
                education: self.education.0,
                experience: self.experience.0,
                skills: self.skills.0,
                template_type: Some(self.template_type),
            },
            user_id: self.user_id,
            is_public: self.is_public,
            file_path: self.file_path,
            file_name: self.file_name,
            file_size: self.file_size,
            mime_type: self.mime_type,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_fields_deserialize_as_empty() {
        let resume: Resume = serde_json::from_str(r#"{"title": "Only a title"}"#).unwrap();
        assert_eq!(resume.title, "Only a title");
        assert!(resume.id.is_none());
        assert_eq!(resume.personal_info, PersonalInfo::default());
        assert!(resume.education.is_empty());
        assert!(resume.experience.is_empty());
        assert!(resume.skills.is_empty());
    }

    #[test]
    fn test_partial_entries_tolerated() {
        let resume: Resume = serde_json::from_str(
            r#"{"experience": [{"company": "Acme"}], "personal_info": {"email": "a@b.c"}}"#,
        )
        .unwrap();
        assert_eq!(resume.experience[0].company, "Acme");
        assert_eq!(resume.experience[0].position, "");
        assert_eq!(resume.personal_info.email, "a@b.c");
    }

    #[test]
    fn test_display_title_falls_back_on_blank() {
        let mut resume = Resume::default();
        assert_eq!(resume.display_title(), DEFAULT_TITLE);
        resume.title = "   ".to_string();
        assert_eq!(resume.display_title(), DEFAULT_TITLE);
        resume.title = "Staff Engineer".to_string();
        assert_eq!(resume.display_title(), "Staff Engineer");
    }

    #[test]
    fn test_template_type_defaults_to_modern() {
        let mut resume = Resume::default();
        assert_eq!(resume.template_type_or_default(), "modern");
        resume.template_type = Some("classic".to_string());
        assert_eq!(resume.template_type_or_default(), "classic");
    }

    #[test]
    fn test_record_flattens_resume_fields() {
        let record = ResumeRecord {
            resume: Resume {
                id: Some(Uuid::nil()),
                title: "T".to_string(),
                ..Resume::default()
            },
            user_id: Uuid::nil(),
            is_public: false,
            file_path: None,
            file_name: None,
            file_size: None,
            mime_type: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["title"], "T");
        assert!(json.get("personal_info").is_some());
        assert!(json.get("file_path").is_none());
    }
}
