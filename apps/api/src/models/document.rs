use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Which document a generation request produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ContentType {
    Resume,
    CoverLetter,
}

impl ContentType {
    /// Tag stored in `ai_generated_content.content_type`.
    pub fn as_db_str(&self) -> &'static str {
        match self {
            ContentType::Resume => "resume",
            ContentType::CoverLetter => "cover_letter",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ContentType::Resume => "resume",
            ContentType::CoverLetter => "cover letter",
        }
    }
}

/// A generated resume and cover letter pair, as shown in the preview.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratedContent {
    pub resume_content: String,
    pub cover_letter_content: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct SavedResumeRow {
    pub id: Uuid,
    pub user_id: Uuid,
    pub title: String,
    pub resume_content: String,
    pub cover_letter_content: String,
    pub created_at: DateTime<Utc>,
    pub last_modified: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_content_type_wire_values() {
        let resume: ContentType = serde_json::from_str(r#""resume""#).unwrap();
        let letter: ContentType = serde_json::from_str(r#""coverLetter""#).unwrap();
        assert_eq!(resume, ContentType::Resume);
        assert_eq!(letter, ContentType::CoverLetter);
        assert!(serde_json::from_str::<ContentType>(r#""analysis""#).is_err());
    }

    #[test]
    fn test_content_type_db_tags() {
        assert_eq!(ContentType::Resume.as_db_str(), "resume");
        assert_eq!(ContentType::CoverLetter.as_db_str(), "cover_letter");
    }
}
