//! A user's resume draft, opened for one request.
//!
//! Every `update_*` call mutates the form and persists it before returning.
//! The `apply_*` calls feed extracted markdown back into the form and leave
//! persistence to the caller, so several can be batched into one `save`.

use serde::Deserialize;
use uuid::Uuid;

use crate::drafts::store::DraftStore;
use crate::errors::AppError;
use crate::models::resume::{Education, Experience, ResumeData};

/// Personal info fields to overwrite. Absent fields keep their current value.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonalInfoPatch {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub location: Option<String>,
    pub summary: Option<String>,
    pub job_title: Option<String>,
    pub website: Option<String>,
    pub linkedin: Option<String>,
    pub github: Option<String>,
}

pub struct DraftSession<'a> {
    user_id: Uuid,
    data: ResumeData,
    store: &'a dyn DraftStore,
}

impl<'a> DraftSession<'a> {
    /// Loads the stored draft, or the blank form when there is none.
    pub async fn open(store: &'a dyn DraftStore, user_id: Uuid) -> Result<Self, AppError> {
        let data = store.load(user_id).await?.unwrap_or_default();
        Ok(Self {
            user_id,
            data,
            store,
        })
    }

    pub fn user_id(&self) -> Uuid {
        self.user_id
    }

    pub fn data(&self) -> &ResumeData {
        &self.data
    }

    pub fn into_data(self) -> ResumeData {
        self.data
    }

    pub async fn save(&self) -> Result<(), AppError> {
        self.store.save(self.user_id, &self.data).await
    }

    pub async fn update_personal_info(&mut self, patch: PersonalInfoPatch) -> Result<(), AppError> {
        let info = &mut self.data.personal_info;
        for (field, value) in [
            (&mut info.name, patch.name),
            (&mut info.email, patch.email),
            (&mut info.phone, patch.phone),
            (&mut info.location, patch.location),
            (&mut info.summary, patch.summary),
        ] {
            if let Some(value) = value {
                *field = value;
            }
        }
        for (field, value) in [
            (&mut info.job_title, patch.job_title),
            (&mut info.website, patch.website),
            (&mut info.linkedin, patch.linkedin),
            (&mut info.github, patch.github),
        ] {
            if value.is_some() {
                *field = value;
            }
        }
        self.save().await
    }

    /// The form always keeps at least one experience row.
    pub async fn update_experiences(&mut self, experiences: Vec<Experience>) -> Result<(), AppError> {
        require_experience(&experiences)?;
        self.data.experiences = experiences;
        self.save().await
    }

    /// The form always keeps at least one education row.
    pub async fn update_education(&mut self, education: Vec<Education>) -> Result<(), AppError> {
        require_education(&education)?;
        self.data.education = education;
        self.save().await
    }

    pub async fn update_skills(&mut self, skills: Vec<String>) -> Result<(), AppError> {
        self.data.skills = with_placeholder_row(skills);
        self.save().await
    }

    pub async fn update_certifications(&mut self, certifications: Vec<String>) -> Result<(), AppError> {
        self.data.certifications = with_placeholder_row(certifications);
        self.save().await
    }

    pub async fn update_hobbies(&mut self, hobbies: Vec<String>) -> Result<(), AppError> {
        self.data.hobbies = with_placeholder_row(hobbies);
        self.save().await
    }

    /// Swaps in a whole form. The same row rules as the per-section updates apply.
    pub async fn replace(&mut self, mut data: ResumeData) -> Result<(), AppError> {
        require_experience(&data.experiences)?;
        require_education(&data.education)?;
        for list in [
            &mut data.skills,
            &mut data.certifications,
            &mut data.hobbies,
        ] {
            *list = with_placeholder_row(std::mem::take(list));
        }
        self.data = data;
        self.save().await
    }

    /// Re-reads the stored draft, dropping any local changes.
    pub async fn reload(&mut self) -> Result<(), AppError> {
        self.data = self.store.load(self.user_id).await?.unwrap_or_default();
        Ok(())
    }

    /// Resets to the blank form and deletes the stored draft.
    pub async fn clear(&mut self) -> Result<(), AppError> {
        self.data = ResumeData::default();
        self.store.clear(self.user_id).await
    }

    // ── Extraction appliers ─────────────────────────────────────────────────
    // Each returns whether the field was written. Empty input is ignored.

    pub fn apply_summary(&mut self, summary: Option<String>) -> bool {
        match summary.filter(|s| !s.trim().is_empty()) {
            Some(summary) => {
                self.data.personal_info.summary = summary;
                true
            }
            None => false,
        }
    }

    pub fn apply_skills(&mut self, skills: Vec<String>) -> bool {
        if skills.is_empty() {
            return false;
        }
        self.data.skills = skills;
        true
    }

    pub fn apply_experience_description(&mut self, index: usize, description: Option<String>) -> bool {
        let Some(description) = description.filter(|d| !d.trim().is_empty()) else {
            return false;
        };
        match self.data.experiences.get_mut(index) {
            Some(experience) => {
                experience.description = description;
                true
            }
            None => false,
        }
    }
}

fn require_experience(experiences: &[Experience]) -> Result<(), AppError> {
    if experiences.is_empty() {
        return Err(AppError::Validation(
            "At least one experience entry is required".to_string(),
        ));
    }
    Ok(())
}

fn require_education(education: &[Education]) -> Result<(), AppError> {
    if education.is_empty() {
        return Err(AppError::Validation(
            "At least one education entry is required".to_string(),
        ));
    }
    Ok(())
}

/// A list section emptied by the user keeps one blank input row.
fn with_placeholder_row(items: Vec<String>) -> Vec<String> {
    if items.is_empty() {
        vec![String::new()]
    } else {
        items
    }
}
