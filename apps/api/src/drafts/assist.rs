//! Generation-assisted form filling.
//!
//! Each flow generates a full resume from the draft, pulls one section back
//! out of the markdown and writes it into the form. A flow that extracts
//! nothing leaves the draft exactly as it was. Before writing, the draft is
//! re-read from the store so edits saved during generation are kept.

use tracing::info;

use crate::drafts::session::DraftSession;
use crate::errors::AppError;
use crate::extraction::{extract_experience_description, extract_skills, extract_summary};
use crate::generation::generator::{FallbackGenerator, GenerationSource};
use crate::models::document::ContentType;
use crate::models::resume::ResumeData;

/// What one assisted flow did.
#[derive(Debug)]
pub struct AssistOutcome {
    pub updated: bool,
    pub source: GenerationSource,
    /// The form the document was generated from.
    pub input: ResumeData,
    pub content: String,
}

async fn generate_resume(
    generator: &FallbackGenerator,
    input: ResumeData,
) -> Result<(ResumeData, String, GenerationSource), AppError> {
    let generated = generator
        .generate(&input, ContentType::Resume, false)
        .await?;
    Ok((input, generated.content, generated.source))
}

pub async fn generate_summary(
    session: &mut DraftSession<'_>,
    generator: &FallbackGenerator,
) -> Result<AssistOutcome, AppError> {
    let (input, content, source) = generate_resume(generator, session.data().clone()).await?;

    let updated = match extract_summary(&content) {
        Some(summary) => {
            session.reload().await?;
            session.apply_summary(Some(summary))
        }
        None => false,
    };
    if updated {
        session.save().await?;
    }
    info!(
        "Summary assist for user {}: updated={updated}",
        session.user_id()
    );

    Ok(AssistOutcome {
        updated,
        source,
        input,
        content,
    })
}

pub async fn generate_skills(
    session: &mut DraftSession<'_>,
    generator: &FallbackGenerator,
) -> Result<AssistOutcome, AppError> {
    let has_described_experience = session
        .data()
        .experiences
        .iter()
        .any(|exp| !exp.title.is_empty() && !exp.description.is_empty());
    if !has_described_experience {
        return Err(AppError::Validation(
            "Add an experience with a title and description before generating skills".to_string(),
        ));
    }

    let (input, content, source) = generate_resume(generator, session.data().clone()).await?;

    let skills = extract_skills(&content);
    let updated = if skills.is_empty() {
        false
    } else {
        session.reload().await?;
        session.apply_skills(skills)
    };
    if updated {
        session.save().await?;
    }
    info!(
        "Skills assist for user {}: updated={updated}",
        session.user_id()
    );

    Ok(AssistOutcome {
        updated,
        source,
        input,
        content,
    })
}

/// Rewrites the description of the experience at `index`. The resume is
/// generated from the draft narrowed to that single experience. Nothing is
/// written if the row at `index` was retitled or removed meanwhile.
pub async fn generate_experience_description(
    session: &mut DraftSession<'_>,
    generator: &FallbackGenerator,
    index: usize,
) -> Result<AssistOutcome, AppError> {
    let experience = session
        .data()
        .experiences
        .get(index)
        .cloned()
        .ok_or_else(|| AppError::NotFound(format!("Experience {index} not found")))?;
    if experience.title.is_empty() || experience.company.is_empty() {
        return Err(AppError::Validation(
            "The experience needs a title and company before generating a description"
                .to_string(),
        ));
    }

    let title = experience.title.clone();
    let focused = ResumeData {
        experiences: vec![experience],
        ..session.data().clone()
    };
    let (input, content, source) = generate_resume(generator, focused).await?;

    let updated = match extract_experience_description(&content, &title) {
        Some(description) => {
            session.reload().await?;
            let same_row = session
                .data()
                .experiences
                .get(index)
                .is_some_and(|exp| exp.title == title);
            same_row && session.apply_experience_description(index, Some(description))
        }
        None => false,
    };
    if updated {
        session.save().await?;
    }
    info!(
        "Experience {index} assist for user {}: updated={updated}",
        session.user_id()
    );

    Ok(AssistOutcome {
        updated,
        source,
        input,
        content,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use async_trait::async_trait;
    use uuid::Uuid;

    use crate::drafts::store::{DraftStore, MemoryDraftStore};
    use crate::generation::generator::tests::{FailingGenerator, StubGenerator};
    use crate::generation::generator::ContentGenerator;
    use crate::models::resume::Experience;

    const REMOTE_RESUME: &str = "# Dana Scully
## Professional Summary
Forensic specialist with a record of closing hard cases.

## Experience
### Special Agent at FBI
**1993 - 2002 | Washington, DC**

- Investigated 200+ unexplained cases
- Authored field autopsy protocols

## Skills
- Forensic pathology
- Interviewing
";

    fn remote(markdown: &str) -> FallbackGenerator {
        FallbackGenerator::new(Some(Arc::new(StubGenerator::answering(markdown))))
    }

    /// Saves an edit to the same draft while "generating", like a PUT landing
    /// mid-request.
    struct EditingGenerator {
        store: Arc<MemoryDraftStore>,
        user_id: Uuid,
        edit: fn(&mut ResumeData),
    }

    #[async_trait]
    impl ContentGenerator for EditingGenerator {
        async fn generate(
            &self,
            _data: &ResumeData,
            _content_type: ContentType,
        ) -> Result<String, AppError> {
            let mut data = self.store.load(self.user_id).await?.unwrap_or_default();
            (self.edit)(&mut data);
            self.store.save(self.user_id, &data).await?;
            Ok(REMOTE_RESUME.to_string())
        }

        fn backend(&self) -> &'static str {
            "editing"
        }
    }

    fn editing(
        store: &Arc<MemoryDraftStore>,
        user_id: Uuid,
        edit: fn(&mut ResumeData),
    ) -> FallbackGenerator {
        FallbackGenerator::new(Some(Arc::new(EditingGenerator {
            store: store.clone(),
            user_id,
            edit,
        })))
    }

    fn agent() -> Experience {
        Experience {
            title: "Special Agent".to_string(),
            company: "FBI".to_string(),
            ..Experience::default()
        }
    }

    #[tokio::test]
    async fn test_summary_is_applied_and_saved() {
        let store = MemoryDraftStore::new();
        let user = Uuid::new_v4();
        let mut session = DraftSession::open(&store, user).await.unwrap();

        let outcome = generate_summary(&mut session, &remote(REMOTE_RESUME))
            .await
            .unwrap();
        assert!(outcome.updated);
        assert_eq!(outcome.source, GenerationSource::Remote);

        let saved = store.load(user).await.unwrap().unwrap();
        assert_eq!(
            saved.personal_info.summary,
            "Forensic specialist with a record of closing hard cases."
        );
    }

    #[tokio::test]
    async fn test_missing_section_leaves_draft_untouched() {
        let store = MemoryDraftStore::new();
        let user = Uuid::new_v4();
        let mut session = DraftSession::open(&store, user).await.unwrap();
        session.apply_summary(Some("Mine".to_string()));

        let outcome = generate_summary(&mut session, &remote("# Dana\n## Summary\nOther"))
            .await
            .unwrap();
        assert!(!outcome.updated);
        assert_eq!(session.data().personal_info.summary, "Mine");
        assert!(store.load(user).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_skills_require_described_experience() {
        let store = MemoryDraftStore::new();
        let mut session = DraftSession::open(&store, Uuid::new_v4()).await.unwrap();
        session.update_experiences(vec![agent()]).await.unwrap();

        let result = generate_skills(&mut session, &remote(REMOTE_RESUME)).await;
        assert!(matches!(result, Err(AppError::Validation(_))));
    }

    #[tokio::test]
    async fn test_skills_replace_form_list() {
        let store = MemoryDraftStore::new();
        let mut session = DraftSession::open(&store, Uuid::new_v4()).await.unwrap();
        session
            .update_experiences(vec![Experience {
                description: "Field work".to_string(),
                ..agent()
            }])
            .await
            .unwrap();

        let outcome = generate_skills(&mut session, &remote(REMOTE_RESUME))
            .await
            .unwrap();
        assert!(outcome.updated);
        assert_eq!(
            session.data().skills,
            vec!["Forensic pathology", "Interviewing"]
        );
    }

    #[tokio::test]
    async fn test_experience_description_from_focused_draft() {
        let store = MemoryDraftStore::new();
        let mut session = DraftSession::open(&store, Uuid::new_v4()).await.unwrap();
        let other = Experience {
            title: "Resident".to_string(),
            company: "Georgetown".to_string(),
            ..Experience::default()
        };
        session
            .update_experiences(vec![other, agent()])
            .await
            .unwrap();

        let outcome = generate_experience_description(&mut session, &remote(REMOTE_RESUME), 1)
            .await
            .unwrap();
        assert!(outcome.updated);
        assert_eq!(outcome.input.experiences, vec![agent()]);
        assert_eq!(
            session.data().experiences[1].description,
            "• Investigated 200+ unexplained cases\n• Authored field autopsy protocols"
        );
        assert!(session.data().experiences[0].description.is_empty());
    }

    #[tokio::test]
    async fn test_experience_requires_title_and_company() {
        let store = MemoryDraftStore::new();
        let mut session = DraftSession::open(&store, Uuid::new_v4()).await.unwrap();
        let generator = remote(REMOTE_RESUME);

        assert!(matches!(
            generate_experience_description(&mut session, &generator, 0).await,
            Err(AppError::Validation(_))
        ));
        assert!(matches!(
            generate_experience_description(&mut session, &generator, 3).await,
            Err(AppError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_edits_saved_during_generation_survive() {
        let store = Arc::new(MemoryDraftStore::new());
        let user = Uuid::new_v4();
        let mut session = DraftSession::open(store.as_ref(), user).await.unwrap();
        let generator = editing(&store, user, |data| {
            data.skills = vec!["Rust".to_string(), "Go".to_string()];
        });

        let outcome = generate_summary(&mut session, &generator).await.unwrap();
        assert!(outcome.updated);

        let saved = store.load(user).await.unwrap().unwrap();
        assert_eq!(saved.skills, vec!["Rust", "Go"]);
        assert_eq!(
            saved.personal_info.summary,
            "Forensic specialist with a record of closing hard cases."
        );
        assert_eq!(session.data(), &saved);
    }

    #[tokio::test]
    async fn test_retitled_experience_is_not_overwritten() {
        let store = Arc::new(MemoryDraftStore::new());
        let user = Uuid::new_v4();
        let mut session = DraftSession::open(store.as_ref(), user).await.unwrap();
        session.update_experiences(vec![agent()]).await.unwrap();
        let generator = editing(&store, user, |data| {
            data.experiences[0].title = "Professor".to_string();
        });

        let outcome = generate_experience_description(&mut session, &generator, 0)
            .await
            .unwrap();
        assert!(!outcome.updated);

        let saved = store.load(user).await.unwrap().unwrap();
        assert_eq!(saved.experiences[0].title, "Professor");
        assert!(saved.experiences[0].description.is_empty());
    }

    #[tokio::test]
    async fn test_remote_failure_uses_demo_content() {
        let store = MemoryDraftStore::new();
        let mut session = DraftSession::open(&store, Uuid::new_v4()).await.unwrap();
        let generator = FallbackGenerator::new(Some(Arc::new(FailingGenerator)));

        let outcome = generate_summary(&mut session, &generator).await.unwrap();
        assert_eq!(outcome.source, GenerationSource::Demo);
        assert!(outcome.updated);
        assert_eq!(
            session.data().personal_info.summary,
            "A dedicated professional with experience in various fields seeking new opportunities."
        );
    }
}
