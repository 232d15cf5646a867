//! Content generation: pluggable generators plus the demo fallback.
//!
//! Every request goes through `FallbackGenerator`. A remote failure never
//! reaches the caller; the demo templates answer instead and the response is
//! tagged with where its content came from.

use std::sync::Arc;

use async_trait::async_trait;
use serde::Serialize;
use sqlx::PgPool;
use tracing::{info, warn};
use uuid::Uuid;

use crate::errors::AppError;
use crate::generation::demo::{demo_cover_letter, demo_resume};
use crate::generation::prompts::{build_prompt, system_prompt};
use crate::llm_client::LlmClient;
use crate::models::document::{ContentType, GeneratedContent};
use crate::models::resume::ResumeData;

// ────────────────────────────────────────────────────────────────────────────
// Trait definition
// ────────────────────────────────────────────────────────────────────────────

/// A source of generated markdown. Carried in `AppState` behind
/// `FallbackGenerator`.
#[async_trait]
pub trait ContentGenerator: Send + Sync {
    async fn generate(
        &self,
        data: &ResumeData,
        content_type: ContentType,
    ) -> Result<String, AppError>;

    fn backend(&self) -> &'static str;
}

// ────────────────────────────────────────────────────────────────────────────
// LlmGenerator
// ────────────────────────────────────────────────────────────────────────────

pub struct LlmGenerator(pub LlmClient);

#[async_trait]
impl ContentGenerator for LlmGenerator {
    async fn generate(
        &self,
        data: &ResumeData,
        content_type: ContentType,
    ) -> Result<String, AppError> {
        let prompt = build_prompt(data, content_type);
        let system = system_prompt(content_type);

        self.0
            .call_text(&prompt, &system)
            .await
            .map_err(|e| AppError::Llm(format!("{} generation failed: {e}", content_type.label())))
    }

    fn backend(&self) -> &'static str {
        "anthropic"
    }
}

// ────────────────────────────────────────────────────────────────────────────
// DemoGenerator
// ────────────────────────────────────────────────────────────────────────────

/// Local templates. Never fails.
pub struct DemoGenerator;

#[async_trait]
impl ContentGenerator for DemoGenerator {
    async fn generate(
        &self,
        data: &ResumeData,
        content_type: ContentType,
    ) -> Result<String, AppError> {
        Ok(match content_type {
            ContentType::Resume => demo_resume(data),
            ContentType::CoverLetter => {
                demo_cover_letter(data, chrono::Local::now().date_naive())
            }
        })
    }

    fn backend(&self) -> &'static str {
        "demo"
    }
}

// ────────────────────────────────────────────────────────────────────────────
// FallbackGenerator
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum GenerationSource {
    Remote,
    Demo,
}

#[derive(Debug, Clone)]
pub struct Generated {
    pub content: String,
    pub source: GenerationSource,
}

pub struct FallbackGenerator {
    primary: Option<Arc<dyn ContentGenerator>>,
    fallback: Arc<dyn ContentGenerator>,
}

impl FallbackGenerator {
    /// `primary` is `None` when no completion service is configured.
    pub fn new(primary: Option<Arc<dyn ContentGenerator>>) -> Self {
        Self {
            primary,
            fallback: Arc::new(DemoGenerator),
        }
    }

    pub fn primary_backend(&self) -> Option<&'static str> {
        self.primary.as_ref().map(|p| p.backend())
    }

    /// Generates one document. Anonymous callers are served by the fallback
    /// without touching the primary.
    pub async fn generate(
        &self,
        data: &ResumeData,
        content_type: ContentType,
        anonymous: bool,
    ) -> Result<Generated, AppError> {
        if let Some(primary) = self.remote_for(anonymous) {
            match primary.generate(data, content_type).await {
                Ok(content) => {
                    info!(
                        "Generated {} via {} ({} chars)",
                        content_type.label(),
                        primary.backend(),
                        content.chars().count()
                    );
                    return Ok(Generated {
                        content,
                        source: GenerationSource::Remote,
                    });
                }
                Err(e) => warn!(
                    "{} generation via {} failed, using {}: {e}",
                    content_type.label(),
                    primary.backend(),
                    self.fallback.backend()
                ),
            }
        }

        Ok(Generated {
            content: self.fallback.generate(data, content_type).await?,
            source: GenerationSource::Demo,
        })
    }

    /// Generates a resume and a cover letter together. If either remote call
    /// fails both documents come from the fallback, so a package never mixes
    /// sources.
    pub async fn generate_package(
        &self,
        data: &ResumeData,
        anonymous: bool,
    ) -> Result<(GeneratedContent, GenerationSource), AppError> {
        if let Some(primary) = self.remote_for(anonymous) {
            let remote = async {
                let resume_content = primary.generate(data, ContentType::Resume).await?;
                let cover_letter_content =
                    primary.generate(data, ContentType::CoverLetter).await?;
                Ok::<_, AppError>(GeneratedContent {
                    resume_content,
                    cover_letter_content,
                })
            };

            match remote.await {
                Ok(package) => {
                    info!("Generated resume package via {}", primary.backend());
                    return Ok((package, GenerationSource::Remote));
                }
                Err(e) => warn!(
                    "Package generation via {} failed, using {}: {e}",
                    primary.backend(),
                    self.fallback.backend()
                ),
            }
        }

        let package = GeneratedContent {
            resume_content: self.fallback.generate(data, ContentType::Resume).await?,
            cover_letter_content: self
                .fallback
                .generate(data, ContentType::CoverLetter)
                .await?,
        };
        Ok((package, GenerationSource::Demo))
    }

    fn remote_for(&self, anonymous: bool) -> Option<&Arc<dyn ContentGenerator>> {
        if anonymous {
            None
        } else {
            self.primary.as_ref()
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// History
// ────────────────────────────────────────────────────────────────────────────

/// Stores a remote generation in `ai_generated_content`. Failures are logged
/// only; the user already has their content.
pub async fn record_generation(
    pool: &PgPool,
    user_id: Uuid,
    data: &ResumeData,
    content_type: ContentType,
    content: &str,
) {
    let result = sqlx::query(
        r#"
        INSERT INTO ai_generated_content (user_id, prompt, content, content_type)
        VALUES ($1, $2, $3, $4)
        "#,
    )
    .bind(user_id)
    .bind(build_prompt(data, content_type))
    .bind(content)
    .bind(content_type.as_db_str())
    .execute(pool)
    .await;

    if let Err(e) = result {
        warn!(
            "Failed to record generated {} for user {user_id}: {e}",
            content_type.label()
        );
    }
}
