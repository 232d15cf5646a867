//! Axum route handlers for the Generation API.

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::AppError;
use crate::generation::generator::{record_generation, GenerationSource};
use crate::models::document::ContentType;
use crate::models::resume::ResumeData;
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct GenerateRequest {
    /// Absent for visitors who are not signed in.
    #[serde(default)]
    pub user_id: Option<Uuid>,
    pub resume_data: ResumeData,
    pub content_type: ContentType,
}

#[derive(Debug, Serialize)]
pub struct GenerateResponse {
    pub content: String,
    pub source: GenerationSource,
}

#[derive(Debug, Deserialize)]
pub struct GeneratePackageRequest {
    #[serde(default)]
    pub user_id: Option<Uuid>,
    pub resume_data: ResumeData,
}

#[derive(Debug, Serialize)]
pub struct GeneratePackageResponse {
    pub resume_content: String,
    pub cover_letter_content: String,
    pub source: GenerationSource,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/generate
///
/// Generates one document from the submitted form.
pub async fn handle_generate(
    State(state): State<AppState>,
    Json(request): Json<GenerateRequest>,
) -> Result<Json<GenerateResponse>, AppError> {
    let generated = state
        .generator
        .generate(
            &request.resume_data,
            request.content_type,
            request.user_id.is_none(),
        )
        .await?;

    if let (Some(user_id), GenerationSource::Remote) = (request.user_id, generated.source) {
        record_generation(
            &state.db,
            user_id,
            &request.resume_data,
            request.content_type,
            &generated.content,
        )
        .await;
    }

    Ok(Json(GenerateResponse {
        content: generated.content,
        source: generated.source,
    }))
}

/// POST /api/v1/generate/package
///
/// Generates a resume and a matching cover letter from the same form.
pub async fn handle_generate_package(
    State(state): State<AppState>,
    Json(request): Json<GeneratePackageRequest>,
) -> Result<Json<GeneratePackageResponse>, AppError> {
    let (package, source) = state
        .generator
        .generate_package(&request.resume_data, request.user_id.is_none())
        .await?;

    if let (Some(user_id), GenerationSource::Remote) = (request.user_id, source) {
        record_generation(
            &state.db,
            user_id,
            &request.resume_data,
            ContentType::Resume,
            &package.resume_content,
        )
        .await;
        record_generation(
            &state.db,
            user_id,
            &request.resume_data,
            ContentType::CoverLetter,
            &package.cover_letter_content,
        )
        .await;
    }

    Ok(Json(GeneratePackageResponse {
        resume_content: package.resume_content,
        cover_letter_content: package.cover_letter_content,
        source,
    }))
}
