//! Axum route handlers for the Drafts API.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::Serialize;
use uuid::Uuid;

use crate::drafts::assist::{self, AssistOutcome};
use crate::drafts::session::{DraftSession, PersonalInfoPatch};
use crate::errors::AppError;
use crate::generation::generator::{record_generation, GenerationSource};
use crate::models::document::ContentType;
use crate::models::resume::{Education, Experience, ResumeData};
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct AssistResponse {
    pub draft: ResumeData,
    pub updated: bool,
    pub source: GenerationSource,
}

/// GET /api/v1/drafts/:user_id
pub async fn handle_get_draft(
    State(state): State<AppState>,
    Path(user_id): Path<Uuid>,
) -> Result<Json<ResumeData>, AppError> {
    let session = DraftSession::open(state.drafts.as_ref(), user_id).await?;
    Ok(Json(session.into_data()))
}

/// PUT /api/v1/drafts/:user_id
pub async fn handle_replace_draft(
    State(state): State<AppState>,
    Path(user_id): Path<Uuid>,
    Json(data): Json<ResumeData>,
) -> Result<Json<ResumeData>, AppError> {
    let mut session = DraftSession::open(state.drafts.as_ref(), user_id).await?;
    session.replace(data).await?;
    Ok(Json(session.into_data()))
}

/// DELETE /api/v1/drafts/:user_id
pub async fn handle_clear_draft(
    State(state): State<AppState>,
    Path(user_id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    let mut session = DraftSession::open(state.drafts.as_ref(), user_id).await?;
    session.clear().await?;
    Ok(StatusCode::NO_CONTENT)
}

/// PATCH /api/v1/drafts/:user_id/personal-info
pub async fn handle_update_personal_info(
    State(state): State<AppState>,
    Path(user_id): Path<Uuid>,
    Json(patch): Json<PersonalInfoPatch>,
) -> Result<Json<ResumeData>, AppError> {
    let mut session = DraftSession::open(state.drafts.as_ref(), user_id).await?;
    session.update_personal_info(patch).await?;
    Ok(Json(session.into_data()))
}

/// PUT /api/v1/drafts/:user_id/experiences
pub async fn handle_update_experiences(
    State(state): State<AppState>,
    Path(user_id): Path<Uuid>,
    Json(experiences): Json<Vec<Experience>>,
) -> Result<Json<ResumeData>, AppError> {
    let mut session = DraftSession::open(state.drafts.as_ref(), user_id).await?;
    session.update_experiences(experiences).await?;
    Ok(Json(session.into_data()))
}

/// PUT /api/v1/drafts/:user_id/education
pub async fn handle_update_education(
    State(state): State<AppState>,
    Path(user_id): Path<Uuid>,
    Json(education): Json<Vec<Education>>,
) -> Result<Json<ResumeData>, AppError> {
    let mut session = DraftSession::open(state.drafts.as_ref(), user_id).await?;
    session.update_education(education).await?;
    Ok(Json(session.into_data()))
}

/// PUT /api/v1/drafts/:user_id/skills
pub async fn handle_update_skills(
    State(state): State<AppState>,
    Path(user_id): Path<Uuid>,
    Json(skills): Json<Vec<String>>,
) -> Result<Json<ResumeData>, AppError> {
    let mut session = DraftSession::open(state.drafts.as_ref(), user_id).await?;
    session.update_skills(skills).await?;
    Ok(Json(session.into_data()))
}

/// PUT /api/v1/drafts/:user_id/certifications
pub async fn handle_update_certifications(
    State(state): State<AppState>,
    Path(user_id): Path<Uuid>,
    Json(certifications): Json<Vec<String>>,
) -> Result<Json<ResumeData>, AppError> {
    let mut session = DraftSession::open(state.drafts.as_ref(), user_id).await?;
    session.update_certifications(certifications).await?;
    Ok(Json(session.into_data()))
}

/// PUT /api/v1/drafts/:user_id/hobbies
pub async fn handle_update_hobbies(
    State(state): State<AppState>,
    Path(user_id): Path<Uuid>,
    Json(hobbies): Json<Vec<String>>,
) -> Result<Json<ResumeData>, AppError> {
    let mut session = DraftSession::open(state.drafts.as_ref(), user_id).await?;
    session.update_hobbies(hobbies).await?;
    Ok(Json(session.into_data()))
}

/// POST /api/v1/drafts/:user_id/generate/summary
pub async fn handle_generate_summary(
    State(state): State<AppState>,
    Path(user_id): Path<Uuid>,
) -> Result<Json<AssistResponse>, AppError> {
    let mut session = DraftSession::open(state.drafts.as_ref(), user_id).await?;
    let outcome = assist::generate_summary(&mut session, &state.generator).await?;
    Ok(finish_assist(&state, session, outcome).await)
}

/// POST /api/v1/drafts/:user_id/generate/skills
pub async fn handle_generate_skills(
    State(state): State<AppState>,
    Path(user_id): Path<Uuid>,
) -> Result<Json<AssistResponse>, AppError> {
    let mut session = DraftSession::open(state.drafts.as_ref(), user_id).await?;
    let outcome = assist::generate_skills(&mut session, &state.generator).await?;
    Ok(finish_assist(&state, session, outcome).await)
}

/// POST /api/v1/drafts/:user_id/generate/experiences/:index
pub async fn handle_generate_experience(
    State(state): State<AppState>,
    Path((user_id, index)): Path<(Uuid, usize)>,
) -> Result<Json<AssistResponse>, AppError> {
    let mut session = DraftSession::open(state.drafts.as_ref(), user_id).await?;
    let outcome =
        assist::generate_experience_description(&mut session, &state.generator, index).await?;
    Ok(finish_assist(&state, session, outcome).await)
}

async fn finish_assist(
    state: &AppState,
    session: DraftSession<'_>,
    outcome: AssistOutcome,
) -> Json<AssistResponse> {
    if outcome.source == GenerationSource::Remote {
        record_generation(
            &state.db,
            session.user_id(),
            &outcome.input,
            ContentType::Resume,
            &outcome.content,
        )
        .await;
    }

    Json(AssistResponse {
        draft: session.into_data(),
        updated: outcome.updated,
        source: outcome.source,
    })
}
