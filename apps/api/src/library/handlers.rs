//! Axum route handlers for the Resume Library API.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::errors::AppError;
use crate::library::{
    delete_resume, export_markdown, get_resume, list_resumes, save_resume, ExportKind,
    ExportedFile,
};
use crate::models::document::{GeneratedContent, SavedResumeRow};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct SaveResumeRequest {
    pub user_id: Uuid,
    pub name: String,
    pub content: GeneratedContent,
}

#[derive(Debug, Deserialize)]
pub struct UserIdQuery {
    pub user_id: Uuid,
}

#[derive(Debug, Deserialize)]
pub struct ExportQuery {
    pub user_id: Uuid,
    pub kind: ExportKind,
}

/// POST /api/v1/library
pub async fn handle_save_resume(
    State(state): State<AppState>,
    Json(request): Json<SaveResumeRequest>,
) -> Result<(StatusCode, Json<SavedResumeRow>), AppError> {
    if request.name.trim().is_empty() {
        return Err(AppError::Validation("name cannot be empty".to_string()));
    }
    let row = save_resume(&state.db, request.user_id, &request.name, &request.content).await?;
    Ok((StatusCode::CREATED, Json(row)))
}

/// GET /api/v1/library?user_id=
pub async fn handle_list_resumes(
    State(state): State<AppState>,
    Query(params): Query<UserIdQuery>,
) -> Result<Json<Vec<SavedResumeRow>>, AppError> {
    Ok(Json(list_resumes(&state.db, params.user_id).await?))
}

/// DELETE /api/v1/library/:id?user_id=
pub async fn handle_delete_resume(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Query(params): Query<UserIdQuery>,
) -> Result<StatusCode, AppError> {
    delete_resume(&state.db, params.user_id, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/v1/library/:id/export?user_id=&kind=resume|cover_letter
pub async fn handle_export_resume(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Query(params): Query<ExportQuery>,
) -> Result<Json<ExportedFile>, AppError> {
    let row = get_resume(&state.db, params.user_id, id).await?;
    let exported = export_markdown(&state.s3, &state.config.s3_bucket, &row, params.kind).await?;
    Ok(Json(exported))
}
