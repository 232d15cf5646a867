//! Axum route handlers for resume analysis.

use std::time::Duration;

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::info;

use crate::errors::AppError;
use crate::models::resume::ResumeData;
use crate::scoring::{ResumeAnalysis, ResumeScorer};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct AnalyzeRequest {
    /// Decoded by the handler so that a malformed form surfaces as an
    /// analysis failure rather than a generic extractor rejection.
    pub resume_data: Value,
    #[serde(default)]
    pub resume_content: String,
}

#[derive(Debug, Serialize)]
pub struct AnalyzeResponse {
    #[serde(flatten)]
    pub analysis: ResumeAnalysis,
    pub scorer_backend: String,
}

/// POST /api/v1/resumes/analyze
///
/// Scores a resume from its form data and rendered markdown.
pub async fn handle_analyze(
    State(state): State<AppState>,
    Json(request): Json<AnalyzeRequest>,
) -> Result<Json<AnalyzeResponse>, AppError> {
    if state.config.analysis_delay_ms > 0 {
        tokio::time::sleep(Duration::from_millis(state.config.analysis_delay_ms)).await;
    }

    let response = run_analysis(state.scorer.as_ref(), request)?;
    info!(
        "Resume analyzed: overall={} ({})",
        response.analysis.score.overall, response.scorer_backend
    );
    Ok(Json(response))
}

fn run_analysis(
    scorer: &dyn ResumeScorer,
    request: AnalyzeRequest,
) -> Result<AnalyzeResponse, AppError> {
    let data: ResumeData = serde_json::from_value(request.resume_data)
        .map_err(|e| AppError::AnalysisFailed(format!("resume_data has an invalid shape: {e}")))?;

    let analysis = scorer
        .analyze(&data, &request.resume_content)
        .map_err(|e| AppError::AnalysisFailed(e.to_string()))?;

    Ok(AnalyzeResponse {
        analysis,
        scorer_backend: scorer.backend().to_string(),
    })
}
