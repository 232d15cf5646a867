//! Resume Scoring: heuristic quality assessment of a resume.
//!
//! Given the structured form and the rendered markdown, produces three
//! sub-scores (content, structure, relevance), a weighted overall score, and
//! the strengths / suggestions shown on the rating card.
//!
//! The default `HeuristicScorer` is pure and deterministic: no I/O, no shared
//! state, safe to call from any number of tasks at once. `AppState` holds an
//! `Arc<dyn ResumeScorer>` so another backend can be swapped in at startup.

pub mod engine;
pub mod feedback;
pub mod handlers;

use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::models::resume::ResumeData;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResumeScore {
    pub overall: u32,
    pub content: u32,
    pub structure: u32,
    pub relevance: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImprovementSuggestion {
    pub section: String,
    pub issue: String,
    pub suggestion: String,
}

/// One scoring pass. Never persisted; recomputed whenever the content changes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResumeAnalysis {
    pub score: ResumeScore,
    pub strengths: Vec<String>,
    pub suggestions: Vec<ImprovementSuggestion>,
}

pub trait ResumeScorer: Send + Sync {
    fn analyze(&self, data: &ResumeData, content: &str) -> Result<ResumeAnalysis, AppError>;

    /// Short label reported alongside results.
    fn backend(&self) -> &'static str;
}

/// Rule-based scorer. Infallible for any well-typed input.
pub struct HeuristicScorer;

impl ResumeScorer for HeuristicScorer {
    fn analyze(&self, data: &ResumeData, content: &str) -> Result<ResumeAnalysis, AppError> {
        Ok(analyze_resume(data, content))
    }

    fn backend(&self) -> &'static str {
        "heuristic"
    }
}

pub fn analyze_resume(data: &ResumeData, content: &str) -> ResumeAnalysis {
    let content_score = engine::content_score(data);
    let structure_score = engine::structure_score(content);
    let relevance_score = engine::relevance_score(data, content);

    let score = ResumeScore {
        overall: engine::overall_score(content_score, structure_score, relevance_score),
        content: content_score,
        structure: structure_score,
        relevance: relevance_score,
    };

    ResumeAnalysis {
        score,
        strengths: feedback::build_strengths(data, content_score, structure_score, relevance_score),
        suggestions: feedback::build_suggestions(
            data,
            content_score,
            structure_score,
            relevance_score,
        ),
    }
}
