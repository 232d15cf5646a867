//! Strengths and improvement suggestions derived from the sub-scores.
//!
//! Both lists are rebuilt on every pass and always carry at least one entry.

use crate::models::resume::ResumeData;
use crate::scoring::engine::{text_len, BULLET_GLYPH};
use crate::scoring::ImprovementSuggestion;

/// Below this, content-level suggestions are emitted.
const CONTENT_SUGGESTION_THRESHOLD: u32 = 80;
/// At or above this a sub-score counts as a strength; below it, structure and
/// relevance suggestions are emitted.
const STRENGTH_THRESHOLD: u32 = 85;

fn suggestion(section: &str, issue: &str, text: &str) -> ImprovementSuggestion {
    ImprovementSuggestion {
        section: section.to_string(),
        issue: issue.to_string(),
        suggestion: text.to_string(),
    }
}

/// Suggestions in fixed order: content, structure, then relevance.
pub fn build_suggestions(
    data: &ResumeData,
    content: u32,
    structure: u32,
    relevance: u32,
) -> Vec<ImprovementSuggestion> {
    let mut suggestions = Vec::new();

    if content < CONTENT_SUGGESTION_THRESHOLD {
        if text_len(&data.personal_info.summary) < 100 {
            suggestions.push(suggestion(
                "Summary",
                "Professional summary is too brief or missing",
                "Add a compelling professional summary (2-3 sentences) highlighting your key \
                 strengths and career goals.",
            ));
        }

        let has_unbulleted = data
            .experiences
            .iter()
            .any(|exp| !exp.description.is_empty() && !exp.description.contains(BULLET_GLYPH));
        if has_unbulleted {
            suggestions.push(suggestion(
                "Experience",
                "Job descriptions lack bullet points",
                "Convert paragraph descriptions into bullet points that start with action verbs \
                 and highlight achievements.",
            ));
        }
    }

    if structure < STRENGTH_THRESHOLD {
        suggestions.push(suggestion(
            "Structure",
            "Resume organization could be improved",
            "Use clear section headings and consistent formatting throughout your resume.",
        ));
    }

    if relevance < STRENGTH_THRESHOLD {
        if data.filled_skills().len() < 5 {
            suggestions.push(suggestion(
                "Skills",
                "Limited skills list",
                "Add more relevant skills to showcase your diverse capabilities.",
            ));
        }

        suggestions.push(suggestion(
            "Achievements",
            "Not enough quantifiable achievements",
            "Add measurable accomplishments with numbers (e.g., 'Increased sales by 25%' rather \
             than 'Increased sales').",
        ));
    }

    if suggestions.is_empty() {
        suggestions.push(suggestion(
            "Polish",
            "Good resume, but can still be refined",
            "Consider tailoring your resume for specific job applications by highlighting \
             relevant experiences.",
        ));
    }

    suggestions
}

pub fn build_strengths(
    data: &ResumeData,
    content: u32,
    structure: u32,
    relevance: u32,
) -> Vec<String> {
    let mut strengths = Vec::new();

    if content >= STRENGTH_THRESHOLD {
        strengths.push("Strong content with detailed professional information");
    }
    if structure >= STRENGTH_THRESHOLD {
        strengths.push("Well-structured resume with clear organization");
    }
    if relevance >= STRENGTH_THRESHOLD {
        strengths.push("Good use of relevant skills and achievements");
    }
    if text_len(&data.personal_info.summary) > 150 {
        strengths.push("Compelling professional summary");
    }
    if data
        .experiences
        .iter()
        .any(|exp| exp.description.contains(BULLET_GLYPH))
    {
        strengths.push("Effective use of bullet points in experience section");
    }
    if data.filled_skills().len() > 5 {
        strengths.push("Comprehensive skills section");
    }

    if strengths.is_empty() {
        strengths.push("Good starting point for a professional resume");
    }

    strengths.into_iter().map(String::from).collect()
}
