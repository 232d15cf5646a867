//! Sub-score rules. Each score starts from a fixed base and only ever adds
//! points, so the base is also the floor. Every score is capped at 100.

use std::sync::LazyLock;

use regex::Regex;

use crate::models::resume::ResumeData;

pub const CONTENT_BASE: u32 = 70;
pub const STRUCTURE_BASE: u32 = 65;
pub const RELEVANCE_BASE: u32 = 75;

const MAX_SCORE: u32 = 100;
const EXPERIENCE_POINTS_CAP: u32 = 15;

/// Glyph a description must contain to count as bulleted.
pub const BULLET_GLYPH: char = '•';

const SECTION_KEYWORDS: &[&str] = &["personal info", "experience", "education", "skills"];

static BULLET_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"•|–|-\s").expect("bullet pattern is valid"));

// No word boundaries: "led" also matches inside "skilled".
static ACHIEVEMENT_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)increased|improved|achieved|reduced|managed|led|created|developed|implemented",
    )
    .expect("achievement pattern is valid")
});

pub(crate) fn text_len(text: &str) -> usize {
    text.chars().count()
}

/// Completeness of the form itself: contact details, summary depth, and
/// how well each experience is described.
pub fn content_score(data: &ResumeData) -> u32 {
    let mut score = CONTENT_BASE;
    let info = &data.personal_info;

    if !info.name.is_empty() && !info.email.is_empty() && !info.phone.is_empty() {
        score += 5;
    }

    let summary_len = text_len(&info.summary);
    if summary_len > 200 {
        score += 10;
    } else if summary_len > 100 {
        score += 5;
    }

    let experience_points: u32 = data
        .experiences
        .iter()
        .map(|exp| {
            let mut points = 0;
            if !exp.title.is_empty() && !exp.company.is_empty() {
                points += 2;
            }
            if text_len(&exp.description) > 100 {
                points += 3;
            }
            if exp.description.contains(BULLET_GLYPH) {
                points += 5;
            }
            points
        })
        .sum();

    score += experience_points.min(EXPERIENCE_POINTS_CAP);
    score.min(MAX_SCORE)
}

/// Organisation of the rendered document: named sections and bullet density.
pub fn structure_score(content: &str) -> u32 {
    let mut score = STRUCTURE_BASE;
    let lowered = content.to_lowercase();

    let sections = SECTION_KEYWORDS
        .iter()
        .filter(|keyword| lowered.contains(*keyword))
        .count() as u32;
    score += sections * 5;

    let bullets = BULLET_PATTERN.find_iter(content).count();
    if bullets > 10 {
        score += 10;
    } else if bullets > 5 {
        score += 5;
    }

    score.min(MAX_SCORE)
}

/// Breadth of skills and use of achievement language. There is no job
/// description to compare against, so relevance is judged on the resume alone.
pub fn relevance_score(data: &ResumeData, content: &str) -> u32 {
    let mut score = RELEVANCE_BASE;

    let skills = data.filled_skills().len();
    if skills > 5 {
        score += 10;
    } else if skills > 3 {
        score += 5;
    }

    let achievements = ACHIEVEMENT_PATTERN.find_iter(content).count();
    if achievements > 5 {
        score += 15;
    } else if achievements > 2 {
        score += 10;
    }

    score.min(MAX_SCORE)
}

/// Weighted blend: 40% content, 30% structure, 30% relevance.
pub fn overall_score(content: u32, structure: u32, relevance: u32) -> u32 {
    (content as f64 * 0.4 + structure as f64 * 0.3 + relevance as f64 * 0.3).round() as u32
}
