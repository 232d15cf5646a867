// All LLM prompt constants for the Generation module.
// Reuses cross-cutting fragments from llm_client::prompts.

use crate::llm_client::prompts::{MARKDOWN_FORMAT_INSTRUCTION, WRITER_PERSONA};
use crate::models::document::ContentType;
use crate::models::resume::ResumeData;

/// Resume prompt template.
/// Replace: {name}, {summary}, {experiences}, {education}, {skills}, {extras},
///          {format_instruction}
pub const RESUME_PROMPT_TEMPLATE: &str = r#"Create a professional resume for {name}, who has the following information:

Professional Summary: {summary}

Experience:
{experiences}

Education:
{education}

Skills: {skills}
{extras}
Please create a well-formatted, professional resume in markdown format. Be concise, highlight achievements, and focus on relevant skills and experiences.

Include these sections with exactly these headings: `## Professional Summary`, `## Experience`, `## Education`, `## Skills`. Give each job its own `### {title} at {company}` heading.

{format_instruction}"#;

/// Cover letter prompt template.
/// Replace: {name}, {summary}, {experiences}, {skills}, {format_instruction}
pub const COVER_LETTER_PROMPT_TEMPLATE: &str = r#"Create a professional cover letter for {name}, who has the following information:

Professional Summary: {summary}

Experience:
{experiences}

Skills: {skills}

Please write a general cover letter that can be customized for specific job applications. The cover letter should be in markdown format, professional in tone, and highlight key skills and experiences. Do not reference a specific company, but leave placeholders like [Company Name] and [Position] that can be filled in later.

{format_instruction}"#;

pub fn system_prompt(content_type: ContentType) -> String {
    format!(
        "{WRITER_PERSONA} Create professional {} content based on the user's information.",
        content_type.label()
    )
}

pub fn build_prompt(data: &ResumeData, content_type: ContentType) -> String {
    match content_type {
        ContentType::Resume => build_resume_prompt(data),
        ContentType::CoverLetter => build_cover_letter_prompt(data),
    }
}

pub fn build_resume_prompt(data: &ResumeData) -> String {
    let mut extras = String::new();
    let certifications = data.filled_certifications();
    if !certifications.is_empty() {
        extras.push_str(&format!("\nCertifications: {}\n", certifications.join(", ")));
    }
    let hobbies = data.filled_hobbies();
    if !hobbies.is_empty() {
        extras.push_str(&format!("\nHobbies & Interests: {}\n", hobbies.join(", ")));
    }

    fill_template(
        RESUME_PROMPT_TEMPLATE,
        &[
            ("name", data.personal_info.name.as_str()),
            ("summary", summary_or_placeholder(data)),
            ("experiences", experience_lines(data).as_str()),
            ("education", education_lines(data).as_str()),
            ("skills", data.filled_skills().join(", ").as_str()),
            ("extras", extras.as_str()),
            ("format_instruction", MARKDOWN_FORMAT_INSTRUCTION),
        ],
    )
}

pub fn build_cover_letter_prompt(data: &ResumeData) -> String {
    fill_template(
        COVER_LETTER_PROMPT_TEMPLATE,
        &[
            ("name", data.personal_info.name.as_str()),
            ("summary", summary_or_placeholder(data)),
            ("experiences", experience_lines(data).as_str()),
            ("skills", data.filled_skills().join(", ").as_str()),
            ("format_instruction", MARKDOWN_FORMAT_INSTRUCTION),
        ],
    )
}

/// Substitutes `{key}` placeholders in a single pass over the template.
/// Inserted values are never rescanned, and unknown keys are left as written.
fn fill_template(template: &str, values: &[(&str, &str)]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(open) = rest.find('{') {
        out.push_str(&rest[..open]);
        let after = &rest[open + 1..];
        let value = after.find('}').and_then(|close| {
            let key = &after[..close];
            values
                .iter()
                .find(|(k, _)| *k == key)
                .map(|(_, v)| (*v, close))
        });
        match value {
            Some((value, close)) => {
                out.push_str(value);
                rest = &after[close + 1..];
            }
            None => {
                out.push('{');
                rest = after;
            }
        }
    }
    out.push_str(rest);
    out
}

fn summary_or_placeholder(data: &ResumeData) -> &str {
    if data.personal_info.summary.is_empty() {
        "No summary provided"
    } else {
        &data.personal_info.summary
    }
}

fn experience_lines(data: &ResumeData) -> String {
    data.experiences
        .iter()
        .map(|exp| {
            let description = if exp.description.is_empty() {
                "No description provided"
            } else {
                &exp.description
            };
            format!(
                "{} at {} ({} - {})\n  {}",
                exp.title, exp.company, exp.start_date, exp.end_date, description
            )
        })
        .collect::<Vec<_>>()
        .join("\n\n")
}

fn education_lines(data: &ResumeData) -> String {
    data.education
        .iter()
        .map(|edu| {
            format!(
                "{} in {} from {} ({} - {})",
                edu.degree, edu.field, edu.school, edu.start_date, edu.end_date
            )
        })
        .collect::<Vec<_>>()
        .join("\n\n")
}
