//! Demo documents rendered locally from the form data.
//!
//! Served to anonymous users and whenever the completion service is
//! unavailable. Missing fields get visible placeholders so the preview still
//! reads as a finished document.

use chrono::NaiveDate;

use crate::models::resume::ResumeData;

const PLACEHOLDER_NAME: &str = "Your Name";
const PLACEHOLDER_EMAIL: &str = "your.email@example.com";
const PLACEHOLDER_PHONE: &str = "(123) 456-7890";
const PLACEHOLDER_LOCATION: &str = "City, State";
const PLACEHOLDER_SUMMARY: &str =
    "A dedicated professional with experience in various fields seeking new opportunities.";
const PLACEHOLDER_DESCRIPTION: &str = "• Responsibility 1\n• Responsibility 2\n• Achievement 1";
const CANNED_EXPERIENCE: &str = "### Position at Company\n**Date - Present | Location**\n\n\
    • Achieved significant results\n• Led important projects\n\
    • Collaborated with cross-functional teams";
const CANNED_EDUCATION: &str = "### Degree in Field\n**University Name | Year - Year**";
const CANNED_SKILLS: &str = "• Skill 1\n• Skill 2\n• Skill 3\n• Skill 4";

/// Length of the description excerpt quoted in the cover letter.
const EXCERPT_CHARS: usize = 100;

fn or<'a>(value: &'a str, placeholder: &'a str) -> &'a str {
    if value.is_empty() {
        placeholder
    } else {
        value
    }
}

pub fn demo_resume(data: &ResumeData) -> String {
    let info = &data.personal_info;
    let mut md = format!("# {}\n", or(&info.name, PLACEHOLDER_NAME));
    if let Some(job_title) = info.job_title.as_deref().filter(|t| !t.is_empty()) {
        md.push_str(&format!("## {job_title}\n"));
    }

    md.push_str("\n## Contact\n");
    md.push_str(&format!("- Email: {}\n", or(&info.email, PLACEHOLDER_EMAIL)));
    md.push_str(&format!("- Phone: {}\n", or(&info.phone, PLACEHOLDER_PHONE)));
    md.push_str(&format!(
        "- Location: {}\n",
        or(&info.location, PLACEHOLDER_LOCATION)
    ));
    for (label, link) in [
        ("Website", &info.website),
        ("LinkedIn", &info.linkedin),
        ("GitHub", &info.github),
    ] {
        if let Some(link) = link.as_deref().filter(|l| !l.is_empty()) {
            md.push_str(&format!("- {label}: {link}\n"));
        }
    }

    md.push_str(&format!(
        "\n## Professional Summary\n{}\n",
        or(&info.summary, PLACEHOLDER_SUMMARY)
    ));

    md.push_str("\n## Experience\n");
    let has_experience = data
        .experiences
        .first()
        .is_some_and(|exp| !exp.title.is_empty());
    if has_experience {
        let blocks: Vec<String> = data
            .experiences
            .iter()
            .map(|exp| {
                format!(
                    "### {} at {}\n**{} - {} | {}**\n\n{}\n",
                    exp.title,
                    or(&exp.company, "Company"),
                    or(&exp.start_date, "Start Date"),
                    or(&exp.end_date, "Present"),
                    or(&exp.location, "Location"),
                    or(&exp.description, PLACEHOLDER_DESCRIPTION),
                )
            })
            .collect();
        md.push_str(&blocks.join("\n\n"));
    } else {
        md.push_str(CANNED_EXPERIENCE);
        md.push('\n');
    }

    md.push_str("\n## Education\n");
    let has_education = data
        .education
        .first()
        .is_some_and(|edu| !edu.school.is_empty());
    if has_education {
        let blocks: Vec<String> = data
            .education
            .iter()
            .map(|edu| {
                format!(
                    "### {} in {}\n**{} | {} - {}**\n",
                    or(&edu.degree, "Degree"),
                    or(&edu.field, "Field of Study"),
                    or(&edu.school, "University Name"),
                    or(&edu.start_date, "Start Date"),
                    or(&edu.end_date, "End Date"),
                )
            })
            .collect();
        md.push_str(&blocks.join("\n\n"));
    } else {
        md.push_str(CANNED_EDUCATION);
        md.push('\n');
    }

    md.push_str("\n## Skills\n");
    let skills = data.filled_skills();
    if skills.is_empty() {
        md.push_str(CANNED_SKILLS);
    } else {
        md.push_str(&skills.join(", "));
    }

    md
}

pub fn demo_cover_letter(data: &ResumeData, date: NaiveDate) -> String {
    let info = &data.personal_info;
    let name = or(&info.name, PLACEHOLDER_NAME);
    let first = data.experiences.first();

    let background = first
        .map(|exp| exp.title.as_str())
        .filter(|t| !t.is_empty())
        .unwrap_or("the relevant field");
    let employer = first
        .map(|exp| exp.company.as_str())
        .filter(|c| !c.is_empty())
        .unwrap_or("previous companies");
    let excerpt: String = first
        .map(|exp| exp.description.chars().take(EXCERPT_CHARS).collect::<String>())
        .filter(|d| !d.is_empty())
        .unwrap_or_else(|| "developed valuable skills and achieved significant results".to_string());
    let summary = or(
        &info.summary,
        "I am a dedicated professional with a strong work ethic and commitment to excellence.",
    );

    format!(
        "# {name}\n\n\
         {date}\n\n\
         Dear Hiring Manager,\n\n\
         I am writing to express my interest in the [Position] role at [Company Name]. With my \
         background in {background} and passion for delivering results, I believe I would be a \
         valuable addition to your team.\n\n\
         {summary}\n\n\
         Throughout my career at {employer}, I have {excerpt}. My experience has equipped me with \
         the skills necessary to excel in this role.\n\n\
         I am particularly drawn to [Company Name] because of its reputation for [company value or \
         achievement]. I am excited about the opportunity to contribute to your team and help \
         achieve your goals.\n\n\
         Thank you for considering my application. I look forward to the possibility of \
         discussing how my background, skills, and experiences may benefit your organization.\n\n\
         Sincerely,\n\
         {name}\n\
         {email}\n\
         {phone}",
        date = date.format("%B %-d, %Y"),
        email = or(&info.email, PLACEHOLDER_EMAIL),
        phone = or(&info.phone, PLACEHOLDER_PHONE),
    )
}
