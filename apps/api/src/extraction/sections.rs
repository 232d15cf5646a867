//! Section extraction from generated markdown.
//!
//! LLM output is untrusted free text. Nothing here assumes well-formed
//! markdown, and a missing section is reported as an empty result so the
//! caller can keep whatever value it already holds.

pub const SKILLS_HEADING: &str = "## Skills";
pub const SUMMARY_HEADING: &str = "## Professional Summary";

const BULLET_MARKER: &str = "- ";
const MAX_HEADING_LEVEL: usize = 6;

/// Parses a markdown ATX heading line into `(level, text)`.
/// `"## Skills"` → `(2, "Skills")`. Lines like `"#hashtag"` are not headings.
fn parse_heading(line: &str) -> Option<(usize, &str)> {
    let trimmed = line.trim();
    let level = trimmed.chars().take_while(|c| *c == '#').count();
    if level == 0 || level > MAX_HEADING_LEVEL {
        return None;
    }
    let rest = &trimmed[level..];
    if !rest.is_empty() && !rest.starts_with(char::is_whitespace) {
        return None;
    }
    Some((level, rest.trim()))
}

/// Returns the trimmed text under `heading`, up to the next heading of the
/// same or a higher level. The heading must match a whole line exactly.
pub fn extract_section_body(markdown: &str, heading: &str) -> Option<String> {
    let (target_level, target_text) = parse_heading(heading)?;
    let mut lines = markdown.lines();

    lines.find(|line| parse_heading(line) == Some((target_level, target_text)))?;

    let body: Vec<&str> = lines
        .take_while(|line| !matches!(parse_heading(line), Some((level, _)) if level <= target_level))
        .collect();

    let body = body.join("\n");
    let body = body.trim();
    if body.is_empty() {
        None
    } else {
        Some(body.to_string())
    }
}

/// Splits a section body into items. Dash bullets win whenever present;
/// otherwise the body is treated as a comma or `•` separated list.
pub fn split_items(body: &str) -> Vec<String> {
    if has_bullet_lines(body) {
        return bullet_items(body);
    }

    body.split([',', '•'])
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(String::from)
        .collect()
}

fn has_bullet_lines(body: &str) -> bool {
    body.lines()
        .any(|line| line.trim_start().starts_with(BULLET_MARKER))
}

fn bullet_items(body: &str) -> Vec<String> {
    body.lines()
        .filter_map(|line| line.trim_start().strip_prefix(BULLET_MARKER))
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(String::from)
        .collect()
}

pub fn extract_section_items(markdown: &str, heading: &str) -> Vec<String> {
    extract_section_body(markdown, heading)
        .map(|body| split_items(&body))
        .unwrap_or_default()
}

pub fn extract_skills(markdown: &str) -> Vec<String> {
    extract_section_items(markdown, SKILLS_HEADING)
}

/// The professional summary is prose, so it is returned whole.
pub fn extract_summary(markdown: &str) -> Option<String> {
    extract_section_body(markdown, SUMMARY_HEADING)
}

/// Finds the block describing one job in a generated resume.
///
/// The block starts after the first heading mentioning `title`, or after the
/// first line mentioning it when no heading does, and runs to the next
/// heading of any level. Dash bullets are re-rendered with
/// `•` so the result matches what the experience form stores; a paragraph is
/// returned as written.
pub fn extract_experience_description(markdown: &str, title: &str) -> Option<String> {
    if title.trim().is_empty() {
        return None;
    }

    let lines: Vec<&str> = markdown.lines().collect();
    let anchor = lines
        .iter()
        .position(|line| line.contains(title) && parse_heading(line).is_some())
        .or_else(|| lines.iter().position(|line| line.contains(title)))?;

    let region: Vec<&str> = lines[anchor + 1..]
        .iter()
        .copied()
        .take_while(|line| parse_heading(line).is_none())
        .collect();
    let region = region.join("\n");
    let region = region.trim();

    if has_bullet_lines(region) {
        let items = bullet_items(region);
        if items.is_empty() {
            return None;
        }
        return Some(format_bullets(&items));
    }

    if region.is_empty() {
        None
    } else {
        Some(region.to_string())
    }
}

/// `["a", "b"]` → `"• a\n• b"`.
pub fn format_bullets(items: &[String]) -> String {
    items
        .iter()
        .map(|item| format!("• {item}"))
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    const GENERATED: &str = "# Sam Rivera
## Software Engineer

## Contact
- Email: sam@example.com
- Phone: (555) 010-2020

## Professional Summary
Pragmatic engineer focused on data pipelines
and developer tooling.

## Experience
### Data Engineer at Northwind
**2021 - Present | Remote**

- Built a streaming ingest service handling 2M events/day
- Cut warehouse spend by 30%, without losing freshness

### Analyst at Contoso
**2018 - 2021 | Seattle**

Owned weekly reporting for the sales organisation.

## Skills
Python, SQL, Airflow • dbt
";

    #[test]
    fn test_dash_bullets_under_skills() {
        let md = "## Skills\n- Python\n- Go\n- Rust";
        assert_eq!(extract_skills(md), vec!["Python", "Go", "Rust"]);
    }

    #[test]
    fn test_comma_list_under_skills() {
        let md = "## Skills\nPython, Go, Rust";
        assert_eq!(extract_skills(md), vec!["Python", "Go", "Rust"]);
    }

    #[test]
    fn test_mixed_comma_and_glyph_separators() {
        assert_eq!(extract_skills(GENERATED), vec!["Python", "SQL", "Airflow", "dbt"]);
    }

    #[test]
    fn test_bullets_win_over_commas() {
        let md = "## Skills\n- Cloud: AWS, GCP\n- Languages: Rust, Go";
        assert_eq!(
            extract_skills(md),
            vec!["Cloud: AWS, GCP", "Languages: Rust, Go"]
        );
    }

    #[test]
    fn test_missing_heading_yields_nothing() {
        assert!(extract_skills("## Technical Skills\n- Rust").is_empty());
        assert!(extract_summary("## Summary\nShort.").is_none());
    }

    #[test]
    fn test_heading_match_is_case_sensitive() {
        assert!(extract_skills("## skills\n- Rust").is_empty());
    }

    #[test]
    fn test_heading_level_must_match() {
        assert!(extract_skills("### Skills\n- Rust").is_empty());
        assert_eq!(extract_skills("##   Skills  \n- Rust"), vec!["Rust"]);
    }

    #[test]
    fn test_section_stops_at_next_heading_of_same_level() {
        let md = "## Skills\n- Rust\n## Hobbies\n- Chess";
        assert_eq!(extract_skills(md), vec!["Rust"]);
    }

    #[test]
    fn test_deeper_heading_stays_inside_section() {
        let md = "## Skills\n### Languages\n- Rust\n### Tools\n- Docker\n# Appendix\n- Other";
        assert_eq!(extract_skills(md), vec!["Rust", "Docker"]);
    }

    #[test]
    fn test_empty_section_is_no_match() {
        assert!(extract_section_body("## Skills\n\n## Education", SKILLS_HEADING).is_none());
        assert!(extract_skills("## Skills\n - \n,  ,").is_empty());
    }

    #[test]
    fn test_first_matching_heading_wins() {
        let md = "## Skills\nRust\n## Skills\nCOBOL";
        assert_eq!(extract_skills(md), vec!["Rust"]);
    }

    #[test]
    fn test_indented_bullets_are_recognised() {
        let md = "## Skills\n   - Rust  \n\t- Go";
        assert_eq!(extract_skills(md), vec!["Rust", "Go"]);
    }

    #[test]
    fn test_summary_keeps_prose() {
        assert_eq!(
            extract_summary(GENERATED).as_deref(),
            Some("Pragmatic engineer focused on data pipelines\nand developer tooling.")
        );
    }

    #[test]
    fn test_experience_bullets_rendered_with_glyph() {
        let description = extract_experience_description(GENERATED, "Data Engineer").unwrap();
        assert_eq!(
            description,
            "• Built a streaming ingest service handling 2M events/day\n\
             • Cut warehouse spend by 30%, without losing freshness"
        );
    }

    #[test]
    fn test_experience_paragraph_returned_as_written() {
        let description = extract_experience_description(GENERATED, "Analyst").unwrap();
        assert_eq!(
            description,
            "**2018 - 2021 | Seattle**\n\nOwned weekly reporting for the sales organisation."
        );
    }

    #[test]
    fn test_experience_heading_preferred_over_earlier_mention() {
        let md = GENERATED.replace(
            "Pragmatic engineer focused on data pipelines",
            "Data Engineer focused on data pipelines",
        );
        let description = extract_experience_description(&md, "Data Engineer").unwrap();
        assert_eq!(
            description,
            "• Built a streaming ingest service handling 2M events/day\n\
             • Cut warehouse spend by 30%, without losing freshness"
        );
    }

    #[test]
    fn test_experience_plain_line_anchor_without_heading() {
        let md = "Data Engineer, Northwind\n- Built the ingest service\n\n## Skills\n- SQL";
        assert_eq!(
            extract_experience_description(md, "Data Engineer").as_deref(),
            Some("• Built the ingest service")
        );
    }

    #[test]
    fn test_experience_title_not_found() {
        assert!(extract_experience_description(GENERATED, "Astronaut").is_none());
        assert!(extract_experience_description(GENERATED, "  ").is_none());
    }

    #[test]
    fn test_experience_title_is_literal_text() {
        let md = "### C++ Developer (Contract) at Initech\n- Ported the renderer";
        assert_eq!(
            extract_experience_description(md, "C++ Developer (Contract)").as_deref(),
            Some("• Ported the renderer")
        );
    }

    #[test]
    fn test_format_bullets() {
        let items = vec!["One".to_string(), "Two".to_string()];
        assert_eq!(format_bullets(&items), "• One\n• Two");
        assert_eq!(format_bullets(&[]), "");
    }

    #[test]
    fn test_parse_heading() {
        assert_eq!(parse_heading("## Skills"), Some((2, "Skills")));
        assert_eq!(parse_heading("  # Title  "), Some((1, "Title")));
        assert_eq!(parse_heading("#hashtag"), None);
        assert_eq!(parse_heading("####### Too deep"), None);
        assert_eq!(parse_heading("- item"), None);
    }
}
