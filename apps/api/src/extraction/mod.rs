// Parses structured form fields back out of generated markdown.
// Each call site matches exactly one literal heading.

pub mod sections;

pub use sections::{extract_experience_description, extract_skills, extract_summary};
