// Shared prompt fragments for markdown generation.
// Each service that needs LLM calls defines its own prompts.rs alongside it.

/// Persona shared by every generation system prompt.
pub const WRITER_PERSONA: &str = "You are an expert resume and cover letter writer.";

/// Output constraints appended to generation prompts. The section extractor
/// relies on `## ` headings and `- ` bullets.
pub const MARKDOWN_FORMAT_INSTRUCTION: &str = "\
    Format the document as markdown. Use `## ` headings for top-level sections \
    and `- ` for bullet points. Do not wrap the document in code fences and \
    do not add any commentary before or after it.";
