// Resume and cover letter generation.
// Remote generation goes through llm_client; demo templates cover every failure.

pub mod demo;
pub mod generator;
pub mod handlers;
pub mod prompts;
