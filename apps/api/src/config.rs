use anyhow::{bail, Context, Result};

/// Backend holding in-progress resume drafts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DraftBackend {
    Redis,
    Memory,
}

/// Application configuration loaded from environment variables.
/// Fails at startup if required variables are missing.
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub redis_url: String,
    pub s3_bucket: String,
    pub s3_endpoint: String,
    pub aws_access_key_id: String,
    pub aws_secret_access_key: String,
    /// Without a key every generation request is served from demo templates.
    pub anthropic_api_key: Option<String>,
    pub port: u16,
    pub rust_log: String,
    /// UX pacing before analysis results are returned. Zero disables it.
    pub analysis_delay_ms: u64,
    pub draft_backend: DraftBackend,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            database_url: require_env("DATABASE_URL")?,
            redis_url: require_env("REDIS_URL")?,
            s3_bucket: require_env("S3_BUCKET")?,
            s3_endpoint: require_env("S3_ENDPOINT")?,
            aws_access_key_id: require_env("AWS_ACCESS_KEY_ID")?,
            aws_secret_access_key: require_env("AWS_SECRET_ACCESS_KEY")?,
            anthropic_api_key: std::env::var("ANTHROPIC_API_KEY")
                .ok()
                .filter(|k| !k.trim().is_empty()),
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
            analysis_delay_ms: std::env::var("ANALYSIS_DELAY_MS")
                .unwrap_or_else(|_| "0".to_string())
                .parse::<u64>()
                .context("ANALYSIS_DELAY_MS must be a whole number of milliseconds")?,
            draft_backend: parse_draft_backend(
                &std::env::var("DRAFT_STORE").unwrap_or_else(|_| "redis".to_string()),
            )?,
        })
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}

fn parse_draft_backend(value: &str) -> Result<DraftBackend> {
    match value.trim().to_ascii_lowercase().as_str() {
        "redis" => Ok(DraftBackend::Redis),
        "memory" => Ok(DraftBackend::Memory),
        other => bail!("DRAFT_STORE must be 'redis' or 'memory', got '{other}'"),
    }
}
