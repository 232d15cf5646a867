//! LLM Client: the single point of entry for all completion calls in IResume.
//!
//! No other module may call the Anthropic API directly. Generation goes
//! through `generation::generator::LlmGenerator`, which wraps this client.
//!
//! Model: claude-sonnet-4-5 (hardcoded, not configurable)

use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

pub mod prompts;

const ANTHROPIC_API_URL: &str = "https://api.anthropic.com/v1/messages";
const ANTHROPIC_VERSION: &str = "2023-06-01";
/// The model used for all LLM calls in IResume.
pub const MODEL: &str = "claude-sonnet-4-5";
const MAX_TOKENS: u32 = 4096;
const TEMPERATURE: f32 = 0.7;
const MAX_RETRIES: u32 = 3;
const REQUEST_TIMEOUT_SECS: u64 = 120;

#[derive(Debug, Error)]
pub enum LlmError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("Rate limited after {retries} retries")]
    RateLimited { retries: u32 },

    #[error("LLM returned empty content")]
    EmptyContent,
}

#[derive(Debug, Serialize)]
struct AnthropicRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    temperature: f32,
    system: &'a str,
    messages: Vec<AnthropicMessage<'a>>,
}

#[derive(Debug, Serialize)]
struct AnthropicMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
pub struct LlmResponse {
    pub content: Vec<ContentBlock>,
    pub usage: Usage,
}

#[derive(Debug, Deserialize)]
pub struct ContentBlock {
    #[serde(rename = "type")]
    pub block_type: String,
    pub text: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct Usage {
    pub input_tokens: u32,
    pub output_tokens: u32,
}

impl LlmResponse {
    /// Extracts the text content from the first text block.
    pub fn text(&self) -> Option<&str> {
        self.content
            .iter()
            .find(|b| b.block_type == "text")
            .and_then(|b| b.text.as_deref())
    }
}

#[derive(Debug, Deserialize)]
struct AnthropicError {
    error: AnthropicErrorBody,
}

#[derive(Debug, Deserialize)]
struct AnthropicErrorBody {
    message: String,
}

/// Wraps the Anthropic Messages API with retry logic and a markdown helper.
#[derive(Clone)]
pub struct LlmClient {
    client: Client,
    api_key: String,
}

impl LlmClient {
    pub fn new(api_key: String) -> Result<Self, LlmError> {
        Ok(Self {
            client: Client::builder()
                .timeout(std::time::Duration::from_secs(REQUEST_TIMEOUT_SECS))
                .build()?,
            api_key,
        })
    }

    /// Makes a raw call to the Claude API, returning the full response object.
    /// Retries on 429 (rate limit) and 5xx errors with exponential backoff.
    pub async fn call(&self, prompt: &str, system: &str) -> Result<LlmResponse, LlmError> {
        let request_body = AnthropicRequest {
            model: MODEL,
            max_tokens: MAX_TOKENS,
            temperature: TEMPERATURE,
            system,
            messages: vec![AnthropicMessage {
                role: "user",
                content: prompt,
            }],
        };

        let mut last_error: Option<LlmError> = None;

        for attempt in 0..MAX_RETRIES {
            if attempt > 0 {
                // Exponential backoff: 1s, 2s
                let delay = std::time::Duration::from_millis(1000 * (1 << (attempt - 1)));
                warn!(
                    "LLM call attempt {} failed, retrying after {}ms...",
                    attempt,
                    delay.as_millis()
                );
                tokio::time::sleep(delay).await;
            }

            let response = self
                .client
                .post(ANTHROPIC_API_URL)
                .header("x-api-key", &self.api_key)
                .header("anthropic-version", ANTHROPIC_VERSION)
                .header("content-type", "application/json")
                .json(&request_body)
                .send()
                .await;

            let response = match response {
                Ok(r) => r,
                Err(e) => {
                    last_error = Some(LlmError::Http(e));
                    continue;
                }
            };

            let status = response.status();

            if status.as_u16() == 429 || status.is_server_error() {
                let body = response.text().await.unwrap_or_default();
                warn!("LLM API returned {}: {}", status, body);
                last_error = Some(LlmError::Api {
                    status: status.as_u16(),
                    message: body,
                });
                continue;
            }

            if !status.is_success() {
                let body = response.text().await.unwrap_or_default();
                let message = serde_json::from_str::<AnthropicError>(&body)
                    .map(|e| e.error.message)
                    .unwrap_or(body);
                return Err(LlmError::Api {
                    status: status.as_u16(),
                    message,
                });
            }

            let llm_response: LlmResponse = response.json().await?;

            debug!(
                "LLM call succeeded: input_tokens={}, output_tokens={}",
                llm_response.usage.input_tokens, llm_response.usage.output_tokens
            );

            return Ok(llm_response);
        }

        Err(last_error.unwrap_or(LlmError::RateLimited {
            retries: MAX_RETRIES,
        }))
    }

    /// Calls the LLM and returns its markdown answer, without any code fence
    /// the model may have wrapped it in.
    pub async fn call_text(&self, prompt: &str, system: &str) -> Result<String, LlmError> {
        let response = self.call(prompt, system).await?;
        response_markdown(&response)
    }
}

fn response_markdown(response: &LlmResponse) -> Result<String, LlmError> {
    let text = response.text().ok_or(LlmError::EmptyContent)?;
    let text = strip_markdown_fences(text);
    if text.is_empty() {
        return Err(LlmError::EmptyContent);
    }
    Ok(text.to_string())
}

/// Strips ```markdown ... ```, ```md ... ``` or ``` ... ``` fences from LLM output.
fn strip_markdown_fences(text: &str) -> &str {
    let text = text.trim();
    let Some(opened) = text.strip_prefix("```") else {
        return text;
    };
    let opened = opened
        .strip_prefix("markdown")
        .or_else(|| opened.strip_prefix("md"))
        .unwrap_or(opened)
        .trim_start();
    opened
        .strip_suffix("```")
        .map(|s| s.trim())
        .unwrap_or(opened)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn response_with(text: &str) -> LlmResponse {
        serde_json::from_value(serde_json::json!({
            "content": [
                { "type": "thinking", "text": null },
                { "type": "text", "text": text }
            ],
            "usage": { "input_tokens": 120, "output_tokens": 480 }
        }))
        .unwrap()
    }

    #[test]
    fn test_strip_markdown_fences_with_tag() {
        let input = "```markdown\n# Jane Doe\n## Skills\n- Rust\n```";
        assert_eq!(strip_markdown_fences(input), "# Jane Doe\n## Skills\n- Rust");
    }

    #[test]
    fn test_strip_markdown_fences_short_tag() {
        let input = "```md\n# Jane Doe\n```";
        assert_eq!(strip_markdown_fences(input), "# Jane Doe");
    }

    #[test]
    fn test_strip_markdown_fences_without_tag() {
        let input = "```\n# Jane Doe\n```";
        assert_eq!(strip_markdown_fences(input), "# Jane Doe");
    }

    #[test]
    fn test_strip_markdown_fences_no_fences() {
        let input = "  # Jane Doe\n\nDear Hiring Manager,\n";
        assert_eq!(strip_markdown_fences(input), "# Jane Doe\n\nDear Hiring Manager,");
    }

    #[test]
    fn test_response_markdown_uses_first_text_block() {
        let response = response_with("```markdown\n# Resume\n```");
        assert_eq!(response_markdown(&response).unwrap(), "# Resume");
    }

    #[test]
    fn test_response_markdown_rejects_blank_output() {
        let response = response_with("```\n\n```");
        assert!(matches!(
            response_markdown(&response),
            Err(LlmError::EmptyContent)
        ));
    }

    #[test]
    fn test_request_body_shape() {
        let body = AnthropicRequest {
            model: MODEL,
            max_tokens: MAX_TOKENS,
            temperature: TEMPERATURE,
            system: "system",
            messages: vec![AnthropicMessage {
                role: "user",
                content: "prompt",
            }],
        };
        let value = serde_json::to_value(&body).unwrap();
        assert_eq!(value["model"], MODEL);
        assert_eq!(value["messages"][0]["role"], "user");
        assert!((value["temperature"].as_f64().unwrap() - 0.7).abs() < 1e-6);
    }
}
