/// LLM Client — the single point of entry for all completion calls in the scanner.
///
/// ARCHITECTURAL RULE: No other module may call the Anthropic API directly.
/// Scan stages depend on the `CompletionService` trait, never on `LlmClient` itself,
/// so the backend can be swapped (or scripted in tests) without touching the pipeline.
///
/// Model: claude-sonnet-4-5 (hardcoded — do not make configurable to prevent drift)
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

pub mod prompts;
pub mod repair;

use crate::llm_client::prompts::JSON_ONLY_SYSTEM;

const ANTHROPIC_API_URL: &str = "https://api.anthropic.com/v1/messages";
const ANTHROPIC_VERSION: &str = "2023-06-01";
/// The model used for all completion calls.
pub const MODEL: &str = "claude-sonnet-4-5";
const MAX_TOKENS: u32 = 4096;
const MAX_RETRIES: u32 = 3;
/// Low temperature keeps skill lists and section JSON stable between scans.
const TEMPERATURE: f32 = 0.25;

#[derive(Debug, Error)]
pub enum LlmError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("Rate limited after {retries} retries")]
    RateLimited { retries: u32 },

    #[error("Completion service returned empty content")]
    EmptyCompletion,

    #[error("Completion call timed out after {0}s")]
    Timeout(u64),
}

/// Opaque text-completion backend. Responses are expected (not guaranteed) to be JSON.
#[async_trait]
pub trait CompletionService: Send + Sync {
    /// Sends `prompt` and returns the trimmed response text.
    /// Fails with `LlmError::EmptyCompletion` when no content comes back.
    async fn complete(&self, prompt: &str) -> Result<String, LlmError>;
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

/// Production completion backend.
/// Wraps the Anthropic Messages API with retry logic.
#[derive(Clone)]
pub struct LlmClient {
    client: Client,
    api_key: String,
}

impl LlmClient {
    pub fn new(api_key: String) -> Result<Self, LlmError> {
        Ok(Self {
            client: Client::builder()
                .timeout(std::time::Duration::from_secs(120))
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
                    "Completion attempt {} failed, retrying after {}ms...",
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
                warn!("Completion API returned {}: {}", status, body);
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
                "Completion succeeded: input_tokens={}, output_tokens={}",
                llm_response.usage.input_tokens, llm_response.usage.output_tokens
            );

            return Ok(llm_response);
        }

        Err(last_error.unwrap_or(LlmError::RateLimited {
            retries: MAX_RETRIES,
        }))
    }
}

#[async_trait]
impl CompletionService for LlmClient {
    async fn complete(&self, prompt: &str) -> Result<String, LlmError> {
        let response = self.call(prompt, JSON_ONLY_SYSTEM).await?;
        non_empty_text(response.text())
    }
}

/// Trims the response text, mapping absent or blank content to `EmptyCompletion`.
fn non_empty_text(text: Option<&str>) -> Result<String, LlmError> {
    match text.map(str::trim) {
        Some(t) if !t.is_empty() => Ok(t.to_string()),
        _ => Err(LlmError::EmptyCompletion),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn response(blocks: Vec<(&str, Option<&str>)>) -> LlmResponse {
        LlmResponse {
            content: blocks
                .into_iter()
                .map(|(t, text)| ContentBlock {
                    block_type: t.to_string(),
                    text: text.map(String::from),
                })
                .collect(),
            usage: Usage {
                input_tokens: 1,
                output_tokens: 1,
            },
        }
    }

    #[test]
    fn test_text_picks_first_text_block() {
        let r = response(vec![("tool_use", None), ("text", Some("[\"Rust\"]"))]);
        assert_eq!(r.text(), Some("[\"Rust\"]"));
    }

    #[test]
    fn test_non_empty_text_trims() {
        assert_eq!(non_empty_text(Some("  [1]\n")).unwrap(), "[1]");
    }

    #[test]
    fn test_blank_text_is_empty_completion() {
        assert!(matches!(
            non_empty_text(Some("   ")),
            Err(LlmError::EmptyCompletion)
        ));
        assert!(matches!(non_empty_text(None), Err(LlmError::EmptyCompletion)));
    }

    #[test]
    fn test_anthropic_response_deserializes() {
        let json = r#"{
            "content": [{"type": "text", "text": "[\"SQL\"]"}],
            "usage": {"input_tokens": 12, "output_tokens": 4}
        }"#;
        let parsed: LlmResponse = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.text(), Some("[\"SQL\"]"));
        assert_eq!(parsed.usage.output_tokens, 4);
    }
}
