/// LLM Client — the single point of entry for all Claude API calls in Prepwise.
///
/// ARCHITECTURAL RULE: No other module may call the Anthropic API directly.
/// Handlers only see the `CompletionClient` trait, carried in `AppState`.
///
/// Model: claude-3-haiku (hardcoded — do not make configurable to prevent drift)
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::conversation::models::Turn;

pub mod prompts;

#[cfg(test)]
pub mod stub;

const ANTHROPIC_API_URL: &str = "https://api.anthropic.com/v1/messages";
const ANTHROPIC_VERSION: &str = "2023-06-01";
/// The model used for all LLM calls in Prepwise.
pub const MODEL: &str = "claude-3-haiku-20240307";

#[derive(Debug, Error)]
pub enum LlmError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("LLM returned empty content")]
    EmptyContent,
}

/// Sampling knobs that differ per call site.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sampling {
    pub max_tokens: u32,
    pub temperature: f32,
}

/// One completion call: a system instruction plus the ordered turn history.
/// The last turn is expected to be from the user.
#[derive(Debug, Clone, Copy)]
pub struct CompletionRequest<'a> {
    pub system: &'a str,
    pub turns: &'a [Turn],
    pub sampling: Sampling,
}

/// The boundary to the text-generation service. Implement this to swap
/// vendors, or to substitute a canned backend in tests.
///
/// Carried in `AppState` as `Arc<dyn CompletionClient>`.
#[async_trait]
pub trait CompletionClient: Send + Sync {
    async fn complete(&self, request: CompletionRequest<'_>) -> Result<String, LlmError>;
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

/// Anthropic Messages API backend. One HTTP round trip per call; failures
/// are returned to the caller as-is, never retried.
#[derive(Clone)]
pub struct AnthropicClient {
    client: Client,
    api_key: String,
}

impl AnthropicClient {
    pub fn new(api_key: String) -> Result<Self, LlmError> {
        Ok(Self {
            client: Client::builder()
                .timeout(std::time::Duration::from_secs(120))
                .build()?,
            api_key,
        })
    }
}

#[async_trait]
impl CompletionClient for AnthropicClient {
    async fn complete(&self, request: CompletionRequest<'_>) -> Result<String, LlmError> {
        let request_body = AnthropicRequest {
            model: MODEL,
            max_tokens: request.sampling.max_tokens,
            temperature: request.sampling.temperature,
            system: request.system,
            messages: request
                .turns
                .iter()
                .map(|turn| AnthropicMessage {
                    role: turn.role.as_str(),
                    content: &turn.content,
                })
                .collect(),
        };

        let response = self
            .client
            .post(ANTHROPIC_API_URL)
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", ANTHROPIC_VERSION)
            .header("content-type", "application/json")
            .json(&request_body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(LlmError::Api {
                status: status.as_u16(),
                message: api_error_message(body),
            });
        }

        let llm_response: LlmResponse = response.json().await?;

        debug!(
            "LLM call succeeded: input_tokens={}, output_tokens={}",
            llm_response.usage.input_tokens, llm_response.usage.output_tokens
        );

        llm_response
            .text()
            .map(str::to_string)
            .ok_or(LlmError::EmptyContent)
    }
}

/// Pulls `error.message` out of an Anthropic error body, falling back to the raw body.
fn api_error_message(body: String) -> String {
    serde_json::from_str::<AnthropicError>(&body)
        .map(|e| e.error.message)
        .unwrap_or(body)
}

/// Single-turn helper for calls that only send one user prompt.
pub async fn complete_prompt(
    llm: &dyn CompletionClient,
    system: &str,
    prompt: &str,
    sampling: Sampling,
) -> Result<String, LlmError> {
    let turns = [Turn::user(prompt)];
    llm.complete(CompletionRequest {
        system,
        turns: &turns,
        sampling,
    })
    .await
}

/// Returns the text between the first `start` marker and the first `end`
/// marker after it. Falls back to the whole input when either is missing.
pub fn extract_between<'a>(text: &'a str, start: &str, end: &str) -> &'a str {
    let Some(open) = text.find(start) else {
        return text;
    };
    let body = &text[open + start.len()..];
    match body.find(end) {
        Some(close) => &body[..close],
        None => text,
    }
}

/// Strips ```json ... ``` or ``` ... ``` code fences from LLM output.
pub fn strip_json_fences(text: &str) -> &str {
    let text = text.trim();
    if let Some(stripped) = text.strip_prefix("```json") {
        stripped
            .trim_start()
            .strip_suffix("```")
            .map(|s| s.trim())
            .unwrap_or(stripped.trim_start())
    } else if let Some(stripped) = text.strip_prefix("```") {
        stripped
            .trim_start()
            .strip_suffix("```")
            .map(|s| s.trim())
            .unwrap_or(stripped.trim_start())
    } else {
        text
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_json_fences_with_json_tag() {
        let input = "```json\n{\"key\": \"value\"}\n```";
        assert_eq!(strip_json_fences(input), "{\"key\": \"value\"}");
    }

    #[test]
    fn test_strip_json_fences_without_tag() {
        let input = "```\n{\"key\": \"value\"}\n```";
        assert_eq!(strip_json_fences(input), "{\"key\": \"value\"}");
    }

    #[test]
    fn test_strip_json_fences_no_fences() {
        let input = "{\"key\": \"value\"}";
        assert_eq!(strip_json_fences(input), "{\"key\": \"value\"}");
    }

    #[test]
    fn test_extract_between_returns_inner_text() {
        let text = "Here you go:\n<cover_letter>\nDear Hiring Manager,\n</cover_letter>\nThanks";
        assert_eq!(
            extract_between(text, "<cover_letter>", "</cover_letter>"),
            "\nDear Hiring Manager,\n"
        );
    }

    #[test]
    fn test_extract_between_uses_first_pair() {
        let text = "<t>one</t> and <t>two</t>";
        assert_eq!(extract_between(text, "<t>", "</t>"), "one");
    }

    #[test]
    fn test_extract_between_missing_start_returns_input() {
        let text = "Dear Hiring Manager, no tags here";
        assert_eq!(extract_between(text, "<t>", "</t>"), text);
    }

    #[test]
    fn test_extract_between_missing_end_returns_input() {
        let text = "<t>unterminated letter";
        assert_eq!(extract_between(text, "<t>", "</t>"), text);
    }

    #[test]
    fn test_extract_between_end_before_start_is_ignored() {
        let text = "</t> noise <t>body</t>";
        assert_eq!(extract_between(text, "<t>", "</t>"), "body");
    }

    #[test]
    fn test_response_text_picks_first_text_block() {
        let raw = r#"{
            "content": [
                {"type": "tool_use"},
                {"type": "text", "text": "hello"}
            ],
            "usage": {"input_tokens": 3, "output_tokens": 1}
        }"#;
        let parsed: LlmResponse = serde_json::from_str(raw).unwrap();
        assert_eq!(parsed.text(), Some("hello"));
    }

    #[test]
    fn test_api_error_message_prefers_structured_body() {
        let body = r#"{"type":"error","error":{"type":"overloaded_error","message":"Overloaded"}}"#;
        assert_eq!(api_error_message(body.to_string()), "Overloaded");
        assert_eq!(api_error_message("bad gateway".to_string()), "bad gateway");
    }

    #[test]
    fn test_request_serializes_turns_in_order() {
        let turns = vec![Turn::user("hi"), Turn::assistant("hello"), Turn::user("more")];
        let body = AnthropicRequest {
            model: MODEL,
            max_tokens: 10,
            temperature: 0.5,
            system: "sys",
            messages: turns
                .iter()
                .map(|t| AnthropicMessage {
                    role: t.role.as_str(),
                    content: &t.content,
                })
                .collect(),
        };
        let value = serde_json::to_value(&body).unwrap();
        assert_eq!(value["messages"][1]["role"], "assistant");
        assert_eq!(value["messages"][2]["content"], "more");
        assert_eq!(value["system"], "sys");
    }
}
