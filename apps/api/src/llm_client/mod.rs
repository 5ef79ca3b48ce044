/// LLM Client — the single point of entry for all Groq API calls in TalentScout.
///
/// ARCHITECTURAL RULE: No other module may call the provider directly.
/// All LLM interactions MUST go through the `CompletionGateway` trait.
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

const GROQ_API_URL: &str = "https://api.groq.com/openai/v1/chat/completions";
const MAX_RETRIES: u32 = 3;

/// Fast/cheap tier — intent classification, question generation, sentiment.
pub const FAST_MODEL: &str = "llama3-8b-8192";
/// Stronger tier — answer scoring.
pub const SCORING_MODEL: &str = "llama3-70b-8192";

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

    #[error("No JSON object found in LLM output")]
    NoJson,
}

/// The gateway seam over the provider. The state machine depends on this
/// trait (held as `Arc<dyn CompletionGateway>`), never on the concrete
/// client, so conversations are testable with a scripted gateway.
#[async_trait]
pub trait CompletionGateway: Send + Sync {
    /// Issues one blocking chat-completion request with an ordered
    /// `[system, user]` message pair and returns the trimmed completion text.
    async fn complete(
        &self,
        system: &str,
        user: &str,
        model: &str,
        temperature: f32,
    ) -> Result<String, LlmError>;

    /// Like `complete`, but additionally isolates a single embedded JSON
    /// object from the completion via `extract_json`.
    async fn complete_json(
        &self,
        system: &str,
        user: &str,
        model: &str,
        temperature: f32,
    ) -> Result<String, LlmError> {
        let text = self.complete(system, user, model, temperature).await?;
        Ok(extract_json(&text)?.to_string())
    }
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    temperature: f32,
    messages: Vec<ChatMessage<'a>>,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ProviderError {
    error: ProviderErrorBody,
}

#[derive(Debug, Deserialize)]
struct ProviderErrorBody {
    message: String,
}

/// The single LLM client used by the whole service.
/// Wraps the Groq chat-completions API with retry logic.
#[derive(Clone)]
pub struct LlmClient {
    client: Client,
    api_key: String,
}

impl LlmClient {
    pub fn new(api_key: String) -> Self {
        Self {
            client: Client::builder()
                .timeout(std::time::Duration::from_secs(120))
                .build()
                .expect("Failed to build HTTP client"),
            api_key,
        }
    }
}

#[async_trait]
impl CompletionGateway for LlmClient {
    /// Retries on 429 (rate limit) and 5xx errors with exponential backoff.
    async fn complete(
        &self,
        system: &str,
        user: &str,
        model: &str,
        temperature: f32,
    ) -> Result<String, LlmError> {
        let request_body = ChatRequest {
            model,
            temperature,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: system,
                },
                ChatMessage {
                    role: "user",
                    content: user,
                },
            ],
        };

        let mut last_error: Option<LlmError> = None;

        for attempt in 0..MAX_RETRIES {
            if attempt > 0 {
                // Exponential backoff: 1s, 2s, 4s
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
                .post(GROQ_API_URL)
                .bearer_auth(&self.api_key)
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
                // Try to parse error message
                let message = serde_json::from_str::<ProviderError>(&body)
                    .map(|e| e.error.message)
                    .unwrap_or(body);
                return Err(LlmError::Api {
                    status: status.as_u16(),
                    message,
                });
            }

            let chat_response: ChatResponse = response.json().await?;

            let content = chat_response
                .choices
                .into_iter()
                .next()
                .and_then(|c| c.message.content)
                .ok_or(LlmError::EmptyContent)?;

            debug!("LLM call succeeded: model={model}, chars={}", content.len());

            return Ok(content.trim().to_string());
        }

        Err(last_error.unwrap_or(LlmError::RateLimited {
            retries: MAX_RETRIES,
        }))
    }
}

/// Isolates a single embedded JSON object from free-text LLM output.
///
/// Models reliably wrap JSON in prose or markdown fencing despite being told
/// not to, so extraction is two-tier: a fenced code block (optionally tagged
/// `json`) first, then the first balanced `{...}` span anywhere in the text.
/// Returns `LlmError::NoJson` when neither tier matches.
pub fn extract_json(text: &str) -> Result<&str, LlmError> {
    if let Some(block) = fenced_block(text) {
        if let Some(object) = balanced_object(block) {
            return Ok(object);
        }
    }
    balanced_object(text).ok_or(LlmError::NoJson)
}

/// Returns the content of the first ``` fenced block, stripping an optional
/// `json` language tag.
fn fenced_block(text: &str) -> Option<&str> {
    let start = text.find("```")?;
    let body = &text[start + 3..];
    let body = body.strip_prefix("json").unwrap_or(body);
    let end = body.find("```")?;
    Some(body[..end].trim())
}

/// Finds the first balanced `{...}` span, tracking string literals and
/// escapes so braces inside JSON strings do not confuse the depth count.
fn balanced_object(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;

    for (offset, ch) in text[start..].char_indices() {
        if escaped {
            escaped = false;
            continue;
        }
        match ch {
            '\\' if in_string => escaped = true,
            '"' => in_string = !in_string,
            '{' if !in_string => depth += 1,
            '}' if !in_string => {
                depth -= 1;
                if depth == 0 {
                    return Some(&text[start..start + offset + ch.len_utf8()]);
                }
            }
            _ => {}
        }
    }
    None
}
