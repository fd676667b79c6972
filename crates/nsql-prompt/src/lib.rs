//! Prompt formatters for text-to-SQL models.
//!
//! `nsql-prompt` turns a natural-language question plus database schema
//! metadata into a prompt for a large language model, and turns the model's
//! answer back into a single SQL statement. The core abstraction is the
//! [`PromptFormatter`](formatter::PromptFormatter): one uniform interface over
//! a closed family of prompt dialects (plain completion, instruction-tuned,
//! chat messages), each described by a data record rather than a type.
//!
//! # Getting started
//!
//! ```
//! use nsql_prompt::prelude::*;
//!
//! # let rt = tokio::runtime::Runtime::new().unwrap();
//! # rt.block_on(async {
//! let formatter = PromptFormatter::from_key("duckdbinst").unwrap();
//!
//! let tables = vec![Table::new(
//!     "orders",
//!     vec![Column::new("id", "INTEGER"), Column::new("amount", "DOUBLE")],
//! )];
//! let params = TextToSqlParams::new("What is the total order amount?", tables);
//!
//! let prompt = construct_prompt(&formatter, &params, &[]).await.unwrap();
//! assert!(prompt.as_text().unwrap().contains("CREATE TABLE orders"));
//!
//! let sql = formatter.format_model_output("```sql\nSELECT sum(amount) FROM orders\n```", &prompt);
//! assert_eq!(sql, "SELECT sum(amount) FROM orders;");
//! # });
//! ```
//!
//! # Where to find things
//!
//! - **Pick a dialect:** [`PromptFormat`](registry::PromptFormat) and the
//!   key table in [`registry`].
//! - **Render schemas and prompts:** [`PromptFormatter`](formatter::PromptFormatter),
//!   configured with [`FormatterConfig`](config::FormatterConfig).
//! - **Stable table ordering:** [`TableOrderCache`](formatter::cache::TableOrderCache).
//! - **Glue a request together:** [`text_to_sql`].
//! - **Talk to a model:** the [`CompletionClient`](completion::CompletionClient)
//!   trait, [`OpenRouterClient`], and the on-disk
//!   [`DiskCachedClient`](completion::DiskCachedClient).

pub mod completion;
pub mod config;
pub mod error;
pub mod formatter;
pub mod prelude;
pub mod registry;
pub mod schema;
pub mod text_to_sql;

use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};
use tracing::{debug, trace};

pub use error::{FormatError, Result};

// ── Constants ──────────────────────────────────────────────────────

pub const OPENROUTER_URL: &str = "https://openrouter.ai/api/v1/chat/completions";

/// Default model for SQL generation.
pub const DEFAULT_MODEL: &str = "openai/gpt-4o";

/// Model used for the chat dialect's schema summary turn.
pub const SUMMARY_MODEL: &str = "openai/gpt-3.5-turbo";

// ── Message types ──────────────────────────────────────────────────

/// Role of a message in the conversation.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    System,
    User,
    Assistant,
}

impl std::fmt::Display for MessageRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MessageRole::System => write!(f, "system"),
            MessageRole::User => write!(f, "user"),
            MessageRole::Assistant => write!(f, "assistant"),
        }
    }
}

/// A message in the conversation, in chat-completion wire shape.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct Message {
    pub role: MessageRole,
    pub content: String,
}

impl Message {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::System,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::Assistant,
            content: content.into(),
        }
    }
}

// ── Request types ──────────────────────────────────────────────────

/// Chat completion request body.
///
/// Also the key material for [`DiskCachedClient`](completion::DiskCachedClient),
/// so two requests that serialize identically share a cached response.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
pub struct CompletionRequest {
    pub model: String,
    pub messages: Vec<Message>,
    #[serde(default, skip_serializing_if = "is_zero_u32")]
    pub max_tokens: u32,
    #[serde(default)]
    pub temperature: f32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stop: Option<Vec<String>>,
}

fn is_zero_u32(v: &u32) -> bool {
    *v == 0
}

// ── Response types ─────────────────────────────────────────────────

/// Raw API response (internal deserialization target).
#[derive(Deserialize, Debug)]
struct RawChatResponse {
    choices: Option<Vec<RawChoice>>,
    error: Option<ApiErrorResponse>,
    #[serde(default)]
    usage: Option<UsageInfo>,
}

#[derive(Deserialize, Debug)]
struct RawChoice {
    message: RawResponseMessage,
    finish_reason: Option<String>,
}

#[derive(Deserialize, Debug)]
struct RawResponseMessage {
    content: Option<String>,
}

#[derive(Deserialize, Debug)]
struct ApiErrorResponse {
    message: String,
}

/// Clean return type from [`OpenRouterClient::chat()`].
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct ChatCompletion {
    pub content: Option<String>,
    pub usage: Option<UsageInfo>,
    pub finish_reason: Option<String>,
}

impl ChatCompletion {
    /// The completion text, or an empty string when the model returned none.
    pub fn text(&self) -> &str {
        self.content.as_deref().unwrap_or_default()
    }
}

/// Token usage statistics.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct UsageInfo {
    pub prompt_tokens: Option<u32>,
    pub completion_tokens: Option<u32>,
    pub total_tokens: Option<u32>,
}

// ── Client ─────────────────────────────────────────────────────────

/// Async HTTP client for the OpenRouter chat completions API.
///
/// There is no retry logic here; callers that want backoff wrap the client.
pub struct OpenRouterClient {
    pub(crate) client: reqwest::Client,
    pub(crate) api_key: String,
    /// Sent as `HTTP-Referer` when set.
    pub(crate) referer: Option<String>,
    pub(crate) title: String,
}

impl OpenRouterClient {
    /// Create a new client with the given API key. Sends no Referer.
    pub fn new(api_key: impl Into<String>) -> std::result::Result<Self, String> {
        Self::with_headers(api_key, None, "nsql-prompt")
    }

    /// Create a new client with custom Referer and X-Title headers.
    pub fn with_headers(
        api_key: impl Into<String>,
        referer: Option<String>,
        title: impl Into<String>,
    ) -> std::result::Result<Self, String> {
        let client = reqwest::Client::builder()
            .user_agent("nsql-prompt/0.1")
            .timeout(Duration::from_secs(120))
            .build()
            .map_err(|e| format!("failed to build HTTP client: {e}"))?;
        Ok(Self {
            client,
            api_key: api_key.into(),
            referer: referer.filter(|r| !r.is_empty()),
            title: title.into(),
        })
    }

    /// Send a chat completion request.
    pub async fn chat(
        &self,
        body: &CompletionRequest,
    ) -> std::result::Result<ChatCompletion, String> {
        debug!(
            "LLM request: model={}, messages={}, max_tokens={}, temp={}",
            body.model,
            body.messages.len(),
            body.max_tokens,
            body.temperature,
        );
        trace!(
            "Request payload size: {} bytes",
            serde_json::to_string(body).map_or(0, |s| s.len())
        );

        let start = Instant::now();

        let resp = self
            .request(body)
            .send()
            .await
            .map_err(|e| format!("request failed: {e}"))?;

        let status = resp.status();
        let text = resp
            .text()
            .await
            .map_err(|e| format!("failed to read response: {e}"))?;

        debug!(
            "LLM response: HTTP {} in {:.1}s ({} bytes)",
            status,
            start.elapsed().as_secs_f64(),
            text.len()
        );

        if !status.is_success() {
            return Err(format!("OpenRouter API HTTP {status}: {text}"));
        }

        parse_chat_response(&text)
    }

    fn request(&self, body: &CompletionRequest) -> reqwest::RequestBuilder {
        let builder = self
            .client
            .post(OPENROUTER_URL)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("X-Title", &self.title);
        let builder = match &self.referer {
            Some(referer) => builder.header("HTTP-Referer", referer),
            None => builder,
        };
        builder.json(body)
    }
}

/// Parse a raw chat-completion body into a [`ChatCompletion`].
fn parse_chat_response(text: &str) -> std::result::Result<ChatCompletion, String> {
    let parsed: RawChatResponse =
        serde_json::from_str(text).map_err(|e| format!("failed to parse response: {e}"))?;

    if let Some(err) = parsed.error {
        return Err(format!("OpenRouter API error: {}", err.message));
    }

    if let Some(ref usage) = parsed.usage {
        debug!(
            "Token usage: prompt={}, completion={}, total={}",
            usage.prompt_tokens.unwrap_or(0),
            usage.completion_tokens.unwrap_or(0),
            usage.total_tokens.unwrap_or(0),
        );
    }

    match parsed.choices.and_then(|c| c.into_iter().next()) {
        Some(c) => Ok(ChatCompletion {
            content: c.message.content,
            usage: parsed.usage,
            finish_reason: c.finish_reason,
        }),
        None => {
            debug!("LLM output: empty (no choices)");
            Ok(ChatCompletion {
                content: None,
                usage: parsed.usage,
                finish_reason: None,
            })
        }
    }
}
