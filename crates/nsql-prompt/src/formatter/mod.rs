//! The prompt formatter.
//!
//! [`PromptFormatter`] is the uniform interface over every dialect in
//! [`PromptFormat`]. A request flows through it in four steps:
//!
//! 1. [`format_all_tables`](PromptFormatter::format_all_tables) renders the
//!    schema, fixing the table order per request via the [`TableOrderCache`].
//! 2. [`format_retrieved_context`](PromptFormatter::format_retrieved_context)
//!    wraps optional documentation chunks.
//! 3. [`format_prompt`](PromptFormatter::format_prompt) fills the dialect
//!    template.
//! 4. [`format_model_output`](PromptFormatter::format_model_output) turns the
//!    model's answer into one SQL statement.
//!
//! The chat dialect needs a [`CompletionClient`] for step 1, which writes a
//! natural-language summary of the schema.

pub mod cache;
pub mod dialects;
pub mod output;
pub mod template;

use std::fmt;
use std::sync::{Arc, Mutex};

use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::completion::CompletionClient;
use crate::config::{FormatterConfig, SummaryConfig};
use crate::error::{FormatError, Result};
use crate::registry::PromptFormat;
use crate::schema::{Table, serialize_tables};
use crate::{CompletionRequest, Message};

use cache::{TableOrderCache, summary_key, table_key};
use template::{CONTEXT_SEP, Composition, INSTRUCTION_INPUT, OutputStyle, Template, fill_template};

// ── Rendered values ────────────────────────────────────────────────

/// Output of [`PromptFormatter::format_all_tables`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenderedTables {
    /// One `CREATE TABLE` declaration per table, in prompt order.
    Declarations(Vec<String>),
    /// Schema request and model summary, for the chat dialect.
    Conversation(Vec<Message>),
}

impl RenderedTables {
    /// Join declarations with `sep`. Conversations pass through.
    pub fn into_schema_text(self, sep: &str) -> SchemaText {
        match self {
            RenderedTables::Declarations(decls) => SchemaText::Text(decls.join(sep)),
            RenderedTables::Conversation(messages) => SchemaText::Conversation(messages),
        }
    }
}

/// Schema as handed to [`PromptFormatter::format_prompt`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SchemaText {
    Text(String),
    Conversation(Vec<Message>),
}

impl SchemaText {
    fn kind(&self) -> &'static str {
        match self {
            SchemaText::Text(_) => "text",
            SchemaText::Conversation(_) => "conversation",
        }
    }
}

/// A finished prompt: flat text or a chat message sequence.
///
/// Serializes untagged, so it drops straight into a completion payload or
/// an output record.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(untagged)]
pub enum Prompt {
    Text(String),
    Messages(Vec<Message>),
}

impl Prompt {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Prompt::Text(text) => Some(text),
            Prompt::Messages(_) => None,
        }
    }

    pub fn as_messages(&self) -> Option<&[Message]> {
        match self {
            Prompt::Text(_) => None,
            Prompt::Messages(messages) => Some(messages),
        }
    }

    /// Message sequence for a chat-completion request. Text prompts become
    /// a single user turn.
    pub fn to_messages(&self) -> Vec<Message> {
        match self {
            Prompt::Text(text) => vec![Message::user(text.clone())],
            Prompt::Messages(messages) => messages.clone(),
        }
    }
}

// ── Formatter ──────────────────────────────────────────────────────

/// Formats schemas, context and questions for one dialect.
pub struct PromptFormatter {
    format: PromptFormat,
    config: FormatterConfig,
    cache: Arc<TableOrderCache>,
    rng: Mutex<StdRng>,
    client: Option<Arc<dyn CompletionClient>>,
    summary: SummaryConfig,
}

fn seeded_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    }
}

impl PromptFormatter {
    /// Formatter with default config and a private table-order cache.
    pub fn new(format: PromptFormat) -> Self {
        let config = FormatterConfig::default();
        Self {
            format,
            rng: Mutex::new(seeded_rng(config.seed)),
            config,
            cache: Arc::new(TableOrderCache::new()),
            client: None,
            summary: SummaryConfig::default(),
        }
    }

    /// Resolve a registry key and build a formatter for it.
    pub fn from_key(key: &str) -> Result<Self> {
        Ok(Self::new(PromptFormat::from_key(key)?))
    }

    /// Replace the config. Reseeds the shuffle RNG.
    pub fn with_config(mut self, config: FormatterConfig) -> Self {
        self.rng = Mutex::new(seeded_rng(config.seed));
        self.config = config;
        self
    }

    /// Share a table-order cache, typically one per evaluation run.
    pub fn with_cache(mut self, cache: Arc<TableOrderCache>) -> Self {
        self.cache = cache;
        self
    }

    /// Completion client for the chat dialect's summary turn.
    pub fn with_client(mut self, client: Arc<dyn CompletionClient>) -> Self {
        self.client = Some(client);
        self
    }

    pub fn with_summary_config(mut self, summary: SummaryConfig) -> Self {
        self.summary = summary;
        self
    }

    pub fn format(&self) -> PromptFormat {
        self.format
    }

    pub fn config(&self) -> &FormatterConfig {
        &self.config
    }

    pub fn cache(&self) -> &Arc<TableOrderCache> {
        &self.cache
    }

    fn template(&self) -> &'static Template {
        self.format.template()
    }

    /// Render one table as a `CREATE TABLE` declaration.
    pub fn format_table(&self, table: &Table) -> String {
        table.create_statement()
    }

    /// Render every table for `instruction`.
    ///
    /// Text dialects shuffle the declarations the first time a given
    /// `(instruction, tables)` pair is seen and return that same order on
    /// every later call. The chat dialect asks the completion client to
    /// summarize the schema and returns the exchange as two messages; the
    /// summary is stored in the cache, so a schema is summarized once.
    pub async fn format_all_tables(
        &self,
        tables: &[Table],
        instruction: &str,
    ) -> Result<RenderedTables> {
        if self.format.is_chat() {
            return self.summarize_schema(tables).await;
        }

        let key = table_key(instruction, &serialize_tables(tables)?);
        let order = self.cache.get_or_insert_with(key, || {
            let mut decls: Vec<String> = tables.iter().map(|t| self.format_table(t)).collect();
            if self.config.shuffle_tables {
                let mut rng = self.rng.lock().unwrap_or_else(|e| e.into_inner());
                decls.shuffle(&mut *rng);
            }
            decls
        });
        Ok(RenderedTables::Declarations(order))
    }

    async fn summarize_schema(&self, tables: &[Table]) -> Result<RenderedTables> {
        let client = self
            .client
            .as_ref()
            .ok_or_else(|| FormatError::MissingClient(self.format.key().to_string()))?;

        let decls: Vec<String> = tables.iter().map(|t| self.format_table(t)).collect();
        let full_schema = decls.join(&self.config.table_sep);
        let request_text = fill_template(template::SUMMARY_REQUEST, &[("schema", &full_schema)]);

        let settings = format!(
            "{}|{}|{}",
            self.summary.model, self.summary.max_tokens, self.summary.temperature
        );
        let key = summary_key(&settings, &full_schema);
        if let Some(summary) = self.cache.get(&key).and_then(|v| v.into_iter().next()) {
            return Ok(RenderedTables::Conversation(vec![
                Message::user(request_text),
                Message::assistant(summary),
            ]));
        }

        let request = CompletionRequest {
            model: self.summary.model.clone(),
            messages: vec![
                Message::system(template::SUMMARY_SYSTEM),
                Message::user(request_text.clone()),
            ],
            max_tokens: self.summary.max_tokens,
            temperature: self.summary.temperature,
            stop: None,
        };
        debug!(
            "Requesting schema summary for {} tables from {}",
            tables.len(),
            request.model
        );
        let completion = client
            .complete(&request)
            .await
            .map_err(FormatError::Completion)?;
        let stored = self
            .cache
            .insert(key, vec![completion.text().to_string()])
            .into_iter()
            .next()
            .unwrap_or_default();

        Ok(RenderedTables::Conversation(vec![
            Message::user(request_text),
            Message::assistant(stored),
        ]))
    }

    /// Join context chunks and wrap them in the dialect's documentation
    /// block. An empty list still produces the wrapper.
    pub fn format_retrieved_context(&self, context: &[String]) -> String {
        self.template().context.wrap(&context.join(CONTEXT_SEP))
    }

    /// Fill the dialect template.
    ///
    /// `schema` must be [`SchemaText::Conversation`] for the chat dialect
    /// and [`SchemaText::Text`] for every other.
    pub fn format_prompt(
        &self,
        instruction: &str,
        schema: &SchemaText,
        context_text: &str,
    ) -> Result<Prompt> {
        let template = self.template();
        match (template.composition, schema) {
            (Composition::Direct, SchemaText::Text(schema)) => Ok(Prompt::Text(fill_template(
                template.body,
                &[
                    ("schema", schema),
                    ("context", context_text),
                    ("question", instruction),
                ],
            ))),
            (Composition::Instruction { task }, SchemaText::Text(schema)) => {
                let has_schema = if schema.is_empty() {
                    "."
                } else {
                    ", given a duckdb database schema."
                };
                let input = if schema.is_empty() {
                    String::new()
                } else {
                    fill_template(INSTRUCTION_INPUT, &[("schema", schema)])
                };
                let task = fill_template(task, &[("has_schema", has_schema)]);
                Ok(Prompt::Text(fill_template(
                    template.body,
                    &[
                        ("instruction", &task),
                        ("input", &input),
                        ("context", context_text),
                        ("question", instruction),
                    ],
                )))
            }
            (Composition::Conversation { system }, SchemaText::Conversation(conversation)) => {
                let question = fill_template(
                    template.body,
                    &[("context", context_text), ("question", instruction)],
                );
                let mut messages = Vec::with_capacity(conversation.len() + 2);
                messages.push(Message::system(system));
                messages.extend(conversation.iter().cloned());
                messages.push(Message::user(question));
                Ok(Prompt::Messages(messages))
            }
            (_, schema) => Err(FormatError::SchemaMismatch {
                format: self.format.key().to_string(),
                found: schema.kind(),
            }),
        }
    }

    /// Turn raw model output into a single SQL statement.
    ///
    /// The prompt is accepted for dialects that restitch a forced prefix;
    /// none of the current ones do.
    pub fn format_model_output(&self, output_sql: &str, _prompt: &Prompt) -> String {
        match self.template().output {
            OutputStyle::CleanSql => output::clean_model_output(output_sql),
            OutputStyle::Passthrough => output_sql.to_string(),
        }
    }

    /// Gold SQL is used as-is.
    pub fn format_gold_output(&self, output_sql: &str) -> String {
        output_sql.to_string()
    }
}

impl fmt::Debug for PromptFormatter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PromptFormatter")
            .field("format", &self.format)
            .field("config", &self.config)
            .field("cached_orders", &self.cache.len())
            .field("has_client", &self.client.is_some())
            .field("summary", &self.summary)
            .finish_non_exhaustive()
    }
}
