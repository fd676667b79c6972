//! Convenience re-exports for common `nsql-prompt` types.
//!
//! ```ignore
//! use nsql_prompt::prelude::*;
//! ```
//!
//! Covers picking a dialect, building prompts and calling a model. Template
//! records and the raw dialect strings stay in their modules.

// ── Core types ──────────────────────────────────────────────────────
pub use crate::{
    ChatCompletion, CompletionRequest, FormatError, Message, MessageRole, OpenRouterClient,
    UsageInfo,
};

// ── Formatting ──────────────────────────────────────────────────────
pub use crate::config::{FormatterConfig, SummaryConfig};
pub use crate::formatter::cache::TableOrderCache;
pub use crate::formatter::{Prompt, PromptFormatter, RenderedTables, SchemaText};
pub use crate::registry::PromptFormat;
pub use crate::schema::{Column, Table};

// ── Assembly ────────────────────────────────────────────────────────
pub use crate::text_to_sql::{
    TextToSqlParams, TextToSqlResponse, construct_prompt, extract_statement, finalize_output,
};

// ── Clients ─────────────────────────────────────────────────────────
pub use crate::completion::{CompletionClient, CompletionFuture, DiskCachedClient};
