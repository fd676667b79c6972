//! Glue from a question plus tables to a finished prompt, and from raw model
//! output back to a statement.

use serde::{Deserialize, Serialize};

use crate::UsageInfo;
use crate::error::Result;
use crate::formatter::output::apply_stop_sequences;
use crate::formatter::{Prompt, PromptFormatter};
use crate::schema::Table;

/// One text-to-SQL request.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct TextToSqlParams {
    pub instruction: String,
    #[serde(default)]
    pub database: Option<String>,
    #[serde(default)]
    pub tables: Vec<Table>,
}

impl TextToSqlParams {
    pub fn new(instruction: impl Into<String>, tables: Vec<Table>) -> Self {
        Self {
            instruction: instruction.into(),
            database: None,
            tables,
        }
    }

    pub fn with_database(mut self, database: impl Into<String>) -> Self {
        self.database = Some(database.into());
        self
    }
}

/// A model's answer to one request.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct TextToSqlResponse {
    /// Cleaned statement.
    pub output: String,
    /// Model text before cleaning.
    pub raw_output: String,
    pub final_prompt: Prompt,
    #[serde(default)]
    pub usage: Option<UsageInfo>,
}

/// Collapse every whitespace run to a single space. Ends are not trimmed.
pub fn clean_whitespace(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut in_run = false;
    for c in text.chars() {
        if c.is_whitespace() {
            if !in_run {
                out.push(' ');
            }
            in_run = true;
        } else {
            out.push(c);
            in_run = false;
        }
    }
    out
}

/// Build the prompt for `params`.
///
/// Empty `context` adds nothing to the prompt; non-empty context is wrapped
/// in the dialect's documentation block. Text prompts are left-trimmed.
pub async fn construct_prompt(
    formatter: &PromptFormatter,
    params: &TextToSqlParams,
    context: &[String],
) -> Result<Prompt> {
    let instruction = if formatter.config().clean_whitespace {
        clean_whitespace(&params.instruction)
    } else {
        params.instruction.clone()
    };

    let schema = formatter
        .format_all_tables(&params.tables, &instruction)
        .await?
        .into_schema_text(&formatter.config().table_sep);

    let context_text = if context.is_empty() {
        // Empty context adds nothing, chat dialect included; never a literal `[]`.
        String::new()
    } else {
        formatter.format_retrieved_context(context)
    };

    Ok(
        match formatter.format_prompt(&instruction, &schema, &context_text)? {
            Prompt::Text(text) => Prompt::Text(text.trim_start().to_string()),
            messages => messages,
        },
    )
}

/// Clean raw model output for `prompt`, then cut at each stop sequence.
pub fn finalize_output(
    formatter: &PromptFormatter,
    raw_output: &str,
    prompt: &Prompt,
    stop_sequences: &[String],
) -> String {
    let cleaned = formatter.format_model_output(raw_output, prompt);
    apply_stop_sequences(&cleaned, stop_sequences)
}

/// Final statement from a finalized output.
///
/// Some models answer `<database> | <sql>`; only the part after the last
/// `|` is kept.
pub fn extract_statement(output: &str) -> String {
    let trimmed = output.trim();
    trimmed
        .rsplit_once('|')
        .map_or(trimmed, |(_, sql)| sql)
        .trim()
        .to_string()
}
