//! Data records describing each dialect.
//!
//! A [`Template`] is everything that distinguishes one dialect from another:
//! the template body, how the question and schema are composed into it, how
//! retrieved context is wrapped, and how model output is cleaned. Adding a
//! dialect means adding a record here and a variant in
//! [`PromptFormat`](crate::registry::PromptFormat).

use super::dialects;
use crate::registry::PromptFormat;

/// Separator line between retrieved context chunks.
pub const CONTEXT_SEP: &str = "\n--------\n";

/// How the question, schema and context reach the template body.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Composition {
    /// Fill `{schema}`, `{context}` and `{question}` directly.
    Direct,
    /// Alpaca-style: `{instruction}` gets the task sentence, `{input}` the
    /// schema block (omitted when there is no schema), plus `{context}` and
    /// `{question}`.
    Instruction { task: &'static str },
    /// Message sequence: system turn, schema conversation, then the body as
    /// the final user turn.
    Conversation { system: &'static str },
}

/// Wrapper placed around retrieved context chunks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContextStyle {
    /// `/* ... */` block for completion prompts written as SQL comments.
    SqlComment,
    /// `### Documentation:` section for instruction prompts.
    Documentation,
    /// Plain paragraph appended to the chat question.
    Conversation,
}

impl ContextStyle {
    /// Wrap already-joined context text.
    pub fn wrap(self, body: &str) -> String {
        match self {
            ContextStyle::SqlComment => format!(
                "\n\n/*\nHere is additional documentation about DuckDB that could be useful.\n--------\n{body}\n--------\n*/"
            ),
            ContextStyle::Documentation => format!("\n### Documentation:\n{body}\n"),
            ContextStyle::Conversation => format!(
                "\n\nHere is additional documentation about DuckDB that could be useful.\n--------\n{body}\n--------\n"
            ),
        }
    }
}

/// Model-output post-processing rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputStyle {
    /// Strip code fences, trim, terminate with `;`.
    CleanSql,
    /// Return the model output untouched.
    Passthrough,
}

/// One dialect, as data.
#[derive(Debug, Clone, Copy)]
pub struct Template {
    pub body: &'static str,
    pub composition: Composition,
    pub context: ContextStyle,
    pub output: OutputStyle,
}

pub const RAJKUMAR_BODY: &str = "{schema}\n\n\n-- Using valid DuckDB SQL, answer the following question for the tables provided above.{context}\n\n-- {question}\n";

pub const DUCKDB_BODY: &str = "{schema}\n\n\n-- Using valid DuckDB SQL, answer the following question for the tables provided above.{context}\n\n-- {question}\n```sql\n";

pub const CHAT_SYSTEM: &str = "You are a helpful assistant that can generate DuckDB sql queries, which is a superset of Postgresql, based on the user input. You do not respond with any human readable text, only SQL code.";

pub const CHAT_QUESTION: &str = "Now output a single SQL query without any explanation and do not add anything \nto the query that was not part of the question, also do not use markdown. Make sure to only \nuse information provided in the prompt, or tables and columns from the schema above and write a query to answer the question.{context}\n\nMy quesiton is \n`{question}`\n\nGenerate the DuckDB specific SQL query:";

pub const SUMMARY_SYSTEM: &str = "You are a helpful assistant that can generate an human redable summary of database content based on the schema.";

pub const SUMMARY_REQUEST: &str =
    "SQL schema of my database:\n{schema}\nExplain in a few sentences what the data is about:\n        ";

/// Schema block for the Alpaca-style `{input}` slot.
pub const INSTRUCTION_INPUT: &str =
    "Here is the database schema that the SQL query will run on:\n{schema}\n";

const fn direct(body: &'static str, context: ContextStyle) -> Template {
    Template {
        body,
        composition: Composition::Direct,
        context,
        output: OutputStyle::CleanSql,
    }
}

const fn instruction(body: &'static str) -> Template {
    Template {
        body,
        composition: Composition::Instruction {
            task: dialects::DUCKDB_INST_TASK,
        },
        context: ContextStyle::Documentation,
        output: OutputStyle::CleanSql,
    }
}

const RAJKUMAR: Template = direct(RAJKUMAR_BODY, ContextStyle::SqlComment);
const DUCKDB: Template = direct(DUCKDB_BODY, ContextStyle::SqlComment);
const DUCKDB_INST: Template = instruction(dialects::DUCKDB_INST);
const DUCKDB_INST_NO_SHORTHAND: Template = instruction(dialects::DUCKDB_INST_NO_SHORTHAND);
const LLAMA_SHORT: Template = direct(dialects::LLAMA_SHORT, ContextStyle::Documentation);
const LLAMA_BASIC: Template = direct(dialects::LLAMA_BASIC, ContextStyle::Documentation);
const LLAMA_SYNTAX: Template = direct(dialects::LLAMA_SHORT, ContextStyle::Documentation);
const LLAMA: Template = direct(dialects::LLAMA_GUIDE, ContextStyle::Documentation);
const GRANITE_SHORT: Template = direct(dialects::GRANITE_SHORT, ContextStyle::Documentation);
const GRANITE: Template = direct(dialects::GRANITE_GUIDE, ContextStyle::Documentation);
const PHI: Template = direct(dialects::PHI, ContextStyle::Documentation);
const GPT_MINI: Template = direct(dialects::GPT_MINI, ContextStyle::Documentation);
const PHI_AZURE: Template = direct(dialects::PHI_AZURE, ContextStyle::Documentation);
const DUCKDB_CHAT: Template = Template {
    body: CHAT_QUESTION,
    composition: Composition::Conversation {
        system: CHAT_SYSTEM,
    },
    context: ContextStyle::Conversation,
    output: OutputStyle::Passthrough,
};

impl PromptFormat {
    /// The data record for this dialect.
    pub fn template(self) -> &'static Template {
        match self {
            PromptFormat::Rajkumar => &RAJKUMAR,
            PromptFormat::DuckDb => &DUCKDB,
            PromptFormat::DuckDbInst => &DUCKDB_INST,
            PromptFormat::DuckDbInstNoShorthand => &DUCKDB_INST_NO_SHORTHAND,
            PromptFormat::LlamaShort => &LLAMA_SHORT,
            PromptFormat::LlamaBasic => &LLAMA_BASIC,
            PromptFormat::LlamaSyntax => &LLAMA_SYNTAX,
            PromptFormat::Llama => &LLAMA,
            PromptFormat::GraniteShort => &GRANITE_SHORT,
            PromptFormat::Granite => &GRANITE,
            PromptFormat::Phi => &PHI,
            PromptFormat::GptMini => &GPT_MINI,
            PromptFormat::PhiAzure => &PHI_AZURE,
            PromptFormat::DuckDbChat => &DUCKDB_CHAT,
        }
    }
}

/// Substitute `{name}` placeholders in a single left-to-right pass.
///
/// Substituted values are never rescanned, and braces that do not spell a
/// known placeholder are copied through.
pub fn fill_template(template: &str, values: &[(&str, &str)]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;
    while let Some((before, after_open)) = rest.split_once('{') {
        out.push_str(before);
        let hit = values.iter().find_map(|(name, value)| {
            after_open
                .strip_prefix(name)
                .and_then(|tail| tail.strip_prefix('}'))
                .map(|tail| (*value, tail))
        });
        match hit {
            Some((value, tail)) => {
                out.push_str(value);
                rest = tail;
            }
            None => {
                out.push('{');
                rest = after_open;
            }
        }
    }
    out.push_str(rest);
    out
}
