//! Registry of prompt dialects, keyed by short names.
//!
//! The evaluation driver resolves a key once at startup. Lookup is exact:
//! an unknown key is an error, never a guess.
//!
//! | Key | Dialect |
//! |-----|---------|
//! | `rajkumar` | SQL-comment completion prompt |
//! | `duckdb` | `rajkumar` plus an opening `sql` fence |
//! | `duckdbinst` | Alpaca-style instruction prompt, asks for DuckDB shorthand |
//! | `duckdbinstnoshort` | Alpaca-style instruction prompt |
//! | `duckdbinstllamashort` | Llama 3 chat tokens, short syntax notes |
//! | `duckdbinstllamabasic` | Llama 3 chat tokens, no syntax notes |
//! | `duckdbinstllamasyntax` | Llama 3 chat tokens, short syntax notes |
//! | `duckdbinstllama` | Long-form syntax guide |
//! | `duckdbinstgraniteshort` | Granite, short syntax notes |
//! | `duckdbinstgranite` | Granite, long-form syntax guide |
//! | `duckdbinstphi` | Phi-3 chat tokens |
//! | `duckdbinstgptmini` | Same as `duckdbinstphi` |
//! | `duckdbinstphiazure` | Plain prompt for hosted Phi |
//! | `duckdbchat` | Chat messages with a model-written schema summary |

use std::fmt;
use std::str::FromStr;

use crate::error::FormatError;

/// Closed set of prompt dialects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PromptFormat {
    Rajkumar,
    DuckDb,
    DuckDbInst,
    DuckDbInstNoShorthand,
    LlamaShort,
    LlamaBasic,
    LlamaSyntax,
    Llama,
    GraniteShort,
    Granite,
    Phi,
    /// Plain schema/question prompt. Not registered under a key of its own:
    /// `duckdbinstgptmini` has always resolved to [`PromptFormat::Phi`].
    GptMini,
    PhiAzure,
    DuckDbChat,
}

/// Registry keys in lookup order.
pub const PROMPT_FORMATS: &[(&str, PromptFormat)] = &[
    ("rajkumar", PromptFormat::Rajkumar),
    ("duckdb", PromptFormat::DuckDb),
    ("duckdbinst", PromptFormat::DuckDbInst),
    ("duckdbinstllamashort", PromptFormat::LlamaShort),
    ("duckdbinstgraniteshort", PromptFormat::GraniteShort),
    ("duckdbinstllama", PromptFormat::Llama),
    ("duckdbinstgranite", PromptFormat::Granite),
    ("duckdbinstnoshort", PromptFormat::DuckDbInstNoShorthand),
    ("duckdbchat", PromptFormat::DuckDbChat),
    ("duckdbinstphi", PromptFormat::Phi),
    ("duckdbinstgptmini", PromptFormat::Phi),
    ("duckdbinstphiazure", PromptFormat::PhiAzure),
    ("duckdbinstllamabasic", PromptFormat::LlamaBasic),
    ("duckdbinstllamasyntax", PromptFormat::LlamaSyntax),
];

impl PromptFormat {
    /// Resolve a registry key.
    pub fn from_key(key: &str) -> Result<Self, FormatError> {
        PROMPT_FORMATS
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, format)| *format)
            .ok_or_else(|| FormatError::UnknownFormat {
                key: key.to_string(),
                available: keys().join(", "),
            })
    }

    /// Canonical name. Matches the first registry key for the dialect.
    pub fn key(self) -> &'static str {
        match self {
            PromptFormat::Rajkumar => "rajkumar",
            PromptFormat::DuckDb => "duckdb",
            PromptFormat::DuckDbInst => "duckdbinst",
            PromptFormat::DuckDbInstNoShorthand => "duckdbinstnoshort",
            PromptFormat::LlamaShort => "duckdbinstllamashort",
            PromptFormat::LlamaBasic => "duckdbinstllamabasic",
            PromptFormat::LlamaSyntax => "duckdbinstllamasyntax",
            PromptFormat::Llama => "duckdbinstllama",
            PromptFormat::GraniteShort => "duckdbinstgraniteshort",
            PromptFormat::Granite => "duckdbinstgranite",
            PromptFormat::Phi => "duckdbinstphi",
            PromptFormat::GptMini => "gptmini",
            PromptFormat::PhiAzure => "duckdbinstphiazure",
            PromptFormat::DuckDbChat => "duckdbchat",
        }
    }

    /// Whether prompts are message sequences rather than flat text.
    pub fn is_chat(self) -> bool {
        matches!(self, PromptFormat::DuckDbChat)
    }
}

/// All registry keys in lookup order.
pub fn keys() -> Vec<&'static str> {
    PROMPT_FORMATS.iter().map(|(k, _)| *k).collect()
}

impl fmt::Display for PromptFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for PromptFormat {
    type Err = FormatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_key(s)
    }
}
