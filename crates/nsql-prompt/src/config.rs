//! Configuration for [`PromptFormatter`](crate::formatter::PromptFormatter).
//!
//! # Examples
//!
//! ```
//! use nsql_prompt::config::FormatterConfig;
//!
//! let config = FormatterConfig::default()
//!     .with_seed(0)
//!     .with_clean_whitespace(true);
//! assert_eq!(config.table_sep, "\n\n");
//! ```

use crate::SUMMARY_MODEL;

/// Separator placed between rendered `CREATE TABLE` declarations.
pub const DEFAULT_TABLE_SEP: &str = "\n\n";

/// Formatter behaviour shared by every dialect.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormatterConfig {
    /// Joins table declarations into one schema block. Default: `"\n\n"`.
    pub table_sep: String,
    /// Shuffle table order on first sight of a request. Default: `true`.
    pub shuffle_tables: bool,
    /// Collapse whitespace runs in the question before formatting.
    /// Default: `false`.
    pub clean_whitespace: bool,
    /// Seed for the shuffle RNG. `None` seeds from entropy.
    pub seed: Option<u64>,
}

impl Default for FormatterConfig {
    fn default() -> Self {
        Self {
            table_sep: DEFAULT_TABLE_SEP.to_string(),
            shuffle_tables: true,
            clean_whitespace: false,
            seed: None,
        }
    }
}

impl FormatterConfig {
    pub fn with_table_sep(mut self, sep: impl Into<String>) -> Self {
        self.table_sep = sep.into();
        self
    }

    pub fn with_shuffle_tables(mut self, enabled: bool) -> Self {
        self.shuffle_tables = enabled;
        self
    }

    pub fn with_clean_whitespace(mut self, enabled: bool) -> Self {
        self.clean_whitespace = enabled;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }
}

/// Request settings for the chat dialect's schema summary turn.
#[derive(Debug, Clone, PartialEq)]
pub struct SummaryConfig {
    /// Default: [`SUMMARY_MODEL`].
    pub model: String,
    /// Default: `0` (provider default).
    pub max_tokens: u32,
    /// Default: `0.0`.
    pub temperature: f32,
}

impl Default for SummaryConfig {
    fn default() -> Self {
        Self {
            model: SUMMARY_MODEL.to_string(),
            max_tokens: 0,
            temperature: 0.0,
        }
    }
}

impl SummaryConfig {
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = max_tokens;
        self
    }
}
