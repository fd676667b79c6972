//! Text-to-SQL evaluation driver built on nsql-prompt.
//!
//! Loads a JSON Lines dataset and per-database table metadata, formats one
//! prompt per question with a registry-selected dialect, asks the model,
//! and writes the cleaned predictions next to the input fields.
//!
//! # Library usage
//!
//! ```ignore
//! use nsql_eval::{EvalConfig, predict};
//! use std::path::Path;
//!
//! let config = EvalConfig::default()
//!     .with_prompt_format("duckdbinstllama")
//!     .with_dry_run(true);
//! let out = predict(&config, Path::new("dev.jsonl"), Path::new("tables.json")).await?;
//! ```
//!
//! # Binary
//!
//! ```sh
//! nsql-eval predict dev.jsonl tables.json --prompt-format duckdbinst --output-dir out
//! nsql-eval formats
//! ```

pub mod config;
pub mod loader;
pub mod predict;

pub use config::EvalConfig;
pub use predict::{predict, predict_with_client};
