//! Text-to-SQL evaluation driver.
//!
//! Reads the API key from the `OPENROUTER_KEY` environment variable.
//!
//! # Examples
//!
//! ```sh
//! # Predict with the instruction dialect (responses are cached in .nsql-cache)
//! nsql-eval predict dev.jsonl tables.json --prompt-format duckdbinst --output-dir out
//!
//! # Always ask the model
//! nsql-eval predict dev.jsonl tables.json --no-cache
//!
//! # Inspect prompts without calling the model
//! nsql-eval predict dev.jsonl tables.json --dry-run --num-print 3
//!
//! # List dialect keys
//! nsql-eval formats
//! ```

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use nsql_eval::EvalConfig;
use nsql_eval::config::DEFAULT_CACHE_DIR;
use nsql_prompt::DEFAULT_MODEL;
use nsql_prompt::registry;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

/// Text-to-SQL evaluation driver.
#[derive(Parser)]
#[command(name = "nsql-eval")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Predict SQL for every question in a dataset.
    Predict(PredictArgs),
    /// List prompt format keys.
    Formats,
}

#[derive(clap::Args)]
struct PredictArgs {
    /// JSON Lines dataset (`question`, `db_id`, gold `query`/`sql`).
    dataset: PathBuf,

    /// JSON object mapping database id to its tables.
    tables: PathBuf,

    /// Directory for the prediction file. Default: current directory.
    #[arg(long)]
    output_dir: Option<PathBuf>,

    /// Prefix added to the prediction file name.
    #[arg(long, default_value = "")]
    run_name: String,

    /// Only run the first N examples (zero or negative runs all).
    #[arg(long, default_value_t = -1, allow_negative_numbers = true)]
    num_run: i64,

    /// Log prompt and prediction for the first N examples.
    #[arg(long, default_value_t = 20)]
    num_print: usize,

    /// Prompt format registry key.
    #[arg(long, default_value = "duckdbinst")]
    prompt_format: String,

    /// Stop sequence (repeatable).
    #[arg(long = "stop-token")]
    stop_tokens: Vec<String>,

    /// Maximum tokens per completion.
    #[arg(long, default_value_t = 200)]
    max_tokens: u32,

    /// Sampling temperature.
    #[arg(long, default_value_t = 0.0)]
    temperature: f32,

    /// Model to use for completions.
    #[arg(long, default_value = DEFAULT_MODEL)]
    model: String,

    /// Seed for the table-order shuffle.
    #[arg(long, default_value_t = 0)]
    seed: u64,

    /// Concurrent completion requests.
    #[arg(long, default_value_t = 1)]
    parallel: usize,

    /// Directory for cached completions.
    #[arg(long, default_value = DEFAULT_CACHE_DIR)]
    cache_dir: PathBuf,

    /// Do not cache completions on disk.
    #[arg(long, conflicts_with = "overwrite_cache")]
    no_cache: bool,

    /// Ignore cached completions.
    #[arg(long)]
    overwrite_cache: bool,

    /// Build prompts without calling the model.
    #[arg(long)]
    dry_run: bool,
}

impl PredictArgs {
    fn into_config(self) -> EvalConfig {
        let mut config = EvalConfig::default()
            .with_prompt_format(self.prompt_format)
            .with_model(self.model)
            .with_stop_tokens(self.stop_tokens)
            .with_num_print(self.num_print)
            .with_parallel(self.parallel)
            .with_output_dir(self.output_dir.unwrap_or_default())
            .with_run_name(self.run_name)
            .with_dry_run(self.dry_run);
        if let Some(n) = usize::try_from(self.num_run).ok().filter(|n| *n > 0) {
            config = config.with_num_run(n);
        }
        config = if self.no_cache {
            config.without_cache()
        } else {
            config.with_cache_dir(self.cache_dir)
        };
        config.max_tokens = self.max_tokens;
        config.temperature = self.temperature;
        config.seed = self.seed;
        config.overwrite_cache = self.overwrite_cache;
        config
    }
}

#[tokio::main]
async fn main() {
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Formats => {
            for key in registry::keys() {
                println!("{key}");
            }
        }
        Command::Predict(args) => {
            let dataset = args.dataset.clone();
            let tables = args.tables.clone();
            let config = args.into_config();
            if let Err(e) = nsql_eval::predict(&config, &dataset, &tables).await {
                eprintln!("Error: {e}");
                std::process::exit(1);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn predict_config(args: &[&str]) -> EvalConfig {
        let argv = ["nsql-eval", "predict", "dev.jsonl", "tables.json"]
            .into_iter()
            .chain(args.iter().copied());
        match Cli::try_parse_from(argv).unwrap().command {
            Command::Predict(args) => args.into_config(),
            Command::Formats => panic!("expected predict"),
        }
    }

    #[test]
    fn cache_is_on_by_default() {
        let config = predict_config(&[]);
        assert_eq!(config.cache_dir, Some(PathBuf::from(DEFAULT_CACHE_DIR)));
        assert_eq!(config.num_run, None);
    }

    #[test]
    fn no_cache_disables_it() {
        assert_eq!(predict_config(&["--no-cache"]).cache_dir, None);
        assert_eq!(
            predict_config(&["--cache-dir", "c"]).cache_dir,
            Some(PathBuf::from("c"))
        );
    }

    #[test]
    fn no_cache_conflicts_with_overwrite() {
        let argv = [
            "nsql-eval",
            "predict",
            "d",
            "t",
            "--no-cache",
            "--overwrite-cache",
        ];
        assert!(Cli::try_parse_from(argv).is_err());
    }
}
