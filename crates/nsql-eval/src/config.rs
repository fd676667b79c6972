//! Evaluation-run configuration with the driver's defaults.

use std::path::{Path, PathBuf};

use nsql_prompt::DEFAULT_MODEL;

/// Default directory for cached completions.
pub const DEFAULT_CACHE_DIR: &str = ".nsql-cache";

/// Settings for one `predict` run.
#[derive(Debug, Clone, PartialEq)]
pub struct EvalConfig {
    /// Registry key of the prompt dialect. Default: `"duckdbinst"`.
    pub prompt_format: String,
    /// Model identifier. Default: [`DEFAULT_MODEL`].
    pub model: String,
    /// Default: `200`.
    pub max_tokens: u32,
    /// Default: `0.0`.
    pub temperature: f32,
    /// Sent with the request and applied again to the cleaned output.
    pub stop_tokens: Vec<String>,
    /// Seed for the table-order shuffle. Default: `0`.
    pub seed: u64,
    /// Only run the first N examples. `None` runs all.
    pub num_run: Option<usize>,
    /// Log prompt, prediction and gold for the first N examples.
    /// Default: `20`.
    pub num_print: usize,
    /// Concurrent completion requests. Default: `1`.
    pub parallel: usize,
    /// Directory for the prediction file. Default: current directory.
    pub output_dir: PathBuf,
    /// Optional prefix for the prediction file name.
    pub run_name: String,
    /// On-disk completion cache. Default: [`DEFAULT_CACHE_DIR`]. `None`
    /// disables caching.
    pub cache_dir: Option<PathBuf>,
    /// Ignore existing cache entries.
    pub overwrite_cache: bool,
    /// Build prompts without calling the model.
    pub dry_run: bool,
}

impl Default for EvalConfig {
    fn default() -> Self {
        Self {
            prompt_format: "duckdbinst".to_string(),
            model: DEFAULT_MODEL.to_string(),
            max_tokens: 200,
            temperature: 0.0,
            stop_tokens: Vec::new(),
            seed: 0,
            num_run: None,
            num_print: 20,
            parallel: 1,
            output_dir: PathBuf::new(),
            run_name: String::new(),
            cache_dir: Some(PathBuf::from(DEFAULT_CACHE_DIR)),
            overwrite_cache: false,
            dry_run: false,
        }
    }
}

impl EvalConfig {
    pub fn with_prompt_format(mut self, key: impl Into<String>) -> Self {
        self.prompt_format = key.into();
        self
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Stop tokens, with shell-style single quotes stripped from each end.
    pub fn with_stop_tokens(mut self, tokens: Vec<String>) -> Self {
        self.stop_tokens = tokens
            .into_iter()
            .map(|t| t.trim_matches('\'').to_string())
            .collect();
        self
    }

    pub fn with_num_run(mut self, n: usize) -> Self {
        self.num_run = Some(n);
        self
    }

    pub fn with_num_print(mut self, n: usize) -> Self {
        self.num_print = n;
        self
    }

    pub fn with_parallel(mut self, n: usize) -> Self {
        self.parallel = n.max(1);
        self
    }

    pub fn with_output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.output_dir = dir.into();
        self
    }

    pub fn with_run_name(mut self, name: impl Into<String>) -> Self {
        self.run_name = name.into();
        self
    }

    pub fn with_cache_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.cache_dir = Some(dir.into());
        self
    }

    pub fn without_cache(mut self) -> Self {
        self.cache_dir = None;
        self
    }

    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    /// Last path segment of the model id (`openai/gpt-4o` -> `gpt-4o`).
    pub fn model_tail(&self) -> &str {
        self.model.rsplit('/').next().unwrap_or(&self.model)
    }

    /// Prediction file name for `dataset` on `date` (`yy-mm-dd`), where
    /// `num_docs` is the most context chunks any example carries.
    ///
    /// `<format>_<n>docs_<model-tail>_<run-name_><dataset-stem>_<date>.json`
    pub fn output_filename(&self, dataset: &Path, num_docs: usize, date: &str) -> String {
        let stem = dataset
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();
        let run_name = if self.run_name.is_empty() {
            String::new()
        } else {
            format!("{}_", self.run_name)
        };
        format!(
            "{}_{num_docs}docs_{}_{run_name}{stem}_{date}.json",
            self.prompt_format,
            self.model_tail()
        )
    }

    pub fn output_path(&self, dataset: &Path, num_docs: usize, date: &str) -> PathBuf {
        self.output_dir
            .join(self.output_filename(dataset, num_docs, date))
    }
}
