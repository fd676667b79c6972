//! The `predict` flow: dataset in, one prediction record per example out.
//!
//! Prompts are built one at a time so the table-order shuffle consumes the
//! seeded RNG in dataset order; completions then run with up to
//! [`EvalConfig::parallel`] requests in flight.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;

use futures::stream::{self, StreamExt};
use nsql_prompt::config::FormatterConfig;
use nsql_prompt::prelude::*;
use nsql_prompt::text_to_sql::clean_whitespace;
use tracing::{debug, info};

use crate::config::EvalConfig;
use crate::loader::{self, DbTables, Example};

/// Environment variable holding the OpenRouter API key.
pub const API_KEY_ENV: &str = "OPENROUTER_KEY";

/// A finished example.
#[derive(Debug, Clone)]
pub struct Prediction {
    pub params: TextToSqlParams,
    /// Extracted statement written as `pred`.
    pub statement: String,
    pub response: TextToSqlResponse,
}

/// Build the run's formatter: shared order cache, seeded shuffle, and the
/// completion client when the dialect needs one.
pub fn build_formatter(
    config: &EvalConfig,
    client: Option<Arc<dyn CompletionClient>>,
) -> Result<PromptFormatter, String> {
    let formatter = PromptFormatter::from_key(&config.prompt_format)
        .map_err(|e| e.to_string())?
        .with_config(FormatterConfig::default().with_seed(config.seed))
        .with_cache(Arc::new(TableOrderCache::new()));
    Ok(match client {
        Some(client) => formatter.with_client(client),
        None => formatter,
    })
}

/// Build the model client from the environment, with the disk cache in
/// front of it when configured.
pub fn build_client(config: &EvalConfig) -> Result<Arc<dyn CompletionClient>, String> {
    let api_key = std::env::var(API_KEY_ENV)
        .map_err(|_| format!("{API_KEY_ENV} environment variable is not set"))?;
    let client = OpenRouterClient::with_headers(api_key, None, "nsql-eval")?;
    let client: Arc<dyn CompletionClient> = match &config.cache_dir {
        Some(dir) => Arc::new(
            DiskCachedClient::new(client, dir.clone()).with_overwrite(config.overwrite_cache),
        ),
        None => Arc::new(client),
    };
    Ok(client)
}

async fn complete_one(
    formatter: &PromptFormatter,
    client: Option<&dyn CompletionClient>,
    config: &EvalConfig,
    prompt: Prompt,
) -> Result<TextToSqlResponse, String> {
    let Some(client) = client else {
        return Ok(TextToSqlResponse {
            output: String::new(),
            raw_output: String::new(),
            final_prompt: prompt,
            usage: None,
        });
    };

    let request = CompletionRequest {
        model: config.model.clone(),
        messages: prompt.to_messages(),
        max_tokens: config.max_tokens,
        temperature: config.temperature,
        stop: (!config.stop_tokens.is_empty()).then(|| config.stop_tokens.clone()),
    };
    let start = Instant::now();
    let completion = client.complete(&request).await?;
    debug!("Completion in {:.2}s", start.elapsed().as_secs_f64());

    let raw_output = completion.text().to_string();
    let output = finalize_output(formatter, &raw_output, &prompt, &config.stop_tokens);
    Ok(TextToSqlResponse {
        output,
        raw_output,
        final_prompt: prompt,
        usage: completion.usage,
    })
}

/// Run every example through prompt construction and the model.
///
/// `client` is `None` for a dry run: prompts are built, predictions stay
/// empty.
pub async fn generate_sql(
    formatter: &PromptFormatter,
    client: Option<&dyn CompletionClient>,
    config: &EvalConfig,
    examples: &[Example],
    db_tables: &DbTables,
) -> Result<Vec<Prediction>, String> {
    let mut requests = Vec::with_capacity(examples.len());
    for example in examples {
        let params = example.to_params(db_tables);
        let prompt = construct_prompt(formatter, &params, &example.context)
            .await
            .map_err(|e| e.to_string())?;
        requests.push((params, prompt));
    }
    info!("Constructed {} prompts", requests.len());

    let results: Vec<_> = stream::iter(requests)
        .map(|(params, prompt)| async move {
            let response = complete_one(formatter, client, config, prompt).await?;
            let statement = extract_statement(&response.output);
            Ok::<_, String>(Prediction {
                params,
                statement,
                response,
            })
        })
        .buffered(config.parallel.max(1))
        .collect()
        .await;
    results.into_iter().collect()
}

fn log_example(example: &Example, prediction: &Prediction) {
    match &prediction.response.final_prompt {
        Prompt::Text(text) => info!("Prompt: {text}"),
        Prompt::Messages(messages) => {
            for message in messages {
                info!("Prompt: {}: {}", message.role, message.content);
            }
        }
    }
    info!("Prediction: {}", clean_whitespace(&prediction.statement));
    if let Some(gold) = &example.gold {
        info!("Gold: {gold}");
    }
}

/// Full `predict` run with an explicit client. Returns the output path.
pub async fn predict_with_client(
    config: &EvalConfig,
    dataset_path: &Path,
    tables_path: &Path,
    client: Option<Arc<dyn CompletionClient>>,
) -> Result<PathBuf, String> {
    let formatter = build_formatter(config, client.clone())?;

    info!("Loading metadata...");
    let db_tables = loader::load_tables(tables_path)?;
    info!("Loading data...");
    let mut examples = loader::load_dataset(dataset_path)?;
    if let Some(n) = config.num_run {
        examples.truncate(n);
        info!("Running on {} examples", examples.len());
    }

    let num_docs = examples.iter().map(|e| e.context.len()).max().unwrap_or(0);
    let date = chrono::Local::now().format("%y-%m-%d").to_string();
    let output_path = config.output_path(dataset_path, num_docs, &date);
    info!("Saving to {}", output_path.display());

    let predictions = generate_sql(
        &formatter,
        client.as_deref(),
        config,
        &examples,
        &db_tables,
    )
    .await?;

    for (example, prediction) in examples.iter().zip(&predictions).take(config.num_print) {
        log_example(example, prediction);
    }

    let records = examples
        .iter()
        .zip(&predictions)
        .map(|(example, p)| {
            loader::prediction_record(example, &p.params, &p.statement, &p.response)
        })
        .collect::<Result<Vec<_>, String>>()?;
    loader::write_jsonl(&output_path, &records)?;

    let cache = formatter.cache();
    debug!(
        "Table order cache: {} entries, hit rate {:.2}",
        cache.len(),
        cache.hit_rate()
    );
    info!("Saved {} predictions to {}", records.len(), output_path.display());
    Ok(output_path)
}

/// Full `predict` run. Builds the client from the environment unless
/// `config.dry_run` is set.
pub async fn predict(
    config: &EvalConfig,
    dataset_path: &Path,
    tables_path: &Path,
) -> Result<PathBuf, String> {
    let client = if config.dry_run {
        None
    } else {
        Some(build_client(config)?)
    };
    predict_with_client(config, dataset_path, tables_path, client).await
}
