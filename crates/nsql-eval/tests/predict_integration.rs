//! Integration tests for the predict flow.
//!
//! Each test writes a small dataset and table file to a temp dir and runs
//! the driver against an in-process fake model.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use nsql_eval::{EvalConfig, predict, predict_with_client};
use nsql_prompt::completion::{CompletionClient, CompletionFuture, DiskCachedClient};
use nsql_prompt::{ChatCompletion, CompletionRequest, MessageRole};
use serde_json::{Map, Value};

/// Answers summary requests with a summary and everything else with SQL.
struct FakeModel {
    calls: AtomicUsize,
    summaries: AtomicUsize,
}

impl FakeModel {
    fn new() -> Self {
        Self {
            calls: AtomicUsize::new(0),
            summaries: AtomicUsize::new(0),
        }
    }
}

impl CompletionClient for FakeModel {
    fn complete<'a>(&'a self, request: &'a CompletionRequest) -> CompletionFuture<'a> {
        Box::pin(async move {
            self.calls.fetch_add(1, Ordering::SeqCst);
            let is_summary = request
                .messages
                .last()
                .is_some_and(|m| m.content.starts_with("SQL schema of my database:"));
            if is_summary {
                self.summaries.fetch_add(1, Ordering::SeqCst);
            }
            let text = if is_summary {
                "Orders and the customers who placed them."
            } else {
                "SELECT count(*) FROM orders"
            };
            Ok::<_, String>(ChatCompletion {
                content: Some(text.to_string()),
                ..Default::default()
            })
        })
    }
}

fn write_inputs(dir: &Path) -> (PathBuf, PathBuf) {
    let dataset = dir.join("dev.jsonl");
    std::fs::write(
        &dataset,
        concat!(
            r#"{"question": "How many orders?", "db_id": "shop", "query": "SELECT count(*) FROM orders"}"#,
            "\n",
            r#"{"question": "How many customers?", "db_id": "shop", "sql": "SELECT count(*) FROM customers"}"#,
            "\n",
            r#"{"question": "What is 1 + 1?", "db_id": "none"}"#,
            "\n",
        ),
    )
    .unwrap();
    let tables = dir.join("tables.json");
    std::fs::write(
        &tables,
        r#"{"shop": [
            {"name": "orders", "columns": [{"name": "id", "dtype": "INTEGER"}, {"name": "customer_id", "dtype": "INTEGER"}]},
            {"name": "customers", "columns": [{"name": "id", "dtype": "INTEGER"}, {"name": "name"}]}
        ]}"#,
    )
    .unwrap();
    (dataset, tables)
}

fn read_records(path: &Path) -> Vec<Map<String, Value>> {
    std::fs::read_to_string(path)
        .unwrap()
        .lines()
        .map(|l| serde_json::from_str(l).unwrap())
        .collect()
}

#[tokio::test]
async fn text_dialect_run() {
    let dir = tempfile::tempdir().unwrap();
    let (dataset, tables) = write_inputs(dir.path());
    let config = EvalConfig::default()
        .with_prompt_format("duckdbinstllamashort")
        .with_output_dir(dir.path().join("out"))
        .with_parallel(2);
    let model = Arc::new(FakeModel::new());
    let client: Arc<dyn CompletionClient> = model.clone();

    let path = predict_with_client(&config, &dataset, &tables, Some(client))
        .await
        .unwrap();
    let records = read_records(&path);

    assert_eq!(records.len(), 3);
    assert_eq!(model.calls.load(Ordering::SeqCst), 3);
    for record in &records {
        assert_eq!(record["pred"], "SELECT count(*) FROM orders;");
        assert!(record["prompt"].is_string());
    }
    let prompt = records[0]["prompt"].as_str().unwrap();
    assert!(prompt.contains("    customer_id INTEGER"));
    assert!(prompt.contains("    name any"));
    assert_eq!(records[1]["sql"], "SELECT count(*) FROM customers");
}

#[tokio::test]
async fn chat_dialect_run_keeps_raw_output() {
    let dir = tempfile::tempdir().unwrap();
    let (dataset, tables) = write_inputs(dir.path());
    let config = EvalConfig::default()
        .with_prompt_format("duckdbchat")
        .with_output_dir(dir.path().join("out"))
        .with_num_run(1);
    let model = Arc::new(FakeModel::new());
    let client: Arc<dyn CompletionClient> = model.clone();

    let path = predict_with_client(&config, &dataset, &tables, Some(client))
        .await
        .unwrap();
    let records = read_records(&path);

    assert_eq!(records.len(), 1);
    // One summary turn plus one SQL request.
    assert_eq!(model.calls.load(Ordering::SeqCst), 2);
    assert_eq!(records[0]["pred"], "SELECT count(*) FROM orders");

    let messages: Vec<nsql_prompt::Message> =
        serde_json::from_value(records[0]["prompt"].clone()).unwrap();
    assert_eq!(messages[0].role, MessageRole::System);
    assert_eq!(messages[2].content, "Orders and the customers who placed them.");
}

#[tokio::test]
async fn rerun_is_served_from_disk_cache() {
    let dir = tempfile::tempdir().unwrap();
    let (dataset, tables) = write_inputs(dir.path());
    let config = EvalConfig::default()
        .with_output_dir(dir.path().join("out"))
        .with_cache_dir(dir.path().join("cache"));

    let cached = Arc::new(DiskCachedClient::new(FakeModel::new(), dir.path().join("cache")));
    let client: Arc<dyn CompletionClient> = cached.clone();
    let first = predict_with_client(&config, &dataset, &tables, Some(client.clone()))
        .await
        .unwrap();
    let first_records = read_records(&first);
    let second = predict_with_client(&config, &dataset, &tables, Some(client))
        .await
        .unwrap();

    assert_eq!(cached.inner().calls.load(Ordering::SeqCst), 3);
    assert_eq!(read_records(&second), first_records);
}

#[tokio::test]
async fn dry_run_needs_no_api_key() {
    let dir = tempfile::tempdir().unwrap();
    let (dataset, tables) = write_inputs(dir.path());
    let config = EvalConfig::default()
        .with_output_dir(dir.path().join("out"))
        .with_dry_run(true);

    let path = predict(&config, &dataset, &tables).await.unwrap();
    let records = read_records(&path);
    assert!(records.iter().all(|r| r["pred"] == ""));
    assert_eq!(records[2]["tables"], serde_json::json!([]));
}

#[tokio::test]
async fn unknown_format_fails_before_writing() {
    let dir = tempfile::tempdir().unwrap();
    let (dataset, tables) = write_inputs(dir.path());
    let config = EvalConfig::default()
        .with_prompt_format("spider")
        .with_output_dir(dir.path().join("out"))
        .with_dry_run(true);

    assert!(predict(&config, &dataset, &tables).await.is_err());
    assert!(!dir.path().join("out").exists());
}

#[tokio::test]
async fn chat_summarizes_each_database_once() {
    let dir = tempfile::tempdir().unwrap();
    let (_, tables) = write_inputs(dir.path());
    let dataset = dir.path().join("shop.jsonl");
    let lines: String = (0..5)
        .map(|i| format!("{{\"question\": \"Question {i}?\", \"db_id\": \"shop\"}}\n"))
        .collect();
    std::fs::write(&dataset, lines).unwrap();

    let config = EvalConfig::default()
        .with_prompt_format("duckdbchat")
        .with_output_dir(dir.path().join("out"));
    let model = Arc::new(FakeModel::new());
    let client: Arc<dyn CompletionClient> = model.clone();

    let path = predict_with_client(&config, &dataset, &tables, Some(client))
        .await
        .unwrap();
    let records = read_records(&path);

    assert_eq!(records.len(), 5);
    assert_eq!(model.summaries.load(Ordering::SeqCst), 1);
    assert_eq!(model.calls.load(Ordering::SeqCst), 6);
    let summary = |r: &Map<String, Value>| r["prompt"][2]["content"].clone();
    assert!(records.iter().all(|r| summary(r) == summary(&records[0])));
}

#[tokio::test]
async fn retrieved_context_reaches_prompt_and_file_name() {
    let dir = tempfile::tempdir().unwrap();
    let (_, tables) = write_inputs(dir.path());
    let dataset = dir.path().join("docs.jsonl");
    std::fs::write(
        &dataset,
        concat!(
            r#"{"question": "How many orders?", "db_id": "shop", "context": ["Use count(*).", "Tables are in main."]}"#,
            "\n",
            r#"{"question": "How many customers?", "db_id": "shop"}"#,
            "\n",
        ),
    )
    .unwrap();
    let config = EvalConfig::default()
        .with_output_dir(dir.path().join("out"))
        .with_dry_run(true);

    let path = predict(&config, &dataset, &tables).await.unwrap();
    let name = path.file_name().unwrap().to_string_lossy().into_owned();
    assert!(name.starts_with("duckdbinst_2docs_"), "{name}");

    let records = read_records(&path);
    let prompt = records[0]["prompt"].as_str().unwrap();
    assert!(prompt.contains("\n### Documentation:\nUse count(*).\n--------\nTables are in main.\n"));
    assert!(!records[1]["prompt"].as_str().unwrap().contains("### Documentation"));
    assert_eq!(records[0]["context"][1], "Tables are in main.");
}
