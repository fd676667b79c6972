//! End-to-end tests for prompt assembly through the public API.
//!
//! Model calls go to in-process fake clients; nothing touches the network.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use nsql_prompt::prelude::*;
use nsql_prompt::registry::PROMPT_FORMATS;

fn orders() -> Table {
    Table::new(
        "orders",
        vec![Column::new("id", "INTEGER"), Column::new("amount", "DOUBLE")],
    )
}

fn shop() -> Vec<Table> {
    vec![
        orders(),
        Table::new("customers", vec![Column::new("id", "INTEGER"), Column::untyped("name")]),
        Table::new("audit_log", vec![]),
    ]
}

/// Answers every request with a fixed text and counts calls.
struct Canned {
    text: &'static str,
    calls: AtomicUsize,
}

impl Canned {
    fn new(text: &'static str) -> Self {
        Self {
            text,
            calls: AtomicUsize::new(0),
        }
    }
}

impl CompletionClient for Canned {
    fn complete<'a>(&'a self, _request: &'a CompletionRequest) -> CompletionFuture<'a> {
        Box::pin(async move {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok::<_, String>(ChatCompletion {
                content: Some(self.text.to_string()),
                ..Default::default()
            })
        })
    }
}

// ── Schema rendering ────────────────────────────────────────────────

#[test]
fn orders_table_renders_exactly() {
    let formatter = PromptFormatter::new(PromptFormat::Rajkumar);
    assert_eq!(
        formatter.format_table(&orders()),
        "CREATE TABLE orders (\n    id INTEGER,\n    amount DOUBLE\n)"
    );
}

#[test]
fn format_table_is_the_same_for_every_dialect() {
    let expected = orders().create_statement();
    for (_, format) in PROMPT_FORMATS {
        assert_eq!(PromptFormatter::new(*format).format_table(&orders()), expected);
    }
}

#[tokio::test]
async fn memoized_order_survives_many_calls() {
    let formatter = PromptFormatter::from_key("duckdbinst").unwrap();
    let params = TextToSqlParams::new("Which customers ordered?", shop());
    let first = construct_prompt(&formatter, &params, &[]).await.unwrap();
    for _ in 0..20 {
        assert_eq!(construct_prompt(&formatter, &params, &[]).await.unwrap(), first);
    }
}

#[tokio::test]
async fn every_table_appears_once_in_the_prompt() {
    for (key, format) in PROMPT_FORMATS {
        if format.is_chat() {
            continue;
        }
        let formatter = PromptFormatter::new(*format);
        let prompt = construct_prompt(&formatter, &TextToSqlParams::new("q", shop()), &[])
            .await
            .unwrap();
        let text = prompt.as_text().unwrap();
        for table in shop() {
            assert_eq!(
                text.matches(&table.create_statement()).count(),
                1,
                "{key}: {} not rendered exactly once",
                table.name
            );
        }
    }
}

// ── Context and output ──────────────────────────────────────────────

#[test]
fn empty_context_still_yields_a_wrapper() {
    for (_, format) in PROMPT_FORMATS {
        assert!(!PromptFormatter::new(*format).format_retrieved_context(&[]).is_empty());
    }
}

#[test]
fn fenced_output_becomes_one_statement() {
    let formatter = PromptFormatter::from_key("duckdb").unwrap();
    let prompt = Prompt::Text(String::new());
    for raw in [
        "```sql\nSELECT 1\n```",
        "```duckdb\nSELECT 1\n```",
        "```\nSELECT 1\n```",
        "SELECT 1;",
    ] {
        assert_eq!(formatter.format_model_output(raw, &prompt), "SELECT 1;");
    }
}

#[test]
fn gold_output_is_untouched() {
    for (_, format) in PROMPT_FORMATS {
        let gold = "SELECT  *\nFROM orders";
        assert_eq!(PromptFormatter::new(*format).format_gold_output(gold), gold);
    }
}

#[test]
fn model_output_to_statement() {
    let formatter = PromptFormatter::from_key("duckdbinstphi").unwrap();
    let prompt = Prompt::Text(String::new());
    let finalized = finalize_output(
        &formatter,
        "```sql\nshop | SELECT count(*) FROM orders\n```",
        &prompt,
        &[],
    );
    assert_eq!(extract_statement(&finalized), "SELECT count(*) FROM orders;");
}

// ── Chat dialect ────────────────────────────────────────────────────

#[tokio::test]
async fn chat_prompt_end_to_end() {
    let client = Arc::new(Canned::new("A shop with orders and customers."));
    let formatter = PromptFormatter::from_key("duckdbchat")
        .unwrap()
        .with_client(client.clone());

    let params = TextToSqlParams::new("How many customers?", shop());
    let prompt = construct_prompt(&formatter, &params, &[]).await.unwrap();
    let messages = prompt.as_messages().unwrap();

    let roles: Vec<MessageRole> = messages.iter().map(|m| m.role).collect();
    assert_eq!(
        roles,
        vec![
            MessageRole::System,
            MessageRole::User,
            MessageRole::Assistant,
            MessageRole::User
        ]
    );
    assert_eq!(messages[2].content, "A shop with orders and customers.");
    assert!(messages[3].content.contains("`How many customers?`"));
    assert!(!messages[3].content.contains("Here is additional documentation"));
    assert!(!messages[3].content.contains("[]"));
    assert!(
        messages[3]
            .content
            .contains("write a query to answer the question.\n\nMy quesiton is")
    );
    assert_eq!(client.calls.load(Ordering::SeqCst), 1);

    let raw = "SELECT count(*) FROM customers";
    assert_eq!(formatter.format_model_output(raw, &prompt), raw);
}

#[tokio::test]
async fn chat_prompt_with_context() {
    let formatter = PromptFormatter::from_key("duckdbchat")
        .unwrap()
        .with_client(Arc::new(Canned::new("summary")));
    let docs = vec!["COUNT(*) counts rows.".to_string()];
    let prompt = construct_prompt(&formatter, &TextToSqlParams::new("q", shop()), &docs)
        .await
        .unwrap();
    let question = &prompt.as_messages().unwrap()[3].content;
    assert!(question.contains("--------\nCOUNT(*) counts rows.\n--------\n"));
}

#[tokio::test]
async fn chat_summary_goes_through_disk_cache() {
    let dir = tempfile::tempdir().unwrap();
    let cached = Arc::new(DiskCachedClient::new(Canned::new("summary"), dir.path()));
    // Separate formatters do not share summaries in memory.
    let formatter = || {
        PromptFormatter::from_key("duckdbchat")
            .unwrap()
            .with_client(cached.clone())
    };

    let params = TextToSqlParams::new("q", shop());
    let first = construct_prompt(&formatter(), &params, &[]).await.unwrap();
    let second = construct_prompt(&formatter(), &params, &[]).await.unwrap();
    assert_eq!(first, second);
    assert_eq!(cached.inner().calls.load(Ordering::SeqCst), 1);
}

#[test]
fn unknown_key_is_rejected() {
    let err = PromptFormatter::from_key("spider").unwrap_err();
    assert!(err.to_string().contains("duckdbinstllama"));
}
