//! Dataset and table-metadata loading, and prediction records.
//!
//! Table metadata is a JSON object from database id to a list of tables.
//! Datasets are JSON Lines; each line is an object with at least a
//! `question`, and optionally retrieved documentation as a `context` (or
//! `docs`) array of strings. Every field of the input line is carried into
//! the output record untouched.

use std::collections::HashMap;
use std::path::Path;

use nsql_prompt::prelude::*;
use serde_json::{Map, Value};
use tracing::warn;

/// Database id that means "no tables".
pub const NO_DATABASE: &str = "none";

/// Tables per database id.
pub type DbTables = HashMap<String, Vec<Table>>;

/// Load table metadata from a JSON file.
pub fn load_tables(path: &Path) -> Result<DbTables, String> {
    let data = std::fs::read_to_string(path)
        .map_err(|e| format!("failed to read tables {}: {e}", path.display()))?;
    serde_json::from_str(&data).map_err(|e| format!("invalid tables {}: {e}", path.display()))
}

/// One dataset line.
#[derive(Debug, Clone, PartialEq)]
pub struct Example {
    pub question: String,
    pub db_id: Option<String>,
    /// Gold SQL from `query`, or `sql` when `query` is absent or empty.
    pub gold: Option<String>,
    /// Retrieved documentation chunks, in prompt order.
    pub context: Vec<String>,
    /// The input object as read.
    pub record: Map<String, Value>,
}

impl Example {
    pub fn from_record(record: Map<String, Value>) -> Result<Self, String> {
        let question = record
            .get("question")
            .and_then(Value::as_str)
            .ok_or("missing string field 'question'")?
            .to_string();
        let db_id = record
            .get("db_id")
            .and_then(Value::as_str)
            .map(str::to_string);
        let gold = ["query", "sql"]
            .iter()
            .filter_map(|k| record.get(*k).and_then(Value::as_str))
            .find(|s| !s.is_empty())
            .map(str::to_string);
        let context = match ["context", "docs"].iter().find_map(|k| record.get(*k)) {
            None | Some(Value::Null) => Vec::new(),
            Some(Value::Array(items)) => items
                .iter()
                .map(|v| v.as_str().map(str::to_string))
                .collect::<Option<Vec<_>>>()
                .ok_or("context must be an array of strings")?,
            Some(_) => return Err("context must be an array of strings".to_string()),
        };
        Ok(Self {
            question,
            db_id,
            gold,
            context,
            record,
        })
    }

    /// Request params for this example, with tables resolved by `db_id`.
    pub fn to_params(&self, db_tables: &DbTables) -> TextToSqlParams {
        let tables = match self.db_id.as_deref() {
            Some(NO_DATABASE) => Vec::new(),
            Some(db_id) => db_tables.get(db_id).cloned().unwrap_or_default(),
            None => Vec::new(),
        };
        if tables.is_empty() {
            warn!(
                "No tables found for {}",
                self.db_id.as_deref().unwrap_or("<no db_id>")
            );
        }
        let params = TextToSqlParams::new(self.question.clone(), tables);
        match &self.db_id {
            Some(db_id) => params.with_database(db_id.clone()),
            None => params,
        }
    }
}

/// Load a JSON Lines dataset. Blank lines are skipped.
pub fn load_dataset(path: &Path) -> Result<Vec<Example>, String> {
    let data = std::fs::read_to_string(path)
        .map_err(|e| format!("failed to read dataset {}: {e}", path.display()))?;
    data.lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(i, line)| {
            let record: Map<String, Value> = serde_json::from_str(line)
                .map_err(|e| format!("{}:{}: {e}", path.display(), i + 1))?;
            Example::from_record(record).map_err(|e| format!("{}:{}: {e}", path.display(), i + 1))
        })
        .collect()
}

/// Output record: the input fields plus the prediction.
pub fn prediction_record(
    example: &Example,
    params: &TextToSqlParams,
    statement: &str,
    response: &TextToSqlResponse,
) -> Result<Map<String, Value>, String> {
    let mut record = example.record.clone();
    record.insert("pred".into(), Value::String(statement.to_string()));
    record.insert("raw_pred".into(), Value::String(response.output.clone()));
    record.insert(
        "raw_output".into(),
        Value::String(response.raw_output.clone()),
    );
    record.insert(
        "prompt".into(),
        serde_json::to_value(&response.final_prompt)
            .map_err(|e| format!("failed to serialize prompt: {e}"))?,
    );
    record.insert(
        "tables".into(),
        serde_json::to_value(&params.tables)
            .map_err(|e| format!("failed to serialize tables: {e}"))?,
    );
    Ok(record)
}

/// Write records as JSON Lines, creating parent directories.
pub fn write_jsonl(path: &Path, records: &[Map<String, Value>]) -> Result<(), String> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .map_err(|e| format!("failed to create {}: {e}", parent.display()))?;
    }
    let mut out = String::new();
    for record in records {
        let line =
            serde_json::to_string(record).map_err(|e| format!("failed to serialize record: {e}"))?;
        out.push_str(&line);
        out.push('\n');
    }
    std::fs::write(path, out).map_err(|e| format!("failed to write {}: {e}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn record(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            other => panic!("not an object: {other}"),
        }
    }

    fn db_tables() -> DbTables {
        serde_json::from_value(json!({
            "shop": [
                {"name": "orders", "columns": [{"name": "id", "dtype": "INTEGER"}]}
            ]
        }))
        .unwrap()
    }

    #[test]
    fn example_fields() {
        let ex = Example::from_record(record(json!({
            "question": "How many orders?",
            "db_id": "shop",
            "query": "",
            "sql": "SELECT count(*) FROM orders",
            "difficulty": "easy"
        })))
        .unwrap();
        assert_eq!(ex.question, "How many orders?");
        assert_eq!(ex.db_id.as_deref(), Some("shop"));
        assert_eq!(ex.gold.as_deref(), Some("SELECT count(*) FROM orders"));
        assert_eq!(ex.record["difficulty"], "easy");
    }

    #[test]
    fn context_is_read_from_context_or_docs() {
        let ex = Example::from_record(record(json!({"question": "q", "context": ["a", "b"]})))
            .unwrap();
        assert_eq!(ex.context, vec!["a", "b"]);
        let ex = Example::from_record(record(json!({"question": "q", "docs": ["c"]}))).unwrap();
        assert_eq!(ex.context, vec!["c"]);
        let ex = Example::from_record(record(json!({"question": "q"}))).unwrap();
        assert!(ex.context.is_empty());
    }

    #[test]
    fn malformed_context_is_rejected() {
        for bad in [json!("text"), json!([1, 2])] {
            let err = Example::from_record(record(json!({"question": "q", "context": bad})))
                .unwrap_err();
            assert!(err.contains("array of strings"), "{err}");
        }
    }

    #[test]
    fn question_is_required() {
        assert!(Example::from_record(record(json!({"db_id": "shop"}))).is_err());
    }

    #[test]
    fn tables_resolve_by_db_id() {
        let ex = Example::from_record(record(json!({"question": "q", "db_id": "shop"}))).unwrap();
        let params = ex.to_params(&db_tables());
        assert_eq!(params.tables.len(), 1);
        assert_eq!(params.database.as_deref(), Some("shop"));
    }

    #[test]
    fn none_and_unknown_db_have_no_tables() {
        for db in ["none", "missing"] {
            let ex = Example::from_record(record(json!({"question": "q", "db_id": db}))).unwrap();
            assert!(ex.to_params(&db_tables()).tables.is_empty());
        }
    }

    #[test]
    fn dataset_reports_bad_line_number() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("dev.jsonl");
        std::fs::write(&path, "{\"question\": \"a\"}\n\n{oops}\n").unwrap();
        let err = load_dataset(&path).unwrap_err();
        assert!(err.contains(":3:"), "{err}");
    }

    #[test]
    fn dataset_and_tables_load() {
        let dir = tempfile::tempdir().unwrap();
        let data = dir.path().join("dev.jsonl");
        std::fs::write(&data, "{\"question\": \"a\"}\n{\"question\": \"b\", \"db_id\": \"shop\"}\n")
            .unwrap();
        let tables = dir.path().join("tables.json");
        std::fs::write(&tables, serde_json::to_string(&db_tables()).unwrap()).unwrap();

        assert_eq!(load_dataset(&data).unwrap().len(), 2);
        assert_eq!(load_tables(&tables).unwrap()["shop"][0].name, "orders");
    }

    #[test]
    fn record_keeps_input_and_adds_prediction() {
        let ex = Example::from_record(record(json!({"question": "q", "id": 7}))).unwrap();
        let params = ex.to_params(&DbTables::new());
        let response = TextToSqlResponse {
            output: "x | SELECT 1;".into(),
            raw_output: "x | SELECT 1".into(),
            final_prompt: Prompt::Text("p".into()),
            usage: None,
        };
        let out = prediction_record(&ex, &params, "SELECT 1;", &response).unwrap();
        assert_eq!(out["id"], 7);
        assert_eq!(out["pred"], "SELECT 1;");
        assert_eq!(out["raw_pred"], "x | SELECT 1;");
        assert_eq!(out["prompt"], "p");
        assert_eq!(out["tables"], json!([]));
    }
}
