//! Table and column metadata supplied by the dataset loader.

use serde::{Deserialize, Serialize};

/// Catchall type token for columns without a declared type. Not a real SQL
/// type; it only keeps the declaration readable for the model.
pub const ANY_DTYPE: &str = "any";

/// A column: name plus optional declared type.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Column {
    pub name: String,
    #[serde(default)]
    pub dtype: Option<String>,
}

impl Column {
    pub fn new(name: impl Into<String>, dtype: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            dtype: Some(dtype.into()),
        }
    }

    /// A column with no declared type.
    pub fn untyped(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            dtype: None,
        }
    }

    /// Declared type, or [`ANY_DTYPE`] when missing or empty.
    pub fn dtype_or_any(&self) -> &str {
        match self.dtype.as_deref() {
            Some(dtype) if !dtype.is_empty() => dtype,
            _ => ANY_DTYPE,
        }
    }
}

/// A table: name plus ordered columns.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Table {
    pub name: String,
    #[serde(default)]
    pub columns: Vec<Column>,
}

impl Table {
    pub fn new(name: impl Into<String>, columns: Vec<Column>) -> Self {
        Self {
            name: name.into(),
            columns,
        }
    }

    /// Render as a `CREATE TABLE` declaration.
    ///
    /// One column per line, four-space indent, comma-separated. A table
    /// without columns renders as the bare `CREATE TABLE <name>`.
    pub fn create_statement(&self) -> String {
        if self.columns.is_empty() {
            return format!("CREATE TABLE {}", self.name);
        }
        let cols: Vec<String> = self
            .columns
            .iter()
            .map(|c| format!("    {} {}", c.name, c.dtype_or_any()))
            .collect();
        format!("CREATE TABLE {} (\n{}\n)", self.name, cols.join(",\n"))
    }
}

/// Deterministic serialization of a table list, used as cache key material.
pub fn serialize_tables(tables: &[Table]) -> crate::Result<String> {
    Ok(serde_json::to_string(tables)?)
}
