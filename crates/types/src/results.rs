//! Tabular result payloads.
//!
//! A result endpoint answers a query with a schema-described table:
//! `{"schema": {"fields": [{"name", "type"}], "dimensions": []}, "data": [...]}`.
//! Rows are JSON objects keyed by field name; cell values are arbitrary
//! scalars.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// One column of a result table.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FieldDef {
    pub name: String,
    #[serde(rename = "type", default)]
    pub kind: String,
}

/// Column list plus the subset of columns that are dimensions.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TableSchema {
    #[serde(default)]
    pub fields: Vec<FieldDef>,
    #[serde(default)]
    pub dimensions: Vec<String>,
}

/// A complete tabular result.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TableData {
    #[serde(default)]
    pub schema: TableSchema,
    #[serde(default)]
    pub data: Vec<Map<String, Value>>,
}

impl TableData {
    /// Render one cell for display. Strings appear unquoted, null as empty,
    /// and anything else in its compact JSON form.
    pub fn cell_text(row: &Map<String, Value>, field: &str) -> String {
        match row.get(field) {
            None | Some(Value::Null) => String::new(),
            Some(Value::String(s)) => s.clone(),
            Some(other) => other.to_string(),
        }
    }
}
