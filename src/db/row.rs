//! Row module - owned result rows and their JSON rendering

use base64::Engine;
use rusqlite::types::ValueRef;
use serde_json::{Map, Number};
use std::sync::Arc;

use super::Value;

/// One result row, values in select order.
///
/// Column names may repeat (`SELECT a.id, b.id ...`); every value is kept
/// and stays reachable by position.
#[derive(Debug, Clone, PartialEq)]
pub struct Row {
    columns: Arc<[String]>,
    values: Vec<Value>,
}

impl Row {
    pub(crate) fn from_sqlite(columns: &Arc<[String]>, row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
        let mut values = Vec::with_capacity(columns.len());
        for i in 0..columns.len() {
            values.push(value_from_sqlite(row.get_ref(i)?));
        }
        Ok(Row {
            columns: Arc::clone(columns),
            values,
        })
    }

    /// Value of the first column named `column`.
    pub fn get(&self, column: &str) -> Option<&Value> {
        self.columns
            .iter()
            .position(|name| name == column)
            .and_then(|i| self.values.get(i))
    }

    pub fn get_index(&self, index: usize) -> Option<&Value> {
        self.values.get(index)
    }

    pub fn columns(&self) -> impl Iterator<Item = &str> {
        self.columns.iter().map(String::as_str)
    }

    pub fn values(&self) -> impl Iterator<Item = &Value> {
        self.values.iter()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Render as a JSON object; blobs are base64 encoded.
    ///
    /// Object keys are unique, so for repeated column names only the first
    /// value is kept, matching [`Row::get`].
    pub fn to_json(&self) -> serde_json::Value {
        let mut map = Map::with_capacity(self.values.len());
        for (name, value) in self.columns.iter().zip(&self.values) {
            if !map.contains_key(name) {
                map.insert(name.clone(), value_to_json(value));
            }
        }
        serde_json::Value::Object(map)
    }
}

fn value_from_sqlite(value: ValueRef<'_>) -> Value {
    match value {
        ValueRef::Null => Value::Null,
        ValueRef::Integer(i) => Value::Integer(i),
        ValueRef::Real(f) => Value::Real(f),
        ValueRef::Text(t) => Value::Text(String::from_utf8_lossy(t).into_owned()),
        ValueRef::Blob(b) => Value::Blob(b.to_vec()),
    }
}

fn value_to_json(value: &Value) -> serde_json::Value {
    match value {
        Value::Null => serde_json::Value::Null,
        Value::Integer(i) => serde_json::Value::Number((*i).into()),
        Value::Real(f) => serde_json::Value::Number(Number::from_f64(*f).unwrap_or(Number::from(0))),
        Value::Text(s) => serde_json::Value::String(s.clone()),
        Value::Blob(b) => {
            serde_json::Value::String(base64::engine::general_purpose::STANDARD.encode(b))
        }
        Value::Bool(b) => serde_json::Value::Bool(*b),
        Value::Timestamp(ts) => serde_json::Value::String(ts.to_rfc3339()),
        Value::NaiveTimestamp(ts) => serde_json::Value::String(ts.to_string()),
    }
}

/// Everything a statement produced: its rows plus the change counters
/// read right after it ran.
///
/// `changes` is the number of rows the statement inserted, updated or
/// deleted, and 0 for read-only statements. `last_insert_rowid` is
/// connection-level and reflects the most recent successful insert.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Cursor {
    pub columns: Vec<String>,
    pub rows: Vec<Row>,
    pub changes: u64,
    pub last_insert_rowid: i64,
}

impl Cursor {
    pub fn first(&self) -> Option<&Row> {
        self.rows.first()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Row> {
        self.rows.iter()
    }

    pub fn to_json(&self) -> serde_json::Value {
        serde_json::Value::Array(self.rows.iter().map(Row::to_json).collect())
    }
}

impl IntoIterator for Cursor {
    type Item = Row;
    type IntoIter = std::vec::IntoIter<Row>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows.into_iter()
    }
}
