//! Table and column declarations rendered to `CREATE TABLE IF NOT EXISTS`

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::db::Database;
use crate::error::Result;

/// A column as a literal name plus a raw SQL type fragment.
///
/// Neither field is quoted or validated; `sql_type` may carry
/// constraints, e.g. `"INTEGER PRIMARY KEY"` or `"TEXT NOT NULL UNIQUE"`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Column {
    pub name: String,
    #[serde(rename = "type")]
    pub sql_type: String,
}

impl Column {
    pub fn new(name: impl Into<String>, sql_type: impl Into<String>) -> Self {
        Column {
            name: name.into(),
            sql_type: sql_type.into(),
        }
    }
}

/// A table declaration with columns in declared order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Table {
    pub name: String,
    #[serde(default)]
    pub columns: Vec<Column>,
}

impl Table {
    pub fn new(name: impl Into<String>, columns: Vec<Column>) -> Self {
        Table {
            name: name.into(),
            columns,
        }
    }

    /// Append a column, builder style.
    pub fn column(mut self, name: impl Into<String>, sql_type: impl Into<String>) -> Self {
        self.columns.push(Column::new(name, sql_type));
        self
    }

    /// Create the table if it does not exist yet.
    pub fn create(&self, db: &Database) -> Result<()> {
        debug!(table = %self.name, "creating table");
        db.execute(&create_table_sql(self), ())?;
        Ok(())
    }
}

/// Render the DDL for `table`.
///
/// ```text
/// CREATE TABLE IF NOT EXISTS items (
///     id INTEGER PRIMARY KEY,
///     name TEXT
/// )
/// ```
pub fn create_table_sql(table: &Table) -> String {
    let column_defs = table
        .columns
        .iter()
        .map(|col| format!("    {} {}", col.name, col.sql_type))
        .collect::<Vec<_>>()
        .join(",\n");
    format!(
        "CREATE TABLE IF NOT EXISTS {} (\n{}\n)",
        table.name, column_defs
    )
}
