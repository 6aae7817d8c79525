//! Handle configuration: database path, startup pragmas and declared tables

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::Result;
use crate::schema::Table;

/// Pragma applied to every connection before the configured ones.
pub const JOURNAL_MODE_WAL: &str = "journal_mode=wal";

/// Configuration for a [`Database`](crate::Database) handle
///
/// # Examples
///
/// ```
/// use sqlite_rowkit::{DatabaseConfig, Table};
///
/// let config = DatabaseConfig::new("app.db")
///     .with_pragma("foreign_keys=ON")
///     .with_table(Table::new("notes", vec![]).column("body", "TEXT"));
///
/// let from_json = DatabaseConfig::from_json(
///     r#"{"path": "app.db", "tables": [{"name": "notes", "columns": [{"name": "body", "type": "TEXT"}]}]}"#,
/// ).unwrap();
/// assert_eq!(from_json.tables, config.tables);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// Database file, created if missing; `:memory:` opens a private in-memory database
    pub path: PathBuf,

    /// Raw pragma bodies, e.g. `"foreign_keys=ON"`, applied in order after WAL mode
    #[serde(default)]
    pub pragmas: Vec<String>,

    /// Tables created on setup, in order
    #[serde(default)]
    pub tables: Vec<Table>,
}

impl DatabaseConfig {
    pub fn new(path: impl AsRef<Path>) -> Self {
        DatabaseConfig {
            path: path.as_ref().to_path_buf(),
            pragmas: Vec::new(),
            tables: Vec::new(),
        }
    }

    pub fn with_pragma(mut self, pragma: impl Into<String>) -> Self {
        self.pragmas.push(pragma.into());
        self
    }

    pub fn with_table(mut self, table: Table) -> Self {
        self.tables.push(table);
        self
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// All pragmas in application order, WAL mode first.
    pub fn startup_pragmas(&self) -> impl Iterator<Item = &str> {
        std::iter::once(JOURNAL_MODE_WAL).chain(self.pragmas.iter().map(String::as_str))
    }
}
