//! Statement module - binds coerced parameters and drains the result rows

use rusqlite::{params_from_iter, Connection, ToSql};
use std::sync::Arc;
use tracing::trace;

use super::params::{Params, StorageParams};
use super::row::{Cursor, Row};
use crate::error::Result;

/// Run one statement of any kind against `conn`.
///
/// Parameters are coerced before the statement is prepared, so a
/// precondition failure never reaches the engine.
pub(crate) fn run(conn: &Connection, sql: &str, params: &Params) -> Result<Cursor> {
    let bound = params.to_storage()?;
    trace!(sql, params = params.len(), "executing statement");

    let mut stmt = conn.prepare(sql)?;
    let columns: Vec<String> = stmt
        .column_names()
        .into_iter()
        .map(String::from)
        .collect();
    let names: Arc<[String]> = Arc::from(columns.as_slice());
    let readonly = stmt.readonly();

    let mut rows = match &bound {
        StorageParams::Positional(values) => stmt.query(params_from_iter(values.iter()))?,
        StorageParams::Named(values) => {
            let named: Vec<(&str, &dyn ToSql)> = values
                .iter()
                .map(|(name, value)| (name.as_str(), value as &dyn ToSql))
                .collect();
            stmt.query(named.as_slice())?
        }
    };

    let mut results = Vec::new();
    while let Some(row) = rows.next()? {
        results.push(Row::from_sqlite(&names, row)?);
    }

    Ok(Cursor {
        columns,
        rows: results,
        // The connection counter still holds the last write's count after a read
        changes: if readonly { 0 } else { conn.changes() as u64 },
        last_insert_rowid: conn.last_insert_rowid(),
    })
}
