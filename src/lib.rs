//! Declare SQLite tables as data and insert or update rows without
//! hand-writing SQL.
//!
//! A [`Database`] owns one connection in WAL mode, creates the declared
//! [`Table`]s on setup and stamps `created_at`/`updated_at` with the
//! current UTC instant on [`Database::insert_row`] and
//! [`Database::update_row`]. Timestamps are stored as ISO-8601 text with an
//! explicit `+00:00` designator.

pub mod config;
pub mod db;
mod error;
mod models;
pub mod schema;
pub mod sql;
pub mod time;

#[cfg(feature = "napi")]
mod binding;

pub use config::DatabaseConfig;
pub use db::{value_for_db, Cursor, Database, Params, Row, Value, Values, CREATED_AT, UPDATED_AT};
pub use error::{Error, Result};
pub use models::InsertFallback;
pub use schema::{create_table_sql, Column, Table};

/// Version of the bundled SQLite library.
pub fn sqlite_version() -> &'static str {
    rusqlite::version()
}
