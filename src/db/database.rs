//! Database module - provides the Database handle over one SQLite connection

use chrono::{DateTime, Utc};
use once_cell::unsync::OnceCell;
use rusqlite::Connection;
use std::path::Path;
use tracing::debug;

use super::params::{Params, Value, Values};
use super::row::Cursor;
use super::statement;
use crate::config::DatabaseConfig;
use crate::error::Result;
use crate::models::InsertFallback;
use crate::sql::{insert_sql, update_sql};
use crate::time::{self, Clock};

/// Column stamped on every inserted row unless the caller supplies it.
pub const CREATED_AT: &str = "created_at";

/// Column stamped on every updated row, always with the current instant.
pub const UPDATED_AT: &str = "updated_at";

/// Handle owning a single lazily opened SQLite connection.
///
/// The connection is opened on first use, configured with WAL journaling
/// and the configured pragmas, and then reused until the handle is closed
/// or dropped. Statements run in the driver's autocommit mode.
pub struct Database {
    config: DatabaseConfig,
    conn: OnceCell<Connection>,
    clock: Clock,
}

impl Database {
    /// Create a handle without touching the database file.
    pub fn new(config: DatabaseConfig) -> Self {
        Database {
            config,
            conn: OnceCell::new(),
            clock: time::utc_now,
        }
    }

    /// Create a handle and create every declared table.
    pub fn open(config: DatabaseConfig) -> Result<Self> {
        Database::new(config).setup()
    }

    /// Open a handle, run `f` with it, and close it on every exit path.
    ///
    /// An error from `f` takes precedence over an error while closing.
    pub fn scoped<T>(config: DatabaseConfig, f: impl FnOnce(&Database) -> Result<T>) -> Result<T> {
        let db = Database::open(config)?;
        // On error `db` is dropped, which closes the connection
        let value = f(&db)?;
        db.close()?;
        Ok(value)
    }

    /// Replace the source of `created_at`/`updated_at` instants.
    pub fn with_clock(mut self, clock: Clock) -> Self {
        self.clock = clock;
        self
    }

    /// Create every declared table, in declaration order.
    pub fn setup(self) -> Result<Self> {
        for table in &self.config.tables {
            table.create(&self)?;
        }
        Ok(self)
    }

    pub fn path(&self) -> &Path {
        &self.config.path
    }

    pub fn config(&self) -> &DatabaseConfig {
        &self.config
    }

    /// The underlying connection, opened and configured on first call.
    pub fn connection(&self) -> Result<&Connection> {
        self.conn.get_or_try_init(|| self.connect())
    }

    fn connect(&self) -> Result<Connection> {
        debug!(path = %self.config.path.display(), "opening database");
        let conn = Connection::open(&self.config.path)?;
        for pragma in self.config.startup_pragmas() {
            debug!(pragma, "applying pragma");
            statement::run(&conn, &format!("pragma {}", pragma), &Params::none())?;
        }
        Ok(conn)
    }

    /// Execute one statement, coercing each parameter before binding.
    pub fn execute(&self, sql: &str, params: impl Into<Params>) -> Result<Cursor> {
        let params = params.into();
        statement::run(self.connection()?, sql, &params)
    }

    /// Insert a row with `created_at` set to the current UTC instant.
    ///
    /// `created_at` is the first column; a caller-supplied `created_at`
    /// replaces the default value in that position. Remaining columns keep
    /// the caller's order.
    pub fn insert_row(&self, table: &str, values: Values, fallback: InsertFallback) -> Result<Cursor> {
        let mut row = Values::with_capacity(values.len() + 1);
        row.insert(CREATED_AT.to_string(), Value::from(self.utc_now()));
        row.extend(values);

        debug!(table, columns = row.len(), %fallback, "inserting row");
        let sql = insert_sql(table, row.keys(), fallback);
        self.execute(&sql, Params::Positional(row.into_values().collect()))
    }

    /// Update the rows matching every `conditions` column, setting
    /// `updated_at` to the current UTC instant.
    ///
    /// `updated_at` always comes first and cannot be overridden; a
    /// caller-supplied `updated_at` is discarded. Parameters are bound as
    /// the set values followed by the condition values. Empty `conditions`
    /// produce an incomplete WHERE clause that the engine rejects.
    pub fn update_row(&self, table: &str, values: Values, conditions: Values) -> Result<Cursor> {
        let mut row = Values::with_capacity(values.len() + 1);
        row.insert(UPDATED_AT.to_string(), Value::from(self.utc_now()));
        row.extend(values.into_iter().filter(|(column, _)| column != UPDATED_AT));

        debug!(table, columns = row.len(), conditions = conditions.len(), "updating row");
        let sql = update_sql(table, row.keys(), conditions.keys());
        let params: Vec<Value> = row.into_values().chain(conditions.into_values()).collect();
        self.execute(&sql, Params::Positional(params))
    }

    /// Current instant from the handle's clock.
    pub fn utc_now(&self) -> DateTime<Utc> {
        (self.clock)()
    }

    /// Close the connection if it was ever opened.
    pub fn close(self) -> Result<()> {
        if let Some(conn) = self.conn.into_inner() {
            debug!(path = %self.config.path.display(), "closing database");
            conn.close().map_err(|(_, err)| err)?;
        }
        Ok(())
    }
}

impl std::fmt::Debug for Database {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Database")
            .field("path", &self.config.path)
            .field("open", &self.conn.get().is_some())
            .finish_non_exhaustive()
    }
}
