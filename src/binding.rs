//! Node binding - exposes the database handle as a JavaScript class

use napi::bindgen_prelude::*;
use napi_derive::napi;

use crate::error::to_napi_error;
use crate::{Database, DatabaseConfig, InsertFallback, Params, Table, Value, Values};

/// Database handle for JavaScript callers.
///
/// Values arrive as JSON; timestamps should be passed pre-formatted.
#[napi(js_name = "Database")]
pub struct JsDatabase {
    inner: Option<Database>,
}

#[napi]
impl JsDatabase {
    /// Open the database, apply pragmas and create the declared tables
    #[napi(constructor)]
    pub fn new(
        path: String,
        pragmas: Option<Vec<String>>,
        tables: Option<serde_json::Value>,
    ) -> Result<Self> {
        let tables: Vec<Table> = match tables {
            Some(tables) => serde_json::from_value(tables)
                .map_err(|e| Error::from_reason(format!("invalid tables: {}", e)))?,
            None => Vec::new(),
        };
        let config = DatabaseConfig {
            path: path.into(),
            pragmas: pragmas.unwrap_or_default(),
            tables,
        };
        let db = Database::open(config).map_err(to_napi_error)?;
        Ok(JsDatabase { inner: Some(db) })
    }

    /// Execute a statement and return its rows as objects
    #[napi]
    pub fn execute(&self, sql: String, params: Option<serde_json::Value>) -> Result<serde_json::Value> {
        let params = params.map(Params::from).unwrap_or_default();
        let cursor = self.db()?.execute(&sql, params).map_err(to_napi_error)?;
        Ok(cursor.to_json())
    }

    #[napi]
    pub fn insert_row(
        &self,
        table: String,
        values: serde_json::Value,
        fallback: Option<String>,
    ) -> Result<()> {
        let fallback = match fallback {
            Some(f) => f.parse::<InsertFallback>().map_err(to_napi_error)?,
            None => InsertFallback::default(),
        };
        self.db()?
            .insert_row(&table, values_from_json(values)?, fallback)
            .map_err(to_napi_error)?;
        Ok(())
    }

    #[napi]
    pub fn update_row(
        &self,
        table: String,
        values: serde_json::Value,
        conditions: serde_json::Value,
    ) -> Result<()> {
        self.db()?
            .update_row(&table, values_from_json(values)?, values_from_json(conditions)?)
            .map_err(to_napi_error)?;
        Ok(())
    }

    /// Close the connection; later calls fail
    #[napi]
    pub fn close(&mut self) -> Result<()> {
        match self.inner.take() {
            Some(db) => db.close().map_err(to_napi_error),
            None => Ok(()),
        }
    }
}

impl JsDatabase {
    fn db(&self) -> Result<&Database> {
        self.inner
            .as_ref()
            .ok_or_else(|| Error::from_reason("Database is closed"))
    }
}

fn values_from_json(value: serde_json::Value) -> Result<Values> {
    match value {
        serde_json::Value::Object(map) => Ok(map
            .into_iter()
            .map(|(k, v)| (k, Value::from(v)))
            .collect()),
        other => Err(Error::from_reason(format!(
            "expected an object of column values, got {}",
            other
        ))),
    }
}
