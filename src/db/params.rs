//! Params module - bindable values and their conversion to SQLite storage values

use chrono::{DateTime, FixedOffset, NaiveDateTime, TimeZone, Utc};
use indexmap::IndexMap;
use rusqlite::types::Value as SqlValue;

use crate::error::{Error, Result};
use crate::time::format_utc;

/// Ordered column name to value mapping used for row inserts and updates.
pub type Values = IndexMap<String, Value>;

/// A value that can be bound to a statement parameter.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Null,
    Integer(i64),
    Real(f64),
    Text(String),
    Blob(Vec<u8>),
    Bool(bool),
    /// Timezone-aware instant; must carry a zero offset when bound
    Timestamp(DateTime<FixedOffset>),
    /// Instant without an offset, taken to be UTC
    NaiveTimestamp(NaiveDateTime),
}

impl Value {
    /// Convert to the engine's native representation.
    ///
    /// Timestamps become ISO-8601 text with an explicit UTC designator so
    /// they stay comparable as strings. A timestamp with any other offset
    /// fails with [`Error::NotUtc`].
    pub fn to_storage_value(&self) -> Result<SqlValue> {
        Ok(match self {
            Value::Null => SqlValue::Null,
            Value::Integer(i) => SqlValue::Integer(*i),
            Value::Real(f) => SqlValue::Real(*f),
            Value::Text(s) => SqlValue::Text(s.clone()),
            Value::Blob(b) => SqlValue::Blob(b.clone()),
            Value::Bool(b) => SqlValue::Integer(i64::from(*b)),
            Value::Timestamp(ts) => {
                let offset = *ts.offset();
                if offset.local_minus_utc() != 0 {
                    return Err(Error::NotUtc {
                        value: ts.to_rfc3339(),
                        offset,
                    });
                }
                SqlValue::Text(format_utc(&ts.with_timezone(&Utc)))
            }
            Value::NaiveTimestamp(ts) => SqlValue::Text(format_utc(&ts.and_utc())),
        })
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::Integer(i) => Some(*i),
            Value::Bool(b) => Some(i64::from(*b)),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Real(f) => Some(*f),
            Value::Integer(i) => Some(*i as f64),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_blob(&self) -> Option<&[u8]> {
        match self {
            Value::Blob(b) => Some(b),
            _ => None,
        }
    }
}

/// Coerce a single value for binding. See [`Value::to_storage_value`].
pub fn value_for_db(value: &Value) -> Result<SqlValue> {
    value.to_storage_value()
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Integer(v)
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Value::Integer(i64::from(v))
    }
}

impl From<u32> for Value {
    fn from(v: u32) -> Self {
        Value::Integer(i64::from(v))
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Real(v)
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Bool(v)
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::Text(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::Text(v.to_string())
    }
}

impl From<Vec<u8>> for Value {
    fn from(v: Vec<u8>) -> Self {
        Value::Blob(v)
    }
}

impl From<&[u8]> for Value {
    fn from(v: &[u8]) -> Self {
        Value::Blob(v.to_vec())
    }
}

impl<Tz: TimeZone> From<DateTime<Tz>> for Value {
    fn from(v: DateTime<Tz>) -> Self {
        Value::Timestamp(v.fixed_offset())
    }
}

impl From<NaiveDateTime> for Value {
    fn from(v: NaiveDateTime) -> Self {
        Value::NaiveTimestamp(v)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        v.map_or(Value::Null, Into::into)
    }
}

impl From<serde_json::Value> for Value {
    fn from(v: serde_json::Value) -> Self {
        match v {
            serde_json::Value::Null => Value::Null,
            serde_json::Value::Bool(b) => Value::Bool(b),
            serde_json::Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    Value::Integer(i)
                } else {
                    Value::Real(n.as_f64().unwrap_or(0.0))
                }
            }
            serde_json::Value::String(s) => Value::Text(s),
            // Complex types are stored as their JSON text
            other => Value::Text(other.to_string()),
        }
    }
}

/// Statement parameters, either positional (`?`) or named (`:name`).
#[derive(Debug, Clone, PartialEq)]
pub enum Params {
    Positional(Vec<Value>),
    Named(IndexMap<String, Value>),
}

impl Default for Params {
    fn default() -> Self {
        Params::Positional(Vec::new())
    }
}

impl Params {
    pub fn none() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        match self {
            Params::Positional(values) => values.len(),
            Params::Named(values) => values.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Coerce every value, keeping order and names.
    pub(crate) fn to_storage(&self) -> Result<StorageParams> {
        match self {
            Params::Positional(values) => values
                .iter()
                .map(value_for_db)
                .collect::<Result<Vec<_>>>()
                .map(StorageParams::Positional),
            Params::Named(values) => values
                .iter()
                .map(|(name, v)| Ok((named_parameter(name), value_for_db(v)?)))
                .collect::<Result<Vec<_>>>()
                .map(StorageParams::Named),
        }
    }
}

/// Parameters after coercion, ready to hand to the driver.
#[derive(Debug)]
pub(crate) enum StorageParams {
    Positional(Vec<SqlValue>),
    Named(Vec<(String, SqlValue)>),
}

/// Named keys may be given bare (`id`) or with their sigil (`:id`, `@id`, `$id`).
fn named_parameter(name: &str) -> String {
    if name.starts_with([':', '@', '$']) {
        name.to_string()
    } else {
        format!(":{}", name)
    }
}

impl From<()> for Params {
    fn from(_: ()) -> Self {
        Params::none()
    }
}

impl<V: Into<Value>> From<Vec<V>> for Params {
    fn from(values: Vec<V>) -> Self {
        Params::Positional(values.into_iter().map(Into::into).collect())
    }
}

impl<V: Into<Value>> From<IndexMap<String, V>> for Params {
    fn from(values: IndexMap<String, V>) -> Self {
        Params::Named(values.into_iter().map(|(k, v)| (k, v.into())).collect())
    }
}

impl From<serde_json::Value> for Params {
    /// Arrays bind positionally, objects by name, `null` binds nothing and
    /// any other scalar is a single positional parameter.
    fn from(value: serde_json::Value) -> Self {
        match value {
            serde_json::Value::Null => Params::none(),
            serde_json::Value::Array(items) => {
                Params::Positional(items.into_iter().map(Value::from).collect())
            }
            serde_json::Value::Object(map) => Params::Named(
                map.into_iter()
                    .map(|(k, v)| (k, Value::from(v)))
                    .collect(),
            ),
            scalar => Params::Positional(vec![Value::from(scalar)]),
        }
    }
}

/// Build positional [`Params`](crate::Params) from heterogeneous values.
///
/// Usage: `params![1, "text", Utc::now()]`
#[macro_export]
macro_rules! params {
    () => {
        $crate::Params::none()
    };
    ($($val:expr),+ $(,)?) => {
        $crate::Params::Positional(vec![$($crate::Value::from($val)),+])
    };
}

/// Build an ordered [`Values`](crate::Values) column map.
///
/// Usage: `values! { "name" => "widget", "qty" => 3 }`
#[macro_export]
macro_rules! values {
    () => {
        $crate::Values::new()
    };
    ($($key:expr => $val:expr),+ $(,)?) => {{
        let mut map = $crate::Values::new();
        $(map.insert(::std::string::String::from($key), $crate::Value::from($val));)+
        map
    }};
}
