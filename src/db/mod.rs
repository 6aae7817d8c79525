//! Database module - connection handle, parameter coercion and result rows

mod database;
mod params;
mod row;
mod statement;

pub use database::{Database, CREATED_AT, UPDATED_AT};
pub use params::{value_for_db, Params, Value, Values};
pub use row::{Cursor, Row};
