//! Statement text for row inserts and updates
//!
//! Table and column names are interpolated as given, values are always
//! `?` placeholders bound in column order.

use crate::models::InsertFallback;

/// `INSERT OR <fallback> INTO t(a, b) VALUES(?, ?)`
pub fn insert_sql<I, S>(table: &str, columns: I, fallback: InsertFallback) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let columns: Vec<String> = columns
        .into_iter()
        .map(|col| col.as_ref().to_string())
        .collect();
    let column_string = columns.join(", ");
    let placeholders = vec!["?"; columns.len()].join(", ");
    format!(
        "INSERT OR {} INTO {}({}) VALUES({})",
        fallback, table, column_string, placeholders
    )
}

/// `UPDATE t SET a = ?, b = ? WHERE x = ? AND y = ?`
pub fn update_sql<I, S, W, T>(table: &str, columns: I, conditions: W) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
    W: IntoIterator<Item = T>,
    T: AsRef<str>,
{
    let set_clause = assignments(columns).join(", ");
    let where_clause = assignments(conditions).join(" AND ");
    format!("UPDATE {} SET {} WHERE {}", table, set_clause, where_clause)
}

fn assignments<I, S>(columns: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    columns
        .into_iter()
        .map(|col| format!("{} = ?", col.as_ref()))
        .collect()
}
