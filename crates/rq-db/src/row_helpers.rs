//! Reading DuckDB row cells as JSON values.

use serde_json::Value;

/// Read a cell, trying the DuckDB types previews and records commonly use.
///
/// DuckDB integer columns return an error for `Option<String>`, so this
/// tries String -> i64 -> f64 -> bool and falls back to null.
pub(crate) fn get_cell(row: &duckdb::Row<'_>, idx: usize) -> Value {
    if let Ok(Some(s)) = row.get::<_, Option<String>>(idx) {
        return Value::String(s);
    }
    if let Ok(Some(n)) = row.get::<_, Option<i64>>(idx) {
        return Value::from(n);
    }
    if let Ok(Some(f)) = row.get::<_, Option<f64>>(idx) {
        return serde_json::Number::from_f64(f).map_or(Value::Null, Value::Number);
    }
    if let Ok(Some(b)) = row.get::<_, Option<bool>>(idx) {
        return Value::Bool(b);
    }
    Value::Null
}

/// Run a prepared statement and collect every row as JSON values.
pub(crate) fn collect_rows(stmt: &mut duckdb::Statement<'_>) -> duckdb::Result<Vec<Vec<Value>>> {
    stmt.query_map([], |row| {
        let column_count = row.as_ref().column_count();
        Ok((0..column_count).map(|i| get_cell(row, i)).collect())
    })?
    .collect()
}
