//! DuckDB record access backend

use crate::error::{DbError, DbResult};
use crate::row_helpers::collect_rows;
use async_trait::async_trait;
use duckdb::Connection;
use rq_sql::{RecordAccess, RecordOptions, RecordSet, Relation, SortDirection};
use std::path::Path;
use std::sync::{Mutex, MutexGuard};

/// DuckDB database backend
pub struct DuckDbBackend {
    conn: Mutex<Connection>,
}

impl DuckDbBackend {
    /// Create a new in-memory DuckDB connection
    pub fn in_memory() -> DbResult<Self> {
        let conn =
            Connection::open_in_memory().map_err(|e| DbError::ConnectionError(e.to_string()))?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Create a new DuckDB connection from a file path
    pub fn from_path(path: &Path) -> DbResult<Self> {
        let conn = Connection::open(path).map_err(|e| DbError::ConnectionError(e.to_string()))?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Create from path string (handles :memory: special case)
    pub fn new(path: &str) -> DbResult<Self> {
        if path == ":memory:" {
            Self::in_memory()
        } else {
            Self::from_path(Path::new(path))
        }
    }

    fn lock(&self) -> DbResult<MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|e| DbError::MutexPoisoned(e.to_string()))
    }

    /// Execute several statements, e.g. fixture DDL
    pub async fn execute_batch(&self, sql: &str) -> DbResult<()> {
        self.lock()?
            .execute_batch(sql)
            .map_err(|e| DbError::ExecutionError(e.to_string()))
    }

    /// Count the rows of an arbitrary query
    pub async fn query_count(&self, sql: &str) -> DbResult<usize> {
        self.query_count_sync(sql)
    }

    fn query_count_sync(&self, sql: &str) -> DbResult<usize> {
        let conn = self.lock()?;
        let count: i64 = conn.query_row(&format!("SELECT COUNT(*) FROM ({})", sql), [], |row| {
            row.get(0)
        })?;
        Ok(usize::try_from(count).unwrap_or_default())
    }

    fn query_records_sync(&self, sql: &str) -> DbResult<Vec<Vec<serde_json::Value>>> {
        let conn = self.lock()?;
        let mut stmt = conn.prepare(sql)?;
        Ok(collect_rows(&mut stmt)?)
    }
}

/// A relation without output columns renders `SELECT FROM ..`, which
/// DuckDB rejects
fn check_executable(relation: &Relation) -> DbResult<()> {
    if relation.columns().is_empty() {
        return Err(DbError::EmptyRelation(relation.name().to_string()));
    }
    Ok(())
}

/// Wrap a relation with the ordering and pagination of `options`
fn records_sql(relation: &Relation, options: &RecordOptions) -> DbResult<String> {
    check_executable(relation)?;
    let mut sql = format!("SELECT * FROM ({}) AS records", relation.to_sql());
    if !options.order_by.is_empty() {
        let mut terms = Vec::with_capacity(options.order_by.len());
        for order in &options.order_by {
            if !relation.columns().contains(&order.column) {
                return Err(DbError::UnknownOrderColumn {
                    column: order.column.clone(),
                    relation: relation.name().to_string(),
                });
            }
            let direction = match order.direction {
                SortDirection::Asc => "ASC",
                SortDirection::Desc => "DESC",
            };
            terms.push(format!("{} {}", relation.quote_ident(&order.column), direction));
        }
        sql.push_str(&format!(" ORDER BY {}", terms.join(", ")));
    }
    if let Some(limit) = options.limit {
        sql.push_str(&format!(" LIMIT {}", limit));
    }
    if let Some(offset) = options.offset {
        sql.push_str(&format!(" OFFSET {}", offset));
    }
    Ok(sql)
}

#[async_trait]
impl RecordAccess for DuckDbBackend {
    type Error = DbError;

    async fn get_records(
        &self,
        relation: &Relation,
        options: &RecordOptions,
    ) -> DbResult<RecordSet> {
        let sql = records_sql(relation, options)?;
        log::debug!("Fetching records of '{}'", relation.name());
        log::trace!("Records SQL: {}", sql);
        let rows = self.query_records_sync(&sql)?;
        Ok(RecordSet {
            columns: relation.columns().to_vec(),
            rows,
        })
    }

    /// Pagination does not apply to counts; the whole relation is counted
    async fn get_count(&self, relation: &Relation, _options: &RecordOptions) -> DbResult<usize> {
        check_executable(relation)?;
        log::debug!("Counting records of '{}'", relation.name());
        self.query_count_sync(&relation.to_sql())
    }
}

#[cfg(test)]
#[path = "duckdb_test.rs"]
mod tests;
