//! Error types for rq-db

use thiserror::Error;

/// Record access errors
#[derive(Error, Debug)]
pub enum DbError {
    /// Connection error (D001)
    #[error("[D001] Database connection failed: {0}")]
    ConnectionError(String),

    /// Query execution error (D002)
    #[error("[D002] SQL execution failed: {0}")]
    ExecutionError(String),

    /// Table not found (D003)
    #[error("[D003] Table or view not found: {0}")]
    TableNotFound(String),

    /// Mutex poisoned (D004)
    #[error("[D004] Database mutex poisoned: {0}")]
    MutexPoisoned(String),

    /// Ordering requested on a column the relation does not output (D005)
    #[error("[D005] Cannot order by '{column}': not an output column of relation '{relation}'")]
    UnknownOrderColumn { column: String, relation: String },

    /// The relation could not be built (D006)
    #[error("[D006] {0}")]
    Relation(#[from] rq_sql::SqlError),

    /// The relation has no output columns (D007)
    #[error("[D007] Relation '{0}' has no output columns and cannot be executed")]
    EmptyRelation(String),
}

/// Result type alias for DbError
pub type DbResult<T> = Result<T, DbError>;

impl From<duckdb::Error> for DbError {
    fn from(err: duckdb::Error) -> Self {
        // duckdb::Error has no structured variant for missing relations
        let msg = err.to_string();
        if msg.contains("Table with name")
            || msg.contains("View with name")
            || msg.contains("Table or view with name")
            || (msg.contains("Catalog Error") && msg.contains("Table") && msg.contains("not found"))
        {
            DbError::TableNotFound(msg)
        } else {
            DbError::ExecutionError(msg)
        }
    }
}
