//! Error types for rq-sql

use thiserror::Error;

/// Relation building and rendering errors
#[derive(Error, Debug)]
pub enum SqlError {
    /// SQL parse error (S001)
    #[error("[S001] SQL parse error at line {line}, column {column}: {message}")]
    ParseError {
        message: String,
        line: usize,
        column: usize,
    },

    /// Empty SQL (S002)
    #[error("[S002] SQL is empty")]
    EmptySql,

    /// Alias is empty or blank (S003)
    #[error("[S003] Invalid alias '{alias}': aliases must be non-empty")]
    InvalidAlias { alias: String },

    /// Two initial columns share an alias (S004)
    #[error("[S004] Duplicate output alias '{alias}'")]
    DuplicateAlias { alias: String },

    /// Join path is empty, not contiguous, or does not connect the base table
    /// to the column's table (S005)
    #[error("[S005] Malformed join path for '{alias}': {reason}")]
    MalformedJoinPath { alias: String, reason: String },

    /// A column without a join path is not on the base table (S006)
    #[error("[S006] Column '{column}' of '{alias}' is not on base table '{table}'")]
    ColumnNotOnBaseTable {
        alias: String,
        column: String,
        table: String,
    },

    /// Column name not found on a table or alias scope (S007)
    #[error("[S007] Column '{column}' not found on '{table}'")]
    UnknownColumn { table: String, column: String },

    /// A relation stage name is empty or already used (S008)
    #[error("[S008] Invalid relation stage '{name}': {reason}")]
    InvalidStage { name: String, reason: String },

    /// A transformation rejected its input (S009)
    #[error("[S009] Transformation '{name}' failed: {message}")]
    TransformationFailed { name: String, message: String },

    /// An identifier handed to a constructor is empty (S010)
    #[error("[S010] Invalid identifier: {0}")]
    InvalidIdentifier(String),

    /// Metadata lookup failure (S011)
    #[error("[S011] Metadata error: {0}")]
    Core(#[from] rq_core::CoreError),
}

/// Result type alias for SqlError
pub type SqlResult<T> = Result<T, SqlError>;
