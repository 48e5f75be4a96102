//! rq-db - Record access for Relquery
//!
//! This crate executes relations built by `rq-sql` against DuckDB and
//! returns their rows as JSON values.

pub mod duckdb;
pub mod error;
mod row_helpers;

pub use duckdb::DuckDbBackend;
pub use error::{DbError, DbResult};
