//! rq-core - Core library for Relquery
//!
//! This crate provides the relational metadata model (tables, columns,
//! constraints, preview settings), the read-only `MetadataRepository`
//! seam the query layers are written against, an in-memory `Catalog`
//! that can be loaded from YAML, and project configuration.

pub mod catalog;
pub mod config;
pub mod error;
pub mod ids;
mod newtype;
pub mod repository;
pub mod schema;

pub use catalog::Catalog;
pub use config::{Config, Dialect, PreviewConfig, PreviewMode};
pub use error::{CoreError, CoreResult};
pub use ids::{ColumnId, ColumnName, ConstraintId, TableId, TableName};
pub use repository::MetadataRepository;
pub use schema::{
    Column, Constraint, ConstraintKind, DisplayOptions, PreviewSettings, Table, TableSettings,
};
