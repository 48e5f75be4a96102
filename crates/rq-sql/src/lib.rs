//! rq-sql - Relation building layer for Relquery
//!
//! This crate turns a base table and a list of initial columns (each with an
//! optional foreign-key join path) into a single SQL relation. Join paths
//! are folded into one left-deep join tree with a distinct alias per joined
//! table, the result is rendered as a chain of CTE stages, and
//! caller-supplied transformations are applied in order.

pub mod alias;
pub mod builder;
pub mod column;
pub mod dialect;
pub mod error;
pub mod initial_column;
pub mod join;
pub mod join_tree;
pub mod records;
pub mod relation;
pub mod transform;

#[cfg(any(test, feature = "test-support"))]
pub mod test_utils;

pub use alias::{AliasedTable, QualifiedColumn};
pub use builder::RelationBuilder;
pub use column::{ColumnRef, TableRef};
pub use dialect::{dialect_for, DuckDbDialect, SnowflakeDialect, SqlDialect};
pub use error::{SqlError, SqlResult};
pub use initial_column::InitialColumn;
pub use join::JoinParams;
pub use join_tree::{InitialSelect, JoinNode, JoinTree, SelectItem};
pub use records::{OrderBy, RecordAccess, RecordOptions, RecordSet, SortDirection};
pub use relation::{Relation, Stage};
pub use transform::{apply_transformations, from_fn, FnTransformation, Transformation};
