//! Strongly-typed metadata ids and names.

use crate::newtype::{define_newtype_id, define_newtype_string};

define_newtype_id! {
    /// Primary key of a table in the metadata store.
    pub struct TableId;
}

define_newtype_id! {
    /// Primary key of a column in the metadata store.
    ///
    /// Preview templates reference columns by this id (`{12}`).
    pub struct ColumnId;
}

define_newtype_id! {
    /// Primary key of a constraint in the metadata store.
    pub struct ConstraintId;
}

define_newtype_string! {
    /// Physical table name, unqualified.
    pub struct TableName;
}

define_newtype_string! {
    /// Physical column name.
    pub struct ColumnName;
}
