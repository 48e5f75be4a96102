//! Relational metadata model
//!
//! These are read-only views of what the metadata store knows about a
//! database: tables, their columns, constraints, and per-table preview
//! settings. Nothing in Relquery mutates them after loading.

use crate::ids::{ColumnId, ColumnName, ConstraintId, TableId, TableName};
use serde::{Deserialize, Serialize};

/// A table known to the metadata store
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Table {
    /// Metadata id
    pub id: TableId,
    /// Physical table name
    pub name: TableName,
    /// Schema the table lives in, `None` for the connection default
    #[serde(default)]
    pub schema: Option<String>,
    /// Column ids in ordinal order
    pub columns: Vec<ColumnId>,
}

/// Display metadata attached to a column
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisplayOptions {
    /// Render a preview of the referenced row for foreign-key columns
    pub show_fk_preview: bool,
}

impl Default for DisplayOptions {
    fn default() -> Self {
        Self {
            show_fk_preview: true,
        }
    }
}

/// A column known to the metadata store
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Column {
    /// Metadata id
    pub id: ColumnId,
    /// Owning table
    pub table_id: TableId,
    /// Physical column name
    pub name: ColumnName,
    /// Display metadata
    #[serde(default)]
    pub display_options: DisplayOptions,
}

/// Constraint type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConstraintKind {
    PrimaryKey,
    ForeignKey,
    Unique,
    Check,
}

impl std::fmt::Display for ConstraintKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConstraintKind::PrimaryKey => write!(f, "primary_key"),
            ConstraintKind::ForeignKey => write!(f, "foreign_key"),
            ConstraintKind::Unique => write!(f, "unique"),
            ConstraintKind::Check => write!(f, "check"),
        }
    }
}

/// A table constraint
///
/// For foreign keys `columns[i]` references `referent_columns[i]`; for
/// every other kind `referent_columns` is empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Constraint {
    /// Metadata id
    pub id: ConstraintId,
    /// Table the constraint is defined on
    pub table_id: TableId,
    /// Constraint type
    pub kind: ConstraintKind,
    /// Constrained columns
    pub columns: Vec<ColumnId>,
    /// Referenced columns (foreign keys only)
    #[serde(default)]
    pub referent_columns: Vec<ColumnId>,
}

impl Constraint {
    /// Returns true if this is a foreign key constraint
    pub fn is_foreign_key(&self) -> bool {
        self.kind == ConstraintKind::ForeignKey
    }

    /// Returns true if the constraint spans more than one column
    pub fn is_multi_column(&self) -> bool {
        self.columns.len() > 1
    }

    /// First constrained column
    pub fn constrained_column(&self) -> Option<ColumnId> {
        self.columns.first().copied()
    }

    /// First referent column
    pub fn referent_column(&self) -> Option<ColumnId> {
        self.referent_columns.first().copied()
    }
}

/// Preview settings of a table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PreviewSettings {
    /// Template with `{columnId}` placeholders
    pub template: String,
}

/// Per-table settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableSettings {
    /// Table these settings belong to
    pub table_id: TableId,
    /// How rows of this table are rendered when referenced
    pub preview_settings: PreviewSettings,
}
