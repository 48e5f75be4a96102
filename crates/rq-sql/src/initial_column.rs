//! Requested output columns of a relation

use rq_core::{ColumnId, MetadataRepository};

use crate::column::{ColumnRef, TableRef};
use crate::error::{SqlError, SqlResult};
use crate::join::JoinParams;

/// A requested output column: an alias, the target column and, for a column
/// that is not on the base table, the join path leading to it.
///
/// Construction checks the alias and the internal shape of the path (hops
/// are contiguous and end at the column's table). Whether the path starts at
/// the base table is checked by the builder, which knows the base table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InitialColumn {
    alias: String,
    column: ColumnRef,
    jp_path: Option<Vec<JoinParams>>,
}

impl InitialColumn {
    /// Create an initial column, validating alias and path
    pub fn new(
        alias: impl Into<String>,
        column: ColumnRef,
        jp_path: Option<Vec<JoinParams>>,
    ) -> SqlResult<Self> {
        let alias = alias.into();
        if alias.trim().is_empty() {
            return Err(SqlError::InvalidAlias { alias });
        }
        if let Some(path) = &jp_path {
            check_path_shape(&alias, &column, path)?;
        }
        Ok(Self {
            alias,
            column,
            jp_path,
        })
    }

    /// A column that lives on the base table
    pub fn base(alias: impl Into<String>, column: ColumnRef) -> SqlResult<Self> {
        Self::new(alias, column, None)
    }

    /// A column reached through a join path
    pub fn joined(
        alias: impl Into<String>,
        column: ColumnRef,
        jp_path: Vec<JoinParams>,
    ) -> SqlResult<Self> {
        Self::new(alias, column, Some(jp_path))
    }

    /// Build from metadata ids; `jp_path` is a list of
    /// `(left_column_id, right_column_id)` hops, empty for a base column.
    pub fn from_ids(
        repo: &dyn MetadataRepository,
        alias: impl Into<String>,
        column: ColumnId,
        jp_path: &[(ColumnId, ColumnId)],
    ) -> SqlResult<Self> {
        let column = ColumnRef::resolve(repo, column)?;
        if jp_path.is_empty() {
            return Self::base(alias, column);
        }
        let path = jp_path
            .iter()
            .map(|(left, right)| JoinParams::from_ids(repo, *left, *right))
            .collect::<SqlResult<Vec<_>>>()?;
        Self::joined(alias, column, path)
    }

    pub fn alias(&self) -> &str {
        &self.alias
    }

    pub fn column(&self) -> &ColumnRef {
        &self.column
    }

    pub fn jp_path(&self) -> Option<&[JoinParams]> {
        self.jp_path.as_deref()
    }

    /// Returns true if the column needs no join
    pub fn is_base_column(&self) -> bool {
        self.jp_path.is_none()
    }

    /// Check that the column is reachable from `base`
    pub(crate) fn check_reachable_from(&self, base: &TableRef) -> SqlResult<()> {
        match self.jp_path.as_deref().and_then(<[JoinParams]>::first) {
            None if !self.column.table().is_same_table(base) => {
                Err(SqlError::ColumnNotOnBaseTable {
                    alias: self.alias.clone(),
                    column: self.column.to_string(),
                    table: base.to_string(),
                })
            }
            Some(first) if !first.left_table().is_same_table(base) => {
                Err(SqlError::MalformedJoinPath {
                    alias: self.alias.clone(),
                    reason: format!(
                        "path starts at '{}' instead of base table '{}'",
                        first.left_table(),
                        base
                    ),
                })
            }
            _ => Ok(()),
        }
    }
}

fn check_path_shape(alias: &str, column: &ColumnRef, path: &[JoinParams]) -> SqlResult<()> {
    let malformed = |reason: String| SqlError::MalformedJoinPath {
        alias: alias.to_string(),
        reason,
    };
    let last = path
        .last()
        .ok_or_else(|| malformed("join path is empty".to_string()))?;
    for (i, pair) in path.windows(2).enumerate() {
        if !pair[0].right_table().is_same_table(pair[1].left_table()) {
            return Err(malformed(format!(
                "hop {} ends at '{}' but hop {} starts at '{}'",
                i,
                pair[0].right_table(),
                i + 1,
                pair[1].left_table()
            )));
        }
    }
    if !last.right_table().is_same_table(column.table()) {
        return Err(malformed(format!(
            "path ends at '{}' but column belongs to '{}'",
            last.right_table(),
            column.table()
        )));
    }
    Ok(())
}

#[cfg(test)]
#[path = "initial_column_test.rs"]
mod tests;
