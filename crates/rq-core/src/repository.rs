//! Read-only metadata repository seam

use crate::error::CoreResult;
use crate::ids::{ColumnId, TableId};
use crate::schema::{Column, Constraint, Table, TableSettings};

/// Read-only access to table, column and constraint metadata.
///
/// The relation builder and the preview resolver are pure functions of
/// their arguments plus this interface. Lookups of unknown ids return
/// `CoreError::UnknownTable` / `CoreError::UnknownColumn`; implementations
/// never swallow a failed lookup.
pub trait MetadataRepository {
    /// Fetch a table by id
    fn table(&self, id: TableId) -> CoreResult<Table>;

    /// Fetch a table by its unqualified name
    fn table_by_name(&self, name: &str) -> CoreResult<Table>;

    /// Fetch a column by id
    fn column(&self, id: ColumnId) -> CoreResult<Column>;

    /// All constraints defined on a table, in definition order
    fn constraints(&self, table_id: TableId) -> CoreResult<Vec<Constraint>>;

    /// Settings of a table, including its preview template
    fn table_settings(&self, table_id: TableId) -> CoreResult<TableSettings>;

    /// Fetch several columns, preserving the order of `ids`
    fn columns(&self, ids: &[ColumnId]) -> CoreResult<Vec<Column>> {
        ids.iter().map(|id| self.column(*id)).collect()
    }

    /// All columns of a table in ordinal order
    fn table_columns(&self, table_id: TableId) -> CoreResult<Vec<Column>> {
        let table = self.table(table_id)?;
        self.columns(&table.columns)
    }

    /// Only the foreign key constraints of a table
    fn foreign_keys(&self, table_id: TableId) -> CoreResult<Vec<Constraint>> {
        Ok(self
            .constraints(table_id)?
            .into_iter()
            .filter(Constraint::is_foreign_key)
            .collect())
    }
}
