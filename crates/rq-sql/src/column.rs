//! Table and column handles used while building relations

use rq_core::{ColumnId, ColumnName, MetadataRepository, TableId, TableName};

use crate::error::{SqlError, SqlResult};

/// Handle to a physical table and the names of its columns.
///
/// Two handles denote the same table when their ids match.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TableRef {
    id: TableId,
    name: TableName,
    schema: Option<String>,
    columns: Vec<ColumnName>,
}

impl TableRef {
    /// Create a handle from explicit parts
    pub fn new(id: TableId, name: &str, schema: Option<&str>, columns: &[&str]) -> SqlResult<Self> {
        let name = TableName::try_new(name)
            .ok_or_else(|| SqlError::InvalidIdentifier(format!("empty name for table {id}")))?;
        let columns = columns
            .iter()
            .map(|c| {
                ColumnName::try_new(*c).ok_or_else(|| {
                    SqlError::InvalidIdentifier(format!("empty column name on table '{name}'"))
                })
            })
            .collect::<SqlResult<Vec<_>>>()?;
        Ok(Self {
            id,
            name,
            schema: schema.map(str::to_string),
            columns,
        })
    }

    /// Build a handle from the metadata store
    pub fn resolve(repo: &dyn MetadataRepository, id: TableId) -> SqlResult<Self> {
        let table = repo.table(id)?;
        let columns = repo
            .columns(&table.columns)?
            .into_iter()
            .map(|c| c.name)
            .collect();
        Ok(Self {
            id: table.id,
            name: table.name,
            schema: table.schema,
            columns,
        })
    }

    /// Metadata id
    pub fn id(&self) -> TableId {
        self.id
    }

    /// Unqualified table name
    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    /// Schema, if the table is not in the connection default
    pub fn schema(&self) -> Option<&str> {
        self.schema.as_deref()
    }

    /// Column names in ordinal order
    pub fn column_names(&self) -> &[ColumnName] {
        &self.columns
    }

    /// Returns true if both handles point at the same table
    pub fn is_same_table(&self, other: &TableRef) -> bool {
        self.id == other.id
    }

    /// Handle to one of this table's columns
    pub fn column(&self, name: &str) -> SqlResult<ColumnRef> {
        let column = self
            .columns
            .iter()
            .find(|c| c.as_str() == name)
            .ok_or_else(|| SqlError::UnknownColumn {
                table: self.name.to_string(),
                column: name.to_string(),
            })?;
        Ok(ColumnRef {
            table: self.clone(),
            name: column.clone(),
        })
    }
}

impl std::fmt::Display for TableRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.schema {
            Some(schema) => write!(f, "{}.{}", schema, self.name),
            None => write!(f, "{}", self.name),
        }
    }
}

/// Handle to a column of a physical table
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ColumnRef {
    table: TableRef,
    name: ColumnName,
}

impl ColumnRef {
    /// Build a handle from the metadata store
    pub fn resolve(repo: &dyn MetadataRepository, id: ColumnId) -> SqlResult<Self> {
        let column = repo.column(id)?;
        let table = TableRef::resolve(repo, column.table_id)?;
        Ok(Self {
            table,
            name: column.name,
        })
    }

    /// Owning table
    pub fn table(&self) -> &TableRef {
        &self.table
    }

    /// Column name
    pub fn name(&self) -> &str {
        self.name.as_str()
    }
}

impl std::fmt::Display for ColumnRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}.{}", self.table, self.name)
    }
}
