//! Relation builder
//!
//! A `RelationBuilder` turns a base table and a list of initial columns into
//! one relation whose output columns are exactly the initial columns, in
//! order, labeled by their aliases. Transformations are applied after the
//! initial relation is built.
//!
//! The relation is computed lazily on first access and memoized for the
//! lifetime of the builder. The `with_*` methods consume the builder, so
//! its inputs cannot change once the relation has been handed out.

use std::cell::OnceCell;
use std::collections::HashSet;

use rq_core::Dialect;
use sqlparser::ast::Statement;

use crate::column::{ColumnRef, TableRef};
use crate::dialect::dialect_for;
use crate::error::{SqlError, SqlResult};
use crate::initial_column::InitialColumn;
use crate::join_tree::InitialSelect;
use crate::records::{RecordAccess, RecordOptions, RecordSet};
use crate::relation::Relation;
use crate::transform::{apply_transformations, Transformation};

/// Builds the relation described by a base table and initial columns
pub struct RelationBuilder {
    base_table: TableRef,
    initial_columns: Vec<InitialColumn>,
    transformations: Vec<Box<dyn Transformation>>,
    name: Option<String>,
    dialect: Dialect,
    relation: OnceCell<Relation>,
}

impl RelationBuilder {
    /// Create a builder.
    ///
    /// Fails if two columns share an alias, if a base column is not on
    /// `base_table`, or if a join path does not start at `base_table`.
    ///
    /// An empty `initial_columns` is accepted and yields a relation with no
    /// output columns. That relation can be rendered but not executed: the
    /// supported dialects have no SELECT without a selection list, so
    /// record-access backends reject it.
    pub fn new(base_table: TableRef, initial_columns: Vec<InitialColumn>) -> SqlResult<Self> {
        let mut aliases = HashSet::with_capacity(initial_columns.len());
        for column in &initial_columns {
            if !aliases.insert(column.alias()) {
                return Err(SqlError::DuplicateAlias {
                    alias: column.alias().to_string(),
                });
            }
            column.check_reachable_from(&base_table)?;
        }
        Ok(Self {
            base_table,
            initial_columns,
            transformations: Vec::new(),
            name: None,
            dialect: Dialect::default(),
            relation: OnceCell::new(),
        })
    }

    /// Set the transformations applied after the initial relation
    pub fn with_transformations(mut self, transformations: Vec<Box<dyn Transformation>>) -> Self {
        self.transformations = transformations;
        self.relation = OnceCell::new();
        self
    }

    /// Name the initial relation's stage (defaults to `<base table>_query`)
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self.relation = OnceCell::new();
        self
    }

    /// Render in the given dialect (defaults to DuckDB)
    pub fn with_dialect(mut self, dialect: Dialect) -> Self {
        self.dialect = dialect;
        self.relation = OnceCell::new();
        self
    }

    pub fn base_table(&self) -> &TableRef {
        &self.base_table
    }

    pub fn initial_columns(&self) -> &[InitialColumn] {
        &self.initial_columns
    }

    /// Name of the initial stage
    pub fn name(&self) -> String {
        self.name
            .clone()
            .unwrap_or_else(|| format!("{}_query", self.base_table.name()))
    }

    /// The relation before any transformation; not memoized
    pub fn initial_relation(&self) -> SqlResult<Relation> {
        let select = InitialSelect::build(&self.base_table, &self.initial_columns)?;
        let sql = select.render(dialect_for(self.dialect).as_ref());
        let columns = self
            .initial_columns
            .iter()
            .map(|c| c.alias().to_string())
            .collect();
        Relation::initial(&self.name(), sql, columns, self.dialect)
    }

    /// The built relation, computed once per builder
    pub fn relation(&self) -> SqlResult<&Relation> {
        if let Some(relation) = self.relation.get() {
            return Ok(relation);
        }
        let relation = self.compute()?;
        Ok(self.relation.get_or_init(|| relation))
    }

    fn compute(&self) -> SqlResult<Relation> {
        let initial = self.initial_relation()?;
        let relation = apply_transformations(initial, &self.transformations)?;
        // A zero-column relation is representable but not expressible in
        // the supported dialects, so it is not re-parsed.
        if !relation.columns().is_empty() {
            relation.to_statement()?;
        }
        log::debug!(
            "Built relation '{}' over '{}': {} columns, {} stages",
            relation.name(),
            self.base_table,
            relation.columns().len(),
            relation.stages().len()
        );
        log::trace!("Relation SQL: {}", relation.to_sql());
        Ok(relation)
    }

    /// Output column labels of the built relation
    pub fn output_columns(&self) -> SqlResult<&[String]> {
        Ok(self.relation()?.columns())
    }

    /// Initial output columns paired with the column each one selects
    pub fn column_sources(&self) -> Vec<(&str, &ColumnRef)> {
        self.initial_columns
            .iter()
            .map(|c| (c.alias(), c.column()))
            .collect()
    }

    /// Rendered SQL of the built relation
    pub fn sql(&self) -> SqlResult<String> {
        Ok(self.relation()?.to_sql())
    }

    /// Parsed statement of the built relation
    pub fn statement(&self) -> SqlResult<Statement> {
        self.relation()?.to_statement()
    }

    /// Fetch the relation's rows through a record-access backend
    pub async fn get_records<A>(
        &self,
        access: &A,
        options: &RecordOptions,
    ) -> Result<RecordSet, A::Error>
    where
        A: RecordAccess + ?Sized,
    {
        let relation = self.relation()?;
        access.get_records(relation, options).await
    }

    /// Count the relation's rows through a record-access backend
    pub async fn get_count<A>(&self, access: &A, options: &RecordOptions) -> Result<usize, A::Error>
    where
        A: RecordAccess + ?Sized,
    {
        let relation = self.relation()?;
        access.get_count(relation, options).await
    }
}

impl std::fmt::Debug for RelationBuilder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RelationBuilder")
            .field("base_table", &self.base_table)
            .field("initial_columns", &self.initial_columns)
            .field(
                "transformations",
                &self
                    .transformations
                    .iter()
                    .map(|t| t.name())
                    .collect::<Vec<_>>(),
            )
            .field("name", &self.name)
            .field("dialect", &self.dialect)
            .finish()
    }
}

#[cfg(test)]
#[path = "builder_test.rs"]
mod tests;
