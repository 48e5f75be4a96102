//! In-memory metadata catalog
//!
//! A `Catalog` holds a complete snapshot of table, column and constraint
//! metadata. It is built programmatically or loaded from a YAML document:
//!
//! ```yaml
//! tables:
//!   - id: 1
//!     name: customers
//!     preview_template: "{2}"
//!     columns:
//!       - { id: 1, name: id }
//!       - { id: 2, name: name }
//!     constraints:
//!       - { id: 1, type: primary_key, columns: [1] }
//! ```

use crate::error::{CoreError, CoreResult};
use crate::ids::{ColumnId, ColumnName, ConstraintId, TableId, TableName};
use crate::repository::MetadataRepository;
use crate::schema::{
    Column, Constraint, ConstraintKind, DisplayOptions, PreviewSettings, Table, TableSettings,
};
use serde::Deserialize;
use std::collections::{BTreeMap, HashMap, HashSet};
use std::path::Path;

/// In-memory metadata store
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    tables: BTreeMap<TableId, Table>,
    columns: BTreeMap<ColumnId, Column>,
    constraints: BTreeMap<TableId, Vec<Constraint>>,
    constraint_ids: HashSet<ConstraintId>,
    preview_templates: HashMap<TableId, String>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct CatalogFile {
    #[serde(default)]
    tables: Vec<TableDef>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct TableDef {
    id: TableId,
    name: TableName,
    #[serde(default)]
    schema: Option<String>,
    #[serde(default)]
    preview_template: Option<String>,
    columns: Vec<ColumnDef>,
    #[serde(default)]
    constraints: Vec<ConstraintDef>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct ColumnDef {
    id: ColumnId,
    name: ColumnName,
    #[serde(default = "default_true")]
    show_fk_preview: bool,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct ConstraintDef {
    id: ConstraintId,
    #[serde(rename = "type")]
    kind: ConstraintKind,
    columns: Vec<ColumnId>,
    #[serde(default)]
    referent_columns: Vec<ColumnId>,
}

fn default_true() -> bool {
    true
}

impl Catalog {
    /// Create an empty catalog
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a catalog from a YAML file
    pub fn load(path: &Path) -> CoreResult<Self> {
        if !path.exists() {
            return Err(CoreError::CatalogNotFound {
                path: path.display().to_string(),
            });
        }
        let content = std::fs::read_to_string(path).map_err(|e| CoreError::IoWithPath {
            path: path.display().to_string(),
            source: e,
        })?;
        let catalog = Self::from_yaml(&content)?;
        log::debug!(
            "Loaded catalog from {} ({} tables, {} columns)",
            path.display(),
            catalog.tables.len(),
            catalog.columns.len()
        );
        Ok(catalog)
    }

    /// Parse a catalog from YAML text.
    ///
    /// All tables and columns are registered before any constraint so
    /// foreign keys may reference tables defined later in the document.
    pub fn from_yaml(content: &str) -> CoreResult<Self> {
        let file: CatalogFile = serde_yaml::from_str(content)?;
        let mut catalog = Self::new();

        for table in &file.tables {
            catalog.add_table(table.id, table.name.as_str(), table.schema.as_deref())?;
            for column in &table.columns {
                catalog.add_column(
                    table.id,
                    column.id,
                    column.name.as_str(),
                    column.show_fk_preview,
                )?;
            }
        }

        for table in file.tables {
            for def in table.constraints {
                catalog.add_constraint(Constraint {
                    id: def.id,
                    table_id: table.id,
                    kind: def.kind,
                    columns: def.columns,
                    referent_columns: def.referent_columns,
                })?;
            }
            if let Some(template) = table.preview_template {
                catalog.set_preview_template(table.id, template)?;
            }
        }

        Ok(catalog)
    }

    /// Register a table with no columns
    pub fn add_table(&mut self, id: TableId, name: &str, schema: Option<&str>) -> CoreResult<()> {
        if self.tables.contains_key(&id) {
            return Err(invalid(format!("duplicate table id {id}")));
        }
        let name = TableName::try_new(name)
            .ok_or_else(|| invalid(format!("table {id} has an empty name")))?;
        if self.tables.values().any(|t| t.name == name && t.schema.as_deref() == schema) {
            return Err(invalid(format!("duplicate table name '{name}'")));
        }
        self.tables.insert(
            id,
            Table {
                id,
                name,
                schema: schema.map(str::to_string),
                columns: Vec::new(),
            },
        );
        Ok(())
    }

    /// Append a column to a registered table
    pub fn add_column(
        &mut self,
        table_id: TableId,
        id: ColumnId,
        name: &str,
        show_fk_preview: bool,
    ) -> CoreResult<()> {
        if self.columns.contains_key(&id) {
            return Err(invalid(format!("duplicate column id {id}")));
        }
        let name = ColumnName::try_new(name)
            .ok_or_else(|| invalid(format!("column {id} has an empty name")))?;
        let columns = &self.columns;
        let table = self
            .tables
            .get_mut(&table_id)
            .ok_or(CoreError::UnknownTable { id: table_id.get() })?;
        if table
            .columns
            .iter()
            .filter_map(|c| columns.get(c))
            .any(|c| c.name == name)
        {
            return Err(invalid(format!(
                "duplicate column name '{}' on table '{}'",
                name, table.name
            )));
        }
        table.columns.push(id);
        self.columns.insert(
            id,
            Column {
                id,
                table_id,
                name,
                display_options: DisplayOptions { show_fk_preview },
            },
        );
        Ok(())
    }

    /// Register a constraint after checking it against known columns
    pub fn add_constraint(&mut self, constraint: Constraint) -> CoreResult<()> {
        if !self.constraint_ids.insert(constraint.id) {
            return Err(invalid(format!("duplicate constraint id {}", constraint.id)));
        }
        if let Err(e) = self.check_constraint(&constraint) {
            self.constraint_ids.remove(&constraint.id);
            return Err(e);
        }
        self.constraints
            .entry(constraint.table_id)
            .or_default()
            .push(constraint);
        Ok(())
    }

    /// Shorthand for a single-column foreign key
    pub fn add_foreign_key(
        &mut self,
        id: ConstraintId,
        column: ColumnId,
        referent_column: ColumnId,
    ) -> CoreResult<()> {
        let table_id = self.column(column)?.table_id;
        self.add_constraint(Constraint {
            id,
            table_id,
            kind: ConstraintKind::ForeignKey,
            columns: vec![column],
            referent_columns: vec![referent_column],
        })
    }

    /// Set the preview template of a table
    pub fn set_preview_template(
        &mut self,
        table_id: TableId,
        template: impl Into<String>,
    ) -> CoreResult<()> {
        if !self.tables.contains_key(&table_id) {
            return Err(CoreError::UnknownTable { id: table_id.get() });
        }
        self.preview_templates.insert(table_id, template.into());
        Ok(())
    }

    /// Change the preview flag of a column
    pub fn set_show_fk_preview(&mut self, column: ColumnId, show: bool) -> CoreResult<()> {
        let column = self
            .columns
            .get_mut(&column)
            .ok_or(CoreError::UnknownColumn { id: column.get() })?;
        column.display_options.show_fk_preview = show;
        Ok(())
    }

    /// All tables in id order
    pub fn tables(&self) -> impl Iterator<Item = &Table> {
        self.tables.values()
    }

    fn check_constraint(&self, constraint: &Constraint) -> CoreResult<()> {
        let table = self
            .tables
            .get(&constraint.table_id)
            .ok_or(CoreError::UnknownTable {
                id: constraint.table_id.get(),
            })?;
        if constraint.columns.is_empty() {
            return Err(invalid(format!(
                "constraint {} has no columns",
                constraint.id
            )));
        }
        for column in &constraint.columns {
            if !table.columns.contains(column) {
                return Err(invalid(format!(
                    "constraint {} references column {} which is not on table '{}'",
                    constraint.id, column, table.name
                )));
            }
        }
        if constraint.is_foreign_key() {
            if constraint.referent_columns.len() != constraint.columns.len() {
                return Err(invalid(format!(
                    "foreign key {} has {} columns but {} referent columns",
                    constraint.id,
                    constraint.columns.len(),
                    constraint.referent_columns.len()
                )));
            }
            let mut referent_tables = HashSet::new();
            for referent in &constraint.referent_columns {
                referent_tables.insert(self.column(*referent)?.table_id);
            }
            if referent_tables.len() != 1 {
                return Err(invalid(format!(
                    "foreign key {} references columns of more than one table",
                    constraint.id
                )));
            }
        } else if !constraint.referent_columns.is_empty() {
            return Err(invalid(format!(
                "{} constraint {} cannot have referent columns",
                constraint.kind, constraint.id
            )));
        }
        Ok(())
    }

    /// Template used when a table has no explicit preview settings:
    /// its primary key, or its first column when it has none.
    fn default_preview_template(&self, table: &Table) -> String {
        let pk = self
            .constraints
            .get(&table.id)
            .into_iter()
            .flatten()
            .find(|c| c.kind == ConstraintKind::PrimaryKey)
            .and_then(Constraint::constrained_column);
        match pk.or_else(|| table.columns.first().copied()) {
            Some(column) => format!("{{{column}}}"),
            None => String::new(),
        }
    }
}

fn invalid(message: String) -> CoreError {
    CoreError::CatalogInvalid { message }
}

impl MetadataRepository for Catalog {
    fn table(&self, id: TableId) -> CoreResult<Table> {
        self.tables
            .get(&id)
            .cloned()
            .ok_or(CoreError::UnknownTable { id: id.get() })
    }

    fn table_by_name(&self, name: &str) -> CoreResult<Table> {
        self.tables
            .values()
            .find(|t| t.name == name)
            .cloned()
            .ok_or_else(|| CoreError::UnknownTableName {
                name: name.to_string(),
            })
    }

    fn column(&self, id: ColumnId) -> CoreResult<Column> {
        self.columns
            .get(&id)
            .cloned()
            .ok_or(CoreError::UnknownColumn { id: id.get() })
    }

    fn constraints(&self, table_id: TableId) -> CoreResult<Vec<Constraint>> {
        if !self.tables.contains_key(&table_id) {
            return Err(CoreError::UnknownTable { id: table_id.get() });
        }
        Ok(self
            .constraints
            .get(&table_id)
            .cloned()
            .unwrap_or_default())
    }

    fn table_settings(&self, table_id: TableId) -> CoreResult<TableSettings> {
        let table = self
            .tables
            .get(&table_id)
            .ok_or(CoreError::UnknownTable { id: table_id.get() })?;
        let template = self
            .preview_templates
            .get(&table_id)
            .cloned()
            .unwrap_or_else(|| self.default_preview_template(table));
        Ok(TableSettings {
            table_id,
            preview_settings: PreviewSettings { template },
        })
    }
}

#[cfg(test)]
#[path = "catalog_test.rs"]
mod tests;
