//! Alias scopes for tables inside one relation
//!
//! Every table that appears in a relation's FROM clause gets a scope: a
//! qualifier unique within the relation and a `column name -> qualified
//! column` map. Column references into a table always go through its scope,
//! so a renamed table can never be referenced by its physical name.

use std::collections::{HashMap, HashSet};

use crate::column::TableRef;
use crate::dialect::SqlDialect;
use crate::error::{SqlError, SqlResult};

/// A column reference qualified by its table's alias
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct QualifiedColumn {
    qualifier: String,
    name: String,
}

impl QualifiedColumn {
    pub fn qualifier(&self) -> &str {
        &self.qualifier
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Render as `"qualifier"."name"`
    pub fn render(&self, dialect: &dyn SqlDialect) -> String {
        format!(
            "{}.{}",
            dialect.quote_ident(&self.qualifier),
            dialect.quote_ident(&self.name)
        )
    }
}

impl std::fmt::Display for QualifiedColumn {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}.{}", self.qualifier, self.name)
    }
}

/// A table together with the alias it is known by in one relation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AliasedTable {
    alias: String,
    table: TableRef,
    columns: HashMap<String, QualifiedColumn>,
}

impl AliasedTable {
    fn new(alias: String, table: TableRef) -> Self {
        let columns = table
            .column_names()
            .iter()
            .map(|name| {
                (
                    name.to_string(),
                    QualifiedColumn {
                        qualifier: alias.clone(),
                        name: name.to_string(),
                    },
                )
            })
            .collect();
        Self {
            alias,
            table,
            columns,
        }
    }

    pub fn alias(&self) -> &str {
        &self.alias
    }

    pub fn table(&self) -> &TableRef {
        &self.table
    }

    /// Reference to one of the table's columns through this alias
    pub fn column(&self, name: &str) -> SqlResult<QualifiedColumn> {
        self.columns
            .get(name)
            .cloned()
            .ok_or_else(|| SqlError::UnknownColumn {
                table: format!("{} (as {})", self.table, self.alias),
                column: name.to_string(),
            })
    }

    /// Render as a FROM item: `"schema"."table" AS "alias"`
    pub fn render(&self, dialect: &dyn SqlDialect) -> String {
        let name = match self.table.schema() {
            Some(schema) => format!(
                "{}.{}",
                dialect.quote_ident(schema),
                dialect.quote_ident(self.table.name())
            ),
            None => dialect.quote_ident(self.table.name()),
        };
        if self.table.schema().is_none() && self.alias == self.table.name() {
            name
        } else {
            format!("{} AS {}", name, dialect.quote_ident(&self.alias))
        }
    }
}

/// Hands out aliases unique within one relation.
///
/// The base table keeps its own name; every other table is renamed to
/// `<table>_<n>` with the smallest `n` not yet taken.
#[derive(Debug, Clone, Default)]
pub(crate) struct AliasGenerator {
    used: HashSet<String>,
}

impl AliasGenerator {
    /// Scope for the base table, aliased by its own name
    pub(crate) fn base(&mut self, table: &TableRef) -> AliasedTable {
        self.used.insert(table.name().to_string());
        AliasedTable::new(table.name().to_string(), table.clone())
    }

    /// Scope for a freshly renamed copy of `table`
    pub(crate) fn fresh(&mut self, table: &TableRef) -> AliasedTable {
        let alias = (1..)
            .map(|n| format!("{}_{}", table.name(), n))
            .find(|candidate| !self.used.contains(candidate))
            .unwrap_or_else(|| table.name().to_string());
        self.used.insert(alias.clone());
        AliasedTable::new(alias, table.clone())
    }
}
