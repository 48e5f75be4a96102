//! Join tree accumulation
//!
//! The FROM clause of an initial relation is built by folding the initial
//! columns, in order, into a `JoinTree`. Each step consumes the tree and
//! returns the extended tree plus the aliased column to select.
//!
//! Aliasing rules:
//! - the base table keeps its own name;
//! - the last hop of every path joins a freshly aliased copy of its table,
//!   one per initial column, and the column is selected through that alias;
//! - the earlier hops of a path are shared: two columns whose paths begin
//!   with the same hops reuse the same aliased join for that prefix.
//!
//! Every joined table is an inner join `left = right`, the left side being
//! either the base table or the alias of the previous hop of the same path.

use std::collections::HashMap;

use crate::alias::{AliasGenerator, AliasedTable, QualifiedColumn};
use crate::column::TableRef;
use crate::dialect::SqlDialect;
use crate::error::{SqlError, SqlResult};
use crate::initial_column::InitialColumn;
use crate::join::JoinParams;

/// One table joined into the tree
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JoinNode {
    table: AliasedTable,
    left: QualifiedColumn,
    right: QualifiedColumn,
}

impl JoinNode {
    /// The joined table and its alias
    pub fn table(&self) -> &AliasedTable {
        &self.table
    }

    /// Join condition as `(left, right)` for `left = right`
    pub fn condition(&self) -> (&QualifiedColumn, &QualifiedColumn) {
        (&self.left, &self.right)
    }
}

/// The accumulated FROM clause of an initial relation
#[derive(Debug, Clone)]
pub struct JoinTree {
    base: AliasedTable,
    joins: Vec<JoinNode>,
    shared: HashMap<Vec<JoinParams>, usize>,
    aliases: AliasGenerator,
}

impl JoinTree {
    /// A tree containing only the base table
    pub(crate) fn new(base: &TableRef) -> Self {
        let mut aliases = AliasGenerator::default();
        let base = aliases.base(base);
        Self {
            base,
            joins: Vec::new(),
            shared: HashMap::new(),
            aliases,
        }
    }

    /// Scope of the base table
    pub fn base(&self) -> &AliasedTable {
        &self.base
    }

    /// Joined tables in join order
    pub fn joins(&self) -> &[JoinNode] {
        &self.joins
    }

    /// Fold one initial column into the tree
    pub(crate) fn accumulate(
        mut self,
        column: &InitialColumn,
    ) -> SqlResult<(Self, QualifiedColumn)> {
        let Some(path) = column.jp_path() else {
            let selected = self.base.column(column.column().name())?;
            return Ok((self, selected));
        };
        let Some((last, earlier)) = path.split_last() else {
            return Err(SqlError::MalformedJoinPath {
                alias: column.alias().to_string(),
                reason: "join path is empty".to_string(),
            });
        };

        let mut left = self.base.clone();
        for depth in 0..earlier.len() {
            let prefix = &path[..=depth];
            left = match self.shared.get(prefix) {
                Some(&index) => self.joins[index].table.clone(),
                None => {
                    let node = self.join(&left, &path[depth])?;
                    let scope = node.table.clone();
                    self.shared.insert(prefix.to_vec(), self.joins.len());
                    self.joins.push(node);
                    scope
                }
            };
        }

        let node = self.join(&left, last)?;
        let selected = node.table.column(column.column().name())?;
        self.joins.push(node);
        Ok((self, selected))
    }

    fn join(&mut self, left: &AliasedTable, hop: &JoinParams) -> SqlResult<JoinNode> {
        let right = self.aliases.fresh(hop.right_table());
        Ok(JoinNode {
            left: left.column(hop.left_column().name())?,
            right: right.column(hop.right_column().name())?,
            table: right,
        })
    }

    /// Render as the body of a FROM clause
    pub fn render(&self, dialect: &dyn SqlDialect) -> String {
        let mut sql = self.base.render(dialect);
        for node in &self.joins {
            sql.push_str(" INNER JOIN ");
            sql.push_str(&node.table.render(dialect));
            sql.push_str(" ON ");
            sql.push_str(&node.left.render(dialect));
            sql.push_str(" = ");
            sql.push_str(&node.right.render(dialect));
        }
        sql
    }
}

/// One labeled output column of an initial relation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectItem {
    expr: QualifiedColumn,
    alias: String,
}

impl SelectItem {
    pub(crate) fn new(expr: QualifiedColumn, alias: impl Into<String>) -> Self {
        Self {
            expr,
            alias: alias.into(),
        }
    }

    /// The aliased source column
    pub fn expr(&self) -> &QualifiedColumn {
        &self.expr
    }

    /// Output label
    pub fn alias(&self) -> &str {
        &self.alias
    }
}

/// The SELECT an initial relation wraps
#[derive(Debug, Clone)]
pub struct InitialSelect {
    from: JoinTree,
    projection: Vec<SelectItem>,
}

impl InitialSelect {
    /// Fold `columns` into a join tree over `base`
    pub(crate) fn build(base: &TableRef, columns: &[InitialColumn]) -> SqlResult<Self> {
        let (from, projection) = columns.iter().try_fold(
            (JoinTree::new(base), Vec::with_capacity(columns.len())),
            |(tree, mut projection), column| {
                let (tree, selected) = tree.accumulate(column)?;
                projection.push(SelectItem::new(selected, column.alias()));
                Ok::<_, SqlError>((tree, projection))
            },
        )?;
        Ok(Self { from, projection })
    }

    pub fn from(&self) -> &JoinTree {
        &self.from
    }

    pub fn projection(&self) -> &[SelectItem] {
        &self.projection
    }

    /// Render as a SELECT statement
    pub fn render(&self, dialect: &dyn SqlDialect) -> String {
        let items = self
            .projection
            .iter()
            .map(|item| {
                format!(
                    "{} AS {}",
                    item.expr.render(dialect),
                    dialect.quote_ident(&item.alias)
                )
            })
            .collect::<Vec<_>>()
            .join(", ");
        if items.is_empty() {
            format!("SELECT FROM {}", self.from.render(dialect))
        } else {
            format!("SELECT {} FROM {}", items, self.from.render(dialect))
        }
    }
}

#[cfg(test)]
#[path = "join_tree_test.rs"]
mod tests;
