//! Built relations
//!
//! A relation is a chain of named stages, each a SELECT over the previous
//! stage (the first over the base table and its joins), rendered as a WITH
//! query whose final SELECT reads the last stage:
//!
//! ```sql
//! WITH "orders_query" AS (SELECT ... FROM "orders" INNER JOIN ...),
//!      "limited" AS (SELECT * FROM "orders_query" LIMIT 10)
//! SELECT * FROM "limited"
//! ```

use rq_core::Dialect;
use sqlparser::ast::Statement;
use std::collections::HashSet;

use crate::dialect::dialect_for;
use crate::error::{SqlError, SqlResult};

/// One named stage of a relation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Stage {
    name: String,
    sql: String,
}

impl Stage {
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Stage body, a SELECT statement
    pub fn sql(&self) -> &str {
        &self.sql
    }
}

/// A relation described by one or more CTE stages
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Relation {
    stages: Vec<Stage>,
    columns: Vec<String>,
    dialect: Dialect,
}

impl Relation {
    pub(crate) fn initial(
        name: &str,
        sql: String,
        columns: Vec<String>,
        dialect: Dialect,
    ) -> SqlResult<Self> {
        check_stage_name(name, &HashSet::new())?;
        Ok(Self {
            stages: vec![Stage {
                name: name.to_string(),
                sql,
            }],
            columns,
            dialect,
        })
    }

    /// Name of the stage the relation's rows come from
    pub fn name(&self) -> &str {
        self.stages
            .last()
            .map(Stage::name)
            .unwrap_or_default()
    }

    /// Output column labels in order
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// All stages, initial first
    pub fn stages(&self) -> &[Stage] {
        &self.stages
    }

    /// Dialect the relation is rendered in
    pub fn dialect(&self) -> Dialect {
        self.dialect
    }

    /// Quote an identifier in the relation's dialect
    pub fn quote_ident(&self, ident: &str) -> String {
        dialect_for(self.dialect).quote_ident(ident)
    }

    /// Quoted name of the last stage, for use in a FROM clause
    pub fn source(&self) -> String {
        self.quote_ident(self.name())
    }

    /// Append a stage reading from the current last stage.
    ///
    /// `sql` must select from [`source`](Self::source); `columns` are the
    /// labels the new stage outputs.
    pub fn derive(
        mut self,
        name: &str,
        sql: impl Into<String>,
        columns: Vec<String>,
    ) -> SqlResult<Self> {
        let taken: HashSet<&str> = self.stages.iter().map(Stage::name).collect();
        check_stage_name(name, &taken)?;
        self.stages.push(Stage {
            name: name.to_string(),
            sql: sql.into(),
        });
        self.columns = columns;
        Ok(self)
    }

    /// Render the whole relation as one WITH query
    pub fn to_sql(&self) -> String {
        let ctes = self
            .stages
            .iter()
            .map(|stage| format!("{} AS ({})", self.quote_ident(&stage.name), stage.sql))
            .collect::<Vec<_>>()
            .join(", ");
        format!("WITH {} SELECT * FROM {}", ctes, self.source())
    }

    /// Parse the rendered relation with the relation's dialect
    pub fn to_statement(&self) -> SqlResult<Statement> {
        dialect_for(self.dialect).parse_single(&self.to_sql())
    }
}

impl std::fmt::Display for Relation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.to_sql())
    }
}

fn check_stage_name(name: &str, taken: &HashSet<&str>) -> SqlResult<()> {
    if name.trim().is_empty() {
        return Err(SqlError::InvalidStage {
            name: name.to_string(),
            reason: "stage names must be non-empty".to_string(),
        });
    }
    if taken.contains(name) {
        return Err(SqlError::InvalidStage {
            name: name.to_string(),
            reason: "stage name already used in this relation".to_string(),
        });
    }
    Ok(())
}
