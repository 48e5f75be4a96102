//! Record-access seam
//!
//! Executing a relation belongs to a backend. The builder only forwards the
//! relation and the caller's options.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::SqlError;
use crate::relation::Relation;

/// Sort direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

/// Ordering override applied to a relation's output column
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderBy {
    pub column: String,
    #[serde(default)]
    pub direction: SortDirection,
}

/// Query options forwarded to the record-access backend unchanged
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordOptions {
    #[serde(default)]
    pub limit: Option<usize>,
    #[serde(default)]
    pub offset: Option<usize>,
    #[serde(default)]
    pub order_by: Vec<OrderBy>,
}

/// Materialized rows of a relation
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RecordSet {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<serde_json::Value>>,
}

impl RecordSet {
    /// Cell by row index and column label
    pub fn get(&self, row: usize, column: &str) -> Option<&serde_json::Value> {
        let index = self.columns.iter().position(|c| c == column)?;
        self.rows.get(row)?.get(index)
    }
}

/// Executes relations against a data source
#[async_trait]
pub trait RecordAccess: Send + Sync {
    /// Backend error; building errors convert into it
    type Error: From<SqlError> + Send;

    /// Fetch the rows of a relation
    async fn get_records(
        &self,
        relation: &Relation,
        options: &RecordOptions,
    ) -> Result<RecordSet, Self::Error>;

    /// Count the rows of a relation
    async fn get_count(
        &self,
        relation: &Relation,
        options: &RecordOptions,
    ) -> Result<usize, Self::Error>;
}
