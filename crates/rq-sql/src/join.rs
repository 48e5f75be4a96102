//! Join parameters: one equality condition between two tables

use rq_core::{ColumnId, MetadataRepository};

use crate::column::{ColumnRef, TableRef};
use crate::error::SqlResult;

/// Describes one join: `left_column = right_column`.
///
/// The left column's table is the side already in the relation; the right
/// column's table is the one being joined in.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct JoinParams {
    left_column: ColumnRef,
    right_column: ColumnRef,
}

impl JoinParams {
    /// Create join parameters from two column handles
    pub fn new(left_column: ColumnRef, right_column: ColumnRef) -> Self {
        Self {
            left_column,
            right_column,
        }
    }

    /// Build join parameters from two column ids
    pub fn from_ids(
        repo: &dyn MetadataRepository,
        left_column: ColumnId,
        right_column: ColumnId,
    ) -> SqlResult<Self> {
        Ok(Self::new(
            ColumnRef::resolve(repo, left_column)?,
            ColumnRef::resolve(repo, right_column)?,
        ))
    }

    /// The same join traversed in the opposite direction
    pub fn flip(&self) -> Self {
        Self {
            left_column: self.right_column.clone(),
            right_column: self.left_column.clone(),
        }
    }

    pub fn left_column(&self) -> &ColumnRef {
        &self.left_column
    }

    pub fn right_column(&self) -> &ColumnRef {
        &self.right_column
    }

    pub fn left_table(&self) -> &TableRef {
        self.left_column.table()
    }

    pub fn right_table(&self) -> &TableRef {
        self.right_column.table()
    }
}

impl std::fmt::Display for JoinParams {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} = {}", self.left_column, self.right_column)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rq_core::TableId;

    fn orders_customers() -> JoinParams {
        let orders = TableRef::new(TableId::new(1), "orders", None, &["id", "customer_id"]).unwrap();
        let customers = TableRef::new(TableId::new(2), "customers", None, &["id", "name"]).unwrap();
        JoinParams::new(
            orders.column("customer_id").unwrap(),
            customers.column("id").unwrap(),
        )
    }

    #[test]
    fn test_tables() {
        let jp = orders_customers();
        assert_eq!(jp.left_table().name(), "orders");
        assert_eq!(jp.right_table().name(), "customers");
        assert_eq!(jp.to_string(), "orders.customer_id = customers.id");
    }

    #[test]
    fn test_flip() {
        let jp = orders_customers();
        let flipped = jp.flip();
        assert_eq!(flipped.left_column(), jp.right_column());
        assert_eq!(flipped.right_column(), jp.left_column());
        assert_eq!(flipped.flip(), jp);
    }
}
