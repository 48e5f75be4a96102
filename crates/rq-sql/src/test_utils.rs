//! Shared fixtures for relation tests.
//!
//! The shop catalog has two independent paths to `regions`
//! (orders → customers → regions and orders → shippers → regions) and one
//! self-referencing foreign key (employees.manager_id → employees.id).

use rq_core::{Catalog, MetadataRepository};

use crate::column::{ColumnRef, TableRef};
use crate::join::JoinParams;

pub const SHOP_CATALOG: &str = r#"
tables:
  - id: 1
    name: orders
    columns:
      - { id: 1, name: id }
      - { id: 2, name: customer_id }
      - { id: 3, name: shipper_id }
      - { id: 4, name: total }
    constraints:
      - { id: 1, type: primary_key, columns: [1] }
      - { id: 100, type: foreign_key, columns: [2], referent_columns: [10] }
      - { id: 101, type: foreign_key, columns: [3], referent_columns: [30] }
  - id: 2
    name: customers
    preview_template: "{11}"
    columns:
      - { id: 10, name: id }
      - { id: 11, name: name }
      - { id: 12, name: region_id }
    constraints:
      - { id: 2, type: primary_key, columns: [10] }
      - { id: 102, type: foreign_key, columns: [12], referent_columns: [20] }
  - id: 3
    name: regions
    preview_template: "{21}"
    columns:
      - { id: 20, name: id }
      - { id: 21, name: name }
    constraints:
      - { id: 3, type: primary_key, columns: [20] }
  - id: 4
    name: shippers
    preview_template: "{31}"
    columns:
      - { id: 30, name: id }
      - { id: 31, name: name }
      - { id: 32, name: region_id }
    constraints:
      - { id: 4, type: primary_key, columns: [30] }
      - { id: 103, type: foreign_key, columns: [32], referent_columns: [20] }
  - id: 5
    name: employees
    preview_template: "{41}"
    columns:
      - { id: 40, name: id }
      - { id: 41, name: name }
      - { id: 42, name: manager_id }
    constraints:
      - { id: 5, type: primary_key, columns: [40] }
      - { id: 104, type: foreign_key, columns: [42], referent_columns: [40] }
"#;

/// The shop catalog
pub fn shop_catalog() -> Catalog {
    Catalog::from_yaml(SHOP_CATALOG).expect("shop catalog is valid")
}

/// Table handle by name
pub fn table(catalog: &Catalog, name: &str) -> TableRef {
    let table = catalog.table_by_name(name).expect("known table");
    TableRef::resolve(catalog, table.id).expect("resolvable table")
}

/// Column handle from `"table.column"`
pub fn col(catalog: &Catalog, qualified: &str) -> ColumnRef {
    let (table_name, column) = qualified.split_once('.').expect("table.column");
    table(catalog, table_name)
        .column(column)
        .expect("known column")
}

/// Join parameters from two `"table.column"` strings
pub fn jp(catalog: &Catalog, left: &str, right: &str) -> JoinParams {
    JoinParams::new(col(catalog, left), col(catalog, right))
}
