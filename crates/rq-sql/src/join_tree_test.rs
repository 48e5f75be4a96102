use super::*;
use crate::dialect::DuckDbDialect;
use crate::test_utils::{col, jp, shop_catalog, table};
use rq_core::Catalog;

fn customer_region(catalog: &Catalog, alias: &str, column: &str) -> InitialColumn {
    InitialColumn::joined(
        alias,
        col(catalog, column),
        vec![
            jp(catalog, "orders.customer_id", "customers.id"),
            jp(catalog, "customers.region_id", "regions.id"),
        ],
    )
    .unwrap()
}

fn render(select: &InitialSelect) -> String {
    select.render(&DuckDbDialect::default())
}

#[test]
fn test_base_columns_only() {
    let catalog = shop_catalog();
    let columns = vec![
        InitialColumn::base("id", col(&catalog, "orders.id")).unwrap(),
        InitialColumn::base("amount", col(&catalog, "orders.total")).unwrap(),
    ];
    let select = InitialSelect::build(&table(&catalog, "orders"), &columns).unwrap();
    assert!(select.from().joins().is_empty());
    assert_eq!(
        render(&select),
        r#"SELECT "orders"."id" AS "id", "orders"."total" AS "amount" FROM "orders""#
    );
}

#[test]
fn test_single_hop_join() {
    let catalog = shop_catalog();
    let columns = vec![InitialColumn::joined(
        "cust_name",
        col(&catalog, "customers.name"),
        vec![jp(&catalog, "orders.customer_id", "customers.id")],
    )
    .unwrap()];
    let select = InitialSelect::build(&table(&catalog, "orders"), &columns).unwrap();
    assert_eq!(
        render(&select),
        concat!(
            r#"SELECT "customers_1"."name" AS "cust_name" FROM "orders" "#,
            r#"INNER JOIN "customers" AS "customers_1" ON "orders"."customer_id" = "customers_1"."id""#
        )
    );
}

#[test]
fn test_two_hop_join_orders_base_first() {
    let catalog = shop_catalog();
    let columns = vec![customer_region(&catalog, "region", "regions.name")];
    let select = InitialSelect::build(&table(&catalog, "orders"), &columns).unwrap();

    let joins = select.from().joins();
    assert_eq!(joins.len(), 2);
    assert_eq!(joins[0].table().alias(), "customers_1");
    let (left, right) = joins[0].condition();
    assert_eq!(left.to_string(), "orders.customer_id");
    assert_eq!(right.to_string(), "customers_1.id");

    assert_eq!(joins[1].table().alias(), "regions_1");
    let (left, right) = joins[1].condition();
    assert_eq!(left.to_string(), "customers_1.region_id");
    assert_eq!(right.to_string(), "regions_1.id");

    assert_eq!(select.projection()[0].expr().to_string(), "regions_1.name");
}

#[test]
fn test_same_table_via_different_paths_gets_distinct_aliases() {
    let catalog = shop_catalog();
    let columns = vec![
        customer_region(&catalog, "customer_region", "regions.name"),
        InitialColumn::joined(
            "shipper_region",
            col(&catalog, "regions.name"),
            vec![
                jp(&catalog, "orders.shipper_id", "shippers.id"),
                jp(&catalog, "shippers.region_id", "regions.id"),
            ],
        )
        .unwrap(),
    ];
    let select = InitialSelect::build(&table(&catalog, "orders"), &columns).unwrap();

    let aliases: Vec<&str> = select
        .from()
        .joins()
        .iter()
        .map(|j| j.table().alias())
        .collect();
    assert_eq!(
        aliases,
        vec!["customers_1", "regions_1", "shippers_1", "regions_2"]
    );
    let selected: Vec<String> = select
        .projection()
        .iter()
        .map(|item| item.expr().to_string())
        .collect();
    assert_eq!(selected, vec!["regions_1.name", "regions_2.name"]);
}

#[test]
fn test_shared_prefix_reuses_intermediate_join() {
    let catalog = shop_catalog();
    let columns = vec![
        customer_region(&catalog, "region_name", "regions.name"),
        customer_region(&catalog, "region_id", "regions.id"),
    ];
    let select = InitialSelect::build(&table(&catalog, "orders"), &columns).unwrap();

    let joins = select.from().joins();
    let aliases: Vec<&str> = joins.iter().map(|j| j.table().alias()).collect();
    assert_eq!(aliases, vec!["customers_1", "regions_1", "regions_2"]);
    // The second region join hangs off the shared customers join
    assert_eq!(joins[2].condition().0.to_string(), "customers_1.region_id");
}

#[test]
fn test_last_hop_is_fresh_per_column() {
    let catalog = shop_catalog();
    let path = || vec![jp(&catalog, "orders.customer_id", "customers.id")];
    let columns = vec![
        InitialColumn::joined("a", col(&catalog, "customers.name"), path()).unwrap(),
        InitialColumn::joined("b", col(&catalog, "customers.name"), path()).unwrap(),
    ];
    let select = InitialSelect::build(&table(&catalog, "orders"), &columns).unwrap();
    let selected: Vec<String> = select
        .projection()
        .iter()
        .map(|item| item.expr().to_string())
        .collect();
    assert_eq!(selected, vec!["customers_1.name", "customers_2.name"]);
}

#[test]
fn test_self_reference_is_aliased() {
    let catalog = shop_catalog();
    let columns = vec![
        InitialColumn::base("name", col(&catalog, "employees.name")).unwrap(),
        InitialColumn::joined(
            "manager",
            col(&catalog, "employees.name"),
            vec![jp(&catalog, "employees.manager_id", "employees.id")],
        )
        .unwrap(),
    ];
    let select = InitialSelect::build(&table(&catalog, "employees"), &columns).unwrap();
    assert_eq!(
        render(&select),
        concat!(
            r#"SELECT "employees"."name" AS "name", "employees_1"."name" AS "manager" "#,
            r#"FROM "employees" INNER JOIN "employees" AS "employees_1" "#,
            r#"ON "employees"."manager_id" = "employees_1"."id""#
        )
    );
}

#[test]
fn test_mixed_order_preserved() {
    let catalog = shop_catalog();
    let columns = vec![
        InitialColumn::base("total", col(&catalog, "orders.total")).unwrap(),
        customer_region(&catalog, "region", "regions.name"),
        InitialColumn::base("id", col(&catalog, "orders.id")).unwrap(),
    ];
    let select = InitialSelect::build(&table(&catalog, "orders"), &columns).unwrap();
    let labels: Vec<&str> = select.projection().iter().map(SelectItem::alias).collect();
    assert_eq!(labels, vec!["total", "region", "id"]);
}

#[test]
fn test_no_columns() {
    let catalog = shop_catalog();
    let select = InitialSelect::build(&table(&catalog, "orders"), &[]).unwrap();
    assert!(select.projection().is_empty());
    assert_eq!(render(&select), r#"SELECT FROM "orders""#);
}

/// The physical column an output alias selects, with the chain of physical
/// join conditions leading to it from the base table
fn lineage(select: &InitialSelect, alias: &str) -> Vec<String> {
    let physical = |qualified: &QualifiedColumn| -> String {
        let from = select.from();
        let table = if qualified.qualifier() == from.base().alias() {
            from.base().table()
        } else {
            from.joins()
                .iter()
                .find(|node| node.table().alias() == qualified.qualifier())
                .map(|node| node.table().table())
                .expect("qualifier is a joined alias")
        };
        format!("{}.{}", table.name(), qualified.name())
    };

    let item = select
        .projection()
        .iter()
        .find(|item| item.alias() == alias)
        .expect("alias is selected");
    let mut chain = vec![physical(item.expr())];
    let mut qualifier = item.expr().qualifier().to_string();
    while let Some(node) = select
        .from()
        .joins()
        .iter()
        .find(|node| node.table().alias() == qualifier)
    {
        let (left, right) = node.condition();
        chain.push(format!("{} = {}", physical(left), physical(right)));
        qualifier = left.qualifier().to_string();
    }
    chain
}

#[test]
fn test_build_order_does_not_change_column_identity() {
    let catalog = shop_catalog();
    let shipper_region = || {
        InitialColumn::joined(
            "shipper_region",
            col(&catalog, "regions.name"),
            vec![
                jp(&catalog, "orders.shipper_id", "shippers.id"),
                jp(&catalog, "shippers.region_id", "regions.id"),
            ],
        )
        .unwrap()
    };
    let forward = vec![
        customer_region(&catalog, "customer_region", "regions.name"),
        shipper_region(),
    ];
    let reversed = vec![
        shipper_region(),
        customer_region(&catalog, "customer_region", "regions.name"),
    ];
    let orders = table(&catalog, "orders");
    let forward = InitialSelect::build(&orders, &forward).unwrap();
    let reversed = InitialSelect::build(&orders, &reversed).unwrap();

    // Aliases differ between the two builds, the columns they denote do not
    assert_eq!(
        forward.projection()[0].expr().qualifier(),
        "regions_1"
    );
    assert_eq!(
        reversed.projection()[1].expr().qualifier(),
        "regions_2"
    );
    for alias in ["customer_region", "shipper_region"] {
        assert_eq!(lineage(&forward, alias), lineage(&reversed, alias), "{alias}");
    }
    assert_eq!(
        lineage(&forward, "customer_region"),
        vec![
            "regions.name".to_string(),
            "customers.region_id = regions.id".to_string(),
            "orders.customer_id = customers.id".to_string(),
        ]
    );
    assert_eq!(
        lineage(&reversed, "shipper_region"),
        vec![
            "regions.name".to_string(),
            "shippers.region_id = regions.id".to_string(),
            "orders.shipper_id = shippers.id".to_string(),
        ]
    );
}
