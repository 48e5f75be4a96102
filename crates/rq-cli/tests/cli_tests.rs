//! End-to-end tests for the rq binary

use rq_db::DuckDbBackend;
use std::path::{Path, PathBuf};
use std::process::Command;
use tempfile::TempDir;

fn rq_bin() -> String {
    env!("CARGO_BIN_EXE_rq").to_string()
}

fn fixture_dir() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/shop")
}

/// Copy the shop fixture into a temp dir and load its data
async fn shop_project() -> TempDir {
    let dir = TempDir::new().unwrap();
    for file in ["relquery.yml", "catalog.yml"] {
        std::fs::copy(fixture_dir().join(file), dir.path().join(file)).unwrap();
    }
    let db = DuckDbBackend::from_path(&dir.path().join("shop.duckdb")).unwrap();
    let data = std::fs::read_to_string(fixture_dir().join("shop.sql")).unwrap();
    db.execute_batch(&data).await.unwrap();
    dir
}

fn run(project: &Path, args: &[&str]) -> (bool, String, String) {
    let output = Command::new(rq_bin())
        .arg("-p")
        .arg(project)
        .args(args)
        .output()
        .unwrap();
    (
        output.status.success(),
        String::from_utf8_lossy(&output.stdout).to_string(),
        String::from_utf8_lossy(&output.stderr).to_string(),
    )
}

#[test]
fn test_sql_without_preview() {
    let (ok, stdout, stderr) = run(
        &fixture_dir(),
        &["sql", "--table", "orders", "--columns", "id,total", "--no-preview"],
    );
    assert!(ok, "{stderr}");
    assert_eq!(
        stdout.trim(),
        r#"WITH "orders_query" AS (SELECT "orders"."id" AS "id", "orders"."total" AS "total" FROM "orders") SELECT * FROM "orders_query""#
    );
}

#[test]
fn test_sql_with_nested_preview() {
    let (ok, stdout, stderr) = run(&fixture_dir(), &["sql", "--table", "orders"]);
    assert!(ok, "{stderr}");
    assert!(stdout.contains(r#"AS "2__10___12__20__col__21""#), "{stdout}");
    assert!(stdout.contains(r#"AS "2__10__col__11""#), "{stdout}");
}

#[test]
fn test_unknown_column_fails() {
    let (ok, _, stderr) = run(
        &fixture_dir(),
        &["sql", "--table", "orders", "--columns", "nope"],
    );
    assert!(!ok);
    assert!(stderr.contains("no column 'nope'"), "{stderr}");
}

#[test]
fn test_preview_json() {
    let (ok, stdout, stderr) = run(&fixture_dir(), &["preview", "--table", "orders"]);
    assert!(ok, "{stderr}");
    let output: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(
        output["info"]["2"]["template"],
        "{2__10__col__11} ({2__10___12__20__col__21})"
    );
    assert_eq!(output["columns"].as_array().unwrap().len(), 2);
    assert_eq!(output["tables"]["2"]["template"], "{11} ({12})");
    assert_eq!(output["tables"]["3"]["table"]["name"], "regions");
}

#[test]
fn test_explicit_preview_restricted_to_non_foreign_key() {
    let (ok, stdout, stderr) = run(
        &fixture_dir(),
        &["preview", "--table", "orders", "--mode", "explicit", "--restrict", "3"],
    );
    assert!(ok, "{stderr}");
    let output: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert!(output["info"].as_object().unwrap().is_empty());
}

#[tokio::test]
async fn test_records_and_count() {
    let project = shop_project().await;

    let (ok, stdout, stderr) = run(
        project.path(),
        &[
            "records", "--table", "orders", "--order-by", "id", "--limit", "2",
        ],
    );
    assert!(ok, "{stderr}");
    let records: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    let rows = records["rows"].as_array().unwrap();
    assert_eq!(rows.len(), 2);
    // id, customer_id, total, region name, customer name
    assert_eq!(
        rows[0],
        serde_json::json!([10, 1, 100, "North", "Ada"])
    );

    let (ok, stdout, stderr) = run(project.path(), &["count", "--table", "orders"]);
    assert!(ok, "{stderr}");
    assert_eq!(stdout.trim(), "3");
}
