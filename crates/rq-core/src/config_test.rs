use super::*;
use tempfile::TempDir;

#[test]
fn test_parse_minimal_config() {
    let yaml = r#"
name: shop
"#;
    let config: Config = serde_yaml::from_str(yaml).unwrap();
    assert_eq!(config.name, "shop");
    assert_eq!(config.dialect, Dialect::DuckDb);
    assert_eq!(config.catalog, "catalog.yml");
    assert_eq!(config.database, ":memory:");
    assert_eq!(config.preview.mode, PreviewMode::Auto);
    assert_eq!(config.preview.max_depth, 8);
}

#[test]
fn test_parse_full_config() {
    let yaml = r#"
name: shop
dialect: snowflake
catalog: meta/catalog.yml
database: warehouse.duckdb
preview:
  mode: explicit
  max_depth: 3
"#;
    let config: Config = serde_yaml::from_str(yaml).unwrap();
    assert_eq!(config.dialect, Dialect::Snowflake);
    assert_eq!(config.preview.mode, PreviewMode::Explicit);
    assert_eq!(config.preview.max_depth, 3);

    let root = Path::new("/tmp/shop");
    assert_eq!(
        config.catalog_path_absolute(root),
        root.join("meta/catalog.yml")
    );
    assert_eq!(
        config.database_path_absolute(root),
        root.join("warehouse.duckdb").display().to_string()
    );
}

#[test]
fn test_memory_database_not_resolved() {
    let config: Config = serde_yaml::from_str("name: shop").unwrap();
    assert_eq!(config.database_path_absolute(Path::new("/tmp")), ":memory:");
}

#[test]
fn test_unknown_field_rejected() {
    let yaml = r#"
name: shop
materialization: view
"#;
    assert!(serde_yaml::from_str::<Config>(yaml).is_err());
}

#[test]
fn test_load_from_dir() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("relquery.yml"), "name: shop\n").unwrap();
    let config = Config::load_from_dir(dir.path()).unwrap();
    assert_eq!(config.name, "shop");
}

#[test]
fn test_load_from_dir_yaml_extension() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("relquery.yaml"), "name: shop\n").unwrap();
    assert!(Config::load_from_dir(dir.path()).is_ok());
}

#[test]
fn test_load_from_dir_missing() {
    let dir = TempDir::new().unwrap();
    let err = Config::load_from_dir(dir.path()).unwrap_err();
    assert!(matches!(err, CoreError::ConfigNotFound { .. }));
}

#[test]
fn test_validate_empty_name() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("relquery.yml");
    std::fs::write(&path, "name: \"\"\n").unwrap();
    let err = Config::load(&path).unwrap_err();
    assert!(matches!(err, CoreError::ConfigInvalid { .. }));
}

#[test]
fn test_validate_zero_depth() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("relquery.yml");
    std::fs::write(&path, "name: shop\npreview:\n  max_depth: 0\n").unwrap();
    let err = Config::load(&path).unwrap_err();
    assert!(err.to_string().contains("max_depth"));
}

#[test]
fn test_unreadable_config_reports_path() {
    // A directory exists but cannot be read as a file
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("relquery.yml");
    std::fs::create_dir(&path).unwrap();
    let err = Config::load(&path).unwrap_err();
    assert!(matches!(err, CoreError::IoWithPath { .. }));
    assert!(err.to_string().starts_with("[E008] Failed to read"), "{err}");
}

#[test]
fn test_malformed_yaml_error_code() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("relquery.yml");
    std::fs::write(&path, "name: [unclosed\n").unwrap();
    let err = Config::load(&path).unwrap_err();
    assert!(matches!(err, CoreError::YamlParse(_)));
    assert!(err.to_string().starts_with("[E009]"), "{err}");
}
