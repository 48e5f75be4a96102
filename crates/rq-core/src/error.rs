//! Error types for rq-core

use thiserror::Error;

/// Core error type for Relquery
#[derive(Error, Debug)]
pub enum CoreError {
    /// E001: Configuration file not found
    #[error("[E001] Config file not found: {path}")]
    ConfigNotFound { path: String },

    /// E002: Invalid configuration value
    #[error("[E002] Invalid config: {message}")]
    ConfigInvalid { message: String },

    /// E003: Catalog file not found
    #[error("[E003] Catalog file not found: {path}")]
    CatalogNotFound { path: String },

    /// E004: Catalog content violates the metadata model
    #[error("[E004] Invalid catalog: {message}")]
    CatalogInvalid { message: String },

    /// E005: Table id not present in the metadata store
    #[error("[E005] Unknown table id: {id}")]
    UnknownTable { id: u64 },

    /// E006: Table name not present in the metadata store
    #[error("[E006] Unknown table: {name}")]
    UnknownTableName { name: String },

    /// E007: Column id not present in the metadata store
    #[error("[E007] Unknown column id: {id}")]
    UnknownColumn { id: u64 },

    /// E008: IO error with file path context
    #[error("[E008] Failed to read '{path}': {source}")]
    IoWithPath {
        path: String,
        source: std::io::Error,
    },

    /// E009: YAML parse error
    #[error("[E009] YAML parse error: {0}")]
    YamlParse(#[from] serde_yaml::Error),
}

/// Result type alias for CoreError
pub type CoreResult<T> = Result<T, CoreError>;
