//! Configuration types and parsing for relquery.yml

use crate::error::{CoreError, CoreResult};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Project configuration from relquery.yml
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Project name
    pub name: String,

    /// SQL dialect used to quote identifiers and validate built relations
    #[serde(default)]
    pub dialect: Dialect,

    /// Path of the metadata catalog, relative to the project directory
    #[serde(default = "default_catalog")]
    pub catalog: String,

    /// DuckDB database path used for record access (`:memory:` allowed)
    #[serde(default = "default_database")]
    pub database: String,

    /// Foreign-key preview settings
    #[serde(default)]
    pub preview: PreviewConfig,
}

/// SQL dialect
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Dialect {
    /// DuckDB SQL dialect
    #[default]
    DuckDb,
    /// Snowflake SQL dialect
    Snowflake,
}

impl std::fmt::Display for Dialect {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Dialect::DuckDb => write!(f, "duckdb"),
            Dialect::Snowflake => write!(f, "snowflake"),
        }
    }
}

/// Which foreign keys get a preview
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum PreviewMode {
    /// Only foreign keys whose column has `show_fk_preview` set
    #[default]
    Auto,
    /// Only foreign keys named by the caller
    Explicit,
}

impl std::fmt::Display for PreviewMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PreviewMode::Auto => write!(f, "auto"),
            PreviewMode::Explicit => write!(f, "explicit"),
        }
    }
}

/// Preview resolution settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PreviewConfig {
    /// Default preview mode
    #[serde(default)]
    pub mode: PreviewMode,

    /// Maximum number of foreign-key hops followed by one preview chain
    #[serde(default = "default_max_depth")]
    pub max_depth: usize,
}

impl Default for PreviewConfig {
    fn default() -> Self {
        Self {
            mode: PreviewMode::default(),
            max_depth: default_max_depth(),
        }
    }
}

fn default_catalog() -> String {
    "catalog.yml".to_string()
}

fn default_database() -> String {
    ":memory:".to_string()
}

fn default_max_depth() -> usize {
    8
}

impl Config {
    /// Load configuration from a file path
    pub fn load(path: &Path) -> CoreResult<Self> {
        if !path.exists() {
            return Err(CoreError::ConfigNotFound {
                path: path.display().to_string(),
            });
        }

        let content = std::fs::read_to_string(path).map_err(|e| CoreError::IoWithPath {
            path: path.display().to_string(),
            source: e,
        })?;
        let config: Config = serde_yaml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a project directory
    /// Looks for relquery.yml or relquery.yaml
    pub fn load_from_dir(dir: &Path) -> CoreResult<Self> {
        let yml_path = dir.join("relquery.yml");
        let yaml_path = dir.join("relquery.yaml");

        if yml_path.exists() {
            Self::load(&yml_path)
        } else if yaml_path.exists() {
            Self::load(&yaml_path)
        } else {
            Err(CoreError::ConfigNotFound {
                path: yml_path.display().to_string(),
            })
        }
    }

    /// Catalog path resolved against the project root
    pub fn catalog_path_absolute(&self, root: &Path) -> PathBuf {
        root.join(&self.catalog)
    }

    /// Database path resolved against the project root
    ///
    /// `:memory:` is passed through untouched.
    pub fn database_path_absolute(&self, root: &Path) -> String {
        if self.database == ":memory:" {
            self.database.clone()
        } else {
            root.join(&self.database).display().to_string()
        }
    }

    fn validate(&self) -> CoreResult<()> {
        if self.name.trim().is_empty() {
            return Err(CoreError::ConfigInvalid {
                message: "Project name cannot be empty".to_string(),
            });
        }
        if self.catalog.trim().is_empty() {
            return Err(CoreError::ConfigInvalid {
                message: "Catalog path cannot be empty".to_string(),
            });
        }
        if self.preview.max_depth == 0 {
            return Err(CoreError::ConfigInvalid {
                message: "preview.max_depth must be at least 1".to_string(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
