//! Project context shared by CLI commands

use anyhow::{Context, Result};
use rq_core::{Catalog, Config};
use std::path::{Path, PathBuf};

use crate::cli::GlobalArgs;

/// Loaded configuration and catalog of a project
pub struct ProjectContext {
    /// Project root directory
    pub root: PathBuf,

    /// Project configuration
    pub config: Config,

    /// Table metadata
    pub catalog: Catalog,

    /// Verbose output enabled
    pub verbose: bool,
}

impl ProjectContext {
    /// Load config and catalog from global arguments
    pub fn load(args: &GlobalArgs) -> Result<Self> {
        let root = PathBuf::from(&args.project_dir);

        // Load config from custom path or project directory
        let config = if let Some(config_path) = &args.config {
            Config::load(Path::new(config_path)).context("Failed to load configuration file")?
        } else {
            Config::load_from_dir(&root).context("Failed to load project configuration")?
        };

        let catalog_path = config.catalog_path_absolute(&root);
        let catalog = Catalog::load(&catalog_path)
            .with_context(|| format!("Failed to load catalog {}", catalog_path.display()))?;

        let ctx = Self {
            root,
            config,
            catalog,
            verbose: args.verbose,
        };
        ctx.verbose(&format!(
            "Loaded project '{}' ({} tables)",
            ctx.config.name,
            ctx.catalog.tables().count()
        ));
        Ok(ctx)
    }

    /// Database path resolved against the project root
    pub fn database_path(&self) -> String {
        self.config.database_path_absolute(&self.root)
    }

    /// Print verbose output if enabled
    pub fn verbose(&self, msg: &str) {
        if self.verbose {
            eprintln!("[verbose] {}", msg);
        }
    }
}
