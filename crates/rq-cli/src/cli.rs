//! CLI argument definitions using clap derive API

use clap::{Args, Parser, Subcommand, ValueEnum};

/// Relquery - build SQL relations from a table catalog
#[derive(Parser, Debug)]
#[command(name = "rq")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Global options
    #[command(flatten)]
    pub global: GlobalArgs,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Global arguments available to all commands
#[derive(Args, Debug, Clone)]
pub struct GlobalArgs {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Path to project directory
    #[arg(short = 'p', long, global = true, default_value = ".")]
    pub project_dir: String,

    /// Override config file path
    #[arg(short, long, global = true)]
    pub config: Option<String>,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print the SQL of a table's relation
    Sql(SqlArgs),

    /// Resolve foreign-key previews of a table
    Preview(PreviewArgs),

    /// Fetch rows of a table's relation from the database
    Records(RecordsArgs),

    /// Count rows of a table's relation
    Count(CountArgs),
}

/// Which table and columns a relation is built from
#[derive(Args, Debug, Clone)]
pub struct RelationArgs {
    /// Base table name
    #[arg(short, long)]
    pub table: String,

    /// Columns of the base table to select (comma-separated, default: all)
    #[arg(long)]
    pub columns: Option<String>,

    /// Do not add preview columns for foreign keys
    #[arg(long)]
    pub no_preview: bool,
}

/// Arguments for the sql command
#[derive(Args, Debug)]
pub struct SqlArgs {
    #[command(flatten)]
    pub relation: RelationArgs,
}

/// Preview modes accepted on the command line
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum PreviewModeArg {
    /// Foreign keys whose column has show_fk_preview set
    Auto,
    /// Foreign keys listed with --restrict
    Explicit,
}

impl From<PreviewModeArg> for rq_core::PreviewMode {
    fn from(mode: PreviewModeArg) -> Self {
        match mode {
            PreviewModeArg::Auto => rq_core::PreviewMode::Auto,
            PreviewModeArg::Explicit => rq_core::PreviewMode::Explicit,
        }
    }
}

/// Arguments for the preview command
#[derive(Args, Debug)]
pub struct PreviewArgs {
    /// Table name
    #[arg(short, long)]
    pub table: String,

    /// Override the configured preview mode
    #[arg(short, long, value_enum)]
    pub mode: Option<PreviewModeArg>,

    /// Only preview these foreign key column ids (comma-separated)
    #[arg(short, long)]
    pub restrict: Option<String>,
}

/// Arguments for the records command
#[derive(Args, Debug)]
pub struct RecordsArgs {
    #[command(flatten)]
    pub relation: RelationArgs,

    /// Maximum number of rows
    #[arg(short, long)]
    pub limit: Option<usize>,

    /// Rows to skip
    #[arg(short, long)]
    pub offset: Option<usize>,

    /// Output column to order by
    #[arg(long)]
    pub order_by: Option<String>,

    /// Order descending
    #[arg(long, requires = "order_by")]
    pub desc: bool,
}

/// Arguments for the count command
#[derive(Args, Debug)]
pub struct CountArgs {
    #[command(flatten)]
    pub relation: RelationArgs,
}

#[cfg(test)]
#[path = "cli_test.rs"]
mod tests;
