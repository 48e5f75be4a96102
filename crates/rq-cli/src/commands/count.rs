//! Count command implementation

use anyhow::{Context, Result};
use rq_db::DuckDbBackend;
use rq_sql::RecordOptions;

use crate::cli::{CountArgs, GlobalArgs};
use crate::commands::common::build_relation;
use crate::context::ProjectContext;

/// Execute the count command
pub async fn execute(args: &CountArgs, global: &GlobalArgs) -> Result<()> {
    let ctx = ProjectContext::load(global)?;
    let builder = build_relation(&ctx, &args.relation)?;
    let db = DuckDbBackend::new(&ctx.database_path()).context("Failed to connect to database")?;
    let count = builder.get_count(&db, &RecordOptions::default()).await?;
    println!("{}", count);
    Ok(())
}
