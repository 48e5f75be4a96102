//! Sql command implementation

use anyhow::Result;

use crate::cli::{GlobalArgs, SqlArgs};
use crate::commands::common::build_relation;
use crate::context::ProjectContext;

/// Execute the sql command
pub async fn execute(args: &SqlArgs, global: &GlobalArgs) -> Result<()> {
    let ctx = ProjectContext::load(global)?;
    let builder = build_relation(&ctx, &args.relation)?;
    ctx.verbose(&format!(
        "Output columns: {}",
        builder.output_columns()?.join(", ")
    ));
    println!("{}", builder.sql()?);
    Ok(())
}
