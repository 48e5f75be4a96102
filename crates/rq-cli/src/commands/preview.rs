//! Preview command implementation

use anyhow::{Context, Result};
use rq_core::{MetadataRepository, PreviewMode};
use rq_preview::{add_preview_columns, PreviewResolver};
use serde_json::json;

use crate::cli::{GlobalArgs, PreviewArgs};
use crate::commands::common::parse_column_ids;
use crate::context::ProjectContext;

/// Execute the preview command
pub async fn execute(args: &PreviewArgs, global: &GlobalArgs) -> Result<()> {
    let ctx = ProjectContext::load(global)?;
    let catalog = &ctx.catalog;
    let table = catalog
        .table_by_name(&args.table)
        .with_context(|| format!("Unknown table '{}'", args.table))?;

    let mode: PreviewMode = args.mode.map_or(ctx.config.preview.mode, Into::into);
    let restrict = args.restrict.as_deref().map(parse_column_ids).transpose()?;

    let resolution = PreviewResolver::from_config(catalog, &ctx.config.preview).resolve(
        mode,
        table.id,
        restrict.as_deref(),
        &[],
        &[],
    )?;

    let settings = resolution
        .referent_tables
        .iter()
        .map(|id| catalog.table_settings(*id))
        .collect::<Result<Vec<_>, _>>()?;
    let tables = add_preview_columns(catalog, &settings)?;

    let output = json!({
        "table": table.name,
        "mode": mode,
        "info": resolution.info,
        "columns": resolution.columns,
        "tables": tables,
    });
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}
