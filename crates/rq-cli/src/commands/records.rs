//! Records command implementation

use anyhow::{Context, Result};
use rq_db::DuckDbBackend;
use rq_sql::{OrderBy, RecordOptions, SortDirection};

use crate::cli::{GlobalArgs, RecordsArgs};
use crate::commands::common::build_relation;
use crate::context::ProjectContext;

/// Execute the records command
pub async fn execute(args: &RecordsArgs, global: &GlobalArgs) -> Result<()> {
    let ctx = ProjectContext::load(global)?;
    let builder = build_relation(&ctx, &args.relation)?;
    let db = DuckDbBackend::new(&ctx.database_path()).context("Failed to connect to database")?;

    let options = RecordOptions {
        limit: args.limit,
        offset: args.offset,
        order_by: args
            .order_by
            .iter()
            .map(|column| OrderBy {
                column: column.clone(),
                direction: if args.desc {
                    SortDirection::Desc
                } else {
                    SortDirection::Asc
                },
            })
            .collect(),
    };

    let records = builder.get_records(&db, &options).await?;
    ctx.verbose(&format!("Fetched {} rows", records.rows.len()));
    println!("{}", serde_json::to_string_pretty(&records)?);
    Ok(())
}
