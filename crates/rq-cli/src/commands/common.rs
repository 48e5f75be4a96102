//! Shared utilities for CLI commands

use anyhow::{bail, Context, Result};
use rq_core::{ColumnId, MetadataRepository};
use rq_preview::{preview_initial_columns, PreviewResolver};
use rq_sql::{InitialColumn, RelationBuilder, TableRef};

use crate::cli::RelationArgs;
use crate::context::ProjectContext;

/// Build the relation of a table: the requested base columns followed by
/// the preview columns of its foreign keys
pub(crate) fn build_relation(ctx: &ProjectContext, args: &RelationArgs) -> Result<RelationBuilder> {
    let catalog = &ctx.catalog;
    let table = catalog
        .table_by_name(&args.table)
        .with_context(|| format!("Unknown table '{}'", args.table))?;
    let base = TableRef::resolve(catalog, table.id)?;

    let mut columns = Vec::new();
    for column in catalog.table_columns(table.id)? {
        if let Some(wanted) = &args.columns {
            if !split_list(wanted).any(|name| name == column.name.as_str()) {
                continue;
            }
        }
        columns.push(InitialColumn::from_ids(
            catalog,
            column.name.as_str(),
            column.id,
            &[],
        )?);
    }
    if let Some(wanted) = &args.columns {
        for name in split_list(wanted) {
            if !columns.iter().any(|c| c.alias() == name) {
                bail!("Table '{}' has no column '{}'", args.table, name);
            }
        }
    }

    if !args.no_preview {
        let resolution = PreviewResolver::from_config(catalog, &ctx.config.preview).resolve(
            ctx.config.preview.mode,
            table.id,
            None,
            &[],
            &[],
        )?;
        ctx.verbose(&format!(
            "Adding {} preview columns for {} foreign keys",
            resolution.columns.len(),
            resolution.info.len()
        ));
        columns.extend(preview_initial_columns(catalog, &resolution.columns)?);
    }

    log::debug!(
        "Building relation over '{}' with {} initial columns",
        base,
        columns.len()
    );
    Ok(RelationBuilder::new(base, columns)?.with_dialect(ctx.config.dialect))
}

/// Split a comma-separated argument, dropping blanks
pub(crate) fn split_list(value: &str) -> impl Iterator<Item = &str> {
    value.split(',').map(str::trim).filter(|s| !s.is_empty())
}

/// Parse a comma-separated list of column ids
pub(crate) fn parse_column_ids(value: &str) -> Result<Vec<ColumnId>> {
    split_list(value)
        .map(|id| {
            id.parse::<ColumnId>()
                .with_context(|| format!("Invalid column id '{}'", id))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_list() {
        assert_eq!(split_list(" a, ,b ,").collect::<Vec<_>>(), vec!["a", "b"]);
    }

    #[test]
    fn test_parse_column_ids() {
        assert_eq!(
            parse_column_ids("2, 3").unwrap(),
            vec![ColumnId::new(2), ColumnId::new(3)]
        );
        assert!(parse_column_ids("2,x").is_err());
    }
}
