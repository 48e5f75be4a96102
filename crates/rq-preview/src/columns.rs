//! Turning resolved previews into relation inputs

use rq_core::{Column, ColumnId, MetadataRepository, Table, TableId, TableSettings};
use rq_sql::InitialColumn;
use serde::Serialize;
use std::collections::BTreeMap;

use crate::error::PreviewResult;
use crate::resolver::PreviewColumn;
use crate::template::PreviewTemplate;

/// Convert preview columns into initial columns for a relation builder.
///
/// Each hop of a preview path becomes a `constrained = referent` join, so
/// the columns are reachable from the table the previews were resolved on.
pub fn preview_initial_columns(
    repo: &dyn MetadataRepository,
    columns: &[PreviewColumn],
) -> PreviewResult<Vec<InitialColumn>> {
    columns
        .iter()
        .map(|column| {
            let path: Vec<(ColumnId, ColumnId)> = column
                .jp_path
                .iter()
                .map(|hop| (hop.constrained(), hop.referent()))
                .collect();
            Ok(InitialColumn::from_ids(
                repo,
                column.alias.clone(),
                column.id,
                &path,
            )?)
        })
        .collect()
}

/// Preview data of one referent table
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TablePreview {
    pub table: Table,
    /// Template as configured, with column id placeholders
    pub template: String,
    /// Columns the template references, in order of first appearance
    pub preview_columns: Vec<Column>,
}

/// Attach the table and the template's data columns to each table's
/// preview settings
pub fn add_preview_columns(
    repo: &dyn MetadataRepository,
    settings: &[TableSettings],
) -> PreviewResult<BTreeMap<TableId, TablePreview>> {
    let mut previews = BTreeMap::new();
    for setting in settings {
        let template = PreviewTemplate::parse(&setting.preview_settings.template)?;
        let preview_columns = repo.columns(&template.column_ids())?;
        previews.insert(
            setting.table_id,
            TablePreview {
                table: repo.table(setting.table_id)?,
                template: setting.preview_settings.template.clone(),
                preview_columns,
            },
        );
    }
    Ok(previews)
}
