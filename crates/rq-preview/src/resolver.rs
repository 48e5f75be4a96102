//! Foreign-key preview resolution
//!
//! For a table, every foreign key that gets a preview is followed to its
//! referent table. The referent's preview template is resolved recursively
//! (a template column may itself be a foreign key with its own preview),
//! nested templates are flattened into one string, and every leaf data
//! column is emitted once as a [`PreviewColumn`] whose alias encodes the
//! path it was reached by:
//!
//! ```text
//! 2__10___12__20__col__21
//! ^^^^^ ^^^^^^^      ^^ column id
//! hop 1  hop 2
//! ```

use rq_core::{ColumnId, Constraint, MetadataRepository, PreviewConfig, PreviewMode, TableId};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};

use crate::error::{PreviewError, PreviewResult};
use crate::template::PreviewTemplate;

/// One followed foreign key: `(constrained column, referent column)`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PreviewHop(pub ColumnId, pub ColumnId);

impl PreviewHop {
    pub fn constrained(&self) -> ColumnId {
        self.0
    }

    pub fn referent(&self) -> ColumnId {
        self.1
    }
}

impl std::fmt::Display for PreviewHop {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}->{}", self.0, self.1)
    }
}

/// Alias prefix for a path: hops as `c__r`, joined with `___`
pub fn path_prefix(path: &[PreviewHop]) -> String {
    path.iter()
        .map(|hop| format!("{}__{}", hop.0, hop.1))
        .collect::<Vec<_>>()
        .join("___")
}

/// Collision-free alias of a preview data column reached by `path`
pub fn preview_alias(path: &[PreviewHop], column: ColumnId) -> String {
    format!("{}__col__{}", path_prefix(path), column)
}

fn describe_path(path: &[PreviewHop]) -> String {
    let hops = path.iter().map(ToString::to_string).collect::<Vec<_>>();
    format!("[{}]", hops.join(", "))
}

/// Flattened template and path for one previewed foreign key column
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PreviewInfo {
    /// Template whose placeholders are preview column aliases
    pub template: String,
    pub path: Vec<PreviewHop>,
}

/// A data column needed to render previews, shaped like an initial column
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PreviewColumn {
    pub id: ColumnId,
    pub alias: String,
    pub jp_path: Vec<PreviewHop>,
}

/// Output of [`PreviewResolver::resolve`]
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PreviewResolution {
    /// Keyed by constrained column id
    pub info: BTreeMap<ColumnId, PreviewInfo>,
    /// Previously collected columns followed by the newly needed ones
    pub columns: Vec<PreviewColumn>,
    /// Referent tables visited, in first-visit order
    pub referent_tables: Vec<TableId>,
}

/// Accumulates preview columns across one resolution, unique by id and path
struct Collected {
    columns: Vec<PreviewColumn>,
    seen: HashSet<(ColumnId, Vec<PreviewHop>)>,
    tables: Vec<TableId>,
}

impl Collected {
    fn new(already_collected: &[PreviewColumn]) -> Self {
        let seen = already_collected
            .iter()
            .map(|c| (c.id, c.jp_path.clone()))
            .collect();
        Self {
            columns: already_collected.to_vec(),
            seen,
            tables: Vec::new(),
        }
    }

    fn push(&mut self, id: ColumnId, path: &[PreviewHop]) {
        if self.seen.insert((id, path.to_vec())) {
            self.columns.push(PreviewColumn {
                id,
                alias: preview_alias(path, id),
                jp_path: path.to_vec(),
            });
        }
    }

    fn visit(&mut self, table: TableId) {
        if !self.tables.contains(&table) {
            self.tables.push(table);
        }
    }
}

/// Resolves foreign-key previews against a metadata repository
pub struct PreviewResolver<'a> {
    repo: &'a dyn MetadataRepository,
    max_depth: usize,
}

impl<'a> PreviewResolver<'a> {
    pub fn new(repo: &'a dyn MetadataRepository) -> Self {
        Self::from_config(repo, &PreviewConfig::default())
    }

    pub fn from_config(repo: &'a dyn MetadataRepository, config: &PreviewConfig) -> Self {
        Self {
            repo,
            max_depth: config.max_depth,
        }
    }

    /// Limit the number of hops one preview chain may follow
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    /// Resolve the previews of `table`.
    ///
    /// In auto mode only foreign keys whose constrained column has
    /// `show_fk_preview` set are followed. `restrict` narrows further to
    /// the listed constrained columns; `None` means no restriction and an
    /// empty slice matches nothing. `path` is the chain that led to
    /// `table`, and entries of `already_collected` are not emitted again.
    pub fn resolve(
        &self,
        mode: PreviewMode,
        table: TableId,
        restrict: Option<&[ColumnId]>,
        path: &[PreviewHop],
        already_collected: &[PreviewColumn],
    ) -> PreviewResult<PreviewResolution> {
        log::debug!(
            "Resolving {} previews for table {} (path {})",
            mode,
            table,
            describe_path(path)
        );
        let mut collected = Collected::new(already_collected);
        let info = self.resolve_table(mode, table, restrict, path, &mut collected)?;
        Ok(PreviewResolution {
            info,
            columns: collected.columns,
            referent_tables: collected.tables,
        })
    }

    fn resolve_table(
        &self,
        mode: PreviewMode,
        table: TableId,
        restrict: Option<&[ColumnId]>,
        path: &[PreviewHop],
        collected: &mut Collected,
    ) -> PreviewResult<BTreeMap<ColumnId, PreviewInfo>> {
        let mut info = BTreeMap::new();
        for hop in self.previewed_hops(mode, table, restrict)? {
            if path.contains(&hop) {
                return Err(PreviewError::CyclicPreviewChain {
                    table,
                    constrained: hop.0.get(),
                    referent: hop.1.get(),
                    path: describe_path(path),
                });
            }
            let mut current_path = path.to_vec();
            current_path.push(hop);
            if current_path.len() > self.max_depth {
                return Err(PreviewError::PreviewDepthExceeded {
                    max_depth: self.max_depth,
                    path: describe_path(&current_path),
                });
            }

            let referent_table = self.repo.column(hop.referent())?.table_id;
            collected.visit(referent_table);
            let settings = self.repo.table_settings(referent_table)?;
            let template = PreviewTemplate::parse(&settings.preview_settings.template)?;
            let column_ids = template.column_ids();
            log::debug!(
                "Following {} into table {} with template '{}'",
                hop,
                referent_table,
                template
            );

            let nested = self.resolve_table(
                mode,
                referent_table,
                Some(&column_ids),
                &current_path,
                collected,
            )?;
            for id in column_ids.iter().filter(|id| !nested.contains_key(*id)) {
                collected.push(*id, &current_path);
            }
            let flattened = template.render(|id| match nested.get(&id) {
                Some(inner) => inner.template.clone(),
                None => format!("{{{}}}", preview_alias(&current_path, id)),
            });

            info.insert(
                hop.constrained(),
                PreviewInfo {
                    template: flattened,
                    path: current_path,
                },
            );
        }
        Ok(info)
    }

    /// Foreign keys of `table` that pass the mode and restriction filters
    fn previewed_hops(
        &self,
        mode: PreviewMode,
        table: TableId,
        restrict: Option<&[ColumnId]>,
    ) -> PreviewResult<Vec<PreviewHop>> {
        let mut hops = Vec::new();
        for fk in self.repo.foreign_keys(table)? {
            let Some(hop) = single_column_hop(&fk) else {
                continue;
            };
            if mode == PreviewMode::Auto
                && !self
                    .repo
                    .column(hop.constrained())?
                    .display_options
                    .show_fk_preview
            {
                continue;
            }
            if let Some(restrict) = restrict {
                if !restrict.contains(&hop.constrained()) {
                    continue;
                }
            }
            hops.push(hop);
        }
        Ok(hops)
    }
}

fn single_column_hop(fk: &Constraint) -> Option<PreviewHop> {
    if fk.is_multi_column() {
        log::warn!(
            "Skipping preview for multi-column foreign key {} on table {}",
            fk.id,
            fk.table_id
        );
        return None;
    }
    Some(PreviewHop(fk.constrained_column()?, fk.referent_column()?))
}

#[cfg(test)]
#[path = "resolver_test.rs"]
mod tests;
