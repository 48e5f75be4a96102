//! rq-preview - Foreign-key preview resolution for Relquery
//!
//! Given a table, this crate follows its foreign keys to the referenced
//! tables, resolves their preview templates (recursively, when a template
//! column is itself a foreign key) and produces the flattened template for
//! each previewed column plus the list of data columns, with join paths and
//! collision-free aliases, that a relation must select to render them.

pub mod columns;
pub mod error;
pub mod resolver;
pub mod template;

pub use columns::{add_preview_columns, preview_initial_columns, TablePreview};
pub use error::{PreviewError, PreviewResult};
pub use resolver::{
    path_prefix, preview_alias, PreviewColumn, PreviewHop, PreviewInfo, PreviewResolution,
    PreviewResolver,
};
pub use template::{PreviewTemplate, Token};
