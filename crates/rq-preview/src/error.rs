//! Error types for rq-preview

use rq_core::TableId;
use thiserror::Error;

/// Preview resolution errors
#[derive(Error, Debug)]
pub enum PreviewError {
    /// A template placeholder is not a column id (P001)
    #[error("[P001] Invalid placeholder '{{{placeholder}}}' in preview template '{template}': placeholders must be column ids")]
    InvalidPlaceholder {
        template: String,
        placeholder: String,
    },

    /// A preview chain revisits a foreign key it already followed (P002)
    #[error("[P002] Cyclic preview chain at table {table}: foreign key {constrained} -> {referent} is already on the path {path}")]
    CyclicPreviewChain {
        table: TableId,
        constrained: u64,
        referent: u64,
        path: String,
    },

    /// A preview chain is longer than the configured limit (P003)
    #[error("[P003] Preview chain exceeds the maximum depth of {max_depth} at path {path}")]
    PreviewDepthExceeded { max_depth: usize, path: String },

    /// Metadata lookup failure (P004)
    #[error("[P004] Metadata error: {0}")]
    Core(#[from] rq_core::CoreError),

    /// Building preview columns failed (P005)
    #[error("[P005] {0}")]
    Sql(#[from] rq_sql::SqlError),
}

/// Result type alias for PreviewError
pub type PreviewResult<T> = Result<T, PreviewError>;
