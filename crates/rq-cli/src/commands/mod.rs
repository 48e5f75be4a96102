//! CLI command implementations

pub(crate) mod common;
pub(crate) mod count;
pub(crate) mod preview;
pub(crate) mod records;
pub(crate) mod sql;
