//! Error values with context, stack snapshots and cause trees
//!
//! This module provides the [`Error`] handle, its constructors, the
//! `Result`/`Option` context extensions and a multi-line report.

pub mod constructors;
pub mod context;
pub mod report;
pub mod types;

pub use constructors::{join, wrap};
pub use context::{OptionExt, ResultExt};
pub use report::Report;
pub use types::{Causes, Error, Result};
