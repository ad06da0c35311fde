//! errtrail - error values with context, stack snapshots and cause trees
//!
//! This library wraps errors with human-readable context while keeping the
//! original cause, records the call stack once per wrap chain, and walks the
//! resulting cause tree (including joined, multi-cause nodes) in preorder.

pub mod config;
pub mod error;
pub mod stack;
pub mod walk;

// Re-export commonly used types
pub use error::{join, wrap, Causes, Error, OptionExt, Report, Result, ResultExt};
pub use stack::{stack_of, Frame, Frames, Stack};
pub use walk::{skip, walk, Chain, SKIP};

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const NAME: &str = env!("CARGO_PKG_NAME");
