//! Shared rewriting module for the migration pass.
//!
//! This module provides the pure text transformation applied to each
//! candidate file:
//! - Conditional logger-import insertion
//! - Ordered rule application over the accumulating text
//!
//! The core function is `rewrite_source`, which never touches the
//! filesystem. Reading and writing files lives in `commands::migrate`.

mod rewriter;

pub use rewriter::{rewrite_source, ImportPolicy, Rewritten};
