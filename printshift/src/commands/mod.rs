//! Commands module - CLI command implementations.
//!
//! This module contains the implementations for the migration run and the
//! auxiliary subcommands.

mod migrate;
mod rules;

// Re-export all public items
pub use migrate::{run_migrate, FileChange, MigrateError, MigrateOptions, MigrateReport};
pub use rules::run_rules;
