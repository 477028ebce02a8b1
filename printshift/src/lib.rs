//! Core library for the printshift migration tool.
//!
//! printshift rewrites diagnostic `print("...")` statements in Swift
//! sources into leveled `PerformanceLogger` calls and inserts the logger
//! import where it is missing, driven by a built-in ruleset plus optional
//! per-project configuration.

#![cfg_attr(test, allow(clippy::unwrap_used, clippy::expect_used))]

/// Module containing the source rewriting engine.
/// This applies the active ruleset to file content and inserts the import.
pub mod rewrite;

/// Module defining substitution rules and the built-in ruleset.
pub mod rules;

/// Module for loading configuration.
pub mod config;

/// Module containing utility functions.
/// This includes the gitignore-aware file walker and path helpers.
pub mod utils;

/// Module defining the entry point logic.
/// This handles argument parsing, configuration resolution and dispatch.
pub mod entry_point;

/// Module containing shared constants.
pub mod constants;

/// Module for rich CLI output formatting with colored text and progress bars.
pub mod output;

/// Module defining the command-line interface arguments and structs.
pub mod cli;

/// Module for handling CLI commands and their execution logic.
pub mod commands;
