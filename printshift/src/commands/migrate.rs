//! Migration command: the sequential read, rewrite, compare, write loop.

use crate::rewrite::{rewrite_source, ImportPolicy};
use crate::utils::normalize_display_path;

use anyhow::{Context, Result};
use colored::Colorize;
use serde::Serialize;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Options for a migration run.
#[derive(Debug, Clone)]
pub struct MigrateOptions {
    /// How and whether to insert the logger import.
    pub imports: ImportPolicy,
    /// Dry-run mode (report what would change without writing).
    pub dry_run: bool,
    /// Quiet mode (suppress per-file lines).
    pub quiet: bool,
}

/// Per-file outcome of a migration run.
#[derive(Debug, Clone, Serialize)]
pub struct FileChange {
    /// File that was (or would be) rewritten.
    pub file: String,
    /// Number of rule match sites replaced in this file.
    pub replacements: usize,
    /// Whether the logger import was inserted.
    pub import_inserted: bool,
}

/// Aggregate result of a migration run.
#[derive(Debug, Clone, Default, Serialize)]
pub struct MigrateReport {
    /// Number of candidate files inspected.
    pub files_scanned: usize,
    /// Number of files whose content changed.
    pub files_changed: usize,
    /// Total replaced match sites across all files.
    pub replacements: usize,
    /// Number of files that received the logger import.
    pub imports_inserted: usize,
    /// Whether this was a dry run.
    pub dry_run: bool,
    /// The changed files, in processing order.
    pub changes: Vec<FileChange>,
}

/// Errors that abort a migration run.
#[derive(Debug, thiserror::Error)]
pub enum MigrateError {
    /// A candidate file could not be read.
    #[error("failed to read {path}: {source}")]
    Read {
        /// Display path of the file.
        path: String,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },
    /// A candidate file is not valid UTF-8.
    #[error("{path} is not valid UTF-8 (byte offset {valid_up_to})")]
    Encoding {
        /// Display path of the file.
        path: String,
        /// Offset of the first invalid byte.
        valid_up_to: usize,
    },
    /// A rewritten file could not be written back.
    #[error("failed to write {path}: {source}")]
    Write {
        /// Display path of the file.
        path: String,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },
}

/// Runs the migration over `files`, strictly in order, one file at a time.
///
/// Each file is read, rewritten in memory, and written back only when the
/// rewritten text differs from what was read. The first failure aborts the
/// whole run; files processed before the failure keep their new content.
///
/// # Errors
///
/// Returns an error when a file cannot be read, is not valid UTF-8, or
/// cannot be written back. The error names the failing file and how many
/// files were already rewritten.
pub fn run_migrate<W: Write>(
    files: &[PathBuf],
    rules: &crate::rules::RuleSet,
    options: &MigrateOptions,
    progress: Option<&indicatif::ProgressBar>,
    mut writer: W,
) -> Result<MigrateReport> {
    let mut report = MigrateReport {
        dry_run: options.dry_run,
        ..MigrateReport::default()
    };

    if options.dry_run && !options.quiet {
        writeln!(
            writer,
            "\n{}",
            "[DRY-RUN] Files that would be rewritten:".yellow()
        )?;
    }

    for path in files {
        if let Some(pb) = progress {
            pb.set_message(normalize_display_path(path));
        }

        let outcome = rewrite_file(path, rules, options).with_context(|| {
            if options.dry_run {
                format!(
                    "migration check aborted after scanning {} file(s)",
                    report.files_scanned
                )
            } else {
                format!(
                    "migration aborted; {} earlier file(s) were already rewritten and keep their changes",
                    report.files_changed
                )
            }
        })?;
        report.files_scanned += 1;

        if let Some(change) = outcome {
            if !options.quiet {
                let label = if options.dry_run {
                    "Would rewrite:".yellow()
                } else {
                    "Rewrote:".green()
                };
                let detail = if change.import_inserted {
                    format!("{} replacement(s), import added", change.replacements)
                } else {
                    format!("{} replacement(s)", change.replacements)
                };
                writeln!(writer, "  {} {} ({})", label, change.file, detail)?;
            }

            report.files_changed += 1;
            report.replacements += change.replacements;
            if change.import_inserted {
                report.imports_inserted += 1;
            }
            report.changes.push(change);
        }

        if let Some(pb) = progress {
            pb.inc(1);
        }
    }

    Ok(report)
}

/// Rewrites a single file in place, returning its change record, or `None`
/// when the content came out unchanged.
fn rewrite_file(
    path: &Path,
    rules: &crate::rules::RuleSet,
    options: &MigrateOptions,
) -> Result<Option<FileChange>, MigrateError> {
    let original = read_source(path)?;
    let outcome = rewrite_source(&original, rules, &options.imports);

    if !outcome.changed {
        return Ok(None);
    }

    if !options.dry_run {
        fs::write(path, &outcome.content).map_err(|source| MigrateError::Write {
            path: normalize_display_path(path),
            source,
        })?;
    }

    Ok(Some(FileChange {
        file: normalize_display_path(path),
        replacements: outcome.replacements,
        import_inserted: outcome.import_inserted,
    }))
}

/// Reads a candidate file, keeping the UTF-8 failure distinct from I/O.
fn read_source(path: &Path) -> Result<String, MigrateError> {
    let bytes = fs::read(path).map_err(|source| MigrateError::Read {
        path: normalize_display_path(path),
        source,
    })?;
    String::from_utf8(bytes).map_err(|err| MigrateError::Encoding {
        path: normalize_display_path(path),
        valid_up_to: err.utf8_error().valid_up_to(),
    })
}
