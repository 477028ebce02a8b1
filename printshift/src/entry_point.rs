//! Shared entry point for the printshift command line tool.
//!
//! Argument parsing, configuration resolution and command dispatch live
//! here so the binary stays a thin wrapper and tests can drive the whole
//! program through `run_with_args_to` with a captured writer.

use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;

use crate::cli::{Cli, Commands};

/// Runs the migration (or another subcommand) with the given arguments.
///
/// # Errors
///
/// Returns an error if configuration loading fails, a configured rule is
/// invalid, or the migration itself aborts.
pub fn run_with_args(args: Vec<String>) -> Result<i32> {
    run_with_args_to(args, &mut std::io::stdout())
}

/// Run printshift with the given arguments, writing output to the specified writer.
///
/// This is the testable version of `run_with_args` that allows output capture.
///
/// # Errors
///
/// Returns an error if configuration loading fails, a configured rule is
/// invalid, or the migration itself aborts.
#[allow(clippy::too_many_lines)]
pub fn run_with_args_to<W: std::io::Write>(args: Vec<String>, writer: &mut W) -> Result<i32> {
    let mut program_args = vec!["printshift".to_owned()];
    program_args.extend(args);
    let cli_var = match Cli::try_parse_from(program_args) {
        Ok(c) => c,
        Err(e) => {
            match e.kind() {
                clap::error::ErrorKind::DisplayHelp | clap::error::ErrorKind::DisplayVersion => {
                    // Let clap print help/version as intended, but captured by redirect
                    write!(writer, "{e}")?;
                    writer.flush()?;
                    return Ok(0);
                }
                _ => {
                    eprint!("{e}");
                    return Ok(1);
                }
            }
        }
    };

    // Load config from the first target or current directory
    let config_start = cli_var
        .paths
        .paths
        .first()
        .cloned()
        .or_else(|| cli_var.paths.root.clone())
        .unwrap_or_else(|| PathBuf::from("."));
    let config = crate::config::Config::load_from_path(&config_start)?;

    let builtin = config.printshift.builtin_rules.unwrap_or(true);
    let rules = crate::rules::RuleSet::from_config(builtin, &config.printshift.rules)
        .context("invalid rule in configuration")?;

    if let Some(command) = cli_var.command {
        match command {
            Commands::Rules { json } => {
                crate::commands::run_rules(&rules, json, &mut *writer)?;
            }
        }
        Ok(0)
    } else {
        let targets: Vec<PathBuf> = if cli_var.paths.paths.is_empty() {
            cli_var
                .paths
                .root
                .clone()
                .or_else(|| config.printshift.root.as_ref().map(PathBuf::from))
                .map_or_else(|| vec![PathBuf::from(".")], |root| vec![root])
        } else {
            cli_var.paths.paths.clone()
        };

        for path in &targets {
            if !path.exists() {
                eprintln!(
                    "Error: The file or directory '{}' does not exist.",
                    path.display()
                );
                return Ok(1);
            }
        }

        let extension = cli_var
            .extension
            .clone()
            .or_else(|| config.printshift.extension.clone())
            .unwrap_or_else(|| crate::constants::DEFAULT_EXTENSION.to_owned());
        let marker = config
            .printshift
            .marker
            .clone()
            .unwrap_or_else(|| crate::constants::DEFAULT_MARKER.to_owned());
        let import_line = config
            .printshift
            .import_line
            .clone()
            .unwrap_or_else(|| crate::constants::DEFAULT_IMPORT_LINE.to_owned());
        let insert_import = !cli_var.no_import && config.printshift.insert_import.unwrap_or(true);
        let dry_run = cli_var.dry_run || cli_var.check;

        let mut exclude_folders = config.printshift.exclude_folders.clone().unwrap_or_default();
        exclude_folders.extend(cli_var.exclude_folders);

        let mut include_folders = config.printshift.include_folders.clone().unwrap_or_default();
        include_folders.extend(cli_var.include_folders);

        if !cli_var.output.json && !cli_var.output.quiet {
            crate::output::print_header(writer).ok();
            crate::output::print_exclusion_list(writer, &exclude_folders).ok();
        }

        // Print verbose configuration info (before progress bar)
        if cli_var.output.verbose && !cli_var.output.json {
            eprintln!("[VERBOSE] printshift v{}", env!("CARGO_PKG_VERSION"));
            if let Some(ref config_file) = config.config_file_path {
                eprintln!("[VERBOSE] Config file: {}", config_file.display());
            }
            eprintln!("[VERBOSE] Configuration:");
            eprintln!("   Extension: .{extension}");
            eprintln!("   Marker: {marker}");
            eprintln!("   Import line: {import_line}");
            eprintln!("   Insert import: {insert_import}");
            eprintln!("   Built-in rules: {builtin}");
            eprintln!("   Active rules: {}", rules.len());
            eprintln!("   Dry run: {dry_run}");
            eprintln!("   Targets: {targets:?}");
            if !exclude_folders.is_empty() {
                eprintln!("   Exclude folders: {exclude_folders:?}");
            }
            eprintln!();
        }

        let files = crate::utils::collect_candidates(
            &targets,
            &extension,
            &exclude_folders,
            &include_folders,
            cli_var.output.verbose,
        );

        // Create progress bar with file count for visual feedback
        let progress: Option<indicatif::ProgressBar> = if cli_var.output.json {
            None
        } else {
            Some(crate::output::create_progress_bar(files.len() as u64))
        };

        let start_time = std::time::Instant::now();

        let options = crate::commands::MigrateOptions {
            imports: crate::rewrite::ImportPolicy {
                marker,
                import_line,
                enabled: insert_import,
            },
            dry_run,
            quiet: cli_var.output.quiet || cli_var.output.json,
        };
        let report =
            crate::commands::run_migrate(&files, &rules, &options, progress.as_ref(), &mut *writer)?;

        if let Some(p) = progress {
            p.finish_and_clear();
        }

        // Print verbose timing info
        if cli_var.output.verbose && !cli_var.output.json {
            let elapsed = start_time.elapsed();
            eprintln!(
                "[VERBOSE] Migration completed in {:.2}s",
                elapsed.as_secs_f64()
            );
            eprintln!("   Files scanned: {}", report.files_scanned);
            eprintln!("   Files changed: {}", report.files_changed);
            eprintln!();
        }

        if cli_var.output.json {
            writeln!(writer, "{}", serde_json::to_string_pretty(&report)?)?;
        } else {
            let show_table = dry_run || cli_var.output.verbose;
            if show_table && !cli_var.output.quiet && !report.changes.is_empty() {
                crate::output::print_changes_table(writer, &report.changes, report.dry_run)?;
            }

            if report.dry_run {
                writeln!(
                    writer,
                    "\n[SUMMARY] {} files scanned, {} would be rewritten, {} replacements pending",
                    report.files_scanned, report.files_changed, report.replacements
                )?;
            } else {
                writeln!(
                    writer,
                    "\n[SUMMARY] {} files scanned, {} rewritten, {} replacements, {} imports inserted",
                    report.files_scanned,
                    report.files_changed,
                    report.replacements,
                    report.imports_inserted
                )?;
            }

            let elapsed = start_time.elapsed();
            writeln!(
                writer,
                "\n[TIME] Completed in {:.2}s",
                elapsed.as_secs_f64()
            )?;
        }

        let mut exit_code = 0;

        // Check gate: any pending rewrite fails the run
        if cli_var.check {
            if report.files_changed > 0 {
                if !cli_var.output.json {
                    eprintln!(
                        "\n[CHECK] {} file(s) still need migration - FAILED",
                        report.files_changed
                    );
                }
                exit_code = 1;
            } else if !cli_var.output.json {
                writeln!(writer, "\n[CHECK] No print statements left to migrate - PASSED")?;
            }
        }

        Ok(exit_code)
    }
}
