use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Help text for configuration file options, shown at the bottom of --help.
const CONFIG_HELP: &str = "\
CONFIGURATION FILE (.printshift.toml):
  Create this file in your project root to set defaults.

  [printshift]
  # Core settings
  root = \"Sources\"             # Scanned when no paths are given
  extension = \"swift\"          # Candidate file extension
  marker = \"print(\"            # Marker gating import insertion
  import_line = \"import PerformanceLogger\"
  insert_import = true         # Insert the logger import
  builtin_rules = true         # Apply the built-in ruleset

  # Path filters
  exclude_folders = [\"Generated\", \"Fixtures\"]
  include_folders = [\"Pods\"]   # Force-include these

  # Extra rules, applied after the built-ins in order
  [[printshift.rules]]
  kind = \"literal\"             # or \"regex\" ($1 captures)
  pattern = 'print(\"booted\")'
  replacement = 'logInfo(\"booted\")'
";

/// Options for output formatting and verbosity.
#[derive(Args, Debug, Default, Clone)]
#[allow(clippy::struct_excessive_bools)] // CLI flags are legitimately booleans
pub struct OutputOptions {
    /// Output the run report as JSON.
    #[arg(long)]
    pub json: bool,

    /// Enable verbose output for debugging (shows resolved configuration).
    #[arg(short, long)]
    pub verbose: bool,

    /// Quiet mode: show only the summary (no per-file lines).
    #[arg(long)]
    pub quiet: bool,
}

/// Shared path arguments (mutually exclusive paths/root).
#[derive(Args, Debug, Default, Clone)]
pub struct PathArgs {
    /// Paths to migrate (files or directories).
    /// Can be a single directory, multiple files, or a mix of both.
    /// When no paths are provided, defaults to the configured root or the
    /// current directory.
    /// Cannot be used with --root.
    #[arg(conflicts_with = "root")]
    pub paths: Vec<PathBuf>,

    /// Scan root used instead of positional paths.
    /// Use this when running from a different directory.
    /// Cannot be used together with positional path arguments.
    #[arg(long, conflicts_with = "paths")]
    pub root: Option<PathBuf>,
}

/// Command line interface configuration using `clap`.
/// This struct defines the arguments and flags accepted by the program.
#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "printshift - Migrate diagnostic print statements to PerformanceLogger calls",
    long_about = None,
    after_help = CONFIG_HELP
)]
#[allow(clippy::struct_excessive_bools)] // CLI flags are legitimately booleans
pub struct Cli {
    #[command(subcommand)]
    /// The subcommand to execute (defaults to the migration run).
    pub command: Option<Commands>,

    /// Global path options (paths vs root).
    #[command(flatten)]
    pub paths: PathArgs,

    /// Report what would change without writing any file.
    #[arg(short = 'n', long, conflicts_with = "check")]
    pub dry_run: bool,

    /// Like --dry-run, but exit with code 1 when any rewrite is pending.
    /// For CI/CD integration: fails the build while unmigrated prints remain.
    #[arg(long)]
    pub check: bool,

    /// Output formatting options.
    #[command(flatten)]
    pub output: OutputOptions,

    /// Folders to exclude from the scan.
    #[arg(long, alias = "exclude-folder")]
    pub exclude_folders: Vec<String>,

    /// Folders to force-include in the scan (overrides default exclusions).
    #[arg(long, alias = "include-folder")]
    pub include_folders: Vec<String>,

    /// Candidate file extension, without the dot (overrides config).
    #[arg(long)]
    pub extension: Option<String>,

    /// Skip the logger-import insertion step.
    #[arg(long)]
    pub no_import: bool,
}

#[derive(Subcommand, Debug)]
/// Available subcommands.
pub enum Commands {
    /// Show the active ruleset (built-ins plus configured extras)
    Rules {
        /// Output JSON.
        #[arg(long)]
        json: bool,
    },
}
