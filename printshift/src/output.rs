use crate::commands::FileChange;
use crate::rules::RuleSet;
use colored::Colorize;
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Attribute, Cell, Color, ContentArrangement, Table};
use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};
use std::io::Write;
use std::time::Duration;

/// Print the exclusion list in styled format.
///
/// # Errors
///
/// Returns an error if writing to the output fails.
pub fn print_exclusion_list(writer: &mut impl Write, folders: &[String]) -> std::io::Result<()> {
    if folders.is_empty() {
        let defaults = crate::constants::get_default_exclude_folders();
        let mut sorted_defaults: Vec<&str> = defaults.iter().copied().collect();
        sorted_defaults.sort_unstable();
        let list = sorted_defaults.join(", ");
        writeln!(
            writer,
            "{} {}",
            "[OK] Using default exclusions only:".green(),
            list.dimmed()
        )?;
    } else {
        let list = folders
            .iter()
            .map(std::string::String::as_str)
            .collect::<Vec<_>>()
            .join(", ");
        writeln!(writer, "{} {}", "Excluding:".yellow().bold(), list)?;
    }
    Ok(())
}

/// Create a progress bar with file count (used when total files is known).
///
/// In test mode, returns a hidden progress bar to avoid polluting test output.
///
/// # Panics
///
/// Panics if the progress style template is invalid (should never happen with hardcoded template).
#[must_use]
pub fn create_progress_bar(total_files: u64) -> ProgressBar {
    // In test mode, return a hidden progress bar to avoid polluting test output
    if cfg!(test) {
        return ProgressBar::hidden();
    }

    let pb =
        ProgressBar::with_draw_target(Some(total_files), ProgressDrawTarget::stderr_with_hz(20));
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.cyan} [{bar:40.cyan/blue}] {pos}/{len} files ({percent}%) {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("█▓░"),
    );
    pb.set_message("rewriting...");
    pb.enable_steady_tick(Duration::from_millis(100));
    pb.tick(); // Force initial draw
    pb
}

/// Print the main header with box-drawing characters.
///
/// # Errors
///
/// Returns an error if writing to the output fails.
pub fn print_header(writer: &mut impl Write) -> std::io::Result<()> {
    writeln!(writer)?;
    writeln!(
        writer,
        "{}",
        "╔════════════════════════════════════════╗".cyan()
    )?;
    writeln!(
        writer,
        "{}",
        "║  Print Statement Migration             ║".cyan().bold()
    )?;
    writeln!(
        writer,
        "{}",
        "╚════════════════════════════════════════╝".cyan()
    )?;
    writeln!(writer)?;
    Ok(())
}

/// Helper to create a styled table
fn create_table(headers: Vec<&str>) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(headers);
    table
}

/// Print the per-file change table (used for dry runs and verbose output).
///
/// # Errors
///
/// Returns an error if writing to the output fails.
pub fn print_changes_table(
    writer: &mut impl Write,
    changes: &[FileChange],
    pending: bool,
) -> std::io::Result<()> {
    if changes.is_empty() {
        return Ok(());
    }

    let heading = if pending {
        "Pending rewrites"
    } else {
        "Rewritten files"
    };
    writeln!(writer, "\n{}", heading.bold().underline())?;

    let mut table = create_table(vec!["File", "Replacements", "Import"]);

    for change in changes {
        let import_cell = if change.import_inserted {
            Cell::new("added").fg(Color::Green)
        } else {
            Cell::new("-").add_attribute(Attribute::Dim)
        };
        table.add_row(vec![
            Cell::new(&change.file).add_attribute(Attribute::Bold),
            Cell::new(change.replacements),
            import_cell,
        ]);
    }

    writeln!(writer, "{table}")?;
    Ok(())
}

/// Print the active ruleset as a table.
///
/// # Errors
///
/// Returns an error if writing to the output fails.
pub fn print_rules_table(writer: &mut impl Write, rules: &RuleSet) -> std::io::Result<()> {
    writeln!(writer, "\n{}", "Active ruleset".bold().underline())?;

    let mut table = create_table(vec!["#", "Kind", "Pattern", "Replacement"]);

    for (idx, rule) in rules.iter().enumerate() {
        table.add_row(vec![
            Cell::new(idx + 1).add_attribute(Attribute::Dim),
            Cell::new(rule.kind()),
            Cell::new(rule.pattern_text()),
            Cell::new(&rule.replacement),
        ]);
    }

    writeln!(writer, "{table}")?;
    writeln!(writer, "{} rules applied in the order shown", rules.len())?;
    Ok(())
}
