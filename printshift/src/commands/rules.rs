//! Rules command: print the active ruleset.

use crate::rules::RuleSet;

use anyhow::Result;
use std::io::Write;

/// Prints the active ruleset (built-ins plus configured extras) in
/// application order, as a table or as JSON.
///
/// # Errors
///
/// Returns an error if serialization or writing to the output fails.
pub fn run_rules<W: Write>(rules: &RuleSet, json: bool, mut writer: W) -> Result<()> {
    if json {
        #[derive(serde::Serialize)]
        struct RuleRow<'a> {
            kind: &'static str,
            pattern: &'a str,
            replacement: &'a str,
        }

        let rows: Vec<RuleRow> = rules
            .iter()
            .map(|rule| RuleRow {
                kind: rule.kind(),
                pattern: rule.pattern_text(),
                replacement: &rule.replacement,
            })
            .collect();
        writeln!(writer, "{}", serde_json::to_string_pretty(&rows)?)?;
        return Ok(());
    }

    crate::output::print_rules_table(&mut writer, rules)?;
    Ok(())
}
