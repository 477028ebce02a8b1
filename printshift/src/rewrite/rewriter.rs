//! Pure source rewriter: import insertion plus ordered rule application.
//!
//! The transformation is purely lexical. No parsing is attempted; the input
//! is treated as text and the output differs only where the import step or a
//! rule matched.
//!
//! # Usage
//!
//! ```
//! use printshift::rewrite::{rewrite_source, ImportPolicy};
//! use printshift::rules::builtin_rules;
//!
//! let source = "import SwiftUI\n\nprint(\"✅ JournalView: Successfully saved to iCloud\")\n";
//! let result = rewrite_source(source, builtin_rules(), &ImportPolicy::defaults());
//! assert!(result.content.starts_with("import SwiftUI\nimport PerformanceLogger\n"));
//! assert!(result.content.contains("logInfo(\"Successfully saved to iCloud\")"));
//! ```

use crate::constants::{DEFAULT_IMPORT_LINE, DEFAULT_MARKER};
use crate::rules::RuleSet;

/// Controls the conditional import-insertion step.
#[derive(Debug, Clone)]
pub struct ImportPolicy {
    /// Marker whose presence makes a file eligible for the import.
    pub marker: String,
    /// Import declaration inserted after the last existing import line.
    pub import_line: String,
    /// Disables the insertion step entirely when false.
    pub enabled: bool,
}

impl ImportPolicy {
    /// Policy using the built-in marker and import line.
    #[must_use]
    pub fn defaults() -> Self {
        Self {
            marker: DEFAULT_MARKER.to_owned(),
            import_line: DEFAULT_IMPORT_LINE.to_owned(),
            enabled: true,
        }
    }
}

/// Outcome of rewriting one file's content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rewritten {
    /// The rewritten text (equal to the input when nothing matched).
    pub content: String,
    /// Number of rule match sites that were replaced.
    pub replacements: usize,
    /// Whether the logger import was inserted.
    pub import_inserted: bool,
    /// Whether the rewritten text differs from the input.
    pub changed: bool,
}

/// Applies the migration to one file's content.
///
/// Two steps, in order:
///
/// 1. Import insertion. Runs only when the policy is enabled, the text
///    contains the marker, and the import line is not already present.
///    The import is placed directly after the last line whose trimmed form
///    starts with `import `; a file with no import lines is left alone.
/// 2. Rule application. Every rule in declaration order, each seeing the
///    text as left by its predecessors.
///
/// The eligibility checks make the whole transformation idempotent: running
/// it on its own output changes nothing.
#[must_use]
pub fn rewrite_source(original: &str, rules: &RuleSet, imports: &ImportPolicy) -> Rewritten {
    let mut content = original.to_owned();
    let mut import_inserted = false;

    if imports.enabled
        && content.contains(&imports.marker)
        && !content.contains(&imports.import_line)
    {
        if let Some(with_import) = insert_after_last_import(&content, &imports.import_line) {
            content = with_import;
            import_inserted = true;
        }
    }

    let (content, replacements) = rules.apply(&content);
    let changed = content != original;

    Rewritten {
        content,
        replacements,
        import_inserted,
        changed,
    }
}

/// Inserts `import_line` as a new line directly after the last import
/// declaration, or returns `None` when the text has no import line.
fn insert_after_last_import(content: &str, import_line: &str) -> Option<String> {
    let mut lines: Vec<&str> = content.split('\n').collect();
    let last_import = lines
        .iter()
        .rposition(|line| line.trim_start().starts_with("import "))?;
    lines.insert(last_import + 1, import_line);
    Some(lines.join("\n"))
}
