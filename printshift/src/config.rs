use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::Path;

use crate::constants::CONFIG_FILENAME;

#[derive(Debug, Deserialize, Default, Clone)]
/// Top-level configuration struct.
pub struct Config {
    #[serde(default)]
    /// The main configuration section for printshift.
    pub printshift: PrintshiftConfig,
    /// The path to the configuration file this was loaded from.
    /// Set during `load_from_path`, `None` if using defaults or programmatic config.
    #[serde(skip)]
    pub config_file_path: Option<std::path::PathBuf>,
}

#[derive(Debug, Deserialize, Default, Clone)]
/// Configuration options for printshift.
pub struct PrintshiftConfig {
    /// Directory scanned when no paths are given on the command line.
    pub root: Option<String>,
    /// Extension (without the dot) of candidate source files.
    pub extension: Option<String>,
    /// Marker whose presence makes a file eligible for import insertion.
    pub marker: Option<String>,
    /// Import declaration inserted after the last existing import line.
    pub import_line: Option<String>,
    /// Whether to insert the logger import at all.
    pub insert_import: Option<bool>,
    /// Whether the built-in ruleset is applied.
    pub builtin_rules: Option<bool>,
    /// List of folders to exclude.
    pub exclude_folders: Option<Vec<String>>,
    /// List of folders to force-include.
    pub include_folders: Option<Vec<String>>,
    /// Extra substitution rules, applied after the built-ins in declaration order.
    #[serde(default)]
    pub rules: Vec<UserRule>,
}

/// A substitution rule defined in TOML configuration.
#[derive(Debug, Deserialize, Clone)]
pub struct UserRule {
    /// Match kind: `"literal"` or `"regex"`.
    #[serde(default = "default_rule_kind")]
    pub kind: String,
    /// The pattern to match.
    pub pattern: String,
    /// The replacement text. Regex rules may reference captures as `$1`/`${1}`.
    pub replacement: String,
}

fn default_rule_kind() -> String {
    "literal".to_owned()
}

impl Config {
    /// Loads configuration starting from a specific path and traversing up.
    ///
    /// Returns the built-in defaults when no configuration file is found.
    /// A discovered file that cannot be read or parsed is an error, not a
    /// silent fallback: a typo in the rule table must never degrade a run
    /// into applying the wrong ruleset.
    ///
    /// # Errors
    ///
    /// Returns an error if a discovered configuration file is unreadable or
    /// not valid TOML.
    pub fn load_from_path(path: &Path) -> Result<Self> {
        let mut current = path.to_path_buf();
        if current.is_file() {
            current.pop();
        }

        loop {
            let candidate = current.join(CONFIG_FILENAME);
            if candidate.exists() {
                let content = fs::read_to_string(&candidate)
                    .with_context(|| format!("failed to read {}", candidate.display()))?;
                let mut config = toml::from_str::<Config>(&content)
                    .with_context(|| format!("failed to parse {}", candidate.display()))?;
                config.config_file_path = Some(candidate);
                return Ok(config);
            }

            if !current.pop() {
                break;
            }
        }

        Ok(Config::default())
    }
}
