use crate::config::UserRule;
use regex::Regex;
use std::sync::OnceLock;

/// How a rule matches source text.
#[derive(Debug, Clone)]
pub enum Pattern {
    /// Exact substring match. Every occurrence is replaced.
    Literal(String),
    /// Regex match. Every non-overlapping match is replaced, with
    /// `$1`/`${1}` capture references expanded in the replacement.
    Regex(Regex),
}

/// A single substitution: a pattern paired with its replacement.
#[derive(Debug, Clone)]
pub struct Rule {
    /// What to match.
    pub pattern: Pattern,
    /// The replacement text.
    pub replacement: String,
}

/// Errors raised while assembling a ruleset from configuration.
#[derive(Debug, thiserror::Error)]
pub enum RuleError {
    /// A regex rule's pattern failed to compile.
    #[error("invalid regex pattern `{pattern}`: {source}")]
    InvalidRegex {
        /// The offending pattern text.
        pattern: String,
        /// The underlying compile error.
        #[source]
        source: regex::Error,
    },
    /// A rule with an empty match pattern.
    #[error("rule has an empty pattern")]
    EmptyPattern,
    /// Unrecognized `kind` value in a configured rule.
    #[error("unknown rule kind `{0}` (expected \"literal\" or \"regex\")")]
    UnknownKind(String),
}

impl Rule {
    /// Creates a literal rule.
    #[must_use]
    pub fn literal(pattern: impl Into<String>, replacement: impl Into<String>) -> Self {
        Self {
            pattern: Pattern::Literal(pattern.into()),
            replacement: replacement.into(),
        }
    }

    /// Creates a regex rule.
    ///
    /// # Errors
    ///
    /// Returns [`RuleError::InvalidRegex`] if the pattern does not compile.
    pub fn regex(pattern: &str, replacement: impl Into<String>) -> Result<Self, RuleError> {
        let re = Regex::new(pattern).map_err(|source| RuleError::InvalidRegex {
            pattern: pattern.to_owned(),
            source,
        })?;
        Ok(Self {
            pattern: Pattern::Regex(re),
            replacement: replacement.into(),
        })
    }

    /// Number of match sites in `content`.
    #[must_use]
    pub fn match_count(&self, content: &str) -> usize {
        match &self.pattern {
            Pattern::Literal(pat) => content.matches(pat.as_str()).count(),
            Pattern::Regex(re) => re.find_iter(content).count(),
        }
    }

    /// Replaces every match site in `content`.
    #[must_use]
    pub fn replace(&self, content: &str) -> String {
        match &self.pattern {
            Pattern::Literal(pat) => content.replace(pat.as_str(), &self.replacement),
            Pattern::Regex(re) => re.replace_all(content, self.replacement.as_str()).into_owned(),
        }
    }

    /// Short kind label for display.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match &self.pattern {
            Pattern::Literal(_) => "literal",
            Pattern::Regex(_) => "regex",
        }
    }

    /// The pattern text for display.
    #[must_use]
    pub fn pattern_text(&self) -> &str {
        match &self.pattern {
            Pattern::Literal(pat) => pat,
            Pattern::Regex(re) => re.as_str(),
        }
    }
}

/// An ordered list of rules applied sequentially to file content.
///
/// Order is the contract: each rule sees the text as left by its
/// predecessors, so specific rules must come before general fallbacks.
#[derive(Debug, Clone, Default)]
pub struct RuleSet {
    rules: Vec<Rule>,
}

impl RuleSet {
    /// Creates a ruleset from an ordered rule list.
    #[must_use]
    pub fn new(rules: Vec<Rule>) -> Self {
        Self { rules }
    }

    /// Assembles the active ruleset: the built-ins (unless disabled)
    /// followed by user rules in declaration order.
    ///
    /// # Errors
    ///
    /// Returns a [`RuleError`] for an empty pattern, an unknown kind, or a
    /// regex pattern that does not compile.
    pub fn from_config(builtin: bool, user: &[UserRule]) -> Result<Self, RuleError> {
        let mut rules = if builtin {
            builtin_rules().rules.clone()
        } else {
            Vec::new()
        };

        for spec in user {
            if spec.pattern.is_empty() {
                return Err(RuleError::EmptyPattern);
            }
            let rule = match spec.kind.as_str() {
                "literal" => Rule::literal(&spec.pattern, &spec.replacement),
                "regex" => Rule::regex(&spec.pattern, &spec.replacement)?,
                other => return Err(RuleError::UnknownKind(other.to_owned())),
            };
            rules.push(rule);
        }

        Ok(Self { rules })
    }

    /// Applies every rule in order, returning the rewritten text and the
    /// total number of replaced match sites.
    #[must_use]
    pub fn apply(&self, content: &str) -> (String, usize) {
        let mut text = content.to_owned();
        let mut total = 0;

        for rule in &self.rules {
            let hits = rule.match_count(&text);
            if hits == 0 {
                continue;
            }
            text = rule.replace(&text);
            total += hits;
        }

        (text, total)
    }

    /// Number of rules in the set.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// True when the set holds no rules.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Iterates the rules in application order.
    pub fn iter(&self) -> std::slice::Iter<'_, Rule> {
        self.rules.iter()
    }
}

impl<'a> IntoIterator for &'a RuleSet {
    type Item = &'a Rule;
    type IntoIter = std::slice::Iter<'a, Rule>;

    fn into_iter(self) -> Self::IntoIter {
        self.rules.iter()
    }
}

/// The built-in migration ruleset.
///
/// Two tiers, in application order:
///
/// 1. The literal `JournalView` diagnostics, matched verbatim. Their
///    replacements strip the `JournalView: ` tag along with the emoji.
/// 2. General emoji fallbacks, matched by regex with the message captured
///    after the emoji. The emoji and any whitespace following it are
///    dropped from the rewritten call.
///
/// The fallbacks assume one diagnostic per line; a greedy match across two
/// print calls on a single line follows the rightmost closing sequence.
///
/// # Panics
///
/// Panics if a built-in regex pattern is invalid.
pub fn builtin_rules() -> &'static RuleSet {
    static RULES: OnceLock<RuleSet> = OnceLock::new();
    RULES.get_or_init(|| {
        let journal_view: [(&str, &str); 18] = [
            (
                r#"print("🔄 JournalView: Loading drawing for journal page date: \(currentDate)")"#,
                r#"logPerformance("Loading drawing for journal page date: \(currentDate)")"#,
            ),
            (
                r#"print("🔄 JournalView: Loaded existing drawing for date: \(targetDate)")"#,
                r#"logPerformance("Loaded existing drawing for date: \(targetDate)")"#,
            ),
            (
                r#"print("⚠️ JournalView: Date changed during drawing load, ignoring stale data")"#,
                r#"logWarning("Date changed during drawing load, ignoring stale data")"#,
            ),
            (
                r#"print("🔄 JournalView: No existing drawing found for date: \(targetDate)")"#,
                r#"logPerformance("No existing drawing found for date: \(targetDate)")"#,
            ),
            (
                r#"print("⚠️ JournalView: Save blocked - operation in progress")"#,
                r#"logWarning("Save blocked - operation in progress")"#,
            ),
            (
                r#"print("💾 JournalView: Starting explicit save to iCloud for \(currentDate)")"#,
                r#"logPerformance("Starting explicit save to iCloud for \(currentDate)")"#,
            ),
            (
                r#"print("💾 JournalView: Saving drawing to iCloud")"#,
                r#"logPerformance("Saving drawing to iCloud")"#,
            ),
            (
                r#"print("💾 JournalView: Saving photos to iCloud")"#,
                r#"logPerformance("Saving photos to iCloud")"#,
            ),
            (
                r#"print("✅ JournalView: Successfully saved to iCloud")"#,
                r#"logInfo("Successfully saved to iCloud")"#,
            ),
            (
                r#"print("❌ JournalView: Failed to save to iCloud: \(error.localizedDescription)")"#,
                r#"logError("Failed to save to iCloud: \(error.localizedDescription)")"#,
            ),
            (
                r#"print("⚠️ JournalView: Load blocked - operation in progress")"#,
                r#"logWarning("Load blocked - operation in progress")"#,
            ),
            (
                r#"print("📥 JournalView: Loading from iCloud for \(currentDate)")"#,
                r#"logPerformance("Loading from iCloud for \(currentDate)")"#,
            ),
            (
                r#"print("📥 JournalView: Successfully loaded drawing from iCloud")"#,
                r#"logInfo("Successfully loaded drawing from iCloud")"#,
            ),
            (
                r#"print("📥 JournalView: No drawing found in iCloud")"#,
                r#"logInfo("No drawing found in iCloud")"#,
            ),
            (
                r#"print("✅ JournalView: Successfully loaded from iCloud")"#,
                r#"logInfo("Successfully loaded from iCloud")"#,
            ),
            (
                r#"print("❌ JournalView: Failed to load from iCloud: \(error.localizedDescription)")"#,
                r#"logError("Failed to load from iCloud: \(error.localizedDescription)")"#,
            ),
            (
                r#"print("⚠️ JournalView: Date switch blocked - save/load in progress")"#,
                r#"logWarning("Date switch blocked - save/load in progress")"#,
            ),
            (
                r#"print("🔄 JournalView: Switching to date \(newDate)")"#,
                r#"logPerformance("Switching to date \(newDate)")"#,
            ),
        ];

        let fallbacks: [(&str, &str); 7] = [
            ("⚠️", "logWarning"),
            ("❌", "logError"),
            ("✅", "logInfo"),
            ("🔄", "logPerformance"),
            ("📸", "logPerformance"),
            ("💾", "logPerformance"),
            ("📥", "logPerformance"),
        ];

        let mut rules: Vec<Rule> = journal_view
            .iter()
            .map(|&(pattern, replacement)| Rule::literal(pattern, replacement))
            .collect();

        #[allow(clippy::expect_used)]
        rules.extend(fallbacks.iter().map(|&(emoji, call)| {
            Rule::regex(
                &format!(r#"print\("{emoji}\s*(.*)"\)"#),
                format!(r#"{call}("${{1}}")"#),
            )
            .expect("built-in fallback pattern is valid")
        }));

        RuleSet::new(rules)
    })
}
