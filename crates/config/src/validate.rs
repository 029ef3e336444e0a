//! Configuration validation.
//!
//! Validates trigger phrases for ambiguity and reports unknown keys in raw
//! config documents so misspelled fields don't silently fall back to
//! defaults.

use crate::schema::{EnforcementMode, OffdutyConfig};

/// Severity level for a diagnostic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    Error,
    Warning,
    Info,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Error => write!(f, "error"),
            Self::Warning => write!(f, "warning"),
            Self::Info => write!(f, "info"),
        }
    }
}

/// A single validation diagnostic.
#[derive(Debug, Clone)]
pub struct Diagnostic {
    pub severity: Severity,
    /// Category: "syntax", "unknown-field", "trigger", "suppression"
    pub category: &'static str,
    /// Dotted path, e.g. "commands.clock_in"
    pub path: String,
    pub message: String,
}

/// Result of validating a configuration.
#[derive(Debug, Clone, Default)]
pub struct ValidationResult {
    pub diagnostics: Vec<Diagnostic>,
}

impl ValidationResult {
    /// Returns `true` if any diagnostic is an error.
    #[must_use]
    pub fn has_errors(&self) -> bool {
        self.diagnostics
            .iter()
            .any(|d| d.severity == Severity::Error)
    }

    /// Count diagnostics by severity.
    #[must_use]
    pub fn count(&self, severity: Severity) -> usize {
        self.diagnostics
            .iter()
            .filter(|d| d.severity == severity)
            .count()
    }
}

/// Known sections and their fields, mirroring `schema.rs`.
const KNOWN_SECTIONS: &[(&str, &[&str])] = &[
    ("commands", &["clock_in", "clock_out", "clock_in_at", "clock_out_at"]),
    ("replies", &["clock_in", "clock_out"]),
    ("enforcement", &["mode", "suppression_text", "command_prefix"]),
];

/// Validate a parsed configuration.
pub fn validate(config: &OffdutyConfig) -> ValidationResult {
    let mut diagnostics = Vec::new();

    let triggers = [
        ("commands.clock_in", &config.commands.clock_in),
        ("commands.clock_out", &config.commands.clock_out),
        ("commands.clock_in_at", &config.commands.clock_in_at),
        ("commands.clock_out_at", &config.commands.clock_out_at),
    ];

    for (path, trigger) in &triggers {
        if trigger.trim().is_empty() {
            diagnostics.push(Diagnostic {
                severity: Severity::Error,
                category: "trigger",
                path: (*path).to_string(),
                message: "empty trigger phrase".into(),
            });
        }
    }

    for (i, (path, trigger)) in triggers.iter().enumerate() {
        for (other_path, other) in triggers.iter().skip(i + 1) {
            if !trigger.is_empty() && trigger == other {
                diagnostics.push(Diagnostic {
                    severity: Severity::Error,
                    category: "trigger",
                    path: (*other_path).to_string(),
                    message: format!("duplicate trigger phrase \"{trigger}\" (also {path})"),
                });
            }
        }
    }

    if config.enforcement.mode == EnforcementMode::Strict
        && config.enforcement.suppression_text.is_empty()
    {
        diagnostics.push(Diagnostic {
            severity: Severity::Info,
            category: "suppression",
            path: "enforcement.suppression_text".into(),
            message: "empty suppression text: strict mode drops messages silently".into(),
        });
    }

    ValidationResult { diagnostics }
}

/// Report unknown keys in a raw TOML config document.
///
/// Parsing the document into [`OffdutyConfig`] would silently ignore them;
/// this walk surfaces each one as a warning instead.
pub fn check_unknown_keys(raw: &str) -> Vec<Diagnostic> {
    let value: toml::Value = match raw.parse() {
        Ok(v) => v,
        Err(e) => {
            return vec![Diagnostic {
                severity: Severity::Error,
                category: "syntax",
                path: String::new(),
                message: e.to_string(),
            }];
        },
    };

    let mut diagnostics = Vec::new();
    let Some(table) = value.as_table() else {
        return diagnostics;
    };

    for (section, entry) in table {
        match KNOWN_SECTIONS
            .iter()
            .find(|(name, _)| *name == section.as_str())
        {
            Some((_, fields)) => {
                let Some(section_table) = entry.as_table() else {
                    continue;
                };
                for key in section_table.keys() {
                    if !fields.contains(&key.as_str()) {
                        diagnostics.push(Diagnostic {
                            severity: Severity::Warning,
                            category: "unknown-field",
                            path: format!("{section}.{key}"),
                            message: "unknown field".into(),
                        });
                    }
                }
            },
            None => diagnostics.push(Diagnostic {
                severity: Severity::Warning,
                category: "unknown-field",
                path: section.clone(),
                message: "unknown section".into(),
            }),
        }
    }

    diagnostics
}

#[allow(clippy::unwrap_used, clippy::expect_used)]
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_clean() {
        let result = validate(&OffdutyConfig::default());
        assert!(result.diagnostics.is_empty());
        assert!(!result.has_errors());
    }

    #[test]
    fn empty_trigger_is_an_error() {
        let mut config = OffdutyConfig::default();
        config.commands.clock_in = "  ".into();

        let result = validate(&config);
        assert!(result.has_errors());
        assert_eq!(result.diagnostics[0].path, "commands.clock_in");
    }

    #[test]
    fn duplicate_triggers_are_an_error() {
        let mut config = OffdutyConfig::default();
        config.commands.clock_out = "clockin".into();

        let result = validate(&config);
        assert!(result.has_errors());
        assert!(result.diagnostics[0].message.contains("duplicate"));
    }

    #[test]
    fn strict_silent_suppression_gets_an_info() {
        let mut config = OffdutyConfig::default();
        config.enforcement.mode = EnforcementMode::Strict;

        let result = validate(&config);
        assert!(!result.has_errors());
        assert_eq!(result.count(Severity::Info), 1);
    }

    #[test]
    fn unknown_keys_are_warnings() {
        let diagnostics = check_unknown_keys(
            "[commands]\nclock_on = \"x\"\n\n[extra]\nfoo = 1\n",
        );
        let paths: Vec<&str> = diagnostics.iter().map(|d| d.path.as_str()).collect();
        assert!(paths.contains(&"commands.clock_on"));
        assert!(paths.contains(&"extra"));
        assert!(diagnostics.iter().all(|d| d.severity == Severity::Warning));
    }

    #[test]
    fn known_keys_are_silent() {
        let diagnostics =
            check_unknown_keys("[enforcement]\nmode = \"strict\"\nsuppression_text = \"busy\"\n");
        assert!(diagnostics.is_empty());
    }

    #[test]
    fn syntax_error_is_reported() {
        let diagnostics = check_unknown_keys("not [ valid = toml");
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].severity, Severity::Error);
        assert_eq!(diagnostics[0].category, "syntax");
    }
}
