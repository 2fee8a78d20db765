//! Configuration for the condition linter
//!
//! The condition engine itself has no configuration. These settings only
//! decide which condition rules run and at what severity.
//!
//! ```yaml
//! rules:
//!   condition-unterminated-string: { enabled: true, severity: warning }
//!   condition-syntax: { severity: error }
//!   condition-duplicate: { enabled: false }
//! ```

use crate::error::Result;
use proxylint_core::Severity;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

/// Linter configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LintConfig {
    /// Per-rule settings keyed by rule id
    #[serde(default)]
    pub rules: BTreeMap<String, RuleSetting>,
}

/// Settings for a single rule
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleSetting {
    #[serde(default = "default_enabled")]
    pub enabled: bool,

    /// Overrides the rule's default severity
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub severity: Option<Severity>,
}

fn default_enabled() -> bool {
    true
}

impl Default for RuleSetting {
    fn default() -> Self {
        Self {
            enabled: true,
            severity: None,
        }
    }
}

impl LintConfig {
    /// Create an empty configuration: every rule enabled at its default severity
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a configuration from YAML
    pub fn from_yaml_str(content: &str) -> Result<Self> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        let config: LintConfig = serde_yaml::from_str(content)?;
        Ok(config)
    }

    /// Load a configuration file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;
        tracing::debug!("Loading lint configuration from {}", path.display());
        Self::from_yaml_str(&content)
    }

    /// Enable or disable a rule
    pub fn with_rule_enabled(mut self, rule_id: impl Into<String>, enabled: bool) -> Self {
        self.rules.entry(rule_id.into()).or_default().enabled = enabled;
        self
    }

    /// Override a rule's severity
    pub fn with_rule_severity(mut self, rule_id: impl Into<String>, severity: Severity) -> Self {
        self.rules.entry(rule_id.into()).or_default().severity = Some(severity);
        self
    }

    pub fn is_enabled(&self, rule_id: &str) -> bool {
        self.rules.get(rule_id).map_or(true, |setting| setting.enabled)
    }

    /// Configured severity for `rule_id`, or `default` when none is set
    pub fn severity_for(&self, rule_id: &str, default: Severity) -> Severity {
        self.rules
            .get(rule_id)
            .and_then(|setting| setting.severity)
            .unwrap_or(default)
    }
}
