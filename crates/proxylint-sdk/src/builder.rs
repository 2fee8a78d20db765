//! Builder pattern for ConditionLinter

use crate::config::LintConfig;
use crate::error::{Result, SdkError};
use crate::linter::ConditionLinter;
use crate::rules::{builtin_rules, ConditionRule};
use std::collections::HashSet;
use std::path::PathBuf;

/// Builder for ConditionLinter
///
/// # Example
///
/// ```rust,ignore
/// use proxylint_sdk::ConditionLinterBuilder;
///
/// let linter = ConditionLinterBuilder::new()
///     .with_config_file("proxylint.yaml")
///     .with_rule(Box::new(MyProfileRule::default()))
///     .build()?;
/// ```
pub struct ConditionLinterBuilder {
    config: LintConfig,
    config_file: Option<PathBuf>,
    builtin: bool,
    rules: Vec<Box<dyn ConditionRule>>,
}

impl ConditionLinterBuilder {
    /// Create a new builder
    pub fn new() -> Self {
        Self {
            config: LintConfig::default(),
            config_file: None,
            builtin: true,
            rules: Vec::new(),
        }
    }

    /// Use an in-memory configuration
    pub fn with_config(mut self, config: LintConfig) -> Self {
        self.config = config;
        self
    }

    /// Load configuration from a YAML file at build time.
    /// Takes precedence over `with_config`.
    pub fn with_config_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.config_file = Some(path.into());
        self
    }

    /// Register an additional rule
    pub fn with_rule(mut self, rule: Box<dyn ConditionRule>) -> Self {
        self.rules.push(rule);
        self
    }

    /// Start from no rules instead of the built-in set
    pub fn without_builtin_rules(mut self) -> Self {
        self.builtin = false;
        self
    }

    /// Build the linter
    pub fn build(self) -> Result<ConditionLinter> {
        let config = match &self.config_file {
            Some(path) => LintConfig::from_file(path)?,
            None => self.config,
        };

        let mut rules = if self.builtin {
            builtin_rules()
        } else {
            Vec::new()
        };
        rules.extend(self.rules);

        let mut ids = HashSet::new();
        for rule in &rules {
            if !ids.insert(rule.id()) {
                return Err(SdkError::ConfigError(format!(
                    "Rule '{}' registered more than once",
                    rule.id()
                )));
            }
        }

        for id in config.rules.keys() {
            if !ids.contains(id.as_str()) {
                tracing::warn!("Configuration references unknown rule '{}'", id);
            }
        }

        Ok(ConditionLinter::with_rules(config, rules))
    }
}

impl Default for ConditionLinterBuilder {
    fn default() -> Self {
        Self::new()
    }
}
