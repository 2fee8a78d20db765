//! Condition linter

use crate::config::LintConfig;
use crate::report::LintReport;
use crate::rules::{builtin_rules, ConditionRule};
use crate::site::ConditionSite;

/// Runs the enabled condition rules over a set of sites.
///
/// The linter holds no mutable state; one instance can serve concurrent
/// callers.
pub struct ConditionLinter {
    config: LintConfig,
    rules: Vec<Box<dyn ConditionRule>>,
}

impl ConditionLinter {
    /// Linter with the built-in rules and the given configuration
    pub fn new(config: LintConfig) -> Self {
        Self::with_rules(config, builtin_rules())
    }

    pub(crate) fn with_rules(config: LintConfig, rules: Vec<Box<dyn ConditionRule>>) -> Self {
        Self { config, rules }
    }

    pub fn config(&self) -> &LintConfig {
        &self.config
    }

    /// Ids of all registered rules, enabled or not
    pub fn rule_ids(&self) -> Vec<&'static str> {
        self.rules.iter().map(|rule| rule.id()).collect()
    }

    /// Lint `sites` and collect the findings of every enabled rule
    pub fn lint(&self, sites: &[ConditionSite]) -> LintReport {
        let mut findings = Vec::new();

        for rule in &self.rules {
            if !self.config.is_enabled(rule.id()) {
                tracing::debug!("Skipping disabled rule {}", rule.id());
                continue;
            }

            let severity = self.config.severity_for(rule.id(), rule.default_severity());
            let found = rule.check(sites, severity);
            tracing::debug!(
                "Rule {} produced {} finding(s) over {} site(s)",
                rule.id(),
                found.len(),
                sites.len()
            );
            findings.extend(found);
        }

        let report = LintReport::new(findings);
        tracing::debug!(
            "Lint finished: {} error(s), {} warning(s), {} info",
            report.counts.error,
            report.counts.warning,
            report.counts.info
        );
        report
    }
}

impl Default for ConditionLinter {
    fn default() -> Self {
        Self::new(LintConfig::default())
    }
}

impl std::fmt::Debug for ConditionLinter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConditionLinter")
            .field("config", &self.config)
            .field("rules", &self.rule_ids())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proxylint_core::{Severity, SourcePosition};

    fn site(owner: &str, expression: &str, line: usize) -> ConditionSite {
        ConditionSite::new("proxy#flows", owner, expression, SourcePosition::new(line, 9))
    }

    #[test]
    fn test_default_linter_has_builtin_rules() {
        let linter = ConditionLinter::default();
        assert_eq!(
            linter.rule_ids(),
            vec!["condition-unterminated-string", "condition-syntax", "condition-duplicate"]
        );
    }

    #[test]
    fn test_clean_sites() {
        let report = ConditionLinter::default().lint(&[
            site("Flow.Get", r#"request.verb = "GET""#, 4),
            site("Flow.Post", r#"request.verb = "POST""#, 10),
        ]);
        assert!(report.is_empty());
    }

    #[test]
    fn test_disabled_rule_skipped() {
        let config = LintConfig::new().with_rule_enabled("condition-duplicate", false);
        let report = ConditionLinter::new(config).lint(&[
            site("Flow.A", r#"request.verb = "GET""#, 4),
            site("Flow.B", r#"request.verb == "GET""#, 10),
        ]);
        assert!(report.is_empty());
    }

    #[test]
    fn test_severity_override() {
        let config = LintConfig::new().with_rule_severity("condition-syntax", Severity::Info);
        let report = ConditionLinter::new(config).lint(&[site("Flow.A", "(a", 4)]);

        assert_eq!(report.counts.info, 1);
        assert_eq!(report.counts.error, 0);
    }

    #[test]
    fn test_sites_with_every_rule_firing() {
        let report = ConditionLinter::default().lint(&[
            site("Flow.A", r#"request.verb = "GET""#, 4),
            site("Flow.B", r#"request.verb Equals "GET""#, 10),
            site("Flow.C", r#"proxy.pathsuffix MatchesPath "OPTIONS"#, 16),
        ]);

        assert_eq!(report.by_rule("condition-duplicate").count(), 1);
        assert_eq!(report.by_rule("condition-syntax").count(), 1);
        assert_eq!(report.by_rule("condition-unterminated-string").count(), 1);
        assert_eq!(report.findings[0].owner, "Flow.B");
        assert_eq!(report.findings.last().map(|f| f.diagnostic.line), Some(16));
    }
}
