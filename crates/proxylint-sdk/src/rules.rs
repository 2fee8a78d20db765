//! Built-in condition rules
//!
//! Each rule looks at every condition site handed to the linter and turns
//! what the condition engine reports into findings for the owning element.

use crate::report::Finding;
use crate::site::ConditionSite;
use proxylint_compiler::EquivalenceChecker;
use proxylint_core::{Diagnostic, Severity};
use std::collections::HashMap;

/// A check over condition sites
pub trait ConditionRule: Send + Sync {
    /// Stable identifier used in configuration and findings
    fn id(&self) -> &'static str;

    fn description(&self) -> &'static str;

    fn default_severity(&self) -> Severity;

    /// Check all sites, reporting at `severity`
    fn check(&self, sites: &[ConditionSite], severity: Severity) -> Vec<Finding>;
}

/// Flags string literals that look unterminated and odd parenthesis counts.
///
/// Runs on the raw token stream, so it reports even when the condition does
/// not parse.
#[derive(Debug, Default)]
pub struct UnterminatedStringRule;

impl UnterminatedStringRule {
    pub const ID: &'static str = "condition-unterminated-string";
}

impl ConditionRule for UnterminatedStringRule {
    fn id(&self) -> &'static str {
        Self::ID
    }

    fn description(&self) -> &'static str {
        "String literals in conditions must be terminated"
    }

    fn default_severity(&self) -> Severity {
        Severity::Warning
    }

    fn check(&self, sites: &[ConditionSite], severity: Severity) -> Vec<Finding> {
        sites
            .iter()
            .flat_map(|site| {
                proxylint_parser::classify(&site.expression, site.position)
                    .into_iter()
                    .map(move |d| Finding::new(&site.owner, d.into_diagnostic(Self::ID, severity)))
            })
            .collect()
    }
}

/// Reports conditions that fail to tokenize or parse
#[derive(Debug, Default)]
pub struct ConditionSyntaxRule;

impl ConditionSyntaxRule {
    pub const ID: &'static str = "condition-syntax";
}

impl ConditionRule for ConditionSyntaxRule {
    fn id(&self) -> &'static str {
        Self::ID
    }

    fn description(&self) -> &'static str {
        "Conditions must be syntactically valid"
    }

    fn default_severity(&self) -> Severity {
        Severity::Error
    }

    fn check(&self, sites: &[ConditionSite], severity: Severity) -> Vec<Finding> {
        let mut findings = Vec::new();

        for site in sites {
            if let Err(e) = proxylint_parser::parse(&site.expression) {
                tracing::debug!("Condition of {} does not parse: {}", site.owner, e);
                let message = format!("Invalid condition '{}': {}", site.expression, e);
                findings.push(Finding::new(
                    &site.owner,
                    Diagnostic::new(Self::ID, site.position, message, severity),
                ));
            }
        }

        findings
    }
}

/// Reports sibling conditions that are equivalent to an earlier one in the
/// same scope. Conditions that do not parse are left to `condition-syntax`.
#[derive(Debug, Default)]
pub struct DuplicateConditionRule {
    checker: EquivalenceChecker,
}

impl DuplicateConditionRule {
    pub const ID: &'static str = "condition-duplicate";

    pub fn new() -> Self {
        Self::default()
    }
}

impl ConditionRule for DuplicateConditionRule {
    fn id(&self) -> &'static str {
        Self::ID
    }

    fn description(&self) -> &'static str {
        "Sibling conditions must not be equivalent"
    }

    fn default_severity(&self) -> Severity {
        Severity::Warning
    }

    fn check(&self, sites: &[ConditionSite], severity: Severity) -> Vec<Finding> {
        // (scope, signature) -> first site with that signature
        let mut seen: HashMap<(&str, String), &ConditionSite> = HashMap::new();
        let mut findings = Vec::new();

        for site in sites {
            let signature = match self.checker.signature_of(&site.expression) {
                Ok(signature) => signature,
                Err(e) => {
                    tracing::debug!(
                        "Skipping duplicate check for {}, condition does not parse: {}",
                        site.owner,
                        e
                    );
                    continue;
                }
            };

            match seen.get(&(site.scope.as_str(), signature.clone())) {
                Some(first) => {
                    let message = format!(
                        "Condition '{}' is equivalent to the condition of {} ({})",
                        site.expression, first.owner, first.expression
                    );
                    findings.push(Finding::new(
                        &site.owner,
                        Diagnostic::new(Self::ID, site.position, message, severity),
                    ));
                }
                None => {
                    seen.insert((site.scope.as_str(), signature), site);
                }
            }
        }

        findings
    }
}

/// The rules every linter starts with
pub fn builtin_rules() -> Vec<Box<dyn ConditionRule>> {
    vec![
        Box::new(UnterminatedStringRule),
        Box::new(ConditionSyntaxRule),
        Box::new(DuplicateConditionRule::new()),
    ]
}
