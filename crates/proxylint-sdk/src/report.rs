//! Lint results

use crate::error::Result;
use proxylint_core::{Diagnostic, Severity};
use serde::{Deserialize, Serialize};

/// A diagnostic together with the element it belongs to
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Finding {
    pub owner: String,
    pub diagnostic: Diagnostic,
}

impl Finding {
    pub fn new(owner: impl Into<String>, diagnostic: Diagnostic) -> Self {
        Self {
            owner: owner.into(),
            diagnostic,
        }
    }
}

/// Number of findings per severity
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeverityCounts {
    pub info: usize,
    pub warning: usize,
    pub error: usize,
}

impl SeverityCounts {
    fn record(&mut self, severity: Severity) {
        match severity {
            Severity::Info => self.info += 1,
            Severity::Warning => self.warning += 1,
            Severity::Error => self.error += 1,
        }
    }

    pub fn total(&self) -> usize {
        self.info + self.warning + self.error
    }
}

/// Result of linting a set of condition sites
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LintReport {
    /// Findings ordered by line, then column, then rule id
    pub findings: Vec<Finding>,
    pub counts: SeverityCounts,
}

impl LintReport {
    pub fn new(mut findings: Vec<Finding>) -> Self {
        findings.sort_by(|a, b| {
            (a.diagnostic.line, a.diagnostic.column, &a.diagnostic.rule_id).cmp(&(
                b.diagnostic.line,
                b.diagnostic.column,
                &b.diagnostic.rule_id,
            ))
        });

        let mut counts = SeverityCounts::default();
        for finding in &findings {
            counts.record(finding.diagnostic.severity);
        }

        Self { findings, counts }
    }

    pub fn is_empty(&self) -> bool {
        self.findings.is_empty()
    }

    pub fn has_errors(&self) -> bool {
        self.counts.error > 0
    }

    /// Findings produced by one rule
    pub fn by_rule<'a>(&'a self, rule_id: &'a str) -> impl Iterator<Item = &'a Finding> + 'a {
        self.findings
            .iter()
            .filter(move |f| f.diagnostic.rule_id == rule_id)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
