//! proxylint SDK
//!
//! Runs condition rules over the `<Condition>` elements of a proxy bundle and
//! collects the findings. Parsing, normalization and equivalence come from
//! the parser and compiler crates; this crate only decides which checks run
//! and how their results are reported.

pub mod builder;
pub mod config;
pub mod error;
pub mod linter;
pub mod report;
pub mod rules;
pub mod site;

// Re-export main types
pub use builder::ConditionLinterBuilder;
pub use config::{LintConfig, RuleSetting};
pub use error::{Result, SdkError};
pub use linter::ConditionLinter;
pub use report::{Finding, LintReport, SeverityCounts};
pub use rules::{
    builtin_rules, ConditionRule, ConditionSyntaxRule, DuplicateConditionRule,
    UnterminatedStringRule,
};
pub use site::ConditionSite;

// Re-export commonly used types from dependencies
pub use proxylint_core::{Diagnostic, Severity, SourcePosition};
