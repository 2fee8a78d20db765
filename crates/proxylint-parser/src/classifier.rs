//! Token classifier
//!
//! Lint-grade checks over the raw token stream. They never need a successful
//! parse, so they still report on conditions the parser rejects:
//! - a constant token with a quote at only one end is a possible
//!   unterminated string
//! - an odd number of parenthesis tokens means a parenthesis is unmatched,
//!   often because an open string swallowed it
//!
//! Both checks are independent and can fire for the same condition.

use crate::lexer::Lexer;
use proxylint_core::{Diagnostic, Severity, SourcePosition, Token, TokenKind};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Kind of token-level problem
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TokenDiagnosticKind {
    UnterminatedString,
    UnmatchedParenthesis,
}

impl fmt::Display for TokenDiagnosticKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenDiagnosticKind::UnterminatedString => write!(f, "unterminated-string"),
            TokenDiagnosticKind::UnmatchedParenthesis => write!(f, "unmatched-parenthesis"),
        }
    }
}

/// A token-level finding
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenDiagnostic {
    pub kind: TokenDiagnosticKind,
    /// Offending token text, or the whole condition for parenthesis findings
    pub value: String,
    /// 0-based character offset inside the condition
    pub offset: usize,
    /// Line of the owning element
    pub line: usize,
    /// Column of the owning element
    pub column: usize,
}

impl TokenDiagnostic {
    pub fn message(&self) -> String {
        match self.kind {
            TokenDiagnosticKind::UnterminatedString => {
                format!("Possible unterminated string: {}", self.value)
            }
            TokenDiagnosticKind::UnmatchedParenthesis => {
                "Unmatched parenthesis - possibly due to an unterminated string".to_string()
            }
        }
    }

    /// Convert into the diagnostic a rule plugin reports
    pub fn into_diagnostic(self, rule_id: &str, severity: Severity) -> Diagnostic {
        let message = self.message();
        Diagnostic::new(
            rule_id,
            SourcePosition::new(self.line, self.column),
            message,
            severity,
        )
    }
}

/// Token classifier
pub struct TokenClassifier;

impl TokenClassifier {
    /// Classify a raw condition.
    ///
    /// `origin` is the position of the element that owns the condition; it
    /// is copied onto every finding. This never fails.
    pub fn classify(expression: &str, origin: SourcePosition) -> Vec<TokenDiagnostic> {
        let tokens = Lexer::tokenize_lenient(expression);
        let mut diagnostics = Vec::new();

        for token in tokens.iter().filter(|t| is_possibly_unterminated(t)) {
            diagnostics.push(TokenDiagnostic {
                kind: TokenDiagnosticKind::UnterminatedString,
                value: token.text.clone(),
                offset: token.position,
                line: origin.line,
                column: origin.column,
            });
        }

        let boundaries = tokens
            .iter()
            .filter(|t| t.kind == TokenKind::Boundary)
            .count();
        if boundaries % 2 == 1 {
            diagnostics.push(TokenDiagnostic {
                kind: TokenDiagnosticKind::UnmatchedParenthesis,
                value: expression.to_string(),
                offset: 0,
                line: origin.line,
                column: origin.column,
            });
        }

        if !diagnostics.is_empty() {
            log::debug!(
                "Classifier found {} issue(s) in '{}'",
                diagnostics.len(),
                expression
            );
        }
        diagnostics
    }
}

/// A constant with a quote at exactly one end, or a string the lexer could
/// not close (which may end in an escaped quote and so look balanced)
fn is_possibly_unterminated(token: &Token) -> bool {
    if !token.is_constant() {
        return false;
    }
    if token.kind == TokenKind::StringLiteral && !token.valid {
        return true;
    }

    let starts = token.text.starts_with('"');
    let ends = token.text.len() > 1 && token.text.ends_with('"');
    starts != ends
}
