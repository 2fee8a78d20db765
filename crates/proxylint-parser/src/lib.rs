//! proxylint parser - condition text to AST
//!
//! This crate turns the `<Condition>` strings of a proxy bundle into
//! condition ASTs, and runs the token-level checks that work even when a
//! condition does not parse.

pub mod classifier;
pub mod condition_parser;
pub mod lexer;

// Re-export main parser types
pub use classifier::{TokenClassifier, TokenDiagnostic, TokenDiagnosticKind};
pub use condition_parser::{ConditionParser, MAX_NESTING_DEPTH};
pub use lexer::Lexer;

use proxylint_core::{Node, Result, SourcePosition};

/// Parse a condition string into an AST
pub fn parse(expression: &str) -> Result<Node> {
    ConditionParser::parse(expression)
}

/// Run the token classifier over a raw condition string
pub fn classify(expression: &str, origin: SourcePosition) -> Vec<TokenDiagnostic> {
    TokenClassifier::classify(expression, origin)
}
