//! Lexical tokens of the condition language

use crate::ast::OperatorKind;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Token category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TokenKind {
    /// Symbolic operator (`=`, `!=`, `~/`, `&&`, ...)
    Operator,
    /// Bare word: dotted variable path or unquoted value
    Identifier,
    /// Double-quoted string, quotes included in the text
    StringLiteral,
    /// Unquoted number
    NumberLiteral,
    /// `(` or `)`
    Boundary,
    /// Word operator (`and`, `not`, `StartsWith`, ...)
    Keyword,
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenKind::Operator => write!(f, "operator"),
            TokenKind::Identifier => write!(f, "identifier"),
            TokenKind::StringLiteral => write!(f, "string"),
            TokenKind::NumberLiteral => write!(f, "number"),
            TokenKind::Boundary => write!(f, "boundary"),
            TokenKind::Keyword => write!(f, "keyword"),
        }
    }
}

/// A token in source order.
///
/// Malformed literals (a string missing its closing quote, a bare word with a
/// stray quote) are still emitted, with `valid` set to false, so diagnostics
/// can point at them without a successful parse.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Token {
    pub kind: TokenKind,
    /// Source text, verbatim
    pub text: String,
    pub valid: bool,
    /// 0-based character offset of the first character
    pub position: usize,
}

impl Token {
    /// Create a well-formed token
    pub fn new(kind: TokenKind, text: impl Into<String>, position: usize) -> Self {
        Self {
            kind,
            text: text.into(),
            valid: true,
            position,
        }
    }

    /// Create a malformed token
    pub fn invalid(kind: TokenKind, text: impl Into<String>, position: usize) -> Self {
        Self {
            kind,
            text: text.into(),
            valid: false,
            position,
        }
    }

    /// Operator this token spells, for `Operator` and `Keyword` tokens
    pub fn operator(&self) -> Option<OperatorKind> {
        match self.kind {
            TokenKind::Operator => OperatorKind::from_symbol(&self.text),
            TokenKind::Keyword => OperatorKind::from_keyword(&self.text),
            _ => None,
        }
    }

    /// Returns true for tokens that stand for a value: identifiers and literals
    pub fn is_constant(&self) -> bool {
        matches!(
            self.kind,
            TokenKind::Identifier | TokenKind::StringLiteral | TokenKind::NumberLiteral
        )
    }

    pub fn is_open(&self) -> bool {
        self.kind == TokenKind::Boundary && self.text == "("
    }

    pub fn is_close(&self) -> bool {
        self.kind == TokenKind::Boundary && self.text == ")"
    }

    /// Length in characters
    pub fn len(&self) -> usize {
        self.text.chars().count()
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Offset just past the last character
    pub fn end(&self) -> usize {
        self.position + self.len()
    }
}
