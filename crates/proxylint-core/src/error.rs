//! Error types for the condition engine

use std::fmt;
use thiserror::Error;

/// What the parser found where it stopped
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Found {
    /// A token, by its source text
    Token(String),
    /// The input ran out
    EndOfInput,
}

impl fmt::Display for Found {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Found::Token(text) => write!(f, "Unrecognized token '{}'", text),
            Found::EndOfInput => write!(f, "Unexpected end of input"),
        }
    }
}

/// Grammar category the parser was expecting
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Expected {
    /// Start of a condition
    Expression,
    /// Any operand: variable, string or number
    Operand,
    /// Unquoted variable reference
    Variable,
    /// Quoted string
    StringLiteral,
    /// Number or variable on the right of a relational operator
    NumericOperand,
    /// Comparison operator after an operand
    ComparisonOperator,
    /// `and` / `or` between conditions
    LogicalOperator,
    /// `)` closing a group
    ClosingParenthesis,
    /// Groups and negations nested past the parser's depth limit
    ShallowerNesting,
}

impl fmt::Display for Expected {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expected::Expression => write!(f, "EXPRESSION"),
            Expected::Operand => write!(f, "OPERAND"),
            Expected::Variable => write!(f, "VARIABLE"),
            Expected::StringLiteral => write!(f, "STRING_LITERAL"),
            Expected::NumericOperand => write!(f, "NUMERIC_OPERAND"),
            Expected::ComparisonOperator => write!(f, "COMPARISON_OPERATOR"),
            Expected::LogicalOperator => write!(f, "LOGICAL_OPERATOR"),
            Expected::ClosingParenthesis => write!(f, "CLOSING_PARENTHESIS"),
            Expected::ShallowerNesting => write!(f, "SHALLOWER_NESTING"),
        }
    }
}

/// Unrecoverable tokenization failure
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{message} at position {position}")]
pub struct LexError {
    /// 0-based character offset
    pub position: usize,
    pub message: String,
}

impl LexError {
    pub fn new(position: usize, message: impl Into<String>) -> Self {
        Self {
            position,
            message: message.into(),
        }
    }
}

/// Positional parse failure, including operand shape and arity violations
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{found} at position {position}. Expecting: {expected}")]
pub struct ParseError {
    /// 0-based character offset
    pub position: usize,
    pub found: Found,
    pub expected: Expected,
}

impl ParseError {
    /// Error at an offending token
    pub fn unexpected(text: &str, position: usize, expected: Expected) -> Self {
        Self {
            position,
            found: Found::Token(text.to_string()),
            expected,
        }
    }

    /// Error at the end of the input
    pub fn end_of_input(position: usize, expected: Expected) -> Self {
        Self {
            position,
            found: Found::EndOfInput,
            expected,
        }
    }
}

/// Any failure of the parse entry point
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConditionError {
    #[error("Lex error: {0}")]
    Lex(#[from] LexError),

    #[error("{0}")]
    Parse(#[from] ParseError),
}

impl ConditionError {
    /// Offset the error is attributed to
    pub fn position(&self) -> usize {
        match self {
            ConditionError::Lex(e) => e.position,
            ConditionError::Parse(e) => e.position,
        }
    }
}

pub type Result<T> = std::result::Result<T, ConditionError>;
