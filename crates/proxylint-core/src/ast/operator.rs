//! Operators of the proxy condition language

use serde::{Deserialize, Serialize};
use std::fmt;

/// Every operator a condition can contain.
///
/// The set is closed: the parser, NNF transformer and canonicalizer all match
/// on it exhaustively, so adding a variant is a compile-time checked change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum OperatorKind {
    // Logical operators
    /// Conjunction (`and`, `&&`)
    And,
    /// Disjunction (`or`, `||`)
    Or,
    /// Negation (`not`, `!`)
    Not,

    // Equality operators
    /// `=`, `==`, `Equals`, `Is`
    Equals,
    /// `!=`, `NotEquals`, `IsNot`
    NotEquals,
    /// `:=`, `EqualsCaseInsensitive`
    EqualsCaseInsensitive,

    // String match operators
    /// `=|`, `StartsWith`
    StartsWith,
    /// `~`, `Matches`, `Like`
    Matches,
    /// `~/`, `MatchesPath`, `LikePath`
    MatchesPath,
    /// `~~`, `JavaRegex`, `MatchesRegex`
    JavaRegex,

    // Relational operators
    /// `>`, `GreaterThan`
    GreaterThan,
    /// `>=`, `GreaterThanOrEquals`
    GreaterThanOrEquals,
    /// `<`, `LesserThan`
    LesserThan,
    /// `<=`, `LesserThanOrEquals`
    LesserThanOrEquals,
}

/// Number of operands an operator takes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Arity {
    /// Exactly one operand (`NOT`)
    Unary,
    /// Exactly two operands (all comparisons)
    Binary,
    /// Two or more operands (`AND`, `OR`)
    Variadic,
}

/// Symbolic spellings, longest first so the lexer can do longest-match scanning.
pub const SYMBOLS: &[(&str, OperatorKind)] = &[
    ("&&", OperatorKind::And),
    ("||", OperatorKind::Or),
    ("!=", OperatorKind::NotEquals),
    ("==", OperatorKind::Equals),
    ("=|", OperatorKind::StartsWith),
    (":=", OperatorKind::EqualsCaseInsensitive),
    (">=", OperatorKind::GreaterThanOrEquals),
    ("<=", OperatorKind::LesserThanOrEquals),
    ("~~", OperatorKind::JavaRegex),
    ("~/", OperatorKind::MatchesPath),
    ("=", OperatorKind::Equals),
    (">", OperatorKind::GreaterThan),
    ("<", OperatorKind::LesserThan),
    ("~", OperatorKind::Matches),
    ("!", OperatorKind::Not),
];

/// Word spellings, matched case-insensitively.
const KEYWORDS: &[(&str, OperatorKind)] = &[
    ("and", OperatorKind::And),
    ("or", OperatorKind::Or),
    ("not", OperatorKind::Not),
    ("equals", OperatorKind::Equals),
    ("is", OperatorKind::Equals),
    ("notequals", OperatorKind::NotEquals),
    ("isnot", OperatorKind::NotEquals),
    ("equalscaseinsensitive", OperatorKind::EqualsCaseInsensitive),
    ("startswith", OperatorKind::StartsWith),
    ("matches", OperatorKind::Matches),
    ("like", OperatorKind::Matches),
    ("matchespath", OperatorKind::MatchesPath),
    ("likepath", OperatorKind::MatchesPath),
    ("javaregex", OperatorKind::JavaRegex),
    ("matchesregex", OperatorKind::JavaRegex),
    ("greaterthan", OperatorKind::GreaterThan),
    ("greaterthanorequals", OperatorKind::GreaterThanOrEquals),
    ("lesserthan", OperatorKind::LesserThan),
    ("lesserthanorequals", OperatorKind::LesserThanOrEquals),
];

impl OperatorKind {
    /// Look up a symbolic spelling (`=`, `~/`, `&&`, ...)
    pub fn from_symbol(text: &str) -> Option<Self> {
        SYMBOLS
            .iter()
            .find(|(symbol, _)| *symbol == text)
            .map(|(_, op)| *op)
    }

    /// Look up a word spelling (`and`, `StartsWith`, ...), ignoring case
    pub fn from_keyword(text: &str) -> Option<Self> {
        let lower = text.to_ascii_lowercase();
        KEYWORDS
            .iter()
            .find(|(word, _)| *word == lower)
            .map(|(_, op)| *op)
    }

    /// Look up any spelling, symbolic or word
    pub fn lookup(text: &str) -> Option<Self> {
        Self::from_symbol(text).or_else(|| Self::from_keyword(text))
    }

    /// Name used in canonical signatures
    pub fn name(&self) -> &'static str {
        match self {
            OperatorKind::And => "AND",
            OperatorKind::Or => "OR",
            OperatorKind::Not => "NOT",
            OperatorKind::Equals => "Equals",
            OperatorKind::NotEquals => "NotEquals",
            OperatorKind::EqualsCaseInsensitive => "EqualsCaseInsensitive",
            OperatorKind::StartsWith => "StartsWith",
            OperatorKind::Matches => "Matches",
            OperatorKind::MatchesPath => "MatchesPath",
            OperatorKind::JavaRegex => "JavaRegex",
            OperatorKind::GreaterThan => "GreaterThan",
            OperatorKind::GreaterThanOrEquals => "GreaterThanOrEquals",
            OperatorKind::LesserThan => "LesserThan",
            OperatorKind::LesserThanOrEquals => "LesserThanOrEquals",
        }
    }

    /// Spelling used when rendering a node back to condition text
    pub fn symbol(&self) -> &'static str {
        match self {
            OperatorKind::And => "and",
            OperatorKind::Or => "or",
            OperatorKind::Not => "not",
            OperatorKind::Equals => "=",
            OperatorKind::NotEquals => "!=",
            OperatorKind::EqualsCaseInsensitive => ":=",
            OperatorKind::StartsWith => "=|",
            OperatorKind::Matches => "~",
            OperatorKind::MatchesPath => "~/",
            OperatorKind::JavaRegex => "~~",
            OperatorKind::GreaterThan => ">",
            OperatorKind::GreaterThanOrEquals => ">=",
            OperatorKind::LesserThan => "<",
            OperatorKind::LesserThanOrEquals => "<=",
        }
    }

    pub fn arity(&self) -> Arity {
        match self {
            OperatorKind::Not => Arity::Unary,
            OperatorKind::And | OperatorKind::Or => Arity::Variadic,
            _ => Arity::Binary,
        }
    }

    /// Returns true for `AND`, `OR` and `NOT`
    pub fn is_logical(&self) -> bool {
        matches!(self, OperatorKind::And | OperatorKind::Or | OperatorKind::Not)
    }

    /// Returns true for every binary comparison
    pub fn is_comparison(&self) -> bool {
        !self.is_logical()
    }

    /// Returns true for `=`, `!=` and `:=`
    pub fn is_equality(&self) -> bool {
        matches!(
            self,
            OperatorKind::Equals | OperatorKind::NotEquals | OperatorKind::EqualsCaseInsensitive
        )
    }

    /// Returns true for the operators that match a variable against a quoted pattern
    pub fn is_string_match(&self) -> bool {
        matches!(
            self,
            OperatorKind::StartsWith
                | OperatorKind::Matches
                | OperatorKind::MatchesPath
                | OperatorKind::JavaRegex
        )
    }

    /// Returns true for `>`, `>=`, `<` and `<=`
    pub fn is_relational(&self) -> bool {
        matches!(
            self,
            OperatorKind::GreaterThan
                | OperatorKind::GreaterThanOrEquals
                | OperatorKind::LesserThan
                | OperatorKind::LesserThanOrEquals
        )
    }

    /// Returns true when operand order and nesting carry no meaning
    pub fn is_associative(&self) -> bool {
        matches!(self, OperatorKind::And | OperatorKind::Or)
    }
}

impl fmt::Display for OperatorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
