//! proxylint core - types shared by the condition engine
//!
//! This crate provides the fundamental types used across proxylint:
//! - Tokens produced by the lexer
//! - Condition AST nodes and the closed operator set
//! - Canonical forms used for equivalence checks
//! - Diagnostics handed to rule plugins
//! - Error types

pub mod ast;
pub mod diagnostic;
pub mod error;
pub mod token;

// Re-export commonly used types
pub use ast::{Arity, CanonicalForm, Node, OperatorKind};
pub use diagnostic::{Diagnostic, Severity, SourcePosition};
pub use error::{ConditionError, Expected, Found, LexError, ParseError, Result};
pub use token::{Token, TokenKind};
