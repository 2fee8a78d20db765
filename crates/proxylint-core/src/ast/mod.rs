//! Abstract Syntax Tree (AST) definitions for proxy conditions
//!
//! This module contains:
//! - The closed operator set
//! - Condition nodes
//! - The canonical form produced for equivalence checks

pub mod canonical;
pub mod node;
pub mod operator;

pub use canonical::CanonicalForm;
pub use node::Node;
pub use operator::{Arity, OperatorKind};
