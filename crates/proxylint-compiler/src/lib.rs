//! Condition normalization and equivalence
//!
//! Turns parsed conditions into negation normal form, canonicalizes them and
//! decides whether two conditions are equivalent.

pub mod equivalence;
pub mod optimizer;

pub use equivalence::EquivalenceChecker;
pub use optimizer::{fold_header_name, Canonicalizer, NnfTransformer};

use proxylint_core::{CanonicalForm, Node, Result};

/// Negation normal form of `node`
pub fn to_nnf(node: &Node) -> Node {
    NnfTransformer::new().transform(node)
}

/// Canonical form of an NNF tree
pub fn canonicalize(node: &Node) -> CanonicalForm {
    Canonicalizer::new().canonicalize(node)
}

pub fn equivalent_nodes(left: &Node, right: &Node) -> bool {
    EquivalenceChecker::new().equivalent_nodes(left, right)
}

/// Parse both expressions and decide equivalence
pub fn equivalent(left: &str, right: &str) -> Result<bool> {
    EquivalenceChecker::new().equivalent(left, right)
}
