//! Canonical form of a condition

use super::node::Node;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A condition in canonical form together with its signature.
///
/// Two conditions are equivalent under the engine's rules exactly when their
/// signatures are equal. Only the canonicalizer builds these.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CanonicalForm {
    /// Flattened, operand-sorted tree
    pub node: Node,
    /// Deterministic key for `node`, e.g. `AND(Equals(a,"x"),Equals(b,"y"))`
    pub signature: String,
}

impl CanonicalForm {
    pub fn new(node: Node, signature: String) -> Self {
        Self { node, signature }
    }
}

impl fmt::Display for CanonicalForm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.signature)
    }
}
