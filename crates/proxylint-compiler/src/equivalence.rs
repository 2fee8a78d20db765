//! Condition equivalence
//!
//! Two conditions are equivalent when their canonical signatures are equal.
//! This is a syntactic check after normalization; it does not attempt full
//! boolean reasoning (absorption, distribution, constant folding).

use crate::optimizer::{Canonicalizer, NnfTransformer};
use proxylint_core::{CanonicalForm, Node, Result};

/// Normalizes conditions and compares their canonical signatures
#[derive(Debug, Clone, Copy, Default)]
pub struct EquivalenceChecker {
    nnf: NnfTransformer,
    canonicalizer: Canonicalizer,
}

impl EquivalenceChecker {
    pub fn new() -> Self {
        Self::default()
    }

    /// NNF followed by canonicalization
    pub fn canonical_form(&self, node: &Node) -> CanonicalForm {
        self.canonicalizer.canonicalize(&self.nnf.transform(node))
    }

    /// Parse `expression` and return its canonical signature
    pub fn signature_of(&self, expression: &str) -> Result<String> {
        let node = proxylint_parser::parse(expression)?;
        let form = self.canonical_form(&node);
        log::trace!("signature of '{}': {}", expression, form.signature);
        Ok(form.signature)
    }

    pub fn equivalent_nodes(&self, left: &Node, right: &Node) -> bool {
        self.canonical_form(left).signature == self.canonical_form(right).signature
    }

    /// Parse both expressions and compare them.
    ///
    /// A parse failure on either side is returned as the error rather than
    /// being reported as "not equivalent".
    pub fn equivalent(&self, left: &str, right: &str) -> Result<bool> {
        let left_signature = self.signature_of(left)?;
        let right_signature = self.signature_of(right)?;
        let equivalent = left_signature == right_signature;

        log::debug!(
            "'{}' {} '{}'",
            left,
            if equivalent { "is equivalent to" } else { "differs from" },
            right
        );

        Ok(equivalent)
    }
}
