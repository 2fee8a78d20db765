//! Canonicalizer
//!
//! Builds the canonical form of an NNF condition bottom-up:
//! - a leaf's signature is its text, with `\`, `,`, `(` and `)` escaped by a
//!   backslash so leaf text can never mimic signature structure
//! - `AND`/`OR` operands are flattened into their parent when they use the
//!   same operator, then sorted by signature
//! - every other operator keeps its operand order
//! - a node's signature is `<operator>(<sig1>,<sig2>,...)`

use proxylint_core::{CanonicalForm, Node, OperatorKind};

/// Canonicalizer for NNF conditions
#[derive(Debug, Clone, Copy, Default)]
pub struct Canonicalizer;

impl Canonicalizer {
    pub fn new() -> Self {
        Self
    }

    /// Canonicalize a condition already in negation normal form
    pub fn canonicalize(&self, node: &Node) -> CanonicalForm {
        let (operator, operands) = match node {
            Node::Leaf(text) => return CanonicalForm::new(node.clone(), leaf_signature(text)),
            Node::Operation { operator, operands } => (*operator, operands),
        };

        let children = match operator {
            OperatorKind::And | OperatorKind::Or => {
                let mut flat = Vec::with_capacity(operands.len());
                for operand in operands {
                    self.collect_flat(operator, operand, &mut flat);
                }
                flat.sort_by(|a, b| a.signature.cmp(&b.signature));
                flat
            }
            OperatorKind::Not
            | OperatorKind::Equals
            | OperatorKind::NotEquals
            | OperatorKind::EqualsCaseInsensitive
            | OperatorKind::StartsWith
            | OperatorKind::Matches
            | OperatorKind::MatchesPath
            | OperatorKind::JavaRegex
            | OperatorKind::GreaterThan
            | OperatorKind::GreaterThanOrEquals
            | OperatorKind::LesserThan
            | OperatorKind::LesserThanOrEquals => {
                operands.iter().map(|o| self.canonicalize(o)).collect()
            }
        };

        let signature = format!(
            "{}({})",
            operator.name(),
            children
                .iter()
                .map(|c| c.signature.as_str())
                .collect::<Vec<_>>()
                .join(",")
        );
        let node = Node::operation(operator, children.into_iter().map(|c| c.node).collect());

        CanonicalForm::new(node, signature)
    }

    /// Splice operands of nested same-operator nodes into `out`
    fn collect_flat(&self, operator: OperatorKind, node: &Node, out: &mut Vec<CanonicalForm>) {
        match node {
            Node::Operation {
                operator: inner,
                operands,
            } if *inner == operator => {
                for operand in operands {
                    self.collect_flat(operator, operand, out);
                }
            }
            _ => out.push(self.canonicalize(node)),
        }
    }
}

/// Leaf text with signature delimiters escaped
fn leaf_signature(text: &str) -> String {
    let mut signature = String::with_capacity(text.len());
    for ch in text.chars() {
        if matches!(ch, '\\' | ',' | '(' | ')') {
            signature.push('\\');
        }
        signature.push(ch);
    }
    signature
}
