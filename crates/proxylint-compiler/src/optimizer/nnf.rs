//! Negation normal form
//!
//! Pushes every `NOT` down until it sits directly above a leaf or a
//! comparison:
//! - `NOT(NOT(x))` becomes `x`
//! - `NOT(AND(a, b, ...))` becomes `OR(NOT(a), NOT(b), ...)`
//! - `NOT(OR(a, b, ...))` becomes `AND(NOT(a), NOT(b), ...)`
//! - `NotEquals(a, b)` becomes `NOT(Equals(a, b))`, so `NOT` is the only
//!   negation form left
//!
//! Header names are case-insensitive on the wire, so the name segment of a
//! `<ident>.header.<name>` left operand is upper-cased. This applies to the
//! left operand of every comparison, relational ones included, not only the
//! string comparisons; right operands and values are never folded.
//!
//! The input tree is never modified; a new tree is returned.

use proxylint_core::{Node, OperatorKind};

/// Negation normal form transformer
#[derive(Debug, Clone, Copy, Default)]
pub struct NnfTransformer;

impl NnfTransformer {
    pub fn new() -> Self {
        Self
    }

    /// Rewrite a condition into negation normal form
    pub fn transform(&self, node: &Node) -> Node {
        let (operator, operands) = match node {
            Node::Leaf(_) => return node.clone(),
            Node::Operation { operator, operands } => (*operator, operands),
        };

        match operator {
            OperatorKind::Not => match operands.as_slice() {
                [operand] => self.negate(operand),
                _ => Node::operation(operator, self.transform_all(operands)),
            },
            OperatorKind::And | OperatorKind::Or => {
                Node::operation(operator, self.transform_all(operands))
            }
            OperatorKind::NotEquals => {
                Node::not(self.comparison(OperatorKind::Equals, operands))
            }
            OperatorKind::Equals
            | OperatorKind::EqualsCaseInsensitive
            | OperatorKind::StartsWith
            | OperatorKind::Matches
            | OperatorKind::MatchesPath
            | OperatorKind::JavaRegex
            | OperatorKind::GreaterThan
            | OperatorKind::GreaterThanOrEquals
            | OperatorKind::LesserThan
            | OperatorKind::LesserThanOrEquals => self.comparison(operator, operands),
        }
    }

    /// Negation normal form of `NOT(node)`
    fn negate(&self, node: &Node) -> Node {
        let (operator, operands) = match node {
            Node::Leaf(_) => return Node::not(node.clone()),
            Node::Operation { operator, operands } => (*operator, operands),
        };

        match operator {
            OperatorKind::Not => match operands.as_slice() {
                [operand] => self.transform(operand),
                _ => Node::not(self.transform(node)),
            },
            OperatorKind::And => Node::or(operands.iter().map(|o| self.negate(o)).collect()),
            OperatorKind::Or => Node::and(operands.iter().map(|o| self.negate(o)).collect()),
            OperatorKind::NotEquals => self.comparison(OperatorKind::Equals, operands),
            OperatorKind::Equals
            | OperatorKind::EqualsCaseInsensitive
            | OperatorKind::StartsWith
            | OperatorKind::Matches
            | OperatorKind::MatchesPath
            | OperatorKind::JavaRegex
            | OperatorKind::GreaterThan
            | OperatorKind::GreaterThanOrEquals
            | OperatorKind::LesserThan
            | OperatorKind::LesserThanOrEquals => Node::not(self.comparison(operator, operands)),
        }
    }

    fn transform_all(&self, operands: &[Node]) -> Vec<Node> {
        operands.iter().map(|o| self.transform(o)).collect()
    }

    /// Rebuild a comparison with its left header name folded
    fn comparison(&self, operator: OperatorKind, operands: &[Node]) -> Node {
        let operands = operands
            .iter()
            .enumerate()
            .map(|(i, operand)| match operand {
                Node::Leaf(text) if i == 0 => Node::Leaf(fold_header_name(text)),
                _ => self.transform(operand),
            })
            .collect();
        Node::operation(operator, operands)
    }
}

/// Upper-case the `<name>` segment of `<ident>.header.<name>[.<suffix>]`
pub fn fold_header_name(reference: &str) -> String {
    let mut segments = reference.splitn(3, '.');
    let (Some(prefix), Some("header"), Some(rest)) =
        (segments.next(), segments.next(), segments.next())
    else {
        return reference.to_string();
    };
    if prefix.is_empty() || rest.is_empty() {
        return reference.to_string();
    }

    let (name, suffix) = match rest.find('.') {
        Some(dot) => rest.split_at(dot),
        None => (rest, ""),
    };
    let folded = name.to_ascii_uppercase();
    if folded != name {
        log::trace!("Folded header name '{}' to '{}'", name, folded);
    }

    format!("{}.header.{}{}", prefix, folded, suffix)
}
