//! Condition AST nodes

use super::operator::OperatorKind;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Condition AST node
///
/// Operand arity always matches the operator: `NOT` has one operand,
/// comparisons have two and `AND`/`OR` have two or more. The parser is the
/// only producer of nodes from text and enforces this while building.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Node {
    /// Variable reference or literal, kept as its source text
    /// (`request.header.X-Api-Key`, `"GET"`, `404`)
    Leaf(String),

    /// Operator applied to an ordered list of operands
    Operation {
        operator: OperatorKind,
        operands: Vec<Node>,
    },
}

impl Node {
    /// Create a leaf node
    pub fn leaf(text: impl Into<String>) -> Self {
        Node::Leaf(text.into())
    }

    /// Create an operation node
    pub fn operation(operator: OperatorKind, operands: Vec<Node>) -> Self {
        Node::Operation { operator, operands }
    }

    /// Create a binary comparison node
    pub fn binary(left: Node, operator: OperatorKind, right: Node) -> Self {
        Node::operation(operator, vec![left, right])
    }

    /// Create a negation node
    pub fn not(operand: Node) -> Self {
        Node::operation(OperatorKind::Not, vec![operand])
    }

    /// Create a conjunction node
    pub fn and(operands: Vec<Node>) -> Self {
        Node::operation(OperatorKind::And, operands)
    }

    /// Create a disjunction node
    pub fn or(operands: Vec<Node>) -> Self {
        Node::operation(OperatorKind::Or, operands)
    }

    /// Operator of this node, `None` for leaves
    pub fn operator(&self) -> Option<OperatorKind> {
        match self {
            Node::Leaf(_) => None,
            Node::Operation { operator, .. } => Some(*operator),
        }
    }

    /// Operands of this node, empty for leaves
    pub fn operands(&self) -> &[Node] {
        match self {
            Node::Leaf(_) => &[],
            Node::Operation { operands, .. } => operands,
        }
    }

    /// Source text of a leaf
    pub fn as_leaf(&self) -> Option<&str> {
        match self {
            Node::Leaf(text) => Some(text),
            Node::Operation { .. } => None,
        }
    }

    pub fn is_leaf(&self) -> bool {
        matches!(self, Node::Leaf(_))
    }

    /// Number of nodes in this tree, including the root
    pub fn size(&self) -> usize {
        1 + self.operands().iter().map(Node::size).sum::<usize>()
    }

    /// Longest root-to-leaf path, a lone leaf has depth 1
    pub fn depth(&self) -> usize {
        1 + self.operands().iter().map(Node::depth).max().unwrap_or(0)
    }

    /// Collect the text of every leaf, left to right
    pub fn leaves(&self) -> Vec<&str> {
        let mut result = Vec::new();
        self.collect_leaves(&mut result);
        result
    }

    fn collect_leaves<'a>(&'a self, result: &mut Vec<&'a str>) {
        match self {
            Node::Leaf(text) => result.push(text),
            Node::Operation { operands, .. } => {
                for operand in operands {
                    operand.collect_leaves(result);
                }
            }
        }
    }

    fn fmt_grouped(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Node::Leaf(_) => write!(f, "{}", self),
            Node::Operation { .. } => write!(f, "({})", self),
        }
    }
}

/// Renders the node back to condition syntax. Nested operations are always
/// parenthesized, so the output parses back to the same tree.
impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Node::Leaf(text) => f.write_str(text),
            Node::Operation { operator, operands } => match operator {
                OperatorKind::Not => {
                    f.write_str("not ")?;
                    match operands.first() {
                        Some(operand) => operand.fmt_grouped(f),
                        None => Ok(()),
                    }
                }
                _ => {
                    for (i, operand) in operands.iter().enumerate() {
                        if i > 0 {
                            write!(f, " {} ", operator.symbol())?;
                        }
                        operand.fmt_grouped(f)?;
                    }
                    Ok(())
                }
            },
        }
    }
}
