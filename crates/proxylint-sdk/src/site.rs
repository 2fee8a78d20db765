//! Condition sites

use proxylint_core::SourcePosition;
use serde::{Deserialize, Serialize};

/// One `<Condition>` found in a proxy bundle.
///
/// `scope` groups sibling conditions that are evaluated against each other,
/// e.g. the conditional flows of one proxy endpoint or the fault rules of one
/// target endpoint. `owner` names the element the condition guards and is
/// carried through to findings so callers can attach them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConditionSite {
    pub scope: String,
    pub owner: String,
    pub expression: String,
    /// Position of the `<Condition>` element in its source file
    pub position: SourcePosition,
}

impl ConditionSite {
    pub fn new(
        scope: impl Into<String>,
        owner: impl Into<String>,
        expression: impl Into<String>,
        position: SourcePosition,
    ) -> Self {
        Self {
            scope: scope.into(),
            owner: owner.into(),
            expression: expression.into(),
            position,
        }
    }
}
