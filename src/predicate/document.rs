//! Canonical predicate document.
//!
//! A `Document` is what evaluation produces: a parent-free tagged union of
//! constraint and expression records, ready to be encoded and sent to a query
//! backend. It owns all of its data, so nothing done to the builder tree after
//! evaluation can reach it.
//!
//! # Wire Format
//!
//! ```json
//! {
//!   "type": "expression",
//!   "expression": {
//!     "type": "and",
//!     "predicates": [
//!       {"type": "constraint",
//!        "constraint": {"whereKey": "firstName", "operator": "equalTo", "operand": "dave"}},
//!       {"type": "constraint",
//!        "constraint": {"whereKey": "lastName", "operator": "equalTo", "operand": "church"}}
//!     ]
//!   }
//! }
//! ```
//!
//! Unset operators, operands and combinators are written as `null`.

use super::operand::Operand;
use super::operator::{ExpressionType, Operator};
use crate::error::Result;
use serde::Serialize;

/// A single evaluated predicate.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Document {
    Constraint { constraint: ConstraintRecord },
    Expression { expression: ExpressionRecord },
}

/// Body of a `constraint` document.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConstraintRecord {
    pub where_key: String,
    pub operator: Option<Operator>,
    pub operand: Option<Operand>,
}

/// Body of an `expression` document.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExpressionRecord {
    #[serde(rename = "type")]
    pub combinator: Option<ExpressionType>,
    pub predicates: Vec<Document>,
}

impl Document {
    pub fn is_constraint(&self) -> bool {
        matches!(self, Document::Constraint { .. })
    }

    pub fn is_expression(&self) -> bool {
        matches!(self, Document::Expression { .. })
    }

    pub fn as_constraint(&self) -> Option<&ConstraintRecord> {
        match self {
            Document::Constraint { constraint } => Some(constraint),
            Document::Expression { .. } => None,
        }
    }

    pub fn as_expression(&self) -> Option<&ExpressionRecord> {
        match self {
            Document::Expression { expression } => Some(expression),
            Document::Constraint { .. } => None,
        }
    }

    /// Nesting depth; a lone constraint has depth 1.
    pub fn depth(&self) -> usize {
        match self {
            Document::Constraint { .. } => 1,
            Document::Expression { expression } => {
                1 + expression
                    .predicates
                    .iter()
                    .map(Document::depth)
                    .max()
                    .unwrap_or(0)
            }
        }
    }

    /// Number of constraint leaves.
    pub fn constraint_count(&self) -> usize {
        match self {
            Document::Constraint { .. } => 1,
            Document::Expression { expression } => expression
                .predicates
                .iter()
                .map(Document::constraint_count)
                .sum(),
        }
    }

    /// Compact JSON encoding.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Indented JSON encoding.
    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn to_value(&self) -> Result<serde_json::Value> {
        Ok(serde_json::to_value(self)?)
    }
}

impl std::fmt::Display for ConstraintRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.where_key)?;
        match &self.operator {
            Some(op) => write!(f, " {}", op)?,
            None => write!(f, " ?")?,
        }
        match &self.operand {
            Some(operand) => write!(f, " {}", operand),
            None => write!(f, " ?"),
        }
    }
}

impl std::fmt::Display for ExpressionRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let separator = match &self.combinator {
            Some(combinator) => format!(" {} ", combinator),
            None => " ? ".to_string(),
        };
        write!(f, "(")?;
        for (i, predicate) in self.predicates.iter().enumerate() {
            if i > 0 {
                write!(f, "{}", separator)?;
            }
            write!(f, "{}", predicate)?;
        }
        write!(f, ")")
    }
}

impl std::fmt::Display for Document {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Document::Constraint { constraint } => write!(f, "{}", constraint),
            Document::Expression { expression } => write!(f, "{}", expression),
        }
    }
}
