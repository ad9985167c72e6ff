//! Constraint operators and expression combinators.
//!
//! The serde spellings are the wire spellings the query backend expects:
//! operators are camelCase (`equalTo`, `containsAll`, ...) and combinators are
//! lowercase (`and`, `or`).

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Operator applied by a constraint to its key and operand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Operator {
    ContainedIn,
    Contains,
    ContainsAll,
    EqualTo,
    NotEqualTo,
    GreaterThan,
    LessThan,
}

impl Operator {
    /// Every operator, in wire-protocol order.
    pub const ALL: [Operator; 7] = [
        Operator::ContainedIn,
        Operator::Contains,
        Operator::ContainsAll,
        Operator::EqualTo,
        Operator::NotEqualTo,
        Operator::GreaterThan,
        Operator::LessThan,
    ];

    /// Returns the wire spelling of the operator.
    ///
    /// # Example
    ///
    /// ```rust
    /// use photonql::Operator;
    ///
    /// assert_eq!(Operator::ContainsAll.name(), "containsAll");
    /// ```
    pub fn name(&self) -> &'static str {
        match self {
            Operator::ContainedIn => "containedIn",
            Operator::Contains => "contains",
            Operator::ContainsAll => "containsAll",
            Operator::EqualTo => "equalTo",
            Operator::NotEqualTo => "notEqualTo",
            Operator::GreaterThan => "greaterThan",
            Operator::LessThan => "lessThan",
        }
    }

    /// Looks up an operator by its wire spelling.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|op| op.name() == name)
    }

    /// Whether the operand is expected to be an array.
    pub fn expects_array(&self) -> bool {
        matches!(self, Operator::ContainedIn | Operator::ContainsAll)
    }
}

impl std::fmt::Display for Operator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for Operator {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_name(s).ok_or_else(|| Error::InvalidArgument(format!("unknown operator: {}", s)))
    }
}

/// How an expression combines its predicates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExpressionType {
    And,
    Or,
}

impl ExpressionType {
    pub fn name(&self) -> &'static str {
        match self {
            ExpressionType::And => "and",
            ExpressionType::Or => "or",
        }
    }
}

impl std::fmt::Display for ExpressionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for ExpressionType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "and" => Ok(ExpressionType::And),
            "or" => Ok(ExpressionType::Or),
            _ => Err(Error::InvalidArgument(format!(
                "unknown expression type: {}",
                s
            ))),
        }
    }
}
