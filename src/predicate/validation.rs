//! Opt-in document validation.
//!
//! Building and evaluating never reject malformed input: an empty key, a
//! missing operator or a scalar passed to `containedIn` all reach the
//! document unchanged. Callers that want those caught before a document is
//! sent can run a [`Validator`] over it.

use super::document::{ConstraintRecord, Document, ExpressionRecord};
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Which checks a [`Validator`] runs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidationRules {
    /// Validate documents before they are emitted.
    pub enabled: bool,
    /// `containedIn` / `containsAll` need an array, every other operator a non-array.
    pub operand_shapes: bool,
    /// Constraints must carry both an operator and an operand.
    pub require_operator: bool,
    /// Accept expressions with no predicates.
    pub allow_empty_expressions: bool,
}

impl Default for ValidationRules {
    fn default() -> Self {
        Self {
            enabled: false,
            operand_shapes: true,
            require_operator: true,
            allow_empty_expressions: true,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct Validator {
    rules: ValidationRules,
}

impl Validator {
    pub fn new(rules: ValidationRules) -> Self {
        Self { rules }
    }

    pub fn rules(&self) -> &ValidationRules {
        &self.rules
    }

    /// Fails with the first violation found, in document order.
    pub fn validate(&self, document: &Document) -> Result<()> {
        match self.violations(document).into_iter().next() {
            Some(violation) => Err(Error::Validation(violation)),
            None => Ok(()),
        }
    }

    /// Every violation in the document, in document order.
    pub fn violations(&self, document: &Document) -> Vec<String> {
        let mut found = Vec::new();
        self.walk(document, "$", &mut found);
        debug!(violations = found.len(), "Validated predicate document");
        found
    }

    fn walk(&self, document: &Document, path: &str, found: &mut Vec<String>) {
        match document {
            Document::Constraint { constraint } => self.check_constraint(constraint, path, found),
            Document::Expression { expression } => {
                self.check_expression(expression, path, found);
                for (i, child) in expression.predicates.iter().enumerate() {
                    self.walk(child, &format!("{}.predicates[{}]", path, i), found);
                }
            }
        }
    }

    fn check_constraint(&self, record: &ConstraintRecord, path: &str, found: &mut Vec<String>) {
        if record.where_key.is_empty() {
            found.push(format!("{}: constraint has an empty whereKey", path));
        }

        let (operator, operand) = match (&record.operator, &record.operand) {
            (Some(operator), Some(operand)) => (operator, operand),
            _ => {
                if self.rules.require_operator {
                    found.push(format!(
                        "{}: constraint on '{}' has no operator or operand",
                        path, record.where_key
                    ));
                }
                return;
            }
        };

        if self.rules.operand_shapes && operator.expects_array() != operand.is_array() {
            let expected = if operator.expects_array() { "an array" } else { "a scalar" };
            found.push(format!(
                "{}: {} on '{}' expects {} operand, got {}",
                path,
                operator,
                record.where_key,
                expected,
                operand.kind()
            ));
        }
    }

    fn check_expression(&self, record: &ExpressionRecord, path: &str, found: &mut Vec<String>) {
        if record.predicates.is_empty() {
            if !self.rules.allow_empty_expressions {
                found.push(format!("{}: expression has no predicates", path));
            }
        } else if record.combinator.is_none() {
            found.push(format!("{}: expression has predicates but no combinator", path));
        }
    }
}
