//! Constraint builder handle.
//!
//! A constraint is a leaf: a key, one operator, one operand. Each operator
//! method records the operator and operand, then hands back a [`Resume`]
//! pointing at the enclosing expression (or at the constraint itself when it
//! has none) so the chain can carry on one level up.
//!
//! ```rust
//! use photonql::{Factory, Predicate};
//!
//! # fn main() -> photonql::error::Result<()> {
//! let doc = Factory::constraint("age").greater_than(25).evaluate();
//! assert_eq!(doc.as_constraint().unwrap().where_key, "age");
//!
//! let doc = Factory::expression()
//!     .constraint("firstName")
//!     .equal_to("dave")
//!     .and()?
//!     .constraint("lastName")
//!     .equal_to("church")
//!     .evaluate();
//! assert_eq!(doc.constraint_count(), 2);
//! # Ok(())
//! # }
//! ```

use super::evaluator::{Location, Predicate};
use super::expression::Expression;
use super::operand::Operand;
use super::operator::Operator;
use super::tree::{ConstraintId, PredicateId, SharedTree};
use crate::error::{Error, Result};
use tracing::{trace, warn};

/// Handle to a constraint node.
///
/// Cloning the handle does not clone the node; both clones edit the same
/// constraint.
#[derive(Clone)]
pub struct Constraint {
    tree: SharedTree,
    id: ConstraintId,
}

impl Constraint {
    pub(crate) fn from_parts(tree: SharedTree, id: ConstraintId) -> Self {
        Self { tree, id }
    }

    pub fn where_key(&self) -> String {
        self.tree.read().constraint(self.id).where_key.clone()
    }

    pub fn operator(&self) -> Option<Operator> {
        self.tree.read().constraint(self.id).operator
    }

    pub fn operand(&self) -> Option<Operand> {
        self.tree.read().constraint(self.id).operand.clone()
    }

    /// The expression this constraint belongs to, if any.
    pub fn parent(&self) -> Option<Expression> {
        let parent = self.tree.read().constraint(self.id).parent?;
        Some(Expression::from_parts(self.tree.clone(), parent))
    }

    pub fn equal_to(&self, operand: impl Into<Operand>) -> Resume {
        self.apply(Operator::EqualTo, operand.into())
    }

    pub fn not_equal_to(&self, operand: impl Into<Operand>) -> Resume {
        self.apply(Operator::NotEqualTo, operand.into())
    }

    pub fn greater_than(&self, operand: impl Into<Operand>) -> Resume {
        self.apply(Operator::GreaterThan, operand.into())
    }

    pub fn less_than(&self, operand: impl Into<Operand>) -> Resume {
        self.apply(Operator::LessThan, operand.into())
    }

    /// Key's value must be one of `operand` (expected to be an array).
    pub fn contained_in(&self, operand: impl Into<Operand>) -> Resume {
        self.apply(Operator::ContainedIn, operand.into())
    }

    pub fn contains(&self, operand: impl Into<Operand>) -> Resume {
        self.apply(Operator::Contains, operand.into())
    }

    /// Key's value must contain every element of `operand` (expected to be an array).
    pub fn contains_all(&self, operand: impl Into<Operand>) -> Resume {
        self.apply(Operator::ContainsAll, operand.into())
    }

    /// Sets operator and operand, overwriting any earlier pair.
    pub fn apply(&self, operator: Operator, operand: Operand) -> Resume {
        let parent = {
            let mut tree = self.tree.write();
            let node = tree.constraint_mut(self.id);
            trace!(where_key = %node.where_key, %operator, "Setting constraint operator");
            node.operator = Some(operator);
            node.operand = Some(operand);
            node.parent
        };

        match parent {
            Some(parent) => Resume::Expression(Expression::from_parts(self.tree.clone(), parent)),
            None => Resume::Constraint(self.clone()),
        }
    }
}

impl Predicate for Constraint {
    fn locate(&self) -> Location<'_> {
        Location {
            tree: &self.tree,
            id: PredicateId::Constraint(self.id),
        }
    }
}

impl std::fmt::Debug for Constraint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let tree = self.tree.read();
        let node = tree.constraint(self.id);
        f.debug_struct("Constraint")
            .field("tree", &tree.id())
            .field("where_key", &node.where_key)
            .field("operator", &node.operator)
            .field("operand", &node.operand)
            .finish()
    }
}

/// Where a fluent chain continues after a constraint's operator is set.
///
/// `Expression` when the constraint has an enclosing expression, otherwise
/// the constraint itself. The builder methods forward to the expression, so a
/// chain reads straight through without matching on the variant. On a
/// standalone constraint they fail with [`Error::InvalidState`].
#[derive(Debug, Clone)]
pub enum Resume {
    Expression(Expression),
    Constraint(Constraint),
}

impl Resume {
    pub fn is_expression(&self) -> bool {
        matches!(self, Resume::Expression(_))
    }

    pub fn into_expression(self) -> Option<Expression> {
        match self {
            Resume::Expression(expression) => Some(expression),
            Resume::Constraint(_) => None,
        }
    }

    pub fn into_constraint(self) -> Option<Constraint> {
        match self {
            Resume::Constraint(constraint) => Some(constraint),
            Resume::Expression(_) => None,
        }
    }

    /// Appends a constraint to the enclosing expression.
    pub fn constraint(&self, where_key: impl Into<String>) -> Result<Constraint> {
        Ok(self.enclosing("constraint()")?.constraint(where_key))
    }

    /// Appends a sub-expression to the enclosing expression.
    pub fn expression(&self) -> Result<Expression> {
        Ok(self.enclosing("expression()")?.expression())
    }

    /// Combine the enclosing expression's predicates with AND.
    pub fn and(&self) -> Result<Expression> {
        self.enclosing("and()")?.and()
    }

    /// Combine the enclosing expression's predicates with OR.
    pub fn or(&self) -> Result<Expression> {
        self.enclosing("or()")?.or()
    }

    fn enclosing(&self, call: &str) -> Result<&Expression> {
        match self {
            Resume::Expression(expression) => Ok(expression),
            Resume::Constraint(constraint) => {
                let where_key = constraint.where_key();
                warn!(%where_key, call, "Builder call on a standalone constraint");
                Err(Error::InvalidState(format!(
                    "cannot call {} on constraint '{}': it has no enclosing expression",
                    call, where_key
                )))
            }
        }
    }
}

impl Predicate for Resume {
    fn locate(&self) -> Location<'_> {
        match self {
            Resume::Expression(expression) => expression.locate(),
            Resume::Constraint(constraint) => constraint.locate(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::predicate::{ExpressionType, Factory};
    use serde_json::json;

    fn call(constraint: &Constraint, operator: Operator, operand: Operand) -> Resume {
        match operator {
            Operator::EqualTo => constraint.equal_to(operand),
            Operator::NotEqualTo => constraint.not_equal_to(operand),
            Operator::GreaterThan => constraint.greater_than(operand),
            Operator::LessThan => constraint.less_than(operand),
            Operator::ContainedIn => constraint.contained_in(operand),
            Operator::Contains => constraint.contains(operand),
            Operator::ContainsAll => constraint.contains_all(operand),
        }
    }

    #[test]
    fn test_each_operator_sets_operator_and_operand() {
        for operator in Operator::ALL {
            let constraint = Factory::constraint("field");
            let doc = call(&constraint, operator, Operand::from(7)).evaluate();
            assert_eq!(
                doc.to_value().unwrap(),
                json!({
                    "type": "constraint",
                    "constraint": {"whereKey": "field", "operator": operator.name(), "operand": 7}
                })
            );
        }
    }

    #[test]
    fn test_standalone_resumes_at_itself() {
        let constraint = Factory::constraint("age");
        let resume = constraint.greater_than(25);
        assert!(!resume.is_expression());
        assert_eq!(resume.into_constraint().unwrap().where_key(), "age");
    }

    #[test]
    fn test_child_resumes_at_parent() {
        let root = Factory::expression();
        let resume = root.constraint("name").equal_to("dave");
        assert!(resume.is_expression());
        assert!(resume.into_expression().unwrap().is_root());
    }

    #[test]
    fn test_chain_continues_through_resume() {
        let root = Factory::expression();
        root.constraint("a")
            .equal_to(1)
            .or()
            .unwrap()
            .constraint("b")
            .equal_to(2)
            .expression()
            .unwrap()
            .constraint("c")
            .less_than(3);

        assert_eq!(root.len(), 3);
        assert_eq!(root.combinator(), Some(ExpressionType::Or));
        assert_eq!(root.evaluate().depth(), 3);
    }

    #[test]
    fn test_resume_builder_calls_fail_on_standalone() {
        let resume = Factory::constraint("age").greater_than(25);
        assert!(matches!(resume.and(), Err(Error::InvalidState(_))));
        assert!(matches!(resume.or(), Err(Error::InvalidState(_))));
        assert!(matches!(resume.constraint("x"), Err(Error::InvalidState(_))));
        assert!(matches!(resume.expression(), Err(Error::InvalidState(_))));

        // Nothing was attached
        let doc = resume.evaluate();
        assert!(doc.is_constraint());
    }

    #[test]
    fn test_last_write_wins() {
        let constraint = Factory::constraint("status");
        constraint.equal_to("open");
        constraint.contained_in(vec!["closed", "merged"]);

        assert_eq!(constraint.operator(), Some(Operator::ContainedIn));
        assert_eq!(
            constraint.operand(),
            Some(Operand::from(vec!["closed", "merged"]))
        );
    }

    #[test]
    fn test_operand_shape_not_checked() {
        let doc = Factory::constraint("ids").contained_in(5).evaluate();
        let record = doc.as_constraint().unwrap();
        assert_eq!(record.operand, Some(Operand::Integer(5)));
    }

    #[test]
    fn test_parent_navigation() {
        let root = Factory::expression();
        let child = root.constraint("a");
        assert!(child.parent().unwrap().is_root());
        assert!(Factory::constraint("b").parent().is_none());
    }
}
