//! Expression builder handle.
//!
//! An expression combines an ordered list of predicates with AND or OR.
//! `constraint()` and `expression()` append a child and return the child, so
//! it can be configured in place; `and()` / `or()` pick the combinator and
//! return the expression itself.
//!
//! # State
//!
//! | State | predicates | combinator |
//! |-------|------------|------------|
//! | empty | 0 | unset |
//! | has predicates | >= 1 | unset |
//! | typed | >= 1 | set |
//!
//! `and()` / `or()` are rejected in the empty state.
//!
//! # Example
//!
//! ```rust
//! use photonql::{Factory, Predicate};
//!
//! # fn main() -> photonql::error::Result<()> {
//! let root = Factory::expression();
//! root.constraint("firstName").equal_to("dave");
//! root.and()?.constraint("lastName").equal_to("church");
//!
//! let doc = root.evaluate();
//! assert_eq!(doc.constraint_count(), 2);
//! # Ok(())
//! # }
//! ```

use super::constraint::Constraint;
use super::evaluator::{Location, Predicate};
use super::operator::ExpressionType;
use super::tree::{ExpressionId, PredicateId, SharedTree};
use crate::error::{Error, Result};
use tracing::{debug, trace, warn};

/// Handle to an expression node.
#[derive(Clone)]
pub struct Expression {
    tree: SharedTree,
    id: ExpressionId,
}

impl Expression {
    pub(crate) fn from_parts(tree: SharedTree, id: ExpressionId) -> Self {
        Self { tree, id }
    }

    /// Appends a new constraint and returns it.
    pub fn constraint(&self, where_key: impl Into<String>) -> Constraint {
        let where_key = where_key.into();
        let mut tree = self.tree.write();
        trace!(tree = %tree.id(), %where_key, "Adding constraint");
        let id = tree.add_constraint(self.id, where_key);
        Constraint::from_parts(self.tree.clone(), id)
    }

    /// Appends a new, empty sub-expression and returns it.
    pub fn expression(&self) -> Expression {
        let mut tree = self.tree.write();
        trace!(tree = %tree.id(), "Adding sub-expression");
        let id = tree.add_expression(self.id);
        Expression::from_parts(self.tree.clone(), id)
    }

    /// Combine predicates with AND.
    pub fn and(&self) -> Result<Expression> {
        self.combine(ExpressionType::And)
    }

    /// Combine predicates with OR.
    pub fn or(&self) -> Result<Expression> {
        self.combine(ExpressionType::Or)
    }

    fn combine(&self, combinator: ExpressionType) -> Result<Expression> {
        let mut tree = self.tree.write();
        let tree_id = tree.id();
        let node = tree.expression_mut(self.id);

        if node.predicates.is_empty() {
            warn!(tree = %tree_id, %combinator, "Rejected combinator on empty expression");
            return Err(Error::InvalidState(format!(
                "cannot apply {} to an expression with no predicates",
                combinator.name().to_uppercase()
            )));
        }

        debug!(
            tree = %tree_id,
            %combinator,
            predicates = node.predicates.len(),
            "Setting combinator"
        );
        node.combinator = Some(combinator);
        Ok(self.clone())
    }

    /// The combinator chosen so far.
    pub fn combinator(&self) -> Option<ExpressionType> {
        self.tree.read().expression(self.id).combinator
    }

    /// Number of direct children.
    pub fn len(&self) -> usize {
        self.tree.read().expression(self.id).predicates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The enclosing expression, if any.
    pub fn parent(&self) -> Option<Expression> {
        let parent = self.tree.read().expression(self.id).parent?;
        Some(Expression::from_parts(self.tree.clone(), parent))
    }
}

impl Predicate for Expression {
    fn locate(&self) -> Location<'_> {
        Location {
            tree: &self.tree,
            id: PredicateId::Expression(self.id),
        }
    }
}

impl std::fmt::Debug for Expression {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let tree = self.tree.read();
        let node = tree.expression(self.id);
        f.debug_struct("Expression")
            .field("tree", &tree.id())
            .field("combinator", &node.combinator)
            .field("predicates", &node.predicates.len())
            .finish()
    }
}
