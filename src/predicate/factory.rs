//! Entry points for starting a predicate tree.

use super::constraint::Constraint;
use super::expression::Expression;
use super::tree::PredicateTree;
use tracing::trace;

/// Creates root nodes. Every tree starts here.
#[derive(Debug, Clone, Copy, Default)]
pub struct Factory;

impl Factory {
    /// A standalone constraint on `where_key`. The key is not validated.
    pub fn constraint(where_key: impl Into<String>) -> Constraint {
        let (tree, id) = PredicateTree::with_constraint_root(where_key.into());
        trace!(tree = %tree.read().id(), "Created constraint root");
        Constraint::from_parts(tree, id)
    }

    /// An empty root expression with no combinator.
    pub fn expression() -> Expression {
        let (tree, id) = PredicateTree::with_expression_root();
        trace!(tree = %tree.read().id(), "Created expression root");
        Expression::from_parts(tree, id)
    }
}
