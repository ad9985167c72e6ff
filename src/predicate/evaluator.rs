//! Predicate evaluation.
//!
//! Evaluation turns a builder tree into a [`Document`]. It always starts from
//! the root: whichever node the caller holds, the evaluator follows parent
//! links upward first, so every node in a tree evaluates to the same document.
//!
//! # Architecture
//!
//! 1. **Root finding**: walk `parent` links from the entry node (O(depth))
//! 2. **Dispatch**: match on the node's tag, constraint or expression
//! 3. **Fold**: expressions evaluate their children in insertion order
//!
//! The evaluator holds no state and never mutates the tree; it only takes a
//! read lock for the duration of one evaluation.

use super::document::{ConstraintRecord, Document, ExpressionRecord};
use super::tree::{ConstraintNode, ExpressionNode, PredicateId, PredicateTree, SharedTree};
use tracing::{debug, instrument};

/// Where a predicate lives: its tree and its id inside that tree.
///
/// Handed out by [`Predicate::locate`]; only this crate can build one.
#[derive(Debug, Clone, Copy)]
pub struct Location<'a> {
    pub(crate) tree: &'a SharedTree,
    pub(crate) id: PredicateId,
}

/// Any node of a predicate tree.
///
/// Implemented by [`Expression`](super::Expression),
/// [`Constraint`](super::Constraint) and [`Resume`](super::Resume).
pub trait Predicate {
    /// Locates this node inside its tree.
    fn locate(&self) -> Location<'_>;

    /// Evaluates the whole tree containing this node.
    fn evaluate(&self) -> Document {
        Evaluator.evaluate(self)
    }

    /// True when this node has no parent.
    fn is_root(&self) -> bool {
        let location = self.locate();
        let tree = location.tree.read();
        tree.parent_of(location.id).is_none()
    }
}

/// Stateless tree-to-document converter.
#[derive(Debug, Clone, Copy, Default)]
pub struct Evaluator;

impl Evaluator {
    /// Evaluates the tree that contains `node`, starting from its root.
    #[instrument(skip_all)]
    pub fn evaluate<P: Predicate + ?Sized>(&self, node: &P) -> Document {
        let location = node.locate();
        let tree = location.tree.read();
        let root = tree.root_of(location.id);

        debug!(
            tree = %tree.id(),
            nodes = tree.node_count(),
            entry_depth = tree.depth_of(location.id),
            "Evaluating predicate tree"
        );

        self.evaluate_recursively(&tree, root)
    }

    /// Converts `id` and everything below it.
    fn evaluate_recursively(&self, tree: &PredicateTree, id: PredicateId) -> Document {
        match id {
            PredicateId::Constraint(c) => self.evaluate_constraint(tree.constraint(c)),
            PredicateId::Expression(e) => self.evaluate_expression(tree, tree.expression(e)),
        }
    }

    fn evaluate_constraint(&self, node: &ConstraintNode) -> Document {
        Document::Constraint {
            constraint: ConstraintRecord {
                where_key: node.where_key.clone(),
                operator: node.operator,
                operand: node.operand.clone(),
            },
        }
    }

    fn evaluate_expression(&self, tree: &PredicateTree, node: &ExpressionNode) -> Document {
        let predicates = node
            .predicates
            .iter()
            .map(|child| self.evaluate_recursively(tree, *child))
            .collect();

        Document::Expression {
            expression: ExpressionRecord {
                combinator: node.combinator,
                predicates,
            },
        }
    }
}
