//! Arena storage for a predicate tree under construction.
//!
//! Nodes never own each other. An expression lists its children by id and
//! every node records its parent as an `Option<ExpressionId>`, so ownership
//! flows one way: the arena owns every node, and the handles handed out to
//! callers share the arena.

use super::operand::Operand;
use super::operator::{ExpressionType, Operator};
use parking_lot::RwLock;
use std::sync::Arc;
use uuid::Uuid;

/// Arena shared by every handle into the same tree.
pub(crate) type SharedTree = Arc<RwLock<PredicateTree>>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) struct ConstraintId(usize);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) struct ExpressionId(usize);

/// Tagged reference to either kind of node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) enum PredicateId {
    Constraint(ConstraintId),
    Expression(ExpressionId),
}

#[derive(Debug, Clone)]
pub(crate) struct ConstraintNode {
    pub(crate) where_key: String,
    pub(crate) operator: Option<Operator>,
    pub(crate) operand: Option<Operand>,
    pub(crate) parent: Option<ExpressionId>,
}

#[derive(Debug, Clone, Default)]
pub(crate) struct ExpressionNode {
    pub(crate) combinator: Option<ExpressionType>,
    pub(crate) predicates: Vec<PredicateId>,
    pub(crate) parent: Option<ExpressionId>,
}

#[derive(Debug)]
pub(crate) struct PredicateTree {
    id: Uuid,
    constraints: Vec<ConstraintNode>,
    expressions: Vec<ExpressionNode>,
}

impl PredicateTree {
    fn new() -> Self {
        Self {
            id: Uuid::new_v4(),
            constraints: Vec::new(),
            expressions: Vec::new(),
        }
    }

    /// New tree whose root is a constraint.
    pub(crate) fn with_constraint_root(where_key: String) -> (SharedTree, ConstraintId) {
        let mut tree = Self::new();
        let id = tree.push_constraint(where_key, None);
        (Arc::new(RwLock::new(tree)), id)
    }

    /// New tree whose root is an empty expression.
    pub(crate) fn with_expression_root() -> (SharedTree, ExpressionId) {
        let mut tree = Self::new();
        let id = tree.push_expression(None);
        (Arc::new(RwLock::new(tree)), id)
    }

    pub(crate) fn id(&self) -> Uuid {
        self.id
    }

    pub(crate) fn constraint(&self, id: ConstraintId) -> &ConstraintNode {
        &self.constraints[id.0]
    }

    pub(crate) fn constraint_mut(&mut self, id: ConstraintId) -> &mut ConstraintNode {
        &mut self.constraints[id.0]
    }

    pub(crate) fn expression(&self, id: ExpressionId) -> &ExpressionNode {
        &self.expressions[id.0]
    }

    pub(crate) fn expression_mut(&mut self, id: ExpressionId) -> &mut ExpressionNode {
        &mut self.expressions[id.0]
    }

    /// Appends a constraint under `parent`.
    pub(crate) fn add_constraint(
        &mut self,
        parent: ExpressionId,
        where_key: String,
    ) -> ConstraintId {
        let id = self.push_constraint(where_key, Some(parent));
        self.expression_mut(parent)
            .predicates
            .push(PredicateId::Constraint(id));
        id
    }

    /// Appends an empty expression under `parent`.
    pub(crate) fn add_expression(&mut self, parent: ExpressionId) -> ExpressionId {
        let id = self.push_expression(Some(parent));
        self.expression_mut(parent)
            .predicates
            .push(PredicateId::Expression(id));
        id
    }

    pub(crate) fn parent_of(&self, id: PredicateId) -> Option<ExpressionId> {
        match id {
            PredicateId::Constraint(c) => self.constraint(c).parent,
            PredicateId::Expression(e) => self.expression(e).parent,
        }
    }

    /// Follows parent links up to the node that has none.
    pub(crate) fn root_of(&self, id: PredicateId) -> PredicateId {
        let mut current = id;
        while let Some(parent) = self.parent_of(current) {
            current = PredicateId::Expression(parent);
        }
        current
    }

    /// Distance from `id` to the root.
    pub(crate) fn depth_of(&self, id: PredicateId) -> usize {
        let mut depth = 0;
        let mut current = id;
        while let Some(parent) = self.parent_of(current) {
            current = PredicateId::Expression(parent);
            depth += 1;
        }
        depth
    }

    pub(crate) fn node_count(&self) -> usize {
        self.constraints.len() + self.expressions.len()
    }

    fn push_constraint(&mut self, where_key: String, parent: Option<ExpressionId>) -> ConstraintId {
        self.constraints.push(ConstraintNode {
            where_key,
            operator: None,
            operand: None,
            parent,
        });
        ConstraintId(self.constraints.len() - 1)
    }

    fn push_expression(&mut self, parent: Option<ExpressionId>) -> ExpressionId {
        self.expressions.push(ExpressionNode {
            parent,
            ..ExpressionNode::default()
        });
        ExpressionId(self.expressions.len() - 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_children_record_parent() {
        let (shared, root) = PredicateTree::with_expression_root();
        let mut tree = shared.write();

        let leaf = tree.add_constraint(root, "age".to_string());
        let nested = tree.add_expression(root);

        assert_eq!(tree.constraint(leaf).parent, Some(root));
        assert_eq!(tree.expression(nested).parent, Some(root));
        assert_eq!(
            tree.expression(root).predicates,
            vec![PredicateId::Constraint(leaf), PredicateId::Expression(nested)]
        );
        assert_eq!(tree.node_count(), 3);
    }

    #[test]
    fn test_root_of_walks_up() {
        let (shared, root) = PredicateTree::with_expression_root();
        let mut tree = shared.write();

        let mid = tree.add_expression(root);
        let inner = tree.add_expression(mid);
        let leaf = tree.add_constraint(inner, "name".to_string());

        let leaf = PredicateId::Constraint(leaf);
        assert_eq!(tree.root_of(leaf), PredicateId::Expression(root));
        assert_eq!(tree.depth_of(leaf), 3);
        assert_eq!(tree.depth_of(PredicateId::Expression(root)), 0);
    }

    #[test]
    fn test_standalone_constraint_is_its_own_root() {
        let (shared, id) = PredicateTree::with_constraint_root("email".to_string());
        let tree = shared.read();

        let id = PredicateId::Constraint(id);
        assert_eq!(tree.root_of(id), id);
        assert_eq!(tree.parent_of(id), None);
    }

    #[test]
    fn test_trees_get_distinct_ids() {
        let (a, _) = PredicateTree::with_expression_root();
        let (b, _) = PredicateTree::with_expression_root();
        assert_ne!(a.read().id(), b.read().id());
    }
}
