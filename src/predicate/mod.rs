//! Predicate builder and canonical documents.
//!
//! This module lets callers grow a boolean predicate tree through chained
//! method calls and turn it into a canonical, parent-free [`Document`]:
//!
//! - **Factory**: entry points, `Factory::constraint(key)` and `Factory::expression()`
//! - **Expression**: AND/OR over an ordered list of child predicates
//! - **Constraint**: a key, an operator and an operand
//! - **Evaluator**: finds the root and folds the tree into a `Document`
//! - **Validator**: optional checks on an evaluated `Document`
//!
//! # Architecture
//!
//! The builder and its output are two separate types:
//!
//! 1. **Builder layer** (`tree.rs`, `expression.rs`, `constraint.rs`): nodes in a
//!    shared arena, children listed by id, parents recorded as plain ids
//! 2. **Document layer** (`document.rs`): owned records with no back-references
//! 3. **Evaluation** (`evaluator.rs`): read-only walk from builder to document
//!
//! # Example
//!
//! Building `firstName = "dave" AND lastName = "church"`:
//!
//! ```rust
//! use photonql::{Factory, Predicate};
//! use serde_json::json;
//!
//! # fn main() -> photonql::error::Result<()> {
//! let root = Factory::expression();
//! let first = root.constraint("firstName");
//! first.equal_to("dave");
//! root.and()?.constraint("lastName").equal_to("church");
//!
//! // Any node evaluates the whole tree.
//! assert_eq!(first.evaluate(), root.evaluate());
//! assert_eq!(
//!     root.evaluate().to_value()?["expression"]["type"],
//!     json!("and")
//! );
//! # Ok(())
//! # }
//! ```

pub mod constraint;
pub mod document;
pub mod evaluator;
pub mod expression;
pub mod factory;
pub mod operand;
pub mod operator;
mod tree;
pub mod validation;

pub use constraint::{Constraint, Resume};
pub use document::{ConstraintRecord, Document, ExpressionRecord};
pub use evaluator::{Evaluator, Location, Predicate};
pub use expression::Expression;
pub use factory::Factory;
pub use operand::Operand;
pub use operator::{ExpressionType, Operator};
pub use validation::{ValidationRules, Validator};
