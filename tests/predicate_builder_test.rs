//! End-to-end tests for building and evaluating predicate trees

use photonql::error::Error;
use photonql::{Factory, Operand, Predicate};
use serde_json::json;

#[test]
fn test_standalone_constraint() {
    // constraint('age').greaterThan(25).evaluate()
    let doc = Factory::constraint("age").greater_than(25).evaluate();

    assert_eq!(
        doc.to_value().unwrap(),
        json!({
            "type": "constraint",
            "constraint": {"whereKey": "age", "operator": "greaterThan", "operand": 25}
        })
    );
}

#[test]
fn test_two_constraints_combined_with_and() {
    let root = Factory::expression();
    let first = root.constraint("firstName");
    first.equal_to("dave");
    root.and().unwrap();
    let last = root.constraint("lastName");
    last.equal_to("church");

    let expected = json!({
        "type": "expression",
        "expression": {
            "type": "and",
            "predicates": [
                {"type": "constraint",
                 "constraint": {"whereKey": "firstName", "operator": "equalTo", "operand": "dave"}},
                {"type": "constraint",
                 "constraint": {"whereKey": "lastName", "operator": "equalTo", "operand": "church"}}
            ]
        }
    });

    // Same document from every node in the tree
    assert_eq!(root.evaluate().to_value().unwrap(), expected);
    assert_eq!(first.evaluate().to_value().unwrap(), expected);
    assert_eq!(last.evaluate().to_value().unwrap(), expected);
}

#[test]
fn test_fluent_chain_resumes_at_parent() {
    let root = Factory::expression();
    let doc = root
        .constraint("firstName")
        .equal_to("dave")
        .and()
        .unwrap()
        .constraint("lastName")
        .equal_to("church")
        .evaluate();

    assert_eq!(root.len(), 2);
    assert_eq!(doc, root.evaluate());
    assert_eq!(
        doc.to_value().unwrap()["expression"]["predicates"][1]["constraint"]["whereKey"],
        json!("lastName")
    );
}

#[test]
fn test_nested_expression_preserves_order() {
    let root = Factory::expression();
    root.constraint("status").equal_to("active");
    root.or().unwrap();

    let nested = root.expression();
    nested.constraint("age").greater_than(18);
    nested.and().unwrap();
    nested.constraint("country").contained_in(vec!["DE", "FR"]);

    let expected = json!({
        "type": "expression",
        "expression": {
            "type": "or",
            "predicates": [
                {"type": "constraint",
                 "constraint": {"whereKey": "status", "operator": "equalTo", "operand": "active"}},
                {"type": "expression",
                 "expression": {
                     "type": "and",
                     "predicates": [
                         {"type": "constraint",
                          "constraint": {
                              "whereKey": "age", "operator": "greaterThan", "operand": 18
                          }},
                         {"type": "constraint",
                          "constraint": {
                              "whereKey": "country", "operator": "containedIn",
                              "operand": ["DE", "FR"]
                          }}
                     ]
                 }}
            ]
        }
    });

    let leaf = nested.constraint("tier");
    leaf.less_than(3);
    let mut with_leaf = expected.clone();
    with_leaf["expression"]["predicates"][1]["expression"]["predicates"]
        .as_array_mut()
        .unwrap()
        .push(json!({
            "type": "constraint",
            "constraint": {"whereKey": "tier", "operator": "lessThan", "operand": 3}
        }));

    assert_eq!(leaf.evaluate().to_value().unwrap(), with_leaf);
    assert_eq!(nested.evaluate(), root.evaluate());
}

#[test]
fn test_combinator_on_empty_expression_is_rejected() {
    let root = Factory::expression();

    assert!(matches!(root.and(), Err(Error::InvalidState(_))));
    assert!(matches!(root.or(), Err(Error::InvalidState(_))));
    assert_eq!(
        root.evaluate().to_value().unwrap(),
        json!({"type": "expression", "expression": {"type": null, "predicates": []}})
    );
}

#[test]
fn test_evaluated_document_is_isolated_from_later_edits() {
    let root = Factory::expression();
    let age = root.constraint("age");
    age.greater_than(21);
    root.and().unwrap();

    let before = root.evaluate();
    let snapshot = before.to_value().unwrap();

    age.less_than(65);
    root.or().unwrap();
    root.constraint("name").equal_to("x");

    assert_eq!(before.to_value().unwrap(), snapshot);
    assert_ne!(root.evaluate(), before);
    assert_eq!(root.evaluate().constraint_count(), 2);
}

#[test]
fn test_unset_operator_serializes_as_null() {
    let root = Factory::expression();
    root.constraint("pending");

    let value = root.evaluate().to_value().unwrap();
    assert_eq!(
        value["expression"]["predicates"][0]["constraint"],
        json!({"whereKey": "pending", "operator": null, "operand": null})
    );
}

#[test]
fn test_operand_passes_through_verbatim() {
    let operand = Operand::from(json!({"nested": {"deep": [1, "two", null]}}));
    let doc = Factory::constraint("meta").equal_to(operand.clone()).evaluate();
    assert_eq!(doc.as_constraint().unwrap().operand, Some(operand));
}

#[test]
fn test_handles_keep_tree_alive() {
    let leaf = {
        let root = Factory::expression();
        let leaf = root.constraint("k");
        leaf.equal_to(1);
        root.and().unwrap();
        leaf
    };

    // The root handle is gone but the tree is still reachable from the leaf.
    let doc = leaf.evaluate();
    assert!(doc.is_expression());
    assert!(leaf.parent().unwrap().is_root());
}

#[test]
fn test_concurrent_evaluation_of_stable_tree() {
    let root = Factory::expression();
    for i in 0..10 {
        root.constraint(format!("field{}", i)).equal_to(i);
    }
    root.and().unwrap();
    let expected = root.evaluate();

    let handles: Vec<_> = (0..4)
        .map(|_| {
            let root = root.clone();
            std::thread::spawn(move || root.evaluate())
        })
        .collect();

    for handle in handles {
        assert_eq!(handle.join().unwrap(), expected);
    }
}

#[test]
fn test_display_rendering() {
    let root = Factory::expression();
    root.constraint("a").equal_to(1);
    root.and().unwrap();
    root.constraint("b").contains("x");

    assert_eq!(root.evaluate().to_string(), r#"(a equalTo 1 and b contains "x")"#);
}
