//! Tree walks, tuples, records and variadic members.

use pretty_assertions::assert_eq;
use serde_json::json;
use verdict::prelude::*;
use verdict::record;

fn org() -> serde_json::Value {
    json!({
        "name": "root", "size": 3,
        "children": [
            {"name": "a", "size": 1, "children": []},
            {"name": "b", "size": 7, "children": [
                {"name": "c", "size": 12, "children": []}
            ]}
        ]
    })
}

// ============================================================================
// TREES
// ============================================================================

#[test]
fn every_node_of_a_tree() {
    let loose = tree(TreeSpec::new(Quantifier::All, "children"), member("size").lt(20));
    assert_eq!(Validator::new(loose).status(&org()), Status::Success);

    let tight = tree(TreeSpec::new(Quantifier::All, "children"), member("size").lt(10));
    let outcome = Validator::new(tight).validate(&org());
    assert_eq!(outcome.status, Status::Fail);
    insta::assert_snapshot!(
        outcome.text,
        @"size of element #0 of children of element #1 of children must be less than 10"
    );
    assert_eq!(
        outcome.failed_members.iter().collect::<Vec<_>>(),
        ["children.1.children.0.size"]
    );
}

#[test]
fn some_node_of_a_tree() {
    let found = tree(TreeSpec::new(Quantifier::Any, "children"), member("name").eq("c"));
    assert_eq!(Validator::new(found).status(&org()), Status::Success);

    let missing = tree(TreeSpec::new(Quantifier::Any, "children"), member("name").eq("zzz"));
    let outcome = Validator::new(missing).validate(&org());
    assert_eq!(outcome.status, Status::Fail);
    assert_eq!(outcome.text, "name of at least one node must be equal to zzz");
}

#[test]
fn tree_depth_limits() {
    let rule = tree(
        TreeSpec::new(Quantifier::Any, "children").with_max_depth(1),
        member("name").eq("c"),
    );
    assert_eq!(Validator::new(rule).status(&org()), Status::Fail);

    let unbounded = tree(TreeSpec::new(Quantifier::Any, "children"), member("name").eq("c"));
    let shallow = EvaluationConfig::default().with_max_tree_depth(0);
    assert_eq!(
        Validator::new(unbounded).with_config(shallow).status(&org()),
        Status::Fail
    );
}

#[test]
fn tree_marker_inside_a_path() {
    let rule = this().tree(Quantifier::All, "children").key("name").ne("");
    assert_eq!(Validator::new(rule).status(&org()), Status::Success);
}

// ============================================================================
// TUPLES & RECORDS
// ============================================================================

#[test]
fn tuple_elements_by_index() {
    let object = (1i64, "abc", vec![1, 2, 3]);

    let outcome = Validator::new(member(0usize).gt(5)).validate(&object);
    assert_eq!(outcome.status, Status::Fail);
    assert_eq!(outcome.text, "element #0 must be greater than 5");

    assert_eq!(
        Validator::new(member(2usize).size().eq(3)).status(&object),
        Status::Success
    );
    assert_eq!(
        Validator::new(member(1usize).starts_with("ab")).status(&object),
        Status::Success
    );
}

struct Line {
    qty: i64,
    sku: String,
}

struct Order {
    id: u64,
    lines: Vec<Line>,
}

record!(Line { qty, sku });
record!(Order { id, lines });

#[test]
fn record_fields_and_nested_lists() {
    let order = Order {
        id: 7,
        lines: vec![
            Line {
                qty: 2,
                sku: "A-1".into(),
            },
            Line {
                qty: 0,
                sku: "B-2".into(),
            },
        ],
    };
    let validator = Validator::new(and([
        member("id").gt(0),
        member("lines").all().key("sku").ne(""),
        member("lines").all().key("qty").gt(0),
    ]));

    let outcome = validator.validate(&order);
    assert_eq!(outcome.status, Status::Fail);
    assert_eq!(outcome.text, "qty of element #1 of lines must be greater than 0");
    assert_eq!(
        outcome.failed_members.iter().collect::<Vec<_>>(),
        ["lines.1.qty"]
    );
}

// ============================================================================
// VARIADIC MEMBERS
// ============================================================================

#[test]
fn variadic_count_comes_from_a_property() {
    let properties = PropertyRegistry::default().with("used", |_| Some(Value::Int(3)));
    let doc = json!({"slots": [5, 6, 7, -1]});

    let counted = member("slots")
        .variadic(Quantifier::All, Property::new("used"))
        .gt(0);
    assert_eq!(
        Validator::new(counted)
            .with_properties(properties.clone())
            .status(&doc),
        Status::Success
    );

    assert_eq!(
        Validator::new(member("slots").all().gt(0))
            .with_properties(properties)
            .status(&doc),
        Status::Fail
    );
}
