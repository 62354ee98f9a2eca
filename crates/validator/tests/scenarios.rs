//! End-to-end scenarios with their exact report text.

use pretty_assertions::assert_eq;
use serde_json::json;
use verdict::prelude::*;

// ============================================================================
// SCALAR MEMBERS
// ============================================================================

#[test]
fn member_below_lower_bound() {
    let validator = Validator::new(member("field1").gte(10));
    let outcome = validator.validate(&json!({"field1": 1}));

    assert_eq!(outcome.status, Status::Fail);
    insta::assert_snapshot!(outcome.text, @"field1 must be greater than or equal to 10");
    assert_eq!(outcome.failed_members.iter().collect::<Vec<_>>(), ["field1"]);
}

#[test]
fn object_itself_outside_interval() {
    let validator = Validator::new(this().in_(interval(95, 100)));

    let outcome = validator.validate(&json!(90));
    assert_eq!(outcome.status, Status::Fail);
    insta::assert_snapshot!(outcome.text, @"must be in interval [95,100]");
    assert!(outcome.failed_members.is_empty());

    assert_eq!(validator.status(&json!(97)), Status::Success);
}

#[test]
fn object_itself_outside_range() {
    let validator = Validator::new(this().in_(range([1, 2, 3])));
    let outcome = validator.validate(&5);
    assert_eq!(outcome.status, Status::Fail);
    assert!(outcome.text.starts_with("must be in range ["));
}

// ============================================================================
// QUANTIFIERS
// ============================================================================

#[test]
fn all_elements_of_a_list() {
    let doc = json!({"field1": [10, 20, 30, 40, 50]});

    assert_eq!(
        Validator::new(member("field1").all().gte(10)).status(&doc),
        Status::Success
    );

    let outcome = Validator::new(member("field1").all().gte(20)).validate(&doc);
    assert_eq!(outcome.status, Status::Fail);
    insta::assert_snapshot!(outcome.text, @"element #0 of field1 must be greater than or equal to 20");
    assert_eq!(outcome.failed_members.iter().collect::<Vec<_>>(), ["field1.0"]);
}

#[test]
fn all_aggregation_bound_to_a_member() {
    let doc = json!({"field1": [10, 20, 30, 40, 50]});
    let passing = member("field1").apply(all(this().gte(10)));
    let failing = member("field1").apply(all(this().gte(20)));

    assert_eq!(Validator::new(passing).status(&doc), Status::Success);
    assert_eq!(
        Validator::new(failing).validate(&doc).text,
        "element #0 of field1 must be greater than or equal to 20"
    );
}

#[test]
fn nested_maps_through_all_marker() {
    let doc = json!({
        "level1": {
            "level2_1": {"level3": "value1"},
            "level2_2": {"level3": "val"}
        }
    });
    let validator = Validator::new(member("level1").all().key("level3").size().gte(5));

    let outcome = validator.validate(&doc);
    assert_eq!(outcome.status, Status::Fail);
    insta::assert_snapshot!(
        outcome.text,
        @"size of level3 of level2_2 of level1 must be greater than or equal to 5"
    );
    assert_eq!(
        outcome.failed_members.iter().collect::<Vec<_>>(),
        ["level1.level2_2.level3"]
    );
}

#[test]
fn empty_containers() {
    let doc = json!({"items": []});

    assert_eq!(
        Validator::new(member("items").all().gt(0)).status(&doc),
        Status::Success
    );
    assert_eq!(
        Validator::new(member("items").any().gt(0)).status(&doc),
        Status::Ignore
    );

    let strict_empty = EvaluationConfig::default().with_all_empty(Status::Fail);
    assert_eq!(
        Validator::new(member("items").all().gt(0))
            .with_config(strict_empty)
            .status(&doc),
        Status::Fail
    );
}

// ============================================================================
// EXISTENCE
// ============================================================================

#[test]
fn missing_member_in_abort_mode() {
    let validator =
        Validator::new(member("field2").eq(100)).with_config(EvaluationConfig::strict());

    let outcome = validator.validate(&json!({"field1": 1}));
    assert_eq!(outcome.status, Status::Fail);
    insta::assert_snapshot!(outcome.text, @"field2 must exist.");
    assert_eq!(outcome.failed_members.iter().collect::<Vec<_>>(), ["field2"]);
}

#[test]
fn missing_member_in_safe_mode_is_ignored() {
    let validator = Validator::new(member("field2").eq(100));
    let outcome = validator.validate(&json!({"field1": 1}));
    assert_eq!(outcome.status, Status::Ignore);
    assert_eq!(outcome.text, "");
    assert!(outcome.is_valid());
}

#[test]
fn explicit_existence_conditions() {
    let doc = json!({"a": 1});
    assert_eq!(Validator::new(member("a").exists()).status(&doc), Status::Success);
    assert_eq!(
        Validator::new(member("b").not_exists()).status(&doc),
        Status::Success
    );

    let outcome = Validator::new(member("b").exists()).validate(&doc);
    assert_eq!(outcome.status, Status::Fail);
    assert_eq!(outcome.text, "b must exist.");
}

// ============================================================================
// OPERANDS
// ============================================================================

#[test]
fn other_member_operand() {
    let validator = Validator::new(member("min").lte(member("max")));

    assert_eq!(validator.status(&json!({"min": 1, "max": 2})), Status::Success);

    let outcome = validator.validate(&json!({"min": 3, "max": 2}));
    assert_eq!(outcome.status, Status::Fail);
    assert_eq!(outcome.text, "min must be less than or equal to max");
}

#[test]
fn master_sample_operand() {
    let sample = Operand::sample(json!({"version": 3}));
    let validator = Validator::new(member("version").gte(sample));

    assert_eq!(validator.status(&json!({"version": 4})), Status::Success);

    let outcome = validator.validate(&json!({"version": 2}));
    assert_eq!(outcome.status, Status::Fail);
    assert_eq!(
        outcome.text,
        "version must be greater than or equal to version of sample"
    );
}

#[test]
fn string_operators() {
    let doc = json!({"name": "Verdict"});
    assert_eq!(
        Validator::new(member("name").starts_with("Ver")).status(&doc),
        Status::Success
    );
    assert_eq!(
        Validator::new(member("name").ilex(LexKind::Eq, "VERDICT")).status(&doc),
        Status::Success
    );
    assert_eq!(
        Validator::new(member("name").contains("xyz")).validate(&doc).text,
        "name must contain xyz"
    );
}

#[test]
fn incomparable_operands_are_ignored() {
    let validator = Validator::new(member("a").gt(10));
    assert_eq!(validator.status(&json!({"a": "text"})), Status::Ignore);
}
