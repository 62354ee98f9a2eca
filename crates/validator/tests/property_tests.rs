//! Property-based checks of status algebra and quantifier agreement.

use proptest::prelude::*;
use serde_json::json;
use verdict::prelude::*;

fn status() -> impl Strategy<Value = Status> {
    prop_oneof![
        Just(Status::Success),
        Just(Status::Fail),
        Just(Status::Ignore),
    ]
}

proptest! {
    #[test]
    fn negation_is_an_involution(s in status()) {
        prop_assert_eq!(s.negate().negate(), s);
    }

    #[test]
    fn folds_are_dual(statuses in prop::collection::vec(status(), 0..8)) {
        let and = Status::and_fold(statuses.iter().copied());
        let or = Status::or_fold(statuses.iter().map(|s| s.negate()));
        if statuses.is_empty() {
            prop_assert_eq!(and, Status::Success);
        } else {
            prop_assert_eq!(and.negate(), or);
        }
    }

    #[test]
    fn fail_dominates_conjunction(statuses in prop::collection::vec(status(), 1..8)) {
        let folded = Status::and_fold(statuses.iter().copied());
        prop_assert_eq!(folded.is_fail(), statuses.contains(&Status::Fail));
    }

    #[test]
    fn all_and_any_agree_with_iterators(
        values in prop::collection::vec(-50i64..50, 1..12),
        bound in -50i64..50,
    ) {
        let doc = json!({ "items": values });

        let every = Validator::new(member("items").all().gte(bound)).status(&doc);
        prop_assert_eq!(every, Status::from(values.iter().all(|v| *v >= bound)));

        let some = Validator::new(member("items").any().gte(bound)).status(&doc);
        prop_assert_eq!(some, Status::from(values.iter().any(|v| *v >= bound)));
    }

    #[test]
    fn any_records_every_element_tried_before_a_match(
        values in prop::collection::vec(-5i64..5, 0..8),
    ) {
        let doc = json!({ "items": values });
        let outcome = Validator::new(member("items").any().gt(0)).validate(&doc);
        let tried = values.iter().position(|v| *v > 0).unwrap_or(values.len());
        let expected: Vec<String> = (0..tried).map(|i| format!("items.{i}")).collect();

        prop_assert_eq!(outcome.failed_members.into_iter().collect::<Vec<_>>(), expected);
        prop_assert_eq!(outcome.text.is_empty(), !outcome.status.is_fail());
    }

    #[test]
    fn prevalidation_matches_validation_after_write(candidate in -100i64..100) {
        let validator = Validator::new(and([
            member("min").lte(member("max")),
            member("max").lte(50),
        ]));
        let doc = json!({"min": 0, "max": 10});
        let written = json!({"min": 0, "max": candidate});

        let predicted = validator.prevalidate(&doc, &member("max"), &json!(candidate));
        prop_assert_eq!(predicted.status, validator.status(&written));
    }
}
