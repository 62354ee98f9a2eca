//! ANY / ALL quantifiers over the elements of a container
//!
//! Quantifiers appear either as aggregations (`any(rule)` applied to the
//! current object) or as markers inside a member path
//! (`member("items").all().key("id")`). Both end up in [`expand`]: every
//! element gets its own adapter whose origin is the element, so the rest of
//! the path is resolved relative to it.
//!
//! - `ALL` stops at the first `Fail`; an empty container yields
//!   [`EvaluationConfig::all_empty`](crate::foundation::EvaluationConfig).
//! - `ANY` stops at the first element accepted by the adapter's success
//!   predicate; an empty container is `Ignore`.

use std::ops::ControlFlow;

use crate::adapter::{Adapter, Quantified};
use crate::combinators::field::descend;
use crate::combinators::{AggregationKind, Node};
use crate::foundation::Status;
use crate::path::{self, Expansion, Member, Quantifier};

/// At least one element of the current object satisfies `node`.
pub fn any(node: Node) -> Node {
    Node::aggregate(AggregationKind::Any, vec![node])
}

/// Every element of the current object satisfies `node`.
pub fn all(node: Node) -> Node {
    Node::aggregate(AggregationKind::All, vec![node])
}

/// Routes a quantified call to `validate_any` / `validate_all`.
pub(crate) fn quantify(
    adapter: &Adapter<'_>,
    scope: &Member,
    expansion: Expansion<'_>,
    children: &[Node],
) -> Status {
    adapter.validate_elements(Quantified {
        container: scope,
        expansion,
        rest: &[],
        nodes: children,
    })
}

#[derive(Default)]
struct Tally {
    seen: bool,
    success: bool,
    fail: bool,
}

/// Default element expansion used by the innermost adapter link.
pub(crate) fn expand(adapter: &Adapter<'_>, call: &Quantified<'_>) -> Status {
    let Some(container) = adapter.resolve_member(call.container) else {
        return Status::Ignore;
    };
    let quantifier = call.expansion.quantifier();
    let display = call.expansion.display_key();
    let mut tally = Tally::default();

    let flow = path::expand(
        container.as_target(),
        call.expansion,
        adapter.properties(),
        adapter.config().max_tree_depth,
        &mut |suffix, element| {
            tally.seen = true;
            let scope = call.container.element(suffix, display.as_ref());
            let nested = adapter.with_origin(element, scope.path().len());
            let status = Status::and_fold(
                call.nodes
                    .iter()
                    .map(|node| descend(&nested, &scope, call.rest, node)),
            );
            match quantifier {
                Quantifier::All => match status {
                    Status::Fail => {
                        tally.fail = true;
                        ControlFlow::Break(())
                    }
                    Status::Success => {
                        tally.success = true;
                        ControlFlow::Continue(())
                    }
                    Status::Ignore => ControlFlow::Continue(()),
                },
                Quantifier::Any => {
                    if adapter.element_passes(&scope, status) {
                        tally.success = true;
                        return ControlFlow::Break(());
                    }
                    tally.fail |= status.is_fail();
                    ControlFlow::Continue(())
                }
            }
        },
    );

    if flow.is_none() {
        return Status::Ignore;
    }
    match quantifier {
        Quantifier::All if !tally.seen => adapter.config().all_empty,
        Quantifier::All if tally.fail => Status::Fail,
        Quantifier::Any if tally.success => Status::Success,
        Quantifier::Any if tally.fail => Status::Fail,
        Quantifier::All if tally.success => Status::Success,
        _ => Status::Ignore,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapter::Chain;
    use crate::foundation::EvaluationConfig;
    use crate::path::{member, this};
    use crate::property::PropertyRegistry;
    use serde_json::json;

    fn run(node: &Node, doc: &serde_json::Value) -> Status {
        let config = EvaluationConfig::default();
        let properties = PropertyRegistry::default();
        let chain = Chain::new(Vec::new(), &config, &properties);
        chain.adapter(doc).validate_node(node)
    }

    #[test]
    fn all_over_elements() {
        let doc = json!({"field1": [10, 20, 30, 40, 50]});
        assert_eq!(run(&member("field1").all().gte(10), &doc), Status::Success);
        assert_eq!(run(&member("field1").all().gte(20), &doc), Status::Fail);
    }

    #[test]
    fn empty_containers() {
        let doc = json!({"items": []});
        assert_eq!(run(&member("items").all().gt(1), &doc), Status::Success);
        assert_eq!(run(&member("items").any().gt(1), &doc), Status::Ignore);
    }

    #[test]
    fn any_aggregation_on_current_object() {
        let doc = json!([1, 5, 9]);
        assert_eq!(run(&any(this().gt(8)), &doc), Status::Success);
        assert_eq!(run(&any(this().gt(9)), &doc), Status::Fail);
        assert_eq!(run(&all(this().lt(10)), &doc), Status::Success);
    }

    #[test]
    fn scalars_are_not_expandable() {
        let doc = json!({"n": 3});
        assert_eq!(run(&member("n").all().gt(1), &doc), Status::Ignore);
    }
}
