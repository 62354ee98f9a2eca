//! OR combinator - logical disjunction of rule nodes
//!
//! Evaluation stops at the first `Success`. If no child succeeds the result
//! is `Fail` when at least one child failed and `Ignore` otherwise.

use crate::adapter::Adapter;
use crate::combinators::{AggregationKind, Node, evaluate};
use crate::foundation::Status;
use crate::path::Member;

/// Disjunction of `children`. An empty disjunction is `Success`.
pub fn or(children: impl IntoIterator<Item = Node>) -> Node {
    Node::aggregate(AggregationKind::Or, children.into_iter().collect())
}

pub(crate) fn fold(adapter: &Adapter<'_>, scope: &Member, children: &[Node]) -> Status {
    Status::or_fold(children.iter().map(|child| evaluate(adapter, scope, child)))
}
