//! Tree aggregation
//!
//! Visits the current object, then its descendants reached through the
//! children key of a [`TreeSpec`] in pre-order. `Quantifier::All` requires
//! every node to pass, `Quantifier::Any` at least one. Cycles are not
//! detected; use [`TreeSpec::with_max_depth`] or
//! [`EvaluationConfig::max_tree_depth`](crate::foundation::EvaluationConfig)
//! for self-referencing data.

use crate::adapter::Adapter;
use crate::combinators::{AggregationKind, Node, each};
use crate::foundation::Status;
use crate::path::{Expansion, Member, TreeSpec};

pub fn tree(spec: TreeSpec, node: Node) -> Node {
    Node::aggregate(AggregationKind::Tree(spec), vec![node])
}

pub(crate) fn walk(
    adapter: &Adapter<'_>,
    scope: &Member,
    spec: &TreeSpec,
    children: &[Node],
) -> Status {
    each::quantify(adapter, scope, Expansion::Tree(spec), children)
}
