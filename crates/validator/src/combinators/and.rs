//! AND combinator - logical conjunction of rule nodes
//!
//! The children are evaluated in order and evaluation stops at the first
//! `Fail`. Ignored children do not affect the result unless every child is
//! ignored, in which case the whole conjunction is ignored.
//!
//! # Examples
//!
//! ```rust,ignore
//! use verdict::prelude::*;
//!
//! let rule = and([member("field1").gte(10), member("field2").lt(100)]);
//! ```

use crate::adapter::Adapter;
use crate::combinators::{AggregationKind, Node, evaluate};
use crate::foundation::Status;
use crate::path::Member;

/// Conjunction of `children`. An empty conjunction is `Success`.
pub fn and(children: impl IntoIterator<Item = Node>) -> Node {
    Node::aggregate(AggregationKind::And, children.into_iter().collect())
}

/// Default conjunction: lazy, short-circuits on `Fail`.
pub(crate) fn fold(adapter: &Adapter<'_>, scope: &Member, children: &[Node]) -> Status {
    Status::and_fold(children.iter().map(|child| evaluate(adapter, scope, child)))
}
