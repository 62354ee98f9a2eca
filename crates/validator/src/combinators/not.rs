//! NOT combinator - logical negation of a rule node
//!
//! `not(Ignore)` stays `Ignore`. Several children are combined with AND
//! before negation.

use crate::adapter::Adapter;
use crate::combinators::{AggregationKind, Node, Operand, evaluate};
use crate::foundation::Status;
use crate::path::{Member, Path};

/// Negates `node`.
pub fn not(node: Node) -> Node {
    Node::aggregate(AggregationKind::Not, vec![node])
}

pub(crate) fn fold(adapter: &Adapter<'_>, scope: &Member, children: &[Node]) -> Status {
    !Status::and_fold(children.iter().map(|child| evaluate(adapter, scope, child)))
}

/// Members a subtree reads, split by how they are resolved.
#[derive(Debug, Default)]
pub(crate) struct References {
    /// Members of the current object (left-hand sides).
    pub(crate) members: Vec<Member>,
    /// Other-member operands, resolved from the operand origin.
    pub(crate) operands: Vec<Member>,
}

/// Members that must exist for `nodes` to be evaluated in `scope`.
///
/// Paths are cut at the first expansion key; the elements behind a marker
/// are checked when the expansion runs. Existence leaves and the root are
/// never listed.
pub(crate) fn referenced_members(scope: &Member, nodes: &[Node]) -> References {
    let mut out = References::default();
    for node in nodes {
        collect(scope, node, &mut out);
    }
    out
}

fn push(out: &mut Vec<Member>, member: Member) {
    if !member.is_root() && !out.iter().any(|m| m.path() == member.path()) {
        out.push(member);
    }
}

fn collect(scope: &Member, node: &Node, out: &mut References) {
    match node {
        Node::Condition { operand, .. } => {
            push(&mut out.members, scope.clone());
            collect_operand(operand, out);
        }
        Node::Property {
            property, operand, ..
        } => {
            push(&mut out.members, scope.clone().property(property.clone()));
            collect_operand(operand, out);
        }
        Node::Exists(_) => {}
        Node::Bind { member, node } => {
            let keys = member.path().keys();
            match member.path().first_expansion() {
                Some(at) => push(&mut out.members, scope.extend(&keys[..at])),
                None => collect(&scope.extend(keys), node, out),
            }
        }
        Node::Aggregation(aggregation) => match aggregation.kind {
            AggregationKind::Any | AggregationKind::All | AggregationKind::Tree(_) => {
                push(&mut out.members, scope.clone());
            }
            AggregationKind::And | AggregationKind::Or | AggregationKind::Not => {
                for child in &aggregation.children {
                    collect(scope, child, out);
                }
            }
        },
        Node::Explained { node, .. } => collect(scope, node, out),
    }
}

fn collect_operand(operand: &Operand, out: &mut References) {
    if let Operand::Member(other) = operand {
        let keys = other.path().keys();
        let cut = other.path().first_expansion().unwrap_or(keys.len());
        push(&mut out.operands, Member::from(Path::from(&keys[..cut])));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::combinators::{and, any};
    use crate::path::{member, this};

    fn dotted(members: &[Member]) -> Vec<String> {
        members.iter().map(Member::dotted).collect()
    }

    #[test]
    fn collects_leaf_members_once() {
        let rule = and([
            member("a").gt(1),
            member("a").lt(5),
            member("b").size().gt(member("c")),
        ]);
        let refs = referenced_members(&this(), std::slice::from_ref(&rule));
        assert_eq!(dotted(&refs.members), ["a", "b.size"]);
        assert_eq!(dotted(&refs.operands), ["c"]);
    }

    #[test]
    fn stops_at_expansions_and_skips_exists() {
        let rule = and([
            member("items").all().key("id").gt(0),
            member("x").exists(),
            member("y").apply(any(this().gt(1))),
        ]);
        let refs = referenced_members(&this(), std::slice::from_ref(&rule));
        assert_eq!(dotted(&refs.members), ["items", "y"]);
        assert!(refs.operands.is_empty());
    }
}
