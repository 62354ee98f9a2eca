//! Rule trees and the aggregation engine
//!
//! A rule is an immutable [`Node`] tree built once and evaluated against any
//! number of objects. Evaluation is a pure recursive walk: every leaf and
//! every aggregation is handed to the [`Adapter`], whose layer chain decides
//! what actually happens (existence checks, reporting, prevalidation).
//!
//! # Combinators
//!
//! - [`and`] / [`or`] / [`not`]: logical aggregation with short-circuiting
//! - [`any`] / [`all`]: quantifiers over the elements of the current object
//! - [`tree`]: the current object and its descendants
//! - [`explain`]: replaces nested report text by a canned message
//! - member bindings: [`Member::gte`](crate::path::Member::gte) and friends
//!
//! # Examples
//!
//! ```rust,ignore
//! use verdict::prelude::*;
//!
//! let rule = and([
//!     member("field1").gte(10),
//!     member("field2").all().lt(100),
//!     not(member("field3").empty().flag(true)),
//! ]);
//! ```

use std::borrow::Cow;
use std::fmt;
use std::sync::Arc;

use crate::adapter::Adapter;
use crate::foundation::{Interval, Status, Target, Value};
use crate::operators::OperatorRef;
use crate::path::{Expansion, Member, TreeSpec};
use crate::property::Property;

pub mod and;
pub mod each;
pub mod field;
pub mod message;
pub mod not;
pub mod or;
pub mod tree;

pub use and::and;
pub use each::{all, any};
pub use message::explain;
pub use not::not;
pub use or::or;
pub use tree::tree;

// ============================================================================
// OPERAND
// ============================================================================

/// Right-hand side of a comparison.
#[derive(Clone)]
pub enum Operand {
    /// A literal stored in the rule.
    Value(Value),
    /// Another member of the same object.
    Member(Member),
    /// The same member of a reference object.
    Sample(Arc<dyn Target + Send + Sync>),
}

impl Operand {
    /// Compare with the same member of `sample`.
    pub fn sample<T: Target + Send + Sync + 'static>(sample: T) -> Self {
        Self::Sample(Arc::new(sample))
    }
}

impl fmt::Debug for Operand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Value(v) => f.debug_tuple("Value").field(v).finish(),
            Self::Member(m) => f.debug_tuple("Member").field(&m.dotted()).finish(),
            Self::Sample(_) => f.write_str("Sample(..)"),
        }
    }
}

macro_rules! operand_from_value {
    ($($ty:ty),* $(,)?) => {
        $(
            impl From<$ty> for Operand {
                fn from(v: $ty) -> Self {
                    Operand::Value(Value::from(v))
                }
            }
        )*
    };
}

operand_from_value!(
    i8, i16, i32, i64, isize, u8, u16, u32, u64, usize, f32, f64, bool, &'static str, String,
    Interval
);

impl From<Value> for Operand {
    fn from(v: Value) -> Self {
        Operand::Value(v)
    }
}

impl From<Member> for Operand {
    fn from(m: Member) -> Self {
        Operand::Member(m)
    }
}

// ============================================================================
// NODE
// ============================================================================

/// Kind of an aggregation node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AggregationKind {
    And,
    Or,
    Not,
    /// At least one element of the current object.
    Any,
    /// Every element of the current object.
    All,
    /// The current object and its descendants.
    Tree(TreeSpec),
}

impl AggregationKind {
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::And => "and",
            Self::Or => "or",
            Self::Not => "not",
            Self::Any => "any",
            Self::All => "all",
            Self::Tree(_) => "tree",
        }
    }
}

#[derive(Debug, Clone)]
pub struct Aggregation {
    pub kind: AggregationKind,
    pub children: Vec<Node>,
}

/// An immutable rule tree.
#[derive(Debug, Clone)]
pub enum Node {
    /// Compares the current object with an operand.
    Condition {
        operator: OperatorRef,
        operand: Operand,
    },
    /// Compares a property of the current object with an operand.
    Property {
        property: Property,
        operator: OperatorRef,
        operand: Operand,
    },
    /// Checks whether the current member exists (or not).
    Exists(bool),
    /// Evaluates `node` with `member` as the current object.
    Bind { member: Member, node: Box<Node> },
    Aggregation(Aggregation),
    /// Evaluates `node`, reporting `message` instead of its own text.
    Explained {
        message: Cow<'static, str>,
        node: Box<Node>,
    },
}

impl Node {
    pub(crate) fn aggregate(kind: AggregationKind, children: Vec<Node>) -> Self {
        Self::Aggregation(Aggregation { kind, children })
    }

    /// `self AND other`; chains flatten into one aggregation.
    #[must_use]
    pub fn and(self, other: Node) -> Node {
        match self {
            Node::Aggregation(Aggregation {
                kind: AggregationKind::And,
                mut children,
            }) => {
                children.push(other);
                Node::aggregate(AggregationKind::And, children)
            }
            node => Node::aggregate(AggregationKind::And, vec![node, other]),
        }
    }

    /// `self OR other`; chains flatten into one aggregation.
    #[must_use]
    pub fn or(self, other: Node) -> Node {
        match self {
            Node::Aggregation(Aggregation {
                kind: AggregationKind::Or,
                mut children,
            }) => {
                children.push(other);
                Node::aggregate(AggregationKind::Or, children)
            }
            node => Node::aggregate(AggregationKind::Or, vec![node, other]),
        }
    }

    /// Number of nodes in the tree.
    #[must_use]
    pub fn size(&self) -> usize {
        1 + match self {
            Node::Bind { node, .. } | Node::Explained { node, .. } => node.size(),
            Node::Aggregation(agg) => agg.children.iter().map(Node::size).sum(),
            _ => 0,
        }
    }
}

// ============================================================================
// EVALUATION
// ============================================================================

/// Evaluates `node` with `scope` as the current member.
///
/// `scope` is the full path from the validated object; the adapter resolves
/// it relative to its cached origin.
pub(crate) fn evaluate(adapter: &Adapter<'_>, scope: &Member, node: &Node) -> Status {
    match node {
        Node::Condition { operator, operand } => {
            field::leaf(adapter, scope, None, operator.as_ref(), operand)
        }
        Node::Property {
            property,
            operator,
            operand,
        } => field::leaf(adapter, scope, Some(property), operator.as_ref(), operand),
        Node::Exists(expected) => {
            let (member, property) = scope.split_property();
            adapter.validate_exists(&member, property.as_ref(), *expected)
        }
        Node::Bind { member, node } => field::evaluate_bound(adapter, scope, member, node),
        Node::Aggregation(aggregation) => match &aggregation.kind {
            AggregationKind::And => adapter.validate_and(scope, &aggregation.children),
            AggregationKind::Or => adapter.validate_or(scope, &aggregation.children),
            AggregationKind::Not => adapter.validate_not(scope, &aggregation.children),
            AggregationKind::Any => {
                each::quantify(adapter, scope, Expansion::Any, &aggregation.children)
            }
            AggregationKind::All => {
                each::quantify(adapter, scope, Expansion::All, &aggregation.children)
            }
            AggregationKind::Tree(spec) => tree::walk(adapter, scope, spec, &aggregation.children),
        },
        Node::Explained { message, node } => adapter.validate_explained(scope, message, node),
    }
}
