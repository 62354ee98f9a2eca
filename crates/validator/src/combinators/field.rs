//! FIELD binding - conditions on members of the validated object
//!
//! Every condition method of [`Member`] produces a [`Node`]. A member that
//! ends with a property is split so the property becomes the leaf:
//! `member("a").size().gte(5)` is `Bind(a, Property(size, gte, 5))`.

use crate::adapter::{Adapter, Quantified};
use crate::combinators::{Node, Operand, evaluate};
use crate::foundation::Status;
use crate::operators::{self, LexKind, Operator, OperatorRef};
use crate::path::{Expansion, Key, Member};
use crate::property::Property;

// ============================================================================
// CONDITION BUILDERS
// ============================================================================

#[allow(clippy::should_implement_trait)]
impl Member {
    /// Compares the member with `operand` using any operator.
    pub fn check(self, operator: OperatorRef, operand: impl Into<Operand>) -> Node {
        let operand = operand.into();
        let (member, property) = self.split_property();
        let leaf = match property {
            Some(property) => Node::Property {
                property,
                operator,
                operand,
            },
            None => Node::Condition { operator, operand },
        };
        member.apply(leaf)
    }

    /// Evaluates `node` with this member as the current object.
    pub fn apply(self, node: Node) -> Node {
        if self.is_root() {
            node
        } else {
            Node::Bind {
                member: self,
                node: Box::new(node),
            }
        }
    }

    pub fn eq(self, operand: impl Into<Operand>) -> Node {
        self.check(operators::eq(), operand)
    }

    pub fn ne(self, operand: impl Into<Operand>) -> Node {
        self.check(operators::ne(), operand)
    }

    pub fn lt(self, operand: impl Into<Operand>) -> Node {
        self.check(operators::lt(), operand)
    }

    pub fn lte(self, operand: impl Into<Operand>) -> Node {
        self.check(operators::lte(), operand)
    }

    pub fn gt(self, operand: impl Into<Operand>) -> Node {
        self.check(operators::gt(), operand)
    }

    pub fn gte(self, operand: impl Into<Operand>) -> Node {
        self.check(operators::gte(), operand)
    }

    /// Membership in an [`interval`](crate::foundation::interval) or a
    /// [`range`](crate::foundation::range).
    pub fn in_(self, operand: impl Into<Operand>) -> Node {
        self.check(operators::in_(), operand)
    }

    pub fn not_in(self, operand: impl Into<Operand>) -> Node {
        self.check(operators::not_in(), operand)
    }

    /// Boolean flag, e.g. `member("tags").empty().flag(false)`.
    pub fn flag(self, expected: bool) -> Node {
        self.check(operators::flag(), expected)
    }

    pub fn contains(self, operand: impl Into<Operand>) -> Node {
        self.check(operators::lex(LexKind::Contains), operand)
    }

    pub fn starts_with(self, operand: impl Into<Operand>) -> Node {
        self.check(operators::lex(LexKind::StartsWith), operand)
    }

    pub fn ends_with(self, operand: impl Into<Operand>) -> Node {
        self.check(operators::lex(LexKind::EndsWith), operand)
    }

    /// Lexicographic comparison, case-sensitive.
    pub fn lex(self, kind: LexKind, operand: impl Into<Operand>) -> Node {
        self.check(operators::lex(kind), operand)
    }

    /// Lexicographic comparison ignoring case.
    pub fn ilex(self, kind: LexKind, operand: impl Into<Operand>) -> Node {
        self.check(operators::ilex(kind), operand)
    }

    pub fn exists(self) -> Node {
        self.apply(Node::Exists(true))
    }

    pub fn not_exists(self) -> Node {
        self.apply(Node::Exists(false))
    }
}

// ============================================================================
// EVALUATION
// ============================================================================

/// Dispatches a leaf to the adapter operation matching its shape.
pub(crate) fn leaf(
    adapter: &Adapter<'_>,
    scope: &Member,
    property: Option<&Property>,
    operator: &dyn Operator,
    operand: &Operand,
) -> Status {
    match operand {
        Operand::Value(value) => match (scope.is_root(), property) {
            (true, None) => adapter.validate_operator(operator, value),
            (true, Some(property)) => adapter.validate_property(property, operator, value),
            (false, _) => adapter.validate(scope, property, operator, value),
        },
        Operand::Member(other) => {
            adapter.validate_with_other_member(scope, property, operator, other)
        }
        Operand::Sample(sample) => {
            adapter.validate_with_master_sample(scope, property, operator, sample.as_ref())
        }
    }
}

/// Evaluates a [`Node::Bind`].
pub(crate) fn evaluate_bound(
    adapter: &Adapter<'_>,
    scope: &Member,
    member: &Member,
    node: &Node,
) -> Status {
    let scope = scope.with_names_of(member);
    descend(adapter, &scope, member.path().keys(), node)
}

/// Appends `keys` to `scope` and evaluates `node` there. The first expansion
/// key hands the rest of the path to an `ANY` / `ALL` over the container.
pub(crate) fn descend(adapter: &Adapter<'_>, scope: &Member, keys: &[Key], node: &Node) -> Status {
    let expansion = keys
        .iter()
        .enumerate()
        .find_map(|(at, key)| Some((at, Expansion::from_key(key)?)));

    let Some((at, expansion)) = expansion else {
        return evaluate(adapter, &scope.extend(keys), node);
    };

    let container = scope.extend(&keys[..at]);
    adapter.validate_elements(Quantified {
        container: &container,
        expansion,
        rest: &keys[at + 1..],
        nodes: std::slice::from_ref(node),
    })
}
