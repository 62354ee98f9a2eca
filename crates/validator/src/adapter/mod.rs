//! Adapter: the uniform operation surface of one validation pass
//!
//! The aggregation engine never touches the object directly. Every leaf and
//! every aggregation becomes a [`Call`] handed to an [`Adapter`], which runs
//! it through a [`Chain`] of [`Layer`]s. Each layer may do work before and
//! after calling the next link; the innermost link resolves members and
//! applies operators.
//!
//! ```text
//! validate_*() ──► layer 0 ──► layer 1 ──► ... ──► dispatch (resolve + apply)
//! ```
//!
//! Layers are composed at runtime by [`AdapterBuilder`]:
//!
//! - [`SingleMemberLayer`]: only rules on one member count
//! - [`PrevalidationLayer`]: checks a candidate value before it is written
//! - [`ExistenceGuard`]: the `Safe` / `Abort` existence policies
//! - [`ReportingLayer`]: turns failures into report text
//!
//! An adapter borrows the object for one top-level call only.

mod builder;
mod dispatch;
mod existence;
mod prevalidation;
mod reporting;
mod single_member;

use std::sync::LazyLock;

pub use builder::AdapterBuilder;
pub use existence::ExistenceGuard;
pub use prevalidation::PrevalidationLayer;
pub use reporting::ReportingLayer;
pub use single_member::SingleMemberLayer;

use crate::combinators::{self, Node};
use crate::foundation::{EvaluationConfig, Status, Target, Value};
use crate::operators::Operator;
use crate::path::{self, Expansion, Key, Member, Quantifier, Resolved};
use crate::property::{Property, PropertyRegistry};

/// The validated object itself.
pub static ROOT: LazyLock<Member> = LazyLock::new(Member::default);

// ============================================================================
// CALLS
// ============================================================================

/// Right-hand side of a comparison.
#[derive(Debug, Clone, Copy)]
pub enum Rhs<'c> {
    Value(&'c Value),
    /// Another member, resolved from the operand origin.
    Member(&'c Member),
    /// The same member of a reference object.
    Sample(&'c dyn Target),
}

/// A comparison leaf.
#[derive(Debug, Clone, Copy)]
pub struct Check<'c> {
    /// Object the property or value is read from.
    pub member: &'c Member,
    pub property: Option<&'c Property>,
    pub operator: &'c dyn Operator,
    pub rhs: Rhs<'c>,
}

/// `ANY` / `ALL` over the elements of `container`.
#[derive(Debug, Clone, Copy)]
pub struct Quantified<'c> {
    pub container: &'c Member,
    pub expansion: Expansion<'c>,
    /// Keys following the expansion, resolved inside each element.
    pub rest: &'c [Key],
    /// Rules every element is checked against (combined with AND).
    pub nodes: &'c [Node],
}

/// One operation of the adapter surface.
#[derive(Debug, Clone, Copy)]
pub enum Call<'c> {
    /// The object itself against an operand.
    Operator(Check<'c>),
    /// A property of the object itself against an operand.
    Property(Check<'c>),
    /// A member (optionally a property of it) against an operand.
    Validate(Check<'c>),
    OtherMember(Check<'c>),
    MasterSample(Check<'c>),
    Exists {
        member: &'c Member,
        property: Option<&'c Property>,
        expected: bool,
    },
    And {
        scope: &'c Member,
        children: &'c [Node],
    },
    Or {
        scope: &'c Member,
        children: &'c [Node],
    },
    Not {
        scope: &'c Member,
        children: &'c [Node],
    },
    Any(Quantified<'c>),
    All(Quantified<'c>),
    Explained {
        scope: &'c Member,
        message: &'c str,
        node: &'c Node,
    },
}

impl<'c> Call<'c> {
    /// The comparison of a leaf call.
    #[must_use]
    pub fn check(&self) -> Option<&Check<'c>> {
        match self {
            Self::Operator(check)
            | Self::Property(check)
            | Self::Validate(check)
            | Self::OtherMember(check)
            | Self::MasterSample(check) => Some(check),
            _ => None,
        }
    }

    /// Member the call is about: the leaf member, the aggregation scope or
    /// the quantified container.
    #[must_use]
    pub fn member(&self) -> &'c Member {
        match *self {
            Self::Operator(check)
            | Self::Property(check)
            | Self::Validate(check)
            | Self::OtherMember(check)
            | Self::MasterSample(check) => check.member,
            Self::Exists { member, .. } => member,
            Self::And { scope, .. }
            | Self::Or { scope, .. }
            | Self::Not { scope, .. }
            | Self::Explained { scope, .. } => scope,
            Self::Any(quantified) | Self::All(quantified) => quantified.container,
        }
    }

    /// True for calls that do not evaluate child rules.
    #[must_use]
    pub fn is_leaf(&self) -> bool {
        self.check().is_some() || matches!(self, Self::Exists { .. })
    }
}

// ============================================================================
// LAYERS
// ============================================================================

/// A link of the adapter chain.
///
/// The default implementation forwards every call unchanged.
pub trait Layer {
    /// Layer name for tracing.
    fn name(&self) -> &str;

    fn handle(&self, call: &Call<'_>, next: Next<'_>) -> Status {
        next.run(call)
    }

    /// Overrides the `ANY` success predicate for one element. The first
    /// layer returning `Some` decides; otherwise an element passes when it
    /// succeeds.
    fn element_passes(&self, member: &Member, status: Status) -> Option<bool> {
        let _ = (member, status);
        None
    }
}

/// Remainder of the chain after the current layer.
#[derive(Clone, Copy)]
pub struct Next<'n> {
    adapter: Adapter<'n>,
    index: usize,
}

impl<'n> Next<'n> {
    pub fn run(self, call: &Call<'_>) -> Status {
        match self.adapter.chain.layers.get(self.index) {
            Some(layer) => layer.handle(
                call,
                Next {
                    adapter: self.adapter,
                    index: self.index + 1,
                },
            ),
            None => dispatch::run(&self.adapter, call),
        }
    }

    /// The adapter the rest of the chain runs with.
    #[must_use]
    pub fn adapter(&self) -> &Adapter<'n> {
        &self.adapter
    }

    /// Continues with members resolved relative to `origin`, which sits at
    /// depth `consumed` of the member paths.
    #[must_use]
    pub fn with_origin<'b>(self, origin: &'b dyn Target, consumed: usize) -> Next<'b>
    where
        'n: 'b,
    {
        Next {
            adapter: self.adapter.with_origin(origin, consumed),
            index: self.index,
        }
    }

    /// Continues with other-member operands resolved relative to `origin`.
    #[must_use]
    pub fn with_operand_origin<'b>(self, origin: &'b dyn Target, consumed: usize) -> Next<'b>
    where
        'n: 'b,
    {
        Next {
            adapter: self.adapter.with_operand_origin(origin, consumed),
            index: self.index,
        }
    }
}

/// Layers plus the configuration shared by every adapter of a pass.
pub struct Chain<'a> {
    layers: Vec<Box<dyn Layer + 'a>>,
    config: &'a EvaluationConfig,
    properties: &'a PropertyRegistry,
}

impl<'a> Chain<'a> {
    pub fn new(
        layers: Vec<Box<dyn Layer + 'a>>,
        config: &'a EvaluationConfig,
        properties: &'a PropertyRegistry,
    ) -> Self {
        Self {
            layers,
            config,
            properties,
        }
    }

    /// Starts a pass over `object`.
    pub fn adapter<'b>(&'b self, object: &'b dyn Target) -> Adapter<'b> {
        Adapter {
            chain: self,
            root: object,
            origin: object,
            consumed: 0,
            operand_origin: None,
        }
    }

    #[must_use]
    pub fn layer_names(&self) -> Vec<&str> {
        self.layers.iter().map(|layer| layer.name()).collect()
    }
}

// ============================================================================
// ADAPTER
// ============================================================================

/// Borrowed view of one object with a layer chain.
///
/// Inside an expansion the adapter caches the element it reached: `origin`
/// is the object at depth `consumed` of the member paths, so resolving a
/// member only walks the keys after that depth.
#[derive(Clone, Copy)]
pub struct Adapter<'a> {
    chain: &'a Chain<'a>,
    root: &'a dyn Target,
    origin: &'a dyn Target,
    consumed: usize,
    operand_origin: Option<(&'a dyn Target, usize)>,
}

impl<'a> Adapter<'a> {
    pub fn config(&self) -> &'a EvaluationConfig {
        self.chain.config
    }

    pub fn properties(&self) -> &'a PropertyRegistry {
        self.chain.properties
    }

    /// The validated object.
    pub fn root(&self) -> &'a dyn Target {
        self.root
    }

    /// Object member paths are currently resolved from.
    pub fn origin(&self) -> &'a dyn Target {
        self.origin
    }

    /// Number of member path keys already walked to reach the origin.
    pub fn consumed(&self) -> usize {
        self.consumed
    }

    pub(crate) fn with_origin<'b>(&self, origin: &'b dyn Target, consumed: usize) -> Adapter<'b>
    where
        'a: 'b,
    {
        Adapter {
            chain: self.chain,
            root: self.root,
            origin,
            consumed,
            operand_origin: self.operand_origin,
        }
    }

    pub(crate) fn with_operand_origin<'b>(
        &self,
        origin: &'b dyn Target,
        consumed: usize,
    ) -> Adapter<'b>
    where
        'a: 'b,
    {
        Adapter {
            chain: self.chain,
            root: self.root,
            origin: self.origin,
            consumed: self.consumed,
            operand_origin: Some((origin, consumed)),
        }
    }

    /// Object and depth other-member operands are resolved from.
    pub fn operand_base(&self) -> (&'a dyn Target, usize) {
        self.operand_origin.unwrap_or((self.root, 0))
    }

    fn relative<'k>(keys: &'k [Key], consumed: usize) -> Option<&'k [Key]> {
        keys.get(consumed..)
    }

    /// Resolves `member` from the current origin.
    pub fn resolve_member(&self, member: &Member) -> Option<Resolved<'a>> {
        let keys = Self::relative(member.path().keys(), self.consumed)?;
        path::resolve(self.origin, keys, self.chain.properties)
    }

    /// Resolves an other-member operand from the operand origin.
    pub fn resolve_operand(&self, member: &Member) -> Option<Resolved<'a>> {
        let (base, consumed) = self.operand_base();
        let keys = Self::relative(member.path().keys(), consumed)?;
        path::resolve(base, keys, self.chain.properties)
    }

    /// True iff `member` (and `property` of it, if given) exists.
    pub fn member_exists(&self, member: &Member, property: Option<&Property>) -> bool {
        let Some(keys) = Self::relative(member.path().keys(), self.consumed) else {
            return false;
        };
        match property {
            None => path::exists(self.origin, keys, self.chain.properties),
            Some(property) => path::resolve(self.origin, keys, self.chain.properties)
                .is_some_and(|target| {
                    self.chain
                        .properties
                        .has_property(target.as_target(), property)
                }),
        }
    }

    /// Existence of an other-member operand, checked from the operand origin.
    pub fn operand_exists(&self, member: &Member) -> bool {
        self.resolve_operand(member).is_some()
    }

    /// `ANY` success predicate for one element.
    pub fn element_passes(&self, member: &Member, status: Status) -> bool {
        self.chain
            .layers
            .iter()
            .find_map(|layer| layer.element_passes(member, status))
            .unwrap_or(status.is_success())
    }

    fn run(&self, call: &Call<'_>) -> Status {
        Next {
            adapter: *self,
            index: 0,
        }
        .run(call)
    }

    // ------------------------------------------------------------------------
    // Operation surface
    // ------------------------------------------------------------------------

    /// Evaluates a rule tree against the object.
    pub fn validate_node(&self, node: &Node) -> Status {
        combinators::evaluate(self, &ROOT, node)
    }

    /// The object itself against `operand`.
    pub fn validate_operator(&self, operator: &dyn Operator, operand: &Value) -> Status {
        self.run(&Call::Operator(Check {
            member: &ROOT,
            property: None,
            operator,
            rhs: Rhs::Value(operand),
        }))
    }

    /// A property of the object itself against `operand`.
    pub fn validate_property(
        &self,
        property: &Property,
        operator: &dyn Operator,
        operand: &Value,
    ) -> Status {
        self.run(&Call::Property(Check {
            member: &ROOT,
            property: Some(property),
            operator,
            rhs: Rhs::Value(operand),
        }))
    }

    pub fn validate_exists(
        &self,
        member: &Member,
        property: Option<&Property>,
        expected: bool,
    ) -> Status {
        self.run(&Call::Exists {
            member,
            property,
            expected,
        })
    }

    pub fn validate(
        &self,
        member: &Member,
        property: Option<&Property>,
        operator: &dyn Operator,
        operand: &Value,
    ) -> Status {
        self.run(&Call::Validate(Check {
            member,
            property,
            operator,
            rhs: Rhs::Value(operand),
        }))
    }

    pub fn validate_with_other_member(
        &self,
        member: &Member,
        property: Option<&Property>,
        operator: &dyn Operator,
        other: &Member,
    ) -> Status {
        self.run(&Call::OtherMember(Check {
            member,
            property,
            operator,
            rhs: Rhs::Member(other),
        }))
    }

    pub fn validate_with_master_sample(
        &self,
        member: &Member,
        property: Option<&Property>,
        operator: &dyn Operator,
        sample: &dyn Target,
    ) -> Status {
        self.run(&Call::MasterSample(Check {
            member,
            property,
            operator,
            rhs: Rhs::Sample(sample),
        }))
    }

    pub fn validate_and(&self, scope: &Member, children: &[Node]) -> Status {
        self.run(&Call::And { scope, children })
    }

    pub fn validate_or(&self, scope: &Member, children: &[Node]) -> Status {
        self.run(&Call::Or { scope, children })
    }

    pub fn validate_not(&self, scope: &Member, children: &[Node]) -> Status {
        self.run(&Call::Not { scope, children })
    }

    pub fn validate_any(&self, quantified: Quantified<'_>) -> Status {
        self.run(&Call::Any(quantified))
    }

    pub fn validate_all(&self, quantified: Quantified<'_>) -> Status {
        self.run(&Call::All(quantified))
    }

    /// Routes to [`validate_any`](Self::validate_any) or
    /// [`validate_all`](Self::validate_all) by the expansion's quantifier.
    pub fn validate_elements(&self, quantified: Quantified<'_>) -> Status {
        match quantified.expansion.quantifier() {
            Quantifier::Any => self.validate_any(quantified),
            Quantifier::All => self.validate_all(quantified),
        }
    }

    pub fn validate_explained(&self, scope: &Member, message: &str, node: &Node) -> Status {
        self.run(&Call::Explained {
            scope,
            message,
            node,
        })
    }
}
