//! Innermost link of the chain: resolve members and apply operators

use tracing::trace;

use crate::adapter::{Adapter, Call, Check, Rhs};
use crate::combinators::{and, each, message, not, or};
use crate::foundation::{Status, Target, Value};
use crate::path;
use crate::property::Property;

pub(super) fn run(adapter: &Adapter<'_>, call: &Call<'_>) -> Status {
    match *call {
        Call::Operator(check)
        | Call::Property(check)
        | Call::Validate(check)
        | Call::OtherMember(check)
        | Call::MasterSample(check) => compare(adapter, &check),
        Call::Exists {
            member,
            property,
            expected,
        } => {
            let found = adapter.member_exists(member, property);
            trace!(member = %member, found, expected, "existence checked");
            Status::from_bool(found == expected)
        }
        Call::And { scope, children } => and::fold(adapter, scope, children),
        Call::Or { scope, children } => or::fold(adapter, scope, children),
        Call::Not { scope, children } => not::fold(adapter, scope, children),
        Call::Any(quantified) | Call::All(quantified) => each::expand(adapter, &quantified),
        Call::Explained { scope, node, .. } => message::inner(adapter, scope, node),
    }
}

fn read(adapter: &Adapter<'_>, target: &dyn Target, property: Option<&Property>) -> Option<Value> {
    match property {
        Some(property) => adapter.properties().get_property(target, property),
        None => target.scalar(),
    }
}

fn lhs(adapter: &Adapter<'_>, check: &Check<'_>) -> Option<Value> {
    let resolved = adapter.resolve_member(check.member)?;
    read(adapter, resolved.as_target(), check.property)
}

fn rhs(adapter: &Adapter<'_>, check: &Check<'_>) -> Option<Value> {
    match check.rhs {
        Rhs::Value(value) => Some(value.clone()),
        Rhs::Member(other) => {
            let (other, property) = other.split_property();
            let resolved = adapter.resolve_operand(&other)?;
            read(adapter, resolved.as_target(), property.as_ref())
        }
        Rhs::Sample(sample) => {
            let keys = check.member.path().keys();
            let resolved = path::resolve(sample, keys, adapter.properties())?;
            read(adapter, resolved.as_target(), check.property)
        }
    }
}

/// A missing side or incomparable values make the leaf not applicable.
fn compare(adapter: &Adapter<'_>, check: &Check<'_>) -> Status {
    let status = match (lhs(adapter, check), rhs(adapter, check)) {
        (Some(lhs), Some(rhs)) => Status::from_option(check.operator.apply(&lhs, &rhs)),
        _ => Status::Ignore,
    };
    trace!(
        member = %check.member,
        property = check.property.map(Property::name),
        operator = check.operator.name(),
        %status,
        "leaf evaluated"
    );
    status
}
