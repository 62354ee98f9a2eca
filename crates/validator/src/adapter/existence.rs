//! Existence policies as a chain layer
//!
//! Under [`ExistencePolicy::Safe`] a leaf whose member (or property) is
//! missing is `Ignore`. Under [`ExistencePolicy::Abort`] the leaf is replaced
//! by an explicit existence check, which fails and is reported as
//! "`<member>` must exist". The guard sits outside the reporting layer so the
//! replacement check is reported like any other leaf.

use crate::adapter::{Adapter, Call, Check, Layer, Next, Rhs};
use crate::combinators::Node;
use crate::combinators::not::referenced_members;
use crate::foundation::{ExistencePolicy, Status};
use crate::path::{self, Member};
use crate::property::Property;

#[derive(Debug, Clone, Copy)]
pub struct ExistenceGuard {
    policy: ExistencePolicy,
}

impl ExistenceGuard {
    /// `None` for [`ExistencePolicy::Optimistic`], which needs no guard.
    #[must_use]
    pub fn for_policy(policy: ExistencePolicy) -> Option<Self> {
        match policy {
            ExistencePolicy::Optimistic => None,
            ExistencePolicy::Safe | ExistencePolicy::Abort => Some(Self { policy }),
        }
    }

    fn abort(&self) -> bool {
        self.policy == ExistencePolicy::Abort
    }

    /// Fails with an existence check for a missing member of the current
    /// object.
    fn missing_member(&self, check: &Check<'_>, next: Next<'_>) -> Status {
        if !self.abort() {
            return Status::Ignore;
        }
        let property = missing_property(next.adapter(), check.member, check.property);
        next.run(&Call::Exists {
            member: check.member,
            property,
            expected: true,
        })
    }

    /// Fails with an existence check for a missing other-member operand,
    /// resolved from the operand origin.
    fn missing_operand(&self, other: &Member, next: Next<'_>) -> Status {
        if !self.abort() {
            return Status::Ignore;
        }
        let (base, consumed) = next.adapter().operand_base();
        let (other, property) = other.split_property();
        let next = next.with_origin(base, consumed);
        let property = missing_property(next.adapter(), &other, property.as_ref());
        next.run(&Call::Exists {
            member: &other,
            property,
            expected: true,
        })
    }

    fn check_leaf(&self, check: &Check<'_>, call: &Call<'_>, next: Next<'_>) -> Status {
        let adapter = next.adapter();
        if !adapter.member_exists(check.member, check.property) {
            return self.missing_member(check, next);
        }
        match check.rhs {
            Rhs::Member(other) if !adapter.operand_exists(other) => {
                self.missing_operand(other, next)
            }
            Rhs::Sample(sample) => {
                let keys = check.member.path().keys();
                if path::resolve(sample, keys, adapter.properties()).is_none() {
                    Status::Ignore
                } else {
                    next.run(call)
                }
            }
            _ => next.run(call),
        }
    }

    /// Under `Abort` a NOT must not turn a missing member into a success:
    /// every member its subtree reads is checked first.
    fn check_not(
        &self,
        scope: &Member,
        children: &[Node],
        call: &Call<'_>,
        next: Next<'_>,
    ) -> Status {
        let refs = referenced_members(scope, children);
        let adapter = *next.adapter();
        let mut status = Status::Success;
        for member in &refs.members {
            let (member, property) = member.split_property();
            if !adapter.member_exists(&member, property.as_ref()) {
                let property = missing_property(&adapter, &member, property.as_ref());
                status = adapter.validate_exists(&member, property, true);
                break;
            }
        }
        if status.is_success() {
            if let Some(other) = refs.operands.iter().find(|m| !adapter.operand_exists(m)) {
                let (base, consumed) = adapter.operand_base();
                let (other, property) = other.split_property();
                let rebased = adapter.with_origin(base, consumed);
                let property = missing_property(&rebased, &other, property.as_ref());
                status = rebased.validate_exists(&other, property, true);
            }
        }
        if status.is_fail() {
            return status;
        }
        next.run(call)
    }
}

/// The property to name in "must exist" text: only when the member itself
/// resolves and the property is what is missing.
fn missing_property<'p>(
    adapter: &Adapter<'_>,
    member: &Member,
    property: Option<&'p Property>,
) -> Option<&'p Property> {
    property.filter(|_| adapter.member_exists(member, None))
}

impl Layer for ExistenceGuard {
    fn name(&self) -> &str {
        "existence"
    }

    fn handle(&self, call: &Call<'_>, next: Next<'_>) -> Status {
        match call {
            Call::Not { scope, children } if self.abort() => {
                self.check_not(scope, children, call, next)
            }
            _ => match call.check() {
                Some(check) => self.check_leaf(check, call, next),
                None => next.run(call),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapter::Chain;
    use crate::combinators::not;
    use crate::foundation::EvaluationConfig;
    use crate::path::member;
    use crate::property::PropertyRegistry;
    use serde_json::json;

    fn run(policy: ExistencePolicy, rule: &Node) -> Status {
        let config = EvaluationConfig::default().with_existence(policy);
        let properties = PropertyRegistry::default();
        let layers: Vec<Box<dyn Layer>> = ExistenceGuard::for_policy(policy)
            .into_iter()
            .map(|guard| Box::new(guard) as Box<dyn Layer>)
            .collect();
        let doc = json!({"field1": 1});
        Chain::new(layers, &config, &properties)
            .adapter(&doc)
            .validate_node(rule)
    }

    #[test]
    fn missing_member_by_policy() {
        let rule = member("field2").eq(100);
        assert_eq!(run(ExistencePolicy::Optimistic, &rule), Status::Ignore);
        assert_eq!(run(ExistencePolicy::Safe, &rule), Status::Ignore);
        assert_eq!(run(ExistencePolicy::Abort, &rule), Status::Fail);
    }

    #[test]
    fn missing_other_member_by_policy() {
        let rule = member("field1").lt(member("field2"));
        assert_eq!(run(ExistencePolicy::Safe, &rule), Status::Ignore);
        assert_eq!(run(ExistencePolicy::Abort, &rule), Status::Fail);
    }

    #[test]
    fn abort_not_does_not_negate_missing_member() {
        let rule = not(member("field2").eq(100));
        assert_eq!(run(ExistencePolicy::Safe, &rule), Status::Ignore);
        assert_eq!(run(ExistencePolicy::Abort, &rule), Status::Fail);
        let present = not(member("field1").eq(2));
        assert_eq!(run(ExistencePolicy::Abort, &present), Status::Success);
    }
}
