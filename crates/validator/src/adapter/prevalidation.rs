//! Prevalidation: checking a value before it is written into an object
//!
//! The layer evaluates the object's rules as if `candidate` were stored at
//! `path`. Leaves reading `path` (or anything below it, including properties
//! such as `size` and `empty`) are resolved inside the candidate; leaves on
//! unrelated members succeed. A container candidate is iterated by `ANY` /
//! `ALL` like the stored container would be.
//!
//! In strict-any mode an `ANY` element only counts as passing when it is
//! the candidate (or lies inside it), so untouched siblings cannot satisfy
//! the quantifier.

use crate::adapter::{Call, Layer, Next, Rhs};
use crate::foundation::{Status, Target};
use crate::path::{Key, Member, Path};

pub struct PrevalidationLayer<'c> {
    path: Path,
    candidate: &'c dyn Target,
    strict_any: bool,
}

impl<'c> PrevalidationLayer<'c> {
    pub fn new(member: &Member, candidate: &'c dyn Target) -> Self {
        Self {
            path: member.path().clone(),
            candidate,
            strict_any: false,
        }
    }

    #[must_use = "builder methods must be chained or built"]
    pub fn strict_any(mut self, strict: bool) -> Self {
        self.strict_any = strict;
        self
    }

    fn below(&self, keys: &[Key]) -> bool {
        self.path.matches_prefix_of(keys)
    }

    /// Whether an adapter at `origin` / `consumed` still resolves from the
    /// stored object rather than from the candidate.
    fn needs_rebase(&self, origin: &dyn Target, consumed: usize) -> bool {
        consumed < self.path.len()
            || (consumed == self.path.len() && !std::ptr::addr_eq(origin, self.candidate))
    }

    fn run_rebased(&self, call: &Call<'_>, next: Next<'_>, lhs: bool, rhs: bool) -> Status {
        let adapter = next.adapter();
        let mut next = next;
        if lhs && self.needs_rebase(adapter.origin(), adapter.consumed()) {
            next = next.with_origin(self.candidate, self.path.len());
        }
        if rhs {
            next = next.with_operand_origin(self.candidate, self.path.len());
        }
        next.run(call)
    }
}

impl Layer for PrevalidationLayer<'_> {
    fn name(&self) -> &str {
        "prevalidation"
    }

    fn handle(&self, call: &Call<'_>, next: Next<'_>) -> Status {
        match call {
            Call::Any(quantified) | Call::All(quantified) => {
                let inside = self.below(quantified.container.path().keys());
                self.run_rebased(call, next, inside, false)
            }
            Call::Exists { member, .. } => {
                if self.below(member.path().keys()) {
                    self.run_rebased(call, next, true, false)
                } else {
                    Status::Success
                }
            }
            _ => {
                let Some(check) = call.check() else {
                    return next.run(call);
                };
                let lhs = self.below(check.member.path().keys());
                let rhs = matches!(check.rhs, Rhs::Member(other) if self.below(other.path().keys()));
                if lhs || rhs {
                    self.run_rebased(call, next, lhs, rhs)
                } else {
                    Status::Success
                }
            }
        }
    }

    fn element_passes(&self, member: &Member, status: Status) -> Option<bool> {
        if !self.strict_any {
            return None;
        }
        let keys = member.path().keys();
        let related = self.below(keys) || Path::from(keys).matches_prefix_of(self.path.keys());
        Some(status.is_success() && related)
    }
}
