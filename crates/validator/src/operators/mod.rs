//! Comparison operators
//!
//! An operator compares the value of a member with an operand and carries the
//! phrases used to describe it in reports. New operators only need to
//! implement [`Operator`].
//!
//! - [`Comparison`]: equality, ordering, interval/range membership, flags
//! - [`Lexicographic`]: string comparison, case-sensitive or not

use std::borrow::Cow;
use std::fmt::Debug;
use std::sync::Arc;

use crate::foundation::Value;

pub mod comparison;
pub mod lexicographic;

pub use comparison::Comparison;
pub use lexicographic::{Case, LexKind, Lexicographic};

/// Shared handle to an operator stored in a rule tree.
pub type OperatorRef = Arc<dyn Operator>;

/// A binary comparison with its description phrases.
pub trait Operator: Debug + Send + Sync {
    /// Stable name, used in logs.
    fn name(&self) -> &'static str;

    /// Applies the operator. `None` means the operands are not comparable.
    fn apply(&self, lhs: &Value, rhs: &Value) -> Option<bool>;

    /// Phrase placed between the subject and the operand, e.g.
    /// "must be greater than".
    fn description(&self) -> &str;

    /// Phrase describing the opposite condition.
    fn negated_description(&self) -> &str;

    /// Phrase for this operator against `rhs` (or its opposite when
    /// `negated`), and whether the operand is printed after it.
    fn describe(&self, rhs: &Value, negated: bool) -> (Cow<'_, str>, bool) {
        let _ = rhs;
        let text = if negated {
            self.negated_description()
        } else {
            self.description()
        };
        (Cow::Borrowed(text), true)
    }
}

/// `lhs == rhs`
#[must_use]
pub fn eq() -> OperatorRef {
    Arc::new(Comparison::Eq)
}

/// `lhs != rhs`
#[must_use]
pub fn ne() -> OperatorRef {
    Arc::new(Comparison::Ne)
}

#[must_use]
pub fn lt() -> OperatorRef {
    Arc::new(Comparison::Lt)
}

#[must_use]
pub fn lte() -> OperatorRef {
    Arc::new(Comparison::Lte)
}

#[must_use]
pub fn gt() -> OperatorRef {
    Arc::new(Comparison::Gt)
}

#[must_use]
pub fn gte() -> OperatorRef {
    Arc::new(Comparison::Gte)
}

/// Membership in an interval or a range.
#[must_use]
pub fn in_() -> OperatorRef {
    Arc::new(Comparison::In)
}

#[must_use]
pub fn not_in() -> OperatorRef {
    Arc::new(Comparison::NotIn)
}

/// Boolean flag; the operand selects the expected state.
#[must_use]
pub fn flag() -> OperatorRef {
    Arc::new(Comparison::Flag)
}

/// Lexicographic operator of the given kind, case-sensitive.
#[must_use]
pub fn lex(kind: LexKind) -> OperatorRef {
    Arc::new(Lexicographic::new(kind, Case::Sensitive))
}

/// Lexicographic operator of the given kind, ignoring case.
#[must_use]
pub fn ilex(kind: LexKind) -> OperatorRef {
    Arc::new(Lexicographic::new(kind, Case::Insensitive))
}
