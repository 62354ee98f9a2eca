//! Value comparisons

use std::borrow::Cow;
use std::cmp::Ordering;

use crate::foundation::Value;
use crate::operators::Operator;

/// The standard comparison catalogue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Comparison {
    Eq,
    Ne,
    Lt,
    Lte,
    Gt,
    Gte,
    /// Member of an interval or range.
    In,
    NotIn,
    /// Boolean flag compared with the expected state.
    Flag,
}

impl Comparison {
    fn order(lhs: &Value, rhs: &Value) -> Option<Ordering> {
        lhs.compare(rhs)
    }
}

impl Operator for Comparison {
    fn name(&self) -> &'static str {
        match self {
            Self::Eq => "eq",
            Self::Ne => "ne",
            Self::Lt => "lt",
            Self::Lte => "lte",
            Self::Gt => "gt",
            Self::Gte => "gte",
            Self::In => "in",
            Self::NotIn => "nin",
            Self::Flag => "flag",
        }
    }

    fn apply(&self, lhs: &Value, rhs: &Value) -> Option<bool> {
        match self {
            Self::Eq => Self::order(lhs, rhs).map(Ordering::is_eq),
            Self::Ne => Self::order(lhs, rhs).map(Ordering::is_ne),
            Self::Lt => Self::order(lhs, rhs).map(Ordering::is_lt),
            Self::Lte => Self::order(lhs, rhs).map(Ordering::is_le),
            Self::Gt => Self::order(lhs, rhs).map(Ordering::is_gt),
            Self::Gte => Self::order(lhs, rhs).map(Ordering::is_ge),
            Self::In => rhs.contains(lhs),
            Self::NotIn => rhs.contains(lhs).map(|found| !found),
            Self::Flag => Some(lhs.as_bool()? == rhs.as_bool()?),
        }
    }

    fn description(&self) -> &str {
        match self {
            Self::Eq => "must be equal to",
            Self::Ne => "must be not equal to",
            Self::Lt => "must be less than",
            Self::Lte => "must be less than or equal to",
            Self::Gt => "must be greater than",
            Self::Gte => "must be greater than or equal to",
            Self::In => "must be in",
            Self::NotIn => "must be not in",
            Self::Flag => "must be true",
        }
    }

    fn negated_description(&self) -> &str {
        match self {
            Self::Eq => "must be not equal to",
            Self::Ne => "must be equal to",
            Self::Lt => "must be greater than or equal to",
            Self::Lte => "must be greater than",
            Self::Gt => "must be less than or equal to",
            Self::Gte => "must be less than",
            Self::In => "must be not in",
            Self::NotIn => "must be in",
            Self::Flag => "must be false",
        }
    }

    fn describe(&self, rhs: &Value, negated: bool) -> (Cow<'_, str>, bool) {
        let show = *self != Self::Flag;
        let expected = match (self, rhs) {
            (Self::Flag, Value::Bool(value)) => *value,
            _ => true,
        };
        let text = if expected != negated {
            self.description()
        } else {
            self.negated_description()
        };
        (Cow::Borrowed(text), show)
    }
}
