//! Tri-state validation status
//!
//! Every operation of the engine answers with a [`Status`]. Besides the usual
//! pass/fail pair there is [`Status::Ignore`]: the rule did not apply to the
//! object (missing optional member, incomparable types, empty `ANY`). Ignore is
//! never conflated with either of the other two states.

use std::fmt;
use std::ops::Not;

use serde::{Deserialize, Serialize};

/// Result of evaluating a rule (or a part of it) against an object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Status {
    /// The rule holds.
    #[default]
    Success,
    /// The rule is violated.
    Fail,
    /// The rule is not applicable to the object.
    Ignore,
}

impl Status {
    /// Maps a boolean verdict to `Success` / `Fail`.
    #[must_use]
    pub const fn from_bool(ok: bool) -> Self {
        if ok { Self::Success } else { Self::Fail }
    }

    /// Maps an optional verdict: `None` (not comparable) becomes `Ignore`.
    #[must_use]
    pub const fn from_option(verdict: Option<bool>) -> Self {
        match verdict {
            Some(ok) => Self::from_bool(ok),
            None => Self::Ignore,
        }
    }

    #[must_use]
    pub const fn is_success(self) -> bool {
        matches!(self, Self::Success)
    }

    #[must_use]
    pub const fn is_fail(self) -> bool {
        matches!(self, Self::Fail)
    }

    #[must_use]
    pub const fn is_ignore(self) -> bool {
        matches!(self, Self::Ignore)
    }

    /// Logical negation. `Ignore` stays `Ignore`.
    #[must_use]
    pub const fn negate(self) -> Self {
        match self {
            Self::Success => Self::Fail,
            Self::Fail => Self::Success,
            Self::Ignore => Self::Ignore,
        }
    }

    /// Conjunction over a lazily evaluated sequence.
    ///
    /// Stops pulling from the iterator at the first `Fail`. Otherwise the
    /// result is `Success` if at least one element succeeded, `Ignore` if all
    /// of them were ignored. An empty sequence is `Success`.
    pub fn and_fold<I>(statuses: I) -> Self
    where
        I: IntoIterator<Item = Self>,
    {
        let mut seen = false;
        let mut any_success = false;
        for status in statuses {
            seen = true;
            match status {
                Self::Fail => return Self::Fail,
                Self::Success => any_success = true,
                Self::Ignore => {}
            }
        }
        if !seen || any_success {
            Self::Success
        } else {
            Self::Ignore
        }
    }

    /// Disjunction over a lazily evaluated sequence.
    ///
    /// Stops at the first `Success`. Otherwise `Fail` if at least one element
    /// failed, `Ignore` if all of them were ignored. An empty sequence is
    /// vacuously `Success`.
    pub fn or_fold<I>(statuses: I) -> Self
    where
        I: IntoIterator<Item = Self>,
    {
        let mut seen = false;
        let mut any_fail = false;
        for status in statuses {
            seen = true;
            match status {
                Self::Success => return Self::Success,
                Self::Fail => any_fail = true,
                Self::Ignore => {}
            }
        }
        if !seen {
            Self::Success
        } else if any_fail {
            Self::Fail
        } else {
            Self::Ignore
        }
    }
}

impl Not for Status {
    type Output = Self;

    fn not(self) -> Self {
        self.negate()
    }
}

impl From<bool> for Status {
    fn from(ok: bool) -> Self {
        Self::from_bool(ok)
    }
}

impl From<Status> for bool {
    fn from(status: Status) -> Self {
        status.is_success()
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Success => "success",
            Self::Fail => "fail",
            Self::Ignore => "ignore",
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn negation_keeps_ignore() {
        assert_eq!(!Status::Success, Status::Fail);
        assert_eq!(!Status::Fail, Status::Success);
        assert_eq!(!Status::Ignore, Status::Ignore);
    }

    #[test]
    fn empty_folds_are_success() {
        assert_eq!(Status::and_fold([]), Status::Success);
        assert_eq!(Status::or_fold([]), Status::Success);
    }

    #[test]
    fn all_ignored_folds_to_ignore() {
        assert_eq!(
            Status::and_fold([Status::Ignore, Status::Ignore]),
            Status::Ignore
        );
        assert_eq!(
            Status::or_fold([Status::Ignore, Status::Ignore]),
            Status::Ignore
        );
    }

    #[test]
    fn and_fold_stops_at_first_fail() {
        let pulled = Cell::new(0);
        let statuses = [Status::Success, Status::Fail, Status::Success];
        let result = Status::and_fold(statuses.iter().map(|s| {
            pulled.set(pulled.get() + 1);
            *s
        }));
        assert_eq!(result, Status::Fail);
        assert_eq!(pulled.get(), 2);
    }

    #[test]
    fn or_fold_stops_at_first_success() {
        let pulled = Cell::new(0);
        let statuses = [Status::Ignore, Status::Success, Status::Fail];
        let result = Status::or_fold(statuses.iter().map(|s| {
            pulled.set(pulled.get() + 1);
            *s
        }));
        assert_eq!(result, Status::Success);
        assert_eq!(pulled.get(), 2);
    }

    #[test]
    fn bool_coercion() {
        assert!(bool::from(Status::Success));
        assert!(!bool::from(Status::Fail));
        assert!(!bool::from(Status::Ignore));
    }
}
