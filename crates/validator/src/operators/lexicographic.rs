//! Lexicographic string operators

use std::borrow::Cow;
use std::cmp::Ordering;

use crate::foundation::Value;
use crate::operators::Operator;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LexKind {
    Eq,
    Ne,
    Lt,
    Lte,
    Gt,
    Gte,
    Contains,
    StartsWith,
    EndsWith,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Case {
    #[default]
    Sensitive,
    Insensitive,
}

/// Compares the text form of both operands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Lexicographic {
    kind: LexKind,
    case: Case,
}

impl Lexicographic {
    #[must_use]
    pub const fn new(kind: LexKind, case: Case) -> Self {
        Self { kind, case }
    }

    fn fold<'v>(&self, text: Cow<'v, str>) -> Cow<'v, str> {
        match self.case {
            Case::Sensitive => text,
            Case::Insensitive => Cow::Owned(text.to_lowercase()),
        }
    }
}

impl Operator for Lexicographic {
    fn name(&self) -> &'static str {
        match (self.kind, self.case) {
            (LexKind::Eq, Case::Sensitive) => "lex_eq",
            (LexKind::Ne, Case::Sensitive) => "lex_ne",
            (LexKind::Lt, Case::Sensitive) => "lex_lt",
            (LexKind::Lte, Case::Sensitive) => "lex_lte",
            (LexKind::Gt, Case::Sensitive) => "lex_gt",
            (LexKind::Gte, Case::Sensitive) => "lex_gte",
            (LexKind::Contains, Case::Sensitive) => "lex_contains",
            (LexKind::StartsWith, Case::Sensitive) => "lex_starts_with",
            (LexKind::EndsWith, Case::Sensitive) => "lex_ends_with",
            (LexKind::Eq, Case::Insensitive) => "ilex_eq",
            (LexKind::Ne, Case::Insensitive) => "ilex_ne",
            (LexKind::Lt, Case::Insensitive) => "ilex_lt",
            (LexKind::Lte, Case::Insensitive) => "ilex_lte",
            (LexKind::Gt, Case::Insensitive) => "ilex_gt",
            (LexKind::Gte, Case::Insensitive) => "ilex_gte",
            (LexKind::Contains, Case::Insensitive) => "ilex_contains",
            (LexKind::StartsWith, Case::Insensitive) => "ilex_starts_with",
            (LexKind::EndsWith, Case::Insensitive) => "ilex_ends_with",
        }
    }

    fn apply(&self, lhs: &Value, rhs: &Value) -> Option<bool> {
        let lhs = self.fold(lhs.to_text()?);
        let rhs = self.fold(rhs.to_text()?);
        let order = || lhs.cmp(&rhs);
        Some(match self.kind {
            LexKind::Eq => lhs == rhs,
            LexKind::Ne => lhs != rhs,
            LexKind::Lt => order() == Ordering::Less,
            LexKind::Lte => order() != Ordering::Greater,
            LexKind::Gt => order() == Ordering::Greater,
            LexKind::Gte => order() != Ordering::Less,
            LexKind::Contains => lhs.contains(&*rhs),
            LexKind::StartsWith => lhs.starts_with(&*rhs),
            LexKind::EndsWith => lhs.ends_with(&*rhs),
        })
    }

    fn description(&self) -> &str {
        match (self.kind, self.case) {
            (LexKind::Eq, Case::Sensitive) => "must be lexicographically equal to",
            (LexKind::Ne, Case::Sensitive) => "must be lexicographically not equal to",
            (LexKind::Lt, Case::Sensitive) => "must be lexicographically less than",
            (LexKind::Lte, Case::Sensitive) => "must be lexicographically less than or equal to",
            (LexKind::Gt, Case::Sensitive) => "must be lexicographically greater than",
            (LexKind::Gte, Case::Sensitive) => {
                "must be lexicographically greater than or equal to"
            }
            (LexKind::Contains, Case::Sensitive) => "must contain",
            (LexKind::StartsWith, Case::Sensitive) => "must start with",
            (LexKind::EndsWith, Case::Sensitive) => "must end with",
            (LexKind::Eq, Case::Insensitive) => "must be equal to, ignoring case,",
            (LexKind::Ne, Case::Insensitive) => "must be not equal to, ignoring case,",
            (LexKind::Lt, Case::Insensitive) => "must be less than, ignoring case,",
            (LexKind::Lte, Case::Insensitive) => "must be less than or equal to, ignoring case,",
            (LexKind::Gt, Case::Insensitive) => "must be greater than, ignoring case,",
            (LexKind::Gte, Case::Insensitive) => {
                "must be greater than or equal to, ignoring case,"
            }
            (LexKind::Contains, Case::Insensitive) => "must contain, ignoring case,",
            (LexKind::StartsWith, Case::Insensitive) => "must start with, ignoring case,",
            (LexKind::EndsWith, Case::Insensitive) => "must end with, ignoring case,",
        }
    }

    fn negated_description(&self) -> &str {
        match (self.kind, self.case) {
            (LexKind::Eq, Case::Sensitive) => "must be lexicographically not equal to",
            (LexKind::Ne, Case::Sensitive) => "must be lexicographically equal to",
            (LexKind::Lt, Case::Sensitive) => "must be lexicographically greater than or equal to",
            (LexKind::Lte, Case::Sensitive) => "must be lexicographically greater than",
            (LexKind::Gt, Case::Sensitive) => "must be lexicographically less than or equal to",
            (LexKind::Gte, Case::Sensitive) => "must be lexicographically less than",
            (LexKind::Contains, Case::Sensitive) => "must not contain",
            (LexKind::StartsWith, Case::Sensitive) => "must not start with",
            (LexKind::EndsWith, Case::Sensitive) => "must not end with",
            (LexKind::Eq, Case::Insensitive) => "must be not equal to, ignoring case,",
            (LexKind::Ne, Case::Insensitive) => "must be equal to, ignoring case,",
            (LexKind::Lt, Case::Insensitive) => {
                "must be greater than or equal to, ignoring case,"
            }
            (LexKind::Lte, Case::Insensitive) => "must be greater than, ignoring case,",
            (LexKind::Gt, Case::Insensitive) => "must be less than or equal to, ignoring case,",
            (LexKind::Gte, Case::Insensitive) => "must be less than, ignoring case,",
            (LexKind::Contains, Case::Insensitive) => "must not contain, ignoring case,",
            (LexKind::StartsWith, Case::Insensitive) => "must not start with, ignoring case,",
            (LexKind::EndsWith, Case::Insensitive) => "must not end with, ignoring case,",
        }
    }
}
