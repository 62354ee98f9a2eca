//! Grammatical categories
//!
//! A [`GrammarCategories`] bitmask travels with every translated phrase. The
//! categories of one phrase are passed to the lookup of the next, so a locale
//! can pick the form of an operator that agrees with the gender or number of
//! the member it follows.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::foundation::RuleError;

/// Set of grammatical categories.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct GrammarCategories(u32);

const NAMES: &[(&str, u32)] = &[
    ("singular", 1),
    ("plural", 1 << 1),
    ("masculine", 1 << 2),
    ("feminine", 1 << 3),
    ("neuter", 1 << 4),
    ("nominative", 1 << 5),
    ("genitive", 1 << 6),
    ("dative", 1 << 7),
    ("accusative", 1 << 8),
    ("instrumental", 1 << 9),
    ("prepositional", 1 << 10),
    ("animate", 1 << 11),
    ("inanimate", 1 << 12),
];

impl GrammarCategories {
    pub const NONE: Self = Self(0);
    pub const SINGULAR: Self = Self(1);
    pub const PLURAL: Self = Self(1 << 1);
    pub const MASCULINE: Self = Self(1 << 2);
    pub const FEMININE: Self = Self(1 << 3);
    pub const NEUTER: Self = Self(1 << 4);
    pub const NOMINATIVE: Self = Self(1 << 5);
    pub const GENITIVE: Self = Self(1 << 6);
    pub const DATIVE: Self = Self(1 << 7);
    pub const ACCUSATIVE: Self = Self(1 << 8);
    pub const INSTRUMENTAL: Self = Self(1 << 9);
    pub const PREPOSITIONAL: Self = Self(1 << 10);
    pub const ANIMATE: Self = Self(1 << 11);
    pub const INANIMATE: Self = Self(1 << 12);

    #[must_use]
    pub const fn bits(self) -> u32 {
        self.0
    }

    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// True if every category of `other` is also in `self`.
    #[must_use]
    pub const fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    #[must_use]
    pub const fn union(self, other: Self) -> Self {
        Self(self.0 | other.0)
    }

    /// Number of categories in the set.
    #[must_use]
    pub const fn count(self) -> u32 {
        self.0.count_ones()
    }

    /// Parses category names such as `["feminine", "genitive"]`.
    pub fn from_names<I, S>(names: I) -> Result<Self, RuleError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        names.into_iter().try_fold(Self::NONE, |acc, name| {
            let name = name.as_ref();
            NAMES
                .iter()
                .find(|(n, _)| *n == name)
                .map(|(_, bit)| acc.union(Self(*bit)))
                .ok_or_else(|| RuleError::UnknownGrammar(name.to_string()))
        })
    }

    /// Names of the categories in the set, in declaration order.
    pub fn names(self) -> impl Iterator<Item = &'static str> {
        NAMES
            .iter()
            .filter(move |(_, bit)| self.0 & bit != 0)
            .map(|(name, _)| *name)
    }
}

impl std::ops::BitOr for GrammarCategories {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        self.union(rhs)
    }
}

impl fmt::Display for GrammarCategories {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, name) in self.names().enumerate() {
            if i > 0 {
                f.write_str("|")?;
            }
            f.write_str(name)?;
        }
        Ok(())
    }
}

impl Serialize for GrammarCategories {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.names())
    }
}

impl<'de> Deserialize<'de> for GrammarCategories {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let names = Vec::<String>::deserialize(deserializer)?;
        Self::from_names(&names).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn parse_and_display() {
        let g = GrammarCategories::from_names(["feminine", "genitive"]).unwrap();
        assert_eq!(g, GrammarCategories::FEMININE | GrammarCategories::GENITIVE);
        assert_eq!(g.to_string(), "feminine|genitive");
        assert_eq!(g.count(), 2);
    }

    #[test]
    fn unknown_name_is_an_error() {
        let err = GrammarCategories::from_names(["vocative"]).unwrap_err();
        assert!(matches!(err, RuleError::UnknownGrammar(name) if name == "vocative"));
    }

    #[test]
    fn containment() {
        let g = GrammarCategories::MASCULINE | GrammarCategories::SINGULAR;
        assert!(g.contains(GrammarCategories::MASCULINE));
        assert!(g.contains(GrammarCategories::NONE));
        assert!(!g.contains(GrammarCategories::FEMININE));
    }

    #[test]
    fn serde_uses_names() {
        let g: GrammarCategories = serde_json::from_str(r#"["plural","neuter"]"#).unwrap();
        assert_eq!(g, GrammarCategories::PLURAL | GrammarCategories::NEUTER);
        assert_eq!(serde_json::to_string(&g).unwrap(), r#"["plural","neuter"]"#);
    }
}
