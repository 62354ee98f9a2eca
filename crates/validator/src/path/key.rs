//! Path keys and paths

use std::borrow::Cow;
use std::fmt;

use smallvec::SmallVec;

use crate::property::Property;

// ============================================================================
// KEY
// ============================================================================

/// Which quantifier an expansion applies to its elements.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Quantifier {
    /// Every element must pass.
    All,
    /// At least one element must pass.
    Any,
}

/// Tree expansion: the root itself, then its descendants found through
/// `children` in pre-order.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TreeSpec {
    pub quantifier: Quantifier,
    /// Key holding the child container of each node.
    pub children: Box<Key>,
    /// Deepest level visited; the root is depth 0.
    pub max_depth: Option<usize>,
}

impl TreeSpec {
    pub fn new(quantifier: Quantifier, children: impl Into<Key>) -> Self {
        Self {
            quantifier,
            children: Box::new(children.into()),
            max_depth: None,
        }
    }

    #[must_use = "builder methods must be chained or built"]
    pub fn with_max_depth(mut self, depth: usize) -> Self {
        self.max_depth = Some(depth);
        self
    }
}

/// Aggregation marker placed in a path.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Marker {
    All,
    Any,
    Tree(TreeSpec),
}

impl Marker {
    #[must_use]
    pub fn quantifier(&self) -> Quantifier {
        match self {
            Self::All => Quantifier::All,
            Self::Any => Quantifier::Any,
            Self::Tree(spec) => spec.quantifier,
        }
    }
}

/// Placeholder standing for indices `0..count`, where `count` is a property
/// of the container.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Variadic {
    pub quantifier: Quantifier,
    pub count: Property,
}

/// One step of a [`Path`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Key {
    /// Map key or record field.
    Name(Cow<'static, str>),
    /// Position in a sequence or tuple.
    Index(usize),
    /// Computed property of the object reached so far.
    Property(Property),
    /// Expands to the elements of the object reached so far.
    Marker(Marker),
    /// Expands to the indices given by a count property.
    Variadic(Variadic),
}

impl Key {
    pub fn name(name: impl Into<Cow<'static, str>>) -> Self {
        Self::Name(name.into())
    }

    #[must_use]
    pub const fn index(index: usize) -> Self {
        Self::Index(index)
    }

    /// True for keys resolved by a single lookup (`Name` / `Index`).
    #[must_use]
    pub const fn is_literal(&self) -> bool {
        matches!(self, Self::Name(_) | Self::Index(_))
    }

    /// True for keys that fan out into several elements.
    #[must_use]
    pub const fn is_expansion(&self) -> bool {
        matches!(self, Self::Marker(_) | Self::Variadic(_))
    }

    #[must_use]
    pub fn as_property(&self) -> Option<&Property> {
        match self {
            Self::Property(p) => Some(p),
            _ => None,
        }
    }

    /// Quantifier of an expansion key.
    #[must_use]
    pub fn quantifier(&self) -> Option<Quantifier> {
        match self {
            Self::Marker(m) => Some(m.quantifier()),
            Self::Variadic(v) => Some(v.quantifier),
            _ => None,
        }
    }

    /// Structural match where expansion keys in `self` match any key.
    #[must_use]
    pub fn matches(&self, concrete: &Self) -> bool {
        self.is_expansion() || self == concrete
    }
}

impl From<&'static str> for Key {
    fn from(name: &'static str) -> Self {
        Self::Name(Cow::Borrowed(name))
    }
}

impl From<String> for Key {
    fn from(name: String) -> Self {
        Self::Name(Cow::Owned(name))
    }
}

impl From<usize> for Key {
    fn from(index: usize) -> Self {
        Self::Index(index)
    }
}

impl From<Property> for Key {
    fn from(property: Property) -> Self {
        Self::Property(property)
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Name(name) => f.write_str(name),
            Self::Index(i) => write!(f, "{i}"),
            Self::Property(p) => write!(f, "{p}"),
            Self::Marker(Marker::All) => f.write_str("*"),
            Self::Marker(Marker::Any) => f.write_str("?"),
            Self::Marker(Marker::Tree(spec)) => write!(f, "**{}", spec.children),
            Self::Variadic(v) => write!(f, "#{}", v.count),
        }
    }
}

// ============================================================================
// EXPANSION
// ============================================================================

/// Borrowed view of an expansion key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Expansion<'k> {
    All,
    Any,
    Tree(&'k TreeSpec),
    Variadic(&'k Variadic),
}

impl<'k> Expansion<'k> {
    /// `None` for literal and property keys.
    #[must_use]
    pub fn from_key(key: &'k Key) -> Option<Self> {
        match key {
            Key::Marker(Marker::All) => Some(Self::All),
            Key::Marker(Marker::Any) => Some(Self::Any),
            Key::Marker(Marker::Tree(spec)) => Some(Self::Tree(spec)),
            Key::Variadic(variadic) => Some(Self::Variadic(variadic)),
            _ => None,
        }
    }

    #[must_use]
    pub fn quantifier(self) -> Quantifier {
        match self {
            Self::All => Quantifier::All,
            Self::Any => Quantifier::Any,
            Self::Tree(spec) => spec.quantifier,
            Self::Variadic(variadic) => variadic.quantifier,
        }
    }

    /// Key standing for every element in reports. `ALL` expansions name
    /// each element concretely and return `None`.
    #[must_use]
    pub fn display_key(self) -> Option<Key> {
        if self.quantifier() == Quantifier::All {
            return None;
        }
        Some(match self {
            Self::All | Self::Any => Key::Marker(Marker::Any),
            Self::Tree(spec) => Key::Marker(Marker::Tree(spec.clone())),
            Self::Variadic(variadic) => Key::Variadic(variadic.clone()),
        })
    }
}

// ============================================================================
// PATH
// ============================================================================

/// Immutable sequence of keys. Two paths are equal when their keys are.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Path {
    keys: SmallVec<[Key; 4]>,
}

impl Path {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn keys(&self) -> &[Key] {
        &self.keys
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// Returns a new path with `key` appended.
    #[must_use]
    pub fn join(&self, key: impl Into<Key>) -> Self {
        let mut keys = self.keys.clone();
        keys.push(key.into());
        Self { keys }
    }

    /// Returns a new path with all keys of `other` appended.
    #[must_use]
    pub fn concat(&self, other: &[Key]) -> Self {
        let mut keys = self.keys.clone();
        keys.extend(other.iter().cloned());
        Self { keys }
    }

    #[must_use]
    pub fn last(&self) -> Option<&Key> {
        self.keys.last()
    }

    /// Splits a trailing property off the path.
    #[must_use]
    pub fn split_property(&self) -> (&[Key], Option<&Property>) {
        match self.keys.split_last() {
            Some((Key::Property(p), prefix)) => (prefix, Some(p)),
            _ => (&self.keys, None),
        }
    }

    /// Index of the first expansion key.
    #[must_use]
    pub fn first_expansion(&self) -> Option<usize> {
        self.keys.iter().position(Key::is_expansion)
    }

    #[must_use]
    pub fn starts_with(&self, prefix: &[Key]) -> bool {
        self.keys.starts_with(prefix)
    }

    /// True if `self`, read as a pattern, matches `concrete` key by key.
    /// Expansion keys in the pattern match any key.
    #[must_use]
    pub fn matches(&self, concrete: &[Key]) -> bool {
        self.keys.len() == concrete.len()
            && self.keys.iter().zip(concrete).all(|(p, c)| p.matches(c))
    }

    /// Like [`matches`](Self::matches) but only for the leading part of
    /// `concrete`.
    #[must_use]
    pub fn matches_prefix_of(&self, concrete: &[Key]) -> bool {
        self.keys.len() <= concrete.len()
            && self.keys.iter().zip(concrete).all(|(p, c)| p.matches(c))
    }
}

impl FromIterator<Key> for Path {
    fn from_iter<I: IntoIterator<Item = Key>>(iter: I) -> Self {
        Self {
            keys: iter.into_iter().collect(),
        }
    }
}

impl From<&[Key]> for Path {
    fn from(keys: &[Key]) -> Self {
        keys.iter().cloned().collect()
    }
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, key) in self.keys.iter().enumerate() {
            if i > 0 {
                f.write_str(".")?;
            }
            write!(f, "{key}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn path(keys: impl IntoIterator<Item = Key>) -> Path {
        keys.into_iter().collect()
    }

    #[test]
    fn dotted_display() {
        let p = path([Key::from("level1"), Key::from("level2_2"), Key::from("level3")]);
        assert_eq!(p.to_string(), "level1.level2_2.level3");
        assert_eq!(path([Key::from("field1"), Key::index(1)]).to_string(), "field1.1");
    }

    #[test]
    fn structural_equality() {
        let a = path([Key::from("a"), Key::index(0)]);
        let b = Path::new().join("a").join(0_usize);
        assert_eq!(a, b);
        assert_ne!(a, path([Key::from("a"), Key::index(1)]));
    }

    #[test]
    fn split_trailing_property() {
        let p = path([Key::from("a"), Key::Property(Property::SIZE)]);
        let (prefix, property) = p.split_property();
        assert_eq!(prefix, &[Key::from("a")]);
        assert_eq!(property, Some(&Property::SIZE));

        let q = path([Key::from("a")]);
        assert_eq!(q.split_property().1, None);
    }

    #[test]
    fn markers_match_any_key() {
        let pattern = path([Key::from("items"), Key::Marker(Marker::All), Key::from("id")]);
        assert!(pattern.matches(&[Key::from("items"), Key::index(3), Key::from("id")]));
        assert!(!pattern.matches(&[Key::from("items"), Key::index(3), Key::from("name")]));
        assert!(!pattern.matches(&[Key::from("items"), Key::index(3)]));
        assert!(pattern.matches_prefix_of(&[
            Key::from("items"),
            Key::index(3),
            Key::from("id"),
            Key::Property(Property::SIZE),
        ]));
    }
}
