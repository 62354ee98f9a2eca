//! Members: path-addressed locations in the object under validation
//!
//! A [`Member`] is built incrementally from [`member`] (or [`this`]) and is an
//! immutable value: every builder method returns a new member.
//!
//! ```rust,ignore
//! use verdict::prelude::*;
//!
//! let rule = member("level1").all().key("level3").size().gte(5);
//! ```

use std::borrow::Cow;
use std::fmt;

use smallvec::SmallVec;

use crate::foundation::RuleError;
use crate::path::{Key, Marker, Path, Quantifier, TreeSpec, Variadic};
use crate::property::Property;
use crate::report::GrammarCategories;

/// Display name for a member, with the grammar of the name itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemberName {
    pub text: Cow<'static, str>,
    pub grammar: GrammarCategories,
}

/// A display name covering keys `start..end` of the display path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct NamedSpan {
    pub(crate) name: MemberName,
    pub(crate) start: usize,
    pub(crate) end: usize,
}

/// A location in the validated object.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Member {
    path: Path,
    /// Path used for text when it differs from `path` (`ANY` expansions).
    display: Option<Path>,
    names: SmallVec<[NamedSpan; 1]>,
}

/// Starts a member path at `key`.
pub fn member(key: impl Into<Key>) -> Member {
    Member::default().key(key)
}

/// The object itself. Conditions built on it compare the object directly.
#[must_use]
pub fn this() -> Member {
    Member::default()
}

impl Member {
    /// Builds a bound member from a path. The path must not be empty.
    pub fn from_path(path: Path) -> Result<Self, RuleError> {
        if path.is_empty() {
            return Err(RuleError::EmptyPath);
        }
        Ok(Self {
            path,
            display: None,
            names: SmallVec::new(),
        })
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Path used to render the member in reports.
    #[must_use]
    pub fn display_path(&self) -> &Path {
        self.display.as_ref().unwrap_or(&self.path)
    }

    /// True for [`this()`]: the object itself.
    #[must_use]
    pub fn is_root(&self) -> bool {
        self.path.is_empty()
    }

    /// Trailing property, if the member ends with one.
    #[must_use]
    pub fn trailing_property(&self) -> Option<&Property> {
        self.path.split_property().1
    }

    /// Splits a trailing property off. The returned member addresses the
    /// object the property is read from.
    #[must_use]
    pub fn split_property(&self) -> (Member, Option<Property>) {
        let (keys, property) = self.path.split_property();
        match property {
            None => (self.clone(), None),
            Some(property) => {
                let display = self.display.as_ref().map(|d| {
                    let keys = d.keys();
                    Path::from(&keys[..keys.len().saturating_sub(1)])
                });
                let member = Self {
                    path: Path::from(keys),
                    display,
                    names: self.names.clone(),
                };
                (member, Some(property.clone()))
            }
        }
    }

    pub(crate) fn names(&self) -> &[NamedSpan] {
        &self.names
    }

    /// Dotted path recorded in the failed-member set.
    #[must_use]
    pub fn dotted(&self) -> String {
        self.path.to_string()
    }

    // ------------------------------------------------------------------------
    // Builder
    // ------------------------------------------------------------------------

    fn push(mut self, key: Key) -> Self {
        if let Some(display) = &mut self.display {
            *display = display.join(key.clone());
        }
        self.path = self.path.join(key);
        self
    }

    /// Appends a literal key (`"name"`) or any other [`Key`].
    #[must_use = "builder methods must be chained or built"]
    pub fn key(self, key: impl Into<Key>) -> Self {
        self.push(key.into())
    }

    /// Appends a sequence index.
    #[must_use = "builder methods must be chained or built"]
    pub fn index(self, index: usize) -> Self {
        self.push(Key::Index(index))
    }

    /// Every element of the container reached so far.
    #[must_use = "builder methods must be chained or built"]
    pub fn all(self) -> Self {
        self.push(Key::Marker(Marker::All))
    }

    /// At least one element of the container reached so far.
    #[must_use = "builder methods must be chained or built"]
    pub fn any(self) -> Self {
        self.push(Key::Marker(Marker::Any))
    }

    /// The object reached so far and its descendants through `children`.
    #[must_use = "builder methods must be chained or built"]
    pub fn tree(self, quantifier: Quantifier, children: impl Into<Key>) -> Self {
        self.push(Key::Marker(Marker::Tree(TreeSpec::new(quantifier, children))))
    }

    /// Tree expansion with an explicit [`TreeSpec`] (depth bound).
    #[must_use = "builder methods must be chained or built"]
    pub fn tree_with(self, spec: TreeSpec) -> Self {
        self.push(Key::Marker(Marker::Tree(spec)))
    }

    /// Indices `0..count`, `count` read from a property of the container.
    #[must_use = "builder methods must be chained or built"]
    pub fn variadic(self, quantifier: Quantifier, count: Property) -> Self {
        self.push(Key::Variadic(Variadic { quantifier, count }))
    }

    #[must_use = "builder methods must be chained or built"]
    pub fn property(self, property: Property) -> Self {
        self.push(Key::Property(property))
    }

    #[must_use = "builder methods must be chained or built"]
    pub fn size(self) -> Self {
        self.property(Property::SIZE)
    }

    #[must_use = "builder methods must be chained or built"]
    pub fn length(self) -> Self {
        self.property(Property::LENGTH)
    }

    #[must_use = "builder methods must be chained or built"]
    pub fn empty(self) -> Self {
        self.property(Property::EMPTY)
    }

    /// Gives the member a display name used instead of its path in reports.
    #[must_use = "builder methods must be chained or built"]
    pub fn named(self, name: impl Into<Cow<'static, str>>) -> Self {
        self.named_with(name, GrammarCategories::NONE)
    }

    /// Display name with grammar categories, e.g. a feminine noun.
    #[must_use = "builder methods must be chained or built"]
    pub fn named_with(
        mut self,
        name: impl Into<Cow<'static, str>>,
        grammar: GrammarCategories,
    ) -> Self {
        let end = self.display_path().len();
        self.names.clear();
        self.names.push(NamedSpan {
            name: MemberName {
                text: name.into(),
                grammar,
            },
            start: 0,
            end,
        });
        self
    }

    // ------------------------------------------------------------------------
    // Engine-side composition
    // ------------------------------------------------------------------------

    /// `self` followed by `keys`.
    pub(crate) fn extend(&self, keys: &[Key]) -> Member {
        if keys.is_empty() {
            return self.clone();
        }
        Member {
            path: self.path.concat(keys),
            display: self.display.as_ref().map(|d| d.concat(keys)),
            names: self.names.clone(),
        }
    }

    /// Adopts the display names of `bound`, a member about to be appended
    /// to `self`.
    pub(crate) fn with_names_of(&self, bound: &Member) -> Member {
        if bound.names.is_empty() {
            return self.clone();
        }
        let offset = self.display_path().len();
        let mut member = self.clone();
        member.names.extend(bound.names.iter().map(|span| NamedSpan {
            name: span.name.clone(),
            start: span.start + offset,
            end: span.end + offset,
        }));
        member
    }

    /// Element of an expansion: `concrete` keys are resolved, `display`
    /// replaces them in reports when given.
    pub(crate) fn element(&self, concrete: &[Key], display: Option<&Key>) -> Member {
        let display = match display {
            Some(marker) => Some(self.display_path().join(marker.clone())),
            None => self.display.as_ref().map(|d| d.concat(concrete)),
        };
        Member {
            path: self.path.concat(concrete),
            display,
            names: self.names.clone(),
        }
    }
}

impl From<Path> for Member {
    fn from(path: Path) -> Self {
        Self {
            path,
            display: None,
            names: SmallVec::new(),
        }
    }
}

impl fmt::Display for Member {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_is_incremental() {
        let base = member("level1");
        let deep = base.clone().all().key("level3").size();
        assert_eq!(base.path().len(), 1);
        assert_eq!(deep.path().len(), 4);
        assert_eq!(deep.trailing_property(), Some(&Property::SIZE));
    }

    #[test]
    fn split_trailing_property() {
        let (m, p) = member("field1").size().split_property();
        assert_eq!(m, member("field1"));
        assert_eq!(p, Some(Property::SIZE));

        let (m, p) = member("field1").split_property();
        assert_eq!(m, member("field1"));
        assert_eq!(p, None);
    }

    #[test]
    fn empty_path_is_rejected() {
        assert!(matches!(
            Member::from_path(Path::new()),
            Err(RuleError::EmptyPath)
        ));
        assert!(Member::from_path(Path::new().join("a")).is_ok());
    }

    #[test]
    fn element_keeps_marker_for_display() {
        let container = member("items");
        let any = container.element(&[Key::index(2)], Some(&Key::Marker(Marker::Any)));
        assert_eq!(any.dotted(), "items.2");
        assert_eq!(any.display_path().to_string(), "items.?");

        let all = container.element(&[Key::index(2)], None);
        assert_eq!(all.display_path().to_string(), "items.2");
    }

    #[test]
    fn bound_names_are_shifted() {
        let scope = member("outer");
        let bound = member("inner").named("Inner");
        let joined = scope.with_names_of(&bound).extend(bound.path().keys());
        assert_eq!(joined.dotted(), "outer.inner");
        assert_eq!(joined.names()[0].start, 1);
        assert_eq!(joined.names()[0].end, 2);
    }
}
