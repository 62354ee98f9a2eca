//! Named properties and the property registry
//!
//! A [`Property`] is a computed view of an object: its `size`, whether it is
//! `empty`, or any user-registered getter. Rules refer to properties by name;
//! the [`PropertyRegistry`] maps a name to a getter at evaluation time.

use std::borrow::Cow;
use std::collections::HashMap;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

use crate::foundation::{Target, Value};

// ============================================================================
// PROPERTY
// ============================================================================

/// Wording used when a boolean property is checked with the `flag` operator.
///
/// `empty` carries `("must be empty", "must not be empty")` so the report
/// reads "field3 must be empty" instead of "empty of field3 must be true".
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlagWording {
    pub set: Cow<'static, str>,
    pub unset: Cow<'static, str>,
}

/// A named property of an object.
///
/// Two properties are the same property when their names are equal.
#[derive(Clone)]
pub struct Property {
    name: Cow<'static, str>,
    flag: Option<FlagWording>,
}

impl Property {
    /// The object's own scalar value.
    pub const VALUE: Property = Property::builtin("value");
    /// Number of elements (containers) or characters (strings).
    pub const SIZE: Property = Property::builtin("size");
    /// Character count for strings, element count for containers.
    pub const LENGTH: Property = Property::builtin("length");
    /// Whether the object has no elements.
    pub const EMPTY: Property = Property {
        name: Cow::Borrowed("empty"),
        flag: Some(FlagWording {
            set: Cow::Borrowed("must be empty"),
            unset: Cow::Borrowed("must not be empty"),
        }),
    };

    const fn builtin(name: &'static str) -> Self {
        Self {
            name: Cow::Borrowed(name),
            flag: None,
        }
    }

    /// Creates a property referring to a registered getter.
    pub fn new(name: impl Into<Cow<'static, str>>) -> Self {
        Self {
            name: name.into(),
            flag: None,
        }
    }

    /// Attaches flag wording used by the `flag` operator.
    #[must_use = "builder methods must be chained or built"]
    pub fn with_flag_wording(
        mut self,
        set: impl Into<Cow<'static, str>>,
        unset: impl Into<Cow<'static, str>>,
    ) -> Self {
        self.flag = Some(FlagWording {
            set: set.into(),
            unset: unset.into(),
        });
        self
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn flag_wording(&self) -> Option<&FlagWording> {
        self.flag.as_ref()
    }

    /// True for the identity property `value`.
    #[must_use]
    pub fn is_value(&self) -> bool {
        self.name == "value"
    }
}

impl PartialEq for Property {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl Eq for Property {}

impl Hash for Property {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.name.hash(state);
    }
}

impl fmt::Debug for Property {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Property").field(&self.name).finish()
    }
}

impl fmt::Display for Property {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

// ============================================================================
// REGISTRY
// ============================================================================

/// Property getter: `None` means the property is not present on the object.
pub type Getter = Arc<dyn Fn(&dyn Target) -> Option<Value> + Send + Sync>;

/// Maps property names to getters.
///
/// `PropertyRegistry::default()` knows `value`, `size`, `length` and `empty`.
#[derive(Clone)]
pub struct PropertyRegistry {
    getters: HashMap<Cow<'static, str>, Getter>,
}

impl PropertyRegistry {
    /// Creates a registry without any property, not even the built-ins.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            getters: HashMap::new(),
        }
    }

    /// Registers (or replaces) a getter.
    pub fn register<F>(&mut self, name: impl Into<Cow<'static, str>>, getter: F) -> &mut Self
    where
        F: Fn(&dyn Target) -> Option<Value> + Send + Sync + 'static,
    {
        self.getters.insert(name.into(), Arc::new(getter));
        self
    }

    /// Builder-style [`register`](Self::register).
    #[must_use = "builder methods must be chained or built"]
    pub fn with<F>(mut self, name: impl Into<Cow<'static, str>>, getter: F) -> Self
    where
        F: Fn(&dyn Target) -> Option<Value> + Send + Sync + 'static,
    {
        self.register(name, getter);
        self
    }

    #[must_use]
    pub fn is_registered(&self, property: &Property) -> bool {
        self.getters.contains_key(property.name())
    }

    /// Returns true if the property can be read from the object.
    pub fn has_property(&self, object: &dyn Target, property: &Property) -> bool {
        self.get_property(object, property).is_some()
    }

    /// Reads the property, `None` if unknown or not present.
    pub fn get_property(&self, object: &dyn Target, property: &Property) -> Option<Value> {
        let getter = self.getters.get(property.name())?;
        getter(object)
    }
}

fn size_of(object: &dyn Target) -> Option<usize> {
    object
        .size()
        .or_else(|| object.scalar().and_then(|v| v.size()))
}

impl Default for PropertyRegistry {
    fn default() -> Self {
        Self::empty()
            .with("value", |object: &dyn Target| object.scalar())
            .with("size", |object| size_of(object).map(Value::from))
            .with("length", |object| {
                match object.scalar() {
                    Some(Value::Str(s)) => Some(s.chars().count()),
                    _ => size_of(object),
                }
                .map(Value::from)
            })
            .with("empty", |object| size_of(object).map(|n| Value::Bool(n == 0)))
    }
}

impl fmt::Debug for PropertyRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut names: Vec<&str> = self.getters.keys().map(AsRef::as_ref).collect();
        names.sort_unstable();
        f.debug_struct("PropertyRegistry")
            .field("properties", &names)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_size_and_empty() {
        let registry = PropertyRegistry::default();
        let items = vec![1, 2, 3];
        assert_eq!(
            registry.get_property(&items, &Property::SIZE),
            Some(Value::Int(3))
        );
        assert_eq!(
            registry.get_property(&items, &Property::EMPTY),
            Some(Value::Bool(false))
        );
        assert_eq!(
            registry.get_property(&"value1", &Property::SIZE),
            Some(Value::Int(6))
        );
    }

    #[test]
    fn scalar_has_no_size() {
        let registry = PropertyRegistry::default();
        assert!(!registry.has_property(&5, &Property::SIZE));
        assert!(registry.has_property(&5, &Property::VALUE));
    }

    #[test]
    fn value_reads_the_scalar() {
        let registry = PropertyRegistry::default();
        assert_eq!(
            registry.get_property(&7, &Property::VALUE),
            Some(Value::Int(7))
        );
        assert_eq!(registry.get_property(&vec![1], &Property::VALUE), None);
    }

    #[test]
    fn custom_getter() {
        let registry = PropertyRegistry::default().with("even", |object| {
            object
                .scalar()
                .and_then(|v| v.as_i64())
                .map(|n| Value::Bool(n % 2 == 0))
        });
        assert_eq!(
            registry.get_property(&4, &Property::new("even")),
            Some(Value::Bool(true))
        );
        assert!(!registry.has_property(&4, &Property::new("odd")));
    }

    #[test]
    fn equality_by_name() {
        let plain = Property::new("empty");
        assert_eq!(plain, Property::EMPTY);
        assert!(Property::EMPTY.flag_wording().is_some());
    }
}
