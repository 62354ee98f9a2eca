//! Object model traits
//!
//! The engine never knows the concrete type of the object under validation.
//! It walks it through [`Target`], a small object-safe reflection interface:
//! a scalar view for comparisons, keyed child access for path resolution and
//! element iteration for `ANY` / `ALL` / tree expansion.
//!
//! Implementations exist for scalars, strings, standard containers, tuples
//! (heterogeneous containers addressed by index), `serde_json::Value` and the
//! owned [`Value`]. Structs opt in with the [`record!`](crate::record) macro.

use crate::foundation::Value;
use crate::path::Key;

/// Iterator over the `(key, element)` pairs of a container.
pub type Elements<'a> = Box<dyn Iterator<Item = (Key, &'a dyn Target)> + 'a>;

// ============================================================================
// TARGET TRAIT
// ============================================================================

/// A value the engine can inspect.
///
/// All methods have conservative defaults so scalar types only implement
/// [`scalar`](Target::scalar) and containers only the access methods.
///
/// # Examples
///
/// ```rust,ignore
/// use verdict::foundation::{Target, Value};
///
/// struct Celsius(f64);
///
/// impl Target for Celsius {
///     fn scalar(&self) -> Option<Value> {
///         Some(Value::Float(self.0))
///     }
/// }
/// ```
pub trait Target {
    /// Scalar view of the object, if it has one.
    fn scalar(&self) -> Option<Value> {
        None
    }

    /// Looks up a direct child by literal key (`Key::Name` / `Key::Index`).
    fn child(&self, key: &Key) -> Option<&dyn Target> {
        let _ = key;
        None
    }

    /// Number of children for containers.
    fn size(&self) -> Option<usize> {
        None
    }

    /// Iterates children in container order. `None` means "not a container".
    fn elements(&self) -> Option<Elements<'_>> {
        None
    }

    /// Returns true if the object can be iterated by `ANY` / `ALL`.
    fn is_container(&self) -> bool {
        self.elements().is_some()
    }
}

impl std::fmt::Debug for dyn Target + '_ {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.scalar() {
            Some(value) => write!(f, "Target({value})"),
            None => write!(f, "Target(size: {:?})", self.size()),
        }
    }
}

// ============================================================================
// FORWARDING IMPLS
// ============================================================================

macro_rules! forward_target {
    ($($wrapper:ty),* $(,)?) => {
        $(
            impl<T: Target + ?Sized> Target for $wrapper {
                fn scalar(&self) -> Option<Value> {
                    (**self).scalar()
                }

                fn child(&self, key: &Key) -> Option<&dyn Target> {
                    (**self).child(key)
                }

                fn size(&self) -> Option<usize> {
                    (**self).size()
                }

                fn elements(&self) -> Option<Elements<'_>> {
                    (**self).elements()
                }
            }
        )*
    };
}

forward_target!(&T, Box<T>, std::rc::Rc<T>, std::sync::Arc<T>);

impl<T: Target> Target for Option<T> {
    fn scalar(&self) -> Option<Value> {
        match self {
            Some(inner) => inner.scalar(),
            None => Some(Value::Null),
        }
    }

    fn child(&self, key: &Key) -> Option<&dyn Target> {
        self.as_ref().and_then(|inner| inner.child(key))
    }

    fn size(&self) -> Option<usize> {
        self.as_ref().and_then(Target::size)
    }

    fn elements(&self) -> Option<Elements<'_>> {
        self.as_ref().and_then(Target::elements)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Celsius(f64);

    impl Target for Celsius {
        fn scalar(&self) -> Option<Value> {
            Some(Value::Float(self.0))
        }
    }

    #[test]
    fn defaults_describe_a_scalar() {
        let t = Celsius(21.5);
        assert_eq!(t.scalar(), Some(Value::Float(21.5)));
        assert!(t.child(&Key::index(0)).is_none());
        assert!(!t.is_container());
    }

    #[test]
    fn option_none_is_null() {
        let missing: Option<Celsius> = None;
        assert_eq!(missing.scalar(), Some(Value::Null));
        assert!(missing.size().is_none());
    }
}
