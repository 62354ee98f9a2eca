//! [`Target`] implementations for standard library types

use std::borrow::Cow;
use std::collections::{BTreeMap, HashMap};
use std::hash::BuildHasher;

use crate::foundation::traits::Elements;
use crate::foundation::{Target, Value};
use crate::path::Key;

// ============================================================================
// SCALARS
// ============================================================================

macro_rules! scalar_target {
    ($($ty:ty),* $(,)?) => {
        $(
            impl Target for $ty {
                fn scalar(&self) -> Option<Value> {
                    Some(Value::from(*self))
                }
            }
        )*
    };
}

scalar_target!(
    i8, i16, i32, i64, isize, u8, u16, u32, u64, usize, f32, f64, bool
);

impl Target for str {
    fn scalar(&self) -> Option<Value> {
        Some(Value::Str(Cow::Owned(self.to_owned())))
    }
}

impl Target for String {
    fn scalar(&self) -> Option<Value> {
        Some(Value::Str(Cow::Owned(self.clone())))
    }
}

impl Target for Cow<'_, str> {
    fn scalar(&self) -> Option<Value> {
        Some(Value::Str(Cow::Owned(self.to_string())))
    }
}

// ============================================================================
// SEQUENCES
// ============================================================================

fn indexed<T: Target>(items: &[T]) -> Elements<'_> {
    Box::new(
        items
            .iter()
            .enumerate()
            .map(|(i, item)| (Key::Index(i), item as &dyn Target)),
    )
}

impl<T: Target> Target for [T] {
    fn child(&self, key: &Key) -> Option<&dyn Target> {
        match key {
            Key::Index(i) => self.get(*i).map(|item| item as &dyn Target),
            _ => None,
        }
    }

    fn size(&self) -> Option<usize> {
        Some(self.len())
    }

    fn elements(&self) -> Option<Elements<'_>> {
        Some(indexed(self))
    }
}

impl<T: Target> Target for Vec<T> {
    fn child(&self, key: &Key) -> Option<&dyn Target> {
        self.as_slice().child(key)
    }

    fn size(&self) -> Option<usize> {
        Some(self.len())
    }

    fn elements(&self) -> Option<Elements<'_>> {
        Some(indexed(self))
    }
}

impl<T: Target, const N: usize> Target for [T; N] {
    fn child(&self, key: &Key) -> Option<&dyn Target> {
        self.as_slice().child(key)
    }

    fn size(&self) -> Option<usize> {
        Some(N)
    }

    fn elements(&self) -> Option<Elements<'_>> {
        Some(indexed(self))
    }
}

// ============================================================================
// MAPS
// ============================================================================

fn named<'a, T, I>(entries: I) -> Elements<'a>
where
    T: Target + 'a,
    I: Iterator<Item = (&'a String, &'a T)> + 'a,
{
    Box::new(entries.map(|(k, v)| (Key::Name(Cow::Owned(k.clone())), v as &dyn Target)))
}

impl<T: Target> Target for BTreeMap<String, T> {
    fn child(&self, key: &Key) -> Option<&dyn Target> {
        match key {
            Key::Name(name) => self.get(&**name).map(|v| v as &dyn Target),
            _ => None,
        }
    }

    fn size(&self) -> Option<usize> {
        Some(self.len())
    }

    fn elements(&self) -> Option<Elements<'_>> {
        Some(named(self.iter()))
    }
}

impl<T: Target, S: BuildHasher> Target for HashMap<String, T, S> {
    fn child(&self, key: &Key) -> Option<&dyn Target> {
        match key {
            Key::Name(name) => self.get(&**name).map(|v| v as &dyn Target),
            _ => None,
        }
    }

    fn size(&self) -> Option<usize> {
        Some(self.len())
    }

    fn elements(&self) -> Option<Elements<'_>> {
        Some(named(self.iter()))
    }
}

// ============================================================================
// HETEROGENEOUS TUPLES
// ============================================================================
//
// Tuples are addressed by position only. Each element keeps its own static
// type behind `&dyn Target`, so a rule such as `member(1).size().gt(0)` works
// on `(i32, String, Vec<u8>)` without any per-evaluation type lookup.

macro_rules! tuple_target {
    ($len:expr; $($idx:tt $name:ident),+) => {
        impl<$($name: Target),+> Target for ($($name,)+) {
            fn child(&self, key: &Key) -> Option<&dyn Target> {
                match key {
                    $(Key::Index($idx) => Some(&self.$idx as &dyn Target),)+
                    _ => None,
                }
            }

            fn size(&self) -> Option<usize> {
                Some($len)
            }

            fn elements(&self) -> Option<Elements<'_>> {
                let items: Vec<(Key, &dyn Target)> =
                    vec![$((Key::Index($idx), &self.$idx as &dyn Target)),+];
                Some(Box::new(items.into_iter()))
            }
        }
    };
}

tuple_target!(1; 0 A);
tuple_target!(2; 0 A, 1 B);
tuple_target!(3; 0 A, 1 B, 2 C);
tuple_target!(4; 0 A, 1 B, 2 C, 3 D);
tuple_target!(5; 0 A, 1 B, 2 C, 3 D, 4 E);
tuple_target!(6; 0 A, 1 B, 2 C, 3 D, 4 E, 5 F);

// ============================================================================
// OWNED VALUE
// ============================================================================

impl Target for Value {
    fn scalar(&self) -> Option<Value> {
        Some(self.clone())
    }

    fn child(&self, key: &Key) -> Option<&dyn Target> {
        match (self, key) {
            (Value::List(items), Key::Index(i)) => items.get(*i).map(|v| v as &dyn Target),
            _ => None,
        }
    }

    fn size(&self) -> Option<usize> {
        match self {
            Value::List(items) => Some(items.len()),
            _ => None,
        }
    }

    fn elements(&self) -> Option<Elements<'_>> {
        match self {
            Value::List(items) => Some(indexed(items)),
            _ => None,
        }
    }
}
