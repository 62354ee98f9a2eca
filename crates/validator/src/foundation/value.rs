//! Owned scalar values
//!
//! [`Value`] is what leaves of a rule compare: the scalar view of a resolved
//! member, the result of a property getter, or a literal operand stored in the
//! rule tree.

use std::borrow::Cow;
use std::cmp::Ordering;
use std::fmt;

// ============================================================================
// VALUE
// ============================================================================

/// A comparable value.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(Cow<'static, str>),
    /// A finite set of values, formatted as `range [a, b, c]`.
    List(Vec<Value>),
    /// A continuous interval, formatted as `interval [a,b]`.
    Interval(Box<Interval>),
}

impl Value {
    /// Creates a string value.
    pub fn str(text: impl Into<Cow<'static, str>>) -> Self {
        Self::Str(text.into())
    }

    /// Builds a `range [..]` operand from any iterable of convertible items.
    pub fn list<I, T>(items: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<Value>,
    {
        Self::List(items.into_iter().map(Into::into).collect())
    }

    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Str(s) => Some(s),
            _ => None,
        }
    }

    #[must_use]
    pub const fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }

    #[must_use]
    pub const fn as_i64(&self) -> Option<i64> {
        match self {
            Self::Int(i) => Some(*i),
            _ => None,
        }
    }

    /// Numeric view used for mixed int/float comparison.
    #[must_use]
    pub const fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Int(i) => Some(*i as f64),
            Self::Float(f) => Some(*f),
            _ => None,
        }
    }

    /// Returns the number of elements for sized values.
    #[must_use]
    pub fn size(&self) -> Option<usize> {
        match self {
            Self::Str(s) => Some(s.chars().count()),
            Self::List(items) => Some(items.len()),
            _ => None,
        }
    }

    /// Orders two values of compatible kinds.
    ///
    /// Integers and floats compare numerically with each other. Values of
    /// unrelated kinds (or `NaN`) are not comparable and yield `None`.
    #[must_use]
    pub fn compare(&self, other: &Value) -> Option<Ordering> {
        match (self, other) {
            (Self::Null, Self::Null) => Some(Ordering::Equal),
            (Self::Bool(a), Self::Bool(b)) => Some(a.cmp(b)),
            (Self::Int(a), Self::Int(b)) => Some(a.cmp(b)),
            (Self::Str(a), Self::Str(b)) => Some(a.cmp(b)),
            (Self::List(a), Self::List(b)) => {
                for (x, y) in a.iter().zip(b) {
                    match x.compare(y)? {
                        Ordering::Equal => {}
                        unequal => return Some(unequal),
                    }
                }
                Some(a.len().cmp(&b.len()))
            }
            (a, b) => match (a.as_f64(), b.as_f64()) {
                (Some(x), Some(y)) => x.partial_cmp(&y),
                _ => None,
            },
        }
    }

    /// Membership test for `in` operands: intervals and ranges.
    ///
    /// Returns `None` when `self` is neither an interval nor a range, or when
    /// the tested value cannot be compared with the bounds.
    #[must_use]
    pub fn contains(&self, item: &Value) -> Option<bool> {
        match self {
            Self::Interval(interval) => interval.contains(item),
            Self::List(items) => {
                let mut comparable = false;
                for candidate in items {
                    match item.compare(candidate) {
                        Some(Ordering::Equal) => return Some(true),
                        Some(_) => comparable = true,
                        None => {}
                    }
                }
                comparable.then_some(false)
            }
            _ => None,
        }
    }

    /// Text form used by lexicographic operators.
    #[must_use]
    pub fn to_text(&self) -> Option<Cow<'_, str>> {
        match self {
            Self::Str(s) => Some(Cow::Borrowed(s.as_ref())),
            Self::Int(_) | Self::Float(_) | Self::Bool(_) => Some(Cow::Owned(self.to_string())),
            _ => None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => f.write_str("null"),
            Self::Bool(b) => write!(f, "{b}"),
            Self::Int(i) => write!(f, "{i}"),
            Self::Float(x) => write!(f, "{x}"),
            Self::Str(s) => f.write_str(s),
            Self::List(items) => {
                f.write_str("[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{item}")?;
                }
                f.write_str("]")
            }
            Self::Interval(interval) => write!(f, "{interval}"),
        }
    }
}

// ============================================================================
// INTERVAL
// ============================================================================

/// A closed, open or half-open interval between two comparable bounds.
#[derive(Debug, Clone, PartialEq)]
pub struct Interval {
    pub from: Value,
    pub to: Value,
    pub open_from: bool,
    pub open_to: bool,
}

impl Interval {
    /// Closed interval `[from,to]`.
    pub fn closed(from: impl Into<Value>, to: impl Into<Value>) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
            open_from: false,
            open_to: false,
        }
    }

    /// Open interval `(from,to)`.
    pub fn open(from: impl Into<Value>, to: impl Into<Value>) -> Self {
        Self {
            open_from: true,
            open_to: true,
            ..Self::closed(from, to)
        }
    }

    #[must_use]
    pub fn open_from(mut self) -> Self {
        self.open_from = true;
        self
    }

    #[must_use]
    pub fn open_to(mut self) -> Self {
        self.open_to = true;
        self
    }

    #[must_use]
    pub fn contains(&self, item: &Value) -> Option<bool> {
        let lower = item.compare(&self.from)?;
        let upper = item.compare(&self.to)?;
        let above = if self.open_from {
            lower == Ordering::Greater
        } else {
            lower != Ordering::Less
        };
        let below = if self.open_to {
            upper == Ordering::Less
        } else {
            upper != Ordering::Greater
        };
        Some(above && below)
    }
}

impl fmt::Display for Interval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}{},{}{}",
            if self.open_from { '(' } else { '[' },
            self.from,
            self.to,
            if self.open_to { ')' } else { ']' }
        )
    }
}

/// Shorthand for [`Interval::closed`] wrapped into a [`Value`].
pub fn interval(from: impl Into<Value>, to: impl Into<Value>) -> Value {
    Value::Interval(Box::new(Interval::closed(from, to)))
}

/// Shorthand for [`Value::list`].
pub fn range<I, T>(items: I) -> Value
where
    I: IntoIterator<Item = T>,
    T: Into<Value>,
{
    Value::list(items)
}

// ============================================================================
// CONVERSIONS
// ============================================================================

macro_rules! int_into_value {
    ($($ty:ty),* $(,)?) => {
        $(
            impl From<$ty> for Value {
                fn from(v: $ty) -> Self {
                    Value::Int(v as i64)
                }
            }
        )*
    };
}

int_into_value!(i8, i16, i32, i64, u8, u16, u32, isize);

impl From<u64> for Value {
    fn from(v: u64) -> Self {
        i64::try_from(v).map_or(Value::Float(v as f64), Value::Int)
    }
}

impl From<usize> for Value {
    fn from(v: usize) -> Self {
        Value::from(v as u64)
    }
}

impl From<f32> for Value {
    fn from(v: f32) -> Self {
        Value::Float(f64::from(v))
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Float(v)
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Bool(v)
    }
}

impl From<&'static str> for Value {
    fn from(v: &'static str) -> Self {
        Value::Str(Cow::Borrowed(v))
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::Str(Cow::Owned(v))
    }
}

impl From<Interval> for Value {
    fn from(v: Interval) -> Self {
        Value::Interval(Box::new(v))
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(v: Vec<T>) -> Self {
        Value::list(v)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        v.map_or(Value::Null, Into::into)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mixed_numeric_comparison() {
        assert_eq!(
            Value::Int(3).compare(&Value::Float(2.5)),
            Some(Ordering::Greater)
        );
        assert_eq!(Value::Int(3).compare(&Value::str("3")), None);
    }

    #[test]
    fn closed_interval_membership() {
        let iv = Interval::closed(95, 100);
        assert_eq!(iv.contains(&Value::Int(95)), Some(true));
        assert_eq!(iv.contains(&Value::Int(100)), Some(true));
        assert_eq!(iv.contains(&Value::Int(90)), Some(false));
        assert_eq!(iv.contains(&Value::str("x")), None);
    }

    #[test]
    fn open_interval_excludes_bounds() {
        let iv = Interval::open(1, 5);
        assert_eq!(iv.contains(&Value::Int(1)), Some(false));
        assert_eq!(iv.contains(&Value::Int(3)), Some(true));
        assert_eq!(iv.to_string(), "(1,5)");
    }

    #[test]
    fn interval_display() {
        assert_eq!(interval(95, 100).to_string(), "[95,100]");
        assert_eq!(Interval::closed(1, 2).open_to().to_string(), "[1,2)");
    }

    #[test]
    fn range_membership_and_display() {
        let r = range([10, 20, 30]);
        assert_eq!(r.contains(&Value::Int(20)), Some(true));
        assert_eq!(r.contains(&Value::Int(25)), Some(false));
        assert_eq!(r.to_string(), "[10, 20, 30]");
    }

    #[test]
    fn string_size_counts_chars() {
        assert_eq!(Value::str("héllo").size(), Some(5));
    }
}
