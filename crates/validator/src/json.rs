//! JSON documents as validation targets.
//!
//! `serde_json::Value` implements [`Target`]: objects are addressed by name,
//! arrays by index, and both are iterated by `ANY` / `ALL`. Numbers map to
//! [`Value::Int`] when they fit an `i64` and to [`Value::Float`] otherwise.
//!
//! [`set_validated`] writes a candidate into a document only after the rules
//! on that member accepted it.
//!
//! # Examples
//!
//! ```rust,ignore
//! use verdict::json::set_validated;
//! use verdict::prelude::*;
//! use serde_json::json;
//!
//! let validator = Validator::new(member("port").lt(65536));
//! let mut doc = json!({"port": 80});
//!
//! assert!(set_validated(&mut doc, &member("port"), json!(70000), &validator).is_err());
//! assert_eq!(doc["port"], 80);
//! ```

use std::borrow::Cow;

use serde_json::Value as Json;

use crate::foundation::{Elements, Target, ValidationError, Value};
use crate::path::{Key, Member};
use crate::validator::Validator;

impl Target for Json {
    fn scalar(&self) -> Option<Value> {
        match self {
            Json::Null => Some(Value::Null),
            Json::Bool(b) => Some(Value::Bool(*b)),
            Json::Number(n) => n
                .as_i64()
                .map(Value::Int)
                .or_else(|| n.as_u64().map(Value::from))
                .or_else(|| n.as_f64().map(Value::Float)),
            Json::String(s) => Some(Value::Str(Cow::Owned(s.clone()))),
            Json::Array(_) | Json::Object(_) => None,
        }
    }

    fn child(&self, key: &Key) -> Option<&dyn Target> {
        match (self, key) {
            (Json::Object(map), Key::Name(name)) => map.get(name.as_ref()).map(|v| v as &dyn Target),
            (Json::Array(items), Key::Index(i)) => items.get(*i).map(|v| v as &dyn Target),
            _ => None,
        }
    }

    fn size(&self) -> Option<usize> {
        match self {
            Json::Array(items) => Some(items.len()),
            Json::Object(map) => Some(map.len()),
            _ => None,
        }
    }

    fn elements(&self) -> Option<Elements<'_>> {
        match self {
            Json::Array(items) => Some(Box::new(
                items
                    .iter()
                    .enumerate()
                    .map(|(i, v)| (Key::Index(i), v as &dyn Target)),
            )),
            Json::Object(map) => Some(Box::new(
                map.iter()
                    .map(|(k, v)| (Key::Name(Cow::Owned(k.clone())), v as &dyn Target)),
            )),
            _ => None,
        }
    }
}

// ============================================================================
// PREVALIDATE-THEN-COMMIT
// ============================================================================

/// Prevalidates `candidate` at `member` and writes it into `document` if the
/// rules accept it.
///
/// Missing object keys along the path are created; array slots must exist.
/// On failure the document is left unchanged.
///
/// # Errors
///
/// - `rule_failed` when the candidate fails the rules on `member`
/// - `unwritable_member` when the path has no literal location in the
///   document (it contains a property or a marker, or crosses a scalar)
pub fn set_validated(
    document: &mut Json,
    member: &Member,
    candidate: Json,
    validator: &Validator,
) -> Result<(), ValidationError> {
    validator
        .prevalidate(document, member, &candidate)
        .into_result()?;

    let slot = slot_mut(document, member.path().keys()).ok_or_else(|| {
        ValidationError::new("unwritable_member", "member has no location in the document")
            .with_field(member.dotted())
    })?;
    *slot = candidate;
    Ok(())
}

fn slot_mut<'d>(document: &'d mut Json, keys: &[Key]) -> Option<&'d mut Json> {
    let mut current = document;
    for key in keys {
        if current.is_null() && matches!(key, Key::Name(_)) {
            *current = Json::Object(serde_json::Map::new());
        }
        current = match current {
            Json::Object(map) => {
                let Key::Name(name) = key else {
                    return None;
                };
                map.entry(name.as_ref()).or_insert(Json::Null)
            }
            Json::Array(items) => {
                let Key::Index(i) = key else {
                    return None;
                };
                items.get_mut(*i)?
            }
            _ => return None,
        };
    }
    Some(current)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::path::member;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn scalars_and_containers() {
        assert_eq!(json!(3).scalar(), Some(Value::Int(3)));
        assert_eq!(json!(2.5).scalar(), Some(Value::Float(2.5)));
        assert_eq!(json!(u64::MAX).scalar(), Some(Value::from(u64::MAX)));
        assert_eq!(json!("x").scalar(), Some(Value::str("x")));
        assert_eq!(json!(null).scalar(), Some(Value::Null));
        assert_eq!(json!([1, 2]).scalar(), None);
        assert_eq!(json!({"a": 1, "b": 2}).size(), Some(2));

        let doc = json!({"a": [10, 20]});
        let a = doc.child(&Key::name("a")).unwrap();
        assert_eq!(a.child(&Key::Index(1)).unwrap().scalar(), Some(Value::Int(20)));
        assert!(doc.child(&Key::Index(0)).is_none());
    }

    #[test]
    fn object_elements_are_named() {
        let doc = json!({"x": 1});
        let keys: Vec<Key> = doc.elements().unwrap().map(|(k, _)| k).collect();
        assert_eq!(keys, [Key::name("x")]);
    }

    #[test]
    fn set_validated_commits_accepted_values() {
        let validator = Validator::new(member("port").lt(65536));
        let mut doc = json!({"port": 80});

        set_validated(&mut doc, &member("port"), json!(8080), &validator).unwrap();
        assert_eq!(doc, json!({"port": 8080}));

        let err = set_validated(&mut doc, &member("port"), json!(70000), &validator).unwrap_err();
        assert_eq!(err.message, "port must be less than 65536");
        assert_eq!(doc, json!({"port": 8080}));
    }

    #[test]
    fn set_validated_creates_missing_keys() {
        let validator = Validator::new(member("server").key("port").gt(0));
        let mut doc = json!({});
        set_validated(&mut doc, &member("server").key("port"), json!(1), &validator).unwrap();
        assert_eq!(doc, json!({"server": {"port": 1}}));
    }

    #[test]
    fn properties_are_not_writable() {
        let validator = Validator::new(member("name").ne(""));
        let mut doc = json!({"name": "x", "tags": []});
        let err =
            set_validated(&mut doc, &member("tags").size(), json!(1), &validator).unwrap_err();
        assert_eq!(err.code, "unwritable_member");
        assert_eq!(err.field.as_deref(), Some("tags.size"));
    }
}
