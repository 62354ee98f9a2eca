//! Path resolution and existence checks
//!
//! Resolution walks literal keys through [`Target::child`] and property keys
//! through the [`PropertyRegistry`]. Once a property is crossed the result is
//! an owned [`Value`] and the rest of the path is resolved inside it.

use std::ops::ControlFlow;

use crate::foundation::{Target, Value};
use crate::path::{Expansion, Key, TreeSpec, Variadic};
use crate::property::PropertyRegistry;

/// Outcome of resolving a path.
#[derive(Debug)]
pub enum Resolved<'a> {
    /// A part of the original object.
    Borrowed(&'a dyn Target),
    /// A computed value (a property was crossed).
    Owned(Value),
}

impl Resolved<'_> {
    #[must_use]
    pub fn as_target(&self) -> &dyn Target {
        match self {
            Self::Borrowed(target) => *target,
            Self::Owned(value) => value,
        }
    }

    #[must_use]
    pub fn scalar(&self) -> Option<Value> {
        match self {
            Self::Borrowed(target) => target.scalar(),
            Self::Owned(value) => Some(value.clone()),
        }
    }
}

/// Resolves literal and property keys. Returns `None` if a key is missing or
/// the path contains an expansion key.
pub fn resolve<'a>(
    object: &'a dyn Target,
    keys: &[Key],
    properties: &PropertyRegistry,
) -> Option<Resolved<'a>> {
    let mut current = Resolved::Borrowed(object);
    for key in keys {
        current = match (current, key) {
            (Resolved::Borrowed(target), Key::Name(_) | Key::Index(_)) => {
                Resolved::Borrowed(target.child(key)?)
            }
            (Resolved::Owned(value), Key::Name(_) | Key::Index(_)) => {
                Resolved::Owned(value.child(key)?.scalar()?)
            }
            (resolved, Key::Property(property)) => {
                Resolved::Owned(properties.get_property(resolved.as_target(), property)?)
            }
            (_, Key::Marker(_) | Key::Variadic(_)) => return None,
        };
    }
    Some(current)
}

/// True iff every key of the path resolves. Through an expansion key the
/// path exists when the prefix is a container and at least one element has
/// the remaining path.
pub fn exists(object: &dyn Target, keys: &[Key], properties: &PropertyRegistry) -> bool {
    let Some(at) = keys.iter().position(Key::is_expansion) else {
        return resolve(object, keys, properties).is_some();
    };
    let Some(prefix) = resolve(object, &keys[..at], properties) else {
        return false;
    };
    let Some(expansion) = Expansion::from_key(&keys[at]) else {
        return false;
    };
    let rest = &keys[at + 1..];
    let mut found = false;
    expand(prefix.as_target(), expansion, properties, None, &mut |_, element| {
        if exists(element, rest, properties) {
            found = true;
            ControlFlow::Break(())
        } else {
            ControlFlow::Continue(())
        }
    });
    found
}

/// Visitor of expanded elements: receives the concrete keys leading from the
/// container to the element.
pub type Visit<'v> = dyn FnMut(&[Key], &dyn Target) -> ControlFlow<()> + 'v;

/// Expands `container`, calling `visit` per element until it breaks.
/// Returns `None` when the container cannot be expanded.
pub fn expand(
    container: &dyn Target,
    expansion: Expansion<'_>,
    properties: &PropertyRegistry,
    max_depth: Option<usize>,
    visit: &mut Visit<'_>,
) -> Option<ControlFlow<()>> {
    match expansion {
        Expansion::All | Expansion::Any => {
            for (k, element) in container.elements()? {
                if visit(std::slice::from_ref(&k), element).is_break() {
                    return Some(ControlFlow::Break(()));
                }
            }
            Some(ControlFlow::Continue(()))
        }
        Expansion::Tree(spec) => {
            let depth = spec.max_depth.or(max_depth);
            let mut suffix = Vec::new();
            Some(walk_tree(container, spec, depth, 0, &mut suffix, visit))
        }
        Expansion::Variadic(variadic) => expand_variadic(container, variadic, properties, visit),
    }
}

fn walk_tree(
    node: &dyn Target,
    spec: &TreeSpec,
    max_depth: Option<usize>,
    depth: usize,
    suffix: &mut Vec<Key>,
    visit: &mut Visit<'_>,
) -> ControlFlow<()> {
    visit(suffix, node)?;
    if max_depth.is_some_and(|max| depth >= max) {
        return ControlFlow::Continue(());
    }
    let Some(children) = node.child(&spec.children) else {
        return ControlFlow::Continue(());
    };
    let Some(elements) = children.elements() else {
        return ControlFlow::Continue(());
    };
    for (k, child) in elements {
        suffix.push((*spec.children).clone());
        suffix.push(k);
        let flow = walk_tree(child, spec, max_depth, depth + 1, suffix, visit);
        suffix.truncate(suffix.len() - 2);
        flow?;
    }
    ControlFlow::Continue(())
}

fn expand_variadic(
    container: &dyn Target,
    variadic: &Variadic,
    properties: &PropertyRegistry,
    visit: &mut Visit<'_>,
) -> Option<ControlFlow<()>> {
    let count = properties
        .get_property(container, &variadic.count)?
        .as_i64()?;
    let count = usize::try_from(count).ok()?;
    for i in 0..count {
        let key = Key::Index(i);
        let Some(element) = container.child(&key) else {
            continue;
        };
        if visit(std::slice::from_ref(&key), element).is_break() {
            return Some(ControlFlow::Break(()));
        }
    }
    Some(ControlFlow::Continue(()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::path::{Quantifier, member};
    use crate::property::Property;
    use serde_json::json;

    fn registry() -> PropertyRegistry {
        PropertyRegistry::default()
    }

    #[test]
    fn resolves_nested_json() {
        let doc = json!({"a": {"b": [1, 2, 3]}});
        let path = member("a").key("b").index(1);
        let resolved = resolve(&doc, path.path().keys(), &registry()).unwrap();
        assert_eq!(resolved.scalar(), Some(Value::Int(2)));
    }

    #[test]
    fn property_crossing_yields_owned() {
        let doc = json!({"a": [1, 2, 3]});
        let path = member("a").size();
        let resolved = resolve(&doc, path.path().keys(), &registry()).unwrap();
        assert!(matches!(resolved, Resolved::Owned(Value::Int(3))));
    }

    #[test]
    fn existence_through_markers() {
        let doc = json!({
            "level1": {
                "level2_1": {"level3": "value1"},
                "level2_2": {"other": 1}
            }
        });
        let reg = registry();
        let ok = member("level1").all().key("level3");
        let missing = member("level1").all().key("nope");
        assert!(exists(&doc, ok.path().keys(), &reg));
        assert!(!exists(&doc, missing.path().keys(), &reg));
        assert!(!exists(&doc, member("field2").path().keys(), &reg));
    }

    #[test]
    fn marker_over_scalar_does_not_exist() {
        let doc = json!({"a": 5});
        assert!(!exists(&doc, member("a").all().path().keys(), &registry()));
    }

    #[test]
    fn tree_is_visited_in_pre_order() {
        let doc = json!({
            "id": 1,
            "children": [
                {"id": 2, "children": [{"id": 3}]},
                {"id": 4}
            ]
        });
        let spec = TreeSpec::new(Quantifier::All, "children");
        let mut seen = Vec::new();
        expand(
            &doc,
            Expansion::Tree(&spec),
            &registry(),
            None,
            &mut |_, node| {
                seen.push(node.child(&Key::name("id")).and_then(Target::scalar));
                ControlFlow::Continue(())
            },
        );
        let ids: Vec<_> = seen.into_iter().flatten().collect();
        assert_eq!(ids, vec![Value::Int(1), Value::Int(2), Value::Int(3), Value::Int(4)]);
    }

    #[test]
    fn tree_depth_bound() {
        let doc = json!({"children": [{"children": [{}]}]});
        let spec = TreeSpec::new(Quantifier::All, "children").with_max_depth(1);
        let mut visited = 0;
        expand(&doc, Expansion::Tree(&spec), &registry(), None, &mut |_, _| {
            visited += 1;
            ControlFlow::Continue(())
        });
        assert_eq!(visited, 2);
    }

    #[test]
    fn variadic_uses_count_property() {
        let items = vec![10, 20, 30];
        let variadic = Variadic {
            quantifier: Quantifier::All,
            count: Property::SIZE,
        };
        let mut keys = Vec::new();
        expand(&items, Expansion::Variadic(&variadic), &registry(), None, &mut |k, _| {
            keys.extend_from_slice(k);
            ControlFlow::Continue(())
        });
        assert_eq!(keys, vec![Key::Index(0), Key::Index(1), Key::Index(2)]);
    }
}
