//! Path based access into schema-less response trees
//!
//! Response shapes are chosen by the caller's query, so paginated collections are
//! located structurally (by key presence) instead of through a schema.

use serde_json::Value;

use crate::{GraphQLError, Result};

fn join(path: &[String]) -> String {
    path.join(".")
}

/// Get the value found by descending `root` through every key of `path`
pub fn get<'a>(root: &'a Value, path: &[String]) -> Result<&'a Value> {
    path.iter()
        .try_fold(root, |current, key| current.get(key.as_str()))
        .ok_or_else(|| GraphQLError::PathNotFound(join(path)))
}

/// Mutable variant of [`get`]
pub fn get_mut<'a>(root: &'a mut Value, path: &[String]) -> Result<&'a mut Value> {
    let mut current = root;
    for key in path {
        current = current
            .get_mut(key.as_str())
            .ok_or_else(|| GraphQLError::PathNotFound(join(path)))?;
    }
    Ok(current)
}

/// Replace the value at `path` with `value`
///
/// Descends to the parent of the last segment, which must be an object. The last
/// segment itself may be absent and is then inserted.
pub fn set(root: &mut Value, path: &[String], value: Value) -> Result<()> {
    update(root, path, |_| value)
}

/// Replace the value at `path` with `mutator` applied to the current value
///
/// An absent last segment is passed to `mutator` as [`Value::Null`].
pub fn update<F>(root: &mut Value, path: &[String], mutator: F) -> Result<()>
where
    F: FnOnce(Value) -> Value,
{
    let (last, parent_path) = path
        .split_last()
        .ok_or_else(|| GraphQLError::PathNotFound(join(path)))?;

    let parent = get_mut(root, parent_path)?
        .as_object_mut()
        .ok_or_else(|| GraphQLError::PathNotFound(join(path)))?;

    let current = parent.get_mut(last.as_str()).map(Value::take);
    parent.insert(last.clone(), mutator(current.unwrap_or(Value::Null)));
    Ok(())
}

/// Depth-first search for the first object owning an object-valued `property`
///
/// Returns the path to the owning object (not to `property` itself), or an empty
/// path when nothing matches. Arrays are not descended into.
pub fn find_path_to_property(root: &Value, property: &str) -> Vec<String> {
    let mut found = None;
    visit(root, |object, path| {
        if found.is_none() && object.get(property).is_some_and(Value::is_object) {
            found = Some(path.to_vec());
        }
    });
    found.unwrap_or_default()
}

/// Depth-first pre-order walk over every nested object value
///
/// `on_object` receives each object together with its path from `root`. The root
/// itself is not reported, null values are skipped, and arrays are not entered.
pub fn visit<F>(root: &Value, mut on_object: F)
where
    F: FnMut(&Value, &[String]),
{
    let mut path = Vec::new();
    visit_inner(root, &mut path, &mut on_object);
}

fn visit_inner<F>(value: &Value, path: &mut Vec<String>, on_object: &mut F)
where
    F: FnMut(&Value, &[String]),
{
    let Some(object) = value.as_object() else {
        return;
    };

    for (key, child) in object {
        if !child.is_object() {
            continue;
        }
        path.push(key.clone());
        on_object(child, path.as_slice());
        visit_inner(child, path, on_object);
        path.pop();
    }
}
