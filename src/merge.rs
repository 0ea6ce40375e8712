//! Folding successive page responses into one result

use serde_json::Value;

use crate::object_path::{get_mut, update};
use crate::page_info::{find_page_infos, PAGE_INFO_KEY};
use crate::{GraphQLError, Result};

/// List fields concatenated across pages
const LIST_KEYS: [&str; 2] = ["nodes", "edges"];

/// Merge `incoming` into `accumulated`
///
/// For every collection in `incoming` that carries a `pageInfo`, the `nodes` and
/// `edges` lists are appended to the ones at the same path in `accumulated`, and the
/// page info is replaced by the newer one. Everything else in `accumulated` is kept.
///
/// An empty `accumulated` object is the start of a fold: `incoming` is returned as-is.
/// Ownership of both trees moves into the call; the merged tree is returned.
pub fn merge_responses(mut accumulated: Value, mut incoming: Value) -> Result<Value> {
    if accumulated.as_object().is_some_and(|object| object.is_empty()) {
        return Ok(incoming);
    }

    let contexts = find_page_infos(&incoming)?;
    if contexts.is_empty() {
        return Err(GraphQLError::MissingPageInfo { response: incoming });
    }

    for context in contexts {
        let collection = get_mut(&mut incoming, &context.path_in_query)?;

        for key in LIST_KEYS {
            let Some(Value::Array(new_items)) = collection.get_mut(key).map(Value::take) else {
                continue;
            };

            let path = child_path(&context.path_in_query, key);
            update(&mut accumulated, &path, |current| {
                let mut items = match current {
                    Value::Array(items) => items,
                    _ => Vec::new(),
                };
                items.extend(new_items);
                Value::Array(items)
            })?;
        }

        let page_info = collection
            .get_mut(PAGE_INFO_KEY)
            .map(Value::take)
            .unwrap_or(Value::Null);
        let path = child_path(&context.path_in_query, PAGE_INFO_KEY);
        update(&mut accumulated, &path, |_| page_info)?;
    }

    Ok(accumulated)
}

fn child_path(parent: &[String], key: &str) -> Vec<String> {
    let mut path = parent.to_vec();
    path.push(key.to_string());
    path
}
