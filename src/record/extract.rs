//! Nested-field extraction over record trees
//!
//! Absence is a normal outcome here: every function returns `Option`/empty
//! on missing keys, non-mapping intermediate levels, or malformed shapes,
//! and never panics.

use super::value::Value;

/// Follow a fixed path of keys through nested mappings.
///
/// Returns `None` when the path is empty, any intermediate level is missing
/// or not a mapping, or the final key is absent.
pub fn lookup_path<'a, S: AsRef<str>>(value: &'a Value, path: &[S]) -> Option<&'a Value> {
    if path.is_empty() {
        return None;
    }
    let mut current = value;
    for key in path {
        current = current.as_mapping()?.get(key.as_ref())?;
    }
    Some(current)
}

/// Depth-first search for the first mapping anywhere in the tree that
/// contains `key`, returning that key's value.
pub fn deep_find<'a>(value: &'a Value, key: &str) -> Option<&'a Value> {
    match value {
        Value::Mapping(map) => {
            if let Some(found) = map.get(key) {
                return Some(found);
            }
            map.values().find_map(|child| deep_find(child, key))
        }
        Value::Sequence(items) => items.iter().find_map(|child| deep_find(child, key)),
        _ => None,
    }
}

/// Generalized attribute extraction: deep-find `key` and normalize its value
/// to a list of trimmed strings.
///
/// A scalar becomes a one-element list; a sequence contributes its scalar
/// elements; anything else (or nothing found) yields an empty list.
pub fn attribute_values(value: &Value, key: &str) -> Vec<String> {
    let found = match deep_find(value, key) {
        Some(v) => v,
        None => return Vec::new(),
    };
    string_list(found)
}

fn string_list(value: &Value) -> Vec<String> {
    match value {
        Value::Sequence(items) => items
            .iter()
            .filter_map(Value::scalar_to_string)
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect(),
        other => other
            .scalar_to_string()
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .into_iter()
            .collect(),
    }
}
