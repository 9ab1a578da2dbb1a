//! Dirty-field extraction over a parsed JSON document.

use fieldpatch_types::{PathRef, PathSegment};
use serde_json::{Map, Value};

/// Collects the path of every leaf the payload supplied, depth-first in
/// document field order.
///
/// A non-object root carries no addressable field paths and yields nothing.
/// An array-valued field is treated as a single leaf: element-level PATCH
/// semantics are unsupported, so an update to any element reads as "replace
/// the whole array field" and the array is emitted once, without descending
/// into its elements.
#[must_use]
pub fn tree_dirty_fields(root: &Value) -> Vec<String> {
    let mut fields = Vec::new();
    if let Value::Object(map) = root {
        let mut path = PathRef::new();
        collect_object(map, &mut path, &mut fields);
    }
    fields
}

fn collect_object(map: &Map<String, Value>, path: &mut PathRef, fields: &mut Vec<String>) {
    for (name, child) in map {
        path.push(PathSegment::Field(name.clone()));
        collect_node(child, path, fields);
        path.pop();
    }
}

fn collect_node(node: &Value, path: &mut PathRef, fields: &mut Vec<String>) {
    match node {
        Value::Object(map) => collect_object(map, path, fields),
        Value::Array(_)
        | Value::Null
        | Value::Bool(_)
        | Value::Number(_)
        | Value::String(_) => fields.push(path.to_string()),
    }
}
