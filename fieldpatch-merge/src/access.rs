//! Path-addressed property access.
//!
//! The merger reads and writes entity state through this capability rather
//! than knowing any concrete entity layout. The [`serde_json::Value`]
//! implementation covers every serde-representable entity: typed structs
//! are serialized, patched in document form, and deserialized back by
//! [`EntityMerger::merge_typed`](crate::EntityMerger::merge_typed).

use fieldpatch_types::{PathRef, PathSegment};
use serde_json::Value;

use crate::{MergeError, MergeResult};

/// Path-addressed get/set over an entity's fields.
///
/// `get_path` resolves a path to the leaf value it names; `set_path`
/// replaces exactly that leaf. Both report the full path string on failure
/// so callers can surface which field did not apply.
pub trait PropertyAccess {
    /// Reads the value the path names.
    fn get_path(&self, path: &PathRef) -> MergeResult<Value>;

    /// Writes `value` to the location the path names.
    fn set_path(&mut self, path: &PathRef, value: Value) -> MergeResult<()>;
}

impl PropertyAccess for Value {
    fn get_path(&self, path: &PathRef) -> MergeResult<Value> {
        Ok(walk(self, path.segments(), path)?.clone())
    }

    fn set_path(&mut self, path: &PathRef, value: Value) -> MergeResult<()> {
        let Some((last, parents)) = path.split_last() else {
            return Err(not_applicable(path));
        };
        let parent = walk_mut(self, parents, path)?;
        match (last, parent) {
            // Struct fields are fixed: the target must already exist.
            (PathSegment::Field(name), Value::Object(map)) => {
                let Some(slot) = map.get_mut(name) else {
                    return Err(not_applicable(path));
                };
                *slot = value;
            }
            // Map entries are dynamic: writing an absent key inserts it.
            (PathSegment::Key(key), Value::Object(map)) => {
                map.insert(key.clone(), value);
            }
            (PathSegment::Index(index), Value::Array(list)) => {
                let len = list.len();
                let Some(slot) = list.get_mut(*index) else {
                    return Err(MergeError::IndexOutOfBounds {
                        path: path.to_string(),
                        index: *index,
                        len,
                    });
                };
                *slot = value;
            }
            _ => return Err(not_applicable(path)),
        }
        Ok(())
    }
}

fn not_applicable(path: &PathRef) -> MergeError {
    MergeError::FieldNotApplicable {
        path: path.to_string(),
    }
}

fn walk<'a>(root: &'a Value, segments: &[PathSegment], full: &PathRef) -> MergeResult<&'a Value> {
    let mut current = root;
    for segment in segments {
        current = match (segment, current) {
            (PathSegment::Field(name) | PathSegment::Key(name), Value::Object(map)) => {
                map.get(name).ok_or_else(|| not_applicable(full))?
            }
            (PathSegment::Index(index), Value::Array(list)) => {
                list.get(*index).ok_or_else(|| MergeError::IndexOutOfBounds {
                    path: full.to_string(),
                    index: *index,
                    len: list.len(),
                })?
            }
            _ => return Err(not_applicable(full)),
        };
    }
    Ok(current)
}

fn walk_mut<'a>(
    root: &'a mut Value,
    segments: &[PathSegment],
    full: &PathRef,
) -> MergeResult<&'a mut Value> {
    let mut current = root;
    for segment in segments {
        current = match (segment, current) {
            (PathSegment::Field(name) | PathSegment::Key(name), Value::Object(map)) => {
                map.get_mut(name).ok_or_else(|| not_applicable(full))?
            }
            (PathSegment::Index(index), Value::Array(list)) => {
                let len = list.len();
                list.get_mut(*index).ok_or_else(|| MergeError::IndexOutOfBounds {
                    path: full.to_string(),
                    index: *index,
                    len,
                })?
            }
            _ => return Err(not_applicable(full)),
        };
    }
    Ok(current)
}
