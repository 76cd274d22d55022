use serde_json::{Map, Value};

use super::segment::{Segment, index_key, join_key, parse_segments};
use super::store::FlatStore;

/// Decompose a nested document into path-addressed scalar leaves.
///
/// Objects contribute `parent.key` entries, arrays `parent[index]`
/// entries, and only scalar leaves are recorded. Empty objects and empty
/// arrays therefore contribute nothing and disappear on the next rebuild;
/// that gap is accepted rather than patched with sentinel entries.
pub fn flatten(document: &Value) -> FlatStore {
    let mut store = FlatStore::new();
    flatten_into(document, String::new(), &mut store);
    store
}

fn flatten_into(value: &Value, prefix: String, store: &mut FlatStore) {
    match value {
        Value::Object(map) => {
            for (key, child) in map {
                flatten_into(child, join_key(&prefix, key), store);
            }
        }
        Value::Array(items) => {
            for (index, child) in items.iter().enumerate() {
                flatten_into(child, index_key(&prefix, index), store);
            }
        }
        scalar => {
            // A bare scalar document has no addressable key.
            if !prefix.is_empty() {
                store.insert(prefix, scalar.clone());
            }
        }
    }
}

/// Rebuild a nested document from path-addressed entries.
///
/// Each key is planted independently, so the store's insertion order never
/// changes the result apart from last-write-wins on conflicting paths. The
/// container kind of every level follows the segment that addresses it: a
/// key segment makes an object, an index segment makes an array, and a
/// slot already holding the wrong kind is replaced outright. Index gaps
/// are padded with `null`. An empty store rebuilds to `{}`.
pub fn unflatten(store: &FlatStore) -> Value {
    let mut root = Value::Null;
    for (key, value) in store {
        let segments = parse_segments(key);
        if segments.is_empty() {
            continue;
        }
        plant(&mut root, &segments, value.clone());
    }
    if root.is_null() {
        Value::Object(Map::new())
    } else {
        root
    }
}

fn plant(root: &mut Value, segments: &[Segment], value: Value) {
    let mut current = root;
    for segment in segments {
        current = slot_for(current, segment);
    }
    *current = value;
}

/// Ensure `current` is the container kind `segment` addresses and hand back
/// the child slot, creating it as `null` when absent.
fn slot_for<'a>(current: &'a mut Value, segment: &Segment) -> &'a mut Value {
    match segment {
        Segment::Key(name) => {
            if !matches!(current, Value::Object(_)) {
                *current = Value::Object(Map::new());
            }
            let Value::Object(map) = current else {
                unreachable!()
            };
            map.entry(name.clone()).or_insert(Value::Null)
        }
        Segment::Index(index) => {
            if !matches!(current, Value::Array(_)) {
                *current = Value::Array(Vec::new());
            }
            let Value::Array(items) = current else {
                unreachable!()
            };
            if items.len() <= *index {
                items.resize(index + 1, Value::Null);
            }
            &mut items[*index]
        }
    }
}

/// Look up the value a flat path addresses inside a nested document.
pub fn value_at<'a>(document: &'a Value, path: &str) -> Option<&'a Value> {
    let mut current = document;
    for segment in &parse_segments(path) {
        current = match segment {
            Segment::Key(name) => current.as_object()?.get(name)?,
            Segment::Index(index) => current.as_array()?.get(*index)?,
        };
    }
    Some(current)
}

/// Mutable lookup of the array a flat path addresses. Returns `None` when
/// the path is missing or leads to a non-array value.
pub fn array_at_mut<'a>(document: &'a mut Value, path: &str) -> Option<&'a mut Vec<Value>> {
    let mut current = document;
    for segment in &parse_segments(path) {
        current = match segment {
            Segment::Key(name) => current.as_object_mut()?.get_mut(name)?,
            Segment::Index(index) => current.as_array_mut()?.get_mut(*index)?,
        };
    }
    current.as_array_mut()
}

/// Walk a flat path creating containers as needed and coerce the final
/// slot into an array. An empty path addresses the document root itself.
pub fn ensure_array_at<'a>(document: &'a mut Value, path: &str) -> &'a mut Vec<Value> {
    let mut current = document;
    for segment in &parse_segments(path) {
        current = slot_for(current, segment);
    }
    if !matches!(current, Value::Array(_)) {
        *current = Value::Array(Vec::new());
    }
    let Value::Array(items) = current else {
        unreachable!()
    };
    items
}
