use std::collections::HashSet;

use indexmap::IndexMap;
use serde_json::{Map, Value};

use crate::domain::{SchemaNode, SchemaType};

/// Interpret a raw JSON Schema value into an owned node tree.
///
/// The reading is lenient and total: unknown keywords are ignored, a value
/// that is not an object yields an empty node, and a `type` given as an
/// array is read as its first recognized non-`"null"` entry. `properties`
/// is kept only on object nodes and `items` only on array nodes.
pub fn parse_schema(value: &Value) -> SchemaNode {
    let Some(object) = value.as_object() else {
        return SchemaNode::default();
    };
    let mut node = SchemaNode {
        schema_type: read_type(object),
        title: read_string(object, "title"),
        description: read_string(object, "description"),
        format: read_string(object, "format"),
        enum_values: object.get("enum").and_then(Value::as_array).cloned(),
        properties: None,
        items: None,
        required: required_set(object),
    };
    if node.schema_type == Some(SchemaType::Object) {
        node.properties = object
            .get("properties")
            .and_then(Value::as_object)
            .map(read_properties);
    }
    if node.schema_type == Some(SchemaType::Array) {
        node.items = object.get("items").and_then(read_items);
    }
    node
}

fn read_type(object: &Map<String, Value>) -> Option<SchemaType> {
    match object.get("type")? {
        Value::String(name) => SchemaType::parse(name),
        Value::Array(names) => names
            .iter()
            .filter_map(Value::as_str)
            .filter(|name| *name != "null")
            .find_map(SchemaType::parse),
        _ => None,
    }
}

fn read_string(object: &Map<String, Value>, key: &str) -> Option<String> {
    object.get(key).and_then(Value::as_str).map(str::to_string)
}

fn read_properties(properties: &Map<String, Value>) -> IndexMap<String, SchemaNode> {
    properties
        .iter()
        .map(|(name, child)| (name.clone(), parse_schema(child)))
        .collect()
}

fn read_items(items: &Value) -> Option<Box<SchemaNode>> {
    match items {
        Value::Object(_) => Some(Box::new(parse_schema(items))),
        // Tuple-form items: the first entry stands for every element.
        Value::Array(entries) => entries
            .first()
            .filter(|entry| entry.is_object())
            .map(|entry| Box::new(parse_schema(entry))),
        _ => None,
    }
}

fn required_set(object: &Map<String, Value>) -> HashSet<String> {
    object
        .get("required")
        .and_then(Value::as_array)
        .map(|names| {
            names
                .iter()
                .filter_map(Value::as_str)
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default()
}
