use serde_json::Value;

use crate::domain::{FieldControl, FieldDescriptor, SchemaNode, SchemaType};
use crate::path::{index_key, join_key};

/// Nodes nested deeper than this resolve to no field, which keeps
/// resolution total on degenerate schema trees.
pub const MAX_RESOLVE_DEPTH: usize = 64;

/// Resolve every top-level property of a root object schema, in property
/// order. Properties that resolve to no control are skipped.
pub fn resolve_fields(schema: &SchemaNode) -> Vec<FieldDescriptor> {
    let Some(properties) = schema.properties.as_ref() else {
        return Vec::new();
    };
    properties
        .iter()
        .filter_map(|(name, node)| resolve(name, node, ""))
        .collect()
}

/// Decide which control a named schema node gets, if any.
///
/// The ladder is ordered: a declared `enum` always wins; strings split on
/// `format: "date"`; numbers and integers share one numeric control;
/// booleans toggle; an array whose item schema is itself an enum becomes a
/// multi-choice and any other array with items a repeated group; objects
/// with declared properties nest; everything else resolves to `None`.
pub fn resolve(name: &str, node: &SchemaNode, parent_path: &str) -> Option<FieldDescriptor> {
    resolve_at(name, node, parent_path, 0)
}

/// Resolve one element of a repeated group against its item schema. The
/// element lives at `parent[index]` and is labelled `Item N` (1-based)
/// when the item schema carries no title.
pub fn resolve_element(
    items: &SchemaNode,
    parent_path: &str,
    index: usize,
) -> Option<FieldDescriptor> {
    let path = index_key(parent_path, index);
    let control = control_for(items, &path, 0)?;
    Some(FieldDescriptor {
        name: index.to_string(),
        path,
        label: items
            .title
            .clone()
            .unwrap_or_else(|| format!("Item {}", index + 1)),
        description: items.description.clone(),
        control,
    })
}

fn resolve_at(
    name: &str,
    node: &SchemaNode,
    parent_path: &str,
    depth: usize,
) -> Option<FieldDescriptor> {
    if depth > MAX_RESOLVE_DEPTH {
        return None;
    }
    let path = join_key(parent_path, name);
    let control = control_for(node, &path, depth)?;
    Some(FieldDescriptor {
        name: name.to_string(),
        label: node.title.clone().unwrap_or_else(|| name.to_string()),
        description: node.description.clone(),
        path,
        control,
    })
}

fn control_for(node: &SchemaNode, path: &str, depth: usize) -> Option<FieldControl> {
    if let Some(values) = &node.enum_values {
        return Some(FieldControl::Choice {
            options: option_texts(values),
        });
    }
    match node.schema_type? {
        SchemaType::String if node.format.as_deref() == Some("date") => Some(FieldControl::Date),
        SchemaType::String => Some(FieldControl::Text),
        SchemaType::Number | SchemaType::Integer => Some(FieldControl::Numeric),
        SchemaType::Boolean => Some(FieldControl::Toggle),
        SchemaType::Array => {
            let items = node.items.as_deref()?;
            if let Some(values) = &items.enum_values {
                Some(FieldControl::MultiChoice {
                    options: option_texts(values),
                })
            } else {
                Some(FieldControl::RepeatedGroup {
                    items: Box::new(items.clone()),
                })
            }
        }
        SchemaType::Object => {
            let properties = node.properties.as_ref()?;
            let children = properties
                .iter()
                .filter_map(|(child_name, child)| resolve_at(child_name, child, &path, depth + 1))
                .collect();
            Some(FieldControl::NestedGroup { children })
        }
    }
}

fn option_texts(values: &[Value]) -> Vec<String> {
    values
        .iter()
        .map(|value| match value {
            Value::String(text) => text.clone(),
            other => other.to_string(),
        })
        .collect()
}
