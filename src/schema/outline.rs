use serde_json::{Map, Value, json};

use crate::domain::{FieldControl, FieldDescriptor};

use super::walker::resolve_element;

/// Serialize resolved fields into a JSON outline.
///
/// Each entry carries the field's name, flat path, label, optional
/// description and a `control` object tagged with a `component` name.
/// Repeated groups include a sample resolution of element `[0]` so the
/// outline shows the shape a fresh item would take.
pub fn outline(fields: &[FieldDescriptor]) -> Value {
    Value::Array(fields.iter().map(field_outline).collect())
}

fn field_outline(field: &FieldDescriptor) -> Value {
    let mut entry = Map::new();
    entry.insert("name".to_string(), json!(field.name));
    entry.insert("path".to_string(), json!(field.path));
    entry.insert("label".to_string(), json!(field.label));
    if let Some(description) = &field.description {
        entry.insert("description".to_string(), json!(description));
    }
    entry.insert("control".to_string(), control_outline(field));
    Value::Object(entry)
}

fn control_outline(field: &FieldDescriptor) -> Value {
    match &field.control {
        FieldControl::Choice { options } => json!({ "component": "choice", "options": options }),
        FieldControl::Date => json!({ "component": "date" }),
        FieldControl::Text => json!({ "component": "text" }),
        FieldControl::Numeric => json!({ "component": "numeric" }),
        FieldControl::Toggle => json!({ "component": "toggle" }),
        FieldControl::MultiChoice { options } => {
            json!({ "component": "multi_choice", "options": options })
        }
        FieldControl::RepeatedGroup { items } => {
            let element =
                resolve_element(items, &field.path, 0).map(|sample| field_outline(&sample));
            json!({ "component": "repeated_group", "element": element })
        }
        FieldControl::NestedGroup { children } => {
            json!({ "component": "nested_group", "children": outline(children) })
        }
    }
}
