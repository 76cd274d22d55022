use super::schema::SchemaNode;

/// Editing control a schema node resolves to.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldControl {
    /// Single pick from a closed option list.
    Choice { options: Vec<String> },
    /// Calendar-style string input.
    Date,
    /// Free-form string input.
    Text,
    /// Numeric input, integer or floating point.
    Numeric,
    /// On/off switch.
    Toggle,
    /// Multiple picks from a closed option list, stored as one array value.
    MultiChoice { options: Vec<String> },
    /// Growable list; each element re-resolves against the item schema.
    RepeatedGroup { items: Box<SchemaNode> },
    /// Inline sub-form of the object's own properties.
    NestedGroup { children: Vec<FieldDescriptor> },
}

/// One resolved field: where it lives in the document and how to edit it.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldDescriptor {
    pub name: String,
    pub path: String,
    pub label: String,
    pub description: Option<String>,
    pub control: FieldControl,
}

impl FieldDescriptor {
    /// Children of a nested group, or an empty slice for every other control.
    pub fn children(&self) -> &[FieldDescriptor] {
        match &self.control {
            FieldControl::NestedGroup { children } => children,
            _ => &[],
        }
    }
}
