use std::collections::HashSet;

use indexmap::IndexMap;
use serde_json::{Map, Value};

use crate::path::Segment;

/// The schema `type` keywords the engine interprets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchemaType {
    String,
    Number,
    Integer,
    Boolean,
    Object,
    Array,
}

impl SchemaType {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "string" => Some(Self::String),
            "number" => Some(Self::Number),
            "integer" => Some(Self::Integer),
            "boolean" => Some(Self::Boolean),
            "object" => Some(Self::Object),
            "array" => Some(Self::Array),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::String => "string",
            Self::Number => "number",
            Self::Integer => "integer",
            Self::Boolean => "boolean",
            Self::Object => "object",
            Self::Array => "array",
        }
    }
}

/// One interpreted schema node. The tree is owned: `properties` and `items`
/// hold child nodes directly, so a node never aliases another.
///
/// `properties` is populated only for object nodes and `items` only for
/// array nodes; the loader drops mismatched keywords.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SchemaNode {
    pub schema_type: Option<SchemaType>,
    pub title: Option<String>,
    pub description: Option<String>,
    pub format: Option<String>,
    pub enum_values: Option<Vec<Value>>,
    pub properties: Option<IndexMap<String, SchemaNode>>,
    pub items: Option<Box<SchemaNode>>,
    pub required: HashSet<String>,
}

impl SchemaNode {
    pub fn is_object(&self) -> bool {
        self.schema_type == Some(SchemaType::Object)
    }

    pub fn is_array(&self) -> bool {
        self.schema_type == Some(SchemaType::Array)
    }

    /// Follow a parsed flat path into the schema tree. Keys descend into
    /// `properties`, indices into `items`; returns `None` as soon as a
    /// segment has no declared counterpart.
    pub fn descend(&self, segments: &[Segment]) -> Option<&SchemaNode> {
        let mut current = self;
        for segment in segments {
            current = match segment {
                Segment::Key(name) => current.properties.as_ref()?.get(name)?,
                Segment::Index(_) => current.items.as_deref()?,
            };
        }
        Some(current)
    }

    /// The blank value a fresh element of this node should start as:
    /// `{}` for objects, `[]` for arrays, `null` otherwise.
    pub fn empty_value(&self) -> Value {
        match self.schema_type {
            Some(SchemaType::Object) => Value::Object(Map::new()),
            Some(SchemaType::Array) => Value::Array(Vec::new()),
            _ => Value::Null,
        }
    }
}
