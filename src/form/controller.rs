use anyhow::{Context, Result, bail};
use log::debug;
use serde_json::Value;

use crate::domain::{FieldDescriptor, SchemaNode};
use crate::path::{FlatStore, array_at_mut, ensure_array_at, flatten, parse_segments, unflatten};
use crate::schema::{parse_schema, resolve_fields};
use crate::validate::{AcceptAll, ValidationHook};

use super::error::DocumentParseError;

/// Receives the nested document once a submit passes validation. Closures
/// taking an owned `Value` implement the trait directly.
pub trait SubmitSink {
    fn on_submit(&mut self, document: Value);
}

impl<F> SubmitSink for F
where
    F: FnMut(Value),
{
    fn on_submit(&mut self, document: Value) {
        self(document)
    }
}

/// Sink that drops accepted documents. Forms start with this until a real
/// sink is attached.
#[derive(Debug, Clone, Copy, Default)]
pub struct DiscardSubmit;

impl SubmitSink for DiscardSubmit {
    fn on_submit(&mut self, _document: Value) {}
}

/// Outcome of a submit attempt.
#[derive(Debug, Clone, PartialEq)]
pub enum SubmitOutcome {
    /// Validation passed; the carried document was handed to the sink.
    Accepted(Value),
    /// Validation failed; the message is also recorded on the form.
    Rejected { message: String },
}

impl SubmitOutcome {
    pub fn is_accepted(&self) -> bool {
        matches!(self, Self::Accepted(_))
    }
}

/// Schema-driven form state.
///
/// The form interprets its schema once at construction and afterwards owns
/// exactly one piece of editing state: a flat store of path-addressed
/// leaves. The nested document is always derived from that store, never
/// held alongside it, so the two views cannot drift apart.
pub struct DynamicForm {
    schema_name: String,
    schema: SchemaNode,
    fields: Vec<FieldDescriptor>,
    store: FlatStore,
    error: Option<String>,
    validator: Box<dyn ValidationHook>,
    sink: Box<dyn SubmitSink>,
}

impl DynamicForm {
    /// Build a form over a raw JSON Schema. Fails when the root schema does
    /// not declare an object.
    pub fn new(schema_name: impl Into<String>, schema: &Value) -> Result<Self> {
        let root = parse_schema(schema);
        if !root.is_object() {
            bail!("root schema must declare an object");
        }
        let fields = resolve_fields(&root);
        Ok(Self {
            schema_name: schema_name.into(),
            schema: root,
            fields,
            store: FlatStore::new(),
            error: None,
            validator: Box::new(AcceptAll),
            sink: Box::new(DiscardSubmit),
        })
    }

    /// Derive the schema from a Rust type and build a form over it.
    /// Subschemas are inlined so every nested struct resolves to a field.
    pub fn from_type<T: schemars::JsonSchema>(schema_name: impl Into<String>) -> Result<Self> {
        let generator = schemars::r#gen::SchemaSettings::draft07()
            .with(|settings| settings.inline_subschemas = true)
            .into_generator();
        let root = generator.into_root_schema_for::<T>();
        let schema = serde_json::to_value(root).context("failed to serialize derived schema")?;
        Self::new(schema_name, &schema)
    }

    /// Seed the store from an existing nested document.
    pub fn with_document(mut self, document: &Value) -> Self {
        self.load_from_document(document);
        self
    }

    pub fn with_validator(mut self, validator: impl ValidationHook + 'static) -> Self {
        self.validator = Box::new(validator);
        self
    }

    pub fn with_on_submit(mut self, sink: impl SubmitSink + 'static) -> Self {
        self.sink = Box::new(sink);
        self
    }

    pub fn schema_name(&self) -> &str {
        &self.schema_name
    }

    pub fn schema(&self) -> &SchemaNode {
        &self.schema
    }

    /// Top-level resolved fields, in schema property order.
    pub fn fields(&self) -> &[FieldDescriptor] {
        &self.fields
    }

    pub fn store(&self) -> &FlatStore {
        &self.store
    }

    /// Current value of one flat key, if an edit or load recorded it.
    pub fn get(&self, path: &str) -> Option<&Value> {
        self.store.get(path)
    }

    /// Rebuild the nested document from the store.
    pub fn document(&self) -> Value {
        unflatten(&self.store)
    }

    /// The nested document rendered as pretty-printed JSON.
    pub fn document_json(&self) -> String {
        serde_json::to_string_pretty(&self.document()).unwrap_or_default()
    }

    /// The message recorded by the last validation, if it rejected.
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn dismiss_error(&mut self) {
        self.error = None;
    }

    /// Record one flat-key edit and validate the resulting document
    /// immediately, replacing or clearing the recorded error.
    pub fn set_field(&mut self, path: impl Into<String>, value: Value) {
        let path = path.into();
        self.store.insert(path.clone(), value);
        debug!("set {path}");
        self.revalidate();
    }

    /// Replace the whole store with the flattened document. The recorded
    /// error is left as it was; the next edit or submit refreshes it.
    pub fn load_from_document(&mut self, document: &Value) {
        self.store = flatten(document);
        debug!("loaded document with {} leaves", self.store.len());
    }

    /// Parse raw JSON and load it. On a parse failure the form keeps its
    /// previous store and error untouched.
    pub fn load_from_json(&mut self, raw: &str) -> Result<(), DocumentParseError> {
        let document: Value = serde_json::from_str(raw)?;
        self.load_from_document(&document);
        Ok(())
    }

    /// Validate the current document; on success hand it to the submit
    /// sink. The store itself is never changed by submitting.
    pub fn submit(&mut self) -> SubmitOutcome {
        let document = self.document();
        if let Some(message) = self.validator.validate(&self.schema_name, &document) {
            debug!("submit rejected: {message}");
            self.error = Some(message.clone());
            return SubmitOutcome::Rejected { message };
        }
        self.error = None;
        debug!("submit accepted with {} leaves", self.store.len());
        self.sink.on_submit(document.clone());
        SubmitOutcome::Accepted(document)
    }

    /// Append a blank element to the array at `path`, creating the array
    /// when the document does not have one there yet. The whole store is
    /// rebuilt, which renumbers sibling indices, and the new document is
    /// validated like any edit.
    ///
    /// The blank for an object item schema is `{}`; it holds no leaves, so
    /// it stays invisible in the store until a field inside it is set.
    pub fn add_list_item(&mut self, path: &str) {
        let element = self.blank_element(path);
        let mut document = self.document();
        ensure_array_at(&mut document, path).push(element);
        self.store = flatten(&document);
        debug!("appended element to {path}");
        self.revalidate();
    }

    /// Remove one element of the array at `path`. Later siblings shift
    /// down, their store keys are renumbered by the rebuild, and the new
    /// document is validated like any edit. Does nothing when the path
    /// holds no array or the index is out of range.
    pub fn remove_list_item(&mut self, path: &str, index: usize) {
        let mut document = self.document();
        let Some(items) = array_at_mut(&mut document, path) else {
            return;
        };
        if index >= items.len() {
            return;
        }
        items.remove(index);
        self.store = flatten(&document);
        debug!("removed element {index} from {path}");
        self.revalidate();
    }

    fn blank_element(&self, path: &str) -> Value {
        self.schema
            .descend(&parse_segments(path))
            .and_then(|node| node.items.as_deref())
            .map(SchemaNode::empty_value)
            .unwrap_or(Value::Null)
    }

    fn revalidate(&mut self) {
        let document = self.document();
        self.error = self.validator.validate(&self.schema_name, &document);
    }
}
