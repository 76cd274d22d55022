use anyhow::{Context, Result};
use jsonschema::{Validator, validator_for};
use log::debug;
use serde_json::Value;

/// External collaborator consulted after every edit and before submit.
///
/// Implementations inspect the rebuilt nested document and return a
/// user-facing message to reject it, or `None` to accept. Closures of the
/// matching shape implement the trait directly.
pub trait ValidationHook {
    fn validate(&self, schema_name: &str, document: &Value) -> Option<String>;
}

impl<F> ValidationHook for F
where
    F: Fn(&str, &Value) -> Option<String>,
{
    fn validate(&self, schema_name: &str, document: &Value) -> Option<String> {
        self(schema_name, document)
    }
}

/// Hook that accepts every document. Forms start with this until a real
/// hook is attached.
#[derive(Debug, Clone, Copy, Default)]
pub struct AcceptAll;

impl ValidationHook for AcceptAll {
    fn validate(&self, _schema_name: &str, _document: &Value) -> Option<String> {
        None
    }
}

/// Stand-in for a backend validation service: the only rule it knows is
/// that `personalDetails.firstName` must be filled in.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlaceholderValidator;

impl ValidationHook for PlaceholderValidator {
    fn validate(&self, _schema_name: &str, document: &Value) -> Option<String> {
        let missing = match document.pointer("/personalDetails/firstName") {
            Some(Value::String(text)) => text.is_empty(),
            Some(Value::Null) | None => true,
            Some(_) => false,
        };
        missing.then(|| "First Name is required in Personal Details.".to_string())
    }
}

/// Hook that checks documents against the form's own JSON Schema.
///
/// Rejection reports the first violation as `pointer: message`, with
/// `<root>` standing in for an empty instance pointer.
pub struct SchemaValidator {
    validator: Validator,
}

impl SchemaValidator {
    pub fn new(schema: &Value) -> Result<Self> {
        let validator = validator_for(schema).context("failed to compile JSON schema")?;
        Ok(Self { validator })
    }
}

impl ValidationHook for SchemaValidator {
    fn validate(&self, schema_name: &str, document: &Value) -> Option<String> {
        let error = self.validator.iter_errors(document).next()?;
        let pointer = error.instance_path.to_string();
        let prefix = if pointer.is_empty() {
            "<root>".to_string()
        } else {
            pointer
        };
        let message = error.to_string();
        debug!("schema {schema_name} rejected document at {prefix}");
        Some(format!("{prefix}: {message}"))
    }
}
