#![deny(rust_2018_idioms)]

//! Schema-driven form engine.
//!
//! A [`DynamicForm`] interprets a JSON Schema into editable fields and
//! keeps all editing state in a flat store of path-addressed leaves such
//! as `profile.tags[0]`. The nested document is derived from the store on
//! demand, edits are validated through a pluggable [`ValidationHook`], and
//! accepted submits are handed to a [`SubmitSink`].

mod domain;
mod form;
mod path;
mod schema;
mod validate;

#[cfg(test)]
mod tests;

pub use domain::{FieldControl, FieldDescriptor, SchemaNode, SchemaType};
pub use form::{DiscardSubmit, DocumentParseError, DynamicForm, SubmitOutcome, SubmitSink};
pub use path::{
    FlatStore, Segment, flatten, index_key, join_key, parse_segments, unflatten, value_at,
};
pub use schema::{
    MAX_RESOLVE_DEPTH, outline, parse_schema, resolve, resolve_element, resolve_fields,
};
pub use validate::{AcceptAll, PlaceholderValidator, SchemaValidator, ValidationHook};

pub mod prelude {
    pub use super::{
        DynamicForm, FieldControl, FieldDescriptor, FlatStore, PlaceholderValidator,
        SchemaValidator, SubmitOutcome, SubmitSink, ValidationHook,
    };
}
