mod field;
mod schema;

pub use field::{FieldControl, FieldDescriptor};
pub use schema::{SchemaNode, SchemaType};
