mod loader;
mod outline;
mod walker;

pub use loader::parse_schema;
pub use outline::outline;
pub use walker::{MAX_RESOLVE_DEPTH, resolve, resolve_element, resolve_fields};
