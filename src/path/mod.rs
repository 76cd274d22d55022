mod codec;
mod segment;
mod store;

pub use codec::{array_at_mut, ensure_array_at, flatten, unflatten, value_at};
pub use segment::{Segment, index_key, join_key, parse_segments};
pub use store::FlatStore;
