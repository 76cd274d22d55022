mod controller;
mod error;

pub use controller::{DiscardSubmit, DynamicForm, SubmitOutcome, SubmitSink};
pub use error::DocumentParseError;
