//! Intake form state: values, validation, link sync and submission

mod field_error;
mod form_values;
mod location;
mod query_sync;
mod session;
mod submission;
mod validation;

pub use field_error::*;
pub use form_values::*;
pub use location::*;
pub use session::*;
pub use submission::*;
pub use validation::*;
