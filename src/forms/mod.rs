//! Field values, the form field store, and submission-time validation shared
//! by every wizard and form in the console.

pub mod store;
pub mod validation;
pub mod value;

pub use store::FormFieldStore;
pub use validation::{FieldDescriptor, FieldKind, FormDescriptor, FormSummary, Validator};
pub use value::FieldValue;
