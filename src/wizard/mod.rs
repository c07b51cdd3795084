//! Linear multi-step wizard state: the step cursor and the session that ties
//! it to a [`crate::forms::FormFieldStore`].

pub mod controller;
pub mod session;

pub use controller::WizardController;
pub use session::{ExitDecision, StepGate, WizardEvent, WizardFlow, WizardSession};
