use serde::{Deserialize, Serialize};

use crate::errors::{ConsoleError, ConsoleResult, ValidationError};
use crate::forms::{FieldValue, FormDescriptor, FormFieldStore, FormSummary};

use super::controller::WizardController;

/// Whether moving forward requires the current step's required fields.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StepGate {
    /// Steps move freely; validation happens only on submit.
    #[default]
    Open,
    /// `advance` is refused until the current step's required fields are set.
    RequiredFields,
}

/// Outcome of a navigation request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WizardEvent {
    Moved,
    NoOp,
}

/// Answer to a request to leave the wizard.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitDecision {
    /// Nothing would be lost; the caller may leave.
    Leave,
    /// Unsaved input exists; ask before discarding.
    ConfirmDiscard,
}

/// High-level contract for an entity-specific wizard.
///
/// Implementations describe the fields of each step and turn the collected
/// store into an output record on submit.
pub trait WizardFlow {
    type Output;

    /// One descriptor per step, in order.
    fn steps(&self) -> &[FormDescriptor];

    /// Validates the full store and builds the output record.
    fn commit(&self, fields: &FormFieldStore) -> Result<Self::Output, ValidationError>;
}

/// A running wizard: step cursor plus collected fields.
pub struct WizardSession<F: WizardFlow> {
    flow: F,
    controller: WizardController,
    fields: FormFieldStore,
    gate: StepGate,
}

impl<F: WizardFlow> WizardSession<F> {
    pub fn new(flow: F, fields: FormFieldStore, gate: StepGate) -> Self {
        let controller = WizardController::new(flow.steps().len());
        Self {
            flow,
            controller,
            fields,
            gate,
        }
    }

    pub fn flow(&self) -> &F {
        &self.flow
    }

    pub fn current_step(&self) -> usize {
        self.controller.current_step()
    }

    pub fn total_steps(&self) -> usize {
        self.controller.total_steps()
    }

    pub fn progress_percentage(&self) -> f64 {
        self.controller.progress_percentage()
    }

    pub fn is_last_step(&self) -> bool {
        self.controller.is_last()
    }

    pub fn fields(&self) -> &FormFieldStore {
        &self.fields
    }

    /// Descriptor for the step currently shown.
    pub fn current_descriptor(&self) -> Option<&FormDescriptor> {
        self.flow.steps().get(self.controller.current_step() - 1)
    }

    pub fn set_field(&mut self, name: &str, value: impl Into<FieldValue>) {
        self.fields.set_field(name, value);
    }

    pub fn set_group_field(&mut self, group: &str, key: &str, value: impl Into<FieldValue>) {
        self.fields.set_group_field(group, key, value);
    }

    pub fn set_list_field(&mut self, name: &str, item: &str, included: bool) {
        self.fields.set_list_field(name, item, included);
    }

    pub fn advance(&mut self) -> Result<WizardEvent, ValidationError> {
        if self.gate == StepGate::RequiredFields {
            if let Some(descriptor) = self.current_descriptor() {
                descriptor.check_required(&self.fields).inspect_err(|err| {
                    tracing::warn!(step = self.controller.current_step(), %err, "step gate blocked advance");
                })?;
            }
        }
        Ok(if self.controller.advance() {
            WizardEvent::Moved
        } else {
            WizardEvent::NoOp
        })
    }

    pub fn retreat(&mut self) -> WizardEvent {
        if self.controller.retreat() {
            WizardEvent::Moved
        } else {
            WizardEvent::NoOp
        }
    }

    /// Replaces the collected fields and returns to step 1.
    pub fn reseed(&mut self, fields: FormFieldStore) {
        self.fields = fields;
        self.controller.reset();
    }

    /// Review of every step's fields, in step order.
    pub fn summary(&self) -> FormSummary {
        let mut summary = FormSummary::default();
        for step in self.flow.steps() {
            summary.entries.extend(step.summary(&self.fields).entries);
        }
        summary
    }

    /// Builds the output record. Only valid from the last step; on failure the
    /// collected fields are left untouched.
    pub fn submit(&mut self) -> ConsoleResult<F::Output> {
        if !self.controller.is_last() {
            return Err(ConsoleError::InvalidState(format!(
                "submit is only available on step {} (currently on step {})",
                self.controller.total_steps(),
                self.controller.current_step()
            )));
        }
        let output = self.flow.commit(&self.fields)?;
        self.fields.mark_saved();
        Ok(output)
    }

    pub fn request_exit(&self) -> ExitDecision {
        if self.fields.has_unsaved_changes() {
            ExitDecision::ConfirmDiscard
        } else {
            ExitDecision::Leave
        }
    }

    /// Drops the collected input. Refuses (returns `false`) while unsaved
    /// changes exist unless `confirmed` is set.
    pub fn discard(&mut self, confirmed: bool) -> bool {
        if self.request_exit() == ExitDecision::ConfirmDiscard && !confirmed {
            return false;
        }
        self.fields.clear();
        self.controller.reset();
        true
    }
}
