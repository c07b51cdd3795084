/// Linear step cursor for a multi-step form.
///
/// Steps are 1-based and the cursor never leaves `1..=total_steps`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WizardController {
    current_step: usize,
    total_steps: usize,
}

impl WizardController {
    /// Creates a controller at step 1. A zero step count is clamped to one.
    pub fn new(total_steps: usize) -> Self {
        Self {
            current_step: 1,
            total_steps: total_steps.max(1),
        }
    }

    pub fn current_step(&self) -> usize {
        self.current_step
    }

    pub fn total_steps(&self) -> usize {
        self.total_steps
    }

    /// Moves forward one step. Returns `false` at the last step.
    pub fn advance(&mut self) -> bool {
        if self.current_step < self.total_steps {
            self.current_step += 1;
            tracing::debug!(step = self.current_step, "wizard advanced");
            true
        } else {
            false
        }
    }

    /// Moves back one step. Returns `false` at the first step.
    pub fn retreat(&mut self) -> bool {
        if self.current_step > 1 {
            self.current_step -= 1;
            tracing::debug!(step = self.current_step, "wizard retreated");
            true
        } else {
            false
        }
    }

    pub fn reset(&mut self) {
        self.current_step = 1;
        tracing::debug!("wizard reset to first step");
    }

    /// Jumps directly to `step`; out-of-range targets are ignored.
    pub fn jump_to(&mut self, step: usize) -> bool {
        if (1..=self.total_steps).contains(&step) {
            self.current_step = step;
            true
        } else {
            false
        }
    }

    pub fn is_first(&self) -> bool {
        self.current_step == 1
    }

    pub fn is_last(&self) -> bool {
        self.current_step == self.total_steps
    }

    pub fn progress_percentage(&self) -> f64 {
        self.current_step as f64 / self.total_steps as f64 * 100.0
    }
}
