//! Generic multi-step wizard controller.
//!
//! The controller exclusively owns [`WizardState`]: the step index, the typed
//! form data, the messages from the last failed gate per step, and the
//! submission status. Panels read the data through [`WizardController::data`]
//! and write only through [`WizardController::update_field`] and
//! [`WizardController::update_entries`].

use std::collections::BTreeMap;

use super::entries::EntryOp;
use super::field::{FieldError, FormData};
use super::navigator::StepNavigator;
use super::sink::SubmissionSink;
use super::step::StepPanel;
use super::validation::ValidationResult;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct WizardOptions {
    /// Whether step markers may be clicked to jump directly to a step.
    pub allow_direct_step_jump: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SubmissionStatus {
    #[default]
    Idle,
    Submitting,
    Submitted,
    Failed(String),
}

#[derive(Debug, Clone)]
pub struct WizardState<T> {
    current_step: usize,
    total_steps: usize,
    data: T,
    step_errors: BTreeMap<usize, Vec<String>>,
    status: SubmissionStatus,
}

impl<T> WizardState<T> {
    fn new(total_steps: usize, data: T) -> Self {
        Self {
            current_step: 0,
            total_steps,
            data,
            step_errors: BTreeMap::new(),
            status: SubmissionStatus::Idle,
        }
    }

    pub fn current_step(&self) -> usize {
        self.current_step
    }

    pub fn total_steps(&self) -> usize {
        self.total_steps
    }

    pub fn data(&self) -> &T {
        &self.data
    }

    pub fn step_errors(&self) -> &BTreeMap<usize, Vec<String>> {
        &self.step_errors
    }

    pub fn status(&self) -> &SubmissionStatus {
        &self.status
    }
}

/// Result of a navigation request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StepChange {
    Moved { from: usize, to: usize },
    /// The current step failed its gate; the index did not change.
    Blocked { step: usize, errors: Vec<String> },
    /// Boundary no-op (retreat at the first step, advance at the last).
    Unchanged,
    JumpDisabled,
    OutOfRange(usize),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    Submitted,
    Blocked { step: usize, errors: Vec<String> },
    NotFinalStep,
    AlreadySubmitted,
    Failed(String),
}

/// Result of writing one field: the value is always stored, the inline
/// message (if any) is what the field shows next to itself.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FieldUpdate {
    pub inline_error: Option<String>,
}

pub struct WizardController<T: FormData> {
    name: &'static str,
    steps: Vec<Box<dyn StepPanel<T>>>,
    options: WizardOptions,
    state: WizardState<T>,
}

impl<T: FormData + Default> WizardController<T> {
    /// Creates a controller positioned on the first step with default data.
    ///
    /// # Panics
    ///
    /// Panics when `steps` is empty; a wizard always has at least one step.
    pub fn new(
        name: &'static str,
        steps: Vec<Box<dyn StepPanel<T>>>,
        options: WizardOptions,
    ) -> Self {
        assert!(!steps.is_empty(), "wizard `{name}` needs at least one step");
        let total = steps.len();
        Self {
            name,
            steps,
            options,
            state: WizardState::new(total, T::default()),
        }
    }

    /// Replaces the payload, e.g. to resume from a draft.
    pub fn with_data(mut self, data: T) -> Self {
        self.state.data = data;
        self
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn options(&self) -> WizardOptions {
        self.options
    }

    pub fn state(&self) -> &WizardState<T> {
        &self.state
    }

    pub fn data(&self) -> &T {
        &self.state.data
    }

    pub fn current_step(&self) -> usize {
        self.state.current_step
    }

    pub fn total_steps(&self) -> usize {
        self.state.total_steps
    }

    pub fn is_final_step(&self) -> bool {
        self.state.current_step + 1 == self.state.total_steps
    }

    pub fn status(&self) -> &SubmissionStatus {
        &self.state.status
    }

    pub fn current_panel(&self) -> &dyn StepPanel<T> {
        self.steps[self.state.current_step].as_ref()
    }

    pub fn panels(&self) -> impl Iterator<Item = &dyn StepPanel<T>> {
        self.steps.iter().map(|step| step.as_ref())
    }

    pub fn errors_for(&self, step: usize) -> &[String] {
        self.state
            .step_errors
            .get(&step)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn current_errors(&self) -> &[String] {
        self.errors_for(self.state.current_step)
    }

    pub fn navigator(&self) -> StepNavigator {
        StepNavigator::new(
            self.steps.iter().map(|step| step.title()).collect(),
            self.state.current_step,
            self.options.allow_direct_step_jump,
        )
    }

    pub fn update_field(&mut self, key: &str, value: &str) -> Result<FieldUpdate, FieldError> {
        self.state.data.set_field(key, value)?;
        let stored = self.state.data.field(key).unwrap_or_default();
        let inline_error = self
            .steps
            .iter()
            .find_map(|step| step.field(key))
            .and_then(|field| field.check(&stored));
        tracing::debug!(wizard = self.name, field = key, "field updated");
        Ok(FieldUpdate { inline_error })
    }

    pub fn update_entries(&mut self, key: &str, op: EntryOp) -> Result<bool, FieldError> {
        let list = self
            .state
            .data
            .entries_mut(key)
            .ok_or_else(|| FieldError::UnknownList(key.to_string()))?;
        let changed = list.apply(op)?;
        tracing::debug!(wizard = self.name, list = key, changed, "entries updated");
        Ok(changed)
    }

    pub fn validate_current(&self) -> ValidationResult {
        self.current_panel().validate(&self.state.data)
    }

    fn record(&mut self, result: &ValidationResult) {
        let step = self.state.current_step;
        if result.ok() {
            self.state.step_errors.remove(&step);
        } else {
            self.state.step_errors.insert(step, result.errors().to_vec());
            tracing::warn!(
                wizard = self.name,
                step,
                errors = result.errors().len(),
                "step validation failed"
            );
        }
    }

    /// Gates on the current step, then moves forward by one. On the final step
    /// the index never changes, whatever the validation outcome.
    pub fn advance(&mut self) -> StepChange {
        let result = self.validate_current();
        self.record(&result);
        let step = self.state.current_step;
        if !result.ok() {
            return StepChange::Blocked {
                step,
                errors: result.into_errors(),
            };
        }
        if self.is_final_step() {
            return StepChange::Unchanged;
        }
        self.move_to(step + 1)
    }

    pub fn retreat(&mut self) -> StepChange {
        match self.state.current_step {
            0 => StepChange::Unchanged,
            step => self.move_to(step - 1),
        }
    }

    /// Moves straight to `step` without a validation gate, when enabled.
    pub fn jump_to(&mut self, step: usize) -> StepChange {
        if !self.options.allow_direct_step_jump {
            return StepChange::JumpDisabled;
        }
        if step >= self.state.total_steps {
            return StepChange::OutOfRange(step);
        }
        if step == self.state.current_step {
            return StepChange::Unchanged;
        }
        self.move_to(step)
    }

    fn move_to(&mut self, to: usize) -> StepChange {
        let from = self.state.current_step;
        self.state.current_step = to;
        tracing::debug!(wizard = self.name, from, to, "step changed");
        StepChange::Moved { from, to }
    }

    /// Validates the final step and hands the payload to `sink`.
    ///
    /// A successful submission is terminal: repeated calls return
    /// [`SubmitOutcome::AlreadySubmitted`] without touching the sink until
    /// [`reset`](Self::reset). A failed hand-off may be retried.
    pub fn submit(&mut self, sink: &mut dyn SubmissionSink<T>) -> SubmitOutcome {
        if self.state.status == SubmissionStatus::Submitted {
            return SubmitOutcome::AlreadySubmitted;
        }
        if !self.is_final_step() {
            return SubmitOutcome::NotFinalStep;
        }
        let result = self.validate_current();
        self.record(&result);
        if !result.ok() {
            return SubmitOutcome::Blocked {
                step: self.state.current_step,
                errors: result.into_errors(),
            };
        }

        self.state.status = SubmissionStatus::Submitting;
        match sink.submit(&self.state.data) {
            Ok(()) => {
                self.state.status = SubmissionStatus::Submitted;
                tracing::info!(wizard = self.name, "wizard submitted");
                SubmitOutcome::Submitted
            }
            Err(err) => {
                let message = err.to_string();
                tracing::warn!(wizard = self.name, error = %message, "submission failed");
                self.state.status = SubmissionStatus::Failed(message.clone());
                SubmitOutcome::Failed(message)
            }
        }
    }

    /// Discards all entered data and returns to the first step.
    pub fn reset(&mut self) {
        self.state = WizardState::new(self.state.total_steps, T::default());
        tracing::debug!(wizard = self.name, "wizard reset");
    }

    /// Review lines for every step, in order.
    pub fn summary(&self) -> Vec<String> {
        let mut lines = Vec::new();
        for (index, step) in self.steps.iter().enumerate() {
            lines.push(format!("{}. {}", index + 1, step.title()));
            for line in step.render(&self.state.data) {
                lines.push(format!("   {}", line));
            }
        }
        lines
    }
}
