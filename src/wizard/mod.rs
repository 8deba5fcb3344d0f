//! Reusable linear multi-step form wizard.
//!
//! A wizard is a fixed, ordered list of [`StepPanel`]s over one typed payload.
//! [`WizardController`] owns the payload and the step index, gates forward
//! navigation on each step's validation, and hands the assembled payload to a
//! [`SubmissionSink`] on final submit. Concrete flows live in
//! [`crate::flows`].

pub mod controller;
pub mod entries;
pub mod field;
pub mod handle;
pub mod navigator;
pub mod select;
pub mod sink;
pub mod step;
pub mod validation;

pub use controller::{
    FieldUpdate, StepChange, SubmissionStatus, SubmitOutcome, WizardController, WizardOptions,
    WizardState,
};
pub use entries::{Direction, EntryId, EntryListOps, EntryOp, EntryRow, RepeatableEntry, RepeatableEntryList};
pub use field::{resolve_choice, ColumnLookup, FieldDescriptor, FieldError, FieldKind, FormData};
pub use handle::{BoundWizard, FieldPath, WizardHandle};
pub use navigator::{StepNavigator, StepState};
pub use select::{filter_options, SearchableSelect};
pub use sink::{ConsoleSink, MemorySink, SinkError, SubmissionSink};
pub use step::{StepDefinition, StepPanel};
pub use validation::{ValidationError, ValidationResult, Validator};
