//! Type-erased wizard session: a controller bound to its sink plus the
//! step-local transient state (open searchable selects) its panels own.

use std::collections::HashMap;

use super::controller::{FieldUpdate, StepChange, SubmissionStatus, SubmitOutcome, WizardController};
use super::entries::{EntryId, EntryOp};
use super::field::{FieldDescriptor, FieldError, FormData};
use super::navigator::StepNavigator;
use super::select::SearchableSelect;
use super::sink::SubmissionSink;

/// Address of a scalar field (`city`) or one cell of an entry list
/// (`desired_colleges[2].college`, 1-based position).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldPath {
    Field(String),
    Cell {
        list: String,
        position: usize,
        column: String,
    },
}

impl FieldPath {
    pub fn parse(raw: &str) -> Result<Self, FieldError> {
        let raw = raw.trim();
        let Some(open) = raw.find('[') else {
            return Ok(FieldPath::Field(raw.to_string()));
        };
        let malformed = || FieldError::UnknownField(raw.to_string());
        let close = raw[open..]
            .find("].")
            .map(|offset| open + offset)
            .ok_or_else(malformed)?;
        let position: usize = raw[open + 1..close].parse().map_err(|_| malformed())?;
        if position == 0 {
            return Err(malformed());
        }
        Ok(FieldPath::Cell {
            list: raw[..open].to_string(),
            position,
            column: raw[close + 2..].to_string(),
        })
    }
}

/// Operations the shell needs from any running wizard, independent of its
/// payload type.
pub trait WizardHandle {
    fn name(&self) -> &'static str;

    fn current_step(&self) -> usize;

    fn total_steps(&self) -> usize;

    fn navigator(&self) -> StepNavigator;

    fn current_fields(&self) -> Vec<FieldDescriptor>;

    fn render_current(&self) -> Vec<String>;

    fn current_errors(&self) -> Vec<String>;

    fn summary(&self) -> Vec<String>;

    fn status(&self) -> SubmissionStatus;

    fn value(&self, path: &FieldPath) -> Result<String, FieldError>;

    fn set_value(&mut self, path: &FieldPath, value: &str) -> Result<FieldUpdate, FieldError>;

    fn entry_id(&self, list: &str, position: usize) -> Result<EntryId, FieldError>;

    fn edit_entries(&mut self, list: &str, op: EntryOp) -> Result<bool, FieldError>;

    fn search(&mut self, path: &FieldPath, text: &str) -> Result<Vec<&'static str>, FieldError>;

    fn pick(&mut self, path: &FieldPath, index: usize) -> Result<Option<&'static str>, FieldError>;

    fn blur(&mut self, path: &FieldPath);

    fn advance(&mut self) -> StepChange;

    fn retreat(&mut self) -> StepChange;

    fn jump_to(&mut self, step: usize) -> StepChange;

    fn submit(&mut self) -> SubmitOutcome;

    fn receipt(&self) -> Option<String>;

    fn reset(&mut self);
}

pub struct BoundWizard<T: FormData> {
    controller: WizardController<T>,
    sink: Box<dyn SubmissionSink<T>>,
    selects: HashMap<String, SearchableSelect>,
}

impl<T: FormData + Default> BoundWizard<T> {
    pub fn new(controller: WizardController<T>, sink: Box<dyn SubmissionSink<T>>) -> Self {
        Self {
            controller,
            sink,
            selects: HashMap::new(),
        }
    }

    pub fn controller(&self) -> &WizardController<T> {
        &self.controller
    }

    /// Reference list for `path`, only for fields shown on the current step.
    fn lookup(&self, path: &FieldPath) -> Result<&'static [&'static str], FieldError> {
        let (key, column) = match path {
            FieldPath::Field(key) => (key.as_str(), None),
            FieldPath::Cell { list, column, .. } => (list.as_str(), Some(column.as_str())),
        };
        self.controller
            .current_panel()
            .field(key)
            .and_then(|field| field.lookup(column))
            .ok_or_else(|| FieldError::UnknownField(key.to_string()))
    }

    fn select_key(&self, path: &FieldPath) -> Result<String, FieldError> {
        match path {
            FieldPath::Field(key) => Ok(key.clone()),
            FieldPath::Cell {
                list,
                position,
                column,
            } => {
                let id = self.entry_id(list, *position)?;
                Ok(format!("{}:{}:{}", list, id, column))
            }
        }
    }

    fn write(
        controller: &mut WizardController<T>,
        target: &Target,
        value: &str,
    ) -> Result<FieldUpdate, FieldError> {
        match target {
            Target::Field(key) => controller.update_field(key, value),
            Target::Cell { list, id, column } => {
                controller.update_entries(
                    list,
                    EntryOp::Set {
                        id: *id,
                        column: column.clone(),
                        value: value.to_string(),
                    },
                )?;
                Ok(FieldUpdate::default())
            }
        }
    }

    fn target(&self, path: &FieldPath) -> Result<Target, FieldError> {
        match path {
            FieldPath::Field(key) => Ok(Target::Field(key.clone())),
            FieldPath::Cell {
                list,
                position,
                column,
            } => Ok(Target::Cell {
                list: list.clone(),
                id: self.entry_id(list, *position)?,
                column: column.clone(),
            }),
        }
    }
}

enum Target {
    Field(String),
    Cell {
        list: String,
        id: EntryId,
        column: String,
    },
}

impl<T: FormData + Default> WizardHandle for BoundWizard<T> {
    fn name(&self) -> &'static str {
        self.controller.name()
    }

    fn current_step(&self) -> usize {
        self.controller.current_step()
    }

    fn total_steps(&self) -> usize {
        self.controller.total_steps()
    }

    fn navigator(&self) -> StepNavigator {
        self.controller.navigator()
    }

    fn current_fields(&self) -> Vec<FieldDescriptor> {
        self.controller.current_panel().fields().to_vec()
    }

    fn render_current(&self) -> Vec<String> {
        self.controller
            .current_panel()
            .render(self.controller.data())
    }

    fn current_errors(&self) -> Vec<String> {
        self.controller.current_errors().to_vec()
    }

    fn summary(&self) -> Vec<String> {
        self.controller.summary()
    }

    fn status(&self) -> SubmissionStatus {
        self.controller.status().clone()
    }

    fn value(&self, path: &FieldPath) -> Result<String, FieldError> {
        let data = self.controller.data();
        match path {
            FieldPath::Field(key) => data
                .field(key)
                .ok_or_else(|| FieldError::UnknownField(key.clone())),
            FieldPath::Cell {
                list,
                position,
                column,
            } => {
                let entries = data
                    .entries(list)
                    .ok_or_else(|| FieldError::UnknownList(list.clone()))?;
                let index = entries
                    .columns()
                    .iter()
                    .position(|name| name == column)
                    .ok_or_else(|| FieldError::UnknownColumn {
                        list: list.clone(),
                        column: column.clone(),
                    })?;
                let rows = entries.rows();
                position
                    .checked_sub(1)
                    .and_then(|row| rows.get(row))
                    .map(|(_, values)| values[index].clone())
                    .ok_or_else(|| FieldError::UnknownEntry(format!("{}[{}]", list, position)))
            }
        }
    }

    fn set_value(&mut self, path: &FieldPath, value: &str) -> Result<FieldUpdate, FieldError> {
        let target = self.target(path)?;
        Self::write(&mut self.controller, &target, value)
    }

    fn entry_id(&self, list: &str, position: usize) -> Result<EntryId, FieldError> {
        let entries = self
            .controller
            .data()
            .entries(list)
            .ok_or_else(|| FieldError::UnknownList(list.to_string()))?;
        position
            .checked_sub(1)
            .and_then(|index| entries.id_at(index))
            .ok_or_else(|| FieldError::UnknownEntry(format!("{}[{}]", list, position)))
    }

    fn edit_entries(&mut self, list: &str, op: EntryOp) -> Result<bool, FieldError> {
        self.controller.update_entries(list, op)
    }

    fn search(&mut self, path: &FieldPath, text: &str) -> Result<Vec<&'static str>, FieldError> {
        let options = self.lookup(path)?;
        let key = self.select_key(path)?;
        let target = self.target(path)?;
        let select = self
            .selects
            .entry(key)
            .or_insert_with(|| SearchableSelect::new(options));
        let controller = &mut self.controller;
        let mut written = Ok(FieldUpdate::default());
        let matches = select.input(text, |value| {
            written = Self::write(controller, &target, value);
        });
        written?;
        Ok(matches)
    }

    fn pick(&mut self, path: &FieldPath, index: usize) -> Result<Option<&'static str>, FieldError> {
        let options = self.lookup(path)?;
        let key = self.select_key(path)?;
        let target = self.target(path)?;
        let select = self
            .selects
            .entry(key)
            .or_insert_with(|| SearchableSelect::new(options));
        let controller = &mut self.controller;
        let mut written = Ok(FieldUpdate::default());
        let picked = select.pick(index, |value| {
            written = Self::write(controller, &target, value);
        });
        written?;
        Ok(picked)
    }

    fn blur(&mut self, path: &FieldPath) {
        if let Ok(key) = self.select_key(path) {
            if let Some(select) = self.selects.get_mut(&key) {
                select.blur();
            }
        }
    }

    fn advance(&mut self) -> StepChange {
        let change = self.controller.advance();
        if matches!(change, StepChange::Moved { .. }) {
            self.selects.clear();
        }
        change
    }

    fn retreat(&mut self) -> StepChange {
        let change = self.controller.retreat();
        if matches!(change, StepChange::Moved { .. }) {
            self.selects.clear();
        }
        change
    }

    fn jump_to(&mut self, step: usize) -> StepChange {
        let change = self.controller.jump_to(step);
        if matches!(change, StepChange::Moved { .. }) {
            self.selects.clear();
        }
        change
    }

    fn submit(&mut self) -> SubmitOutcome {
        self.controller.submit(self.sink.as_mut())
    }

    fn receipt(&self) -> Option<String> {
        self.sink.receipt()
    }

    fn reset(&mut self) {
        self.selects.clear();
        self.controller.reset();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_scalar_path() {
        assert_eq!(
            FieldPath::parse("city").unwrap(),
            FieldPath::Field("city".into())
        );
    }

    #[test]
    fn parse_cell_path() {
        assert_eq!(
            FieldPath::parse("courses[2].name").unwrap(),
            FieldPath::Cell {
                list: "courses".into(),
                position: 2,
                column: "name".into()
            }
        );
    }

    #[test]
    fn parse_rejects_malformed_cells() {
        assert!(FieldPath::parse("courses[0].name").is_err());
        assert!(FieldPath::parse("courses[x].name").is_err());
        assert!(FieldPath::parse("courses[1]name").is_err());
        assert!(FieldPath::parse("x].y[3").is_err());
        assert!(FieldPath::parse("courses[].name").is_err());
        assert!(FieldPath::parse("a[1]b].c").is_err());
    }
}
