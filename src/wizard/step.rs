use super::field::{FieldDescriptor, FieldKind, FormData};
use super::validation::ValidationResult;

const UNFILLED: &str = "[unfilled]";

/// One step of a wizard: its fields, how it reads back, and its gate.
pub trait StepPanel<T: FormData> {
    fn title(&self) -> &'static str;

    fn fields(&self) -> &[FieldDescriptor];

    /// Pure predicate over the aggregate data, run on every navigation attempt.
    fn validate(&self, data: &T) -> ValidationResult;

    fn field(&self, key: &str) -> Option<&FieldDescriptor> {
        self.fields().iter().find(|field| field.key == key)
    }

    fn render(&self, data: &T) -> Vec<String> {
        let mut lines = Vec::new();
        for field in self.fields() {
            match field.kind {
                FieldKind::Entries(_) => {
                    lines.push(format!("{}:", field.label));
                    let Some(list) = data.entries(field.key) else {
                        continue;
                    };
                    let columns = list.columns();
                    for (position, (_, values)) in list.rows().into_iter().enumerate() {
                        let cells: Vec<String> = columns
                            .iter()
                            .zip(values.iter())
                            .map(|(column, value)| format!("{}={}", column, display(value)))
                            .collect();
                        lines.push(format!("  {}. {}", position + 1, cells.join(", ")));
                    }
                }
                _ => {
                    let value = data.field(field.key).unwrap_or_default();
                    lines.push(format!("{}: {}", field.label, display(&value)));
                }
            }
        }
        lines
    }
}

fn display(value: &str) -> &str {
    if value.trim().is_empty() {
        UNFILLED
    } else {
        value
    }
}

/// Table-driven [`StepPanel`] built from field descriptors and a validation
/// function. Flows declare their steps with it.
pub struct StepDefinition<T> {
    title: &'static str,
    fields: Vec<FieldDescriptor>,
    validator: fn(&T) -> ValidationResult,
}

impl<T> StepDefinition<T> {
    pub fn new(
        title: &'static str,
        fields: Vec<FieldDescriptor>,
        validator: fn(&T) -> ValidationResult,
    ) -> Self {
        Self {
            title,
            fields,
            validator,
        }
    }
}

impl<T: FormData> StepPanel<T> for StepDefinition<T> {
    fn title(&self) -> &'static str {
        self.title
    }

    fn fields(&self) -> &[FieldDescriptor] {
        &self.fields
    }

    fn validate(&self, data: &T) -> ValidationResult {
        (self.validator)(data)
    }
}
