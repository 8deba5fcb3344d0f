use thiserror::Error;

use super::entries::EntryListOps;
use super::validation::Validator;

/// Errors raised when a caller addresses form data that does not exist.
///
/// These are surface errors (a typo in a CLI command, a stale entry id), not
/// validation failures; validation never produces an `Err`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FieldError {
    #[error("Unknown field `{0}`")]
    UnknownField(String),
    #[error("Unknown list `{0}`")]
    UnknownList(String),
    #[error("Unknown column `{column}` in list `{list}`")]
    UnknownColumn { list: String, column: String },
    #[error("Unknown entry `{0}`")]
    UnknownEntry(String),
    #[error("`{field}` must be one of: {allowed}")]
    InvalidChoice { field: String, allowed: String },
}

/// Supported control kinds for a step field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    /// Fixed picklist; values are normalised to the canonical option.
    Choice(&'static [&'static str]),
    /// Free text backed by a filterable reference list.
    Searchable(&'static [&'static str]),
    /// A repeatable entry list stored under the field key, with the
    /// reference lists backing its searchable columns.
    Entries(&'static [ColumnLookup]),
}

/// Reference list attached to one column of an entry list.
pub type ColumnLookup = (&'static str, &'static [&'static str]);

/// Declarative description of a single step field.
#[derive(Debug, Clone)]
pub struct FieldDescriptor {
    pub key: &'static str,
    pub label: &'static str,
    pub kind: FieldKind,
    pub required: bool,
    pub help: Option<&'static str>,
    pub validator: Validator,
}

impl FieldDescriptor {
    pub fn new(key: &'static str, label: &'static str, kind: FieldKind) -> Self {
        Self {
            key,
            label,
            kind,
            required: true,
            help: None,
            validator: Validator::None,
        }
    }

    pub fn text(key: &'static str, label: &'static str) -> Self {
        Self::new(key, label, FieldKind::Text)
    }

    pub fn choice(key: &'static str, label: &'static str, options: &'static [&'static str]) -> Self {
        Self::new(key, label, FieldKind::Choice(options))
    }

    pub fn searchable(
        key: &'static str,
        label: &'static str,
        options: &'static [&'static str],
    ) -> Self {
        Self::new(key, label, FieldKind::Searchable(options))
    }

    pub fn entries(
        key: &'static str,
        label: &'static str,
        lookups: &'static [ColumnLookup],
    ) -> Self {
        Self::new(key, label, FieldKind::Entries(lookups))
    }

    /// Reference list for a searchable scalar field or entry column.
    pub fn lookup(&self, column: Option<&str>) -> Option<&'static [&'static str]> {
        match (&self.kind, column) {
            (FieldKind::Searchable(options), None) => Some(*options),
            (FieldKind::Entries(lookups), Some(column)) => lookups
                .iter()
                .find(|(name, _)| *name == column)
                .map(|(_, options)| *options),
            _ => None,
        }
    }

    pub fn with_optional(mut self) -> Self {
        self.required = false;
        self
    }

    pub fn with_help(mut self, help: &'static str) -> Self {
        self.help = Some(help);
        self
    }

    pub fn with_validator(mut self, validator: Validator) -> Self {
        self.validator = validator;
        self
    }

    /// Inline check run on every change. The value is stored regardless; the
    /// message is advisory until the step gate runs.
    pub fn check(&self, value: &str) -> Option<String> {
        if value.trim().is_empty() {
            return if self.required {
                Some(format!("{} is required", self.label))
            } else {
                None
            };
        }
        self.validator.validate(value).err().map(|err| err.message)
    }
}

/// Resolves `input` against a picklist, case-insensitively.
pub fn resolve_choice(
    field: &str,
    input: &str,
    options: &'static [&'static str],
) -> Result<String, FieldError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Ok(String::new());
    }
    options
        .iter()
        .find(|candidate| candidate.eq_ignore_ascii_case(trimmed))
        .map(|candidate| candidate.to_string())
        .ok_or_else(|| FieldError::InvalidChoice {
            field: field.to_string(),
            allowed: options.join(", "),
        })
}

/// String-keyed view over a typed form payload.
///
/// Flows keep their data in explicit structs; this trait is the seam through
/// which text-driven surfaces (the shell, prompts) read and write it.
pub trait FormData {
    /// Current value of a scalar field, `None` when the key is unknown.
    fn field(&self, key: &str) -> Option<String>;

    fn set_field(&mut self, key: &str, value: &str) -> Result<(), FieldError>;

    fn entries(&self, _key: &str) -> Option<&dyn EntryListOps> {
        None
    }

    fn entries_mut(&mut self, _key: &str) -> Option<&mut dyn EntryListOps> {
        None
    }
}
