//! Field-by-field prompting for `fill`.
//!
//! Interactive sessions prompt through dialoguer. Scripted runs (and tests)
//! feed answers from `COLLEGE_FORMS_TEST_INPUTS`, a `|`-separated list where
//! `<keep>` leaves a field as it is and `<cancel>` stops prompting.

use std::collections::VecDeque;
use std::env;

use dialoguer::{theme::ColorfulTheme, Input, Select};

use crate::cli::core::CommandError;
use crate::cli::io;
use crate::wizard::{FieldKind, FieldPath, WizardHandle};

pub const TEST_INPUTS_ENV: &str = "COLLEGE_FORMS_TEST_INPUTS";

const KEEP_TOKEN: &str = "<keep>";
const CANCEL_TOKEN: &str = "<cancel>";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PromptAnswer {
    Value(String),
    Keep,
    Cancel,
}

pub trait FieldPrompter {
    fn text(&mut self, label: &str, current: &str) -> Result<PromptAnswer, CommandError>;

    /// Index into `options`, `None` to keep the current value.
    fn choose(&mut self, label: &str, options: &[&str]) -> Result<Option<usize>, CommandError>;
}

pub struct DialoguerPrompter<'a> {
    theme: &'a ColorfulTheme,
}

impl<'a> DialoguerPrompter<'a> {
    pub fn new(theme: &'a ColorfulTheme) -> Self {
        Self { theme }
    }
}

impl FieldPrompter for DialoguerPrompter<'_> {
    fn text(&mut self, label: &str, current: &str) -> Result<PromptAnswer, CommandError> {
        let value: String = Input::with_theme(self.theme)
            .with_prompt(label)
            .with_initial_text(current)
            .allow_empty(true)
            .interact_text()?;
        if value == current {
            Ok(PromptAnswer::Keep)
        } else {
            Ok(PromptAnswer::Value(value))
        }
    }

    fn choose(&mut self, label: &str, options: &[&str]) -> Result<Option<usize>, CommandError> {
        let mut items: Vec<&str> = options.to_vec();
        items.push("(keep current value)");
        let picked = Select::with_theme(self.theme)
            .with_prompt(label)
            .items(&items)
            .default(0)
            .interact_opt()?;
        Ok(picked.filter(|index| *index < options.len()))
    }
}

#[derive(Debug, Default)]
pub struct ScriptedPrompter {
    answers: VecDeque<PromptAnswer>,
}

impl ScriptedPrompter {
    pub fn new(answers: impl IntoIterator<Item = PromptAnswer>) -> Self {
        Self {
            answers: answers.into_iter().collect(),
        }
    }

    pub fn parse(raw: &str) -> Self {
        Self::new(raw.split('|').map(|segment| match segment.trim() {
            KEEP_TOKEN => PromptAnswer::Keep,
            CANCEL_TOKEN => PromptAnswer::Cancel,
            value => PromptAnswer::Value(value.to_string()),
        }))
    }

    pub fn from_env() -> Option<Self> {
        env::var(TEST_INPUTS_ENV).ok().map(|raw| Self::parse(&raw))
    }

    fn next(&mut self, label: &str) -> Result<PromptAnswer, CommandError> {
        self.answers.pop_front().ok_or_else(|| {
            CommandError::Message(format!("Scripted inputs exhausted before `{}`", label))
        })
    }
}

impl FieldPrompter for ScriptedPrompter {
    fn text(&mut self, label: &str, _current: &str) -> Result<PromptAnswer, CommandError> {
        self.next(label)
    }

    fn choose(&mut self, label: &str, options: &[&str]) -> Result<Option<usize>, CommandError> {
        match self.next(label)? {
            PromptAnswer::Value(value) => {
                let by_number = value
                    .parse::<usize>()
                    .ok()
                    .and_then(|n| n.checked_sub(1))
                    .filter(|index| *index < options.len());
                let by_text = || {
                    options
                        .iter()
                        .position(|option| option.eq_ignore_ascii_case(&value))
                };
                by_number.or_else(by_text).map(Some).ok_or_else(|| {
                    CommandError::InvalidArguments(format!(
                        "`{}` is not an option for {}",
                        value, label
                    ))
                })
            }
            PromptAnswer::Keep | PromptAnswer::Cancel => Ok(None),
        }
    }
}

/// Prompts every scalar field of the current step. Returns how many fields
/// were written.
pub fn fill_current_step(
    handle: &mut dyn WizardHandle,
    prompter: &mut dyn FieldPrompter,
) -> Result<usize, CommandError> {
    let mut written = 0;
    for field in handle.current_fields() {
        let path = FieldPath::Field(field.key.to_string());
        let label = match field.help {
            Some(help) => format!("{} ({})", field.label, help),
            None => field.label.to_string(),
        };
        match field.kind {
            FieldKind::Entries(_) => {
                io::print_info(format!(
                    "{}: edit rows with `entry add|set|remove {}`",
                    field.label, field.key
                ));
            }
            FieldKind::Choice(options) => {
                if let Some(index) = prompter.choose(&label, options)? {
                    handle.set_value(&path, options[index])?;
                    written += 1;
                }
            }
            FieldKind::Searchable(_) => {
                let current = handle.value(&path)?;
                let typed = match prompter.text(&label, &current)? {
                    PromptAnswer::Value(value) => value,
                    PromptAnswer::Keep => continue,
                    PromptAnswer::Cancel => break,
                };
                let matches = handle.search(&path, &typed)?;
                written += 1;
                let exact = matches.iter().any(|option| *option == typed);
                if matches.is_empty() || exact {
                    handle.blur(&path);
                    continue;
                }
                match prompter.choose(&label, &matches)? {
                    Some(index) => {
                        handle.pick(&path, index)?;
                    }
                    None => handle.blur(&path),
                }
            }
            FieldKind::Text => {
                let current = handle.value(&path)?;
                match prompter.text(&label, &current)? {
                    PromptAnswer::Value(value) => {
                        let update = handle.set_value(&path, &value)?;
                        if let Some(message) = update.inline_error {
                            io::print_warning(message);
                        }
                        written += 1;
                    }
                    PromptAnswer::Keep => {}
                    PromptAnswer::Cancel => break,
                }
            }
        }
    }
    Ok(written)
}
