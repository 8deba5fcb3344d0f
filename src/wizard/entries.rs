//! Repeatable entry lists embedded inside a step ("desired colleges",
//! "experience", "courses").
//!
//! Every operation returns a new list; callers replace the list held in the
//! form data in one go, so there is never a half-applied edit.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};
use uuid::Uuid;

use super::field::FieldError;

/// Stable identifier assigned when an entry is created.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntryId(Uuid);

impl EntryId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for EntryId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for EntryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = self.0.to_string();
        write!(f, "{}", &text[..8])
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
}

/// A typed row with statically known columns.
pub trait EntryRow: Clone + Default + PartialEq {
    const COLUMNS: &'static [&'static str];

    fn value(&self, column: &str) -> Option<String>;

    fn set_value(&mut self, column: &str, value: &str) -> Result<(), FieldError>;

    fn is_blank(&self) -> bool {
        Self::COLUMNS
            .iter()
            .all(|column| self.value(column).unwrap_or_default().trim().is_empty())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RepeatableEntry<R> {
    pub id: EntryId,
    #[serde(flatten)]
    pub row: R,
}

impl<R: EntryRow> RepeatableEntry<R> {
    fn blank() -> Self {
        Self {
            id: EntryId::new(),
            row: R::default(),
        }
    }
}

/// Ordered list of entries that always holds at least one row for editing.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct RepeatableEntryList<R> {
    entries: Vec<RepeatableEntry<R>>,
}

impl<R: EntryRow> Default for RepeatableEntryList<R> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: EntryRow> RepeatableEntryList<R> {
    pub fn new() -> Self {
        Self {
            entries: vec![RepeatableEntry::blank()],
        }
    }

    /// Builds a list from rows, normalising an empty input to one blank entry.
    pub fn from_rows(rows: impl IntoIterator<Item = R>) -> Self {
        let entries: Vec<RepeatableEntry<R>> = rows
            .into_iter()
            .map(|row| RepeatableEntry {
                id: EntryId::new(),
                row,
            })
            .collect();
        Self::from_entries(entries)
    }

    fn from_entries(entries: Vec<RepeatableEntry<R>>) -> Self {
        if entries.is_empty() {
            Self::new()
        } else {
            Self { entries }
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &RepeatableEntry<R>> {
        self.entries.iter()
    }

    pub fn ids(&self) -> Vec<EntryId> {
        self.entries.iter().map(|entry| entry.id).collect()
    }

    pub fn get(&self, id: EntryId) -> Option<&RepeatableEntry<R>> {
        self.entries.iter().find(|entry| entry.id == id)
    }

    pub fn position(&self, id: EntryId) -> Option<usize> {
        self.entries.iter().position(|entry| entry.id == id)
    }

    /// Rows that carry at least one non-blank value.
    pub fn filled(&self) -> impl Iterator<Item = &R> {
        self.entries
            .iter()
            .map(|entry| &entry.row)
            .filter(|row| !row.is_blank())
    }

    pub fn with_added(&self) -> Self {
        let mut entries = self.entries.clone();
        entries.push(RepeatableEntry::blank());
        Self { entries }
    }

    /// Removes `id`; the last remaining entry is never removed.
    pub fn without(&self, id: EntryId) -> Self {
        if self.entries.len() <= 1 {
            return self.clone();
        }
        let entries = self
            .entries
            .iter()
            .filter(|entry| entry.id != id)
            .cloned()
            .collect();
        Self::from_entries(entries)
    }

    /// Swaps `id` with its neighbour; a no-op at the list boundaries.
    pub fn moved(&self, id: EntryId, direction: Direction) -> Self {
        let mut entries = self.entries.clone();
        let Some(index) = self.position(id) else {
            return self.clone();
        };
        let target = match direction {
            Direction::Up if index > 0 => index - 1,
            Direction::Down if index + 1 < entries.len() => index + 1,
            _ => return self.clone(),
        };
        entries.swap(index, target);
        Self { entries }
    }

    pub fn with_value(&self, id: EntryId, column: &str, value: &str) -> Result<Self, FieldError> {
        let index = self
            .position(id)
            .ok_or_else(|| FieldError::UnknownEntry(id.to_string()))?;
        let mut entries = self.entries.clone();
        entries[index].row.set_value(column, value)?;
        Ok(Self { entries })
    }
}

impl<'de, R> Deserialize<'de> for RepeatableEntryList<R>
where
    R: EntryRow + Deserialize<'de>,
{
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let entries = Vec::<RepeatableEntry<R>>::deserialize(deserializer)?;
        Ok(Self::from_entries(entries))
    }
}

/// Edit requested against an entry list through the type-erased surface.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EntryOp {
    Add,
    Remove(EntryId),
    Move(EntryId, Direction),
    Set {
        id: EntryId,
        column: String,
        value: String,
    },
}

/// Object-safe view of a [`RepeatableEntryList`] so panels and the shell can
/// address lists by key without knowing the row type.
pub trait EntryListOps {
    fn columns(&self) -> &'static [&'static str];

    fn rows(&self) -> Vec<(EntryId, Vec<String>)>;

    fn id_at(&self, position: usize) -> Option<EntryId>;

    /// Applies `op` by replacing the list with its updated copy. Returns
    /// whether the list changed.
    fn apply(&mut self, op: EntryOp) -> Result<bool, FieldError>;
}

impl<R: EntryRow> EntryListOps for RepeatableEntryList<R> {
    fn columns(&self) -> &'static [&'static str] {
        R::COLUMNS
    }

    fn rows(&self) -> Vec<(EntryId, Vec<String>)> {
        self.entries
            .iter()
            .map(|entry| {
                let values = R::COLUMNS
                    .iter()
                    .map(|column| entry.row.value(column).unwrap_or_default())
                    .collect();
                (entry.id, values)
            })
            .collect()
    }

    fn id_at(&self, position: usize) -> Option<EntryId> {
        self.entries.get(position).map(|entry| entry.id)
    }

    fn apply(&mut self, op: EntryOp) -> Result<bool, FieldError> {
        let next = match op {
            EntryOp::Add => self.with_added(),
            EntryOp::Remove(id) => self.without(id),
            EntryOp::Move(id, direction) => self.moved(id, direction),
            EntryOp::Set { id, column, value } => self.with_value(id, &column, &value)?,
        };
        let changed = next != *self;
        *self = next;
        Ok(changed)
    }
}
