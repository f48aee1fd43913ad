//! Ordered label → column mapping with flat or multi-level labels.
//!
//! Every column in one accessor has the same row count; this is checked
//! eagerly, before any column is accepted.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::label::Label;
use crate::types::Column;

/// Column index snapshot, the shape a dataframe exposes as its `columns`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ColumnIndex {
    Flat(Vec<String>),
    Multi {
        names: Vec<Option<String>>,
        tuples: Vec<Vec<String>>,
    },
}

impl ColumnIndex {
    pub fn len(&self) -> usize {
        match self {
            ColumnIndex::Flat(labels) => labels.len(),
            ColumnIndex::Multi { tuples, .. } => tuples.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnAccessor {
    entries: Vec<(Label, Column)>,
    multiindex: bool,
    level_names: Vec<Option<String>>,
}

impl Default for ColumnAccessor {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
            multiindex: false,
            level_names: vec![None],
        }
    }
}

impl ColumnAccessor {
    /// Build a flat accessor. Every label must be `Label::Flat`.
    pub fn new<I, L, C>(entries: I) -> Result<Self>
    where
        I: IntoIterator<Item = (L, C)>,
        L: Into<Label>,
        C: Into<Column>,
    {
        let entries = collect_entries(entries);
        if let Some((label, _)) = entries.iter().find(|(l, _)| l.is_tuple()) {
            return Err(Error::LabelShape(format!(
                "tuple label {label} in a flat accessor"
            )));
        }
        check_row_counts(&entries)?;
        Ok(Self {
            entries,
            multiindex: false,
            level_names: vec![None],
        })
    }

    /// Build a multi-level accessor. Every label must be a tuple of the same
    /// depth. `level_names` may be empty (all levels unnamed) or name every level.
    pub fn new_multiindex<I, L, C>(entries: I, level_names: Vec<Option<String>>) -> Result<Self>
    where
        I: IntoIterator<Item = (L, C)>,
        L: Into<Label>,
        C: Into<Column>,
    {
        let entries = collect_entries(entries);

        // With no entries and no names the depth is fixed by the first insert.
        let depth = match entries.first() {
            Some((label, _)) => label.depth(),
            None => level_names.len(),
        };
        for (label, _) in &entries {
            if !label.is_tuple() {
                return Err(Error::LabelShape(format!(
                    "flat label {label} in a multiindex accessor"
                )));
            }
            if label.depth() != depth {
                return Err(Error::LabelShape(format!(
                    "label {label} has {} levels, expected {depth}",
                    label.depth()
                )));
            }
        }

        let level_names = if level_names.is_empty() {
            vec![None; depth]
        } else if level_names.len() == depth {
            level_names
        } else {
            return Err(Error::LabelShape(format!(
                "{} level names for {depth} levels",
                level_names.len()
            )));
        };

        check_row_counts(&entries)?;
        Ok(Self {
            entries,
            multiindex: true,
            level_names,
        })
    }

    pub fn multiindex(&self) -> bool {
        self.multiindex
    }

    pub fn level_names(&self) -> &[Option<String>] {
        &self.level_names
    }

    /// Label depth. Zero only for an empty multiindex accessor built
    /// without level names, until its first insert.
    pub fn nlevels(&self) -> usize {
        self.level_names.len()
    }

    /// Number of columns.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Shared row count (0 for an empty accessor).
    pub fn num_rows(&self) -> usize {
        self.entries.first().map(|(_, c)| c.len()).unwrap_or(0)
    }

    pub fn labels(&self) -> impl Iterator<Item = &Label> + '_ {
        self.entries.iter().map(|(l, _)| l)
    }

    pub fn columns(&self) -> impl Iterator<Item = &Column> + '_ {
        self.entries.iter().map(|(_, c)| c)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Label, &Column)> + '_ {
        self.entries.iter().map(|(l, c)| (l, c))
    }

    pub fn get(&self, label: &Label) -> Option<&Column> {
        self.entries
            .iter()
            .find(|(l, _)| l == label)
            .map(|(_, c)| c)
    }

    /// Insert or replace a column. A replaced label keeps its position.
    pub fn insert(&mut self, label: impl Into<Label>, column: impl Into<Column>) -> Result<()> {
        let label = label.into();
        let column = column.into();

        if self.multiindex && self.nlevels() == 0 {
            if !label.is_tuple() {
                return Err(Error::LabelShape(format!(
                    "flat label {label} in a multiindex accessor"
                )));
            }
            self.level_names = vec![None; label.depth()];
        } else if self.multiindex {
            if !label.is_tuple() || label.depth() != self.nlevels() {
                return Err(Error::LabelShape(format!(
                    "label {label} does not have {} levels",
                    self.nlevels()
                )));
            }
        } else if label.is_tuple() {
            return Err(Error::LabelShape(format!(
                "tuple label {label} in a flat accessor"
            )));
        }

        let existing = self.entries.iter().position(|(l, _)| *l == label);
        let sole_replacement = existing.is_some() && self.entries.len() == 1;
        if !self.entries.is_empty() && !sole_replacement && column.len() != self.num_rows() {
            return Err(Error::SizeMismatch {
                label: label.to_string(),
                expected: self.num_rows(),
                found: column.len(),
            });
        }

        match existing {
            Some(idx) => self.entries[idx].1 = column,
            None => self.entries.push((label, column)),
        }
        Ok(())
    }

    pub fn remove(&mut self, label: &Label) -> Option<Column> {
        let idx = self.entries.iter().position(|(l, _)| l == label)?;
        Some(self.entries.remove(idx).1)
    }

    /// Select columns by label.
    ///
    /// Flat accessors match `key` exactly. Multiindex accessors treat `key` as
    /// a level prefix and strip the matched levels from the selected labels;
    /// when a single level remains the result is flat.
    pub fn get_by_label(&self, key: impl Into<Label>) -> Result<ColumnAccessor> {
        let key = key.into();

        if !self.multiindex {
            let column = self
                .get(&key)
                .ok_or_else(|| Error::KeyNotFound(key.to_string()))?;
            return Ok(ColumnAccessor {
                entries: vec![(key, column.clone())],
                multiindex: false,
                level_names: self.level_names.clone(),
            });
        }

        let nlevels = self.nlevels();
        let plen = key.depth();
        if plen > nlevels {
            return Err(Error::KeyNotFound(key.to_string()));
        }

        // A full-depth key keeps its last level so the result stays labelled.
        let strip = plen.min(nlevels - 1);
        let selected: Vec<(Label, Column)> = self
            .entries
            .iter()
            .filter(|(label, _)| label.starts_with(&key))
            .filter_map(|(label, col)| label.strip_levels(strip).map(|l| (l, col.clone())))
            .collect();

        if selected.is_empty() {
            return Err(Error::KeyNotFound(key.to_string()));
        }

        let level_names = self.level_names[strip..].to_vec();
        Ok(ColumnAccessor {
            multiindex: level_names.len() > 1,
            entries: selected,
            level_names,
        })
    }

    pub fn to_index(&self) -> ColumnIndex {
        if self.multiindex {
            ColumnIndex::Multi {
                names: self.level_names.clone(),
                tuples: self.labels().map(|l| l.levels().to_vec()).collect(),
            }
        } else {
            ColumnIndex::Flat(
                self.labels()
                    .map(|l| l.levels().join(", "))
                    .collect(),
            )
        }
    }
}

fn collect_entries<I, L, C>(entries: I) -> Vec<(Label, Column)>
where
    I: IntoIterator<Item = (L, C)>,
    L: Into<Label>,
    C: Into<Column>,
{
    entries
        .into_iter()
        .map(|(l, c)| (l.into(), c.into()))
        .collect()
}

fn check_row_counts(entries: &[(Label, Column)]) -> Result<()> {
    let Some((_, first)) = entries.first() else {
        return Ok(());
    };
    let expected = first.len();
    for (label, col) in &entries[1..] {
        if col.len() != expected {
            return Err(Error::SizeMismatch {
                label: label.to_string(),
                expected,
                found: col.len(),
            });
        }
    }
    Ok(())
}
