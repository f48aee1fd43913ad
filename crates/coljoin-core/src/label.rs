//! Column labels: a flat name or a tuple of per-level names.

use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Label {
    Flat(String),
    Tuple(Vec<String>),
}

impl Label {
    pub fn flat(name: impl Into<String>) -> Self {
        Label::Flat(name.into())
    }

    pub fn tuple<I, S>(levels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Label::Tuple(levels.into_iter().map(Into::into).collect())
    }

    /// Number of levels; a flat label has one.
    pub fn depth(&self) -> usize {
        match self {
            Label::Flat(_) => 1,
            Label::Tuple(levels) => levels.len(),
        }
    }

    pub fn is_tuple(&self) -> bool {
        matches!(self, Label::Tuple(_))
    }

    /// Levels as a slice view. A flat label is a single level.
    pub fn levels(&self) -> &[String] {
        match self {
            Label::Flat(name) => std::slice::from_ref(name),
            Label::Tuple(levels) => levels,
        }
    }

    /// Level-wise prefix test. `Flat("a")` is a prefix of `Tuple(["a", "b"])`.
    pub fn starts_with(&self, prefix: &Label) -> bool {
        let ours = self.levels();
        let theirs = prefix.levels();
        theirs.len() <= ours.len() && ours[..theirs.len()] == *theirs
    }

    /// Drop the first `n` levels. One remaining level collapses to `Flat`;
    /// returns `None` when nothing remains.
    pub fn strip_levels(&self, n: usize) -> Option<Label> {
        let rest = self.levels().get(n..)?;
        match rest {
            [] => None,
            [single] => Some(Label::Flat(single.clone())),
            many => Some(Label::Tuple(many.to_vec())),
        }
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Label::Flat(name) => f.write_str(name),
            Label::Tuple(levels) => write!(f, "({})", levels.join(", ")),
        }
    }
}

impl From<&str> for Label {
    fn from(s: &str) -> Self {
        Label::Flat(s.to_string())
    }
}

impl From<String> for Label {
    fn from(s: String) -> Self {
        Label::Flat(s)
    }
}

impl<const N: usize> From<[&str; N]> for Label {
    fn from(levels: [&str; N]) -> Self {
        Label::tuple(levels)
    }
}
