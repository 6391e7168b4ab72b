//! Row Selection
//!
//! Selection modes, row keys and selection-set bookkeeping.

use std::collections::HashSet;
use std::fmt;

use serde::{Deserialize, Serialize};

/// How rows can be selected
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SelectionMode {
    #[default]
    None,
    Single,
    Multiple,
}

impl SelectionMode {
    pub fn is_enabled(&self) -> bool {
        !matches!(self, Self::None)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Single => "single",
            Self::Multiple => "multiple",
        }
    }
}

impl From<bool> for SelectionMode {
    fn from(selectable: bool) -> Self {
        if selectable { Self::Multiple } else { Self::None }
    }
}

/// Opaque row identifier
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum RowKey {
    Index(usize),
    Named(String),
}

impl fmt::Display for RowKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Index(i) => write!(f, "#{}", i),
            Self::Named(name) => f.write_str(name),
        }
    }
}

impl From<usize> for RowKey {
    fn from(index: usize) -> Self {
        Self::Index(index)
    }
}

impl From<&str> for RowKey {
    fn from(name: &str) -> Self {
        Self::Named(name.to_string())
    }
}

impl From<String> for RowKey {
    fn from(name: String) -> Self {
        Self::Named(name)
    }
}

/// Caller-supplied row identity
pub type RowKeyFn<R> = Box<dyn Fn(&R, usize) -> RowKey>;

/// Key of `row` at `position` in the derived ordering
pub fn resolve_key<R>(key_fn: Option<&RowKeyFn<R>>, row: &R, position: usize) -> RowKey {
    match key_fn {
        Some(key_fn) => key_fn(row, position),
        None => RowKey::Index(position),
    }
}

/// Set of selected row keys
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionSet {
    keys: HashSet<RowKey>,
}

impl SelectionSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    pub fn contains(&self, key: &RowKey) -> bool {
        self.keys.contains(key)
    }

    /// Apply a row toggle under `mode`. Returns false when nothing changed.
    pub fn toggle(&mut self, mode: SelectionMode, key: RowKey) -> bool {
        match mode {
            SelectionMode::None => false,
            SelectionMode::Single => {
                self.keys.clear();
                self.keys.insert(key);
                true
            }
            SelectionMode::Multiple => {
                if !self.keys.remove(&key) {
                    self.keys.insert(key);
                }
                true
            }
        }
    }

    pub fn replace<I: IntoIterator<Item = RowKey>>(&mut self, keys: I) {
        self.keys = keys.into_iter().collect();
    }

    pub fn clear(&mut self) {
        self.keys.clear();
    }
}

impl FromIterator<RowKey> for SelectionSet {
    fn from_iter<I: IntoIterator<Item = RowKey>>(iter: I) -> Self {
        Self {
            keys: iter.into_iter().collect(),
        }
    }
}

/// Selected records in display order.
///
/// `ordered` is the derived ordering; keys are resolved against positions in
/// it, so the result follows display order rather than click order.
pub fn derive_selected_records<'a, R>(
    ordered: &[&'a R],
    selection: &SelectionSet,
    key_fn: Option<&RowKeyFn<R>>,
) -> Vec<&'a R> {
    if selection.is_empty() {
        return Vec::new();
    }
    ordered
        .iter()
        .enumerate()
        .filter(|(i, row)| selection.contains(&resolve_key(key_fn, **row, *i)))
        .map(|(_, row)| *row)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_mode_never_exceeds_one() {
        let mut set = SelectionSet::new();
        for key in [3usize, 1, 1, 4, 0, 2] {
            set.toggle(SelectionMode::Single, RowKey::Index(key));
            assert!(set.len() <= 1);
        }
        assert!(set.contains(&RowKey::Index(2)));
    }

    #[test]
    fn test_multiple_mode_double_toggle_restores() {
        let mut set: SelectionSet = [RowKey::Index(0), RowKey::Index(2)].into_iter().collect();

        for key in 0..4usize {
            let before = set.contains(&RowKey::Index(key));
            set.toggle(SelectionMode::Multiple, RowKey::Index(key));
            set.toggle(SelectionMode::Multiple, RowKey::Index(key));
            assert_eq!(set.contains(&RowKey::Index(key)), before);
        }
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn test_disabled_mode_ignores_toggle() {
        let mut set = SelectionSet::new();
        assert!(!set.toggle(SelectionMode::None, RowKey::Index(0)));
        assert!(set.is_empty());
    }

    #[test]
    fn test_selected_records_follow_display_order() {
        let rows = ["c", "a", "b"];
        let ordered: Vec<&&str> = rows.iter().collect();
        let key_fn: RowKeyFn<&str> = Box::new(|row, _| RowKey::from(*row));

        let mut set = SelectionSet::new();
        set.toggle(SelectionMode::Multiple, RowKey::from("b"));
        set.toggle(SelectionMode::Multiple, RowKey::from("c"));

        let selected = derive_selected_records(&ordered, &set, Some(&key_fn));
        assert_eq!(selected, vec![&"c", &"b"]);
    }

    #[test]
    fn test_from_bool() {
        assert_eq!(SelectionMode::from(true), SelectionMode::Multiple);
        assert_eq!(SelectionMode::from(false), SelectionMode::None);
    }
}
