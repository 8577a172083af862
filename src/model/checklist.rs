use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// The completion map: checklist key → completed. An absent key means
/// not completed. Serializes as the plain JSON progress object, so the
/// persisted entry and the export file share this exact shape.
///
/// Every mutating call site outside the history manager must record a
/// history snapshot first; the map itself does not enforce that.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ChecklistState {
    entries: HashMap<String, bool>,
}

impl ChecklistState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether the given key is completed (absent = false)
    pub fn is_done(&self, key: &str) -> bool {
        self.entries.get(key).copied().unwrap_or(false)
    }

    /// Flip the completion flag for `key`; returns the new value
    pub fn toggle(&mut self, key: &str) -> bool {
        let next = !self.is_done(key);
        self.entries.insert(key.to_string(), next);
        next
    }

    /// Set every given key to `value`
    pub fn set_all<'a, I>(&mut self, keys: I, value: bool)
    where
        I: IntoIterator<Item = &'a str>,
    {
        for key in keys {
            self.entries.insert(key.to_string(), value);
        }
    }

    /// Wholesale replacement (import, undo, redo)
    pub fn replace(&mut self, new_state: ChecklistState) {
        self.entries = new_state.entries;
    }

    /// Empty the map
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Number of keys marked completed
    pub fn done_count(&self) -> usize {
        self.entries.values().filter(|v| **v).count()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, bool)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), *v))
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }
}

impl FromIterator<(String, bool)> for ChecklistState {
    fn from_iter<T: IntoIterator<Item = (String, bool)>>(iter: T) -> Self {
        ChecklistState {
            entries: iter.into_iter().collect(),
        }
    }
}
