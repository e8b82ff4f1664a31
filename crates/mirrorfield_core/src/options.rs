//! Editor options and key-level diffing
//!
//! Options are an ordered map of string keys to arbitrary JSON values. The
//! control never interprets them; it only works out which keys changed
//! between two snapshots so that just those keys are pushed to the widget.

use indexmap::IndexMap;

/// An opaque option value
pub type OptionValue = serde_json::Value;

/// An options snapshot
pub type EditorOptions = IndexMap<String, OptionValue>;

/// One key that differs between two snapshots
#[derive(Clone, Debug, PartialEq)]
pub struct OptionRecord {
    pub key: String,
    /// Value in the older snapshot, `None` if the key was added
    pub previous: Option<OptionValue>,
    /// Value in the newer snapshot, `None` if the key was removed
    pub current: Option<OptionValue>,
}

impl OptionRecord {
    /// The value to hand to the widget: the current value, or `null` for a
    /// removed key
    pub fn value_to_apply(&self) -> OptionValue {
        self.current.clone().unwrap_or(OptionValue::Null)
    }
}

/// The three disjoint key sets between two snapshots
#[derive(Clone, Debug, Default, PartialEq)]
pub struct OptionsDiff {
    /// Present in both, value differs
    pub changed: Vec<OptionRecord>,
    /// Only in the newer snapshot
    pub added: Vec<OptionRecord>,
    /// Only in the older snapshot
    pub removed: Vec<OptionRecord>,
}

impl OptionsDiff {
    pub fn is_empty(&self) -> bool {
        self.changed.is_empty() && self.added.is_empty() && self.removed.is_empty()
    }

    /// Total number of differing keys
    pub fn len(&self) -> usize {
        self.changed.len() + self.added.len() + self.removed.len()
    }

    /// Every differing key, changed first, then added, then removed
    pub fn records(&self) -> impl Iterator<Item = &OptionRecord> {
        self.changed
            .iter()
            .chain(self.added.iter())
            .chain(self.removed.iter())
    }
}

/// Compare two snapshots key by key
///
/// Values are compared structurally. Runs in O(|prev| + |next|).
pub fn diff_options(prev: &EditorOptions, next: &EditorOptions) -> OptionsDiff {
    let mut diff = OptionsDiff::default();

    for (key, value) in next {
        match prev.get(key) {
            Some(old) if old == value => {}
            Some(old) => diff.changed.push(OptionRecord {
                key: key.clone(),
                previous: Some(old.clone()),
                current: Some(value.clone()),
            }),
            None => diff.added.push(OptionRecord {
                key: key.clone(),
                previous: None,
                current: Some(value.clone()),
            }),
        }
    }

    for (key, old) in prev {
        if !next.contains_key(key) {
            diff.removed.push(OptionRecord {
                key: key.clone(),
                previous: Some(old.clone()),
                current: None,
            });
        }
    }

    diff
}

/// Stateful differ remembering the last snapshot it saw
///
/// The first call to [`diff`](OptionsDiffer::diff) compares against an
/// empty snapshot, so every key is reported as added.
#[derive(Clone, Debug, Default)]
pub struct OptionsDiffer {
    last: EditorOptions,
}

impl OptionsDiffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Diff `next` against the last snapshot and remember `next`
    ///
    /// `None` counts as an empty snapshot. Returns `None` when nothing
    /// changed.
    pub fn diff(&mut self, next: Option<&EditorOptions>) -> Option<OptionsDiff> {
        let empty = EditorOptions::new();
        let next = next.unwrap_or(&empty);
        let diff = diff_options(&self.last, next);
        if diff.is_empty() {
            return None;
        }
        self.last = next.clone();
        Some(diff)
    }

    /// The snapshot the next diff will compare against
    pub fn snapshot(&self) -> &EditorOptions {
        &self.last
    }
}
