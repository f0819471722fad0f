//! Set of selected option indices used for bulk removal.

use std::collections::BTreeSet;

/// Indices of options picked in selection mode.
///
/// Kept as plain positions into the wheel; any mutation of the option list
/// invalidates them, so the session clears the selection on every removal,
/// clear, or load.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    indices: BTreeSet<usize>,
}

impl Selection {
    /// Create an empty selection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Flip membership of `index`. Returns whether it is selected afterwards.
    pub fn toggle(&mut self, index: usize) -> bool {
        if self.indices.remove(&index) {
            false
        } else {
            self.indices.insert(index);
            true
        }
    }

    /// Whether `index` is selected.
    pub fn contains(&self, index: usize) -> bool {
        self.indices.contains(&index)
    }

    /// Select every index in `0..count`, replacing the previous selection.
    pub fn select_all(&mut self, count: usize) {
        self.indices = (0..count).collect();
    }

    /// Add several indices at once.
    pub fn extend(&mut self, indices: impl IntoIterator<Item = usize>) {
        self.indices.extend(indices);
    }

    /// Deselect everything.
    pub fn clear(&mut self) {
        self.indices.clear();
    }

    /// Number of selected indices.
    pub fn len(&self) -> usize {
        self.indices.len()
    }

    /// Whether nothing is selected.
    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    /// Selected indices, highest first. Removing in this order keeps the
    /// remaining indices valid.
    pub fn descending(&self) -> impl Iterator<Item = usize> + '_ {
        self.indices.iter().rev().copied()
    }

    /// Selected indices, lowest first.
    pub fn iter(&self) -> impl Iterator<Item = usize> + '_ {
        self.indices.iter().copied()
    }
}
