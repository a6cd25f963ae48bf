//! Checked rows of the rendered page.

use std::collections::BTreeSet;

/// Indices of checked rows, relative to the rows currently on screen.
///
/// The store knows nothing about pages; whoever owns the rows resets it when
/// they change.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionStore {
    checked: BTreeSet<usize>,
}

impl SelectionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn toggle(&mut self, index: usize) {
        if !self.checked.remove(&index) {
            self.checked.insert(index);
        }
    }

    /// Header checkbox: check every row of the page unless all already are,
    /// in which case clear.
    pub fn toggle_all(&mut self, page_len: usize) {
        if self.checked.len() < page_len {
            self.checked = (0..page_len).collect();
        } else {
            self.checked.clear();
        }
    }

    pub fn reset(&mut self) {
        self.checked.clear();
    }

    pub fn is_checked(&self, index: usize) -> bool {
        self.checked.contains(&index)
    }

    /// Whether the header checkbox shows as checked.
    pub fn all_checked(&self, page_len: usize) -> bool {
        page_len > 0 && (0..page_len).all(|i| self.checked.contains(&i))
    }

    pub fn len(&self) -> usize {
        self.checked.len()
    }

    pub fn is_empty(&self) -> bool {
        self.checked.is_empty()
    }

    /// Checked indices in ascending order.
    pub fn indices(&self) -> impl Iterator<Item = usize> + '_ {
        self.checked.iter().copied()
    }

    /// Rows behind the checked indices. Indices past the end are skipped.
    pub fn selected<'r, R>(&self, rows: &'r [R]) -> Vec<&'r R> {
        self.checked.iter().filter_map(|&i| rows.get(i)).collect()
    }
}
