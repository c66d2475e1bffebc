use anyhow::{Result, bail};

use super::set::SelectionSet;

/// Explicitly ordered list of selected IDs that the user can reorder.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AppliedOrder {
    ids: Vec<String>,
}

impl AppliedOrder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_ids<I, S>(ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut order = Self::new();
        for id in ids {
            order.push(id);
        }
        order
    }

    /// Append `id` unless it is already present
    pub fn push(&mut self, id: impl Into<String>) -> bool {
        let id = id.into();
        if self.ids.contains(&id) {
            return false;
        }
        self.ids.push(id);
        true
    }

    pub fn remove(&mut self, id: &str) -> bool {
        let before = self.ids.len();
        self.ids.retain(|existing| existing != id);
        before != self.ids.len()
    }

    pub fn position(&self, id: &str) -> Option<usize> {
        self.ids.iter().position(|existing| existing == id)
    }

    pub fn ids(&self) -> &[String] {
        &self.ids
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Move the item at `old_index` to the drop slot `new_index`.
    ///
    /// `new_index` is a slot in the list *before* removal (0..=len), as reported by
    /// drag-and-drop. When moving downward the removal shifts later slots up by one,
    /// so `new_index` is decremented before inserting. Out-of-range slots are clamped.
    pub fn reorder(&mut self, old_index: usize, new_index: usize) -> Result<()> {
        if old_index >= self.ids.len() {
            bail!("Reorder index {} out of range (len {})", old_index, self.ids.len());
        }

        let mut target = new_index.min(self.ids.len());
        if target > old_index {
            target -= 1;
        }

        let item = self.ids.remove(old_index);
        self.ids.insert(target, item);
        Ok(())
    }

    /// Move `id` one position earlier. Returns false when already first or absent.
    pub fn move_up(&mut self, id: &str) -> bool {
        match self.position(id) {
            Some(pos) if pos > 0 => {
                self.ids.swap(pos, pos - 1);
                true
            }
            _ => false,
        }
    }

    /// Move `id` one position later. Returns false when already last or absent.
    pub fn move_down(&mut self, id: &str) -> bool {
        match self.position(id) {
            Some(pos) if pos + 1 < self.ids.len() => {
                self.ids.swap(pos, pos + 1);
                true
            }
            _ => false,
        }
    }

    /// Bring the order in line with `selection`: drop deselected IDs and append newly
    /// selected ones in selection order. Existing relative order is kept.
    pub fn sync_with(&mut self, selection: &SelectionSet) {
        self.sync_with_ids(selection.ids());
    }

    /// [`sync_with`](Self::sync_with) for a plain list of selected IDs
    pub fn sync_with_ids(&mut self, selected: &[String]) {
        self.ids.retain(|id| selected.contains(id));
        for id in selected {
            if !self.ids.contains(id) {
                self.ids.push(id.clone());
            }
        }
    }
}
