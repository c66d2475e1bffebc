use std::collections::HashSet;

/// Ordered set of selected record IDs.
///
/// IDs are kept in the order they were selected. Mutation only happens through
/// [`toggle`](Self::toggle), [`select_all`](Self::select_all), [`clear`](Self::clear),
/// and [`prune`](Self::prune).
#[derive(Debug, Clone, Default)]
pub struct SelectionSet {
    order: Vec<String>,
    members: HashSet<String>,
}

impl SelectionSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `id` if absent, remove it if present. Returns whether it is now selected.
    pub fn toggle(&mut self, id: &str) -> bool {
        if self.members.remove(id) {
            self.order.retain(|existing| existing != id);
            false
        } else {
            self.members.insert(id.to_string());
            self.order.push(id.to_string());
            true
        }
    }

    /// Add every candidate not already selected; never removes anything.
    ///
    /// Selections made under a previous filter survive, so callers can narrow
    /// the view, select all, and widen it again without losing work.
    /// Returns the number of newly selected IDs.
    pub fn select_all<I, S>(&mut self, candidate_ids: I) -> usize
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut added = 0;
        for id in candidate_ids {
            let id = id.as_ref();
            if self.members.insert(id.to_string()) {
                self.order.push(id.to_string());
                added += 1;
            }
        }
        added
    }

    pub fn clear(&mut self) {
        self.order.clear();
        self.members.clear();
    }

    pub fn contains(&self, id: &str) -> bool {
        self.members.contains(id)
    }

    pub fn count(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Selected IDs in selection order
    pub fn ids(&self) -> &[String] {
        &self.order
    }

    /// Drop IDs that are no longer in the candidate list. Returns how many were removed.
    pub fn prune<'a, I>(&mut self, valid_ids: I) -> usize
    where
        I: IntoIterator<Item = &'a str>,
    {
        let valid: HashSet<&str> = valid_ids.into_iter().collect();
        let before = self.order.len();
        self.order.retain(|id| valid.contains(id.as_str()));
        self.members.retain(|id| valid.contains(id.as_str()));
        before - self.order.len()
    }
}

/// Two selections are equal when they hold the same IDs; selection order is not compared
impl PartialEq for SelectionSet {
    fn eq(&self, other: &Self) -> bool {
        self.members == other.members
    }
}

impl Eq for SelectionSet {}
