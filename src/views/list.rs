use crate::filters::{FilterCriteria, Filterable, apply_filters};
use crate::models::Identifiable;
use crate::selection::SelectionSet;
use crate::sorting::{SortState, Sortable};

/// Notification sent to subscribers after a view mutation
#[derive(Debug, Clone, PartialEq)]
pub enum ViewChange<K> {
    Criteria(FilterCriteria),
    Sort(SortState<K>),
    /// Selected IDs after the change, in selection order
    Selection(Vec<String>),
}

type Listener<K> = Box<dyn FnMut(&ViewChange<K>)>;

/// One list screen's session state.
///
/// Holds the full record list and derives the visible rows from it by filtering
/// then sorting. The selection is keyed by record ID against the full list, so
/// selected records stay selected while hidden by a filter.
pub struct ListView<T: Sortable> {
    records: Vec<T>,
    criteria: FilterCriteria,
    sort: SortState<T::Key>,
    selection: SelectionSet,
    visible: Vec<T>,
    listeners: Vec<Listener<T::Key>>,
}

impl<T> ListView<T>
where
    T: Filterable + Sortable + Identifiable + Clone,
{
    pub fn new(records: Vec<T>, sort: SortState<T::Key>) -> Self {
        let mut view = Self {
            records,
            criteria: FilterCriteria::default(),
            sort,
            selection: SelectionSet::new(),
            visible: Vec::new(),
            listeners: Vec::new(),
        };
        view.refresh_visible();
        view
    }

    /// Register a listener for every later change
    pub fn subscribe(&mut self, listener: impl FnMut(&ViewChange<T::Key>) + 'static) {
        self.listeners.push(Box::new(listener));
    }

    pub fn records(&self) -> &[T] {
        &self.records
    }

    /// Rows after filtering and sorting
    pub fn visible(&self) -> &[T] {
        &self.visible
    }

    pub fn criteria(&self) -> &FilterCriteria {
        &self.criteria
    }

    pub fn sort(&self) -> SortState<T::Key> {
        self.sort
    }

    pub fn selection(&self) -> &SelectionSet {
        &self.selection
    }

    pub fn selected_ids(&self) -> &[String] {
        self.selection.ids()
    }

    pub fn is_selected(&self, id: &str) -> bool {
        self.selection.contains(id)
    }

    /// Replace the underlying records, dropping selections whose record is gone.
    /// Returns how many selections were pruned.
    pub fn set_records(&mut self, records: Vec<T>) -> usize {
        self.records = records;
        let pruned = self.selection.prune(self.records.iter().map(Identifiable::id));
        if pruned > 0 {
            tracing::debug!(pruned, "Pruned selections for removed records");
        }
        self.refresh_visible();
        if pruned > 0 {
            self.notify(ViewChange::Selection(self.selection.ids().to_vec()));
        }
        pruned
    }

    pub fn set_criteria(&mut self, criteria: FilterCriteria) {
        self.criteria = criteria;
        self.refresh_visible();
        self.notify(ViewChange::Criteria(self.criteria.clone()));
    }

    /// Replace only the text query, keeping other criteria
    pub fn set_query(&mut self, query: &str) {
        let mut criteria = self.criteria.clone();
        criteria.query = if query.trim().is_empty() { None } else { Some(query.to_string()) };
        self.set_criteria(criteria);
    }

    /// Same key flips direction; a new key sorts descending
    pub fn select_sort_key(&mut self, key: T::Key) {
        self.sort.select(key);
        self.refresh_visible();
        self.notify(ViewChange::Sort(self.sort));
    }

    pub fn flip_direction(&mut self) {
        self.sort.direction = self.sort.direction.flip();
        self.refresh_visible();
        self.notify(ViewChange::Sort(self.sort));
    }

    /// Toggle one record's selection. Returns whether it is now selected.
    pub fn toggle(&mut self, id: &str) -> bool {
        let selected = self.selection.toggle(id);
        self.notify(ViewChange::Selection(self.selection.ids().to_vec()));
        selected
    }

    /// Add every visible row to the selection. Returns how many were added.
    pub fn select_all_visible(&mut self) -> usize {
        let added = self.selection.select_all(self.visible.iter().map(Identifiable::id));
        self.notify(ViewChange::Selection(self.selection.ids().to_vec()));
        added
    }

    pub fn clear_selection(&mut self) {
        self.selection.clear();
        self.notify(ViewChange::Selection(Vec::new()));
    }

    fn refresh_visible(&mut self) {
        let filtered = apply_filters(self.records.clone(), &self.criteria);
        self.visible = self.sort.apply(&filtered);
    }

    fn notify(&mut self, change: ViewChange<T::Key>) {
        for listener in &mut self.listeners {
            listener(&change);
        }
    }
}
