use std::cmp::Ordering;
use std::fmt;

/// Records that can be ordered by a screen-specific key
pub trait Sortable {
    type Key: Copy + Eq + fmt::Debug;

    /// Natural ascending ordering of `self` relative to `other` for `key`
    fn compare_by(&self, other: &Self, key: Self::Key) -> Ordering;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDirection {
    Ascending,
    #[default]
    Descending,
}

impl SortDirection {
    pub fn flip(self) -> Self {
        match self {
            SortDirection::Ascending => SortDirection::Descending,
            SortDirection::Descending => SortDirection::Ascending,
        }
    }

    pub fn from_ascending(ascending: bool) -> Self {
        if ascending { SortDirection::Ascending } else { SortDirection::Descending }
    }

    pub fn arrow(self) -> &'static str {
        match self {
            SortDirection::Ascending => "↑",
            SortDirection::Descending => "↓",
        }
    }
}

/// Return a new list ordered by `key`.
///
/// Uses a stable sort; for descending order only the comparator result is
/// reversed, so records with equal keys keep their input order either way.
pub fn sort_records<T>(records: &[T], key: T::Key, direction: SortDirection) -> Vec<T>
where
    T: Sortable + Clone,
{
    let mut sorted = records.to_vec();
    sorted.sort_by(|a, b| {
        let ordering = a.compare_by(b, key);
        match direction {
            SortDirection::Ascending => ordering,
            SortDirection::Descending => ordering.reverse(),
        }
    });
    sorted
}

/// Current sort selection for one screen.
///
/// Selecting the active key again flips the direction; selecting a different key
/// switches to it in descending order (most relevant first).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortState<K> {
    pub key: K,
    pub direction: SortDirection,
}

impl<K: Copy + Eq> SortState<K> {
    pub fn new(key: K) -> Self {
        Self { key, direction: SortDirection::Descending }
    }

    pub fn with_direction(key: K, direction: SortDirection) -> Self {
        Self { key, direction }
    }

    pub fn select(&mut self, key: K) {
        if self.key == key {
            self.direction = self.direction.flip();
        } else {
            self.key = key;
            self.direction = SortDirection::Descending;
        }
    }

    pub fn apply<T>(&self, records: &[T]) -> Vec<T>
    where
        T: Sortable<Key = K> + Clone,
    {
        sort_records(records, self.key, self.direction)
    }
}
