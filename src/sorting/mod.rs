//! Sorting for list screens.
//!
//! Sorting never mutates its input and is stable in both directions, so repeated
//! sorts of the same data never reorder records with equal keys.

pub mod keys;
pub mod sort;

pub use keys::{MenuItemSortKey, SortKey, TemplateSortKey, TransactionSortKey};
pub use sort::{SortDirection, SortState, Sortable, sort_records};
