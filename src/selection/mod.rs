//! Bulk-selection state for list screens.
//!
//! [`SelectionSet`] tracks which record IDs are checked. [`AppliedOrder`] keeps an
//! explicit, user-reorderable sequence for selections where order matters (for
//! example, the order templates are applied to a menu item).

pub mod order;
pub mod set;

pub use order::AppliedOrder;
pub use set::SelectionSet;
