//! Debounced search input.
//!
//! Text changes are held back until typing pauses, so a query runs once per burst
//! of keystrokes instead of once per key. There are no timer threads: the pending
//! fire is a deadline that the owner's event loop checks on every tick.

pub mod debounce;
pub mod dispatcher;

pub use debounce::{DEFAULT_DEBOUNCE, DebounceState, Debouncer};
pub use dispatcher::{SearchDispatcher, SearchEvent};
