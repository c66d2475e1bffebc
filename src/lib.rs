//! Delivery Desk - list logic for a food-delivery operator console
//!
//! Covers a driver's wallet (transactions) and a vendor's menu and customization
//! templates:
//!
//! - Filtering records by text, category, date range, amount range, and flags
//! - Stable sorting by per-screen keys in either direction
//! - ID-based selection that survives re-filtering, plus reorderable applied order
//! - Debounced search input with scoped cancellation
//! - Loading records from a data directory through the [`DataSource`] trait
//!
//! # Example
//!
//! ```no_run
//! use delivery_desk::{DataSource, FileDataSource, FilterCriteria, apply_filters};
//!
//! let source = FileDataSource::new("/srv/delivery-desk");
//! let snapshot = source.load()?;
//! let tips = apply_filters(snapshot.transactions, &FilterCriteria::new().with_category("tip"));
//! println!("{} tips", tips.len());
//! # Ok::<(), anyhow::Error>(())
//! ```

pub mod cli;
pub mod clipboard;
pub mod config;
pub mod filters;
pub mod logging;
pub mod models;
pub mod search;
pub mod selection;
pub mod sorting;
pub mod store;
pub mod tui;
pub mod utils;
pub mod views;

pub use filters::{FilterCriteria, apply_filters, parse_filter};
pub use models::{CustomizationTemplate, MenuItem, Transaction, TransactionType};
pub use search::{Debouncer, SearchDispatcher};
pub use selection::{AppliedOrder, SelectionSet};
pub use sorting::{SortDirection, SortState, sort_records};
pub use store::{DataSource, FileDataSource, MemoryDataSource, Snapshot};
pub use views::ListView;
