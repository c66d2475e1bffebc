//! Record loading for list screens.
//!
//! [`DataSource`] is the seam between screens and wherever records come from.
//! [`FileDataSource`] reads a data directory using the parsers in this module;
//! [`MemoryDataSource`] serves fixed snapshots.

pub mod catalog;
pub mod deserializers;
pub mod jsonl;
pub mod loader;
pub mod source;

pub use catalog::{parse_menu_file, parse_templates_file};
pub use jsonl::parse_transactions_file;
pub use loader::load_snapshot;
pub use source::{DataSource, FileDataSource, MemoryDataSource, Revision, Snapshot};
