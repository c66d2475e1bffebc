//! Per-screen list state: the loaded records plus the criteria, sort, and
//! selection the user has applied to them.

pub mod list;

pub use list::{ListView, ViewChange};
