use std::cell::RefCell;
use std::collections::hash_map::DefaultHasher;
use std::fs;
use std::hash::{Hash, Hasher};
use std::path::{Path, PathBuf};
use std::time::UNIX_EPOCH;

use anyhow::{Context, Result};

use super::loader::{MENU_FILE, TEMPLATES_FILE, discover_wallet_files, load_snapshot};
use crate::models::{CustomizationTemplate, MenuItem, Transaction};

/// One consistent load of every record kind
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Snapshot {
    pub transactions: Vec<Transaction>,
    pub menu_items: Vec<MenuItem>,
    pub templates: Vec<CustomizationTemplate>,
}

/// Opaque change marker; a different value means the source has changed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Revision(pub u64);

/// Where list screens get their records from.
///
/// Screens receive a `DataSource` instead of reaching for global state, and poll
/// [`revision`](Self::revision) to learn when a reload is needed.
pub trait DataSource {
    fn load(&self) -> Result<Snapshot>;
    fn revision(&self) -> Result<Revision>;
    /// Human-readable location, for status lines
    fn describe(&self) -> String;
}

/// Data source backed by a data directory on disk
#[derive(Debug, Clone)]
pub struct FileDataSource {
    data_dir: PathBuf,
}

impl FileDataSource {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self { data_dir: data_dir.into() }
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    fn tracked_files(&self) -> Vec<PathBuf> {
        let mut files = discover_wallet_files(&self.data_dir);
        files.push(self.data_dir.join(MENU_FILE));
        files.push(self.data_dir.join(TEMPLATES_FILE));
        files
    }
}

impl DataSource for FileDataSource {
    fn load(&self) -> Result<Snapshot> {
        load_snapshot(&self.data_dir)
            .with_context(|| format!("Failed to load data from {}", self.data_dir.display()))
    }

    /// Hash of path, size, and mtime for every tracked file.
    /// Missing files contribute only their path, so creating one changes the revision.
    fn revision(&self) -> Result<Revision> {
        let mut hasher = DefaultHasher::new();
        for path in self.tracked_files() {
            path.hash(&mut hasher);
            let metadata = match fs::metadata(&path) {
                Ok(metadata) => metadata,
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => continue,
                Err(e) => {
                    return Err(e)
                        .with_context(|| format!("Failed to stat {}", path.display()));
                }
            };
            metadata.len().hash(&mut hasher);
            if let Ok(modified) = metadata.modified()
                && let Ok(since_epoch) = modified.duration_since(UNIX_EPOCH)
            {
                since_epoch.as_nanos().hash(&mut hasher);
            }
        }
        Ok(Revision(hasher.finish()))
    }

    fn describe(&self) -> String {
        crate::utils::format_path_with_tilde(&self.data_dir)
    }
}

/// In-memory data source for tests and embedding.
///
/// Every [`replace`](Self::replace) bumps the revision.
#[derive(Debug, Default)]
pub struct MemoryDataSource {
    snapshot: RefCell<Snapshot>,
    revision: RefCell<u64>,
}

impl MemoryDataSource {
    pub fn new(snapshot: Snapshot) -> Self {
        Self { snapshot: RefCell::new(snapshot), revision: RefCell::new(0) }
    }

    pub fn replace(&self, snapshot: Snapshot) {
        *self.snapshot.borrow_mut() = snapshot;
        *self.revision.borrow_mut() += 1;
    }
}

impl DataSource for MemoryDataSource {
    fn load(&self) -> Result<Snapshot> {
        Ok(self.snapshot.borrow().clone())
    }

    fn revision(&self) -> Result<Revision> {
        Ok(Revision(*self.revision.borrow()))
    }

    fn describe(&self) -> String {
        "in-memory".to_string()
    }
}
