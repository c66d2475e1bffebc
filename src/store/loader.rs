//! Snapshot loading from a data directory.
//!
//! # Layout
//!
//! ```text
//! <data_dir>/
//!   wallet/**/*.jsonl   transactions, one JSON object per line
//!   menu.json           array of menu items
//!   templates.json      array of customization templates
//! ```
//!
//! # Error Handling Strategy
//!
//! - **Missing files**: logged as warnings; the corresponding list is empty
//! - **Bad lines/entries**: skipped by the parsers, which enforce their own thresholds
//! - **Wallet files**: failed files are logged; more than 50% failing is an error
//! - **Duplicate IDs**: later duplicates are dropped with a warning

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use anyhow::{Result, bail};
use walkdir::WalkDir;

use super::catalog::{parse_menu_file, parse_templates_file};
use super::jsonl::parse_transactions_file;
use super::source::Snapshot;
use crate::models::Identifiable;

pub const WALLET_DIR: &str = "wallet";
pub const MENU_FILE: &str = "menu.json";
pub const TEMPLATES_FILE: &str = "templates.json";

/// Find wallet JSONL files under `data_dir/wallet`, sorted by path
pub fn discover_wallet_files(data_dir: &Path) -> Vec<PathBuf> {
    let wallet_dir = data_dir.join(WALLET_DIR);
    if !wallet_dir.is_dir() {
        return Vec::new();
    }

    let mut files: Vec<PathBuf> = WalkDir::new(&wallet_dir)
        .follow_links(false)
        .into_iter()
        .filter_map(|entry| match entry {
            Ok(entry) => Some(entry),
            Err(e) => {
                tracing::warn!(error = %e, "Failed to read wallet directory entry");
                None
            }
        })
        .filter(|entry| entry.file_type().is_file())
        .map(|entry| entry.into_path())
        .filter(|path| path.extension().is_some_and(|ext| ext == "jsonl"))
        .collect();

    files.sort();
    files
}

/// Keep the first record for each ID
fn dedupe_by_id<T: Identifiable>(records: Vec<T>, kind: &str) -> Vec<T> {
    let mut seen = HashSet::new();
    records
        .into_iter()
        .filter(|record| {
            let fresh = seen.insert(record.id().to_string());
            if !fresh {
                tracing::warn!(id = record.id(), "Dropping duplicate {} ID", kind);
            }
            fresh
        })
        .collect()
}

/// Load every record in `data_dir`.
///
/// Transactions are returned newest first; menu items and templates keep file order.
///
/// # Errors
///
/// Returns an error if more than half of the wallet files fail to parse, or if a
/// catalog file exists but cannot be parsed.
pub fn load_snapshot(data_dir: &Path) -> Result<Snapshot> {
    let mut transactions = Vec::new();
    let mut files_ok = 0;
    let mut files_failed = 0;

    let wallet_files = discover_wallet_files(data_dir);
    if wallet_files.is_empty() {
        tracing::warn!(dir = %data_dir.join(WALLET_DIR).display(), "No wallet files found");
    }

    for path in &wallet_files {
        match parse_transactions_file(path) {
            Ok(parsed) => {
                files_ok += 1;
                transactions.extend(parsed);
            }
            Err(e) => {
                files_failed += 1;
                tracing::warn!(file = %path.display(), error = %e, "Failed to parse wallet file");
            }
        }
    }

    let total_files = files_ok + files_failed;
    if total_files > 0 {
        let failure_rate = files_failed as f64 / total_files as f64;
        if failure_rate > 0.5 {
            bail!(
                "Loading failed: {}/{} wallet files failed to parse ({}% failure rate)",
                files_failed,
                total_files,
                (failure_rate * 100.0) as u32
            );
        }
    }

    let menu_path = data_dir.join(MENU_FILE);
    let menu_items = if menu_path.exists() {
        parse_menu_file(&menu_path)?
    } else {
        tracing::warn!(path = %menu_path.display(), "Menu file not found");
        Vec::new()
    };

    let templates_path = data_dir.join(TEMPLATES_FILE);
    let templates = if templates_path.exists() {
        parse_templates_file(&templates_path)?
    } else {
        tracing::warn!(path = %templates_path.display(), "Templates file not found");
        Vec::new()
    };

    let mut transactions = dedupe_by_id(transactions, "transaction");
    // Newest first; stable so same-instant entries keep file order
    transactions.sort_by(|a, b| b.created_at.cmp(&a.created_at));

    let snapshot = Snapshot {
        transactions,
        menu_items: dedupe_by_id(menu_items, "menu item"),
        templates: dedupe_by_id(templates, "template"),
    };

    tracing::info!(
        transactions = snapshot.transactions.len(),
        menu_items = snapshot.menu_items.len(),
        templates = snapshot.templates.len(),
        wallet_files_ok = files_ok,
        wallet_files_failed = files_failed,
        "Loaded snapshot"
    );

    Ok(snapshot)
}
