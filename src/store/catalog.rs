//! Parsers for the vendor catalog files (`menu.json`, `templates.json`).
//!
//! Each file holds a JSON array. Entries are decoded one at a time so a single bad
//! entry is skipped instead of rejecting the whole catalog.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use anyhow::{Context, Result, bail};
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::models::{CustomizationTemplate, MenuItem};
use crate::utils::validate_file_size;

fn parse_array<T, F>(path: &Path, kind: &str, validate: F) -> Result<Vec<T>>
where
    T: DeserializeOwned,
    F: Fn(&T) -> Result<()>,
{
    let file = File::open(path)
        .with_context(|| format!("Failed to open {} file: {}", kind, path.display()))?;
    validate_file_size(&file, path)?;

    let values: Vec<Value> = serde_json::from_reader(BufReader::new(file))
        .with_context(|| format!("{} file must contain a JSON array: {}", kind, path.display()))?;

    let total = values.len();
    let mut records = Vec::with_capacity(total);
    let mut skipped = 0;

    for (index, value) in values.into_iter().enumerate() {
        let parsed = serde_json::from_value::<T>(value)
            .map_err(anyhow::Error::from)
            .and_then(|record| validate(&record).map(|_| record));

        match parsed {
            Ok(record) => records.push(record),
            Err(e) => {
                tracing::warn!(
                    file = %path.display(),
                    index,
                    error = %e,
                    "Skipping invalid {} entry",
                    kind
                );
                skipped += 1;
            }
        }
    }

    if total > 0 && (skipped as f64) / (total as f64) > 0.5 {
        bail!(
            "Too many invalid entries in {} file {}: {} of {} failed",
            kind,
            path.display(),
            skipped,
            total
        );
    }

    Ok(records)
}

pub fn parse_menu_file(path: &Path) -> Result<Vec<MenuItem>> {
    parse_array(path, "menu", |item: &MenuItem| {
        if item.id.trim().is_empty() {
            bail!("Menu item ID cannot be empty");
        }
        Ok(())
    })
}

pub fn parse_templates_file(path: &Path) -> Result<Vec<CustomizationTemplate>> {
    parse_array(path, "templates", CustomizationTemplate::validate)
}
