use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use anyhow::{Context, Result, bail};

use crate::models::Transaction;
use crate::utils::validate_file_size;

const MAX_CONSECUTIVE_ERRORS: usize = 100;

/// Parse a wallet JSONL file (one transaction per line).
///
/// Malformed lines and transactions that fail validation are logged and skipped.
/// Returns an error if more than 50% of lines fail or 100 fail in a row.
pub fn parse_transactions_file(path: &Path) -> Result<Vec<Transaction>> {
    // Open first, then check size on the handle to avoid a TOCTOU race
    let file = File::open(path)
        .with_context(|| format!("Failed to open wallet file: {}", path.display()))?;
    validate_file_size(&file, path)?;

    let reader = BufReader::new(file);
    let mut transactions = Vec::new();
    let mut skipped_count = 0;
    let mut total_lines = 0;
    let mut consecutive_errors = 0;

    for (line_num, line) in reader.lines().enumerate() {
        let line = line.context("Failed to read line from wallet file")?;

        if line.trim().is_empty() {
            continue;
        }

        total_lines += 1;

        let parsed = serde_json::from_str::<Transaction>(&line)
            .map_err(anyhow::Error::from)
            .and_then(|tx| tx.validate().map(|_| tx));

        match parsed {
            Ok(tx) => {
                transactions.push(tx);
                consecutive_errors = 0;
            }
            Err(e) => {
                tracing::warn!(
                    file = %path.display(),
                    line = line_num + 1,
                    error = %e,
                    "Skipping invalid transaction"
                );
                skipped_count += 1;
                consecutive_errors += 1;

                if consecutive_errors >= MAX_CONSECUTIVE_ERRORS {
                    bail!(
                        "Too many consecutive parse errors ({}) in {} - file may be corrupted",
                        consecutive_errors,
                        path.display()
                    );
                }
            }
        }
    }

    if total_lines > 0 {
        let failure_rate = (skipped_count as f64) / (total_lines as f64);
        if failure_rate > 0.5 {
            bail!(
                "Too many parse failures in {}: {} of {} lines failed ({:.1}%)",
                path.display(),
                skipped_count,
                total_lines,
                failure_rate * 100.0
            );
        }
    }

    if skipped_count > 0 {
        tracing::info!(
            file = %path.display(),
            parsed = transactions.len(),
            skipped = skipped_count,
            "Parsed wallet file with skipped lines"
        );
    }

    Ok(transactions)
}
