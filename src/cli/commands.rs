use std::io::{self, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use crate::config::Settings;
use crate::filters::{FilterCriteria, Filterable, apply_filters, parse_filter};
use crate::logging::{self, LogTarget};
use crate::models::{
    CustomizationTemplate, MenuItem, MenuSummary, SelectionMode, TemplateSummary, Transaction,
    WalletSummary,
};
use crate::sorting::{
    MenuItemSortKey, SortDirection, SortState, Sortable, TemplateSortKey, TransactionSortKey,
};
use crate::store::{DataSource, FileDataSource, Snapshot};
use crate::tui;
use crate::utils::{
    format_money, format_path_with_tilde, format_price, resolve_data_dir, sanitize_cell,
};

const NAME_WIDTH: usize = 28;
const DESCRIPTION_WIDTH: usize = 40;

#[derive(Parser)]
#[command(name = "delivery-desk")]
#[command(version)]
#[command(about = "Browse a driver wallet and a vendor menu from the terminal", long_about = None)]
pub struct Cli {
    /// Data directory [default: $DELIVERY_DESK_DATA, config file, ~/.delivery-desk]
    #[arg(long, global = true, value_name = "DIR")]
    pub data_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Show wallet, menu, and template summaries
    Stats,
    /// List wallet transactions
    Transactions {
        /// Filter expression, e.g. "type:tip since:2024-03-01 min:5 lunch"
        #[arg(short, long)]
        filter: Option<String>,
        #[arg(short, long, value_enum, default_value_t = TransactionSortKey::Date)]
        sort: TransactionSortKey,
        /// Sort ascending instead of descending
        #[arg(long)]
        asc: bool,
        /// Show at most this many rows
        #[arg(short = 'n', long)]
        limit: Option<usize>,
    },
    /// List menu items
    Menu {
        /// Filter expression, e.g. "category:Noodles is:available max:15"
        #[arg(short, long)]
        filter: Option<String>,
        #[arg(short, long, value_enum, default_value_t = MenuItemSortKey::OrderCount)]
        sort: MenuItemSortKey,
        #[arg(long)]
        asc: bool,
        #[arg(short = 'n', long)]
        limit: Option<usize>,
    },
    /// List customization templates
    Templates {
        /// Filter expression, e.g. "is:required size"
        #[arg(short, long)]
        filter: Option<String>,
        #[arg(short, long, value_enum, default_value_t = TemplateSortKey::UsageCount)]
        sort: TemplateSortKey,
        #[arg(long)]
        asc: bool,
        #[arg(short = 'n', long)]
        limit: Option<usize>,
    },
    /// Open the interactive browser
    Browse,
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();

    let Some(command) = cli.command else {
        println!("Use --help for usage information");
        return Ok(());
    };

    let target = match command {
        Commands::Browse => LogTarget::default_file()?,
        _ => LogTarget::Stderr,
    };
    if let Err(e) = logging::init(target) {
        eprintln!("Warning: logging disabled: {e:#}");
    }

    let settings = Settings::load()?;
    let data_dir = resolve_data_dir(cli.data_dir.as_deref(), settings.data_dir.as_deref())?;
    let source = FileDataSource::new(&data_dir);

    if let Commands::Browse = command {
        return tui::run_interactive(&source, &settings);
    }

    let snapshot = source.load()?;
    let mut out = io::stdout().lock();

    match command {
        Commands::Stats => write_stats(&mut out, &snapshot, &settings, &data_dir)?,
        Commands::Transactions { filter, sort, asc, limit } => {
            let state = SortState::with_direction(sort, SortDirection::from_ascending(asc));
            let rows = list_records(snapshot.transactions, filter.as_deref(), state, limit)?;
            write_transactions(&mut out, &rows)?;
        }
        Commands::Menu { filter, sort, asc, limit } => {
            let state = SortState::with_direction(sort, SortDirection::from_ascending(asc));
            let rows = list_records(snapshot.menu_items, filter.as_deref(), state, limit)?;
            write_menu(&mut out, &rows)?;
        }
        Commands::Templates { filter, sort, asc, limit } => {
            let state = SortState::with_direction(sort, SortDirection::from_ascending(asc));
            let rows = list_records(snapshot.templates, filter.as_deref(), state, limit)?;
            write_templates(&mut out, &rows)?;
        }
        Commands::Browse => {}
    }

    Ok(())
}

/// Filter, sort, then truncate
fn list_records<T>(
    records: Vec<T>,
    filter: Option<&str>,
    sort: SortState<T::Key>,
    limit: Option<usize>,
) -> Result<Vec<T>>
where
    T: Filterable + Sortable + Clone,
{
    let criteria = match filter {
        Some(expr) => parse_filter(expr).with_context(|| format!("Invalid filter: {expr}"))?,
        None => FilterCriteria::default(),
    };

    let filtered = apply_filters(records, &criteria);
    let mut rows = sort.apply(&filtered);
    if let Some(limit) = limit {
        rows.truncate(limit);
    }
    Ok(rows)
}

fn write_empty(out: &mut impl Write) -> Result<()> {
    writeln!(out, "No matching records")?;
    Ok(())
}

fn write_transactions(out: &mut impl Write, rows: &[Transaction]) -> Result<()> {
    if rows.is_empty() {
        return write_empty(out);
    }

    for tx in rows {
        writeln!(
            out,
            "{}  {:<8}  {:>14}  {}  {}",
            tx.created_at.format("%Y-%m-%d %H:%M"),
            tx.tx_type,
            format_money(tx.amount, &tx.currency),
            sanitize_cell(&tx.id, NAME_WIDTH),
            sanitize_cell(tx.description.as_deref().unwrap_or(""), DESCRIPTION_WIDTH),
        )?;
    }
    writeln!(out, "\n{} transaction(s)", rows.len())?;
    Ok(())
}

fn write_menu(out: &mut impl Write, rows: &[MenuItem]) -> Result<()> {
    if rows.is_empty() {
        return write_empty(out);
    }

    for item in rows {
        let score = item.performance_score.map(|s| format!("{s:.1}")).unwrap_or_else(|| "-".into());
        writeln!(
            out,
            "{:<name$}  {:<16}  {:>8}  {:>6} orders  score {:>5}  {}",
            sanitize_cell(&item.name, NAME_WIDTH),
            sanitize_cell(&item.category, 16),
            format_price(item.base_price),
            item.order_count,
            score,
            if item.is_available { "available" } else { "unavailable" },
            name = NAME_WIDTH,
        )?;
    }
    writeln!(out, "\n{} item(s)", rows.len())?;
    Ok(())
}

fn write_templates(out: &mut impl Write, rows: &[CustomizationTemplate]) -> Result<()> {
    if rows.is_empty() {
        return write_empty(out);
    }

    for template in rows {
        let mode = match template.selection_mode {
            SelectionMode::Single => "single",
            SelectionMode::Multiple => "multiple",
        };
        writeln!(
            out,
            "{:<name$}  {:<8}  {:<8}  {:>2} options  {:>5} uses",
            sanitize_cell(&template.name, NAME_WIDTH),
            mode,
            if template.is_required { "required" } else { "optional" },
            template.options.len(),
            template.usage_count,
            name = NAME_WIDTH,
        )?;
    }
    writeln!(out, "\n{} template(s)", rows.len())?;
    Ok(())
}

fn write_stats(
    out: &mut impl Write,
    snapshot: &Snapshot,
    settings: &Settings,
    data_dir: &Path,
) -> Result<()> {
    let wallet = WalletSummary::from_transactions(&snapshot.transactions);
    let currency = wallet.currency.as_deref().unwrap_or(&settings.default_currency);

    writeln!(out, "Wallet")?;
    writeln!(out, "======")?;
    writeln!(out, "Transactions: {}", wallet.count)?;
    writeln!(out, "  Credits: {}", format_money(wallet.credits, currency))?;
    writeln!(out, "  Debits: {}", format_money(wallet.debits, currency))?;
    writeln!(out, "  Net: {}", format_money(wallet.net, currency))?;
    for total in &wallet.by_type {
        writeln!(
            out,
            "  {:<8} {:>4} x  {}",
            total.tx_type,
            total.count,
            format_money(total.total, currency)
        )?;
    }
    if let Some(newest) = snapshot.transactions.first() {
        writeln!(out, "  Newest: {}", newest.created_at.format("%Y-%m-%d %H:%M:%S"))?;
    }
    if let Some(oldest) = snapshot.transactions.last() {
        writeln!(out, "  Oldest: {}", oldest.created_at.format("%Y-%m-%d %H:%M:%S"))?;
    }
    writeln!(out)?;

    let menu = MenuSummary::from_items(&snapshot.menu_items);
    writeln!(out, "Menu")?;
    writeln!(out, "====")?;
    writeln!(
        out,
        "Items: {} ({} available, {} unavailable)",
        menu.total, menu.available, menu.unavailable
    )?;
    for category in &menu.categories {
        writeln!(out, "  {}: {}", sanitize_cell(&category.category, NAME_WIDTH), category.count)?;
    }
    if let Some((name, score)) = &menu.top_performer {
        writeln!(out, "  Top performer: {} ({:.1})", sanitize_cell(name, NAME_WIDTH), score)?;
    }
    writeln!(out)?;

    let templates = TemplateSummary::from_templates(&snapshot.templates);
    writeln!(out, "Templates")?;
    writeln!(out, "=========")?;
    writeln!(out, "Templates: {} ({} required)", templates.total, templates.required)?;
    writeln!(out, "  Total usage: {}", templates.total_usage)?;
    if let Some((name, uses)) = &templates.most_used {
        writeln!(out, "  Most used: {} ({} uses)", sanitize_cell(name, NAME_WIDTH), uses)?;
    }
    writeln!(out)?;

    writeln!(out, "Data directory: {}", format_path_with_tilde(data_dir))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};
    use rust_decimal::Decimal;

    use super::*;
    use crate::models::TransactionType;

    fn tx(id: &str, amount: i64, tx_type: TransactionType, day: u32) -> Transaction {
        Transaction {
            id: id.to_string(),
            tx_type,
            amount: Decimal::from(amount),
            currency: "USD".to_string(),
            created_at: Utc.with_ymd_and_hms(2024, 3, day, 8, 30, 0).unwrap(),
            settled_at: None,
            description: Some(format!("\x1b[31m{id}\x1b[0m run")),
            reference: None,
        }
    }

    fn render(f: impl FnOnce(&mut Vec<u8>) -> Result<()>) -> String {
        let mut buf = Vec::new();
        f(&mut buf).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn test_list_records_filters_sorts_and_limits() {
        let records = vec![
            tx("a", 10, TransactionType::Delivery, 1),
            tx("b", -5, TransactionType::Fee, 2),
            tx("c", 20, TransactionType::Delivery, 3),
        ];
        let state = SortState::with_direction(TransactionSortKey::Amount, SortDirection::Ascending);

        let rows = list_records(records.clone(), Some("min:0"), state, None).unwrap();
        assert_eq!(rows.iter().map(|t| t.id.as_str()).collect::<Vec<_>>(), vec!["a", "c"]);

        let rows = list_records(records, None, SortState::new(TransactionSortKey::Amount), Some(1))
            .unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].id, "c");
    }

    #[test]
    fn test_list_records_reports_bad_filter() {
        let err = list_records(
            vec![tx("a", 10, TransactionType::Delivery, 1)],
            Some("since:yesterday"),
            SortState::new(TransactionSortKey::Date),
            None,
        )
        .unwrap_err();
        assert!(err.to_string().contains("Invalid filter"));
    }

    #[test]
    fn test_write_transactions_strips_escapes() {
        let output = render(|out| write_transactions(out, &[tx("a", -5, TransactionType::Fee, 2)]));
        assert!(output.contains("2024-03-02 08:30"));
        assert!(output.contains("-5.00 USD"));
        assert!(output.contains("a run"));
        assert!(!output.contains('\x1b'));
        assert!(output.contains("1 transaction(s)"));
    }

    #[test]
    fn test_empty_results_message() {
        assert_eq!(render(|out| write_transactions(out, &[])), "No matching records\n");
        assert_eq!(render(|out| write_menu(out, &[])), "No matching records\n");
        assert_eq!(render(|out| write_templates(out, &[])), "No matching records\n");
    }

    #[test]
    fn test_write_stats_uses_default_currency_when_empty() {
        let settings = Settings { default_currency: "EUR".to_string(), ..Settings::default() };
        let output = render(|out| {
            write_stats(out, &Snapshot::default(), &settings, Path::new("/srv/desk"))
        });
        assert!(output.contains("Transactions: 0"));
        assert!(output.contains("Net: +0.00 EUR"));
        assert!(output.contains("Items: 0 (0 available, 0 unavailable)"));
        assert!(output.contains("Data directory: /srv/desk"));
    }
}
