//! Integration tests for filtering loaded records

mod common;

use chrono::NaiveDate;
use common::sample_data_dir;
use delivery_desk::filters::{FilterCriteria, RecordFlag, apply_filters, matches, parse_filter};
use delivery_desk::store::{DataSource, FileDataSource, Snapshot};
use rust_decimal::Decimal;

fn load_sample() -> Snapshot {
    let dir = sample_data_dir();
    FileDataSource::new(dir.path()).load().expect("Load sample data")
}

fn tx_ids(snapshot: &Snapshot, filter: &str) -> Vec<String> {
    let criteria = parse_filter(filter).expect("Parse filter");
    apply_filters(snapshot.transactions.clone(), &criteria).into_iter().map(|t| t.id).collect()
}

#[test]
fn test_filter_integration_category() {
    let snapshot = load_sample();
    assert_eq!(tx_ids(&snapshot, "type:fee"), vec!["tx-2"]);
    // Category match is exact
    assert!(tx_ids(&snapshot, "type:Fee").is_empty());
}

#[test]
fn test_filter_integration_text_is_case_insensitive() {
    let snapshot = load_sample();
    assert_eq!(tx_ids(&snapshot, "DINNER"), vec!["tx-3"]);
    // Reference is a searchable field too
    assert_eq!(tx_ids(&snapshot, "order-77"), vec!["tx-3"]);
}

#[test]
fn test_filter_integration_date_bounds_inclusive() {
    let snapshot = load_sample();
    assert_eq!(tx_ids(&snapshot, "from:2024-03-03 to:2024-04-01"), vec!["tx-4", "tx-3"]);
    assert_eq!(tx_ids(&snapshot, "until:2024-03-01"), vec!["tx-1"]);
}

#[test]
fn test_filter_integration_amount_bounds() {
    let snapshot = load_sample();
    assert_eq!(tx_ids(&snapshot, "min:0"), vec!["tx-3", "tx-1"]);
    assert_eq!(tx_ids(&snapshot, "max:-2"), vec!["tx-4", "tx-2"]);
}

#[test]
fn test_filter_integration_malformed_amount_is_no_constraint() {
    let snapshot = load_sample();
    assert_eq!(tx_ids(&snapshot, "min:abc").len(), snapshot.transactions.len());
}

#[test]
fn test_filter_integration_combined_criteria() {
    let snapshot = load_sample();
    assert_eq!(tx_ids(&snapshot, "type:delivery since:2024-03-01 min:10 lunch"), vec!["tx-1"]);
    assert!(tx_ids(&snapshot, "type:delivery dinner").is_empty());
}

#[test]
fn test_filter_integration_menu_flags_and_price() {
    let snapshot = load_sample();

    let criteria = parse_filter("is:available max:12").unwrap();
    let items = apply_filters(snapshot.menu_items.clone(), &criteria);
    assert_eq!(items.iter().map(|i| i.name.as_str()).collect::<Vec<_>>(), vec!["Pad Thai"]);

    let criteria = parse_filter("category:\"Desserts\"").unwrap();
    let items = apply_filters(snapshot.menu_items, &criteria);
    assert_eq!(items.len(), 1);
    assert!(!items[0].is_available);
}

#[test]
fn test_filter_integration_records_without_field_do_not_pass() {
    let snapshot = load_sample();

    // Menu items have no date; templates have no amount
    let dated = FilterCriteria::new().with_dates(NaiveDate::from_ymd_opt(2020, 1, 1), None);
    assert!(apply_filters(snapshot.menu_items.clone(), &dated).is_empty());

    let priced = FilterCriteria::new().with_amounts(Some(Decimal::ZERO), None);
    assert!(apply_filters(snapshot.templates.clone(), &priced).is_empty());

    // Transactions carry no flags
    let flagged = FilterCriteria::new().with_flag(RecordFlag::Available);
    assert!(apply_filters(snapshot.transactions, &flagged).is_empty());
}

#[test]
fn test_filter_integration_template_option_names_searchable() {
    let snapshot = load_sample();
    let criteria = parse_filter("tofu").unwrap();
    let templates = apply_filters(snapshot.templates, &criteria);
    assert_eq!(templates.len(), 1);
    assert_eq!(templates[0].id, "t-2");
}

#[test]
fn test_filter_is_idempotent() {
    let snapshot = load_sample();
    for filter in ["type:delivery", "min:0", "is:available", "lunch", "since:2024-03-02"] {
        let criteria = parse_filter(filter).unwrap();
        let once = apply_filters(snapshot.transactions.clone(), &criteria);
        let twice = apply_filters(once.clone(), &criteria);
        assert_eq!(once, twice, "filter {filter:?} should be idempotent");
    }
}

#[test]
fn test_filter_preserves_relative_order() {
    let snapshot = load_sample();
    let criteria = parse_filter("min:-100").unwrap();
    let filtered = apply_filters(snapshot.transactions.clone(), &criteria);

    let positions: Vec<usize> = filtered
        .iter()
        .map(|t| snapshot.transactions.iter().position(|o| o.id == t.id).unwrap())
        .collect();
    assert!(positions.windows(2).all(|w| w[0] < w[1]));
}

#[test]
fn test_filter_matches_agrees_with_apply() {
    let snapshot = load_sample();
    let criteria = parse_filter("type:delivery").unwrap();
    let expected: Vec<bool> = snapshot.transactions.iter().map(|t| matches(t, &criteria)).collect();
    let filtered = apply_filters(snapshot.transactions.clone(), &criteria);
    assert_eq!(expected.iter().filter(|m| **m).count(), filtered.len());
}

#[test]
fn test_filter_integration_parse_errors() {
    assert!(parse_filter("since:2024-13-01").is_err());
    assert!(parse_filter("colour:red").is_err());
    assert!(parse_filter("type:tip type:fee").is_err());
    assert!(parse_filter("is:spicy").is_err());
}
