//! Typed summary metrics computed from loaded records.
//!
//! Each summary is a plain struct so callers never have to dig through
//! loosely-typed key/value maps.

use std::collections::BTreeMap;

use rust_decimal::Decimal;

use super::menu::MenuItem;
use super::template::CustomizationTemplate;
use super::transaction::{Transaction, TransactionType};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeTotal {
    pub tx_type: TransactionType,
    pub count: usize,
    pub total: Decimal,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WalletSummary {
    pub count: usize,
    pub credits: Decimal,
    pub debits: Decimal,
    pub net: Decimal,
    /// Per-type totals, in [`TransactionType::ALL`] order, omitting unused types
    pub by_type: Vec<TypeTotal>,
    /// Currency shared by every transaction, or `None` when mixed or empty
    pub currency: Option<String>,
}

impl WalletSummary {
    pub fn from_transactions(transactions: &[Transaction]) -> Self {
        let mut credits = Decimal::ZERO;
        let mut debits = Decimal::ZERO;
        let mut per_type: BTreeMap<TransactionType, (usize, Decimal)> = BTreeMap::new();
        let mut currency: Option<&str> = None;
        let mut mixed_currency = false;

        for tx in transactions {
            if tx.amount.is_sign_negative() {
                debits += tx.amount;
            } else {
                credits += tx.amount;
            }

            let slot = per_type.entry(tx.tx_type).or_insert((0, Decimal::ZERO));
            slot.0 += 1;
            slot.1 += tx.amount;

            match currency {
                None => currency = Some(&tx.currency),
                Some(c) if c != tx.currency => mixed_currency = true,
                Some(_) => {}
            }
        }

        let by_type = TransactionType::ALL
            .iter()
            .filter_map(|t| {
                per_type.get(t).map(|(count, total)| TypeTotal {
                    tx_type: *t,
                    count: *count,
                    total: *total,
                })
            })
            .collect();

        Self {
            count: transactions.len(),
            credits,
            debits,
            net: credits + debits,
            by_type,
            currency: if mixed_currency { None } else { currency.map(str::to_string) },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryCount {
    pub category: String,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MenuSummary {
    pub total: usize,
    pub available: usize,
    pub unavailable: usize,
    /// Item counts per category, sorted by category name
    pub categories: Vec<CategoryCount>,
    /// Name and score of the highest-scoring item, if any item is scored
    pub top_performer: Option<(String, f64)>,
}

impl MenuSummary {
    pub fn from_items(items: &[MenuItem]) -> Self {
        let available = items.iter().filter(|i| i.is_available).count();

        let mut categories: BTreeMap<&str, usize> = BTreeMap::new();
        for item in items {
            *categories.entry(item.category.as_str()).or_insert(0) += 1;
        }

        let top_performer = items
            .iter()
            .filter_map(|i| i.performance_score.map(|s| (i, s)))
            .max_by(|a, b| a.1.total_cmp(&b.1))
            .map(|(i, s)| (i.name.clone(), s));

        Self {
            total: items.len(),
            available,
            unavailable: items.len() - available,
            categories: categories
                .into_iter()
                .map(|(category, count)| CategoryCount { category: category.to_string(), count })
                .collect(),
            top_performer,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateSummary {
    pub total: usize,
    pub required: usize,
    pub total_usage: u64,
    pub most_used: Option<(String, u32)>,
}

impl TemplateSummary {
    pub fn from_templates(templates: &[CustomizationTemplate]) -> Self {
        // max_by_key keeps the last maximum; reverse so ties favor the first template
        let most_used = templates
            .iter()
            .rev()
            .max_by_key(|t| t.usage_count)
            .map(|t| (t.name.clone(), t.usage_count));

        Self {
            total: templates.len(),
            required: templates.iter().filter(|t| t.is_required).count(),
            total_usage: templates.iter().map(|t| u64::from(t.usage_count)).sum(),
            most_used,
        }
    }
}
