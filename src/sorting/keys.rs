use std::cmp::Ordering;

use clap::ValueEnum;

use super::sort::Sortable;
use crate::models::{CustomizationTemplate, MenuItem, Transaction};

/// Screen sort key that can be shown and cycled through
pub trait SortKey: Copy {
    /// Short name for status lines
    fn label(self) -> &'static str;
    /// Next key in cycling order, wrapping around
    fn next(self) -> Self;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum TransactionSortKey {
    Date,
    Amount,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum MenuItemSortKey {
    Name,
    Price,
    OrderCount,
    Performance,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum TemplateSortKey {
    Name,
    UsageCount,
}

impl SortKey for TransactionSortKey {
    fn label(self) -> &'static str {
        match self {
            TransactionSortKey::Date => "date",
            TransactionSortKey::Amount => "amount",
        }
    }

    fn next(self) -> Self {
        match self {
            TransactionSortKey::Date => TransactionSortKey::Amount,
            TransactionSortKey::Amount => TransactionSortKey::Date,
        }
    }
}

impl SortKey for MenuItemSortKey {
    fn label(self) -> &'static str {
        match self {
            MenuItemSortKey::Name => "name",
            MenuItemSortKey::Price => "price",
            MenuItemSortKey::OrderCount => "orders",
            MenuItemSortKey::Performance => "performance",
        }
    }

    fn next(self) -> Self {
        match self {
            MenuItemSortKey::Name => MenuItemSortKey::Price,
            MenuItemSortKey::Price => MenuItemSortKey::OrderCount,
            MenuItemSortKey::OrderCount => MenuItemSortKey::Performance,
            MenuItemSortKey::Performance => MenuItemSortKey::Name,
        }
    }
}

impl SortKey for TemplateSortKey {
    fn label(self) -> &'static str {
        match self {
            TemplateSortKey::Name => "name",
            TemplateSortKey::UsageCount => "usage",
        }
    }

    fn next(self) -> Self {
        match self {
            TemplateSortKey::Name => TemplateSortKey::UsageCount,
            TemplateSortKey::UsageCount => TemplateSortKey::Name,
        }
    }
}

impl Sortable for Transaction {
    type Key = TransactionSortKey;

    fn compare_by(&self, other: &Self, key: TransactionSortKey) -> Ordering {
        match key {
            TransactionSortKey::Date => self.created_at.cmp(&other.created_at),
            TransactionSortKey::Amount => self.amount.cmp(&other.amount),
        }
    }
}

impl Sortable for MenuItem {
    type Key = MenuItemSortKey;

    fn compare_by(&self, other: &Self, key: MenuItemSortKey) -> Ordering {
        match key {
            MenuItemSortKey::Name => self.name.cmp(&other.name),
            MenuItemSortKey::Price => self.base_price.cmp(&other.base_price),
            MenuItemSortKey::OrderCount => self.order_count.cmp(&other.order_count),
            // Unscored items sort below every scored item
            MenuItemSortKey::Performance => match (self.performance_score, other.performance_score)
            {
                (Some(a), Some(b)) => a.total_cmp(&b),
                (Some(_), None) => Ordering::Greater,
                (None, Some(_)) => Ordering::Less,
                (None, None) => Ordering::Equal,
            },
        }
    }
}

impl Sortable for CustomizationTemplate {
    type Key = TemplateSortKey;

    fn compare_by(&self, other: &Self, key: TemplateSortKey) -> Ordering {
        match key {
            TemplateSortKey::Name => self.name.cmp(&other.name),
            TemplateSortKey::UsageCount => self.usage_count.cmp(&other.usage_count),
        }
    }
}
