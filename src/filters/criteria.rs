use std::str::FromStr;

use chrono::NaiveDate;
use rust_decimal::Decimal;

/// Boolean record fields that can be required by a filter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RecordFlag {
    /// Menu item is currently orderable
    Available,
    /// Template must be answered by the customer
    Required,
}

/// Inclusive calendar-day range; either bound may be open
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DateRange {
    pub start: Option<NaiveDate>,
    pub end: Option<NaiveDate>,
}

impl DateRange {
    pub fn is_empty(&self) -> bool {
        self.start.is_none() && self.end.is_none()
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start.is_none_or(|start| date >= start) && self.end.is_none_or(|end| date <= end)
    }
}

/// Inclusive numeric range; either bound may be open
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AmountRange {
    pub min: Option<Decimal>,
    pub max: Option<Decimal>,
}

impl AmountRange {
    pub fn is_empty(&self) -> bool {
        self.min.is_none() && self.max.is_none()
    }

    pub fn contains(&self, amount: Decimal) -> bool {
        self.min.is_none_or(|min| amount >= min) && self.max.is_none_or(|max| amount <= max)
    }
}

/// Filter configuration for one list screen.
///
/// Every field is optional; an absent field places no constraint on records.
/// Active constraints are combined with AND.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterCriteria {
    pub query: Option<String>,
    pub category: Option<String>,
    pub date_range: DateRange,
    pub amount_range: AmountRange,
    pub flags: Vec<RecordFlag>,
}

impl FilterCriteria {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_query(mut self, query: impl Into<String>) -> Self {
        self.query = Some(query.into());
        self
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn with_dates(mut self, start: Option<NaiveDate>, end: Option<NaiveDate>) -> Self {
        self.date_range = DateRange { start, end };
        self
    }

    pub fn with_amounts(mut self, min: Option<Decimal>, max: Option<Decimal>) -> Self {
        self.amount_range = AmountRange { min, max };
        self
    }

    pub fn with_flag(mut self, flag: RecordFlag) -> Self {
        if !self.flags.contains(&flag) {
            self.flags.push(flag);
        }
        self
    }

    /// Normalized text query: trimmed, `None` when blank
    pub fn text_query(&self) -> Option<&str> {
        self.query.as_deref().map(str::trim).filter(|q| !q.is_empty())
    }

    pub fn is_empty(&self) -> bool {
        self.text_query().is_none()
            && self.category.is_none()
            && self.date_range.is_empty()
            && self.amount_range.is_empty()
            && self.flags.is_empty()
    }
}

/// Parse a user-typed amount.
///
/// Unparseable input yields `None`, which callers treat as "no constraint".
pub fn parse_amount(input: &str) -> Option<Decimal> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return None;
    }
    match Decimal::from_str(trimmed) {
        Ok(value) => Some(value),
        Err(e) => {
            tracing::warn!(input = trimmed, error = %e, "Ignoring malformed amount bound");
            None
        }
    }
}
