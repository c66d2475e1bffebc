use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

use super::criteria::{FilterCriteria, RecordFlag};
use crate::models::{CustomizationTemplate, MenuItem, Transaction};

/// Fields a record exposes to the filter evaluator.
///
/// Returning `None` (or an empty list) means the record has no such field; any
/// active criterion on that field then rejects the record.
pub trait Filterable {
    /// Text fields searched by the free-text query
    fn search_fields(&self) -> Vec<&str>;
    fn category(&self) -> Option<&str>;
    fn date(&self) -> Option<DateTime<Utc>>;
    fn amount(&self) -> Option<Decimal>;
    fn flag(&self, flag: RecordFlag) -> Option<bool>;
}

impl Filterable for Transaction {
    fn search_fields(&self) -> Vec<&str> {
        let mut fields = vec![self.id.as_str()];
        fields.extend(self.description.as_deref());
        fields.extend(self.reference.as_deref());
        fields
    }

    fn category(&self) -> Option<&str> {
        Some(self.tx_type.as_str())
    }

    fn date(&self) -> Option<DateTime<Utc>> {
        Some(self.created_at)
    }

    fn amount(&self) -> Option<Decimal> {
        Some(self.amount)
    }

    fn flag(&self, _flag: RecordFlag) -> Option<bool> {
        None
    }
}

impl Filterable for MenuItem {
    fn search_fields(&self) -> Vec<&str> {
        let mut fields = vec![self.name.as_str()];
        fields.extend(self.description.as_deref());
        fields
    }

    fn category(&self) -> Option<&str> {
        Some(&self.category)
    }

    fn date(&self) -> Option<DateTime<Utc>> {
        None
    }

    fn amount(&self) -> Option<Decimal> {
        Some(self.base_price)
    }

    fn flag(&self, flag: RecordFlag) -> Option<bool> {
        match flag {
            RecordFlag::Available => Some(self.is_available),
            RecordFlag::Required => None,
        }
    }
}

impl Filterable for CustomizationTemplate {
    fn search_fields(&self) -> Vec<&str> {
        let mut fields = vec![self.name.as_str()];
        fields.extend(self.description.as_deref());
        fields.extend(self.options.iter().map(|o| o.name.as_str()));
        fields
    }

    fn category(&self) -> Option<&str> {
        None
    }

    fn date(&self) -> Option<DateTime<Utc>> {
        None
    }

    fn amount(&self) -> Option<Decimal> {
        None
    }

    fn flag(&self, flag: RecordFlag) -> Option<bool> {
        match flag {
            RecordFlag::Required => Some(self.is_required),
            RecordFlag::Available => None,
        }
    }
}

/// Apply filter criteria to records, returning the matching subset.
///
/// Filtering is stable: surviving records keep their relative order. Empty
/// criteria return the input unchanged.
pub fn apply_filters<T: Filterable>(records: Vec<T>, criteria: &FilterCriteria) -> Vec<T> {
    if criteria.is_empty() {
        return records;
    }

    // Lowercase the query once rather than per record
    let query = criteria.text_query().map(str::to_lowercase);

    records.into_iter().filter(|record| evaluate(record, criteria, query.as_deref())).collect()
}

/// Check whether a single record passes every active criterion
pub fn matches<T: Filterable>(record: &T, criteria: &FilterCriteria) -> bool {
    let query = criteria.text_query().map(str::to_lowercase);
    evaluate(record, criteria, query.as_deref())
}

fn evaluate<T: Filterable>(record: &T, criteria: &FilterCriteria, query: Option<&str>) -> bool {
    query.is_none_or(|q| match_text(record, q))
        && criteria.category.as_deref().is_none_or(|c| match_category(record, c))
        && (criteria.date_range.is_empty() || match_date(record, criteria))
        && (criteria.amount_range.is_empty() || match_amount(record, criteria))
        && criteria.flags.iter().all(|flag| record.flag(*flag).unwrap_or(false))
}

/// Case-insensitive substring match against any designated text field
fn match_text<T: Filterable>(record: &T, lower_query: &str) -> bool {
    record.search_fields().iter().any(|field| field.to_lowercase().contains(lower_query))
}

/// Exact match on the designated category field
fn match_category<T: Filterable>(record: &T, category: &str) -> bool {
    record.category() == Some(category)
}

fn match_date<T: Filterable>(record: &T, criteria: &FilterCriteria) -> bool {
    record.date().is_some_and(|ts| criteria.date_range.contains(ts.date_naive()))
}

fn match_amount<T: Filterable>(record: &T, criteria: &FilterCriteria) -> bool {
    record.amount().is_some_and(|amount| criteria.amount_range.contains(amount))
}
