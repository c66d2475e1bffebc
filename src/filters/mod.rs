pub mod apply;
pub mod criteria;
pub mod parser;

pub use apply::{Filterable, apply_filters, matches};
pub use criteria::{AmountRange, DateRange, FilterCriteria, RecordFlag, parse_amount};
pub use parser::parse_filter;
