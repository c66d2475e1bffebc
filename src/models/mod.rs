//! Domain records for the delivery desk.
//!
//! - [`Transaction`] - driver wallet entries (credits and debits)
//! - [`MenuItem`] - vendor menu entries
//! - [`CustomizationTemplate`] - reusable option sets attached to menu items
//! - [`analytics`] - typed summaries computed from the records above
//!
//! Records are deserialized with serde; custom deserializers for timestamps live in
//! [`crate::store::deserializers`].

pub mod analytics;
pub mod menu;
pub mod template;
pub mod transaction;

pub use analytics::{CategoryCount, MenuSummary, TemplateSummary, TypeTotal, WalletSummary};
pub use menu::MenuItem;
pub use template::{CustomizationTemplate, SelectionMode, TemplateOption};
pub use transaction::{Transaction, TransactionType};

/// Records addressable by a stable string ID
pub trait Identifiable {
    fn id(&self) -> &str;
}

impl Identifiable for Transaction {
    fn id(&self) -> &str {
        &self.id
    }
}

impl Identifiable for MenuItem {
    fn id(&self) -> &str {
        &self.id
    }
}

impl Identifiable for CustomizationTemplate {
    fn id(&self) -> &str {
        &self.id
    }
}
