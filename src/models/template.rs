use anyhow::{Result, bail};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SelectionMode {
    Single,
    Multiple,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TemplateOption {
    pub name: String,
    #[serde(default)]
    pub additional_price: Decimal,
    #[serde(default)]
    pub is_default: bool,
}

/// Reusable set of customization options (size, spice level, ...) that can be
/// attached to one or more menu items.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomizationTemplate {
    pub id: String,
    pub name: String,
    pub selection_mode: SelectionMode,
    #[serde(default)]
    pub is_required: bool,
    #[serde(default)]
    pub options: Vec<TemplateOption>,
    #[serde(default)]
    pub usage_count: u32,
    #[serde(default)]
    pub description: Option<String>,
}

impl CustomizationTemplate {
    pub fn default_options(&self) -> impl Iterator<Item = &TemplateOption> {
        self.options.iter().filter(|o| o.is_default)
    }

    pub fn validate(&self) -> Result<()> {
        if self.id.trim().is_empty() {
            bail!("Template ID cannot be empty");
        }
        if self.selection_mode == SelectionMode::Single && self.default_options().count() > 1 {
            bail!("Template '{}' is single-select but has more than one default option", self.name);
        }
        Ok(())
    }
}
