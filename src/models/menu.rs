use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MenuItem {
    pub id: String,
    pub name: String,
    pub category: String,
    pub base_price: Decimal,
    #[serde(default = "default_available")]
    pub is_available: bool,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub order_count: u32,
    #[serde(default)]
    pub performance_score: Option<f64>,
    /// Customization templates applied to this item, in display order
    #[serde(default)]
    pub template_ids: Vec<String>,
}

fn default_available() -> bool {
    true
}
