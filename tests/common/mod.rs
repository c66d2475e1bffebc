//! Shared test utilities for integration tests
#![allow(dead_code)]

use std::fs;
use std::path::Path;

use serde_json::{Value, json};
use tempfile::TempDir;

/// Builder for data directories (`wallet/`, `menu.json`, `templates.json`)
pub struct DataDirBuilder {
    temp_dir: TempDir,
}

impl DataDirBuilder {
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        Self { temp_dir }
    }

    pub fn path(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Write raw content to `wallet/<name>`, creating subdirectories as needed
    pub fn with_wallet_file(self, name: &str, content: &str) -> Self {
        let path = self.temp_dir.path().join("wallet").join(name);
        fs::create_dir_all(path.parent().expect("wallet file has a parent"))
            .expect("Failed to create wallet dir");
        fs::write(path, content).expect("Failed to write wallet file");
        self
    }

    pub fn with_transactions(self, name: &str, transactions: &[TransactionBuilder]) -> Self {
        let content = transactions.iter().map(|t| t.to_json()).collect::<Vec<_>>().join("\n");
        self.with_wallet_file(name, &content)
    }

    pub fn with_menu_raw(self, content: &str) -> Self {
        fs::write(self.temp_dir.path().join("menu.json"), content)
            .expect("Failed to write menu.json");
        self
    }

    pub fn with_menu(self, items: &[MenuItemBuilder]) -> Self {
        let array = Value::Array(items.iter().map(|i| i.to_value()).collect());
        self.with_menu_raw(&array.to_string())
    }

    pub fn with_templates_raw(self, content: &str) -> Self {
        fs::write(self.temp_dir.path().join("templates.json"), content)
            .expect("Failed to write templates.json");
        self
    }

    pub fn with_templates(self, templates: &[TemplateBuilder]) -> Self {
        let array = Value::Array(templates.iter().map(|t| t.to_value()).collect());
        self.with_templates_raw(&array.to_string())
    }

    pub fn build(self) -> TempDir {
        self.temp_dir
    }
}

impl Default for DataDirBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Builder for wallet JSONL lines
pub struct TransactionBuilder {
    id: String,
    tx_type: String,
    amount: String,
    currency: String,
    created_at: String,
    description: Option<String>,
    reference: Option<String>,
}

impl TransactionBuilder {
    pub fn new(id: &str) -> Self {
        Self {
            id: id.to_string(),
            tx_type: "delivery".to_string(),
            amount: "10.00".to_string(),
            currency: "USD".to_string(),
            created_at: "2024-03-01T12:00:00Z".to_string(),
            description: None,
            reference: None,
        }
    }

    pub fn tx_type(mut self, tx_type: &str) -> Self {
        self.tx_type = tx_type.to_string();
        self
    }

    pub fn amount(mut self, amount: &str) -> Self {
        self.amount = amount.to_string();
        self
    }

    pub fn currency(mut self, currency: &str) -> Self {
        self.currency = currency.to_string();
        self
    }

    /// RFC 3339 timestamp
    pub fn created_at(mut self, created_at: &str) -> Self {
        self.created_at = created_at.to_string();
        self
    }

    pub fn description(mut self, description: &str) -> Self {
        self.description = Some(description.to_string());
        self
    }

    pub fn reference(mut self, reference: &str) -> Self {
        self.reference = Some(reference.to_string());
        self
    }

    pub fn to_json(&self) -> String {
        let mut value = json!({
            "id": self.id,
            "type": self.tx_type,
            "amount": self.amount,
            "currency": self.currency,
            "createdAt": self.created_at,
        });
        if let Some(description) = &self.description {
            value["description"] = json!(description);
        }
        if let Some(reference) = &self.reference {
            value["reference"] = json!(reference);
        }
        value.to_string()
    }
}

/// Builder for `menu.json` entries
pub struct MenuItemBuilder {
    id: String,
    name: String,
    category: String,
    base_price: String,
    is_available: bool,
    order_count: u32,
    performance_score: Option<f64>,
    template_ids: Vec<String>,
}

impl MenuItemBuilder {
    pub fn new(id: &str, name: &str) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            category: "Mains".to_string(),
            base_price: "10.00".to_string(),
            is_available: true,
            order_count: 0,
            performance_score: None,
            template_ids: Vec::new(),
        }
    }

    pub fn category(mut self, category: &str) -> Self {
        self.category = category.to_string();
        self
    }

    pub fn price(mut self, price: &str) -> Self {
        self.base_price = price.to_string();
        self
    }

    pub fn unavailable(mut self) -> Self {
        self.is_available = false;
        self
    }

    pub fn orders(mut self, order_count: u32) -> Self {
        self.order_count = order_count;
        self
    }

    pub fn score(mut self, score: f64) -> Self {
        self.performance_score = Some(score);
        self
    }

    pub fn templates(mut self, ids: &[&str]) -> Self {
        self.template_ids = ids.iter().map(|s| s.to_string()).collect();
        self
    }

    pub fn to_value(&self) -> Value {
        json!({
            "id": self.id,
            "name": self.name,
            "category": self.category,
            "basePrice": self.base_price,
            "isAvailable": self.is_available,
            "orderCount": self.order_count,
            "performanceScore": self.performance_score,
            "templateIds": self.template_ids,
        })
    }
}

/// Builder for `templates.json` entries
pub struct TemplateBuilder {
    id: String,
    name: String,
    selection_mode: String,
    is_required: bool,
    usage_count: u32,
    options: Vec<(String, String, bool)>,
}

impl TemplateBuilder {
    pub fn new(id: &str, name: &str) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            selection_mode: "single".to_string(),
            is_required: false,
            usage_count: 0,
            options: Vec::new(),
        }
    }

    pub fn multiple(mut self) -> Self {
        self.selection_mode = "multiple".to_string();
        self
    }

    pub fn required(mut self) -> Self {
        self.is_required = true;
        self
    }

    pub fn usage(mut self, usage_count: u32) -> Self {
        self.usage_count = usage_count;
        self
    }

    pub fn option(mut self, name: &str, price: &str, is_default: bool) -> Self {
        self.options.push((name.to_string(), price.to_string(), is_default));
        self
    }

    pub fn to_value(&self) -> Value {
        let options: Vec<Value> = self
            .options
            .iter()
            .map(|(name, price, is_default)| {
                json!({ "name": name, "additionalPrice": price, "isDefault": is_default })
            })
            .collect();
        json!({
            "id": self.id,
            "name": self.name,
            "selectionMode": self.selection_mode,
            "isRequired": self.is_required,
            "usageCount": self.usage_count,
            "options": options,
        })
    }
}

/// Small but complete data directory used across tests
pub fn sample_data_dir() -> TempDir {
    DataDirBuilder::new()
        .with_transactions(
            "2024/03.jsonl",
            &[
                TransactionBuilder::new("tx-1")
                    .amount("12.50")
                    .created_at("2024-03-01T11:00:00Z")
                    .description("Lunch delivery downtown"),
                TransactionBuilder::new("tx-2")
                    .tx_type("fee")
                    .amount("-2.00")
                    .created_at("2024-03-02T09:30:00Z")
                    .description("Platform fee"),
                TransactionBuilder::new("tx-3")
                    .tx_type("tip")
                    .amount("5.00")
                    .created_at("2024-03-03T20:15:00Z")
                    .description("Tip for dinner run")
                    .reference("order-77"),
            ],
        )
        .with_transactions(
            "2024/04.jsonl",
            &[TransactionBuilder::new("tx-4")
                .tx_type("payout")
                .amount("-15.50")
                .created_at("2024-04-01T08:00:00Z")
                .description("Weekly payout")],
        )
        .with_menu(&[
            MenuItemBuilder::new("m-1", "Pad Thai")
                .category("Noodles")
                .price("11.50")
                .orders(42)
                .score(4.6)
                .templates(&["t-1"]),
            MenuItemBuilder::new("m-2", "Green Curry")
                .category("Curries")
                .price("13.00")
                .orders(17)
                .score(4.1),
            MenuItemBuilder::new("m-3", "Mango Sticky Rice")
                .category("Desserts")
                .price("6.50")
                .orders(8)
                .unavailable(),
        ])
        .with_templates(&[
            TemplateBuilder::new("t-1", "Spice level")
                .required()
                .usage(12)
                .option("Mild", "0", true)
                .option("Hot", "0", false),
            TemplateBuilder::new("t-2", "Extras")
                .multiple()
                .usage(5)
                .option("Egg", "1.00", false)
                .option("Tofu", "1.50", false),
        ])
        .build()
}
