use std::fmt;

use anyhow::{Result, bail};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Wallet transaction categories.
///
/// Each type is either a credit (money into the driver's wallet) or a debit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransactionType {
    Delivery,
    Tip,
    Bonus,
    Refund,
    Payout,
    Fee,
    Penalty,
}

impl TransactionType {
    pub const ALL: [TransactionType; 7] = [
        TransactionType::Delivery,
        TransactionType::Tip,
        TransactionType::Bonus,
        TransactionType::Refund,
        TransactionType::Payout,
        TransactionType::Fee,
        TransactionType::Penalty,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionType::Delivery => "delivery",
            TransactionType::Tip => "tip",
            TransactionType::Bonus => "bonus",
            TransactionType::Refund => "refund",
            TransactionType::Payout => "payout",
            TransactionType::Fee => "fee",
            TransactionType::Penalty => "penalty",
        }
    }

    pub fn is_credit(&self) -> bool {
        matches!(
            self,
            TransactionType::Delivery
                | TransactionType::Tip
                | TransactionType::Bonus
                | TransactionType::Refund
        )
    }
}

impl fmt::Display for TransactionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    pub id: String,
    #[serde(rename = "type")]
    pub tx_type: TransactionType,
    pub amount: Decimal,
    pub currency: String,
    #[serde(
        rename = "createdAt",
        deserialize_with = "crate::store::deserializers::deserialize_timestamp"
    )]
    pub created_at: DateTime<Utc>,
    #[serde(
        rename = "settledAt",
        default,
        deserialize_with = "crate::store::deserializers::deserialize_optional_timestamp"
    )]
    pub settled_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub reference: Option<String>,
}

impl Transaction {
    pub fn is_credit(&self) -> bool {
        self.tx_type.is_credit()
    }

    /// Check that the amount's sign agrees with the credit/debit classification.
    /// Zero amounts are accepted for any type.
    pub fn validate(&self) -> Result<()> {
        if self.id.trim().is_empty() {
            bail!("Transaction ID cannot be empty");
        }
        if self.amount.is_zero() {
            return Ok(());
        }
        let positive = self.amount.is_sign_positive();
        if positive != self.tx_type.is_credit() {
            bail!(
                "Transaction {} has amount {} but type '{}' is a {}",
                self.id,
                self.amount,
                self.tx_type,
                if self.tx_type.is_credit() { "credit" } else { "debit" }
            );
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use chrono::TimeZone;

    use super::*;

    fn tx(tx_type: TransactionType, amount: &str) -> Transaction {
        Transaction {
            id: "tx-1".to_string(),
            tx_type,
            amount: Decimal::from_str(amount).unwrap(),
            currency: "USD".to_string(),
            created_at: Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap(),
            settled_at: None,
            description: None,
            reference: None,
        }
    }

    #[test]
    fn test_credit_classification() {
        assert!(TransactionType::Delivery.is_credit());
        assert!(TransactionType::Tip.is_credit());
        assert!(!TransactionType::Payout.is_credit());
        assert!(!TransactionType::Penalty.is_credit());
    }

    #[test]
    fn test_validate_sign_matches_type() {
        assert!(tx(TransactionType::Delivery, "12.50").validate().is_ok());
        assert!(tx(TransactionType::Payout, "-40.00").validate().is_ok());
        assert!(tx(TransactionType::Fee, "0").validate().is_ok());
    }

    #[test]
    fn test_validate_sign_mismatch() {
        let err = tx(TransactionType::Tip, "-3.00").validate().unwrap_err();
        assert!(err.to_string().contains("is a credit"));

        let err = tx(TransactionType::Payout, "10").validate().unwrap_err();
        assert!(err.to_string().contains("is a debit"));
    }

    #[test]
    fn test_validate_empty_id() {
        let mut t = tx(TransactionType::Tip, "1");
        t.id = "  ".to_string();
        assert!(t.validate().is_err());
    }

    #[test]
    fn test_deserialize_transaction() {
        let json = r#"{"id":"tx-9","type":"tip","amount":"4.25","currency":"EUR","createdAt":"2024-05-01T08:00:00Z","description":"Lunch rush"}"#;
        let t: Transaction = serde_json::from_str(json).unwrap();
        assert_eq!(t.tx_type, TransactionType::Tip);
        assert_eq!(t.amount, Decimal::from_str("4.25").unwrap());
        assert_eq!(t.settled_at, None);
        assert_eq!(t.description.as_deref(), Some("Lunch rush"));
    }
}
