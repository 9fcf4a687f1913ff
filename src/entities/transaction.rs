// 🧾 Transaction Entity - One recorded expense or income
//
// Immutable once recorded. The only way in is Ledger::record_transaction,
// which validates every field before the record is built.

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};

// ============================================================================
// DIRECTION
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionDirection {
    /// Money going out
    Expense,

    /// Money coming in
    Income,
}

impl TransactionDirection {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionDirection::Expense => "expense",
            TransactionDirection::Income => "income",
        }
    }

    pub fn toggle(&self) -> TransactionDirection {
        match self {
            TransactionDirection::Expense => TransactionDirection::Income,
            TransactionDirection::Income => TransactionDirection::Expense,
        }
    }
}

// ============================================================================
// TRANSACTION ENTITY
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    pub id: String,

    /// Owning wallet (foreign key to Wallet.id)
    pub wallet_id: String,

    /// Strictly positive, smallest currency unit
    pub amount: i64,

    pub category_id: String,

    /// Always a child of `category_id` when present
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subcategory_id: Option<String>,

    /// Matches the direction of `category_id`
    pub direction: TransactionDirection,

    pub timestamp: DateTime<FixedOffset>,

    pub description: String,

    /// Raw JSON text, validated but never interpreted
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
}

impl Transaction {
    /// Signed effect on the owning wallet's balance
    pub fn signed_amount(&self) -> i64 {
        match self.direction {
            TransactionDirection::Expense => -self.amount,
            TransactionDirection::Income => self.amount,
        }
    }

    pub fn is_expense(&self) -> bool {
        self.direction == TransactionDirection::Expense
    }

    pub fn is_income(&self) -> bool {
        self.direction == TransactionDirection::Income
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(direction: TransactionDirection) -> Transaction {
        Transaction {
            id: "tx-001".to_string(),
            wallet_id: "wallet-bidv".to_string(),
            amount: 420_000,
            category_id: "cat-living".to_string(),
            subcategory_id: Some("cat-living-electricity".to_string()),
            direction,
            timestamp: DateTime::parse_from_rfc3339("2024-06-18T08:15:00+07:00").unwrap(),
            description: "May electricity bill".to_string(),
            location: None,
        }
    }

    #[test]
    fn test_signed_amount() {
        assert_eq!(sample(TransactionDirection::Expense).signed_amount(), -420_000);
        assert_eq!(sample(TransactionDirection::Income).signed_amount(), 420_000);
    }

    #[test]
    fn test_direction_helpers() {
        let tx = sample(TransactionDirection::Expense);
        assert!(tx.is_expense());
        assert!(!tx.is_income());
        assert_eq!(TransactionDirection::Expense.toggle(), TransactionDirection::Income);
    }

    #[test]
    fn test_serialization_skips_absent_optionals() {
        let mut tx = sample(TransactionDirection::Expense);
        tx.subcategory_id = None;

        let json = serde_json::to_value(&tx).unwrap();
        assert_eq!(json["direction"], "expense");
        assert!(json.get("subcategory_id").is_none());
        assert!(json.get("location").is_none());
    }
}
