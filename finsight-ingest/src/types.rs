use chrono::NaiveDate;
use finsight_core::{Direction, Transaction};
use serde::{Deserialize, Serialize};

/// Best-effort expense read off a receipt
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtractedExpense {
    /// Largest amount found on the receipt
    pub amount: f64,
    /// Merchant name when found, otherwise a placeholder
    pub description: String,
    pub date: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub merchant: Option<String>,
}

impl ExtractedExpense {
    /// Category given to expenses captured from receipts.
    pub const CATEGORY: &'static str = "Other";

    /// Turn the scan into a debit on `account`.
    pub fn into_transaction(self, id: impl Into<String>, account: impl Into<String>) -> Transaction {
        Transaction::new(
            id,
            self.amount,
            self.description,
            Self::CATEGORY,
            self.date,
            Direction::Debit,
            account,
        )
    }
}
