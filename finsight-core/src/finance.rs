//! Finance record types: transactions, accounts, goals, budgets and bills

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{check_non_negative, check_positive, ModelError};

/// A single money movement on an account
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Transaction {
    /// Unique identifier for this record
    pub id: String,
    /// Always non-negative; the sign lives in `direction`
    pub amount: f64,
    /// Human-readable description
    pub description: String,
    /// Free-form category ("Food", "Bills", ...)
    pub category: String,
    /// Date of the transaction (YYYY-MM-DD)
    pub date: NaiveDate,
    #[serde(rename = "type")]
    pub direction: Direction,
    /// Display name of the owning account
    pub account: String,
}

/// Whether money came in or went out
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Direction {
    #[serde(rename = "credit")]
    Credit,
    #[serde(rename = "debit")]
    Debit,
}

impl Direction {
    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::Credit => "credit",
            Direction::Debit => "debit",
        }
    }
}

impl std::str::FromStr for Direction {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "credit" | "income" | "in" => Ok(Direction::Credit),
            "debit" | "expense" | "out" => Ok(Direction::Debit),
            other => Err(format!("unknown direction: {other}")),
        }
    }
}

impl Transaction {
    /// Create a new Transaction
    pub fn new(
        id: impl Into<String>,
        amount: f64,
        description: impl Into<String>,
        category: impl Into<String>,
        date: NaiveDate,
        direction: Direction,
        account: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            amount,
            description: description.into(),
            category: category.into(),
            date,
            direction,
            account: account.into(),
        }
    }

    pub fn is_debit(&self) -> bool {
        self.direction == Direction::Debit
    }

    pub fn is_credit(&self) -> bool {
        self.direction == Direction::Credit
    }

    /// Amount with the direction applied: credits positive, debits negative.
    pub fn signed_amount(&self) -> f64 {
        match self.direction {
            Direction::Credit => self.amount,
            Direction::Debit => -self.amount,
        }
    }

    pub fn validate(&self) -> Result<(), ModelError> {
        check_non_negative("transaction", &self.id, "amount", self.amount)
    }
}

/// A linked account (bank, credit card or wallet)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Account {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: AccountKind,
    /// Negative for overdraft or credit card debt
    pub balance: f64,
    pub last_updated: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum AccountKind {
    #[serde(rename = "bank")]
    Bank,
    #[serde(rename = "credit")]
    Credit,
    #[serde(rename = "wallet")]
    Wallet,
}

impl AccountKind {
    pub fn label(&self) -> &'static str {
        match self {
            AccountKind::Bank => "bank",
            AccountKind::Credit => "credit",
            AccountKind::Wallet => "wallet",
        }
    }
}

impl Account {
    pub fn validate(&self) -> Result<(), ModelError> {
        if !self.balance.is_finite() {
            return Err(ModelError::NotFinite {
                record: "account",
                id: self.id.clone(),
                field: "balance",
            });
        }
        Ok(())
    }
}

/// A savings goal with a target and deadline
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Goal {
    pub id: String,
    pub title: String,
    pub target_amount: f64,
    pub current_amount: f64,
    pub deadline: NaiveDate,
    pub category: String,
}

impl Goal {
    pub fn validate(&self) -> Result<(), ModelError> {
        check_positive("goal", &self.id, "targetAmount", self.target_amount)?;
        check_non_negative("goal", &self.id, "currentAmount", self.current_amount)
    }
}

/// A spending cap for one category
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Budget {
    pub id: String,
    pub category: String,
    pub limit: f64,
    pub spent: f64,
    pub period: BudgetPeriod,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum BudgetPeriod {
    #[serde(rename = "monthly")]
    Monthly,
    #[serde(rename = "weekly")]
    Weekly,
}

impl Budget {
    pub fn is_over(&self) -> bool {
        self.spent > self.limit
    }

    pub fn validate(&self) -> Result<(), ModelError> {
        check_positive("budget", &self.id, "limit", self.limit)?;
        check_non_negative("budget", &self.id, "spent", self.spent)
    }
}

/// A scheduled payment shown on the bill calendar
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Bill {
    pub id: String,
    pub title: String,
    pub amount: f64,
    pub due_date: NaiveDate,
    pub category: BillCategory,
    pub is_paid: bool,
    pub is_recurring: bool,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum BillCategory {
    #[serde(rename = "subscription")]
    Subscription,
    #[serde(rename = "emi")]
    Emi,
    #[serde(rename = "utility")]
    Utility,
    #[serde(rename = "insurance")]
    Insurance,
    #[serde(rename = "other")]
    Other,
}

impl BillCategory {
    pub fn label(&self) -> &'static str {
        match self {
            BillCategory::Subscription => "subscription",
            BillCategory::Emi => "emi",
            BillCategory::Utility => "utility",
            BillCategory::Insurance => "insurance",
            BillCategory::Other => "other",
        }
    }
}

impl Bill {
    pub fn validate(&self) -> Result<(), ModelError> {
        check_non_negative("bill", &self.id, "amount", self.amount)
    }
}

/// Read-mostly view of everything a session knows about.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Snapshot {
    #[serde(default)]
    pub accounts: Vec<Account>,
    #[serde(default)]
    pub transactions: Vec<Transaction>,
    #[serde(default)]
    pub goals: Vec<Goal>,
    #[serde(default)]
    pub budgets: Vec<Budget>,
    #[serde(default)]
    pub bills: Vec<Bill>,
}

impl Snapshot {
    /// Validate every record, returning all problems found.
    pub fn validate(&self) -> Vec<ModelError> {
        let mut errs = Vec::new();
        errs.extend(self.accounts.iter().filter_map(|a| a.validate().err()));
        errs.extend(self.transactions.iter().filter_map(|t| t.validate().err()));
        errs.extend(self.goals.iter().filter_map(|g| g.validate().err()));
        errs.extend(self.budgets.iter().filter_map(|b| b.validate().err()));
        errs.extend(self.bills.iter().filter_map(|b| b.validate().err()));
        errs
    }

    pub fn is_empty(&self) -> bool {
        self.accounts.is_empty()
            && self.transactions.is_empty()
            && self.goals.is_empty()
            && self.budgets.is_empty()
            && self.bills.is_empty()
    }
}
