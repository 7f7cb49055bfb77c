//! Demo dataset loaded into a session once a bank is linked.
//!
//! Pure data: nothing here touches the session store.

use chrono::{DateTime, NaiveDate, Utc};

use crate::finance::{
    Account, AccountKind, Bill, BillCategory, Budget, BudgetPeriod, Direction, Goal, Snapshot,
    Transaction,
};

fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap_or(NaiveDate::MIN)
}

pub fn seed_accounts(now: DateTime<Utc>) -> Vec<Account> {
    let account = |id: &str, name: &str, kind, balance| Account {
        id: id.to_string(),
        name: name.to_string(),
        kind,
        balance,
        last_updated: now,
    };
    vec![
        account("1", "HDFC Savings", AccountKind::Bank, 125000.0),
        account("2", "PhonePe Wallet", AccountKind::Wallet, 2500.0),
        account("3", "ICICI Credit Card", AccountKind::Credit, -15000.0),
    ]
}

/// Newest first.
pub fn seed_transactions() -> Vec<Transaction> {
    vec![
        Transaction::new("1", 2500.0, "Salary Credit", "Income", ymd(2025, 1, 10), Direction::Credit, "HDFC Savings"),
        Transaction::new("2", 850.0, "Grocery Shopping", "Food", ymd(2025, 1, 9), Direction::Debit, "HDFC Savings"),
        Transaction::new("3", 1200.0, "Electricity Bill", "Bills", ymd(2025, 1, 8), Direction::Debit, "HDFC Savings"),
        Transaction::new("4", 500.0, "Coffee with friends", "Entertainment", ymd(2025, 1, 7), Direction::Debit, "PhonePe Wallet"),
    ]
}

pub fn seed_goals() -> Vec<Goal> {
    vec![
        Goal {
            id: "1".into(),
            title: "Emergency Fund".into(),
            target_amount: 100000.0,
            current_amount: 45000.0,
            deadline: ymd(2025, 12, 31),
            category: "Savings".into(),
        },
        Goal {
            id: "2".into(),
            title: "Vacation to Goa".into(),
            target_amount: 25000.0,
            current_amount: 8000.0,
            deadline: ymd(2025, 6, 30),
            category: "Travel".into(),
        },
    ]
}

pub fn seed_budgets() -> Vec<Budget> {
    let budget = |id: &str, category: &str, limit, spent| Budget {
        id: id.to_string(),
        category: category.to_string(),
        limit,
        spent,
        period: BudgetPeriod::Monthly,
    };
    vec![
        budget("1", "Food", 8000.0, 5200.0),
        budget("2", "Entertainment", 3000.0, 2100.0),
        budget("3", "Shopping", 5000.0, 4800.0),
    ]
}

pub fn seed_bills() -> Vec<Bill> {
    let bill = |id: &str, title: &str, amount, due, category, is_paid, is_recurring| Bill {
        id: id.to_string(),
        title: title.to_string(),
        amount,
        due_date: due,
        category,
        is_paid,
        is_recurring,
    };
    vec![
        bill("1", "Netflix Subscription", 649.0, ymd(2025, 1, 15), BillCategory::Subscription, false, true),
        bill("2", "Home Loan EMI", 25000.0, ymd(2025, 1, 20), BillCategory::Emi, false, true),
        bill("3", "Electricity Bill", 1200.0, ymd(2025, 1, 25), BillCategory::Utility, false, true),
        bill("4", "Car Insurance", 15000.0, ymd(2025, 1, 30), BillCategory::Insurance, true, false),
    ]
}

/// The full demo dataset, with account timestamps set to `now`.
pub fn seed_snapshot(now: DateTime<Utc>) -> Snapshot {
    Snapshot {
        accounts: seed_accounts(now),
        transactions: seed_transactions(),
        goals: seed_goals(),
        budgets: seed_budgets(),
        bills: seed_bills(),
    }
}
