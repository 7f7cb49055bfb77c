//! Dashboard aggregates over a snapshot.

use chrono::NaiveDate;
use serde::Serialize;

use crate::finance::{Account, Budget, Direction, Transaction};
use crate::time::same_month;

/// Sum of all account balances (credit card debt counts negative).
pub fn total_balance(accounts: &[Account]) -> f64 {
    accounts.iter().map(|a| a.balance).sum()
}

/// Total of `direction` transactions dated in the same month as `month`.
pub fn month_total(transactions: &[Transaction], direction: Direction, month: NaiveDate) -> f64 {
    transactions
        .iter()
        .filter(|t| t.direction == direction && same_month(t.date, month))
        .map(|t| t.amount)
        .sum()
}

/// The first `n` transactions in collection order.
pub fn recent_transactions(transactions: &[Transaction], n: usize) -> &[Transaction] {
    &transactions[..n.min(transactions.len())]
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum BudgetHealth {
    Ok,
    /// Above 80% of the limit
    NearLimit,
    /// Above 100% of the limit
    Over,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BudgetStatus {
    pub category: String,
    pub spent: f64,
    pub limit: f64,
    pub percent: f64,
    pub remaining: f64,
    pub health: BudgetHealth,
}

pub fn budget_status(budget: &Budget) -> BudgetStatus {
    let percent = if budget.limit > 0.0 {
        budget.spent * 100.0 / budget.limit
    } else {
        0.0
    };
    let health = if percent > 100.0 {
        BudgetHealth::Over
    } else if percent > 80.0 {
        BudgetHealth::NearLimit
    } else {
        BudgetHealth::Ok
    };
    BudgetStatus {
        category: budget.category.clone(),
        spent: budget.spent,
        limit: budget.limit,
        percent,
        remaining: budget.limit - budget.spent,
        health,
    }
}

/// Headline numbers for the dashboard.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardSummary {
    pub total_balance: f64,
    pub month_income: f64,
    pub month_expenses: f64,
    pub account_count: usize,
}

pub fn dashboard(accounts: &[Account], transactions: &[Transaction], today: NaiveDate) -> DashboardSummary {
    DashboardSummary {
        total_balance: total_balance(accounts),
        month_income: month_total(transactions, Direction::Credit, today),
        month_expenses: month_total(transactions, Direction::Debit, today),
        account_count: accounts.len(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::finance::BudgetPeriod;
    use crate::seed::{seed_accounts, seed_transactions};
    use chrono::Utc;

    fn budget(limit: f64, spent: f64) -> Budget {
        Budget {
            id: "b".into(),
            category: "Food".into(),
            limit,
            spent,
            period: BudgetPeriod::Monthly,
        }
    }

    #[test]
    fn test_total_balance_of_seed() {
        assert_eq!(total_balance(&seed_accounts(Utc::now())), 112500.0);
    }

    #[test]
    fn test_month_totals() {
        let txns = seed_transactions();
        let jan = NaiveDate::from_ymd_opt(2025, 1, 20).unwrap();
        assert_eq!(month_total(&txns, Direction::Credit, jan), 2500.0);
        assert_eq!(month_total(&txns, Direction::Debit, jan), 2550.0);

        let feb = NaiveDate::from_ymd_opt(2025, 2, 1).unwrap();
        assert_eq!(month_total(&txns, Direction::Debit, feb), 0.0);
    }

    #[test]
    fn test_recent_transactions_clamps() {
        let txns = seed_transactions();
        assert_eq!(recent_transactions(&txns, 5).len(), 4);
        assert_eq!(recent_transactions(&txns, 2)[0].id, "1");
    }

    #[test]
    fn test_budget_health_thresholds() {
        assert_eq!(budget_status(&budget(8000.0, 5200.0)).health, BudgetHealth::Ok);
        assert_eq!(budget_status(&budget(5000.0, 4800.0)).health, BudgetHealth::NearLimit);
        assert_eq!(budget_status(&budget(5000.0, 5000.0)).health, BudgetHealth::NearLimit);
        let over = budget_status(&budget(5000.0, 6000.0));
        assert_eq!(over.health, BudgetHealth::Over);
        assert_eq!(over.remaining, -1000.0);
    }
}
