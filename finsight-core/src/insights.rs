//! Spending insights: category breakdown, monthly trend, daily spend.

use chrono::{Duration, NaiveDate};
use serde::Serialize;

use crate::finance::{Direction, Transaction};
use crate::summary::month_total;
use crate::time::months_back;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Period {
    Week,
    #[default]
    Month,
    Year,
}

impl Period {
    /// First date included in the period ending `today`.
    pub fn start(&self, today: NaiveDate) -> NaiveDate {
        match self {
            Period::Week => today - Duration::days(7),
            Period::Month => months_back(today, 1),
            Period::Year => months_back(today, 12),
        }
    }
}

impl std::str::FromStr for Period {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "week" => Ok(Period::Week),
            "month" => Ok(Period::Month),
            "year" => Ok(Period::Year),
            other => Err(format!("unknown period: {other}")),
        }
    }
}

pub fn in_period<'a>(transactions: &'a [Transaction], period: Period, today: NaiveDate) -> Vec<&'a Transaction> {
    let start = period.start(today);
    transactions.iter().filter(|t| t.date >= start).collect()
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategorySpend {
    pub category: String,
    pub amount: f64,
    /// Share of total debit spend, 0-100
    pub share: f64,
}

/// Debit totals per category, largest first.
pub fn spending_by_category(transactions: &[&Transaction]) -> Vec<CategorySpend> {
    let mut totals: Vec<(String, f64)> = Vec::new();
    for t in transactions.iter().filter(|t| t.is_debit()) {
        match totals.iter_mut().find(|(c, _)| *c == t.category) {
            Some((_, sum)) => *sum += t.amount,
            None => totals.push((t.category.clone(), t.amount)),
        }
    }

    let grand: f64 = totals.iter().map(|(_, a)| a).sum();
    let mut out: Vec<CategorySpend> = totals
        .into_iter()
        .map(|(category, amount)| CategorySpend {
            category,
            amount,
            share: if grand > 0.0 { amount * 100.0 / grand } else { 0.0 },
        })
        .collect();
    out.sort_by(|a, b| b.amount.total_cmp(&a.amount));
    out
}

pub fn total_spending(transactions: &[&Transaction]) -> f64 {
    transactions.iter().filter(|t| t.is_debit()).map(|t| t.amount).sum()
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthPoint {
    /// "Jan", "Feb", ...
    pub month: String,
    pub year: i32,
    pub income: f64,
    pub expenses: f64,
    pub savings: f64,
}

/// Twelve months ending with the month of `today`, oldest first.
pub fn monthly_trend(transactions: &[Transaction], today: NaiveDate) -> Vec<MonthPoint> {
    use chrono::Datelike;

    (0..12)
        .rev()
        .map(|back| {
            let m = months_back(today, back);
            let income = month_total(transactions, Direction::Credit, m);
            let expenses = month_total(transactions, Direction::Debit, m);
            MonthPoint {
                month: m.format("%b").to_string(),
                year: m.year(),
                income,
                expenses,
                savings: income - expenses,
            }
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DayPoint {
    /// "Mon", "Tue", ...
    pub day: String,
    pub date: NaiveDate,
    pub spending: f64,
}

/// Debit spend for each of the last 7 days including `today`, oldest first.
pub fn daily_spending(transactions: &[Transaction], today: NaiveDate) -> Vec<DayPoint> {
    (0..7)
        .rev()
        .map(|back| {
            let date = today - Duration::days(back);
            let spending = transactions
                .iter()
                .filter(|t| t.is_debit() && t.date == date)
                .map(|t| t.amount)
                .sum();
            DayPoint {
                day: date.format("%a").to_string(),
                date,
                spending,
            }
        })
        .collect()
}
