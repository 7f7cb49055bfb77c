//! Transaction search: free-text query plus category, direction and date filters.

use chrono::{Duration, NaiveDate};
use serde::Serialize;

use crate::finance::{Direction, Transaction};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DateRange {
    #[default]
    All,
    Today,
    /// Last 7 days
    Week,
    /// Last 30 days
    Month,
    /// Last 365 days
    Year,
}

impl DateRange {
    fn earliest(&self, today: NaiveDate) -> Option<NaiveDate> {
        let days = match self {
            DateRange::All => return None,
            DateRange::Today => 0,
            DateRange::Week => 7,
            DateRange::Month => 30,
            DateRange::Year => 365,
        };
        today.checked_sub_signed(Duration::days(days))
    }

    fn contains(&self, date: NaiveDate, today: NaiveDate) -> bool {
        match self {
            DateRange::All => true,
            DateRange::Today => date == today,
            _ => self.earliest(today).is_none_or(|start| date >= start),
        }
    }
}

impl std::str::FromStr for DateRange {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "all" => Ok(DateRange::All),
            "today" => Ok(DateRange::Today),
            "week" => Ok(DateRange::Week),
            "month" => Ok(DateRange::Month),
            "year" => Ok(DateRange::Year),
            other => Err(format!("unknown date range: {other}")),
        }
    }
}

/// Empty / `None` fields match everything.
#[derive(Debug, Clone, Default)]
pub struct TransactionFilter {
    pub query: String,
    /// Exact category match
    pub category: Option<String>,
    pub direction: Option<Direction>,
    pub range: DateRange,
}

impl TransactionFilter {
    pub fn matches(&self, txn: &Transaction, today: NaiveDate) -> bool {
        let q = self.query.trim().to_lowercase();
        let matches_query = q.is_empty()
            || txn.description.to_lowercase().contains(&q)
            || txn.category.to_lowercase().contains(&q);

        let matches_category = self.category.as_ref().is_none_or(|c| txn.category == *c);
        let matches_direction = self.direction.is_none_or(|d| txn.direction == d);

        matches_query && matches_category && matches_direction && self.range.contains(txn.date, today)
    }

    pub fn apply<'a>(&self, transactions: &'a [Transaction], today: NaiveDate) -> Vec<&'a Transaction> {
        transactions.iter().filter(|t| self.matches(t, today)).collect()
    }
}

/// Distinct categories in first-seen order.
pub fn categories(transactions: &[Transaction]) -> Vec<&str> {
    let mut out: Vec<&str> = Vec::new();
    for t in transactions {
        if !out.contains(&t.category.as_str()) {
            out.push(&t.category);
        }
    }
    out
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SearchSummary {
    pub count: usize,
    pub credits: f64,
    pub debits: f64,
    /// credits minus debits
    pub net: f64,
}

pub fn summarize(results: &[&Transaction]) -> SearchSummary {
    let credits: f64 = results.iter().filter(|t| t.is_credit()).map(|t| t.amount).sum();
    let debits: f64 = results.iter().filter(|t| t.is_debit()).map(|t| t.amount).sum();
    SearchSummary {
        count: results.len(),
        credits,
        debits,
        net: credits - debits,
    }
}
