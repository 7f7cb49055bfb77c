//! Bill calendar: what is due next and what is already late.

use chrono::NaiveDate;

use crate::finance::Bill;
use crate::time::days_between;

/// Unpaid bills due today or later, soonest first.
pub fn upcoming(bills: &[Bill], today: NaiveDate) -> Vec<&Bill> {
    let mut out: Vec<&Bill> = bills
        .iter()
        .filter(|b| !b.is_paid && b.due_date >= today)
        .collect();
    out.sort_by_key(|b| b.due_date);
    out
}

/// Unpaid bills whose due date has passed, in collection order.
pub fn overdue(bills: &[Bill], today: NaiveDate) -> Vec<&Bill> {
    bills
        .iter()
        .filter(|b| !b.is_paid && b.due_date < today)
        .collect()
}

pub fn total(bills: &[&Bill]) -> f64 {
    bills.iter().map(|b| b.amount).sum()
}

/// Negative when overdue.
pub fn days_until_due(bill: &Bill, today: NaiveDate) -> i64 {
    days_between(today, bill.due_date)
}

/// Every bill due in the given month (paid or not), by due date.
pub fn due_in_month(bills: &[Bill], month: NaiveDate) -> Vec<&Bill> {
    let mut out: Vec<&Bill> = bills
        .iter()
        .filter(|b| crate::time::same_month(b.due_date, month))
        .collect();
    out.sort_by_key(|b| b.due_date);
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::seed::seed_bills;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 1, d).unwrap()
    }

    #[test]
    fn test_upcoming_skips_paid_and_past() {
        let bills = seed_bills();
        let up = upcoming(&bills, day(18));
        let titles: Vec<_> = up.iter().map(|b| b.title.as_str()).collect();
        // Car Insurance is paid; Netflix is already late
        assert_eq!(titles, vec!["Home Loan EMI", "Electricity Bill"]);
        assert_eq!(total(&up), 26200.0);
    }

    #[test]
    fn test_due_today_is_upcoming_not_overdue() {
        let bills = seed_bills();
        assert!(upcoming(&bills, day(15)).iter().any(|b| b.id == "1"));
        assert!(overdue(&bills, day(15)).is_empty());
    }

    #[test]
    fn test_overdue() {
        let bills = seed_bills();
        let late = overdue(&bills, day(31));
        assert_eq!(late.len(), 3);
        assert_eq!(total(&late), 26849.0);
        assert_eq!(days_until_due(late[0], day(31)), -16);
    }

    #[test]
    fn test_due_in_month() {
        let bills = seed_bills();
        assert_eq!(due_in_month(&bills, day(1)).len(), 4);
        let feb = NaiveDate::from_ymd_opt(2025, 2, 1).unwrap();
        assert!(due_in_month(&bills, feb).is_empty());
    }
}
