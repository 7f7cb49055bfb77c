//! Display formatting for amounts, dates and percentages (en-IN conventions).

use chrono::NaiveDate;

/// Format an amount as whole rupees with Indian digit grouping.
///
/// `125000.0` -> `₹1,25,000`, `-15000.0` -> `-₹15,000`. Fractions are rounded
/// half away from zero.
pub fn format_currency(amount: f64) -> String {
    if !amount.is_finite() {
        return "₹0".to_string();
    }
    let rounded = amount.round();
    let grouped = group_indian(rounded.abs() as u64);
    if rounded < 0.0 {
        format!("-₹{grouped}")
    } else {
        format!("₹{grouped}")
    }
}

/// Lakh/crore grouping: the last three digits, then pairs.
fn group_indian(n: u64) -> String {
    let digits = n.to_string();
    if digits.len() <= 3 {
        return digits;
    }
    let (head, tail) = digits.split_at(digits.len() - 3);

    let mut pairs: Vec<&str> = Vec::new();
    let mut end = head.len();
    while end > 0 {
        let start = end.saturating_sub(2);
        pairs.push(&head[start..end]);
        end = start;
    }
    pairs.reverse();

    format!("{},{}", pairs.join(","), tail)
}

/// `2025-01-10` -> `10 Jan 2025`
pub fn format_date(date: NaiveDate) -> String {
    date.format("%-d %b %Y").to_string()
}

/// Round to the nearest whole percent.
pub fn format_percentage(value: f64) -> String {
    format!("{}%", value.round() as i64)
}

/// Chart color for a transaction category. Unknown categories are grey.
pub fn category_color(category: &str) -> &'static str {
    match category {
        "Food" => "#10B981",
        "Bills" => "#3B82F6",
        "Shopping" => "#8B5CF6",
        "Entertainment" => "#F59E0B",
        "Transport" => "#EF4444",
        "Health" => "#06B6D4",
        "Income" => "#22C55E",
        "Transfer" => "#6B7280",
        "Investment" => "#8B5CF6",
        "Education" => "#F97316",
        _ => "#6B7280",
    }
}
