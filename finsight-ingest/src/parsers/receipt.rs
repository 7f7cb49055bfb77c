//! Receipt text parser: pulls an amount, a merchant and a date out of
//! recognized (noisy) receipt text.
//!
//! Heuristics, not a grammar:
//! - the total is assumed to be the largest amount on the receipt
//! - the first date-like token is the receipt date
//! - the merchant is a short, digit-free line near the top
//!
//! A receipt whose subtotal, tax line or single item is larger than the final
//! total will report that larger number.

use anyhow::{anyhow, Result};
use chrono::NaiveDate;
use chrono_tz::Tz;
use regex::Regex;
use std::sync::LazyLock;
use tracing::debug;

use crate::types::ExtractedExpense;

/// Used when no merchant line is found.
pub const PLACEHOLDER_DESCRIPTION: &str = "Receipt scan";

/// Merchant lines must be longer than this many characters...
const MERCHANT_MIN_CHARS: usize = 3;
/// ...and shorter than this.
const MERCHANT_MAX_CHARS: usize = 50;
/// Only the first few non-blank lines are merchant candidates.
const MERCHANT_SCAN_LINES: usize = 3;

static SHARED: LazyLock<Result<ReceiptParser, String>> =
    LazyLock::new(|| ReceiptParser::new().map_err(|e| format!("{e:#}")));

#[derive(Debug, Clone)]
pub struct ReceiptParser {
    amount_re: Regex,
    date_re: Regex,
}

impl ReceiptParser {
    pub fn new() -> Result<Self> {
        // optional sigil, digits, optional separator groups, optional 2-digit fraction
        let amount_re = Regex::new(r"(?:[₹$€£]\s*)?[0-9]+(?:,[0-9]+)*(?:\.[0-9]{2})?")?;

        // D/M/Y, D-M-Y, or "12 Jan 2025"
        let date_re = Regex::new(concat!(
            r"(?i)\b(?P<nd>[0-9]{1,2})[-/](?P<nm>[0-9]{1,2})[-/](?P<ny>[0-9]{2,4})\b",
            r"|\b(?P<wd>[0-9]{1,2})\s+",
            r"(?P<wm>jan|feb|mar|apr|may|jun|jul|aug|sep|sept|oct|nov|dec",
            r"|january|february|march|april|june|july|august|september|october|november|december)",
            r"\.?,?\s+(?P<wy>[0-9]{2,4})\b"
        ))?;

        Ok(Self { amount_re, date_re })
    }

    /// Process-wide parser, compiled on first use.
    pub fn shared() -> Result<&'static ReceiptParser> {
        SHARED
            .as_ref()
            .map_err(|e| anyhow!("compiling receipt patterns: {e}"))
    }

    /// Extract an expense, or `None` when the text holds no amount.
    ///
    /// `today` is the date used when no readable date is on the receipt.
    pub fn parse(&self, text: &str, today: NaiveDate) -> Option<ExtractedExpense> {
        let lines: Vec<&str> = text
            .lines()
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .collect();

        let amount = self.largest_amount(text)?;
        let date = self.first_date(text).unwrap_or(today);
        let merchant = merchant_candidate(&lines);

        debug!(amount, %date, merchant = ?merchant, "receipt parsed");

        Some(ExtractedExpense {
            amount,
            description: merchant
                .clone()
                .unwrap_or_else(|| PLACEHOLDER_DESCRIPTION.to_string()),
            date,
            merchant,
        })
    }

    /// Every amount-like token on the receipt, in order of appearance.
    pub fn amounts(&self, text: &str) -> Vec<f64> {
        self.amount_re
            .find_iter(text)
            .filter_map(|m| parse_amount(m.as_str()))
            .collect()
    }

    fn largest_amount(&self, text: &str) -> Option<f64> {
        let amounts = self.amounts(text);
        debug!(candidates = ?amounts, "receipt amount candidates");
        amounts.into_iter().reduce(f64::max)
    }

    /// The first date-like token, if it is a real calendar date.
    fn first_date(&self, text: &str) -> Option<NaiveDate> {
        let caps = self.date_re.captures(text)?;

        if let (Some(d), Some(m), Some(y)) = (caps.name("nd"), caps.name("nm"), caps.name("ny")) {
            let day: u32 = d.as_str().parse().ok()?;
            let month: u32 = m.as_str().parse().ok()?;
            let year = expand_year(y.as_str())?;
            // Day-first, as printed on Indian receipts; fall back to month-first.
            return NaiveDate::from_ymd_opt(year, month, day)
                .or_else(|| NaiveDate::from_ymd_opt(year, day, month));
        }

        let day: u32 = caps.name("wd")?.as_str().parse().ok()?;
        let month = month_from_name(caps.name("wm")?.as_str())?;
        let year = expand_year(caps.name("wy")?.as_str())?;
        NaiveDate::from_ymd_opt(year, month, day)
    }
}

/// Parse with the shared parser. `Ok(None)` for text without an amount; `Err`
/// only if the parser itself could not be built.
pub fn parse_receipt_text(text: &str, today: NaiveDate) -> Result<Option<ExtractedExpense>> {
    Ok(ReceiptParser::shared()?.parse(text, today))
}

/// Same as [`parse_receipt_text`], with "today" taken in `tz`.
pub fn parse_receipt_text_today(text: &str, tz: Tz) -> Result<Option<ExtractedExpense>> {
    parse_receipt_text(text, finsight_core::time::today_in(tz))
}

fn parse_amount(token: &str) -> Option<f64> {
    let cleaned: String = token
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.')
        .collect();
    cleaned.parse().ok()
}

fn expand_year(s: &str) -> Option<i32> {
    let y: i32 = s.parse().ok()?;
    match s.len() {
        2 => Some(2000 + y),
        4 => Some(y),
        _ => None,
    }
}

fn month_from_name(name: &str) -> Option<u32> {
    let prefix: String = name.chars().take(3).collect::<String>().to_lowercase();
    let m = match prefix.as_str() {
        "jan" => 1,
        "feb" => 2,
        "mar" => 3,
        "apr" => 4,
        "may" => 5,
        "jun" => 6,
        "jul" => 7,
        "aug" => 8,
        "sep" => 9,
        "oct" => 10,
        "nov" => 11,
        "dec" => 12,
        _ => return None,
    };
    Some(m)
}

fn merchant_candidate(lines: &[&str]) -> Option<String> {
    lines
        .iter()
        .take(MERCHANT_SCAN_LINES)
        .find(|l| {
            let n = l.chars().count();
            n > MERCHANT_MIN_CHARS
                && n < MERCHANT_MAX_CHARS
                && !l.chars().any(|c| c.is_ascii_digit())
        })
        .map(|l| l.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 1, 15).unwrap()
    }

    #[test]
    fn test_cafe_receipt() {
        let text = "Cafe Mocha\n123 Main St\nTotal: ₹450.00";
        let exp = parse_receipt_text(text, today()).unwrap().unwrap();
        assert_eq!(exp.amount, 450.0);
        assert_eq!(exp.merchant.as_deref(), Some("Cafe Mocha"));
        assert_eq!(exp.description, "Cafe Mocha");
        assert_eq!(exp.date, today());
    }

    #[test]
    fn test_no_amount_is_none() {
        assert!(parse_receipt_text("no numbers here at all", today()).unwrap().is_none());
        assert!(parse_receipt_text("", today()).unwrap().is_none());
        assert!(parse_receipt_text("   \n\n  ", today()).unwrap().is_none());
    }

    #[test]
    fn test_largest_amount_wins() {
        let text = "FRESH MART\nMilk ₹60.00\nBread ₹45.50\nTOTAL ₹1,105.50\nPaid";
        let exp = parse_receipt_text(text, today()).unwrap().unwrap();
        assert_eq!(exp.amount, 1105.5);
    }

    #[test]
    fn test_subtotal_larger_than_total_is_picked() {
        // Known limitation: discount makes the subtotal the largest number.
        let text = "Big Bazaar\nSubtotal 1200.00\nDiscount 200.00\nTotal 1000.00";
        let exp = parse_receipt_text(text, today()).unwrap().unwrap();
        assert_eq!(exp.amount, 1200.0);
    }

    #[test]
    fn test_other_sigils_and_separators() {
        let parser = ReceiptParser::new().unwrap();
        assert_eq!(parser.amounts("$ 12.99 and €3,000"), vec![12.99, 3000.0]);
        assert_eq!(parser.amounts("£1,23,456.00"), vec![123456.0]);
    }

    #[test]
    fn test_numeric_date_day_first() {
        let text = "Spice Hub\nDate: 05/01/2025\nAmount 320.00";
        let exp = parse_receipt_text(text, today()).unwrap().unwrap();
        assert_eq!(exp.date, NaiveDate::from_ymd_opt(2025, 1, 5).unwrap());
    }

    #[test]
    fn test_numeric_date_month_first_fallback() {
        let text = "Corner Store\n12-25-24\nTotal 99.00";
        let exp = parse_receipt_text(text, today()).unwrap().unwrap();
        assert_eq!(exp.date, NaiveDate::from_ymd_opt(2024, 12, 25).unwrap());
    }

    #[test]
    fn test_month_name_date() {
        let text = "Book Nook\n3 March 2024\nTotal ₹799";
        let exp = parse_receipt_text(text, today()).unwrap().unwrap();
        assert_eq!(exp.date, NaiveDate::from_ymd_opt(2024, 3, 3).unwrap());
    }

    #[test]
    fn test_invalid_first_date_falls_back_to_today() {
        let text = "Pharmacy Plus\n31/31/2025\nTotal 250.00";
        let exp = parse_receipt_text(text, today()).unwrap().unwrap();
        assert_eq!(exp.date, today());
    }

    #[test]
    fn test_no_merchant_uses_placeholder() {
        let text = "Item 20.00\nTotal 20.00";
        let exp = parse_receipt_text(text, today()).unwrap().unwrap();
        assert_eq!(exp.merchant, None);
        assert_eq!(exp.description, PLACEHOLDER_DESCRIPTION);
        assert_eq!(exp.amount, 20.0);
    }

    #[test]
    fn test_merchant_only_in_first_three_lines() {
        let text = "#1\nABC\n12 Road\nThe Grand Hotel\nTotal 5000";
        let exp = parse_receipt_text(text, today()).unwrap().unwrap();
        assert_eq!(exp.merchant, None);
    }

    #[test]
    fn test_merchant_skips_short_and_long_lines() {
        let long = "A".repeat(60);
        let text = format!("Bar\n{long}\nLa Pino'z Pizza\nTotal 640.00");
        let exp = parse_receipt_text(&text, today()).unwrap().unwrap();
        assert_eq!(exp.merchant.as_deref(), Some("La Pino'z Pizza"));
    }

    #[test]
    fn test_shared_parser_is_built_once() {
        let a = ReceiptParser::shared().unwrap();
        let b = ReceiptParser::shared().unwrap();
        assert!(std::ptr::eq(a, b));
        assert!(parse_receipt_text("Total 10.00", today()).is_ok());
    }

    #[test]
    fn test_today_in_timezone_variant() {
        let exp = parse_receipt_text_today("Tea Stall\nTotal 30", chrono_tz::Asia::Kolkata)
            .unwrap()
            .unwrap();
        assert_eq!(exp.amount, 30.0);
    }

    #[test]
    fn test_amount_is_max_of_all_matches() {
        let parser = ReceiptParser::new().unwrap();
        let text = "Shop 7\nqty 3 x 15.00\nTotal 45.00\nCash 100";
        let max = parser.amounts(text).into_iter().fold(f64::MIN, f64::max);
        assert_eq!(parser.parse(text, today()).unwrap().amount, max);
        assert_eq!(max, 100.0);
    }
}
