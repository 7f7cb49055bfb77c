//! What the `scan` command tells the user about a scan.

use finsight_core::{format_currency, format_date};
use finsight_ingest::{RecognitionError, ScanOutcome};

pub const NO_EXPENSE: &str =
    "Could not extract an expense from this receipt. Try again or enter it manually.";
pub const NOT_AN_IMAGE: &str = "Please choose an image file (PNG, JPEG, GIF, WebP or BMP).";
pub const PROCESSING_FAILED: &str = "Failed to process image. Please try again.";

/// User-facing line for a scan result. Recognition problems read as a
/// processing failure; a readable receipt without an amount reads as
/// "no expense found".
pub fn scan_message(result: &Result<ScanOutcome, RecognitionError>) -> String {
    match result {
        Ok(ScanOutcome::Extracted { expense, .. }) => format!(
            "Expense: {} for {} on {}",
            format_currency(expense.amount),
            expense.description,
            format_date(expense.date)
        ),
        Ok(ScanOutcome::NoExpense { .. }) => NO_EXPENSE.to_string(),
        Err(RecognitionError::NotAnImage) => NOT_AN_IMAGE.to_string(),
        Err(RecognitionError::Unavailable(why)) => format!(
            "{PROCESSING_FAILED} (text recognition unavailable: {why}; install tesseract or pass --text)"
        ),
        Err(_) => PROCESSING_FAILED.to_string(),
    }
}
