//! Receipt scanning pipeline: image bytes -> recognized text -> expense.
//!
//! Text recognition is an external collaborator behind [`TextRecognizer`].
//! Recognition failures are errors; "recognized fine but no expense in it" is
//! a normal [`ScanOutcome::NoExpense`].

use anyhow::Result;
use chrono::NaiveDate;
use thiserror::Error;
use tracing::{info, warn};

use crate::parsers::receipt::ReceiptParser;
use crate::types::ExtractedExpense;

#[derive(Debug, Error)]
pub enum RecognitionError {
    #[error("not an image (expected PNG, JPEG, GIF, WebP or BMP)")]
    NotAnImage,
    #[error("no text recognized in image")]
    Empty,
    #[error("text recognition unavailable: {0}")]
    Unavailable(String),
    #[error("text recognition failed: {0}")]
    Failed(String),
}

/// Image formats accepted for scanning, identified by magic bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageKind {
    Png,
    Jpeg,
    Gif,
    Webp,
    Bmp,
}

impl ImageKind {
    pub fn sniff(bytes: &[u8]) -> Option<Self> {
        match bytes {
            [0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A, ..] => Some(ImageKind::Png),
            [0xFF, 0xD8, 0xFF, ..] => Some(ImageKind::Jpeg),
            [b'G', b'I', b'F', b'8', b'7' | b'9', b'a', ..] => Some(ImageKind::Gif),
            [b'R', b'I', b'F', b'F', _, _, _, _, b'W', b'E', b'B', b'P', ..] => Some(ImageKind::Webp),
            // file size, then four reserved bytes that are always zero
            [b'B', b'M', _, _, _, _, 0, 0, 0, 0, ..] => Some(ImageKind::Bmp),
            _ => None,
        }
    }
}

/// Turns image bytes into text (an OCR engine, a remote service, a fake).
pub trait TextRecognizer {
    fn recognize(&self, image: &[u8]) -> Result<String, RecognitionError>;
}

#[derive(Debug, Clone, PartialEq)]
pub enum ScanOutcome {
    Extracted {
        text: String,
        expense: ExtractedExpense,
    },
    /// Text was recognized but held no amount; ask the user to retry or
    /// enter the expense by hand.
    NoExpense { text: String },
}

impl ScanOutcome {
    pub fn text(&self) -> &str {
        match self {
            ScanOutcome::Extracted { text, .. } | ScanOutcome::NoExpense { text } => text,
        }
    }

    pub fn expense(&self) -> Option<&ExtractedExpense> {
        match self {
            ScanOutcome::Extracted { expense, .. } => Some(expense),
            ScanOutcome::NoExpense { .. } => None,
        }
    }
}

pub struct ReceiptScanner<R> {
    recognizer: R,
    parser: ReceiptParser,
}

impl<R: TextRecognizer> ReceiptScanner<R> {
    pub fn new(recognizer: R) -> Result<Self> {
        Ok(Self {
            recognizer,
            parser: ReceiptParser::shared()?.clone(),
        })
    }

    /// Recognize and parse a receipt image.
    pub fn scan(&self, image: &[u8], today: NaiveDate) -> Result<ScanOutcome, RecognitionError> {
        let kind = ImageKind::sniff(image).ok_or(RecognitionError::NotAnImage)?;
        info!(?kind, bytes = image.len(), "scanning receipt image");

        let text = self.recognizer.recognize(image)?;
        if text.trim().is_empty() {
            return Err(RecognitionError::Empty);
        }
        Ok(self.extract(text, today))
    }

    /// Parse text that was already recognized elsewhere.
    pub fn extract(&self, text: String, today: NaiveDate) -> ScanOutcome {
        match self.parser.parse(&text, today) {
            Some(expense) => ScanOutcome::Extracted { text, expense },
            None => {
                warn!("no amount found in recognized receipt text");
                ScanOutcome::NoExpense { text }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    const PNG: &[u8] = &[0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A, 0, 0, 0, 0];

    struct FakeRecognizer {
        reply: Result<&'static str, &'static str>,
        calls: Cell<usize>,
    }

    impl FakeRecognizer {
        fn ok(text: &'static str) -> Self {
            Self { reply: Ok(text), calls: Cell::new(0) }
        }
        fn failing(msg: &'static str) -> Self {
            Self { reply: Err(msg), calls: Cell::new(0) }
        }
    }

    impl TextRecognizer for FakeRecognizer {
        fn recognize(&self, _image: &[u8]) -> Result<String, RecognitionError> {
            self.calls.set(self.calls.get() + 1);
            self.reply
                .map(str::to_string)
                .map_err(|m| RecognitionError::Failed(m.to_string()))
        }
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 1, 15).unwrap()
    }

    #[test]
    fn test_sniff_formats() {
        assert_eq!(ImageKind::sniff(PNG), Some(ImageKind::Png));
        assert_eq!(ImageKind::sniff(&[0xFF, 0xD8, 0xFF, 0xE0]), Some(ImageKind::Jpeg));
        assert_eq!(ImageKind::sniff(b"GIF89a...."), Some(ImageKind::Gif));
        assert_eq!(ImageKind::sniff(b"RIFF\x10\x00\x00\x00WEBPVP8 "), Some(ImageKind::Webp));
        assert_eq!(ImageKind::sniff(b"%PDF-1.7"), None);
        assert_eq!(ImageKind::sniff(b""), None);
    }

    #[test]
    fn test_bmp_needs_zero_reserved_bytes() {
        let bmp = [b'B', b'M', 0x36, 0x10, 0, 0, 0, 0, 0, 0, 0x36, 0, 0, 0];
        assert_eq!(ImageKind::sniff(&bmp), Some(ImageKind::Bmp));
        assert_eq!(ImageKind::sniff(b"BMW 320d service invoice"), None);
        assert_eq!(ImageKind::sniff(b"BM"), None);
    }

    #[test]
    fn test_scan_extracts_expense() {
        let scanner = ReceiptScanner::new(FakeRecognizer::ok("Cafe Mocha\n123 Main St\nTotal: ₹450.00")).unwrap();
        let out = scanner.scan(PNG, today()).unwrap();
        let exp = out.expense().unwrap();
        assert_eq!(exp.amount, 450.0);
        assert_eq!(exp.merchant.as_deref(), Some("Cafe Mocha"));
    }

    #[test]
    fn test_non_image_rejected_before_recognition() {
        let scanner = ReceiptScanner::new(FakeRecognizer::ok("Total 10.00")).unwrap();
        let err = scanner.scan(b"hello world", today()).unwrap_err();
        assert!(matches!(err, RecognitionError::NotAnImage));
        assert_eq!(scanner.recognizer.calls.get(), 0);
    }

    #[test]
    fn test_recognition_failure_is_distinct_from_no_expense() {
        let scanner = ReceiptScanner::new(FakeRecognizer::failing("blurry")).unwrap();
        assert!(matches!(scanner.scan(PNG, today()), Err(RecognitionError::Failed(_))));

        let scanner = ReceiptScanner::new(FakeRecognizer::ok("thank you for shopping")).unwrap();
        let out = scanner.scan(PNG, today()).unwrap();
        assert!(matches!(out, ScanOutcome::NoExpense { .. }));
        assert_eq!(out.text(), "thank you for shopping");
    }

    #[test]
    fn test_blank_text_is_empty_error() {
        let scanner = ReceiptScanner::new(FakeRecognizer::ok("  \n ")).unwrap();
        assert!(matches!(scanner.scan(PNG, today()), Err(RecognitionError::Empty)));
    }

    #[test]
    fn test_expense_into_transaction() {
        let scanner = ReceiptScanner::new(FakeRecognizer::ok("unused")).unwrap();
        let out = scanner.extract("Cafe Mocha\nTotal ₹450.00".to_string(), today());
        let txn = out.expense().unwrap().clone().into_transaction("r1", "HDFC Savings");
        assert!(txn.is_debit());
        assert_eq!(txn.amount, 450.0);
        assert_eq!(txn.category, "Other");
        assert_eq!(txn.description, "Cafe Mocha");
        assert_eq!(txn.date, today());
    }
}
