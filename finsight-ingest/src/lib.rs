//! finsight-ingest: receipt text extraction and the scanning pipeline around it.

pub mod parsers;
pub mod scan;
pub mod types;

pub use parsers::receipt::{parse_receipt_text, parse_receipt_text_today, ReceiptParser};
pub use scan::{ImageKind, ReceiptScanner, RecognitionError, ScanOutcome, TextRecognizer};
pub use types::ExtractedExpense;
