//! Bank linking: pick a bank, confirm with a one-time code, or skip.
//!
//! Select -> Otp { bank } -> Linked
//!
//! The code is only checked for shape (six digits); there is no bank on the
//! other end to verify it against.

use serde::Serialize;
use thiserror::Error;
use tracing::info;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Bank {
    pub id: &'static str,
    pub name: &'static str,
}

pub const BANKS: &[Bank] = &[
    Bank { id: "hdfc", name: "HDFC Bank" },
    Bank { id: "icici", name: "ICICI Bank" },
    Bank { id: "sbi", name: "State Bank of India" },
    Bank { id: "axis", name: "Axis Bank" },
    Bank { id: "kotak", name: "Kotak Mahindra Bank" },
];

pub const OTP_LEN: usize = 6;

pub fn find_bank(id: &str) -> Option<&'static Bank> {
    let id = id.trim().to_lowercase();
    BANKS.iter().find(|b| b.id == id)
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LinkError {
    #[error("unknown bank '{0}' (expected one of: hdfc, icici, sbi, axis, kotak)")]
    UnknownBank(String),
    #[error("OTP must be 6 digits")]
    InvalidOtp,
    #[error("no bank selected")]
    NoBankSelected,
    #[error("waiting for the OTP from {0}")]
    OtpPending(&'static str),
    #[error("already linked")]
    AlreadyLinked,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum BankLink {
    #[default]
    Select,
    Otp { bank: &'static Bank },
    /// `bank` is `None` when the user skipped linking.
    Linked { bank: Option<&'static Bank> },
}

impl BankLink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_linked(&self) -> bool {
        matches!(self, BankLink::Linked { .. })
    }

    /// Choose a bank; allowed again while waiting for the code.
    pub fn select_bank(&mut self, id: &str) -> Result<&'static Bank, LinkError> {
        if self.is_linked() {
            return Err(LinkError::AlreadyLinked);
        }
        let bank = find_bank(id).ok_or_else(|| LinkError::UnknownBank(id.to_string()))?;
        *self = BankLink::Otp { bank };
        Ok(bank)
    }

    pub fn submit_otp(&mut self, otp: &str) -> Result<&'static Bank, LinkError> {
        let bank = match *self {
            BankLink::Otp { bank } => bank,
            BankLink::Select => return Err(LinkError::NoBankSelected),
            BankLink::Linked { .. } => return Err(LinkError::AlreadyLinked),
        };
        let otp = otp.trim();
        if otp.len() != OTP_LEN || !otp.bytes().all(|b| b.is_ascii_digit()) {
            return Err(LinkError::InvalidOtp);
        }
        info!(bank = bank.id, "bank linked");
        *self = BankLink::Linked { bank: Some(bank) };
        Ok(bank)
    }

    /// Skip linking; the app continues with demo data.
    pub fn skip(&mut self) {
        if !self.is_linked() {
            info!("bank linking skipped");
            *self = BankLink::Linked { bank: None };
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_select_then_otp_links() {
        let mut link = BankLink::new();
        assert_eq!(link.select_bank("HDFC").unwrap().name, "HDFC Bank");
        assert!(matches!(link, BankLink::Otp { .. }));
        link.submit_otp("123456").unwrap();
        assert_eq!(link, BankLink::Linked { bank: find_bank("hdfc") });
    }

    #[test]
    fn test_short_or_non_numeric_otp_rejected() {
        let mut link = BankLink::new();
        link.select_bank("sbi").unwrap();
        assert_eq!(link.submit_otp("12345"), Err(LinkError::InvalidOtp));
        assert_eq!(link.submit_otp("1234567"), Err(LinkError::InvalidOtp));
        assert_eq!(link.submit_otp("12a456"), Err(LinkError::InvalidOtp));
        assert!(!link.is_linked());
        assert!(link.submit_otp(" 654321 ").is_ok());
    }

    #[test]
    fn test_otp_before_bank() {
        let mut link = BankLink::new();
        assert_eq!(link.submit_otp("123456"), Err(LinkError::NoBankSelected));
    }

    #[test]
    fn test_unknown_bank() {
        let mut link = BankLink::new();
        assert_eq!(link.select_bank("chase"), Err(LinkError::UnknownBank("chase".into())));
        assert_eq!(link, BankLink::Select);
    }

    #[test]
    fn test_skip_links_without_bank() {
        let mut link = BankLink::new();
        link.select_bank("axis").unwrap();
        link.skip();
        assert_eq!(link, BankLink::Linked { bank: None });
        assert_eq!(link.select_bank("kotak"), Err(LinkError::AlreadyLinked));
    }
}
