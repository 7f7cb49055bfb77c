//! Typed validation errors for finance records.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ModelError {
    #[error("{record} {id}: {field} must not be negative (got {value})")]
    NegativeAmount {
        record: &'static str,
        id: String,
        field: &'static str,
        value: f64,
    },

    #[error("{record} {id}: {field} must be greater than zero (got {value})")]
    NonPositive {
        record: &'static str,
        id: String,
        field: &'static str,
        value: f64,
    },

    #[error("{record} {id}: {field} must be a finite number")]
    NotFinite {
        record: &'static str,
        id: String,
        field: &'static str,
    },
}

pub(crate) fn check_non_negative(
    record: &'static str,
    id: &str,
    field: &'static str,
    value: f64,
) -> Result<(), ModelError> {
    if !value.is_finite() {
        return Err(ModelError::NotFinite { record, id: id.to_string(), field });
    }
    if value < 0.0 {
        return Err(ModelError::NegativeAmount { record, id: id.to_string(), field, value });
    }
    Ok(())
}

pub(crate) fn check_positive(
    record: &'static str,
    id: &str,
    field: &'static str,
    value: f64,
) -> Result<(), ModelError> {
    check_non_negative(record, id, field, value)?;
    if value == 0.0 {
        return Err(ModelError::NonPositive { record, id: id.to_string(), field, value });
    }
    Ok(())
}
