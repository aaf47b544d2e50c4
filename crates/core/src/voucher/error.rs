//! Voucher error types.

use rust_decimal::Decimal;
use tally_shared::{AppError, FieldErrors};
use thiserror::Error;

/// Errors raised when a voucher's entries cannot be resolved.
#[derive(Debug, Error)]
pub enum VoucherError {
    /// A contra voucher has more than one leg on a side.
    #[error(
        "Contra voucher must have exactly one credit and one debit leg, found {credit_legs} credit and {debit_legs} debit"
    )]
    MultiLegContra {
        /// Number of credit legs.
        credit_legs: usize,
        /// Number of debit legs.
        debit_legs: usize,
    },

    /// A contra voucher has no leg on one side.
    #[error("Contra voucher has no {side} leg")]
    MissingLeg {
        /// "credit" or "debit".
        side: &'static str,
    },

    /// An entry is both a debit and a credit.
    #[error("Entry {index} carries both a debit and a credit amount")]
    MixedLeg {
        /// Position of the entry.
        index: usize,
    },

    /// The two contra legs carry different amounts.
    #[error("Contra legs do not balance. Debit: {debit}, Credit: {credit}")]
    UnbalancedContra {
        /// Debit leg amount.
        debit: Decimal,
        /// Credit leg amount.
        credit: Decimal,
    },

    /// The voucher type has no save payload of the requested shape.
    #[error("Voucher type {0} has no save payload")]
    UnsupportedPayload(String),
}

impl VoucherError {
    /// Returns the HTTP status code for this error.
    #[must_use]
    pub fn status_code(&self) -> u16 {
        match self {
            Self::UnsupportedPayload(_) => 422,
            Self::MultiLegContra { .. }
            | Self::MissingLeg { .. }
            | Self::MixedLeg { .. }
            | Self::UnbalancedContra { .. } => 400,
        }
    }

    /// Returns the error code for API responses.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::MultiLegContra { .. } => "MULTI_LEG_CONTRA",
            Self::MissingLeg { .. } => "MISSING_LEG",
            Self::MixedLeg { .. } => "MIXED_LEG",
            Self::UnbalancedContra { .. } => "UNBALANCED_CONTRA",
            Self::UnsupportedPayload(_) => "UNSUPPORTED_PAYLOAD",
        }
    }

    /// The payload field the error belongs to.
    #[must_use]
    pub fn field(&self) -> String {
        match self {
            Self::MixedLeg { index } => format!("entries[{index}]"),
            Self::UnsupportedPayload(_) => "voucherType".to_string(),
            Self::MultiLegContra { .. }
            | Self::MissingLeg { .. }
            | Self::UnbalancedContra { .. } => "entries".to_string(),
        }
    }
}

impl From<VoucherError> for AppError {
    fn from(err: VoucherError) -> Self {
        let mut errors = FieldErrors::new();
        errors.add(err.field(), err.to_string());
        Self::Validation(errors)
    }
}
