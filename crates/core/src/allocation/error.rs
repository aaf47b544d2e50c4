//! Allocation error types.

use rust_decimal::Decimal;
use tally_shared::types::InvoiceId;
use tally_shared::{AppError, FieldErrors};
use thiserror::Error;

/// Errors raised by the invoice allocation ledger.
#[derive(Debug, Error)]
pub enum AllocationError {
    /// Amount is negative or exceeds the invoice total.
    #[error("Allocation of {amount} to invoice {invoice_id} is outside 0..={max}")]
    OutOfRange {
        /// The invoice being allocated to.
        invoice_id: InvoiceId,
        /// The rejected amount.
        amount: Decimal,
        /// The invoice total.
        max: Decimal,
    },

    /// An invoice total supplied upstream is negative.
    #[error("Invoice {invoice_id} has a negative total {total}")]
    NegativeInvoiceTotal {
        /// The invoice.
        invoice_id: InvoiceId,
        /// The rejected total.
        total: Decimal,
    },

    /// Amount to distribute is negative.
    #[error("Amount to allocate cannot be negative: {0}")]
    NegativeAmount(Decimal),

    /// Amount to distribute exceeds what the selected invoices can absorb.
    #[error("Cannot allocate {amount}: selected invoices accept at most {capacity}")]
    ExceedsCapacity {
        /// The amount requested.
        amount: Decimal,
        /// Sum of selected invoice totals.
        capacity: Decimal,
    },

    /// The invoice is not in the allocation set.
    #[error("Invoice {0} is not selected")]
    NotSelected(InvoiceId),

    /// The invoice is not among the supplied open invoices.
    #[error("Invoice {0} not found")]
    InvoiceNotFound(InvoiceId),

    /// The same invoice appears twice.
    #[error("Invoice {0} is allocated more than once")]
    DuplicateInvoice(InvoiceId),

    /// Allocated total does not match the voucher total.
    #[error("Allocated {allocated} does not match voucher total {expected}")]
    Unreconciled {
        /// Sum of allocations.
        allocated: Decimal,
        /// The voucher total.
        expected: Decimal,
    },
}

impl AllocationError {
    /// Returns the HTTP status code for this error.
    #[must_use]
    pub fn status_code(&self) -> u16 {
        match self {
            Self::OutOfRange { .. }
            | Self::NegativeInvoiceTotal { .. }
            | Self::NegativeAmount(_)
            | Self::ExceedsCapacity { .. } => 422,
            Self::NotSelected(_) | Self::InvoiceNotFound(_) => 404,
            Self::DuplicateInvoice(_) | Self::Unreconciled { .. } => 400,
        }
    }

    /// Returns the error code for API responses.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::OutOfRange { .. }
            | Self::NegativeInvoiceTotal { .. }
            | Self::NegativeAmount(_)
            | Self::ExceedsCapacity { .. } => "OUT_OF_RANGE",
            Self::NotSelected(_) | Self::InvoiceNotFound(_) => "NOT_FOUND",
            Self::DuplicateInvoice(_) | Self::Unreconciled { .. } => "VALIDATION_ERROR",
        }
    }
}

impl From<AllocationError> for AppError {
    fn from(err: AllocationError) -> Self {
        match err {
            AllocationError::OutOfRange { .. }
            | AllocationError::NegativeInvoiceTotal { .. }
            | AllocationError::NegativeAmount(_)
            | AllocationError::ExceedsCapacity { .. } => Self::OutOfRange(err.to_string()),
            AllocationError::NotSelected(_) | AllocationError::InvoiceNotFound(_) => {
                Self::NotFound(err.to_string())
            }
            AllocationError::DuplicateInvoice(_) | AllocationError::Unreconciled { .. } => {
                let mut errors = FieldErrors::new();
                errors.add("linkedInvoices", err.to_string());
                Self::Validation(errors)
            }
        }
    }
}
