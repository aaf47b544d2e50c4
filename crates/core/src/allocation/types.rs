//! Allocation domain types.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tally_shared::types::InvoiceId;

/// An invoice as supplied by the invoicing collaborator.
///
/// `balance` is authoritative and is never recomputed here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OpenInvoice {
    /// The invoice identifier.
    pub invoice_id: InvoiceId,
    /// The invoice's grand total; the ceiling for any single allocation.
    pub invoice_total: Decimal,
    /// The invoice's remaining unpaid amount, as reported upstream.
    pub balance: Decimal,
}

impl OpenInvoice {
    /// Creates an open invoice record.
    #[must_use]
    pub fn new(invoice_id: impl Into<InvoiceId>, invoice_total: Decimal, balance: Decimal) -> Self {
        Self {
            invoice_id: invoice_id.into(),
            invoice_total,
            balance,
        }
    }
}

/// The portion of a voucher applied to one invoice.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LinkedInvoiceAllocation {
    /// The invoice identifier.
    pub invoice_id: InvoiceId,
    /// Amount of this voucher applied to the invoice.
    pub amount: Decimal,
    /// The invoice's remaining unpaid amount after this allocation.
    #[serde(default)]
    pub balance: Decimal,
}

/// A linked invoice row as sent on the voucher save payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvoicePayment {
    /// The invoice identifier.
    pub invoice_id: InvoiceId,
    /// Amount of this voucher applied to the invoice.
    pub amount: Decimal,
}

impl From<&LinkedInvoiceAllocation> for InvoicePayment {
    fn from(allocation: &LinkedInvoiceAllocation) -> Self {
        Self {
            invoice_id: allocation.invoice_id.clone(),
            amount: allocation.amount,
        }
    }
}

/// Result of toggling an invoice in or out of the allocation set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToggleOutcome {
    /// The invoice was added with the given default amount.
    Added {
        /// The amount allocated on add.
        amount: Decimal,
    },
    /// The invoice was removed.
    Removed,
}
