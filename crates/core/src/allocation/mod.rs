//! Invoice allocation for payment and receipt vouchers.
//!
//! # Modules
//!
//! - `types` - Open invoices and linked-invoice rows
//! - `error` - Allocation errors
//! - `ledger` - The per-voucher allocation ledger

pub mod error;
pub mod ledger;
pub mod types;

#[cfg(test)]
mod ledger_props;

pub use error::AllocationError;
pub use ledger::InvoiceAllocationLedger;
pub use types::{InvoicePayment, LinkedInvoiceAllocation, OpenInvoice, ToggleOutcome};
