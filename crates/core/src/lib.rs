//! Financial transaction core for Tally.
//!
//! This crate contains pure business logic with ZERO web or database dependencies.
//! Every monetary figure is a `rust_decimal::Decimal`; persistence and the API
//! are collaborators reached only through payloads and commit callbacks.
//!
//! # Modules
//!
//! - `lines` - Line item subtotal, tax, and total
//! - `voucher` - Contra from/to resolution, voucher validation and payloads
//! - `allocation` - Invoice allocation for payments and receipts
//! - `workflow` - Order lifecycle state machine
//! - `order` - Order documents, validation and payloads
//! - `vat` - VAT aggregation and report lifecycle

pub mod allocation;
pub mod lines;
pub mod order;
pub mod vat;
pub mod voucher;
pub mod workflow;
