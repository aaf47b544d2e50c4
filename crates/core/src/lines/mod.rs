//! Line item totals for orders and returns.
//!
//! - `types` - Line items and their totals
//! - `service` - Subtotal/tax/total computation and return reversal

pub mod service;
pub mod types;

#[cfg(test)]
mod service_props;

pub use service::LineItemTotals;
pub use types::{LineBreakdown, LineItem, LineTotals};
