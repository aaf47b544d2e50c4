//! VAT reporting.
//!
//! Aggregates sales (output VAT) and purchases (input VAT) over a period
//! into a report that moves DRAFT → FINALIZED → SUBMITTED.

pub mod error;
pub mod service;
pub mod types;


pub use error::VatError;
pub use service::VatAggregator;
pub use types::*;
