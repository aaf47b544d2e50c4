//! Purchase and sales orders and their returns.
//!
//! - `types` - Order documents and party types
//! - `validation` - Field-keyed order validation
//! - `payload` - Save payload for the order API

pub mod payload;
pub mod types;
pub mod validation;

pub use payload::{OrderLinePayload, OrderPayload};
pub use types::{OrderTransaction, PartyType};
pub use validation::validate_order;
