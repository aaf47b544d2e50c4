//! Vouchers: entry resolution, validation, and save payloads.
//!
//! # Modules
//!
//! - `types` - Vouchers, entries, and account references
//! - `resolver` - Contra from/to resolution and entry rows
//! - `validation` - Field-keyed voucher validation
//! - `payload` - Save payloads for the voucher API
//! - `error` - Voucher errors

pub mod error;
pub mod payload;
pub mod resolver;
pub mod types;
pub mod validation;

pub use error::VoucherError;
pub use payload::{ContraVoucherPayload, SettlementVoucherPayload, VoucherPayload};
pub use resolver::{
    ContraAccounts, ContraTransfer, EntryRow, EntryTotals, ResolvedVoucher, VoucherEntryResolver,
};
pub use types::{
    AccountInput, AccountRecord, AccountRef, EntryLeg, Voucher, VoucherEntry, VoucherType,
};
pub use validation::validate_voucher;
