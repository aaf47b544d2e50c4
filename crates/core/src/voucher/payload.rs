//! Save payloads sent to the voucher API.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;
use tally_shared::types::PartyId;
use tally_shared::{AppError, AppResult};

use super::error::VoucherError;
use super::resolver::{ResolvedVoucher, VoucherEntryResolver};
use super::types::{Voucher, VoucherType};
use super::validation::validate_voucher;
use crate::allocation::InvoicePayment;

/// Payload for saving a contra voucher.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContraVoucherPayload {
    /// Voucher date.
    pub date: NaiveDate,
    /// Source account code.
    pub from_account: String,
    /// Destination account code.
    pub to_account: String,
    /// Transfer amount.
    pub total_amount: Decimal,
    /// Free-text narration.
    pub narration: String,
    /// Always `contra`.
    pub voucher_type: VoucherType,
}

/// Payload for saving a payment or receipt voucher.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SettlementVoucherPayload {
    /// Voucher date.
    pub date: NaiveDate,
    /// Customer on a receipt.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub customer_id: Option<PartyId>,
    /// Vendor on a payment.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vendor_id: Option<PartyId>,
    /// Amount applied to each invoice.
    pub linked_invoices: Vec<InvoicePayment>,
    /// Cash, bank, cheque, ...
    pub payment_mode: String,
    /// Sum of the linked amounts.
    pub total_amount: Decimal,
    /// Free-text narration.
    pub narration: String,
    /// `payment` or `receipt`.
    pub voucher_type: VoucherType,
}

/// A voucher save payload of either shape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum VoucherPayload {
    /// Contra transfer.
    Contra(ContraVoucherPayload),
    /// Payment or receipt.
    Settlement(SettlementVoucherPayload),
}

impl VoucherPayload {
    /// Validates the voucher and shapes it for the API.
    ///
    /// # Errors
    ///
    /// * `Validation` with the failing fields if the voucher is incomplete
    /// * `Validation` keyed by `voucherType` for journal vouchers
    pub fn build(voucher: &Voucher) -> AppResult<Self> {
        validate_voucher(voucher).into_result()?;

        let Some(date) = voucher.date else {
            return Err(AppError::Internal("validated voucher has no date".to_string()));
        };
        let total_amount = VoucherEntryResolver::display_total(voucher);

        match voucher.voucher_type {
            VoucherType::Contra => {
                let ResolvedVoucher::Contra(accounts) = VoucherEntryResolver::resolve(voucher)
                else {
                    return Err(AppError::Internal("contra voucher resolved to rows".to_string()));
                };
                let (Some(from), Some(to)) = (accounts.from_account, accounts.to_account) else {
                    return Err(AppError::Internal(
                        "validated contra voucher has no accounts".to_string(),
                    ));
                };
                Ok(Self::Contra(ContraVoucherPayload {
                    date,
                    from_account: from.account_code,
                    to_account: to.account_code,
                    total_amount,
                    narration: voucher.narration.clone(),
                    voucher_type: voucher.voucher_type,
                }))
            }
            VoucherType::Payment | VoucherType::Receipt => {
                let party = voucher.party_id().cloned();
                let (customer_id, vendor_id) = match voucher.voucher_type {
                    VoucherType::Payment => (None, party),
                    _ => (party, None),
                };
                Ok(Self::Settlement(SettlementVoucherPayload {
                    date,
                    customer_id,
                    vendor_id,
                    linked_invoices: voucher
                        .linked_invoices
                        .iter()
                        .map(InvoicePayment::from)
                        .collect(),
                    payment_mode: voucher
                        .payment_mode
                        .clone()
                        .unwrap_or_else(|| "cash".to_string()),
                    total_amount,
                    narration: voucher.narration.clone(),
                    voucher_type: voucher.voucher_type,
                }))
            }
            VoucherType::Journal => {
                Err(VoucherError::UnsupportedPayload(voucher.voucher_type.to_string()).into())
            }
        }
    }
}
