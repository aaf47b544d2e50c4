//! Voucher domain types.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use tally_shared::types::{AccountId, PartyId};

use crate::allocation::{InvoiceAllocationLedger, LinkedInvoiceAllocation};

/// Voucher classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VoucherType {
    /// Transfer between two of the organisation's own accounts.
    Contra,
    /// Money paid out, usually to a vendor.
    Payment,
    /// Money received, usually from a customer.
    Receipt,
    /// General journal.
    Journal,
}

impl VoucherType {
    /// Returns the string representation of the type.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Contra => "contra",
            Self::Payment => "payment",
            Self::Receipt => "receipt",
            Self::Journal => "journal",
        }
    }

    /// Returns true for vouchers that settle invoices.
    #[must_use]
    pub fn is_settlement(&self) -> bool {
        matches!(self, Self::Payment | Self::Receipt)
    }
}

impl fmt::Display for VoucherType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A normalised account reference.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountRef {
    /// Account identifier, when known.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub account_id: Option<AccountId>,
    /// Account code.
    pub account_code: String,
    /// Account name, when known.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub account_name: Option<String>,
}

impl AccountRef {
    /// A reference known only by its code.
    #[must_use]
    pub fn from_code(code: impl Into<String>) -> Self {
        Self {
            account_id: None,
            account_code: code.into().trim().to_string(),
            account_name: None,
        }
    }

    /// Returns true if both references point at the same account.
    ///
    /// Identifiers win when both sides carry one; otherwise codes are
    /// compared case-insensitively.
    #[must_use]
    pub fn same_account(&self, other: &Self) -> bool {
        match (&self.account_id, &other.account_id) {
            (Some(a), Some(b)) => a == b,
            _ => {
                !self.account_code.is_empty()
                    && self.account_code.eq_ignore_ascii_case(&other.account_code)
            }
        }
    }
}

/// A populated account object as sent by some call paths.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountRecord {
    /// Account identifier.
    #[serde(default, alias = "_id", alias = "id")]
    pub account_id: Option<AccountId>,
    /// Account code.
    #[serde(default, alias = "code")]
    pub account_code: Option<String>,
    /// Account name.
    #[serde(default, alias = "name")]
    pub account_name: Option<String>,
}

/// An account as it arrives on the wire: a bare code or a populated object.
///
/// Normalise it with [`AccountInput::normalize`] before any business logic.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AccountInput {
    /// Account code only.
    Code(String),
    /// Populated account object.
    Record(AccountRecord),
}

impl AccountInput {
    /// Converts to an [`AccountRef`] without any lookup.
    ///
    /// Returns `None` when no code or identifier is present.
    #[must_use]
    pub fn normalize(&self) -> Option<AccountRef> {
        self.normalize_with(|_| None)
    }

    /// Converts to an [`AccountRef`], resolving bare codes through `lookup`.
    ///
    /// A code the lookup does not know still yields a code-only reference.
    pub fn normalize_with<F>(&self, lookup: F) -> Option<AccountRef>
    where
        F: Fn(&str) -> Option<AccountRef>,
    {
        match self {
            Self::Code(code) => {
                let code = code.trim();
                if code.is_empty() {
                    return None;
                }
                Some(lookup(code).unwrap_or_else(|| AccountRef::from_code(code)))
            }
            Self::Record(record) => {
                let code = record
                    .account_code
                    .as_deref()
                    .map(str::trim)
                    .unwrap_or_default()
                    .to_string();
                if code.is_empty() && record.account_id.is_none() {
                    return None;
                }
                Some(AccountRef {
                    account_id: record.account_id.clone(),
                    account_code: code,
                    account_name: record.account_name.clone(),
                })
            }
        }
    }
}

/// How a single entry posts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryLeg {
    /// Pure debit.
    Debit(Decimal),
    /// Pure credit.
    Credit(Decimal),
    /// Neither side carries an amount.
    Empty,
    /// Both sides carry an amount.
    Mixed,
}

/// One ledger line of a voucher.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VoucherEntry {
    /// Account identifier, when known.
    #[serde(default)]
    pub account_id: Option<AccountId>,
    /// Account code.
    #[serde(default)]
    pub account_code: String,
    /// Account name.
    #[serde(default)]
    pub account_name: String,
    /// Debit amount, zero for a credit leg.
    #[serde(default)]
    pub debit_amount: Decimal,
    /// Credit amount, zero for a debit leg.
    #[serde(default)]
    pub credit_amount: Decimal,
    /// Tax carried on the line, if any.
    #[serde(default)]
    pub tax_amount: Option<Decimal>,
}

impl VoucherEntry {
    /// A debit leg.
    #[must_use]
    pub fn debit(code: impl Into<String>, name: impl Into<String>, amount: Decimal) -> Self {
        Self {
            account_code: code.into(),
            account_name: name.into(),
            debit_amount: amount,
            ..Self::default()
        }
    }

    /// A credit leg.
    #[must_use]
    pub fn credit(code: impl Into<String>, name: impl Into<String>, amount: Decimal) -> Self {
        Self {
            account_code: code.into(),
            account_name: name.into(),
            credit_amount: amount,
            ..Self::default()
        }
    }

    /// Classifies the entry.
    #[must_use]
    pub fn leg(&self) -> EntryLeg {
        let has_debit = !self.debit_amount.is_zero();
        let has_credit = !self.credit_amount.is_zero();
        match (has_debit, has_credit) {
            (true, false) => EntryLeg::Debit(self.debit_amount),
            (false, true) => EntryLeg::Credit(self.credit_amount),
            (false, false) => EntryLeg::Empty,
            (true, true) => EntryLeg::Mixed,
        }
    }

    /// The entry's account as a normalised reference.
    #[must_use]
    pub fn account(&self) -> AccountRef {
        AccountRef {
            account_id: self.account_id.clone(),
            account_code: self.account_code.trim().to_string(),
            account_name: if self.account_name.is_empty() {
                None
            } else {
                Some(self.account_name.clone())
            },
        }
    }
}

/// A recorded cash or bank movement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Voucher {
    /// Voucher number, assigned by the persistence collaborator.
    #[serde(default)]
    pub voucher_no: Option<String>,
    /// Voucher date.
    #[serde(default)]
    pub date: Option<NaiveDate>,
    /// Voucher classification.
    pub voucher_type: VoucherType,
    /// Ledger lines.
    #[serde(default)]
    pub entries: Vec<VoucherEntry>,
    /// Free-text narration.
    #[serde(default)]
    pub narration: String,
    /// Invoices settled by a payment or receipt.
    #[serde(default)]
    pub linked_invoices: Vec<LinkedInvoiceAllocation>,
    /// Stored voucher total.
    #[serde(default)]
    pub total_amount: Option<Decimal>,
    /// Contra source account, as entered.
    #[serde(default)]
    pub from_account: Option<AccountInput>,
    /// Contra destination account, as entered.
    #[serde(default)]
    pub to_account: Option<AccountInput>,
    /// Customer for a receipt.
    #[serde(default)]
    pub customer_id: Option<PartyId>,
    /// Vendor for a payment.
    #[serde(default)]
    pub vendor_id: Option<PartyId>,
    /// Cash, bank, cheque, ...
    #[serde(default)]
    pub payment_mode: Option<String>,
}

impl Voucher {
    /// An empty voucher of the given type.
    #[must_use]
    pub fn new(voucher_type: VoucherType) -> Self {
        Self {
            voucher_no: None,
            date: None,
            voucher_type,
            entries: Vec::new(),
            narration: String::new(),
            linked_invoices: Vec::new(),
            total_amount: None,
            from_account: None,
            to_account: None,
            customer_id: None,
            vendor_id: None,
            payment_mode: None,
        }
    }

    /// Copies the ledger's allocations onto the voucher and sets the voucher
    /// total to the allocated sum.
    pub fn apply_allocations(&mut self, ledger: &InvoiceAllocationLedger) {
        self.linked_invoices = ledger.linked_invoices();
        self.total_amount = Some(ledger.total_allocated());
    }

    /// The settling party: the vendor on a payment, the customer on a receipt.
    #[must_use]
    pub fn party_id(&self) -> Option<&PartyId> {
        match self.voucher_type {
            VoucherType::Payment => self.vendor_id.as_ref().or(self.customer_id.as_ref()),
            VoucherType::Receipt => self.customer_id.as_ref().or(self.vendor_id.as_ref()),
            VoucherType::Contra | VoucherType::Journal => None,
        }
    }
}
