//! Field-level validation of vouchers before they are saved.

use std::collections::HashSet;

use rust_decimal::Decimal;
use tally_shared::{FieldErrors, MoneyMath};

use super::resolver::{ResolvedVoucher, VoucherEntryResolver};
use super::types::{EntryLeg, Voucher, VoucherType};

/// Validates a voucher, collecting every failing field.
///
/// Never fails itself: an empty map means the voucher may be saved.
/// Balance of debits against credits is not checked here.
#[must_use]
pub fn validate_voucher(voucher: &Voucher) -> FieldErrors {
    let mut errors = FieldErrors::new();

    if voucher.date.is_none() {
        errors.add("date", "Date is required");
    }

    check_entries(voucher, &mut errors);

    match voucher.voucher_type {
        VoucherType::Contra => check_contra(voucher, &mut errors),
        VoucherType::Payment | VoucherType::Receipt => check_settlement(voucher, &mut errors),
        VoucherType::Journal => check_journal(voucher, &mut errors),
    }

    errors
}

fn check_entries(voucher: &Voucher, errors: &mut FieldErrors) {
    for (index, entry) in voucher.entries.iter().enumerate() {
        let field = format!("entries[{index}]");
        if entry.debit_amount < Decimal::ZERO || entry.credit_amount < Decimal::ZERO {
            errors.add(field, "Amounts cannot be negative");
        } else if entry.leg() == EntryLeg::Mixed {
            errors.add(field, "Entry must be either a debit or a credit");
        }
    }
}

fn voucher_amount(voucher: &Voucher) -> Decimal {
    match voucher.total_amount {
        Some(total) if voucher.entries.is_empty() && voucher.linked_invoices.is_empty() => total,
        _ => VoucherEntryResolver::display_total(voucher),
    }
}

fn check_amount(voucher: &Voucher, errors: &mut FieldErrors) {
    if voucher_amount(voucher) <= Decimal::ZERO {
        errors.add("totalAmount", "Amount must be greater than zero");
    }
}

fn check_contra(voucher: &Voucher, errors: &mut FieldErrors) {
    if !voucher.entries.is_empty() {
        if let Err(err) = VoucherEntryResolver::resolve_contra_strict(&voucher.entries) {
            errors.add(err.field(), err.to_string());
        }
    }

    let ResolvedVoucher::Contra(accounts) = VoucherEntryResolver::resolve(voucher) else {
        return;
    };

    let sides = [
        ("fromAccount", "From", &accounts.from_account),
        ("toAccount", "To", &accounts.to_account),
    ];
    for (field, side, account) in sides {
        match account {
            None => errors.add(field, format!("{side} account is required")),
            Some(account) if account.account_code.is_empty() => {
                errors.add(field, format!("{side} account has no code"));
            }
            Some(_) => {}
        }
    }
    if let (Some(from), Some(to)) = (&accounts.from_account, &accounts.to_account) {
        if from.same_account(to) {
            errors.add("toAccount", "From and To accounts must be different");
        }
    }

    check_amount(voucher, errors);
}

fn check_settlement(voucher: &Voucher, errors: &mut FieldErrors) {
    if voucher.party_id().is_none_or(|p| p.is_blank()) {
        match voucher.voucher_type {
            VoucherType::Payment => errors.add("vendorId", "Vendor is required"),
            _ => errors.add("customerId", "Customer is required"),
        }
    }

    if voucher.entries.is_empty() && voucher.linked_invoices.is_empty() {
        errors.add("linkedInvoices", "Select at least one invoice");
    }

    let mut seen = HashSet::new();
    for row in &voucher.linked_invoices {
        if !seen.insert(&row.invoice_id) {
            errors.add(
                "linkedInvoices",
                format!("Invoice {} is linked more than once", row.invoice_id),
            );
        }
        if row.amount < Decimal::ZERO {
            errors.add(
                "linkedInvoices",
                format!("Amount for invoice {} cannot be negative", row.invoice_id),
            );
        }
    }

    check_amount(voucher, errors);

    if let Some(total) = voucher.total_amount {
        if !voucher.linked_invoices.is_empty() {
            let allocated = MoneyMath::sum(voucher.linked_invoices.iter().map(|l| l.amount));
            if allocated != total {
                errors.add(
                    "totalAmount",
                    "Total must equal the sum of linked invoice amounts",
                );
            }
        }
    }
}

fn check_journal(voucher: &Voucher, errors: &mut FieldErrors) {
    let legs = voucher
        .entries
        .iter()
        .filter(|e| matches!(e.leg(), EntryLeg::Debit(_) | EntryLeg::Credit(_)))
        .count();
    if legs < 2 {
        errors.add("entries", "At least two entries are required");
    }

    check_amount(voucher, errors);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::allocation::LinkedInvoiceAllocation;
    use crate::voucher::types::{AccountInput, AccountRecord, VoucherEntry};
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;
    use tally_shared::types::{AccountId, InvoiceId, PartyId};

    fn date() -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(2024, 3, 31)
    }

    fn contra(from: &str, to: &str, amount: Decimal) -> Voucher {
        let mut voucher = Voucher::new(VoucherType::Contra);
        voucher.date = date();
        voucher.from_account = Some(AccountInput::Code(from.to_string()));
        voucher.to_account = Some(AccountInput::Code(to.to_string()));
        voucher.total_amount = Some(amount);
        voucher
    }

    fn linked(id: &str, amount: Decimal) -> LinkedInvoiceAllocation {
        LinkedInvoiceAllocation {
            invoice_id: InvoiceId::new(id),
            amount,
            balance: Decimal::ZERO,
        }
    }

    #[test]
    fn test_valid_contra() {
        assert!(validate_voucher(&contra("1000", "1010", dec!(500))).is_empty());
    }

    #[test]
    fn test_contra_same_accounts() {
        let errors = validate_voucher(&contra("1000", "1000", dec!(500)));
        assert_eq!(
            errors.get("toAccount"),
            Some("From and To accounts must be different")
        );
    }

    #[test]
    fn test_contra_missing_everything() {
        let errors = validate_voucher(&Voucher::new(VoucherType::Contra));
        assert!(errors.contains("date"));
        assert!(errors.contains("fromAccount"));
        assert!(errors.contains("toAccount"));
        assert!(errors.contains("totalAmount"));
    }

    #[test]
    fn test_contra_account_without_code() {
        let mut voucher = contra("1000", "1010", dec!(500));
        voucher.from_account = Some(AccountInput::Record(AccountRecord {
            account_id: Some(AccountId::new("acc-1000")),
            account_code: Some("  ".to_string()),
            account_name: Some("Cash".to_string()),
        }));

        let errors = validate_voucher(&voucher);
        assert_eq!(errors.get("fromAccount"), Some("From account has no code"));
        assert!(!errors.contains("toAccount"));
    }

    #[test]
    fn test_contra_zero_amount() {
        let errors = validate_voucher(&contra("1000", "1010", Decimal::ZERO));
        assert_eq!(errors.get("totalAmount"), Some("Amount must be greater than zero"));
    }

    #[test]
    fn test_contra_multi_leg_entries_rejected() {
        let mut voucher = Voucher::new(VoucherType::Contra);
        voucher.date = date();
        voucher.entries = vec![
            VoucherEntry::credit("1000", "Cash", dec!(60)),
            VoucherEntry::credit("1001", "Petty cash", dec!(40)),
            VoucherEntry::debit("1010", "Bank", dec!(100)),
        ];
        let errors = validate_voucher(&voucher);
        assert!(errors.contains("entries"));
    }

    #[test]
    fn test_valid_receipt() {
        let mut voucher = Voucher::new(VoucherType::Receipt);
        voucher.date = date();
        voucher.customer_id = Some(PartyId::new("C-1"));
        voucher.linked_invoices = vec![linked("A", dec!(50)), linked("B", dec!(30))];
        voucher.total_amount = Some(dec!(80));
        assert!(validate_voucher(&voucher).is_empty());
    }

    #[test]
    fn test_receipt_problems() {
        let mut voucher = Voucher::new(VoucherType::Receipt);
        voucher.date = date();
        voucher.linked_invoices = vec![linked("A", dec!(50)), linked("A", dec!(30))];
        voucher.total_amount = Some(dec!(100));
        let errors = validate_voucher(&voucher);
        assert_eq!(errors.get("customerId"), Some("Customer is required"));
        assert!(errors.contains("linkedInvoices"));
        assert_eq!(
            errors.get("totalAmount"),
            Some("Total must equal the sum of linked invoice amounts")
        );
    }

    #[test]
    fn test_payment_needs_vendor_and_invoices() {
        let mut voucher = Voucher::new(VoucherType::Payment);
        voucher.date = date();
        let errors = validate_voucher(&voucher);
        assert_eq!(errors.get("vendorId"), Some("Vendor is required"));
        assert_eq!(errors.get("linkedInvoices"), Some("Select at least one invoice"));
        assert!(errors.contains("totalAmount"));
    }

    #[test]
    fn test_journal_needs_two_legs() {
        let mut voucher = Voucher::new(VoucherType::Journal);
        voucher.date = date();
        voucher.entries = vec![VoucherEntry::debit("5000", "Rent", dec!(10))];
        let errors = validate_voucher(&voucher);
        assert!(errors.contains("entries"));

        voucher
            .entries
            .push(VoucherEntry::credit("1010", "Bank", dec!(10)));
        assert!(validate_voucher(&voucher).is_empty());
    }

    #[test]
    fn test_mixed_and_negative_entries() {
        let mut voucher = Voucher::new(VoucherType::Journal);
        voucher.date = date();
        let mut mixed = VoucherEntry::debit("5000", "Rent", dec!(10));
        mixed.credit_amount = dec!(10);
        voucher.entries = vec![
            mixed,
            VoucherEntry::credit("1010", "Bank", dec!(-10)),
        ];
        let errors = validate_voucher(&voucher);
        assert_eq!(
            errors.get("entries[0]"),
            Some("Entry must be either a debit or a credit")
        );
        assert_eq!(errors.get("entries[1]"), Some("Amounts cannot be negative"));
    }
}
