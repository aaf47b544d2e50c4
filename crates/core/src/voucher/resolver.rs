//! Debit/credit resolution for voucher entries.

use rust_decimal::Decimal;
use serde::Serialize;
use tally_shared::MoneyMath;
use tracing::warn;

use super::error::VoucherError;
use super::types::{AccountRef, EntryLeg, Voucher, VoucherEntry, VoucherType};

/// Source and destination of a contra voucher.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContraAccounts {
    /// The credited ("from") account.
    pub from_account: Option<AccountRef>,
    /// The debited ("to") account.
    pub to_account: Option<AccountRef>,
}

/// A fully resolved two-leg transfer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContraTransfer {
    /// The credited ("from") account.
    pub from_account: AccountRef,
    /// The debited ("to") account.
    pub to_account: AccountRef,
    /// The transferred amount.
    pub amount: Decimal,
}

/// One voucher entry laid out for tabular display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EntryRow {
    /// The entry's account.
    pub account: AccountRef,
    /// Debit amount.
    pub debit: Decimal,
    /// Credit amount.
    pub credit: Decimal,
    /// Tax amount, zero when absent.
    pub tax: Decimal,
    /// The debit if nonzero, otherwise the credit.
    pub line_amount: Decimal,
}

/// Debit and credit sums of a voucher.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EntryTotals {
    /// Sum of debit amounts.
    pub total_debit: Decimal,
    /// Sum of credit amounts.
    pub total_credit: Decimal,
    /// Whether debits equal credits.
    pub is_balanced: bool,
}

impl EntryTotals {
    /// Creates totals from debit and credit sums.
    #[must_use]
    pub fn new(total_debit: Decimal, total_credit: Decimal) -> Self {
        Self {
            total_debit,
            total_credit,
            is_balanced: total_debit == total_credit,
        }
    }

    /// Returns the difference between debits and credits.
    #[must_use]
    pub fn difference(&self) -> Decimal {
        self.total_debit - self.total_credit
    }
}

/// A voucher resolved according to its type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolvedVoucher {
    /// Contra vouchers resolve to a from/to pair.
    Contra(ContraAccounts),
    /// Payment, receipt, and journal vouchers resolve to rows.
    Lines(Vec<EntryRow>),
}

/// Stateless resolver over voucher entries.
pub struct VoucherEntryResolver;

impl VoucherEntryResolver {
    /// Finds the "from" (first credit) and "to" (first debit) accounts.
    ///
    /// Intended for two-leg contra vouchers. With more legs the first match
    /// per side wins and the rest are ignored; use
    /// [`Self::resolve_contra_strict`] to reject such vouchers instead.
    #[must_use]
    pub fn resolve_contra(entries: &[VoucherEntry]) -> ContraAccounts {
        if entries.len() > 2 {
            warn!(
                entries = entries.len(),
                "Multi-leg contra voucher resolved by first match"
            );
        }

        let from_account = entries
            .iter()
            .find(|e| e.credit_amount > Decimal::ZERO)
            .map(VoucherEntry::account);
        let to_account = entries
            .iter()
            .find(|e| e.debit_amount > Decimal::ZERO)
            .map(VoucherEntry::account);

        ContraAccounts {
            from_account,
            to_account,
        }
    }

    /// Resolves a contra voucher that has exactly one credit and one debit leg.
    ///
    /// # Errors
    ///
    /// * `MixedLeg` if an entry is both debit and credit
    /// * `MultiLegContra` if either side has more than one leg
    /// * `MissingLeg` if either side has no leg
    /// * `UnbalancedContra` if the two legs carry different amounts
    pub fn resolve_contra_strict(entries: &[VoucherEntry]) -> Result<ContraTransfer, VoucherError> {
        let mut credits = Vec::new();
        let mut debits = Vec::new();

        for (index, entry) in entries.iter().enumerate() {
            match entry.leg() {
                EntryLeg::Credit(amount) => credits.push((entry, amount)),
                EntryLeg::Debit(amount) => debits.push((entry, amount)),
                EntryLeg::Empty => {}
                EntryLeg::Mixed => return Err(VoucherError::MixedLeg { index }),
            }
        }

        if credits.len() > 1 || debits.len() > 1 {
            return Err(VoucherError::MultiLegContra {
                credit_legs: credits.len(),
                debit_legs: debits.len(),
            });
        }

        let (from, credit) = credits
            .first()
            .copied()
            .ok_or(VoucherError::MissingLeg { side: "credit" })?;
        let (to, debit) = debits
            .first()
            .copied()
            .ok_or(VoucherError::MissingLeg { side: "debit" })?;

        if debit != credit {
            return Err(VoucherError::UnbalancedContra { debit, credit });
        }

        Ok(ContraTransfer {
            from_account: from.account(),
            to_account: to.account(),
            amount: debit,
        })
    }

    /// Lays out every entry as a display row.
    #[must_use]
    pub fn entry_rows(entries: &[VoucherEntry]) -> Vec<EntryRow> {
        entries
            .iter()
            .map(|entry| EntryRow {
                account: entry.account(),
                debit: entry.debit_amount,
                credit: entry.credit_amount,
                tax: MoneyMath::or_zero(entry.tax_amount),
                line_amount: if entry.debit_amount.is_zero() {
                    entry.credit_amount
                } else {
                    entry.debit_amount
                },
            })
            .collect()
    }

    /// Sums debits and credits. Balance is reported, never enforced.
    #[must_use]
    pub fn entry_totals(entries: &[VoucherEntry]) -> EntryTotals {
        EntryTotals::new(
            MoneyMath::sum(entries.iter().map(|e| e.debit_amount)),
            MoneyMath::sum(entries.iter().map(|e| e.credit_amount)),
        )
    }

    /// Resolves a voucher according to its type.
    ///
    /// A contra voucher without entries falls back to its entered
    /// `fromAccount`/`toAccount`, normalised.
    #[must_use]
    pub fn resolve(voucher: &Voucher) -> ResolvedVoucher {
        match voucher.voucher_type {
            VoucherType::Contra if voucher.entries.is_empty() => {
                ResolvedVoucher::Contra(ContraAccounts {
                    from_account: voucher.from_account.as_ref().and_then(|a| a.normalize()),
                    to_account: voucher.to_account.as_ref().and_then(|a| a.normalize()),
                })
            }
            VoucherType::Contra => ResolvedVoucher::Contra(Self::resolve_contra(&voucher.entries)),
            VoucherType::Payment | VoucherType::Receipt | VoucherType::Journal => {
                ResolvedVoucher::Lines(Self::entry_rows(&voucher.entries))
            }
        }
    }

    /// The amount to display for a voucher, rounded to 2 decimal places.
    ///
    /// Entries take precedence: their debit side (or credit side when no
    /// debits exist). Without entries, the linked invoice amounts are summed.
    /// Without either, the stored total is used.
    #[must_use]
    pub fn display_total(voucher: &Voucher) -> Decimal {
        if !voucher.entries.is_empty() {
            let totals = Self::entry_totals(&voucher.entries);
            let side = if totals.total_debit.is_zero() {
                totals.total_credit
            } else {
                totals.total_debit
            };
            return MoneyMath::round2(side);
        }

        if !voucher.linked_invoices.is_empty() {
            return MoneyMath::sum_rounded(voucher.linked_invoices.iter().map(|l| l.amount));
        }

        MoneyMath::round2(MoneyMath::or_zero(voucher.total_amount))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::allocation::LinkedInvoiceAllocation;
    use crate::voucher::types::AccountInput;
    use rust_decimal_macros::dec;
    use tally_shared::types::InvoiceId;

    fn contra_entries() -> Vec<VoucherEntry> {
        vec![
            VoucherEntry::credit("1000", "Cash", dec!(100)),
            VoucherEntry::debit("1010", "Bank", dec!(100)),
        ]
    }

    #[test]
    fn test_resolve_contra() {
        let accounts = VoucherEntryResolver::resolve_contra(&contra_entries());
        assert_eq!(accounts.from_account.unwrap().account_code, "1000");
        assert_eq!(accounts.to_account.unwrap().account_code, "1010");
    }

    #[test]
    fn test_resolve_contra_ignores_order() {
        let mut entries = contra_entries();
        entries.reverse();
        let accounts = VoucherEntryResolver::resolve_contra(&entries);
        assert_eq!(accounts.from_account.unwrap().account_code, "1000");
        assert_eq!(accounts.to_account.unwrap().account_code, "1010");
    }

    #[test]
    fn test_resolve_contra_missing_side() {
        let accounts =
            VoucherEntryResolver::resolve_contra(&[VoucherEntry::debit("1010", "Bank", dec!(5))]);
        assert!(accounts.from_account.is_none());
        assert!(accounts.to_account.is_some());
    }

    #[test]
    fn test_resolve_contra_first_match_on_multi_leg() {
        let entries = vec![
            VoucherEntry::credit("1000", "Cash", dec!(60)),
            VoucherEntry::credit("1001", "Petty cash", dec!(40)),
            VoucherEntry::debit("1010", "Bank", dec!(100)),
        ];
        let accounts = VoucherEntryResolver::resolve_contra(&entries);
        assert_eq!(accounts.from_account.unwrap().account_code, "1000");
    }

    #[test]
    fn test_strict_resolution() {
        let transfer = VoucherEntryResolver::resolve_contra_strict(&contra_entries()).unwrap();
        assert_eq!(transfer.amount, dec!(100));
        assert_eq!(transfer.from_account.account_code, "1000");
        assert_eq!(transfer.to_account.account_code, "1010");
    }

    #[test]
    fn test_strict_rejects_multi_leg() {
        let entries = vec![
            VoucherEntry::credit("1000", "Cash", dec!(60)),
            VoucherEntry::credit("1001", "Petty cash", dec!(40)),
            VoucherEntry::debit("1010", "Bank", dec!(100)),
        ];
        assert!(matches!(
            VoucherEntryResolver::resolve_contra_strict(&entries),
            Err(VoucherError::MultiLegContra {
                credit_legs: 2,
                debit_legs: 1
            })
        ));
    }

    #[test]
    fn test_strict_rejects_missing_and_mixed() {
        assert!(matches!(
            VoucherEntryResolver::resolve_contra_strict(&[VoucherEntry::debit("1", "A", dec!(1))]),
            Err(VoucherError::MissingLeg { side: "credit" })
        ));

        let mut mixed = VoucherEntry::debit("1", "A", dec!(1));
        mixed.credit_amount = dec!(1);
        assert!(matches!(
            VoucherEntryResolver::resolve_contra_strict(&[mixed]),
            Err(VoucherError::MixedLeg { index: 0 })
        ));
    }

    #[test]
    fn test_strict_rejects_unbalanced() {
        let entries = vec![
            VoucherEntry::credit("1000", "Cash", dec!(100)),
            VoucherEntry::debit("1010", "Bank", dec!(90)),
        ];
        assert!(matches!(
            VoucherEntryResolver::resolve_contra_strict(&entries),
            Err(VoucherError::UnbalancedContra { .. })
        ));
    }

    #[test]
    fn test_entry_rows() {
        let mut entries = vec![
            VoucherEntry::debit("5000", "Rent", dec!(1000)),
            VoucherEntry::credit("1010", "Bank", dec!(1050)),
        ];
        entries[0].tax_amount = Some(dec!(50));
        let rows = VoucherEntryResolver::entry_rows(&entries);
        assert_eq!(rows[0].line_amount, dec!(1000));
        assert_eq!(rows[0].tax, dec!(50));
        assert_eq!(rows[1].line_amount, dec!(1050));
        assert_eq!(rows[1].tax, Decimal::ZERO);
    }

    #[test]
    fn test_entry_totals() {
        let totals = VoucherEntryResolver::entry_totals(&contra_entries());
        assert!(totals.is_balanced);
        assert_eq!(totals.difference(), Decimal::ZERO);
    }

    #[test]
    fn test_resolve_dispatches_on_type() {
        let mut voucher = Voucher::new(VoucherType::Contra);
        voucher.entries = contra_entries();
        assert!(matches!(
            VoucherEntryResolver::resolve(&voucher),
            ResolvedVoucher::Contra(_)
        ));

        voucher.voucher_type = VoucherType::Journal;
        match VoucherEntryResolver::resolve(&voucher) {
            ResolvedVoucher::Lines(rows) => assert_eq!(rows.len(), 2),
            other => panic!("unexpected resolution: {other:?}"),
        }
    }

    #[test]
    fn test_resolve_contra_from_entered_accounts() {
        let mut voucher = Voucher::new(VoucherType::Contra);
        voucher.from_account = Some(AccountInput::Code("1000".to_string()));
        voucher.to_account = Some(AccountInput::Code("1010".to_string()));
        match VoucherEntryResolver::resolve(&voucher) {
            ResolvedVoucher::Contra(accounts) => {
                assert_eq!(accounts.from_account.unwrap().account_code, "1000");
                assert_eq!(accounts.to_account.unwrap().account_code, "1010");
            }
            other => panic!("unexpected resolution: {other:?}"),
        }
    }

    #[test]
    fn test_display_total_precedence() {
        let mut voucher = Voucher::new(VoucherType::Receipt);
        voucher.total_amount = Some(dec!(10));
        assert_eq!(VoucherEntryResolver::display_total(&voucher), dec!(10.00));

        voucher.linked_invoices = vec![
            LinkedInvoiceAllocation {
                invoice_id: InvoiceId::new("A"),
                amount: dec!(25),
                balance: Decimal::ZERO,
            },
            LinkedInvoiceAllocation {
                invoice_id: InvoiceId::new("B"),
                amount: dec!(15.5),
                balance: Decimal::ZERO,
            },
        ];
        assert_eq!(VoucherEntryResolver::display_total(&voucher), dec!(40.50));

        voucher.entries = vec![
            VoucherEntry::debit("1010", "Bank", dec!(41)),
            VoucherEntry::credit("1200", "Receivables", dec!(41)),
        ];
        assert_eq!(VoucherEntryResolver::display_total(&voucher), dec!(41.00));
    }
}
