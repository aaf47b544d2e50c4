//! Allocation of a payment or receipt across linked invoices.

use rust_decimal::Decimal;
use tally_shared::MoneyMath;
use tally_shared::types::InvoiceId;
use tracing::debug;

use super::error::AllocationError;
use super::types::{InvoicePayment, LinkedInvoiceAllocation, OpenInvoice, ToggleOutcome};

#[derive(Debug, Clone, PartialEq, Eq)]
struct AllocationLine {
    invoice_id: InvoiceId,
    invoice_total: Decimal,
    amount: Decimal,
    balance: Decimal,
}

impl AllocationLine {
    fn to_linked(&self) -> LinkedInvoiceAllocation {
        LinkedInvoiceAllocation {
            invoice_id: self.invoice_id.clone(),
            amount: self.amount,
            balance: self.balance,
        }
    }
}

/// Tracks which invoices one voucher settles, and by how much.
///
/// One ledger per voucher being edited; the caller owns it exclusively.
/// Invoices keep their selection order and appear at most once.
/// Every allocated amount stays within `0..=invoice_total`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InvoiceAllocationLedger {
    lines: Vec<AllocationLine>,
}

impl InvoiceAllocationLedger {
    /// Creates an empty ledger.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuilds a ledger from a saved voucher's linked invoices.
    ///
    /// `invoices` supplies the totals used as allocation ceilings.
    ///
    /// # Errors
    ///
    /// Fails if a linked invoice is unknown, listed twice, or carries an
    /// amount outside `0..=invoice_total`.
    pub fn from_existing(
        invoices: &[OpenInvoice],
        linked: &[LinkedInvoiceAllocation],
    ) -> Result<Self, AllocationError> {
        let mut ledger = Self::new();

        for row in linked {
            if ledger.is_selected(&row.invoice_id) {
                return Err(AllocationError::DuplicateInvoice(row.invoice_id.clone()));
            }

            let invoice = invoices
                .iter()
                .find(|i| i.invoice_id == row.invoice_id)
                .ok_or_else(|| AllocationError::InvoiceNotFound(row.invoice_id.clone()))?;

            check_invoice_total(invoice)?;
            check_amount(&row.invoice_id, row.amount, invoice.invoice_total)?;

            ledger.lines.push(AllocationLine {
                invoice_id: row.invoice_id.clone(),
                invoice_total: invoice.invoice_total,
                amount: row.amount,
                balance: row.balance,
            });
        }

        Ok(ledger)
    }

    /// Adds the invoice if absent, removes it if present.
    ///
    /// On add the allocated amount defaults to the invoice total and the
    /// balance is taken from the invoice record as supplied.
    ///
    /// # Errors
    ///
    /// Fails with `NegativeInvoiceTotal` if an invoice being added has a
    /// negative total.
    pub fn toggle_invoice(
        &mut self,
        invoice: &OpenInvoice,
    ) -> Result<ToggleOutcome, AllocationError> {
        if let Some(pos) = self.position(&invoice.invoice_id) {
            self.lines.remove(pos);
            debug!(invoice_id = %invoice.invoice_id, "Invoice removed from allocation");
            return Ok(ToggleOutcome::Removed);
        }

        check_invoice_total(invoice)?;

        self.lines.push(AllocationLine {
            invoice_id: invoice.invoice_id.clone(),
            invoice_total: invoice.invoice_total,
            amount: invoice.invoice_total,
            balance: invoice.balance,
        });
        debug!(
            invoice_id = %invoice.invoice_id,
            amount = %invoice.invoice_total,
            "Invoice added to allocation"
        );

        Ok(ToggleOutcome::Added {
            amount: invoice.invoice_total,
        })
    }

    /// Overwrites the amount allocated to a selected invoice.
    ///
    /// # Errors
    ///
    /// * `NotSelected` if the invoice is not in the allocation set
    /// * `OutOfRange` if `amount` is negative or exceeds the invoice total
    pub fn set_allocation_amount(
        &mut self,
        invoice_id: &InvoiceId,
        amount: Decimal,
    ) -> Result<(), AllocationError> {
        let line = self.line_mut(invoice_id)?;
        check_amount(invoice_id, amount, line.invoice_total)?;
        line.amount = amount;
        debug!(invoice_id = %invoice_id, amount = %amount, "Allocation amount set");
        Ok(())
    }

    /// Replaces the externally supplied balance of a selected invoice.
    ///
    /// # Errors
    ///
    /// Fails with `NotSelected` if the invoice is not in the allocation set.
    pub fn set_balance(
        &mut self,
        invoice_id: &InvoiceId,
        balance: Decimal,
    ) -> Result<(), AllocationError> {
        self.line_mut(invoice_id)?.balance = balance;
        Ok(())
    }

    /// Spreads `amount` over the selected invoices in selection order,
    /// filling each up to its total. Invoices beyond the amount get zero.
    ///
    /// # Errors
    ///
    /// Fails with `NegativeAmount` for a negative amount and `ExceedsCapacity`
    /// when the amount is larger than the sum of selected invoice totals.
    /// The ledger is unchanged on error.
    pub fn auto_allocate(&mut self, amount: Decimal) -> Result<(), AllocationError> {
        if amount < Decimal::ZERO {
            return Err(AllocationError::NegativeAmount(amount));
        }

        let capacity = self.capacity();
        if amount > capacity {
            return Err(AllocationError::ExceedsCapacity { amount, capacity });
        }

        let mut remaining = amount;
        for line in &mut self.lines {
            let portion = remaining.min(line.invoice_total);
            line.amount = portion;
            remaining -= portion;
        }
        debug!(amount = %amount, invoices = self.lines.len(), "Amount auto-allocated");

        Ok(())
    }

    /// Sum of allocated amounts. Becomes the voucher's `totalAmount` on save.
    #[must_use]
    pub fn total_allocated(&self) -> Decimal {
        MoneyMath::sum(self.lines.iter().map(|l| l.amount))
    }

    /// Checks that the allocations add up to the voucher total.
    ///
    /// # Errors
    ///
    /// Fails with `Unreconciled` when the figures differ.
    pub fn reconcile(&self, voucher_total: Decimal) -> Result<(), AllocationError> {
        let allocated = self.total_allocated();
        if allocated == voucher_total {
            Ok(())
        } else {
            Err(AllocationError::Unreconciled {
                allocated,
                expected: voucher_total,
            })
        }
    }

    /// Returns true if the invoice is in the allocation set.
    #[must_use]
    pub fn is_selected(&self, invoice_id: &InvoiceId) -> bool {
        self.position(invoice_id).is_some()
    }

    /// Amount allocated to an invoice, if selected.
    #[must_use]
    pub fn amount_for(&self, invoice_id: &InvoiceId) -> Option<Decimal> {
        self.position(invoice_id).map(|pos| self.lines[pos].amount)
    }

    /// Number of selected invoices.
    #[must_use]
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Returns true if no invoice is selected.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Deselects every invoice.
    pub fn clear(&mut self) {
        self.lines.clear();
    }

    /// The allocation set as `linkedInvoices` rows.
    #[must_use]
    pub fn linked_invoices(&self) -> Vec<LinkedInvoiceAllocation> {
        self.lines.iter().map(AllocationLine::to_linked).collect()
    }

    /// The allocation set as save-payload rows.
    #[must_use]
    pub fn payload_rows(&self) -> Vec<InvoicePayment> {
        self.lines
            .iter()
            .map(|l| InvoicePayment {
                invoice_id: l.invoice_id.clone(),
                amount: l.amount,
            })
            .collect()
    }

    fn capacity(&self) -> Decimal {
        MoneyMath::sum(self.lines.iter().map(|l| l.invoice_total))
    }

    fn position(&self, invoice_id: &InvoiceId) -> Option<usize> {
        self.lines.iter().position(|l| &l.invoice_id == invoice_id)
    }

    fn line_mut(&mut self, invoice_id: &InvoiceId) -> Result<&mut AllocationLine, AllocationError> {
        self.lines
            .iter_mut()
            .find(|l| &l.invoice_id == invoice_id)
            .ok_or_else(|| AllocationError::NotSelected(invoice_id.clone()))
    }
}

fn check_invoice_total(invoice: &OpenInvoice) -> Result<(), AllocationError> {
    if invoice.invoice_total < Decimal::ZERO {
        return Err(AllocationError::NegativeInvoiceTotal {
            invoice_id: invoice.invoice_id.clone(),
            total: invoice.invoice_total,
        });
    }
    Ok(())
}

fn check_amount(
    invoice_id: &InvoiceId,
    amount: Decimal,
    max: Decimal,
) -> Result<(), AllocationError> {
    if amount < Decimal::ZERO || amount > max {
        return Err(AllocationError::OutOfRange {
            invoice_id: invoice_id.clone(),
            amount,
            max,
        });
    }
    Ok(())
}
