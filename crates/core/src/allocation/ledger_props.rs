//! Property-based tests for the allocation ledger.
//!
//! Random sequences of toggle/set/auto-allocate operations must preserve:
//! - `total_allocated() == sum(linked_invoices().amount)`
//! - every invoice appears at most once
//! - every amount stays within `0..=invoice_total`

use std::collections::HashSet;

use proptest::prelude::*;
use rust_decimal::Decimal;
use tally_shared::types::InvoiceId;

use super::ledger::InvoiceAllocationLedger;
use super::types::OpenInvoice;

#[derive(Debug, Clone)]
enum Op {
    Toggle(usize),
    Set(usize, Decimal),
    Auto(Decimal),
}

/// A fixed pool of invoices with totals between 0.00 and 10,000.00.
fn invoice_pool() -> impl Strategy<Value = Vec<OpenInvoice>> {
    prop::collection::vec(0i64..1_000_000i64, 1..8).prop_map(|totals| {
        totals
            .into_iter()
            .enumerate()
            .map(|(i, cents)| {
                let total = Decimal::new(cents, 2);
                OpenInvoice::new(format!("INV-{i}"), total, total)
            })
            .collect()
    })
}

/// Amounts from -100.00 to 12,000.00, so some fall out of range.
fn amount() -> impl Strategy<Value = Decimal> {
    (-10_000i64..1_200_000i64).prop_map(|cents| Decimal::new(cents, 2))
}

fn op() -> impl Strategy<Value = Op> {
    prop_oneof![
        4 => (0usize..8).prop_map(Op::Toggle),
        4 => (0usize..8, amount()).prop_map(|(i, a)| Op::Set(i, a)),
        1 => amount().prop_map(Op::Auto),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    #[test]
    fn prop_ledger_invariants_hold(
        pool in invoice_pool(),
        ops in prop::collection::vec(op(), 0..40),
    ) {
        let mut ledger = InvoiceAllocationLedger::new();

        for op in ops {
            // Errors are expected for out-of-range inputs; invariants must hold regardless.
            match op {
                Op::Toggle(i) => {
                    let _ = ledger.toggle_invoice(&pool[i % pool.len()]);
                }
                Op::Set(i, amount) => {
                    let id = &pool[i % pool.len()].invoice_id;
                    let _ = ledger.set_allocation_amount(id, amount);
                }
                Op::Auto(amount) => {
                    let _ = ledger.auto_allocate(amount);
                }
            }

            let linked = ledger.linked_invoices();
            let sum: Decimal = linked.iter().map(|l| l.amount).sum();
            prop_assert_eq!(ledger.total_allocated(), sum);

            let unique: HashSet<&InvoiceId> = linked.iter().map(|l| &l.invoice_id).collect();
            prop_assert_eq!(unique.len(), linked.len());

            for row in &linked {
                let invoice = pool.iter().find(|i| i.invoice_id == row.invoice_id).unwrap();
                prop_assert!(row.amount >= Decimal::ZERO);
                prop_assert!(row.amount <= invoice.invoice_total);
            }
        }
    }

    /// A successful auto-allocation always reconciles to the requested amount.
    #[test]
    fn prop_auto_allocate_reconciles(pool in invoice_pool(), pick in 0u32..=100) {
        let mut ledger = InvoiceAllocationLedger::new();
        for invoice in &pool {
            ledger.toggle_invoice(invoice).unwrap();
        }
        let capacity: Decimal = pool.iter().map(|i| i.invoice_total).sum();
        let amount = (capacity * Decimal::from(pick) / Decimal::ONE_HUNDRED).round_dp(2);

        ledger.auto_allocate(amount).unwrap();
        prop_assert!(ledger.reconcile(amount).is_ok());
    }
}
