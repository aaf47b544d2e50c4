//! Property-based tests for line item totals.

use proptest::prelude::*;
use rust_decimal::Decimal;
use tally_shared::MoneyMath;

use super::service::LineItemTotals;
use super::types::LineItem;

/// Signed quantities with up to 3 decimals (-10,000.000 to 10,000.000).
fn quantity() -> impl Strategy<Value = Decimal> {
    (-10_000_000i64..10_000_000i64).prop_map(|v| Decimal::new(v, 3))
}

/// Non-negative unit rates (0.00 to 100,000.00).
fn rate() -> impl Strategy<Value = Decimal> {
    (0i64..10_000_000i64).prop_map(|cents| Decimal::new(cents, 2))
}

/// Tax percents (0.00 to 30.00).
fn tax_percent() -> impl Strategy<Value = Decimal> {
    (0i64..3_000i64).prop_map(|v| Decimal::new(v, 2))
}

fn line_item() -> impl Strategy<Value = LineItem> {
    (
        "[A-Z]{3}-[0-9]{2}",
        prop::option::weighted(0.9, quantity()),
        prop::option::weighted(0.9, rate()),
        prop::option::weighted(0.9, tax_percent()),
    )
        .prop_map(|(item_code, quantity, unit_rate, tax_percent)| LineItem {
            item_code,
            description: String::new(),
            quantity,
            unit_rate,
            tax_percent,
        })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// subtotal + tax == total for every list, including partial rows.
    #[test]
    fn prop_totals_reconcile(items in prop::collection::vec(line_item(), 0..20)) {
        let totals = LineItemTotals::compute(&items);
        prop_assert!(totals.is_reconciled());
        prop_assert_eq!(totals.subtotal + totals.tax, totals.total);
    }

    /// The document total is the sum of the rounded line totals.
    #[test]
    fn prop_total_matches_line_breakdown(items in prop::collection::vec(line_item(), 0..20)) {
        let line_sum = MoneyMath::sum(
            LineItemTotals::breakdown(&items).iter().map(|line| line.line_total),
        );
        prop_assert_eq!(line_sum, LineItemTotals::compute(&items).total);
    }

    /// Recomputing yields identical figures.
    #[test]
    fn prop_compute_is_idempotent(items in prop::collection::vec(line_item(), 0..20)) {
        prop_assert_eq!(LineItemTotals::compute(&items), LineItemTotals::compute(&items));
    }

    /// Every figure carries at most 2 decimal places.
    #[test]
    fn prop_totals_are_rounded(items in prop::collection::vec(line_item(), 0..20)) {
        let totals = LineItemTotals::compute(&items);
        prop_assert_eq!(MoneyMath::round2(totals.subtotal), totals.subtotal);
        prop_assert_eq!(MoneyMath::round2(totals.tax), totals.tax);
        prop_assert_eq!(MoneyMath::round2(totals.total), totals.total);
    }

    /// Reversing a document negates its totals exactly.
    #[test]
    fn prop_reverse_negates(items in prop::collection::vec(line_item(), 0..20)) {
        let forward = LineItemTotals::compute(&items);
        let reversed = LineItemTotals::compute(&LineItemTotals::reverse(&items));
        prop_assert_eq!(reversed, forward.negate());
        prop_assert_eq!(reversed.abs(), forward.abs());
    }

    /// Item order does not change the totals.
    #[test]
    fn prop_order_independent(items in prop::collection::vec(line_item(), 0..20)) {
        let mut shuffled = items.clone();
        shuffled.reverse();
        prop_assert_eq!(LineItemTotals::compute(&items), LineItemTotals::compute(&shuffled));
    }
}
