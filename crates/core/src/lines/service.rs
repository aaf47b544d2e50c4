//! Subtotal, tax, and grand total for a list of line items.

use tally_shared::MoneyMath;
use tracing::warn;

use super::types::{LineBreakdown, LineItem, LineTotals};

/// Stateless calculator for order and return totals.
///
/// Each line is rounded to the cent once, and document totals are the exact
/// sums of those rounded lines. A payload's line totals, the document total
/// and the VAT rows for the same lines therefore always agree.
pub struct LineItemTotals;

impl LineItemTotals {
    /// Computes document totals.
    ///
    /// Never fails: missing quantities, rates, or tax percents count as zero,
    /// and a line whose figures overflow is skipped with a warning.
    /// Negative quantities flow through unchanged, so a return produces
    /// negative totals. Callers wanting a refund figure take
    /// [`LineTotals::abs`] of the result.
    ///
    /// # Example
    ///
    /// ```
    /// use rust_decimal_macros::dec;
    /// use tally_core::lines::{LineItem, LineItemTotals};
    ///
    /// let items = vec![
    ///     LineItem::new("A", dec!(2), dec!(50), dec!(5)),
    ///     LineItem::new("B", dec!(1), dec!(20), dec!(0)),
    /// ];
    /// let totals = LineItemTotals::compute(&items);
    /// assert_eq!(totals.subtotal, dec!(120.00));
    /// assert_eq!(totals.tax, dec!(5.00));
    /// assert_eq!(totals.total, dec!(125.00));
    /// ```
    #[must_use]
    pub fn compute(items: &[LineItem]) -> LineTotals {
        let mut totals = LineTotals::default();

        for (item, line) in items.iter().zip(Self::breakdown(items)) {
            let accumulated = (
                totals.subtotal.checked_add(line.line_value),
                totals.tax.checked_add(line.line_tax),
                totals.total.checked_add(line.line_total),
            );
            match accumulated {
                (Some(subtotal), Some(tax), Some(total)) => {
                    totals = LineTotals {
                        subtotal,
                        tax,
                        total,
                    };
                }
                _ => warn!(
                    item_code = %item.item_code,
                    "Document totals overflow, skipping line"
                ),
            }
        }

        LineTotals {
            subtotal: MoneyMath::round2(totals.subtotal),
            tax: MoneyMath::round2(totals.tax),
            total: MoneyMath::round2(totals.total),
        }
    }

    /// Rounded per-line figures, in input order.
    #[must_use]
    pub fn breakdown(items: &[LineItem]) -> Vec<LineBreakdown> {
        items.iter().map(LineItem::breakdown).collect()
    }

    /// Negates every quantity, turning a sale into its return and back.
    #[must_use]
    pub fn reverse(items: &[LineItem]) -> Vec<LineItem> {
        items.iter().map(LineItem::negated).collect()
    }
}
