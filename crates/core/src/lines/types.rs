//! Line item domain types.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tally_shared::MoneyMath;
use tracing::warn;

/// A single line on an order or return.
///
/// Numeric fields are optional because a row may be only partially filled
/// while a form is being edited. Missing values count as zero.
///
/// Quantity is signed: returns may store it negative. Use
/// [`LineItem::display_quantity`] for presentation, never for arithmetic.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineItem {
    /// Item code (or the item identifier on order payloads).
    #[serde(default, alias = "itemId")]
    pub item_code: String,
    /// Free-text description.
    #[serde(default)]
    pub description: String,
    /// Signed quantity.
    #[serde(default, alias = "qty")]
    pub quantity: Option<Decimal>,
    /// Price per unit, expected to be non-negative.
    #[serde(default, alias = "rate")]
    pub unit_rate: Option<Decimal>,
    /// Tax rate in percent, expected to be non-negative.
    #[serde(default, alias = "vatRate")]
    pub tax_percent: Option<Decimal>,
}

impl LineItem {
    /// Creates a fully populated line.
    #[must_use]
    pub fn new(
        item_code: impl Into<String>,
        quantity: Decimal,
        unit_rate: Decimal,
        tax_percent: Decimal,
    ) -> Self {
        Self {
            item_code: item_code.into(),
            description: String::new(),
            quantity: Some(quantity),
            unit_rate: Some(unit_rate),
            tax_percent: Some(tax_percent),
        }
    }

    /// Sets the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Quantity with a missing value read as zero.
    #[must_use]
    pub fn quantity(&self) -> Decimal {
        MoneyMath::or_zero(self.quantity)
    }

    /// Unit rate with a missing value read as zero.
    #[must_use]
    pub fn unit_rate(&self) -> Decimal {
        MoneyMath::or_zero(self.unit_rate)
    }

    /// Tax percent with a missing value read as zero.
    #[must_use]
    pub fn tax_percent(&self) -> Decimal {
        MoneyMath::or_zero(self.tax_percent)
    }

    /// Exact `(line_value, line_tax)`, or `None` if either figure, or the
    /// rounded line total, leaves the decimal range.
    #[must_use]
    pub fn checked_figures(&self) -> Option<(Decimal, Decimal)> {
        let value = self.quantity().checked_mul(self.unit_rate())?;
        let tax = MoneyMath::percent_of(value, self.tax_percent())?;
        value.checked_add(tax)?;
        MoneyMath::round2(value).checked_add(MoneyMath::round2(tax))?;
        Some((value, tax))
    }

    /// Like [`LineItem::checked_figures`], with an overflowing line counted
    /// as zero.
    fn figures(&self) -> (Decimal, Decimal) {
        self.checked_figures().unwrap_or_else(|| {
            warn!(
                item_code = %self.item_code,
                "Line figures overflow, counting the line as zero"
            );
            (Decimal::ZERO, Decimal::ZERO)
        })
    }

    /// `quantity × unit_rate`, unrounded.
    #[must_use]
    pub fn line_value(&self) -> Decimal {
        self.figures().0
    }

    /// `line_value × tax_percent / 100`, unrounded.
    #[must_use]
    pub fn line_tax(&self) -> Decimal {
        self.figures().1
    }

    /// `line_value + line_tax`, unrounded.
    #[must_use]
    pub fn line_total(&self) -> Decimal {
        let (value, tax) = self.figures();
        value + tax
    }

    /// Line figures rounded to 2 decimal places.
    ///
    /// Value and tax are rounded separately and the total is their sum, so
    /// a line always reconciles to the cent.
    #[must_use]
    pub fn breakdown(&self) -> LineBreakdown {
        let (value, tax) = self.figures();
        let line_value = MoneyMath::round2(value);
        let line_tax = MoneyMath::round2(tax);
        LineBreakdown {
            line_value,
            line_tax,
            line_total: line_value + line_tax,
        }
    }

    /// Quantity without its sign, for display only.
    #[must_use]
    pub fn display_quantity(&self) -> Decimal {
        MoneyMath::abs(self.quantity())
    }

    /// The same line with its quantity negated.
    #[must_use]
    pub fn negated(&self) -> Self {
        Self {
            quantity: self.quantity.map(|q| -q),
            ..self.clone()
        }
    }

    /// Returns true if the line can be saved: it names an item, has a
    /// nonzero quantity and a positive rate.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        !self.item_code.trim().is_empty()
            && !self.quantity().is_zero()
            && self.unit_rate() > Decimal::ZERO
    }
}

/// Document totals, each rounded to 2 decimal places.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineTotals {
    /// Sum of line values.
    pub subtotal: Decimal,
    /// Sum of line taxes.
    pub tax: Decimal,
    /// `subtotal + tax`.
    pub total: Decimal,
}

impl LineTotals {
    /// Totals with every sign stripped, for showing a refund amount.
    #[must_use]
    pub fn abs(&self) -> Self {
        Self {
            subtotal: self.subtotal.abs(),
            tax: self.tax.abs(),
            total: self.total.abs(),
        }
    }

    /// Totals with every sign flipped.
    #[must_use]
    pub fn negate(&self) -> Self {
        Self {
            subtotal: -self.subtotal,
            tax: -self.tax,
            total: -self.total,
        }
    }

    /// Returns true if `subtotal + tax == total` within one cent.
    #[must_use]
    pub fn is_reconciled(&self) -> bool {
        self.subtotal
            .checked_add(self.tax)
            .is_some_and(|sum| MoneyMath::is_within_tolerance(sum, self.total))
    }
}

/// Per-line figures rounded to 2 decimal places.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LineBreakdown {
    /// Rounded `quantity × unit_rate`.
    pub line_value: Decimal,
    /// Rounded tax on the line.
    pub line_tax: Decimal,
    /// Rounded line total.
    pub line_total: Decimal,
}
