//! Decimal-safe money arithmetic.
//!
//! CRITICAL: Never use floating-point for money calculations.
//! Every monetary figure in Tally is a `rust_decimal::Decimal`; these helpers
//! are the only place rounding policy lives.

use rust_decimal::prelude::*;
use rust_decimal::Decimal;

/// Number of decimal places carried by every displayed or persisted amount.
pub const MONEY_SCALE: u32 = 2;

/// Largest difference still considered equal when reconciling rounded figures.
pub const RECONCILE_TOLERANCE: Decimal = Decimal::from_parts(1, 0, 0, false, 2);

/// Stateless money helpers.
///
/// Rounding is half-up in magnitude (`MidpointAwayFromZero`), so a sale and
/// its reversal always round to exactly opposite figures.
pub struct MoneyMath;

impl MoneyMath {
    /// Round to 2 decimal places, half-up. The result always carries
    /// exactly 2 decimal places, so `100` becomes `100.00`.
    ///
    /// # Example
    ///
    /// ```
    /// use rust_decimal_macros::dec;
    /// use tally_shared::types::MoneyMath;
    ///
    /// assert_eq!(MoneyMath::round2(dec!(2.345)), dec!(2.35));
    /// assert_eq!(MoneyMath::round2(dec!(-2.345)), dec!(-2.35));
    /// ```
    #[must_use]
    pub fn round2(value: Decimal) -> Decimal {
        let mut rounded =
            value.round_dp_with_strategy(MONEY_SCALE, RoundingStrategy::MidpointAwayFromZero);
        rounded.rescale(MONEY_SCALE);
        rounded
    }

    /// Exact sum of amounts. No rounding is applied.
    #[must_use]
    pub fn sum<I>(values: I) -> Decimal
    where
        I: IntoIterator<Item = Decimal>,
    {
        values.into_iter().fold(Decimal::ZERO, |acc, v| acc + v)
    }

    /// Exact sum, rounded once at the end.
    #[must_use]
    pub fn sum_rounded<I>(values: I) -> Decimal
    where
        I: IntoIterator<Item = Decimal>,
    {
        Self::round2(Self::sum(values))
    }

    /// Strips the sign for display. Never feed the result back into computation.
    #[must_use]
    pub fn abs(value: Decimal) -> Decimal {
        value.abs()
    }

    /// Treats a missing field as zero.
    #[must_use]
    pub fn or_zero(value: Option<Decimal>) -> Decimal {
        value.unwrap_or(Decimal::ZERO)
    }

    /// `value × percent / 100`, unrounded. `None` if the product overflows.
    #[must_use]
    pub fn percent_of(value: Decimal, percent: Decimal) -> Option<Decimal> {
        value
            .checked_mul(percent)?
            .checked_div(Decimal::ONE_HUNDRED)
    }

    /// True when two figures differ by no more than one cent.
    #[must_use]
    pub fn is_within_tolerance(a: Decimal, b: Decimal) -> bool {
        a.checked_sub(b)
            .is_some_and(|diff| diff.abs() <= RECONCILE_TOLERANCE)
    }
}
