//! Rounding and ratio helpers shared by the breakdown rows.

use rust_decimal::{Decimal, RoundingStrategy};

/// Rounds a monetary value to cents, with ties going away from zero.
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use cost_core::calculations::common::round_cents;
///
/// assert_eq!(round_cents(dec!(416.6666)), dec!(416.67));
/// assert_eq!(round_cents(dec!(0.005)), dec!(0.01));
/// assert_eq!(round_cents(dec!(579.1650)), dec!(579.17));
/// ```
pub fn round_cents(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// Increase of `total` over `base` in percent, rounded to two places.
///
/// A zero base yields zero instead of dividing by zero.
///
/// ```
/// use rust_decimal::Decimal;
/// use rust_decimal_macros::dec;
/// use cost_core::calculations::common::percent_increase;
///
/// assert_eq!(percent_increase(dec!(8108.34), dec!(5000)), dec!(62.17));
/// assert_eq!(percent_increase(dec!(120), Decimal::ZERO), Decimal::ZERO);
/// ```
pub fn percent_increase(
    total: Decimal,
    base: Decimal,
) -> Decimal {
    if base.is_zero() {
        return Decimal::ZERO;
    }
    let ratio = total
        .saturating_sub(base)
        .checked_div(base)
        .unwrap_or(Decimal::MAX);
    round_cents(ratio.saturating_mul(Decimal::ONE_HUNDRED))
}

/// Sums `values`, stopping at `Decimal::MAX` / `Decimal::MIN` instead of
/// overflowing.
///
/// ```
/// use rust_decimal::Decimal;
/// use rust_decimal_macros::dec;
/// use cost_core::calculations::common::saturating_sum;
///
/// assert_eq!(saturating_sum([dec!(1.50), dec!(2.25)]), dec!(3.75));
/// assert_eq!(saturating_sum([Decimal::MAX, Decimal::ONE]), Decimal::MAX);
/// ```
pub fn saturating_sum<I>(values: I) -> Decimal
where
    I: IntoIterator<Item = Decimal>,
{
    values
        .into_iter()
        .fold(Decimal::ZERO, Decimal::saturating_add)
}
