//! Numeric helpers shared by every engine.
//!
//! Rounding to cents, clamping, the reverse tax identity used to pull an
//! embedded tax out of a tax-inclusive price, and a division guarded against
//! a zero denominator.

use rust_decimal::{Decimal, RoundingStrategy};

/// Rounds a decimal value to cents using half-up rounding.
///
/// Values at exactly 0.005 are rounded away from zero.
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use fisco_core::calculations::common::round_half_up;
///
/// assert_eq!(round_half_up(dec!(2436.53393)), dec!(2436.53));
/// assert_eq!(round_half_up(dec!(123.455)), dec!(123.46));
/// assert_eq!(round_half_up(dec!(-123.455)), dec!(-123.46));
/// ```
pub fn round_half_up(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// Clamps a value to zero from below.
///
/// ```
/// use rust_decimal_macros::dec;
/// use fisco_core::calculations::common::non_negative;
///
/// assert_eq!(non_negative(dec!(-10)), dec!(0));
/// assert_eq!(non_negative(dec!(24450)), dec!(24450));
/// ```
pub fn non_negative(value: Decimal) -> Decimal {
    value.max(Decimal::ZERO)
}

/// Tax embedded in a tax-inclusive `amount` levied at `rate` (a fraction).
///
/// `amount − amount / (1 + rate)`. Used for VAT (`rate = 0.21`) and for the
/// insurance premium tax, which is also levied on top of the net premium.
///
/// ```
/// use rust_decimal_macros::dec;
/// use fisco_core::calculations::common::embedded_tax;
///
/// assert_eq!(embedded_tax(dec!(121), dec!(0.21)), dec!(21));
/// assert_eq!(embedded_tax(dec!(108), dec!(0.08)), dec!(8));
/// ```
pub fn embedded_tax(
    amount: Decimal,
    rate: Decimal,
) -> Decimal {
    amount - amount / (Decimal::ONE + rate)
}

/// `numerator / denominator`, or zero when the denominator is zero.
pub fn ratio_or_zero(
    numerator: Decimal,
    denominator: Decimal,
) -> Decimal {
    if denominator.is_zero() {
        Decimal::ZERO
    } else {
        numerator / denominator
    }
}
