//! Statutory rates and reference prices used when an expense does not carry
//! its own topology parameters.
//!
//! Rates are fractions; per-unit amounts are euros per liter.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// Hydrocarbon excise on petrol, € per liter.
pub const PETROL_EXCISE_PER_LITER: Decimal = dec!(0.473);
/// Hydrocarbon excise on diesel, € per liter.
pub const DIESEL_EXCISE_PER_LITER: Decimal = dec!(0.379);
/// Reference pump price used when a fuel line has no price of its own.
pub const PETROL_PRICE_PER_LITER: Decimal = dec!(1.55);
pub const DIESEL_PRICE_PER_LITER: Decimal = dec!(1.45);

/// Impuesto especial sobre la electricidad.
pub const ELECTRICITY_TAX: Decimal = dec!(0.0511269632);
/// Impuesto sobre primas de seguros.
pub const INSURANCE_PREMIUM_TAX: Decimal = dec!(0.08);
/// Approximate hydrocarbon share of a gas bill.
pub const GAS_TAX_SHARE: Decimal = dec!(0.03);
/// Approximate alcohol excise share of the shelf price.
pub const ALCOHOL_TAX_SHARE: Decimal = dec!(0.12);
/// Tobacco excise as a share of the pre-VAT price.
pub const TOBACCO_TAX_SHARE: Decimal = dec!(0.70);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn excise_is_below_reference_price() {
        assert!(PETROL_EXCISE_PER_LITER < PETROL_PRICE_PER_LITER / dec!(1.21));
        assert!(DIESEL_EXCISE_PER_LITER < DIESEL_PRICE_PER_LITER / dec!(1.21));
    }

    #[test]
    fn shares_are_fractions() {
        for rate in [
            ELECTRICITY_TAX,
            INSURANCE_PREMIUM_TAX,
            GAS_TAX_SHARE,
            ALCOHOL_TAX_SHARE,
            TOBACCO_TAX_SHARE,
        ] {
            assert!(rate > Decimal::ZERO && rate < Decimal::ONE, "{rate}");
        }
    }
}
