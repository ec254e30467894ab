//! Progressive bracket evaluation.
//!
//! Every national, regional and foral income tax figure goes through
//! [`progressive_tax`]. Brackets must be sorted by ascending upper limit with
//! an unbounded last bracket; [`crate::BracketTable`] guarantees this.
//!
//! # Example
//!
//! ```
//! use rust_decimal_macros::dec;
//! use fisco_core::Bracket;
//! use fisco_core::calculations::progressive_tax;
//!
//! let brackets = [
//!     Bracket::bounded(dec!(12450), dec!(0.19)),
//!     Bracket::bounded(dec!(20200), dec!(0.24)),
//!     Bracket::unbounded(dec!(0.30)),
//! ];
//!
//! // 12450 × 0.19 + 7750 × 0.24
//! assert_eq!(progressive_tax(dec!(20200), &brackets), dec!(4225.50));
//! ```

use rust_decimal::Decimal;

use crate::calculations::common::non_negative;
use crate::{Bracket, BracketSlice};

/// Splits `base` across `brackets`, lowest first.
///
/// Only brackets that receive part of the base are yielded. Income exactly at
/// an upper limit stays in the lower bracket. A negative base yields nothing.
pub fn slices(
    base: Decimal,
    brackets: &[Bracket],
) -> impl Iterator<Item = BracketSlice> + '_ {
    let mut remaining = non_negative(base);
    let mut lower = Decimal::ZERO;

    brackets.iter().map_while(move |bracket| {
        if remaining <= Decimal::ZERO {
            return None;
        }

        let taxed_amount = match bracket.upper_limit {
            Some(upper) => remaining.min(upper - lower),
            None => remaining,
        };
        remaining -= taxed_amount;

        let slice = BracketSlice {
            lower,
            upper: bracket.upper_limit,
            rate: bracket.rate,
            taxed_amount,
            tax: taxed_amount * bracket.rate,
        };
        if let Some(upper) = bracket.upper_limit {
            lower = upper;
        }
        Some(slice)
    })
}

/// Total tax owed on `base` under a progressive schedule.
pub fn progressive_tax(
    base: Decimal,
    brackets: &[Bracket],
) -> Decimal {
    slices(base, brackets).map(|s| s.tax).sum()
}

/// Collected form of [`slices`], for bracket visualizations.
pub fn bracket_slices(
    base: Decimal,
    brackets: &[Bracket],
) -> Vec<BracketSlice> {
    slices(base, brackets).collect()
}

/// Rate applied to the last unit of `base`.
///
/// A zero base reports the first bracket's rate.
pub fn marginal_rate(
    base: Decimal,
    brackets: &[Bracket],
) -> Decimal {
    brackets
        .iter()
        .find(|b| b.upper_limit.is_none_or(|upper| base <= upper))
        .map(|b| b.rate)
        .unwrap_or_default()
}

/// Combines two schedules that apply to the same base into one.
///
/// The result has a boundary wherever either input has one, and each segment
/// carries the sum of both rates, so evaluating it equals evaluating both
/// inputs and adding the results.
pub fn merge_scales(
    first: &[Bracket],
    second: &[Bracket],
) -> Vec<Bracket> {
    let mut limits: Vec<Decimal> = first
        .iter()
        .chain(second)
        .filter_map(|b| b.upper_limit)
        .collect();
    limits.sort();
    limits.dedup();

    let mut merged: Vec<Bracket> = limits
        .into_iter()
        .map(|limit| {
            Bracket::bounded(
                limit,
                marginal_rate(limit, first) + marginal_rate(limit, second),
            )
        })
        .collect();

    let top = |brackets: &[Bracket]| brackets.last().map(|b| b.rate).unwrap_or_default();
    merged.push(Bracket::unbounded(top(first) + top(second)));
    merged
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    fn three_brackets() -> Vec<Bracket> {
        vec![
            Bracket::bounded(dec!(12450), dec!(0.19)),
            Bracket::bounded(dec!(20200), dec!(0.24)),
            Bracket::unbounded(dec!(0.30)),
        ]
    }

    fn national() -> Vec<Bracket> {
        vec![
            Bracket::bounded(dec!(12450), dec!(0.095)),
            Bracket::bounded(dec!(20200), dec!(0.12)),
            Bracket::bounded(dec!(35200), dec!(0.15)),
            Bracket::bounded(dec!(60000), dec!(0.185)),
            Bracket::bounded(dec!(300000), dec!(0.225)),
            Bracket::unbounded(dec!(0.245)),
        ]
    }

    fn madrid() -> Vec<Bracket> {
        vec![
            Bracket::bounded(dec!(13362.22), dec!(0.085)),
            Bracket::bounded(dec!(19004.63), dec!(0.107)),
            Bracket::bounded(dec!(35425.68), dec!(0.128)),
            Bracket::bounded(dec!(57320.40), dec!(0.174)),
            Bracket::unbounded(dec!(0.205)),
        ]
    }

    // =========================================================================
    // progressive_tax tests
    // =========================================================================

    #[test]
    fn progressive_tax_is_zero_for_zero_base() {
        assert_eq!(progressive_tax(dec!(0), &three_brackets()), dec!(0));
    }

    #[test]
    fn progressive_tax_is_zero_for_negative_base() {
        assert_eq!(progressive_tax(dec!(-500), &three_brackets()), dec!(0));
    }

    #[test]
    fn progressive_tax_within_first_bracket() {
        assert_eq!(progressive_tax(dec!(10000), &three_brackets()), dec!(1900));
    }

    #[test]
    fn progressive_tax_sums_bracket_decomposition() {
        // 12450 × 0.19 + (20200 − 12450) × 0.24 = 2365.50 + 1860.00
        assert_eq!(progressive_tax(dec!(20200), &three_brackets()), dec!(4225.50));
    }

    #[test]
    fn progressive_tax_boundary_belongs_to_lower_bracket() {
        let brackets = three_brackets();

        assert_eq!(progressive_tax(dec!(12450), &brackets), dec!(2365.50));
        assert_eq!(progressive_tax(dec!(12451), &brackets), dec!(2365.74));
    }

    #[test]
    fn progressive_tax_reaches_unbounded_bracket() {
        // 4225.50 + 9800 × 0.30
        assert_eq!(progressive_tax(dec!(30000), &three_brackets()), dec!(7165.50));
    }

    #[test]
    fn progressive_tax_national_scale() {
        // 1182.75 + 930 + 637.50
        assert_eq!(progressive_tax(dec!(24450), &national()), dec!(2750.25));
    }

    #[test]
    fn progressive_tax_is_monotonic() {
        let brackets = national();
        let mut previous = Decimal::ZERO;

        for step in 0..=400 {
            let base = Decimal::from(step * 1000) + dec!(0.37);
            let tax = progressive_tax(base, &brackets);

            assert!(tax >= previous, "tax decreased at base {base}");
            previous = tax;
        }
    }

    // =========================================================================
    // bracket_slices tests
    // =========================================================================

    #[test]
    fn bracket_slices_only_cover_touched_brackets() {
        let slices = bracket_slices(dec!(15000), &three_brackets());

        assert_eq!(
            slices,
            vec![
                BracketSlice {
                    lower: dec!(0),
                    upper: Some(dec!(12450)),
                    rate: dec!(0.19),
                    taxed_amount: dec!(12450),
                    tax: dec!(2365.50),
                },
                BracketSlice {
                    lower: dec!(12450),
                    upper: Some(dec!(20200)),
                    rate: dec!(0.24),
                    taxed_amount: dec!(2550),
                    tax: dec!(612.00),
                },
            ]
        );
    }

    #[test]
    fn bracket_slices_taxed_amounts_add_up_to_base() {
        let base = dec!(123456.78);
        let slices = bracket_slices(base, &national());
        let covered: Decimal = slices.iter().map(|s| s.taxed_amount).sum();

        assert_eq!(covered, base);
        assert_eq!(slices.len(), 5);
    }

    #[test]
    fn bracket_slices_empty_for_zero_base() {
        assert!(bracket_slices(dec!(0), &three_brackets()).is_empty());
    }

    // =========================================================================
    // marginal_rate tests
    // =========================================================================

    #[test]
    fn marginal_rate_uses_lower_bracket_at_boundary() {
        assert_eq!(marginal_rate(dec!(12450), &three_brackets()), dec!(0.19));
        assert_eq!(marginal_rate(dec!(12450.01), &three_brackets()), dec!(0.24));
    }

    #[test]
    fn marginal_rate_top_bracket() {
        assert_eq!(marginal_rate(dec!(1000000), &three_brackets()), dec!(0.30));
    }

    #[test]
    fn marginal_rate_for_zero_base_is_first_rate() {
        assert_eq!(marginal_rate(dec!(0), &three_brackets()), dec!(0.19));
    }

    // =========================================================================
    // merge_scales tests
    // =========================================================================

    #[test]
    fn merge_scales_sums_rates_per_segment() {
        let merged = merge_scales(&national(), &madrid());

        assert_eq!(merged[0], Bracket::bounded(dec!(12450), dec!(0.180)));
        assert_eq!(merged[1], Bracket::bounded(dec!(13362.22), dec!(0.205)));
        assert_eq!(merged.last(), Some(&Bracket::unbounded(dec!(0.450))));
    }

    #[test]
    fn merge_scales_evaluates_to_sum_of_halves() {
        let national = national();
        let madrid = madrid();
        let merged = merge_scales(&national, &madrid);

        for base in [dec!(0), dec!(9000), dec!(24450), dec!(57320.40), dec!(450000)] {
            assert_eq!(
                progressive_tax(base, &merged),
                progressive_tax(base, &national) + progressive_tax(base, &madrid),
                "mismatch at base {base}"
            );
        }
    }
}
