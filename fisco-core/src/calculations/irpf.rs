//! Personal income tax (IRPF) for salaried taxpayers.
//!
//! # Steps
//!
//! | Step | Description |
//! |------|-------------|
//! | 1    | Exempt minimum: base + per child + per child under three |
//! | 2    | Taxable income: gross − exempt minimum, never below zero |
//! | 3    | Foral region: the regional scale is the whole tax |
//! | 4    | Common region: national scale + regional scale, both on the same base |
//! | 5    | Effective rate: tax ÷ gross, zero when gross is zero |
//!
//! The tax is the unrounded sum of both halves, rounded once to cents. The
//! national half is rounded on its own and the regional half is whatever is
//! left, so the two reported halves always add up to the total.
//!
//! # Example
//!
//! ```
//! use rust_decimal_macros::dec;
//! use fisco_core::calculations::{ExemptMinimumConfig, IrpfEngine};
//! use fisco_core::{Bracket, BracketTable, Regime, Region};
//!
//! let national = [
//!     Bracket::bounded(dec!(12450), dec!(0.095)),
//!     Bracket::bounded(dec!(20200), dec!(0.12)),
//!     Bracket::bounded(dec!(35200), dec!(0.15)),
//!     Bracket::unbounded(dec!(0.185)),
//! ];
//! let region = Region {
//!     id: "example".to_string(),
//!     name: "Example".to_string(),
//!     regime: Regime::Common,
//!     brackets: BracketTable::new(vec![
//!         Bracket::bounded(dec!(12450), dec!(0.095)),
//!         Bracket::unbounded(dec!(0.12)),
//!     ])
//!     .unwrap(),
//! };
//!
//! let engine = IrpfEngine::new(&national, ExemptMinimumConfig::default());
//! let result = engine.calculate(dec!(18000), 0, 0, &region);
//!
//! // Taxable 12450 is taxed at 9.5% by each half.
//! assert_eq!(result.taxable_income, dec!(12450));
//! assert_eq!(result.annual_amount, dec!(2365.50));
//! ```

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::calculations::common::{non_negative, ratio_or_zero, round_half_up};
use crate::calculations::progressive::{marginal_rate, progressive_tax};
use crate::{Bracket, IrpfResult, Regime, Region, TaxpayerProfile};

/// Amounts that make up the tax-exempt personal and family minimum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExemptMinimumConfig {
    /// Personal minimum every taxpayer is entitled to.
    pub base: Decimal,
    /// Added for each declared child.
    pub per_child: Decimal,
    /// Added on top of `per_child` for each child under three.
    pub per_child_under_three: Decimal,
}

impl Default for ExemptMinimumConfig {
    fn default() -> Self {
        Self {
            base: dec!(5550),
            per_child: dec!(2400),
            per_child_under_three: dec!(1200),
        }
    }
}

/// Region-aware IRPF calculator.
///
/// Holds the national scale shared by every common-regime region; the
/// regional scale comes with each [`Region`].
#[derive(Debug, Clone)]
pub struct IrpfEngine<'a> {
    national: &'a [Bracket],
    minimum: ExemptMinimumConfig,
}

impl<'a> IrpfEngine<'a> {
    pub fn new(
        national: &'a [Bracket],
        minimum: ExemptMinimumConfig,
    ) -> Self {
        Self { national, minimum }
    }

    /// Calculates IRPF for a profile already resolved to its region.
    ///
    /// Marital status and disability level do not affect the result.
    pub fn calculate_for(
        &self,
        profile: &TaxpayerProfile,
        region: &Region,
    ) -> IrpfResult {
        self.calculate(
            profile.gross_annual_salary,
            profile.children,
            profile.children_under_three,
            region,
        )
    }

    /// Calculates IRPF on a gross annual salary.
    pub fn calculate(
        &self,
        gross: Decimal,
        children: u32,
        children_under_three: u32,
        region: &Region,
    ) -> IrpfResult {
        if gross < Decimal::ZERO {
            warn!(%gross, "negative gross salary, treating taxable income as zero");
        }

        let exempt_minimum = self.exempt_minimum(children, children_under_three);
        let taxable_income = self.taxable_income(gross, exempt_minimum);

        let (national_raw, regional_raw) = match region.regime {
            Regime::Foral => (Decimal::ZERO, self.regional_tax(taxable_income, region)),
            Regime::Common => (
                self.national_tax(taxable_income),
                self.regional_tax(taxable_income, region),
            ),
        };
        let annual_amount = round_half_up(national_raw + regional_raw);
        let national_amount = round_half_up(national_raw);
        let regional_amount = annual_amount - national_amount;
        let effective_rate = self.effective_rate(annual_amount, gross);
        let marginal_rate = self.marginal_rate(taxable_income, region);

        debug!(
            region = %region.id,
            regime = region.regime.as_str(),
            %taxable_income,
            %annual_amount,
            "irpf calculated"
        );

        IrpfResult {
            regime: region.regime,
            exempt_minimum,
            taxable_income,
            national_amount,
            regional_amount,
            annual_amount,
            effective_rate,
            marginal_rate,
        }
    }

    /// Personal minimum plus the family increments.
    ///
    /// Children under three count at most once per declared child.
    fn exempt_minimum(
        &self,
        children: u32,
        children_under_three: u32,
    ) -> Decimal {
        let under_three = if children_under_three > children {
            warn!(
                children,
                children_under_three, "more children under three than children, clamping"
            );
            children
        } else {
            children_under_three
        };

        self.minimum.base
            + self.minimum.per_child * Decimal::from(children)
            + self.minimum.per_child_under_three * Decimal::from(under_three)
    }

    fn taxable_income(
        &self,
        gross: Decimal,
        exempt_minimum: Decimal,
    ) -> Decimal {
        non_negative(gross - exempt_minimum)
    }

    fn national_tax(
        &self,
        taxable_income: Decimal,
    ) -> Decimal {
        progressive_tax(taxable_income, self.national)
    }

    fn regional_tax(
        &self,
        taxable_income: Decimal,
        region: &Region,
    ) -> Decimal {
        progressive_tax(taxable_income, region.brackets.brackets())
    }

    fn effective_rate(
        &self,
        tax: Decimal,
        gross: Decimal,
    ) -> Decimal {
        if gross <= Decimal::ZERO {
            return Decimal::ZERO;
        }
        ratio_or_zero(tax, gross)
    }

    fn marginal_rate(
        &self,
        taxable_income: Decimal,
        region: &Region,
    ) -> Decimal {
        let regional = marginal_rate(taxable_income, region.brackets.brackets());
        match region.regime {
            Regime::Foral => regional,
            Regime::Common => regional + marginal_rate(taxable_income, self.national),
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::{BracketTable, DisabilityLevel, MaritalStatus};

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

    fn madrid() -> Region {
        Region {
            id: "madrid".to_string(),
            name: "Comunidad de Madrid".to_string(),
            regime: Regime::Common,
            brackets: BracketTable::new(vec![
                Bracket::bounded(dec!(13362.22), dec!(0.085)),
                Bracket::bounded(dec!(19004.63), dec!(0.107)),
                Bracket::bounded(dec!(35425.68), dec!(0.128)),
                Bracket::bounded(dec!(57320.40), dec!(0.174)),
                Bracket::unbounded(dec!(0.205)),
            ])
            .unwrap(),
        }
    }

    fn pais_vasco() -> Region {
        Region {
            id: "pais-vasco".to_string(),
            name: "País Vasco".to_string(),
            regime: Regime::Foral,
            brackets: BracketTable::new(vec![
                Bracket::bounded(dec!(17360), dec!(0.23)),
                Bracket::bounded(dec!(34720), dec!(0.28)),
                Bracket::bounded(dec!(52080), dec!(0.35)),
                Bracket::bounded(dec!(74200), dec!(0.40)),
                Bracket::unbounded(dec!(0.45)),
            ])
            .unwrap(),
        }
    }

    // =========================================================================
    // exempt_minimum tests
    // =========================================================================

    #[test]
    fn exempt_minimum_without_children_is_base() {
        let national = national();
        let engine = IrpfEngine::new(&national, ExemptMinimumConfig::default());

        assert_eq!(engine.exempt_minimum(0, 0), dec!(5550));
    }

    #[test]
    fn exempt_minimum_adds_children_and_under_three_increments() {
        let national = national();
        let engine = IrpfEngine::new(&national, ExemptMinimumConfig::default());

        // 5550 + 2 × 2400 + 1 × 1200
        assert_eq!(engine.exempt_minimum(2, 1), dec!(11550));
    }

    #[test]
    fn exempt_minimum_clamps_under_three_to_children() {
        let national = national();
        let engine = IrpfEngine::new(&national, ExemptMinimumConfig::default());

        assert_eq!(engine.exempt_minimum(1, 3), dec!(9150));
    }

    // =========================================================================
    // taxable_income tests
    // =========================================================================

    #[test]
    fn taxable_income_subtracts_minimum() {
        let national = national();
        let engine = IrpfEngine::new(&national, ExemptMinimumConfig::default());

        assert_eq!(engine.taxable_income(dec!(30000), dec!(5550)), dec!(24450));
    }

    #[test]
    fn taxable_income_never_negative() {
        let national = national();
        let engine = IrpfEngine::new(&national, ExemptMinimumConfig::default());

        assert_eq!(engine.taxable_income(dec!(4000), dec!(5550)), dec!(0));
    }

    // =========================================================================
    // calculate tests
    // =========================================================================

    #[test]
    fn calculate_common_region_adds_national_and_regional_halves() {
        let national = national();
        let engine = IrpfEngine::new(&national, ExemptMinimumConfig::default());

        let result = engine.calculate(dec!(30000), 0, 0, &madrid());

        assert_eq!(result.exempt_minimum, dec!(5550));
        assert_eq!(result.taxable_income, dec!(24450));
        // 12450 × 0.095 + 7750 × 0.12 + 4250 × 0.15
        assert_eq!(result.national_amount, dec!(2750.25));
        // 13362.22 × 0.085 + 5642.41 × 0.107 + 5445.37 × 0.128 = 2436.53393
        assert_eq!(result.regional_amount, dec!(2436.53));
        assert_eq!(result.annual_amount, dec!(5186.78));
        assert_eq!(result.effective_rate, dec!(5186.78) / dec!(30000));
        assert_eq!(result.marginal_rate, dec!(0.278));
        assert_eq!(result.regime, Regime::Common);
    }

    #[test]
    fn calculate_foral_region_ignores_national_scale() {
        let national = national();
        let engine = IrpfEngine::new(&national, ExemptMinimumConfig::default());

        let result = engine.calculate(dec!(30000), 0, 0, &pais_vasco());

        // 17360 × 0.23 + 7090 × 0.28
        assert_eq!(result.annual_amount, dec!(5978.00));
        assert_eq!(result.national_amount, dec!(0));
        assert_eq!(result.regional_amount, result.annual_amount);
        assert_eq!(result.marginal_rate, dec!(0.28));
    }

    #[test]
    fn calculate_foral_region_is_independent_of_national_table() {
        let national = national();
        let punitive = vec![Bracket::unbounded(dec!(0.90))];
        let region = pais_vasco();

        let with_national = IrpfEngine::new(&national, ExemptMinimumConfig::default())
            .calculate(dec!(45000), 1, 0, &region);
        let with_punitive = IrpfEngine::new(&punitive, ExemptMinimumConfig::default())
            .calculate(dec!(45000), 1, 0, &region);

        assert_eq!(with_national, with_punitive);
        assert_eq!(
            with_national.annual_amount,
            round_half_up(progressive_tax(
                with_national.taxable_income,
                region.brackets.brackets()
            ))
        );
    }

    #[test]
    fn calculate_common_region_depends_on_national_table() {
        let national = national();
        let punitive = vec![Bracket::unbounded(dec!(0.90))];
        let region = madrid();

        let normal = IrpfEngine::new(&national, ExemptMinimumConfig::default())
            .calculate(dec!(45000), 0, 0, &region);
        let heavy = IrpfEngine::new(&punitive, ExemptMinimumConfig::default())
            .calculate(dec!(45000), 0, 0, &region);

        assert!(heavy.annual_amount > normal.annual_amount);
        assert_eq!(heavy.regional_amount, normal.regional_amount);
    }

    #[test]
    fn calculate_rounds_the_sum_of_both_halves_once() {
        let flat = vec![Bracket::unbounded(dec!(0.10))];
        let region = Region {
            brackets: BracketTable::new(flat.clone()).unwrap(),
            ..madrid()
        };
        let engine = IrpfEngine::new(&flat, ExemptMinimumConfig::default());

        // Taxable 0.15: each half is 0.015, the sum is 0.03.
        let result = engine.calculate(dec!(5550.15), 0, 0, &region);

        assert_eq!(result.annual_amount, dec!(0.03));
        assert_eq!(result.national_amount, dec!(0.02));
        assert_eq!(result.regional_amount, dec!(0.01));
    }

    #[test]
    fn calculate_zero_gross_has_zero_rate() {
        let national = national();
        let engine = IrpfEngine::new(&national, ExemptMinimumConfig::default());

        let result = engine.calculate(dec!(0), 0, 0, &madrid());

        assert_eq!(result.annual_amount, dec!(0));
        assert_eq!(result.effective_rate, dec!(0));
    }

    #[test]
    fn calculate_below_minimum_owes_nothing() {
        let national = national();
        let engine = IrpfEngine::new(&national, ExemptMinimumConfig::default());

        let result = engine.calculate(dec!(5000), 0, 0, &madrid());

        assert_eq!(result.taxable_income, dec!(0));
        assert_eq!(result.annual_amount, dec!(0));
        assert_eq!(result.effective_rate, dec!(0));
    }

    #[test]
    fn calculate_children_lower_the_tax() {
        let national = national();
        let engine = IrpfEngine::new(&national, ExemptMinimumConfig::default());

        let without = engine.calculate(dec!(30000), 0, 0, &madrid());
        let with = engine.calculate(dec!(30000), 2, 1, &madrid());

        assert_eq!(with.taxable_income, dec!(18450));
        assert!(with.annual_amount < without.annual_amount);
    }

    #[test]
    fn calculate_for_ignores_marital_status_and_disability() {
        let national = national();
        let engine = IrpfEngine::new(&national, ExemptMinimumConfig::default());
        let region = madrid();

        let plain = TaxpayerProfile::new(dec!(42000), "madrid");
        let declared = TaxpayerProfile {
            marital_status: MaritalStatus::Married,
            disability: DisabilityLevel::Severe,
            ..plain.clone()
        };

        assert_eq!(
            engine.calculate_for(&plain, &region),
            engine.calculate_for(&declared, &region)
        );
    }

    #[test]
    fn effective_rate_increases_with_income() {
        let national = national();
        let engine = IrpfEngine::new(&national, ExemptMinimumConfig::default());
        let region = madrid();

        let low = engine.calculate(dec!(20000), 0, 0, &region);
        let high = engine.calculate(dec!(80000), 0, 0, &region);

        assert!(high.effective_rate > low.effective_rate);
    }
}
