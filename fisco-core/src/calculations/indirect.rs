//! Indirect taxes embedded in tax-inclusive expenses.
//!
//! Every expense is observed as a single price that already contains its
//! taxes. The breakdown works backwards from that price using the line's
//! declared [`TaxTopology`]:
//!
//! | Topology           | Special tax                              | VAT            |
//! |--------------------|------------------------------------------|----------------|
//! | standard           | none                                     | declared rate  |
//! | fuel-excise        | amount ÷ price per liter × excise/liter  | 21% identity   |
//! | electricity-excise | amount ÷ ((1 + s) × 1.21) × s            | 21% identity   |
//! | gas-excise         | amount × s                               | 21% identity   |
//! | alcohol-excise     | amount × s                               | 21% identity   |
//! | tobacco-excise     | amount ÷ 1.21 × s                        | 21% identity   |
//! | insurance-premium  | amount − amount ÷ (1 + s)                | none           |
//! | direct-levy        | amount                                   | none           |
//! | exempt             | none                                     | none           |
//!
//! where the VAT identity is `amount − amount ÷ (1 + r)`. Lines whose amount
//! is zero or negative are skipped, and so are lines whose topology fails
//! [`TaxTopology::validate`]. A category without lines but with a
//! [`FallbackSplit`] is approximated by splitting its total across the 4, 10
//! and 21% rates.
//!
//! # Example
//!
//! ```
//! use rust_decimal_macros::dec;
//! use fisco_core::calculations::indirect_breakdown;
//! use fisco_core::{ExpenseCategory, ExpenseLine, TaxTopology, VatRate};
//!
//! let categories = vec![ExpenseCategory::with_lines(
//!     "insurance",
//!     "Seguros",
//!     vec![ExpenseLine::new(
//!         "Seguro del hogar",
//!         dec!(108),
//!         VatRate::Zero,
//!         TaxTopology::InsurancePremium { special_rate: dec!(0.08) },
//!     )],
//! )];
//!
//! let result = indirect_breakdown(&categories);
//! assert_eq!(result.insurance_premium_tax, dec!(8));
//! assert_eq!(result.total, dec!(8));
//! ```

use rust_decimal::Decimal;
use tracing::{debug, trace, warn};

use crate::calculations::common::embedded_tax;
use crate::{
    ExpenseCategory, ExpenseLine, FallbackSplit, IndirectTaxResult, LineDetail, TaxTopology,
    VatRate,
};

/// Rate used for every topology that carries VAT on top of a special tax.
const GENERAL_VAT: VatRate = VatRate::TwentyOne;

/// Label for the single detail row produced by a fallback category.
const FALLBACK_LABEL: &str = "IVA (estimado)";

/// Where a line's special tax is accumulated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SpecialBucket {
    None,
    Hydrocarbons,
    Electricity,
    InsurancePremium,
    OtherExcise,
    OtherDirect,
}

/// Taxes recovered from one line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct LineTaxes {
    vat_rate: VatRate,
    vat: Decimal,
    bucket: SpecialBucket,
    special: Decimal,
}

impl LineTaxes {
    fn vat_only(
        vat_rate: VatRate,
        amount: Decimal,
    ) -> Self {
        Self {
            vat_rate,
            vat: embedded_tax(amount, vat_rate.fraction()),
            bucket: SpecialBucket::None,
            special: Decimal::ZERO,
        }
    }

    fn general_vat_with(
        amount: Decimal,
        bucket: SpecialBucket,
        special: Decimal,
    ) -> Self {
        Self {
            bucket,
            special,
            ..Self::vat_only(GENERAL_VAT, amount)
        }
    }

    fn special_only(
        bucket: SpecialBucket,
        special: Decimal,
    ) -> Self {
        Self {
            vat_rate: VatRate::Zero,
            vat: Decimal::ZERO,
            bucket,
            special,
        }
    }
}

/// Reverse-derives the taxes inside one positive, tax-inclusive amount.
fn line_taxes(line: &ExpenseLine) -> LineTaxes {
    let amount = line.amount;
    let general = Decimal::ONE + GENERAL_VAT.fraction();

    match line.topology {
        TaxTopology::Standard => LineTaxes::vat_only(line.vat_rate, amount),
        TaxTopology::FuelExcise {
            price_per_unit,
            excise_per_unit,
        } => {
            let liters = amount / price_per_unit;
            LineTaxes::general_vat_with(
                amount,
                SpecialBucket::Hydrocarbons,
                liters * excise_per_unit,
            )
        }
        TaxTopology::ElectricityExcise { special_rate } => {
            let base = amount / ((Decimal::ONE + special_rate) * general);
            LineTaxes::general_vat_with(amount, SpecialBucket::Electricity, base * special_rate)
        }
        TaxTopology::GasExcise { special_rate } => {
            LineTaxes::general_vat_with(amount, SpecialBucket::Hydrocarbons, amount * special_rate)
        }
        TaxTopology::AlcoholExcise { special_rate } => {
            LineTaxes::general_vat_with(amount, SpecialBucket::OtherExcise, amount * special_rate)
        }
        TaxTopology::TobaccoExcise { special_rate } => LineTaxes::general_vat_with(
            amount,
            SpecialBucket::OtherExcise,
            amount / general * special_rate,
        ),
        TaxTopology::InsurancePremium { special_rate } => LineTaxes::special_only(
            SpecialBucket::InsurancePremium,
            embedded_tax(amount, special_rate),
        ),
        TaxTopology::DirectLevy => LineTaxes::special_only(SpecialBucket::OtherDirect, amount),
        TaxTopology::Exempt => LineTaxes::special_only(SpecialBucket::None, Decimal::ZERO),
    }
}

/// VAT per rate for a category entered as a single total.
fn fallback_vat(split: &FallbackSplit) -> [(VatRate, Decimal); 3] {
    let share = |pct: Decimal| split.total * pct / Decimal::ONE_HUNDRED;

    [
        (VatRate::Four, split.vat4_pct),
        (VatRate::Ten, split.vat10_pct),
        (VatRate::TwentyOne, split.vat21_pct),
    ]
    .map(|(rate, pct)| (rate, embedded_tax(share(pct), rate.fraction())))
}

/// Accumulates bucket totals and the per-line detail.
#[derive(Debug, Default)]
struct Accumulator {
    result: IndirectTaxResult,
}

impl Accumulator {
    fn add_vat(
        &mut self,
        rate: VatRate,
        vat: Decimal,
    ) {
        match rate {
            VatRate::Zero => {}
            VatRate::Four => self.result.vat4 += vat,
            VatRate::Ten => self.result.vat10 += vat,
            VatRate::TwentyOne => self.result.vat21 += vat,
        }
    }

    fn add_special(
        &mut self,
        bucket: SpecialBucket,
        amount: Decimal,
    ) {
        match bucket {
            SpecialBucket::None => {}
            SpecialBucket::Hydrocarbons => self.result.fuel_excise += amount,
            SpecialBucket::Electricity => self.result.electricity_excise += amount,
            SpecialBucket::InsurancePremium => self.result.insurance_premium_tax += amount,
            SpecialBucket::OtherExcise => self.result.other_excise += amount,
            SpecialBucket::OtherDirect => self.result.other_direct_taxes += amount,
        }
    }

    fn add_line(
        &mut self,
        category_id: &str,
        line: &ExpenseLine,
    ) {
        if line.amount <= Decimal::ZERO {
            trace!(name = %line.name, amount = %line.amount, "skipping non-positive expense");
            return;
        }
        if let Err(err) = line.topology.validate() {
            warn!(name = %line.name, %err, "skipping expense with invalid tax parameters");
            return;
        }

        let taxes = line_taxes(line);
        trace!(
            name = %line.name,
            topology = line.topology.label(),
            vat = %taxes.vat,
            special = %taxes.special,
            "expense line analysed"
        );

        self.add_vat(taxes.vat_rate, taxes.vat);
        self.add_special(taxes.bucket, taxes.special);
        self.result.spent += line.amount;
        self.result.lines.push(LineDetail {
            category_id: category_id.to_string(),
            name: line.name.clone(),
            amount: line.amount,
            vat_portion: taxes.vat,
            special_portion: taxes.special,
            topology_label: line.topology.label().to_string(),
        });
    }

    fn add_fallback(
        &mut self,
        category: &ExpenseCategory,
        split: &FallbackSplit,
    ) {
        if split.total <= Decimal::ZERO {
            return;
        }

        let declared = split.vat4_pct + split.vat10_pct + split.vat21_pct;
        if declared != Decimal::ONE_HUNDRED {
            warn!(
                category = %category.id,
                %declared,
                "fallback VAT split does not add up to 100%, remainder treated as untaxed"
            );
        }

        let mut vat_portion = Decimal::ZERO;
        for (rate, vat) in fallback_vat(split) {
            self.add_vat(rate, vat);
            vat_portion += vat;
        }
        self.result.spent += split.total;
        self.result.lines.push(LineDetail {
            category_id: category.id.clone(),
            name: category.name.clone(),
            amount: split.total,
            vat_portion,
            special_portion: Decimal::ZERO,
            topology_label: FALLBACK_LABEL.to_string(),
        });
    }

    fn finish(mut self) -> IndirectTaxResult {
        let r = &mut self.result;
        r.total = r.vat4
            + r.vat10
            + r.vat21
            + r.fuel_excise
            + r.insurance_premium_tax
            + r.electricity_excise
            + r.other_excise
            + r.other_direct_taxes;
        self.result
    }
}

/// Breaks the embedded taxes of every category down by tax type.
///
/// Amounts are returned on the same basis as the input (monthly expenses
/// give monthly taxes) and at full precision.
pub fn indirect_breakdown(categories: &[ExpenseCategory]) -> IndirectTaxResult {
    let mut acc = Accumulator::default();

    for category in categories {
        match (&category.fallback, category.lines.is_empty()) {
            (Some(split), true) => acc.add_fallback(category, split),
            _ => {
                for line in &category.lines {
                    acc.add_line(&category.id, line);
                }
            }
        }
    }

    let result = acc.finish();
    debug!(
        categories = categories.len(),
        lines = result.lines.len(),
        total = %result.total,
        "indirect taxes calculated"
    );
    result
}
