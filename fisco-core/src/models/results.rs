use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{ContributionKind, ContributionSide, Regime};

/// Portion of a taxable base that falls inside one bracket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BracketSlice {
    pub lower: Decimal,
    pub upper: Option<Decimal>,
    pub rate: Decimal,
    /// Base taxed inside this bracket.
    pub taxed_amount: Decimal,
    pub tax: Decimal,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IrpfResult {
    pub regime: Regime,
    pub exempt_minimum: Decimal,
    pub taxable_income: Decimal,
    /// Zero for foral regions.
    pub national_amount: Decimal,
    pub regional_amount: Decimal,
    pub annual_amount: Decimal,
    /// `annual_amount / gross`, zero when gross is zero.
    pub effective_rate: Decimal,
    /// Combined rate of the bracket the last unit of taxable income falls in.
    pub marginal_rate: Decimal,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SsItemAmount {
    pub kind: ContributionKind,
    pub rate: Decimal,
    pub amount: Decimal,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SsResult {
    pub side: ContributionSide,
    /// Items in schedule order.
    pub per_item: Vec<SsItemAmount>,
    pub total: Decimal,
}

/// Per-line drill-down of the indirect tax breakdown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineDetail {
    pub category_id: String,
    pub name: String,
    pub amount: Decimal,
    pub vat_portion: Decimal,
    pub special_portion: Decimal,
    pub topology_label: String,
}

impl LineDetail {
    pub fn total_tax(&self) -> Decimal {
        self.vat_portion + self.special_portion
    }
}

/// Indirect taxes embedded in a set of expenses, by tax category.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndirectTaxResult {
    pub vat4: Decimal,
    pub vat10: Decimal,
    pub vat21: Decimal,
    /// Hydrocarbon tax on fuel and gas.
    pub fuel_excise: Decimal,
    pub insurance_premium_tax: Decimal,
    pub electricity_excise: Decimal,
    /// Alcohol and tobacco.
    pub other_excise: Decimal,
    pub other_direct_taxes: Decimal,
    pub total: Decimal,
    /// Sum of the positive tax-inclusive amounts that were analysed.
    pub spent: Decimal,
    pub lines: Vec<LineDetail>,
}

impl IndirectTaxResult {
    pub fn vat_total(&self) -> Decimal {
        self.vat4 + self.vat10 + self.vat21
    }

    pub fn excise_total(&self) -> Decimal {
        self.fuel_excise + self.insurance_premium_tax + self.electricity_excise + self.other_excise
    }

    /// Every amount multiplied by `factor`, e.g. 12 to annualize monthly expenses.
    pub fn scaled(
        &self,
        factor: Decimal,
    ) -> Self {
        Self {
            vat4: self.vat4 * factor,
            vat10: self.vat10 * factor,
            vat21: self.vat21 * factor,
            fuel_excise: self.fuel_excise * factor,
            insurance_premium_tax: self.insurance_premium_tax * factor,
            electricity_excise: self.electricity_excise * factor,
            other_excise: self.other_excise * factor,
            other_direct_taxes: self.other_direct_taxes * factor,
            total: self.total * factor,
            spent: self.spent * factor,
            lines: self
                .lines
                .iter()
                .map(|line| LineDetail {
                    amount: line.amount * factor,
                    vat_portion: line.vat_portion * factor,
                    special_portion: line.special_portion * factor,
                    ..line.clone()
                })
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    #[test]
    fn scaled_multiplies_buckets_and_lines() {
        let result = IndirectTaxResult {
            vat21: dec!(2),
            fuel_excise: dec!(1),
            total: dec!(3),
            spent: dec!(20),
            lines: vec![LineDetail {
                category_id: "transport".to_string(),
                name: "Gasolina".to_string(),
                amount: dec!(20),
                vat_portion: dec!(2),
                special_portion: dec!(1),
                topology_label: "Impuesto sobre hidrocarburos".to_string(),
            }],
            ..Default::default()
        };

        let annual = result.scaled(dec!(12));

        assert_eq!(annual.vat21, dec!(24));
        assert_eq!(annual.fuel_excise, dec!(12));
        assert_eq!(annual.total, dec!(36));
        assert_eq!(annual.spent, dec!(240));
        assert_eq!(annual.lines[0].amount, dec!(240));
        assert_eq!(annual.lines[0].total_tax(), dec!(36));
        assert_eq!(annual.lines[0].name, "Gasolina");
    }

    #[test]
    fn vat_and_excise_totals_partition_buckets() {
        let result = IndirectTaxResult {
            vat4: dec!(1),
            vat10: dec!(2),
            vat21: dec!(3),
            fuel_excise: dec!(4),
            insurance_premium_tax: dec!(5),
            electricity_excise: dec!(6),
            other_excise: dec!(7),
            other_direct_taxes: dec!(8),
            total: dec!(36),
            ..Default::default()
        };

        assert_eq!(result.vat_total(), dec!(6));
        assert_eq!(result.excise_total(), dec!(22));
        assert_eq!(
            result.vat_total() + result.excise_total() + result.other_direct_taxes,
            result.total
        );
    }
}
